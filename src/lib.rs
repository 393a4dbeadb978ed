//! Custody-backed transaction submission and lifecycle tracking.
//!
//! Transactions are signed and broadcast by an external custody service;
//! this crate maps chain nonces to custody transaction identifiers, shapes
//! submissions into the custody API's request kinds, and resolves remote
//! statuses into receipts or retryable polling outcomes.

pub mod chain;
pub mod config;
pub mod custody;
pub mod observability;
pub mod wallet;

pub use config::schema::WalletConfig;
pub use wallet::{CustodyWallet, WalletError};

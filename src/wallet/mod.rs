//! Custody transaction lifecycle core.
//!
//! # Data Flow
//! ```text
//! TransactionRequest (destination, value, calldata, nonce, fees)
//!     → request.rs (request kind, fee selection, unit conversion)
//!     → ledger.rs (nonce ↔ custody id tracking, replacements)
//!     → manager.rs (submit / cancel / poll / sender address)
//!     → status.rs (remote status → receipt or retryable outcome)
//! ```
//!
//! # Concurrency
//! - One ledger lock shared by record/lookup/release, held only for the
//!   in-memory mutation, never across a network call
//! - Directory caches tolerate duplicate concurrent fills

pub mod ledger;
pub mod manager;
pub mod request;
pub mod status;
pub mod types;

pub use ledger::NonceLedger;
pub use manager::CustodyWallet;
pub use status::StatusClass;
pub use types::{WalletError, WalletResult};

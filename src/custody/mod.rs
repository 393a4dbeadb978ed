//! Custody service integration.
//!
//! # Data Flow
//! ```text
//! CustodyConfig (API URL, timeouts) + API key (environment)
//!     → client.rs (authenticated REST calls)
//!     → types.rs (wire shapes: accounts, destinations, transactions)
//!     → assets.rs (chain id → custody asset id)
//! ```
//!
//! # Security Constraints
//! - API key ONLY from the environment
//! - Never log the API key or request signatures
//! - All requests have a configurable timeout

pub mod assets;
pub mod client;
pub mod types;

pub use assets::asset_for_chain;
pub use client::{CustodyApi, CustodyClient, CustodyError};
pub use types::{AssetId, CustodyTransaction, TransactionStatus, TxId};

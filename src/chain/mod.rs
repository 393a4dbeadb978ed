//! Chain read access.
//!
//! # Data Flow
//! ```text
//! ChainConfig (RPC URLs, timeouts)
//!     → client.rs (RPC connection with timeouts and failover)
//!     → chain id at wallet construction, receipts during polling
//! ```
//!
//! # Security Constraints
//! - All RPC calls have configurable timeouts
//! - Read-only: this subsystem never signs or broadcasts anything

pub mod client;
pub mod types;

pub use client::{ChainClient, ChainReader};
pub use types::{ChainError, ChainResult};

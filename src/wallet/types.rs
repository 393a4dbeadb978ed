//! Wallet error taxonomy.

use alloy::primitives::Address;
use thiserror::Error;

use crate::chain::ChainError;
use crate::custody::{CustodyError, TransactionStatus, TxId};

/// Errors surfaced by the wallet's public operations.
///
/// `NotYetBroadcasted` and `ReceiptNotYetAvailable` are expected polling
/// outcomes, not faults: callers re-poll on their own cadence until the
/// result is a receipt or `TransactionFailed`.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The connected chain has no custody asset mapping.
    #[error("unsupported chain {0}")]
    UnsupportedChain(u64),

    /// No vault account with the configured display name exists.
    #[error("vault account '{0}' not found")]
    AccountNotFound(String),

    /// The destination is not on the custody allow-list for this asset.
    #[error("destination {0} is not whitelisted")]
    DestinationNotWhitelisted(Address),

    /// The vault account has no deposit addresses for the asset.
    #[error("no addresses found for asset {asset} in account '{account}'")]
    NoAddressesFound { account: String, asset: String },

    /// The vault account does not hold the asset at all.
    #[error("asset {asset} not found in account '{account}'")]
    AssetNotFound { account: String, asset: String },

    /// The vault account holds the asset but nothing is available.
    #[error("insufficient funds: no available {asset} balance in account '{account}'")]
    InsufficientFunds { account: String, asset: String },

    /// The transaction moves no value and carries no calldata.
    #[error("transaction has no value and no data")]
    EmptyTransaction,

    /// The transaction has no destination (contract creation is not
    /// supported through the custody service).
    #[error("transaction has no destination address")]
    MissingDestination,

    /// Still moving through the custody pipeline; poll again later.
    #[error("transaction {id} not yet broadcast (status {status})")]
    NotYetBroadcasted { id: TxId, status: TransactionStatus },

    /// Broadcast (or presumed so) but not yet indexable on chain; poll
    /// again later.
    #[error("receipt for transaction {id} not yet available")]
    ReceiptNotYetAvailable { id: TxId },

    /// Terminal custody-side failure; re-polling will not change this.
    #[error("transaction {id} has been {status}")]
    TransactionFailed { id: TxId, status: TransactionStatus },

    #[error(transparent)]
    Custody(#[from] CustodyError),

    #[error(transparent)]
    Chain(#[from] ChainError),
}

impl WalletError {
    /// Whether the condition is expected to clear on a later poll.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NotYetBroadcasted { .. } | Self::ReceiptNotYetAvailable { .. }
        )
    }
}

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

//! Remote status resolution.
//!
//! Partitions the custody service's transaction statuses into polling
//! outcomes and, for completed transactions, turns the on-chain hash into
//! a receipt.

use alloy::primitives::TxHash;
use alloy::rpc::types::TransactionReceipt;

use crate::chain::ChainReader;
use crate::custody::client::CustodyError;
use crate::custody::types::{CustodyTransaction, TransactionStatus};
use crate::observability::metrics;
use crate::wallet::ledger::NonceLedger;
use crate::wallet::types::{WalletError, WalletResult};

/// Polling-level classification of a remote status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Terminal success; the receipt should be on chain.
    Confirmed,
    /// Terminal failure; re-polling will not change it.
    Failed,
    /// Still moving through the custody pipeline.
    InFlight,
    /// Anything else, including statuses added after this crate was
    /// written: keep waiting rather than fail the caller.
    Indeterminate,
}

/// Classify a remote status. Total over the status enum.
pub fn classify(status: TransactionStatus) -> StatusClass {
    use TransactionStatus::*;
    match status {
        Completed => StatusClass::Confirmed,
        Failed | Rejected | Cancelled | Blocked => StatusClass::Failed,
        Submitted | PendingScreening | PendingAuthorization | Queued | PendingSignature
        | PendingEmailApproval | Pending3rdParty | Broadcasting => StatusClass::InFlight,
        Unknown => StatusClass::Indeterminate,
    }
}

/// Resolve a custody transaction into a receipt or a polling outcome.
///
/// The ledger entry is released only when a receipt actually comes back;
/// every other outcome leaves tracking state untouched so the caller can
/// poll again.
pub async fn resolve_receipt(
    chain: &dyn ChainReader,
    ledger: &NonceLedger,
    tx: &CustodyTransaction,
) -> WalletResult<TransactionReceipt> {
    match classify(tx.status) {
        StatusClass::Confirmed => {
            let hash: TxHash = tx.tx_hash.parse().map_err(|_| {
                CustodyError::Protocol(format!(
                    "transaction {} completed with malformed tx hash '{}'",
                    tx.id, tx.tx_hash
                ))
            })?;
            match chain.transaction_receipt(hash).await? {
                Some(receipt) => {
                    if let Some(nonce) = ledger.release(&tx.id) {
                        tracing::debug!(tx_id = %tx.id, nonce, "Receipt retrieved, nonce released");
                    }
                    metrics::record_poll_outcome("receipt");
                    Ok(receipt)
                }
                // The custody service can mark completion slightly before
                // the receipt is indexable.
                None => {
                    metrics::record_poll_outcome("receipt_pending");
                    Err(WalletError::ReceiptNotYetAvailable { id: tx.id.clone() })
                }
            }
        }
        StatusClass::Failed => {
            metrics::record_poll_outcome("failed");
            Err(WalletError::TransactionFailed {
                id: tx.id.clone(),
                status: tx.status,
            })
        }
        StatusClass::InFlight => {
            metrics::record_poll_outcome("in_flight");
            Err(WalletError::NotYetBroadcasted {
                id: tx.id.clone(),
                status: tx.status,
            })
        }
        StatusClass::Indeterminate => {
            metrics::record_poll_outcome("indeterminate");
            Err(WalletError::ReceiptNotYetAvailable { id: tx.id.clone() })
        }
    }
}

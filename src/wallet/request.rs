//! Custody request construction.
//!
//! # Responsibilities
//! - Decide the request kind (transfer vs. contract call)
//! - Convert wei amounts into the custody service's decimal units
//! - Select fee fields: explicit fee-market, legacy gas price, or a
//!   service-estimated tier

use alloy::primitives::U256;
use alloy::rpc::types::TransactionRequest;

use crate::custody::types::{
    AssetId, ContractCallRequest, ExtraParameters, FeeLevel, FeeParams, Operation, PeerType,
    TransferPeer, TransferRequest,
};
use crate::wallet::types::{WalletError, WalletResult};

const ETH_DECIMALS: usize = 18;
const GWEI_DECIMALS: usize = 9;

/// Which custody request shape a transaction maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Transfer,
    ContractCall,
}

/// A fully-shaped custody submission, ready to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum CustodyRequest {
    Transfer(TransferRequest),
    ContractCall(ContractCallRequest),
}

/// Calldata bytes of a transaction, empty when unset.
pub(crate) fn calldata(tx: &TransactionRequest) -> &[u8] {
    tx.input.input().map(|b| b.as_ref()).unwrap_or(&[])
}

/// Decide the request kind for a transaction.
///
/// A transaction must move value or carry a call; one that does neither is
/// rejected here rather than handed to the custody service.
pub fn request_kind(tx: &TransactionRequest) -> WalletResult<RequestKind> {
    let value = tx.value.unwrap_or_default();
    if !calldata(tx).is_empty() {
        Ok(RequestKind::ContractCall)
    } else if value > U256::ZERO {
        Ok(RequestKind::Transfer)
    } else {
        Err(WalletError::EmptyTransaction)
    }
}

/// Select the fee fields for a submission.
///
/// Explicit fee-market parameters win over a legacy gas price; with
/// neither, the service is asked to estimate at the high tier.
pub fn fee_params(tx: &TransactionRequest) -> FeeParams {
    let max_fee = tx.max_fee_per_gas.unwrap_or_default();
    let tip = tx.max_priority_fee_per_gas.unwrap_or_default();
    let gas_price = tx.gas_price.unwrap_or_default();

    let mut fees = FeeParams::default();
    if max_fee > 0 && tip > 0 {
        fees.max_fee = Some(wei_to_gwei(max_fee));
        fees.priority_fee = Some(wei_to_gwei(tip));
    } else if gas_price > 0 {
        fees.gas_price = Some(wei_to_gwei(gas_price));
    } else {
        fees.fee_level = Some(FeeLevel::High);
    }

    // Omitted gas limit means the service estimates it.
    if let Some(gas) = tx.gas {
        if gas > 0 {
            fees.gas_limit = Some(gas.to_string());
        }
    }
    fees
}

/// Build the custody request for a transaction whose destination has
/// already been resolved to a custody-side identifier.
pub fn build_request(
    tx: &TransactionRequest,
    kind: RequestKind,
    asset_id: AssetId,
    source_id: &str,
    destination_id: &str,
    replace_tx_by_hash: Option<String>,
) -> CustodyRequest {
    let fees = fee_params(tx);
    let amount = wei_to_eth(tx.value.unwrap_or_default());
    let source = TransferPeer {
        peer_type: PeerType::VaultAccount,
        id: source_id.to_string(),
    };

    match kind {
        RequestKind::Transfer => CustodyRequest::Transfer(TransferRequest {
            operation: Operation::Transfer,
            asset_id,
            source,
            destination: TransferPeer {
                peer_type: PeerType::ExternalWallet,
                id: destination_id.to_string(),
            },
            amount,
            replace_tx_by_hash,
            fees,
        }),
        RequestKind::ContractCall => CustodyRequest::ContractCall(ContractCallRequest {
            operation: Operation::ContractCall,
            asset_id,
            source,
            destination: TransferPeer {
                peer_type: PeerType::Contract,
                id: destination_id.to_string(),
            },
            amount,
            extra_parameters: ExtraParameters {
                contract_call_data: alloy::hex::encode_prefixed(calldata(tx)),
            },
            replace_tx_by_hash,
            fees,
        }),
    }
}

/// Render a wei amount as an exact ETH decimal string.
pub(crate) fn wei_to_eth(wei: U256) -> String {
    scaled_decimal(wei, ETH_DECIMALS)
}

/// Render a wei amount as an exact Gwei decimal string.
pub(crate) fn wei_to_gwei(wei: u128) -> String {
    scaled_decimal(U256::from(wei), GWEI_DECIMALS)
}

/// Exact decimal rendering of `value / 10^decimals`. No floats involved,
/// so amounts survive the trip to the custody service unchanged.
fn scaled_decimal(value: U256, decimals: usize) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let integer = value / scale;
    let remainder = value % scale;
    if remainder.is_zero() {
        return integer.to_string();
    }
    let digits = remainder.to_string();
    let fraction = format!("{}{}", "0".repeat(decimals - digits.len()), digits);
    format!("{}.{}", integer, fraction.trim_end_matches('0'))
}

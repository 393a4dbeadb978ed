//! Custody API wire types.
//!
//! Field names follow the custody service's camelCase JSON convention.
//! Optional request fields are omitted from the body entirely when unset;
//! the service treats an absent fee field as "estimate it yourself".

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

/// Destination asset status required for a destination to be usable.
pub const APPROVED: &str = "APPROVED";

/// Opaque transaction identifier assigned by the custody service.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(pub String);

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TxId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Custody-side asset identifier (e.g. `ETH`, `ETH_TEST6`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A vault account holding custody-managed assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultAccount {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub assets: Vec<AssetBalance>,
}

/// Per-asset balance entry of a vault account.
///
/// Balances are decimal strings in the asset's display unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetBalance {
    pub id: AssetId,
    #[serde(default)]
    pub available: String,
    #[serde(default)]
    pub total: String,
}

/// An allow-listed external (non-contract) payment destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistedAccount {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub assets: Vec<DestinationAsset>,
}

/// An allow-listed contract destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistedContract {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub assets: Vec<DestinationAsset>,
}

/// Per-asset entry of a whitelisted destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationAsset {
    pub id: AssetId,
    pub status: String,
    pub address: Address,
    #[serde(default)]
    pub tag: String,
}

/// Deposit address of a vault account asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAddress {
    pub asset_id: AssetId,
    pub address: String,
    #[serde(default)]
    pub tag: String,
}

/// Remote lifecycle status of a custody transaction.
///
/// The custody service advances this through its own state machine; the
/// wallet only ever reads it. Statuses the service adds later deserialize
/// as `Unknown` rather than failing the poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Submitted,
    PendingScreening,
    PendingAuthorization,
    Queued,
    PendingSignature,
    PendingEmailApproval,
    #[serde(rename = "PENDING_3RD_PARTY")]
    Pending3rdParty,
    Broadcasting,
    Completed,
    Failed,
    Rejected,
    Cancelled,
    Blocked,
    #[serde(other)]
    Unknown,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submitted => "SUBMITTED",
            Self::PendingScreening => "PENDING_SCREENING",
            Self::PendingAuthorization => "PENDING_AUTHORIZATION",
            Self::Queued => "QUEUED",
            Self::PendingSignature => "PENDING_SIGNATURE",
            Self::PendingEmailApproval => "PENDING_EMAIL_APPROVAL",
            Self::Pending3rdParty => "PENDING_3RD_PARTY",
            Self::Broadcasting => "BROADCASTING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Blocked => "BLOCKED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A custody transaction as returned by the transaction lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustodyTransaction {
    pub id: TxId,
    pub status: TransactionStatus,
    /// On-chain transaction hash; empty until the service broadcasts.
    #[serde(default)]
    pub tx_hash: String,
}

/// Response to a submission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: TxId,
    pub status: TransactionStatus,
}

/// Response to a cancellation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelResponse {
    pub success: bool,
}

/// Submission operation discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Transfer,
    ContractCall,
}

/// Fee tier for service-side fee estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeLevel {
    High,
    Medium,
    Low,
}

/// Source or destination of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPeer {
    #[serde(rename = "type")]
    pub peer_type: PeerType,
    pub id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeerType {
    VaultAccount,
    ExternalWallet,
    Contract,
}

/// Fee fields shared by both request kinds.
///
/// At most one of {gas_price, max_fee+priority_fee} is populated; when
/// neither is, `fee_level` carries the tier and the service estimates fees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_fee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_level: Option<FeeLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
}

/// A plain value transfer to a whitelisted external destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub operation: Operation,
    pub asset_id: AssetId,
    pub source: TransferPeer,
    pub destination: TransferPeer,
    /// Amount in the asset's display unit, as a decimal string.
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_tx_by_hash: Option<String>,
    #[serde(flatten)]
    pub fees: FeeParams,
}

/// A contract invocation through a whitelisted contract destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCallRequest {
    pub operation: Operation,
    pub asset_id: AssetId,
    pub source: TransferPeer,
    pub destination: TransferPeer,
    pub amount: String,
    pub extra_parameters: ExtraParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_tx_by_hash: Option<String>,
    #[serde(flatten)]
    pub fees: FeeParams,
}

/// Contract call payload carrier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraParameters {
    /// ABI-encoded calldata, 0x-prefixed hex.
    pub contract_call_data: String,
}

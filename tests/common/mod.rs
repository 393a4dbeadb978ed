//! Shared mock collaborators for integration tests.
//!
//! `MockCustody` and `MockChain` stand in for the custody REST API and the
//! chain RPC endpoint. All state sits behind locks so tests can reshape
//! the remote side mid-scenario (e.g., whitelist a destination after a
//! failed lookup, or advance a transaction's status between polls).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use alloy::consensus::{Eip658Value, Receipt, ReceiptEnvelope, ReceiptWithBloom};
use alloy::primitives::{Address, Bloom, TxHash, B256, U256};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use async_trait::async_trait;

use custody_wallet::chain::{ChainReader, ChainResult};
use custody_wallet::custody::client::{CustodyApi, CustodyError};
use custody_wallet::custody::types::{
    AssetAddress, AssetBalance, AssetId, ContractCallRequest, CustodyTransaction,
    DestinationAsset, TransactionResponse, TransactionStatus, TransferRequest, TxId,
    VaultAccount, WhitelistedAccount, WhitelistedContract, APPROVED,
};

/// Programmable custody service double.
#[derive(Default)]
pub struct MockCustody {
    accounts: Mutex<Vec<VaultAccount>>,
    external_wallets: Mutex<Vec<WhitelistedAccount>>,
    contracts: Mutex<Vec<WhitelistedContract>>,
    addresses: Mutex<Vec<AssetAddress>>,
    transactions: Mutex<HashMap<TxId, CustodyTransaction>>,

    /// Requests captured from submissions, in arrival order.
    pub transfers: Mutex<Vec<TransferRequest>>,
    pub contract_calls: Mutex<Vec<ContractCallRequest>>,
    pub cancelled: Mutex<Vec<TxId>>,

    /// How often each registry has been listed, for cache assertions.
    pub account_listings: AtomicU64,
    pub wallet_listings: AtomicU64,
    pub contract_listings: AtomicU64,

    next_id: AtomicU64,
}

impl MockCustody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a vault account named `name` holding an available balance
    /// of `asset`.
    pub fn add_funded_account(&self, name: &str, asset: &str, available: &str) {
        let mut accounts = self.accounts.lock().unwrap();
        let id = format!("vault-{}", accounts.len() + 1);
        accounts.push(VaultAccount {
            id,
            name: name.to_string(),
            assets: vec![AssetBalance {
                id: AssetId::from(asset),
                available: available.to_string(),
                total: available.to_string(),
            }],
        });
    }

    /// Register a vault account that holds no assets at all.
    pub fn add_empty_account(&self, name: &str) {
        self.accounts.lock().unwrap().push(VaultAccount {
            id: "vault-empty".to_string(),
            name: name.to_string(),
            assets: Vec::new(),
        });
    }

    /// Whitelist `address` as an approved external payment destination for
    /// `asset`; returns the custody-side destination id.
    pub fn whitelist_account(&self, address: Address, asset: &str) -> String {
        let mut wallets = self.external_wallets.lock().unwrap();
        let id = format!("wl-{}", wallets.len() + 1);
        wallets.push(WhitelistedAccount {
            id: id.clone(),
            name: "external destination".to_string(),
            assets: vec![DestinationAsset {
                id: AssetId::from(asset),
                status: APPROVED.to_string(),
                address,
                tag: String::new(),
            }],
        });
        id
    }

    /// Whitelist `address` as an approved contract destination for `asset`.
    pub fn whitelist_contract(&self, address: Address, asset: &str) -> String {
        let mut contracts = self.contracts.lock().unwrap();
        let id = format!("ct-{}", contracts.len() + 1);
        contracts.push(WhitelistedContract {
            id: id.clone(),
            name: "target contract".to_string(),
            assets: vec![DestinationAsset {
                id: AssetId::from(asset),
                status: APPROVED.to_string(),
                address,
                tag: String::new(),
            }],
        });
        id
    }

    /// Register a deposit address for the vault account's asset.
    pub fn add_asset_address(&self, asset: &str, address: &str) {
        self.addresses.lock().unwrap().push(AssetAddress {
            asset_id: AssetId::from(asset),
            address: address.to_string(),
            tag: String::new(),
        });
    }

    /// Overwrite the remote state of a transaction, as the custody state
    /// machine would between polls.
    pub fn set_transaction(&self, id: &TxId, status: TransactionStatus, tx_hash: &str) {
        self.transactions.lock().unwrap().insert(
            id.clone(),
            CustodyTransaction {
                id: id.clone(),
                status,
                tx_hash: tx_hash.to_string(),
            },
        );
    }

    fn accept_submission(&self) -> TransactionResponse {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = TxId(format!("ftx-{}", n));
        self.set_transaction(&id, TransactionStatus::Submitted, "");
        TransactionResponse {
            id,
            status: TransactionStatus::Submitted,
        }
    }
}

#[async_trait]
impl CustodyApi for MockCustody {
    async fn list_vault_accounts(&self) -> Result<Vec<VaultAccount>, CustodyError> {
        self.account_listings.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn list_external_wallets(&self) -> Result<Vec<WhitelistedAccount>, CustodyError> {
        self.wallet_listings.fetch_add(1, Ordering::SeqCst);
        Ok(self.external_wallets.lock().unwrap().clone())
    }

    async fn list_contracts(&self) -> Result<Vec<WhitelistedContract>, CustodyError> {
        self.contract_listings.fetch_add(1, Ordering::SeqCst);
        Ok(self.contracts.lock().unwrap().clone())
    }

    async fn get_asset_addresses(
        &self,
        _account_id: &str,
        asset_id: &AssetId,
    ) -> Result<Vec<AssetAddress>, CustodyError> {
        Ok(self
            .addresses
            .lock()
            .unwrap()
            .iter()
            .filter(|a| &a.asset_id == asset_id)
            .cloned()
            .collect())
    }

    async fn transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransactionResponse, CustodyError> {
        self.transfers.lock().unwrap().push(request);
        Ok(self.accept_submission())
    }

    async fn contract_call(
        &self,
        request: ContractCallRequest,
    ) -> Result<TransactionResponse, CustodyError> {
        self.contract_calls.lock().unwrap().push(request);
        Ok(self.accept_submission())
    }

    async fn get_transaction(&self, id: &TxId) -> Result<CustodyTransaction, CustodyError> {
        self.transactions
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| CustodyError::Api {
                status: 404,
                message: format!("transaction {} not found", id),
            })
    }

    async fn cancel_transaction(&self, id: &TxId) -> Result<bool, CustodyError> {
        self.cancelled.lock().unwrap().push(id.clone());
        Ok(true)
    }
}

/// Chain endpoint double with a programmable receipt index.
pub struct MockChain {
    chain_id: u64,
    receipts: Mutex<HashMap<TxHash, TransactionReceipt>>,
}

impl MockChain {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            receipts: Mutex::new(HashMap::new()),
        }
    }

    /// Make a receipt for `hash` retrievable, as if the transaction had
    /// been mined and indexed.
    pub fn index_receipt(&self, hash: TxHash) {
        self.receipts.lock().unwrap().insert(hash, test_receipt(hash));
    }
}

#[async_trait]
impl ChainReader for MockChain {
    async fn chain_id(&self) -> ChainResult<u64> {
        Ok(self.chain_id)
    }

    async fn transaction_receipt(&self, hash: TxHash) -> ChainResult<Option<TransactionReceipt>> {
        Ok(self.receipts.lock().unwrap().get(&hash).cloned())
    }
}

/// A minimal successful legacy receipt.
pub fn test_receipt(hash: TxHash) -> TransactionReceipt {
    TransactionReceipt {
        inner: ReceiptEnvelope::Legacy(ReceiptWithBloom {
            receipt: Receipt {
                status: Eip658Value::Eip658(true),
                cumulative_gas_used: 21_000,
                logs: vec![],
            },
            logs_bloom: Bloom::ZERO,
        }),
        transaction_hash: hash,
        transaction_index: Some(0),
        block_hash: Some(B256::repeat_byte(0x11)),
        block_number: Some(1),
        gas_used: 21_000,
        effective_gas_price: 1_000_000_000,
        blob_gas_used: None,
        blob_gas_price: None,
        from: Address::ZERO,
        to: Some(Address::ZERO),
        contract_address: None,
    }
}

/// A plain value transfer of `value_wei` to `to`.
pub fn transfer_tx(to: Address, value_wei: u128, nonce: u64) -> TransactionRequest {
    let mut tx = TransactionRequest::default();
    tx.to = Some(to.into());
    tx.value = Some(U256::from(value_wei));
    tx.nonce = Some(nonce);
    tx
}

/// A contract call carrying `data` to `to`.
pub fn contract_tx(to: Address, data: Vec<u8>, nonce: u64) -> TransactionRequest {
    let mut tx = TransactionRequest::default();
    tx.to = Some(to.into());
    tx.input = alloy::primitives::Bytes::from(data).into();
    tx.nonce = Some(nonce);
    tx
}

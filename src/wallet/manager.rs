//! The wallet façade.
//!
//! Composes the directory caches, nonce ledger, request builder, and
//! status resolver into the four public operations: submit, cancel, poll
//! for a receipt, and sender address lookup.

use alloy::primitives::{Address, TxKind};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use std::sync::Arc;

use crate::chain::ChainReader;
use crate::custody::assets::asset_for_chain;
use crate::custody::client::{CustodyApi, CustodyError};
use crate::custody::types::{
    AssetId, TxId, VaultAccount, WhitelistedAccount, WhitelistedContract, APPROVED,
};
use crate::observability::metrics;
use crate::wallet::ledger::NonceLedger;
use crate::wallet::request::{build_request, request_kind, CustodyRequest, RequestKind};
use crate::wallet::status::resolve_receipt;
use crate::wallet::types::{WalletError, WalletResult};

/// A wallet whose keys are held by an external custody service.
///
/// All operations may be called concurrently (e.g., a submitter task and a
/// polling task). Directory lookups are cached for the lifetime of the
/// instance; whitelist misses are re-fetched on every call so a destination
/// whitelisted later becomes usable without a restart.
pub struct CustodyWallet {
    custody: Arc<dyn CustodyApi>,
    chain: Arc<dyn ChainReader>,
    vault_account_name: String,
    chain_id: u64,

    /// Tracks which custody transaction is live for each nonce.
    ledger: NonceLedger,

    // Directory caches, filled lazily.
    account: ArcSwapOption<VaultAccount>,
    whitelisted_accounts: DashMap<Address, Arc<WhitelistedAccount>>,
    whitelisted_contracts: DashMap<Address, Arc<WhitelistedContract>>,
}

impl CustodyWallet {
    /// Create a wallet sending from the vault account with the given
    /// display name. Queries the chain id once up front.
    pub async fn new(
        custody: Arc<dyn CustodyApi>,
        chain: Arc<dyn ChainReader>,
        vault_account_name: impl Into<String>,
    ) -> WalletResult<Self> {
        let chain_id = chain.chain_id().await?;
        let vault_account_name = vault_account_name.into();
        tracing::debug!(chain_id, account = %vault_account_name, "Creating custody wallet");

        Ok(Self {
            custody,
            chain,
            vault_account_name,
            chain_id,
            ledger: NonceLedger::new(),
            account: ArcSwapOption::empty(),
            whitelisted_accounts: DashMap::new(),
            whitelisted_contracts: DashMap::new(),
        })
    }

    /// The chain this wallet was constructed against.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Number of submissions currently tracked in the nonce ledger.
    pub fn tracked_submissions(&self) -> usize {
        self.ledger.len()
    }

    fn asset(&self) -> WalletResult<AssetId> {
        asset_for_chain(self.chain_id).ok_or(WalletError::UnsupportedChain(self.chain_id))
    }

    async fn vault_account(&self) -> WalletResult<Arc<VaultAccount>> {
        if let Some(account) = self.account.load_full() {
            return Ok(account);
        }
        let accounts = self.custody.list_vault_accounts().await?;
        let account = accounts
            .into_iter()
            .find(|a| a.name == self.vault_account_name)
            .map(Arc::new)
            .ok_or_else(|| WalletError::AccountNotFound(self.vault_account_name.clone()))?;
        // Two callers can race past the cache check; both resolve the same
        // remote entry, so the duplicate store is harmless.
        self.account.store(Some(account.clone()));
        Ok(account)
    }

    async fn whitelisted_account(&self, address: Address) -> WalletResult<Arc<WhitelistedAccount>> {
        let asset = self.asset()?;
        if let Some(entry) = self.whitelisted_accounts.get(&address) {
            return Ok(entry.clone());
        }
        let wallets = self.custody.list_external_wallets().await?;
        for wallet in wallets {
            if wallet
                .assets
                .iter()
                .any(|a| a.address == address && a.status == APPROVED && a.id == asset)
            {
                let wallet = Arc::new(wallet);
                self.whitelisted_accounts.insert(address, wallet.clone());
                metrics::record_directory_cache_size(
                    "whitelisted_accounts",
                    self.whitelisted_accounts.len(),
                );
                return Ok(wallet);
            }
        }
        // Misses are not cached: the next call re-lists the registry.
        Err(WalletError::DestinationNotWhitelisted(address))
    }

    async fn whitelisted_contract(
        &self,
        address: Address,
    ) -> WalletResult<Arc<WhitelistedContract>> {
        let asset = self.asset()?;
        if let Some(entry) = self.whitelisted_contracts.get(&address) {
            return Ok(entry.clone());
        }
        let contracts = self.custody.list_contracts().await?;
        for contract in contracts {
            if contract
                .assets
                .iter()
                .any(|a| a.address == address && a.status == APPROVED && a.id == asset)
            {
                let contract = Arc::new(contract);
                self.whitelisted_contracts.insert(address, contract.clone());
                metrics::record_directory_cache_size(
                    "whitelisted_contracts",
                    self.whitelisted_contracts.len(),
                );
                return Ok(contract);
            }
        }
        Err(WalletError::DestinationNotWhitelisted(address))
    }

    /// Submit a transaction through the custody service.
    ///
    /// Reusing a nonce whose earlier submission already has an on-chain
    /// hash turns this into a replacement of that transaction; without a
    /// hash the service treats it as an ordinary new submission. Returns
    /// the custody transaction id to poll with.
    pub async fn submit_transaction(&self, tx: &TransactionRequest) -> WalletResult<TxId> {
        let asset = self.asset()?;
        let account = self.vault_account().await?;

        let balance = account.assets.iter().find(|a| a.id == asset).ok_or_else(|| {
            WalletError::AssetNotFound {
                account: account.name.clone(),
                asset: asset.to_string(),
            }
        })?;
        if balance.available == "0" {
            return Err(WalletError::InsufficientFunds {
                account: account.name.clone(),
                asset: asset.to_string(),
            });
        }

        // The ledger lock is only taken for the lookup itself; the prior
        // transaction's hash is fetched after it is dropped.
        let nonce = tx.nonce.unwrap_or_default();
        let replace_tx_by_hash = match self.ledger.lookup(nonce) {
            Some(prior_id) => {
                let prior = self.custody.get_transaction(&prior_id).await?;
                if prior.tx_hash.is_empty() {
                    None
                } else {
                    tracing::debug!(
                        nonce,
                        prior_tx_id = %prior_id,
                        replace_hash = %prior.tx_hash,
                        "Nonce reuse, submitting as replacement"
                    );
                    Some(prior.tx_hash)
                }
            }
            None => None,
        };

        let kind = request_kind(tx)?;
        let to = match tx.to {
            Some(TxKind::Call(address)) => address,
            _ => return Err(WalletError::MissingDestination),
        };
        let destination_id = match kind {
            RequestKind::Transfer => self.whitelisted_account(to).await?.id.clone(),
            RequestKind::ContractCall => self.whitelisted_contract(to).await?.id.clone(),
        };

        let request = build_request(tx, kind, asset, &account.id, &destination_id, replace_tx_by_hash);
        let response = match request {
            CustodyRequest::Transfer(request) => {
                metrics::record_submission("transfer");
                self.custody.transfer(request).await?
            }
            CustodyRequest::ContractCall(request) => {
                metrics::record_submission("contract_call");
                self.custody.contract_call(request).await?
            }
        };

        self.ledger.record(nonce, response.id.clone());
        tracing::debug!(
            tx_id = %response.id,
            status = %response.status,
            nonce,
            "Custody submission accepted"
        );
        Ok(response.id)
    }

    /// Ask the custody service to cancel a not-yet-broadcast submission.
    ///
    /// Tracking state is untouched either way; a cancelled entry is cleaned
    /// up when it is superseded or its replacement's receipt arrives.
    pub async fn cancel_submission(&self, id: &TxId) -> WalletResult<bool> {
        let cancelled = self.custody.cancel_transaction(id).await?;
        tracing::debug!(tx_id = %id, cancelled, "Cancellation requested");
        Ok(cancelled)
    }

    /// Poll a submission for its on-chain receipt.
    ///
    /// `NotYetBroadcasted` and `ReceiptNotYetAvailable` are retryable
    /// outcomes; callers re-invoke on their own cadence. Only a returned
    /// receipt releases the nonce from the ledger.
    pub async fn poll_receipt(&self, id: &TxId) -> WalletResult<TransactionReceipt> {
        let tx = self.custody.get_transaction(id).await?;
        resolve_receipt(self.chain.as_ref(), &self.ledger, &tx).await
    }

    /// The vault account's deposit address for the chain's asset.
    pub async fn sender_address(&self) -> WalletResult<Address> {
        let asset = self.asset()?;
        let account = self.vault_account().await?;
        let addresses = self
            .custody
            .get_asset_addresses(&account.id, &asset)
            .await?;
        let first = addresses.first().ok_or_else(|| WalletError::NoAddressesFound {
            account: account.name.clone(),
            asset: asset.to_string(),
        })?;
        first.address.parse().map_err(|e| {
            WalletError::Custody(CustodyError::Protocol(format!(
                "asset address '{}' is not a valid chain address: {}",
                first.address, e
            )))
        })
    }
}

impl std::fmt::Debug for CustodyWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustodyWallet")
            .field("vault_account_name", &self.vault_account_name)
            .field("chain_id", &self.chain_id)
            .field("tracked_submissions", &self.ledger.len())
            .finish()
    }
}

//! Custody REST API client.
//!
//! # Responsibilities
//! - Authenticated request/response against the custody service
//! - Map non-2xx responses to typed errors with the response body attached
//! - Single bounded attempt per call; retry policy belongs to the caller

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::schema::CustodyConfig;
use crate::custody::types::{
    AssetAddress, AssetId, CancelResponse, ContractCallRequest, CustodyTransaction,
    TransactionResponse, TransferRequest, TxId, VaultAccount, WhitelistedAccount,
    WhitelistedContract,
};
use crate::observability::metrics;

/// Environment variable name for the custody API key.
pub const API_KEY_ENV_VAR: &str = "CUSTODY_API_KEY";

/// Errors that can occur while talking to the custody service.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// Transport-level failure (connect, timeout, decode).
    #[error("custody API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("custody API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Client-side configuration problem.
    #[error("custody client configuration: {0}")]
    Config(String),

    /// The service answered 2xx but the payload violates its own contract.
    #[error("malformed custody response: {0}")]
    Protocol(String),
}

/// The custody service as seen by the wallet.
///
/// One method per remote operation; implementations perform exactly one
/// bounded request per call.
#[async_trait]
pub trait CustodyApi: Send + Sync {
    async fn list_vault_accounts(&self) -> Result<Vec<VaultAccount>, CustodyError>;
    async fn list_external_wallets(&self) -> Result<Vec<WhitelistedAccount>, CustodyError>;
    async fn list_contracts(&self) -> Result<Vec<WhitelistedContract>, CustodyError>;
    async fn get_asset_addresses(
        &self,
        account_id: &str,
        asset_id: &AssetId,
    ) -> Result<Vec<AssetAddress>, CustodyError>;
    async fn transfer(&self, request: TransferRequest)
        -> Result<TransactionResponse, CustodyError>;
    async fn contract_call(
        &self,
        request: ContractCallRequest,
    ) -> Result<TransactionResponse, CustodyError>;
    async fn get_transaction(&self, id: &TxId) -> Result<CustodyTransaction, CustodyError>;
    async fn cancel_transaction(&self, id: &TxId) -> Result<bool, CustodyError>;
}

/// Custody REST API client.
#[derive(Clone)]
pub struct CustodyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl CustodyClient {
    /// Create a client against `config.api_url` with the given API key.
    pub fn new(config: &CustodyConfig, api_key: String) -> Result<Self, CustodyError> {
        let base_url: url::Url = config.api_url.parse().map_err(|e| {
            CustodyError::Config(format!("invalid API URL '{}': {}", config.api_url, e))
        })?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::info!(api_url = %base_url, "Custody client initialized");

        Ok(Self {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Create a client reading the API key from `CUSTODY_API_KEY`.
    pub fn from_env(config: &CustodyConfig) -> Result<Self, CustodyError> {
        let api_key = std::env::var(API_KEY_ENV_VAR).map_err(|_| {
            CustodyError::Config(format!("environment variable {} not set", API_KEY_ENV_VAR))
        })?;
        Self::new(config, api_key)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CustodyError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CustodyError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &'static str,
    ) -> Result<T, CustodyError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .send()
            .await;
        metrics::record_custody_request(endpoint, response.is_ok());
        Self::decode(response?).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        endpoint: &'static str,
    ) -> Result<T, CustodyError> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await;
        metrics::record_custody_request(endpoint, response.is_ok());
        Self::decode(response?).await
    }
}

#[async_trait]
impl CustodyApi for CustodyClient {
    async fn list_vault_accounts(&self) -> Result<Vec<VaultAccount>, CustodyError> {
        self.get_json("/v1/vault/accounts", "list_vault_accounts").await
    }

    async fn list_external_wallets(&self) -> Result<Vec<WhitelistedAccount>, CustodyError> {
        self.get_json("/v1/external_wallets", "list_external_wallets").await
    }

    async fn list_contracts(&self) -> Result<Vec<WhitelistedContract>, CustodyError> {
        self.get_json("/v1/contracts", "list_contracts").await
    }

    async fn get_asset_addresses(
        &self,
        account_id: &str,
        asset_id: &AssetId,
    ) -> Result<Vec<AssetAddress>, CustodyError> {
        let path = format!("/v1/vault/accounts/{}/{}/addresses", account_id, asset_id);
        self.get_json(&path, "get_asset_addresses").await
    }

    async fn transfer(
        &self,
        request: TransferRequest,
    ) -> Result<TransactionResponse, CustodyError> {
        self.post_json("/v1/transactions", &request, "transfer").await
    }

    async fn contract_call(
        &self,
        request: ContractCallRequest,
    ) -> Result<TransactionResponse, CustodyError> {
        self.post_json("/v1/transactions", &request, "contract_call").await
    }

    async fn get_transaction(&self, id: &TxId) -> Result<CustodyTransaction, CustodyError> {
        let path = format!("/v1/transactions/{}", id);
        self.get_json(&path, "get_transaction").await
    }

    async fn cancel_transaction(&self, id: &TxId) -> Result<bool, CustodyError> {
        let path = format!("/v1/transactions/{}/cancel", id);
        let response: CancelResponse = self
            .post_json(&path, &serde_json::json!({}), "cancel_transaction")
            .await?;
        Ok(response.success)
    }
}

impl std::fmt::Debug for CustodyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // api_key intentionally left out.
        f.debug_struct("CustodyClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

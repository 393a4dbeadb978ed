//! Chain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint
//! - Query chain id and transaction receipts
//! - Handle timeouts and network errors gracefully

use alloy::primitives::TxHash;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::types::{ChainError, ChainResult};
use crate::config::schema::ChainConfig;
use crate::observability::metrics;

/// Read access to the chain, as seen by the wallet.
///
/// `transaction_receipt` returns `Ok(None)` when the hash is unknown to the
/// endpoint; during polling that means "not yet indexable", not an error.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn chain_id(&self) -> ChainResult<u64>;
    async fn transaction_receipt(&self, hash: TxHash) -> ChainResult<Option<TransactionReceipt>>;
}

/// Chain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct ChainClient {
    /// List of providers (primary + failovers).
    providers: Vec<Arc<dyn Provider + Send + Sync>>,
    /// Configuration.
    config: ChainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a new chain client.
    pub fn new(config: ChainConfig) -> ChainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            ChainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(
            Arc::new(ProviderBuilder::new().connect_http(primary_url))
                as Arc<dyn Provider + Send + Sync>,
        );

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(Arc::new(ProviderBuilder::new().connect_http(url))
                    as Arc<dyn Provider + Send + Sync>);
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        tracing::info!(
            rpc_url = %config.rpc_url,
            failovers = config.failover_urls.len(),
            "Chain client initialized"
        );

        Ok(Self {
            providers,
            config,
            timeout_duration,
        })
    }

    /// Connect to the configured endpoints and verify the chain ID before
    /// handing the client out.
    pub async fn connect(config: ChainConfig) -> ChainResult<Self> {
        let client = Self::new(config)?;
        client.verify_chain_id().await?;
        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> ChainResult<()> {
        let chain_id = self.get_chain_id().await?;
        Self::check_chain_id(self.config.chain_id, chain_id)
    }

    fn check_chain_id(expected: u64, actual: u64) -> ChainResult<()> {
        if actual != expected {
            return Err(ChainError::ChainMismatch { expected, actual });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> ChainResult<u64> {
        let mut all_timed_out = true;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    all_timed_out = false;
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        metrics::record_endpoint_health("chain_rpc", false);
        if all_timed_out {
            return Err(ChainError::Timeout(self.config.rpc_timeout_secs));
        }
        Err(ChainError::Rpc("All RPC providers failed".to_string()))
    }

    /// Get a transaction receipt by hash. `None` means the endpoint does not
    /// know the hash yet.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> ChainResult<Option<TransactionReceipt>> {
        let mut all_timed_out = true;
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_transaction_receipt(tx_hash);
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    all_timed_out = false;
                    tracing::warn!(provider_idx = i, error = %e, "RPC error");
                }
                Err(_) => tracing::warn!(provider_idx = i, "RPC timeout"),
            }
        }
        metrics::record_endpoint_health("chain_rpc", false);
        if all_timed_out {
            return Err(ChainError::Timeout(self.config.rpc_timeout_secs));
        }
        Err(ChainError::Rpc("All providers failed to get receipt".to_string()))
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

#[async_trait]
impl ChainReader for ChainClient {
    async fn chain_id(&self) -> ChainResult<u64> {
        self.get_chain_id().await
    }

    async fn transaction_receipt(&self, hash: TxHash) -> ChainResult<Option<TransactionReceipt>> {
        self.get_transaction_receipt(hash).await
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, URLs parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WalletConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use crate::config::schema::WalletConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if value.is_empty() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    } else if value.parse::<url::Url>().is_err() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("'{}' is not a valid URL", value),
        });
    }
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &WalletConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "custody.api_url", &config.custody.api_url);
    check_url(&mut errors, "chain.rpc_url", &config.chain.rpc_url);
    for (i, url) in config.chain.failover_urls.iter().enumerate() {
        check_url(&mut errors, &format!("chain.failover_urls[{}]", i), url);
    }

    if config.custody.vault_account_name.is_empty() {
        errors.push(ValidationError {
            field: "custody.vault_account_name".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if config.custody.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "custody.request_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "chain.rpc_timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if config.chain.chain_id == 0 {
        errors.push(ValidationError {
            field: "chain.chain_id".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

use std::sync::Arc;

use tracing::debug;

use crate::config::{ClientConfig, Environment};
use crate::error::Error;
use crate::executor::Executor;
use crate::groups::{Accounting, Clients, IntraTransfer, Loans, Products, Savings};
use crate::transport::build_http_client;

/// Entry point of the SDK: one API key, one environment, one connection pool.
///
/// Every accessor returns a fresh endpoint group with its own executor over
/// the shared configuration.
#[derive(Debug)]
pub struct WoodCore {
    config: Arc<ClientConfig>,
    http_client: reqwest::Client,
}

impl WoodCore {
    /// Create a client for an API key, routed by the key's prefix.
    ///
    /// # Errors
    /// [`Error::Configuration`] if the key is missing or the HTTP client
    /// cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, Error> {
        Self::from_config(ClientConfig::new(api_key)?)
    }

    /// Create client from configuration
    ///
    /// # Errors
    /// [`Error::Configuration`] if the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, Error> {
        let http_client = build_http_client(&config)?;
        debug!(
            environment = config.environment().as_str(),
            base_url = config.base_url(),
            "woodcore client configured"
        );
        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }

    /// Create a client from `WOODCORE_*` environment variables.
    ///
    /// # Errors
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(ClientConfig::from_env()?)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.config.environment()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.config.base_url()
    }

    /// A new executor for hand-built descriptors.
    #[must_use]
    pub fn executor(&self) -> Executor {
        Executor::new(self.http_client.clone(), Arc::clone(&self.config))
    }

    /// General ledger accounts and journal entries.
    #[must_use]
    pub fn accounting(&self) -> Accounting {
        Accounting::new(self.executor())
    }

    /// Customer accounts.
    #[must_use]
    pub fn clients(&self) -> Clients {
        Clients::new(self.executor())
    }

    /// Transfers between accounts of the same bank.
    #[must_use]
    pub fn intra_transfer(&self) -> IntraTransfer {
        IntraTransfer::new(self.executor())
    }

    /// Loan lifecycle.
    #[must_use]
    pub fn loans(&self) -> Loans {
        Loans::new(self.executor())
    }

    /// Savings, loan and fixed deposit product catalogs.
    #[must_use]
    pub fn products(&self) -> Products {
        Products::new(self.executor())
    }

    /// Savings and fixed deposit account lifecycle.
    #[must_use]
    pub fn savings(&self) -> Savings {
        Savings::new(self.executor())
    }
}

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokengate_auth::{Authenticator, EthAddress, JsonRpcOracle, OwnershipOracle};

use crate::config::Config;
use crate::media::MediaFile;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<Authenticator>,
    pub media: Arc<MediaFile>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let contract: EthAddress = config
            .chain
            .contract_address
            .parse()
            .context("invalid chain.contract_address")?;

        let oracle: Arc<dyn OwnershipOracle> = match &config.chain.rpc_url {
            Some(url) => Arc::new(JsonRpcOracle::with_endpoint(url.clone(), contract)),
            None => Arc::new(JsonRpcOracle::new(
                config.chain.chain_id,
                &config.chain.infura_key,
                contract,
            )?),
        };

        Self::with_oracle(config, oracle)
    }

    /// Build state around an injected oracle; tests substitute a canned one.
    pub fn with_oracle(config: &Config, oracle: Arc<dyn OwnershipOracle>) -> anyhow::Result<Self> {
        let media = MediaFile::resolve(Path::new(&config.media.dir), config.media.name.as_deref())?;
        Ok(Self {
            auth: Arc::new(Authenticator::new(oracle)),
            media: Arc::new(media),
            config: Arc::new(config.clone()),
        })
    }
}

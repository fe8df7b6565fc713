use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub chain: ChainConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChainConfig {
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Infura project key; ignored when `rpc_url` is set.
    #[serde(default)]
    pub infura_key: String,
    /// Full JSON-RPC endpoint override, taking precedence over the chain
    /// registry.
    pub rpc_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    #[serde(default = "default_media_dir")]
    pub dir: String,
    /// File name inside `dir`; the first `*.mp4` found when unset.
    pub name: Option<String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            contract_address: default_contract_address(),
            chain_id: default_chain_id(),
            infura_key: String::new(),
            rpc_url: None,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            dir: default_media_dir(),
            name: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8082
}
fn default_contract_address() -> String {
    "0xefAB18061C57C458c52661f50f5b83B600392ed6".into()
}
fn default_chain_id() -> u64 {
    8453
} // base-mainnet
fn default_media_dir() -> String {
    "raw".into()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config: Config = Figment::new()
            .merge(Toml::file("tokengate.toml"))
            .merge(Env::prefixed("TOKENGATE_"))
            .extract()?;
        Ok(config)
    }
}

//! Known Infura-backed networks

pub struct ChainDetail {
    pub chain_id: u64,
    pub name: &'static str,
}

pub const KNOWN_CHAINS: &[ChainDetail] = &[
    ChainDetail { chain_id: 1, name: "mainnet" },
    ChainDetail { chain_id: 11155111, name: "sepolia" },
    ChainDetail { chain_id: 42161, name: "arbitrum-mainnet" },
    ChainDetail { chain_id: 80001, name: "polygon-mumbai" },
    ChainDetail { chain_id: 137, name: "polygon-mainnet" },
    ChainDetail { chain_id: 10, name: "optimism-mainnet" },
    ChainDetail { chain_id: 8453, name: "base-mainnet" },
    ChainDetail { chain_id: 84532, name: "base-sepolia" },
    ChainDetail { chain_id: 17000, name: "holesky" },
    ChainDetail { chain_id: 59144, name: "linea-mainnet" },
    ChainDetail { chain_id: 59145, name: "linea-sepolia" },
];

pub fn chain_name(chain_id: u64) -> Option<&'static str> {
    KNOWN_CHAINS
        .iter()
        .find(|c| c.chain_id == chain_id)
        .map(|c| c.name)
}

/// JSON-RPC endpoint for a known chain.
pub fn rpc_url(chain_id: u64, api_key: &str) -> Option<String> {
    chain_name(chain_id).map(|name| format!("https://{name}.infura.io/v3/{api_key}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_chain() {
        assert_eq!(chain_name(8453), Some("base-mainnet"));
        assert_eq!(
            rpc_url(1, "abc123").as_deref(),
            Some("https://mainnet.infura.io/v3/abc123")
        );
    }

    #[test]
    fn unknown_chain_is_none() {
        assert_eq!(chain_name(424242), None);
        assert!(rpc_url(424242, "abc123").is_none());
    }
}

//! EVM chain identifiers, the supported-chain registry and RPC map construction.
//!
//! Everything here is pure and evaluated once at startup by
//! [`crate::core::resolver`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::error::ConfigError;

// ============================================================================
// ChainId
// ============================================================================

/// Numeric identifier of an EVM network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

/// Ethereum mainnet.
pub const MAINNET: ChainId = ChainId(1);

/// Sepolia public test network.
pub const SEPOLIA: ChainId = ChainId(11_155_111);

/// Chains the application is willing to operate on.
pub const SUPPORTED_CHAINS: &[ChainId] = &[MAINNET, SEPOLIA];

impl ChainId {
    /// `0x`-prefixed hex form used by EIP-1193 requests.
    pub fn to_hex(self) -> String {
        format!("0x{:x}", self.0)
    }

    /// Parse the `0x`-prefixed hex form returned by `eth_chainId` and `chainChanged`.
    ///
    /// The prefix is mandatory and must be followed by hex digits only.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X"))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        u64::from_str_radix(digits, 16).ok().map(Self)
    }

    /// Human-readable network name from the registry.
    pub fn name(self) -> &'static str {
        chain_info(self).map_or("Unknown", |info| info.name)
    }

    /// Whether this chain is in [`SUPPORTED_CHAINS`].
    pub fn is_supported(self) -> bool {
        SUPPORTED_CHAINS.contains(&self)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Chain Registry
// ============================================================================

/// Native currency description for `wallet_addEthereumChain`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

const ETHER: NativeCurrency = NativeCurrency {
    name: "Ether",
    symbol: "ETH",
    decimals: 18,
};

/// Static metadata for a supported chain.
#[derive(Clone, Debug)]
pub struct ChainInfo {
    pub id: ChainId,
    pub name: &'static str,
    pub native_currency: NativeCurrency,
    /// Infura network slug, used when an Infura key is configured.
    pub infura_network: &'static str,
    /// Public fallback endpoints, in preference order.
    pub public_rpc_urls: &'static [&'static str],
    pub explorer_url: &'static str,
}

/// Registry of supported chains.
pub fn chain_info(chain_id: ChainId) -> Option<ChainInfo> {
    match chain_id {
        MAINNET => Some(ChainInfo {
            id: MAINNET,
            name: "Ethereum Mainnet",
            native_currency: ETHER,
            infura_network: "mainnet",
            public_rpc_urls: &[
                "https://ethereum-rpc.publicnode.com",
                "https://cloudflare-eth.com",
            ],
            explorer_url: "https://etherscan.io",
        }),
        SEPOLIA => Some(ChainInfo {
            id: SEPOLIA,
            name: "Sepolia",
            native_currency: NativeCurrency {
                name: "Sepolia Ether",
                symbol: "SepoliaETH",
                decimals: 18,
            },
            infura_network: "sepolia",
            public_rpc_urls: &[
                "https://ethereum-sepolia-rpc.publicnode.com",
                "https://rpc.sepolia.org",
            ],
            explorer_url: "https://sepolia.etherscan.io",
        }),
        _ => None,
    }
}

/// Candidate RPC URLs per chain, before [`build_rpc_map`] picks one.
pub type RpcSource = BTreeMap<ChainId, Vec<String>>;

/// One RPC endpoint per chain.
pub type RpcMap = BTreeMap<ChainId, String>;

/// Build the candidate RPC list for every supported chain.
///
/// With an Infura key the Infura endpoint comes first. Without one the slot
/// is left empty so that [`build_rpc_map`] falls through to public endpoints.
pub fn rpc_source(infura_key: Option<&str>) -> RpcSource {
    SUPPORTED_CHAINS
        .iter()
        .filter_map(|&id| chain_info(id))
        .map(|info| {
            let infura = match infura_key.map(str::trim) {
                Some(key) if !key.is_empty() => {
                    format!("https://{}.infura.io/v3/{}", info.infura_network, key)
                }
                _ => String::new(),
            };
            let mut urls = vec![infura];
            urls.extend(info.public_rpc_urls.iter().map(|u| u.to_string()));
            (info.id, urls)
        })
        .collect()
}

/// Select the first non-blank candidate for every chain in `source`.
pub fn build_rpc_map(source: &RpcSource) -> Result<RpcMap, ConfigError> {
    source
        .iter()
        .map(|(&chain, candidates)| {
            candidates
                .iter()
                .map(|url| url.trim())
                .find(|url| !url.is_empty())
                .map(|url| (chain, url.to_string()))
                .ok_or(ConfigError::MissingRpcUrl { chain })
        })
        .collect()
}

// ============================================================================
// Default Chain Resolution
// ============================================================================

/// Build mode the bundle was produced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RuntimeMode {
    Development,
    #[default]
    Production,
}

impl RuntimeMode {
    /// Parse `development` / `production`; anything else yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" => Some(Self::Development),
            "production" => Some(Self::Production),
            _ => None,
        }
    }
}

/// Explicit network selection that takes precedence over [`RuntimeMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NetworkOverride {
    Mainnet,
    Sepolia,
}

impl NetworkOverride {
    /// Case-insensitive, whitespace-tolerant parse. Unknown values are ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Some(Self::Mainnet),
            "sepolia" => Some(Self::Sepolia),
            _ => None,
        }
    }

    pub fn chain_id(self) -> ChainId {
        match self {
            Self::Mainnet => MAINNET,
            Self::Sepolia => SEPOLIA,
        }
    }
}

/// Pick the default chain: override, then runtime mode, then mainnet.
pub fn resolve_default_chain(network_override: Option<&str>, mode: RuntimeMode) -> ChainId {
    if let Some(chain) = network_override.and_then(NetworkOverride::parse) {
        return chain.chain_id();
    }
    match mode {
        RuntimeMode::Development => SEPOLIA,
        RuntimeMode::Production => MAINNET,
    }
}

// ============================================================================
// Add-chain Parameters
// ============================================================================

/// EIP-3085 `wallet_addEthereumChain` parameter object.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl AddEthereumChainParameter {
    /// Parameters for `chain_id`, using the resolved RPC endpoint.
    ///
    /// Returns `None` for chains outside the registry; callers then fall back
    /// to a plain switch request.
    pub fn for_chain(chain_id: ChainId, rpc_map: &RpcMap) -> Option<Self> {
        let info = chain_info(chain_id)?;
        let rpc_url = rpc_map.get(&chain_id)?;
        Some(Self {
            chain_id: chain_id.to_hex(),
            chain_name: info.name.to_string(),
            native_currency: info.native_currency,
            rpc_urls: vec![rpc_url.clone()],
            block_explorer_urls: vec![info.explorer_url.to_string()],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_regardless_of_mode() {
        for raw in ["sepolia", "SEPOLIA", "  Sepolia ", "\tsePoLia\n"] {
            for mode in [RuntimeMode::Development, RuntimeMode::Production] {
                assert_eq!(resolve_default_chain(Some(raw), mode), SEPOLIA);
            }
        }
        for raw in ["mainnet", "MainNet", " mainnet  "] {
            for mode in [RuntimeMode::Development, RuntimeMode::Production] {
                assert_eq!(resolve_default_chain(Some(raw), mode), MAINNET);
            }
        }
    }

    #[test]
    fn test_mode_fallback() {
        assert_eq!(resolve_default_chain(None, RuntimeMode::Development), SEPOLIA);
        assert_eq!(resolve_default_chain(None, RuntimeMode::Production), MAINNET);
        assert_eq!(resolve_default_chain(Some(""), RuntimeMode::Development), SEPOLIA);
        assert_eq!(resolve_default_chain(Some("goerli"), RuntimeMode::Production), MAINNET);
    }

    #[test]
    fn test_scenarios() {
        assert_eq!(
            resolve_default_chain(Some("Sepolia "), RuntimeMode::Production),
            ChainId(11155111)
        );
        assert_eq!(
            resolve_default_chain(Some(""), RuntimeMode::Development),
            ChainId(11155111)
        );
        assert_eq!(
            resolve_default_chain(Some("mainnet"), RuntimeMode::Development),
            ChainId(1)
        );
    }

    #[test]
    fn test_runtime_mode_parse() {
        assert_eq!(RuntimeMode::parse(" Development"), Some(RuntimeMode::Development));
        assert_eq!(RuntimeMode::parse("production"), Some(RuntimeMode::Production));
        assert_eq!(RuntimeMode::parse("test"), None);
        assert_eq!(RuntimeMode::parse("dev"), None);
        assert_eq!(RuntimeMode::parse("prod"), None);
    }

    #[test]
    fn test_rpc_map_picks_first_non_blank() {
        let source = RpcSource::from([
            (MAINNET, vec!["".to_string(), "  https://a ".to_string(), "https://b".to_string()]),
            (SEPOLIA, vec!["https://x".to_string()]),
        ]);
        let map = build_rpc_map(&source).unwrap();
        assert_eq!(map[&MAINNET], "https://a");
        assert_eq!(map[&SEPOLIA], "https://x");
    }

    #[test]
    fn test_rpc_map_all_blank_names_chain() {
        let source = RpcSource::from([
            (ChainId(1), vec!["".to_string(), " ".to_string()]),
            (ChainId(11155111), vec!["https://x".to_string()]),
        ]);
        assert_eq!(
            build_rpc_map(&source),
            Err(ConfigError::MissingRpcUrl { chain: ChainId(1) })
        );
    }

    #[test]
    fn test_rpc_map_empty_candidates() {
        let source = RpcSource::from([(SEPOLIA, vec![])]);
        assert_eq!(
            build_rpc_map(&source),
            Err(ConfigError::MissingRpcUrl { chain: SEPOLIA })
        );
    }

    #[test]
    fn test_rpc_source_without_infura_key() {
        let map = build_rpc_map(&rpc_source(None)).unwrap();
        assert_eq!(map[&MAINNET], "https://ethereum-rpc.publicnode.com");
        assert_eq!(map[&SEPOLIA], "https://ethereum-sepolia-rpc.publicnode.com");

        let blank = build_rpc_map(&rpc_source(Some("  "))).unwrap();
        assert_eq!(blank, map);
    }

    #[test]
    fn test_rpc_source_prefers_infura() {
        let map = build_rpc_map(&rpc_source(Some("abc123"))).unwrap();
        assert_eq!(map[&MAINNET], "https://mainnet.infura.io/v3/abc123");
        assert_eq!(map[&SEPOLIA], "https://sepolia.infura.io/v3/abc123");
    }

    #[test]
    fn test_chain_id_hex() {
        assert_eq!(MAINNET.to_hex(), "0x1");
        assert_eq!(SEPOLIA.to_hex(), "0xaa36a7");
        assert_eq!(ChainId::from_hex("0xaa36a7"), Some(SEPOLIA));
        assert_eq!(ChainId::from_hex("0x1"), Some(MAINNET));
        assert_eq!(ChainId::from_hex("0X1"), Some(MAINNET));
        assert_eq!(ChainId::from_hex(" 0xAA36A7 "), Some(SEPOLIA));
        assert_eq!(ChainId::from_hex("zz"), None);
    }

    #[test]
    fn test_chain_id_hex_requires_single_prefix() {
        assert_eq!(ChainId::from_hex("11155111"), None);
        assert_eq!(ChainId::from_hex("0x0x1"), None);
        assert_eq!(ChainId::from_hex("0x"), None);
        assert_eq!(ChainId::from_hex("0x+1"), None);
    }

    #[test]
    fn test_add_chain_parameters() {
        let rpc_map = RpcMap::from([(SEPOLIA, "https://x".to_string())]);
        let params = AddEthereumChainParameter::for_chain(SEPOLIA, &rpc_map).unwrap();
        assert_eq!(params.chain_id, "0xaa36a7");
        assert_eq!(params.chain_name, "Sepolia");
        assert_eq!(params.rpc_urls, vec!["https://x".to_string()]);
        assert_eq!(params.native_currency.decimals, 18);

        assert!(AddEthereumChainParameter::for_chain(MAINNET, &rpc_map).is_none());
        assert!(AddEthereumChainParameter::for_chain(ChainId(137), &rpc_map).is_none());
    }

    #[test]
    fn test_add_chain_parameters_serialize_camel_case() {
        let rpc_map = RpcMap::from([(MAINNET, "https://a".to_string())]);
        let params = AddEthereumChainParameter::for_chain(MAINNET, &rpc_map).unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["chainId"], "0x1");
        assert_eq!(json["nativeCurrency"]["symbol"], "ETH");
        assert_eq!(json["blockExplorerUrls"][0], "https://etherscan.io");
    }

    #[test]
    fn test_chain_names() {
        assert_eq!(MAINNET.name(), "Ethereum Mainnet");
        assert_eq!(SEPOLIA.name(), "Sepolia");
        assert_eq!(ChainId(999).name(), "Unknown");
        assert!(SEPOLIA.is_supported());
        assert!(!ChainId(137).is_supported());
    }
}

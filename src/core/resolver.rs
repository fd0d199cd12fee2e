//! Startup configuration resolution.
//!
//! Reads the build-time environment once, resolves the default chain, builds
//! the RPC map and validates the result into an immutable [`ConnectorConfig`].
//! Every failure here is a deployment error and aborts startup.

use crate::core::chain::{
    self, ChainId, RpcMap, RpcSource, RuntimeMode, SUPPORTED_CHAINS, resolve_default_chain,
};
use crate::core::error::ConfigError;

// ============================================================================
// Environment
// ============================================================================

/// Deployment values baked into the bundle at build time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
    pub project_id: Option<String>,
    pub network_override: Option<String>,
    pub mode: RuntimeMode,
    pub infura_key: Option<String>,
}

impl Environment {
    /// Read the values compiled into this build.
    ///
    /// `APP_MODE` wins over the build profile; without it debug builds are
    /// treated as development.
    pub fn from_build() -> Self {
        let mode = option_env!("APP_MODE")
            .and_then(RuntimeMode::parse)
            .unwrap_or(if cfg!(debug_assertions) {
                RuntimeMode::Development
            } else {
                RuntimeMode::Production
            });

        Self {
            project_id: option_env!("WALLETCONNECT_PROJECT_ID").map(str::to_string),
            network_override: option_env!("APP_NETWORK").map(str::to_string),
            mode,
            infura_key: option_env!("INFURA_KEY").map(str::to_string),
        }
    }
}

// ============================================================================
// ConnectorConfig
// ============================================================================

/// Validated configuration shared by every connector.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorConfig {
    pub project_id: String,
    /// Required chains for a WalletConnect session; always `[default]`.
    pub chains: Vec<ChainId>,
    /// Supported chains minus the default one.
    pub optional_chains: Vec<ChainId>,
    pub rpc_map: RpcMap,
    pub show_qr_modal: bool,
}

impl ConnectorConfig {
    /// Resolve the configuration for the running build.
    pub fn from_environment(env: &Environment) -> Result<Self, ConfigError> {
        let project_id = env.project_id.as_deref().unwrap_or_default();
        let default_chain = resolve_default_chain(env.network_override.as_deref(), env.mode);
        let source = chain::rpc_source(env.infura_key.as_deref());
        Self::build(project_id, default_chain, SUPPORTED_CHAINS, &source)
    }

    /// Build and validate a configuration from explicit inputs.
    pub fn build(
        project_id: &str,
        default_chain: ChainId,
        supported: &[ChainId],
        source: &RpcSource,
    ) -> Result<Self, ConfigError> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(ConfigError::MissingProjectId);
        }

        let rpc_map = chain::build_rpc_map(source)?;
        validate(default_chain, supported, &rpc_map)?;

        let optional_chains = supported
            .iter()
            .copied()
            .filter(|&id| id != default_chain)
            .collect();

        Ok(Self {
            project_id: project_id.to_string(),
            chains: vec![default_chain],
            optional_chains,
            rpc_map,
            show_qr_modal: true,
        })
    }

    /// The resolved default chain.
    pub fn default_chain(&self) -> ChainId {
        self.chains[0]
    }

    /// Every chain a session may use, default first.
    pub fn all_chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.chains.iter().chain(&self.optional_chains).copied()
    }

    /// RPC endpoint for `chain`, if configured.
    pub fn rpc_url(&self, chain: ChainId) -> Option<&str> {
        self.rpc_map.get(&chain).map(String::as_str)
    }
}

/// Check the default chain is supported and every supported chain has an RPC URL.
pub fn validate(
    default_chain: ChainId,
    supported: &[ChainId],
    rpc_map: &RpcMap,
) -> Result<(), ConfigError> {
    if !supported.contains(&default_chain) {
        let supported = supported
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ConfigError::UnsupportedDefaultChain {
            chain: default_chain,
            supported,
        });
    }

    if let Some(&chain) = supported.iter().find(|id| !rpc_map.contains_key(id)) {
        return Err(ConfigError::RpcMapIncomplete { chain });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chain::{MAINNET, SEPOLIA};

    fn source() -> RpcSource {
        RpcSource::from([
            (MAINNET, vec!["https://main".to_string()]),
            (SEPOLIA, vec!["https://sep".to_string()]),
        ])
    }

    #[test]
    fn test_build_valid_config() {
        let config = ConnectorConfig::build(" proj ", SEPOLIA, SUPPORTED_CHAINS, &source()).unwrap();
        assert_eq!(config.project_id, "proj");
        assert_eq!(config.chains, vec![SEPOLIA]);
        assert_eq!(config.optional_chains, vec![MAINNET]);
        assert_eq!(config.default_chain(), SEPOLIA);
        assert_eq!(config.rpc_url(MAINNET), Some("https://main"));
        assert!(config.show_qr_modal);
        assert_eq!(config.all_chains().collect::<Vec<_>>(), vec![SEPOLIA, MAINNET]);
    }

    #[test]
    fn test_optional_chains_exclude_default() {
        let supported = [MAINNET, SEPOLIA, ChainId(17000)];
        let mut src = source();
        src.insert(ChainId(17000), vec!["https://holesky".to_string()]);

        for &default in &supported {
            let config = ConnectorConfig::build("p", default, &supported, &src).unwrap();
            assert!(!config.optional_chains.contains(&default));
            assert_eq!(config.optional_chains.len(), supported.len() - 1);
            for id in supported.iter().filter(|&&id| id != default) {
                assert!(config.optional_chains.contains(id));
            }
        }
    }

    #[test]
    fn test_missing_project_id() {
        assert_eq!(
            ConnectorConfig::build("", MAINNET, SUPPORTED_CHAINS, &source()),
            Err(ConfigError::MissingProjectId)
        );
        assert_eq!(
            ConnectorConfig::build("   ", MAINNET, SUPPORTED_CHAINS, &source()),
            Err(ConfigError::MissingProjectId)
        );
    }

    #[test]
    fn test_unsupported_default_chain() {
        let err = ConnectorConfig::build("p", ChainId(137), SUPPORTED_CHAINS, &source()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnsupportedDefaultChain {
                chain: ChainId(137),
                supported: "1, 11155111".to_string(),
            }
        );
    }

    #[test]
    fn test_rpc_map_must_cover_supported() {
        let partial = RpcSource::from([(MAINNET, vec!["https://main".to_string()])]);
        assert_eq!(
            ConnectorConfig::build("p", MAINNET, SUPPORTED_CHAINS, &partial),
            Err(ConfigError::RpcMapIncomplete { chain: SEPOLIA })
        );
    }

    #[test]
    fn test_blank_rpc_candidates_fail_construction() {
        let src = RpcSource::from([
            (ChainId(1), vec!["".to_string(), " ".to_string()]),
            (ChainId(11155111), vec!["https://x".to_string()]),
        ]);
        assert_eq!(
            ConnectorConfig::build("p", SEPOLIA, SUPPORTED_CHAINS, &src),
            Err(ConfigError::MissingRpcUrl { chain: ChainId(1) })
        );
    }

    #[test]
    fn test_from_environment() {
        let env = Environment {
            project_id: Some("abc".to_string()),
            network_override: Some("Sepolia ".to_string()),
            mode: RuntimeMode::Production,
            infura_key: None,
        };
        let config = ConnectorConfig::from_environment(&env).unwrap();
        assert_eq!(config.default_chain(), SEPOLIA);
        assert_eq!(config.optional_chains, vec![MAINNET]);

        let dev = Environment {
            project_id: Some("abc".to_string()),
            mode: RuntimeMode::Development,
            ..Default::default()
        };
        assert_eq!(ConnectorConfig::from_environment(&dev).unwrap().default_chain(), SEPOLIA);

        let prod = Environment {
            project_id: Some("abc".to_string()),
            ..Default::default()
        };
        assert_eq!(ConnectorConfig::from_environment(&prod).unwrap().default_chain(), MAINNET);
    }

    #[test]
    fn test_from_environment_without_project_id() {
        assert_eq!(
            ConnectorConfig::from_environment(&Environment::default()),
            Err(ConfigError::MissingProjectId)
        );
    }
}

//! Custom error types for the application.
//!
//! Errors are split by how the caller must react:
//!
//! - [`ConfigError`] - fatal, raised while building configuration at startup
//! - [`ActivationError`] - recoverable connector failure, user may retry
//! - [`WalletError`] - low-level EIP-1193 / JS interop failure
//! - [`StorageError`] - localStorage bookkeeping failure

use thiserror::Error;

use crate::config::{env_vars, rpc_codes};
use crate::core::chain::ChainId;

/// Startup configuration errors. Any of these aborts initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// WalletConnect project id missing or blank.
    #[error("missing {var} (set it in the build environment)", var = env_vars::PROJECT_ID)]
    MissingProjectId,
    /// Source mapping has no usable RPC URL for a chain.
    #[error("no RPC URL configured for chain {chain}")]
    MissingRpcUrl { chain: ChainId },
    /// Default chain is outside the supported set.
    #[error("default chain {chain} is not in the supported chains ({supported})")]
    UnsupportedDefaultChain { chain: ChainId, supported: String },
    /// Supported chain absent from the RPC map.
    #[error("RPC map is missing supported chain {chain}")]
    RpcMapIncomplete { chain: ChainId },
}

/// Wallet-related errors for EIP-1193 integration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    /// Browser window not available
    #[error("browser window not available")]
    NoWindow,
    /// No injected provider for the requested connector
    #[error("{0} not installed")]
    NotInstalled(&'static str),
    /// WalletConnect provider script not loaded
    #[error("WalletConnect provider not loaded")]
    SessionProviderMissing,
    /// Failed to build or dispatch a request object
    #[error("failed to create wallet request")]
    RequestCreationFailed,
    /// Provider rejected the request
    #[error("wallet request rejected: {message}")]
    Rejected { code: Option<i64>, message: String },
    /// No account returned from wallet
    #[error("no account returned from wallet")]
    NoAccount,
    /// Response had an unexpected shape
    #[error("unexpected wallet response: {0}")]
    InvalidResponse(String),
    /// HTTP JSON-RPC call failed
    #[error("RPC request failed: {0}")]
    Rpc(String),
    /// Silent query did not answer in time
    #[error("wallet did not respond in time")]
    Timeout,
}

impl WalletError {
    /// Whether the user dismissed the request rather than it failing.
    ///
    /// Covers the EIP-1193 `4001` code and the messages the WalletConnect
    /// modal rejects with when it is closed.
    pub fn is_user_cancellation(&self) -> bool {
        let Self::Rejected { code, message } = self else {
            return false;
        };
        if *code == Some(rpc_codes::USER_REJECTED) {
            return true;
        }
        let message = message.to_ascii_lowercase();
        ["user rejected", "user denied", "modal closed", "connection request reset"]
            .iter()
            .any(|needle| message.contains(needle))
    }
}

/// Recoverable activation failures surfaced to the connect flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActivationError {
    /// User closed the wallet prompt; treated as a no-op.
    #[error("request cancelled by user")]
    UserCancelled,
    /// Activation failed; the user can retry.
    #[error("{0}")]
    Failed(WalletError),
}

impl From<WalletError> for ActivationError {
    fn from(err: WalletError) -> Self {
        if err.is_user_cancellation() {
            Self::UserCancelled
        } else {
            Self::Failed(err)
        }
    }
}

/// Persisted-state errors for localStorage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// localStorage not available.
    #[error("localStorage not available")]
    Unavailable,
    /// Failed to save to localStorage.
    #[error("failed to save to localStorage")]
    SaveFailed,
    /// Failed to remove from localStorage.
    #[error("failed to remove from localStorage")]
    RemoveFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(code: Option<i64>, message: &str) -> WalletError {
        WalletError::Rejected {
            code,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_user_rejected_code_is_cancellation() {
        assert!(rejected(Some(4001), "whatever").is_user_cancellation());
        assert_eq!(
            ActivationError::from(rejected(Some(4001), "x")),
            ActivationError::UserCancelled
        );
    }

    #[test]
    fn test_walletconnect_modal_close_is_cancellation() {
        assert!(rejected(None, "Connection request reset. Please try again.").is_user_cancellation());
        assert!(rejected(None, "User rejected methods.").is_user_cancellation());
        assert!(rejected(None, "Modal closed").is_user_cancellation());
    }

    #[test]
    fn test_other_errors_are_failures() {
        let err = rejected(Some(-32603), "Internal error");
        assert!(!err.is_user_cancellation());
        assert!(matches!(ActivationError::from(err), ActivationError::Failed(_)));
        assert!(matches!(
            ActivationError::from(WalletError::NotInstalled("MetaMask")),
            ActivationError::Failed(WalletError::NotInstalled(_))
        ));
    }

    #[test]
    fn test_config_error_names_chain() {
        let err = ConfigError::MissingRpcUrl { chain: ChainId(1) };
        assert_eq!(err.to_string(), "no RPC URL configured for chain 1");
        assert!(
            ConfigError::MissingProjectId
                .to_string()
                .contains("WALLETCONNECT_PROJECT_ID")
        );
    }
}

//! The connect flow.
//!
//! One flow serves every connector: activate, then settle the outcome into
//! persisted bookkeeping and UI effects.
//!
//! | Outcome | Persisted marker | Modal | Notification |
//! |---------|------------------|-------|--------------|
//! | success | set to connector | stays closed | none |
//! | failure | removed (connect only) | reopened (connect only) | warning |
//! | user cancelled | untouched | stays closed | none |

use crate::core::chain::ChainId;
use crate::core::connector::{ActivationTarget, Connect, ConnectorKind};
use crate::core::error::{ActivationError, WalletError};
use crate::core::resolver::ConnectorConfig;
use crate::core::storage::{self, KeyValueStore};
use crate::models::{Notification, WalletState};

/// How an activation attempt ended.
#[derive(Clone, Debug, PartialEq)]
pub enum Settlement {
    Connected(WalletState),
    Cancelled,
    Failed(WalletError),
}

/// Which user action produced a [`Settlement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowAction {
    Connect,
    SwitchChain,
}

/// UI changes a settlement calls for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiEffects {
    /// New session state, if it changed.
    pub wallet: Option<WalletState>,
    pub reopen_modal: bool,
    pub notification: Option<Notification>,
}

impl Settlement {
    fn from_result(result: Result<WalletState, ActivationError>) -> Self {
        match result {
            Ok(state) => Self::Connected(state),
            Err(ActivationError::UserCancelled) => Self::Cancelled,
            Err(ActivationError::Failed(err)) => Self::Failed(err),
        }
    }

    /// Translate into UI effects. `previous` is restored when a connect
    /// attempt does not succeed.
    pub fn effects(&self, action: FlowAction, previous: &WalletState) -> UiEffects {
        match self {
            Self::Connected(state) => UiEffects {
                wallet: Some(state.clone()),
                ..Default::default()
            },
            Self::Cancelled => UiEffects {
                wallet: (action == FlowAction::Connect).then(|| previous.clone()),
                ..Default::default()
            },
            Self::Failed(err) => match action {
                FlowAction::Connect => UiEffects {
                    wallet: Some(WalletState::Disconnected),
                    reopen_modal: true,
                    notification: Some(Notification::warning(format!(
                        "Wallet connection failed: {err}"
                    ))),
                },
                FlowAction::SwitchChain => UiEffects {
                    wallet: None,
                    reopen_modal: false,
                    notification: Some(Notification::warning(format!(
                        "Network switch failed: {err}"
                    ))),
                },
            },
        }
    }
}

async fn activate<C: Connect>(
    connector: &C,
    target: ActivationTarget,
) -> Result<WalletState, ActivationError> {
    let kind = connector.kind();
    connector
        .activate(target)
        .await
        .map(|activation| WalletState::connected(kind, &activation))
}

/// Activate `connector` and settle the persisted connector marker.
pub async fn connect<C, S>(connector: &C, target: ActivationTarget, store: &S) -> Settlement
where
    C: Connect,
    S: KeyValueStore,
{
    let kind = connector.kind();
    let result = activate(connector, target).await;

    match &result {
        Ok(_) => {
            let _ = storage::remember_connector(store, kind);
        }
        Err(ActivationError::Failed(_)) => {
            let _ = storage::forget_connector(store);
        }
        Err(ActivationError::UserCancelled) => {}
    }

    Settlement::from_result(result)
}

/// Switch the active connector to `desired` (or its default chain for `None`).
///
/// Raw-chain-id connectors get the id; injected ones get full add-chain
/// parameters so unknown chains can be registered. The persisted marker is
/// left alone: a failed switch does not end the session.
pub async fn switch_chain<C: Connect>(
    connector: &C,
    desired: Option<ChainId>,
    config: &ConnectorConfig,
) -> Settlement {
    let target = ActivationTarget::for_switch(connector.kind(), desired, &config.rpc_map);
    Settlement::from_result(activate(connector, target).await)
}

/// Reconnect silently with the remembered connector.
///
/// Returns `None` when nothing was remembered or the wallet no longer
/// authorizes this site; in the latter case the stale marker is dropped.
pub async fn restore<C, S>(connector: &C, store: &S) -> Option<WalletState>
where
    C: Connect,
    S: KeyValueStore,
{
    if storage::last_connector(store) != Some(connector.kind()) {
        return None;
    }
    match connector.connect_eagerly().await {
        Ok(activation) => Some(WalletState::connected(connector.kind(), &activation)),
        Err(_) => {
            let _ = storage::forget_connector(store);
            None
        }
    }
}

/// Boot-time session: the remembered connector if it still authorizes this
/// site, otherwise the read-only connector on the default chain.
///
/// The read-only session is never persisted. Returns `None` when neither
/// activates.
pub async fn boot<C, R, S>(remembered: Option<&C>, read_only: &R, store: &S) -> Option<WalletState>
where
    C: Connect,
    R: Connect,
    S: KeyValueStore,
{
    if let Some(connector) = remembered
        && let Some(state) = restore(connector, store).await
    {
        return Some(state);
    }
    activate(read_only, ActivationTarget::Default).await.ok()
}

/// State the UI shows while [`boot`] runs.
///
/// Restoring a remembered wallet shows it as connecting, which disables the
/// connect button until the attempt settles.
pub fn boot_placeholder(remembered: Option<ConnectorKind>) -> WalletState {
    remembered.map_or(WalletState::Disconnected, WalletState::Connecting)
}

/// The state to apply once [`boot`] settles.
///
/// `None` when the session changed since boot started (a user connect won
/// the race); the boot result is then dropped.
pub fn boot_outcome(
    started: &WalletState,
    current: &WalletState,
    booted: Option<WalletState>,
) -> Option<WalletState> {
    if current != started {
        return None;
    }
    Some(booted.unwrap_or(WalletState::Disconnected))
}

/// End the session and forget the remembered connector.
pub async fn disconnect<C, S>(connector: &C, store: &S) -> Result<WalletState, WalletError>
where
    C: Connect,
    S: KeyValueStore,
{
    let _ = storage::forget_connector(store);
    connector.deactivate().await?;
    Ok(WalletState::Disconnected)
}

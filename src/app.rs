//! Root application module.
//!
//! Contains the main App component, the [`AppContext`] definition and the
//! glue that runs wallet flows and applies their results to the UI.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::console;

use crate::components::{ConnectModal, Header, Snackbar};
use crate::config::{MAX_SNACKBARS, QR_MODAL_HANDOFF_MS};
use crate::core::chain::ChainId;
use crate::core::connector::{ActivationTarget, Connector, ConnectorKind, Connectors};
use crate::core::session::{self, FlowAction, Settlement, UiEffects};
use crate::core::storage::{self, BrowserStore};
use crate::core::{ConnectorConfig, error::ConfigError};
use crate::models::{Notification, NotificationQueue, WalletState};

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and accessed from any child
/// component using `use_context::<AppContext>()`. The wallet session lives
/// here explicitly; connectors are stateless with respect to the UI.
///
/// # Note
///
/// This struct is `Copy` because all fields are Leptos signals or stored
/// values, which are cheap to copy.
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Wallet session state.
    pub wallet: RwSignal<WalletState>,
    /// Whether the connect modal is open.
    pub modal_open: RwSignal<bool>,
    /// Wallet the user picked last in the modal.
    pub selected_wallet: RwSignal<Option<ConnectorKind>>,
    /// Visible snackbars.
    pub notifications: RwSignal<NotificationQueue>,
    connectors: StoredValue<Connectors, LocalStorage>,
}

impl AppContext {
    /// Creates a new application context around a validated configuration.
    pub fn new(config: ConnectorConfig) -> Self {
        Self {
            wallet: RwSignal::new(WalletState::default()),
            modal_open: RwSignal::new(false),
            selected_wallet: RwSignal::new(None),
            notifications: RwSignal::new(NotificationQueue::default()),
            connectors: StoredValue::new_local(Connectors::new(config)),
        }
    }

    pub fn connector(&self, kind: ConnectorKind) -> Connector {
        self.connectors.with_value(|c| c.get(kind))
    }

    pub fn config(&self) -> ConnectorConfig {
        self.connectors.with_value(|c| c.config().clone())
    }

    /// Show a snackbar and schedule its dismissal.
    pub fn notify(&self, notification: Notification) {
        let auto_hide_ms = notification.auto_hide_ms;
        let Some(id) = self
            .notifications
            .try_update(|q| q.push(notification, MAX_SNACKBARS))
        else {
            return;
        };
        let notifications = self.notifications;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(auto_hide_ms).await;
            notifications.update(|q| q.dismiss(id));
        });
    }

    fn apply(&self, effects: UiEffects) {
        if let Some(wallet) = effects.wallet {
            self.wallet.set(wallet);
        }
        if effects.reopen_modal {
            self.modal_open.set(true);
        }
        if let Some(notification) = effects.notification {
            self.notify(notification);
        }
    }

    /// Connect with the wallet picked in the modal.
    ///
    /// The modal closes before activation so it never competes with the
    /// wallet's own prompt or QR modal.
    pub fn connect(&self, kind: ConnectorKind) {
        let ctx = *self;
        let previous = ctx.wallet.get_untracked();
        ctx.selected_wallet.set(Some(kind));
        ctx.modal_open.set(false);
        ctx.wallet.set(WalletState::Connecting(kind));

        spawn_local(async move {
            if kind == ConnectorKind::SessionBased {
                gloo_timers::future::TimeoutFuture::new(QR_MODAL_HANDOFF_MS).await;
            }
            console::info_1(&format!("{}: activating...", kind.label()).into());

            let connector = ctx.connector(kind);
            let settlement = session::connect(&connector, ActivationTarget::Default, &BrowserStore).await;
            log_settlement(kind, &settlement);
            ctx.apply(settlement.effects(FlowAction::Connect, &previous));
        });
    }

    /// Switch the connected wallet to `chain`; opens the modal when disconnected.
    pub fn switch_chain(&self, chain: ChainId) {
        let ctx = *self;
        let Some(kind) = ctx
            .wallet
            .with_untracked(|w| w.is_connected().then(|| w.connector()).flatten())
        else {
            ctx.modal_open.set(true);
            return;
        };

        spawn_local(async move {
            let connector = ctx.connector(kind);
            let config = ctx.config();
            let settlement = session::switch_chain(&connector, Some(chain), &config).await;
            log_settlement(kind, &settlement);
            if let Settlement::Connected(_) = settlement {
                ctx.notify(Notification::success(format!("Switched to {}", chain.name())));
            }
            ctx.apply(settlement.effects(FlowAction::SwitchChain, &WalletState::Disconnected));
        });
    }

    /// Disconnect the current session.
    pub fn disconnect(&self) {
        let ctx = *self;
        let Some(kind) = ctx.wallet.with_untracked(|w| w.connector()) else {
            return;
        };
        spawn_local(async move {
            let connector = ctx.connector(kind);
            let notification = match session::disconnect(&connector, &BrowserStore).await {
                Ok(_) => Notification::info("Wallet disconnected"),
                Err(err) => {
                    console::warn_1(&format!("{}: disconnect failed: {}", kind.label(), err).into());
                    Notification::error(format!("Disconnect failed: {err}"))
                }
            };
            ctx.wallet.set(WalletState::Disconnected);
            ctx.selected_wallet.set(None);
            ctx.notify(notification);
        });
    }

    /// Restore the last successful connector silently, falling back to a
    /// read-only session on the default chain.
    ///
    /// A remembered wallet shows as connecting until the attempt settles, so
    /// the connect button stays disabled. If the session changes meanwhile
    /// the boot result is dropped.
    pub fn restore(&self) {
        let ctx = *self;
        let remembered = storage::last_connector(&BrowserStore);
        let started = session::boot_placeholder(remembered);
        ctx.wallet.set(started.clone());

        spawn_local(async move {
            let wallet = remembered.map(|kind| ctx.connector(kind));
            let read_only = ctx.connector(ConnectorKind::NetworkSimulated);
            let booted = session::boot(wallet.as_ref(), &read_only, &BrowserStore).await;

            let current = ctx.wallet.get_untracked();
            let Some(state) = session::boot_outcome(&started, &current, booted) else {
                console::info_1(&"boot: session changed meanwhile, result dropped".into());
                return;
            };
            match state.connector() {
                Some(ConnectorKind::NetworkSimulated) => {
                    let chain = state.chain_id().map_or("unknown chain", ChainId::name);
                    console::info_1(&format!("boot: read-only on {chain}").into())
                }
                Some(kind) => {
                    console::info_1(&format!("{}: session restored", kind.label()).into());
                    ctx.selected_wallet.set(Some(kind));
                }
                None => console::info_1(&"boot: no session".into()),
            }
            ctx.wallet.set(state);
        });
    }

    /// Keep the session in sync with provider account/chain events.
    pub fn subscribe_events(&self) {
        for kind in ConnectorKind::SELECTABLE {
            let ctx = *self;
            let handler = move |event| {
                if ctx.wallet.with_untracked(|w| w.connector()) != Some(kind) {
                    return;
                }
                let ended = ctx
                    .wallet
                    .try_update(|w| w.apply_event(event))
                    .unwrap_or(false);
                if ended {
                    let _ = storage::forget_connector(&BrowserStore);
                    ctx.notify(Notification::info("Wallet disconnected"));
                }
            };
            // Missing extensions simply never emit.
            let _ = ctx.connector(kind).subscribe(handler);
        }
    }
}

fn log_settlement(kind: ConnectorKind, settlement: &Settlement) {
    match settlement {
        Settlement::Connected(state) => console::info_1(
            &format!("{}: activated ({})", kind.label(), state.display_name()).into(),
        ),
        Settlement::Cancelled => {
            console::info_1(&format!("{}: cancelled by user", kind.label()).into())
        }
        Settlement::Failed(err) => {
            console::error_1(&format!("{}: activate failed: {}", kind.label(), err).into())
        }
    }
}

// ============================================================================
// Components
// ============================================================================

/// Root application component.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Restores the previous wallet session and wires provider events
/// - Renders the header, connect modal and snackbars
#[component]
pub fn App(config: ConnectorConfig) -> impl IntoView {
    let ctx = AppContext::new(config);
    provide_context(ctx);

    ctx.subscribe_events();
    ctx.restore();

    view! {
        <div class="app">
            <Header />
            <ConnectModal />
            <Snackbar />
        </div>
    }
}

/// Fatal screen shown instead of the app when configuration is invalid.
#[component]
pub fn ConfigErrorScreen(error: ConfigError) -> impl IntoView {
    view! {
        <div style="
            display: flex;
            flex-direction: column;
            align-items: center;
            justify-content: center;
            height: 100vh;
            padding: 2rem;
            background: #0a0e27;
            color: #e0e0e0;
            font-family: 'Inter', sans-serif;
        ">
            <div style="max-width: 600px; text-align: center;">
                <h1 style="color: #ff6b6b; margin-bottom: 1rem;">
                    "Configuration error"
                </h1>
                <p style="color: #a0a0a0; margin-bottom: 2rem;">
                    "This build is missing required wallet configuration and cannot start."
                </p>
                <pre style="
                    text-align: left;
                    background: #151a35;
                    padding: 1rem;
                    border-radius: 4px;
                    color: #ff6b6b;
                    white-space: pre-wrap;
                ">
                    {error.to_string()}
                </pre>
            </div>
        </div>
    }
}

//! Header bar with network switcher and account button.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::core::chain::ChainId;
use crate::models::WalletState;

stylance::import_crate_style!(css, "src/components/header.module.css");

/// Header bar.
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class=css::bar>
            <span class=css::brand>{APP_NAME}</span>
            <div class=css::actions>
                <NetworkSwitch />
                <AccountButton />
            </div>
        </header>
    }
}

/// Buttons for each configured chain; the active one is highlighted.
///
/// Disabled until a wallet is connected.
#[component]
fn NetworkSwitch() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let chains: Vec<ChainId> = ctx.config().all_chains().collect();
    let connected = Signal::derive(move || ctx.wallet.with(|w| w.is_connected()));

    view! {
        <div class=css::networks>
            <span class=css::networkIcon><Icon icon=ic::NETWORK /></span>
            {chains
                .into_iter()
                .map(|chain| {
                    let active = Signal::derive(move || ctx.wallet.with(|w| w.chain_id() == Some(chain)));
                    view! {
                        <button
                            type="button"
                            class=css::network
                            class:active=active
                            disabled=move || !connected.get()
                            on:click=move |_| ctx.switch_chain(chain)
                        >
                            {chain.name()}
                            <Show when=move || active.get()>
                                <Icon icon=ic::CHECK />
                            </Show>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}

/// Connect button when disconnected or read-only; address and disconnect
/// when a wallet is connected.
#[component]
fn AccountButton() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let display_name = Signal::derive(move || ctx.wallet.with(|w| w.display_name()));
    let unsupported = Signal::derive(move || {
        ctx.wallet
            .with(|w| w.chain_id().is_some_and(|id| !id.is_supported()))
    });

    view! {
        {move || match ctx.wallet.get() {
            WalletState::Connected { address: None, .. } => view! {
                <div class=css::account>
                    <span class=css::connector>{display_name}</span>
                    <button
                        type="button"
                        class=css::connect
                        on:click=move |_| ctx.modal_open.set(true)
                    >
                        <Icon icon=ic::WALLET />
                        "Connect Wallet"
                    </button>
                </div>
            }
            .into_any(),
            WalletState::Connected { connector, .. } => view! {
                <div class=css::account>
                    <span class=css::connector>{connector.label()}</span>
                    <span class=css::address>{display_name}</span>
                    <Show when=move || unsupported.get()>
                        <span class=css::warning>"Unsupported network"</span>
                    </Show>
                    <button
                        type="button"
                        class=css::iconButton
                        title="Disconnect"
                        on:click=move |_| ctx.disconnect()
                    >
                        <Icon icon=ic::DISCONNECT />
                    </button>
                </div>
            }
            .into_any(),
            WalletState::Connecting(_) => view! {
                <button type="button" class=css::connect disabled=true>
                    {display_name}
                </button>
            }
            .into_any(),
            WalletState::Disconnected => view! {
                <button
                    type="button"
                    class=css::connect
                    on:click=move |_| ctx.modal_open.set(true)
                >
                    <Icon icon=ic::WALLET />
                    {display_name}
                </button>
            }
            .into_any(),
        }}
    }
}

//! Connect-wallet modal.
//!
//! Lists the selectable wallets. Picking one closes the modal and hands
//! control to the connect flow in [`AppContext::connect`]; on failure the
//! flow reopens it.

use leptos::ev;
use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::WALLET_HELP_URL;
use crate::core::connector::ConnectorKind;

stylance::import_crate_style!(css, "src/components/connect_modal.module.css");

/// One wallet button.
#[component]
fn WalletOption(kind: ConnectorKind) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let selected = Signal::derive(move || ctx.selected_wallet.get() == Some(kind));

    view! {
        <button
            type="button"
            class=css::option
            class:selected=selected
            on:click=move |_| ctx.connect(kind)
        >
            <span class=css::optionIcon><Icon icon=ic::connector_icon(kind) /></span>
            <span class=css::optionLabel>{kind.label()}</span>
        </button>
    }
}

/// Modal dialog for choosing a wallet.
///
/// Closes on Escape, on backdrop click and via the close button. The dialog
/// takes focus when it opens.
#[component]
pub fn ConnectModal() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");
    let dialog_ref = NodeRef::<leptos::html::Div>::new();
    let close = move || ctx.modal_open.set(false);

    let keydown = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" && ctx.modal_open.get_untracked() {
            ctx.modal_open.set(false);
        }
    });
    on_cleanup(move || keydown.remove());

    Effect::new(move || {
        if ctx.modal_open.get()
            && let Some(dialog) = dialog_ref.get()
        {
            let _ = dialog.focus();
        }
    });

    view! {
        <Show when=move || ctx.modal_open.get()>
            <div
                class=css::overlay
                role="dialog"
                aria-modal="true"
                aria-labelledby="connect-wallet-title"
                on:click=move |_| close()
            >
                <div
                    class=css::dialog
                    node_ref=dialog_ref
                    tabindex="-1"
                    on:click=|e| e.stop_propagation()
                >
                    <div class=css::titleRow>
                        <h2 id="connect-wallet-title" class=css::title>
                            "Connect Your Wallet"
                        </h2>
                        <button
                            type="button"
                            class=css::closeButton
                            aria-label="Close"
                            on:click=move |_| close()
                        >
                            <Icon icon=ic::CLOSE />
                        </button>
                    </div>
                    <div class=css::accent></div>

                    <div class=css::options>
                        {ConnectorKind::SELECTABLE
                            .into_iter()
                            .map(|kind| view! { <WalletOption kind=kind /> })
                            .collect_view()}
                    </div>

                    <div class=css::footer>
                        <p class=css::help>
                            "Need help installing a wallet?"
                            <a
                                class=css::link
                                href=WALLET_HELP_URL
                                target="_blank"
                                rel="noopener noreferrer"
                            >
                                "Click here"
                                <Icon icon=ic::EXTERNAL_LINK />
                            </a>
                        </p>
                        <p class=css::terms>
                            "Wallets are provided by external providers. By continuing, you agree to their terms. Wallet availability depends on the provider being operational."
                        </p>
                    </div>
                </div>
            </div>
        </Show>
    }
}

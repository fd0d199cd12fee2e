//! Stacked snackbar notifications.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::models::Severity;

stylance::import_crate_style!(css, "src/components/snackbar.module.css");

fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => css::info,
        Severity::Success => css::success,
        Severity::Warning => css::warning,
        Severity::Error => css::error,
    }
}

/// Renders the notification queue in the bottom corner. Clicking dismisses.
#[component]
pub fn Snackbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    view! {
        <div class=css::stack aria-live="polite">
            <For
                each=move || ctx.notifications.with(|q| q.items().to_vec())
                key=|n| n.id
                let:notification
            >
                {
                    let id = notification.id;
                    let class = format!("{} {}", css::snackbar, severity_class(notification.severity));
                    view! {
                        <div
                            class=class
                            role="status"
                            on:click=move |_| ctx.notifications.update(|q| q.dismiss(id))
                        >
                            <span class=css::message>{notification.message}</span>
                            <span class=css::dismiss><Icon icon=ic::CLOSE /></span>
                        </div>
                    }
                }
            </For>
        </div>
    }
}

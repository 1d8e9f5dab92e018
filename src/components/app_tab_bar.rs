//! App Tab Bar Component
//!
//! Tab bar for switching between the applets.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::store::{store_close_editor, use_app_store, AppStateStoreFields, AppTab};

#[component]
pub fn AppTabBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // Small badge per tab
    let badge = move |tab: AppTab| match tab {
        AppTab::Board => ctx.board.with(|s| s.state().tasks.len()),
        AppTab::Widgets => ctx.dashboard.with(|s| s.state().widgets.len()),
        AppTab::Workflow => ctx.workflow.with(|s| s.state().graph.nodes.len()),
    };

    view! {
        <nav class="app-tab-bar">
            {AppTab::ALL.iter().map(|&tab| {
                let is_active = move || store.active_tab().get() == tab;
                let tab_class = move || if is_active() { "app-tab active" } else { "app-tab" };
                view! {
                    <button
                        class=tab_class
                        on:click=move |_| {
                            if store.active_tab().get_untracked() != tab {
                                store_close_editor(&store);
                                store.active_tab().set(tab);
                            }
                        }
                    >
                        {tab.label()}
                        <span class="tab-badge">{move || badge(tab)}</span>
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}

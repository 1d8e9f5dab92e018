//! Properties Panel
//!
//! Right column for editing the current target (task or widget).

use leptos::prelude::*;

use crate::components::{EditTarget, TaskEditor, WidgetSettings};
use crate::store::{store_close_editor, use_app_store, AppStateStoreFields};

#[component]
pub fn PropertiesPanel() -> impl IntoView {
    let store = use_app_store();

    view! {
        <Show when=move || store.editing().with(|e| e.is_some())>
            <aside class="properties-panel">
                <button class="panel-close-btn" on:click=move |_| store_close_editor(&store)>"×"</button>
                {move || match store.editing().get() {
                    Some(EditTarget::Widget(id)) => view! { <WidgetSettings widget_id=id /> }.into_any(),
                    Some(target) => view! { <TaskEditor target=target /> }.into_any(),
                    None => ().into_any(),
                }}
            </aside>
        </Show>
    }
}

//! Delete Confirm Button Component
//!
//! Two-step delete used by task cards, widget cards and the workflow editors.

use leptos::prelude::*;
use web_sys::MouseEvent;

/// A × button that asks once more before running `on_confirm`.
///
/// Every button is `type="button"` and clicks stop here.
///
/// # Arguments
/// * `button_class` - CSS class of the × button (`delete-btn`, `widget-delete-btn`, ...)
/// * `title` - Tooltip of the × button
/// * `prompt` - Question shown while armed
/// * `on_confirm` - Runs when the user answers yes
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, default = "Delete".to_string())] title: String,
    #[prop(into, default = "Delete?".to_string())] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let answer = move |ev: MouseEvent, yes: bool| {
        ev.stop_propagation();
        armed.set(false);
        if yes {
            on_confirm.run(());
        }
    };

    view! {
        <Show
            when=move || armed.get()
            fallback=move || view! {
                <button
                    type="button"
                    class=button_class.clone()
                    title=title.clone()
                    on:click=move |ev: MouseEvent| {
                        ev.stop_propagation();
                        armed.set(true);
                    }
                >"×"</button>
            }
        >
            <span class="delete-confirm" on:click=|ev: MouseEvent| ev.stop_propagation()>
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button type="button" class="confirm-btn" title="Yes" on:click=move |ev| answer(ev, true)>"✓"</button>
                <button type="button" class="cancel-btn" title="No" on:click=move |ev| answer(ev, false)>"✗"</button>
            </span>
        </Show>
    }
}

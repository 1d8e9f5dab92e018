//! Widget Grid Component
//!
//! Widgets laid out on the fixed-width cell grid. Every card is a drop slot;
//! empty grid space is the slot after the last widget.

use leptos::prelude::*;

use deskboard_core::dashboard::GRID_ID;
use deskboard_core::domain::Widget;
use leptos_dragdrop::*;

use crate::components::WidgetCard;
use crate::context::use_app_context;

#[component]
pub fn WidgetGrid() -> impl IntoView {
    let ctx = use_app_context();
    let dnd = ctx.grid_dnd;
    let columns = ctx.config.with_value(|c| c.grid.columns);

    let widgets = move || {
        ctx.dashboard.with(|s| {
            s.state()
                .widgets
                .iter()
                .cloned()
                .enumerate()
                .collect::<Vec<(usize, Widget)>>()
        })
    };
    let count = move || ctx.dashboard.with(|s| s.state().widgets.len());

    // Only moves over bare grid space target the tail slot
    let on_mousemove = move |ev: web_sys::MouseEvent| {
        if ev.target() == ev.current_target()
            && dnd.drop_target_read.with_untracked(|t| t.is_none())
        {
            make_on_slot_mouseenter(dnd, DropTarget::new(GRID_ID, count()))(ev);
        }
    };
    let on_mouseleave = make_on_mouseleave(dnd);

    let grid_class = move || {
        if dnd.is_over_container(GRID_ID) { "widget-grid drag-over" } else { "widget-grid" }
    };

    view! {
        <div
            class=grid_class
            style=format!("grid-template-columns: repeat({}, 1fr);", columns)
            on:mousemove=on_mousemove
            on:mouseleave=on_mouseleave
        >
            <Show when=move || count() == 0>
                <p class="grid-empty">"Drag a widget here or click one in the palette"</p>
            </Show>
            <For
                each=widgets
                key=|(index, w)| (w.id.clone(), *index, w.updated_at)
                children=move |(index, widget)| view! { <WidgetCard widget=widget index=index /> }
            />
        </div>
    }
}

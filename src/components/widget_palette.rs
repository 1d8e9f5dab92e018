//! Widget Palette Component
//!
//! Sidebar of widget types. Drag one onto the grid, or click to add it.

use leptos::prelude::*;

use deskboard_core::dashboard::{DashboardCommand, PALETTE_ID};
use deskboard_core::domain::WidgetKind;
use leptos_dragdrop::*;

use crate::context::use_app_context;

fn icon(kind: WidgetKind) -> &'static str {
    match kind {
        WidgetKind::Weather => "☀",
        WidgetKind::News => "📰",
        WidgetKind::Calculator => "🧮",
        WidgetKind::Clock => "🕒",
        WidgetKind::Todo => "✔",
        WidgetKind::Calendar => "📅",
        WidgetKind::Notes => "📝",
        WidgetKind::Chart => "📈",
    }
}

#[component]
pub fn WidgetPalette() -> impl IntoView {
    let ctx = use_app_context();
    let dnd = ctx.grid_dnd;

    view! {
        <aside class="widget-palette">
            <h3>"Widgets"</h3>
            {WidgetKind::ALL.iter().enumerate().map(|(index, &kind)| {
                let on_mousedown = make_on_mousedown(dnd, DragSource {
                    id: kind.as_str().to_string(),
                    container_id: PALETTE_ID.to_string(),
                    index,
                });
                let entry_class = move || {
                    if dnd.is_dragging(kind.as_str()) { "palette-entry dragging" } else { "palette-entry" }
                };
                view! {
                    <div
                        class=entry_class
                        on:mousedown=on_mousedown
                        on:click=move |_| {
                            if !dnd.drag_just_ended_read.get_untracked() {
                                ctx.dispatch_dashboard(DashboardCommand::AddWidget(kind));
                            }
                        }
                    >
                        <span class="palette-icon">{icon(kind)}</span>
                        <span class="palette-label">{kind.default_title()}</span>
                    </div>
                }
            }).collect_view()}
        </aside>
    }
}

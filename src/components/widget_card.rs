//! Widget Card Component
//!
//! A placed widget: header with settings/delete and a body per widget type.

use chrono::{Datelike, Local};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use deskboard_core::dashboard::{DashboardCommand, GRID_ID};
use deskboard_core::domain::{ClockConfig, Widget, WidgetConfig};
use leptos_dragdrop::*;

use crate::components::{DeleteConfirmButton, EditTarget};
use crate::context::use_app_context;
use crate::store::{store_close_if_editing, store_edit, use_app_store};

#[component]
pub fn WidgetCard(widget: Widget, index: usize) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = ctx.grid_dnd;
    let id = StoredValue::new(widget.id.clone());

    let on_mousedown = make_on_mousedown(dnd, DragSource {
        id: widget.id.clone(),
        container_id: GRID_ID.to_string(),
        index,
    });
    let on_mouseenter = make_on_slot_mouseenter(dnd, DropTarget::new(GRID_ID, index));
    let on_mouseleave = make_on_mouseleave(dnd);

    let kind = widget.kind();
    let card_class = move || {
        let mut c = format!("widget-card widget-{}", kind.as_str());
        if dnd.is_dragging(&id.get_value()) { c.push_str(" dragging"); }
        if dnd.is_target(GRID_ID, index) { c.push_str(" drop-target"); }
        c
    };
    let placement = format!(
        "grid-column: {} / span {}; grid-row: {} / span {};",
        widget.position.x + 1,
        widget.size.width,
        widget.position.y + 1,
        widget.size.height
    );

    let on_delete = Callback::new(move |_| {
        let widget_id = id.get_value();
        if ctx.dispatch_dashboard(DashboardCommand::DeleteWidget(widget_id.clone())) {
            store_close_if_editing(&store, &EditTarget::Widget(widget_id));
        }
    });

    view! {
        <div
            class=card_class
            style=placement
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="widget-header">
                <span class="widget-title">{widget.title.clone()}</span>
                <button
                    class="widget-settings-btn"
                    title="Settings"
                    on:click=move |_| store_edit(&store, EditTarget::Widget(id.get_value()))
                >"⚙"</button>
                <DeleteConfirmButton button_class="widget-delete-btn" title="Remove widget" prompt="Remove?" on_confirm=on_delete />
            </div>
            <div class="widget-body">
                <WidgetBody config=widget.config.clone() />
            </div>
        </div>
    }
}

/// Body of a widget, rendered from its settings
#[component]
fn WidgetBody(config: WidgetConfig) -> impl IntoView {
    match config {
        WidgetConfig::Clock(clock) => view! { <ClockFace config=clock /> }.into_any(),
        WidgetConfig::Weather(w) => view! {
            <div class="weather">
                <div class="weather-location">{w.location}</div>
                <div class="weather-units">{if w.units == "metric" { "°C" } else { "°F" }}</div>
                {w.show_forecast.then(|| view! { <div class="weather-forecast">"5-day forecast"</div> })}
            </div>
        }.into_any(),
        WidgetConfig::News(n) => view! {
            <div class="news">
                <div class="news-category">{format!("Top {} stories", n.category)}</div>
                <div class="news-count">{format!("Showing up to {}", n.max_items)}</div>
            </div>
        }.into_any(),
        WidgetConfig::Calculator(c) => view! {
            <div class=format!("calculator theme-{}", c.theme)>
                <div class="calculator-display">"0"</div>
                <div class="calculator-mode">{if c.scientific { "Scientific" } else { "Basic" }}</div>
            </div>
        }.into_any(),
        WidgetConfig::Todo(t) => view! {
            <div class="todo">
                <div class="todo-categories">{t.categories.join(" · ")}</div>
                <div class="todo-limit">{format!("Up to {} items, sorted by {}", t.max_items, t.sort_by)}</div>
            </div>
        }.into_any(),
        WidgetConfig::Calendar(c) => {
            let today = Local::now();
            view! {
                <div class="calendar">
                    <div class="calendar-month">{today.format("%B %Y").to_string()}</div>
                    <div class="calendar-today">{today.day()}</div>
                    <div class="calendar-view">{format!("{} view", c.view)}</div>
                </div>
            }.into_any()
        }
        WidgetConfig::Notes(n) => view! {
            <textarea
                class="notes"
                style=format!(
                    "background-color: {}; font-size: {}px; font-family: {};",
                    n.background_color, n.font_size, n.font_family
                )
                placeholder="Write a note..."
            />
        }.into_any(),
        WidgetConfig::Chart(c) => view! {
            <div class=format!("chart chart-{}", c.chart_type)>
                <div class="chart-source">{format!("{} chart of {}", c.chart_type, c.data_source)}</div>
                {c.show_legend.then(|| view! { <div class="chart-legend">"Legend"</div> })}
            </div>
        }.into_any(),
    }
}

/// Clock that ticks once a second until unmounted
#[component]
fn ClockFace(config: ClockConfig) -> impl IntoView {
    let (time, set_time) = signal(Local::now());

    spawn_local(async move {
        loop {
            TimeoutFuture::new(1_000).await;
            // a disposed signal hands the value back: the card is gone
            if set_time.try_set(Local::now()).is_some() {
                break;
            }
        }
    });

    let pattern = match (config.format.as_str(), config.show_seconds) {
        ("24h", true) => "%H:%M:%S",
        ("24h", false) => "%H:%M",
        (_, true) => "%I:%M:%S %p",
        (_, false) => "%I:%M %p",
    };

    view! {
        <div class=format!("clock clock-{}", config.theme)>
            <div class="clock-time">{move || time.get().format(pattern).to_string()}</div>
            {config.show_date.then(|| view! {
                <div class="clock-date">{move || time.get().format("%A, %B %e").to_string()}</div>
            })}
        </div>
    }
}

//! Board View Component
//!
//! Kanban backlog: stats header, filter bar and one column per status.

use leptos::prelude::*;

use deskboard_core::board::BoardStats;

use crate::components::{BoardColumn, BoardFilterBar};
use crate::context::use_app_context;

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_app_context();

    let board_name = move || ctx.board.with(|s| s.state().name.clone());
    let description = move || ctx.board.with(|s| s.state().description.clone());
    let stats = Memo::new(move |_| ctx.board.with(|s| BoardStats::of(s.state())));
    let column_ids = move || {
        ctx.board
            .with(|s| s.state().columns.iter().map(|c| c.id.clone()).collect::<Vec<_>>())
    };

    view! {
        <div class="board-view">
            <header class="board-header">
                <div class="board-title">
                    <h1>{board_name}</h1>
                    {move || description().map(|d| view! { <p class="board-description">{d}</p> })}
                </div>
                <div class="board-stats">
                    <span class="stat">{move || format!("{} tasks", stats.get().total)}</span>
                    <span class="stat done">{move || format!("{} done", stats.get().completed)}</span>
                    <span class="stat in-progress">{move || format!("{} in progress", stats.get().in_progress)}</span>
                    <span class="stat">{move || format!("{} assignees", stats.get().assignees.len())}</span>
                </div>
            </header>

            <BoardFilterBar />

            <div class="board-columns">
                <For
                    each=column_ids
                    key=|id| id.clone()
                    children=move |id| view! { <BoardColumn column_id=id /> }
                />
            </div>
        </div>
    }
}

//! Board Column Component
//!
//! One column of the board. Each card is a drop slot; the column tail is a
//! slot for appending. Slot indices always refer to the unfiltered column.

use leptos::prelude::*;

use deskboard_core::domain::Task;
use leptos_dragdrop::*;

use crate::components::{EditTarget, TaskCard};
use crate::context::use_app_context;
use crate::store::{store_edit, use_app_store, AppStateStoreFields};

#[component]
pub fn BoardColumn(column_id: String) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = ctx.board_dnd;
    let id = StoredValue::new(column_id);

    let title = move || {
        ctx.board.with(|s| {
            s.state()
                .column(&id.get_value())
                .map(|c| c.title.clone())
                .unwrap_or_default()
        })
    };
    let color = move || {
        ctx.board.with(|s| {
            s.state()
                .column(&id.get_value())
                .map(|c| format!("border-top-color: {};", c.color))
                .unwrap_or_default()
        })
    };
    // (task count, soft cap, over cap)
    let counts = move || {
        ctx.board.with(|s| {
            s.state()
                .column(&id.get_value())
                .map(|c| (c.task_ids.len(), c.limit, c.is_over_limit()))
                .unwrap_or((0, None, false))
        })
    };

    // Visible tasks paired with their index in the full column
    let visible = move || {
        let filter = store.board_filter().get();
        ctx.board.with(|s| {
            let board = s.state();
            let column_id = id.get_value();
            let Some(column) = board.column(&column_id) else {
                return Vec::new();
            };
            filter
                .column_tasks(board, &column_id)
                .into_iter()
                .filter_map(|t| column.position_of(&t.id).map(|i| (t.clone(), i)))
                .collect::<Vec<(Task, usize)>>()
        })
    };

    let column_class = move || {
        let mut c = String::from("board-column");
        if counts().2 { c.push_str(" over-limit"); }
        if dnd.drop_target_read.with(|t| t.as_ref().is_some_and(|t| t.container_id == id.get_value())) {
            c.push_str(" drag-over");
        }
        c
    };

    let tail_target = move || DropTarget::new(id.get_value(), counts().0);
    let on_tail_enter = move |ev: web_sys::MouseEvent| make_on_slot_mouseenter(dnd, tail_target())(ev);
    let on_tail_leave = make_on_mouseleave(dnd);
    let is_tail_active = move || dnd.is_target(&id.get_value(), counts().0);

    view! {
        <div class=column_class style=color>
            <div class="column-header">
                <h3 class="column-title">{title}</h3>
                <span class="column-count">
                    {move || match counts() {
                        (n, Some(limit), _) => format!("{}/{}", n, limit),
                        (n, None, _) => n.to_string(),
                    }}
                </span>
                <button
                    class="add-task-btn"
                    title="Add task"
                    on:click=move |_| store_edit(&store, EditTarget::NewTask(id.get_value()))
                >"+"</button>
            </div>

            <div class="column-body">
                <For
                    each=visible
                    key=|(task, index)| (task.id.clone(), *index, task.updated_at)
                    children=move |(task, index)| {
                        view! { <TaskCard task=task column_id=id.get_value() index=index /> }
                    }
                />
                <div
                    class=move || if is_tail_active() { "column-tail active" } else { "column-tail" }
                    on:mouseenter=on_tail_enter
                    on:mouseleave=on_tail_leave
                />
            </div>
        </div>
    }
}

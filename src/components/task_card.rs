//! Task Card Component
//!
//! Individual task in a board column. Press and move to drag, click to edit.

use leptos::prelude::*;

use deskboard_core::board::BoardCommand;
use deskboard_core::domain::{Task, TaskStatus};
use leptos_dragdrop::*;

use crate::components::{DeleteConfirmButton, EditTarget};
use crate::context::use_app_context;
use crate::store::{store_close_if_editing, store_edit, use_app_store};

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

#[component]
pub fn TaskCard(task: Task, column_id: String, index: usize) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let dnd = ctx.board_dnd;
    let id = StoredValue::new(task.id.clone());

    // DnD handlers
    let on_mousedown = make_on_mousedown(dnd, DragSource {
        id: task.id.clone(),
        container_id: column_id.clone(),
        index,
    });
    let on_mouseenter = make_on_slot_mouseenter(dnd, DropTarget::new(column_id.clone(), index));
    let on_mouseleave = make_on_mouseleave(dnd);

    // Visual state
    let target_column = column_id.clone();
    let card_class = move || {
        let mut c = String::from("task-card");
        if dnd.is_dragging(&id.get_value()) { c.push_str(" dragging"); }
        if dnd.is_target(&target_column, index) { c.push_str(" drop-target"); }
        c
    };

    let overdue = task
        .due_date
        .is_some_and(|due| due < chrono::Utc::now() && task.status != TaskStatus::Done);
    let due = task.due_date.map(|d| d.format("%b %d").to_string());
    let done_subtasks = task.subtasks.iter().filter(|s| s.completed).count();
    let subtasks = (!task.subtasks.is_empty()).then(|| format!("{}/{}", done_subtasks, task.subtasks.len()));

    let on_delete = Callback::new(move |_| {
        let task_id = id.get_value();
        if ctx.dispatch_board(BoardCommand::DeleteTask(task_id.clone())) {
            store_close_if_editing(&store, &EditTarget::Task(task_id));
        }
    });

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
            on:click=move |_| {
                // the click that ends a drag is not an edit
                if !dnd.drag_just_ended_read.get_untracked() {
                    store_edit(&store, EditTarget::Task(id.get_value()));
                }
            }
        >
            <div class="task-card-top">
                <span class=format!("task-type type-{}", task.task_type.as_str())>{task.task_type.as_str()}</span>
                <span class=format!("task-priority priority-{}", task.priority.as_str())>{task.priority.as_str()}</span>
                <DeleteConfirmButton button_class="delete-btn" title="Delete task" on_confirm=on_delete />
            </div>

            <div class="task-title">{task.title.clone()}</div>

            {(!task.labels.is_empty()).then(|| view! {
                <div class="task-labels">
                    {task.labels.iter().map(|l| view! { <span class="task-label">{l.clone()}</span> }).collect_view()}
                </div>
            })}

            <div class="task-meta">
                {task.story_points.map(|p| view! { <span class="story-points" title="Story points">{p}</span> })}
                {due.map(|d| view! {
                    <span class=if overdue { "due-date overdue" } else { "due-date" }>{d}</span>
                })}
                {subtasks.map(|s| view! { <span class="subtask-count">{s}</span> })}
                {(!task.comments.is_empty()).then(|| view! {
                    <span class="comment-count">{format!("💬 {}", task.comments.len())}</span>
                })}
                {task.assignee.as_ref().map(|a| view! {
                    <span class="assignee-avatar" title=a.name.clone()>{initials(&a.name)}</span>
                })}
            </div>
        </div>
    }
}

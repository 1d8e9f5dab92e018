//! Task Editor Component
//!
//! Properties panel form for creating a task in a column or editing one.

use chrono::{DateTime, NaiveDate, Utc};
use leptos::prelude::*;

use deskboard_core::board::BoardCommand;
use deskboard_core::domain::{now, sample_users, Priority, Task, TaskPatch, TaskType};

use crate::components::EditTarget;
use crate::context::use_app_context;
use crate::store::{store_close_editor, use_app_store};

fn parse_due(value: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn parse_labels(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

#[component]
pub fn TaskEditor(target: EditTarget) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (column_id, task_id) = match &target {
        EditTarget::NewTask(column) => (Some(column.clone()), None),
        EditTarget::Task(id) => (None, Some(id.clone())),
        EditTarget::Widget(_) => (None, None),
    };
    let existing: Option<Task> = task_id
        .as_ref()
        .and_then(|id| ctx.board.with_untracked(|s| s.state().tasks.get(id).cloned()));

    let users = sample_users();
    let column_title = {
        let column = column_id.clone().or_else(|| existing.as_ref().map(|t| t.status.as_str().to_string()));
        ctx.board.with_untracked(|s| {
            column
                .and_then(|c| s.state().column(&c).map(|c| c.title.clone()))
                .unwrap_or_default()
        })
    };

    // Draft fields
    let title = RwSignal::new(existing.as_ref().map(|t| t.title.clone()).unwrap_or_default());
    let description = RwSignal::new(existing.as_ref().map(|t| t.description.clone()).unwrap_or_default());
    let priority = RwSignal::new(existing.as_ref().map(|t| t.priority).unwrap_or_default());
    let task_type = RwSignal::new(existing.as_ref().map(|t| t.task_type).unwrap_or_default());
    let assignee = RwSignal::new(
        existing
            .as_ref()
            .and_then(|t| t.assignee.as_ref().map(|a| a.id.clone()))
            .unwrap_or_default(),
    );
    let labels = RwSignal::new(existing.as_ref().map(|t| t.labels.join(", ")).unwrap_or_default());
    let points = RwSignal::new(
        existing
            .as_ref()
            .and_then(|t| t.story_points.map(|p| p.to_string()))
            .unwrap_or_default(),
    );
    let due = RwSignal::new(
        existing
            .as_ref()
            .and_then(|t| t.due_date.map(|d| d.format("%Y-%m-%d").to_string()))
            .unwrap_or_default(),
    );
    let epic = RwSignal::new(existing.as_ref().and_then(|t| t.epic.clone()).unwrap_or_default());
    let sprint = RwSignal::new(existing.as_ref().and_then(|t| t.sprint.clone()).unwrap_or_default());
    let (error, set_error) = signal::<Option<&'static str>>(None);

    let picker_users = StoredValue::new(users.clone());
    let build_patch = move || TaskPatch {
        title: Some(title.get_untracked().trim().to_string()),
        description: Some(description.get_untracked()),
        priority: Some(priority.get_untracked()),
        assignee: Some(picker_users.with_value(|users| {
            let id = assignee.get_untracked();
            users.iter().find(|u| u.id == id).cloned()
        })),
        labels: Some(parse_labels(&labels.get_untracked())),
        story_points: Some(points.get_untracked().trim().parse().ok()),
        due_date: Some(parse_due(&due.get_untracked())),
        task_type: Some(task_type.get_untracked()),
        epic: Some(optional(epic.get_untracked())),
        sprint: Some(optional(sprint.get_untracked())),
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if title.get_untracked().trim().is_empty() {
            set_error.set(Some("Title is required"));
            return;
        }
        let patch = build_patch();
        let saved = match (&column_id, &task_id) {
            (Some(column_id), _) => match picker_users.with_value(|u| u.first().cloned()) {
                Some(reporter) => {
                    let mut task = Task::new(String::new(), reporter, now());
                    task.apply_patch(patch);
                    ctx.dispatch_board(BoardCommand::AddTask {
                        column_id: column_id.clone(),
                        task,
                    })
                }
                None => false,
            },
            (None, Some(id)) => ctx.dispatch_board(BoardCommand::UpdateTask { id: id.clone(), patch }),
            (None, None) => false,
        };
        if saved {
            store_close_editor(&store);
        } else {
            set_error.set(Some("The task no longer exists"));
        }
    };

    let heading = if existing.is_some() { "Edit task" } else { "New task" };
    let reporter = existing.as_ref().map(|t| t.reporter.name.clone());

    view! {
        <form class="task-editor" on:submit=on_submit>
            <h2>{heading}</h2>
            <p class="editor-context">{column_title}</p>

            <label>"Title"
                <input type="text" prop:value=move || title.get() on:input=move |ev| title.set(event_target_value(&ev)) />
            </label>
            <label>"Description"
                <textarea prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev)) />
            </label>

            <div class="editor-row">
                <label>"Priority"
                    <select
                        prop:value=move || priority.get().as_str()
                        on:change=move |ev| {
                            if let Some(p) = Priority::from_str(&event_target_value(&ev)) { priority.set(p); }
                        }
                    >
                        {Priority::ALL.iter().map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> }).collect_view()}
                    </select>
                </label>
                <label>"Type"
                    <select
                        prop:value=move || task_type.get().as_str()
                        on:change=move |ev| {
                            if let Some(t) = TaskType::from_str(&event_target_value(&ev)) { task_type.set(t); }
                        }
                    >
                        {TaskType::ALL.iter().map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> }).collect_view()}
                    </select>
                </label>
            </div>

            <label>"Assignee"
                <select prop:value=move || assignee.get() on:change=move |ev| assignee.set(event_target_value(&ev))>
                    <option value="">"Unassigned"</option>
                    {users.into_iter().map(|u| view! { <option value=u.id.clone()>{u.name.clone()}</option> }).collect_view()}
                </select>
            </label>

            <label>"Labels"
                <input
                    type="text"
                    placeholder="frontend, api"
                    prop:value=move || labels.get()
                    on:input=move |ev| labels.set(event_target_value(&ev))
                />
            </label>

            <div class="editor-row">
                <label>"Story points"
                    <input type="number" min="0" prop:value=move || points.get() on:input=move |ev| points.set(event_target_value(&ev)) />
                </label>
                <label>"Due date"
                    <input type="date" prop:value=move || due.get() on:input=move |ev| due.set(event_target_value(&ev)) />
                </label>
            </div>

            <div class="editor-row">
                <label>"Epic"
                    <input type="text" prop:value=move || epic.get() on:input=move |ev| epic.set(event_target_value(&ev)) />
                </label>
                <label>"Sprint"
                    <input type="text" prop:value=move || sprint.get() on:input=move |ev| sprint.set(event_target_value(&ev)) />
                </label>
            </div>

            {reporter.map(|r| view! { <p class="editor-context">{format!("Reported by {}", r)}</p> })}
            {move || error.get().map(|e| view! { <p class="editor-error">{e}</p> })}

            <div class="editor-actions">
                <button type="submit">"Save"</button>
                <button type="button" on:click=move |_| store_close_editor(&store)>"Cancel"</button>
            </div>
        </form>
    }
}

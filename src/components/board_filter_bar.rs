//! Board Filter Bar Component
//!
//! Search box plus priority, assignee and type menus. Filters only hide cards;
//! the board itself is untouched.

use leptos::prelude::*;

use deskboard_core::board::{AssigneeFilter, TaskFilter};
use deskboard_core::domain::{sample_users, Priority, TaskType};

use crate::store::{use_app_store, AppStateStoreFields};

const ANY: &str = "";
const UNASSIGNED: &str = "unassigned";

#[component]
pub fn BoardFilterBar() -> impl IntoView {
    let store = use_app_store();
    let filter = store.board_filter();

    let assignee_value = move || {
        filter.with(|f| match &f.assignee {
            AssigneeFilter::Any => ANY.to_string(),
            AssigneeFilter::Unassigned => UNASSIGNED.to_string(),
            AssigneeFilter::User(id) => id.clone(),
        })
    };

    view! {
        <div class="board-filter-bar">
            <input
                type="search"
                class="filter-search"
                placeholder="Search tasks..."
                prop:value=move || filter.with(|f| f.query.clone())
                on:input=move |ev| {
                    let query = event_target_value(&ev);
                    filter.update(|f| f.query = query);
                }
            />

            <select
                prop:value=move || filter.with(|f| f.priority.map(|p| p.as_str()).unwrap_or(ANY).to_string())
                on:change=move |ev| {
                    let priority = Priority::from_str(&event_target_value(&ev));
                    filter.update(|f| f.priority = priority);
                }
            >
                <option value=ANY>"All priorities"</option>
                {Priority::ALL.iter().map(|p| view! { <option value=p.as_str()>{p.as_str()}</option> }).collect_view()}
            </select>

            <select
                prop:value=assignee_value
                on:change=move |ev| {
                    let assignee = match event_target_value(&ev).as_str() {
                        ANY => AssigneeFilter::Any,
                        UNASSIGNED => AssigneeFilter::Unassigned,
                        id => AssigneeFilter::User(id.to_string()),
                    };
                    filter.update(|f| f.assignee = assignee);
                }
            >
                <option value=ANY>"All assignees"</option>
                <option value=UNASSIGNED>"Unassigned"</option>
                {sample_users().into_iter().map(|u| view! { <option value=u.id.clone()>{u.name.clone()}</option> }).collect_view()}
            </select>

            <select
                prop:value=move || filter.with(|f| f.task_type.map(|t| t.as_str()).unwrap_or(ANY).to_string())
                on:change=move |ev| {
                    let task_type = TaskType::from_str(&event_target_value(&ev));
                    filter.update(|f| f.task_type = task_type);
                }
            >
                <option value=ANY>"All types"</option>
                {TaskType::ALL.iter().map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> }).collect_view()}
            </select>

            <Show when=move || filter.with(|f| f.is_active())>
                <button class="filter-clear-btn" on:click=move |_| filter.set(TaskFilter::default())>
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}

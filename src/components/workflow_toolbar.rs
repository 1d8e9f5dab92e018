//! Workflow Toolbar & Saved Workflows
//!
//! Name/description/status of the open workflow, node counts, and the
//! New / Save / Run actions. `SavedWorkflows` lists what is in storage.

use leptos::prelude::*;

use deskboard_core::domain::WorkflowStatus;
use deskboard_core::workflow::WorkflowCommand;
use deskboard_core::DomainError;

use crate::commands::{alert, confirm};
use crate::context::use_app_context;
use crate::store::{store_saved_workflows_changed, use_app_store, AppStateStoreFields};

/// Show a blocking message; a failed dialog is only logged
fn notify(message: &str) {
    if let Err(e) = alert(message) {
        log::warn!("[WORKFLOW] Alert failed: {}", e);
    }
}

#[component]
pub fn WorkflowToolbar(selected_edge: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let name = move || ctx.workflow.with(|s| s.state().name.clone());
    let description = move || ctx.workflow.with(|s| s.state().description.clone());
    let status = move || ctx.workflow.with(|s| s.state().status);
    let stats = Memo::new(move |_| ctx.workflow.with(|s| s.state().graph.stats()));

    let set_meta = move |name: Option<String>, description: Option<String>, status: Option<WorkflowStatus>| {
        let (cur_name, cur_description, cur_status) = ctx
            .workflow
            .with_untracked(|s| (s.state().name.clone(), s.state().description.clone(), s.state().status));
        ctx.dispatch_workflow(WorkflowCommand::SetMeta {
            name: name.unwrap_or(cur_name),
            description: description.unwrap_or(cur_description),
            status: status.unwrap_or(cur_status),
        });
    };

    let on_new = move |_| {
        let has_nodes = ctx.workflow.with_untracked(|s| !s.state().graph.nodes.is_empty());
        if has_nodes {
            match confirm("Start a new workflow? Unsaved changes will be lost.") {
                Ok(true) => {}
                Ok(false) => return,
                Err(e) => {
                    log::warn!("[WORKFLOW] Confirm dialog failed: {}", e);
                    return;
                }
            }
        }
        selected_edge.set(None);
        ctx.dispatch_workflow(WorkflowCommand::New);
    };

    let on_save = move |_| {
        if ctx.dispatch_workflow(WorkflowCommand::Save) {
            store_saved_workflows_changed(&store);
            notify("Workflow saved successfully!");
        }
    };

    let on_run = move |_| {
        let result = ctx.workflow.with_untracked(|s| s.state().graph.validate_for_run());
        match result {
            Ok(summary) => {
                log::info!("[WORKFLOW] Run requested: {} nodes, {} edges", summary.nodes, summary.edges);
                notify(&format!(
                    "Workflow execution started!\nNodes: {}\nConnections: {}",
                    summary.nodes, summary.edges
                ));
            }
            Err(e) => notify(&e.to_string()),
        }
    };

    view! {
        <div class="workflow-toolbar">
            <div class="workflow-meta">
                <input
                    class="workflow-name"
                    type="text"
                    prop:value=name
                    on:change=move |ev| set_meta(Some(event_target_value(&ev)), None, None)
                />
                <input
                    class="workflow-description"
                    type="text"
                    placeholder="Description"
                    prop:value=description
                    on:change=move |ev| set_meta(None, Some(event_target_value(&ev)), None)
                />
                <select
                    class="workflow-status"
                    prop:value=move || status().as_str()
                    on:change=move |ev| {
                        if let Some(status) = WorkflowStatus::from_str(&event_target_value(&ev)) {
                            set_meta(None, None, Some(status));
                        }
                    }
                >
                    {WorkflowStatus::ALL.into_iter().map(|s| view! {
                        <option value=s.as_str()>{s.as_str()}</option>
                    }).collect_view()}
                </select>
            </div>

            <div class="workflow-stats">
                {move || {
                    let s = stats.get();
                    format!(
                        "{} nodes · {} connections · {} forms · {} approvals · {} conditions · {} actions",
                        s.total, s.edges, s.form, s.approval, s.condition, s.action
                    )
                }}
            </div>

            <div class="workflow-actions">
                <button on:click=on_new>"New"</button>
                <button on:click=on_save>"Save"</button>
                <button class="run-btn" on:click=on_run>"Run"</button>
            </div>
        </div>
    }
}

/// Saved workflows with open/delete actions
#[component]
pub fn SavedWorkflows(selected_edge: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let current_id = move || ctx.workflow.with(|s| s.state().id.clone());

    let list = move || -> Result<_, DomainError> {
        store.saved_workflows_version().track();
        let summaries = ctx.saved_workflows()?;
        Ok(view! {
            <ul class="saved-workflows">
                {summaries.is_empty().then(|| view! { <li class="saved-empty">"No saved workflows"</li> })}
                {summaries.into_iter().map(|summary| {
                    let id = StoredValue::new(summary.id.clone());
                    let is_current = move || current_id().as_deref() == Some(id.get_value().as_str());
                    let updated = summary
                        .updated_at
                        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                        .unwrap_or_default();
                    view! {
                        <li class=move || if is_current() { "saved-workflow current" } else { "saved-workflow" }>
                            <div class="saved-workflow-name">{summary.name.clone()}</div>
                            <div class="saved-workflow-meta">
                                {format!("{} · {} nodes · {}", summary.status.as_str(), summary.nodes, updated)}
                            </div>
                            <button on:click=move |_| {
                                if ctx.open_workflow(&id.get_value()) {
                                    selected_edge.set(None);
                                }
                            }>"Open"</button>
                            <button on:click=move |_| {
                                match confirm("Delete this saved workflow?") {
                                    Ok(true) => {
                                        if let Err(e) = ctx.delete_saved_workflow(&id.get_value()) {
                                            notify(&format!("Could not delete workflow: {}", e));
                                        }
                                        store_saved_workflows_changed(&store);
                                    }
                                    Ok(false) => {}
                                    Err(e) => log::warn!("[WORKFLOW] Confirm dialog failed: {}", e),
                                }
                            }>"Delete"</button>
                        </li>
                    }
                }).collect_view()}
            </ul>
        })
    };

    view! {
        <section class="saved-workflows-panel">
            <h3>"Saved workflows"</h3>
            {list}
        </section>
    }
}

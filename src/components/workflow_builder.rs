//! Workflow Builder
//!
//! Three columns: node library, toolbar over the canvas, and the
//! node/edge editor above the saved workflows list.

use leptos::prelude::*;

use crate::components::node_editor::{EdgeEditor, NodeEditor};
use crate::components::workflow_canvas::WorkflowCanvas;
use crate::components::workflow_toolbar::{SavedWorkflows, WorkflowToolbar};
use crate::components::NodeLibrary;
use crate::context::use_app_context;

#[component]
pub fn WorkflowBuilder() -> impl IntoView {
    let ctx = use_app_context();
    // Edge selection is local to the builder; node selection lives in the graph
    let selected_edge = RwSignal::new(None::<String>);

    // Drop the edge selection once its edge is gone
    Effect::new(move |_| {
        let Some(id) = selected_edge.get() else { return; };
        let exists = ctx.workflow.with(|s| s.state().graph.edges.iter().any(|e| e.id == id));
        if !exists {
            selected_edge.set(None);
        }
    });

    view! {
        <div class="workflow-builder">
            <NodeLibrary />
            <div class="workflow-main">
                <WorkflowToolbar selected_edge=selected_edge />
                <WorkflowCanvas selected_edge=selected_edge />
            </div>
            <aside class="workflow-sidebar">
                {move || match selected_edge.get() {
                    Some(edge_id) => view! { <EdgeEditor edge_id=edge_id selected_edge=selected_edge /> }.into_any(),
                    None => view! { <NodeEditor /> }.into_any(),
                }}
                <SavedWorkflows selected_edge=selected_edge />
            </aside>
        </div>
    }
}

//! Node Library Component
//!
//! Palette of node templates, dragged onto the canvas with native HTML5
//! drag-and-drop. The template travels as JSON in the DataTransfer.

use leptos::prelude::*;
use web_sys::DragEvent;

use deskboard_core::domain::{node_templates, NodeKind};
use deskboard_core::graph::{encode_template, NODE_TEMPLATE_MIME};

pub fn node_icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Start => "▶",
        NodeKind::End => "■",
        NodeKind::Form => "📝",
        NodeKind::Approval => "✔",
        NodeKind::Condition => "◆",
        NodeKind::Action => "⚡",
    }
}

#[component]
pub fn NodeLibrary() -> impl IntoView {
    view! {
        <aside class="node-library">
            <h3>"Nodes"</h3>
            <p class="node-library-hint">"Drag onto the canvas"</p>
            {node_templates().into_iter().map(|template| {
                let kind = template.kind();
                let label = template.label.clone();
                let description = template.description.clone();
                let payload = StoredValue::new(encode_template(&template).map_err(|e| e.to_string()));

                let on_dragstart = move |ev: DragEvent| {
                    let Some(transfer) = ev.data_transfer() else { return; };
                    match payload.get_value() {
                        Ok(json) => {
                            if let Err(e) = transfer.set_data(NODE_TEMPLATE_MIME, &json) {
                                log::warn!("[WORKFLOW] Could not start drag: {:?}", e);
                            }
                            transfer.set_effect_allowed("move");
                        }
                        Err(e) => log::error!("[WORKFLOW] Template not serializable: {}", e),
                    }
                };

                view! {
                    <div
                        class=format!("node-template node-{}", kind.as_str())
                        draggable="true"
                        on:dragstart=on_dragstart
                    >
                        <span class="node-icon">{node_icon(kind)}</span>
                        <div class="node-template-text">
                            <span class="node-template-label">{label}</span>
                            <span class="node-template-description">{description}</span>
                        </div>
                    </div>
                }
            }).collect_view()}
        </aside>
    }
}

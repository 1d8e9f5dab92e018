//! Node & Edge Editors
//!
//! Right column of the workflow builder. Edits the selected node's payload
//! (fields depend on its type) or the selected edge's label and condition.

use leptos::prelude::*;

use deskboard_core::domain::{now, EdgeData, FieldType, FormField, NodeKind, NodePatch, NodePayload};
use deskboard_core::registry::fresh_id;
use deskboard_core::workflow::WorkflowCommand;

use crate::components::node_library::node_icon;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;

/// "a, b ,,c" -> ["a", "b", "c"]
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Editor for the selected node; empty hint when nothing is selected
#[component]
pub fn NodeEditor() -> impl IntoView {
    let ctx = use_app_context();
    let selected = Memo::new(move |_| ctx.workflow.with(|s| s.state().graph.selected.clone()));

    move || match selected.get() {
        Some(id) => view! { <NodeForm node_id=id /> }.into_any(),
        None => view! {
            <p class="editor-hint">"Select a node to edit its properties"</p>
        }
        .into_any(),
    }
}

#[component]
fn NodeForm(node_id: String) -> impl IntoView {
    let ctx = use_app_context();

    let Some(node) = ctx.workflow.with_untracked(|s| s.state().graph.node(&node_id).cloned()) else {
        return view! { <p class="editor-hint">"This node no longer exists"</p> }.into_any();
    };
    let kind = node.kind();
    let id = StoredValue::new(node_id);

    let label = RwSignal::new(node.payload.label().to_string());
    let description = RwSignal::new(node.payload.description().unwrap_or_default().to_string());
    let (form_fields, approvers, condition, action) = match &node.payload {
        NodePayload::Form(d) => (d.form_fields.clone(), String::new(), String::new(), String::new()),
        NodePayload::Approval(d) => (Vec::new(), d.approvers.join(", "), String::new(), String::new()),
        NodePayload::Condition(d) => (Vec::new(), String::new(), d.condition.clone().unwrap_or_default(), String::new()),
        NodePayload::Action(d) => (Vec::new(), String::new(), String::new(), d.action().unwrap_or_default().to_string()),
        NodePayload::Start(_) | NodePayload::End(_) => (Vec::new(), String::new(), String::new(), String::new()),
    };
    let form_fields = RwSignal::new(form_fields);
    let approvers = RwSignal::new(approvers);
    let condition = RwSignal::new(condition);
    let action = RwSignal::new(action);
    let (saved, set_saved) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut patch = NodePatch {
            label: Some(label.get_untracked().trim().to_string()),
            description: Some(blank_to_none(description.get_untracked())),
            ..Default::default()
        };
        match kind {
            NodeKind::Form => patch.form_fields = Some(form_fields.get_untracked()),
            NodeKind::Approval => patch.approvers = Some(parse_list(&approvers.get_untracked())),
            NodeKind::Condition => patch.condition = Some(blank_to_none(condition.get_untracked())),
            NodeKind::Action => patch.action = Some(blank_to_none(action.get_untracked())),
            NodeKind::Start | NodeKind::End => {}
        }
        if ctx.dispatch_workflow(WorkflowCommand::UpdateNode { id: id.get_value(), patch }) {
            set_saved.set(true);
        }
    };

    let on_delete = Callback::new(move |_| {
        ctx.dispatch_workflow(WorkflowCommand::RemoveNode(id.get_value()));
    });

    let add_field = move |_| {
        form_fields.update(|fields| {
            let field_id = fresh_id("field", now(), |candidate| fields.iter().any(|f| f.id == candidate));
            let n = fields.len() + 1;
            fields.push(FormField {
                id: field_id,
                name: format!("field{}", n),
                field_type: FieldType::Text,
                label: format!("Field {}", n),
                required: false,
                options: None,
            });
        });
    };

    view! {
        <form class="node-editor" on:submit=on_submit on:input=move |_| set_saved.set(false)>
            <h3>
                <span class="node-icon">{node_icon(kind)}</span>
                {format!(" {} node", kind.as_str())}
            </h3>

            <label>"Label"
                <input type="text" prop:value=move || label.get() on:input=move |ev| label.set(event_target_value(&ev)) />
            </label>
            <label>"Description"
                <textarea rows="2" prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev)) />
            </label>

            {match kind {
                NodeKind::Form => view! {
                    <fieldset class="form-fields">
                        <legend>"Form fields"</legend>
                        <For
                            each=move || form_fields.get()
                            key=|f| f.id.clone()
                            children=move |field| view! { <FormFieldRow field_id=field.id.clone() fields=form_fields /> }
                        />
                        <button type="button" class="add-field-btn" on:click=add_field>"+ Add field"</button>
                    </fieldset>
                }.into_any(),
                NodeKind::Approval => view! {
                    <label>"Approvers (comma separated)"
                        <input type="text" prop:value=move || approvers.get() on:input=move |ev| approvers.set(event_target_value(&ev)) />
                    </label>
                }.into_any(),
                NodeKind::Condition => view! {
                    <label>"Condition"
                        <input type="text" placeholder="amount > 1000" prop:value=move || condition.get() on:input=move |ev| condition.set(event_target_value(&ev)) />
                    </label>
                }.into_any(),
                NodeKind::Action => view! {
                    <label>"Action"
                        <input type="text" placeholder="send_email" prop:value=move || action.get() on:input=move |ev| action.set(event_target_value(&ev)) />
                    </label>
                }.into_any(),
                NodeKind::Start | NodeKind::End => ().into_any(),
            }}

            <div class="editor-actions">
                <button type="submit">"Apply"</button>
                <DeleteConfirmButton button_class="node-delete-btn" title="Delete node" prompt="Delete node?" on_confirm=on_delete />
                {move || saved.get().then(|| view! { <span class="editor-saved">"Applied"</span> })}
            </div>
        </form>
    }
    .into_any()
}

/// One editable row of a form node's field list
#[component]
fn FormFieldRow(field_id: String, fields: RwSignal<Vec<FormField>>) -> impl IntoView {
    let id = StoredValue::new(field_id);
    let read = move |f: fn(&FormField) -> String| {
        fields.with(|all| all.iter().find(|x| x.id == id.get_value()).map(f).unwrap_or_default())
    };
    let edit = move |f: Box<dyn FnOnce(&mut FormField)>| {
        fields.update(|all| {
            if let Some(field) = all.iter_mut().find(|x| x.id == id.get_value()) {
                f(field);
            }
        });
    };
    let is_select = move || read(|f| f.field_type.as_str().to_string()) == FieldType::Select.as_str();
    let required = move || fields.with(|all| all.iter().any(|x| x.id == id.get_value() && x.required));

    view! {
        <div class="form-field-row">
            <input
                type="text"
                placeholder="name"
                prop:value=move || read(|f| f.name.clone())
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    edit(Box::new(move |f| f.name = v));
                }
            />
            <input
                type="text"
                placeholder="Label"
                prop:value=move || read(|f| f.label.clone())
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    edit(Box::new(move |f| f.label = v));
                }
            />
            <select
                prop:value=move || read(|f| f.field_type.as_str().to_string())
                on:change=move |ev| {
                    if let Some(t) = FieldType::from_str(&event_target_value(&ev)) {
                        edit(Box::new(move |f| {
                            f.field_type = t;
                            if t != FieldType::Select {
                                f.options = None;
                            }
                        }));
                    }
                }
            >
                {FieldType::ALL.into_iter().map(|t| view! { <option value=t.as_str()>{t.as_str()}</option> }).collect_view()}
            </select>
            <label class="checkbox-field">
                <input
                    type="checkbox"
                    prop:checked=required
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        edit(Box::new(move |f| f.required = checked));
                    }
                />
                "Required"
            </label>
            <Show when=is_select>
                <input
                    type="text"
                    placeholder="Options, comma separated"
                    prop:value=move || read(|f| f.options.as_ref().map(|o| o.join(", ")).unwrap_or_default())
                    on:change=move |ev| {
                        let options = parse_list(&event_target_value(&ev));
                        edit(Box::new(move |f| f.options = Some(options)));
                    }
                />
            </Show>
            <button
                type="button"
                class="remove-field-btn"
                title="Remove field"
                on:click=move |_| fields.update(|all| all.retain(|x| x.id != id.get_value()))
            >"×"</button>
        </div>
    }
}

/// Editor for the selected edge
#[component]
pub fn EdgeEditor(edge_id: String, selected_edge: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();

    let Some(edge) = ctx
        .workflow
        .with_untracked(|s| s.state().graph.edges.iter().find(|e| e.id == edge_id).cloned())
    else {
        return view! { <p class="editor-hint">"This connection no longer exists"</p> }.into_any();
    };
    let id = StoredValue::new(edge_id);
    let data = edge.data.unwrap_or_default();
    let label = RwSignal::new(data.label.unwrap_or_default());
    let condition = RwSignal::new(data.condition.unwrap_or_default());
    let endpoints = ctx.workflow.with_untracked(|s| {
        let graph = &s.state().graph;
        let name = |node_id: &str| graph.node(node_id).map(|n| n.payload.label().to_string()).unwrap_or_default();
        format!("{} → {}", name(&edge.source), name(&edge.target))
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let data = EdgeData {
            label: blank_to_none(label.get_untracked()),
            condition: blank_to_none(condition.get_untracked()),
        };
        let data = (data != EdgeData::default()).then_some(data);
        ctx.dispatch_workflow(WorkflowCommand::UpdateEdge { id: id.get_value(), data });
    };

    let on_delete = Callback::new(move |_| {
        if ctx.dispatch_workflow(WorkflowCommand::RemoveEdge(id.get_value())) {
            selected_edge.set(None);
        }
    });

    view! {
        <form class="edge-editor" on:submit=on_submit>
            <h3>"Connection"</h3>
            <p class="editor-context">{endpoints}</p>
            <label>"Label"
                <input type="text" prop:value=move || label.get() on:input=move |ev| label.set(event_target_value(&ev)) />
            </label>
            <label>"Condition"
                <input type="text" placeholder="approved == true" prop:value=move || condition.get() on:input=move |ev| condition.set(event_target_value(&ev)) />
            </label>
            <div class="editor-actions">
                <button type="submit">"Apply"</button>
                <DeleteConfirmButton button_class="edge-delete-btn" title="Delete connection" prompt="Delete connection?" on_confirm=on_delete />
            </div>
        </form>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("jane, john ,, "), vec!["jane".to_string(), "john".to_string()]);
        assert!(parse_list("   ").is_empty());
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none("  ".to_string()), None);
        assert_eq!(blank_to_none(" x > 1 ".to_string()), Some("x > 1".to_string()));
    }
}

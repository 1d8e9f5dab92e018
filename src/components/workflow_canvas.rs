//! Workflow Canvas Component
//!
//! Pan/zoom surface holding the nodes and the edges between them.
//! - drop a library template to add a node at the projected pointer position
//! - drag a node to move it (written once, on release)
//! - drag from a node's output handle onto another node to connect them
//! - drag empty space to pan, scroll to zoom around the pointer

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, MouseEvent, WheelEvent};

use deskboard_core::domain::{CanvasPoint, WorkflowNode};
use deskboard_core::graph::{decode_template, NODE_TEMPLATE_MIME};
use deskboard_core::placement::Viewport;
use deskboard_core::workflow::WorkflowCommand;

use crate::components::node_library::node_icon;
use crate::context::use_app_context;

const NODE_WIDTH: f64 = 180.0;
const NODE_HEIGHT: f64 = 64.0;
const MIN_ZOOM: f64 = 0.25;
const MAX_ZOOM: f64 = 2.5;
/// Pixels of movement before a press on a node counts as a move
const MOVE_THRESHOLD: i32 = 3;

/// Pointer gesture in progress on the canvas
#[derive(Clone, Debug, PartialEq)]
enum Gesture {
    Idle,
    Pan { start: (i32, i32), origin: Viewport, moved: bool },
    MoveNode { id: String, start: (i32, i32), origin: CanvasPoint, moved: bool },
    Connect { source: String },
}

/// Pointer position relative to the element the handler is bound to
fn local_point(ev: &MouseEvent) -> (f64, f64) {
    match ev
        .current_target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
    {
        Some(el) => {
            let rect = el.get_bounding_client_rect();
            (ev.client_x() as f64 - rect.left(), ev.client_y() as f64 - rect.top())
        }
        None => (ev.client_x() as f64, ev.client_y() as f64),
    }
}

fn node_summary(node: &WorkflowNode) -> Option<String> {
    use deskboard_core::domain::NodePayload;
    match &node.payload {
        NodePayload::Form(d) if !d.form_fields.is_empty() => Some(format!("{} fields", d.form_fields.len())),
        NodePayload::Approval(d) if !d.approvers.is_empty() => Some(format!("{} approvers", d.approvers.len())),
        NodePayload::Condition(d) => d.condition.clone(),
        NodePayload::Action(d) => d.action().map(str::to_string),
        _ => None,
    }
}

#[component]
pub fn WorkflowCanvas(selected_edge: RwSignal<Option<String>>) -> impl IntoView {
    let ctx = use_app_context();
    let viewport = RwSignal::new(Viewport::default());
    let gesture = RwSignal::new(Gesture::Idle);
    // Live position of the node being moved
    let preview = RwSignal::new(None::<(String, CanvasPoint)>);
    // Pointer in canvas space while connecting
    let cursor = RwSignal::new(CanvasPoint::default());

    let position_of = move |node: &WorkflowNode| {
        preview.with(|p| match p {
            Some((id, point)) if *id == node.id => *point,
            _ => node.position,
        })
    };

    // Template drop from the node library
    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if let Some(transfer) = ev.data_transfer() {
            transfer.set_drop_effect("move");
        }
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        let raw = ev
            .data_transfer()
            .and_then(|t| t.get_data(NODE_TEMPLATE_MIME).ok())
            .unwrap_or_default();
        let Some(template) = decode_template(&raw) else { return; };
        let (sx, sy) = local_point(&ev);
        let position = viewport.get_untracked().project(sx, sy);
        ctx.dispatch_workflow(WorkflowCommand::AddNode { template, position });
    };

    // Background press: pan
    let on_mousedown = move |ev: MouseEvent| {
        if ev.button() != 0 {
            return;
        }
        gesture.set(Gesture::Pan {
            start: (ev.client_x(), ev.client_y()),
            origin: viewport.get_untracked(),
            moved: false,
        });
    };

    let on_mousemove = move |ev: MouseEvent| {
        let (cx, cy) = (ev.client_x(), ev.client_y());
        match gesture.get_untracked() {
            Gesture::Idle => {}
            Gesture::Pan { start, origin, .. } => {
                viewport.set(Viewport {
                    x: origin.x + (cx - start.0) as f64,
                    y: origin.y + (cy - start.1) as f64,
                    ..origin
                });
                gesture.update(|g| {
                    if let Gesture::Pan { moved, .. } = g { *moved = true; }
                });
            }
            Gesture::MoveNode { id, start, origin, moved } => {
                let (dx, dy) = (cx - start.0, cy - start.1);
                if !moved && dx.abs() <= MOVE_THRESHOLD && dy.abs() <= MOVE_THRESHOLD {
                    return;
                }
                let zoom = viewport.get_untracked().zoom;
                preview.set(Some((
                    id,
                    CanvasPoint::new(origin.x + dx as f64 / zoom, origin.y + dy as f64 / zoom),
                )));
                gesture.update(|g| {
                    if let Gesture::MoveNode { moved, .. } = g { *moved = true; }
                });
            }
            Gesture::Connect { .. } => {
                let (sx, sy) = local_point(&ev);
                cursor.set(viewport.get_untracked().project(sx, sy));
            }
        }
    };

    let on_mouseup = move |_ev: MouseEvent| {
        match gesture.get_untracked() {
            Gesture::Pan { moved: false, .. } => {
                // plain click on empty canvas
                selected_edge.set(None);
                ctx.dispatch_workflow(WorkflowCommand::Select(None));
            }
            Gesture::MoveNode { id, moved, .. } => {
                if moved {
                    if let Some((_, position)) = preview.get_untracked() {
                        ctx.dispatch_workflow(WorkflowCommand::MoveNode { id, position });
                    }
                } else {
                    selected_edge.set(None);
                    ctx.dispatch_workflow(WorkflowCommand::Select(Some(id)));
                }
            }
            _ => {}
        }
        preview.set(None);
        gesture.set(Gesture::Idle);
    };

    let on_wheel = move |ev: WheelEvent| {
        ev.prevent_default();
        let (sx, sy) = local_point(&ev);
        viewport.update(|v| {
            let anchor = v.project(sx, sy);
            let factor = if ev.delta_y() < 0.0 { 1.1 } else { 1.0 / 1.1 };
            v.zoom = (v.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
            // keep the canvas point under the pointer fixed
            v.x = sx - anchor.x * v.zoom;
            v.y = sy - anchor.y * v.zoom;
        });
    };

    let zoom_by = move |factor: f64| {
        viewport.update(|v| v.zoom = (v.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM));
    };

    let nodes = move || {
        ctx.workflow.with(|s| s.state().graph.nodes.iter().cloned().collect::<Vec<_>>())
    };
    let selected_node = Memo::new(move |_| ctx.workflow.with(|s| s.state().graph.selected.clone()));

    // Edge segments from the source's output handle to the target's input side
    let edges = move || {
        ctx.workflow.with(|s| {
            let graph = &s.state().graph;
            graph
                .edges
                .iter()
                .filter_map(|edge| {
                    let source = graph.node(&edge.source).map(position_of)?;
                    let target = graph.node(&edge.target).map(position_of)?;
                    let label = edge.data.as_ref().and_then(|d| d.label.clone());
                    Some((edge.id.clone(), source, target, label))
                })
                .collect::<Vec<_>>()
        })
    };

    let rubber_band = move || match gesture.get() {
        Gesture::Connect { source } => ctx.workflow.with(|s| {
            s.state().graph.node(&source).map(|n| {
                let from = position_of(n);
                let to = cursor.get();
                view! {
                    <line
                        class="edge-pending"
                        x1=from.x + NODE_WIDTH
                        y1=from.y + NODE_HEIGHT / 2.0
                        x2=to.x
                        y2=to.y
                    />
                }
            })
        }),
        _ => None,
    };

    let layer_style = move || {
        let v = viewport.get();
        format!("transform: translate({}px, {}px) scale({}); transform-origin: 0 0;", v.x, v.y, v.zoom)
    };

    view! {
        <div
            class="workflow-canvas"
            on:dragover=on_dragover
            on:drop=on_drop
            on:mousedown=on_mousedown
            on:mousemove=on_mousemove
            on:mouseup=on_mouseup
            on:mouseleave=on_mouseup
            on:wheel=on_wheel
        >
            <div class="canvas-layer" style=layer_style>
                <svg class="edge-layer">
                    <defs>
                        <marker id="arrow" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse">
                            <path d="M 0 0 L 10 5 L 0 10 z" />
                        </marker>
                    </defs>
                    {move || edges().into_iter().map(|(id, source, target, label)| {
                        let (x1, y1) = (source.x + NODE_WIDTH, source.y + NODE_HEIGHT / 2.0);
                        let (x2, y2) = (target.x, target.y + NODE_HEIGHT / 2.0);
                        let edge_id = StoredValue::new(id);
                        let is_selected = move || selected_edge.get() == Some(edge_id.get_value());
                        view! {
                            <g
                                class=move || if is_selected() { "edge selected" } else { "edge" }
                                on:mousedown=move |ev: MouseEvent| {
                                    ev.stop_propagation();
                                    ctx.dispatch_workflow(WorkflowCommand::Select(None));
                                    selected_edge.set(Some(edge_id.get_value()));
                                }
                            >
                                <line class="edge-hit" x1=x1 y1=y1 x2=x2 y2=y2 />
                                <line class="edge-line" x1=x1 y1=y1 x2=x2 y2=y2 marker-end="url(#arrow)" />
                                {label.map(|l| view! {
                                    <text class="edge-label" x=(x1 + x2) / 2.0 y=(y1 + y2) / 2.0 - 6.0>{l}</text>
                                })}
                            </g>
                        }
                    }).collect_view()}
                    {rubber_band}
                </svg>

                <For
                    each=nodes
                    key=|n| (n.id.clone(), n.updated_at)
                    children=move |node| {
                        let id = StoredValue::new(node.id.clone());
                        let kind = node.kind();
                        let summary = node_summary(&node);
                        let node_style = {
                            let node = node.clone();
                            move || {
                                let p = position_of(&node);
                                format!("left: {}px; top: {}px; width: {}px;", p.x, p.y, NODE_WIDTH)
                            }
                        };
                        let node_class = move || {
                            let mut c = format!("workflow-node node-{}", kind.as_str());
                            if selected_node.get().as_deref() == Some(id.get_value().as_str()) { c.push_str(" selected"); }
                            if matches!(gesture.get(), Gesture::Connect { .. }) { c.push_str(" connectable"); }
                            c
                        };
                        let origin = node.position;

                        view! {
                            <div
                                class=node_class
                                style=node_style
                                on:mousedown=move |ev: MouseEvent| {
                                    if ev.button() != 0 { return; }
                                    ev.stop_propagation();
                                    gesture.set(Gesture::MoveNode {
                                        id: id.get_value(),
                                        start: (ev.client_x(), ev.client_y()),
                                        origin,
                                        moved: false,
                                    });
                                }
                                on:mouseup=move |_| {
                                    if let Gesture::Connect { source } = gesture.get_untracked() {
                                        ctx.dispatch_workflow(WorkflowCommand::Connect {
                                            source,
                                            target: id.get_value(),
                                            data: None,
                                        });
                                    }
                                }
                            >
                                <span class="node-input-handle" />
                                <div class="node-header">
                                    <span class="node-icon">{node_icon(kind)}</span>
                                    <span class="node-label">{node.payload.label().to_string()}</span>
                                </div>
                                {node.payload.description().map(|d| view! { <div class="node-description">{d.to_string()}</div> })}
                                {summary.map(|s| view! { <div class="node-summary">{s}</div> })}
                                <span
                                    class="node-output-handle"
                                    title="Drag to connect"
                                    on:mousedown=move |ev: MouseEvent| {
                                        ev.stop_propagation();
                                        cursor.set(CanvasPoint::new(origin.x + NODE_WIDTH, origin.y + NODE_HEIGHT / 2.0));
                                        gesture.set(Gesture::Connect { source: id.get_value() });
                                    }
                                />
                            </div>
                        }
                    }
                />
            </div>

            <div class="canvas-controls" on:mousedown=|ev: MouseEvent| ev.stop_propagation()>
                <button title="Zoom in" on:click=move |_| zoom_by(1.2)>"+"</button>
                <button title="Zoom out" on:click=move |_| zoom_by(1.0 / 1.2)>"−"</button>
                <button title="Reset view" on:click=move |_| viewport.set(Viewport::default())>"⟲"</button>
                <span class="zoom-level">{move || format!("{:.0}%", viewport.get().zoom * 100.0)}</span>
            </div>
        </div>
    }
}

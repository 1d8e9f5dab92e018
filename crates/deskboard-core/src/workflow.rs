//! Workflow Builder Applet
//!
//! A workflow is the graph plus its metadata. It lives in memory until the
//! first explicit save assigns it an id; after that every change is written back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::command::Applet;
use crate::config::SuiteConfig;
use crate::domain::{CanvasPoint, EdgeData, NodePatch, NodeTemplate, WorkflowEdge, WorkflowNode, WorkflowStatus};
use crate::error::DomainResult;
use crate::graph::WorkflowGraph;
use crate::repository::{self, KeyValueStore};

pub const UNTITLED: &str = "Untitled Workflow";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WorkflowWire", into = "WorkflowWire")]
pub struct Workflow {
    /// Assigned on first save
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub status: WorkflowStatus,
    pub graph: WorkflowGraph,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Workflow {
    fn default() -> Self {
        Self {
            id: None,
            name: UNTITLED.to_string(),
            description: String::new(),
            status: WorkflowStatus::Draft,
            graph: WorkflowGraph::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Workflow {
    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Give the workflow its id (`workflow-<millis>`) if it has none yet, and stamp it
    pub fn prepare_save(&mut self, now: DateTime<Utc>) -> &str {
        if self.name.trim().is_empty() {
            self.name = UNTITLED.to_string();
        }
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
        self.id
            .get_or_insert_with(|| format!("workflow-{}", now.timestamp_millis()))
    }
}

#[doc(hidden)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowWire {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    nodes: Vec<WorkflowNode>,
    #[serde(default)]
    edges: Vec<WorkflowEdge>,
    #[serde(default, with = "crate::repository::dates")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::repository::dates")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    status: WorkflowStatus,
}

impl From<WorkflowWire> for Workflow {
    fn from(wire: WorkflowWire) -> Self {
        Workflow {
            id: wire.id,
            name: if wire.name.is_empty() {
                UNTITLED.to_string()
            } else {
                wire.name
            },
            description: wire.description,
            status: wire.status,
            graph: WorkflowGraph::from_parts(wire.nodes, wire.edges),
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        }
    }
}

impl From<Workflow> for WorkflowWire {
    fn from(workflow: Workflow) -> Self {
        WorkflowWire {
            id: workflow.id,
            name: workflow.name,
            description: workflow.description,
            nodes: workflow.graph.nodes.to_vec(),
            edges: workflow.graph.edges,
            created_at: workflow.created_at,
            updated_at: workflow.updated_at,
            status: workflow.status,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowCommand {
    AddNode { template: NodeTemplate, position: CanvasPoint },
    Connect { source: String, target: String, data: Option<EdgeData> },
    UpdateNode { id: String, patch: NodePatch },
    MoveNode { id: String, position: CanvasPoint },
    RemoveNode(String),
    RemoveEdge(String),
    UpdateEdge { id: String, data: Option<EdgeData> },
    /// Selection is view state; it never triggers a write
    Select(Option<String>),
    SetMeta { name: String, description: String, status: WorkflowStatus },
    /// Assign an id if needed and write the workflow
    Save,
    /// Discard the graph and start an untitled workflow
    New,
    /// Swap in a workflow loaded from storage
    Replace(Workflow),
}

impl Applet for Workflow {
    type Command = WorkflowCommand;

    /// A fresh untitled workflow; saved ones are opened explicitly
    fn load<S: KeyValueStore>(_store: &S, _config: &SuiteConfig) -> Self {
        Workflow::default()
    }

    fn save<S: KeyValueStore>(&self, store: &mut S, config: &SuiteConfig) -> DomainResult<()> {
        repository::save_workflow(store, config, self)
    }

    fn apply(&mut self, command: WorkflowCommand, now: DateTime<Utc>) -> bool {
        let changed = match command {
            WorkflowCommand::AddNode { template, position } => {
                self.graph.add_node(&template, position, now);
                true
            }
            WorkflowCommand::Connect { source, target, data } => {
                self.graph.connect(&source, &target, data, now);
                true
            }
            WorkflowCommand::UpdateNode { id, patch } => self.graph.update_node_payload(&id, patch, now),
            WorkflowCommand::MoveNode { id, position } => self.graph.move_node(&id, position, now),
            WorkflowCommand::RemoveNode(id) => self.graph.remove_node(&id),
            WorkflowCommand::RemoveEdge(id) => self.graph.remove_edge(&id),
            WorkflowCommand::UpdateEdge { id, data } => self.graph.update_edge_data(&id, data),
            WorkflowCommand::Select(id) => {
                self.graph.select_node(id.as_deref());
                return false;
            }
            WorkflowCommand::SetMeta { name, description, status } => {
                self.name = name;
                self.description = description;
                self.status = status;
                true
            }
            WorkflowCommand::Save => {
                let id = self.prepare_save(now).to_string();
                log::info!("[WORKFLOW] Saving {} ({} nodes)", id, self.graph.nodes.len());
                return true;
            }
            WorkflowCommand::New => {
                *self = Workflow::default();
                return true;
            }
            WorkflowCommand::Replace(workflow) => {
                *self = workflow;
                return true;
            }
        };
        if changed && self.is_saved() {
            self.updated_at = Some(now);
        }
        changed
    }

    fn autosave(&self) -> bool {
        self.is_saved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Session;
    use crate::domain::{template_for, NodeKind};
    use crate::repository::MemoryStore;
    use pretty_assertions::assert_eq;

    fn add(kind: NodeKind) -> WorkflowCommand {
        WorkflowCommand::AddNode {
            template: template_for(kind).unwrap(),
            position: CanvasPoint::new(40.0, 80.0),
        }
    }

    #[test]
    fn test_unsaved_workflow_is_not_written() {
        let mut session: Session<Workflow, _> = Session::open(MemoryStore::new(), SuiteConfig::default());
        assert!(session.dispatch(add(NodeKind::Start)));
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_save_assigns_id_then_autosaves() {
        let config = SuiteConfig::default();
        let mut session: Session<Workflow, _> = Session::open(MemoryStore::new(), config.clone());
        session.dispatch(add(NodeKind::Start));

        let now = Utc::now();
        session.dispatch_at(WorkflowCommand::Save, now);
        let id = session.state().id.clone().unwrap();
        assert_eq!(id, format!("workflow-{}", now.timestamp_millis()));
        assert!(session.store().get(&config.workflow_key(&id)).unwrap().is_some());

        session.dispatch(add(NodeKind::End));
        let stored = repository::load_workflow(session.store(), &config, &id).unwrap();
        assert_eq!(stored.graph.nodes.len(), 2);

        // saving again keeps the id and creation time
        let created = session.state().created_at;
        session.dispatch(WorkflowCommand::Save);
        assert_eq!(session.state().id.as_deref(), Some(id.as_str()));
        assert_eq!(session.state().created_at, created);
    }

    #[test]
    fn test_new_resets() {
        let mut workflow = Workflow::default();
        let now = Utc::now();
        workflow.apply(add(NodeKind::Form), now);
        workflow.apply(WorkflowCommand::Save, now);
        workflow.apply(WorkflowCommand::New, now);
        assert_eq!(workflow, Workflow::default());
    }

    #[test]
    fn test_select_does_not_count_as_change() {
        let mut workflow = Workflow::default();
        let now = Utc::now();
        workflow.apply(add(NodeKind::Form), now);
        let id = workflow.graph.nodes.ids().next().unwrap().to_string();
        assert!(!workflow.apply(WorkflowCommand::Select(Some(id.clone())), now));
        assert_eq!(workflow.graph.selected.as_deref(), Some(id.as_str()));
    }

    #[test]
    fn test_wire_shape() {
        let mut workflow = Workflow::default();
        let now = Utc::now();
        workflow.apply(add(NodeKind::Start), now);
        workflow.apply(add(NodeKind::End), now);
        let ids: Vec<String> = workflow.graph.nodes.ids().map(str::to_string).collect();
        workflow.apply(
            WorkflowCommand::Connect {
                source: ids[0].clone(),
                target: ids[1].clone(),
                data: Some(EdgeData {
                    condition: None,
                    label: Some("go".into()),
                }),
            },
            now,
        );
        workflow.prepare_save(now);

        let json = serde_json::to_value(&workflow).unwrap();
        assert_eq!(json["name"], UNTITLED);
        assert_eq!(json["status"], "draft");
        assert!(json["nodes"].is_array());
        assert_eq!(json["nodes"][0]["type"], "start");
        assert_eq!(json["edges"][0]["data"]["label"], "go");
        assert!(json["createdAt"].is_string());
    }
}

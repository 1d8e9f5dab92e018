//! Graph Model
//!
//! Workflow nodes and directed edges. Cycles and self-loops are allowed;
//! removing a node removes every edge that touches it.

use chrono::{DateTime, Utc};

use crate::domain::{CanvasPoint, EdgeData, NodeKind, NodePatch, NodeTemplate, WorkflowEdge, WorkflowNode};
use crate::error::ValidationError;
use crate::registry::{fresh_id, Registry};

/// DataTransfer key carrying a dragged node template
pub const NODE_TEMPLATE_MIME: &str = "application/reactflow";

/// Serialize a template for the palette's drag-start
pub fn encode_template(template: &NodeTemplate) -> Result<String, serde_json::Error> {
    serde_json::to_string(template)
}

/// Parse a dropped template; anything unreadable is ignored
pub fn decode_template(raw: &str) -> Option<NodeTemplate> {
    if raw.is_empty() {
        return None;
    }
    match serde_json::from_str(raw) {
        Ok(template) => Some(template),
        Err(e) => {
            log::warn!("[WORKFLOW] Ignoring drop with unreadable template: {}", e);
            None
        }
    }
}

/// Counts shown in the canvas toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeStats {
    pub total: usize,
    pub start: usize,
    pub end: usize,
    pub form: usize,
    pub approval: usize,
    pub condition: usize,
    pub action: usize,
    pub edges: usize,
}

/// What a successful run validation reports back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub nodes: usize,
    pub edges: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowGraph {
    pub nodes: Registry<WorkflowNode>,
    pub edges: Vec<WorkflowEdge>,
    /// UI state only, never persisted
    pub selected: Option<String>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored node and edge lists
    pub fn from_parts(nodes: Vec<WorkflowNode>, edges: Vec<WorkflowEdge>) -> Self {
        Self {
            nodes: Registry::from_items(nodes),
            edges,
            selected: None,
        }
    }

    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.get(id)
    }

    pub fn selected_node(&self) -> Option<&WorkflowNode> {
        self.selected.as_deref().and_then(|id| self.nodes.get(id))
    }

    /// Place a copy of the template's payload at `position`, id `<type>-<millis>`
    pub fn add_node(&mut self, template: &NodeTemplate, position: CanvasPoint, now: DateTime<Utc>) -> &WorkflowNode {
        let id = self.nodes.fresh_id(template.kind().as_str(), now);
        log::debug!("[WORKFLOW] Adding node {} at ({}, {})", id, position.x, position.y);
        let node = WorkflowNode {
            id,
            position,
            payload: template.default_payload.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.nodes.upsert_at(node, now)
    }

    /// Add a directed edge; endpoints are not checked
    pub fn connect(&mut self, source: &str, target: &str, data: Option<EdgeData>, now: DateTime<Utc>) -> &WorkflowEdge {
        let id = fresh_id("edge", now, |id| self.edges.iter().any(|e| e.id == id));
        log::debug!("[WORKFLOW] Connecting {} -> {} as {}", source, target, id);
        self.edges.push(WorkflowEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            data,
        });
        &self.edges[self.edges.len() - 1]
    }

    /// Merge `patch` into the node's payload; `false` for an unknown id
    pub fn update_node_payload(&mut self, id: &str, patch: NodePatch, now: DateTime<Utc>) -> bool {
        self.nodes.update_with(id, now, |node| node.payload.merge(patch))
    }

    /// Canvas drag end
    pub fn move_node(&mut self, id: &str, position: CanvasPoint, now: DateTime<Utc>) -> bool {
        self.nodes.update_with(id, now, |node| node.position = position)
    }

    /// Select a node, or clear with `None`. Unknown ids clear the selection.
    pub fn select_node(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.nodes.contains(id)).map(str::to_string);
    }

    /// Remove a node and every edge touching it
    pub fn remove_node(&mut self, id: &str) -> bool {
        if !self.nodes.remove(id) {
            return false;
        }
        let before = self.edges.len();
        self.edges.retain(|e| e.source != id && e.target != id);
        log::debug!("[WORKFLOW] Removed node {} and {} edge(s)", id, before - self.edges.len());
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        true
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        self.edges.len() != before
    }

    pub fn update_edge_data(&mut self, id: &str, data: Option<EdgeData>) -> bool {
        match self.edges.iter_mut().find(|e| e.id == id) {
            Some(edge) => {
                edge.data = data;
                true
            }
            None => false,
        }
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &WorkflowNode> {
        self.nodes.iter().filter(move |n| n.kind() == kind)
    }

    pub fn stats(&self) -> NodeStats {
        let mut stats = NodeStats {
            total: self.nodes.len(),
            edges: self.edges.len(),
            ..Default::default()
        };
        for node in self.nodes.iter() {
            match node.kind() {
                NodeKind::Start => stats.start += 1,
                NodeKind::End => stats.end += 1,
                NodeKind::Form => stats.form += 1,
                NodeKind::Approval => stats.approval += 1,
                NodeKind::Condition => stats.condition += 1,
                NodeKind::Action => stats.action += 1,
            }
        }
        stats
    }

    /// A runnable workflow has at least one start and one end node
    pub fn validate_for_run(&self) -> Result<RunSummary, ValidationError> {
        if self.nodes_of_kind(NodeKind::Start).next().is_none() {
            return Err(ValidationError::MissingStart);
        }
        if self.nodes_of_kind(NodeKind::End).next().is_none() {
            return Err(ValidationError::MissingEnd);
        }
        Ok(RunSummary {
            nodes: self.nodes.len(),
            edges: self.edges.len(),
        })
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{template_for, NodePayload};
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn add(graph: &mut WorkflowGraph, kind: NodeKind, now: DateTime<Utc>) -> String {
        let template = template_for(kind).unwrap();
        graph.add_node(&template, CanvasPoint::new(0.0, 0.0), now).id.clone()
    }

    #[test]
    fn test_start_to_end_validates() {
        let now = Utc::now();
        let mut graph = WorkflowGraph::new();
        let n1 = add(&mut graph, NodeKind::Start, now);
        let n2 = add(&mut graph, NodeKind::End, now + Duration::milliseconds(1));
        graph.connect(&n1, &n2, None, now);

        assert_eq!(graph.validate_for_run(), Ok(RunSummary { nodes: 2, edges: 1 }));
    }

    #[test]
    fn test_validation_errors() {
        let now = Utc::now();
        let mut graph = WorkflowGraph::new();
        assert_eq!(graph.validate_for_run(), Err(ValidationError::MissingStart));
        add(&mut graph, NodeKind::Start, now);
        assert_eq!(graph.validate_for_run(), Err(ValidationError::MissingEnd));
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let now = Utc::now();
        let mut graph = WorkflowGraph::new();
        let a = add(&mut graph, NodeKind::Form, now);
        let b = add(&mut graph, NodeKind::Form, now);
        assert_ne!(a, b);
        assert!(a.starts_with("form-"));

        let e1 = graph.connect(&a, &b, None, now).id.clone();
        let e2 = graph.connect(&b, &a, None, now).id.clone();
        assert_ne!(e1, e2);
        assert!(e1.starts_with("edge-"));
    }

    #[test]
    fn test_payload_merge_and_missing_id() {
        let now = Utc::now();
        let mut graph = WorkflowGraph::new();
        let id = add(&mut graph, NodeKind::Condition, now);
        assert!(graph.update_node_payload(
            &id,
            NodePatch {
                condition: Some(Some("amount > 100".into())),
                ..Default::default()
            },
            now
        ));
        match &graph.node(&id).unwrap().payload {
            NodePayload::Condition(d) => {
                assert_eq!(d.label, "Condition");
                assert_eq!(d.condition.as_deref(), Some("amount > 100"));
            }
            other => panic!("unexpected payload {:?}", other),
        }
        assert!(!graph.update_node_payload("nope", NodePatch::default(), now));
    }

    #[test]
    fn test_remove_node_cascades() {
        let now = Utc::now();
        let mut graph = WorkflowGraph::new();
        let a = add(&mut graph, NodeKind::Start, now);
        let b = add(&mut graph, NodeKind::Action, now);
        let c = add(&mut graph, NodeKind::End, now);
        graph.connect(&a, &b, None, now);
        graph.connect(&b, &c, None, now);
        graph.connect(&a, &c, None, now);
        graph.select_node(Some(b.as_str()));

        assert!(graph.remove_node(&b));
        assert_eq!(graph.edges.len(), 1);
        assert_eq!(graph.edges[0].source, a);
        assert!(graph.selected.is_none());
        assert!(!graph.remove_node(&b));
    }

    #[test]
    fn test_select_unknown_clears() {
        let now = Utc::now();
        let mut graph = WorkflowGraph::new();
        let a = add(&mut graph, NodeKind::Start, now);
        graph.select_node(Some(a.as_str()));
        assert_eq!(graph.selected_node().map(|n| n.id.as_str()), Some(a.as_str()));
        graph.select_node(Some("ghost"));
        assert!(graph.selected.is_none());
    }

    #[test]
    fn test_self_loop_allowed() {
        let now = Utc::now();
        let mut graph = WorkflowGraph::new();
        let a = add(&mut graph, NodeKind::Approval, now);
        let edge = graph.connect(&a, &a, Some(EdgeData { condition: None, label: Some("retry".into()) }), now);
        assert_eq!(edge.source, edge.target);
    }

    #[test]
    fn test_stats() {
        let now = Utc::now();
        let mut graph = WorkflowGraph::new();
        add(&mut graph, NodeKind::Start, now);
        add(&mut graph, NodeKind::Form, now);
        add(&mut graph, NodeKind::Form, now);
        let stats = graph.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.form, 2);
        assert_eq!(stats.end, 0);
    }

    #[test]
    fn test_template_drag_payload() {
        let template = template_for(NodeKind::Approval).unwrap();
        let raw = encode_template(&template).unwrap();
        assert_eq!(decode_template(&raw), Some(template));
        assert_eq!(decode_template(""), None);
        assert_eq!(decode_template("{not json"), None);
        assert_eq!(decode_template(r#"{"type":"teleport","label":"x"}"#), None);
    }
}

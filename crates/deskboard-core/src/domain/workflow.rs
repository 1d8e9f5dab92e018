//! Workflow Entities
//!
//! Nodes carry a typed payload (tagged union keyed by node type). On the wire
//! a node is `{ id, type, position, data }`, the shape the canvas library and
//! saved workflows use.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::impl_entity;

/// Canvas-space coordinate (already projected through pan/zoom)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint {
    pub x: f64,
    pub y: f64,
}

impl CanvasPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    End,
    Form,
    Approval,
    Condition,
    Action,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Start,
        NodeKind::Form,
        NodeKind::Approval,
        NodeKind::Condition,
        NodeKind::Action,
        NodeKind::End,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Form => "form",
            NodeKind::Approval => "approval",
            NodeKind::Condition => "condition",
            NodeKind::Action => "action",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Number,
    Select,
    Textarea,
    Date,
}

impl FieldType {
    pub const ALL: [FieldType; 6] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Number,
        FieldType::Select,
        FieldType::Textarea,
        FieldType::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::Textarea => "textarea",
            FieldType::Date => "date",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// One input of a form node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub form_fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub approvers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expression evaluated by the runner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form action settings: an action name, or an object naming it under `action`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl ActionData {
    /// Name of the automated action to perform
    pub fn action(&self) -> Option<&str> {
        match self.config.as_ref()? {
            serde_json::Value::String(name) => Some(name),
            serde_json::Value::Object(map) => map.get("action").and_then(serde_json::Value::as_str),
            _ => None,
        }
    }

    /// Set or clear the action name; other keys of an object config are untouched
    pub fn set_action(&mut self, action: Option<String>) {
        match (&mut self.config, action) {
            (Some(serde_json::Value::Object(map)), Some(name)) => {
                map.insert("action".to_string(), serde_json::Value::String(name));
            }
            (Some(serde_json::Value::Object(map)), None) => {
                map.remove("action");
            }
            (config, name) => *config = name.map(serde_json::Value::String),
        }
    }
}

/// Node payload, one shape per node type
#[derive(Debug, Clone, PartialEq)]
pub enum NodePayload {
    Start(StepData),
    End(StepData),
    Form(FormData),
    Approval(ApprovalData),
    Condition(ConditionData),
    Action(ActionData),
}

impl NodePayload {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Start(_) => NodeKind::Start,
            NodePayload::End(_) => NodeKind::End,
            NodePayload::Form(_) => NodeKind::Form,
            NodePayload::Approval(_) => NodeKind::Approval,
            NodePayload::Condition(_) => NodeKind::Condition,
            NodePayload::Action(_) => NodeKind::Action,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NodePayload::Start(d) | NodePayload::End(d) => &d.label,
            NodePayload::Form(d) => &d.label,
            NodePayload::Approval(d) => &d.label,
            NodePayload::Condition(d) => &d.label,
            NodePayload::Action(d) => &d.label,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            NodePayload::Start(d) | NodePayload::End(d) => d.description.as_deref(),
            NodePayload::Form(d) => d.description.as_deref(),
            NodePayload::Approval(d) => d.description.as_deref(),
            NodePayload::Condition(d) => d.description.as_deref(),
            NodePayload::Action(d) => d.description.as_deref(),
        }
    }

    /// Merge the fields present in `patch`; fields foreign to this node type are ignored
    pub fn merge(&mut self, patch: NodePatch) {
        let (label, description) = match self {
            NodePayload::Start(d) | NodePayload::End(d) => (&mut d.label, &mut d.description),
            NodePayload::Form(d) => (&mut d.label, &mut d.description),
            NodePayload::Approval(d) => (&mut d.label, &mut d.description),
            NodePayload::Condition(d) => (&mut d.label, &mut d.description),
            NodePayload::Action(d) => (&mut d.label, &mut d.description),
        };
        if let Some(new_label) = patch.label {
            *label = new_label;
        }
        if let Some(new_description) = patch.description {
            *description = new_description;
        }

        match self {
            NodePayload::Form(d) => {
                if let Some(fields) = patch.form_fields {
                    d.form_fields = fields;
                }
            }
            NodePayload::Approval(d) => {
                if let Some(approvers) = patch.approvers {
                    d.approvers = approvers;
                }
            }
            NodePayload::Condition(d) => {
                if let Some(condition) = patch.condition {
                    d.condition = condition;
                }
            }
            NodePayload::Action(d) => {
                if let Some(action) = patch.action {
                    d.set_action(action);
                }
            }
            NodePayload::Start(_) | NodePayload::End(_) => {}
        }
    }

    /// Split into the wire pair (`type`, `data`)
    pub fn to_parts(&self) -> Result<(NodeKind, serde_json::Value), serde_json::Error> {
        let data = match self {
            NodePayload::Start(d) | NodePayload::End(d) => serde_json::to_value(d),
            NodePayload::Form(d) => serde_json::to_value(d),
            NodePayload::Approval(d) => serde_json::to_value(d),
            NodePayload::Condition(d) => serde_json::to_value(d),
            NodePayload::Action(d) => serde_json::to_value(d),
        }?;
        Ok((self.kind(), data))
    }

    /// Rebuild from the wire pair; a null `data` gets an empty payload
    pub fn from_parts(kind: NodeKind, data: serde_json::Value) -> Result<Self, serde_json::Error> {
        let data = if data.is_null() {
            serde_json::json!({ "label": "" })
        } else {
            data
        };
        Ok(match kind {
            NodeKind::Start => NodePayload::Start(serde_json::from_value(data)?),
            NodeKind::End => NodePayload::End(serde_json::from_value(data)?),
            NodeKind::Form => NodePayload::Form(serde_json::from_value(data)?),
            NodeKind::Approval => NodePayload::Approval(serde_json::from_value(data)?),
            NodeKind::Condition => NodePayload::Condition(serde_json::from_value(data)?),
            NodeKind::Action => NodePayload::Action(serde_json::from_value(data)?),
        })
    }
}

/// Partial payload edit from the node editor. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub description: Option<Option<String>>,
    pub form_fields: Option<Vec<FormField>>,
    pub approvers: Option<Vec<String>>,
    pub condition: Option<Option<String>>,
    pub action: Option<Option<String>>,
}

/// A node on the workflow canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NodeWire", into = "NodeWire")]
pub struct WorkflowNode {
    pub id: String,
    pub position: CanvasPoint,
    pub payload: NodePayload,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkflowNode {
    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }
}

impl_entity!(WorkflowNode);

#[doc(hidden)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeWire {
    id: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default)]
    position: CanvasPoint,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default, with = "crate::repository::dates", skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::repository::dates", skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<NodeWire> for WorkflowNode {
    type Error = serde_json::Error;

    fn try_from(wire: NodeWire) -> Result<Self, Self::Error> {
        Ok(WorkflowNode {
            id: wire.id,
            position: wire.position,
            payload: NodePayload::from_parts(wire.kind, wire.data)?,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
        })
    }
}

impl From<WorkflowNode> for NodeWire {
    fn from(node: WorkflowNode) -> Self {
        let kind = node.kind();
        let data = node.payload.to_parts().map(|(_, data)| data).unwrap_or_default();
        NodeWire {
            id: node.id,
            kind,
            position: node.position,
            data,
            created_at: node.created_at,
            updated_at: node.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EdgeData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Active,
    Inactive,
}

impl WorkflowStatus {
    pub const ALL: [WorkflowStatus; 3] = [WorkflowStatus::Draft, WorkflowStatus::Active, WorkflowStatus::Inactive];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "draft",
            WorkflowStatus::Active => "active",
            WorkflowStatus::Inactive => "inactive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Node library entry: dragged from the palette onto the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TemplateWire", into = "TemplateWire")]
pub struct NodeTemplate {
    pub label: String,
    pub description: String,
    pub default_payload: NodePayload,
}

impl NodeTemplate {
    pub fn kind(&self) -> NodeKind {
        self.default_payload.kind()
    }
}

#[doc(hidden)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateWire {
    #[serde(rename = "type")]
    kind: NodeKind,
    label: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    default_data: serde_json::Value,
}

impl TryFrom<TemplateWire> for NodeTemplate {
    type Error = serde_json::Error;

    fn try_from(wire: TemplateWire) -> Result<Self, Self::Error> {
        Ok(NodeTemplate {
            label: wire.label,
            description: wire.description,
            default_payload: NodePayload::from_parts(wire.kind, wire.default_data)?,
        })
    }
}

impl From<NodeTemplate> for TemplateWire {
    fn from(template: NodeTemplate) -> Self {
        let kind = template.kind();
        let default_data = template
            .default_payload
            .to_parts()
            .map(|(_, data)| data)
            .unwrap_or_default();
        TemplateWire {
            kind,
            label: template.label,
            description: template.description,
            default_data,
        }
    }
}

fn step(label: &str, description: &str) -> StepData {
    StepData {
        label: label.to_string(),
        description: Some(description.to_string()),
    }
}

/// The node library, in palette order
pub fn node_templates() -> Vec<NodeTemplate> {
    let template = |label: &str, description: &str, payload| NodeTemplate {
        label: label.to_string(),
        description: description.to_string(),
        default_payload: payload,
    };
    vec![
        template("Start", "Workflow starting point", NodePayload::Start(step("Start", "Workflow begins here"))),
        template(
            "Form",
            "User input form",
            NodePayload::Form(FormData {
                label: "Form".to_string(),
                description: Some("Collect user input".to_string()),
                form_fields: Vec::new(),
            }),
        ),
        template(
            "Approval",
            "Approval step",
            NodePayload::Approval(ApprovalData {
                label: "Approval".to_string(),
                description: Some("Requires approval".to_string()),
                approvers: Vec::new(),
            }),
        ),
        template(
            "Condition",
            "Conditional branching",
            NodePayload::Condition(ConditionData {
                label: "Condition".to_string(),
                description: Some("Branch based on condition".to_string()),
                condition: None,
            }),
        ),
        template(
            "Action",
            "Automated action",
            NodePayload::Action(ActionData {
                label: "Action".to_string(),
                description: Some("Perform automated task".to_string()),
                config: None,
            }),
        ),
        template("End", "Workflow endpoint", NodePayload::End(step("End", "Workflow ends here"))),
    ]
}

/// Library template for a node type
pub fn template_for(kind: NodeKind) -> Option<NodeTemplate> {
    node_templates().into_iter().find(|t| t.kind() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_node_wire_shape() {
        let node = WorkflowNode {
            id: "form-1".into(),
            position: CanvasPoint::new(10.0, 20.5),
            payload: template_for(NodeKind::Form).unwrap().default_payload,
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "form");
        assert_eq!(json["data"]["label"], "Form");
        assert_eq!(json["data"]["formFields"], serde_json::json!([]));
        assert_eq!(json["position"]["y"], 20.5);
        assert!(json.get("createdAt").is_none());

        let back: WorkflowNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_merge_keeps_other_fields() {
        let mut payload = NodePayload::Approval(ApprovalData {
            label: "Approval".into(),
            description: Some("Requires approval".into()),
            approvers: vec!["jane".into()],
        });
        payload.merge(NodePatch {
            label: Some("Manager sign-off".into()),
            condition: Some(Some("ignored".into())),
            ..Default::default()
        });
        match payload {
            NodePayload::Approval(d) => {
                assert_eq!(d.label, "Manager sign-off");
                assert_eq!(d.description.as_deref(), Some("Requires approval"));
                assert_eq!(d.approvers, vec!["jane".to_string()]);
            }
            other => panic!("unexpected payload {:?}", other),
        }
    }

    #[test]
    fn test_template_json() {
        let template = template_for(NodeKind::Approval).unwrap();
        let json = serde_json::to_string(&template).unwrap();
        assert!(json.contains(r#""type":"approval""#));
        assert!(json.contains(r#""defaultData""#));
        let back: NodeTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
    }

    #[test]
    fn test_field_type_names_match_wire() {
        for field_type in FieldType::ALL {
            let json = serde_json::to_value(field_type).unwrap();
            assert_eq!(json, field_type.as_str());
            assert_eq!(FieldType::from_str(field_type.as_str()), Some(field_type));
        }
    }

    #[test]
    fn test_action_config_survives_round_trip() {
        let data = serde_json::json!({
            "label": "Notify",
            "config": { "action": "send_email", "to": "ops@example.com" }
        });
        let mut payload = NodePayload::from_parts(NodeKind::Action, data.clone()).unwrap();
        match &payload {
            NodePayload::Action(d) => assert_eq!(d.action(), Some("send_email")),
            other => panic!("unexpected payload {:?}", other),
        }
        assert_eq!(payload.to_parts().unwrap(), (NodeKind::Action, data));

        payload.merge(NodePatch {
            action: Some(Some("send_sms".into())),
            ..Default::default()
        });
        let (_, written) = payload.to_parts().unwrap();
        assert_eq!(
            written["config"],
            serde_json::json!({ "action": "send_sms", "to": "ops@example.com" })
        );
    }

    #[test]
    fn test_action_name_config() {
        let mut data = ActionData::default();
        assert_eq!(data.action(), None);
        data.set_action(Some("archive".into()));
        assert_eq!(data.config, Some(serde_json::json!("archive")));
        assert_eq!(data.action(), Some("archive"));
        data.set_action(None);
        assert_eq!(data.config, None);
    }

    #[test]
    fn test_status_names_match_wire() {
        for status in WorkflowStatus::ALL {
            assert_eq!(serde_json::to_value(status).unwrap(), status.as_str());
        }
        assert_eq!(WorkflowStatus::from_str("active"), Some(WorkflowStatus::Active));
        assert_eq!(WorkflowStatus::from_str("archived"), None);
    }

    #[test]
    fn test_library_order() {
        let kinds: Vec<_> = node_templates().iter().map(|t| t.kind()).collect();
        assert_eq!(kinds, NodeKind::ALL.to_vec());
    }
}

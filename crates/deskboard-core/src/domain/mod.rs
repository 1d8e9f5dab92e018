//! Domain Layer
//!
//! Entities and payload types for the three applets.
//! No storage or UI concerns live here (serde derives only).

mod entity;
mod task;
mod board;
mod widget;
mod workflow;

pub use entity::{now, Entity};
pub use task::{Attachment, Comment, Priority, SubTask, Task, TaskPatch, TaskStatus, TaskType, User};
pub use board::{default_columns, sample_users, Board, Column};
pub use widget::{
    CalculatorConfig, CalendarConfig, ChartConfig, ClockConfig, GridCell, GridSize, NewsConfig,
    NotesConfig, TodoConfig, WeatherConfig, Widget, WidgetConfig, WidgetKind,
};
pub use workflow::{
    node_templates, template_for, ActionData, ApprovalData, CanvasPoint, ConditionData, EdgeData,
    FieldType, FormData, FormField, NodeKind, NodePatch, NodePayload, NodeTemplate, StepData,
    WorkflowEdge, WorkflowNode, WorkflowStatus,
};

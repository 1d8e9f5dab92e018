//! Edit Target Type
//!
//! Represents the target being edited in the properties panel.

/// What the properties panel is editing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditTarget {
    /// New task to be appended to a column (column id)
    NewTask(String),
    /// Existing task (task id)
    Task(String),
    /// Widget settings (widget id)
    Widget(String),
}

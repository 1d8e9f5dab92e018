//! UI Components
//!
//! Leptos components for the three applets and the shared shell.

mod app_tab_bar;
mod delete_confirm_button;
mod editor_target;
mod properties_panel;

// Backlog board
mod board_view;
mod board_column;
mod board_filter_bar;
mod task_card;
mod task_editor;

// Widget dashboard
mod widget_dashboard;
mod widget_palette;
mod widget_grid;
mod widget_card;
mod widget_settings;

// Workflow builder
mod workflow_builder;
mod workflow_toolbar;
mod workflow_canvas;
mod node_library;
mod node_editor;

pub use app_tab_bar::AppTabBar;
pub use delete_confirm_button::DeleteConfirmButton;
pub use editor_target::EditTarget;
pub use properties_panel::PropertiesPanel;
pub use board_view::BoardView;
pub use board_column::BoardColumn;
pub use board_filter_bar::BoardFilterBar;
pub use task_card::TaskCard;
pub use task_editor::TaskEditor;
pub use widget_dashboard::WidgetDashboard;
pub use widget_palette::WidgetPalette;
pub use widget_grid::WidgetGrid;
pub use widget_card::WidgetCard;
pub use widget_settings::WidgetSettings;
pub use workflow_builder::WorkflowBuilder;
pub use node_library::NodeLibrary;

//! Widget Dashboard Applet
//!
//! Widgets are kept in display order. New widgets go to the first free grid
//! cell; drags either reorder the grid or drop a palette entry onto it.

use chrono::{DateTime, Utc};

use crate::command::Applet;
use crate::config::{GridConfig, SuiteConfig};
use crate::domain::{GridCell, Widget, WidgetConfig, WidgetKind};
use crate::error::DomainResult;
use crate::placement::{clamp_size, first_free_cell, is_free, Rect};
use crate::registry::Registry;
use crate::reorder::DragResult;
use crate::repository::{self, KeyValueStore};

/// Drag container id of the widget palette
pub const PALETTE_ID: &str = "widget-sidebar";
/// Drag container id of the grid
pub const GRID_ID: &str = "widget-grid";

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardCommand {
    AddWidget(WidgetKind),
    /// Config dialog result: new title and/or settings of the same type
    UpdateWidget {
        id: String,
        title: Option<String>,
        config: Option<WidgetConfig>,
    },
    DeleteWidget(String),
    /// Palette-to-grid or grid-to-grid gesture
    Drop(DragResult),
    Reorder { from: usize, to: usize },
    /// Place a widget at a chosen cell, only if that area is free
    MoveWidget { id: String, position: GridCell },
    /// Loaded or imported layout
    ReplaceAll(Vec<Widget>),
    Clear,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    pub widgets: Registry<Widget>,
    pub grid: GridConfig,
}

impl Dashboard {
    pub fn new(grid: GridConfig) -> Self {
        Self {
            widgets: Registry::new(),
            grid,
        }
    }

    pub fn with_widgets(widgets: Vec<Widget>, grid: GridConfig) -> Self {
        Self {
            widgets: Registry::from_items(widgets),
            grid,
        }
    }

    fn occupied_except(&self, skip: Option<&str>) -> Vec<Rect> {
        self.widgets
            .iter()
            .filter(|w| Some(w.id.as_str()) != skip)
            .map(|w| Rect::new(w.position, w.size))
            .collect()
    }

    /// Create a widget of `kind` in the first free cell
    pub fn add_widget(&mut self, kind: WidgetKind, now: DateTime<Utc>) -> &Widget {
        let mut widget = Widget::new(kind, now);
        widget.size = clamp_size(widget.size, self.grid);
        widget.position = first_free_cell(widget.size, &self.occupied_except(None), self.grid);
        log::debug!(
            "[GRID] Added {} at ({}, {})",
            kind.as_str(),
            widget.position.x,
            widget.position.y
        );
        self.widgets.upsert_at(widget, now)
    }

    /// Whether `id` could sit at `position` without overlapping another widget
    pub fn can_place_at(&self, id: &str, position: GridCell) -> bool {
        let Some(widget) = self.widgets.get(id) else {
            return false;
        };
        if position.x > self.grid.columns.saturating_sub(widget.size.width)
            || position.y.checked_add(widget.size.height).is_none()
        {
            return false;
        }
        let rect = Rect::new(position, widget.size);
        rect.right() <= self.grid.columns && is_free(&rect, &self.occupied_except(Some(id)))
    }

    fn handle_drop(&mut self, drag: DragResult, now: DateTime<Utc>) -> bool {
        let Some(destination) = drag.destination else {
            return false;
        };
        if destination == drag.source {
            return false;
        }
        match (drag.source.container_id.as_str(), destination.container_id.as_str()) {
            (PALETTE_ID, GRID_ID) => match WidgetKind::from_str(&drag.dragged_id) {
                Some(kind) => {
                    self.add_widget(kind, now);
                    true
                }
                None => {
                    log::warn!("[GRID] Unknown widget type dropped: {}", drag.dragged_id);
                    false
                }
            },
            (GRID_ID, GRID_ID) => {
                if self.widgets.index_of(&drag.dragged_id) != Some(drag.source.index) {
                    return false;
                }
                self.widgets.move_index(drag.source.index, destination.index)
            }
            _ => false,
        }
    }
}

impl Applet for Dashboard {
    type Command = DashboardCommand;

    fn load<S: KeyValueStore>(store: &S, config: &SuiteConfig) -> Self {
        Dashboard::with_widgets(repository::load_layout(store, config), config.grid)
    }

    fn save<S: KeyValueStore>(&self, store: &mut S, config: &SuiteConfig) -> DomainResult<()> {
        repository::save_layout(store, config, &self.widgets.to_vec(), crate::domain::now())
    }

    fn apply(&mut self, command: DashboardCommand, now: DateTime<Utc>) -> bool {
        match command {
            DashboardCommand::AddWidget(kind) => {
                self.add_widget(kind, now);
                true
            }
            DashboardCommand::UpdateWidget { id, title, config } => {
                if let Some(config) = &config {
                    let same_kind = self.widgets.get(&id).map(|w| w.kind() == config.kind());
                    if same_kind == Some(false) {
                        log::warn!("[GRID] Rejected config of another type for {}", id);
                        return false;
                    }
                }
                self.widgets.update_with(&id, now, |widget| {
                    if let Some(title) = title {
                        widget.title = title;
                    }
                    if let Some(config) = config {
                        widget.config = config;
                    }
                })
            }
            DashboardCommand::DeleteWidget(id) => self.widgets.remove(&id),
            DashboardCommand::Drop(drag) => self.handle_drop(drag, now),
            DashboardCommand::Reorder { from, to } => from != to && self.widgets.move_index(from, to),
            DashboardCommand::MoveWidget { id, position } => {
                if !self.can_place_at(&id, position) {
                    return false;
                }
                self.widgets.update_with(&id, now, |widget| widget.position = position)
            }
            DashboardCommand::ReplaceAll(widgets) => {
                self.widgets = Registry::from_items(widgets);
                true
            }
            DashboardCommand::Clear => {
                let had = !self.widgets.is_empty();
                self.widgets.clear();
                had
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockConfig, GridSize};
    use crate::reorder::DragLocation;
    use pretty_assertions::assert_eq;

    fn grid_drag(id: &str, from: (&str, usize), to: Option<(&str, usize)>) -> DashboardCommand {
        DashboardCommand::Drop(DragResult {
            dragged_id: id.to_string(),
            source: DragLocation::new(from.0, from.1),
            destination: to.map(|(c, i)| DragLocation::new(c, i)),
        })
    }

    #[test]
    fn test_second_widget_goes_beside_first() {
        let now = Utc::now();
        let mut dashboard = Dashboard::new(GridConfig::default());
        dashboard.apply(DashboardCommand::AddWidget(WidgetKind::Clock), now);
        dashboard.apply(DashboardCommand::AddWidget(WidgetKind::Notes), now);
        let positions: Vec<_> = dashboard.widgets.iter().map(|w| w.position).collect();
        assert_eq!(positions, vec![GridCell::new(0, 0), GridCell::new(2, 0)]);
    }

    #[test]
    fn test_palette_drop_creates_widget() {
        let mut dashboard = Dashboard::new(GridConfig::default());
        assert!(dashboard.apply(grid_drag("calendar", (PALETTE_ID, 2), Some((GRID_ID, 0))), Utc::now()));
        let widget = dashboard.widgets.iter().next().unwrap();
        assert_eq!(widget.kind(), WidgetKind::Calendar);
        assert_eq!(widget.size, GridSize::new(3, 3));

        assert!(!dashboard.apply(grid_drag("stocks", (PALETTE_ID, 0), Some((GRID_ID, 0))), Utc::now()));
        assert!(!dashboard.apply(grid_drag("clock", (PALETTE_ID, 0), None), Utc::now()));
        assert_eq!(dashboard.widgets.len(), 1);
    }

    #[test]
    fn test_grid_reorder() {
        let now = Utc::now();
        let mut dashboard = Dashboard::new(GridConfig::default());
        for kind in [WidgetKind::Clock, WidgetKind::Notes, WidgetKind::Chart] {
            dashboard.add_widget(kind, now);
        }
        let first = dashboard.widgets.iter().next().unwrap().id.clone();
        assert!(dashboard.apply(grid_drag(&first, (GRID_ID, 0), Some((GRID_ID, 2))), now));
        let kinds: Vec<_> = dashboard.widgets.iter().map(|w| w.kind()).collect();
        assert_eq!(kinds, vec![WidgetKind::Notes, WidgetKind::Chart, WidgetKind::Clock]);

        // stale source index
        assert!(!dashboard.apply(grid_drag(&first, (GRID_ID, 0), Some((GRID_ID, 1))), now));
    }

    #[test]
    fn test_update_rejects_foreign_config() {
        let now = Utc::now();
        let mut dashboard = Dashboard::new(GridConfig::default());
        let id = dashboard.add_widget(WidgetKind::Notes, now).id.clone();

        let clock = WidgetConfig::Clock(ClockConfig::default());
        assert!(!dashboard.apply(
            DashboardCommand::UpdateWidget {
                id: id.clone(),
                title: Some("x".into()),
                config: Some(clock)
            },
            now
        ));
        assert!(dashboard.apply(
            DashboardCommand::UpdateWidget {
                id: id.clone(),
                title: Some("Groceries".into()),
                config: None
            },
            now
        ));
        assert_eq!(dashboard.widgets.get(&id).unwrap().title, "Groceries");
    }

    #[test]
    fn test_explicit_move_respects_others() {
        let now = Utc::now();
        let mut dashboard = Dashboard::new(GridConfig::default());
        let a = dashboard.add_widget(WidgetKind::Clock, now).id.clone();
        let b = dashboard.add_widget(WidgetKind::Notes, now).id.clone();

        assert!(!dashboard.apply(
            DashboardCommand::MoveWidget {
                id: b.clone(),
                position: GridCell::new(1, 1)
            },
            now
        ));
        assert!(!dashboard.can_place_at(&a, GridCell::new(11, 0)));
        assert!(dashboard.apply(
            DashboardCommand::MoveWidget {
                id: b.clone(),
                position: GridCell::new(0, 2)
            },
            now
        ));
        assert_eq!(dashboard.widgets.get(&b).unwrap().position, GridCell::new(0, 2));
    }

    #[test]
    fn test_move_to_far_cell_is_rejected() {
        let now = Utc::now();
        let mut dashboard = Dashboard::new(GridConfig::default());
        let id = dashboard.add_widget(WidgetKind::Clock, now).id.clone();

        for position in [GridCell::new(u32::MAX, 0), GridCell::new(0, u32::MAX), GridCell::new(u32::MAX, u32::MAX)] {
            assert!(!dashboard.apply(DashboardCommand::MoveWidget { id: id.clone(), position }, now));
        }
        assert_eq!(dashboard.widgets.get(&id).unwrap().position, GridCell::new(0, 0));
    }

    #[test]
    fn test_delete_and_clear() {
        let now = Utc::now();
        let mut dashboard = Dashboard::new(GridConfig::default());
        let id = dashboard.add_widget(WidgetKind::Todo, now).id.clone();
        dashboard.add_widget(WidgetKind::Weather, now);
        assert!(dashboard.apply(DashboardCommand::DeleteWidget(id.clone()), now));
        assert!(!dashboard.apply(DashboardCommand::DeleteWidget(id), now));
        assert!(dashboard.apply(DashboardCommand::Clear, now));
        assert!(!dashboard.apply(DashboardCommand::Clear, now));
    }
}

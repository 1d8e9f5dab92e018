//! Placement Resolver
//!
//! Where a new item lands when the user did not drop it somewhere explicit:
//! end of a column, first free grid cell, or the projected canvas point.

use crate::config::GridConfig;
use crate::domain::{CanvasPoint, Column, GridCell, GridSize};

/// Axis-aligned cell rectangle, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(cell: GridCell, size: GridSize) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Shared edges do not count as overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() <= other.x
            || other.right() <= self.x
            || self.bottom() <= other.y
            || other.bottom() <= self.y)
    }
}

/// Board: a new task goes to the end of its column
pub fn append_to_column(column: &mut Column, task_id: &str) -> usize {
    column.task_ids.push(task_id.to_string());
    column.task_ids.len() - 1
}

/// Whether `rect` is clear of every occupied rectangle
pub fn is_free(rect: &Rect, occupied: &[Rect]) -> bool {
    occupied.iter().all(|o| !rect.overlaps(o))
}

/// First free cell for `size`, scanning rows top to bottom and cells left to right.
///
/// The scan covers at least `grid.max_rows` rows and always reaches one row past
/// the lowest occupied rectangle, so a free cell exists whenever the widget fits
/// the grid width. Widths larger than the grid are clamped to it.
pub fn first_free_cell(size: GridSize, occupied: &[Rect], grid: GridConfig) -> GridCell {
    if grid.columns == 0 {
        return GridCell::default();
    }
    let width = size.width.clamp(1, grid.columns);
    let height = size.height.max(1);
    let lowest = occupied.iter().map(Rect::bottom).max().unwrap_or(0);
    let rows = grid.max_rows.max(lowest.saturating_add(1));

    for y in 0..rows {
        for x in 0..=(grid.columns - width) {
            let candidate = Rect {
                x,
                y,
                width,
                height,
            };
            if is_free(&candidate, occupied) {
                return GridCell::new(x, y);
            }
        }
    }
    log::warn!("[GRID] No free cell for {}x{} within {} rows", width, height, rows);
    GridCell::default()
}

/// Size actually used for placement (width clamped to the grid)
pub fn clamp_size(size: GridSize, grid: GridConfig) -> GridSize {
    GridSize::new(size.width.clamp(1, grid.columns.max(1)), size.height.max(1))
}

/// Canvas pan/zoom state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    /// Screen point (relative to the canvas bounds) to canvas space
    pub fn project(&self, screen_x: f64, screen_y: f64) -> CanvasPoint {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };
        CanvasPoint::new((screen_x - self.x) / zoom, (screen_y - self.y) / zoom)
    }

    /// Canvas point back to screen space
    pub fn unproject(&self, point: CanvasPoint) -> (f64, f64) {
        (point.x * self.zoom + self.x, point.y * self.zoom + self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: u32, y: u32, w: u32, h: u32) -> Rect {
        Rect::new(GridCell::new(x, y), GridSize::new(w, h))
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = rect(0, 0, 2, 2);
        assert!(!a.overlaps(&rect(2, 0, 2, 2)));
        assert!(!a.overlaps(&rect(0, 2, 2, 2)));
        assert!(a.overlaps(&rect(1, 1, 2, 2)));
        assert!(a.overlaps(&rect(0, 0, 1, 1)));
    }

    #[test]
    fn test_edges_saturate_at_max() {
        let far = rect(u32::MAX, u32::MAX - 1, 2, 4);
        assert_eq!(far.right(), u32::MAX);
        assert_eq!(far.bottom(), u32::MAX);
        assert!(!far.overlaps(&rect(0, 0, 2, 2)));
    }

    #[test]
    fn test_second_widget_goes_right() {
        let occupied = [rect(0, 0, 2, 2)];
        let cell = first_free_cell(GridSize::new(2, 2), &occupied, GridConfig::default());
        assert_eq!(cell, GridCell::new(2, 0));
    }

    #[test]
    fn test_empty_grid_is_origin() {
        let cell = first_free_cell(GridSize::new(3, 2), &[], GridConfig::default());
        assert_eq!(cell, GridCell::new(0, 0));
    }

    #[test]
    fn test_wraps_to_next_free_row() {
        let grid = GridConfig {
            columns: 4,
            max_rows: 20,
        };
        let occupied = [rect(0, 0, 2, 1), rect(2, 0, 2, 2)];
        let cell = first_free_cell(GridSize::new(2, 1), &occupied, grid);
        assert_eq!(cell, GridCell::new(0, 1));
    }

    #[test]
    fn test_bound_grows_when_packed() {
        let grid = GridConfig {
            columns: 2,
            max_rows: 2,
        };
        let occupied = [rect(0, 0, 2, 2)];
        let cell = first_free_cell(GridSize::new(2, 2), &occupied, grid);
        assert_eq!(cell, GridCell::new(0, 2));
    }

    #[test]
    fn test_too_wide_is_clamped() {
        let grid = GridConfig {
            columns: 3,
            max_rows: 5,
        };
        let cell = first_free_cell(GridSize::new(8, 1), &[rect(0, 0, 1, 1)], grid);
        assert_eq!(cell, GridCell::new(0, 1));
        assert_eq!(clamp_size(GridSize::new(8, 1), grid), GridSize::new(3, 1));
    }

    #[test]
    fn test_append_to_column() {
        let mut column = Column::new("todo", "To Do", "#2196f3", Some(5));
        column.task_ids.push("t0".into());
        assert_eq!(append_to_column(&mut column, "t1"), 1);
        assert_eq!(column.task_ids, vec!["t0".to_string(), "t1".to_string()]);
    }

    #[test]
    fn test_viewport_projection() {
        let viewport = Viewport {
            x: 100.0,
            y: 50.0,
            zoom: 2.0,
        };
        let point = viewport.project(300.0, 250.0);
        assert_eq!(point, CanvasPoint::new(100.0, 100.0));
        assert_eq!(viewport.unproject(point), (300.0, 250.0));
        assert_eq!(Viewport::default().project(12.0, 7.0), CanvasPoint::new(12.0, 7.0));
    }

    proptest! {
        #[test]
        fn prop_placement_never_overlaps(
            rects in proptest::collection::vec((0u32..10, 0u32..25, 1u32..4, 1u32..4), 0..30),
            width in 1u32..6,
            height in 1u32..6,
        ) {
            let grid = GridConfig::default();
            let occupied: Vec<Rect> = rects.into_iter().map(|(x, y, w, h)| rect(x, y, w, h)).collect();
            let size = GridSize::new(width, height);
            let cell = first_free_cell(size, &occupied, grid);
            let placed = Rect::new(cell, clamp_size(size, grid));
            prop_assert!(placed.right() <= grid.columns);
            prop_assert!(is_free(&placed, &occupied));
        }
    }
}

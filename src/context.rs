//! Application Context
//!
//! One session per applet, provided via Leptos Context API. Components read
//! the collections through the signals and change them only by dispatching.

use leptos::prelude::*;
use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals, DndSignals, DragSource, DropTarget};

use deskboard_core::board::BoardCommand;
use deskboard_core::dashboard::{Dashboard, DashboardCommand};
use deskboard_core::domain::Board;
use deskboard_core::reorder::{DragLocation, DragResult};
use deskboard_core::repository::{self, WorkflowSummary};
use deskboard_core::workflow::{Workflow, WorkflowCommand};
use deskboard_core::{DomainResult, Session, SuiteConfig};

use crate::commands::LocalStorage;

pub type BoardSession = Session<Board, LocalStorage>;
pub type DashboardSession = Session<Dashboard, LocalStorage>;
pub type WorkflowSession = Session<Workflow, LocalStorage>;

/// App-wide sessions provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    pub board: RwSignal<BoardSession>,
    pub dashboard: RwSignal<DashboardSession>,
    pub workflow: RwSignal<WorkflowSession>,
    /// Drag state of the board columns
    pub board_dnd: DndSignals,
    /// Drag state of the widget palette and grid
    pub grid_dnd: DndSignals,
    /// Drag threshold and grid bounds
    pub config: StoredValue<SuiteConfig>,
}

/// Translate a finished gesture into the engine's drag result
fn drag_result(source: DragSource, target: Option<DropTarget>) -> DragResult {
    DragResult {
        dragged_id: source.id,
        source: DragLocation::new(source.container_id, source.index),
        destination: target.map(|t| DragLocation::new(t.container_id, t.index)),
    }
}

impl AppContext {
    /// Open every applet from local storage
    pub fn new(config: SuiteConfig) -> Self {
        let board = Session::open(LocalStorage, config.clone());
        let dashboard = Session::open(LocalStorage, config.clone());
        let workflow = Session::open(LocalStorage, config.clone());
        log::info!("[APP] Sessions opened");
        Self {
            board: RwSignal::new(board),
            dashboard: RwSignal::new(dashboard),
            workflow: RwSignal::new(workflow),
            board_dnd: create_dnd_signals(config.drag_threshold_px),
            grid_dnd: create_dnd_signals(config.drag_threshold_px),
            config: StoredValue::new(config),
        }
    }

    /// Bind the document-level drop handlers. Call once, from the root component.
    pub fn bind_drag_handlers(&self) {
        let ctx = *self;
        bind_global_mouseup(self.board_dnd, move |source, target| {
            log::debug!("[DND] Task drop: {} -> {:?}", source.id, target);
            ctx.dispatch_board(BoardCommand::MoveTask(drag_result(source, target)));
        });
        bind_global_mouseup(self.grid_dnd, move |source, target| {
            log::debug!("[DND] Widget drop: {} -> {:?}", source.id, target);
            ctx.dispatch_dashboard(DashboardCommand::Drop(drag_result(source, target)));
        });
    }

    pub fn dispatch_board(&self, command: BoardCommand) -> bool {
        self.board.try_update(|s| s.dispatch(command)).unwrap_or(false)
    }

    pub fn dispatch_dashboard(&self, command: DashboardCommand) -> bool {
        self.dashboard.try_update(|s| s.dispatch(command)).unwrap_or(false)
    }

    pub fn dispatch_workflow(&self, command: WorkflowCommand) -> bool {
        self.workflow.try_update(|s| s.dispatch(command)).unwrap_or(false)
    }

    /// Saved workflows, newest first
    pub fn saved_workflows(&self) -> DomainResult<Vec<WorkflowSummary>> {
        self.workflow
            .with_untracked(|s| repository::list_workflows(s.store(), s.config()))
    }

    /// Swap the saved workflow `id` into the canvas
    pub fn open_workflow(&self, id: &str) -> bool {
        let loaded = self
            .workflow
            .with_untracked(|s| repository::load_workflow(s.store(), s.config(), id));
        match loaded {
            Some(workflow) => self.dispatch_workflow(WorkflowCommand::Replace(workflow)),
            None => {
                log::warn!("[WORKFLOW] Saved workflow {} could not be opened", id);
                false
            }
        }
    }

    pub fn delete_saved_workflow(&self, id: &str) -> Result<(), String> {
        self.workflow
            .try_update(|s| {
                let config = s.config().clone();
                repository::delete_workflow(s.store_mut(), &config, id)
            })
            .unwrap_or(Ok(()))
            .map_err(|e| e.to_string())
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

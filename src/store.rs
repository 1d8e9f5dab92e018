//! Global Application State Store
//!
//! View state shared across components (active tab, open editor, board filter).
//! Applet collections live in their sessions, see `context.rs`.

use leptos::prelude::*;
use reactive_stores::Store;

use deskboard_core::board::TaskFilter;

use crate::components::EditTarget;

/// Which applet fills the main area
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppTab {
    #[default]
    Board,
    Widgets,
    Workflow,
}

impl AppTab {
    pub const ALL: [AppTab; 3] = [AppTab::Board, AppTab::Widgets, AppTab::Workflow];

    pub fn label(&self) -> &'static str {
        match self {
            AppTab::Board => "Backlog",
            AppTab::Widgets => "Widgets",
            AppTab::Workflow => "Workflow",
        }
    }
}

/// Global view state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub active_tab: AppTab,
    /// Target of the properties panel, if open
    pub editing: Option<EditTarget>,
    /// Search box and filter menu of the board
    pub board_filter: TaskFilter,
    /// Bumped whenever the saved-workflow list may have changed
    pub saved_workflows_version: u32,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Open the properties panel on `target`
pub fn store_edit(store: &AppStore, target: EditTarget) {
    store.editing().set(Some(target));
}

pub fn store_close_editor(store: &AppStore) {
    store.editing().set(None);
}

/// Close the panel if it is showing `target`
pub fn store_close_if_editing(store: &AppStore, target: &EditTarget) {
    if store.editing().with_untracked(|e| e.as_ref() == Some(target)) {
        store.editing().set(None);
    }
}

pub fn store_saved_workflows_changed(store: &AppStore) {
    store.saved_workflows_version().update(|v| *v += 1);
}

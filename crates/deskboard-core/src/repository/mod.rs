//! Repository Layer
//!
//! Persistence shim between the applets and a key/value store.

mod traits;
mod memory;
mod board_repo;
mod layout_repo;
mod workflow_repo;
pub mod dates;

#[cfg(test)]
mod tests;

pub use traits::KeyValueStore;
pub use memory::MemoryStore;
pub use board_repo::{load_board, save_board};
pub use layout_repo::{export_file_name, export_layout, import_layout, load_layout, read_layout, save_layout};
pub use workflow_repo::{delete_workflow, list_workflows, load_workflow, save_workflow, WorkflowSummary};

//! Deskboard Core
//!
//! Layered the same way for all three applets:
//! - domain: entities and payload types (tasks, widgets, workflow nodes)
//! - registry / placement / reorder / graph: the mutation engines
//! - board / dashboard / workflow: applet aggregates driven by typed commands
//! - repository: local-storage persistence shim

pub mod config;
pub mod error;
pub mod domain;
pub mod registry;
pub mod placement;
pub mod reorder;
pub mod graph;
pub mod board;
pub mod dashboard;
pub mod workflow;
pub mod command;
pub mod repository;

pub use config::SuiteConfig;
pub use error::{DomainError, DomainResult, ValidationError};
pub use command::{Applet, Session};

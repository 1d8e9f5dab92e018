//! Saved workflows, one key per workflow

use chrono::{DateTime, Utc};

use super::traits::KeyValueStore;
use crate::config::SuiteConfig;
use crate::domain::WorkflowStatus;
use crate::error::{DomainError, DomainResult};
use crate::workflow::Workflow;

/// Entry of the "open workflow" list
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
    pub status: WorkflowStatus,
    pub nodes: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

pub fn save_workflow<S: KeyValueStore>(store: &mut S, config: &SuiteConfig, workflow: &Workflow) -> DomainResult<()> {
    let Some(id) = workflow.id.as_deref() else {
        return Err(DomainError::InvalidInput("workflow has no id yet".to_string()));
    };
    let json = serde_json::to_string(workflow)?;
    store.set(&config.workflow_key(id), &json)?;
    log::info!("[STORE] Saved workflow {}", id);
    Ok(())
}

pub fn load_workflow<S: KeyValueStore>(store: &S, config: &SuiteConfig, id: &str) -> Option<Workflow> {
    let raw = match store.get(&config.workflow_key(id)) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("[STORE] Could not read workflow {}: {}", id, e);
            return None;
        }
    };
    match serde_json::from_str::<Workflow>(&raw) {
        Ok(mut workflow) => {
            // the key is authoritative
            workflow.id = Some(id.to_string());
            Some(workflow)
        }
        Err(e) => {
            log::warn!("[STORE] Workflow {} is unreadable: {}", id, e);
            None
        }
    }
}

pub fn delete_workflow<S: KeyValueStore>(store: &mut S, config: &SuiteConfig, id: &str) -> DomainResult<()> {
    store.remove(&config.workflow_key(id))
}

/// Saved workflows, most recently updated first. Unreadable entries are skipped.
pub fn list_workflows<S: KeyValueStore>(store: &S, config: &SuiteConfig) -> DomainResult<Vec<WorkflowSummary>> {
    let mut summaries: Vec<WorkflowSummary> = store
        .keys()?
        .iter()
        .filter_map(|key| key.strip_prefix(&config.workflow_key_prefix))
        .filter_map(|id| load_workflow(store, config, id))
        .filter_map(|workflow| {
            Some(WorkflowSummary {
                id: workflow.id.clone()?,
                nodes: workflow.graph.nodes.len(),
                name: workflow.name,
                status: workflow.status,
                updated_at: workflow.updated_at,
            })
        })
        .collect();
    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(summaries)
}

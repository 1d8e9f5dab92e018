//! Widget layout persistence and file export/import
//!
//! Stored and exported layouts share one envelope:
//! `{ widgets, version, savedAt | exportedAt }`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates;
use super::traits::KeyValueStore;
use crate::config::SuiteConfig;
use crate::domain::Widget;
use crate::error::{DomainError, DomainResult};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOut<'a> {
    widgets: &'a [Widget],
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutIn {
    #[serde(default)]
    widgets: Vec<serde_json::Value>,
    #[serde(default)]
    version: Option<String>,
}

/// Parse an envelope, skipping widget entries that do not parse
fn parse_envelope(raw: &str) -> DomainResult<Vec<Widget>> {
    let envelope: LayoutIn = serde_json::from_str(raw)?;
    if let Some(version) = &envelope.version {
        log::debug!("[STORE] Layout version {}", version);
    }
    let total = envelope.widgets.len();
    let widgets: Vec<Widget> = envelope
        .widgets
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Widget>(value) {
            Ok(widget) => Some(widget),
            Err(e) => {
                log::warn!("[STORE] Skipping unreadable widget: {}", e);
                None
            }
        })
        .collect();
    if widgets.len() < total {
        log::warn!("[STORE] Kept {} of {} widgets", widgets.len(), total);
    }
    Ok(widgets)
}

pub fn save_layout<S: KeyValueStore>(
    store: &mut S,
    config: &SuiteConfig,
    widgets: &[Widget],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    let json = serde_json::to_string(&LayoutOut {
        widgets,
        version: &config.layout_version,
        saved_at: Some(dates::format(&now)),
        exported_at: None,
    })?;
    store.set(&config.layout_key, &json)?;
    log::debug!("[STORE] Saved layout ({} widgets)", widgets.len());
    Ok(())
}

/// Stored layout; `Ok(None)` when nothing has been saved yet
pub fn read_layout<S: KeyValueStore>(store: &S, config: &SuiteConfig) -> DomainResult<Option<Vec<Widget>>> {
    match store.get(&config.layout_key)? {
        Some(raw) => parse_envelope(&raw).map(Some),
        None => Ok(None),
    }
}

/// Stored layout, or an empty dashboard
pub fn load_layout<S: KeyValueStore>(store: &S, config: &SuiteConfig) -> Vec<Widget> {
    match read_layout(store, config) {
        Ok(Some(widgets)) => {
            log::info!("[STORE] Loaded layout ({} widgets)", widgets.len());
            widgets
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            log::warn!("[STORE] Stored layout is unreadable, starting empty: {}", e);
            Vec::new()
        }
    }
}

/// Pretty-printed export document
pub fn export_layout(widgets: &[Widget], version: &str, now: DateTime<Utc>) -> DomainResult<String> {
    Ok(serde_json::to_string_pretty(&LayoutOut {
        widgets,
        version,
        saved_at: None,
        exported_at: Some(dates::format(&now)),
    })?)
}

/// `widget-layout-YYYY-MM-DD.json`
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("widget-layout-{}.json", now.format("%Y-%m-%d"))
}

/// Widgets of an imported file. A document that is not a layout at all is an error.
pub fn import_layout(raw: &str) -> DomainResult<Vec<Widget>> {
    parse_envelope(raw).map_err(|e| match e {
        DomainError::Serialization(inner) => DomainError::InvalidInput(format!("not a widget layout: {}", inner)),
        other => other,
    })
}

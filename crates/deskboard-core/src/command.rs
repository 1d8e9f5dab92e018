//! Applet Commands
//!
//! Components never mutate a collection in place. They dispatch a typed
//! command to the session owning it, which applies it and persists on change.

use chrono::{DateTime, Utc};

use crate::config::SuiteConfig;
use crate::domain::now;
use crate::error::DomainResult;
use crate::repository::KeyValueStore;

/// An applet's in-memory collection plus its command set
pub trait Applet: Sized {
    type Command;

    /// Restore from storage, falling back to the default collection
    fn load<S: KeyValueStore>(store: &S, config: &SuiteConfig) -> Self;

    fn save<S: KeyValueStore>(&self, store: &mut S, config: &SuiteConfig) -> DomainResult<()>;

    /// Apply a command; `true` when state changed
    fn apply(&mut self, command: Self::Command, now: DateTime<Utc>) -> bool;

    /// Whether a change should be written back right away
    fn autosave(&self) -> bool {
        true
    }
}

/// Owns one applet's collection and the store it persists into
#[derive(Debug, Clone)]
pub struct Session<A, S> {
    applet: A,
    store: S,
    config: SuiteConfig,
}

impl<A: Applet, S: KeyValueStore> Session<A, S> {
    /// Load the applet from `store`
    pub fn open(store: S, config: SuiteConfig) -> Self {
        let applet = A::load(&store, &config);
        Self { applet, store, config }
    }

    pub fn with_state(applet: A, store: S, config: SuiteConfig) -> Self {
        Self { applet, store, config }
    }

    pub fn state(&self) -> &A {
        &self.applet
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Direct store access for operations outside the applet (deleting a saved workflow)
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    pub fn dispatch(&mut self, command: A::Command) -> bool {
        self.dispatch_at(command, now())
    }

    /// Apply and, if anything changed, persist. A failed write is logged;
    /// the in-memory state stays authoritative.
    pub fn dispatch_at(&mut self, command: A::Command, now: DateTime<Utc>) -> bool {
        let changed = self.applet.apply(command, now);
        if changed && self.applet.autosave() {
            if let Err(e) = self.applet.save(&mut self.store, &self.config) {
                log::error!("[SESSION] Failed to persist: {}", e);
            }
        }
        changed
    }

    pub fn into_parts(self) -> (A, S) {
        (self.applet, self.store)
    }
}

//! Domain Layer - Core Entity Trait
//!
//! Every item the user manipulates (task, widget, workflow node) has an
//! immutable string id and creation/update timestamps.

use chrono::{DateTime, Utc};

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn updated_at(&self) -> Option<DateTime<Utc>>;

    fn set_updated_at(&mut self, at: DateTime<Utc>);

    /// Refresh `updated_at`, never letting it fall behind `created_at`
    fn touch(&mut self, now: DateTime<Utc>) {
        let stamp = match self.created_at() {
            Some(created) if created > now => created,
            _ => now,
        };
        self.set_updated_at(stamp);
    }
}

/// Current wall-clock time
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Implements [`Entity`] for a struct with `id: String` and optional
/// `created_at` / `updated_at` fields.
macro_rules! impl_entity {
    ($ty:ty) => {
        impl $crate::domain::Entity for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn created_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.created_at
            }

            fn updated_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.updated_at
            }

            fn set_updated_at(&mut self, at: chrono::DateTime<chrono::Utc>) {
                self.updated_at = Some(at);
            }
        }
    };
}

pub(crate) use impl_entity;

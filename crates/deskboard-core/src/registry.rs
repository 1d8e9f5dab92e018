//! Item Registry
//!
//! Canonical id -> item collection for one applet. Insertion order is kept
//! (widget order is user-visible), and every upsert stamps `updated_at`.
//! Lookups of absent ids are not errors; callers check the `Option`.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::Entity;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent, bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Registry<T> {
    items: IndexMap<String, T>,
}

/// Order-sensitive, unlike `IndexMap`'s own equality
impl<T: PartialEq> PartialEq for Registry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len() && self.items.iter().eq(other.items.iter())
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }
}

impl<T: Entity> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list, keeping its order; later duplicates replace earlier ones
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        let items = items
            .into_iter()
            .map(|item| (item.id().to_string(), item))
            .collect();
        Self { items }
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Insert or replace, stamping `updated_at = now`
    pub fn upsert(&mut self, item: T) -> &T {
        self.upsert_at(item, crate::domain::now())
    }

    pub fn upsert_at(&mut self, mut item: T, now: DateTime<Utc>) -> &T {
        item.touch(now);
        let id = item.id().to_string();
        let (index, _) = self.items.insert_full(id, item);
        &self.items[index]
    }

    /// Delete by id, returning whether it existed. Order of the rest is kept.
    pub fn remove(&mut self, id: &str) -> bool {
        self.items.shift_remove(id).is_some()
    }

    /// Apply `f` to an item and stamp it; `false` when the id is unknown
    pub fn update_with(&mut self, id: &str, now: DateTime<Utc>, f: impl FnOnce(&mut T)) -> bool {
        match self.items.get_mut(id) {
            Some(item) => {
                f(item);
                item.touch(now);
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.get_index_of(id)
    }

    /// Move the item at `from` to `to` (remove-then-insert semantics)
    pub fn move_index(&mut self, from: usize, to: usize) -> bool {
        if from >= self.items.len() {
            return false;
        }
        let to = to.min(self.items.len() - 1);
        if from != to {
            self.items.move_index(from, to);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.values().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// `prefix-<unix millis>`, suffixed with `-n` only when that id is taken
    pub fn fresh_id(&self, prefix: &str, now: DateTime<Utc>) -> String {
        fresh_id(prefix, now, |id| self.contains(id))
    }
}

/// Timestamp-based id that avoids collisions reported by `taken`
pub fn fresh_id(prefix: &str, now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let base = format!("{}-{}", prefix, now.timestamp_millis());
    if !taken(&base) {
        return base;
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Task, User, Widget, WidgetKind};
    use chrono::{Duration, TimeZone};

    fn task(id: &str, at: DateTime<Utc>) -> Task {
        let mut t = Task::new(id, User::new("1", "John", "john@example.com"), at);
        t.id = id.to_string();
        t
    }

    #[test]
    fn test_get_absent_is_none() {
        let registry: Registry<Task> = Registry::new();
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_upsert_stamps_updated_at() {
        let created = Utc::now() - Duration::days(1);
        let now = Utc::now();
        let mut registry = Registry::new();
        registry.upsert_at(task("a", created), now);
        assert_eq!(registry.get("a").unwrap().updated_at, Some(now));

        // replace keeps position
        registry.upsert_at(task("b", created), now);
        let mut replaced = task("a", created);
        replaced.title = "renamed".into();
        registry.upsert_at(replaced, now);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().title, "renamed");
    }

    #[test]
    fn test_updated_never_before_created() {
        let created = Utc::now();
        let mut registry = Registry::new();
        registry.upsert_at(task("a", created), created - Duration::seconds(30));
        let item = registry.get("a").unwrap();
        assert!(item.updated_at >= item.created_at);
    }

    #[test]
    fn test_remove_reports_existence() {
        let mut registry = Registry::from_items([task("a", Utc::now()), task("b", Utc::now())]);
        assert!(registry.remove("a"));
        assert!(!registry.remove("a"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_move_index_splices() {
        let now = Utc::now();
        let mut registry = Registry::from_items(["a", "b", "c", "d"].map(|id| task(id, now)));
        assert!(registry.move_index(0, 2));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["b", "c", "a", "d"]);
        assert!(registry.move_index(3, 99));
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["b", "c", "a", "d"]);
        assert!(!registry.move_index(7, 0));
    }

    #[test]
    fn test_fresh_id_suffixes_on_collision() {
        let now = Utc::now();
        let mut registry: Registry<Widget> = Registry::new();
        let first = registry.fresh_id("form", now);
        assert_eq!(first, format!("form-{}", now.timestamp_millis()));

        let mut widget = Widget::new(WidgetKind::Clock, now);
        widget.id = first.clone();
        registry.upsert_at(widget, now);
        let second = registry.fresh_id("form", now);
        assert_eq!(second, format!("{}-1", first));
    }

    #[test]
    fn test_serializes_as_map_in_order() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let registry = Registry::from_items([task("z", now), task("a", now)]);
        let json = serde_json::to_string(&registry).unwrap();
        assert!(json.find("\"z\"").unwrap() < json.find("\"a\"").unwrap());
        let back: Registry<Task> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, registry);
    }
}

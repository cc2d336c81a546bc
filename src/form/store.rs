use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

use super::controller::FormController;

struct Entry {
    form: FormController,
    touched: Instant,
}

/// Live form instances, one controller per open page.
pub struct FormStore {
    /// form_id -> (controller, last access)
    entries: DashMap<Uuid, Entry>,
}

impl FormStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn insert(&self, form: FormController) -> Uuid {
        let id = Uuid::now_v7();
        self.entries.insert(
            id,
            Entry {
                form,
                touched: Instant::now(),
            },
        );
        id
    }

    /// Run `f` against one instance while holding its entry exclusively.
    /// Returns `None` if the instance does not exist.
    pub fn with<R>(&self, id: Uuid, f: impl FnOnce(&mut FormController) -> R) -> Option<R> {
        let mut entry = self.entries.get_mut(&id)?;
        entry.touched = Instant::now();
        Some(f(&mut entry.form))
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.entries.remove(&id).is_some()
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop instances not touched within `max_age`. Returns how many were removed.
    pub fn cleanup(&self, max_age: Duration) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.duration_since(entry.touched) < max_age);
        before.saturating_sub(self.entries.len())
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use eco9_core::ActivityId;
use eco9_model::{Activity, ActivityPage, ActivityQuery, NewActivity};

use crate::backend::{ActivityRepository, BackendKind};
use crate::cursor;
use crate::error::{StoreError, StoreErrorCode};

#[derive(Debug, Default)]
struct State {
    last_id: u64,
    rows: BTreeMap<ActivityId, Activity>,
}

/// Process-local repository. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: Mutex<State>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "memory store lock poisoned"))
    }
}

impl ActivityRepository for MemoryRepository {
    fn backend(&self) -> BackendKind {
        BackendKind::Memory
    }

    fn insert(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        let mut state = self.lock()?;
        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::new(StoreErrorCode::Internal, "activity id space exhausted"))?;
        let id = ActivityId::new(next)
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        state.last_id = next;
        let stored = activity.into_activity(id);
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    fn get(&self, id: ActivityId) -> Result<Activity, StoreError> {
        self.lock()?
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn update(&self, id: ActivityId, activity: NewActivity) -> Result<Activity, StoreError> {
        let mut state = self.lock()?;
        let slot = state.rows.get_mut(&id).ok_or_else(|| StoreError::not_found(id))?;
        *slot = activity.into_activity(id);
        Ok(slot.clone())
    }

    fn delete(&self, id: ActivityId) -> Result<(), StoreError> {
        self.lock()?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn list(&self, query: &ActivityQuery) -> Result<ActivityPage, StoreError> {
        let after = cursor::start_after(query)?;
        let limit = query.effective_limit();
        let state = self.lock()?;
        let mut items: Vec<Activity> = state
            .rows
            .values()
            .filter(|a| a.id.get() > after && query.matches(a))
            .take(limit + 1)
            .cloned()
            .collect();
        let next_cursor = if items.len() > limit {
            items.truncate(limit);
            match items.last() {
                Some(last) => Some(cursor::encode(query, last.id)?),
                None => None,
            }
        } else {
            None
        };
        Ok(ActivityPage { items, next_cursor })
    }
}

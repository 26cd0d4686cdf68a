// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use std::str::FromStr;

use eco9_core::ActivityId;
use eco9_model::{Activity, ActivityPage, ActivityQuery, NewActivity};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreErrorCode};
use crate::memory::MemoryRepository;
use crate::sqlite::SqliteRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum BackendKind {
    #[default]
    Memory,
    Sqlite,
}

impl BackendKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        }
    }
}

impl FromStr for BackendKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(StoreError::new(
                StoreErrorCode::Unsupported,
                format!("unknown store backend `{other}`; expected `memory` or `sqlite`"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: BackendKind,
    /// Database file for the SQLite backend. Ignored by the memory backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqlite_path: Option<PathBuf>,
}

/// Storage for activity records.
///
/// Ids are assigned by the repository, start at 1 and are never reused within
/// one store, even after deletes. Listings are ordered by ascending id.
pub trait ActivityRepository: Send + Sync {
    fn backend(&self) -> BackendKind;

    fn insert(&self, activity: NewActivity) -> Result<Activity, StoreError>;

    fn get(&self, id: ActivityId) -> Result<Activity, StoreError>;

    /// Replaces every field of `id` with `activity`. Fails with `not_found`
    /// when `id` does not exist.
    fn update(&self, id: ActivityId, activity: NewActivity) -> Result<Activity, StoreError>;

    fn delete(&self, id: ActivityId) -> Result<(), StoreError>;

    fn list(&self, query: &ActivityQuery) -> Result<ActivityPage, StoreError>;

    /// Flushes pending state. The repository stays usable afterwards.
    fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

pub fn open_repository(config: &StoreConfig) -> Result<Box<dyn ActivityRepository>, StoreError> {
    let repo: Box<dyn ActivityRepository> = match config.backend {
        BackendKind::Memory => Box::new(MemoryRepository::new()),
        BackendKind::Sqlite => {
            let Some(path) = config.sqlite_path.as_deref() else {
                return Err(StoreError::new(
                    StoreErrorCode::Validation,
                    "sqlite backend requires store.sqlite_path",
                ));
            };
            Box::new(SqliteRepository::open(path)?)
        }
    };
    tracing::info!(backend = config.backend.as_str(), "activity repository opened");
    Ok(repo)
}

#[cfg(test)]
mod tests {
    use super::{open_repository, BackendKind, StoreConfig};
    use crate::error::StoreErrorCode;

    #[test]
    fn backend_names_round_trip() {
        for kind in [BackendKind::Memory, BackendKind::Sqlite] {
            assert_eq!(kind.as_str().parse::<BackendKind>().ok(), Some(kind));
        }
        let err = "postgres".parse::<BackendKind>().expect_err("unknown");
        assert_eq!(err.code, StoreErrorCode::Unsupported);
    }

    #[test]
    fn sqlite_backend_requires_a_path() {
        let config = StoreConfig {
            backend: BackendKind::Sqlite,
            sqlite_path: None,
        };
        let err = open_repository(&config).err().expect("missing path");
        assert_eq!(err.code, StoreErrorCode::Validation);
    }
}

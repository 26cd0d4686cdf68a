// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use eco9_core::{ActivityId, UserId};
use eco9_model::{
    Activity, ActivityCategory, ActivityPage, ActivityQuery, ImpactResult, NewActivity,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::backend::{ActivityRepository, BackendKind};
use crate::cursor;
use crate::error::{StoreError, StoreErrorCode};

pub const SQLITE_SCHEMA_VERSION: i64 = 1;

const SCHEMA_V1: &str = "
CREATE TABLE IF NOT EXISTS activity (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  user_id TEXT NOT NULL,
  category TEXT NOT NULL,
  subtype TEXT,
  value REAL NOT NULL,
  unit TEXT NOT NULL,
  note TEXT,
  co2_saved REAL NOT NULL,
  water_conserved REAL NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_activity_user ON activity (user_id, id);
CREATE INDEX IF NOT EXISTS idx_activity_category ON activity (category, id);
";

const SELECT_COLUMNS: &str =
    "id, user_id, category, subtype, value, unit, note, co2_saved, water_conserved";

/// Repository backed by a single SQLite database file.
pub struct SqliteRepository {
    path: PathBuf,
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRepository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteRepository {
    /// Opens or creates the database at `path` and migrates it to the current
    /// schema. Parent directories are created as needed.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::new(
                    StoreErrorCode::Io,
                    format!("create {}: {e}", parent.display()),
                )
            })?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            PRAGMA busy_timeout=5000;
            ",
        )?;
        migrate(&conn)?;
        tracing::debug!(path = %path.display(), "sqlite activity store ready");
        Ok(Self {
            path: path.to_path_buf(),
            conn: Mutex::new(conn),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "sqlite connection lock poisoned"))
    }
}

fn migrate(conn: &Connection) -> Result<(), StoreError> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version > SQLITE_SCHEMA_VERSION {
        return Err(StoreError::new(
            StoreErrorCode::Unsupported,
            format!(
                "database schema version {version} is newer than supported {SQLITE_SCHEMA_VERSION}"
            ),
        ));
    }
    if version < SQLITE_SCHEMA_VERSION {
        conn.execute_batch(SCHEMA_V1)?;
        conn.execute_batch(&format!("PRAGMA user_version={SQLITE_SCHEMA_VERSION};"))?;
        tracing::info!(from = version, to = SQLITE_SCHEMA_VERSION, "migrated activity schema");
    }
    Ok(())
}

struct RawRow {
    id: i64,
    user: String,
    category: String,
    subtype: Option<String>,
    value: f64,
    unit: String,
    note: Option<String>,
    co2_saved: f64,
    water_conserved: f64,
}

impl RawRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user: row.get(1)?,
            category: row.get(2)?,
            subtype: row.get(3)?,
            value: row.get(4)?,
            unit: row.get(5)?,
            note: row.get(6)?,
            co2_saved: row.get(7)?,
            water_conserved: row.get(8)?,
        })
    }

    fn into_activity(self) -> Result<Activity, StoreError> {
        let corrupt = |e: eco9_core::Error| {
            StoreError::new(
                StoreErrorCode::Internal,
                format!("corrupt activity row {}: {e}", self.id),
            )
        };
        let id = u64::try_from(self.id)
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "negative activity id"))
            .and_then(|raw| ActivityId::new(raw).map_err(corrupt))?;
        Ok(Activity {
            id,
            user: UserId::new(self.user.clone()).map_err(corrupt)?,
            category: ActivityCategory::parse(&self.category),
            subtype: self.subtype,
            value: self.value,
            unit: self.unit,
            note: self.note,
            impact: ImpactResult::new(self.co2_saved, self.water_conserved),
        })
    }
}

fn to_sql_id(id: ActivityId) -> Result<i64, StoreError> {
    i64::try_from(id.get()).map_err(|_| StoreError::not_found(id))
}

fn fetch(conn: &Connection, id: ActivityId) -> Result<Activity, StoreError> {
    conn.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM activity WHERE id = ?1"),
        params![to_sql_id(id)?],
        RawRow::read,
    )
    .optional()?
    .ok_or_else(|| StoreError::not_found(id))?
    .into_activity()
}

impl ActivityRepository for SqliteRepository {
    fn backend(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn insert(&self, activity: NewActivity) -> Result<Activity, StoreError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO activity (user_id, category, subtype, value, unit, note, co2_saved, water_conserved)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                activity.user.as_str(),
                activity.category.as_str(),
                activity.subtype,
                activity.value,
                activity.unit,
                activity.note,
                activity.impact.co2_saved,
                activity.impact.water_conserved,
            ],
        )?;
        let rowid = conn.last_insert_rowid();
        let id = u64::try_from(rowid)
            .ok()
            .and_then(|raw| ActivityId::new(raw).ok())
            .ok_or_else(|| {
                StoreError::new(StoreErrorCode::Internal, format!("invalid rowid {rowid}"))
            })?;
        Ok(activity.into_activity(id))
    }

    fn get(&self, id: ActivityId) -> Result<Activity, StoreError> {
        let conn = self.lock()?;
        fetch(&conn, id)
    }

    fn update(&self, id: ActivityId, activity: NewActivity) -> Result<Activity, StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE activity
             SET user_id = ?2, category = ?3, subtype = ?4, value = ?5, unit = ?6, note = ?7,
                 co2_saved = ?8, water_conserved = ?9
             WHERE id = ?1",
            params![
                to_sql_id(id)?,
                activity.user.as_str(),
                activity.category.as_str(),
                activity.subtype,
                activity.value,
                activity.unit,
                activity.note,
                activity.impact.co2_saved,
                activity.impact.water_conserved,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::not_found(id));
        }
        Ok(activity.into_activity(id))
    }

    fn delete(&self, id: ActivityId) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM activity WHERE id = ?1", params![to_sql_id(id)?])?;
        if changed == 0 {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }

    fn list(&self, query: &ActivityQuery) -> Result<ActivityPage, StoreError> {
        let after = i64::try_from(cursor::start_after(query)?)
            .map_err(|_| StoreError::new(StoreErrorCode::Validation, "cursor out of range"))?;
        let limit = query.effective_limit();
        let fetch_limit = i64::try_from(limit + 1).unwrap_or(i64::MAX);

        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {SELECT_COLUMNS} FROM activity
             WHERE id > ?1
               AND (?2 IS NULL OR user_id = ?2)
               AND (?3 IS NULL OR category = ?3)
             ORDER BY id ASC
             LIMIT ?4"
        ))?;
        let rows = stmt.query_map(
            params![
                after,
                query.user.as_ref().map(|u| u.as_str()),
                query.category.as_ref().map(|c| c.as_str()),
                fetch_limit,
            ],
            RawRow::read,
        )?;
        let mut items = Vec::with_capacity(limit.min(64));
        for row in rows {
            items.push(row?.into_activity()?);
        }

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

    fn close(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;
        conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE); PRAGMA optimize;")?;
        tracing::debug!(path = %self.path.display(), "sqlite activity store checkpointed");
        Ok(())
    }
}

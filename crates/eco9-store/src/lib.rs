#![forbid(unsafe_code)]
//! Persistence for logged activities.
//!
//! [`ActivityRepository`] is the only seam the application talks to; the
//! backend behind it is picked at startup from [`StoreConfig`].

mod backend;
mod cursor;
mod error;
mod memory;
mod sqlite;

pub use backend::{open_repository, ActivityRepository, BackendKind, StoreConfig};
pub use error::{StoreError, StoreErrorCode};
pub use memory::MemoryRepository;
pub use sqlite::{SqliteRepository, SQLITE_SCHEMA_VERSION};

pub const CRATE_NAME: &str = "eco9-store";

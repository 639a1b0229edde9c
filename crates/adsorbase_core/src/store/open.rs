//! Store bootstrap: connection opening, pragmas, schema checks.
//!
//! # Responsibility
//! - Open file or in-memory stores in read-only or read-write mode.
//! - Apply (read-write) or verify (read-only) the schema before handing the
//!   store to callers.
//!
//! # Invariants
//! - Returned stores have `foreign_keys=ON` so subtree deletion cascades.
//! - The underlying connection is released when the `Store` drops, on every
//!   exit path.

use crate::store::group::{Group, ROOT_NODE_ID};
use crate::store::migrations::{apply_migrations, current_user_version, latest_version};
use crate::store::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

/// Access mode requested when opening a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Reads only; writes fail at the engine level.
    ReadOnly,
    /// Reads and writes; pending schema migrations are applied on open.
    ReadWrite,
}

impl AccessMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "read_only",
            Self::ReadWrite => "read_write",
        }
    }
}

/// Handle to an open hierarchical store.
///
/// The caller owns the handle and its lifetime; facade operations borrow
/// it. There is no process-wide store.
pub struct Store {
    conn: Connection,
    mode: AccessMode,
}

impl Store {
    /// Opens a store file in the requested access mode.
    ///
    /// # Side effects
    /// - Read-write mode applies pending schema migrations.
    /// - Emits `store_open` logging events with duration and status.
    pub fn open(path: impl AsRef<Path>, mode: AccessMode) -> StoreResult<Self> {
        let started_at = Instant::now();
        info!(
            "event=store_open module=store status=start mode={}",
            mode.as_str()
        );

        let flags = match mode {
            AccessMode::ReadOnly => OpenFlags::SQLITE_OPEN_READ_ONLY,
            AccessMode::ReadWrite => OpenFlags::default(),
        };

        let result = Connection::open_with_flags(path, flags)
            .map_err(StoreError::from)
            .and_then(|conn| Self::bootstrap(conn, mode));

        match result {
            Ok(store) => {
                info!(
                    "event=store_open module=store status=ok mode={} duration_ms={}",
                    mode.as_str(),
                    started_at.elapsed().as_millis()
                );
                Ok(store)
            }
            Err(err) => {
                error!(
                    "event=store_open module=store status=error mode={} duration_ms={} error={}",
                    mode.as_str(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Opens a fresh in-memory store in read-write mode.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn, AccessMode::ReadWrite)
    }

    fn bootstrap(mut conn: Connection, mode: AccessMode) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.busy_timeout(Duration::from_secs(5))?;

        match mode {
            AccessMode::ReadWrite => apply_migrations(&mut conn)?,
            AccessMode::ReadOnly => {
                let version = current_user_version(&conn)?;
                let latest = latest_version();
                if version == 0 {
                    return Err(StoreError::UninitializedStore);
                }
                if version > latest {
                    return Err(StoreError::UnsupportedSchemaVersion {
                        db_version: version,
                        latest_supported: latest,
                    });
                }
            }
        }

        Ok(Self { conn, mode })
    }

    /// Returns the access mode this store was opened with.
    pub fn mode(&self) -> AccessMode {
        self.mode
    }

    /// Returns the root group of the store tree.
    pub fn root(&self) -> Group<'_> {
        Group::new(self, ROOT_NODE_ID)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}

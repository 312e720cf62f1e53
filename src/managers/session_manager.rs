//! Session store for MiniArc.
//!
//! Mirrors the open tab layout and the visit history into SQLite so a
//! restarted shell can reopen where it left off. Only compiled with the
//! `persistence` feature.

use rusqlite::{params, OptionalExtension};

use crate::database::connection::Database;
use crate::types::errors::StoreError;
use crate::types::history::VisitRecord;
use crate::types::session::{SessionData, SessionTab};
use crate::types::tab::TabId;

/// Trait defining session persistence operations.
pub trait SessionStoreTrait {
    fn save_session(&self, data: &SessionData) -> Result<(), StoreError>;
    fn restore_session(&self) -> Result<Option<SessionData>, StoreError>;
    fn has_session(&self) -> bool;
    fn clear_session(&self) -> Result<(), StoreError>;
    fn append_visit(&self, record: &VisitRecord) -> Result<(), StoreError>;
    fn load_visits(&self, limit: Option<usize>) -> Result<Vec<VisitRecord>, StoreError>;
}

/// Session store backed by a MiniArc [`Database`].
pub struct SessionStore {
    db: Database,
}

impl SessionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

fn db_err(e: rusqlite::Error) -> StoreError {
    StoreError::DatabaseError(e.to_string())
}

impl SessionStoreTrait for SessionStore {
    /// Replaces the saved tab layout with `data`.
    fn save_session(&self, data: &SessionData) -> Result<(), StoreError> {
        let tx = self.db.connection().unchecked_transaction().map_err(db_err)?;
        tx.execute("DELETE FROM session_tabs", []).map_err(db_err)?;
        for (position, tab) in data.tabs.iter().enumerate() {
            tx.execute(
                "INSERT INTO session_tabs (position, url, title) VALUES (?1, ?2, ?3)",
                params![position as i64, tab.url, tab.title],
            )
            .map_err(db_err)?;
        }
        tx.execute(
            "INSERT INTO session_state (id, active_index, saved_at) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET active_index = excluded.active_index, saved_at = excluded.saved_at",
            params![data.active_index.map(|i| i as i64), data.timestamp],
        )
        .map_err(db_err)?;
        tx.commit().map_err(db_err)?;
        log::debug!("saved session with {} tabs", data.tabs.len());
        Ok(())
    }

    /// Returns the last saved layout, or `None` if nothing was saved.
    fn restore_session(&self) -> Result<Option<SessionData>, StoreError> {
        let conn = self.db.connection();

        let state: Option<(Option<i64>, i64)> = conn
            .query_row(
                "SELECT active_index, saved_at FROM session_state WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(db_err)?;
        let Some((active_index, timestamp)) = state else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare("SELECT url, title FROM session_tabs ORDER BY position ASC")
            .map_err(db_err)?;
        let tabs = stmt
            .query_map([], |row| {
                Ok(SessionTab {
                    url: row.get(0)?,
                    title: row.get(1)?,
                })
            })
            .map_err(db_err)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(db_err)?;

        let active_index = match active_index {
            Some(i) if i < 0 => {
                return Err(StoreError::CorruptRow(format!("negative active index {}", i)));
            }
            Some(i) => Some(i as usize),
            None => None,
        };

        Ok(Some(SessionData {
            tabs,
            active_index,
            timestamp,
        }))
    }

    fn has_session(&self) -> bool {
        self.db
            .connection()
            .query_row("SELECT COUNT(*) FROM session_state", [], |row| row.get::<_, i64>(0))
            .unwrap_or(0)
            > 0
    }

    /// Forgets the saved layout. Visits are kept.
    fn clear_session(&self) -> Result<(), StoreError> {
        let conn = self.db.connection();
        conn.execute("DELETE FROM session_tabs", []).map_err(db_err)?;
        conn.execute("DELETE FROM session_state", []).map_err(db_err)?;
        Ok(())
    }

    /// Appends a visit; a record whose id is already stored is skipped.
    fn append_visit(&self, record: &VisitRecord) -> Result<(), StoreError> {
        self.db
            .connection()
            .execute(
                "INSERT OR IGNORE INTO visits (id, tab_id, url, url_string, title, visited_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    record.id,
                    record.tab_id.0 as i64,
                    record.url,
                    record.url_string,
                    record.title,
                    record.visited_at
                ],
            )
            .map_err(db_err)?;
        Ok(())
    }

    /// Stored visits, newest first.
    fn load_visits(&self, limit: Option<usize>) -> Result<Vec<VisitRecord>, StoreError> {
        let conn = self.db.connection();
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = conn
            .prepare(
                "SELECT id, tab_id, url, url_string, title, visited_at
                 FROM visits ORDER BY seq DESC LIMIT ?1",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, i64>(5)?,
                ))
            })
            .map_err(db_err)?;

        let mut visits = Vec::new();
        for row in rows {
            let (id, tab_id, url, url_string, title, visited_at) = row.map_err(db_err)?;
            if tab_id < 0 {
                return Err(StoreError::CorruptRow(format!("visit {} has tab id {}", id, tab_id)));
            }
            visits.push(VisitRecord {
                id,
                tab_id: TabId(tab_id as u64),
                url,
                url_string,
                title,
                visited_at,
            });
        }
        Ok(visits)
    }
}

//! SQLite database operations for the partner directory.

use partner_directory_types::{DirectoryStats, NewPartner, PartnerRecord};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::DirectoryError;

pub struct Db {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Db {
    pub fn open(path: &str) -> Result<Self, DirectoryError> {
        let (conn, file) = if path == ":memory:" {
            (Connection::open_in_memory()?, None)
        } else {
            (Connection::open(path)?, Some(PathBuf::from(path)))
        };
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let db = Self {
            conn: Mutex::new(conn),
            path: file,
        };
        db.create_tables()?;
        Ok(db)
    }

    fn create_tables(&self) -> Result<(), DirectoryError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "CREATE TABLE IF NOT EXISTS partners (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                resources TEXT,
                contact_info TEXT
            )",
            [],
        )?;
        Ok(())
    }

    /// Location of the persisted file, None for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn insert(&self, partner: &NewPartner) -> Result<PartnerRecord, DirectoryError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO partners (name, type, resources, contact_info)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                partner.name,
                partner.partner_type,
                partner.resources,
                partner.contact_info
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(PartnerRecord {
            id,
            name: partner.name.clone(),
            partner_type: partner.partner_type.clone(),
            resources: partner.resources.clone(),
            contact_info: partner.contact_info.clone(),
        })
    }

    /// Deleting an id that was never assigned (or already deleted) is a
    /// no-op success, keeping the operation idempotent.
    pub fn delete(&self, id: i64) -> Result<(), DirectoryError> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM partners WHERE id = ?1", [id])?;
        Ok(())
    }

    pub fn list_all(&self) -> Result<Vec<PartnerRecord>, DirectoryError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, type, resources, contact_info
             FROM partners ORDER BY id ASC",
        )?;
        let records = stmt
            .query_map([], |row| row_to_partner(row))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }

    /// Case-insensitive substring match against any of the four record
    /// fields. A term that is empty after trimming lists everything.
    pub fn search(&self, term: &str) -> Result<Vec<PartnerRecord>, DirectoryError> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_all();
        }
        let conn = self.conn.lock().unwrap();
        let pattern = format!("%{}%", term);
        let mut stmt = conn.prepare(
            "SELECT id, name, type, resources, contact_info
             FROM partners
             WHERE name LIKE ?1 OR type LIKE ?1 OR resources LIKE ?1 OR contact_info LIKE ?1
             ORDER BY id ASC",
        )?;
        let records = stmt
            .query_map(rusqlite::params![pattern], |row| row_to_partner(row))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(records)
    }

    pub fn get_stats(&self) -> Result<DirectoryStats, DirectoryError> {
        let conn = self.conn.lock().unwrap();
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM partners", [], |row| row.get(0))?;
        Ok(DirectoryStats {
            total_partners: total,
        })
    }

    /// Flush the WAL into the main database file so a file-level copy
    /// observes every committed write.
    pub fn checkpoint(&self) -> Result<(), DirectoryError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

fn row_to_partner(row: &rusqlite::Row) -> rusqlite::Result<PartnerRecord> {
    Ok(PartnerRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        partner_type: row.get(2)?,
        resources: row.get(3)?,
        contact_info: row.get(4)?,
    })
}

//! Timestamped file snapshots of the partner database.
//!
//! Snapshots are append-only artifacts: the service never reads them back
//! and never rotates them. Two snapshots within the same second collide on
//! the same name and the later one overwrites the earlier.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use partner_directory_types::BackupReceipt;

use crate::db::Db;
use crate::error::DirectoryError;

pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Create the backup directory. Called once at process startup.
    pub fn init(&self) -> Result<(), DirectoryError> {
        fs::create_dir_all(&self.backup_dir)?;
        Ok(())
    }

    /// Copy the full current database file to
    /// `<backup_dir>/partners_backup_<YYYYMMDDHHMMSS>.db`.
    ///
    /// The mutation that triggered the snapshot is already durable before
    /// this runs; callers decide whether a failure here is an error or a
    /// warning on an otherwise-successful response.
    pub fn snapshot(&self, db: &Db) -> Result<BackupReceipt, DirectoryError> {
        let src = db.path().ok_or_else(|| {
            DirectoryError::Backup(io::Error::new(
                io::ErrorKind::NotFound,
                "database has no file to snapshot",
            ))
        })?;

        // Flush the WAL first so the copied file holds every committed write
        db.checkpoint()?;

        fs::create_dir_all(&self.backup_dir)?;
        let timestamp = Local::now().format("%Y%m%d%H%M%S").to_string();
        let dest = self
            .backup_dir
            .join(format!("partners_backup_{}.db", timestamp));
        fs::copy(src, &dest)?;

        Ok(BackupReceipt {
            path: dest.to_string_lossy().into_owned(),
            timestamp,
        })
    }
}

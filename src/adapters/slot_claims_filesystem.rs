use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::domain::AppError;
use crate::ports::SlotClaims;

/// Age after which a claim file is treated as left behind by a dead process.
pub const DEFAULT_CLAIM_TTL: Duration = Duration::from_secs(600);

/// Claim registry shared across processes through one file per claimed slot.
///
/// Each claim is `<dir>/slot-<id>` created with `create_new`, so two processes
/// can never both hold the same slot. Files older than the TTL are ignored and
/// swept on the next acquire.
#[derive(Debug, Clone)]
pub struct FilesystemSlotClaims {
    dir: PathBuf,
    ttl: Duration,
}

impl FilesystemSlotClaims {
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        Self { dir, ttl }
    }

    fn slot_path(&self, id: u32) -> PathBuf {
        self.dir.join(format!("slot-{}", id))
    }

    fn is_stale(&self, modified: SystemTime) -> bool {
        SystemTime::now().duration_since(modified).is_ok_and(|age| age >= self.ttl)
    }

    /// Live and stale claim ids found on disk.
    fn scan(&self) -> Result<(BTreeSet<u32>, Vec<u32>), AppError> {
        let mut live = BTreeSet::new();
        let mut stale = Vec::new();
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok((live, stale)),
            Err(err) => return Err(err.into()),
        };

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let Some(id) = name
                .to_str()
                .and_then(|name| name.strip_prefix("slot-"))
                .and_then(|id| id.parse::<u32>().ok())
            else {
                continue;
            };
            let modified = match entry.metadata().and_then(|meta| meta.modified()) {
                Ok(modified) => modified,
                // Released between listing and stat.
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            };
            if self.is_stale(modified) {
                stale.push(id);
            } else {
                live.insert(id);
            }
        }
        Ok((live, stale))
    }

    fn remove(&self, id: u32) -> Result<(), AppError> {
        match fs::remove_file(self.slot_path(id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn rollback(&self, created: &[u32]) {
        for id in created {
            if let Err(err) = self.remove(*id) {
                tracing::warn!(slot = id, error = %err, "failed to roll back slot claim");
            }
        }
    }
}

impl SlotClaims for FilesystemSlotClaims {
    fn acquire(&self, ids: &BTreeSet<u32>) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        let (_, stale) = self.scan()?;
        for id in stale {
            tracing::warn!(slot = id, "removing stale slot claim");
            self.remove(id)?;
        }

        let mut created = Vec::new();
        let mut overlap = Vec::new();
        for &id in ids {
            let opened = OpenOptions::new().write(true).create_new(true).open(self.slot_path(id));
            match opened {
                Ok(mut file) => {
                    created.push(id);
                    if let Err(err) = writeln!(file, "{}", std::process::id()) {
                        self.rollback(&created);
                        return Err(err.into());
                    }
                }
                Err(err) if err.kind() == ErrorKind::AlreadyExists => overlap.push(id),
                Err(err) => {
                    self.rollback(&created);
                    return Err(err.into());
                }
            }
        }

        if !overlap.is_empty() {
            self.rollback(&created);
            return Err(AppError::GenerationInFlight { slots: overlap });
        }
        Ok(())
    }

    fn release(&self, ids: &BTreeSet<u32>) -> Result<(), AppError> {
        for &id in ids {
            self.remove(id)?;
        }
        Ok(())
    }

    fn held(&self) -> Result<BTreeSet<u32>, AppError> {
        Ok(self.scan()?.0)
    }
}

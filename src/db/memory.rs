use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound::{Excluded, Unbounded};
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace};

use super::{DbRow, LeagueDb};
use crate::error::LeagueError;

type Table = BTreeMap<String, String>;

/// Process-local store. Used by tests and `--db-name :memory:` runs.
#[derive(Debug)]
pub struct MemoryDb {
    tables: RwLock<HashMap<String, Table>>,
    online: AtomicBool,
}

impl Default for MemoryDb {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDb {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }

    /// Simulate the server going away (or coming back).
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    #[must_use]
    pub fn len(&self, command: &str) -> usize {
        self.tables
            .read()
            .map(|t| t.get(command).map_or(0, BTreeMap::len))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables
            .read()
            .map(|t| t.values().all(BTreeMap::is_empty))
            .unwrap_or(true)
    }

    fn check_online(&self) -> Result<(), LeagueError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(LeagueError::CollaboratorUnavailable(
                "memory db is offline".to_string(),
            ))
        }
    }
}

#[async_trait]
impl LeagueDb for MemoryDb {
    async fn next(&self, command: &str, after_key: &str) -> Result<Option<DbRow>, LeagueError> {
        self.check_online()?;
        let tables = self
            .tables
            .read()
            .map_err(|e| LeagueError::Db(e.to_string()))?;
        let row = tables.get(command).and_then(|table| {
            table
                .range::<str, _>((Excluded(after_key), Unbounded))
                .next()
                .map(|(key, value)| DbRow {
                    key: key.clone(),
                    value: value.clone(),
                })
        });
        trace!(command, after_key, found = row.is_some(), "next");
        Ok(row)
    }

    async fn put(&self, command: &str, key: &str, value: &str) -> Result<(), LeagueError> {
        self.check_online()?;
        let mut tables = self
            .tables
            .write()
            .map_err(|e| LeagueError::Db(e.to_string()))?;
        tables
            .entry(command.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        debug!(command, key, "put");
        Ok(())
    }

    async fn ready(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }

    async fn reset(&self) -> Result<(), LeagueError> {
        self.set_online(true);
        Ok(())
    }
}

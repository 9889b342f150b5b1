//! The database client the record layer talks to.
//!
//! Records are stored as `(command, key) -> line` where the line is a
//! wire-encoded record. The store only has to hand rows back in key order.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryDb;
pub use sqlite::SqliteDb;

use async_trait::async_trait;

use crate::error::LeagueError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbRow {
    pub key: String,
    pub value: String,
}

#[async_trait]
pub trait LeagueDb: Send + Sync {
    /// First row of `command` whose key sorts strictly after `after_key`, or
    /// `None` at the end of the scan. Pass `""` to start from the top.
    async fn next(&self, command: &str, after_key: &str) -> Result<Option<DbRow>, LeagueError>;

    /// Insert or replace one row.
    async fn put(&self, command: &str, key: &str, value: &str) -> Result<(), LeagueError>;

    /// Whether requests can be served right now.
    async fn ready(&self) -> bool;

    /// Drop the current connection and open a fresh one.
    async fn reset(&self) -> Result<(), LeagueError>;
}

/// Fail up front when the database is not answering.
///
/// # Errors
///
/// Will return `Err` if the database reports it is not ready
pub async fn ensure_ready(db: &dyn LeagueDb) -> Result<(), LeagueError> {
    if db.ready().await {
        Ok(())
    } else {
        Err(LeagueError::CollaboratorUnavailable(
            "the league database is offline".to_string(),
        ))
    }
}

/// Look up one row by exact key.
///
/// # Errors
///
/// Will return `Err` if the scan fails
pub async fn get(db: &dyn LeagueDb, command: &str, key: &str) -> Result<Option<String>, LeagueError> {
    let after = key_before(key);
    match db.next(command, &after).await? {
        Some(row) if row.key == key => Ok(Some(row.value)),
        _ => Ok(None),
    }
}

/// Every row of `command` whose key starts with `prefix`, in key order.
///
/// # Errors
///
/// Will return `Err` if the scan fails
pub async fn scan_prefix(
    db: &dyn LeagueDb,
    command: &str,
    prefix: &str,
) -> Result<Vec<DbRow>, LeagueError> {
    let mut rows = Vec::new();
    let mut after = key_before(prefix);
    while let Some(row) = db.next(command, &after).await? {
        if !row.key.starts_with(prefix) {
            break;
        }
        after.clone_from(&row.key);
        rows.push(row);
    }
    Ok(rows)
}

/// A string that sorts just below `key`. Keys are ASCII ids, so stepping the
/// last char down by one and padding with the highest char leaves no room for
/// a real key in between.
fn key_before(key: &str) -> String {
    let mut chars = key.chars();
    let Some(last) = chars.next_back() else {
        return String::new();
    };
    let mut before = chars.as_str().to_string();
    if let Some(prev) = u32::from(last).checked_sub(1).and_then(char::from_u32) {
        before.push(prev);
        before.push(char::MAX);
    }
    before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_before_sorts_before() {
        for key in ["C0001", "C0001:", "A", "E0010"] {
            let before = key_before(key);
            assert!(before.as_str() < key, "{before:?} should sort before {key}");
        }
        assert_eq!(key_before(""), "");
    }

    #[test]
    fn test_key_before_has_no_gap() {
        let before = key_before("C0002");
        assert!("C0001:01".to_string() < before);
        assert!(before.as_str() < "C0002");
    }
}

use ::function_name::named;
use actix_web::web;
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace, warn};

use super::{DbRow, LeagueDb};
use crate::error::LeagueError;

const SCHEMA: &str = include_str!("../sql/schema/sqlite/00_records.sql");

/// Single-file sqlite store. Statements run on the blocking thread pool and
/// take the connection lock for the length of one statement.
#[derive(Debug, Clone)]
pub struct SqliteDb {
    path: String,
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDb {
    /// Open (creating if needed) the database at `path`. `:memory:` gives a
    /// private in-memory database.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file cannot be opened or the schema cannot be created
    pub fn open(path: &str) -> Result<Self, LeagueError> {
        let conn = connect(path)?;
        Ok(Self {
            path: path.to_string(),
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `work` against the connection off the async executor.
    async fn blocking<R, F>(&self, work: F) -> Result<R, LeagueError>
    where
        F: FnOnce(&Mutex<Connection>) -> Result<R, LeagueError> + Send + 'static,
        R: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        web::block(move || work(&*conn))
            .await
            .map_err(|e| LeagueError::Db(format!("sqlite worker failed: {e}")))?
    }
}

fn connect(path: &str) -> Result<Connection, LeagueError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, LeagueError> {
    conn.lock()
        .map_err(|e| LeagueError::Db(format!("connection lock poisoned: {e}")))
}

#[named]
fn next_row(conn: &Mutex<Connection>, command: &str, after_key: &str) -> Result<Option<DbRow>, LeagueError> {
    let conn = lock(conn)?;
    let row = conn
        .query_row(
            "SELECT key, value FROM records WHERE command = ?1 AND key > ?2 ORDER BY key LIMIT 1",
            params![command, after_key],
            |r| {
                Ok(DbRow {
                    key: r.get(0)?,
                    value: r.get(1)?,
                })
            },
        )
        .optional()?;
    trace!(
        func = function_name!(),
        command,
        after_key,
        found = row.is_some()
    );
    Ok(row)
}

#[named]
fn put_row(conn: &Mutex<Connection>, command: &str, key: &str, value: &str) -> Result<(), LeagueError> {
    let conn = lock(conn)?;
    conn.execute(
        "INSERT INTO records (command, key, value) VALUES (?1, ?2, ?3)
         ON CONFLICT(command, key) DO UPDATE SET value = excluded.value",
        params![command, key, value],
    )?;
    debug!(func = function_name!(), command, key);
    Ok(())
}

fn ping(conn: &Mutex<Connection>) -> Result<(), LeagueError> {
    lock(conn)?.query_row("SELECT 1", [], |r| r.get::<_, i64>(0))?;
    Ok(())
}

#[named]
fn reconnect(conn: &Mutex<Connection>, path: &str) -> Result<(), LeagueError> {
    // a fresh :memory: connection would be an empty database
    if path == ":memory:" {
        return Ok(());
    }
    let fresh = connect(path)?;
    *lock(conn)? = fresh;
    debug!(func = function_name!(), path, "reconnected");
    Ok(())
}

#[async_trait]
impl LeagueDb for SqliteDb {
    async fn next(&self, command: &str, after_key: &str) -> Result<Option<DbRow>, LeagueError> {
        let (command, after_key) = (command.to_string(), after_key.to_string());
        self.blocking(move |conn| next_row(conn, &command, &after_key))
            .await
    }

    async fn put(&self, command: &str, key: &str, value: &str) -> Result<(), LeagueError> {
        let (command, key, value) = (command.to_string(), key.to_string(), value.to_string());
        self.blocking(move |conn| put_row(conn, &command, &key, &value))
            .await
    }

    async fn ready(&self) -> bool {
        match self.blocking(ping).await {
            Ok(()) => true,
            Err(e) => {
                warn!("sqlite not ready: {e}");
                false
            }
        }
    }

    async fn reset(&self) -> Result<(), LeagueError> {
        let path = self.path.clone();
        self.blocking(move |conn| reconnect(conn, &path)).await
    }
}

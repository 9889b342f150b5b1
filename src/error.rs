use crate::model::validator::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LeagueError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("malformed wire line: {0}")]
    MalformedWireLine(String),
    #[error("database unavailable: {0}")]
    CollaboratorUnavailable(String),
    #[error("db error: {0}")]
    Db(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Other(String),
}

impl From<rusqlite::Error> for LeagueError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<String> for LeagueError {
    fn from(err: String) -> Self {
        Self::Parse(err)
    }
}

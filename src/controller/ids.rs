use tracing::debug;

use crate::db::{LeagueDb, ensure_ready};
use crate::error::LeagueError;
use crate::model::id::{IdPrefix, RecordId};

/// First free id for `command`: the suffix right after the first break in the
/// sorted run of existing keys, or one past the last key, or `1` for an empty
/// table. Keys that are not ids of this prefix are skipped.
///
/// # Errors
///
/// Will return `Err` if the database is offline, a scan fails, or every
/// four-digit suffix is already taken
pub async fn next_free_id(
    db: &dyn LeagueDb,
    command: &str,
    prefix: IdPrefix,
) -> Result<RecordId, LeagueError> {
    ensure_ready(db).await?;

    let mut previous = 0u32;
    let mut after = String::new();
    while let Some(row) = db.next(command, &after).await? {
        after = row.key;
        let Some(id) = RecordId::new(&after) else {
            continue;
        };
        if id.letter() != prefix.letter() {
            continue;
        }
        if id.suffix() != previous + 1 {
            break;
        }
        previous = id.suffix();
    }

    let id = RecordId::from_parts(prefix, previous + 1).ok_or_else(|| {
        LeagueError::Other(format!("no free {} ids left in {command}", prefix.letter()))
    })?;
    debug!(command, %id, "next free id");
    Ok(id)
}

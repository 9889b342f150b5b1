//! Wire line codec for hole records.
//!
//! A line is the record's title token (titled formats only) followed by one
//! token per hole, in hole order.

pub mod tokenizer;

pub use tokenizer::{TokenizeError, add_quotes, tokenize};

use std::sync::Arc;
use tracing::trace;

use crate::error::LeagueError;
use crate::model::format::{HOLE_COUNT, HoleFormat};
use crate::model::hole::HoleRecord;
use crate::model::policy::{HoleKind, HolePolicy};

/// Build a record from a wire line.
///
/// # Errors
///
/// Will return `Err` if the quoting is broken, a titled line has no title, or
/// the hole count is wrong for the policy. Lenient policies accept a short
/// line and default-fill the remaining holes.
pub fn decode(
    kind: HoleKind,
    format: HoleFormat,
    policy: Arc<dyn HolePolicy>,
    line: &str,
) -> Result<HoleRecord, LeagueError> {
    let mut tokens =
        tokenize(line).map_err(|e| LeagueError::MalformedWireLine(format!("{kind}: {e}")))?;
    let title = if format.has_title() {
        if tokens.is_empty() {
            return Err(LeagueError::MalformedWireLine(format!(
                "{kind}: missing title"
            )));
        }
        Some(tokens.remove(0))
    } else {
        None
    };

    let count = tokens.len();
    if count > HOLE_COUNT || (count < HOLE_COUNT && policy.tokens_required()) {
        return Err(LeagueError::MalformedWireLine(format!(
            "{kind}: Invalid hole count: expected {HOLE_COUNT}, found {count}"
        )));
    }
    trace!(%kind, count, "decoded hole line");

    let record = HoleRecord::with_policy(kind, format, policy, Some(tokens.as_slice()));
    Ok(match title {
        Some(title) => record.with_title(title),
        None => record,
    })
}

/// Inverse of [`decode`]: title (if the format has one) then 18 hole tokens.
#[must_use]
pub fn encode(record: &HoleRecord) -> String {
    let mut tokens = Vec::with_capacity(record.format().token_count());
    if record.format().has_title() {
        tokens.push(add_quotes(record.title()));
    }
    tokens.extend(record.values().into_iter().map(add_quotes));
    tokens.join(" ")
}

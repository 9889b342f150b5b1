use std::{fs, path::Path, path::PathBuf};

use crate::controller::prefill::PrefillFile;
use crate::model::HOLE_COUNT;

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The file '{file}' is not readable."));
    }
    Ok(path)
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not a valid prefill file
pub fn check_readable_file_and_json(file: &str) -> Result<PrefillFile, String> {
    let path = check_readable_file(file)?;
    load_prefill(&path)
}

/// # Errors
///
/// Will return `Err` if the file cannot be read, is not valid json, or is not
/// in the prefill format
pub fn load_prefill(path: &Path) -> Result<PrefillFile, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("The json file '{}' is not readable: {e}", path.display()))?;
    let seed: PrefillFile = serde_json::from_str(&contents).map_err(|e| {
        format!(
            "The json file '{}' is not in the correct format: {e}",
            path.display()
        )
    })?;
    validate_prefill(&seed)?;
    Ok(seed)
}

/// Shape checks that serde cannot express. Values themselves are checked by
/// the hole records when the seed is stored.
/// format we expect is this:
/// { "courses": [{ "name": "Pine Valley", "pars": [4, 3, ...], "men_handicap": [...],
///   "women_handicap": [...], "teeboxes": [{ "name": "Blue", "yardage": [412, ...] }] }],
///   "events": [{ "name": "Spring Opener", "date": "2026-04-12", "course": 1,
///   "long_drive": [9], "closest_to_pin": [3, 12] }],
///   "players": ["Ann"], "scorecards": [{ "event": 1, "player": 1, "strokes": [5, 4, ...] }] }
///
/// # Errors
///
/// Will return `Err` if a hole list is longer than 18 or an event names a
/// course that is not in the file, or a scorecard names a missing event or player
fn validate_prefill(seed: &PrefillFile) -> Result<(), String> {
    for course in &seed.courses {
        let lists = [
            ("holes", course.holes.as_ref()),
            ("pars", course.pars.as_ref()),
            ("men_handicap", course.men_handicap.as_ref()),
            ("women_handicap", course.women_handicap.as_ref()),
        ];
        for (key, list) in lists {
            if list.is_some_and(|l| l.len() != HOLE_COUNT) {
                return Err(format!(
                    "The json key {key} of course '{}' must have exactly {HOLE_COUNT} entries.",
                    course.name
                ));
            }
        }
        for tee in &course.teeboxes {
            if tee.yardage.len() != HOLE_COUNT {
                return Err(format!(
                    "The json key yardage of teebox '{}' must have exactly {HOLE_COUNT} entries.",
                    tee.name
                ));
            }
        }
    }
    for event in &seed.events {
        if event.course == 0 || event.course > seed.courses.len() {
            return Err(format!(
                "The json key course of event '{}' must be between 1 and {}.",
                event.name,
                seed.courses.len()
            ));
        }
        let holes = event.long_drive.iter().chain(event.closest_to_pin.iter());
        for hole in holes {
            if *hole == 0 || *hole > HOLE_COUNT {
                return Err(format!(
                    "The json key long_drive/closest_to_pin of event '{}' has hole {hole}, expected 1 to {HOLE_COUNT}.",
                    event.name
                ));
            }
        }
    }
    for (idx, card) in seed.scorecards.iter().enumerate() {
        if card.event == 0 || card.event > seed.events.len() {
            return Err(format!(
                "The json key event of scorecard {} must be between 1 and {}.",
                idx + 1,
                seed.events.len()
            ));
        }
        if card.player == 0 || card.player > seed.players.len() {
            return Err(format!(
                "The json key player of scorecard {} must be between 1 and {}.",
                idx + 1,
                seed.players.len()
            ));
        }
        if card.strokes.len() > HOLE_COUNT {
            return Err(format!(
                "The json key strokes of scorecard {} has more than {HOLE_COUNT} entries.",
                idx + 1
            ));
        }
    }
    Ok(())
}

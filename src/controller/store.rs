use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::codec::{add_quotes, tokenize};
use crate::controller::ids::next_free_id;
use crate::db::{self, LeagueDb, ensure_ready};
use crate::error::LeagueError;
use crate::model::validator::{LogValidator, MessageValidator, Validator};
use crate::model::{Course, Event, HoleKind, HoleRecord, IdPrefix, Player, RecordId, Scorecard};

pub const COURSE: &str = "COURSE";
pub const COURSE_HOLES: &str = "COURSE_HOLES";
pub const COURSE_PARS: &str = "COURSE_PARS";
pub const COURSE_HCP_M: &str = "COURSE_HCP_M";
pub const COURSE_HCP_W: &str = "COURSE_HCP_W";
pub const COURSE_TEE: &str = "COURSE_TEE";
pub const EVENT: &str = "EVENT";
pub const EVENT_LD: &str = "EVENT_LD";
pub const EVENT_CTP: &str = "EVENT_CTP";
pub const PLAYER: &str = "PLAYER";
pub const SCORECARD: &str = "SCORECARD";
pub const SCORECARD_HOLES: &str = "SCORECARD_HOLES";

/// Command a record kind is stored under.
#[must_use]
pub fn command_for(kind: HoleKind) -> &'static str {
    match kind {
        HoleKind::HoleNumbers => COURSE_HOLES,
        HoleKind::Pars => COURSE_PARS,
        HoleKind::MenHandicap => COURSE_HCP_M,
        HoleKind::WomenHandicap => COURSE_HCP_W,
        HoleKind::Yardage => COURSE_TEE,
        HoleKind::LongDrive => EVENT_LD,
        HoleKind::ClosestToPin => EVENT_CTP,
        HoleKind::Strokes => SCORECARD_HOLES,
    }
}

fn teebox_key(id: &RecordId, tee: usize) -> String {
    format!("{id}:{tee:02}")
}

/// Slot number after the `:` of a teebox key.
fn teebox_slot(key: &str) -> Option<usize> {
    key.rsplit_once(':').and_then(|(_, slot)| slot.parse().ok())
}

/// Write `value` unless the stored line already says the same.
async fn put_if_changed(
    db: &dyn LeagueDb,
    command: &str,
    key: &str,
    value: &str,
) -> Result<(), LeagueError> {
    if db::get(db, command, key).await?.as_deref() == Some(value) {
        return Ok(());
    }
    db.put(command, key, value).await
}

/// Put a record line when it is new to the database or was edited since load.
async fn put_record(
    db: &dyn LeagueDb,
    key: &str,
    record: &HoleRecord,
    fresh: bool,
) -> Result<(), LeagueError> {
    if fresh || record.is_changed() {
        db.put(command_for(record.kind()), key, &record.encode())
            .await?;
    }
    Ok(())
}

/// Run `check` through a message validator and turn a rejection into an error.
fn gate(check: impl FnOnce(&mut dyn Validator) -> bool) -> Result<(), LeagueError> {
    let mut validator = MessageValidator::new();
    if check(&mut validator) {
        return Ok(());
    }
    Err(match validator.error() {
        Some(err) => LeagueError::Validation(err.clone()),
        None => LeagueError::Other("record rejected".to_string()),
    })
}

async fn load_record(
    db: &dyn LeagueDb,
    kind: HoleKind,
    key: &str,
) -> Result<HoleRecord, LeagueError> {
    let Some(line) = db::get(db, command_for(kind), key).await? else {
        return Ok(HoleRecord::new(kind, kind.default_format()));
    };
    let record = HoleRecord::decode(kind, kind.default_format(), &line)?;
    // stored lines are loaded even when they no longer pass; just say so
    record.is_valid(&mut LogValidator);
    Ok(record)
}

/// # Errors
///
/// Will return `Err` if the database is offline, the course does not exist,
/// or one of its fixed records is malformed. Unreadable teeboxes are logged
/// and left out.
pub async fn load_course(db: &dyn LeagueDb, id: &RecordId) -> Result<Course, LeagueError> {
    ensure_ready(db).await?;
    let header = db::get(db, COURSE, id.value())
        .await?
        .ok_or_else(|| LeagueError::NotFound(format!("course {id}")))?;
    let name = tokenize(&header)
        .map_err(|e| LeagueError::MalformedWireLine(format!("{COURSE} {id}: {e}")))?
        .into_iter()
        .next()
        .unwrap_or_default();

    let mut course = Course::new(id.clone(), name);
    course.holes = load_record(db, HoleKind::HoleNumbers, id.value()).await?;
    course.pars = load_record(db, HoleKind::Pars, id.value()).await?;
    course.men_handicap = load_record(db, HoleKind::MenHandicap, id.value()).await?;
    course.women_handicap = load_record(db, HoleKind::WomenHandicap, id.value()).await?;
    for row in db::scan_prefix(db, COURSE_TEE, &format!("{id}:")).await? {
        // blank rows are teeboxes that were removed
        if row.value.trim().is_empty() {
            continue;
        }
        let Some(slot) = teebox_slot(&row.key) else {
            warn!(key = %row.key, "skipping teebox with a bad key");
            continue;
        };
        match HoleRecord::decode(
            HoleKind::Yardage,
            HoleKind::Yardage.default_format(),
            &row.value,
        ) {
            Ok(tee) => {
                tee.is_valid(&mut LogValidator);
                course.push_stored_teebox(slot, tee);
            }
            Err(e) => warn!(key = %row.key, "skipping unreadable teebox: {e}"),
        }
    }
    debug!(%id, teeboxes = course.teeboxes.len(), "loaded course");
    Ok(course)
}

/// Only lines that are new or edited are put, so two sessions editing
/// different records of one course both keep their edits.
async fn write_course(db: &dyn LeagueDb, course: &mut Course, fresh: bool) -> Result<(), LeagueError> {
    let id = course.id.clone();
    let header = add_quotes(&course.name);
    if fresh {
        db.put(COURSE, id.value(), &header).await?;
    } else {
        put_if_changed(db, COURSE, id.value(), &header).await?;
    }
    for record in [
        &course.holes,
        &course.pars,
        &course.men_handicap,
        &course.women_handicap,
    ] {
        put_record(db, id.value(), record, fresh).await?;
    }

    let stored = db::scan_prefix(db, COURSE_TEE, &format!("{id}:")).await?;
    let mut next_slot = stored
        .iter()
        .filter_map(|row| teebox_slot(&row.key))
        .chain((0..course.teeboxes.len()).filter_map(|idx| course.tee_slot(idx)))
        .max()
        .unwrap_or(0);
    let mut kept = Vec::with_capacity(course.teeboxes.len());
    let mut slots = Vec::with_capacity(course.teeboxes.len());
    for (idx, tee) in std::mem::take(&mut course.teeboxes).into_iter().enumerate() {
        let slot = course.tee_slot(idx);
        match (tee.is_removed(), slot) {
            (true, Some(slot)) => {
                db.put(COURSE_TEE, &teebox_key(&id, slot), "").await?;
                continue;
            }
            (true, None) => continue,
            (false, Some(slot)) => {
                if fresh || tee.is_changed() {
                    db.put(COURSE_TEE, &teebox_key(&id, slot), &tee.encode())
                        .await?;
                }
                slots.push(Some(slot));
            }
            (false, None) => {
                next_slot += 1;
                db.put(COURSE_TEE, &teebox_key(&id, next_slot), &tee.encode())
                    .await?;
                slots.push(Some(next_slot));
            }
        }
        kept.push(tee);
    }
    course.teeboxes = kept;
    course.set_tee_slots(slots);

    for record in course.records_mut() {
        record.mark_saved();
    }
    info!(%id, name = %course.name, "saved course");
    Ok(())
}

/// Reconcile, validate, then persist. Nothing is written when any record
/// is rejected.
///
/// # Errors
///
/// Will return `Err` if the database is offline, a record is invalid, or a write fails
pub async fn save_course(db: &dyn LeagueDb, course: &mut Course) -> Result<(), LeagueError> {
    ensure_ready(db).await?;
    course.update();
    course.drop_unsaved_removed();
    gate(|v| course.is_valid(v))?;
    write_course(db, course, false).await
}

/// Give `course` the next free course id and persist it.
///
/// # Errors
///
/// Will return `Err` if the database is offline, a record is invalid, or a write fails
pub async fn add_course(db: &dyn LeagueDb, course: &mut Course) -> Result<RecordId, LeagueError> {
    ensure_ready(db).await?;
    course.update();
    course.drop_unsaved_removed();
    gate(|v| course.is_valid(v))?;
    course.id = next_free_id(db, COURSE, IdPrefix::Course).await?;
    course.set_tee_slots(Vec::new());
    write_course(db, course, true).await?;
    Ok(course.id.clone())
}

/// Ids and names of every stored course, in id order.
///
/// # Errors
///
/// Will return `Err` if the database is offline or a scan fails
pub async fn list_courses(db: &dyn LeagueDb) -> Result<Vec<(RecordId, String)>, LeagueError> {
    ensure_ready(db).await?;
    let mut courses = Vec::new();
    for row in db::scan_prefix(db, COURSE, "").await? {
        let Some(id) = RecordId::new(&row.key) else {
            continue;
        };
        let name = tokenize(&row.value)
            .ok()
            .and_then(|t| t.into_iter().next())
            .unwrap_or_default();
        courses.push((id, name));
    }
    Ok(courses)
}

fn parse_event_header(id: &RecordId, line: &str) -> Result<(String, NaiveDate, RecordId), LeagueError> {
    let malformed = |why: String| LeagueError::MalformedWireLine(format!("{EVENT} {id}: {why}"));
    let tokens = tokenize(line).map_err(|e| malformed(e.to_string()))?;
    let [name, date, course] = tokens.as_slice() else {
        return Err(malformed(format!("expected 3 tokens, found {}", tokens.len())));
    };
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| malformed(e.to_string()))?;
    let course = RecordId::parse(course).map_err(malformed)?;
    Ok((name.clone(), date, course))
}

/// # Errors
///
/// Will return `Err` if the database is offline, the event does not exist,
/// or one of its lines is malformed
pub async fn load_event(db: &dyn LeagueDb, id: &RecordId) -> Result<Event, LeagueError> {
    ensure_ready(db).await?;
    let header = db::get(db, EVENT, id.value())
        .await?
        .ok_or_else(|| LeagueError::NotFound(format!("event {id}")))?;
    let (name, date, course) = parse_event_header(id, &header)?;
    let mut event = Event::new(id.clone(), name, date, course);
    event.long_drive = load_record(db, HoleKind::LongDrive, id.value()).await?;
    event.closest_to_pin = load_record(db, HoleKind::ClosestToPin, id.value()).await?;
    Ok(event)
}

async fn write_event(db: &dyn LeagueDb, event: &mut Event, fresh: bool) -> Result<(), LeagueError> {
    if db::get(db, COURSE, event.course.value()).await?.is_none() {
        return Err(LeagueError::NotFound(format!("course {}", event.course)));
    }
    let header = format!(
        "{} {} {}",
        add_quotes(&event.name),
        event.date.format("%Y-%m-%d"),
        event.course
    );
    if fresh {
        db.put(EVENT, event.id.value(), &header).await?;
    } else {
        put_if_changed(db, EVENT, event.id.value(), &header).await?;
    }
    put_record(db, event.id.value(), &event.long_drive, fresh).await?;
    put_record(db, event.id.value(), &event.closest_to_pin, fresh).await?;
    event.long_drive.mark_saved();
    event.closest_to_pin.mark_saved();
    info!(id = %event.id, name = %event.name, "saved event");
    Ok(())
}

/// # Errors
///
/// Will return `Err` if the database is offline, a record is invalid, the
/// course is unknown, or a write fails
pub async fn save_event(db: &dyn LeagueDb, event: &mut Event) -> Result<(), LeagueError> {
    ensure_ready(db).await?;
    event.update();
    gate(|v| event.is_valid(v))?;
    write_event(db, event, false).await
}

/// Give `event` the next free event id and persist it.
///
/// # Errors
///
/// Will return `Err` if the database is offline, a record is invalid, the
/// course is unknown, or a write fails
pub async fn add_event(db: &dyn LeagueDb, event: &mut Event) -> Result<RecordId, LeagueError> {
    ensure_ready(db).await?;
    event.update();
    gate(|v| event.is_valid(v))?;
    event.id = next_free_id(db, EVENT, IdPrefix::Event).await?;
    write_event(db, event, true).await?;
    Ok(event.id.clone())
}

/// # Errors
///
/// Will return `Err` if the database is offline or the player does not exist
pub async fn load_player(db: &dyn LeagueDb, id: &RecordId) -> Result<Player, LeagueError> {
    ensure_ready(db).await?;
    let line = db::get(db, PLAYER, id.value())
        .await?
        .ok_or_else(|| LeagueError::NotFound(format!("player {id}")))?;
    let name = tokenize(&line)
        .map_err(|e| LeagueError::MalformedWireLine(format!("{PLAYER} {id}: {e}")))?
        .into_iter()
        .next()
        .unwrap_or_default();
    Ok(Player::new(id.clone(), name))
}

/// Give `player` the next free player id and persist it.
///
/// # Errors
///
/// Will return `Err` if the database is offline, the name is blank, or a write fails
pub async fn add_player(db: &dyn LeagueDb, player: &mut Player) -> Result<RecordId, LeagueError> {
    ensure_ready(db).await?;
    gate(|v| player.is_valid(v))?;
    player.id = next_free_id(db, PLAYER, IdPrefix::Player).await?;
    db.put(PLAYER, player.id.value(), &add_quotes(&player.name))
        .await?;
    info!(id = %player.id, name = %player.name, "added player");
    Ok(player.id.clone())
}

fn parse_scorecard_header(id: &RecordId, line: &str) -> Result<(RecordId, RecordId), LeagueError> {
    let malformed = |why: String| LeagueError::MalformedWireLine(format!("{SCORECARD} {id}: {why}"));
    let tokens = tokenize(line).map_err(|e| malformed(e.to_string()))?;
    let [player, event] = tokens.as_slice() else {
        return Err(malformed(format!("expected 2 tokens, found {}", tokens.len())));
    };
    Ok((
        RecordId::parse(player).map_err(malformed)?,
        RecordId::parse(event).map_err(malformed)?,
    ))
}

/// # Errors
///
/// Will return `Err` if the database is offline, the scorecard does not
/// exist, or one of its lines is malformed
pub async fn load_scorecard(db: &dyn LeagueDb, id: &RecordId) -> Result<Scorecard, LeagueError> {
    ensure_ready(db).await?;
    let header = db::get(db, SCORECARD, id.value())
        .await?
        .ok_or_else(|| LeagueError::NotFound(format!("scorecard {id}")))?;
    let (player, event) = parse_scorecard_header(id, &header)?;
    let mut card = Scorecard::new(id.clone(), event, player);
    card.strokes = load_record(db, HoleKind::Strokes, id.value()).await?;
    Ok(card)
}

async fn write_scorecard(db: &dyn LeagueDb, card: &mut Scorecard, fresh: bool) -> Result<(), LeagueError> {
    if db::get(db, EVENT, card.event.value()).await?.is_none() {
        return Err(LeagueError::NotFound(format!("event {}", card.event)));
    }
    if db::get(db, PLAYER, card.player.value()).await?.is_none() {
        return Err(LeagueError::NotFound(format!("player {}", card.player)));
    }
    let header = format!("{} {}", card.player, card.event);
    if fresh {
        db.put(SCORECARD, card.id.value(), &header).await?;
    } else {
        put_if_changed(db, SCORECARD, card.id.value(), &header).await?;
    }
    put_record(db, card.id.value(), &card.strokes, fresh).await?;
    card.strokes.mark_saved();
    info!(id = %card.id, player = %card.player, event = %card.event, "saved scorecard");
    Ok(())
}

/// # Errors
///
/// Will return `Err` if the database is offline, a stroke is invalid, the
/// event or player is unknown, or a write fails
pub async fn save_scorecard(db: &dyn LeagueDb, card: &mut Scorecard) -> Result<(), LeagueError> {
    ensure_ready(db).await?;
    card.update();
    gate(|v| card.is_valid(v))?;
    write_scorecard(db, card, false).await
}

/// Give `card` the next free scorecard id and persist it.
///
/// # Errors
///
/// Will return `Err` if the database is offline, a stroke is invalid, the
/// event or player is unknown, or a write fails
pub async fn add_scorecard(db: &dyn LeagueDb, card: &mut Scorecard) -> Result<RecordId, LeagueError> {
    ensure_ready(db).await?;
    card.update();
    gate(|v| card.is_valid(v))?;
    card.id = next_free_id(db, SCORECARD, IdPrefix::Scorecard).await?;
    write_scorecard(db, card, true).await?;
    Ok(card.id.clone())
}

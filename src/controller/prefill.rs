use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::controller::store::{add_course, add_event, add_player, add_scorecard};
use crate::db::LeagueDb;
use crate::model::{
    Course, Event, HoleFormat, HoleKind, HoleRecord, IdPrefix, Player, RecordId, Scorecard,
};

/// A cell may be written as a JSON number or a string.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Text(String),
}

impl Cell {
    fn text(&self) -> String {
        match self {
            Cell::Int(v) => v.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TeeboxSeed {
    pub name: String,
    pub yardage: Vec<Cell>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CourseSeed {
    pub name: String,
    #[serde(default)]
    pub holes: Option<Vec<Cell>>,
    #[serde(default)]
    pub pars: Option<Vec<Cell>>,
    #[serde(default)]
    pub men_handicap: Option<Vec<Cell>>,
    #[serde(default)]
    pub women_handicap: Option<Vec<Cell>>,
    #[serde(default)]
    pub teeboxes: Vec<TeeboxSeed>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EventSeed {
    pub name: String,
    pub date: NaiveDate,
    /// 1-based position of the course in the same file.
    pub course: usize,
    /// Hole numbers flagged for the long-drive contest.
    #[serde(default)]
    pub long_drive: Vec<usize>,
    #[serde(default)]
    pub closest_to_pin: Vec<usize>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScorecardSeed {
    /// 1-based positions of the event and player in the same file.
    pub event: usize,
    pub player: usize,
    /// Blank or missing trailing entries are holes not yet played.
    #[serde(default)]
    pub strokes: Vec<Cell>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct PrefillFile {
    #[serde(default)]
    pub courses: Vec<CourseSeed>,
    #[serde(default)]
    pub events: Vec<EventSeed>,
    /// Player names.
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub scorecards: Vec<ScorecardSeed>,
}

fn seeded(kind: HoleKind, format: HoleFormat, cells: Option<&Vec<Cell>>) -> HoleRecord {
    let source: Option<Vec<String>> = cells.map(|c| c.iter().map(Cell::text).collect());
    HoleRecord::create(kind, format, source.as_deref())
}

fn flagged(kind: HoleKind, holes: &[usize]) -> HoleRecord {
    let mut record = HoleRecord::new(kind, kind.default_format());
    let surface = record.bind();
    for hole in holes {
        surface.set_hole(*hole, "1");
    }
    record.update();
    record.unbind();
    record
}

fn placeholder(prefix: IdPrefix) -> Result<RecordId> {
    RecordId::from_parts(prefix, 0).ok_or_else(|| anyhow!("bad placeholder id"))
}

fn nth<'a>(ids: &'a [RecordId], pos: usize, what: &str) -> Result<&'a RecordId> {
    pos.checked_sub(1)
        .and_then(|idx| ids.get(idx))
        .ok_or_else(|| anyhow!("scorecard names {what} {pos} which is not in the file"))
}

/// Create every course, event, player and scorecard in `seed`, in file order.
///
/// # Errors
///
/// Will return `Err` at the first course or event that cannot be stored;
/// anything before it stays written
pub async fn db_prefill(seed: &PrefillFile, db: &dyn LeagueDb) -> Result<Vec<RecordId>> {
    let mut course_ids = Vec::with_capacity(seed.courses.len());
    let mut event_ids = Vec::with_capacity(seed.events.len());
    let mut created = Vec::new();

    for entry in &seed.courses {
        let mut course = Course::new(placeholder(IdPrefix::Course)?, entry.name.clone());
        course.holes = seeded(HoleKind::HoleNumbers, HoleFormat::Bare, entry.holes.as_ref());
        course.pars = seeded(HoleKind::Pars, HoleFormat::Totals, entry.pars.as_ref());
        course.men_handicap = seeded(
            HoleKind::MenHandicap,
            HoleFormat::Bare,
            entry.men_handicap.as_ref(),
        );
        course.women_handicap = seeded(
            HoleKind::WomenHandicap,
            HoleFormat::Bare,
            entry.women_handicap.as_ref(),
        );
        for tee in &entry.teeboxes {
            let record = seeded(
                HoleKind::Yardage,
                HoleFormat::TitledTotals,
                Some(&tee.yardage),
            )
            .with_title(tee.name.clone());
            course.teeboxes.push(record);
        }
        let id = add_course(db, &mut course)
            .await
            .with_context(|| format!("prefill course '{}'", entry.name))?;
        info!(%id, name = %entry.name, "prefilled course");
        course_ids.push(id.clone());
        created.push(id);
    }

    for entry in &seed.events {
        let course = entry
            .course
            .checked_sub(1)
            .and_then(|idx| course_ids.get(idx))
            .ok_or_else(|| anyhow!("event '{}' names course {} which is not in the file", entry.name, entry.course))?;
        let mut event = Event::new(
            placeholder(IdPrefix::Event)?,
            entry.name.clone(),
            entry.date,
            course.clone(),
        );
        event.long_drive = flagged(HoleKind::LongDrive, &entry.long_drive);
        event.closest_to_pin = flagged(HoleKind::ClosestToPin, &entry.closest_to_pin);
        let id = add_event(db, &mut event)
            .await
            .with_context(|| format!("prefill event '{}'", entry.name))?;
        info!(%id, name = %entry.name, "prefilled event");
        event_ids.push(id.clone());
        created.push(id);
    }

    let mut player_ids = Vec::with_capacity(seed.players.len());
    for name in &seed.players {
        let mut player = Player::new(placeholder(IdPrefix::Player)?, name.clone());
        let id = add_player(db, &mut player)
            .await
            .with_context(|| format!("prefill player '{name}'"))?;
        player_ids.push(id.clone());
        created.push(id);
    }

    for entry in &seed.scorecards {
        let mut card = Scorecard::new(
            placeholder(IdPrefix::Scorecard)?,
            nth(&event_ids, entry.event, "event")?.clone(),
            nth(&player_ids, entry.player, "player")?.clone(),
        );
        card.strokes = seeded(HoleKind::Strokes, HoleFormat::Totals, Some(&entry.strokes));
        let id = add_scorecard(db, &mut card)
            .await
            .with_context(|| format!("prefill scorecard of player {}", card.player))?;
        info!(%id, player = %card.player, event = %card.event, "prefilled scorecard");
        created.push(id);
    }

    Ok(created)
}

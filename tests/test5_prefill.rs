use std::io::Write;

use golf_league::args::{Args, clean_args, validation::load_prefill};
use golf_league::controller::prefill::{PrefillFile, db_prefill};
use golf_league::controller::store::{
    COURSE, COURSE_TEE, EVENT, PLAYER, SCORECARD, load_course, load_event, load_player,
    load_scorecard,
};
use golf_league::db::{MemoryDb, SqliteDb};
use golf_league::model::{RecordId, Sigma};

#[tokio::test]
async fn test5_dbprefill() -> Result<(), Box<dyn std::error::Error>> {
    let db = MemoryDb::new();
    assert!(db.is_empty());

    let json: PrefillFile = serde_json::from_str(include_str!("test5_prefill.json"))?;
    let ids = db_prefill(&json, &db).await?;
    let ids: Vec<&str> = ids.iter().map(RecordId::value).collect();
    assert_eq!(ids, vec!["C0001", "C0002", "E0001", "P0001", "P0002", "S0001"]);

    assert_eq!(db.len(COURSE), 2);
    assert_eq!(db.len(COURSE_TEE), 2);
    assert_eq!(db.len(EVENT), 1);
    assert_eq!(db.len(PLAYER), 2);
    assert_eq!(db.len(SCORECARD), 1);

    let pine = load_course(&db, &RecordId::parse("C0001")?).await?;
    assert_eq!(pine.pars.sigma(Sigma::Total), Some(72));
    assert_eq!(pine.teeboxes[0].sigma(Sigma::Total), Some(6841));
    assert_eq!(pine.teeboxes[1].title(), "Red");
    assert_eq!(pine.women_handicap.value(5), Some("1"));

    let meadow = load_course(&db, &RecordId::parse("C0002")?).await?;
    assert_eq!(meadow.holes.value(10), Some("1"));
    assert!(meadow.men_handicap.is_default());
    assert!(meadow.teeboxes.is_empty());

    let opener = load_event(&db, &RecordId::parse("E0001")?).await?;
    assert_eq!(opener.course.value(), "C0001");
    assert_eq!(opener.long_drive.value(9), Some("1"));
    assert_eq!(opener.closest_to_pin.value(3), Some("1"));
    assert_eq!(opener.closest_to_pin.value(12), Some("1"));
    assert_eq!(opener.closest_to_pin.value(4), Some(""));

    let card = load_scorecard(&db, &RecordId::parse("S0001")?).await?;
    assert_eq!(card.event.value(), "E0001");
    assert_eq!(card.player.value(), "P0002");
    assert_eq!(card.holes_played(), 9);
    assert_eq!(card.strokes.sigma(Sigma::Front), Some(41));
    assert_eq!(card.strokes.value(10), Some(""));
    let bo = load_player(&db, &card.player).await?;
    assert_eq!(bo.name, "Bo Park");
    Ok(())
}

#[tokio::test]
async fn test5_dbprefill_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefill.db");
    let db = SqliteDb::open(&path.to_string_lossy())?;

    let json: PrefillFile = serde_json::from_str(include_str!("test5_prefill.json"))?;
    db_prefill(&json, &db).await?;
    let opener = load_event(&db, &RecordId::parse("E0001")?).await?;
    assert_eq!(opener.name, "Spring Opener");
    assert_eq!(opener.date.to_string(), "2026-04-12");
    Ok(())
}

#[tokio::test]
async fn test5_dbprefill_stops_at_invalid_course() -> Result<(), Box<dyn std::error::Error>> {
    let db = MemoryDb::new();
    let json: PrefillFile = serde_json::from_str(
        r#"{ "courses": [
            { "name": "Good" },
            { "name": "Bad", "pars": [4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,4,9] }
        ] }"#,
    )?;
    let err = db_prefill(&json, &db).await.unwrap_err();
    assert!(format!("{err:#}").contains("Hole 18: '9'"), "{err:#}");
    // the first course was already stored
    assert_eq!(db.len(COURSE), 1);
    Ok(())
}

#[test]
fn test5_load_prefill_checks_shape() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(br#"{ "courses": [ { "name": "Short", "pars": [4, 4, 4] } ] }"#)?;
    let err = load_prefill(file.path()).unwrap_err();
    assert!(err.contains("exactly 18 entries"), "{err}");

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(
        br#"{ "courses": [], "events": [ { "name": "Orphan", "date": "2026-06-01", "course": 1 } ] }"#,
    )?;
    let err = load_prefill(file.path()).unwrap_err();
    assert!(err.contains("course of event 'Orphan'"), "{err}");

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(
        br#"{ "players": ["Ann"], "scorecards": [ { "event": 1, "player": 1, "strokes": [4] } ] }"#,
    )?;
    let err = load_prefill(file.path()).unwrap_err();
    assert!(err.contains("event of scorecard 1"), "{err}");

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(b"not json")?;
    assert!(load_prefill(file.path()).is_err());
    Ok(())
}

#[test]
fn test5_clean_args_merges_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let seed = dir.path().join("seed.json");
    std::fs::write(&seed, include_str!("test5_prefill.json"))?;
    let toml_path = dir.path().join("league.toml");
    std::fs::write(
        &toml_path,
        format!(
            "db_name = \":memory:\"\nport = 9090\ndb_populate_json = {:?}\n",
            seed.to_string_lossy()
        ),
    )?;

    let args = Args {
        port: Some(7000),
        config_toml: Some(toml_path),
        ..Args::default()
    };
    let clean = clean_args(args)?;
    assert_eq!(clean.db_name, ":memory:");
    // command line wins over the file
    assert_eq!(clean.port, 7000);
    assert_eq!(clean.bind, "0.0.0.0");
    assert_eq!(clean.db_populate_json.map(|s| s.courses.len()), Some(2));
    Ok(())
}

#[test]
fn test5_clean_args_requires_db_name() {
    assert!(clean_args(Args::default()).is_err());

    let args = Args {
        db_name: Some("/no/such/dir/league.db".to_string()),
        ..Args::default()
    };
    let err = clean_args(args).unwrap_err();
    assert!(err.to_string().contains("does not exist"), "{err}");
}

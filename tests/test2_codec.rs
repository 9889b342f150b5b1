mod common;

use common::{BLUE_YARDS, PARS_72, record, strings};
use golf_league::LeagueError;
use golf_league::codec::{add_quotes, tokenize};
use golf_league::model::{HoleFormat, HoleKind, HoleRecord, Sigma};

#[test]
fn test_round_trip_bare_and_totals() {
    let pars = record(HoleKind::Pars, &PARS_72);
    let line = pars.encode();
    assert_eq!(line, PARS_72.join(" "));
    let back = HoleRecord::decode(HoleKind::Pars, HoleFormat::Totals, &line).unwrap();
    assert_eq!(back, pars);
    assert_eq!(back.sigma(Sigma::Total), Some(72));
}

#[test]
fn test_titled_line_carries_title_first() {
    let tee = HoleRecord::create(
        HoleKind::Yardage,
        HoleFormat::TitledTotals,
        Some(strings(&BLUE_YARDS).as_slice()),
    )
    .with_title("Blue Tees");
    let line = tee.encode();
    assert!(line.starts_with("\"Blue Tees\" 412 535"));
    assert_eq!(tokenize(&line).unwrap().len(), 19);

    let back = HoleRecord::decode(HoleKind::Yardage, HoleFormat::TitledTotals, &line).unwrap();
    assert_eq!(back.title(), "Blue Tees");
    assert_eq!(back.sigma(Sigma::Front), Some(3365));
    assert_eq!(back.sigma(Sigma::Back), Some(3476));
    assert_eq!(back.sigma(Sigma::Total), Some(6841));
}

#[test]
fn test_decode_short_line_is_rejected() {
    let line = PARS_72[..17].join(" ");
    let err = HoleRecord::decode(HoleKind::Pars, HoleFormat::Totals, &line).unwrap_err();
    match err {
        LeagueError::MalformedWireLine(msg) => {
            assert!(msg.contains("Invalid hole count: expected 18, found 17"), "{msg}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_decode_long_line_is_rejected() {
    let mut tokens = strings(&PARS_72);
    tokens.push("4".to_string());
    let err = HoleRecord::decode(HoleKind::Pars, HoleFormat::Totals, &tokens.join(" ")).unwrap_err();
    assert!(err.to_string().contains("found 19"), "{err}");

    // lenient kinds still refuse a 19th hole
    let mut markers = vec![""; 18];
    markers.push("1");
    let line = markers.iter().map(|m| add_quotes(m)).collect::<Vec<_>>().join(" ");
    assert!(HoleRecord::decode(HoleKind::LongDrive, HoleFormat::Bare, &line).is_err());
}

#[test]
fn test_decode_markers_default_fill() {
    let ld = HoleRecord::decode(HoleKind::LongDrive, HoleFormat::Bare, "\"\" \"\" 1").unwrap();
    assert_eq!(ld.value(3), Some("1"));
    assert_eq!(ld.value(18), Some(""));
    assert!(ld.validate().is_ok());

    let empty = HoleRecord::decode(HoleKind::ClosestToPin, HoleFormat::Bare, "").unwrap();
    assert!(empty.is_default());
}

#[test]
fn test_blank_markers_round_trip() {
    let mut ctp = HoleRecord::new(HoleKind::ClosestToPin, HoleFormat::Bare);
    ctp.bind().set_hole(7, "1");
    ctp.update();
    let line = ctp.encode();
    assert_eq!(tokenize(&line).unwrap().len(), 18);
    let back = HoleRecord::decode(HoleKind::ClosestToPin, HoleFormat::Bare, &line).unwrap();
    assert_eq!(back, ctp);
}

#[test]
fn test_decode_unterminated_quote() {
    let err =
        HoleRecord::decode(HoleKind::Yardage, HoleFormat::TitledTotals, "\"Blue Tees 412").unwrap_err();
    assert!(matches!(err, LeagueError::MalformedWireLine(_)));
}

#[test]
fn test_decode_titled_requires_title() {
    let err = HoleRecord::decode(HoleKind::Yardage, HoleFormat::TitledTotals, "").unwrap_err();
    assert!(err.to_string().contains("missing title"), "{err}");
}

#[test]
fn test_decode_keeps_invalid_values() {
    let mut values = strings(&PARS_72);
    values[0] = "8".to_string();
    let rec = HoleRecord::decode(HoleKind::Pars, HoleFormat::Totals, &values.join(" ")).unwrap();
    assert_eq!(rec.value(1), Some("8"));
    assert_eq!(rec.validate().unwrap_err().hole, 1);
}

#[test]
fn test_title_with_quote_is_sanitized() {
    let tee = HoleRecord::new(HoleKind::Yardage, HoleFormat::TitledTotals).with_title("Dad's \"Gold\"");
    let back =
        HoleRecord::decode(HoleKind::Yardage, HoleFormat::TitledTotals, &tee.encode()).unwrap();
    assert_eq!(back.title(), "Dad's 'Gold'");
    assert!(back.values().iter().all(|v| v.is_empty()));
}

#![allow(dead_code)]

use golf_league::model::{Course, HoleFormat, HoleKind, HoleRecord, IdPrefix, RecordId};

pub const PARS_72: [&str; 18] = [
    "4", "5", "4", "3", "4", "4", "3", "5", "4", "4", "4", "3", "5", "4", "4", "3", "4", "5",
];

pub const HCP_MEN: [&str; 18] = [
    "7", "1", "13", "17", "5", "11", "15", "3", "9", "8", "2", "16", "4", "12", "10", "18", "14", "6",
];

pub const BLUE_YARDS: [&str; 18] = [
    "412", "535", "388", "176", "401", "367", "154", "512", "420", "398", "440", "188", "548",
    "379", "405", "165", "433", "520",
];

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

pub fn record(kind: HoleKind, values: &[&str]) -> HoleRecord {
    HoleRecord::create(kind, kind.default_format(), Some(strings(values).as_slice()))
}

pub fn sequential() -> Vec<String> {
    (1..=18).map(|h: usize| h.to_string()).collect()
}

pub fn sample_course(name: &str) -> Course {
    let placeholder = RecordId::from_parts(IdPrefix::Course, 0).expect("placeholder id");
    let mut course = Course::new(placeholder, name);
    course.pars = record(HoleKind::Pars, &PARS_72);
    course.men_handicap = record(HoleKind::MenHandicap, &HCP_MEN);
    course.teeboxes.push(
        HoleRecord::create(
            HoleKind::Yardage,
            HoleFormat::TitledTotals,
            Some(strings(&BLUE_YARDS).as_slice()),
        )
        .with_title("Blue Tees"),
    );
    course
}

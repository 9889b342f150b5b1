use chrono::NaiveDate;
use serde::Serialize;

use crate::model::hole::HoleRecord;
use crate::model::id::RecordId;
use crate::model::policy::HoleKind;
use crate::model::validator::{ValidationError, Validator};

/// A league day played on one course, with its side-contest holes.
#[derive(Serialize, Debug, Clone)]
pub struct Event {
    pub id: RecordId,
    pub name: String,
    pub date: NaiveDate,
    pub course: RecordId,
    pub long_drive: HoleRecord,
    pub closest_to_pin: HoleRecord,
}

impl Event {
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>, date: NaiveDate, course: RecordId) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            course,
            long_drive: HoleRecord::new(HoleKind::LongDrive, HoleKind::LongDrive.default_format()),
            closest_to_pin: HoleRecord::new(
                HoleKind::ClosestToPin,
                HoleKind::ClosestToPin.default_format(),
            ),
        }
    }

    #[must_use]
    pub fn record(&self, kind: HoleKind) -> Option<&HoleRecord> {
        match kind {
            HoleKind::LongDrive => Some(&self.long_drive),
            HoleKind::ClosestToPin => Some(&self.closest_to_pin),
            _ => None,
        }
    }

    pub fn record_mut(&mut self, kind: HoleKind) -> Option<&mut HoleRecord> {
        match kind {
            HoleKind::LongDrive => Some(&mut self.long_drive),
            HoleKind::ClosestToPin => Some(&mut self.closest_to_pin),
            _ => None,
        }
    }

    pub fn update(&mut self) -> bool {
        let ld = self.long_drive.update();
        let ctp = self.closest_to_pin.update();
        ld || ctp
    }

    pub fn is_valid(&self, validator: &mut dyn Validator) -> bool {
        if self.name.trim().is_empty() {
            validator.reject(&ValidationError::blank_name("event"));
            return false;
        }
        self.long_drive.is_valid(validator) && self.closest_to_pin.is_valid(validator)
    }
}

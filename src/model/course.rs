use serde::Serialize;

use crate::model::hole::HoleRecord;
use crate::model::id::RecordId;
use crate::model::policy::HoleKind;
use crate::model::validator::{Rule, ValidationError, Validator};

/// A course and everything printed on its card. Owns its hole records; they
/// go when the course goes.
#[derive(Serialize, Debug, Clone)]
pub struct Course {
    pub id: RecordId,
    pub name: String,
    pub holes: HoleRecord,
    pub pars: HoleRecord,
    pub men_handicap: HoleRecord,
    pub women_handicap: HoleRecord,
    /// Yardage per teebox; the record title is the teebox name.
    pub teeboxes: Vec<HoleRecord>,
    /// Stored key slot of each teebox, in step with `teeboxes`. Missing or
    /// `None` entries are teeboxes that were never saved.
    #[serde(skip)]
    tee_slots: Vec<Option<usize>>,
}

impl Course {
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            holes: default_record(HoleKind::HoleNumbers),
            pars: default_record(HoleKind::Pars),
            men_handicap: default_record(HoleKind::MenHandicap),
            women_handicap: default_record(HoleKind::WomenHandicap),
            teeboxes: Vec::new(),
            tee_slots: Vec::new(),
        }
    }

    /// Add an empty yardage record for a new teebox. Returns its 1-based
    /// tee number for [`Course::record_mut`].
    pub fn add_teebox(&mut self, name: impl Into<String>) -> usize {
        self.teeboxes
            .push(default_record(HoleKind::Yardage).with_title(name));
        self.teeboxes.len()
    }

    /// Append a teebox read back from key slot `slot`.
    pub fn push_stored_teebox(&mut self, slot: usize, tee: HoleRecord) {
        self.tee_slots.resize(self.teeboxes.len(), None);
        self.teeboxes.push(tee);
        self.tee_slots.push(Some(slot));
    }

    /// Key slot a teebox was loaded from or last saved to.
    #[must_use]
    pub fn tee_slot(&self, idx: usize) -> Option<usize> {
        self.tee_slots.get(idx).copied().flatten()
    }

    /// Replace the slot list after a save; one entry per remaining teebox.
    pub fn set_tee_slots(&mut self, slots: Vec<Option<usize>>) {
        self.tee_slots = slots;
    }

    /// Forget teeboxes that were removed before they were ever saved.
    pub fn drop_unsaved_removed(&mut self) {
        let slots: Vec<Option<usize>> = (0..self.teeboxes.len()).map(|i| self.tee_slot(i)).collect();
        let (teeboxes, slots): (Vec<_>, Vec<_>) = std::mem::take(&mut self.teeboxes)
            .into_iter()
            .zip(slots)
            .filter(|(tee, slot)| !(tee.is_removed() && slot.is_none()))
            .unzip();
        self.teeboxes = teeboxes;
        self.tee_slots = slots;
    }

    /// The course record of `kind`. Teeboxes are addressed 1-based through `tee`.
    #[must_use]
    pub fn record(&self, kind: HoleKind, tee: Option<usize>) -> Option<&HoleRecord> {
        match kind {
            HoleKind::HoleNumbers => Some(&self.holes),
            HoleKind::Pars => Some(&self.pars),
            HoleKind::MenHandicap => Some(&self.men_handicap),
            HoleKind::WomenHandicap => Some(&self.women_handicap),
            HoleKind::Yardage => tee
                .and_then(|t| t.checked_sub(1))
                .and_then(|idx| self.teeboxes.get(idx)),
            HoleKind::LongDrive | HoleKind::ClosestToPin | HoleKind::Strokes => None,
        }
    }

    pub fn record_mut(&mut self, kind: HoleKind, tee: Option<usize>) -> Option<&mut HoleRecord> {
        match kind {
            HoleKind::HoleNumbers => Some(&mut self.holes),
            HoleKind::Pars => Some(&mut self.pars),
            HoleKind::MenHandicap => Some(&mut self.men_handicap),
            HoleKind::WomenHandicap => Some(&mut self.women_handicap),
            HoleKind::Yardage => tee
                .and_then(|t| t.checked_sub(1))
                .and_then(|idx| self.teeboxes.get_mut(idx)),
            HoleKind::LongDrive | HoleKind::ClosestToPin | HoleKind::Strokes => None,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &HoleRecord> {
        [&self.holes, &self.pars, &self.men_handicap, &self.women_handicap]
            .into_iter()
            .chain(self.teeboxes.iter())
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut HoleRecord> {
        [
            &mut self.holes,
            &mut self.pars,
            &mut self.men_handicap,
            &mut self.women_handicap,
        ]
        .into_iter()
        .chain(self.teeboxes.iter_mut())
    }

    /// Reconcile every bound record. Returns whether anything was copied.
    pub fn update(&mut self) -> bool {
        self.records_mut().fold(false, |acc, r| r.update() || acc)
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.records().any(HoleRecord::is_changed)
    }

    /// Stops at the first record that fails.
    pub fn is_valid(&self, validator: &mut dyn Validator) -> bool {
        if self.name.trim().is_empty() {
            validator.reject(&ValidationError::blank_name("course"));
            return false;
        }
        for (idx, tee) in self.teeboxes.iter().enumerate() {
            if tee.title().trim().is_empty() {
                let err = ValidationError::new(0, tee.title(), Rule::Missing)
                    .in_record(format!("teebox {}", idx + 1));
                validator.reject(&err);
                return false;
            }
        }
        self.records().all(|r| r.is_valid(&mut *validator))
    }
}

fn default_record(kind: HoleKind) -> HoleRecord {
    HoleRecord::new(kind, kind.default_format())
}

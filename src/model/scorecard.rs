use serde::Serialize;

use crate::model::hole::HoleRecord;
use crate::model::id::RecordId;
use crate::model::policy::HoleKind;
use crate::model::validator::Validator;

/// One player's strokes at one event.
#[derive(Serialize, Debug, Clone)]
pub struct Scorecard {
    pub id: RecordId,
    pub event: RecordId,
    pub player: RecordId,
    pub strokes: HoleRecord,
}

impl Scorecard {
    /// Empty card; every hole starts unplayed.
    #[must_use]
    pub fn new(id: RecordId, event: RecordId, player: RecordId) -> Self {
        Self {
            id,
            event,
            player,
            strokes: HoleRecord::new(HoleKind::Strokes, HoleKind::Strokes.default_format()),
        }
    }

    #[must_use]
    pub fn record(&self, kind: HoleKind) -> Option<&HoleRecord> {
        (kind == HoleKind::Strokes).then_some(&self.strokes)
    }

    pub fn record_mut(&mut self, kind: HoleKind) -> Option<&mut HoleRecord> {
        (kind == HoleKind::Strokes).then_some(&mut self.strokes)
    }

    pub fn update(&mut self) -> bool {
        self.strokes.update()
    }

    /// Holes with a score so far.
    #[must_use]
    pub fn holes_played(&self) -> usize {
        self.strokes.cells().iter().filter(|c| !c.is_blank()).count()
    }

    pub fn is_valid(&self, validator: &mut dyn Validator) -> bool {
        self.strokes.is_valid(validator)
    }
}

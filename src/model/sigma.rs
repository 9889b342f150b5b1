use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::model::field::Field;
use crate::model::format::{HOLE_COUNT, NINE};
use crate::model::hole::{HoleRecord, Surface};

/// The derived sums a record can show.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sigma {
    Front,
    Back,
    Total,
}

impl Sigma {
    /// Zero-based cell range summed by a nine-level sigma. `Total` sums the
    /// two nine-level sigmas instead of cells.
    #[must_use]
    pub fn cells(self) -> Option<Range<usize>> {
        match self {
            Sigma::Front => Some(0..NINE),
            Sigma::Back => Some(NINE..HOLE_COUNT),
            Sigma::Total => None,
        }
    }
}

impl fmt::Display for Sigma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sigma::Front => "out",
            Sigma::Back => "in",
            Sigma::Total => "total",
        };
        write!(f, "{s}")
    }
}

/// Sum of the integer reading of each source. Anything that does not parse
/// counts as zero.
#[must_use]
pub fn recompute(sources: &[Field]) -> i32 {
    sources
        .iter()
        .map(Field::int_or_zero)
        .fold(0, i32::saturating_add)
}

/// Evaluate a sigma over a full set of 18 cells.
#[must_use]
pub fn sigma_over(cells: &[Field], sigma: Sigma) -> i32 {
    match sigma.cells() {
        Some(range) => cells.get(range).map_or(0, recompute),
        None => sigma_over(cells, Sigma::Front).saturating_add(sigma_over(cells, Sigma::Back)),
    }
}

/// Read-only derived cell. Holds no reference to its sources; every read
/// recomputes from the record (or surface) handed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigmaField {
    sigma: Sigma,
}

impl SigmaField {
    #[must_use]
    pub fn new(sigma: Sigma) -> Self {
        Self { sigma }
    }

    #[must_use]
    pub fn sigma(&self) -> Sigma {
        self.sigma
    }

    /// Value over the record's stored cells, or `None` if the record's format
    /// has no such slot.
    #[must_use]
    pub fn read(&self, record: &HoleRecord) -> Option<i32> {
        if !record.format().has_sigma(self.sigma) {
            return None;
        }
        Some(sigma_over(record.cells(), self.sigma))
    }

    /// Value over the live surface cells, which may hold edits not yet
    /// reconciled into the record.
    #[must_use]
    pub fn read_surface(&self, surface: &Surface) -> i32 {
        sigma_over(surface.cells(), self.sigma)
    }
}

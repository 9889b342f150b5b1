use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::sigma::Sigma;

pub const HOLE_COUNT: usize = 18;
pub const NINE: usize = 9;

/// Which non-hole slots a record shows on its surface.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HoleFormat {
    /// 18 hole cells only.
    #[default]
    Bare,
    /// Title cell in front of the 18 hole cells.
    Titled,
    /// Hole cells with front, back and total sums.
    Totals,
    TitledTotals,
}

impl HoleFormat {
    #[must_use]
    pub fn has_title(self) -> bool {
        matches!(self, Self::Titled | Self::TitledTotals)
    }

    #[must_use]
    pub fn has_front(self) -> bool {
        matches!(self, Self::Totals | Self::TitledTotals)
    }

    #[must_use]
    pub fn has_back(self) -> bool {
        self.has_front()
    }

    #[must_use]
    pub fn has_total(self) -> bool {
        self.has_front()
    }

    #[must_use]
    pub fn has_sigma(self, sigma: Sigma) -> bool {
        match sigma {
            Sigma::Front => self.has_front(),
            Sigma::Back => self.has_back(),
            Sigma::Total => self.has_total(),
        }
    }

    /// Number of tokens a full wire line carries for this format.
    #[must_use]
    pub fn token_count(self) -> usize {
        if self.has_title() {
            HOLE_COUNT + 1
        } else {
            HOLE_COUNT
        }
    }

    /// Surface slots in focus order: title, front nine, front sum, back nine,
    /// back sum, total.
    #[must_use]
    pub fn slots(self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(HOLE_COUNT + 4);
        if self.has_title() {
            slots.push(Slot::Title);
        }
        slots.extend((1..=NINE).map(Slot::Hole));
        if self.has_front() {
            slots.push(Slot::Sigma(Sigma::Front));
        }
        slots.extend((NINE + 1..=HOLE_COUNT).map(Slot::Hole));
        if self.has_back() {
            slots.push(Slot::Sigma(Sigma::Back));
        }
        if self.has_total() {
            slots.push(Slot::Sigma(Sigma::Total));
        }
        slots
    }
}

impl fmt::Display for HoleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HoleFormat::Bare => "bare",
            HoleFormat::Titled => "titled",
            HoleFormat::Totals => "totals",
            HoleFormat::TitledTotals => "titled_totals",
        };
        write!(f, "{s}")
    }
}

/// One position on a record's surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Title,
    /// 1-based hole number.
    Hole(usize),
    Sigma(Sigma),
}

impl Slot {
    #[must_use]
    pub fn is_editable(self) -> bool {
        !matches!(self, Slot::Sigma(_))
    }

    /// Form field name used by the rendered surface.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            Slot::Title => "title".to_string(),
            Slot::Hole(hole) => format!("h{hole}"),
            Slot::Sigma(sigma) => sigma.to_string(),
        }
    }
}

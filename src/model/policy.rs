use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::model::field::Field;
use crate::model::format::{HOLE_COUNT, HoleFormat, NINE};
use crate::model::validator::{Rule, ValidationError};

/// What makes one kind of hole record differ from another.
pub trait HolePolicy: fmt::Debug + Send + Sync {
    fn label(&self) -> &'static str;

    /// Generated value for a 1-based hole.
    fn default_value(&self, hole: usize) -> String;

    /// Kind-specific rule over all 18 cells. Only called once every non-blank
    /// cell is known to be numeric.
    ///
    /// # Errors
    ///
    /// Will return `Err` describing the first hole that breaks the rule
    fn validate(&self, cells: &[Field]) -> Result<(), ValidationError>;

    /// Whether a wire line must carry all 18 hole tokens.
    fn tokens_required(&self) -> bool {
        true
    }

    fn allows_blank(&self) -> bool {
        false
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HoleKind {
    HoleNumbers,
    Pars,
    MenHandicap,
    WomenHandicap,
    Yardage,
    LongDrive,
    ClosestToPin,
    /// A player's strokes per hole on a scorecard.
    Strokes,
}

impl HoleKind {
    #[must_use]
    pub fn policy(self) -> Arc<dyn HolePolicy> {
        match self {
            HoleKind::HoleNumbers => Arc::new(HoleNumbers),
            HoleKind::Pars => Arc::new(Pars::default()),
            HoleKind::MenHandicap | HoleKind::WomenHandicap => {
                Arc::new(Handicaps::new(HandicapRule::default()))
            }
            HoleKind::Yardage => Arc::new(Yardage),
            HoleKind::LongDrive | HoleKind::ClosestToPin => Arc::new(Markers),
            HoleKind::Strokes => Arc::new(Strokes::default()),
        }
    }

    #[must_use]
    pub fn default_format(self) -> HoleFormat {
        match self {
            HoleKind::Pars | HoleKind::Strokes => HoleFormat::Totals,
            HoleKind::Yardage => HoleFormat::TitledTotals,
            _ => HoleFormat::Bare,
        }
    }

    /// # Errors
    ///
    /// Will return `Err` if the name is not a known record kind
    pub fn parse(name: &str) -> Result<Self, String> {
        match name.trim().to_ascii_lowercase().as_str() {
            "holes" | "hole_numbers" => Ok(HoleKind::HoleNumbers),
            "pars" => Ok(HoleKind::Pars),
            "hcp_m" | "men_handicap" => Ok(HoleKind::MenHandicap),
            "hcp_w" | "women_handicap" => Ok(HoleKind::WomenHandicap),
            "yardage" => Ok(HoleKind::Yardage),
            "long_drive" => Ok(HoleKind::LongDrive),
            "closest_to_pin" => Ok(HoleKind::ClosestToPin),
            "strokes" | "scores" => Ok(HoleKind::Strokes),
            other => Err(format!("unknown hole record '{other}'")),
        }
    }
}

impl fmt::Display for HoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HoleKind::HoleNumbers => "holes",
            HoleKind::Pars => "pars",
            HoleKind::MenHandicap => "hcp_m",
            HoleKind::WomenHandicap => "hcp_w",
            HoleKind::Yardage => "yardage",
            HoleKind::LongDrive => "long_drive",
            HoleKind::ClosestToPin => "closest_to_pin",
            HoleKind::Strokes => "strokes",
        };
        write!(f, "{s}")
    }
}

fn int_of(idx: usize, cell: &Field) -> Result<Option<i32>, ValidationError> {
    if cell.is_blank() {
        return Ok(None);
    }
    cell.as_int()
        .map(Some)
        .map_err(|_| ValidationError::new(idx + 1, cell.value(), Rule::NotNumeric))
}

fn check_range(cells: &[Field], min: i32, max: i32) -> Result<(), ValidationError> {
    for (idx, cell) in cells.iter().enumerate() {
        if let Some(v) = int_of(idx, cell)? {
            if v < min || v > max {
                return Err(ValidationError::new(
                    idx + 1,
                    cell.value(),
                    Rule::OutOfRange { min, max },
                ));
            }
        }
    }
    Ok(())
}

fn check_distinct(cells: &[Field]) -> Result<(), ValidationError> {
    let mut seen: HashMap<i32, usize> = HashMap::new();
    for (idx, cell) in cells.iter().enumerate() {
        if let Some(v) = int_of(idx, cell)? {
            if let Some(first) = seen.get(&v) {
                return Err(ValidationError::new(
                    idx + 1,
                    cell.value(),
                    Rule::Duplicate { first_hole: *first },
                ));
            }
            seen.insert(v, idx + 1);
        }
    }
    Ok(())
}

/// Printed hole numbers. Each nine is its own run counting up by one, so a
/// nine-hole course played twice (1..9, 1..9) is as valid as 1..18.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoleNumbers;

impl HoleNumbers {
    pub const MAX: i32 = 36;
}

impl HolePolicy for HoleNumbers {
    fn label(&self) -> &'static str {
        "Hole"
    }

    fn default_value(&self, hole: usize) -> String {
        hole.to_string()
    }

    fn validate(&self, cells: &[Field]) -> Result<(), ValidationError> {
        let mut prev: Option<i32> = None;
        for (idx, cell) in cells.iter().enumerate().take(HOLE_COUNT) {
            // back nine starts a fresh run
            if idx == NINE {
                prev = None;
            }
            let Some(v) = int_of(idx, cell)? else {
                return Err(ValidationError::new(idx + 1, cell.value(), Rule::Missing));
            };
            if !(1..=Self::MAX).contains(&v) {
                return Err(ValidationError::new(
                    idx + 1,
                    cell.value(),
                    Rule::OutOfRange { min: 1, max: Self::MAX },
                ));
            }
            if let Some(p) = prev {
                if v != p + 1 {
                    return Err(ValidationError::new(
                        idx + 1,
                        cell.value(),
                        Rule::OutOfSequence { expected: p + 1 },
                    ));
                }
            }
            prev = Some(v);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pars {
    pub min: i32,
    pub max: i32,
}

impl Default for Pars {
    fn default() -> Self {
        Self { min: 3, max: 5 }
    }
}

impl HolePolicy for Pars {
    fn label(&self) -> &'static str {
        "Par"
    }

    fn default_value(&self, _hole: usize) -> String {
        "4".to_string()
    }

    fn validate(&self, cells: &[Field]) -> Result<(), ValidationError> {
        check_range(cells, self.min, self.max)
    }
}

/// How strictly a stroke index has to cover 1..18.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HandicapRule {
    /// Every index 1..18 exactly once.
    #[default]
    Permutation,
    /// Positive and no repeats; gaps allowed.
    Distinct,
    /// Each value within 1..18; repeats allowed.
    InRange,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Handicaps {
    pub rule: HandicapRule,
}

impl Handicaps {
    #[must_use]
    pub fn new(rule: HandicapRule) -> Self {
        Self { rule }
    }
}

impl HolePolicy for Handicaps {
    fn label(&self) -> &'static str {
        "Hcp"
    }

    fn default_value(&self, hole: usize) -> String {
        hole.to_string()
    }

    fn validate(&self, cells: &[Field]) -> Result<(), ValidationError> {
        let max = i32::try_from(HOLE_COUNT).unwrap_or(i32::MAX);
        match self.rule {
            HandicapRule::Permutation => {
                check_range(cells, 1, max)?;
                check_distinct(cells)
            }
            HandicapRule::Distinct => {
                check_range(cells, 1, i32::MAX)?;
                check_distinct(cells)
            }
            HandicapRule::InRange => check_range(cells, 1, max),
        }
    }
}

/// Free numeric distances.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yardage;

impl HolePolicy for Yardage {
    fn label(&self) -> &'static str {
        "Yards"
    }

    fn default_value(&self, _hole: usize) -> String {
        String::new()
    }

    fn validate(&self, _cells: &[Field]) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Long-drive and closest-to-pin markers. Numeric when set, blank otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct Markers;

impl HolePolicy for Markers {
    fn label(&self) -> &'static str {
        "Marker"
    }

    fn default_value(&self, _hole: usize) -> String {
        String::new()
    }

    fn validate(&self, _cells: &[Field]) -> Result<(), ValidationError> {
        Ok(())
    }

    fn tokens_required(&self) -> bool {
        false
    }

    fn allows_blank(&self) -> bool {
        true
    }
}

/// Strokes on a scorecard. Holes not yet played stay blank.
#[derive(Debug, Clone, Copy)]
pub struct Strokes {
    pub max: i32,
}

impl Default for Strokes {
    fn default() -> Self {
        Self { max: 20 }
    }
}

impl HolePolicy for Strokes {
    fn label(&self) -> &'static str {
        "Score"
    }

    fn default_value(&self, _hole: usize) -> String {
        String::new()
    }

    fn validate(&self, cells: &[Field]) -> Result<(), ValidationError> {
        check_range(cells, 1, self.max)
    }

    fn allows_blank(&self) -> bool {
        true
    }
}

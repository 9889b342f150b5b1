use serde::{Serialize, Serializer};
use std::array;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::codec;
use crate::error::LeagueError;
use crate::model::field::Field;
use crate::model::format::{HOLE_COUNT, HoleFormat, Slot};
use crate::model::policy::{HoleKind, HolePolicy};
use crate::model::sigma::{Sigma, SigmaField, sigma_over};
use crate::model::validator::{Rule, ValidationError, Validator};

/// The editable copy of a record's cells while it is bound to a panel.
#[derive(Debug, Clone, Default)]
pub struct Surface {
    title: Field,
    cells: [Field; HOLE_COUNT],
}

impl Surface {
    fn from_record(record: &HoleRecord) -> Self {
        Self {
            title: Field::new(record.title.value()),
            cells: array::from_fn(|idx| Field::new(record.cells[idx].value())),
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Field] {
        &self.cells
    }

    #[must_use]
    pub fn title(&self) -> &Field {
        &self.title
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.title.set(value);
    }

    /// Set a 1-based hole. Out-of-range holes are ignored.
    pub fn set_hole(&mut self, hole: usize, value: impl Into<String>) {
        if let Some(cell) = hole.checked_sub(1).and_then(|idx| self.cells.get_mut(idx)) {
            cell.set(value);
        }
    }

    #[must_use]
    pub fn hole(&self, hole: usize) -> Option<&Field> {
        hole.checked_sub(1).and_then(|idx| self.cells.get(idx))
    }

    /// Write into an editable slot. Returns false for sigma slots.
    pub fn set(&mut self, slot: Slot, value: impl Into<String>) -> bool {
        match slot {
            Slot::Title => {
                self.set_title(value);
                true
            }
            Slot::Hole(hole) => {
                self.set_hole(hole, value);
                true
            }
            Slot::Sigma(_) => false,
        }
    }

    /// Display text of a slot. Sigma slots are recomputed on every read.
    #[must_use]
    pub fn display(&self, slot: Slot) -> String {
        match slot {
            Slot::Title => self.title.value().to_string(),
            Slot::Hole(hole) => self
                .hole(hole)
                .map(|f| f.value().to_string())
                .unwrap_or_default(),
            Slot::Sigma(sigma) => SigmaField::new(sigma).read_surface(self).to_string(),
        }
    }

    #[must_use]
    pub fn sigma(&self, sigma: Sigma) -> i32 {
        sigma_over(&self.cells, sigma)
    }
}

/// Fixed 18-hole record plus its derived sums.
pub struct HoleRecord {
    kind: HoleKind,
    format: HoleFormat,
    policy: Arc<dyn HolePolicy>,
    title: Field,
    cells: [Field; HOLE_COUNT],
    removed: bool,
    changed: bool,
    surface: Option<Surface>,
}

impl HoleRecord {
    /// Record filled from the kind's default generator.
    #[must_use]
    pub fn new(kind: HoleKind, format: HoleFormat) -> Self {
        Self::with_policy(kind, format, kind.policy(), None)
    }

    /// Copy `source` verbatim when given, otherwise use the defaults. Nothing
    /// is validated here.
    #[must_use]
    pub fn create(kind: HoleKind, format: HoleFormat, source: Option<&[String]>) -> Self {
        Self::with_policy(kind, format, kind.policy(), source)
    }

    /// Like [`HoleRecord::create`] with a caller-chosen policy. A short
    /// `source` is default-filled; anything past hole 18 is dropped.
    #[must_use]
    pub fn with_policy(
        kind: HoleKind,
        format: HoleFormat,
        policy: Arc<dyn HolePolicy>,
        source: Option<&[String]>,
    ) -> Self {
        let cells = array::from_fn(|idx| match source.and_then(|s| s.get(idx)) {
            Some(value) => Field::new(value.as_str()),
            None => Field::new(policy.default_value(idx + 1)),
        });
        Self {
            kind,
            format,
            policy,
            title: Field::default(),
            cells,
            removed: false,
            changed: false,
            surface: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Field::new(title);
        self
    }

    /// # Errors
    ///
    /// Will return `Err` if the line is not a well-formed record of this kind
    pub fn decode(kind: HoleKind, format: HoleFormat, line: &str) -> Result<Self, LeagueError> {
        codec::decode(kind, format, kind.policy(), line)
    }

    #[must_use]
    pub fn encode(&self) -> String {
        codec::encode(self)
    }

    #[must_use]
    pub fn kind(&self) -> HoleKind {
        self.kind
    }

    #[must_use]
    pub fn format(&self) -> HoleFormat {
        self.format
    }

    #[must_use]
    pub fn policy(&self) -> &dyn HolePolicy {
        self.policy.as_ref()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.title.value()
    }

    #[must_use]
    pub fn cells(&self) -> &[Field] {
        &self.cells
    }

    #[must_use]
    pub fn values(&self) -> Vec<&str> {
        self.cells.iter().map(Field::value).collect()
    }

    /// 1-based.
    #[must_use]
    pub fn value(&self, hole: usize) -> Option<&str> {
        hole.checked_sub(1)
            .and_then(|idx| self.cells.get(idx))
            .map(Field::value)
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn set_removed(&mut self, removed: bool) {
        self.removed = removed;
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Forget pending changes once the record has been persisted.
    pub fn mark_saved(&mut self) {
        self.changed = false;
        self.title.clear_edited();
        for cell in &mut self.cells {
            cell.clear_edited();
        }
    }

    /// True when every hole still holds the generator's value.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(idx, cell)| cell.value() == self.policy.default_value(idx + 1))
    }

    /// Derived sum over the stored cells; `None` if the format has no such slot.
    #[must_use]
    pub fn sigma(&self, sigma: Sigma) -> Option<i32> {
        SigmaField::new(sigma).read(self)
    }

    /// Integer reading of every hole. The first cell that does not parse is
    /// reported to `validator` and every bad cell reads as 0.
    pub fn to_int(&self, validator: &mut dyn Validator) -> [i32; HOLE_COUNT] {
        let mut first_error: Option<ValidationError> = None;
        let ints = array::from_fn(|idx| {
            let cell = &self.cells[idx];
            if cell.is_blank() && self.policy.allows_blank() {
                return 0;
            }
            match cell.as_int() {
                Ok(v) => v,
                Err(_) => {
                    if first_error.is_none() {
                        let rule = if cell.is_blank() {
                            Rule::Missing
                        } else {
                            Rule::NotNumeric
                        };
                        first_error = Some(
                            ValidationError::new(idx + 1, cell.value(), rule).in_record(self.name()),
                        );
                    }
                    0
                }
            }
        });
        match first_error {
            Some(err) => validator.reject(&err),
            None => validator.accept(),
        }
        ints
    }

    /// Presence first, then numeric parse and the kind's own rule. Removed
    /// records only get the presence check.
    ///
    /// # Errors
    ///
    /// Will return `Err` naming the first offending hole
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.check().map_err(|err| err.in_record(self.name()))
    }

    fn check(&self) -> Result<(), ValidationError> {
        if !self.policy.allows_blank() {
            if let Some((idx, cell)) = self.cells.iter().enumerate().find(|(_, c)| c.is_blank()) {
                return Err(ValidationError::new(idx + 1, cell.value(), Rule::Missing));
            }
        }
        if self.removed {
            return Ok(());
        }
        for (idx, cell) in self.cells.iter().enumerate() {
            if !cell.is_blank() && cell.as_int().is_err() {
                return Err(ValidationError::new(idx + 1, cell.value(), Rule::NotNumeric));
            }
        }
        self.policy.validate(&self.cells)
    }

    /// Kind plus title where the format has one, e.g. `yardage Blue Tees`.
    #[must_use]
    pub fn name(&self) -> String {
        let title = self.title.value().trim();
        if self.format.has_title() && !title.is_empty() {
            format!("{} {title}", self.kind)
        } else {
            self.kind.to_string()
        }
    }

    pub fn is_valid(&self, validator: &mut dyn Validator) -> bool {
        match self.validate() {
            Ok(()) => {
                validator.accept();
                true
            }
            Err(err) => {
                debug!(kind = %self.kind, "rejected: {err}");
                validator.reject(&err);
                false
            }
        }
    }

    /// Attach an editable surface seeded from the current cells. Binding an
    /// already bound record keeps the existing surface.
    pub fn bind(&mut self) -> &mut Surface {
        if self.surface.is_none() {
            self.surface = Some(Surface::from_record(self));
        }
        self.surface.get_or_insert_with(Surface::default)
    }

    pub fn unbind(&mut self) -> Option<Surface> {
        self.surface.take()
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    #[must_use]
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut Surface> {
        self.surface.as_mut()
    }

    /// Copy any surface cell that differs from the stored cell back into the
    /// record. Returns whether this call copied anything.
    pub fn update(&mut self) -> bool {
        let Some(surface) = self.surface.as_ref() else {
            return false;
        };
        let mut copied = false;
        if self.format.has_title() && surface.title.value() != self.title.value() {
            self.title.set(surface.title.value());
            copied = true;
        }
        for (idx, (stored, live)) in self.cells.iter_mut().zip(surface.cells.iter()).enumerate() {
            if stored.value() != live.value() {
                debug!(kind = %self.kind, hole = idx + 1, from = stored.value(), to = live.value(), "hole edited");
                stored.set(live.value());
                copied = true;
            }
        }
        if copied {
            self.changed = true;
        }
        copied
    }

    fn view(&self) -> HoleRecordView<'_> {
        HoleRecordView {
            kind: self.kind,
            format: self.format,
            title: self.format.has_title().then(|| self.title.value()),
            holes: self.values(),
            out: self.sigma(Sigma::Front),
            r#in: self.sigma(Sigma::Back),
            total: self.sigma(Sigma::Total),
            removed: self.removed,
            changed: self.changed,
        }
    }
}

/// Duplicates cells, title and format. The surface is never copied.
impl Clone for HoleRecord {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            format: self.format,
            policy: Arc::clone(&self.policy),
            title: Field::new(self.title.value()),
            cells: array::from_fn(|idx| Field::new(self.cells[idx].value())),
            removed: false,
            changed: false,
            surface: None,
        }
    }
}

impl PartialEq for HoleRecord {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.format == other.format
            && self.title.value() == other.title.value()
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| a.value() == b.value())
    }
}

impl fmt::Debug for HoleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoleRecord")
            .field("kind", &self.kind)
            .field("format", &self.format)
            .field("title", &self.title.value())
            .field("holes", &self.values())
            .field("removed", &self.removed)
            .field("changed", &self.changed)
            .field("bound", &self.surface.is_some())
            .finish()
    }
}

#[derive(Serialize)]
struct HoleRecordView<'a> {
    kind: HoleKind,
    format: HoleFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    holes: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    out: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "in")]
    r#in: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<i32>,
    removed: bool,
    changed: bool,
}

impl Serialize for HoleRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}

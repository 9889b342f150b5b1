use serde::Serialize;
use std::fmt;

/// The rule a hole value broke.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "rule")]
pub enum Rule {
    Missing,
    NotNumeric,
    OutOfRange { min: i32, max: i32 },
    OutOfSequence { expected: i32 },
    Duplicate { first_hole: usize },
    /// The owning course, event or player has no name.
    BlankName,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Missing => write!(f, "a value is required"),
            Rule::NotNumeric => write!(f, "not a number"),
            Rule::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
            Rule::OutOfSequence { expected } => write!(f, "expected {expected}"),
            Rule::Duplicate { first_hole } => write!(f, "already used on hole {first_hole}"),
            Rule::BlankName => write!(f, "a name is required"),
        }
    }
}

/// First offending hole of a record.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Which record broke the rule, e.g. `pars` or `yardage Blue Tees`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<String>,
    /// 1-based; 0 is the record's title cell.
    pub hole: usize,
    pub value: String,
    pub rule: Rule,
}

impl ValidationError {
    #[must_use]
    pub fn new(hole: usize, value: impl Into<String>, rule: Rule) -> Self {
        Self {
            record: None,
            hole,
            value: value.into(),
            rule,
        }
    }

    /// A course, event or player saved without a name.
    #[must_use]
    pub fn blank_name(owner: &str) -> Self {
        Self::new(0, "", Rule::BlankName).in_record(owner)
    }

    /// Name the record the error belongs to. An existing name is kept.
    #[must_use]
    pub fn in_record(mut self, record: impl Into<String>) -> Self {
        if self.record.is_none() {
            self.record = Some(record.into());
        }
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let record = self.record.as_deref();
        if self.rule == Rule::BlankName {
            return write!(f, "{}: {}", record.unwrap_or("record"), self.rule);
        }
        if let Some(record) = record {
            write!(f, "{record}: ")?;
        }
        if self.hole == 0 {
            write!(f, "Title: '{}' {}", self.value, self.rule)
        } else {
            write!(f, "Hole {}: '{}' {}", self.hole, self.value, self.rule)
        }
    }
}

impl std::error::Error for ValidationError {}

/// Receives the outcome of a record check. Owned by the caller.
pub trait Validator {
    fn accept(&mut self);
    fn reject(&mut self, error: &ValidationError);
}

/// Keeps the last rejection so a caller can show it.
#[derive(Debug, Default, Clone)]
pub struct MessageValidator {
    last: Option<ValidationError>,
}

impl MessageValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        self.last.as_ref()
    }

    #[must_use]
    pub fn message(&self) -> Option<String> {
        self.last.as_ref().map(ToString::to_string)
    }
}

impl Validator for MessageValidator {
    fn accept(&mut self) {
        self.last = None;
    }

    fn reject(&mut self, error: &ValidationError) {
        self.last = Some(error.clone());
    }
}

/// Writes rejections to the log and keeps nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogValidator;

impl Validator for LogValidator {
    fn accept(&mut self) {}

    fn reject(&mut self, error: &ValidationError) {
        tracing::warn!(hole = error.hole, value = %error.value, "{error}");
    }
}

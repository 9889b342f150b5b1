use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Leading letter of a record key.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPrefix {
    Course,
    Event,
    Player,
    Scorecard,
}

impl IdPrefix {
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            IdPrefix::Course => 'C',
            IdPrefix::Event => 'E',
            IdPrefix::Player => 'P',
            IdPrefix::Scorecard => 'S',
        }
    }
}

/// Letter plus zero-padded four digit suffix, e.g. `C0001`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    pub const MAX_SUFFIX: u32 = 9999;

    /// # Panics
    ///
    /// Will panic if the regex is invalid
    #[must_use]
    pub fn new(input: &str) -> Option<Self> {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"^[A-Z][0-9]{4}$")
                .expect("Invalid regex pattern - this is a programming error")
        });

        if re.is_match(input) {
            Some(RecordId(input.to_string()))
        } else {
            None
        }
    }

    /// Returns `None` once the suffix would need a fifth digit.
    #[must_use]
    pub fn from_parts(prefix: IdPrefix, suffix: u32) -> Option<Self> {
        if suffix > Self::MAX_SUFFIX {
            return None;
        }
        Some(RecordId(format!("{}{suffix:04}", prefix.letter())))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn letter(&self) -> char {
        self.0.chars().next().unwrap_or_default()
    }

    #[must_use]
    pub fn suffix(&self) -> u32 {
        self.0[1..].parse().unwrap_or_default()
    }

    /// # Errors
    ///
    /// Will return `Err` if the input is not a letter followed by four digits
    pub fn parse(input: &str) -> Result<Self, String> {
        Self::try_from(input)
    }
}

impl TryFrom<&str> for RecordId {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        RecordId::new(value.trim())
            .ok_or_else(|| format!("Invalid record id '{value}': expected a letter and four digits"))
    }
}

impl TryFrom<String> for RecordId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

use serde::{Deserialize, Serialize};
use std::num::ParseIntError;

/// A single editable text cell.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Field {
    value: String,
    #[serde(skip)]
    edited: bool,
}

impl Field {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            edited: false,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the text. The edited flag only flips when the text actually differs.
    pub fn set(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.value {
            self.value = value;
            self.edited = true;
        }
    }

    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    pub fn clear_edited(&mut self) {
        self.edited = false;
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// # Errors
    ///
    /// Will return `Err` if the trimmed text is not an integer
    pub fn as_int(&self) -> Result<i32, ParseIntError> {
        self.value.trim().parse()
    }

    #[must_use]
    pub fn int_or_zero(&self) -> i32 {
        self.as_int().unwrap_or(0)
    }
}

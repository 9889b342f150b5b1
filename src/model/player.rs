use serde::Serialize;

use crate::model::id::RecordId;
use crate::model::validator::{ValidationError, Validator};

/// A league member who turns in scorecards.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: RecordId,
    pub name: String,
}

impl Player {
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn is_valid(&self, validator: &mut dyn Validator) -> bool {
        if self.name.trim().is_empty() {
            validator.reject(&ValidationError::blank_name("player"));
            return false;
        }
        validator.accept();
        true
    }
}

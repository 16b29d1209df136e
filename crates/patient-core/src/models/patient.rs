//! Patient models.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Storage-assigned patient identifier.
pub type PatientId = i64;

/// Score given to every demo record.
pub const DEFAULT_SCORE: i32 = 200;

/// A single person under care.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Assigned by storage on first save, `None` until then
    pub id: Option<PatientId>,
    /// Free-form display name
    pub name: String,
    /// Date of birth
    pub date_of_birth: DateTime<Utc>,
    /// Filter flag, no further semantics
    pub sickness: bool,
    /// Integer score
    pub score: i32,
}

impl Patient {
    /// Create an unsaved patient.
    pub fn new(
        name: impl Into<String>,
        date_of_birth: DateTime<Utc>,
        sickness: bool,
        score: i32,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            date_of_birth,
            sickness,
            score,
        }
    }

    /// Check if this patient has been assigned an id by storage.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Patient(id=")?;
        match self.id {
            Some(id) => write!(f, "{}", id)?,
            None => write!(f, "none")?,
        }
        write!(
            f,
            ", name={}, dateOfBirth={}, sickness={}, score={})",
            self.name,
            self.date_of_birth.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.sickness,
            self.score
        )
    }
}

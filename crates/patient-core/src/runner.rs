//! Sequential demo over a [`PatientRepository`].
//!
//! Seeds the demo data, lists it, fetches one record and renames it,
//! deletes that record, then filters on `sickness = false`. The report is
//! written to any `io::Write` sink as text sections or a single JSON document.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::db::DbError;
use crate::models::{Patient, PatientId};
use crate::repository::PatientRepository;
use crate::seed::seed_demo_patients;

/// Name given to the target record in the update step.
pub const DEFAULT_NEW_NAME: &str = "Issam";

/// Demo runner errors.
#[derive(Error, Debug)]
pub enum DemoError {
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// No target id given and the first seeded record came back without one.
    #[error("Seeding produced no persisted patient to target")]
    NothingSeeded,
}

/// Rendering of the demo report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Error, Debug)]
#[error("unknown output format `{0}`; expected text|json")]
pub struct ParseFormatError(String);

impl FromStr for OutputFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ParseFormatError(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Demo parameters.
#[derive(Debug, Clone)]
pub struct DemoOptions {
    /// Record to fetch, rename and delete. Defaults to the first seeded id.
    pub target_id: Option<PatientId>,
    /// Replacement name for the update step.
    pub new_name: String,
    pub format: OutputFormat,
    /// Date of birth stamped on every seeded record.
    pub seeded_at: DateTime<Utc>,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            target_id: None,
            new_name: DEFAULT_NEW_NAME.to_string(),
            format: OutputFormat::default(),
            seeded_at: Utc::now(),
        }
    }
}

/// Everything the demo observed, in execution order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub seeded: Vec<Patient>,
    pub all_patients: Vec<Patient>,
    pub target_id: PatientId,
    /// Target as fetched, before renaming. `None` when absent.
    pub fetched: Option<Patient>,
    /// Target after renaming and re-saving.
    pub updated: Option<Patient>,
    /// Whether the delete step removed a row.
    pub deleted: bool,
    pub remaining: Vec<Patient>,
    pub not_sick: Vec<Patient>,
}

/// Run the demo sequence against `repo` and write the report to `out`.
///
/// Text sections are written as each step completes. JSON is written once,
/// after every step has succeeded.
pub fn run_demo<R, W>(
    repo: &R,
    out: &mut W,
    options: &DemoOptions,
) -> Result<DemoReport, DemoError>
where
    R: PatientRepository + ?Sized,
    W: Write + ?Sized,
{
    let text = options.format == OutputFormat::Text;

    let seeded = seed_demo_patients(repo, options.seeded_at)?;
    let all_patients = repo.find_all()?;
    if text {
        write_section(out, "All patients", &all_patients)?;
    }

    let target_id = match options.target_id {
        Some(id) => id,
        None => seeded
            .first()
            .and_then(|p| p.id)
            .ok_or(DemoError::NothingSeeded)?,
    };

    let fetched = repo.find_by_id(target_id)?;
    let updated = match &fetched {
        Some(patient) => {
            if text {
                write_section(
                    out,
                    &format!("Patient with id = {}", target_id),
                    std::slice::from_ref(patient),
                )?;
            }
            let mut renamed = patient.clone();
            renamed.name = options.new_name.clone();
            let saved = repo.save(renamed)?;
            if text {
                write_section(out, "After update", std::slice::from_ref(&saved))?;
            }
            Some(saved)
        }
        None => {
            warn!(patient_id = target_id, "target patient not found, skipping update");
            None
        }
    };

    let deleted = repo.delete_by_id(target_id)?;
    let remaining = repo.find_all()?;
    if text {
        write_section(
            out,
            &format!("After deleting patient id = {}", target_id),
            &remaining,
        )?;
    }

    let not_sick = repo.find_by_sickness(false)?;
    if text {
        write_section(out, "Patients with sickness = false", &not_sick)?;
    }

    let report = DemoReport {
        seeded,
        all_patients,
        target_id,
        fetched,
        updated,
        deleted,
        remaining,
        not_sick,
    };

    if options.format == OutputFormat::Json {
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    }

    info!(
        target_id,
        deleted,
        remaining = report.remaining.len(),
        "demo finished"
    );
    Ok(report)
}

fn write_section<W: Write + ?Sized>(
    out: &mut W,
    title: &str,
    patients: &[Patient],
) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- {} ---", title)?;
    for patient in patients {
        writeln!(out, "{}", patient)?;
    }
    Ok(())
}

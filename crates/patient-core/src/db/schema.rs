//! SQLite schema definition.

/// Complete database schema for patient records.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

-- AUTOINCREMENT keeps ids from being reused after a delete
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    date_of_birth TEXT NOT NULL,
    sickness INTEGER NOT NULL CHECK (sickness IN (0, 1)),
    score INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_patients_sickness ON patients(sickness);
"#;

//! Patient database operations.

use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Patient, PatientId};

const PATIENT_SELECT_SQL: &str = r#"
    SELECT id, name, date_of_birth, sickness, score
    FROM patients
"#;

/// Position of `sickness` in `PATIENT_SELECT_SQL`.
const SICKNESS_COLUMN: usize = 3;

impl Database {
    /// Insert a new patient and return the id assigned by storage.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<PatientId> {
        if let Some(id) = patient.id {
            return Err(DbError::Constraint(format!(
                "patient id {} is assigned by storage and cannot be inserted",
                id
            )));
        }

        self.conn.execute(
            r#"
            INSERT INTO patients (name, date_of_birth, sickness, score)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                patient.name,
                patient.date_of_birth,
                patient.sickness,
                patient.score,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing patient. Returns `false` when no row matches the id.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let id = patient.id.ok_or_else(|| {
            DbError::Constraint("cannot update a patient that has no id".to_string())
        })?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                name = ?2,
                date_of_birth = ?3,
                sickness = ?4,
                score = ?5
            WHERE id = ?1
            "#,
            params![
                id,
                patient.name,
                patient.date_of_birth,
                patient.sickness,
                patient.score,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: PatientId) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("{PATIENT_SELECT_SQL} WHERE id = ?1"),
                [id],
                parse_patient_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all patients in id order.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PATIENT_SELECT_SQL} ORDER BY id"))?;
        let rows = stmt.query_map([], parse_patient_row)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List patients whose sickness flag equals `sickness`, in id order.
    pub fn list_patients_by_sickness(&self, sickness: bool) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PATIENT_SELECT_SQL} WHERE sickness = ?1 ORDER BY id"
        ))?;
        let rows = stmt.query_map([sickness], parse_patient_row)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient. Returns `false` when no row matches the id.
    pub fn delete_patient(&self, id: PatientId) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Count stored patients.
    pub fn count_patients(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        usize::try_from(count)
            .map_err(|_| DbError::InvalidData(format!("negative patient count {}", count)))
    }
}

fn parse_patient_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    let sickness = match row.get::<_, i64>(SICKNESS_COLUMN)? {
        0 => false,
        1 => true,
        other => {
            return Err(rusqlite::Error::FromSqlConversionFailure(
                SICKNESS_COLUMN,
                Type::Integer,
                format!("invalid sickness value `{}` in patients.sickness", other).into(),
            ));
        }
    };

    Ok(Patient {
        id: Some(row.get(0)?),
        name: row.get(1)?,
        date_of_birth: row.get(2)?,
        sickness,
        score: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_SCORE;
    use chrono::{TimeZone, Utc};

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn patient(name: &str, sickness: bool) -> Patient {
        let dob = Utc.with_ymd_and_hms(1990, 5, 17, 8, 0, 0).unwrap();
        Patient::new(name, dob, sickness, DEFAULT_SCORE)
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let original = patient("Omar Morsi", false);
        let id = db.insert_patient(&original).unwrap();

        let retrieved = db.get_patient(id).unwrap().unwrap();
        assert_eq!(retrieved.id, Some(id));
        assert_eq!(retrieved.name, "Omar Morsi");
        assert_eq!(retrieved.date_of_birth, original.date_of_birth);
        assert!(!retrieved.sickness);
        assert_eq!(retrieved.score, 200);
    }

    #[test]
    fn test_insert_rejects_preassigned_id() {
        let db = setup_db();

        let mut p = patient("Omar Morsi", false);
        p.id = Some(42);

        let err = db.insert_patient(&p).unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
        assert_eq!(db.count_patients().unwrap(), 0);
    }

    #[test]
    fn test_update_patient() {
        let db = setup_db();

        let mut p = patient("Yasmine Nouri", true);
        p.id = Some(db.insert_patient(&p).unwrap());

        p.sickness = false;
        p.score = 150;
        assert!(db.update_patient(&p).unwrap());

        let retrieved = db.get_patient(p.id.unwrap()).unwrap().unwrap();
        assert!(!retrieved.sickness);
        assert_eq!(retrieved.score, 150);
    }

    #[test]
    fn test_update_missing_patient() {
        let db = setup_db();

        let mut p = patient("Ghost", false);
        p.id = Some(99);
        assert!(!db.update_patient(&p).unwrap());

        p.id = None;
        assert!(matches!(
            db.update_patient(&p).unwrap_err(),
            DbError::Constraint(_)
        ));
    }

    #[test]
    fn test_list_by_sickness() {
        let db = setup_db();

        db.insert_patient(&patient("Line Morsi", false)).unwrap();
        db.insert_patient(&patient("Khaled Nouri", true)).unwrap();
        db.insert_patient(&patient("Hiba Morsi", false)).unwrap();

        let healthy = db.list_patients_by_sickness(false).unwrap();
        let names: Vec<_> = healthy.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Line Morsi", "Hiba Morsi"]);

        let sick = db.list_patients_by_sickness(true).unwrap();
        assert_eq!(sick.len(), 1);
        assert_eq!(sick[0].name, "Khaled Nouri");
    }

    #[test]
    fn test_delete_patient() {
        let db = setup_db();

        let id = db.insert_patient(&patient("Hajar Nouri", true)).unwrap();
        assert!(db.delete_patient(id).unwrap());
        assert!(!db.delete_patient(id).unwrap());
        assert!(db.get_patient(id).unwrap().is_none());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let db = setup_db();

        let first = db.insert_patient(&patient("A", false)).unwrap();
        db.delete_patient(first).unwrap();
        let second = db.insert_patient(&patient("B", false)).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_invalid_sickness_rejected_on_read() {
        let db = setup_db();

        let id = db.insert_patient(&patient("Corrupt", false)).unwrap();
        db.conn()
            .execute_batch("PRAGMA ignore_check_constraints = ON;")
            .unwrap();
        db.conn()
            .execute("UPDATE patients SET sickness = 7 WHERE id = ?", [id])
            .unwrap();

        let err = db.get_patient(id).unwrap_err();
        assert!(matches!(
            err,
            DbError::Sqlite(rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, _))
        ));
        assert!(db.list_patients().is_err());
    }
}

//! Repository contract for patient records.
//!
//! Callers such as the seeder and the demo runner depend only on
//! [`PatientRepository`], never on SQL. [`Database`] is the SQLite-backed
//! implementation.
//!
//! # Invariants
//! - `save` inserts when `id` is `None` and updates the matching row otherwise.
//! - Saving a record whose `id` has no stored row fails with `DbError::NotFound`.
//! - `delete_by_id` on an absent id is a no-op returning `false`.

use tracing::debug;

use crate::db::{Database, DbError, DbResult};
use crate::models::{Patient, PatientId};

/// Storage access for [`Patient`] records.
pub trait PatientRepository {
    /// Insert or update, returning the record with `id` populated.
    fn save(&self, patient: Patient) -> DbResult<Patient>;

    /// All stored records, ordered by the storage.
    fn find_all(&self) -> DbResult<Vec<Patient>>;

    /// The record with `id`, or `None` when absent.
    fn find_by_id(&self, id: PatientId) -> DbResult<Option<Patient>>;

    /// Remove the record with `id`. Returns whether a record was removed.
    fn delete_by_id(&self, id: PatientId) -> DbResult<bool>;

    /// All records whose `sickness` flag equals `sickness`.
    fn find_by_sickness(&self, sickness: bool) -> DbResult<Vec<Patient>>;
}

impl PatientRepository for Database {
    fn save(&self, mut patient: Patient) -> DbResult<Patient> {
        match patient.id {
            None => {
                let id = self.insert_patient(&patient)?;
                patient.id = Some(id);
                debug!(patient_id = id, "inserted patient");
            }
            Some(id) => {
                if !self.update_patient(&patient)? {
                    return Err(DbError::NotFound(format!("patient {}", id)));
                }
                debug!(patient_id = id, "updated patient");
            }
        }
        Ok(patient)
    }

    fn find_all(&self) -> DbResult<Vec<Patient>> {
        let patients = self.list_patients()?;
        debug!(count = patients.len(), "listed patients");
        Ok(patients)
    }

    fn find_by_id(&self, id: PatientId) -> DbResult<Option<Patient>> {
        let patient = self.get_patient(id)?;
        debug!(patient_id = id, found = patient.is_some(), "looked up patient");
        Ok(patient)
    }

    fn delete_by_id(&self, id: PatientId) -> DbResult<bool> {
        let removed = self.delete_patient(id)?;
        debug!(patient_id = id, removed, "deleted patient");
        Ok(removed)
    }

    fn find_by_sickness(&self, sickness: bool) -> DbResult<Vec<Patient>> {
        let patients = self.list_patients_by_sickness(sickness)?;
        debug!(sickness, count = patients.len(), "filtered patients by sickness");
        Ok(patients)
    }
}

//! Demo data seeding.
//!
//! Seeding is insert-only and not idempotent: every call appends six new
//! records, so re-running against a file-backed database produces duplicates.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::db::DbResult;
use crate::models::{Patient, DEFAULT_SCORE};
use crate::repository::PatientRepository;

/// First names seeded with the "Morsi" family name, all not sick.
pub const MORSI_FIRST_NAMES: [&str; 3] = ["Line", "Omar", "Hiba"];

/// First names seeded with the "Nouri" family name, all sick.
pub const NOURI_FIRST_NAMES: [&str; 3] = ["Khaled", "Yasmine", "Hajar"];

/// Insert the six demo patients and return them with their assigned ids.
///
/// Every record gets `now` as its date of birth and [`DEFAULT_SCORE`].
pub fn seed_demo_patients<R>(repo: &R, now: DateTime<Utc>) -> DbResult<Vec<Patient>>
where
    R: PatientRepository + ?Sized,
{
    let families = [
        (MORSI_FIRST_NAMES, "Morsi", false),
        (NOURI_FIRST_NAMES, "Nouri", true),
    ];

    let mut seeded = Vec::with_capacity(MORSI_FIRST_NAMES.len() + NOURI_FIRST_NAMES.len());
    for (first_names, family, sickness) in families {
        for first in first_names {
            let name = format!("{} {}", first, family);
            let patient = Patient::new(name, now, sickness, DEFAULT_SCORE);
            seeded.push(repo.save(patient)?);
        }
    }

    info!(count = seeded.len(), "seeded demo patients");
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use chrono::TimeZone;

    #[test]
    fn test_seed_order_and_flags() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();

        let seeded = seed_demo_patients(&db, now).unwrap();

        let names: Vec<_> = seeded.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Line Morsi",
                "Omar Morsi",
                "Hiba Morsi",
                "Khaled Nouri",
                "Yasmine Nouri",
                "Hajar Nouri",
            ]
        );
        assert!(seeded[..3].iter().all(|p| !p.sickness));
        assert!(seeded[3..].iter().all(|p| p.sickness));
        assert!(seeded.iter().all(|p| p.score == 200 && p.date_of_birth == now));
    }

    #[test]
    fn test_seed_is_not_idempotent() {
        let db = Database::open_in_memory().unwrap();
        let now = Utc::now();

        seed_demo_patients(&db, now).unwrap();
        seed_demo_patients(&db, now).unwrap();

        assert_eq!(db.count_patients().unwrap(), 12);
    }
}

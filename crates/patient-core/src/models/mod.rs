//! Domain models for patient records.

mod patient;

pub use patient::*;

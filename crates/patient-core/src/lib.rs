//! Patient Records Core Library
//!
//! A single `Patient` record type persisted in SQLite behind an explicit
//! repository trait, plus a runner that seeds demo data and exercises every
//! repository operation in sequence.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer and row-level patient operations
//! - [`models`]: Domain types (`Patient`)
//! - [`repository`]: The `PatientRepository` trait and its SQLite implementation
//! - [`seed`]: Insert-only demo data seeding
//! - [`runner`]: The demo sequence and its text/JSON report

pub mod db;
pub mod models;
pub mod repository;
pub mod runner;
pub mod seed;

// Re-export commonly used types
pub use db::{Database, DbError, DbResult};
pub use models::{Patient, PatientId, DEFAULT_SCORE};
pub use repository::PatientRepository;
pub use runner::{run_demo, DemoError, DemoOptions, DemoReport, OutputFormat};
pub use seed::seed_demo_patients;

//! `patient-demo` entry point.
//!
//! Seeds six patients, lists them, renames and deletes one, then filters by
//! sickness. The report goes to stdout and logs go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use patient_core::runner::DEFAULT_NEW_NAME;
use patient_core::{run_demo, Database, DemoOptions, OutputFormat, PatientId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "patient-demo",
    about = "Seed and exercise the patient repository",
    version
)]
struct Cli {
    /// SQLite database file. Uses an in-memory database when omitted.
    #[arg(long, env = "PATIENT_DB_PATH")]
    database: Option<PathBuf>,

    /// Patient to fetch, rename and delete. Defaults to the first seeded id.
    #[arg(long, env = "PATIENT_TARGET_ID")]
    target_id: Option<PatientId>,

    /// Name given to the target patient in the update step.
    #[arg(long, default_value = DEFAULT_NEW_NAME)]
    new_name: String,

    /// Report format: text or json.
    #[arg(long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl Cli {
    fn open_database(&self) -> anyhow::Result<Database> {
        match &self.database {
            Some(path) => Database::open(path)
                .with_context(|| format!("failed to open database {}", path.display())),
            None => Database::open_in_memory().context("failed to open in-memory database"),
        }
    }

    fn demo_options(self) -> DemoOptions {
        DemoOptions {
            target_id: self.target_id,
            new_name: self.new_name,
            format: self.format,
            ..DemoOptions::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let db = cli.open_database()?;
    let options = cli.demo_options();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = run_demo(&db, &mut out, &options).context("demo run failed")?;
    out.flush().context("failed to flush report")?;

    info!(
        seeded = report.seeded.len(),
        remaining = report.remaining.len(),
        "patient demo complete"
    );
    Ok(())
}

//! wks CLI — offline rehearsal for timecard imports.
//!
//! Runs the reconciliation engine against an in-memory grid seeded from a
//! JSON snapshot file, so an import can be rehearsed (or its plan inspected)
//! before touching a real booking surface.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use wks_grid_mem::{GridSeed, MemGrid, RowSeed};
use wks_runtime::{ImportEngine, RunOptions, RunOutcome};

#[derive(Parser)]
#[command(name = "wks")]
#[command(about = "Weekly timesheet grid reconciliation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dry run: report match/fill/missing counts without mutating the grid.
    Plan {
        #[command(flatten)]
        target: Target,
    },

    /// Full run against the seeded grid; optionally dump the grid after.
    Run {
        #[command(flatten)]
        target: Target,

        /// Do not grow the grid when the plan overflows.
        #[arg(long, default_value_t = false)]
        no_add_rows: bool,

        /// Only write non-zero desired hours; keep existing values otherwise.
        #[arg(long, default_value_t = false)]
        keep_existing_hours: bool,

        /// Blank the day cells of rows the payload does not touch.
        #[arg(long, default_value_t = false)]
        clear_untouched: bool,

        /// Skip the recalculation control.
        #[arg(long, default_value_t = false)]
        no_recalculate: bool,

        /// Write the post-run grid snapshot to this path.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct Target {
    /// Desired payload JSON (flat rows[] or nested days[] shape).
    #[arg(long)]
    payload: PathBuf,

    /// Grid snapshot JSON to seed the in-memory host from.
    #[arg(long, conflicts_with = "blank_rows")]
    grid: Option<PathBuf>,

    /// Start from this many blank rows instead of a snapshot file.
    #[arg(long)]
    blank_rows: Option<usize>,

    /// Print the outcome as JSON instead of plain text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Target {
    fn load_payload(&self) -> Result<String> {
        fs::read_to_string(&self.payload)
            .with_context(|| format!("reading payload {}", self.payload.display()))
    }

    fn seed_grid(&self) -> Result<MemGrid> {
        if let Some(path) = &self.grid {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading grid snapshot {}", path.display()))?;
            let seed: GridSeed = serde_json::from_str(&raw)
                .with_context(|| format!("parsing grid snapshot {}", path.display()))?;
            return Ok(MemGrid::from_seed(seed));
        }

        let blank = self.blank_rows.unwrap_or(0);
        Ok(MemGrid::from_seed(GridSeed {
            rows: vec![RowSeed::default(); blank],
            ..GridSeed::default()
        }))
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn report(outcome: &RunOutcome, as_json: bool) -> Result<bool> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else if outcome.ok {
        println!("{}", outcome.message.as_deref().unwrap_or("ok"));
    } else {
        eprintln!("{}", outcome.error.as_deref().unwrap_or("run failed"));
    }
    Ok(outcome.ok)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let engine = ImportEngine::new();

    let ok = match cli.cmd {
        Commands::Plan { target } => {
            let payload = target.load_payload()?;
            let host = target.seed_grid()?;
            let options = RunOptions {
                dry_run: true,
                ..RunOptions::default()
            };
            let outcome = engine.run(&host, &payload, &options).await;
            report(&outcome, target.json)?
        }

        Commands::Run {
            target,
            no_add_rows,
            keep_existing_hours,
            clear_untouched,
            no_recalculate,
            out,
        } => {
            let payload = target.load_payload()?;
            let host = target.seed_grid()?;
            let options = RunOptions {
                allow_add_rows: !no_add_rows,
                overwrite_row_hours: !keep_existing_hours,
                clear_untouched_rows: clear_untouched,
                trigger_recalculation: !no_recalculate,
                dry_run: false,
            };
            let outcome = engine.run(&host, &payload, &options).await;

            if let Some(path) = out {
                let seed = host.to_seed();
                fs::write(&path, serde_json::to_string_pretty(&seed)?)
                    .with_context(|| format!("writing grid snapshot {}", path.display()))?;
                debug!(path = %path.display(), "wrote post-run grid snapshot");
            }

            report(&outcome, target.json)?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

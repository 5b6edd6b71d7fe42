use crate::context::Context;
use crate::context::GlobalArgs;
use crate::seed;
use campus_store::migrate;
use clap::Parser;
use std::path::PathBuf;

/// CLI for store maintenance commands.
#[derive(Debug, Parser)]
pub struct DataCli {
    #[command(subcommand)]
    pub cmd: DataCommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum DataCommand {
    /// Write every record to stdout as JSONL.
    Export,
    /// Read JSONL records from stdin, replacing rows with the same id.
    Import,
    /// Record counts per collection.
    Stats,
    /// Copy a JSONL store into a SQLite database.
    Migrate {
        /// Path to the source JSONL file
        #[arg(long)]
        jsonl: PathBuf,
        /// Path to the destination SQLite database file
        #[arg(long)]
        sqlite: PathBuf,
    },
    /// Rewrite a JSONL store keeping only the latest entry per record.
    Compact {
        /// Input JSONL file to compact
        #[arg(long)]
        input: PathBuf,
        /// Output JSONL file to write results
        #[arg(long)]
        output: PathBuf,
    },
    /// Load the demo data set.
    Seed,
}

pub fn run(cli: DataCli, global: &GlobalArgs) -> anyhow::Result<()> {
    match cli.cmd {
        DataCommand::Migrate { jsonl, sqlite } => {
            let n = migrate::migrate_jsonl_to_sqlite(&jsonl, &sqlite)?;
            println!("Migrated {n} records");
        }
        DataCommand::Compact { input, output } => {
            let (read, written) = migrate::compact_jsonl(&input, &output)?;
            println!("Read {read} records, wrote {written} records");
        }
        cmd => {
            let ctx = Context::open(global)?;
            match cmd {
                DataCommand::Export => {
                    let mut out = std::io::stdout();
                    ctx.store.export(&mut out)?;
                }
                DataCommand::Import => {
                    let mut input = std::io::stdin();
                    let n = ctx.store.import(&mut input)?;
                    println!("Imported {n} records");
                }
                DataCommand::Stats => {
                    let stats = ctx.store.stats()?;
                    println!("{stats}");
                }
                DataCommand::Seed => {
                    let n = seed::seed(&ctx)?;
                    if ctx.user_id().is_none() {
                        tracing::warn!("no current user; timetable and grades were not seeded");
                    }
                    println!("Seeded {n} records");
                }
                DataCommand::Migrate { .. } | DataCommand::Compact { .. } => unreachable!(),
            }
        }
    }
    Ok(())
}

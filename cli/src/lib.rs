pub mod academic;
pub mod context;
pub mod data;
pub mod exchange;
pub mod explore;
pub mod logging;
pub mod parse;
pub mod pulse;
mod seed;

use clap::Parser;
use context::GlobalArgs;
use serde::Serialize;

/// Campus companion: daily pulse, exchange, explorer and academic tools.
#[derive(Debug, Parser)]
#[command(name = "campus", version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Mail summaries and the mess menu.
    Pulse(pulse::PulseCli),
    /// Marketplace, lost & found and shared rides.
    Exchange(exchange::ExchangeCli),
    /// Nearby places and recommendations.
    Explore(explore::ExploreCli),
    /// Courses, assignments, grades and timetable.
    Academic(academic::AcademicCli),
    /// Store maintenance: export, import, stats, migrate, compact, seed.
    Data(data::DataCli),
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let global = cli.global;
    match cli.cmd {
        Command::Pulse(c) => pulse::run(c, &global),
        Command::Exchange(c) => exchange::run(c, &global),
        Command::Explore(c) => explore::run(c, &global),
        Command::Academic(c) => academic::run(c, &global),
        Command::Data(c) => data::run(c, &global),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

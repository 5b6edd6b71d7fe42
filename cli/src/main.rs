use campus_cli::Cli;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    campus_cli::logging::init_logging();
    let cli = Cli::parse();
    campus_cli::run(cli)
}

use anyhow::Result;

use fantasy_power_rankings::cli::Command;
use fantasy_power_rankings::{handle_completions, handle_fetch, handle_rank, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Fetch {
            league_id,
            year,
            refresh,
        } => handle_fetch(*league_id, *year, *refresh),
        Command::Rank(args) => handle_rank(args),
        Command::Completions { shell } => handle_completions(*shell),
    }
}

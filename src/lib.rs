pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod ranking;
pub mod report;
pub mod services;

use anyhow::Result;
use chrono::Datelike;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::{Command, RankArgs};
use crate::config::settings::{AppConfig, EspnCredentials};
use crate::services::ingestion::IngestionService;
use crate::services::processing::{LeagueSource, OutputFormat, ProcessingService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_fetch(league_id: i64, year: Option<i32>, refresh: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let credentials = EspnCredentials::from_env();
        let service = IngestionService::new(&config, &credentials)?;
        service
            .run(league_id, year.unwrap_or_else(current_season), refresh)
            .await
            .map(|_| ())
    })
}

pub fn handle_rank(args: &RankArgs) -> Result<()> {
    let config = AppConfig::new().with_ranking_overrides(args.max_week, args.no_median);
    let service = ProcessingService::new(config)?;
    service.run(&league_source(args)?, args.week, output_format(args))
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn league_source(args: &RankArgs) -> Result<LeagueSource> {
    match (&args.input, args.league_id) {
        (Some(path), _) => Ok(LeagueSource::File(path.clone())),
        (None, Some(league_id)) => Ok(LeagueSource::Cached {
            league_id,
            season: args.year.unwrap_or_else(current_season),
        }),
        (None, None) => anyhow::bail!("Either --input or --league-id is required"),
    }
}

fn output_format(args: &RankArgs) -> OutputFormat {
    if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    }
}

fn current_season() -> i32 {
    chrono::Local::now().year()
}

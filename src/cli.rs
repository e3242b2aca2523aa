use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fantasy football power rankings")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Fetch a league from ESPN and store it in the cache
    Fetch {
        /// ESPN league ID
        #[arg(short, long)]
        league_id: i64,
        /// Season year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
        /// Ignore any cached response and download again
        #[arg(long)]
        refresh: bool,
    },
    /// Calculate power rankings from a cached league or a snapshot file
    Rank(RankArgs),
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct RankArgs {
    /// League snapshot JSON file
    #[arg(short, long, conflicts_with = "league_id")]
    pub input: Option<PathBuf>,
    /// ESPN league ID of a previously fetched league
    #[arg(short, long, required_unless_present = "input")]
    pub league_id: Option<i64>,
    /// Season year (defaults to the current year)
    #[arg(short, long, requires = "league_id")]
    pub year: Option<i32>,
    /// Rank through this week (defaults to the league's current week)
    #[arg(short, long, allow_negative_numbers = true)]
    pub week: Option<i32>,
    /// Last week of the regular season
    #[arg(long)]
    pub max_week: Option<usize>,
    /// Leave out the vs-median and combined records
    #[arg(long)]
    pub no_median: bool,
    /// Print JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from(["app", "fetch", "-l", "123456", "--year", "2023"]).unwrap();

        assert_eq!(
            cli.command,
            Command::Fetch {
                league_id: 123456,
                year: Some(2023),
                refresh: false,
            }
        );
    }

    #[test]
    fn test_parse_rank_from_file() {
        let cli = Cli::try_parse_from([
            "app", "rank", "--input", "league.json", "--week", "6", "--no-median",
        ])
        .unwrap();

        let Command::Rank(args) = cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(args.input, Some(PathBuf::from("league.json")));
        assert_eq!(args.week, Some(6));
        assert!(args.no_median);
        assert!(!args.json);
    }

    #[test]
    fn test_rank_accepts_negative_week_for_validation() {
        let cli = Cli::try_parse_from(["app", "rank", "-l", "1", "-w", "-2"]).unwrap();

        let Command::Rank(args) = cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(args.week, Some(-2));
    }

    #[test]
    fn test_rank_needs_a_source() {
        assert!(Cli::try_parse_from(["app", "rank"]).is_err());
        assert!(
            Cli::try_parse_from(["app", "rank", "-i", "a.json", "-l", "1"]).is_err()
        );
    }
}

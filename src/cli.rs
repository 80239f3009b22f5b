use std::path::PathBuf;

use clap::Parser;

use crate::settings::{HistoryOrder, RankingSettings, SETTINGS_FILE};

#[derive(Parser, Debug)]
#[command(name = "slack-emoji-rankings")]
#[command(about = "Rank the emoji reactions used across a Slack workspace's public channels")]
pub struct Cli {
    /// Settings file path
    #[arg(short, long, default_value = SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Number of emojis to keep in the report
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Maximum number of recent messages fetched per channel
    #[arg(long)]
    pub history_limit: Option<u16>,

    /// Only count messages posted on or after January 1st of this year (UTC)
    #[arg(short, long)]
    pub cutoff_year: Option<i32>,

    /// Output CSV file path
    #[arg(short, long)]
    pub output: Option<String>,

    /// Order in which channel history is returned
    #[arg(long, value_enum)]
    pub history_order: Option<HistoryOrder>,
}

impl Cli {
    /// Overrides the values of `ranking` that were given on the command line.
    pub fn apply(&self, mut ranking: RankingSettings) -> RankingSettings {
        if let Some(top) = self.top {
            ranking.rank_limit = top;
        }
        if let Some(limit) = self.history_limit {
            ranking.history_limit = limit;
        }
        if let Some(year) = self.cutoff_year {
            ranking.cutoff_year = year;
        }
        if let Some(output) = &self.output {
            ranking.output_file = output.clone();
        }
        if let Some(order) = self.history_order {
            ranking.history_order = order;
        }
        ranking
    }
}

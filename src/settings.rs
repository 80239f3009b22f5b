use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{AppError, Result};

pub const SETTINGS_FILE: &str = "settings.toml";
pub const DEFAULT_OUTPUT_FILE: &str = "emoji_rankings.csv";
pub const DEFAULT_RANK_LIMIT: usize = 30;
pub const DEFAULT_HISTORY_LIMIT: u16 = 200;
pub const DEFAULT_CUTOFF_YEAR: i32 = 2024;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub ranking: RankingSettings,
}

/// Order in which the history endpoint returns messages.
///
/// `NewestFirst` lets the aggregator stop a channel at the first message older
/// than the cutoff. Slack's `conversations.history` returns newest first; use
/// `Unordered` for a source that does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryOrder {
    #[default]
    NewestFirst,
    Unordered,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    #[serde(rename = "rank-limit")]
    pub rank_limit: usize,
    #[serde(rename = "history-limit")]
    pub history_limit: u16,
    #[serde(rename = "output-file")]
    pub output_file: String,
    #[serde(rename = "cutoff-year")]
    pub cutoff_year: i32,
    #[serde(rename = "history-order")]
    pub history_order: HistoryOrder,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            rank_limit: DEFAULT_RANK_LIMIT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            cutoff_year: DEFAULT_CUTOFF_YEAR,
            history_order: HistoryOrder::default(),
        }
    }
}

impl RankingSettings {
    /// Start of `cutoff_year` in UTC. Messages strictly before it are out of range.
    pub fn cutoff(&self) -> Result<DateTime<Utc>> {
        NaiveDate::from_ymd_opt(self.cutoff_year, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .ok_or(AppError::InvalidCutoffYear(self.cutoff_year))
    }
}

impl Settings {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| AppError::ReadFile {
            path: path.display().to_string(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| AppError::TomlParse(e.to_string()))
    }
}

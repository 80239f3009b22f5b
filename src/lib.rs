mod cli;
mod error;
mod model;
mod pipeline;
mod ranking;
mod report;
mod settings;
mod slack;

#[cfg(test)]
mod test_support;

use slack_morphism::prelude::*;

pub use cli::Cli;
pub use error::{AppError, Result};
pub use model::{Channel, ChannelPage, Message, Reaction};
pub use pipeline::{RankingOutcome, RunEvent, RunSummary, collect_usage, run_rankings};
pub use ranking::{
    ChannelScan, EmojiUsage, RankedEntry, StopReason, aggregate_messages, parse_slack_ts, rank,
};
pub use report::{format_table, write_report};
pub use settings::{HistoryOrder, RankingSettings, Settings};
pub use slack::{SlackApiSource, SlackSource, list_all_channels};

pub const TOKEN_ENV_VAR: &str = "SLACK_API_TOKEN";

pub fn load_token() -> Result<String> {
    token_from(std::env::var(TOKEN_ENV_VAR).ok())
}

/// A blank value counts as missing.
fn token_from(value: Option<String>) -> Result<String> {
    value
        .filter(|t| !t.trim().is_empty())
        .ok_or(AppError::MissingToken)
}

pub async fn run_emoji_rankings_async(cli: &Cli) -> Result<()> {
    let token = load_token()?;
    let settings = Settings::load_from(&cli.settings)?;
    let ranking = cli.apply(settings.ranking);

    let connector =
        SlackClientHyperConnector::new().map_err(|e| AppError::SlackApi(e.to_string()))?;
    let source = SlackApiSource::new(SlackClient::new(connector), &token);

    println!(
        "Ranking emoji reactions since {} into {}...",
        ranking.cutoff_year, ranking.output_file
    );

    let outcome = run_rankings(&source, &ranking, |event| match event {
        RunEvent::Authenticated(user) => println!("Authenticated as {}", user),
        RunEvent::ChannelsListed(count) => println!("All channels number is {}", count),
        RunEvent::Channel {
            current,
            total,
            name,
        } => println!("[{}/{}] #{}", current, total, name),
    })
    .await?;

    let summary = &outcome.summary;
    println!("{}", summary);

    println!("Emoji Usage Rankings:");
    print!("{}", format_table(&outcome.ranked, ranking.rank_limit));
    println!(
        "Emoji rankings saved to {} ({} of {} emojis).",
        ranking.output_file, summary.rows_written, summary.distinct_emojis
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_env_var_name() {
        assert_eq!(TOKEN_ENV_VAR, "SLACK_API_TOKEN");
    }

    #[test]
    fn test_token_from_missing_or_blank() {
        for value in [None, Some(String::new()), Some("   ".to_string())] {
            assert!(matches!(token_from(value), Err(AppError::MissingToken)));
        }
    }

    #[test]
    fn test_token_from_passes_value_through() {
        let token = token_from(Some("xoxb-123-abc".to_string())).unwrap();
        assert_eq!(token, "xoxb-123-abc");
    }
}

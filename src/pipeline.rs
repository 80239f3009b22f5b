use std::fmt;
use std::path::Path;

use crate::model::Channel;
use crate::ranking::{self, EmojiUsage, RankedEntry, StopReason};
use crate::report;
use crate::settings::RankingSettings;
use crate::slack::{self, SlackSource};
use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub user: String,
    pub channels_listed: usize,
    pub archived_skipped: usize,
    pub history_failures: usize,
    pub invalid_timestamps: usize,
    pub messages_counted: usize,
    pub distinct_emojis: usize,
    pub rows_written: usize,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Scanned {} messages, skipped {} archived channels, {} channels failed, {} channels stopped at an invalid timestamp.",
            self.messages_counted, self.archived_skipped, self.history_failures, self.invalid_timestamps
        )
    }
}

/// Console-facing milestones of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent<'a> {
    Authenticated(&'a str),
    ChannelsListed(usize),
    Channel {
        current: usize,
        total: usize,
        name: &'a str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingOutcome {
    pub ranked: Vec<RankedEntry>,
    pub summary: RunSummary,
}

/// Fetches and aggregates the history of every channel, one at a time.
///
/// Archived channels are skipped without an API call. A failed history
/// request is logged and the channel contributes nothing. `progress` is
/// called once per channel with `(position, total, channel name)`.
pub async fn collect_usage<S, F>(
    source: &S,
    channels: &[Channel],
    settings: &RankingSettings,
    summary: &mut RunSummary,
    mut progress: F,
) -> Result<EmojiUsage>
where
    S: SlackSource,
    F: FnMut(usize, usize, &str),
{
    let cutoff = settings.cutoff()?;
    let mut usage = EmojiUsage::new();

    for (i, channel) in channels.iter().enumerate() {
        progress(i + 1, channels.len(), &channel.name);

        if channel.is_archived {
            tracing::debug!(channel = %channel.name, "skipping archived channel");
            summary.archived_skipped += 1;
            continue;
        }

        let messages = match source
            .channel_history(&channel.id, settings.history_limit)
            .await
        {
            Ok(messages) => messages,
            Err(e) => {
                tracing::warn!(channel = %channel.name, error = %e, "failed to fetch channel history");
                summary.history_failures += 1;
                continue;
            }
        };

        let scan =
            ranking::aggregate_messages(&messages, cutoff, settings.history_order, &mut usage);

        if let StopReason::InvalidTimestamp(ts) = &scan.stop {
            tracing::warn!(channel = %channel.name, ts = %ts, "invalid message timestamp, skipping rest of channel");
            summary.invalid_timestamps += 1;
        }
        tracing::debug!(
            channel = %channel.name,
            fetched = messages.len(),
            counted = scan.messages_counted,
            stop = ?scan.stop,
            "aggregated channel"
        );
        summary.messages_counted += scan.messages_counted;
    }

    summary.distinct_emojis = usage.len();
    Ok(usage)
}

/// Runs the whole job: authenticate, list channels, aggregate, rank, write.
pub async fn run_rankings<S, F>(
    source: &S,
    settings: &RankingSettings,
    mut on_event: F,
) -> Result<RankingOutcome>
where
    S: SlackSource,
    F: FnMut(RunEvent<'_>),
{
    let cutoff = settings.cutoff()?;
    let user = source.auth_test().await?;
    tracing::debug!(user = %user, "authenticated");
    on_event(RunEvent::Authenticated(&user));

    let channels = slack::list_all_channels(source).await?;
    tracing::debug!(count = channels.len(), cutoff = %cutoff, "listed public channels");
    on_event(RunEvent::ChannelsListed(channels.len()));

    let mut summary = RunSummary {
        user,
        channels_listed: channels.len(),
        ..RunSummary::default()
    };

    let usage = collect_usage(source, &channels, settings, &mut summary, |current, total, name| {
        on_event(RunEvent::Channel {
            current,
            total,
            name,
        })
    })
    .await?;
    let ranked = ranking::rank(&usage);

    summary.rows_written = report::write_report(
        Path::new(&settings.output_file),
        &ranked,
        settings.rank_limit,
    )?;

    Ok(RankingOutcome { ranked, summary })
}

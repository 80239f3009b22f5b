use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::Message;
use crate::settings::HistoryOrder;
use crate::{AppError, Result};

/// Cumulative reaction count per emoji name. Counts only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiUsage {
    counts: HashMap<String, u64>,
}

impl EmojiUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` to the running total for `name`, inserting it if absent.
    pub fn add(&mut self, name: &str, count: u64) {
        match self.counts.get_mut(name) {
            Some(total) => *total = total.saturating_add(count),
            None => {
                self.counts.insert(name.to_string(), count);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.counts.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl<'a> FromIterator<(&'a str, u64)> for EmojiUsage {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut usage = Self::new();
        for (name, count) in iter {
            usage.add(name, count);
        }
        usage
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub name: String,
    pub count: u64,
}

/// Why the walk over a channel's history ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    Exhausted,
    ReachedCutoff,
    InvalidTimestamp(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelScan {
    pub messages_counted: usize,
    pub stop: StopReason,
}

/// Parses a Slack `ts` such as `1709251200.000100`. Sub-second precision is dropped.
pub fn parse_slack_ts(ts: &str) -> Result<DateTime<Utc>> {
    let seconds = ts
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite())
        .ok_or_else(|| AppError::InvalidTimestamp(ts.to_string()))?;

    DateTime::from_timestamp(seconds.trunc() as i64, 0)
        .ok_or_else(|| AppError::InvalidTimestamp(ts.to_string()))
}

/// Folds the reactions of `messages` into `usage`.
///
/// With `HistoryOrder::NewestFirst` the first message older than `cutoff` ends
/// the walk: nothing from it or any later message is counted. With
/// `HistoryOrder::Unordered` old messages are skipped one by one. An
/// unparseable timestamp ends the walk in both modes.
pub fn aggregate_messages(
    messages: &[Message],
    cutoff: DateTime<Utc>,
    order: HistoryOrder,
    usage: &mut EmojiUsage,
) -> ChannelScan {
    let mut messages_counted = 0;

    for message in messages {
        let posted_at = match parse_slack_ts(&message.ts) {
            Ok(posted_at) => posted_at,
            Err(_) => {
                return ChannelScan {
                    messages_counted,
                    stop: StopReason::InvalidTimestamp(message.ts.clone()),
                };
            }
        };

        if posted_at < cutoff {
            match order {
                HistoryOrder::NewestFirst => {
                    return ChannelScan {
                        messages_counted,
                        stop: StopReason::ReachedCutoff,
                    };
                }
                HistoryOrder::Unordered => continue,
            }
        }

        for reaction in &message.reactions {
            usage.add(&reaction.name, reaction.count);
        }
        messages_counted += 1;
    }

    ChannelScan {
        messages_counted,
        stop: StopReason::Exhausted,
    }
}

/// Orders the table by count descending, ties broken by emoji name ascending.
pub fn rank(usage: &EmojiUsage) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = usage
        .iter()
        .map(|(name, count)| RankedEntry {
            name: name.to_string(),
            count,
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    entries
}

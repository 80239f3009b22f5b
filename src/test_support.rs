use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::model::{Channel, ChannelPage, Message, Reaction};
use crate::slack::SlackSource;
use crate::{AppError, Result};

/// In-memory `SlackSource`. Channel pages are chained with cursors `"1"`, `"2"`, ...
#[derive(Default)]
pub struct FakeSource {
    user: Option<String>,
    pages: Vec<Vec<Channel>>,
    failing_page: Option<usize>,
    histories: HashMap<String, Vec<Message>>,
    failing_histories: HashSet<String>,
    list_calls: Mutex<Vec<Option<String>>>,
    history_calls: Mutex<Vec<(String, u16)>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            user: Some("U0TESTER".to_string()),
            ..Self::default()
        }
    }

    pub fn unauthenticated(mut self) -> Self {
        self.user = None;
        self
    }

    pub fn with_channel_page(mut self, channels: Vec<Channel>) -> Self {
        self.pages.push(channels);
        self
    }

    pub fn failing_channel_page(mut self, index: usize) -> Self {
        self.failing_page = Some(index);
        self
    }

    pub fn with_history(mut self, channel_id: &str, messages: Vec<Message>) -> Self {
        self.histories.insert(channel_id.to_string(), messages);
        self
    }

    pub fn failing_history(mut self, channel_id: &str) -> Self {
        self.failing_histories.insert(channel_id.to_string());
        self
    }

    pub fn list_calls(&self) -> Vec<Option<String>> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn history_calls(&self) -> Vec<(String, u16)> {
        self.history_calls.lock().unwrap().clone()
    }
}

impl SlackSource for FakeSource {
    async fn auth_test(&self) -> Result<String> {
        self.user
            .clone()
            .ok_or_else(|| AppError::Auth("invalid_auth".to_string()))
    }

    async fn list_channels(&self, cursor: Option<String>) -> Result<ChannelPage> {
        self.list_calls.lock().unwrap().push(cursor.clone());

        let index = match cursor {
            Some(c) => c.parse::<usize>().unwrap(),
            None => 0,
        };
        if self.failing_page == Some(index) {
            return Err(AppError::SlackApi("ratelimited".to_string()));
        }

        let channels = self.pages.get(index).cloned().unwrap_or_default();
        let next_cursor = if index + 1 < self.pages.len() {
            Some((index + 1).to_string())
        } else {
            Some(String::new())
        };

        Ok(ChannelPage {
            channels,
            next_cursor,
        })
    }

    async fn channel_history(&self, channel_id: &str, limit: u16) -> Result<Vec<Message>> {
        self.history_calls
            .lock()
            .unwrap()
            .push((channel_id.to_string(), limit));

        if self.failing_histories.contains(channel_id) {
            return Err(AppError::SlackApi("channel_not_found".to_string()));
        }

        let mut messages = self.histories.get(channel_id).cloned().unwrap_or_default();
        messages.truncate(limit as usize);
        Ok(messages)
    }
}

pub fn channel(id: &str, name: &str) -> Channel {
    Channel {
        id: id.to_string(),
        name: name.to_string(),
        is_archived: false,
    }
}

pub fn archived_channel(id: &str, name: &str) -> Channel {
    Channel {
        is_archived: true,
        ..channel(id, name)
    }
}

pub fn message(ts: &str, reactions: &[(&str, u64)]) -> Message {
    Message {
        ts: ts.to_string(),
        reactions: reactions
            .iter()
            .map(|(name, count)| Reaction {
                name: name.to_string(),
                count: *count,
            })
            .collect(),
    }
}

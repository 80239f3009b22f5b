use slack_morphism::prelude::*;

use crate::model::{Channel, ChannelPage, Message, Reaction};
use crate::{AppError, Result};

const CHANNELS_PAGE_LIMIT: u16 = 200;

/// The three calls the ranking run needs from Slack.
#[allow(async_fn_in_trait)]
pub trait SlackSource {
    /// Verifies the token and returns the authenticated user's name.
    async fn auth_test(&self) -> Result<String>;

    /// Fetches one page of public channels starting at `cursor`.
    async fn list_channels(&self, cursor: Option<String>) -> Result<ChannelPage>;

    /// Fetches up to `limit` most recent messages of a channel, newest first.
    async fn channel_history(&self, channel_id: &str, limit: u16) -> Result<Vec<Message>>;
}

pub struct SlackApiSource<SCHC>
where
    SCHC: SlackClientHttpConnector + Send + Sync,
{
    client: SlackClient<SCHC>,
    token: SlackApiToken,
}

impl<SCHC> SlackApiSource<SCHC>
where
    SCHC: SlackClientHttpConnector + Send + Sync,
{
    pub fn new(client: SlackClient<SCHC>, token: &str) -> Self {
        Self {
            client,
            token: SlackApiToken::new(SlackApiTokenValue(token.to_string())),
        }
    }
}

impl<SCHC> SlackSource for SlackApiSource<SCHC>
where
    SCHC: SlackClientHttpConnector + Send + Sync,
{
    async fn auth_test(&self) -> Result<String> {
        let session = self.client.open_session(&self.token);
        let response = session
            .auth_test()
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        Ok(user_from_auth(&response))
    }

    async fn list_channels(&self, cursor: Option<String>) -> Result<ChannelPage> {
        let session = self.client.open_session(&self.token);
        let request = SlackApiConversationsListRequest::new()
            .with_limit(CHANNELS_PAGE_LIMIT)
            .with_types(vec![SlackConversationType::Public])
            .opt_cursor(cursor.map(SlackCursorId));

        let response = session
            .conversations_list(&request)
            .await
            .map_err(|e| AppError::SlackApi(e.to_string()))?;

        Ok(ChannelPage {
            channels: response.channels.iter().map(channel_from_slack).collect(),
            next_cursor: non_empty_cursor(response.response_metadata.and_then(|m| m.next_cursor)),
        })
    }

    async fn channel_history(&self, channel_id: &str, limit: u16) -> Result<Vec<Message>> {
        let session = self.client.open_session(&self.token);
        let request = SlackApiConversationsHistoryRequest::new()
            .with_channel(SlackChannelId(channel_id.to_string()))
            .with_limit(limit);

        let response = session
            .conversations_history(&request)
            .await
            .map_err(|e| AppError::SlackApi(e.to_string()))?;

        Ok(response.messages.iter().map(message_from_slack).collect())
    }
}

/// Walks the channel listing until the cursor runs out.
///
/// Any failed page aborts the listing: a partial channel set would silently
/// under-report usage.
pub async fn list_all_channels<S: SlackSource>(source: &S) -> Result<Vec<Channel>> {
    let mut all_channels = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = source.list_channels(cursor).await?;
        tracing::debug!(count = page.channels.len(), "fetched channel page");

        all_channels.extend(page.channels);

        match page.next_cursor {
            Some(next) if !next.is_empty() => cursor = Some(next),
            _ => break,
        }
    }

    Ok(all_channels)
}

fn non_empty_cursor(cursor: Option<SlackCursorId>) -> Option<String> {
    cursor.map(|c| c.0).filter(|c| !c.is_empty())
}

/// Prefers the user name, falling back to the id when Slack omits it.
fn user_from_auth(response: &SlackApiAuthTestResponse) -> String {
    response
        .user
        .clone()
        .unwrap_or_else(|| response.user_id.0.clone())
}

fn channel_from_slack(channel: &SlackChannelInfo) -> Channel {
    Channel {
        id: channel.id.0.clone(),
        name: channel.name.clone().unwrap_or_else(|| "unknown".to_string()),
        is_archived: channel.flags.is_archived.unwrap_or(false),
    }
}

fn message_from_slack(message: &SlackHistoryMessage) -> Message {
    let reactions = message
        .content
        .reactions
        .iter()
        .flatten()
        .map(|r| Reaction {
            name: r.name.0.clone(),
            count: r.count as u64,
        })
        .collect();

    Message {
        ts: message.origin.ts.0.clone(),
        reactions,
    }
}

//! Transcript generation
//!
//! A transcript is a point-in-time snapshot of a ticket channel's full
//! message history, rendered one line per message in chronological order.
//! It is generated during the close transition, immediately before the
//! channel is deleted, and never updated afterwards.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::surface::{ChannelId, HistoryMessage, TicketSurface};

/// Placeholder rendered for messages with no text content
const EMPTY_CONTENT_PLACEHOLDER: &str = "[attachment/embed]";

/// An immutable archival document for one closed ticket
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: Uuid,
    /// Name of the channel at close time
    pub channel_name: String,
    pub generated_at: DateTime<Utc>,
    /// Rendered body, one line per message, oldest first
    pub body: String,
    /// Number of messages captured
    pub message_count: usize,
}

impl Transcript {
    /// Suggested filename for attachment delivery
    #[must_use]
    pub fn filename(&self) -> String {
        format!("transcript-{}.txt", self.channel_name)
    }
}

/// Render one history message as a transcript line
fn render_line(message: &HistoryMessage) -> String {
    let content = if message.content.trim().is_empty() {
        EMPTY_CONTENT_PLACEHOLDER
    } else {
        message.content.as_str()
    };
    format!(
        "[{}] {}: {}",
        message.timestamp.format("%Y-%m-%d %H:%M:%S"),
        message.author,
        content
    )
}

/// Fetch a channel's full history and render it into a [`Transcript`].
///
/// Message order is preserved exactly as fetched (oldest first); every
/// message appears exactly once. Empty-content messages render a
/// placeholder rather than being omitted.
pub async fn generate(surface: &dyn TicketSurface, channel: ChannelId) -> Result<Transcript> {
    let channel_name = surface.channel_name(channel).await?;
    let history = surface.fetch_history(channel).await?;

    let body = history
        .iter()
        .map(render_line)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Transcript {
        id: Uuid::new_v4(),
        channel_name,
        generated_at: Utc::now(),
        message_count: history.len(),
        body,
    })
}

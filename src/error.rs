//! Error types for ticketry
//!
//! All fallible operations in the crate return [`Result`], which wraps
//! [`TicketryError`]. The taxonomy distinguishes expected-absent data
//! (handled at the storage boundary, never surfaced), authorization
//! failures (surfaced as user-visible notices), stale references
//! (degraded, not errors), and transport failures against the messaging
//! surface (abort the current operation).

use thiserror::Error;

use crate::surface::{ChannelId, GuildId};
use crate::ticket::TicketState;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, TicketryError>;

/// All errors produced by ticketry operations
#[derive(Debug, Error)]
pub enum TicketryError {
    /// Filesystem-level failure while persisting a document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted document could not be serialized
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The guild has no active license; panel and config operations are gated
    #[error("guild {guild} has no active license")]
    Unlicensed { guild: GuildId },

    /// A category value was submitted that the guild does not configure
    #[error("unknown ticket category '{value}'")]
    UnknownCategory { value: String },

    /// The channel is not a ticket known to the lifecycle engine
    #[error("channel {channel} is not an open ticket")]
    UnknownTicket { channel: ChannelId },

    /// The requested action is not legal from the ticket's current state
    #[error("cannot {action} a ticket in state {state}")]
    InvalidTransition { state: TicketState, action: &'static str },

    /// The messaging surface rejected or failed an operation
    #[error("surface error: {message}")]
    Surface { message: String },

    /// Service settings could not be loaded
    #[error("configuration error: {0}")]
    Settings(#[from] config::ConfigError),

    /// Catch-all for context-specific failures
    #[error("{0}")]
    Custom(String),
}

impl TicketryError {
    /// Wrap a messaging-surface failure
    pub fn surface(message: impl Into<String>) -> Self {
        Self::Surface {
            message: message.into(),
        }
    }

    /// True when the error should be rendered to the acting user as an
    /// ephemeral notice rather than logged as a service fault.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Unlicensed { .. }
                | Self::UnknownCategory { .. }
                | Self::UnknownTicket { .. }
                | Self::InvalidTransition { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_classification() {
        let err = TicketryError::Unlicensed {
            guild: GuildId(1),
        };
        assert!(err.is_user_facing());

        let err = TicketryError::surface("send failed");
        assert!(!err.is_user_facing());
    }

    #[test]
    fn display_messages() {
        let err = TicketryError::UnknownCategory {
            value: "billing".into(),
        };
        assert_eq!(err.to_string(), "unknown ticket category 'billing'");
    }
}

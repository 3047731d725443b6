//! Interactive messaging surface boundary
//!
//! The chat platform itself (gateway, rendering of embeds/buttons/modals,
//! permission plumbing) is an external collaborator. This module defines
//! the typed identifiers and the [`TicketSurface`] trait through which the
//! lifecycle engine drives it. Everything the engine needs is expressed
//! here; nothing platform-specific leaks past this boundary.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

macro_rules! snowflake_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self(raw)
            }
        }
    };
}

snowflake_id!(
    /// A served community/tenant; the unit of configuration and licensing
    GuildId
);
snowflake_id!(
    /// A text channel; each ticket occupies exactly one
    ChannelId
);
snowflake_id!(
    /// A platform user (ticket opener or staff member)
    UserId
);
snowflake_id!(
    /// A guild role, typically the configured staff role
    RoleId
);
snowflake_id!(
    /// A channel grouping; tickets move between "open" and "claimed" groups
    CategoryId
);

impl UserId {
    /// Render as an inline mention
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

impl RoleId {
    /// Render as an inline role mention
    #[must_use]
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.0)
    }
}

/// A principal granted access to a restricted ticket channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    User(UserId),
    Role(RoleId),
}

/// Lifecycle actions exposed as per-ticket controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    Claim,
    Hold,
    AddParticipant,
    Escalate,
    Close,
}

/// One rendered control (button) on a ticket or panel message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub action: ControlAction,
    pub label: String,
    pub emoji: String,
}

/// One selectable option on the intake panel's category selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub description: String,
    pub emoji: String,
    pub value: String,
}

/// A render-agnostic rich message: the surface decides whether this becomes
/// an embed, a card, or plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
    /// 24-bit RGB accent
    pub color: u32,
    /// Lifecycle controls to attach, if any
    pub controls: Vec<Control>,
    /// Category selector to attach, if any
    pub selector: Vec<SelectOption>,
}

impl Notice {
    /// A titled notice with the given accent color
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            color,
            controls: Vec::new(),
            selector: Vec::new(),
        }
    }

    /// Attach lifecycle controls
    #[must_use]
    pub fn with_controls(mut self, controls: Vec<Control>) -> Self {
        self.controls = controls;
        self
    }

    /// Attach a category selector
    #[must_use]
    pub fn with_selector(mut self, selector: Vec<SelectOption>) -> Self {
        self.selector = selector;
        self
    }
}

/// Request to create a restricted ticket channel
#[derive(Debug, Clone)]
pub struct ChannelSpec {
    /// Deterministic channel name, e.g. `ticket-alice`
    pub name: String,
    /// Parent category, when the guild configures one
    pub parent: Option<CategoryId>,
    /// Principals allowed to see the channel; the service identity is
    /// implicitly included by the surface, everyone else is denied.
    pub allow: Vec<Principal>,
}

/// One message from a channel's history, as fetched for transcripts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    pub attachments: u32,
    pub embeds: u32,
}

/// The collaborator boundary: everything the lifecycle engine asks of the
/// chat platform.
///
/// Resolution methods return `None` for stale or malformed identifiers
/// rather than erroring; callers treat an unresolved reference as "unset"
/// and proceed degraded. Mutating methods return [`crate::TicketryError::Surface`]
/// on transport failure.
#[async_trait]
pub trait TicketSurface: Send + Sync {
    /// Create a restricted text channel and return its id
    async fn create_channel(&self, guild: GuildId, spec: ChannelSpec) -> Result<ChannelId>;

    /// Deliver a notice to a channel
    async fn send_notice(&self, channel: ChannelId, notice: Notice) -> Result<()>;

    /// Deliver plain text to a channel
    async fn send_text(&self, channel: ChannelId, text: String) -> Result<()>;

    /// Re-parent a channel under a category
    async fn move_channel(&self, channel: ChannelId, category: CategoryId) -> Result<()>;

    /// Fetch the full message history, oldest first
    async fn fetch_history(&self, channel: ChannelId) -> Result<Vec<HistoryMessage>>;

    /// Current name of a channel
    async fn channel_name(&self, channel: ChannelId) -> Result<String>;

    /// Remove a channel permanently
    async fn delete_channel(&self, channel: ChannelId) -> Result<()>;

    /// Display name of a user, for channel naming and transcripts
    async fn display_name(&self, guild: GuildId, user: UserId) -> Result<String>;

    /// Resolve a stored role binding; `None` when stale or malformed
    async fn resolve_role(&self, guild: GuildId, raw: &str) -> Option<RoleId>;

    /// Resolve a stored category binding; `None` when stale or malformed
    async fn resolve_category(&self, guild: GuildId, raw: &str) -> Option<CategoryId>;

    /// Resolve a stored channel binding; `None` when stale or malformed
    async fn resolve_channel(&self, guild: GuildId, raw: &str) -> Option<ChannelId>;
}

//! Ticket lifecycle
//!
//! A ticket is one restricted-access channel, from creation on category
//! selection to deletion on close. Its lifecycle is an explicit state
//! machine: every inbound action is a [`TicketIntent`] dispatched through
//! the [`TicketEngine`], which owns the in-memory ticket registry and
//! applies one transition per intent.

mod engine;
mod intent;

pub use engine::TicketEngine;
pub use intent::{is_ticket_channel_name, IntentOutcome, TicketIntent};

use chrono::{DateTime, Utc};
use std::fmt;

use crate::surface::{ChannelId, GuildId, UserId};

/// Lifecycle states of a ticket channel.
///
/// `Closing` is terminal: once a close begins it runs to completion and
/// the channel ceases to exist. Hold is advisory and does not prevent a
/// later claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketState {
    /// Created, waiting for staff
    Open,
    /// Announced as waiting; no structural change
    OnHold,
    /// Owned by a staff member
    Claimed,
    /// Close transition in progress; no further actions accepted
    Closing,
}

impl fmt::Display for TicketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "open",
            Self::OnHold => "on-hold",
            Self::Claimed => "claimed",
            Self::Closing => "closing",
        };
        f.write_str(name)
    }
}

/// One live ticket, keyed by the channel it occupies
#[derive(Debug, Clone)]
pub struct Ticket {
    pub channel: ChannelId,
    pub guild: GuildId,
    pub opener: UserId,
    /// Selector value of the chosen category
    pub category: String,
    pub state: TicketState,
    /// Staff member who most recently claimed, if any
    pub claimant: Option<UserId>,
    pub opened_at: DateTime<Utc>,
}

impl Ticket {
    fn new(channel: ChannelId, guild: GuildId, opener: UserId, category: String) -> Self {
        Self {
            channel,
            guild,
            opener,
            category,
            state: TicketState::Open,
            claimant: None,
            opened_at: Utc::now(),
        }
    }
}

//! Tagged intents from the interactive surface
//!
//! Every discrete user action (a category selection, a lifecycle button,
//! a command) arrives as one [`TicketIntent`] and is dispatched through
//! [`TicketEngine::handle`]. Administrator gating for the panel and
//! configuration commands happens at the surface adapter, before an
//! intent is produced; licensing and lifecycle legality are checked here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::Result;
use crate::surface::{ChannelId, GuildId, UserId};
use crate::ticket::TicketEngine;

static TICKET_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ticket-[a-z0-9-]+$").expect("hard-coded pattern"));

/// True when a channel name follows the ticket naming convention.
///
/// The prefix close shortcut is restricted to such channels.
#[must_use]
pub fn is_ticket_channel_name(name: &str) -> bool {
    TICKET_NAME.is_match(name)
}

/// One discrete user action delivered by the surface adapter
#[derive(Debug, Clone)]
pub enum TicketIntent {
    /// Category selector submission on the intake panel
    Open {
        guild: GuildId,
        actor: UserId,
        category: String,
    },
    /// Claim button
    Claim {
        guild: GuildId,
        actor: UserId,
        channel: ChannelId,
    },
    /// Hold button
    Hold { actor: UserId, channel: ChannelId },
    /// Add-participant button
    AddParticipant { actor: UserId, channel: ChannelId },
    /// Call-staff button
    Escalate {
        guild: GuildId,
        actor: UserId,
        channel: ChannelId,
    },
    /// Close button
    Close {
        guild: GuildId,
        actor: UserId,
        channel: ChannelId,
    },
    /// Prefix close shortcut; honored only in channels whose name matches
    /// the ticket naming convention
    CloseShortcut {
        guild: GuildId,
        actor: UserId,
        channel: ChannelId,
        channel_name: String,
    },
    /// Administrator command: send the intake panel to a channel
    SendPanel { guild: GuildId, channel: ChannelId },
    /// Feedback rating control; acknowledged only, never persisted
    Feedback { actor: UserId, rating: u8 },
    /// Latency probe
    Ping,
}

/// What the adapter should render back to the actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// A ticket channel was created
    TicketOpened(ChannelId),
    /// The action succeeded; ephemeral confirmation text
    Done(String),
    /// The action was refused; ephemeral rejection text
    Rejected(String),
    /// Latency probe response
    Pong,
}

impl TicketEngine {
    /// Dispatch one intent through the state machine.
    ///
    /// User-facing refusals (no license, unknown category, illegal
    /// transition) come back as [`IntentOutcome::Rejected`]; only service
    /// faults (transport failures, storage errors) propagate as `Err`.
    pub async fn handle(&self, intent: TicketIntent) -> Result<IntentOutcome> {
        let outcome = match intent {
            TicketIntent::Open {
                guild,
                actor,
                category,
            } => self
                .open(guild, actor, &category)
                .await
                .map(IntentOutcome::TicketOpened),
            TicketIntent::Claim {
                guild,
                actor,
                channel,
            } => self
                .claim(guild, actor, channel)
                .await
                .map(|credits| IntentOutcome::Done(format!("Ticket claimed ({credits} total)."))),
            TicketIntent::Hold { actor, channel } => self
                .hold(actor, channel)
                .await
                .map(|()| IntentOutcome::Done("Ticket placed on hold.".to_string())),
            TicketIntent::AddParticipant { actor, channel } => self
                .add_participant(actor, channel)
                .await
                .map(|()| IntentOutcome::Done("Add instructions posted.".to_string())),
            TicketIntent::Escalate {
                guild,
                actor,
                channel,
            } => self
                .escalate(guild, actor, channel)
                .await
                .map(|()| IntentOutcome::Done("Staff alerted.".to_string())),
            TicketIntent::Close {
                guild,
                actor,
                channel,
            } => self.run_close(guild, actor, channel).await,
            TicketIntent::CloseShortcut {
                guild,
                actor,
                channel,
                channel_name,
            } => {
                if is_ticket_channel_name(&channel_name) {
                    self.run_close(guild, actor, channel).await
                } else {
                    return Ok(IntentOutcome::Rejected(
                        "This command only works inside a ticket channel.".to_string(),
                    ));
                }
            },
            TicketIntent::SendPanel { guild, channel } => self
                .send_panel(guild, channel)
                .await
                .map(|()| IntentOutcome::Done("Panel sent.".to_string())),
            TicketIntent::Feedback { actor, rating } => {
                tracing::debug!(actor = %actor, rating, "feedback acknowledged");
                Ok(IntentOutcome::Done("Thanks for your rating!".to_string()))
            },
            TicketIntent::Ping => Ok(IntentOutcome::Pong),
        };

        match outcome {
            Ok(outcome) => Ok(outcome),
            Err(err) if err.is_user_facing() => Ok(IntentOutcome::Rejected(reject_text(&err))),
            Err(err) => Err(err),
        }
    }

    async fn run_close(
        &self,
        guild: GuildId,
        actor: UserId,
        channel: ChannelId,
    ) -> Result<IntentOutcome> {
        self.close(guild, actor, channel).await.map(|transcript| {
            IntentOutcome::Done(format!(
                "Ticket closed; {} messages archived.",
                transcript.message_count
            ))
        })
    }
}

/// Short ephemeral notice for a user-facing refusal
fn reject_text(err: &crate::error::TicketryError) -> String {
    use crate::error::TicketryError;
    match err {
        TicketryError::Unlicensed { .. } => {
            "License expired: this server has no active subscription.".to_string()
        },
        TicketryError::UnknownCategory { value } => {
            format!("'{value}' is not an available ticket category.")
        },
        TicketryError::UnknownTicket { .. } => "This channel is not an open ticket.".to_string(),
        TicketryError::InvalidTransition { state, action } => {
            format!("Cannot {action} this ticket while it is {state}.")
        },
        other => other.to_string(),
    }
}

//! The lifecycle state machine

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::config::{GuildConfig, GuildConfigManager};
use crate::credits::StaffCreditLedger;
use crate::error::{Result, TicketryError};
use crate::license::LicenseRegistry;
use crate::surface::{
    ChannelId, ChannelSpec, GuildId, Notice, Principal, TicketSurface, UserId,
};
use crate::ticket::{Ticket, TicketState};
use crate::transcript::{self, Transcript};

/// Grace delay before channel deletion, letting in-flight sends flush.
/// Not a correctness mechanism.
pub const DEFAULT_CLOSE_GRACE: Duration = Duration::from_secs(3);

/// Drives every ticket transition for the process.
///
/// All intents funnel through one engine instance; the ticket registry is
/// in memory only; a ticket's durable state is the channel itself. The
/// registry mutex is held only across map operations, never across a
/// suspension point.
pub struct TicketEngine {
    surface: Arc<dyn TicketSurface>,
    configs: GuildConfigManager,
    licenses: LicenseRegistry,
    credits: StaffCreditLedger,
    tickets: Mutex<HashMap<ChannelId, Ticket>>,
    close_grace: Duration,
}

impl TicketEngine {
    #[must_use]
    pub fn new(
        surface: Arc<dyn TicketSurface>,
        configs: GuildConfigManager,
        licenses: LicenseRegistry,
        credits: StaffCreditLedger,
    ) -> Self {
        Self {
            surface,
            configs,
            licenses,
            credits,
            tickets: Mutex::new(HashMap::new()),
            close_grace: DEFAULT_CLOSE_GRACE,
        }
    }

    /// Override the pre-deletion grace delay (tests use zero)
    #[must_use]
    pub fn with_close_grace(mut self, grace: Duration) -> Self {
        self.close_grace = grace;
        self
    }

    /// Snapshot of one live ticket, if the channel hosts one
    #[must_use]
    pub fn ticket(&self, channel: ChannelId) -> Option<Ticket> {
        self.lock_registry().get(&channel).cloned()
    }

    /// Number of live tickets across all guilds
    #[must_use]
    pub fn open_ticket_count(&self) -> usize {
        self.lock_registry().len()
    }

    /// Send the intake panel to a channel. License-gated.
    pub async fn send_panel(&self, guild: GuildId, channel: ChannelId) -> Result<()> {
        self.licenses.require(guild)?;
        let cfg = self.configs.get(guild);
        let panel = Notice::new(&cfg.panel_title, &cfg.panel_description, cfg.color)
            .with_selector(cfg.selector_options());
        self.surface.send_notice(channel, panel).await?;
        tracing::info!(guild = %guild, channel = %channel, "intake panel sent");
        Ok(())
    }

    /// Create a ticket from a category selection. License-gated.
    ///
    /// The category value must be one of the guild's configured values;
    /// anything else is rejected before any channel is created. No
    /// deduplication against the opener's existing tickets is performed.
    pub async fn open(
        &self,
        guild: GuildId,
        actor: UserId,
        category_value: &str,
    ) -> Result<ChannelId> {
        self.licenses.require(guild)?;
        let cfg = self.configs.get(guild);
        if cfg.category(category_value).is_none() {
            return Err(TicketryError::UnknownCategory {
                value: category_value.to_string(),
            });
        }

        let display = self.surface.display_name(guild, actor).await?;
        let name = ticket_channel_name(&display);

        let mut allow = vec![Principal::User(actor)];
        if let Some(role) = self.resolve_role(guild, cfg.staff_role.as_deref()).await {
            allow.push(Principal::Role(role));
        }
        let parent = self
            .resolve_category(guild, cfg.open_category.as_deref())
            .await;

        let channel = self
            .surface
            .create_channel(guild, ChannelSpec { name, parent, allow })
            .await?;

        let welcome = Notice::new(&cfg.welcome_title, &cfg.welcome_description, cfg.color)
            .with_controls(cfg.ticket_controls());
        self.surface.send_notice(channel, welcome).await?;

        self.lock_registry().insert(
            channel,
            Ticket::new(channel, guild, actor, category_value.to_string()),
        );
        tracing::info!(guild = %guild, channel = %channel, opener = %actor, category = category_value, "ticket opened");
        Ok(channel)
    }

    /// Staff takes ownership. Credits the ledger unconditionally (a
    /// re-claim re-announces and re-credits) and relocates the channel
    /// to the claimed category when one is configured and resolvable.
    pub async fn claim(&self, guild: GuildId, actor: UserId, channel: ChannelId) -> Result<u64> {
        self.transition(channel, "claim", |ticket| {
            ticket.state = TicketState::Claimed;
            ticket.claimant = Some(actor);
        })?;
        let cfg = self.configs.get(guild);

        let credits = self.credits.credit(actor)?;

        if let Some(category) = self
            .resolve_category(guild, cfg.claimed_category.as_deref())
            .await
        {
            self.surface.move_channel(channel, category).await?;
        }

        self.surface
            .send_text(channel, format!("{} has claimed this ticket.", actor.mention()))
            .await?;
        tracing::info!(channel = %channel, claimant = %actor, credits, "ticket claimed");
        Ok(credits)
    }

    /// Advisory hold: announcement only, no structural change
    pub async fn hold(&self, actor: UserId, channel: ChannelId) -> Result<()> {
        let prior = self.transition(channel, "hold", |ticket| {
            ticket.state = TicketState::OnHold;
        })?;
        if prior == TicketState::OnHold {
            return Err(TicketryError::InvalidTransition {
                state: prior,
                action: "hold",
            });
        }

        self.surface
            .send_text(
                channel,
                format!("{} placed this ticket on hold.", actor.mention()),
            )
            .await?;
        Ok(())
    }

    /// Announce how to add a participant. The actual permission grant is
    /// the surface adapter's mention handling, outside this engine.
    pub async fn add_participant(&self, actor: UserId, channel: ChannelId) -> Result<()> {
        self.guard(channel, "add a participant to")?;
        self.surface
            .send_text(
                channel,
                format!(
                    "{} mention the user you want to add and they will be brought in.",
                    actor.mention()
                ),
            )
            .await?;
        Ok(())
    }

    /// Alert the staff role, or a generic broadcast when none resolves
    pub async fn escalate(&self, guild: GuildId, actor: UserId, channel: ChannelId) -> Result<()> {
        self.guard(channel, "escalate")?;
        let cfg = self.configs.get(guild);
        let audience = match self.resolve_role(guild, cfg.staff_role.as_deref()).await {
            Some(role) => role.mention(),
            None => "Staff team".to_string(),
        };
        self.surface
            .send_text(
                channel,
                format!("{audience}: {} is requesting assistance.", actor.mention()),
            )
            .await?;
        Ok(())
    }

    /// Terminal transition: transcript, logs delivery, feedback prompt,
    /// grace delay, channel deletion. Runs to completion once begun; the
    /// logs and feedback deliveries are non-fatal, transcript generation
    /// and the deletion itself are not.
    pub async fn close(
        &self,
        guild: GuildId,
        actor: UserId,
        channel: ChannelId,
    ) -> Result<Transcript> {
        self.transition(channel, "close", |ticket| {
            ticket.state = TicketState::Closing;
        })?;
        let cfg = self.configs.get(guild);

        let transcript = transcript::generate(self.surface.as_ref(), channel).await?;

        if let Some(logs) = self
            .resolve_channel(guild, cfg.logs_channel.as_deref())
            .await
        {
            if let Err(err) = self.deliver_transcript(logs, actor, &cfg, &transcript).await {
                tracing::warn!(channel = %channel, %err, "transcript delivery failed");
            }
        }

        if let Some(feedback) = self
            .resolve_channel(guild, cfg.feedback_channel.as_deref())
            .await
        {
            if let Err(err) = self.send_feedback_prompt(feedback, &cfg, &transcript).await {
                tracing::warn!(channel = %channel, %err, "feedback prompt failed");
            }
        }

        // Lets prior responses flush before the channel disappears
        tokio::time::sleep(self.close_grace).await;

        self.surface.delete_channel(channel).await?;
        self.lock_registry().remove(&channel);
        tracing::info!(channel = %channel, closer = %actor, messages = transcript.message_count, "ticket closed");
        Ok(transcript)
    }

    async fn deliver_transcript(
        &self,
        logs: ChannelId,
        closer: UserId,
        cfg: &GuildConfig,
        transcript: &Transcript,
    ) -> Result<()> {
        let notice = Notice::new(
            format!("Ticket closed: {}", transcript.channel_name),
            format!(
                "Closed by {}. {} messages archived as {}.\n\n{}",
                closer.mention(),
                transcript.message_count,
                transcript.filename(),
                transcript.body
            ),
            cfg.color,
        );
        self.surface.send_notice(logs, notice).await
    }

    async fn send_feedback_prompt(
        &self,
        feedback: ChannelId,
        cfg: &GuildConfig,
        transcript: &Transcript,
    ) -> Result<()> {
        let notice = Notice::new(
            "How did we do?",
            format!(
                "Rate the support you received in {}.",
                transcript.channel_name
            ),
            cfg.color,
        );
        self.surface.send_notice(feedback, notice).await
    }

    /// The ticket must exist and must not already be closing
    fn guard(&self, channel: ChannelId, action: &'static str) -> Result<TicketState> {
        let registry = self.lock_registry();
        let ticket = registry
            .get(&channel)
            .ok_or(TicketryError::UnknownTicket { channel })?;
        if ticket.state == TicketState::Closing {
            return Err(TicketryError::InvalidTransition {
                state: ticket.state,
                action,
            });
        }
        Ok(ticket.state)
    }

    /// Validate and apply a transition under one registry lock, so two
    /// intents racing for the same channel cannot both pass the closing
    /// check. Returns the state the ticket was in before `apply` ran.
    fn transition(
        &self,
        channel: ChannelId,
        action: &'static str,
        apply: impl FnOnce(&mut Ticket),
    ) -> Result<TicketState> {
        let mut registry = self.lock_registry();
        let ticket = registry
            .get_mut(&channel)
            .ok_or(TicketryError::UnknownTicket { channel })?;
        if ticket.state == TicketState::Closing {
            return Err(TicketryError::InvalidTransition {
                state: ticket.state,
                action,
            });
        }
        let prior = ticket.state;
        apply(ticket);
        Ok(prior)
    }

    fn lock_registry(&self) -> std::sync::MutexGuard<'_, HashMap<ChannelId, Ticket>> {
        // Poisoning only happens if a holder panicked mid-map-op; the map
        // itself is still coherent, so keep going.
        self.tickets
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    async fn resolve_role(
        &self,
        guild: GuildId,
        raw: Option<&str>,
    ) -> Option<crate::surface::RoleId> {
        let raw = raw?;
        let resolved = self.surface.resolve_role(guild, raw).await;
        if resolved.is_none() {
            tracing::debug!(guild = %guild, raw, "staff role binding did not resolve");
        }
        resolved
    }

    async fn resolve_category(
        &self,
        guild: GuildId,
        raw: Option<&str>,
    ) -> Option<crate::surface::CategoryId> {
        let raw = raw?;
        let resolved = self.surface.resolve_category(guild, raw).await;
        if resolved.is_none() {
            tracing::debug!(guild = %guild, raw, "category binding did not resolve");
        }
        resolved
    }

    async fn resolve_channel(&self, guild: GuildId, raw: Option<&str>) -> Option<ChannelId> {
        let raw = raw?;
        let resolved = self.surface.resolve_channel(guild, raw).await;
        if resolved.is_none() {
            tracing::debug!(guild = %guild, raw, "channel binding did not resolve");
        }
        resolved
    }
}

/// Deterministic channel name from the opener's display name
fn ticket_channel_name(display_name: &str) -> String {
    let slug: String = display_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "ticket-user".to_string()
    } else {
        format!("ticket-{slug}")
    }
}

//! License administration handlers

use crate::cli::handlers::HandlerContext;
use crate::error::Result;
use crate::surface::{GuildId, UserId};

/// Grant or reset a guild's 30-day entitlement.
///
/// The registry silently ignores non-owner actors; the CLI reports the
/// no-op so the operator is not left guessing.
pub fn handle_license_grant(ctx: &HandlerContext, guild: u64, actor: Option<u64>) -> Result<()> {
    let guild = GuildId(guild);
    let actor = actor.map_or_else(|| ctx.settings.owner_id(), UserId);

    match ctx.licenses.grant(actor, guild)? {
        Some(expiry) => {
            ctx.formatter
                .success(&format!("Guild {guild} licensed until {expiry}"));
        },
        None => {
            ctx.formatter
                .error(&format!("Actor {actor} is not the configured owner; nothing changed"));
        },
    }
    Ok(())
}

/// Report a guild's license status
pub fn handle_license_status(ctx: &HandlerContext, guild: u64) -> Result<()> {
    let guild = GuildId(guild);
    match (ctx.licenses.is_licensed(guild), ctx.licenses.expiry(guild)) {
        (true, Some(expiry)) => {
            ctx.formatter
                .success(&format!("Guild {guild} is licensed until {expiry}"));
        },
        (false, Some(expiry)) => {
            ctx.formatter
                .info(&format!("Guild {guild} license expired on {expiry}"));
        },
        (_, None) => {
            ctx.formatter.info(&format!("Guild {guild} has no license record"));
        },
    }
    Ok(())
}

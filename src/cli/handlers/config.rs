//! Guild configuration inspection handler

use crate::cli::handlers::HandlerContext;
use crate::error::Result;
use crate::surface::GuildId;

/// Print a guild's effective configuration, defaults backfilled
pub fn handle_config_show(ctx: &HandlerContext, guild: u64) -> Result<()> {
    let config = ctx.configs.get(GuildId(guild));
    ctx.formatter.value(&config);
    Ok(())
}

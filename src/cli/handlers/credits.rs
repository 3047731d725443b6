//! Staff credit inspection handler

use crate::cli::handlers::HandlerContext;
use crate::error::Result;
use crate::surface::UserId;

/// Print a staff member's cumulative claim count
pub fn handle_credits_show(ctx: &HandlerContext, user: u64) -> Result<()> {
    let user = UserId(user);
    let count = ctx.credits.get(user);
    ctx.formatter
        .info(&format!("User {user} has claimed {count} tickets"));
    Ok(())
}

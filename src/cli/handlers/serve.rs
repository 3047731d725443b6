//! Service runner

use crate::cli::handlers::HandlerContext;
use crate::error::Result;
use crate::health;

/// Run the service until interrupted.
///
/// Brings up the liveness endpoint and keeps the stores available. The
/// interactive surface adapter (the platform binding) attaches through
/// the library API; this process-level entry point only supervises.
pub async fn handle_serve(ctx: &HandlerContext, bind: Option<String>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| ctx.settings.bind.clone());
    tracing::info!(
        data_dir = %ctx.settings.data_dir.display(),
        %bind,
        "ticketry starting"
    );

    tokio::select! {
        result = health::serve(&bind) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown requested");
            Ok(())
        },
    }
}

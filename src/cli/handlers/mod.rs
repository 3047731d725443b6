//! Command handlers
//!
//! Each subcommand gets one handler function; shared initialization lives
//! in [`base::HandlerContext`].

mod base;
mod config;
mod credits;
mod license;
mod serve;

pub use base::HandlerContext;
pub use config::handle_config_show;
pub use credits::handle_credits_show;
pub use license::{handle_license_grant, handle_license_status};
pub use serve::handle_serve;

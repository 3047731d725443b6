//! ticketry - guild support-ticket workflow service
//!
//! Operates a support-ticket workflow over a real-time chat platform:
//! guild operators configure an intake panel, end-users pick a category
//! and get a private channel, staff claim, hold, escalate, and close
//! tickets, and every closure archives a transcript and prompts for
//! feedback. Access is gated by a time-boxed per-guild license.
//!
//! The platform itself (gateway, rendering, permissions) sits behind the
//! [`surface::TicketSurface`] trait; this crate owns the lifecycle state
//! machine and the guild-scoped configuration, license, and credit
//! stores.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ticketry::config::GuildConfigManager;
//! use ticketry::credits::StaffCreditLedger;
//! use ticketry::license::LicenseRegistry;
//! use ticketry::storage::JsonStore;
//! use ticketry::surface::UserId;
//! use ticketry::ticket::TicketEngine;
//!
//! let store = Arc::new(JsonStore::new("data"));
//! let engine = TicketEngine::new(
//!     platform_adapter, // your TicketSurface implementation
//!     GuildConfigManager::new(store.clone()),
//!     LicenseRegistry::new(store.clone(), UserId(OWNER)),
//!     StaffCreditLedger::new(store),
//! );
//! let outcome = engine.handle(intent).await?;
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod config;
pub mod credits;
pub mod error;
pub mod health;
pub mod license;
pub mod settings;
pub mod storage;
pub mod surface;
pub mod ticket;
pub mod transcript;

// Re-export commonly used types
pub use error::{Result, TicketryError};

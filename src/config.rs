//! Guild configuration
//!
//! One [`GuildConfig`] per guild, stored as a single JSON document keyed by
//! guild id. Every field carries a default, so a partially-specified stored
//! entry is always completed to the full schema on read: missing keys are
//! backfilled, never removed. Guilds are created implicitly on first read
//! or write and never explicitly deleted.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, TicketryError};
use crate::storage::{documents, DocumentStore, DocumentStoreExt};
use crate::surface::{Control, ControlAction, GuildId, SelectOption};

/// Default accent color (blurple)
pub const DEFAULT_COLOR: u32 = 0x5865_F2;

fn default_panel_title() -> String {
    "Support Tickets".to_string()
}

fn default_panel_description() -> String {
    "Select an option below to open a ticket.".to_string()
}

fn default_welcome_title() -> String {
    "Ticket opened".to_string()
}

fn default_welcome_description() -> String {
    "Welcome. Staff will be with you shortly.".to_string()
}

const fn default_color() -> u32 {
    DEFAULT_COLOR
}

fn default_categories() -> Vec<CategoryOption> {
    vec![CategoryOption {
        label: "Support".to_string(),
        description: "Technical help".to_string(),
        emoji: "🛠️".to_string(),
        value: "support".to_string(),
    }]
}

/// One selectable ticket type on the intake panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub emoji: String,
    /// Unique within a guild; the value submitted by the category selector
    pub value: String,
}

/// Label and emoji for one lifecycle control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlLabel {
    pub label: String,
    pub emoji: String,
}

impl ControlLabel {
    fn new(label: &str, emoji: &str) -> Self {
        Self {
            label: label.to_string(),
            emoji: emoji.to_string(),
        }
    }
}

fn default_claim_label() -> ControlLabel {
    ControlLabel::new("Claim", "🙋")
}

fn default_hold_label() -> ControlLabel {
    ControlLabel::new("On hold", "⏳")
}

fn default_add_label() -> ControlLabel {
    ControlLabel::new("Add user", "👤")
}

fn default_escalate_label() -> ControlLabel {
    ControlLabel::new("Call staff", "🔔")
}

fn default_close_label() -> ControlLabel {
    ControlLabel::new("Close", "🔒")
}

/// Effective configuration for one guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildConfig {
    // Appearance
    #[serde(default = "default_panel_title")]
    pub panel_title: String,
    #[serde(default = "default_panel_description")]
    pub panel_description: String,
    #[serde(default = "default_welcome_title")]
    pub welcome_title: String,
    #[serde(default = "default_welcome_description")]
    pub welcome_description: String,
    /// 24-bit RGB accent
    #[serde(default = "default_color")]
    pub color: u32,

    // Bindings, stored as raw identifier strings and resolved per operation
    #[serde(default)]
    pub staff_role: Option<String>,
    #[serde(default)]
    pub logs_channel: Option<String>,
    #[serde(default)]
    pub feedback_channel: Option<String>,
    #[serde(default)]
    pub open_category: Option<String>,
    #[serde(default)]
    pub claimed_category: Option<String>,

    /// Ordered selectable ticket types; `value` unique within the guild
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryOption>,

    // Control labels
    #[serde(default = "default_claim_label")]
    pub claim: ControlLabel,
    #[serde(default = "default_hold_label")]
    pub hold: ControlLabel,
    #[serde(default = "default_add_label")]
    pub add: ControlLabel,
    #[serde(default = "default_escalate_label")]
    pub escalate: ControlLabel,
    #[serde(default = "default_close_label")]
    pub close: ControlLabel,
}

impl Default for GuildConfig {
    fn default() -> Self {
        Self {
            panel_title: default_panel_title(),
            panel_description: default_panel_description(),
            welcome_title: default_welcome_title(),
            welcome_description: default_welcome_description(),
            color: default_color(),
            staff_role: None,
            logs_channel: None,
            feedback_channel: None,
            open_category: None,
            claimed_category: None,
            categories: default_categories(),
            claim: default_claim_label(),
            hold: default_hold_label(),
            add: default_add_label(),
            escalate: default_escalate_label(),
            close: default_close_label(),
        }
    }
}

impl GuildConfig {
    /// Look up a configured category by its selector value
    #[must_use]
    pub fn category(&self, value: &str) -> Option<&CategoryOption> {
        self.categories.iter().find(|c| c.value == value)
    }

    /// The panel's category selector options
    #[must_use]
    pub fn selector_options(&self) -> Vec<SelectOption> {
        self.categories
            .iter()
            .map(|c| SelectOption {
                label: c.label.clone(),
                description: c.description.clone(),
                emoji: c.emoji.clone(),
                value: c.value.clone(),
            })
            .collect()
    }

    /// The per-ticket lifecycle controls, in presentation order
    #[must_use]
    pub fn ticket_controls(&self) -> Vec<Control> {
        [
            (ControlAction::Claim, &self.claim),
            (ControlAction::Hold, &self.hold),
            (ControlAction::AddParticipant, &self.add),
            (ControlAction::Escalate, &self.escalate),
            (ControlAction::Close, &self.close),
        ]
        .into_iter()
        .map(|(action, l)| Control {
            action,
            label: l.label.clone(),
            emoji: l.emoji.clone(),
        })
        .collect()
    }
}

/// Appearance fields accepted from the configuration panel
#[derive(Debug, Clone)]
pub struct AppearanceUpdate {
    pub panel_title: String,
    pub panel_description: String,
    pub welcome_title: String,
    pub welcome_description: String,
    /// `#RRGGBB`; an unparseable value silently retains the prior color
    pub color: String,
}

/// Binding fields accepted from the configuration panel.
///
/// Raw text input: a blank field clears the binding, anything else is
/// stored verbatim and resolved at use time.
#[derive(Debug, Clone, Default)]
pub struct TechnicalUpdate {
    pub staff_role: String,
    pub logs_channel: String,
    pub feedback_channel: String,
    pub open_category: String,
    pub claimed_category: String,
}

fn normalize_binding(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a `#RRGGBB` accent color
#[must_use]
pub fn parse_hex_color(raw: &str) -> Option<u32> {
    let digits = raw.trim().strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// Resolves effective per-guild configuration and applies partial updates.
///
/// Updates read-modify-write the entire guild-config document and persist
/// immediately. `get` returns by value; callers who mutate must persist
/// through an update method.
#[derive(Clone)]
pub struct GuildConfigManager {
    store: Arc<dyn DocumentStore>,
}

impl GuildConfigManager {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Effective configuration for a guild, every default key present
    #[must_use]
    pub fn get(&self, guild: GuildId) -> GuildConfig {
        self.load_all()
            .remove(&guild.to_string())
            .unwrap_or_default()
    }

    /// Overwrite the appearance fields only
    pub fn update_appearance(&self, guild: GuildId, update: AppearanceUpdate) -> Result<GuildConfig> {
        self.modify(guild, |cfg| {
            cfg.panel_title = update.panel_title.clone();
            cfg.panel_description = update.panel_description.clone();
            cfg.welcome_title = update.welcome_title.clone();
            cfg.welcome_description = update.welcome_description.clone();
            if let Some(color) = parse_hex_color(&update.color) {
                cfg.color = color;
            } else {
                tracing::debug!(guild = %guild, raw = %update.color, "unparseable color, keeping prior");
            }
        })
    }

    /// Overwrite the technical bindings only
    pub fn update_technical(&self, guild: GuildId, update: TechnicalUpdate) -> Result<GuildConfig> {
        self.modify(guild, |cfg| {
            cfg.staff_role = normalize_binding(&update.staff_role);
            cfg.logs_channel = normalize_binding(&update.logs_channel);
            cfg.feedback_channel = normalize_binding(&update.feedback_channel);
            cfg.open_category = normalize_binding(&update.open_category);
            cfg.claimed_category = normalize_binding(&update.claimed_category);
        })
    }

    /// Replace the guild's category set; values must be unique
    pub fn set_categories(&self, guild: GuildId, categories: Vec<CategoryOption>) -> Result<GuildConfig> {
        let mut seen = std::collections::HashSet::new();
        for option in &categories {
            if !seen.insert(option.value.as_str()) {
                return Err(TicketryError::Custom(format!(
                    "duplicate category value '{}'",
                    option.value
                )));
            }
        }
        self.modify(guild, |cfg| cfg.categories = categories.clone())
    }

    fn load_all(&self) -> HashMap<String, GuildConfig> {
        self.store.load_map(documents::GUILDS)
    }

    fn modify(&self, guild: GuildId, apply: impl Fn(&mut GuildConfig)) -> Result<GuildConfig> {
        let mut all = self.load_all();
        let cfg = all.entry(guild.to_string()).or_default();
        apply(cfg);
        let updated = cfg.clone();
        self.store.save_map(documents::GUILDS, &all)?;
        Ok(updated)
    }
}

//! Per-guild licensing
//!
//! Access to panel and configuration operations is gated by a time-boxed
//! entitlement: guild id → expiry date, no time component. A guild is
//! licensed iff a record exists and its expiry is strictly after today.
//! Granting resets the window to 30 days from now; it never extends a
//! prior expiry.

use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;

use crate::error::{Result, TicketryError};
use crate::storage::{documents, DocumentStore, DocumentStoreExt};
use crate::surface::{GuildId, UserId};

/// Entitlement window granted per activation
pub const LICENSE_DAYS: i64 = 30;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maps guilds to license expiry dates and evaluates the gate
#[derive(Clone)]
pub struct LicenseRegistry {
    store: Arc<dyn DocumentStore>,
    /// The only principal allowed to grant licenses
    owner: UserId,
}

impl LicenseRegistry {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, owner: UserId) -> Self {
        Self { store, owner }
    }

    /// Stored expiry for a guild, if present and parseable
    #[must_use]
    pub fn expiry(&self, guild: GuildId) -> Option<NaiveDate> {
        self.expiry_at(guild)
    }

    fn expiry_at(&self, guild: GuildId) -> Option<NaiveDate> {
        let records: std::collections::HashMap<String, String> =
            self.store.load_map(documents::LICENSES);
        let raw = records.get(&guild.to_string())?;
        match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!(guild = %guild, raw = %raw, %err, "unparseable license expiry");
                None
            },
        }
    }

    /// True iff the guild's expiry is strictly in the future
    #[must_use]
    pub fn is_licensed(&self, guild: GuildId) -> bool {
        self.is_licensed_on(guild, Utc::now().date_naive())
    }

    /// License evaluation against an explicit "today", for testability
    #[must_use]
    pub fn is_licensed_on(&self, guild: GuildId, today: NaiveDate) -> bool {
        self.expiry_at(guild).is_some_and(|expiry| expiry > today)
    }

    /// Gate used before panel and configuration operations
    pub fn require(&self, guild: GuildId) -> Result<()> {
        if self.is_licensed(guild) {
            Ok(())
        } else {
            Err(TicketryError::Unlicensed { guild })
        }
    }

    /// Owner-only: set the guild's expiry to today + 30 days, overwriting
    /// any prior record. Calls from any other principal are silently
    /// ignored: no error, no state change.
    pub fn grant(&self, actor: UserId, guild: GuildId) -> Result<Option<NaiveDate>> {
        self.grant_on(actor, guild, Utc::now().date_naive())
    }

    /// Grant against an explicit "today", for testability
    pub fn grant_on(
        &self,
        actor: UserId,
        guild: GuildId,
        today: NaiveDate,
    ) -> Result<Option<NaiveDate>> {
        if actor != self.owner {
            tracing::debug!(actor = %actor, guild = %guild, "non-owner grant attempt ignored");
            return Ok(None);
        }

        let expiry = today + Duration::days(LICENSE_DAYS);
        let mut records: std::collections::HashMap<String, String> =
            self.store.load_map(documents::LICENSES);
        records.insert(guild.to_string(), expiry.format(DATE_FORMAT).to_string());
        self.store.save_map(documents::LICENSES, &records)?;
        tracing::info!(guild = %guild, expiry = %expiry, "license granted");
        Ok(Some(expiry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStore;
    use tempfile::TempDir;

    const OWNER: UserId = UserId(1000);

    fn registry() -> (TempDir, LicenseRegistry) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(JsonStore::new(dir.path()));
        (dir, LicenseRegistry::new(store, OWNER))
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unknown_guild_is_unlicensed() {
        let (_dir, registry) = registry();
        assert!(!registry.is_licensed(GuildId(1)));
        assert!(registry.require(GuildId(1)).is_err());
    }

    #[test]
    fn unparseable_date_is_unlicensed() {
        let (dir, registry) = registry();
        std::fs::write(dir.path().join("licenses.json"), r#"{"5": "next tuesday"}"#).unwrap();
        assert!(!registry.is_licensed(GuildId(5)));
    }

    #[test]
    fn grant_sets_thirty_day_window() {
        let (_dir, registry) = registry();
        let today = day(2026, 1, 1);
        let expiry = registry.grant_on(OWNER, GuildId(2), today).unwrap();
        assert_eq!(expiry, Some(day(2026, 1, 31)));

        assert!(registry.is_licensed_on(GuildId(2), today));
        assert!(registry.is_licensed_on(GuildId(2), day(2026, 1, 30)));
        // Strict comparison: expiry day itself is expired
        assert!(!registry.is_licensed_on(GuildId(2), day(2026, 1, 31)));
        assert!(!registry.is_licensed_on(GuildId(2), day(2026, 2, 1)));
    }

    #[test]
    fn regrant_resets_rather_than_extends() {
        let (_dir, registry) = registry();
        registry.grant_on(OWNER, GuildId(3), day(2026, 1, 1)).unwrap();
        let expiry = registry.grant_on(OWNER, GuildId(3), day(2026, 1, 20)).unwrap();
        assert_eq!(expiry, Some(day(2026, 2, 19)));
    }

    #[test]
    fn non_owner_grant_is_silently_ignored() {
        let (_dir, registry) = registry();
        let result = registry
            .grant_on(UserId(42), GuildId(4), day(2026, 1, 1))
            .unwrap();
        assert_eq!(result, None);
        assert!(!registry.is_licensed_on(GuildId(4), day(2026, 1, 2)));
    }

    #[test]
    fn window_boundaries() {
        let (_dir, registry) = registry();
        let granted = day(2026, 3, 1);
        registry.grant_on(OWNER, GuildId(6), granted).unwrap();
        assert!(registry.is_licensed_on(GuildId(6), granted + Duration::days(29)));
        assert!(!registry.is_licensed_on(GuildId(6), granted + Duration::days(31)));
    }
}

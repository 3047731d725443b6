//! Shared test fixtures: an in-memory recording surface and a harness
//! wiring the engine to temp-dir stores.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

use ticketry::config::GuildConfigManager;
use ticketry::credits::StaffCreditLedger;
use ticketry::error::{Result, TicketryError};
use ticketry::license::LicenseRegistry;
use ticketry::storage::JsonStore;
use ticketry::surface::{
    CategoryId, ChannelId, ChannelSpec, GuildId, HistoryMessage, Notice, Principal, RoleId,
    TicketSurface, UserId,
};
use ticketry::ticket::TicketEngine;

/// Something delivered to a channel
#[derive(Debug, Clone)]
pub enum Sent {
    Notice(Notice),
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub struct FakeChannel {
    pub name: String,
    pub parent: Option<CategoryId>,
    pub allow: Vec<Principal>,
    pub sent: Vec<Sent>,
    pub history: Vec<HistoryMessage>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    channels: HashMap<ChannelId, FakeChannel>,
    deleted: Vec<ChannelId>,
    roles: Vec<RoleId>,
    categories: Vec<CategoryId>,
    display_names: HashMap<UserId, String>,
    failing_sends: Vec<ChannelId>,
    failing_deletes: Vec<ChannelId>,
}

/// In-memory `TicketSurface` that records every side effect for assertions
pub struct RecordingSurface {
    state: Mutex<State>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 100,
                ..State::default()
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("surface state poisoned")
    }

    /// Register a role id that resolves
    pub fn add_role(&self, role: RoleId) {
        self.lock().roles.push(role);
    }

    /// Register a category id that resolves
    pub fn add_category(&self, category: CategoryId) {
        self.lock().categories.push(category);
    }

    /// Register an existing channel (e.g. a logs or feedback target)
    pub fn add_channel(&self, name: &str) -> ChannelId {
        let mut state = self.lock();
        state.next_id += 1;
        let id = ChannelId(state.next_id);
        state.channels.insert(
            id,
            FakeChannel {
                name: name.to_string(),
                ..FakeChannel::default()
            },
        );
        id
    }

    pub fn set_display_name(&self, user: UserId, name: &str) {
        self.lock().display_names.insert(user, name.to_string());
    }

    /// Seed a channel's fetchable history
    pub fn push_history(&self, channel: ChannelId, author: &str, offset_secs: i64, content: &str) {
        let message = HistoryMessage {
            author: author.to_string(),
            timestamp: Utc.timestamp_opt(1_700_000_000 + offset_secs, 0).unwrap(),
            content: content.to_string(),
            attachments: 0,
            embeds: 0,
        };
        self.lock()
            .channels
            .get_mut(&channel)
            .expect("unknown channel in push_history")
            .history
            .push(message);
    }

    /// Make every send to this channel fail with a transport error
    pub fn fail_sends_to(&self, channel: ChannelId) {
        self.lock().failing_sends.push(channel);
    }

    /// Make deletion of this channel fail with a transport error
    pub fn fail_delete_of(&self, channel: ChannelId) {
        self.lock().failing_deletes.push(channel);
    }

    pub fn channel(&self, channel: ChannelId) -> Option<FakeChannel> {
        self.lock().channels.get(&channel).cloned()
    }

    pub fn channel_count(&self) -> usize {
        self.lock().channels.len()
    }

    pub fn deleted(&self) -> Vec<ChannelId> {
        self.lock().deleted.clone()
    }
}

#[async_trait]
impl TicketSurface for RecordingSurface {
    async fn create_channel(&self, _guild: GuildId, spec: ChannelSpec) -> Result<ChannelId> {
        let mut state = self.lock();
        state.next_id += 1;
        let id = ChannelId(state.next_id);
        state.channels.insert(
            id,
            FakeChannel {
                name: spec.name,
                parent: spec.parent,
                allow: spec.allow,
                sent: Vec::new(),
                history: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn send_notice(&self, channel: ChannelId, notice: Notice) -> Result<()> {
        let mut state = self.lock();
        if state.failing_sends.contains(&channel) {
            return Err(TicketryError::surface("send rejected"));
        }
        state
            .channels
            .get_mut(&channel)
            .ok_or(TicketryError::UnknownTicket { channel })?
            .sent
            .push(Sent::Notice(notice));
        Ok(())
    }

    async fn send_text(&self, channel: ChannelId, text: String) -> Result<()> {
        let mut state = self.lock();
        if state.failing_sends.contains(&channel) {
            return Err(TicketryError::surface("send rejected"));
        }
        state
            .channels
            .get_mut(&channel)
            .ok_or(TicketryError::UnknownTicket { channel })?
            .sent
            .push(Sent::Text(text));
        Ok(())
    }

    async fn move_channel(&self, channel: ChannelId, category: CategoryId) -> Result<()> {
        let mut state = self.lock();
        state
            .channels
            .get_mut(&channel)
            .ok_or(TicketryError::UnknownTicket { channel })?
            .parent = Some(category);
        Ok(())
    }

    async fn fetch_history(&self, channel: ChannelId) -> Result<Vec<HistoryMessage>> {
        let state = self.lock();
        state
            .channels
            .get(&channel)
            .map(|c| c.history.clone())
            .ok_or(TicketryError::UnknownTicket { channel })
    }

    async fn channel_name(&self, channel: ChannelId) -> Result<String> {
        let state = self.lock();
        state
            .channels
            .get(&channel)
            .map(|c| c.name.clone())
            .ok_or(TicketryError::UnknownTicket { channel })
    }

    async fn delete_channel(&self, channel: ChannelId) -> Result<()> {
        let mut state = self.lock();
        if state.failing_deletes.contains(&channel) {
            return Err(TicketryError::surface("delete rejected"));
        }
        state
            .channels
            .remove(&channel)
            .ok_or(TicketryError::UnknownTicket { channel })?;
        state.deleted.push(channel);
        Ok(())
    }

    async fn display_name(&self, _guild: GuildId, user: UserId) -> Result<String> {
        let state = self.lock();
        Ok(state
            .display_names
            .get(&user)
            .cloned()
            .unwrap_or_else(|| format!("member-{}", user.0)))
    }

    async fn resolve_role(&self, _guild: GuildId, raw: &str) -> Option<RoleId> {
        let id: RoleId = raw.parse().ok()?;
        self.lock().roles.contains(&id).then_some(id)
    }

    async fn resolve_category(&self, _guild: GuildId, raw: &str) -> Option<CategoryId> {
        let id: CategoryId = raw.parse().ok()?;
        self.lock().categories.contains(&id).then_some(id)
    }

    async fn resolve_channel(&self, _guild: GuildId, raw: &str) -> Option<ChannelId> {
        let id: ChannelId = raw.parse().ok()?;
        self.lock().channels.contains_key(&id).then_some(id)
    }
}

/// The license-granting principal used by the harness
pub const OWNER: UserId = UserId(1);

/// Engine plus stores over a temp directory and a recording surface
pub struct Harness {
    _dir: TempDir,
    pub surface: Arc<RecordingSurface>,
    pub engine: Arc<TicketEngine>,
    pub configs: GuildConfigManager,
    pub licenses: LicenseRegistry,
    pub credits: StaffCreditLedger,
}

impl Harness {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(JsonStore::new(dir.path()));
        let surface = Arc::new(RecordingSurface::new());

        let configs = GuildConfigManager::new(store.clone());
        let licenses = LicenseRegistry::new(store.clone(), OWNER);
        let credits = StaffCreditLedger::new(store);

        let engine = Arc::new(
            TicketEngine::new(
                surface.clone(),
                configs.clone(),
                licenses.clone(),
                credits.clone(),
            )
            .with_close_grace(Duration::ZERO),
        );

        Self {
            _dir: dir,
            surface,
            engine,
            configs,
            licenses,
            credits,
        }
    }

    /// Grant the guild a license as the owner
    pub fn license(&self, guild: GuildId) {
        self.licenses
            .grant(OWNER, guild)
            .expect("Failed to grant license")
            .expect("owner grant was ignored");
    }
}

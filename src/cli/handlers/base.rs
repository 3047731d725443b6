//! Shared handler initialization

use std::sync::Arc;

use crate::cli::OutputFormatter;
use crate::config::GuildConfigManager;
use crate::credits::StaffCreditLedger;
use crate::error::Result;
use crate::license::LicenseRegistry;
use crate::settings::Settings;
use crate::storage::JsonStore;

/// Resources every handler needs: settings, the document store, and the
/// managers that own each persisted document.
pub struct HandlerContext {
    pub settings: Settings,
    pub configs: GuildConfigManager,
    pub licenses: LicenseRegistry,
    pub credits: StaffCreditLedger,
    pub formatter: OutputFormatter,
}

impl HandlerContext {
    pub fn new(settings: Settings, formatter: OutputFormatter) -> Result<Self> {
        let store = Arc::new(JsonStore::new(&settings.data_dir));
        std::fs::create_dir_all(&settings.data_dir)?;

        let configs = GuildConfigManager::new(store.clone());
        let licenses = LicenseRegistry::new(store.clone(), settings.owner_id());
        let credits = StaffCreditLedger::new(store);

        Ok(Self {
            settings,
            configs,
            licenses,
            credits,
            formatter,
        })
    }
}

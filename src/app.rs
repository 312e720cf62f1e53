//! App core for MiniArc.
//!
//! Wires the settings engine, the browser session and (with the
//! `persistence` feature) the session store together for the binaries.

use crate::content::HeadlessHost;
use crate::managers::browser_session::BrowserSession;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::ShellError;
use crate::types::intent::Intent;
use crate::types::settings::LoggingSettings;

#[cfg(feature = "persistence")]
use crate::database::connection::Database;
#[cfg(feature = "persistence")]
use crate::managers::history_manager::HistoryManagerTrait;
#[cfg(feature = "persistence")]
use crate::managers::session_manager::{SessionStore, SessionStoreTrait};
#[cfg(feature = "persistence")]
use crate::types::errors::StoreError;
#[cfg(feature = "persistence")]
use crate::types::settings::ShellSettings;

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub session: BrowserSession<HeadlessHost>,
    #[cfg(feature = "persistence")]
    pub store: Option<SessionStore>,
    /// Newest visit already written to the store.
    #[cfg(feature = "persistence")]
    last_stored_visit: Option<String>,
}

impl App {
    /// Loads settings (from `config_path` or the platform default) and
    /// builds an empty session. With persistence enabled, the saved tabs
    /// and visits are restored.
    pub fn new(config_path: Option<String>) -> Result<Self, ShellError> {
        let mut settings_engine = SettingsEngine::new(config_path);
        let settings = settings_engine.load()?;
        let session = BrowserSession::new(HeadlessHost::new(), &settings)?;

        #[cfg_attr(not(feature = "persistence"), allow(unused_mut))]
        let mut app = Self {
            settings_engine,
            session,
            #[cfg(feature = "persistence")]
            store: None,
            #[cfg(feature = "persistence")]
            last_stored_visit: None,
        };

        #[cfg(feature = "persistence")]
        if settings.persistence.enabled {
            let store = SessionStore::new(open_database(&settings)?);
            app.restore_from(&store)?;
            app.store = Some(store);
        }

        Ok(app)
    }

    /// Applies one intent, then mirrors the result to the store.
    ///
    /// A store failure is logged; the intent itself has already been applied.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), ShellError> {
        self.session.dispatch(intent)?;
        #[cfg(feature = "persistence")]
        if let Err(e) = self.persist() {
            log::warn!("failed to persist session: {}", e);
        }
        Ok(())
    }

    /// Sets one setting by dot path and re-applies settings to the session.
    ///
    /// `persistence.*` changes take effect on the next start.
    pub fn update_setting(&mut self, key: &str, value: serde_json::Value) -> Result<(), ShellError> {
        self.settings_engine.set_value(key, value)?;
        self.session.apply_settings(self.settings_engine.get_settings())?;
        log::info!("setting {} updated", key);
        Ok(())
    }

    #[cfg(feature = "persistence")]
    fn restore_from(&mut self, store: &SessionStore) -> Result<(), ShellError> {
        let limit = self.settings_engine.get_settings().history.max_entries;
        let visits = store.load_visits(limit)?;
        self.last_stored_visit = visits.first().map(|v| v.id.clone());
        self.session.restore_history(visits);

        if let Some(data) = store.restore_session()? {
            self.session.restore_session(&data)?;
        }
        Ok(())
    }

    #[cfg(feature = "persistence")]
    fn persist(&mut self) -> Result<(), StoreError> {
        let Some(store) = &self.store else {
            return Ok(());
        };

        let history = self.session.history().list_history();
        let fresh: Vec<_> = history
            .iter()
            .take_while(|v| Some(&v.id) != self.last_stored_visit.as_ref())
            .collect();
        for visit in fresh.iter().rev() {
            store.append_visit(visit)?;
        }
        if let Some(newest) = fresh.first() {
            self.last_stored_visit = Some(newest.id.clone());
        }

        store.save_session(&self.session.export_session(now()))
    }
}

/// `logging.level` from the settings at `config_path`, read without building
/// an [`App`] so binaries can start logging first. Falls back to the default
/// level when the file is missing or unreadable.
pub fn configured_log_level(config_path: Option<String>) -> String {
    SettingsEngine::new(config_path)
        .load()
        .map(|settings| settings.logging.level)
        .unwrap_or_else(|_| LoggingSettings::default().level)
}

#[cfg(feature = "persistence")]
fn open_database(settings: &ShellSettings) -> Result<Database, StoreError> {
    let path = match &settings.persistence.database_path {
        Some(path) => std::path::PathBuf::from(path),
        None => crate::platform::get_data_dir().join("session.db"),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            StoreError::DatabaseError(format!("Failed to create data directory: {}", e))
        })?;
    }
    log::info!("opening session store at {}", path.display());
    Database::open(&path).map_err(|e| StoreError::DatabaseError(e.to_string()))
}

#[cfg(feature = "persistence")]
fn now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

//! Shared per-invocation state: backend clients and local paths.

use std::path::PathBuf;

use crowdcolor_core::cooldown::{CooldownTracker, JsonFileStore};
use crowdcolor_core::types::BoardId;
use crowdcolor_supabase::{SupabaseApi, SupabaseConfig, SupabaseStorage};

/// Default public site used for share links when none is configured.
const DEFAULT_APP_URL: &str = "https://crowdcolor.app";

/// Everything a command needs: REST and storage clients sharing one
/// connection pool, the share-link base URL, and the cooldown state
/// file location.
pub struct AppContext {
    pub config: SupabaseConfig,
    pub api: SupabaseApi,
    pub storage: SupabaseStorage,
    app_url: String,
    state_file: PathBuf,
}

impl AppContext {
    pub fn new(config: SupabaseConfig) -> Self {
        let http = reqwest::Client::new();
        let api = SupabaseApi::with_client(http.clone(), &config);
        let storage = SupabaseStorage::with_client(http, &config);

        let app_url = std::env::var("CROWDCOLOR_APP_URL")
            .unwrap_or_else(|_| DEFAULT_APP_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            config,
            api,
            storage,
            app_url,
            state_file: state_file_path(),
        }
    }

    /// A fresh cooldown tracker over the shared state file.
    pub fn cooldown_tracker(&self) -> CooldownTracker<JsonFileStore> {
        CooldownTracker::new(JsonFileStore::new(&self.state_file))
    }

    /// Public page URL for a board.
    pub fn board_url(&self, board_id: BoardId) -> String {
        format!("{}/board/{board_id}", self.app_url)
    }
}

/// Resolve the cooldown state file: `CROWDCOLOR_STATE_FILE` if set,
/// otherwise `~/.crowdcolor/cooldowns.json`, falling back to the
/// working directory when no home directory is known.
fn state_file_path() -> PathBuf {
    if let Ok(path) = std::env::var("CROWDCOLOR_STATE_FILE") {
        return PathBuf::from(path);
    }
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".crowdcolor").join("cooldowns.json"),
        Err(_) => PathBuf::from(".crowdcolor").join("cooldowns.json"),
    }
}

//! Supabase project configuration loaded from environment variables.

/// Connection settings for one Supabase project.
///
/// Both values come from the project's API settings page. The anon key is
/// a publishable key, not a secret; every client ships it.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://xyzcompany.supabase.co`.
    pub url: String,
    /// The project's anon (public) API key.
    pub anon_key: String,
}

/// Errors raised while loading [`SupabaseConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is absent or empty.
    #[error("Missing required environment variable {0}")]
    MissingVar(&'static str),
}

impl SupabaseConfig {
    /// Load configuration from `SUPABASE_URL` and `SUPABASE_ANON_KEY`.
    ///
    /// Unlike most settings there are no defaults here: without a project
    /// the client cannot do anything, so the caller is expected to turn
    /// this error into setup instructions rather than a crash.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = require_var("SUPABASE_URL")?;
        let anon_key = require_var("SUPABASE_ANON_KEY")?;
        Ok(Self {
            // A trailing slash would double up in every derived URL.
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    /// Base URL for PostgREST queries.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url)
    }

    /// Base URL for storage object operations.
    pub fn storage_url(&self) -> String {
        format!("{}/storage/v1", self.url)
    }

    /// WebSocket URL for the realtime service, with the apikey and
    /// protocol version as query parameters.
    pub fn realtime_ws_url(&self) -> String {
        let ws_base = if let Some(rest) = self.url.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.url.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.url.clone()
        };
        format!(
            "{ws_base}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
            self.anon_key
        )
    }
}

fn require_var(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SupabaseConfig {
        SupabaseConfig {
            url: "https://proj.supabase.co".into(),
            anon_key: "anon-key".into(),
        }
    }

    #[test]
    fn derived_urls() {
        let c = config();
        assert_eq!(c.rest_url(), "https://proj.supabase.co/rest/v1");
        assert_eq!(c.storage_url(), "https://proj.supabase.co/storage/v1");
        assert_eq!(
            c.realtime_ws_url(),
            "wss://proj.supabase.co/realtime/v1/websocket?apikey=anon-key&vsn=1.0.0"
        );
    }

    #[test]
    fn plain_http_maps_to_plain_ws() {
        let c = SupabaseConfig {
            url: "http://localhost:54321".into(),
            anon_key: "k".into(),
        };
        assert!(c.realtime_ws_url().starts_with("ws://localhost:54321/"));
    }
}

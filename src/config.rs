use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable holding the catalog bearer token.
pub const TOKEN_ENV: &str = "NOTESYNC_TOKEN";

/// Runtime settings for talking to the article catalog.
///
/// `api_url` and `default_path` come from the static YAML config; the token
/// is injected from the environment and never written back to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the catalog service, e.g. `http://localhost:8001`.
    pub api_url: String,
    /// Base directory on the catalog side for notes synced without an
    /// explicit destination. Empty or absent means "use the note's own path".
    #[serde(default)]
    pub default_path: Option<String>,
    /// Bearer token; absent means uploads fail with `AuthMissing`.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Settings {
    pub fn trace_loaded(&self) {
        info!(
            api_url = %self.api_url,
            default_path = self.default_path.as_deref().unwrap_or(""),
            has_token = self.token.is_some(),
            "Loaded Settings"
        );
    }
}

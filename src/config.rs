use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::json;

use crate::errors::ConfigError;
use crate::state::users::{IdPolicy, User};

pub const CONFIG_FILE: &str = "config.json";

/// Env var that points at a config file and overrides discovery.
pub const CONFIG_ENV: &str = "USERS_API_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP port to listen on.
    pub port: u16,

    /// Fallback tracing filter when `RUST_LOG` is unset (e.g. "info", "debug").
    pub log_level: String,

    pub server_version: String,

    /// How ids are assigned on insert: "count" or "sequential".
    pub id_policy: IdPolicy,

    /// Records present at startup.
    pub seed_users: Vec<User>,

    /// Root of the external `/objects` sandbox API.
    pub sandbox_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            log_level: "info".into(),
            server_version: env!("CARGO_PKG_VERSION").into(),
            id_policy: IdPolicy::default(),
            seed_users: default_seed(),
            sandbox_base_url: "https://api.restful-api.dev".into(),
        }
    }
}

fn default_seed() -> Vec<User> {
    let seed = json!({ "id": 1, "name": "Willian", "email": "willian@email.com" });
    serde_json::from_value(seed).map(|u| vec![u]).unwrap_or_default()
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Find the config file: `$USERS_API_CONFIG`, then next to the
    /// executable, then one directory above it.
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        let exe = env::current_exe().ok()?;
        let exe_dir = exe.parent()?;

        [exe_dir.join(CONFIG_FILE), exe_dir.join("..").join(CONFIG_FILE)]
            .into_iter()
            .find(|p| p.exists())
    }
}

//! Configuration system for osarview.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! workspace config file -> environment. Configuration is loaded from
//! `~/.config/osarview/config.toml` and/or `.osarview/config.toml` in the
//! workspace directory.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OsarviewConfig {
    pub datastore: DataStoreConfig,
    pub export: ExportConfig,
}

/// Location and transport settings of the report data store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStoreConfig {
    /// Base URL under which per-model assessment directories live.
    pub assessment_base_url: String,
    /// URL of the model metadata list.
    pub models_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for DataStoreConfig {
    fn default() -> Self {
        Self {
            assessment_base_url:
                "https://raw.githubusercontent.com/Be-Secure/besecure-ml-assessment-datastore/main/models"
                    .to_string(),
            models_url:
                "https://raw.githubusercontent.com/Be-Secure/besecure-ml-assessment-datastore/main/models/model-metadata.json"
                    .to_string(),
            timeout_secs: 15,
        }
    }
}

/// PDF export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported documents are written into.
    pub out_dir: PathBuf,
    /// Optional override for the attestation icon (PNG). The bundled icon is
    /// used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            icon_path: None,
        }
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `OSARVIEW_`)
/// 3. Workspace-local config (`.osarview/config.toml`)
/// 4. User config (`~/.config/osarview/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    overrides: Option<&OsarviewConfig>,
) -> Result<OsarviewConfig, Box<figment::Error>> {
    let mut figment = Figment::from(Serialized::defaults(OsarviewConfig::default()));

    // User-level config
    if let Some(config_dir) = directories::ProjectDirs::from("dev", "osarview", "osarview") {
        let user_config = config_dir.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    // Workspace-level config
    if let Some(ws) = workspace {
        let ws_config = ws.join(".osarview").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    // Environment variables (OSARVIEW_DATASTORE__TIMEOUT_SECS, etc.)
    figment = figment.merge(Env::prefixed("OSARVIEW_").split("__"));

    // Explicit overrides
    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    figment.extract().map_err(Box::new)
}

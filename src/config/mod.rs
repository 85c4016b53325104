use crate::core::reconcile::DeletePolicy;
use crate::core::save::{FormatWarningPolicy, SaveOptions};
use crate::core::session::Credentials;
use crate::errors::{AppError, AppResult};
use crate::store::StoreBackend;
use crate::utils::date::parse_cli_date;
use crate::utils::path::expand_tilde;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ADMIN_PASSWORD_ENV: &str = "TALLERES_ADMIN_PASSWORD";
pub const USER_PASSWORD_ENV: &str = "TALLERES_USER_PASSWORD";

/// Account secrets. Never stored in the worksheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Passwords {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: StoreBackend,
    pub store: String,
    pub worksheet: String,
    pub cache_ttl_secs: u64,
    pub filtered_deletes: DeletePolicy,
    pub on_format_warning: FormatWarningPolicy,
    pub stats_from: String,
    pub passwords: Passwords,
}

fn default_worksheet() -> String {
    "Hoja 1".to_string()
}

fn default_stats_from() -> String {
    "2024-01-01".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            store: Self::default_store(StoreBackend::Sqlite)
                .to_string_lossy()
                .to_string(),
            worksheet: default_worksheet(),
            cache_ttl_secs: 5,
            filtered_deletes: DeletePolicy::Retain,
            on_format_warning: FormatWarningPolicy::Proceed,
            stats_from: default_stats_from(),
            passwords: Passwords::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("talleres")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".talleres")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("talleres.conf")
    }

    /// Default store location for a backend
    pub fn default_store(backend: StoreBackend) -> PathBuf {
        match backend {
            StoreBackend::Sqlite => Self::config_dir().join("talleres.sqlite"),
            StoreBackend::Csv => Self::config_dir().join("sheets"),
        }
    }

    /// Load configuration from `path` (or the standard file), returning
    /// defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_file);

        if !path.exists() {
            log::debug!("no configuration at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("cannot parse {}: {e}", path.display()))
        })?;
        log::debug!("configuration loaded from {}", path.display());
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Store location with `~/` expanded.
    pub fn store_path(&self) -> PathBuf {
        expand_tilde(&self.store)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Account secrets; environment variables win over the file.
    pub fn credentials(&self) -> Credentials {
        let admin = env::var(ADMIN_PASSWORD_ENV)
            .ok()
            .or_else(|| self.passwords.admin.clone());
        let user = env::var(USER_PASSWORD_ENV)
            .ok()
            .or_else(|| self.passwords.user.clone());
        Credentials::new(admin, user)
    }

    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            delete_policy: self.filtered_deletes,
            on_format_warning: self.on_format_warning,
        }
    }

    /// Start of the default statistics period.
    pub fn stats_from_date(&self) -> AppResult<NaiveDate> {
        parse_cli_date(&self.stats_from)
            .map_err(|_| AppError::Config(format!("invalid stats_from '{}'", self.stats_from)))
    }
}

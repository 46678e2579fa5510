use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// How leadership and admins are treated when a month is locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LockPolicy {
    /// Leadership/admin may still create, edit and delete entries of a
    /// locked month; the rows they write stay locked.
    #[default]
    LeadershipOverride,
    /// Nobody mutates a locked month; it must be unlocked first.
    Strict,
}

/// Outgoing mail server used for lock notifications and reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_user")]
    pub default_user: String,
    #[serde(default)]
    pub lock_policy: LockPolicy,
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    #[serde(default = "default_max_year")]
    pub max_year: i32,
    /// Marker in the description of vacation entries carried over from the
    /// previous year.
    #[serde(default = "default_carryover_marker")]
    pub carryover_marker: String,
    #[serde(default = "default_reminder_days")]
    pub reminder_days: u32,
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
    #[serde(default = "default_push_enabled")]
    pub push_enabled: bool,
}

fn default_user() -> String {
    "admin".to_string()
}
fn default_min_year() -> i32 {
    2020
}
fn default_max_year() -> i32 {
    2030
}
fn default_carryover_marker() -> String {
    "Vorjahr".to_string()
}
fn default_reminder_days() -> u32 {
    3
}
fn default_push_enabled() -> bool {
    true
}
fn default_smtp_port() -> u16 {
    587
}
fn default_from_name() -> String {
    "Kita time tracking".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_user: default_user(),
            lock_policy: LockPolicy::default(),
            min_year: default_min_year(),
            max_year: default_max_year(),
            carryover_marker: default_carryover_marker(),
            reminder_days: default_reminder_days(),
            smtp: None,
            push_enabled: default_push_enabled(),
        }
    }
}

impl Config {
    /// Configuration for an explicit database file, all other values default.
    pub fn with_database(path: &str) -> Self {
        Self {
            database: path.to_string(),
            ..Self::default()
        }
    }

    /// Return the standard configuration directory (`~/.kitatime`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".kitatime")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("kitatime.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("kitatime.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.min_year > self.max_year {
            return Err(AppError::Config(format!(
                "min_year ({}) is greater than max_year ({})",
                self.min_year, self.max_year
            )));
        }
        if self.carryover_marker.trim().is_empty() {
            return Err(AppError::Config("carryover_marker must not be empty".into()));
        }
        Ok(())
    }

    /// Initialize configuration file and database directory.
    /// Returns the database path that was configured.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config::with_database(&db_path.to_string_lossy());

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config.database)
    }
}

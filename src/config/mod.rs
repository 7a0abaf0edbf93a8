use crate::core::calculator::HosRules;
use crate::core::calculator::cache::ttl_from_secs;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub rules: HosRules,
    #[serde(default = "default_cache_ttl")]
    pub status_cache_ttl_secs: u64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

/// Longest cycle window a config may ask for.
pub const MAX_CYCLE_DAYS: i64 = 31;

fn default_cache_ttl() -> u64 {
    60
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            rules: HosRules::default(),
            status_cache_ttl_secs: default_cache_ttl(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("hoslog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".hoslog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("hoslog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("hoslog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            let cfg: Config = serde_yaml::from_str(&content)?;
            cfg.validate()?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Reject limits that would make every evaluation meaningless.
    pub fn validate(&self) -> AppResult<()> {
        let l = &self.rules.limits;

        if !(1..=MAX_CYCLE_DAYS).contains(&l.cycle_days) {
            return Err(AppError::Config(format!(
                "rules.limits.cycle_days must be between 1 and {MAX_CYCLE_DAYS} (found {})",
                l.cycle_days
            )));
        }

        // No limit may exceed the cycle window itself.
        let cycle_window = l.cycle_days * 24 * 60;
        let minutes = [
            ("drive_minutes", l.drive_minutes),
            ("on_duty_minutes", l.on_duty_minutes),
            ("cycle_minutes", l.cycle_minutes),
            ("restart_minutes", l.restart_minutes),
            ("break_after_driving_minutes", l.break_after_driving_minutes),
            ("break_minutes", l.break_minutes),
        ];

        for (name, value) in minutes {
            if value <= 0 || value > cycle_window {
                return Err(AppError::Config(format!(
                    "rules.limits.{name} must be between 1 and {cycle_window} (found {value})"
                )));
            }
        }

        ttl_from_secs(self.status_cache_ttl_secs)?;
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = crate::utils::path::expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            dir.join("hoslog.sqlite")
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            if let Some(parent) = db_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(db_path)
    }
}

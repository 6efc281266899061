//! Configuration management for `tix`.
//!
//! Configuration is loaded from YAML files with support for:
//! - User config (~/.config/tix/config.yaml)
//! - Project config (./.tix.yaml), or an explicit `--config` file instead of both
//! - Environment variable overrides (`TIX_*`)
//! - CLI flag overrides
//!
//! Later layers win field by field.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use tickets_lib::{Session, SeedConfig, TicketStore};
use tracing::debug;

use crate::error::{CliError, Result};
use crate::logging::LogFormat;

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = ".tix.yaml";

/// One configuration layer. Unset fields defer to earlier layers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// PRNG seed for the synthetic table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Number of synthetic rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    /// Id number of the first synthetic row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_number: Option<u64>,
    /// First possible submission date of synthetic rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_start: Option<NaiveDate>,
    /// Length of the synthetic submission window, in days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_days: Option<u32>,
    /// Default destination of `tix export`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,
}

/// Overrides taken from global CLI flags.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Explicit config file; replaces the user and project files.
    pub config: Option<PathBuf>,
    pub seed: Option<u64>,
    pub rows: Option<usize>,
    /// Start the session from an exported CSV instead of seeding.
    pub from_csv: Option<PathBuf>,
}

impl Config {
    /// Overlay `other` on top of `self`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            seed: other.seed.or(self.seed),
            rows: other.rows.or(self.rows),
            start_number: other.start_number.or(self.start_number),
            window_start: other.window_start.or(self.window_start),
            window_days: other.window_days.or(self.window_days),
            export_path: other.export_path.or(self.export_path),
            log_format: other.log_format.or(self.log_format),
        }
    }

    /// Read one YAML layer. A missing file is an empty layer.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be read, or `ConfigParse`
    /// if it is not valid YAML for this schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file");
                return Ok(Self::default());
            }
            Err(e) => return Err(CliError::Io(e)),
        };
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build a layer from `TIX_*` variables, reading them through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `Config` if a variable is set but does not parse.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            seed: parse_var(&lookup, "TIX_SEED")?,
            rows: parse_var(&lookup, "TIX_ROWS")?,
            start_number: parse_var(&lookup, "TIX_START_NUMBER")?,
            window_start: parse_var(&lookup, "TIX_WINDOW_START")?,
            window_days: parse_var(&lookup, "TIX_WINDOW_DAYS")?,
            export_path: lookup("TIX_EXPORT_PATH").map(PathBuf::from),
            log_format: parse_var(&lookup, "TIX_LOG_FORMAT")?,
        })
    }

    /// Build a layer from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `Config` if a variable is set but does not parse.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Layer for the CLI flags.
    #[must_use]
    pub fn from_cli(cli: &CliOverrides) -> Self {
        Self {
            seed: cli.seed,
            rows: cli.rows,
            ..Self::default()
        }
    }

    /// Seed parameters, falling back to the built-in defaults.
    #[must_use]
    pub fn seed_config(&self) -> SeedConfig {
        let defaults = SeedConfig::default();
        SeedConfig {
            rows: self.rows.unwrap_or(defaults.rows),
            seed: self.seed.unwrap_or(defaults.seed),
            start_number: self.start_number.unwrap_or(defaults.start_number),
            window_start: self.window_start.unwrap_or(defaults.window_start),
            window_days: self.window_days.unwrap_or(defaults.window_days),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|e| CliError::Config(format!("{key}={value}: {e}")))
        })
        .transpose()
}

/// Path of the per-user config file, if a home directory is known.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join("tix").join("config.yaml"))
}

/// Load the effective configuration.
///
/// # Errors
///
/// Returns an error if a config file or environment variable is invalid.
pub fn load_config(cli: &CliOverrides) -> Result<Config> {
    let files = match &cli.config {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Config::from_file(path)?
        }
        None => {
            let user = match user_config_path() {
                Some(path) => Config::from_file(&path)?,
                None => Config::default(),
            };
            user.merge(Config::from_file(Path::new(PROJECT_CONFIG_FILE))?)
        }
    };

    let config = files.merge(Config::from_env()?).merge(Config::from_cli(cli));
    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Open the session a command works in: either the seeded table or an
/// imported CSV export.
///
/// # Errors
///
/// Returns an error if the CSV cannot be loaded.
pub fn open_session(config: &Config, cli: &CliOverrides) -> Result<Session> {
    match &cli.from_csv {
        Some(path) => Ok(Session::with_store(TicketStore::open_csv(path)?)),
        None => Ok(Session::new(config.seed_config())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_seed_defaults() {
        assert_eq!(Config::default().seed_config(), SeedConfig::default());
    }

    #[test]
    fn later_layers_win_field_by_field() {
        let file = Config {
            seed: Some(1),
            rows: Some(10),
            ..Default::default()
        };
        let env = Config {
            rows: Some(20),
            ..Default::default()
        };
        let merged = file.merge(env);
        assert_eq!(merged.seed, Some(1));
        assert_eq!(merged.rows, Some(20));
    }

    #[test]
    fn reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "seed: 7\nrows: 25\nwindow_start: 2024-01-01\nlog_format: json\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.rows, Some(25));
        assert_eq!(config.log_format, Some(LogFormat::Json));
        let seed = config.seed_config();
        assert_eq!(seed.window_start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(seed.start_number, 1100);
    }

    #[test]
    fn missing_and_empty_files_are_empty_layers() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Config::from_file(&dir.path().join("absent.yaml")).unwrap(),
            Config::default()
        );
        let empty = dir.path().join("empty.yaml");
        fs::write(&empty, "\n").unwrap();
        assert_eq!(Config::from_file(&empty).unwrap(), Config::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "seeds: 3\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(CliError::ConfigParse { .. })
        ));
    }

    #[test]
    fn env_layer_parses_values() {
        let config = Config::from_env_with(env_of(&[
            ("TIX_SEED", "99"),
            ("TIX_ROWS", " 12 "),
            ("TIX_LOG_FORMAT", "json"),
            ("TIX_WINDOW_DAYS", ""),
        ]))
        .unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.rows, Some(12));
        assert_eq!(config.log_format, Some(LogFormat::Json));
        assert_eq!(config.window_days, None);
    }

    #[test]
    fn env_layer_rejects_garbage() {
        let err = Config::from_env_with(env_of(&[("TIX_SEED", "forty-two")])).unwrap_err();
        assert!(matches!(err, CliError::Config(msg) if msg.contains("TIX_SEED")));
    }

    #[test]
    fn user_config_lives_under_tix() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("tix/config.yaml"));
        }
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let cli = CliOverrides {
            config: Some(PathBuf::from("/nonexistent/tix.yaml")),
            ..Default::default()
        };
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn explicit_config_and_cli_flags_combine() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tix.yaml");
        fs::write(&path, "seed: 5\nrows: 30\n").unwrap();
        let cli = CliOverrides {
            config: Some(path),
            rows: Some(8),
            ..Default::default()
        };
        let config = load_config(&cli).unwrap();
        assert_eq!(config.rows, Some(8));
        // TIX_SEED in the test environment would override the file.
        if env::var("TIX_SEED").is_err() {
            assert_eq!(config.seed, Some(5));
        }
    }
}

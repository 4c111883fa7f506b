use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

const CONFIG_DIR_NAME: &str = "genius";
const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_ENV: &str = "GENIUS_CONFIG";
pub const SEED_ENV: &str = "GENIUS_SEED";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub base_interval_ms: u64,
    pub interval_step_ms: u64,
    /// Floor for the flash interval once the per-level step would push it to zero or below.
    pub min_interval_ms: u64,
    pub press_feedback_ms: u64,
    pub outcome_delay_ms: u64,
    pub points_per_round: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            base_interval_ms: 1000,
            interval_step_ms: 200,
            min_interval_ms: 100,
            press_feedback_ms: 300,
            outcome_delay_ms: 500,
            points_per_round: 100,
        }
    }
}

impl GameConfig {
    pub fn from_json(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn validate(&self) -> Result<()> {
        let reason = if self.base_interval_ms == 0 {
            "base_interval_ms must be positive"
        } else if self.min_interval_ms == 0 {
            "min_interval_ms must be positive"
        } else if self.min_interval_ms > self.base_interval_ms {
            "min_interval_ms cannot exceed base_interval_ms"
        } else if self.points_per_round == 0 {
            "points_per_round must be positive"
        } else {
            return Ok(());
        };
        Err(GameError::InvalidConfig {
            reason: reason.to_string(),
        })
    }

    /// Reads a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(GameError::ConfigIo {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_json(&raw).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }
}

pub fn config_path() -> PathBuf {
    config_path_from(std::env::var_os(CONFIG_ENV))
}

/// An unset or empty override falls back to the user config directory.
fn config_path_from(override_path: Option<OsString>) -> PathBuf {
    match override_path {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => glib::user_config_dir()
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME),
    }
}

pub fn seed_from_env() -> Option<u64> {
    parse_seed(&std::env::var(SEED_ENV).ok()?)
}

fn parse_seed(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_timings() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.base_interval_ms, 1000);
        assert_eq!(cfg.interval_step_ms, 200);
        assert_eq!(cfg.press_feedback_ms, 300);
        assert_eq!(cfg.outcome_delay_ms, 500);
        assert_eq!(cfg.points_per_round, 100);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = GameConfig::from_json(r#"{ "min_interval_ms": 250 }"#).unwrap();
        assert_eq!(cfg.min_interval_ms, 250);
        assert_eq!(cfg.base_interval_ms, 1000);
    }

    #[test]
    fn floor_above_base_is_rejected() {
        let cfg = GameConfig {
            min_interval_ms: 2000,
            ..GameConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GameError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GameConfig::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        match GameConfig::load_from(&path) {
            Err(GameError::ConfigParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn file_values_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "points_per_round": 0 }"#).unwrap();
        assert!(matches!(
            GameConfig::load_from(&path),
            Err(GameError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn override_path_is_used_as_given() {
        let path = config_path_from(Some(OsString::from("/tmp/genius-custom.json")));
        assert_eq!(path, PathBuf::from("/tmp/genius-custom.json"));
    }

    #[test]
    fn empty_or_unset_override_falls_back_to_user_config_dir() {
        let fallback = config_path_from(None);
        assert!(fallback.ends_with(Path::new("genius").join("config.json")));
        assert_eq!(config_path_from(Some(OsString::new())), fallback);
    }

    #[test]
    fn seed_accepts_surrounding_whitespace() {
        assert_eq!(parse_seed("42"), Some(42));
        assert_eq!(parse_seed("  7\n"), Some(7));
    }

    #[test]
    fn unusable_seed_is_ignored() {
        assert_eq!(parse_seed(""), None);
        assert_eq!(parse_seed("abc"), None);
        assert_eq!(parse_seed("-3"), None);
    }
}

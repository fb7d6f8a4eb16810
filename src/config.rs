//! Optional TOML configuration.
//!
//! Looked up at `<config dir>/minici-report/config.toml` unless a path is
//! given explicitly. Every key is optional:
//!
//! ```toml
//! base_url = "https://certification.canonical.com"
//! report_file = "minici.json"
//! csv_dir = "."
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants;
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Certification API host.
    pub base_url: String,
    /// Where the report is written.
    pub report_file: PathBuf,
    /// Directory holding the per-unit submission databases.
    pub csv_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: constants::C3_URL.to_string(),
            report_file: PathBuf::from(constants::REPORT_JSON_NAME),
            csv_dir: PathBuf::from("."),
        }
    }
}

/// Default location of the configuration file, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME)
    })
}

impl Settings {
    /// Loads settings.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and defaults are used when nothing is there.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let settings = Self::from_toml(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(settings)
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "https://certification.canonical.com");
        assert_eq!(settings.report_file, Path::new("minici.json"));
        assert_eq!(settings.csv_dir, Path::new("."));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = Settings::from_toml(r#"base_url = "http://localhost:8000""#).unwrap();
        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.report_file, Path::new("minici.json"));
    }

    #[test]
    fn test_full_file() {
        let settings = Settings::from_toml(
            r#"
base_url = "http://c3.test"
report_file = "/srv/www/minici.json"
csv_dir = "/srv/db"
"#,
        )
        .unwrap();
        assert_eq!(settings.report_file, Path::new("/srv/www/minici.json"));
        assert_eq!(settings.csv_dir, Path::new("/srv/db"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Settings::from_toml("api_key = \"nope\"").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "csv_dir = \"units\"\n").unwrap();
        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.csv_dir, Path::new("units"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Settings::load(Some(Path::new("/nonexistent/config.toml"))).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [").unwrap();
        let err = Settings::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}

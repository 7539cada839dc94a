//! Configuration file loading.
//!
//! ```toml
//! [catalog]
//! path = "/tmp/enigma2/lamedb"
//!
//! [output]
//! format = "csv"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;

use crate::context::OutputFormat;

/// File looked up in the working directory when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "lamedb.toml";

/// Configuration file format.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct CatalogSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct OutputSection {
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct LoggingSection {
    pub level: Option<String>,
}

impl LoggingSection {
    /// The configured level. Only `None` when no level is set, since
    /// [`load`] rejects unparsable values.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.level.as_deref().and_then(|level| level.parse().ok())
    }
}

fn parse(contents: &str) -> Result<ConfigFile, Box<dyn std::error::Error>> {
    let config: ConfigFile = toml::from_str(contents)?;
    if let Some(level) = config.logging.level.as_deref() {
        if level.parse::<LevelFilter>().is_err() {
            return Err(format!("Invalid logging.level {:?}", level).into());
        }
    }
    Ok(config)
}

/// Load the configuration: explicit path > `lamedb.toml` if present > defaults.
pub(crate) fn load(explicit: Option<&Path>) -> Result<ConfigFile, Box<dyn std::error::Error>> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                return Ok(ConfigFile::default());
            }
            default_path
        }
    };

    let contents = std::fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    parse(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse(
            r#"
            [catalog]
            path = "/tmp/enigma2/lamedb"

            [output]
            format = "csv"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog.path, Some(PathBuf::from("/tmp/enigma2/lamedb")));
        assert_eq!(config.output.format, Some(OutputFormat::Csv));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.level_filter(), Some(LevelFilter::Debug));
    }

    #[test]
    fn test_sections_are_optional() {
        let config = parse("").unwrap();
        assert!(config.catalog.path.is_none());
        assert!(config.output.format.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(parse("[output]\nformat = \"xml\"\n").is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let err = parse("[logging]\nlevel = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("loud"));
        let config = parse("[logging]\nlevel = \"WARN\"\n").unwrap();
        assert_eq!(config.logging.level_filter(), Some(LevelFilter::Warn));
    }

    #[test]
    fn test_missing_explicit_file() {
        assert!(load(Some(Path::new("/nonexistent/lamedb.toml"))).is_err());
    }
}

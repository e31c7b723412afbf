mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_LIST_PAGE_SIZE: usize = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> Option<Self> {
        OutputFormat::from_str(s, true).ok()
    }
}

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub output: OutputFormat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub list_page_size: usize,
    pub seed_vocabulary: bool,
    pub output: OutputFormat,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_path must be specified on the command line or in config file")
            })?;

        if db_path.is_dir() {
            bail!("db_path is a directory: {:?}", db_path);
        }
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                bail!("Database directory does not exist: {:?}", parent);
            }
        }

        let log_level = file
            .log_level
            .or_else(|| cli.log_level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let list_page_size = file.list_page_size.unwrap_or(DEFAULT_LIST_PAGE_SIZE);
        if list_page_size == 0 {
            bail!("list_page_size must be at least 1");
        }

        let seed_vocabulary = file.seed_vocabulary.unwrap_or(true);

        let output = match file.output {
            Some(s) => match OutputFormat::parse(&s) {
                Some(output) => output,
                None => bail!("Unknown output format '{}', expected 'text' or 'json'", s),
            },
            None => cli.output,
        };

        Ok(Self {
            db_path,
            log_level,
            list_page_size,
            seed_vocabulary,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(dir: &TempDir) -> CliConfig {
        CliConfig {
            db_path: Some(dir.path().join("movies.db")),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_from_cli_only() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::resolve(&cli(&dir), None).unwrap();

        assert_eq!(config.db_path, dir.path().join("movies.db"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.list_page_size, DEFAULT_LIST_PAGE_SIZE);
        assert!(config.seed_vocabulary);
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn test_file_overrides_cli() {
        let dir = TempDir::new().unwrap();
        let mut cli_config = cli(&dir);
        cli_config.log_level = Some("debug".to_string());
        cli_config.output = OutputFormat::Text;

        let file = FileConfig {
            db_path: Some(dir.path().join("other.db").to_string_lossy().into_owned()),
            log_level: Some("warn".to_string()),
            list_page_size: Some(3),
            seed_vocabulary: Some(false),
            output: Some("JSON".to_string()),
        };
        let config = AppConfig::resolve(&cli_config, Some(file)).unwrap();

        assert_eq!(config.db_path, dir.path().join("other.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.list_page_size, 3);
        assert!(!config.seed_vocabulary);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();

        assert!(AppConfig::resolve(&CliConfig::default(), None).is_err());

        let file = FileConfig {
            list_page_size: Some(0),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli(&dir), Some(file)).is_err());

        let file = FileConfig {
            output: Some("yaml".to_string()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&cli(&dir), Some(file)).is_err());

        let missing_dir = CliConfig {
            db_path: Some(dir.path().join("nope").join("movies.db")),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&missing_dir, None).is_err());

        let is_dir = CliConfig {
            db_path: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        assert!(AppConfig::resolve(&is_dir, None).is_err());
    }
}

// src/config/loader.rs
//! Layered configuration loader
//!
//! Sources, lowest precedence first: built-in defaults, each TOML file in
//! `config_paths` (missing files are skipped), then environment variables
//! named `<PREFIX>_<SECTION>__<FIELD>`, e.g. `EMG_ACTIVITY__MIN_SOUND_S=0.25`.

use crate::config::ConditioningConfig;
use crate::error::{EmgError, EmgResult};
use config::{Config, Environment, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix
pub const DEFAULT_ENV_PREFIX: &str = "EMG";
/// Primary configuration file
pub const DEFAULT_CONFIG_FILE: &str = "emg_conditioning.toml";
/// Local overrides, applied after the primary file
pub const LOCAL_CONFIG_FILE: &str = "config/local.toml";

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader reading the default file locations
    pub fn new() -> Self {
        Self::with_paths(vec![
            PathBuf::from(DEFAULT_CONFIG_FILE),
            PathBuf::from(LOCAL_CONFIG_FILE),
        ])
    }

    /// Loader with custom paths
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = prefix.to_string();
        self
    }

    /// Files read by [`ConfigLoader::load`], in precedence order
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    /// Load, merge and validate configuration
    pub fn load(&self) -> EmgResult<ConditioningConfig> {
        let config = self.merged()?;
        config
            .validate_consistency()
            .map_err(|errors| EmgError::configuration(errors.join("; ")))?;
        Ok(config)
    }

    /// Validate a single file on top of the defaults without loading it
    pub fn validate_config_file<P: AsRef<Path>>(&self, path: P) -> EmgResult<()> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EmgError::configuration(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }

        let config: ConditioningConfig = Config::builder()
            .add_source(Config::try_from(&ConditioningConfig::default())?)
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config
            .validate_consistency()
            .map_err(|errors| EmgError::configuration(errors.join("; ")))
    }

    /// Write a configuration out as TOML
    pub fn export_config<P: AsRef<Path>>(config: &ConditioningConfig, path: P) -> EmgResult<()> {
        let content = toml::to_string_pretty(config)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn merged(&self) -> EmgResult<ConditioningConfig> {
        let mut builder =
            Config::builder().add_source(Config::try_from(&ConditioningConfig::default())?);

        for path in &self.config_paths {
            debug!(path = %path.display(), exists = path.exists(), "config source");
            builder = builder
                .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn loader_for(file: &NamedTempFile, prefix: &str) -> ConfigLoader {
        ConfigLoader::with_paths(vec![file.path().to_path_buf()]).with_env_prefix(prefix)
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let loader = ConfigLoader::with_paths(vec![PathBuf::from("does/not/exist.toml")])
            .with_env_prefix("EMGTEST_MISSING");
        let config = loader.load().unwrap();
        assert_eq!(config, ConditioningConfig::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[emg]
rms_window_ms = 25.0

[mvc]
rms_half_window = 5
        "#
        )
        .unwrap();

        let config = loader_for(&temp_file, "EMGTEST_FILE").load().unwrap();
        assert_eq!(config.emg.rms_window_ms, 25.0);
        assert_eq!(config.emg.hampel_window_ms, 50.0);
        assert_eq!(config.mvc.rms_half_window, 5);
    }

    #[test]
    fn test_invalid_config_validation() {
        let loader = ConfigLoader::new();

        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[activity]
min_silence_s = 0.5
min_sound_s = 0.2
        "#
        )
        .unwrap();

        let err = loader.validate_config_file(temp_file.path()).unwrap_err();
        assert!(format!("{}", err).contains("min_sound"));
    }

    #[test]
    fn test_environment_override() {
        let temp_file = NamedTempFile::new().unwrap();
        std::env::set_var("EMGTEST_ENV_ACTIVITY__MIN_SOUND_S", "0.5");

        let config = loader_for(&temp_file, "EMGTEST_ENV").load().unwrap();
        assert_eq!(config.activity.min_sound_s, 0.5);

        std::env::remove_var("EMGTEST_ENV_ACTIVITY__MIN_SOUND_S");
    }

    #[test]
    fn test_config_export() {
        let temp_file = NamedTempFile::new().unwrap();
        ConfigLoader::export_config(&ConditioningConfig::default(), temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("[mvc]"));
        assert!(ConfigLoader::new().validate_config_file(temp_file.path()).is_ok());
    }
}

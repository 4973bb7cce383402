use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INPUT_PATH: &str = "guitar_riff.mp3";
pub const DEFAULT_OUTPUT_PATH: &str = "guitar_riff_filtered.wav";
pub const DEFAULT_CUTOFF_HZ: f64 = 1000.0;
pub const DEFAULT_PLOT_DIR: &str = "plots";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cutoff frequency must be a number, got {0}")]
    InvalidCutoff(f64),
    #[error("{0} path must not be empty")]
    EmptyPath(&'static str),
    #[error("output path must differ from input path ({0})")]
    OutputOverwritesInput(PathBuf),
}

/// Everything a filter run needs. Fields missing from a config file take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub cutoff_hz: f64,
    /// Where diagnostic plots go; `None` disables plotting.
    pub plot_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            cutoff_hz: DEFAULT_CUTOFF_HZ,
            plot_dir: Some(PathBuf::from(DEFAULT_PLOT_DIR)),
        }
    }
}

impl PipelineConfig {
    fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cutoff_hz.is_nan() {
            return Err(ConfigError::InvalidCutoff(self.cutoff_hz));
        }
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("input"));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPath("output"));
        }
        if self.input_path == self.output_path {
            return Err(ConfigError::OutputOverwritesInput(self.output_path.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_run() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_path, PathBuf::from("guitar_riff.mp3"));
        assert_eq!(config.output_path, PathBuf::from("guitar_riff_filtered.wav"));
        assert_eq!(config.cutoff_hz, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = PipelineConfig::from_json_str(r#"{"cutoff_hz": 250.5, "plot_dir": null}"#)
            .unwrap();
        assert_eq!(config.cutoff_hz, 250.5);
        assert_eq!(config.plot_dir, None);
        assert_eq!(config.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
    }

    #[test]
    fn test_unparseable_json() {
        let err = PipelineConfig::from_json_str(r#"{"cutoff_hz": "high"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lowpass.json");
        fs::write(&path, r#"{"input_path": "riff.wav", "output_path": "riff_lp.wav"}"#).unwrap();
        let config = PipelineConfig::from_json_file(&path).unwrap();
        assert_eq!(config.input_path, PathBuf::from("riff.wav"));
        assert_eq!(config.output_path, PathBuf::from("riff_lp.wav"));

        let missing = PipelineConfig::from_json_file(&dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let nan = PipelineConfig {
            cutoff_hz: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(nan.validate(), Err(ConfigError::InvalidCutoff(_))));

        let empty = PipelineConfig {
            input_path: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(empty.validate(), Err(ConfigError::EmptyPath("input"))));

        let clobber = PipelineConfig {
            output_path: PathBuf::from(DEFAULT_INPUT_PATH),
            ..Default::default()
        };
        assert!(matches!(
            clobber.validate(),
            Err(ConfigError::OutputOverwritesInput(_))
        ));
    }

    #[test]
    fn test_negative_cutoff_is_allowed() {
        let config = PipelineConfig {
            cutoff_hz: -5.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

//! Generation settings (sounds.toml)
//!
//! The sample rate, output directory and noise seed are passed explicitly to
//! everything that needs them. Settings can be loaded from a TOML file; any
//! missing key falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::SAMPLE_RATE;

/// Sound generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Output sample rate in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Directory receiving the WAV files (default: assets/sounds)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Base seed for noise layers (default: 0)
    #[serde(default)]
    pub seed: u64,
}

fn default_sample_rate() -> u32 {
    SAMPLE_RATE
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("assets/sounds")
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            output_dir: default_output_dir(),
            seed: 0,
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl SynthConfig {
    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds an unusable value.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that cannot produce audio
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid(
                "sample_rate must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Noise seed for one sound
    ///
    /// Mixes the base seed with a hash of the sound name, so each sound has
    /// its own stream no matter which order the batch runs in.
    pub fn seed_for(&self, name: &str) -> u64 {
        // FNV-1a
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in name.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
        }
        hash ^ self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SynthConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.output_dir, PathBuf::from("assets/sounds"));
        assert_eq!(config.seed, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = SynthConfig::from_toml("sample_rate = 22050\n").unwrap();
        assert_eq!(config.sample_rate, 22050);
        assert_eq!(config.output_dir, PathBuf::from("assets/sounds"));

        let config = SynthConfig::from_toml("").unwrap();
        assert_eq!(config, SynthConfig::default());
    }

    #[test]
    fn test_from_toml_full() {
        let config = SynthConfig::from_toml(
            r#"
sample_rate = 48000
output_dir = "out/sfx"
seed = 1234
"#,
        )
        .unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.output_dir, PathBuf::from("out/sfx"));
        assert_eq!(config.seed, 1234);
    }

    #[test]
    fn test_rejects_zero_sample_rate() {
        assert!(matches!(
            SynthConfig::from_toml("sample_rate = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            SynthConfig::from_toml("sample_rate = \"fast\""),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SynthConfig::load(Path::new("/definitely/not/here/sounds.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("sounds.toml");
        std::fs::write(&path, "seed = [").unwrap();
        match SynthConfig::load(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_seed_for_is_stable_and_distinct() {
        let config = SynthConfig::default();
        assert_eq!(config.seed_for("jump"), config.seed_for("jump"));
        assert_ne!(config.seed_for("jump"), config.seed_for("double_jump"));

        let reseeded = SynthConfig {
            seed: 99,
            ..SynthConfig::default()
        };
        assert_ne!(config.seed_for("jump"), reseeded.seed_for("jump"));
    }
}

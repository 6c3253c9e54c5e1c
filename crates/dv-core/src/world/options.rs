//! Engine options and configuration
//!
//! Options are read from an rc-style file:
//!
//! ```text
//! # comments run to end of line
//! OPTIONS=evil_turn_max:100,max_live_dungeons:2
//! OPTIONS=seed:42
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EVIL_TURN_MAX, MAX_LIVE_DUNGEONS, MAX_SAVE_SLOTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Ticks the evil faction may spend on one turn
    pub evil_turn_max: u32,
    /// Live dungeons tolerated before those without heroes are pruned
    pub max_live_dungeons: usize,
    /// Save slots kept per participant
    pub save_slots: usize,
    /// Fixed seed; the host picks one when absent
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            evil_turn_max: EVIL_TURN_MAX,
            max_live_dungeons: MAX_LIVE_DUNGEONS,
            save_slots: MAX_SAVE_SLOTS,
            seed: None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Invalid value '{1}' for option '{0}'")]
    InvalidValue(String, String),

    #[error("Missing value for option: {0}")]
    MissingValue(String),
}

impl EngineOptions {
    /// Load options from a file
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::IoError(e.to_string()))?;
        Self::parse_config(&contents)
    }

    /// Parse options from a config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        match opt.split_once(':').or_else(|| opt.split_once('=')) {
            Some((key, value)) => self.set_option(key.trim(), value.trim()),
            None => Err(OptionsError::MissingValue(opt.to_string())),
        }
    }

    /// Set one option from its textual value
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue(name.to_string(), value.to_string());

        match name {
            "evil_turn_max" => {
                self.evil_turn_max = value.parse().map_err(|_| invalid())?;
                if self.evil_turn_max == 0 {
                    return Err(invalid());
                }
            }
            "max_live_dungeons" => {
                self.max_live_dungeons = value.parse().map_err(|_| invalid())?;
            }
            "save_slots" => {
                self.save_slots = value.parse().map_err(|_| invalid())?;
            }
            "seed" => {
                self.seed = match value {
                    "random" | "none" => None,
                    _ => Some(value.parse().map_err(|_| invalid())?),
                };
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Save options to a file
    pub fn save_to_file(&self, path: &Path) -> Result<(), OptionsError> {
        std::fs::write(path, self.to_config_string()).map_err(|e| OptionsError::IoError(e.to_string()))
    }

    pub fn to_config_string(&self) -> String {
        let mut lines = vec!["# Delve engine configuration".to_string(), String::new()];
        lines.push(format!("OPTIONS=evil_turn_max:{}", self.evil_turn_max));
        lines.push(format!("OPTIONS=max_live_dungeons:{}", self.max_live_dungeons));
        lines.push(format!("OPTIONS=save_slots:{}", self.save_slots));
        if let Some(seed) = self.seed {
            lines.push(format!("OPTIONS=seed:{}", seed));
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = EngineOptions::default();
        assert_eq!(options.evil_turn_max, 100);
        assert_eq!(options.max_live_dungeons, 2);
        assert_eq!(options.save_slots, 3);
        assert_eq!(options.seed, None);
    }

    #[test]
    fn test_parse_config() {
        let options = EngineOptions::parse_config(
            "# test\n\nOPTIONS=evil_turn_max:20, max_live_dungeons=3\nOPTIONS=seed:9\n",
        )
        .unwrap();
        assert_eq!(options.evil_turn_max, 20);
        assert_eq!(options.max_live_dungeons, 3);
        assert_eq!(options.seed, Some(9));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            EngineOptions::parse_config("OPTIONS=colour:1"),
            Err(OptionsError::UnknownOption("colour".to_string()))
        );
        assert_eq!(
            EngineOptions::parse_config("OPTIONS=evil_turn_max:lots"),
            Err(OptionsError::InvalidValue("evil_turn_max".to_string(), "lots".to_string()))
        );
        assert!(matches!(
            EngineOptions::parse_config("OPTIONS=evil_turn_max:0"),
            Err(OptionsError::InvalidValue(..))
        ));
        assert_eq!(
            EngineOptions::parse_config("OPTIONS=seed"),
            Err(OptionsError::MissingValue("seed".to_string()))
        );
    }

    #[test]
    fn test_config_string_roundtrip() {
        let options = EngineOptions {
            evil_turn_max: 50,
            max_live_dungeons: 4,
            save_slots: 1,
            seed: Some(1234),
        };
        assert_eq!(EngineOptions::parse_config(&options.to_config_string()), Ok(options));
    }
}

// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const WORKSPACE_CONFIG_PATH: &str = ".telerisk/config.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "failed to read config {}: {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid config {}: {message}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Score thresholds driving the response plan of the assessment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssessmentSettings {
    pub critical_score: u32,
    pub major_score: u32,
    /// Upper bound of a valid `Risk_Score`, also the normaliser for summaries.
    pub max_score: u32,
}

impl Default for AssessmentSettings {
    fn default() -> Self {
        Self {
            critical_score: 9,
            major_score: 6,
            max_score: 25,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QaSettings {
    pub fail_on_warn: bool,
    pub check_empty_fields: bool,
}

impl Default for QaSettings {
    fn default() -> Self {
        Self {
            fail_on_warn: false,
            check_empty_fields: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    pub assessment: AssessmentSettings,
    pub qa: QaSettings,
    /// Relative importance of each `Sector` value in the overall register
    /// score. Empty means every sector weighs the same.
    pub sectors: BTreeMap<String, f64>,
}

impl RecommenderConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_yaml::from_str(raw).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.assessment;
        if a.major_score == 0 {
            return Err(ConfigError::Invalid(
                "assessment.major_score must be > 0".to_string(),
            ));
        }
        if a.major_score >= a.critical_score {
            return Err(ConfigError::Invalid(format!(
                "assessment.major_score ({}) must be below critical_score ({})",
                a.major_score, a.critical_score
            )));
        }
        if a.critical_score > a.max_score {
            return Err(ConfigError::Invalid(format!(
                "assessment.critical_score ({}) exceeds max_score ({})",
                a.critical_score, a.max_score
            )));
        }
        let mut seen = BTreeMap::new();
        for (name, weight) in &self.sectors {
            let key = name.trim().to_lowercase();
            if key.is_empty() {
                return Err(ConfigError::Invalid(
                    "sectors: sector name must not be empty".to_string(),
                ));
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "sectors.{name}: weight must be a finite number >= 0, got {weight}"
                )));
            }
            if let Some(previous) = seen.insert(key, name) {
                return Err(ConfigError::Invalid(format!(
                    "sectors: `{previous}` and `{name}` name the same sector"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum ConfigSource {
    Default,
    Workspace(PathBuf),
    Explicit(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedConfig {
    pub source: ConfigSource,
    pub config: RecommenderConfig,
}

impl LoadedConfig {
    pub fn load(source: ConfigSource) -> Result<Self, ConfigError> {
        let config = match &source {
            ConfigSource::Default => RecommenderConfig::default(),
            ConfigSource::Workspace(path) | ConfigSource::Explicit(path) => {
                RecommenderConfig::from_path(path)?
            }
        };
        Ok(Self { source, config })
    }
}

/// An explicit path always wins; otherwise the workspace file is used only
/// when it exists.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>, workdir: &Path) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    let workspace = workdir.join(WORKSPACE_CONFIG_PATH);
    if workspace.is_file() {
        ConfigSource::Workspace(workspace)
    } else {
        ConfigSource::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_sections() {
        let config = RecommenderConfig::from_yaml_str("qa:\n  fail_on_warn: true\n")
            .expect("partial config");
        assert!(config.qa.fail_on_warn);
        assert!(config.qa.check_empty_fields);
        assert_eq!(config.assessment, AssessmentSettings::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RecommenderConfig::from_yaml_str("assessment:\n  critical: 9\n")
            .expect_err("unknown key must fail");
        assert!(err.to_string().contains("invalid config"), "{err}");
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        let err = RecommenderConfig::from_yaml_str(
            "assessment:\n  critical_score: 5\n  major_score: 6\n",
        )
        .expect_err("inverted thresholds");
        assert!(err.to_string().contains("must be below critical_score"), "{err}");
    }

    #[test]
    fn sector_weights_parse_and_are_checked() {
        let config = RecommenderConfig::from_yaml_str(
            "sectors:\n  Network Infrastructure: 0.5\n  Cybersecurity: 0.3\n",
        )
        .expect("sectors");
        assert_eq!(config.sectors.get("Cybersecurity"), Some(&0.3));
        assert_eq!(config.assessment, AssessmentSettings::default());

        let err = RecommenderConfig::from_yaml_str("sectors:\n  Cybersecurity: -1\n")
            .expect_err("negative weight");
        assert!(err.to_string().contains("sectors.Cybersecurity"), "{err}");

        let err = RecommenderConfig::from_yaml_str(
            "sectors:\n  cybersecurity: 1\n  Cybersecurity: 2\n",
        )
        .expect_err("same sector twice");
        assert!(err.to_string().contains("name the same sector"), "{err}");
    }

    #[test]
    fn critical_above_max_is_rejected() {
        let config = RecommenderConfig {
            assessment: AssessmentSettings {
                critical_score: 30,
                major_score: 6,
                max_score: 25,
            },
            ..RecommenderConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

use crate::classify::{NamePartSplitter, PlaceholderFilter};
use crate::error::{Result, ZeroPageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

/// Environment variable pointing at a configuration file.
pub const CONFIG_ENV: &str = "ZEROPAGE_CONFIG";

const WILDCARD: &str = "*";

fn wildcard() -> String {
    WILDCARD.to_string()
}

/// Settings for one project/step combination.
///
/// `project` and `step` are either exact names or `*`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepConfig {
    #[serde(default = "wildcard")]
    pub project: String,
    #[serde(default = "wildcard")]
    pub step: String,
    #[serde(default)]
    pub namepart_splitter: NamePartSplitter,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            project: wildcard(),
            step: wildcard(),
            namepart_splitter: NamePartSplitter::default(),
        }
    }
}

impl StepConfig {
    pub fn filter(&self) -> PlaceholderFilter {
        PlaceholderFilter::new(self.namepart_splitter.clone())
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    config: Vec<StepConfig>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub config_path: Option<PathBuf>,
    pub blocks: Vec<StepConfig>,
}

impl Config {
    /// Locate and load the configuration.
    ///
    /// Lookup order: `path_override`, then `$ZEROPAGE_CONFIG`, then
    /// `zeropage/zeropage.toml` in the XDG config directories. Without any file
    /// the built-in defaults apply.
    pub fn new(path_override: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(path) = path_override {
            Some(path)
        } else if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            Some(PathBuf::from(env_path))
        } else {
            BaseDirectories::with_prefix("zeropage")
                .ok()
                .and_then(|xdg| xdg.find_config_file("zeropage.toml"))
        };

        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ZeroPageError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(toml_str)
            .map_err(|e| ZeroPageError::Config(format!("Failed to parse TOML: {}", e)))?;

        Ok(Self {
            config_path: None,
            blocks: file.config,
        })
    }

    /// Settings for `project` and `step`.
    ///
    /// The most specific block wins: exact project and step, then project
    /// with any step, then any project with the step, then `*`/`*`.
    pub fn resolve(&self, project: &str, step: &str) -> StepConfig {
        let candidates = [
            (project, step),
            (project, WILDCARD),
            (WILDCARD, step),
            (WILDCARD, WILDCARD),
        ];

        candidates
            .iter()
            .find_map(|(p, s)| {
                self.blocks
                    .iter()
                    .find(|block| block.project == *p && block.step == *s)
            })
            .cloned()
            .unwrap_or_default()
    }
}

use crate::core::StreamError;
use crate::gemini::FoldPolicy;
use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::Path;

include!(concat!(env!("OUT_DIR"), "/default_config.rs"));

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FoldConfig {
    pub role: String,
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub fold: FoldConfig,
    pub enable_tools: bool,
    pub output: OutputFormat,
}

/// How forwarded chunks are written by the CLI
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON chunk per line
    #[value(name = "json")]
    Json,
    /// Text of the first candidate only
    #[value(name = "text")]
    Text,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("Invalid default config")
    }
}

impl Config {
    /// Loads `config.toml` from the working directory, falling back to the embedded defaults.
    pub fn load() -> Result<Self, StreamError> {
        let config_path = Path::new(CONFIG_FILE);
        if config_path.exists() {
            Self::load_from(config_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, StreamError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| StreamError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, StreamError> {
        toml::from_str(contents)
            .map_err(|e| StreamError::ConfigError(format!("Failed to parse config file: {e}")))
    }

    pub fn fold_policy(&self) -> FoldPolicy {
        FoldPolicy::new(self.fold.role.clone(), self.fold.prefix.clone())
    }
}

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebSearchProvider {
    Duckduckgo,
    Google,
    Bing,
    Custom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub max_results: u16,
    pub plugin_dir: PathBuf,
    pub config_path: PathBuf,
    pub web_search_provider: WebSearchProvider,
    pub web_search_custom_template: String,
}

impl Default for Config {
    fn default() -> Self {
        let base = stable_app_data_dir();
        Self {
            max_results: 20,
            plugin_dir: base.join("plugins"),
            config_path: base.join("config.toml"),
            web_search_provider: WebSearchProvider::Duckduckgo,
            web_search_custom_template: String::new(),
        }
    }
}

/// App data root. `QUICKBAR_DATA_DIR` overrides the location so tests and
/// portable installs can redirect all on-disk state.
pub fn stable_app_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("QUICKBAR_DATA_DIR") {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    std::env::temp_dir().join("quickbar")
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Parse(error) => write!(f, "parse error: {error}"),
            Self::Invalid(error) => write!(f, "invalid config: {error}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    max_results: Option<u16>,
    plugin_dir: Option<PathBuf>,
    web_search_provider: Option<WebSearchProvider>,
    web_search_custom_template: Option<String>,
}

/// Loads config from `path` (default location when `None`). A missing file
/// yields defaults rooted at that path; nothing is written here.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if let Some(path) = path {
        config.config_path = path.to_path_buf();
    }

    let raw = match std::fs::read_to_string(&config.config_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            validate(&config).map_err(ConfigError::Invalid)?;
            return Ok(config);
        }
        Err(error) => return Err(ConfigError::Io(error)),
    };

    let file: ConfigFile = toml::from_str(&raw).map_err(|e| {
        ConfigError::Parse(format!(
            "invalid toml in '{}': {e}",
            config.config_path.display()
        ))
    })?;

    if let Some(max_results) = file.max_results {
        config.max_results = max_results;
    }
    if let Some(plugin_dir) = file.plugin_dir {
        config.plugin_dir = plugin_dir;
    }
    if let Some(provider) = file.web_search_provider {
        config.web_search_provider = provider;
    }
    if let Some(template) = file.web_search_custom_template {
        config.web_search_custom_template = template;
    }

    validate(&config).map_err(ConfigError::Invalid)?;
    Ok(config)
}

pub fn save(config: &Config) -> Result<(), ConfigError> {
    validate(config).map_err(ConfigError::Invalid)?;
    let file = ConfigFile {
        max_results: Some(config.max_results),
        plugin_dir: Some(config.plugin_dir.clone()),
        web_search_provider: Some(config.web_search_provider),
        web_search_custom_template: Some(config.web_search_custom_template.clone()),
    };
    let encoded = toml::to_string_pretty(&file)
        .map_err(|e| ConfigError::Parse(format!("config serialization failed: {e}")))?;

    if let Some(parent) = config.config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.config_path, encoded)?;
    Ok(())
}

pub fn validate(config: &Config) -> Result<(), String> {
    if config.max_results < 5 || config.max_results > 100 {
        return Err("max_results out of range".into());
    }

    if config.plugin_dir.as_os_str().is_empty() {
        return Err("plugin_dir is required".into());
    }

    if config.config_path.as_os_str().is_empty() {
        return Err("config_path is required".into());
    }

    if config.web_search_provider == WebSearchProvider::Custom {
        let template = config.web_search_custom_template.trim();
        if template.is_empty() || !template.contains("{query}") {
            return Err("custom web search template must contain {query}".into());
        }
    }

    Ok(())
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub user_key: Option<String>, // $PLATEFINDER_API_KEY wins when set
}

fn default_base_url() -> String {
    "https://developers.zomato.com/api/v2.1".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_key: None,
        }
    }
}

impl ApiConfig {
    pub fn resolved_user_key(&self) -> String {
        std::env::var("PLATEFINDER_API_KEY")
            .ok()
            .or_else(|| self.user_key.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationProvider {
    #[default]
    Ip,
    Fixed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub provider: LocationProvider,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_ip_lookup_url")]
    pub ip_lookup_url: String,
}

fn default_ip_lookup_url() -> String {
    "http://ip-api.com/json".into()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: LocationProvider::default(),
            latitude: None,
            longitude: None,
            ip_lookup_url: default_ip_lookup_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_name_max_chars")]
    pub name_max_chars: usize,
    #[serde(default = "default_placeholder_thumb")]
    pub placeholder_thumb: String,
}

fn default_theme() -> String {
    "dark".into()
}
fn default_page_size() -> usize {
    7
}
fn default_name_max_chars() -> usize {
    13
}
fn default_placeholder_thumb() -> String {
    "https://cwdaust.com.au/wpress/wp-content/uploads/2015/04/placeholder-restaurant.png".into()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            page_size: default_page_size(),
            name_max_chars: default_name_max_chars(),
            placeholder_thumb: default_placeholder_thumb(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    #[default]
    Reset,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub dir: Option<String>, // falls back to <cache dir>/platefinder when None
    #[serde(default = "default_session_key")]
    pub session_key: String,
    #[serde(default)]
    pub on_corrupt: CorruptPolicy,
}

fn default_session_key() -> String {
    "searchHistory".into()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            session_key: default_session_key(),
            on_corrupt: CorruptPolicy::default(),
        }
    }
}

impl StorageConfig {
    pub fn resolved_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => PathBuf::from(dir),
            None => app_cache_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn resolved_file(&self) -> PathBuf {
        match &self.file {
            Some(file) => PathBuf::from(file),
            None => app_cache_dir().join("platefinder.log"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

pub fn app_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("platefinder")
}

impl Config {
    pub fn config_path() -> PathBuf {
        if let Ok(env_path) = std::env::var("PLATEFINDER_CONFIG") {
            return PathBuf::from(env_path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("platefinder")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let cfg: Self =
            toml::from_str(content).map_err(|e| crate::PlateFinderError::Config(e.to_string()))?;
        if cfg.display.page_size == 0 {
            return Err(crate::PlateFinderError::Config(
                "display.page_size must be at least 1".into(),
            ));
        }
        Ok(cfg)
    }

    pub fn save(&self) -> crate::Result<PathBuf> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::PlateFinderError::Config(e.to_string()))?;
        std::fs::write(&path, content)?;
        Ok(path)
    }
}

//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/holiday-finder/config.toml

pub mod defaults;

use crate::constants::api::{GEOCODER_USER_AGENT, NOMINATIM_URL, OFFERS_URL, OFFERS_USER_AGENT};
use crate::constants::query::DEFAULT_LIMIT;
use crate::error::{Error, Result};
use crate::offers::criteria::Period;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Offers API settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Geocoder settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// HTTP rate limiting
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Batch search criteria
    #[serde(default)]
    pub search: SearchConfig,

    /// City lookup tables
    #[serde(default)]
    pub destinations: DestinationsConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Offers API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Offers endpoint
    #[serde(default = "default_offers_url")]
    pub base_url: String,

    /// User-Agent sent with offer requests
    #[serde(default = "default_offers_user_agent")]
    pub user_agent: String,

    /// Page size requested from the offers API
    #[serde(default = "default_limit")]
    pub limit: u32,
}

/// Geocoder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Nominatim base URL
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// User-Agent sent with geocoding requests
    #[serde(default = "default_geocoder_user_agent")]
    pub user_agent: String,
}

/// Per-client rate limiting of the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    #[serde(default = "default_rate_limit_calls")]
    pub calls: usize,

    /// Window length in seconds
    #[serde(default = "default_rate_limit_period")]
    pub period_secs: u64,
}

/// Criteria used by the batch `search` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Destination city
    #[serde(default = "default_city")]
    pub city: String,

    /// Explicit reference address (overrides the city landmark)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_address: Option<String>,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Departure airport codes
    #[serde(default = "default_from_where")]
    pub from_where: Vec<String>,

    #[serde(default = "default_market")]
    pub market: u32,

    #[serde(default = "default_min_nights")]
    pub min_nights: u32,

    #[serde(default = "default_max_nights")]
    pub max_nights: u32,

    #[serde(default = "default_budget_min")]
    pub budget_min: u32,

    #[serde(default = "default_budget_max")]
    pub budget_max: u32,

    #[serde(default = "default_adults")]
    pub adults: u32,

    #[serde(default = "default_children")]
    pub children: u32,

    #[serde(default = "default_rooms")]
    pub rooms: u32,

    #[serde(default)]
    pub child_ages: Vec<u32>,

    #[serde(default)]
    pub flex: bool,

    /// Output file for the ranked offers
    #[serde(default = "default_output")]
    pub output: String,

    /// Stdout format; the output file is always JSON
    #[serde(default = "default_format")]
    pub format: String,

    /// Travel periods searched (day/month/year)
    #[serde(default = "default_periods")]
    pub periods: Vec<Period>,
}

/// City lookup tables handed to the fetcher and the reference point selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationsConfig {
    /// City name to numeric offers API destination id
    #[serde(default = "default_destination_ids")]
    pub ids: HashMap<String, u32>,

    /// City name to the landmark address used as its reference point
    #[serde(default = "default_landmarks")]
    pub landmarks: HashMap<String, String>,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_offers_url() -> String {
    OFFERS_URL.to_string()
}
fn default_offers_user_agent() -> String {
    OFFERS_USER_AGENT.to_string()
}
fn default_limit() -> u32 {
    DEFAULT_LIMIT
}
fn default_geocoder_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_geocoder_user_agent() -> String {
    GEOCODER_USER_AGENT.to_string()
}
fn default_rate_limit_calls() -> usize {
    DEFAULT_RATE_LIMIT_CALLS
}
fn default_rate_limit_period() -> u64 {
    DEFAULT_RATE_LIMIT_PERIOD_SECS
}
fn default_city() -> String {
    DEFAULT_CITY.to_string()
}
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}
fn default_from_where() -> Vec<String> {
    vec![DEFAULT_FROM_WHERE.to_string()]
}
fn default_market() -> u32 {
    DEFAULT_MARKET
}
fn default_min_nights() -> u32 {
    DEFAULT_MIN_NIGHTS
}
fn default_max_nights() -> u32 {
    DEFAULT_MAX_NIGHTS
}
fn default_budget_min() -> u32 {
    DEFAULT_BUDGET_MIN
}
fn default_budget_max() -> u32 {
    DEFAULT_BUDGET_MAX
}
fn default_adults() -> u32 {
    DEFAULT_ADULTS
}
fn default_children() -> u32 {
    DEFAULT_CHILDREN
}
fn default_rooms() -> u32 {
    DEFAULT_ROOMS
}
fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_periods() -> Vec<Period> {
    DEFAULT_PERIODS
        .iter()
        .map(|(start, end)| Period::new(*start, *end))
        .collect()
}
fn default_destination_ids() -> HashMap<String, u32> {
    DEFAULT_DESTINATION_IDS
        .iter()
        .map(|(city, id)| (city.to_string(), *id))
        .collect()
}
fn default_landmarks() -> HashMap<String, String> {
    DEFAULT_LANDMARKS
        .iter()
        .map(|(city, address)| (city.to_string(), address.to_string()))
        .collect()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_offers_url(),
            user_agent: default_offers_user_agent(),
            limit: default_limit(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_geocoder_user_agent(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            calls: default_rate_limit_calls(),
            period_secs: default_rate_limit_period(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            city: default_city(),
            comparison_address: None,
            locale: default_locale(),
            currency: default_currency(),
            from_where: default_from_where(),
            market: default_market(),
            min_nights: default_min_nights(),
            max_nights: default_max_nights(),
            budget_min: default_budget_min(),
            budget_max: default_budget_max(),
            adults: default_adults(),
            children: default_children(),
            rooms: default_rooms(),
            child_ages: Vec::new(),
            flex: false,
            output: default_output(),
            format: default_format(),
            periods: default_periods(),
        }
    }
}

impl Default for DestinationsConfig {
    fn default() -> Self {
        Self {
            ids: default_destination_ids(),
            landmarks: default_landmarks(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["upstream", "base_url"] => Some(self.upstream.base_url.clone()),
            ["upstream", "limit"] => Some(self.upstream.limit.to_string()),

            ["geocoder", "base_url"] => Some(self.geocoder.base_url.clone()),

            ["rate_limit", "calls"] => Some(self.rate_limit.calls.to_string()),
            ["rate_limit", "period_secs"] => Some(self.rate_limit.period_secs.to_string()),

            ["search", "city"] => Some(self.search.city.clone()),
            ["search", "comparison_address"] => {
                Some(self.search.comparison_address.clone().unwrap_or_default())
            }
            ["search", "locale"] => Some(self.search.locale.clone()),
            ["search", "currency"] => Some(self.search.currency.clone()),
            ["search", "market"] => Some(self.search.market.to_string()),
            ["search", "min_nights"] => Some(self.search.min_nights.to_string()),
            ["search", "max_nights"] => Some(self.search.max_nights.to_string()),
            ["search", "budget_min"] => Some(self.search.budget_min.to_string()),
            ["search", "budget_max"] => Some(self.search.budget_max.to_string()),
            ["search", "flex"] => Some(self.search.flex.to_string()),
            ["search", "output"] => Some(self.search.output.clone()),
            ["search", "format"] => Some(self.search.format.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => self.server.host = value.to_string(),
            ["server", "port"] => self.server.port = parse_value(key, value)?,

            ["upstream", "base_url"] => self.upstream.base_url = value.to_string(),
            ["upstream", "limit"] => self.upstream.limit = parse_value(key, value)?,

            ["geocoder", "base_url"] => self.geocoder.base_url = value.to_string(),

            ["rate_limit", "calls"] => self.rate_limit.calls = parse_value(key, value)?,
            ["rate_limit", "period_secs"] => {
                self.rate_limit.period_secs = parse_value(key, value)?;
            }

            ["search", "city"] => self.search.city = value.to_string(),
            ["search", "comparison_address"] => {
                self.search.comparison_address = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            ["search", "locale"] => self.search.locale = value.to_string(),
            ["search", "currency"] => self.search.currency = value.to_string(),
            ["search", "market"] => self.search.market = parse_value(key, value)?,
            ["search", "min_nights"] => self.search.min_nights = parse_value(key, value)?,
            ["search", "max_nights"] => self.search.max_nights = parse_value(key, value)?,
            ["search", "budget_min"] => self.search.budget_min = parse_value(key, value)?,
            ["search", "budget_max"] => self.search.budget_max = parse_value(key, value)?,
            ["search", "flex"] => self.search.flex = parse_value(key, value)?,
            ["search", "output"] => self.search.output = value.to_string(),
            ["search", "format"] => self.search.format = value.to_string(),

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "upstream.base_url",
            "upstream.limit",
            "geocoder.base_url",
            "rate_limit.calls",
            "rate_limit.period_secs",
            "search.city",
            "search.comparison_address",
            "search.locale",
            "search.currency",
            "search.market",
            "search.min_nights",
            "search.max_nights",
            "search.budget_min",
            "search.budget_max",
            "search.flex",
            "search.output",
            "search.format",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.rate_limit.calls, 20);
        assert_eq!(config.rate_limit.period_secs, 60);
        assert_eq!(config.search.city, "Rome");
        assert_eq!(config.search.budget_max, 550);
        assert_eq!(config.search.periods.len(), 2);
        assert_eq!(config.destinations.ids.get("Rome"), Some(&19));
        assert_eq!(
            config.destinations.landmarks.get("Rome").map(String::as_str),
            Some("Trevi Fountain")
        );
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("search.city"), Some("Rome".to_string()));

        config.set("search.city", "Prague").unwrap();
        assert_eq!(config.get("search.city"), Some("Prague".to_string()));

        config.set("search.budget_max", "700").unwrap();
        assert_eq!(config.search.budget_max, 700);

        config.set("search.comparison_address", "Charles Bridge").unwrap();
        assert_eq!(config.search.comparison_address.as_deref(), Some("Charles Bridge"));
        config.set("search.comparison_address", "").unwrap();
        assert!(config.search.comparison_address.is_none());
    }

    #[test]
    fn test_every_available_key_is_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "key {} not readable", key);
        }
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("server.port", "not_a_port").is_err());
        assert!(config.set("search.flex", "maybe").is_err());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.search.city = "Vienna".to_string();
            config.rate_limit.calls = 5;
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.search.city, "Vienna");
            assert_eq!(loaded.rate_limit.calls, 5);
        });
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.search.periods, config.search.periods);
        assert_eq!(loaded.destinations.landmarks, config.destinations.landmarks);
        assert_eq!(loaded.server.port, 8000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let loaded: Config = toml::from_str("[search]\ncity = \"Prague\"\n").unwrap();
        assert_eq!(loaded.search.city, "Prague");
        assert_eq!(loaded.search.min_nights, 5);
        assert_eq!(loaded.upstream.limit, 1000);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[server]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[destinations.ids]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:8000");
    }
}

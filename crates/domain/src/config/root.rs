use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use super::cache::CacheConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::rate_limit::RateLimitConfig;
use super::resolver::ResolverConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "tinu-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/tinu-dns/config.toml";

/// Main configuration structure for Tinu DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket
    #[serde(default)]
    pub server: ServerConfig,

    /// Iterative resolution and upstream transport
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Response cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Admission control for inbound datagrams
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. tinu-dns.toml in current directory
    /// 3. /etc/tinu-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(file) = overrides.log_file {
            self.logging.file = Some(file);
        }
        if overrides.no_cache {
            self.cache.enabled = false;
        }
        if overrides.no_rate_limit {
            self.rate_limit.enabled = false;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.max_in_flight == 0 {
            return Err(ConfigError::Validation(
                "max_in_flight must be at least 1".to_string(),
            ));
        }

        if self.resolver.max_hops == 0 {
            return Err(ConfigError::Validation(
                "max_hops must be at least 1".to_string(),
            ));
        }

        if self.resolver.upstream_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "upstream_timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.rate_limit.enabled
            && (self.rate_limit.requests_per_second <= 0.0 || self.rate_limit.burst == 0)
        {
            return Err(ConfigError::Validation(
                "rate limit needs a positive rate and burst".to_string(),
            ));
        }

        self.listen_addr()?;

        if self.cache.default_ttl > self.cache.max_ttl {
            return Err(ConfigError::Validation(format!(
                "cache default_ttl ({}) exceeds max_ttl ({})",
                self.cache.default_ttl, self.cache.max_ttl
            )));
        }

        Ok(())
    }

    /// Socket address the DNS listener binds to.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .server
            .bind_address
            .parse()
            .map_err(|_| ConfigError::InvalidListenAddress(self.server.bind_address.clone()))?;
        Ok(SocketAddr::new(ip, self.server.dns_port))
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub no_cache: bool,
    pub no_rate_limit: bool,
}

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ListenerFailurePolicy;
use super::zone::ZoneConfig;
use crate::{ForwardedZone, LocalNetworkSet, ServerAddr};

const SEARCH_PATHS: [&str; 3] = ["config.toml", "queried.toml", "/etc/queried/config.toml"];

/// Main configuration structure for queried
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Recursive resolvers used for names outside every forwarded zone
    #[serde(default = "default_resolvers", alias = "Resolvers")]
    pub resolvers: Vec<String>,

    /// Bind targets, each served over both UDP and TCP
    #[serde(default = "default_listen", alias = "Listen")]
    pub listen: Vec<String>,

    /// Requesters inside these ranges are local
    #[serde(default = "default_local_networks", alias = "LocalNetworks")]
    pub local_networks: Vec<String>,

    #[serde(default = "default_exchange_timeout_ms")]
    pub exchange_timeout_ms: u64,

    #[serde(default)]
    pub listener_failure: ListenerFailurePolicy,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default = "default_forwarded_zones", alias = "ForwardedZone")]
    pub forwarded_zone: Vec<ZoneConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolvers: default_resolvers(),
            listen: default_listen(),
            local_networks: default_local_networks(),
            exchange_timeout_ms: default_exchange_timeout_ms(),
            listener_failure: ListenerFailurePolicy::default(),
            logging: LoggingConfig::default(),
            forwarded_zone: default_forwarded_zones(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. config.toml, then queried.toml in current directory
    /// 3. /etc/queried/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if overrides.debug {
            self.logging.level = "debug".to_string();
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen.is_empty() {
            return Err(ConfigError::Validation("No listen addresses".to_string()));
        }
        self.listen_addrs()?;

        if self.resolvers.is_empty() {
            return Err(ConfigError::Validation("No resolvers configured".to_string()));
        }
        self.resolver_addrs()?;
        self.local_network_set()?;

        let mut seen = HashSet::new();
        for zone in &self.forwarded_zone {
            if !seen.insert(zone.name.trim().to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "Zone '{}' is defined more than once",
                    zone.name
                )));
            }
        }
        self.zones()?;

        if self.exchange_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "exchange_timeout_ms cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn listen_addrs(&self) -> Result<Vec<ServerAddr>, ConfigError> {
        self.listen
            .iter()
            .map(|l| ServerAddr::parse_listen(l).map_err(validation("listen")))
            .collect()
    }

    pub fn resolver_addrs(&self) -> Result<Vec<ServerAddr>, ConfigError> {
        self.resolvers
            .iter()
            .map(|r| ServerAddr::parse(r).map_err(validation("resolvers")))
            .collect()
    }

    pub fn local_network_set(&self) -> Result<LocalNetworkSet, ConfigError> {
        LocalNetworkSet::from_cidrs(&self.local_networks).map_err(validation("local_networks"))
    }

    pub fn zones(&self) -> Result<Vec<ForwardedZone>, ConfigError> {
        self.forwarded_zone
            .iter()
            .map(|z| ForwardedZone::from_config(z).map_err(validation(&z.name)))
            .collect()
    }

    /// Get the path to the configuration file that would be used
    pub fn get_config_path() -> Option<String> {
        SEARCH_PATHS
            .iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(|p| p.to_string())
    }
}

fn validation(context: &str) -> impl Fn(crate::DomainError) -> ConfigError + '_ {
    move |e| ConfigError::Validation(format!("{}: {}", context, e))
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub debug: bool,
}

fn default_resolvers() -> Vec<String> {
    vec!["8.8.8.8".to_string(), "8.8.4.4".to_string()]
}

fn default_listen() -> Vec<String> {
    vec![":53".to_string()]
}

fn default_local_networks() -> Vec<String> {
    [
        "fc00::/7",
        "::/64",
        "127.0.0.0/8",
        "10.0.0.0/8",
        "172.16.0.0/12",
        "192.168.0.0/16",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_exchange_timeout_ms() -> u64 {
    2000
}

fn default_forwarded_zones() -> Vec<ZoneConfig> {
    let mut consul = ZoneConfig::new("consul.", "172.31.1.2:8600");
    consul.authoritative = true;
    consul.private = true;

    let mut example = ZoneConfig::new("some.example.com.", "10.23.2.2:53");
    example.authoritative = true;

    vec![consul, example]
}

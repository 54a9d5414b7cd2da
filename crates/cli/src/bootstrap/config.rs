use queried_application::use_cases::QueryRouter;
use queried_domain::{CliOverrides, Config};
use queried_infrastructure::dns::{DnsRequestHandler, FastrandPermutation, HickoryExchanger};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides).map_err(|e| {
        anyhow::anyhow!(
            "Unable to load config file {}: {}",
            path.map(str::to_string)
                .or_else(Config::get_config_path)
                .unwrap_or_else(|| "<defaults>".to_string()),
            e
        )
    })?;

    config.validate()?;
    Ok(config)
}

pub fn log_config(config: &Config, debug_enabled: bool) {
    if !debug_enabled {
        return;
    }

    match serde_json::to_string(config) {
        Ok(json) => debug!(config = %json, "Parsed configuration"),
        Err(e) => debug!(error = %e, "Parsed configuration could not be serialized"),
    }
}

/// Wires the router and the wire-level handler from a validated configuration.
pub fn build_handler(config: &Config) -> anyhow::Result<Arc<DnsRequestHandler>> {
    let exchanger = Arc::new(HickoryExchanger::new(Duration::from_millis(
        config.exchange_timeout_ms,
    )));
    let permutation = Arc::new(FastrandPermutation::new());

    let router = QueryRouter::from_config(config, exchanger, permutation)?;

    for zone in router.zones() {
        debug!(
            zone = %zone.name(),
            upstream = %zone.upstream,
            authoritative = zone.authoritative,
            private = zone.private,
            "Forwarded zone registered"
        );
    }

    Ok(Arc::new(DnsRequestHandler::new(Arc::new(router))))
}

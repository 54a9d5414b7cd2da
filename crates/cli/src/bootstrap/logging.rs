use queried_domain::Config;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn level_from(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// `RUST_LOG` wins when set and parsable; otherwise the configured level applies.
fn build_filter(level: Level, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level.to_string()))
}

/// Installs the global subscriber.
pub fn init_logging(config: &Config) {
    let level = level_from(&config.logging.level);
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(level, rust_log.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_level_from() {
        assert_eq!(level_from("debug"), Level::DEBUG);
        assert_eq!(level_from("WARN"), Level::WARN);
        assert_eq!(level_from("nonsense"), Level::INFO);
    }

    #[test]
    fn test_rust_log_overrides_configured_level() {
        let filter = build_filter(Level::INFO, Some("debug"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = build_filter(Level::DEBUG, Some("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn test_configured_level_without_rust_log() {
        let filter = build_filter(Level::WARN, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let filter = build_filter(Level::DEBUG, Some("  "));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}

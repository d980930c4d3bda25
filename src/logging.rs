//! Tracing subscriber setup shared by both binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter used when neither `RUST_LOG` nor the config sets one
fn default_filter(level: &str) -> String {
    format!("kirundi_overview={},tower_http={}", level, level)
}

/// Build the env filter: `RUST_LOG` wins over the configured level
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(&config.level)))
}

/// Install the global subscriber, pretty or JSON per `config.format`
pub fn init(config: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(
            default_filter("debug"),
            "kirundi_overview=debug,tower_http=debug"
        );
    }
}

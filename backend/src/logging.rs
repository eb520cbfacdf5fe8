use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log settings read from `RUST_LOG`, `LOKI_ENABLED`, `LOKI_URL`, `SERVICE_NAME` and `ENVIRONMENT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub log_level: String,
    pub service_name: String,
    pub environment: String,
    /// Set only when Loki shipping is switched on.
    pub loki_url: Option<url::Url>,
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let loki_enabled = lookup("LOKI_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let loki_url = if loki_enabled {
            let raw = lookup("LOKI_URL").context("LOKI_ENABLED is true but LOKI_URL is not set")?;
            Some(url::Url::parse(&raw).with_context(|| format!("Invalid LOKI_URL: {}", raw))?)
        } else {
            None
        };

        Ok(Self {
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            service_name: lookup("SERVICE_NAME").unwrap_or_else(|| "dealdesk".to_string()),
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            loki_url,
        })
    }
}

/// Installs the global subscriber. With the `loki` feature and a Loki URL, the
/// shipper task is spawned, so this must run inside the tokio runtime.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "loki")]
    let registry = registry.with(loki_layer(config)?);

    registry.try_init()?;

    tracing::info!(
        service = %config.service_name,
        environment = %config.environment,
        loki = config.loki_url.is_some(),
        "Logging initialized"
    );
    Ok(())
}

#[cfg(feature = "loki")]
fn loki_layer(config: &LoggingConfig) -> Result<Option<tracing_loki::Layer>> {
    let Some(url) = config.loki_url.clone() else {
        return Ok(None);
    };

    let (layer, task) = tracing_loki::builder()
        .label("service", &config.service_name)?
        .label("environment", &config.environment)?
        .build_url(url)?;
    tokio::spawn(task);

    Ok(Some(layer))
}

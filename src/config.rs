//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Parsing goes through a lookup function
//! so tests can feed values without touching the process environment.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format {other:?}, expected \"pretty\" or \"json\""),
        }
    }
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Tracing output format.
    pub log_format: LogFormat,

    /// Default tracing filter directive when `RUST_LOG` is unset.
    pub log_level: String,

    /// Upper bound on the time spent serving one HTTP request.
    pub request_timeout: Duration,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_lookup`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Falls back to defaults for unset or unparsable optional values.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but is not a socket address,
    /// if `LOG_FORMAT` is set to an unknown format, or if
    /// `EVENT_BUS_CAPACITY` or `REQUEST_TIMEOUT_SECS` is zero.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let event_bus_capacity = parse_or(&lookup, "EVENT_BUS_CAPACITY", 10_000_usize);
        if event_bus_capacity == 0 {
            bail!("EVENT_BUS_CAPACITY must be greater than zero");
        }

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().context("invalid LOG_FORMAT")?,
            None => LogFormat::default(),
        };
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30_u64);
        if request_timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        let request_timeout = Duration::from_secs(request_timeout_secs);

        Ok(Self {
            listen_addr,
            event_bus_capacity,
            log_format,
            log_level,
            request_timeout,
        })
    }
}

/// Parses a looked-up value as `T`, returning `default` on missing or
/// invalid values.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<GatewayConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        GatewayConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let Ok(config) = load(&[]) else {
            panic!("defaults must load");
        };
        assert_eq!(config.listen_addr.port(), 3000);
        assert_eq!(config.event_bus_capacity, 10_000);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let Ok(config) = load(&[
            ("LISTEN_ADDR", "127.0.0.1:8080"),
            ("EVENT_BUS_CAPACITY", "64"),
            ("LOG_FORMAT", "JSON"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]) else {
            panic!("config must load");
        };
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.event_bus_capacity, 64);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_listen_addr_is_an_error() {
        assert!(load(&[("LISTEN_ADDR", "not-an-addr")]).is_err());
    }

    #[test]
    fn zero_bus_capacity_is_an_error() {
        assert!(load(&[("EVENT_BUS_CAPACITY", "0")]).is_err());
    }

    #[test]
    fn zero_request_timeout_is_an_error() {
        let Err(err) = load(&[("REQUEST_TIMEOUT_SECS", "0")]) else {
            panic!("a zero timeout must be rejected");
        };
        assert!(err.to_string().contains("REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn unknown_log_format_is_an_error() {
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn unparsable_optional_number_falls_back() {
        let Ok(config) = load(&[("REQUEST_TIMEOUT_SECS", "soon")]) else {
            panic!("config must load");
        };
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}

/// Configuration management for meta-image-service
///
/// Loads configuration from environment variables with sensible defaults.
use serde::Deserialize;
use std::time::Duration;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub fetch: FetchConfig,
    pub thumbnail: ThumbnailLimits,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
}

/// Outbound HTTP settings shared by page and image fetches
#[derive(Clone, Debug, Deserialize)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ThumbnailLimits {
    /// Largest width or height a caller may request
    pub max_dimension: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            max_body_bytes: 20 * 1024 * 1024,
            user_agent: format!("meta-image-service/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ThumbnailLimits {
    fn default() -> Self {
        Self {
            max_dimension: 4096,
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch_defaults = FetchConfig::default();
        let thumb_defaults = ThumbnailLimits::default();

        let config = Config {
            app: AppConfig {
                host: lookup("META_IMAGE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "META_IMAGE_PORT", 8080),
                env: lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
            },
            fetch: FetchConfig {
                timeout_secs: parse_or(&lookup, "FETCH_TIMEOUT_SECS", fetch_defaults.timeout_secs),
                connect_timeout_secs: parse_or(
                    &lookup,
                    "FETCH_CONNECT_TIMEOUT_SECS",
                    fetch_defaults.connect_timeout_secs,
                ),
                max_body_bytes: parse_or(
                    &lookup,
                    "FETCH_MAX_BODY_BYTES",
                    fetch_defaults.max_body_bytes,
                ),
                user_agent: lookup("FETCH_USER_AGENT").unwrap_or(fetch_defaults.user_agent),
            },
            thumbnail: ThumbnailLimits {
                max_dimension: parse_or(
                    &lookup,
                    "THUMB_MAX_DIMENSION",
                    thumb_defaults.max_dimension,
                ),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.fetch.timeout_secs == 0 || self.fetch.connect_timeout_secs == 0 {
            return Err("FETCH_TIMEOUT_SECS and FETCH_CONNECT_TIMEOUT_SECS must be positive".into());
        }
        if self.fetch.max_body_bytes == 0 {
            return Err("FETCH_MAX_BODY_BYTES must be positive".into());
        }
        if self.thumbnail.max_dimension == 0 {
            return Err("THUMB_MAX_DIMENSION must be positive".into());
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, Box<dyn std::error::Error>> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.fetch.timeout(), Duration::from_secs(10));
        assert_eq!(config.fetch.max_body_bytes, 20 * 1024 * 1024);
        assert_eq!(config.thumbnail.max_dimension, 4096);
        assert!(config.fetch.user_agent.starts_with("meta-image-service/"));
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = config_from(&[
            ("META_IMAGE_PORT", "9000"),
            ("FETCH_TIMEOUT_SECS", "not-a-number"),
            ("THUMB_MAX_DIMENSION", " 1024 "),
        ])
        .unwrap();
        assert_eq!(config.app.port, 9000);
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.thumbnail.max_dimension, 1024);
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(config_from(&[("FETCH_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("FETCH_MAX_BODY_BYTES", "0")]).is_err());
        assert!(config_from(&[("THUMB_MAX_DIMENSION", "0")]).is_err());
    }
}

use crate::ConfigError;
use blog_client::{ApiResult, BlogClient, BlogClientOptions, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use std::time::Duration;

const DEFAULT_APP_NAME: &str = "Blog";
const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub comments: bool,
    pub analytics: bool,
    pub debug: bool,
}

/// Process-wide settings, read once at startup.
///
/// # Environment
/// - `API_BASE_URL`: default `http://localhost:8000/api`
/// - `API_TIMEOUT_MS`: default `10000`
/// - `APP_NAME`, `APP_VERSION`, `APP_ENV`
/// - `ENABLE_COMMENTS`: on unless `false`
/// - `ENABLE_ANALYTICS`: off unless `true`
///
/// Debug mode follows `APP_ENV == "development"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub app_name: String,
    pub version: String,
    pub environment: String,
    pub features: Features,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout: DEFAULT_TIMEOUT,
            },
            app_name: DEFAULT_APP_NAME.to_string(),
            version: DEFAULT_VERSION.to_string(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            features: Features {
                comments: true,
                analytics: false,
                debug: true,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let timeout = match get("API_TIMEOUT_MS") {
            Some(value) => {
                let millis = value.trim().parse::<u64>().map_err(|error| {
                    ConfigError::InvalidValue {
                        name: "API_TIMEOUT_MS",
                        value: value.clone(),
                        reason: error.to_string(),
                    }
                })?;
                // Zero means unset, not "time out immediately".
                if millis == 0 {
                    DEFAULT_TIMEOUT
                } else {
                    Duration::from_millis(millis)
                }
            }
            None => DEFAULT_TIMEOUT,
        };

        let environment = get("APP_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let features = Features {
            comments: get("ENABLE_COMMENTS").is_none_or(|value| value != "false"),
            analytics: get("ENABLE_ANALYTICS").is_some_and(|value| value == "true"),
            debug: environment == "development",
        };

        Ok(Self {
            api: ApiSettings {
                base_url: get("API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout,
            },
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            version: get("APP_VERSION").unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            environment,
            features,
        })
    }

    #[must_use]
    pub fn client_options(&self) -> BlogClientOptions {
        BlogClientOptions {
            base_url: Some(self.api.base_url.clone()),
            timeout: Some(self.api.timeout),
            ..Default::default()
        }
    }

    /// Build an HTTP client for the configured API.
    pub fn client(&self) -> ApiResult<BlogClient> {
        BlogClient::new(self.client_options())
    }
}

//! Configuration for the Picnic API client
//!
//! Everything has a default; a client built from `ClientConfig::default()`
//! talks to the Dutch storefront with the latest known API version and no
//! session token.

use crate::error::{ApiError, ApiResult};
use crate::schema::ResponseSchema;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Latest API version known to work with every endpoint in this crate
pub const DEFAULT_API_VERSION: &str = "17";

/// Default value of the `x-picnic-agent` header
pub const DEFAULT_AGENT: &str = "30100;1.15.77-10293";

/// Default value of the `x-picnic-did` header
pub const DEFAULT_DEVICE_ID: &str = "3C417201548B2E3B";

/// Storefront country
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CountryCode {
    /// The Netherlands
    #[default]
    NL,
    /// Germany
    DE,
}

impl CountryCode {
    /// Country code as used in the storefront host name
    #[must_use]
    pub fn host_label(self) -> &'static str {
        match self {
            Self::NL => "nl",
            Self::DE => "de",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NL => f.write_str("NL"),
            Self::DE => f.write_str("DE"),
        }
    }
}

impl FromStr for CountryCode {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NL" => Ok(Self::NL),
            "DE" => Ok(Self::DE),
            other => Err(ApiError::config(format!("unsupported country code: {other}"))),
        }
    }
}

/// Values for the two device identification headers
///
/// Only a handful of endpoints require them (delivery tracking, messages,
/// reminders, payment profile, two-factor authentication).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceHeaders {
    /// `x-picnic-agent`
    pub agent: String,
    /// `x-picnic-did`
    pub device_id: String,
}

impl Default for DeviceHeaders {
    fn default() -> Self {
        Self {
            agent: DEFAULT_AGENT.to_string(),
            device_id: DEFAULT_DEVICE_ID.to_string(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Storefront country
    pub country_code: CountryCode,
    /// API version path segment
    pub api_version: String,
    /// Custom base URL; derived from country and version when unset
    pub base_url: Option<String>,
    /// Pre-existing session token; skips `login` when set
    #[serde(skip_serializing)]
    pub auth_key: Option<String>,
    /// Device identification header values
    pub device: DeviceHeaders,
    /// Transport timeout; `None` leaves it to the HTTP client default
    #[serde(default, with = "secs_option")]
    pub timeout: Option<Duration>,
    /// Response schema override; derived from `api_version` when unset
    pub response_schema: Option<ResponseSchema>,
}

mod secs_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            country_code: CountryCode::default(),
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: None,
            auth_key: None,
            device: DeviceHeaders::default(),
            timeout: None,
            response_schema: None,
        }
    }
}

impl ClientConfig {
    /// Create a default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables, all optional:
    /// - `PICNIC_COUNTRY_CODE`: `NL` or `DE`
    /// - `PICNIC_API_VERSION`: API version path segment
    /// - `PICNIC_AUTH_KEY`: existing session token
    /// - `PICNIC_URL`: custom base URL
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Self::default();

        if let Ok(code) = env::var("PICNIC_COUNTRY_CODE") {
            config.country_code = code.parse()?;
        }
        if let Ok(version) = env::var("PICNIC_API_VERSION") {
            config.api_version = version;
        }
        config.auth_key = env::var("PICNIC_AUTH_KEY").ok().filter(|k| !k.is_empty());
        config.base_url = env::var("PICNIC_URL").ok().filter(|u| !u.is_empty());

        Ok(config)
    }

    /// Builder-style method to set the country
    #[must_use]
    pub fn with_country_code(mut self, country_code: CountryCode) -> Self {
        self.country_code = country_code;
        self
    }

    /// Builder-style method to set the API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Builder-style method to set an existing session token
    #[must_use]
    pub fn with_auth_key(mut self, key: impl Into<String>) -> Self {
        self.auth_key = Some(key.into());
        self
    }

    /// Builder-style method to override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builder-style method to set the device headers
    #[must_use]
    pub fn with_device_headers(mut self, device: DeviceHeaders) -> Self {
        self.device = device;
        self
    }

    /// Builder-style method to set a transport timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder-style method to force a response schema
    #[must_use]
    pub fn with_response_schema(mut self, schema: ResponseSchema) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Base URL all relative paths are joined onto
    #[must_use]
    pub fn base_url(&self) -> String {
        match self.base_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => format!(
                "https://storefront-prod.{}.picnicinternational.com/api/{}",
                self.country_code.host_label(),
                self.api_version
            ),
        }
    }

    /// Response schema in effect for this configuration
    #[must_use]
    pub fn response_schema(&self) -> ResponseSchema {
        self.response_schema
            .unwrap_or_else(|| ResponseSchema::for_api_version(&self.api_version))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.api_version.trim().is_empty() {
            return Err(ApiError::config("api_version cannot be empty"));
        }

        let base_url = self.base_url();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

//! Host-level configuration of the filter

use serde::Deserialize;
use thiserror::Error;

use crate::error::ZoneError;
use crate::zone::ResolvedZone;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid filter configuration: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid default time zone '{zone}'")]
    InvalidTimeZone {
        zone: String,
        #[source]
        source: ZoneError,
    },
}

/// Settings shared by every call of a filter instance
///
/// ```toml
/// default_locale = "fr_FR"
/// time_zone = "Europe/Paris"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Locale used when the evaluation context names none
    pub default_locale: Option<String>,
    /// Pinned ambient zone; the system zone is used when unset
    pub time_zone: Option<String>,
}

impl FilterConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_time_zone(mut self, zone: impl Into<String>) -> Self {
        self.time_zone = Some(zone.into());
        self
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }

    /// The pinned zone, if any, validated
    pub fn pinned_zone(&self) -> Result<Option<ResolvedZone>, ConfigError> {
        self.time_zone
            .as_deref()
            .map(|zone| {
                ResolvedZone::parse(zone).map_err(|source| ConfigError::InvalidTimeZone {
                    zone: zone.to_string(),
                    source,
                })
            })
            .transpose()
    }
}

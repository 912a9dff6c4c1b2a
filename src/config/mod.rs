//! Configuration module for the shipping rate client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

use crate::carriers::traits::CarrierCredentials;
use crate::carriers::ups::UpsEndpoints;
use crate::carriers::usps;
use crate::domain::Provider;

/// Main application settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub http: HttpSettings,
    pub ups: Option<UpsSettings>,
    pub usps: Option<UspsSettings>,
    #[serde(default)]
    pub fedex_enabled: bool,
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: format!("shipping-rates/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// UPS account and endpoint configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpsSettings {
    pub access_license_number: Option<String>,
    pub user_id: Option<String>,
    pub password: Option<String>,
    pub shipper_number: Option<String>,
    pub rate_url: Option<String>,
    pub ship_confirm_url: Option<String>,
    pub ship_accept_url: Option<String>,
}

impl UpsSettings {
    /// Credentials from this section, falling back to `UPS_*` variables
    pub fn credentials(&self) -> CarrierCredentials {
        CarrierCredentials {
            access_key: self.access_license_number.clone(),
            user_id: self.user_id.clone(),
            password: self.password.clone(),
            shipper_number: self.shipper_number.clone(),
        }
        .or(CarrierCredentials::from_env(Provider::Ups))
    }

    /// Configured endpoints, with the test environment filling the gaps
    pub fn endpoints(&self) -> UpsEndpoints {
        let defaults = UpsEndpoints::default();
        UpsEndpoints {
            rate: self.rate_url.clone().unwrap_or(defaults.rate),
            ship_confirm: self.ship_confirm_url.clone().unwrap_or(defaults.ship_confirm),
            ship_accept: self.ship_accept_url.clone().unwrap_or(defaults.ship_accept),
        }
    }
}

/// USPS Web Tools configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UspsSettings {
    pub user_id: Option<String>,
    #[serde(default = "default_usps_url")]
    pub url: String,
}

fn default_usps_url() -> String {
    usps::DEFAULT_URL.to_string()
}

impl Default for UspsSettings {
    fn default() -> Self {
        UspsSettings {
            user_id: None,
            url: default_usps_url(),
        }
    }
}

impl UspsSettings {
    /// Credentials from this section, falling back to `USPS_USER_ID`
    pub fn credentials(&self) -> CarrierCredentials {
        CarrierCredentials {
            user_id: self.user_id.clone(),
            ..Default::default()
        }
        .or(CarrierCredentials::from_env(Provider::Usps))
    }
}

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables (prefixed with SHIPPING__)
    /// 2. config/local.toml (gitignored)
    /// 3. config/default.toml
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));

        let builder = Config::builder()
            // Start with default configuration
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Add local overrides (gitignored)
            .add_source(File::from(config_dir.join("local.toml")).required(false))
            // Add environment variables (SHIPPING__UPS__USER_ID, etc.)
            .add_source(
                Environment::with_prefix("SHIPPING")
                    .separator("__")
                    .try_parsing(true),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject endpoint URLs that do not parse
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut urls = Vec::new();
        if let Some(ups) = &self.ups {
            let endpoints = ups.endpoints();
            urls.extend([
                ("ups.rate_url", endpoints.rate),
                ("ups.ship_confirm_url", endpoints.ship_confirm),
                ("ups.ship_accept_url", endpoints.ship_accept),
            ]);
        }
        if let Some(usps) = &self.usps {
            urls.push(("usps.url", usps.url.clone()));
        }

        for (key, value) in urls {
            Url::parse(&value).map_err(|e| {
                ConfigError::Message(format!("{}: invalid URL {:?}: {}", key, value, e))
            })?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            http: HttpSettings::default(),
            ups: Some(UpsSettings::default()),
            usps: Some(UspsSettings::default()),
            fedex_enabled: false,
        }
    }
}

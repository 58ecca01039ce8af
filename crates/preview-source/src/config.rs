//! Preview configuration
//!
//! Identifiers the preview needs, read once at startup and passed to every
//! component that uses them. All values are opaque strings. A missing
//! parameter reads as an empty string; the `require_*` accessors turn that
//! into an error at the point of use.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use url::{form_urlencoded, Url};

/// Query string parameter names
pub mod param {
    /// Integration API key
    pub const API_KEY: &str = "apiKey";
    /// Integration environment id
    pub const ENV_ID: &str = "envId";
    /// Tenant (end user) id
    pub const TENANT_ID: &str = "tenantId";
    /// Flow id
    pub const FLOW_ID: &str = "flowId";
    /// Sync output endpoint
    pub const OUTPUT_ENDPOINT: &str = "awsEndpoint";
    /// Display label for the data source
    pub const RECIPE_ID: &str = "recipeId";
}

/// Preview configuration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Integration API key
    #[serde(alias = "apiKey")]
    pub api_key: String,
    /// Integration environment id
    #[serde(alias = "envId")]
    pub env_id: String,
    /// Tenant id
    #[serde(alias = "tenantId")]
    pub tenant_id: String,
    /// Flow id
    #[serde(alias = "flowId")]
    pub flow_id: String,
    /// Sync output endpoint
    #[serde(alias = "aws_endpoint", alias = "awsEndpoint")]
    pub output_endpoint: String,
    /// Display label for the data source
    #[serde(alias = "recipeId")]
    pub recipe_id: String,
}

impl PreviewConfig {
    /// Empty configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read from a query string
    ///
    /// A leading `?` is ignored and values are percent-decoded. When a
    /// parameter repeats, its first value wins. Unknown parameters are
    /// ignored.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<_> = form_urlencoded::parse(query.as_bytes()).collect();

        let mut config = Self::default();
        for (key, value) in pairs.into_iter().rev() {
            if let Some(slot) = config.slot_mut(&key) {
                *slot = value.into_owned();
            }
        }
        config
    }

    /// Read from the query of a full URL
    ///
    /// # Errors
    /// `ConfigError::InvalidUrl` if `url` does not parse
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(url).map_err(|source| ConfigError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;
        Ok(Self::from_query(parsed.query().unwrap_or_default()))
    }

    /// Read from TOML text
    ///
    /// # Errors
    /// `ConfigError::Toml` on malformed input
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::Toml` on malformed input
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Fill empty fields from `defaults`
    ///
    /// Used when the API key and environment id are built in and only the
    /// per-tenant values come from the query string.
    #[must_use]
    pub fn with_defaults(mut self, defaults: &Self) -> Self {
        for (slot, fallback) in self.slots_mut().into_iter().zip(defaults.slots()) {
            if slot.is_empty() {
                slot.clone_from(fallback);
            }
        }
        self
    }

    /// With API key
    #[inline]
    #[must_use]
    pub fn with_api_key(mut self, value: impl Into<String>) -> Self {
        self.api_key = value.into();
        self
    }

    /// With environment id
    #[inline]
    #[must_use]
    pub fn with_env_id(mut self, value: impl Into<String>) -> Self {
        self.env_id = value.into();
        self
    }

    /// With tenant id
    #[inline]
    #[must_use]
    pub fn with_tenant_id(mut self, value: impl Into<String>) -> Self {
        self.tenant_id = value.into();
        self
    }

    /// With flow id
    #[inline]
    #[must_use]
    pub fn with_flow_id(mut self, value: impl Into<String>) -> Self {
        self.flow_id = value.into();
        self
    }

    /// With output endpoint
    #[inline]
    #[must_use]
    pub fn with_output_endpoint(mut self, value: impl Into<String>) -> Self {
        self.output_endpoint = value.into();
        self
    }

    /// With recipe label
    #[inline]
    #[must_use]
    pub fn with_recipe_id(mut self, value: impl Into<String>) -> Self {
        self.recipe_id = value.into();
        self
    }

    /// Output endpoint, if set
    ///
    /// # Errors
    /// `ConfigError::Missing` when empty
    pub fn require_endpoint(&self) -> Result<&str, ConfigError> {
        require(&self.output_endpoint, param::OUTPUT_ENDPOINT)
    }

    /// Tenant id, if set
    ///
    /// # Errors
    /// `ConfigError::Missing` when empty
    pub fn require_tenant(&self) -> Result<&str, ConfigError> {
        require(&self.tenant_id, param::TENANT_ID)
    }

    /// Flow id, if set
    ///
    /// # Errors
    /// `ConfigError::Missing` when empty
    pub fn require_flow(&self) -> Result<&str, ConfigError> {
        require(&self.flow_id, param::FLOW_ID)
    }

    /// Recipe label, if set
    #[inline]
    #[must_use]
    pub fn recipe_label(&self) -> Option<&str> {
        Some(self.recipe_id.as_str()).filter(|label| !label.is_empty())
    }

    /// Non-empty parameters as a query string, in canonical order
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in Self::NAMES.iter().zip(self.slots()) {
            if !value.is_empty() {
                serializer.append_pair(name, value);
            }
        }
        serializer.finish()
    }

    const NAMES: [&'static str; 6] = [
        param::API_KEY,
        param::ENV_ID,
        param::TENANT_ID,
        param::FLOW_ID,
        param::OUTPUT_ENDPOINT,
        param::RECIPE_ID,
    ];

    fn slots(&self) -> [&String; 6] {
        [
            &self.api_key,
            &self.env_id,
            &self.tenant_id,
            &self.flow_id,
            &self.output_endpoint,
            &self.recipe_id,
        ]
    }

    fn slots_mut(&mut self) -> [&mut String; 6] {
        [
            &mut self.api_key,
            &mut self.env_id,
            &mut self.tenant_id,
            &mut self.flow_id,
            &mut self.output_endpoint,
            &mut self.recipe_id,
        ]
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut String> {
        let index = Self::NAMES.iter().position(|n| *n == name)?;
        self.slots_mut().into_iter().nth(index)
    }
}

fn require<'a>(value: &'a str, param: &'static str) -> Result<&'a str, ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::missing(param))
    } else {
        Ok(value)
    }
}

impl fmt::Debug for PreviewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewConfig")
            .field("api_key", &redact(&self.api_key))
            .field("env_id", &self.env_id)
            .field("tenant_id", &self.tenant_id)
            .field("flow_id", &self.flow_id)
            .field("output_endpoint", &self.output_endpoint)
            .field("recipe_id", &self.recipe_id)
            .finish()
    }
}

/// Masked form of a secret for display
#[must_use]
pub fn redact(secret: &str) -> String {
    match secret.chars().count() {
        0 => String::new(),
        1..=8 => "****".to_string(),
        _ => {
            let tail: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
            format!("****{tail}")
        }
    }
}

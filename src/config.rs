//! Gateway configuration.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::identity::Identity;

/// How the gateway treats recognized actions with missing required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamPolicy {
    /// Missing fields take their defaults and the request is submitted.
    #[default]
    Permissive,
    /// Missing fields are rejected locally with `EINVAL`; the executor is
    /// not called.
    Strict,
}

/// Settings fixed for the lifetime of a [`Gateway`](crate::Gateway).
///
/// # Examples
///
/// ```
/// use syscall_gate::{GatewayConfig, Identity, ParamPolicy};
///
/// let config = GatewayConfig::from_json(r#"{"identity": 2002, "param_policy": "strict"}"#)
///     .expect("valid config");
/// assert_eq!(config.identity, Identity::pid(2002));
/// assert_eq!(config.param_policy, ParamPolicy::Strict);
///
/// // Omitted fields fall back to the defaults.
/// let config = GatewayConfig::from_json("{}").unwrap();
/// assert_eq!(config, GatewayConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Caller identity stamped on every envelope
    pub identity: Identity,
    /// Missing-parameter policy
    pub param_policy: ParamPolicy,
}

impl GatewayConfig {
    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the input is not valid JSON or contains
    /// unknown or mistyped fields.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(input).map_err(ConfigError::new)
    }
}

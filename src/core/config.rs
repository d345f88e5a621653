//! Payload configuration
//!
//! Defaults the serializer fills in when a record leaves them blank. The
//! configuration is passed explicitly so serialization stays a pure function of
//! its inputs; reading the process environment is the caller's business.

use tracing::warn;

/// Default payload format version
pub const DEFAULT_VERSION: &str = "01";

/// Default currency, ISO 4217 numeric code for VND
pub const DEFAULT_CURRENCY: &str = "704";

/// Default country, ISO 3166 alpha-2 code for Vietnam
pub const DEFAULT_NATION: &str = "VN";

/// Serializer defaults
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PayloadConfig {
    /// Value of the version field (tag `00`)
    pub version: String,
    /// Currency used when the record has none
    pub default_currency: String,
    /// Country used when the record has none
    pub default_nation: String,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            default_currency: DEFAULT_CURRENCY.to_string(),
            default_nation: DEFAULT_NATION.to_string(),
        }
    }
}

impl PayloadConfig {
    /// Create a PayloadConfig with optional overrides
    ///
    /// Missing or blank values fall back to the defaults; blank overrides are
    /// reported as warnings.
    pub fn new(version: Option<String>, default_currency: Option<String>) -> Self {
        let default = Self::default();

        Self {
            version: or_default(version, default.version, "version"),
            default_currency: or_default(default_currency, default.default_currency, "currency"),
            default_nation: default.default_nation,
        }
    }
}

fn or_default(value: Option<String>, default: String, name: &str) -> String {
    match value {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        Some(_) => {
            warn!("Blank {} override, using default ({})", name, default);
            default
        }
        None => default,
    }
}

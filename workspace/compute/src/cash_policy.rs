//! Three-threshold cash policy.
//!
//! A balance is `Low` below the minimum, `High` above the maximum and `Normal`
//! anywhere in between, both boundaries included. The return point is the
//! balance a rebalancing transfer would aim for; it is validated and shown, but
//! no transfer amount is computed from it.

use std::fmt;
use std::str::FromStr;

use model::CashPolicySettings;
use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::error::ConfigurationError;

pub const DEFAULT_MINIMUM: Decimal = Decimal::from_parts(55_000, 0, 0, false, 0);
pub const DEFAULT_RETURN_POINT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
pub const DEFAULT_MAXIMUM: Decimal = Decimal::from_parts(355_000, 0, 0, false, 0);

/// Validated thresholds, `minimum < return_point < maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashPolicyConfig {
    minimum: Decimal,
    return_point: Decimal,
    maximum: Decimal,
}

impl CashPolicyConfig {
    pub fn new(
        minimum: Decimal,
        return_point: Decimal,
        maximum: Decimal,
    ) -> Result<Self, ConfigurationError> {
        let config = Self {
            minimum,
            return_point,
            maximum,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds the policy from raw settings values.
    ///
    /// Absent thresholds take their default. Present but unparsable ones are an error.
    #[instrument]
    pub fn from_settings(settings: &CashPolicySettings) -> Result<Self, ConfigurationError> {
        let minimum = parse_threshold("minimum", settings.minimum.as_deref(), DEFAULT_MINIMUM)?;
        let return_point = parse_threshold(
            "return_point",
            settings.return_point.as_deref(),
            DEFAULT_RETURN_POINT,
        )?;
        let maximum = parse_threshold("maximum", settings.maximum.as_deref(), DEFAULT_MAXIMUM)?;

        Self::new(minimum, return_point, maximum)
    }

    pub fn minimum(&self) -> Decimal {
        self.minimum
    }

    pub fn return_point(&self) -> Decimal {
        self.return_point
    }

    pub fn maximum(&self) -> Decimal {
        self.maximum
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.minimum < self.return_point && self.return_point < self.maximum {
            Ok(())
        } else {
            warn!(
                "Rejecting cash policy {} / {} / {}",
                self.minimum, self.return_point, self.maximum
            );
            Err(ConfigurationError::ThresholdsNotOrdered {
                minimum: self.minimum,
                return_point: self.return_point,
                maximum: self.maximum,
            })
        }
    }
}

impl Default for CashPolicyConfig {
    fn default() -> Self {
        Self {
            minimum: DEFAULT_MINIMUM,
            return_point: DEFAULT_RETURN_POINT,
            maximum: DEFAULT_MAXIMUM,
        }
    }
}

/// Parses one threshold, falling back to `default` when it is not set.
pub fn parse_threshold(
    name: &str,
    raw: Option<&str>,
    default: Decimal,
) -> Result<Decimal, ConfigurationError> {
    match raw.map(str::trim) {
        None => {
            debug!("Threshold {} not configured, using {}", name, default);
            Ok(default)
        }
        Some("") => Err(ConfigurationError::MissingThreshold(name.to_string())),
        Some(value) => Decimal::from_str(value).map_err(|_| ConfigurationError::InvalidThreshold {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Where a balance sits relative to the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CashBand {
    Low,
    Normal,
    High,
}

impl CashBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CashBand::Low => "LOW",
            CashBand::Normal => "NORMAL",
            CashBand::High => "HIGH",
        }
    }
}

impl fmt::Display for CashBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified balance together with the thresholds it was judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CashPosition {
    pub balance: Decimal,
    pub band: CashBand,
    pub minimum: Decimal,
    pub return_point: Decimal,
    pub maximum: Decimal,
}

/// Classifies `balance` against `config`.
///
/// The ordering is re-checked on every call, so a config assembled by hand cannot
/// yield a band.
pub fn evaluate(balance: Decimal, config: &CashPolicyConfig) -> Result<CashPosition, ConfigurationError> {
    config.validate()?;

    let band = if balance < config.minimum {
        CashBand::Low
    } else if balance > config.maximum {
        CashBand::High
    } else {
        CashBand::Normal
    };

    Ok(CashPosition {
        balance,
        band,
        minimum: config.minimum,
        return_point: config.return_point,
        maximum: config.maximum,
    })
}

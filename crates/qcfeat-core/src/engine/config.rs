use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use crate::core::missing::DEFAULT_MISSING_MARKER;

pub const DEFAULT_SUM_DECIMALS: u32 = 10;
pub const DEFAULT_WIDE_FILL_VALUE: f64 = 0.0;

// f64 carries ~15.9 significant decimal digits; rounding beyond that is noise.
const MAX_SUM_DECIMALS: u32 = 15;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Which bond records take part in matching and aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BondScope {
    /// Every pair named by any of the three bond fields.
    #[default]
    All,
    /// Only pairs that also appear in `BOND_LENGTH`, i.e. covalently bonded atoms.
    Bonded,
}

impl fmt::Display for BondScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Bonded => write!(f, "bonded"),
        }
    }
}

impl FromStr for BondScope {
    type Err = ConfigError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "bonded" => Ok(Self::Bonded),
            other => Err(ConfigError::InvalidParameter {
                name: "bond_scope",
                reason: format!("expected 'all' or 'bonded', got '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeaturizeConfig {
    /// Text written in place of a missing statistic.
    pub missing_marker: String,
    pub include_wide_columns: bool,
    pub drop_duplicates: bool,
    pub bond_scope: BondScope,
    /// Decimal places kept in `sum_atomic_charges`.
    pub sum_decimals: u32,
    /// Value written for an atom or bond column a row does not mention.
    pub wide_fill_value: f64,
}

impl Default for FeaturizeConfig {
    fn default() -> Self {
        Self {
            missing_marker: DEFAULT_MISSING_MARKER.to_string(),
            include_wide_columns: true,
            drop_duplicates: true,
            bond_scope: BondScope::All,
            sum_decimals: DEFAULT_SUM_DECIMALS,
            wide_fill_value: DEFAULT_WIDE_FILL_VALUE,
        }
    }
}

#[derive(Default)]
pub struct FeaturizeConfigBuilder {
    missing_marker: Option<String>,
    include_wide_columns: Option<bool>,
    drop_duplicates: Option<bool>,
    bond_scope: Option<BondScope>,
    sum_decimals: Option<u32>,
    wide_fill_value: Option<f64>,
}

impl FeaturizeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing_marker(mut self, marker: impl Into<String>) -> Self {
        self.missing_marker = Some(marker.into());
        self
    }
    pub fn include_wide_columns(mut self, include: bool) -> Self {
        self.include_wide_columns = Some(include);
        self
    }
    pub fn drop_duplicates(mut self, drop: bool) -> Self {
        self.drop_duplicates = Some(drop);
        self
    }
    pub fn bond_scope(mut self, scope: BondScope) -> Self {
        self.bond_scope = Some(scope);
        self
    }
    pub fn sum_decimals(mut self, decimals: u32) -> Self {
        self.sum_decimals = Some(decimals);
        self
    }
    pub fn wide_fill_value(mut self, value: f64) -> Self {
        self.wide_fill_value = Some(value);
        self
    }

    pub fn build(self) -> Result<FeaturizeConfig, ConfigError> {
        let defaults = FeaturizeConfig::default();

        let missing_marker = self.missing_marker.unwrap_or(defaults.missing_marker);
        if missing_marker.contains(['\n', '\r', ',']) {
            return Err(ConfigError::InvalidParameter {
                name: "missing_marker",
                reason: "must not contain commas or line breaks".to_string(),
            });
        }

        let sum_decimals = self.sum_decimals.unwrap_or(defaults.sum_decimals);
        if sum_decimals > MAX_SUM_DECIMALS {
            return Err(ConfigError::InvalidParameter {
                name: "sum_decimals",
                reason: format!("must be at most {}, got {}", MAX_SUM_DECIMALS, sum_decimals),
            });
        }

        let wide_fill_value = self.wide_fill_value.unwrap_or(defaults.wide_fill_value);
        if !wide_fill_value.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "wide_fill_value",
                reason: "must be a finite number".to_string(),
            });
        }

        Ok(FeaturizeConfig {
            missing_marker,
            include_wide_columns: self
                .include_wide_columns
                .unwrap_or(defaults.include_wide_columns),
            drop_duplicates: self.drop_duplicates.unwrap_or(defaults.drop_duplicates),
            bond_scope: self.bond_scope.unwrap_or(defaults.bond_scope),
            sum_decimals,
            wide_fill_value,
        })
    }
}

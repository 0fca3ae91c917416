//! Engine configuration.
//!
//! Every tunable the engine closes over lives here. The defaults reproduce the
//! fixed presale model: a 10B token supply with 20% of raised funds seeding the
//! liquidity pool.

use serde::{Deserialize, Serialize};

use super::error::{Result, TokenomicsError};

/// Total token supply (10 billion).
pub const TOTAL_SUPPLY: f64 = 10_000_000_000.0;

/// Fraction of raised funds paired with LP tokens.
pub const LP_FUND_FRACTION: f64 = 0.20;

/// LP allocations below this percentage are rejected.
pub const LP_FLOOR_PERCENT: f64 = 0.1;

/// Public allocations at or below this percentage skip the LP FDV check.
pub const NEGLIGIBLE_PUBLIC_PERCENT: f64 = 0.1;

/// Slack on the LP floor comparison, in percentage points.
///
/// `100.0 - 10.0 - 89.9` evaluates to `0.09999999999999432` and must still
/// count as sitting on the 0.1% floor.
pub const LP_FLOOR_TOLERANCE: f64 = 1e-9;

/// Upper limit on stepped values per input field.
pub const MAX_FIELD_STEPS: usize = 100_000;

/// Upper limit on (team, public) points in one feasibility sweep.
pub const MAX_SWEEP_POINTS: usize = 10_000_000;

/// Inclusive range and stepping for one input field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    /// Slider step. Not enforced by the engine.
    pub step: f64,
    /// Initial value shown by a presenting layer.
    pub default: f64,
}

impl FieldBounds {
    pub const fn new(min: f64, max: f64, step: f64, default: f64) -> Self {
        Self {
            min,
            max,
            step,
            default,
        }
    }

    /// Check whether a value lies inside the inclusive range.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value into range.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Round a value to the nearest step from `min`, then clamp.
    pub fn snap(&self, value: f64) -> f64 {
        if self.step <= 0.0 {
            return self.clamp(value);
        }
        let steps = ((value - self.min) / self.step).round();
        self.clamp(self.min + steps * self.step)
    }

    /// Number of stepped values in the range, both ends included.
    ///
    /// Saturates at `usize::MAX` for spans too fine to count.
    pub fn step_count(&self) -> usize {
        if !(self.step > 0.0) || !(self.max >= self.min) {
            return 1;
        }
        let span = ((self.max - self.min) / self.step).floor();
        if !(span < usize::MAX as f64) {
            return usize::MAX;
        }
        (span as usize).saturating_add(1)
    }

    /// Value at the given step index.
    #[inline]
    pub fn value_at(&self, index: usize) -> f64 {
        (self.min + index as f64 * self.step).min(self.max)
    }

    /// Validate a value at the engine boundary.
    pub fn check(&self, field: &'static str, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(TokenomicsError::non_finite(field));
        }
        if !self.contains(value) {
            return Err(TokenomicsError::out_of_range(
                field, value, self.min, self.max,
            ));
        }
        Ok(value)
    }

    fn validate(&self, field: &str) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(TokenomicsError::invalid_config(format!(
                "{field} bounds must be finite"
            )));
        }
        if self.min > self.max {
            return Err(TokenomicsError::invalid_config(format!(
                "{field} min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if self.step <= 0.0 {
            return Err(TokenomicsError::invalid_config(format!(
                "{field} step must be positive"
            )));
        }
        if self.step_count() > MAX_FIELD_STEPS {
            return Err(TokenomicsError::invalid_config(format!(
                "{field} step {} gives more than {MAX_FIELD_STEPS} values",
                self.step
            )));
        }
        if !self.contains(self.default) {
            return Err(TokenomicsError::invalid_config(format!(
                "{field} default {} outside [{}, {}]",
                self.default, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Ranges for the three engine inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    pub team_percent: FieldBounds,
    pub funds_to_raise: FieldBounds,
    pub public_percent: FieldBounds,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            team_percent: FieldBounds::new(0.0, 30.0, 1.0, 10.0),
            funds_to_raise: FieldBounds::new(10_000.0, 2_000_000.0, 10_000.0, 100_000.0),
            public_percent: FieldBounds::new(0.0, 100.0, 1.0, 70.0),
        }
    }
}

/// Tolerances for the "at limit" hints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// LP percentages below this are flagged as sitting on the LP floor.
    pub lp_floor_warning: f64,
    /// Distance (percentage points) from the LP FDV cap that counts as "at" it.
    pub fdv_parity_tolerance: f64,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            lp_floor_warning: 1.0,
            fdv_parity_tolerance: 0.5,
        }
    }
}

/// Allocation engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenomicsConfig {
    /// Total token supply.
    pub total_supply: f64,
    /// Fraction of raised funds that goes to the LP (the rest goes to the team).
    pub lp_fund_fraction: f64,
    /// Input ranges.
    pub bounds: InputBounds,
    /// Near-constraint tolerances.
    pub diagnostics: DiagnosticsConfig,
}

impl Default for TokenomicsConfig {
    fn default() -> Self {
        Self {
            total_supply: TOTAL_SUPPLY,
            lp_fund_fraction: LP_FUND_FRACTION,
            bounds: InputBounds::default(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl TokenomicsConfig {
    /// Set total supply.
    pub fn with_total_supply(mut self, total_supply: f64) -> Self {
        self.total_supply = total_supply;
        self
    }

    /// Set LP fund fraction.
    pub fn with_lp_fund_fraction(mut self, fraction: f64) -> Self {
        self.lp_fund_fraction = fraction;
        self
    }

    /// Set input bounds.
    pub fn with_bounds(mut self, bounds: InputBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Fraction of raised funds that goes to the team.
    #[inline]
    pub fn team_fund_fraction(&self) -> f64 {
        1.0 - self.lp_fund_fraction
    }

    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.total_supply.is_finite() || self.total_supply <= 0.0 {
            return Err(TokenomicsError::invalid_config(format!(
                "total_supply must be positive, got {}",
                self.total_supply
            )));
        }
        if !(self.lp_fund_fraction > 0.0 && self.lp_fund_fraction < 1.0) {
            return Err(TokenomicsError::invalid_config(format!(
                "lp_fund_fraction must be in (0, 1), got {}",
                self.lp_fund_fraction
            )));
        }
        self.bounds.team_percent.validate("team_percent")?;
        self.bounds.funds_to_raise.validate("funds_to_raise")?;
        self.bounds.public_percent.validate("public_percent")?;

        let d = &self.diagnostics;
        if d.lp_floor_warning < 0.0 || d.fdv_parity_tolerance < 0.0 {
            return Err(TokenomicsError::invalid_config(
                "diagnostic tolerances must be non-negative",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = TokenomicsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_supply, 10_000_000_000.0);
        assert!((config.team_fund_fraction() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_fraction() {
        let config = TokenomicsConfig::default().with_lp_fund_fraction(1.0);
        assert!(matches!(
            config.validate(),
            Err(TokenomicsError::InvalidConfig { .. })
        ));

        let config = TokenomicsConfig::default().with_lp_fund_fraction(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let mut bounds = InputBounds::default();
        bounds.team_percent = FieldBounds::new(30.0, 0.0, 1.0, 10.0);
        let config = TokenomicsConfig::default().with_bounds(bounds);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_step_too_fine() {
        let mut bounds = InputBounds::default();
        bounds.funds_to_raise = FieldBounds::new(10_000.0, 2_000_000.0, 1e-6, 100_000.0);
        let config = TokenomicsConfig::default().with_bounds(bounds);
        assert!(matches!(
            config.validate(),
            Err(TokenomicsError::InvalidConfig { .. })
        ));

        bounds.funds_to_raise = FieldBounds::new(10_000.0, 2_000_000.0, 100.0, 100_000.0);
        let config = TokenomicsConfig::default().with_bounds(bounds);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_step_count_saturates() {
        let bounds = FieldBounds::new(0.0, 1e300, 1e-300, 0.0);
        assert_eq!(bounds.step_count(), usize::MAX);

        let bounds = FieldBounds::new(0.0, 1.0, f64::NAN, 0.0);
        assert_eq!(bounds.step_count(), 1);
    }

    #[test]
    fn test_snap_to_step() {
        let funds = InputBounds::default().funds_to_raise;
        assert_eq!(funds.snap(104_999.0), 100_000.0);
        assert_eq!(funds.snap(105_001.0), 110_000.0);
        assert_eq!(funds.snap(5_000_000.0), 2_000_000.0);
        assert_eq!(funds.snap(0.0), 10_000.0);
    }

    #[test]
    fn test_step_count() {
        let bounds = InputBounds::default();
        assert_eq!(bounds.team_percent.step_count(), 31);
        assert_eq!(bounds.public_percent.step_count(), 101);
        assert_eq!(bounds.funds_to_raise.step_count(), 200);
        assert_eq!(bounds.public_percent.value_at(100), 100.0);
    }

    #[test]
    fn test_check_reports_field() {
        let team = InputBounds::default().team_percent;
        assert_eq!(team.check("team_percent", 12.0), Ok(12.0));
        assert_eq!(
            team.check("team_percent", 30.5),
            Err(TokenomicsError::out_of_range("team_percent", 30.5, 0.0, 30.0))
        );
        assert_eq!(
            team.check("team_percent", f64::INFINITY),
            Err(TokenomicsError::non_finite("team_percent"))
        );
    }
}

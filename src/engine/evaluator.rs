//! Configured allocation engine.

use tracing::debug;

use crate::core::config::TokenomicsConfig;
use crate::core::error::Result;
use crate::core::types::{
    AllocationInput, AllocationResult, ConstraintProximity, Evaluation, Percent,
    ValidationOutcome,
};

use super::derivation::derive_with;
use super::diagnostics::constraint_proximity_with;
use super::validator::validate_with_fraction;

/// Stateless allocation engine closing over a validated configuration.
///
/// Every method is a pure function of its arguments and the configuration, so
/// one engine can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllocationEngine {
    config: TokenomicsConfig,
}

impl AllocationEngine {
    /// Create an engine, rejecting unusable configurations.
    pub fn new(config: TokenomicsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &TokenomicsConfig {
        &self.config
    }

    /// Validate a (team, public) pair.
    #[inline]
    pub fn validate(&self, team_percent: Percent, public_percent: Percent) -> ValidationOutcome {
        validate_with_fraction(team_percent, public_percent, self.config.lp_fund_fraction)
    }

    /// Derive the result for an already validated allocation.
    #[inline]
    pub fn derive(&self, input: &AllocationInput, lp_percent: Percent) -> AllocationResult {
        derive_with(
            input,
            lp_percent,
            self.config.total_supply,
            self.config.lp_fund_fraction,
        )
    }

    /// Near-constraint hint for the presenting layer.
    #[inline]
    pub fn proximity(
        &self,
        team_percent: Percent,
        public_percent: Percent,
        lp_percent: Percent,
    ) -> ConstraintProximity {
        constraint_proximity_with(
            team_percent,
            public_percent,
            lp_percent,
            self.config.lp_fund_fraction,
            &self.config.diagnostics,
        )
    }

    /// Range-check the input, validate it, and derive the result when valid.
    pub fn evaluate(&self, input: &AllocationInput) -> Result<Evaluation> {
        let input = input.check(&self.config.bounds)?;
        Ok(self.evaluate_in_range(&input))
    }

    /// Validate and derive without the range check.
    ///
    /// The sweep and session call this after they have range-checked.
    pub(crate) fn evaluate_in_range(&self, input: &AllocationInput) -> Evaluation {
        let outcome = self.validate(input.team_percent, input.public_percent);
        if !outcome.valid {
            debug!(
                team = input.team_percent,
                public = input.public_percent,
                lp = outcome.lp_percent,
                reason = outcome.message(),
                "allocation rejected"
            );
            return Evaluation::Invalid(outcome);
        }

        let result = self.derive(input, outcome.lp_percent);
        debug!(
            team = result.team_percent,
            public = result.public_percent,
            lp = result.lp_percent,
            fdv_ico = result.fdv_ico,
            fdv_lp = result.fdv_lp,
            multiple = result.fdv_multiple,
            "allocation evaluated"
        );
        Evaluation::Valid(result)
    }
}

//! Core data types for the allocation engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::InputBounds;
use super::error::Result;

/// Type alias for percentage values (0-100 scale).
pub type Percent = f64;

/// Engine inputs for one recompute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AllocationInput {
    /// Share of supply allocated to the team.
    pub team_percent: Percent,
    /// Share of supply sold in the public sale.
    pub public_percent: Percent,
    /// Amount raised in the public sale.
    pub funds_to_raise: f64,
}

impl AllocationInput {
    /// Create input checked against the default ranges.
    pub fn new(team_percent: Percent, public_percent: Percent, funds_to_raise: f64) -> Result<Self> {
        Self::checked(
            team_percent,
            public_percent,
            funds_to_raise,
            &InputBounds::default(),
        )
    }

    /// Create input checked against the given ranges.
    pub fn checked(
        team_percent: Percent,
        public_percent: Percent,
        funds_to_raise: f64,
        bounds: &InputBounds,
    ) -> Result<Self> {
        Ok(Self {
            team_percent: bounds.team_percent.check("team_percent", team_percent)?,
            public_percent: bounds
                .public_percent
                .check("public_percent", public_percent)?,
            funds_to_raise: bounds
                .funds_to_raise
                .check("funds_to_raise", funds_to_raise)?,
        })
    }

    /// Re-check an existing input, e.g. one deserialized from elsewhere.
    pub fn check(&self, bounds: &InputBounds) -> Result<Self> {
        Self::checked(
            self.team_percent,
            self.public_percent,
            self.funds_to_raise,
            bounds,
        )
    }

    /// Initial slider values.
    pub fn defaults(bounds: &InputBounds) -> Self {
        Self {
            team_percent: bounds.team_percent.default,
            public_percent: bounds.public_percent.default,
            funds_to_raise: bounds.funds_to_raise.default,
        }
    }
}

/// Why an allocation was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// LP share is below the floor (zero, negative or negligible).
    LpZeroOrNegative,
    /// LP price, and so LP FDV, would fall below the ICO price.
    LpFdvBelowIcoFdv,
}

impl RejectReason {
    /// User-facing message.
    pub fn message(self) -> &'static str {
        match self {
            RejectReason::LpZeroOrNegative => "LP cannot be 0%",
            RejectReason::LpFdvBelowIcoFdv => "LP FDV would drop below ICO FDV",
        }
    }

    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            RejectReason::LpZeroOrNegative => "LP_ZERO_OR_NEGATIVE",
            RejectReason::LpFdvBelowIcoFdv => "LP_FDV_BELOW_ICO_FDV",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of checking a (team, public) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    /// Derived LP share, reported even when invalid.
    pub lp_percent: Percent,
    /// `None` when valid.
    pub reason: Option<RejectReason>,
}

impl ValidationOutcome {
    pub(crate) fn accepted(lp_percent: Percent) -> Self {
        Self {
            valid: true,
            lp_percent,
            reason: None,
        }
    }

    pub(crate) fn rejected(lp_percent: Percent, reason: RejectReason) -> Self {
        Self {
            valid: false,
            lp_percent,
            reason: Some(reason),
        }
    }

    /// User-facing message, empty when valid.
    pub fn message(&self) -> &'static str {
        self.reason.map(RejectReason::message).unwrap_or("")
    }
}

/// Token distribution, fund split and valuation for a valid allocation.
///
/// Only [`derive`](crate::engine::derive) builds these, and callers are
/// expected to gate on a valid [`ValidationOutcome`] first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AllocationResult {
    pub team_percent: Percent,
    pub public_percent: Percent,
    pub lp_percent: Percent,
    pub funds_to_raise: f64,
    pub team_tokens: f64,
    pub public_tokens: f64,
    pub lp_tokens: f64,
    pub lp_funds: f64,
    pub team_funds: f64,
    /// Public sale price per token.
    pub ico_price: f64,
    /// Opening pool price per token.
    pub lp_price: f64,
    /// Pre-market FDV at the ICO price.
    pub fdv_ico: f64,
    /// Market FDV at the LP price.
    pub fdv_lp: f64,
    /// `fdv_lp / fdv_ico`, 0 when there is no ICO price.
    pub fdv_multiple: f64,
}

impl AllocationResult {
    /// Sum of the three percentages.
    #[inline]
    pub fn total_percent(&self) -> Percent {
        self.team_percent + self.public_percent + self.lp_percent
    }

    /// Sum of the three token buckets.
    #[inline]
    pub fn total_tokens(&self) -> f64 {
        self.team_tokens + self.public_tokens + self.lp_tokens
    }
}

/// Outcome of a full recompute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Evaluation {
    Valid(AllocationResult),
    Invalid(ValidationOutcome),
}

impl Evaluation {
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, Evaluation::Valid(_))
    }

    /// Derived LP share, available either way.
    pub fn lp_percent(&self) -> Percent {
        match self {
            Evaluation::Valid(result) => result.lp_percent,
            Evaluation::Invalid(outcome) => outcome.lp_percent,
        }
    }

    pub fn result(&self) -> Option<&AllocationResult> {
        match self {
            Evaluation::Valid(result) => Some(result),
            Evaluation::Invalid(_) => None,
        }
    }

    pub fn reason(&self) -> Option<RejectReason> {
        match self {
            Evaluation::Valid(_) => None,
            Evaluation::Invalid(outcome) => outcome.reason,
        }
    }
}

/// Constraint boundary a valid allocation is sitting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NearConstraint {
    /// LP share is close to the floor.
    LpFloor,
    /// LP FDV is close to the ICO FDV.
    FdvParity,
}

impl NearConstraint {
    pub fn message(self) -> &'static str {
        match self {
            NearConstraint::LpFloor => "At MINIMUM: LP cannot be 0% (slider blocked)",
            NearConstraint::FdvParity => {
                "At MINIMUM constraint: LP FDV = ICO FDV (slider blocked)"
            }
        }
    }
}

/// "At limit" hint for presenting layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintProximity {
    pub at_limit: bool,
    pub constraint: Option<NearConstraint>,
    /// Human-readable reason, empty when not at a limit.
    pub reason: String,
}

impl ConstraintProximity {
    pub(crate) fn clear() -> Self {
        Self {
            at_limit: false,
            constraint: None,
            reason: String::new(),
        }
    }

    pub(crate) fn at(constraint: NearConstraint) -> Self {
        Self {
            at_limit: true,
            constraint: Some(constraint),
            reason: constraint.message().to_string(),
        }
    }
}

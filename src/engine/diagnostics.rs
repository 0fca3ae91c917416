//! "At limit" hints for a valid allocation.
//!
//! These never change validity. They tell a presenting layer that a slider is
//! pressed against one of the two constraints so it can be flagged.

use crate::core::config::{DiagnosticsConfig, LP_FUND_FRACTION, NEGLIGIBLE_PUBLIC_PERCENT};
use crate::core::types::{ConstraintProximity, NearConstraint, Percent};

use super::validator::max_lp_percent;

/// Check proximity with the default tolerances and LP fund fraction.
pub fn constraint_proximity(
    team_percent: Percent,
    public_percent: Percent,
    lp_percent: Percent,
) -> ConstraintProximity {
    constraint_proximity_with(
        team_percent,
        public_percent,
        lp_percent,
        LP_FUND_FRACTION,
        &DiagnosticsConfig::default(),
    )
}

/// Check proximity to the LP floor, then to LP FDV parity.
pub fn constraint_proximity_with(
    _team_percent: Percent,
    public_percent: Percent,
    lp_percent: Percent,
    lp_fund_fraction: f64,
    config: &DiagnosticsConfig,
) -> ConstraintProximity {
    if lp_percent < config.lp_floor_warning {
        return ConstraintProximity::at(NearConstraint::LpFloor);
    }

    if public_percent > NEGLIGIBLE_PUBLIC_PERCENT {
        let max_lp = max_lp_percent(public_percent, lp_fund_fraction);
        if (lp_percent - max_lp).abs() < config.fdv_parity_tolerance {
            return ConstraintProximity::at(NearConstraint::FdvParity);
        }
    }

    ConstraintProximity::clear()
}

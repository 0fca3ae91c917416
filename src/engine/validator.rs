//! Allocation constraint checks.
//!
//! Two rules decide whether a (team, public) pair is acceptable:
//!
//! 1. The LP share `100 - team - public` must be at least 0.1%.
//! 2. The LP price must not undercut the ICO price. With a fraction `f` of the
//!    raise paired with the LP tokens, `lp_price >= ico_price` reduces to
//!    `lp_percent <= f * public_percent`. The check is skipped when the public
//!    share is negligible (at most 0.1%).

use crate::core::config::{
    LP_FLOOR_PERCENT, LP_FLOOR_TOLERANCE, LP_FUND_FRACTION, NEGLIGIBLE_PUBLIC_PERCENT,
};
use crate::core::types::{Percent, RejectReason, ValidationOutcome};

/// LP share left over after the team and public allocations.
#[inline]
pub fn lp_percent(team_percent: Percent, public_percent: Percent) -> Percent {
    100.0 - team_percent - public_percent
}

/// Largest LP share that keeps the LP price at or above the ICO price.
#[inline]
pub fn max_lp_percent(public_percent: Percent, lp_fund_fraction: f64) -> Percent {
    lp_fund_fraction * public_percent
}

/// Validate a (team, public) pair under the default 20% LP fund fraction.
pub fn validate(team_percent: Percent, public_percent: Percent) -> ValidationOutcome {
    validate_with_fraction(team_percent, public_percent, LP_FUND_FRACTION)
}

/// Validate a (team, public) pair for a given LP fund fraction.
pub fn validate_with_fraction(
    team_percent: Percent,
    public_percent: Percent,
    lp_fund_fraction: f64,
) -> ValidationOutcome {
    let lp = lp_percent(team_percent, public_percent);

    // Negated so NaN lands here too.
    if !(lp >= LP_FLOOR_PERCENT - LP_FLOOR_TOLERANCE) {
        return ValidationOutcome::rejected(lp, RejectReason::LpZeroOrNegative);
    }

    if public_percent > NEGLIGIBLE_PUBLIC_PERCENT
        && lp > max_lp_percent(public_percent, lp_fund_fraction)
    {
        return ValidationOutcome::rejected(lp, RejectReason::LpFdvBelowIcoFdv);
    }

    ValidationOutcome::accepted(lp)
}

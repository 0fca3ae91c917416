//! Token distribution, fund split, prices and FDVs.

use crate::core::config::{LP_FUND_FRACTION, TOTAL_SUPPLY};
use crate::core::types::{AllocationInput, AllocationResult, Percent};

/// Derive the full result under the default supply and LP fund fraction.
///
/// Callers must have validated the allocation first; a negative `lp_percent`
/// produces meaningless numbers.
pub fn derive(input: &AllocationInput, lp_percent: Percent) -> AllocationResult {
    derive_with(input, lp_percent, TOTAL_SUPPLY, LP_FUND_FRACTION)
}

/// Derive the full result for a given supply and LP fund fraction.
///
/// Divisions by zero degrade to 0: no tokens sold means no price.
pub fn derive_with(
    input: &AllocationInput,
    lp_percent: Percent,
    total_supply: f64,
    lp_fund_fraction: f64,
) -> AllocationResult {
    let funds = input.funds_to_raise;

    let team_tokens = total_supply * input.team_percent / 100.0;
    let public_tokens = total_supply * input.public_percent / 100.0;
    let lp_tokens = total_supply * lp_percent / 100.0;

    let lp_funds = funds * lp_fund_fraction;
    let team_funds = funds * (1.0 - lp_fund_fraction);

    let ico_price = if public_tokens > 0.0 {
        funds / public_tokens
    } else {
        0.0
    };
    let lp_price = if lp_tokens > 0.0 {
        lp_funds / lp_tokens
    } else {
        0.0
    };

    let fdv_ico = total_supply * ico_price;
    let fdv_lp = total_supply * lp_price;
    let fdv_multiple = if fdv_ico > 0.0 { fdv_lp / fdv_ico } else { 0.0 };

    AllocationResult {
        team_percent: input.team_percent,
        public_percent: input.public_percent,
        lp_percent,
        funds_to_raise: funds,
        team_tokens,
        public_tokens,
        lp_tokens,
        lp_funds,
        team_funds,
        ico_price,
        lp_price,
        fdv_ico,
        fdv_lp,
        fdv_multiple,
    }
}

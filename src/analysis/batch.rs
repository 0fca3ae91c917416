//! Column-wise evaluation of many allocations at once.

use rayon::prelude::*;

use crate::core::error::{Result, TokenomicsError};
use crate::core::types::{AllocationInput, Evaluation};
use crate::engine::AllocationEngine;

/// Evaluate parallel columns of team %, public % and fundraise.
///
/// All three columns must have the same length. Any out-of-range row fails the
/// whole batch.
pub fn evaluate_batch(
    engine: &AllocationEngine,
    team_percent: &[f64],
    public_percent: &[f64],
    funds_to_raise: &[f64],
) -> Result<Vec<Evaluation>> {
    let n = team_percent.len();
    if public_percent.len() != n {
        return Err(TokenomicsError::length_mismatch(n, public_percent.len()));
    }
    if funds_to_raise.len() != n {
        return Err(TokenomicsError::length_mismatch(n, funds_to_raise.len()));
    }

    let bounds = engine.config().bounds;
    (0..n)
        .into_par_iter()
        .map(|i| {
            let input = AllocationInput::checked(
                team_percent[i],
                public_percent[i],
                funds_to_raise[i],
                &bounds,
            )?;
            Ok(engine.evaluate_in_range(&input))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RejectReason;

    #[test]
    fn test_batch_preserves_order() {
        let engine = AllocationEngine::default();
        let evaluations = evaluate_batch(
            &engine,
            &[10.0, 0.0, 10.0, 10.0],
            &[70.0, 0.0, 89.9, 90.0],
            &[100_000.0, 100_000.0, 1_000_000.0, 1_000_000.0],
        )
        .unwrap();

        assert_eq!(evaluations.len(), 4);
        assert_eq!(evaluations[0].reason(), Some(RejectReason::LpFdvBelowIcoFdv));
        assert!(evaluations[1].is_valid());
        assert!(evaluations[2].is_valid());
        assert_eq!(evaluations[3].reason(), Some(RejectReason::LpZeroOrNegative));
    }

    #[test]
    fn test_batch_length_mismatch() {
        let engine = AllocationEngine::default();
        let err = evaluate_batch(&engine, &[10.0, 10.0], &[80.0], &[100_000.0, 100_000.0])
            .unwrap_err();
        assert_eq!(err, TokenomicsError::length_mismatch(2, 1));
    }

    #[test]
    fn test_batch_out_of_range_row() {
        let engine = AllocationEngine::default();
        let err = evaluate_batch(&engine, &[10.0, 50.0], &[80.0, 40.0], &[1e5, 1e5]).unwrap_err();
        assert!(matches!(
            err,
            TokenomicsError::OutOfRange {
                field: "team_percent",
                ..
            }
        ));
    }
}

//! Feasibility sweep over the stepped (team, public) grid.
//!
//! Evaluates every slider position for a fixed fundraise so a frontend can
//! shade or block regions up front. Parallelized via Rayon; the engine is
//! stateless so points are independent.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::config::{MAX_SWEEP_POINTS, NEGLIGIBLE_PUBLIC_PERCENT};
use crate::core::error::{Result, TokenomicsError};
use crate::core::types::{AllocationInput, Evaluation, Percent, RejectReason};
use crate::engine::AllocationEngine;

/// One grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub team_percent: Percent,
    pub public_percent: Percent,
    pub lp_percent: Percent,
    pub valid: bool,
    pub reason: Option<RejectReason>,
    /// 0 when invalid.
    pub fdv_multiple: f64,
}

/// Inclusive band of public percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PublicRange {
    pub min: Percent,
    pub max: Percent,
}

/// Grid evaluation for one fundraise amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeasibilitySweep {
    pub funds_to_raise: f64,
    pub team_steps: usize,
    pub public_steps: usize,
    /// Row-major: team index outer, public index inner.
    pub points: Vec<SweepPoint>,
}

impl FeasibilitySweep {
    /// Evaluate every stepped (team, public) position.
    pub fn run(engine: &AllocationEngine, funds_to_raise: f64) -> Result<Self> {
        let bounds = engine.config().bounds;
        let funds_to_raise = bounds
            .funds_to_raise
            .check("funds_to_raise", funds_to_raise)?;

        let team_steps = bounds.team_percent.step_count();
        let public_steps = bounds.public_percent.step_count();
        let total = team_steps
            .checked_mul(public_steps)
            .filter(|&n| n <= MAX_SWEEP_POINTS)
            .ok_or_else(|| {
                TokenomicsError::invalid_config(format!(
                    "sweep of {team_steps} x {public_steps} points exceeds {MAX_SWEEP_POINTS}"
                ))
            })?;

        let points: Vec<SweepPoint> = (0..total)
            .into_par_iter()
            .map(|k| {
                let input = AllocationInput {
                    team_percent: bounds.team_percent.value_at(k / public_steps),
                    public_percent: bounds.public_percent.value_at(k % public_steps),
                    funds_to_raise,
                };
                let evaluation = engine.evaluate_in_range(&input);
                SweepPoint {
                    team_percent: input.team_percent,
                    public_percent: input.public_percent,
                    lp_percent: evaluation.lp_percent(),
                    valid: evaluation.is_valid(),
                    reason: evaluation.reason(),
                    fdv_multiple: match evaluation {
                        Evaluation::Valid(result) => result.fdv_multiple,
                        Evaluation::Invalid(_) => 0.0,
                    },
                }
            })
            .collect();

        Ok(Self {
            funds_to_raise,
            team_steps,
            public_steps,
            points,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at grid indices.
    pub fn point(&self, team_idx: usize, public_idx: usize) -> Option<&SweepPoint> {
        if team_idx >= self.team_steps || public_idx >= self.public_steps {
            return None;
        }
        self.points.get(team_idx * self.public_steps + public_idx)
    }

    pub fn valid_count(&self) -> usize {
        self.points.iter().filter(|p| p.valid).count()
    }

    /// Points for one team value.
    pub fn row(&self, team_percent: Percent) -> &[SweepPoint] {
        self.points
            .chunks(self.public_steps.max(1))
            .find(|row| row.first().map(|p| p.team_percent) == Some(team_percent))
            .unwrap_or(&[])
    }

    /// Valid public values for one team value.
    pub fn valid_public_values(&self, team_percent: Percent) -> Vec<Percent> {
        self.row(team_percent)
            .iter()
            .filter(|p| p.valid)
            .map(|p| p.public_percent)
            .collect()
    }

    /// Contiguous band of valid non-negligible public values for one team value.
    ///
    /// A negligible public share (at most 0.1%) is always valid on its own and
    /// sits apart from this band, so it is excluded.
    pub fn valid_public_range(&self, team_percent: Percent) -> Option<PublicRange> {
        let mut valid = self
            .row(team_percent)
            .iter()
            .filter(|p| p.valid && p.public_percent > NEGLIGIBLE_PUBLIC_PERCENT)
            .map(|p| p.public_percent);

        let first = valid.next()?;
        let (min, max) = valid.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(PublicRange { min, max })
    }

    /// Highest FDV multiple among valid points.
    pub fn best_multiple(&self) -> Option<&SweepPoint> {
        self.points
            .iter()
            .filter(|p| p.valid)
            .max_by(|a, b| {
                a.fdv_multiple
                    .partial_cmp(&b.fdv_multiple)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{FieldBounds, InputBounds, TokenomicsConfig};

    #[test]
    fn test_grid_shape() {
        let engine = AllocationEngine::default();
        let sweep = FeasibilitySweep::run(&engine, 100_000.0).unwrap();

        assert_eq!(sweep.team_steps, 31);
        assert_eq!(sweep.public_steps, 101);
        assert_eq!(sweep.len(), 31 * 101);

        let p = sweep.point(10, 70).unwrap();
        assert_eq!(p.team_percent, 10.0);
        assert_eq!(p.public_percent, 70.0);
        assert!(!p.valid);
        assert_eq!(p.reason, Some(RejectReason::LpFdvBelowIcoFdv));
        assert!(sweep.point(31, 0).is_none());
    }

    #[test]
    fn test_valid_public_range() {
        let engine = AllocationEngine::default();
        let sweep = FeasibilitySweep::run(&engine, 100_000.0).unwrap();

        // team 10: need public >= 90 / 1.2 = 75 and public <= 89.9.
        let range = sweep.valid_public_range(10.0).unwrap();
        assert_eq!(range.min, 75.0);
        assert_eq!(range.max, 89.0);

        let values = sweep.valid_public_values(10.0);
        assert_eq!(values.first(), Some(&0.0));
        assert_eq!(values.len(), 1 + (89 - 75 + 1));
    }

    #[test]
    fn test_best_multiple() {
        let engine = AllocationEngine::default();
        let sweep = FeasibilitySweep::run(&engine, 100_000.0).unwrap();
        let best = sweep.best_multiple().unwrap();
        assert!(best.valid);
        // Smallest LP against the largest public share.
        assert_eq!(best.lp_percent, 1.0);
    }

    #[test]
    fn test_rejects_oversized_grid() {
        let mut bounds = InputBounds::default();
        bounds.team_percent = FieldBounds::new(0.0, 30.0, 0.01, 10.0);
        bounds.public_percent = FieldBounds::new(0.0, 100.0, 0.01, 70.0);
        let config = TokenomicsConfig::default().with_bounds(bounds);
        let engine = AllocationEngine::new(config).unwrap();

        // 3001 x 10001 points.
        assert!(matches!(
            FeasibilitySweep::run(&engine, 100_000.0),
            Err(TokenomicsError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_rejects_funds_out_of_range() {
        let engine = AllocationEngine::default();
        assert!(FeasibilitySweep::run(&engine, 1.0).is_err());
    }
}

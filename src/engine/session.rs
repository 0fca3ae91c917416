//! Validate-before-commit session for interactive frontends.
//!
//! A session holds the last committed input. Each slider change is merged
//! into a candidate, validated, and only replaces the committed input when the
//! allocation is valid; otherwise the previous value stays in place and the
//! rejection is handed back for display.

use tracing::trace;

use crate::core::error::Result;
use crate::core::types::{AllocationInput, AllocationResult, Evaluation, ValidationOutcome};

use super::evaluator::AllocationEngine;

/// Which input a change applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    TeamPercent,
    PublicPercent,
    FundsToRaise,
}

/// Outcome of proposing a change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitOutcome {
    /// Candidate accepted and now committed.
    Committed(AllocationResult),
    /// Candidate rejected; the committed input is unchanged.
    Rejected(ValidationOutcome),
}

impl CommitOutcome {
    #[inline]
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed(_))
    }
}

/// Outcome of starting a session.
#[derive(Debug, Clone)]
pub enum SessionStart {
    /// Initial input accepted and committed.
    Started(AllocationSession),
    /// Initial input violates a constraint; no session was created.
    Rejected(ValidationOutcome),
}

impl SessionStart {
    #[inline]
    pub fn is_started(&self) -> bool {
        matches!(self, SessionStart::Started(_))
    }

    pub fn into_session(self) -> Option<AllocationSession> {
        match self {
            SessionStart::Started(session) => Some(session),
            SessionStart::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&ValidationOutcome> {
        match self {
            SessionStart::Started(_) => None,
            SessionStart::Rejected(outcome) => Some(outcome),
        }
    }
}

/// Caller-held committed allocation state.
#[derive(Debug, Clone)]
pub struct AllocationSession {
    engine: AllocationEngine,
    committed: AllocationInput,
    result: AllocationResult,
}

impl AllocationSession {
    /// Start a session from an initial input, which must itself be valid.
    ///
    /// Out-of-range input is an error; a constraint violation comes back as
    /// [`SessionStart::Rejected`].
    pub fn new(engine: AllocationEngine, initial: AllocationInput) -> Result<SessionStart> {
        let initial = initial.check(&engine.config().bounds)?;
        Ok(match engine.evaluate_in_range(&initial) {
            Evaluation::Valid(result) => SessionStart::Started(Self {
                engine,
                committed: initial,
                result,
            }),
            Evaluation::Invalid(outcome) => SessionStart::Rejected(outcome),
        })
    }

    #[inline]
    pub fn engine(&self) -> &AllocationEngine {
        &self.engine
    }

    /// Last committed input.
    #[inline]
    pub fn committed(&self) -> &AllocationInput {
        &self.committed
    }

    /// Result for the committed input.
    #[inline]
    pub fn result(&self) -> &AllocationResult {
        &self.result
    }

    /// Propose a whole new input.
    pub fn propose(&mut self, candidate: AllocationInput) -> Result<CommitOutcome> {
        let candidate = candidate.check(&self.engine.config().bounds)?;

        match self.engine.evaluate_in_range(&candidate) {
            Evaluation::Valid(result) => {
                self.committed = candidate;
                self.result = result;
                Ok(CommitOutcome::Committed(result))
            }
            Evaluation::Invalid(outcome) => {
                trace!(
                    team = candidate.team_percent,
                    public = candidate.public_percent,
                    kept_team = self.committed.team_percent,
                    kept_public = self.committed.public_percent,
                    "candidate rolled back"
                );
                Ok(CommitOutcome::Rejected(outcome))
            }
        }
    }

    /// Propose a new value for one slider, keeping the other committed values.
    pub fn set(&mut self, slider: Slider, value: f64) -> Result<CommitOutcome> {
        let mut candidate = self.committed;
        match slider {
            Slider::TeamPercent => candidate.team_percent = value,
            Slider::PublicPercent => candidate.public_percent = value,
            Slider::FundsToRaise => candidate.funds_to_raise = value,
        }
        self.propose(candidate)
    }

    pub fn set_team_percent(&mut self, value: f64) -> Result<CommitOutcome> {
        self.set(Slider::TeamPercent, value)
    }

    pub fn set_public_percent(&mut self, value: f64) -> Result<CommitOutcome> {
        self.set(Slider::PublicPercent, value)
    }

    /// The fundraise does not enter either constraint, so any in-range value commits.
    pub fn set_funds_to_raise(&mut self, value: f64) -> Result<CommitOutcome> {
        self.set(Slider::FundsToRaise, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RejectReason;

    fn session() -> AllocationSession {
        let input = AllocationInput::new(10.0, 80.0, 100_000.0).unwrap();
        AllocationSession::new(AllocationEngine::default(), input)
            .unwrap()
            .into_session()
            .unwrap()
    }

    #[test]
    fn test_rejected_change_keeps_committed() {
        let mut session = session();

        let outcome = session.set_public_percent(70.0).unwrap();
        match outcome {
            CommitOutcome::Rejected(rejection) => {
                assert_eq!(rejection.reason, Some(RejectReason::LpFdvBelowIcoFdv));
                assert_eq!(rejection.lp_percent, 20.0);
            }
            CommitOutcome::Committed(_) => panic!("expected rejection"),
        }
        assert_eq!(session.committed().public_percent, 80.0);
        assert_eq!(session.result().lp_percent, 10.0);
    }

    #[test]
    fn test_accepted_change_commits() {
        let mut session = session();

        let outcome = session.set_team_percent(15.0).unwrap();
        assert!(outcome.is_committed());
        assert_eq!(session.committed().team_percent, 15.0);
        assert_eq!(session.result().lp_percent, 5.0);
    }

    #[test]
    fn test_invalid_initial_input() {
        let input = AllocationInput::new(10.0, 70.0, 100_000.0).unwrap();
        let start = AllocationSession::new(AllocationEngine::default(), input).unwrap();
        assert!(!start.is_started());
        let outcome = start.rejection().unwrap();
        assert_eq!(outcome.reason, Some(RejectReason::LpFdvBelowIcoFdv));
        assert_eq!(outcome.lp_percent, 20.0);
        assert!(start.into_session().is_none());
    }

    #[test]
    fn test_out_of_range_initial_input_is_error() {
        let input = AllocationInput {
            team_percent: 40.0,
            public_percent: 50.0,
            funds_to_raise: 100_000.0,
        };
        assert!(AllocationSession::new(AllocationEngine::default(), input).is_err());
    }
}

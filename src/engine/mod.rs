//! Allocation engine: validation, derivation and diagnostics.

pub mod derivation;
pub mod diagnostics;
pub mod evaluator;
pub mod session;
pub mod validator;

pub use derivation::{derive, derive_with};
pub use diagnostics::{constraint_proximity, constraint_proximity_with};
pub use evaluator::AllocationEngine;
pub use session::{AllocationSession, CommitOutcome, SessionStart, Slider};
pub use validator::{lp_percent, validate, validate_with_fraction};

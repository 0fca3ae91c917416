//! Bulk evaluation over the allocation space.

pub mod batch;
pub mod sweep;

pub use batch::evaluate_batch;
pub use sweep::{FeasibilitySweep, PublicRange, SweepPoint};

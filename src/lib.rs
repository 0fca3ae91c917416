// Suppress warning from PyO3 macro expansion (fixed in newer PyO3 versions)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

//! Tokenomics - presale token allocation engine.
//!
//! Given a team allocation, a public-sale allocation and a fundraise target,
//! this crate provides:
//! - LP share derivation and constraint validation
//! - Token distribution, fund split, ICO/LP prices and FDVs
//! - Near-constraint hints and a validate-before-commit session
//! - Parallel feasibility sweeps over the slider grid
//! - Display formatting and Python bindings (`python` feature)

pub mod analysis;
pub mod core;
pub mod display;
pub mod engine;
#[cfg(feature = "python")]
pub mod python;

pub use crate::core::{
    AllocationInput, AllocationResult, Evaluation, RejectReason, Result, TokenomicsConfig,
    TokenomicsError, ValidationOutcome,
};
pub use crate::engine::{derive, validate, AllocationEngine, AllocationSession};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module entry point
#[cfg(feature = "python")]
#[pymodule]
fn _tokenomics(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    // Register config and result classes
    m.add_class::<python::bindings::PyTokenomicsConfig>()?;
    m.add_class::<python::bindings::PyValidationOutcome>()?;
    m.add_class::<python::bindings::PyAllocationResult>()?;
    m.add_class::<python::bindings::PyAllocationSession>()?;

    // Register engine functions
    m.add_function(wrap_pyfunction!(python::bindings::validate, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::evaluate, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::evaluate_many, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::sweep, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::constraint_proximity, m)?)?;

    // Register formatting helpers
    m.add_function(wrap_pyfunction!(python::bindings::format_number, m)?)?;
    m.add_function(wrap_pyfunction!(python::bindings::format_currency, m)?)?;

    Ok(())
}

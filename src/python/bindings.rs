//! PyO3 function bindings for the allocation engine.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::analysis::{evaluate_batch, FeasibilitySweep};
use crate::core::config::{DiagnosticsConfig, TokenomicsConfig};
use crate::core::types::{AllocationInput, AllocationResult, Evaluation, ValidationOutcome};
use crate::display::{self, AllocationReport};
use crate::engine::{AllocationEngine, AllocationSession, CommitOutcome, SessionStart};

use super::numpy_bridge::*;

// ============================================================================
// Configuration Classes
// ============================================================================

/// Python-exposed engine configuration.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyTokenomicsConfig {
    #[pyo3(get, set)]
    pub total_supply: f64,
    #[pyo3(get, set)]
    pub lp_fund_fraction: f64,
    #[pyo3(get, set)]
    pub lp_floor_warning: f64,
    #[pyo3(get, set)]
    pub fdv_parity_tolerance: f64,
}

#[pymethods]
impl PyTokenomicsConfig {
    #[new]
    #[pyo3(signature = (total_supply=10_000_000_000.0, lp_fund_fraction=0.2, lp_floor_warning=1.0, fdv_parity_tolerance=0.5))]
    fn new(
        total_supply: f64,
        lp_fund_fraction: f64,
        lp_floor_warning: f64,
        fdv_parity_tolerance: f64,
    ) -> Self {
        Self {
            total_supply,
            lp_fund_fraction,
            lp_floor_warning,
            fdv_parity_tolerance,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "TokenomicsConfig(total_supply={}, lp_fund_fraction={})",
            self.total_supply, self.lp_fund_fraction
        )
    }
}

impl From<&PyTokenomicsConfig> for TokenomicsConfig {
    fn from(py_config: &PyTokenomicsConfig) -> Self {
        TokenomicsConfig {
            total_supply: py_config.total_supply,
            lp_fund_fraction: py_config.lp_fund_fraction,
            diagnostics: DiagnosticsConfig {
                lp_floor_warning: py_config.lp_floor_warning,
                fdv_parity_tolerance: py_config.fdv_parity_tolerance,
            },
            ..Default::default()
        }
    }
}

fn build_engine(config: Option<&PyTokenomicsConfig>) -> PyResult<AllocationEngine> {
    let config = config.map(TokenomicsConfig::from).unwrap_or_default();
    Ok(AllocationEngine::new(config)?)
}

// ============================================================================
// Result Classes
// ============================================================================

/// Python-exposed validation outcome.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyValidationOutcome {
    #[pyo3(get)]
    pub valid: bool,
    #[pyo3(get)]
    pub lp_percent: f64,
    /// Machine-readable reason code, `None` when valid.
    #[pyo3(get)]
    pub reason: Option<String>,
    #[pyo3(get)]
    pub message: String,
}

#[pymethods]
impl PyValidationOutcome {
    fn __repr__(&self) -> String {
        format!(
            "ValidationOutcome(valid={}, lp={:.1}%, reason={:?})",
            self.valid, self.lp_percent, self.reason
        )
    }
}

impl From<&ValidationOutcome> for PyValidationOutcome {
    fn from(outcome: &ValidationOutcome) -> Self {
        Self {
            valid: outcome.valid,
            lp_percent: outcome.lp_percent,
            reason: outcome.reason.map(|r| r.code().to_string()),
            message: outcome.message().to_string(),
        }
    }
}

/// Python-exposed allocation result.
#[pyclass]
#[derive(Debug, Clone)]
pub struct PyAllocationResult {
    #[pyo3(get)]
    pub team_percent: f64,
    #[pyo3(get)]
    pub public_percent: f64,
    #[pyo3(get)]
    pub lp_percent: f64,
    #[pyo3(get)]
    pub funds_to_raise: f64,
    #[pyo3(get)]
    pub team_tokens: f64,
    #[pyo3(get)]
    pub public_tokens: f64,
    #[pyo3(get)]
    pub lp_tokens: f64,
    #[pyo3(get)]
    pub lp_funds: f64,
    #[pyo3(get)]
    pub team_funds: f64,
    #[pyo3(get)]
    pub ico_price: f64,
    #[pyo3(get)]
    pub lp_price: f64,
    #[pyo3(get)]
    pub fdv_ico: f64,
    #[pyo3(get)]
    pub fdv_lp: f64,
    #[pyo3(get)]
    pub fdv_multiple: f64,
    /// `at_limit` hint for the current sliders.
    #[pyo3(get)]
    pub at_limit: bool,
    #[pyo3(get)]
    pub limit_reason: String,
    report: AllocationReport,
}

#[pymethods]
impl PyAllocationResult {
    fn __repr__(&self) -> String {
        format!(
            "AllocationResult(team={:.1}%, public={:.1}%, lp={:.1}%, multiple={:.2}x)",
            self.team_percent, self.public_percent, self.lp_percent, self.fdv_multiple
        )
    }

    /// Formatted report text.
    fn report(&self) -> String {
        self.report.to_string()
    }

    /// Convert to a dictionary of display strings keyed by row label.
    fn to_dict(&self, py: Python) -> PyResult<PyObject> {
        let dict = PyDict::new(py);
        for row in self.report.rows() {
            dict.set_item(&row.label, &row.value)?;
        }
        Ok(dict.into())
    }
}

fn convert_result(engine: &AllocationEngine, result: &AllocationResult) -> PyAllocationResult {
    let proximity =
        engine.proximity(result.team_percent, result.public_percent, result.lp_percent);
    PyAllocationResult {
        team_percent: result.team_percent,
        public_percent: result.public_percent,
        lp_percent: result.lp_percent,
        funds_to_raise: result.funds_to_raise,
        team_tokens: result.team_tokens,
        public_tokens: result.public_tokens,
        lp_tokens: result.lp_tokens,
        lp_funds: result.lp_funds,
        team_funds: result.team_funds,
        ico_price: result.ico_price,
        lp_price: result.lp_price,
        fdv_ico: result.fdv_ico,
        fdv_lp: result.fdv_lp,
        fdv_multiple: result.fdv_multiple,
        at_limit: proximity.at_limit,
        limit_reason: proximity.reason,
        report: AllocationReport::new(result, engine.config().lp_fund_fraction),
    }
}

// ============================================================================
// Session
// ============================================================================

/// Python-exposed validate-before-commit session.
#[pyclass]
pub struct PyAllocationSession {
    session: AllocationSession,
    last_rejection: Option<ValidationOutcome>,
}

#[pymethods]
impl PyAllocationSession {
    #[new]
    #[pyo3(signature = (team_percent=None, public_percent=None, funds_to_raise=None, config=None))]
    fn new(
        team_percent: Option<f64>,
        public_percent: Option<f64>,
        funds_to_raise: Option<f64>,
        config: Option<&PyTokenomicsConfig>,
    ) -> PyResult<Self> {
        let engine = build_engine(config)?;
        let defaults = AllocationInput::defaults(&engine.config().bounds);
        let initial = AllocationInput {
            team_percent: team_percent.unwrap_or(defaults.team_percent),
            public_percent: public_percent.unwrap_or(defaults.public_percent),
            funds_to_raise: funds_to_raise.unwrap_or(defaults.funds_to_raise),
        };

        match AllocationSession::new(engine, initial)? {
            SessionStart::Started(session) => Ok(Self {
                session,
                last_rejection: None,
            }),
            SessionStart::Rejected(outcome) => Err(pyo3::exceptions::PyValueError::new_err(format!(
                "initial allocation rejected: {}",
                outcome.message()
            ))),
        }
    }

    /// Propose a team %; returns True when committed.
    fn set_team_percent(&mut self, value: f64) -> PyResult<bool> {
        let outcome = self.session.set_team_percent(value)?;
        Ok(self.record(outcome))
    }

    /// Propose a public %; returns True when committed.
    fn set_public_percent(&mut self, value: f64) -> PyResult<bool> {
        let outcome = self.session.set_public_percent(value)?;
        Ok(self.record(outcome))
    }

    /// Propose a fundraise; returns True when committed.
    fn set_funds_to_raise(&mut self, value: f64) -> PyResult<bool> {
        let outcome = self.session.set_funds_to_raise(value)?;
        Ok(self.record(outcome))
    }

    #[getter]
    fn team_percent(&self) -> f64 {
        self.session.committed().team_percent
    }

    #[getter]
    fn public_percent(&self) -> f64 {
        self.session.committed().public_percent
    }

    #[getter]
    fn funds_to_raise(&self) -> f64 {
        self.session.committed().funds_to_raise
    }

    /// Rejection from the most recent proposal, if it was rejected.
    #[getter]
    fn last_rejection(&self) -> Option<PyValidationOutcome> {
        self.last_rejection.as_ref().map(PyValidationOutcome::from)
    }

    /// Result for the committed input.
    fn result(&self) -> PyAllocationResult {
        convert_result(self.session.engine(), self.session.result())
    }
}

impl PyAllocationSession {
    fn record(&mut self, outcome: CommitOutcome) -> bool {
        match outcome {
            CommitOutcome::Committed(_) => {
                self.last_rejection = None;
                true
            }
            CommitOutcome::Rejected(rejection) => {
                self.last_rejection = Some(rejection);
                false
            }
        }
    }
}

// ============================================================================
// Engine Functions
// ============================================================================

/// Validate a (team, public) pair.
#[pyfunction]
#[pyo3(signature = (team_percent, public_percent, config=None))]
pub fn validate(
    team_percent: f64,
    public_percent: f64,
    config: Option<&PyTokenomicsConfig>,
) -> PyResult<PyValidationOutcome> {
    let engine = build_engine(config)?;
    Ok(PyValidationOutcome::from(
        &engine.validate(team_percent, public_percent),
    ))
}

/// Validate and derive. Returns `(outcome, result)`; `result` is None when invalid.
#[pyfunction]
#[pyo3(signature = (team_percent, public_percent, funds_to_raise, config=None))]
pub fn evaluate(
    team_percent: f64,
    public_percent: f64,
    funds_to_raise: f64,
    config: Option<&PyTokenomicsConfig>,
) -> PyResult<(PyValidationOutcome, Option<PyAllocationResult>)> {
    let engine = build_engine(config)?;
    let input = AllocationInput {
        team_percent,
        public_percent,
        funds_to_raise,
    };

    Ok(match engine.evaluate(&input)? {
        Evaluation::Valid(result) => (
            PyValidationOutcome::from(&ValidationOutcome::accepted(result.lp_percent)),
            Some(convert_result(&engine, &result)),
        ),
        Evaluation::Invalid(outcome) => (PyValidationOutcome::from(&outcome), None),
    })
}

/// Evaluate numpy columns. Returns `(valid, lp_percent, fdv_multiple)` arrays.
#[pyfunction]
#[pyo3(signature = (team_percent, public_percent, funds_to_raise, config=None))]
pub fn evaluate_many<'py>(
    py: Python<'py>,
    team_percent: PyReadonlyArray1<f64>,
    public_percent: PyReadonlyArray1<f64>,
    funds_to_raise: PyReadonlyArray1<f64>,
    config: Option<&PyTokenomicsConfig>,
) -> PyResult<(&'py PyArray1<bool>, &'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let engine = build_engine(config)?;
    let team = numpy_to_vec_f64(team_percent)?;
    let public = numpy_to_vec_f64(public_percent)?;
    let funds = numpy_to_vec_f64(funds_to_raise)?;

    let evaluations = py.allow_threads(|| evaluate_batch(&engine, &team, &public, &funds))?;

    let valid = evaluations.iter().map(Evaluation::is_valid).collect();
    let lp = evaluations.iter().map(Evaluation::lp_percent).collect();
    let multiple = evaluations
        .iter()
        .map(|e| e.result().map_or(0.0, |r| r.fdv_multiple))
        .collect();

    Ok((
        vec_to_numpy_bool(py, valid),
        vec_to_numpy_f64(py, lp),
        vec_to_numpy_f64(py, multiple),
    ))
}

/// Sweep the stepped slider grid for one fundraise.
///
/// Returns a dict of flat numpy arrays (`team_percent`, `public_percent`,
/// `lp_percent`, `valid`, `fdv_multiple`) plus the grid shape.
#[pyfunction]
#[pyo3(signature = (funds_to_raise, config=None))]
pub fn sweep(
    py: Python<'_>,
    funds_to_raise: f64,
    config: Option<&PyTokenomicsConfig>,
) -> PyResult<PyObject> {
    let engine = build_engine(config)?;
    let result = py.allow_threads(|| FeasibilitySweep::run(&engine, funds_to_raise))?;

    let column = |f: fn(&crate::analysis::SweepPoint) -> f64| -> Vec<f64> {
        result.points.iter().map(f).collect()
    };

    let dict = PyDict::new(py);
    dict.set_item("team_percent", vec_to_numpy_f64(py, column(|p| p.team_percent)))?;
    dict.set_item(
        "public_percent",
        vec_to_numpy_f64(py, column(|p| p.public_percent)),
    )?;
    dict.set_item("lp_percent", vec_to_numpy_f64(py, column(|p| p.lp_percent)))?;
    dict.set_item(
        "fdv_multiple",
        vec_to_numpy_f64(py, column(|p| p.fdv_multiple)),
    )?;
    dict.set_item(
        "valid",
        vec_to_numpy_bool(py, result.points.iter().map(|p| p.valid).collect()),
    )?;
    dict.set_item("shape", (result.team_steps, result.public_steps))?;
    Ok(dict.into())
}

/// Near-constraint hint. Returns `(at_limit, reason)`.
#[pyfunction]
#[pyo3(signature = (team_percent, public_percent, lp_percent, config=None))]
pub fn constraint_proximity(
    team_percent: f64,
    public_percent: f64,
    lp_percent: f64,
    config: Option<&PyTokenomicsConfig>,
) -> PyResult<(bool, String)> {
    let engine = build_engine(config)?;
    let hint = engine.proximity(team_percent, public_percent, lp_percent);
    Ok((hint.at_limit, hint.reason))
}

// ============================================================================
// Formatting
// ============================================================================

/// Format with a B/M/K suffix and two decimals.
#[pyfunction]
pub fn format_number(value: f64) -> String {
    display::format_number(value)
}

/// Format as a dollar amount.
#[pyfunction]
pub fn format_currency(value: f64) -> String {
    display::format_currency(value)
}

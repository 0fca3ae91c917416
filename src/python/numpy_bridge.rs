//! numpy array conversions.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

/// Copy a numpy array into a Vec<f64>.
pub fn numpy_to_vec_f64(arr: PyReadonlyArray1<f64>) -> PyResult<Vec<f64>> {
    Ok(arr.as_slice()?.to_vec())
}

/// Convert Vec<f64> to numpy array.
pub fn vec_to_numpy_f64<'py>(py: Python<'py>, vec: Vec<f64>) -> &'py PyArray1<f64> {
    PyArray1::from_vec(py, vec)
}

/// Convert Vec<bool> to numpy array.
pub fn vec_to_numpy_bool<'py>(py: Python<'py>, vec: Vec<bool>) -> &'py PyArray1<bool> {
    PyArray1::from_vec(py, vec)
}

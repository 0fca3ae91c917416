//! Core types, configuration and errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    DiagnosticsConfig, FieldBounds, InputBounds, TokenomicsConfig, LP_FUND_FRACTION,
    TOTAL_SUPPLY,
};
pub use error::{Result, TokenomicsError};
pub use types::*;

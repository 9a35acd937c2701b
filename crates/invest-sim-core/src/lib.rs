pub mod error;
pub mod rates;
pub mod types;

#[cfg(feature = "fixed_income")]
pub mod fixed_income;

#[cfg(feature = "variable_income")]
pub mod variable_income;

#[cfg(feature = "portfolio")]
pub mod portfolio;

pub use error::SimulatorError;
pub use types::*;

/// Standard result type for all simulator operations
pub type SimResult<T> = Result<T, SimulatorError>;

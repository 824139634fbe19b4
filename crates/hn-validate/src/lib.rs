//! Normative checks on solved networks.
//!
//! Compares node pressures, pipe velocities and pipe diameters of a solution
//! against the limits of an ambit (urban or rural) and reports one alert per
//! violation. Validation never mutates its input; a report is valid when it
//! holds no error-severity alert.

pub mod alert;
pub mod error;
pub mod limits;
pub mod report;
pub mod validate;

pub use alert::{ElementType, Rule, Severity, ValidationAlert};
pub use error::{LimitsError, LimitsResult};
pub use limits::{Ambit, NormativeLimits};
pub use report::ValidationReport;
pub use validate::{validate, validate_for_ambit, validate_solution};

//! hn-core: shared foundation for hydronet.
//!
//! Contains:
//! - units (uom SI types, constructors and boundary conversions)
//! - numeric (Real and finite/positive guards)
//! - ids (compact arena IDs for nodes, pipes and loops)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{HnError, HnResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;

//! hn-hydraulics: pipe hydraulics for pressurized water networks.
//!
//! Provides:
//! - Hazen-Williams head loss (fixed exponent 1.852, SI form)
//! - Pipe cross-section and velocity
//! - Default Hazen-Williams C per pipe material
//! - Commercial diameter catalogs with unit costs
//!
//! # Example
//!
//! ```
//! use hn_hydraulics::{PipeResistance, velocity};
//!
//! let pipe = PipeResistance::new(500.0, 150.0, 140.0).unwrap();
//! let hf = pipe.head_loss(0.02);
//! assert!(hf > 4.0 && hf < 4.3);
//! assert!(velocity(0.02, 150.0) > 1.1);
//! ```

pub mod catalog;
pub mod error;
pub mod geometry;
pub mod hazen_williams;
pub mod material;

pub use catalog::{CommercialPipe, DiameterCatalog, format_inch};
pub use error::{HydraulicsError, HydraulicsResult};
pub use geometry::{area_m2, velocity};
pub use hazen_williams::{DIAMETER_EXPONENT, FLOW_EXPONENT, PipeResistance, SI_COEFFICIENT};
pub use material::{DEFAULT_ROUGHNESS, Material};

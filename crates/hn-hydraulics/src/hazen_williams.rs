//! Hazen-Williams head loss.
//!
//! SI form with Q in m³/s and D in m:
//!
//! `hf = 10.674 · L · Q^1.852 / (C^1.852 · D^4.8704)`
//!
//! The pipe-constant part is folded into a resistance `r`, so `hf = r · Q · |Q|^(n-1)`
//! keeps the sign of the flow.

use hn_core::{Real, ensure_positive, mm_to_m};

use crate::error::HydraulicsResult;

/// Flow exponent n. Intrinsic to the law, not configurable.
pub const FLOW_EXPONENT: Real = 1.852;
/// Diameter exponent m.
pub const DIAMETER_EXPONENT: Real = 4.8704;
/// Unit coefficient for SI inputs.
pub const SI_COEFFICIENT: Real = 10.674;

/// Hazen-Williams resistance of one pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeResistance {
    r: Real,
}

impl PipeResistance {
    /// Build from length (m), internal diameter (mm) and roughness coefficient C.
    pub fn new(length: Real, diameter_mm: Real, roughness: Real) -> HydraulicsResult<Self> {
        let length = ensure_positive(length, "pipe length")?;
        let diameter = mm_to_m(ensure_positive(diameter_mm, "pipe diameter")?);
        let c = ensure_positive(roughness, "Hazen-Williams C")?;

        let r = SI_COEFFICIENT * length
            / (c.powf(FLOW_EXPONENT) * diameter.powf(DIAMETER_EXPONENT));
        Ok(Self { r })
    }

    /// Resistance `r` in `hf = r · Q^n`.
    pub fn resistance(&self) -> Real {
        self.r
    }

    /// Signed head loss (m) for a signed flow (m³/s).
    pub fn head_loss(&self, flow: Real) -> Real {
        self.r * flow * flow.abs().powf(FLOW_EXPONENT - 1.0)
    }

    /// `r · |Q|^(n-1)`, the per-pipe term of the Hardy Cross denominator.
    pub fn loss_slope(&self, flow: Real) -> Real {
        self.r * flow.abs().powf(FLOW_EXPONENT - 1.0)
    }

    /// d(hf)/dQ = n · r · |Q|^(n-1).
    pub fn head_loss_derivative(&self, flow: Real) -> Real {
        FLOW_EXPONENT * self.loss_slope(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_hand_computation() {
        // L = 500 m, D = 150 mm, C = 140, Q = 20 l/s
        let pipe = PipeResistance::new(500.0, 150.0, 140.0).unwrap();
        let expected =
            10.674 * 500.0 * 0.02_f64.powf(1.852) / (140.0_f64.powf(1.852) * 0.15_f64.powf(4.8704));
        assert!((pipe.head_loss(0.02) - expected).abs() < 1e-12);
        assert!(expected > 4.0 && expected < 4.3);
    }

    #[test]
    fn reversed_flow_reverses_loss() {
        let pipe = PipeResistance::new(200.0, 100.0, 150.0).unwrap();
        assert_eq!(pipe.head_loss(-0.01), -pipe.head_loss(0.01));
        assert_eq!(pipe.head_loss(0.0), 0.0);
        assert_eq!(pipe.loss_slope(0.0), 0.0);
    }

    #[test]
    fn smaller_pipe_loses_more_head() {
        let wide = PipeResistance::new(100.0, 200.0, 140.0).unwrap();
        let narrow = PipeResistance::new(100.0, 100.0, 140.0).unwrap();
        assert!(narrow.head_loss(0.01) > wide.head_loss(0.01));
    }

    #[test]
    fn rougher_pipe_loses_more_head() {
        let smooth = PipeResistance::new(100.0, 100.0, 150.0).unwrap();
        let rough = PipeResistance::new(100.0, 100.0, 100.0).unwrap();
        assert!(rough.head_loss(0.01) > smooth.head_loss(0.01));
    }

    #[test]
    fn degenerate_pipes_rejected() {
        assert!(PipeResistance::new(0.0, 100.0, 140.0).is_err());
        assert!(PipeResistance::new(10.0, 0.0, 140.0).is_err());
        assert!(PipeResistance::new(10.0, 100.0, -1.0).is_err());
        assert!(PipeResistance::new(f64::NAN, 100.0, 140.0).is_err());
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let pipe = PipeResistance::new(300.0, 110.0, 140.0).unwrap();
        let q = 0.012;
        let h = 1e-7;
        let fd = (pipe.head_loss(q + h) - pipe.head_loss(q - h)) / (2.0 * h);
        let exact = pipe.head_loss_derivative(q);
        assert!((fd - exact).abs() / exact < 1e-6);
    }
}

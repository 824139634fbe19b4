//! Pipe cost models.

use hn_core::Real;
use hn_hydraulics::CommercialPipe;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CostFunction {
    /// Catalog unit cost (per m) times length.
    #[default]
    CatalogUnitCost,
    /// `length · base_cost_per_m · (D / reference_diameter_mm)^exponent`.
    PowerLaw {
        base_cost_per_m: Real,
        reference_diameter_mm: Real,
        exponent: Real,
    },
}

impl CostFunction {
    pub fn pipe_cost(&self, length: Real, pipe: &CommercialPipe) -> Real {
        match *self {
            CostFunction::CatalogUnitCost => length * pipe.unit_cost,
            CostFunction::PowerLaw {
                base_cost_per_m,
                reference_diameter_mm,
                exponent,
            } => length * base_cost_per_m * (pipe.internal_mm / reference_diameter_mm).powf(exponent),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if let CostFunction::PowerLaw {
            base_cost_per_m,
            reference_diameter_mm,
            exponent,
        } = *self
        {
            if !(base_cost_per_m.is_finite() && base_cost_per_m >= 0.0) {
                return Err(format!("base_cost_per_m must be >= 0 (got {base_cost_per_m})"));
            }
            if !(reference_diameter_mm.is_finite() && reference_diameter_mm > 0.0) {
                return Err(format!(
                    "reference_diameter_mm must be > 0 (got {reference_diameter_mm})"
                ));
            }
            if !exponent.is_finite() {
                return Err("exponent must be finite".to_string());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_law_scales_with_diameter() {
        let cost = CostFunction::PowerLaw {
            base_cost_per_m: 10.0,
            reference_diameter_mm: 50.0,
            exponent: 1.5,
        };
        let pipe = CommercialPipe {
            nominal_inch: 4.0,
            internal_mm: 200.0,
            unit_cost: 99.0,
        };
        // (200/50)^1.5 = 8
        assert!((cost.pipe_cost(100.0, &pipe) - 8000.0).abs() < 1e-9);
        assert_eq!(CostFunction::CatalogUnitCost.pipe_cost(100.0, &pipe), 9900.0);
    }

    #[test]
    fn tagged_serde_form() {
        let json = r#"{"type":"power_law","base_cost_per_m":100.0,"reference_diameter_mm":26.6,"exponent":1.5}"#;
        let cost: CostFunction = serde_json::from_str(json).unwrap();
        assert!(matches!(cost, CostFunction::PowerLaw { exponent, .. } if exponent == 1.5));
    }
}

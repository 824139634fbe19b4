//! Pipe materials and their default Hazen-Williams coefficients.

use hn_core::Real;
use serde::{Deserialize, Serialize};

/// C used when neither a coefficient nor a material is given.
pub const DEFAULT_ROUGHNESS: Real = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Pvc,
    Hdpe,
    Concrete,
    Steel,
    Copper,
}

impl Material {
    /// Typical Hazen-Williams C for new pipe of this material.
    pub fn hazen_williams_c(self) -> Real {
        match self {
            Material::Pvc => 150.0,
            Material::Hdpe => 140.0,
            Material::Concrete => 130.0,
            Material::Steel => 140.0,
            Material::Copper => 130.0,
        }
    }

    /// Resolve an explicit coefficient, else the material default, else [`DEFAULT_ROUGHNESS`].
    pub fn resolve_roughness(explicit: Option<Real>, material: Option<Material>) -> Real {
        explicit
            .or_else(|| material.map(Material::hazen_williams_c))
            .unwrap_or(DEFAULT_ROUGHNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_coefficient_wins() {
        assert_eq!(
            Material::resolve_roughness(Some(120.0), Some(Material::Pvc)),
            120.0
        );
        assert_eq!(Material::resolve_roughness(None, Some(Material::Concrete)), 130.0);
        assert_eq!(Material::resolve_roughness(None, None), DEFAULT_ROUGHNESS);
    }
}

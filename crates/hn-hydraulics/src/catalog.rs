//! Commercial diameter catalogs.
//!
//! The optimizer's genes are indices into a catalog, so entries are kept sorted by
//! internal diameter and then by cost.

use hn_core::{Real, mm_to_inch};
use serde::{Deserialize, Serialize};

use crate::error::{HydraulicsError, HydraulicsResult};

/// One purchasable pipe size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommercialPipe {
    /// Nominal size in inches.
    pub nominal_inch: Real,
    /// Internal diameter, mm.
    pub internal_mm: Real,
    /// Supply and install cost per metre.
    pub unit_cost: Real,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CommercialPipe>", into = "Vec<CommercialPipe>")]
pub struct DiameterCatalog {
    entries: Vec<CommercialPipe>,
}

impl DiameterCatalog {
    /// Validate and sort a catalog. Empty catalogs are rejected.
    pub fn new(mut entries: Vec<CommercialPipe>) -> HydraulicsResult<Self> {
        if entries.is_empty() {
            return Err(HydraulicsError::EmptyCatalog);
        }
        for (index, e) in entries.iter().enumerate() {
            let bad = |what: &str| HydraulicsError::InvalidCatalogEntry {
                index,
                what: what.to_string(),
            };
            if !(e.internal_mm.is_finite() && e.internal_mm > 0.0) {
                return Err(bad("internal diameter must be > 0"));
            }
            if !(e.unit_cost.is_finite() && e.unit_cost >= 0.0) {
                return Err(bad("unit cost must be >= 0"));
            }
            if !(e.nominal_inch.is_finite() && e.nominal_inch > 0.0) {
                return Err(bad("nominal size must be > 0"));
            }
        }
        entries.sort_by(|a, b| {
            a.internal_mm
                .total_cmp(&b.internal_mm)
                .then(a.unit_cost.total_cmp(&b.unit_cost))
        });
        Ok(Self { entries })
    }

    /// PVC class-10 series used when the caller supplies none.
    pub fn pvc_class10() -> Self {
        const SERIES: [(Real, Real, Real); 11] = [
            (0.5, 26.6, 1.5),
            (0.75, 26.6, 2.1),
            (1.0, 29.4, 3.5),
            (1.25, 38.0, 4.8),
            (1.5, 44.0, 6.2),
            (2.0, 59.0, 9.5),
            (2.5, 71.0, 14.0),
            (3.0, 84.0, 18.5),
            (4.0, 105.0, 32.0),
            (6.0, 154.0, 65.0),
            (8.0, 204.0, 110.0),
        ];
        Self {
            entries: SERIES
                .iter()
                .map(|&(nominal_inch, internal_mm, unit_cost)| CommercialPipe {
                    nominal_inch,
                    internal_mm,
                    unit_cost,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CommercialPipe> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[CommercialPipe] {
        &self.entries
    }

    /// Index of the entry whose internal diameter is closest to `diameter_mm`
    /// (the cheaper one on ties).
    pub fn nearest_index(&self, diameter_mm: Real) -> usize {
        let mut best = 0;
        let mut best_gap = Real::INFINITY;
        for (i, e) in self.entries.iter().enumerate() {
            let gap = (e.internal_mm - diameter_mm).abs();
            if gap < best_gap {
                best = i;
                best_gap = gap;
            }
        }
        best
    }

    /// Nominal inch size of the catalog entry nearest to `diameter_mm`.
    pub fn nearest_inch(&self, diameter_mm: Real) -> Real {
        self.entries
            .get(self.nearest_index(diameter_mm))
            .map_or_else(|| mm_to_inch(diameter_mm), |e| e.nominal_inch)
    }
}

impl Default for DiameterCatalog {
    fn default() -> Self {
        Self::pvc_class10()
    }
}

impl TryFrom<Vec<CommercialPipe>> for DiameterCatalog {
    type Error = HydraulicsError;

    fn try_from(entries: Vec<CommercialPipe>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<DiameterCatalog> for Vec<CommercialPipe> {
    fn from(catalog: DiameterCatalog) -> Self {
        catalog.entries
    }
}

/// Render a nominal size the way it is printed on pipe, e.g. `1 1/4"`.
pub fn format_inch(nominal: Real) -> String {
    const FRACTIONS: [(Real, &str); 4] = [(0.25, "1/4"), (0.5, "1/2"), (0.75, "3/4"), (0.0, "")];
    let whole = nominal.trunc();
    let frac = nominal - whole;
    let part = FRACTIONS
        .iter()
        .find(|(v, _)| (frac - v).abs() < 0.01)
        .map(|(_, s)| *s);

    match part {
        Some("") => format!("{}\"", whole as i64),
        Some(f) if whole == 0.0 => format!("{f}\""),
        Some(f) => format!("{} {f}\"", whole as i64),
        None => format!("{nominal:.2}\""),
    }
}

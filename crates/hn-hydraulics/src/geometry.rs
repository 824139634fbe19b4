//! Pipe cross-section and mean velocity.

use hn_core::{Area, Real, Velocity, m3ps, mm};
use uom::si::area::square_meter;
use uom::si::velocity::meter_per_second;

fn cross_section(diameter_mm: Real) -> Area {
    let d = mm(diameter_mm);
    d * d * (std::f64::consts::PI / 4.0)
}

/// Internal cross-section area (m²) of a pipe of the given internal diameter (mm).
pub fn area_m2(diameter_mm: Real) -> Real {
    cross_section(diameter_mm).get::<square_meter>()
}

/// Mean velocity (m/s, signed like the flow) for a flow in m³/s.
pub fn velocity(flow_m3s: Real, diameter_mm: Real) -> Real {
    let v: Velocity = m3ps(flow_m3s) / cross_section(diameter_mm);
    v.get::<meter_per_second>()
}

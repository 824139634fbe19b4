// hn-core/src/units.rs
//
// The engine computes in plain SI `Real`s; these helpers are the only place unit
// conversions happen (millimetre diameters and inch sizes at the boundary).

use uom::si::f64::{
    Area as UomArea, Length as UomLength, Velocity as UomVelocity, VolumeRate as UomVolumeRate,
};

pub type Area = UomArea;
pub type Length = UomLength;
pub type Velocity = UomVelocity;
pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn mm(v: f64) -> Length {
    use uom::si::length::millimeter;
    Length::new::<millimeter>(v)
}

#[inline]
pub fn m3ps(v: f64) -> VolumeRate {
    use uom::si::volume_rate::cubic_meter_per_second;
    VolumeRate::new::<cubic_meter_per_second>(v)
}

/// Millimetres to metres.
#[inline]
pub fn mm_to_m(v: f64) -> f64 {
    use uom::si::length::meter;
    mm(v).get::<meter>()
}

/// Millimetres to inches.
#[inline]
pub fn mm_to_inch(v: f64) -> f64 {
    use uom::si::length::inch;
    mm(v).get::<inch>()
}

/// Cubic metres per second to litres per second.
#[inline]
pub fn m3ps_to_lps(v: f64) -> f64 {
    use uom::si::volume_rate::liter_per_second;
    m3ps(v).get::<liter_per_second>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _d = mm(150.0);
        let _q = m3ps(0.02);
    }

    #[test]
    fn diameter_conversions() {
        assert!((mm_to_m(150.0) - 0.15).abs() < 1e-12);
        assert!((mm_to_inch(101.6) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn flow_conversions() {
        assert!((m3ps_to_lps(0.005) - 5.0).abs() < 1e-9);
    }
}

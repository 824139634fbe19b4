use crate::HnError;

/// Floating point type used throughout the engine.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, HnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(HnError::NonFinite { what, value: v })
    }
}

/// Accept only finite, strictly positive values (lengths, diameters, roughness).
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, HnError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(HnError::InvalidArg {
            what: format!("{what} must be > 0 (got {v})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert!(ensure_positive(0.0, "length").is_err());
        assert!(ensure_positive(-3.0, "length").is_err());
        assert_eq!(ensure_positive(2.5, "length").unwrap(), 2.5);
        assert!(matches!(
            ensure_positive(Real::INFINITY, "length"),
            Err(HnError::NonFinite { .. })
        ));
    }
}

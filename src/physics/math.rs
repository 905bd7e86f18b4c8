/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// Rounds `value` to the nearest multiple of `step`.
///
/// Keeps repeated `+= 0.1` edits from accumulating binary noise. A
/// non-positive or non-finite step leaves the value untouched.
pub fn snap_to_step(value: Scalar, step: Scalar) -> Scalar {
    if !(step.is_finite() && step > 0.0) {
        return value;
    }

    let snapped = (value / step).round() * step;
    // Trim the last-ulp residue of the multiplication
    (snapped * 1e9).round() / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_step_removes_accumulated_noise() {
        let mut value = 0.0;
        for _ in 0..3 {
            value += 0.1;
        }
        assert_ne!(value, 0.3);
        assert_eq!(snap_to_step(value, 0.1), 0.3);
    }

    #[test]
    fn test_snap_to_step_ignores_invalid_step() {
        assert_eq!(snap_to_step(1.234, 0.0), 1.234);
        assert_eq!(snap_to_step(1.234, -0.1), 1.234);
        assert_eq!(snap_to_step(1.234, Scalar::NAN), 1.234);
    }

    #[test]
    fn test_snap_to_step_handles_negative_values() {
        assert_eq!(snap_to_step(-0.29999999, 0.1), -0.3);
    }
}

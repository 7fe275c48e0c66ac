//! Configuration knob (potentiometer wiper on a mux input).

/// Wiper voltage as a fraction of the knob's full-scale voltage.  Not
/// clamped: the menu clamps when it quantises.
pub fn ratio(millivolts: i32, full_scale_mv: u16) -> f32 {
    if full_scale_mv == 0 {
        return 0.0;
    }
    millivolts as f32 / f32::from(full_scale_mv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_against_full_scale() {
        assert!((ratio(4999, 4999) - 1.0).abs() < f32::EPSILON);
        assert!((ratio(5000, 4999) - 1.0002).abs() < 1e-4);
        assert_eq!(ratio(0, 4999), 0.0);
        assert_eq!(ratio(100, 0), 0.0);
    }
}

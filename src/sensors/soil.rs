//! Capacitive soil-moisture probe front end.
//!
//! The probe outputs a voltage that falls as the soil gets wetter.  This
//! module only turns raw ADC counts into millivolts; the per-probe fit to
//! volumetric water content lives in `control::calibration`.

/// Scale raw counts to millivolts at the analog front end.
///
/// `full_scale_mv` is the voltage that produces `max_counts`.  Integer
/// arithmetic, truncating.
pub fn counts_to_millivolts(counts: u16, full_scale_mv: u16, max_counts: u16) -> i32 {
    if max_counts == 0 {
        return 0;
    }
    let mv = u32::from(counts) * u32::from(full_scale_mv) / u32::from(max_counts);
    mv as i32
}

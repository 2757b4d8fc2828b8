//! MPE-based ERP exemption threshold (FCC 19-126, Table 2, p. 26).

use log::trace;

use crate::error::ExposureError;
use crate::units::{ERP_BAND_CUTPOINTS_MHZ, near_field_boundary_m};

/// Effective radiated power threshold (W) for exemption from RF exposure
/// evaluation, using the maximum permissible exposure method.
///
/// # Formula
///
/// With `r` the distance in meters and `f` the frequency in MHz:
///
/// ```text
/// [0.3, 1.34)       1920 × r²
/// [1.34, 30)        3450 × r² / f²
/// [30, 300)         3.83 × r²
/// [300, 1500)       0.0128 × r² × f
/// [1500, 100000)    19.2 × r²
/// ```
///
/// # Errors
///
/// - `NearFieldRequiresEvaluation` if `r < λ/2π`; this is checked before the
///   band lookup, so a near-field point is reported as such even when the
///   frequency is also outside the table.
/// - `OutOfDomain` if the frequency is outside `[0.3, 100000)` MHz, or the
///   distance is NaN or infinite.
pub fn erp_threshold_w(meters: f64, mhz: f64) -> Result<f64, ExposureError> {
    if !mhz.is_finite() || mhz <= 0.0 {
        return Err(ExposureError::out_of_domain(format!("frequency out of range: {} MHz", mhz)));
    }
    if !meters.is_finite() {
        return Err(ExposureError::out_of_domain(format!("distance out of range: {} m", meters)));
    }
    let boundary_m = near_field_boundary_m(mhz);
    if meters < boundary_m {
        trace!("{} m is inside the near field of {} MHz ({} m)", meters, mhz, boundary_m);
        return Err(ExposureError::NearFieldRequiresEvaluation {
            distance_m: meters,
            boundary_m,
        });
    }

    let band = ERP_BAND_CUTPOINTS_MHZ
        .windows(2)
        .position(|w| w[0] <= mhz && mhz < w[1])
        .ok_or_else(|| ExposureError::out_of_domain(format!("frequency out of range: {} MHz", mhz)))?;

    let r2 = meters.powi(2);
    let threshold = match band {
        0 => 1920.0 * r2,
        1 => 3450.0 * r2 / mhz.powi(2),
        2 => 3.83 * r2,
        3 => 0.0128 * r2 * mhz,
        _ => 19.2 * r2,
    };
    Ok(threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_near_field(meters: f64, mhz: f64) {
        let err = erp_threshold_w(meters, mhz).unwrap_err();
        assert!(err.is_near_field(), "({}, {}) gave {:?}", meters, mhz, err);
    }

    #[test]
    fn near_field_points_require_evaluation() {
        assert_near_field(0.01, 144.0);
        assert_near_field(0.01, 239.0);
        assert_near_field(3.0, 0.1);
        assert_near_field(3.0, 1.0);
        assert_near_field(4.0, 1.0);
        assert_near_field(5.0, 1.0);
        assert_near_field(6.0, 1.0);
    }

    #[test]
    fn far_points_outside_the_table_are_range_errors() {
        for (m, f) in [(30_000.0, 0.1), (30_000.0, 101_000.0), (30_000.0, 100_000.0)] {
            let err = erp_threshold_w(m, f).unwrap_err();
            assert!(matches!(err, ExposureError::OutOfDomain(_)), "({}, {}) gave {:?}", m, f, err);
        }
        assert!(matches!(erp_threshold_w(1.0, 0.0), Err(ExposureError::OutOfDomain(_))));
        assert!(matches!(erp_threshold_w(1.0, -5.0), Err(ExposureError::OutOfDomain(_))));
    }

    #[test]
    fn non_finite_distances_are_range_errors() {
        for m in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = erp_threshold_w(m, 146.0).unwrap_err();
            assert!(matches!(err, ExposureError::OutOfDomain(_)), "{} m gave {:?}", m, err);
        }
    }

    #[test]
    fn band_formulas() {
        let cases = [
            ((1.0, 239.0), 3.83),
            ((3.0, 20.0), 77.625),
            ((3.0, 50.0), 34.47),
            ((3.0, 100.0), 34.47),
            ((3.0, 10_000.0), 172.8),
            ((50.0, 1.0), 4_800_000.0),
            ((50.0, 100.0), 9575.0),
            ((50.0, 420.0), 13_440.0),
            ((50.0, 2000.0), 48_000.0),
            ((30_000.0, 10_000.0), 17_280_000_000.0),
        ];
        for ((m, f), expected) in cases {
            let got = erp_threshold_w(m, f).unwrap();
            assert!((got - expected).abs() <= 1e-9 * expected, "({}, {}) -> {}", m, f, got);
        }
    }

    #[test]
    fn band_edges_are_half_open() {
        // 30 MHz belongs to the 3.83 r² band, not the 1/f² band
        assert!((erp_threshold_w(20.0, 30.0).unwrap() - 3.83 * 400.0).abs() < 1e-9);
        // 1.34 MHz belongs to the 3450 r²/f² band
        let at_edge = erp_threshold_w(100.0, 1.34).unwrap();
        assert!((at_edge - 3450.0 * 10_000.0 / (1.34 * 1.34)).abs() < 1e-6);
    }
}

//! Physical and regulatory constants plus the fixed unit conversions used by
//! the exposure formulas.
//!
//! Units:
//! - Distance: feet at the public surface, centimeters inside the density
//!   formulas, meters for the ERP exemption method
//! - Power: watts at the feedpoint, milliwatts for EIRP
//! - Frequency: MHz everywhere except the SAR method (GHz)

use std::f64::consts::PI;

/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT_M_PER_S: f64 = 299_792_458.0;

pub const CM_PER_FT: f64 = 30.48;
pub const M_PER_FT: f64 = CM_PER_FT / 100.0;

/// Field enhancement from ground reflections, squared to apply to power density.
/// Source: OET Bulletin 65 pp. 20-21 (EPA 520/6-85-011).
pub const GROUND_REFLECTION_FACTOR: f64 = 1.6 * 1.6;

/// Lower and upper bounds (GHz) of the SAR-based exemption formula.
pub const SAR_MIN_GHZ: f64 = 0.3;
pub const SAR_MAX_GHZ: f64 = 6.0;
/// SAR reference power switches from `2040 * f` to a constant at this frequency.
pub const SAR_FLAT_ERP_GHZ: f64 = 1.5;
pub const SAR_FLAT_ERP_MW: f64 = 3060.0;
/// Distance (cm) beyond which the SAR threshold stops growing.
pub const SAR_REFERENCE_CM: f64 = 20.0;
pub const SAR_MAX_CM: f64 = 40.0;

/// Band cutpoints (MHz) of the ERP exemption table. Bands are `[low, high)`.
pub const ERP_BAND_CUTPOINTS_MHZ: [f64; 6] = [0.3, 1.34, 30.0, 300.0, 1500.0, 100_000.0];

/// Upper frequency bound (MHz, exclusive) of the MPE limit table.
pub const MPE_MAX_MHZ: f64 = 100_000.0;

pub fn feet_to_cm(ft: f64) -> f64 {
    ft * CM_PER_FT
}

pub fn cm_to_feet(cm: f64) -> f64 {
    cm / CM_PER_FT
}

pub fn feet_to_meters(ft: f64) -> f64 {
    ft * M_PER_FT
}

/// Convert an antenna gain in dBi to a linear power ratio.
pub fn dbi_to_linear(dbi: f64) -> f64 {
    10f64.powf(dbi / 10.0)
}

/// Free-space wavelength (m) of a signal at `mhz`.
pub fn wavelength_m(mhz: f64) -> f64 {
    SPEED_OF_LIGHT_M_PER_S / (mhz * 1e6)
}

/// Radius (m) of the reactive near field, `λ / 2π`. Far-field formulas are not
/// valid closer than this.
pub fn near_field_boundary_m(mhz: f64) -> f64 {
    wavelength_m(mhz) / (2.0 * PI)
}

/// Rounding used by the published exemption tables (FCC 19-126 Table 1):
/// below 10 keep one decimal, otherwise round to a whole number.
pub fn round_regulatory(x: f64) -> f64 {
    if x < 10.0 { (x * 10.0).round() / 10.0 } else { x.round() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regulatory_rounding_matches_table_convention() {
        assert_eq!(round_regulatory(39.1234), 39.0);
        assert_eq!(round_regulatory(22.0), 22.0);
        assert_eq!(round_regulatory(2.1234), 2.1);
        assert_eq!(round_regulatory(9.0), 9.0);
        assert_eq!(round_regulatory(9.01234), 9.0);
        assert_eq!(round_regulatory(3060.1234), 3060.0);
    }

    #[test]
    fn foot_conversions_are_consistent() {
        assert!((feet_to_cm(1.0) - 30.48).abs() < 1e-12);
        assert!((feet_to_meters(1.0) - 0.3048).abs() < 1e-12);
        assert!((cm_to_feet(feet_to_cm(6.0)) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn near_field_boundary_scales_inversely_with_frequency() {
        // 300 MHz is very nearly a 1 m wavelength
        assert!((wavelength_m(300.0) - 0.99930819).abs() < 1e-6);
        let b_144 = near_field_boundary_m(144.0);
        let b_288 = near_field_boundary_m(288.0);
        assert!((b_144 / b_288 - 2.0).abs() < 1e-12);
        assert!(b_144 > 0.33 && b_144 < 0.332);
    }

    #[test]
    fn gain_conversion() {
        assert!((dbi_to_linear(0.0) - 1.0).abs() < 1e-12);
        assert!((dbi_to_linear(10.0) - 10.0).abs() < 1e-12);
        assert!((dbi_to_linear(-3.0) - 0.501187).abs() < 1e-6);
    }
}

//! SAR-based exemption threshold (FCC 19-126, p. 23).
//!
//! Only defined for 0.3–6 GHz and separation distances up to 40 cm.

use crate::error::ExposureError;
use crate::units::{SAR_FLAT_ERP_GHZ, SAR_FLAT_ERP_MW, SAR_MAX_CM, SAR_MAX_GHZ, SAR_MIN_GHZ, SAR_REFERENCE_CM};

/// Time-averaged power threshold (mW) for exemption from routine RF exposure
/// evaluation, derived from localized SAR limits.
///
/// # Formula
///
/// ```text
/// ERP20 = 2040 × f           0.3 <= f < 1.5 GHz
///       = 3060               1.5 <= f <= 6 GHz
/// x     = -log10(60 / (ERP20 × √f))
/// P_th  = ERP20 × (d / 20)^x   0 <= d <= 20 cm
///       = ERP20               20 < d <= 40 cm
/// ```
///
/// Note the frequency unit is GHz, unlike the rest of the crate.
///
/// # Errors
///
/// `OutOfDomain` if the frequency or the distance is outside the ranges above.
pub fn sar_threshold_mw(cm: f64, ghz: f64) -> Result<f64, ExposureError> {
    let erp20 = match ghz {
        f if (SAR_MIN_GHZ..SAR_FLAT_ERP_GHZ).contains(&f) => 2040.0 * f,
        f if (SAR_FLAT_ERP_GHZ..=SAR_MAX_GHZ).contains(&f) => SAR_FLAT_ERP_MW,
        f => return Err(ExposureError::out_of_domain(format!("frequency out of range: {} GHz", f))),
    };
    let x = -(60.0 / (erp20 * ghz.sqrt())).log10();
    match cm {
        d if (0.0..=SAR_REFERENCE_CM).contains(&d) => Ok(erp20 * (d / SAR_REFERENCE_CM).powf(x)),
        d if d > SAR_REFERENCE_CM && d <= SAR_MAX_CM => Ok(erp20),
        d => Err(ExposureError::out_of_domain(format!("distance out of range: {} cm", d))),
    }
}

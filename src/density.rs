//! Far-field power density around an isotropic source, and its inverse.
//!
//! Both directions model the radiated power as spread over the surface of a
//! sphere, optionally enhanced by ground reflections.

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::ExposureError;
use crate::units::{GROUND_REFLECTION_FACTOR, cm_to_feet, feet_to_cm};

/// Whether to account for radiation arriving via ground reflections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroundReflections {
    Absent,
    Present,
}

impl GroundReflections {
    /// Factor by which ground reflections increase power density.
    pub fn reflection_constant(self) -> f64 {
        match self {
            GroundReflections::Absent => 1.0,
            GroundReflections::Present => GROUND_REFLECTION_FACTOR,
        }
    }
}

impl From<bool> for GroundReflections {
    fn from(present: bool) -> Self {
        if present { GroundReflections::Present } else { GroundReflections::Absent }
    }
}

/// Parses untyped user input. Anything but a yes/no spelling is rejected
/// rather than being read as truthy.
impl std::str::FromStr for GroundReflections {
    type Err = ExposureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" | "true" => Ok(GroundReflections::Present),
            "n" | "no" | "false" => Ok(GroundReflections::Absent),
            other => Err(ExposureError::out_of_domain(format!("ground_reflections must be boolean: {}", other))),
        }
    }
}

/// Reflection coefficient applied to EIRP: 1 without ground reflections,
/// 1.6² with them.
pub fn reflection_constant(ground_reflections: GroundReflections) -> f64 {
    ground_reflections.reflection_constant()
}

/// Power density (mW/cm²) at `ft` feet from a source of `eirp_mw`.
///
/// ```text
/// S = k × EIRP / (4π × d_cm²)
/// ```
pub fn power_density_mwcm2(eirp_mw: f64, ft: f64, ground_reflections: GroundReflections) -> f64 {
    let cm = feet_to_cm(ft);
    reflection_constant(ground_reflections) * eirp_mw / (4.0 * PI * cm.powi(2))
}

/// Distance (ft) at which the power density falls to `mpe_limit_mwcm2`.
/// Exact inverse of [`power_density_mwcm2`].
pub fn compliant_distance_ft(eirp_mw: f64, mpe_limit_mwcm2: f64, ground_reflections: GroundReflections) -> f64 {
    let cm = (reflection_constant(ground_reflections) * eirp_mw / (4.0 * PI * mpe_limit_mwcm2)).sqrt();
    cm_to_feet(cm)
}

//! Exemption from formal RF exposure evaluation.
//!
//! Two independently derived criteria exist:
//! - `sar`: localized SAR based threshold, close range (<= 40 cm) and 0.3–6 GHz
//! - `erp`: MPE based ERP threshold, far field only, 0.3 MHz–100 GHz
//!
//! A transmitter only has to satisfy the more generous criterion that applies,
//! so where both are defined the larger threshold is used.

pub mod erp;
pub mod sar;

use log::debug;
use serde::Serialize;

use crate::error::ExposureError;

pub use erp::erp_threshold_w;
pub use sar::sar_threshold_mw;

/// Which criterion produced an exemption threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExemptionMethod {
    /// Only the SAR method applied.
    #[serde(rename = "SAR")]
    Sar,
    /// Only the MPE/ERP method applied.
    #[serde(rename = "MPE")]
    Mpe,
    /// Both applied and SAR gave the larger threshold.
    #[serde(rename = "SAR wins")]
    SarWins,
    /// Both applied and MPE gave the larger (or equal) threshold.
    #[serde(rename = "MPE wins")]
    MpeWins,
}

impl ExemptionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExemptionMethod::Sar => "SAR",
            ExemptionMethod::Mpe => "MPE",
            ExemptionMethod::SarWins => "SAR wins",
            ExemptionMethod::MpeWins => "MPE wins",
        }
    }
}

impl std::fmt::Display for ExemptionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExemptionThreshold {
    pub watts: f64,
    pub method: ExemptionMethod,
}

/// Find the least restrictive applicable exemption threshold (W).
///
/// SAR is tried with the distance in cm and the frequency in GHz, the ERP
/// method with meters and MHz. The outcome by case:
///
/// | SAR | ERP | result |
/// |-----|-----|--------|
/// | out of domain | ok / any error | ERP result (`MPE`), its error propagated |
/// | ok | out of domain or near field | SAR threshold (`SAR`) |
/// | ok | ok | larger of the two (`SAR wins` / `MPE wins`) |
///
/// A near-field ERP result only propagates when SAR does not apply: the SAR
/// method is the one defined for separations that small.
pub fn best_exemption_threshold(meters: f64, mhz: f64) -> Result<ExemptionThreshold, ExposureError> {
    let sar = sar_threshold_mw(meters * 100.0, mhz / 1000.0).map(|mw| mw / 1000.0);
    let erp = erp_threshold_w(meters, mhz);

    let threshold = match (sar, erp) {
        (Err(_), erp) => ExemptionThreshold {
            watts: erp?,
            method: ExemptionMethod::Mpe,
        },
        (Ok(sar_w), Err(_)) => ExemptionThreshold {
            watts: sar_w,
            method: ExemptionMethod::Sar,
        },
        (Ok(sar_w), Ok(erp_w)) if sar_w > erp_w => ExemptionThreshold {
            watts: sar_w,
            method: ExemptionMethod::SarWins,
        },
        (Ok(_), Ok(erp_w)) => ExemptionThreshold {
            watts: erp_w,
            method: ExemptionMethod::MpeWins,
        },
    };
    debug!(
        "Exemption threshold at {} m, {} MHz: {} W ({})",
        meters, mhz, threshold.watts, threshold.method
    );
    Ok(threshold)
}

/// Why a power level is or is not exempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExemptionBasis {
    Method(ExemptionMethod),
    /// Inside the near field, formal evaluation is mandatory.
    NearField,
}

impl std::fmt::Display for ExemptionBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExemptionBasis::Method(method) => write!(f, "{}", method),
            ExemptionBasis::NearField => f.write_str("nearfield"),
        }
    }
}

impl Serialize for ExemptionBasis {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Exemption {
    pub exempt: bool,
    pub basis: ExemptionBasis,
    /// Threshold compared against; absent in the near field.
    pub threshold_watts: Option<f64>,
}

/// Determine whether `watts` at `meters` and `mhz` is exempt from RF
/// evaluation. This is not an RF evaluation itself.
///
/// A near-field result is a valid outcome (`exempt == false`, basis
/// `nearfield`). A frequency outside every table is returned as an error.
pub fn is_exempt(watts: f64, meters: f64, mhz: f64) -> Result<Exemption, ExposureError> {
    match best_exemption_threshold(meters, mhz) {
        Ok(threshold) => Ok(Exemption {
            exempt: watts < threshold.watts,
            basis: ExemptionBasis::Method(threshold.method),
            threshold_watts: Some(threshold.watts),
        }),
        Err(e) if e.is_near_field() => {
            debug!("No exemption at {} m, {} MHz: {}", meters, mhz, e);
            Ok(Exemption {
                exempt: false,
                basis: ExemptionBasis::NearField,
                threshold_watts: None,
            })
        }
        Err(e) => Err(e),
    }
}

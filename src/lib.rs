//! RF exposure compliance calculations for radio transmitters.
//!
//! Follows FCC OET Bulletin 65 (maximum permissible exposure and far-field
//! power density) and FCC 19-126 (exemption thresholds). Adapted from the
//! public domain BASIC program by Wayne Overbeck N6NB and the W4/VP9KF power
//! density calculator.
//!
//! ## Module Organization
//!
//! - `units`: physical/regulatory constants and conversions
//! - `antenna`: transmitter configuration and EIRP
//! - `density`: power density at a distance and its inverse
//! - `mpe`: frequency banded MPE limits
//! - `exemption`: SAR and MPE/ERP exemption thresholds and their reconciliation
//! - `evaluation`: full RF evaluation report and the compliance decision
//!
//! Every function is a pure computation over its arguments.

pub mod antenna;
pub mod density;
pub mod error;
pub mod evaluation;
pub mod exemption;
pub mod mpe;
pub mod units;

pub use antenna::{EmissionMode, PoweredAntenna, effective_isotropic_radiated_power};
pub use density::{GroundReflections, compliant_distance_ft, power_density_mwcm2, reflection_constant};
pub use error::ExposureError;
pub use evaluation::{ComplianceBasis, ComplianceDecision, RfEvaluationReport, build_report, is_compliant};
pub use exemption::{
    Exemption, ExemptionBasis, ExemptionMethod, ExemptionThreshold, best_exemption_threshold, erp_threshold_w,
    is_exempt, sar_threshold_mw,
};
pub use mpe::{Environment, MpeLimits, mpe_limits};

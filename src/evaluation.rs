//! RF evaluation of an antenna/mode setup and the overall compliance decision.

use log::debug;
use serde::Serialize;

use crate::antenna::PoweredAntenna;
use crate::density::{GroundReflections, compliant_distance_ft, power_density_mwcm2};
use crate::error::ExposureError;
use crate::exemption::{ExemptionBasis, ExemptionMethod, is_exempt};
use crate::mpe::{Environment, mpe_limits};
use crate::units::feet_to_meters;

/// Result of an RF evaluation: power density at the area of interest, the
/// allowed power density, and compliant distances for both environments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfEvaluationReport {
    pub antenna: PoweredAntenna,
    /// Distance from the center of the antenna to the area of interest (ft).
    pub ft: f64,
    pub mhz: f64,
    pub ground_reflections: GroundReflections,
    pub eirp_mw: f64,
    /// mW/cm²
    pub power_density: f64,
    /// MPE limits, mW/cm²
    pub mpe_controlled: f64,
    pub mpe_uncontrolled: f64,
    /// Compliant distances, ft
    pub ft_controlled: f64,
    pub ft_uncontrolled: f64,
    pub compliant_controlled: bool,
    pub compliant_uncontrolled: bool,
}

impl RfEvaluationReport {
    pub fn mpe_limit(&self, environment: Environment) -> f64 {
        match environment {
            Environment::Controlled => self.mpe_controlled,
            Environment::Uncontrolled => self.mpe_uncontrolled,
        }
    }

    pub fn compliant_distance_ft(&self, environment: Environment) -> f64 {
        match environment {
            Environment::Controlled => self.ft_controlled,
            Environment::Uncontrolled => self.ft_uncontrolled,
        }
    }

    pub fn is_compliant(&self, environment: Environment) -> bool {
        match environment {
            Environment::Controlled => self.compliant_controlled,
            Environment::Uncontrolled => self.compliant_uncontrolled,
        }
    }
}

impl std::fmt::Display for RfEvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Power density (mW/cm^2): {}", self.power_density)?;
        writeln!(f, "MPE controlled (mW/cm^2): {}", self.mpe_controlled)?;
        writeln!(f, "MPE uncontrolled (mW/cm^2): {}", self.mpe_uncontrolled)?;
        writeln!(f, "Distance controlled (ft): {}", self.ft_controlled)?;
        writeln!(f, "Distance uncontrolled (ft): {}", self.ft_uncontrolled)?;
        writeln!(f, "Compliant controlled: {}", self.compliant_controlled)?;
        write!(f, "Compliant uncontrolled: {}", self.compliant_uncontrolled)
    }
}

/// Evaluate `antenna` at `ft` feet and `mhz`.
///
/// # Errors
///
/// `OutOfDomain` if `mhz` is not covered by the MPE table.
pub fn build_report(
    antenna: &PoweredAntenna,
    ft: f64,
    mhz: f64,
    ground_reflections: GroundReflections,
) -> Result<RfEvaluationReport, ExposureError> {
    let eirp_mw = antenna.eirp_mw();
    let power_density = power_density_mwcm2(eirp_mw, ft, ground_reflections);
    let limits = mpe_limits(mhz)?;
    let report = RfEvaluationReport {
        antenna: antenna.clone(),
        ft,
        mhz,
        ground_reflections,
        eirp_mw,
        power_density,
        mpe_controlled: limits.controlled,
        mpe_uncontrolled: limits.uncontrolled,
        ft_controlled: compliant_distance_ft(eirp_mw, limits.controlled, ground_reflections),
        ft_uncontrolled: compliant_distance_ft(eirp_mw, limits.uncontrolled, ground_reflections),
        compliant_controlled: power_density < limits.controlled,
        compliant_uncontrolled: power_density < limits.uncontrolled,
    };
    debug!(
        "Evaluated {} mW EIRP at {} ft, {} MHz: {} mW/cm^2",
        eirp_mw, ft, mhz, power_density
    );
    Ok(report)
}

/// How a compliance decision was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceBasis {
    /// Exempt from evaluation by the given method.
    Exempt(ExemptionMethod),
    /// Not exempt; decided by a full power density evaluation.
    Evaluation,
}

impl std::fmt::Display for ComplianceBasis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceBasis::Exempt(method) => write!(f, "{}", method),
            ComplianceBasis::Evaluation => f.write_str("evaluation"),
        }
    }
}

impl Serialize for ComplianceBasis {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceDecision {
    pub compliant: bool,
    pub basis: ComplianceBasis,
}

/// Decide whether a combination of antenna, power, frequency and distance is
/// compliant, trying exemption first and falling back to a full evaluation.
///
/// The exemption test compares the raw feedpoint watts against the threshold,
/// without duty or time averaging and without gain. That mirrors long-standing
/// practice of this calculator; whether ERP or EIRP should be used instead is
/// unresolved.
///
/// # Errors
///
/// `OutOfDomain` if the frequency is outside the exemption and MPE tables.
pub fn is_compliant(
    antenna: &PoweredAntenna,
    ft: f64,
    mhz: f64,
    ground_reflections: GroundReflections,
    environment: Environment,
) -> Result<ComplianceDecision, ExposureError> {
    let exemption = is_exempt(antenna.watts(), feet_to_meters(ft), mhz)?;
    if let (true, ExemptionBasis::Method(method)) = (exemption.exempt, exemption.basis) {
        return Ok(ComplianceDecision {
            compliant: true,
            basis: ComplianceBasis::Exempt(method),
        });
    }
    let report = build_report(antenna, ft, mhz, ground_reflections)?;
    Ok(ComplianceDecision {
        compliant: report.is_compliant(environment),
        basis: ComplianceBasis::Evaluation,
    })
}

//! Error type shared by every exposure calculation.

/// Failure of an exposure calculation.
///
/// `OutOfDomain` means an input lies outside the range a formula is defined
/// for. `NearFieldRequiresEvaluation` is not bad input: the observation point
/// sits inside the near field, so formula-based exemption does not apply and a
/// formal evaluation is mandatory.
#[derive(Debug, Clone, PartialEq)]
pub enum ExposureError {
    OutOfDomain(String),
    NearFieldRequiresEvaluation { distance_m: f64, boundary_m: f64 },
}

impl ExposureError {
    pub(crate) fn out_of_domain(msg: impl Into<String>) -> Self {
        ExposureError::OutOfDomain(msg.into())
    }

    pub fn is_near_field(&self) -> bool {
        matches!(self, ExposureError::NearFieldRequiresEvaluation { .. })
    }
}

impl std::fmt::Display for ExposureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExposureError::OutOfDomain(msg) => write!(f, "Out of range: {}", msg),
            ExposureError::NearFieldRequiresEvaluation { distance_m, boundary_m } => {
                write!(f, "R < L/2pi ({} < {:.0} m). RF evaluation required.", distance_m, boundary_m)
            }
        }
    }
}

impl std::error::Error for ExposureError {}

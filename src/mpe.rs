//! Maximum permissible exposure limits by frequency (OET Bulletin 65, Table 1).

use serde::{Deserialize, Serialize};

use crate::error::ExposureError;
use crate::units::MPE_MAX_MHZ;

/// Exposure environment of the area of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    /// Occupational exposure, people aware of and able to control it.
    Controlled,
    /// General public.
    Uncontrolled,
}

impl Environment {
    /// Averaging window (minutes) recommended for time-averaged power.
    pub fn averaging_window_minutes(&self) -> u32 {
        match self {
            Environment::Controlled => 6,
            Environment::Uncontrolled => 30,
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = ExposureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "controlled" | "occupational" => Ok(Environment::Controlled),
            "uncontrolled" | "public" => Ok(Environment::Uncontrolled),
            other => Err(ExposureError::out_of_domain(format!("unknown environment: {}", other))),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Controlled => write!(f, "controlled"),
            Environment::Uncontrolled => write!(f, "uncontrolled"),
        }
    }
}

/// Power density limits (mW/cm²) for both environments at one frequency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MpeLimits {
    pub controlled: f64,
    pub uncontrolled: f64,
}

impl MpeLimits {
    pub fn for_environment(&self, environment: Environment) -> f64 {
        match environment {
            Environment::Controlled => self.controlled,
            Environment::Uncontrolled => self.uncontrolled,
        }
    }
}

/// Look up the MPE limits for `mhz`.
///
/// Bands are half-open and the limits are discontinuous across most
/// boundaries:
///
/// ```text
/// (0, 1.34]       100          100
/// (1.34, 3)       100          180/f²
/// [3, 30)         900/f²       180/f²
/// [30, 300)       1.0          0.2
/// [300, 1500)     f/300        f/1500
/// [1500, 100000)  5.0          1.0
/// ```
///
/// # Errors
///
/// `OutOfDomain` for `mhz <= 0`, `mhz >= 100000` or NaN.
pub fn mpe_limits(mhz: f64) -> Result<MpeLimits, ExposureError> {
    let (controlled, uncontrolled) = match mhz {
        f if f > 0.0 && f <= 1.34 => (100.0, 100.0),
        f if f > 1.34 && f < 3.0 => (100.0, 180.0 / f.powi(2)),
        f if (3.0..30.0).contains(&f) => (900.0 / f.powi(2), 180.0 / f.powi(2)),
        f if (30.0..300.0).contains(&f) => (1.0, 0.2),
        f if (300.0..1500.0).contains(&f) => (f / 300.0, f / 1500.0),
        f if (1500.0..MPE_MAX_MHZ).contains(&f) => (5.0, 1.0),
        f => return Err(ExposureError::out_of_domain(format!("frequency out of range: {} MHz", f))),
    };
    Ok(MpeLimits { controlled, uncontrolled })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(mhz: f64) -> (f64, f64) {
        let l = mpe_limits(mhz).unwrap();
        (l.controlled, l.uncontrolled)
    }

    #[test]
    fn boundary_values_are_exact() {
        assert_eq!(limits(1.34), (100.0, 100.0));
        assert_eq!(limits(40.0), (1.0, 0.2));
        assert_eq!(limits(3000.0), (5.0, 1.0));
        assert_eq!(limits(30.0), (1.0, 0.2));
        assert_eq!(limits(1500.0), (5.0, 1.0));
        assert_eq!(limits(300.0), (1.0, 0.2));
    }

    #[test]
    fn band_formulas() {
        let (c, u) = limits(2.0);
        assert_eq!(c, 100.0);
        assert!((u - 45.0).abs() < 1e-12);

        let (c, u) = limits(3.0);
        assert!((c - 100.0).abs() < 1e-12);
        assert!((u - 20.0).abs() < 1e-12);

        let (c, _) = limits(7.05);
        assert!((c - 18.107741059302853).abs() < 1e-9);

        let (c, u) = limits(420.0);
        assert!((c - 1.4).abs() < 1e-12);
        assert!((u - 0.28).abs() < 1e-12);
    }

    #[test]
    fn discontinuities_are_not_smoothed() {
        // Just below 30 MHz the limits are ~1.0 / ~0.2 but not the flat values
        let (c, u) = limits(29.999);
        assert!(c > 1.0 && u > 0.2);
        // 1500 MHz: f/300 would give 5.0 but f/1500 gives 1.0; just below is lower
        let (c, u) = limits(1499.0);
        assert!(c < 5.0 && u < 1.0);
    }

    #[test]
    fn out_of_range_frequencies_fail() {
        for mhz in [0.0, -1.0, 100_000.0, 101_000.0, f64::NAN] {
            let err = mpe_limits(mhz).unwrap_err();
            assert!(matches!(err, ExposureError::OutOfDomain(_)));
        }
    }

    #[test]
    fn environment_selects_limit() {
        let l = mpe_limits(100.0).unwrap();
        assert_eq!(l.for_environment(Environment::Controlled), 1.0);
        assert_eq!(l.for_environment(Environment::Uncontrolled), 0.2);
        assert_eq!("public".parse::<Environment>().unwrap(), Environment::Uncontrolled);
        assert_eq!(Environment::Controlled.averaging_window_minutes(), 6);
        assert!("outdoors".parse::<Environment>().is_err());
    }
}

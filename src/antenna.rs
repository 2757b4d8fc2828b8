//! Transmitter/antenna configuration and effective isotropic radiated power.

use serde::Serialize;

use crate::error::ExposureError;
use crate::units::dbi_to_linear;

/// Typical duty factors for common amateur emission modes.
///
/// Values follow the guidance published alongside the W4/VP9KF power density
/// calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionMode {
    /// Conversational SSB without speech processing.
    Ssb,
    /// Conversational SSB with speech processing.
    SsbProcessed,
    Fm,
    FskRtty,
    Afsk,
    Ft8,
    /// Conversational CW.
    Cw,
    Carrier,
}

impl EmissionMode {
    pub fn duty_percent(&self) -> f64 {
        match self {
            EmissionMode::Ssb => 20.0,
            EmissionMode::SsbProcessed => 40.0,
            EmissionMode::Fm => 100.0,
            EmissionMode::FskRtty => 100.0,
            EmissionMode::Afsk => 100.0,
            EmissionMode::Ft8 => 50.0,
            EmissionMode::Cw => 40.0,
            EmissionMode::Carrier => 100.0,
        }
    }
}

impl std::str::FromStr for EmissionMode {
    type Err = ExposureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ssb" => Ok(EmissionMode::Ssb),
            "ssb-processed" => Ok(EmissionMode::SsbProcessed),
            "fm" => Ok(EmissionMode::Fm),
            "fsk" | "rtty" => Ok(EmissionMode::FskRtty),
            "afsk" => Ok(EmissionMode::Afsk),
            "ft8" | "ft4" => Ok(EmissionMode::Ft8),
            "cw" => Ok(EmissionMode::Cw),
            "carrier" => Ok(EmissionMode::Carrier),
            other => Err(ExposureError::out_of_domain(format!("unknown emission mode: {}", other))),
        }
    }
}

/// Calculate EIRP from feedpoint power, accounting for antenna gain and for
/// time averaging of usage and mode.
///
/// # Formula
///
/// ```text
/// avg_mW = 1000 × W × (t_average / 100) × (duty / 100)
/// EIRP   = avg_mW × 10^(dBi / 10)
/// ```
///
/// # Returns
///
/// EIRP in milliwatts (note the change of unit from the watts input). The value
/// is not rounded.
///
/// # Errors
///
/// `OutOfDomain` if `t_average_percent` or `duty_percent` is not within 0..=100.
pub fn effective_isotropic_radiated_power(
    feed_watts: f64,
    t_average_percent: f64,
    duty_percent: f64,
    gain_dbi: f64,
) -> Result<f64, ExposureError> {
    let valid = |p: f64| (0.0..=100.0).contains(&p);
    if !(valid(t_average_percent) && valid(duty_percent)) {
        return Err(ExposureError::out_of_domain(format!(
            "t_average / duty out of range: {} / {}",
            t_average_percent, duty_percent
        )));
    }
    let milliwatts_average = 1000.0 * feed_watts * (t_average_percent / 100.0) * (duty_percent / 100.0);
    Ok(milliwatts_average * dbi_to_linear(gain_dbi))
}

/// An antenna with a certain gain and operating characteristics, fed with a
/// certain power. Immutable once built; EIRP is computed on construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoweredAntenna {
    /// Power at the antenna feedpoint (after feedline loss), watts.
    watts: f64,
    /// Share of the averaging window spent transmitting, 0..=100.
    t_average: f64,
    /// Share of keyed time actually radiating (mode dependent), 0..=100.
    duty: f64,
    /// Gain relative to isotropic, dB.
    dbi: f64,
    eirp_mw: f64,
}

impl PoweredAntenna {
    pub fn new(watts: f64, t_average: f64, duty: f64, dbi: f64) -> Result<Self, ExposureError> {
        let eirp_mw = effective_isotropic_radiated_power(watts, t_average, duty, dbi)?;
        Ok(Self {
            watts,
            t_average,
            duty,
            dbi,
            eirp_mw,
        })
    }

    /// Build a configuration whose duty factor comes from an emission mode preset.
    pub fn with_mode(watts: f64, t_average: f64, mode: EmissionMode, dbi: f64) -> Result<Self, ExposureError> {
        Self::new(watts, t_average, mode.duty_percent(), dbi)
    }

    pub fn watts(&self) -> f64 {
        self.watts
    }

    pub fn t_average(&self) -> f64 {
        self.t_average
    }

    pub fn duty(&self) -> f64 {
        self.duty
    }

    pub fn dbi(&self) -> f64 {
        self.dbi
    }

    pub fn eirp_mw(&self) -> f64 {
        self.eirp_mw
    }
}

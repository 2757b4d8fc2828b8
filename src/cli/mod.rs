//! Command-line front end. Parses arguments, calls the calculation library and
//! prints its results; no exposure logic lives here.

pub mod scenario;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use rf_exposure::units::{feet_to_meters, round_regulatory};
use rf_exposure::{
    EmissionMode, Environment, GroundReflections, PoweredAntenna, RfEvaluationReport, build_report, is_compliant,
    is_exempt,
};
use std::path::PathBuf;

use scenario::Scenario;

#[derive(Parser)]
#[command(name = "rf-exposure")]
#[command(about = "RF exposure evaluation and exemption checks (OET-65 / FCC 19-126)", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Power density, MPE limits and compliant distances for one or more frequencies
    Report(ReportArgs),
    /// Check whether a power level is exempt from RF evaluation
    Exempt(ExemptArgs),
    /// Overall compliance decision (exemption first, then evaluation)
    Check(CheckArgs),
    /// Evaluate a station described in a TOML scenario file
    Scenario(ScenarioArgs),
}

#[derive(Args)]
pub struct AntennaArgs {
    /// Power at the antenna feedpoint, after feedline loss (W)
    #[arg(long)]
    watts: f64,

    /// Share of the averaging window spent transmitting (0-100)
    #[arg(long, default_value_t = 100.0)]
    t_average: f64,

    /// Share of keyed time actually radiating (0-100)
    #[arg(long, conflicts_with = "mode", required_unless_present = "mode")]
    duty: Option<f64>,

    /// Emission mode preset for the duty factor (ssb, ssb-processed, fm, rtty, afsk, ft8, cw, carrier)
    #[arg(long)]
    mode: Option<EmissionMode>,

    /// Antenna gain relative to isotropic (dBi)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    dbi: f64,
}

impl AntennaArgs {
    fn powered_antenna(&self) -> Result<PoweredAntenna> {
        let antenna = match (self.mode, self.duty) {
            (Some(mode), _) => PoweredAntenna::with_mode(self.watts, self.t_average, mode, self.dbi),
            (None, Some(duty)) => PoweredAntenna::new(self.watts, self.t_average, duty, self.dbi),
            (None, None) => anyhow::bail!("either --duty or --mode is required"),
        };
        antenna.context("Invalid antenna configuration")
    }
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    antenna: AntennaArgs,

    /// Distance from the antenna to the area of interest (ft)
    #[arg(long, value_parser = parse_distance_ft, allow_negative_numbers = true)]
    ft: f64,

    /// Frequency (MHz); repeat for several frequencies
    #[arg(long, required = true)]
    mhz: Vec<f64>,

    /// Account for ground reflections (y/n)
    #[arg(long, default_value = "n")]
    ground_reflections: GroundReflections,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct ExemptArgs {
    /// Transmitter power (W)
    #[arg(long)]
    watts: f64,

    /// Distance from the antenna to the person (m)
    #[arg(long)]
    meters: f64,

    /// Frequency (MHz)
    #[arg(long)]
    mhz: f64,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    antenna: AntennaArgs,

    /// Distance from the antenna to the area of interest (ft)
    #[arg(long, value_parser = parse_distance_ft, allow_negative_numbers = true)]
    ft: f64,

    /// Frequency (MHz)
    #[arg(long)]
    mhz: f64,

    /// Account for ground reflections (y/n)
    #[arg(long, default_value = "n")]
    ground_reflections: GroundReflections,

    /// controlled (occupational) or uncontrolled (public)
    #[arg(long, default_value = "uncontrolled")]
    environment: Environment,
}

/// Distances to the area of interest must be positive and finite.
pub(crate) fn check_distance_ft(ft: f64) -> Result<f64> {
    if !ft.is_finite() || ft <= 0.0 {
        anyhow::bail!("distance must be a positive number of feet, got {}", ft);
    }
    Ok(ft)
}

fn parse_distance_ft(s: &str) -> Result<f64, String> {
    let ft: f64 = s.parse().map_err(|e| format!("{}", e))?;
    check_distance_ft(ft).map_err(|e| e.to_string())
}

#[derive(Args)]
pub struct ScenarioArgs {
    /// Path to the scenario TOML file
    file: PathBuf,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report(args) => run_report(args),
        Commands::Exempt(args) => run_exempt(args),
        Commands::Check(args) => run_check(args),
        Commands::Scenario(args) => run_scenario(args),
    }
}

fn build_reports(
    antenna: &PoweredAntenna,
    ft: f64,
    frequencies: &[f64],
    ground_reflections: GroundReflections,
) -> Result<Vec<RfEvaluationReport>> {
    frequencies
        .iter()
        .map(|&mhz| build_report(antenna, ft, mhz, ground_reflections).with_context(|| format!("Evaluation at {} MHz failed", mhz)))
        .collect()
}

fn print_reports(reports: &[RfEvaluationReport]) {
    for report in reports {
        println!("{} MHz", report.mhz);
        println!("{}", report);
        println!();
    }
}

fn run_report(args: ReportArgs) -> Result<()> {
    let antenna = args.antenna.powered_antenna()?;
    info!("EIRP: {} mW", antenna.eirp_mw());
    let reports = build_reports(&antenna, args.ft, &args.mhz, args.ground_reflections)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports);
    }
    Ok(())
}

fn run_exempt(args: ExemptArgs) -> Result<()> {
    let exemption = is_exempt(args.watts, args.meters, args.mhz)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&exemption)?);
        return Ok(());
    }
    let verdict = if exemption.exempt { "exempt" } else { "not exempt" };
    match exemption.threshold_watts {
        Some(threshold) => println!("{} ({}, threshold {} W)", verdict, exemption.basis, round_regulatory(threshold)),
        None => println!("{} ({}, RF evaluation required)", verdict, exemption.basis),
    }
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let antenna = args.antenna.powered_antenna()?;
    let decision = is_compliant(&antenna, args.ft, args.mhz, args.ground_reflections, args.environment)?;
    let verdict = if decision.compliant { "compliant" } else { "not compliant" };
    println!("{} ({}, {})", verdict, args.environment, decision.basis);
    Ok(())
}

fn run_scenario(args: ScenarioArgs) -> Result<()> {
    let scenario = Scenario::load(&args.file)?;
    let antenna = scenario.powered_antenna()?;
    let ground_reflections = scenario.ground_reflections();
    info!(
        "Loaded scenario {:?}: {} frequencies at {} ft ({} m)",
        args.file,
        scenario.frequencies_mhz.len(),
        scenario.distance_ft,
        feet_to_meters(scenario.distance_ft)
    );

    let reports = build_reports(&antenna, scenario.distance_ft, &scenario.frequencies_mhz, ground_reflections)?;
    let decisions = scenario
        .frequencies_mhz
        .iter()
        .map(|&mhz| is_compliant(&antenna, scenario.distance_ft, mhz, ground_reflections, scenario.environment))
        .collect::<Result<Vec<_>, _>>()?;

    if args.json {
        let rows: Vec<_> = reports
            .iter()
            .zip(&decisions)
            .map(|(report, decision)| serde_json::json!({ "report": report, "decision": decision }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "Environment: {} ({} minute averaging)",
        scenario.environment,
        scenario.environment.averaging_window_minutes()
    );
    println!();
    for (report, decision) in reports.iter().zip(&decisions) {
        println!("{} MHz", report.mhz);
        println!("{}", report);
        let verdict = if decision.compliant { "compliant" } else { "not compliant" };
        println!("Decision: {} ({})", verdict, decision.basis);
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_command() {
        let cli = Cli::try_parse_from([
            "rf-exposure",
            "report",
            "--watts",
            "100",
            "--mode",
            "cw",
            "--dbi",
            "2.2",
            "--ft",
            "6",
            "--mhz",
            "7.05",
            "--mhz",
            "14.05",
            "--ground-reflections",
            "y",
        ])
        .unwrap();
        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.mhz, vec![7.05, 14.05]);
        assert_eq!(args.ground_reflections, GroundReflections::Present);
        let antenna = args.antenna.powered_antenna().unwrap();
        assert_eq!(antenna.duty(), 40.0);
    }

    #[test]
    fn rejects_non_boolean_ground_reflections() {
        let res = Cli::try_parse_from([
            "rf-exposure",
            "check",
            "--watts",
            "5",
            "--duty",
            "100",
            "--ft",
            "1",
            "--mhz",
            "420",
            "--ground-reflections",
            "42",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn duty_and_mode_are_exclusive() {
        let res = Cli::try_parse_from([
            "rf-exposure", "check", "--watts", "5", "--duty", "100", "--mode", "fm", "--ft", "1", "--mhz", "420",
        ]);
        assert!(res.is_err());
        let res = Cli::try_parse_from(["rf-exposure", "check", "--watts", "5", "--ft", "1", "--mhz", "420"]);
        assert!(res.is_err());
    }

    #[test]
    fn negative_gain_is_accepted() {
        let cli = Cli::try_parse_from([
            "rf-exposure", "check", "--watts", "5", "--duty", "100", "--dbi", "-3", "--ft", "1", "--mhz", "420",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert_eq!(args.environment, Environment::Uncontrolled);
        assert!(args.antenna.powered_antenna().unwrap().eirp_mw() < 5000.0);
    }

    #[test]
    fn invalid_percentages_surface_as_errors() {
        let cli = Cli::try_parse_from([
            "rf-exposure", "check", "--watts", "5", "--duty", "120", "--ft", "1", "--mhz", "420",
        ])
        .unwrap();
        let Commands::Check(args) = cli.command else {
            panic!("expected check command");
        };
        assert!(args.antenna.powered_antenna().is_err());
    }

    #[test]
    fn distance_must_be_positive() {
        for ft in ["0", "-2", "NaN", "inf"] {
            let res = Cli::try_parse_from([
                "rf-exposure", "check", "--watts", "5", "--duty", "100", "--ft", ft, "--mhz", "420",
            ]);
            assert!(res.is_err(), "check accepted --ft {}", ft);
            let res = Cli::try_parse_from([
                "rf-exposure", "report", "--watts", "5", "--duty", "100", "--ft", ft, "--mhz", "420",
            ]);
            assert!(res.is_err(), "report accepted --ft {}", ft);
        }
        let cli = Cli::try_parse_from([
            "rf-exposure", "report", "--watts", "5", "--duty", "100", "--ft", "0.5", "--mhz", "420",
        ])
        .unwrap();
        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.ft, 0.5);
    }
}

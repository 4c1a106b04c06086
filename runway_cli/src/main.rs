//! # Runway CLI
//!
//! Command-line front end for the crane runway girder engine.
//!
//! ```text
//! runway template --format toml > girder.toml
//! runway design --input girder.toml
//! runway check --input girder.json --json
//! ```

mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use runway_core::loads::DesignMethod;
use runway_core::materials::SteelGrade;
use runway_core::section::SectionCandidate;
use runway_core::{calculate, DesignReport, RunwayBeamInput};

use config::{load_input, render_input, CliError, Format, Result};

#[derive(Parser)]
#[command(name = "runway")]
#[command(about = "Crane runway girder design per AISC 360-16 / CMAA 70", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log optimizer iterations (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Size a welded plate girder with the optimizer
    Design {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Check the section given in the input file
    Check {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Print a default input document
    Template {
        #[arg(long, value_enum, default_value_t = Format::Toml)]
        format: Format,
    },
}

#[derive(clap::Args)]
struct RunArgs {
    /// Input file (.json or .toml)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Override the design method from the input
    #[arg(long, value_enum)]
    method: Option<MethodArg>,

    /// Override the steel grade (A36, A572-50, A992, A913-65)
    #[arg(long)]
    grade: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Lrfd,
    Asd,
}

impl From<MethodArg> for DesignMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Lrfd => DesignMethod::Lrfd,
            MethodArg::Asd => DesignMethod::Asd,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    runway_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let outcome = match cli.command {
        Commands::Design { run } => cmd_run(run, false),
        Commands::Check { run } => cmd_run(run, true),
        Commands::Template { format } => cmd_template(format),
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let CliError::Calc(calc) = &e {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!();
                    eprintln!("Error JSON:");
                    eprintln!("{}", json);
                }
            }
            ExitCode::from(2)
        }
    }
}

fn cmd_run(args: RunArgs, check_only: bool) -> Result<ExitCode> {
    let mut input = match &args.input {
        Some(path) => load_input(path)?,
        None => RunwayBeamInput::default(),
    };
    apply_overrides(&mut input, &args)?;
    if check_only {
        if input.section.is_none() {
            tracing::info!("no section in input, checking the optimizer's initial section");
            input.section = Some(SectionCandidate::BuiltUp(input.optimizer.initial));
        }
    } else {
        input.section = None;
    }

    let report = calculate(&input)?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
    }

    Ok(if report.passes() { ExitCode::SUCCESS } else { ExitCode::from(1) })
}

/// Command-line flags win over the input file
fn apply_overrides(input: &mut RunwayBeamInput, args: &RunArgs) -> Result<()> {
    if let Some(method) = args.method {
        input.design_method = method.into();
    }
    if let Some(grade) = &args.grade {
        input.material = SteelGrade::from_str_flexible(grade)?;
    }
    Ok(())
}

fn cmd_template(format: Format) -> Result<ExitCode> {
    println!("{}", render_input(&RunwayBeamInput::default(), format)?);
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &DesignReport) {
    let p = &report.properties;
    let f = &report.forces;

    println!("═══════════════════════════════════════════════════════════");
    println!("  CRANE RUNWAY GIRDER - {}", report.label);
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("Section:  {}", report.section.label());
    println!("Steel:    {} (Fy = {:.0} MPa)", report.grade, report.grade.properties().fy().value());
    println!("Method:   {}", report.method.display_name());
    println!("Outcome:  {} ({} iteration(s))", report.outcome.display_name(), report.iterations);
    println!();
    println!("Properties:");
    println!("  d  = {:.0} mm   A  = {:.0} mm²   mass = {:.1} kg/m", p.depth_mm, p.area_mm2, p.mass_kg_per_m);
    println!("  Ix = {:.4e} mm⁴   Sx = {:.4e} mm³   Zx = {:.4e} mm³", p.ix_mm4, p.sx_mm3, p.zx_mm3);
    println!("  Iy = {:.4e} mm⁴   ry = {:.1} mm   rts = {:.1} mm", p.iy_mm4, p.ry_mm, p.rts_mm);
    println!(
        "  Flange {}, web {} ({})",
        p.classification.flange.display_name(),
        p.classification.web.display_name(),
        p.flexural_form.code_reference()
    );
    println!();
    println!("Crane forces (per wheel):");
    println!("  Static  {:.1} kN   with impact {:.1} kN", f.static_wheel_load_n / 1000.0, f.vertical_wheel_load_n / 1000.0);
    println!("  Lateral {:.2} kN   longitudinal {:.2} kN (total)", f.lateral_wheel_load_n / 1000.0, f.longitudinal_force_n / 1000.0);
    println!();
    println!("Support reaction:");
    println!(
        "  Design {:.1} kN   crane {:.1} kN (static {:.1} kN)   dead {:.1} kN",
        report.reaction.design_n / 1000.0,
        report.reaction.crane_n / 1000.0,
        report.reaction.crane_static_n / 1000.0,
        report.reaction.dead_n / 1000.0
    );
    if let Some(weld) = &report.web_flange_weld {
        println!(
            "Web-to-flange weld: 2 x {:.0} mm fillet E70 (required {:.1} mm, min {:.0} mm)  {:.3} {}",
            weld.size_mm,
            weld.required_size_mm,
            weld.minimum_size_mm,
            weld.ratio,
            status_icon(weld.base_metal_ratio <= 1.0)
        );
    }
    println!();
    println!("Checks:");
    for check in &report.checks {
        println!(
            "  {:<20} {:>9.2} / {:>9.2} {:<5} {:>6.3} {}",
            check.kind.display_name(),
            check.demand,
            check.capacity,
            check.units,
            check.ratio,
            status_icon(check.passes)
        );
        for note in &check.notes {
            println!("      {}", note);
        }
    }
    println!();
    println!("═══════════════════════════════════════════════════════════");
    println!(
        "  RESULT: {} (governs: {}, ratio {:.3})",
        if report.passes() { "PASS" } else { "FAIL" },
        report.governing_condition(),
        report.governing_unity()
    );
    println!("═══════════════════════════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(grade: Option<&str>, method: Option<MethodArg>) -> RunArgs {
        RunArgs {
            input: None,
            method,
            grade: grade.map(str::to_string),
            json: false,
        }
    }

    #[test]
    fn test_overrides_grade_and_method() {
        let mut input = RunwayBeamInput::default();
        apply_overrides(&mut input, &args(Some("a572 gr50"), Some(MethodArg::Asd))).unwrap();
        assert_eq!(input.material, SteelGrade::A572Gr50);
        assert_eq!(input.design_method, DesignMethod::Asd);
    }

    #[test]
    fn test_unknown_grade_is_input_error() {
        let mut input = RunwayBeamInput::default();
        let err = apply_overrides(&mut input, &args(Some("S355"), None)).unwrap_err();
        match err {
            CliError::Calc(calc) => assert_eq!(calc.error_code(), "INVALID_INPUT"),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(input.material, SteelGrade::A992);
    }

    #[test]
    fn test_cli_parses_grade_flag() {
        let cli = Cli::try_parse_from(["runway", "design", "--grade", "A36"]).unwrap();
        match cli.command {
            Commands::Design { run } => assert_eq!(run.grade.as_deref(), Some("A36")),
            _ => panic!("expected the design subcommand"),
        }
    }
}

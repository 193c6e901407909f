//! # Geotech CLI Application
//!
//! Command-line front end for the borehole parameter pipeline. Reads a
//! project document (JSON) or runs a built-in demo borehole, prints one
//! parameter table per borehole, and optionally the JSON reports.
//!
//! ```text
//! geotech_cli site.json --structure "Sheet Pile" --correction terzaghi -v
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use geotech_core::equations::Equation;
use geotech_core::lab::{LabParameter, Overridable, Provenance};
use geotech_core::settings::{ConstructionMethod, CorrectionMethod, StructureType, SurfaceType};
use geotech_core::{BoreholeInput, BoreholeReport, CalcError, LayerResult, Project};

/// Derive soil parameters from SPT borehole logs
#[derive(Parser, Debug)]
#[command(name = "geotech_cli", version, about, long_about = None)]
struct Args {
    /// Project document (JSON); runs the demo borehole when omitted
    project: Option<PathBuf>,

    /// Only calculate the named borehole
    #[arg(short, long)]
    borehole: Option<String>,

    /// Structure type (e.g. "Sheet Pile", "Earth Retaining Structure", "Diaphragm Wall")
    #[arg(long)]
    structure: Option<String>,

    /// Construction method ("Driven" or "Bored")
    #[arg(long)]
    method: Option<String>,

    /// Contact surface (e.g. "Smooth Concrete", "Rough Steel", "Timber")
    #[arg(long)]
    surface: Option<String>,

    /// SPT correction ("Liao and Whitman (1986)" or "Terzaghi (1984)")
    #[arg(long)]
    correction: Option<String>,

    /// Print the JSON reports after the tables
    #[arg(long)]
    json: bool,

    /// List the equations used with the active settings
    #[arg(long)]
    equations: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn get_log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Sample log with a lab Su at 2.45 m
fn demo_project() -> Project {
    let mut project = Project::new("", "DEMO", "");
    project.add_borehole(
        BoreholeInput::new("BH-1", 99.054, -0.70)
            .with_layer(1.45, Some(8.0), "CH")
            .with_layer(2.45, Some(12.0), "CL")
            .with_layer(3.45, Some(15.0), "SM")
            .with_layer(4.95, Some(20.0), "SC")
            .with_layer(6.45, Some(25.0), "SM"),
    );
    project.lab_data.insert("BH-1", 2.45, LabParameter::Su, "38.5");
    project
}

fn load_project(args: &Args) -> Result<Project, String> {
    let Some(path) = &args.project else {
        tracing::info!("No project given, running demo borehole");
        return Ok(demo_project());
    };

    let json = fs::read_to_string(path).map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let project = Project::from_json(&json).map_err(|e| format!("Cannot parse {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), boreholes = project.borehole_count(), "Loaded project");
    Ok(project)
}

/// Command-line settings take precedence over the document's.
fn apply_setting_overrides(project: &mut Project, args: &Args) {
    let settings = &mut project.settings;
    if let Some(s) = &args.structure {
        settings.structure_type = StructureType::parse_lenient(s);
    }
    if let Some(s) = &args.method {
        settings.method = ConstructionMethod::parse_lenient(s);
    }
    if let Some(s) = &args.surface {
        settings.surface_type = SurfaceType::parse_lenient(s);
    }
    if let Some(s) = &args.correction {
        settings.correction_method = CorrectionMethod::parse_lenient(s);
    }
}

fn cell(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}

/// Lab values are marked `*`, estimates `~`
fn overridable_cell(field: &Overridable, decimals: usize) -> String {
    let marker = match field.source() {
        Provenance::Lab => "*",
        Provenance::Estimated if field.value().is_some() => "~",
        _ => "",
    };
    format!("{}{}", cell(field.value(), decimals), marker)
}

fn print_layer(layer: &LayerResult) {
    let class = if layer.classification.is_empty() { "-" } else { layer.classification.as_str() };
    let family = match layer.soil_type.family_name() {
        "" => "-",
        name => name,
    };
    println!(
        "{:>6.2} {:>8.3} {:>7} {:>6} {:>5} {:>4} {:>8.2} {:>6} {:>6} {:>8} {:>6} {:>9} {:>6} {:>5} {:>5}  {}",
        layer.depth,
        layer.elevation,
        overridable_cell(&layer.gamma_sat, 1),
        class,
        family,
        cell(layer.n_value, 0),
        layer.sigma_v_effective,
        cell(layer.cn, 3),
        cell(layer.ncor, 2),
        overridable_cell(&layer.su, 2),
        overridable_cell(&layer.phi, 1),
        cell(layer.e_modulus, 0),
        cell(layer.poisson_ratio, 3),
        cell(layer.k0, 3),
        cell(layer.rint, 2),
        layer.consistency.map(|c| c.label()).unwrap_or("-"),
    );
}

fn print_report(report: &BoreholeReport) {
    println!("═══════════════════════════════════════════════════════════════════════════════════════════════════════");
    println!("  BOREHOLE {}", report.borehole);
    println!("═══════════════════════════════════════════════════════════════════════════════════════════════════════");
    println!("  Water level: {:.3} m", report.water_level_elevation);
    println!(
        "  Settings:    {} / {} / {} / {}",
        report.settings.structure_type,
        report.settings.method,
        report.settings.surface_type,
        report.settings.correction_method
    );
    println!();

    if report.layers.is_empty() {
        println!("  No layer has both an N-value and a classification.");
        println!();
        return;
    }

    println!(
        "{:>6} {:>8} {:>7} {:>6} {:>5} {:>4} {:>8} {:>6} {:>6} {:>8} {:>6} {:>9} {:>6} {:>5} {:>5}  {}",
        "Depth", "Elev", "γsat", "Class", "Type", "N", "σv'", "CN", "Ncor", "Su", "Ø'", "E/E'", "ν", "K0", "Rint", "Consistency"
    );
    for layer in &report.layers {
        print_layer(layer);
    }
    println!();
    println!("  * laboratory value   ~ estimated (gap fill)");
    println!();
}

fn print_error(borehole: &str, error: &CalcError) {
    eprintln!("Error in {}: {}", borehole, error);
    if let Ok(json) = serde_json::to_string_pretty(error) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn print_equations(project: &Project) {
    println!("Equations used:");
    for equation in Equation::applicable(&project.settings) {
        let meta = equation.metadata();
        println!("  {:<32} {:<60} [{}]", meta.name, meta.formula_plain, meta.reference.short_form());
    }
    println!();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(get_log_level(args.verbose, args.quiet));

    let mut project = match load_project(&args) {
        Ok(project) => project,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::FAILURE;
        }
    };
    apply_setting_overrides(&mut project, &args);

    if let Some(name) = &args.borehole {
        project.boreholes.retain(|b| &b.name == name);
        if project.boreholes.is_empty() {
            eprintln!("Error: no borehole named '{}'", name);
            return ExitCode::FAILURE;
        }
    }

    if args.equations {
        print_equations(&project);
    }

    let results = project.calculate_all();
    let mut reports = Vec::with_capacity(results.len());
    let mut failed = false;

    for (borehole, result) in project.boreholes.iter().zip(results) {
        match result {
            Ok(report) => {
                print_report(&report);
                reports.push(report);
            }
            Err(e) => {
                print_error(&borehole.name, &e);
                failed = true;
            }
        }
    }

    if args.json {
        println!("JSON Output:");
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                print_error("report serialization", &CalcError::from(e));
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

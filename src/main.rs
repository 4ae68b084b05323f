use std::fs;
use std::path::Path;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use naval_compliance::checker::Finding;
use naval_compliance::cli::{CategoryArgs, CheckArgs, Cli, ColorChoice, Commands, RulesArgs};
use naval_compliance::config::{Config, ConfigLoader, FileConfigLoader};
use naval_compliance::engine::{ComplianceEngine, ComplianceReport, OverallStatus, VesselProfile};
use naval_compliance::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, RulesFormatter, RulesJsonFormatter,
    RulesTextFormatter, TextFormatter,
};
use naval_compliance::rules::{Framework, RuleLibrary, RuleRequirement};
use naval_compliance::state::StateManager;
use naval_compliance::{ComplianceError, EXIT_CONFIG_ERROR, EXIT_NON_COMPLIANT, EXIT_SUCCESS};

const DEFAULT_VESSEL_NAME: &str = "Unnamed vessel";

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Category(args) => run_category(args, &cli),
        Commands::Rules(args) => run_rules(args, &cli),
    };

    std::process::exit(exit_code);
}

/// Diagnostics go to stderr. `RUST_LOG` wins over `-v`/`-q`.
fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose, quiet)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

const fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> naval_compliance::Result<i32> {
    let config = load_config(cli.config.as_deref(), cli.no_config)?;
    let vessel = resolve_vessel(args, &config)?;
    let state = StateManager::load(&args.state)?;
    info!(path = %args.state.display(), entries = state.len(), "design state loaded");

    let engine = ComplianceEngine::default();
    let frameworks = resolve_frameworks(&args.frameworks, &config, engine.library())?;
    let report = engine.evaluate(&state, &frameworks, &vessel);

    let precision = args.precision.unwrap_or(config.output.precision);
    let color_mode = color_choice_to_mode(cli.color);
    let output = format_output(args.format, &report, color_mode, cli.verbose, precision)?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    let strict = args.strict || config.evaluation.strict;
    Ok(exit_code_for(report.overall_status(), strict))
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> naval_compliance::Result<Config> {
    if no_config {
        return Ok(Config::default());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Vessel particulars from flags, falling back to `[vessel]` in the config.
fn resolve_vessel(args: &CheckArgs, config: &Config) -> naval_compliance::Result<VesselProfile> {
    let vessel_type = args
        .vessel_type
        .clone()
        .or_else(|| config.vessel.vessel_type.clone())
        .ok_or_else(|| {
            ComplianceError::Config(
                "vessel type not set: pass --vessel-type or set [vessel] vessel_type".to_string(),
            )
        })?;
    let length_m = args.length.or(config.vessel.length_m).ok_or_else(|| {
        ComplianceError::Config(
            "vessel length not set: pass --length or set [vessel] length_m".to_string(),
        )
    })?;
    if !length_m.is_finite() || length_m <= 0.0 {
        return Err(ComplianceError::Config(format!(
            "vessel length must be a positive number, got {length_m}"
        )));
    }
    let name = args
        .name
        .clone()
        .or_else(|| config.vessel.name.clone())
        .unwrap_or_else(|| DEFAULT_VESSEL_NAME.to_string());
    Ok(VesselProfile::new(name, vessel_type, length_m))
}

/// Frameworks from flags, then config, then every framework the library has rules for.
fn resolve_frameworks(
    requested: &[Framework],
    config: &Config,
    library: &RuleLibrary,
) -> naval_compliance::Result<Vec<Framework>> {
    if !requested.is_empty() {
        return Ok(requested.to_vec());
    }
    let configured = config.frameworks()?;
    if !configured.is_empty() {
        return Ok(configured);
    }
    debug!("no frameworks requested, evaluating all library frameworks");
    Ok(library.frameworks())
}

const fn exit_code_for(status: OverallStatus, strict: bool) -> i32 {
    match status {
        OverallStatus::Compliant | OverallStatus::ConditionallyCompliant => EXIT_SUCCESS,
        OverallStatus::ReviewRequired if !strict => EXIT_SUCCESS,
        OverallStatus::ReviewRequired | OverallStatus::NonCompliant => EXIT_NON_COMPLIANT,
    }
}

fn format_output(
    format: OutputFormat,
    report: &ComplianceReport,
    color_mode: ColorMode,
    verbose: u8,
    precision: u32,
) -> naval_compliance::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(report),
        OutputFormat::Json => JsonFormatter::new(precision).format(report),
    }
}

fn write_output(
    output_path: Option<&Path>,
    content: &str,
    quiet: bool,
) -> naval_compliance::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

fn run_category(args: &CategoryArgs, cli: &Cli) -> i32 {
    match run_category_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_category_impl(args: &CategoryArgs, cli: &Cli) -> naval_compliance::Result<i32> {
    let state = StateManager::load(&args.state)?;
    let engine = ComplianceEngine::default();
    let frameworks = (!args.frameworks.is_empty()).then_some(args.frameworks.as_slice());

    let findings = engine.evaluate_category(&state, args.category, frameworks);

    let formatter = TextFormatter::with_verbose(color_choice_to_mode(cli.color), cli.verbose);
    write_output(None, &formatter.format_findings(&findings), cli.quiet)?;

    if findings.iter().any(Finding::is_fail) {
        Ok(EXIT_NON_COMPLIANT)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn run_rules(args: &RulesArgs, cli: &Cli) -> i32 {
    match run_rules_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_rules_impl(args: &RulesArgs, cli: &Cli) -> naval_compliance::Result<i32> {
    let engine = ComplianceEngine::default();
    let rules = select_rules(engine.library(), args);

    let output = match args.format {
        OutputFormat::Text => RulesTextFormatter.format_rules(&rules)?,
        OutputFormat::Json => RulesJsonFormatter.format_rules(&rules)?,
    };
    write_output(None, &output, cli.quiet)?;
    Ok(EXIT_SUCCESS)
}

fn select_rules<'a>(library: &'a RuleLibrary, args: &RulesArgs) -> Vec<&'a RuleRequirement> {
    library
        .iter()
        .filter(|rule| args.framework.is_none_or(|f| rule.framework == f))
        .filter(|rule| args.category.is_none_or(|c| rule.category == c))
        .filter(|rule| match (&args.vessel_type, args.length) {
            (Some(vessel_type), Some(length_m)) => rule.applies_to(vessel_type, length_m),
            _ => true,
        })
        .collect()
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

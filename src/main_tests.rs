use std::path::PathBuf;

use naval_compliance::cli::{CheckArgs, RulesArgs};
use naval_compliance::config::Config;
use naval_compliance::engine::OverallStatus;
use naval_compliance::output::OutputFormat;
use naval_compliance::rules::{Framework, RuleCategory, default_library};
use naval_compliance::{EXIT_CONFIG_ERROR, EXIT_NON_COMPLIANT, EXIT_SUCCESS};
use tempfile::TempDir;

use crate::{
    exit_code_for, load_config, log_level, resolve_frameworks, resolve_vessel, select_rules,
    write_output,
};

fn check_args() -> CheckArgs {
    CheckArgs {
        state: PathBuf::from("state.json"),
        frameworks: Vec::new(),
        vessel_type: None,
        length: None,
        name: None,
        format: OutputFormat::Text,
        output: None,
        precision: None,
        strict: false,
    }
}

fn rules_args() -> RulesArgs {
    RulesArgs {
        framework: None,
        category: None,
        vessel_type: None,
        length: None,
        format: OutputFormat::Text,
    }
}

#[test]
fn exit_codes_documented() {
    assert_eq!(EXIT_SUCCESS, 0);
    assert_eq!(EXIT_NON_COMPLIANT, 1);
    assert_eq!(EXIT_CONFIG_ERROR, 2);
}

#[test]
fn exit_code_by_status() {
    assert_eq!(exit_code_for(OverallStatus::Compliant, true), EXIT_SUCCESS);
    assert_eq!(
        exit_code_for(OverallStatus::ConditionallyCompliant, true),
        EXIT_SUCCESS
    );
    assert_eq!(exit_code_for(OverallStatus::ReviewRequired, false), EXIT_SUCCESS);
    assert_eq!(
        exit_code_for(OverallStatus::ReviewRequired, true),
        EXIT_NON_COMPLIANT
    );
    assert_eq!(
        exit_code_for(OverallStatus::NonCompliant, false),
        EXIT_NON_COMPLIANT
    );
}

#[test]
fn log_level_follows_verbosity() {
    assert_eq!(log_level(0, false), "warn");
    assert_eq!(log_level(1, false), "info");
    assert_eq!(log_level(3, false), "debug");
    assert_eq!(log_level(2, true), "error");
}

#[test]
fn load_config_no_config_returns_default() {
    let config = load_config(None, true).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn load_config_with_nonexistent_path_returns_error() {
    let result = load_config(Some(std::path::Path::new("nonexistent.toml")), false);
    assert!(result.is_err());
}

#[test]
fn resolve_vessel_prefers_flags() {
    let mut config = Config::default();
    config.vessel.vessel_type = Some("patrol".into());
    config.vessel.length_m = Some(35.0);
    config.vessel.name = Some("PC-42".into());
    let mut args = check_args();
    args.vessel_type = Some("ferry".into());

    let vessel = resolve_vessel(&args, &config).unwrap();

    assert_eq!(vessel.vessel_type, "ferry");
    assert!((vessel.length_m - 35.0).abs() < f64::EPSILON);
    assert_eq!(vessel.name, "PC-42");
}

#[test]
fn resolve_vessel_requires_type_and_length() {
    let config = Config::default();
    let mut args = check_args();
    assert!(resolve_vessel(&args, &config).is_err());

    args.vessel_type = Some("ferry".into());
    let err = resolve_vessel(&args, &config).unwrap_err();
    assert!(err.to_string().contains("vessel length not set"));

    args.length = Some(-3.0);
    assert!(resolve_vessel(&args, &config).is_err());

    args.length = Some(20.0);
    assert_eq!(resolve_vessel(&args, &config).unwrap().name, "Unnamed vessel");
}

#[test]
fn resolve_frameworks_precedence() {
    let library = default_library();
    let mut config = Config::default();

    assert_eq!(
        resolve_frameworks(&[], &config, &library).unwrap(),
        library.frameworks()
    );

    config.evaluation.frameworks = vec!["hsc_2000".into()];
    assert_eq!(
        resolve_frameworks(&[], &config, &library).unwrap(),
        vec![Framework::Hsc2000]
    );

    assert_eq!(
        resolve_frameworks(&[Framework::Solas], &config, &library).unwrap(),
        vec![Framework::Solas]
    );
}

#[test]
fn resolve_frameworks_rejects_bad_config() {
    let mut config = Config::default();
    config.evaluation.frameworks = vec!["nope".into()];
    assert!(resolve_frameworks(&[], &config, &default_library()).is_err());
}

#[test]
fn select_rules_filters() {
    let library = default_library();

    let mut args = rules_args();
    assert_eq!(select_rules(&library, &args).len(), library.len());

    args.framework = Some(Framework::UscgSubchapterT);
    args.category = Some(RuleCategory::Structural);
    let ids: Vec<_> = select_rules(&library, &args)
        .iter()
        .map(|r| r.rule_id.as_str())
        .collect();
    assert_eq!(ids, vec!["USCG-T-177.300"]);

    args.vessel_type = Some("ferry".into());
    args.length = Some(15.0);
    assert!(select_rules(&library, &args).is_empty());
}

#[test]
fn write_output_to_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.txt");

    write_output(Some(&path), "content", false).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "content");
}

use super::*;

#[test]
fn default_values() {
    let config = Config::default();
    assert!(config.version.is_none());
    assert!(config.evaluation.frameworks.is_empty());
    assert!(!config.evaluation.strict);
    assert_eq!(config.output.precision, 6);
}

#[test]
fn parses_full_file() {
    let config: Config = toml::from_str(
        r#"
version = "1"

[vessel]
name = "PC-42"
vessel_type = "patrol"
length_m = 35.0

[evaluation]
frameworks = ["abs_hsnc", "uscg_subchapter_t"]
strict = true

[output]
precision = 4
"#,
    )
    .unwrap();

    assert_eq!(config.vessel.name.as_deref(), Some("PC-42"));
    assert_eq!(config.vessel.length_m, Some(35.0));
    assert!(config.evaluation.strict);
    assert_eq!(config.output.precision, 4);
    assert_eq!(
        config.frameworks().unwrap(),
        vec![Framework::AbsHsnc, Framework::UscgSubchapterT]
    );
}

#[test]
fn missing_sections_use_defaults() {
    let config: Config = toml::from_str("[output]\n").unwrap();
    assert_eq!(config.output.precision, 6);
    assert!(config.vessel.vessel_type.is_none());
}

#[test]
fn unknown_keys_rejected() {
    let result: std::result::Result<Config, _> = toml::from_str("[vessel]\nbeam = 6.0\n");
    assert!(result.is_err());
}

#[test]
fn unknown_framework_is_lookup_error() {
    let mut config = Config::default();
    config.evaluation.frameworks = vec!["abs_hsnc".into(), "lloyds".into()];

    let err = config.frameworks().unwrap_err();

    assert!(matches!(err, ComplianceError::UnknownFramework(ref name) if name == "lloyds"));
}

#[test]
fn version_validation() {
    let mut config = Config::default();
    assert!(config.validate_version().is_ok());

    config.version = Some("1".into());
    assert!(config.validate_version().is_ok());

    config.version = Some("2".into());
    let err = config.validate_version().unwrap_err();
    assert!(err.to_string().contains("Unsupported config version '2'"));
}

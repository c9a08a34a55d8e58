//! Integration tests for policy resolution and configuration loading.

use std::io::Write;

use joyshim_errors::ConfigError;
use joyshim_policy::{
    DeviceRule, LogLevel, PolicyResolver, ResolvedPolicy, RuleSetting, ShimConfig,
};
use proptest::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const SAMPLE_YAML: &str = r#"
general: { enabled: true, log_level: debug }
ffb: { enabled: true, log_effects: false, default_scale: 100, auto_restart: true }
devices:
  - { pattern: "MFG Crosswind", policy: block }
  - { pattern: "Logitech", policy: 50 }
"#;

const SAMPLE_JSON: &str = r#"{
  "general": { "enabled": true, "log_level": "debug" },
  "ffb": { "enabled": true, "log_effects": false, "default_scale": 100, "auto_restart": true },
  "devices": [
    { "pattern": "MFG Crosswind", "policy": "block" },
    { "pattern": "Logitech", "policy": 50 }
  ]
}"#;

fn scenario_resolver() -> PolicyResolver {
    PolicyResolver::new(
        vec![
            DeviceRule::new("MFG Crosswind", ResolvedPolicy::block()),
            DeviceRule::new("Logitech", ResolvedPolicy::new(true, 50)),
        ],
        ResolvedPolicy::new(true, 100),
    )
}

#[test]
fn test_rule_table_scenario() {
    let resolver = scenario_resolver();
    assert_eq!(
        resolver.resolve("Logitech G940 Joystick"),
        ResolvedPolicy::new(true, 50)
    );
    assert_eq!(resolver.resolve("VKB Gunfighter"), ResolvedPolicy::new(true, 100));
    assert_eq!(resolver.resolve("mfg crosswind pedals"), ResolvedPolicy::block());
}

#[test]
fn test_swapping_overlapping_rules_changes_winner() {
    let generic = DeviceRule::new("G940", ResolvedPolicy::new(true, 30));
    let vendor = DeviceRule::new("Logitech", ResolvedPolicy::new(true, 70));

    let first = PolicyResolver::new(vec![generic.clone(), vendor.clone()], ResolvedPolicy::allow());
    let second = PolicyResolver::new(vec![vendor, generic], ResolvedPolicy::allow());

    assert_eq!(first.resolve("Logitech G940").scale_percent, 30);
    assert_eq!(second.resolve("Logitech G940").scale_percent, 70);
}

#[test]
fn test_yaml_and_json_agree() -> TestResult {
    let yaml = ShimConfig::from_yaml_str(SAMPLE_YAML)?;
    let json = ShimConfig::from_json_str(SAMPLE_JSON)?;
    assert_eq!(yaml, json);
    assert_eq!(yaml.general.log_level, LogLevel::Debug);
    assert!(!yaml.ffb.log_effects);
    assert_eq!(yaml.devices.len(), 2);
    assert_eq!(
        yaml.devices.last().map(|d| &d.policy),
        Some(&RuleSetting::Scale(50))
    );
    Ok(())
}

#[test]
fn test_config_preserves_rule_order() -> TestResult {
    let config = ShimConfig::from_yaml_str(SAMPLE_YAML)?;
    let resolver = PolicyResolver::from_config(&config)?;
    let patterns: Vec<&str> = resolver.rules().iter().map(DeviceRule::pattern).collect();
    assert_eq!(patterns, ["MFG Crosswind", "Logitech"]);
    assert_eq!(resolver.resolve("Logitech G940 Joystick"), ResolvedPolicy::new(true, 50));
    Ok(())
}

#[test]
fn test_from_path_by_extension() -> TestResult {
    let dir = tempfile::tempdir()?;

    let yaml_path = dir.path().join("joyshim.yml");
    std::fs::write(&yaml_path, SAMPLE_YAML)?;
    let json_path = dir.path().join("joyshim.JSON");
    std::fs::write(&json_path, SAMPLE_JSON)?;

    assert_eq!(ShimConfig::from_path(&yaml_path)?, ShimConfig::from_path(&json_path)?);
    Ok(())
}

#[test]
fn test_unsupported_extension() -> TestResult {
    let mut file = tempfile::Builder::new().suffix(".ini").tempfile()?;
    writeln!(file, "[devices]")?;
    let result = ShimConfig::from_path(file.path());
    assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() -> TestResult {
    let dir = tempfile::tempdir()?;
    let result = ShimConfig::from_path(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
    Ok(())
}

#[test]
fn test_malformed_document_is_parse_error() {
    let result = ShimConfig::from_json_str(r#"{"ffb": {"default_scale": "loud"}}"#);
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_rule_keyword_rejected() -> TestResult {
    let config = ShimConfig::from_yaml_str("devices:\n  - { pattern: VKB, policy: mild }\n")?;
    match PolicyResolver::from_config(&config) {
        Err(ConfigError::InvalidRule { pattern, value }) => {
            assert_eq!(pattern, "VKB");
            assert_eq!(value, "mild");
        }
        other => return Err(format!("expected InvalidRule, got {other:?}").into()),
    }
    Ok(())
}

#[test]
fn test_config_snapshot() -> TestResult {
    let config = ShimConfig::from_yaml_str(SAMPLE_YAML)?;
    insta::assert_json_snapshot!(config, @r###"
    {
      "general": {
        "enabled": true,
        "log_level": "debug"
      },
      "ffb": {
        "enabled": true,
        "log_effects": false,
        "default_scale": 100,
        "auto_restart": true
      },
      "devices": [
        {
          "pattern": "MFG Crosswind",
          "policy": "block"
        },
        {
          "pattern": "Logitech",
          "policy": 50
        }
      ]
    }
    "###);
    Ok(())
}

fn arb_policy() -> impl Strategy<Value = ResolvedPolicy> {
    (any::<bool>(), -50i64..200).prop_map(|(enabled, scale)| ResolvedPolicy::new(enabled, scale))
}

proptest! {
    #[test]
    fn prop_first_match_wins(
        prefix in "[a-z]{1,6}",
        suffix in "[a-z]{1,6}",
        first in arb_policy(),
        second in arb_policy(),
        default in arb_policy(),
    ) {
        let name = format!("{prefix} {suffix}");
        let resolver = PolicyResolver::new(
            vec![
                DeviceRule::new(prefix.to_uppercase(), first),
                DeviceRule::new(suffix.clone(), second),
            ],
            default,
        );
        prop_assert_eq!(resolver.resolve(&name), first);
    }

    #[test]
    fn prop_unmatched_gets_default(name in "[a-z ]{0,16}", default in arb_policy()) {
        let resolver = PolicyResolver::new(
            vec![DeviceRule::new("0123456789", ResolvedPolicy::block())],
            default,
        );
        prop_assert_eq!(resolver.resolve(&name), default);
    }

    #[test]
    fn prop_percent_rules_clamped(percent in any::<i64>()) {
        let rule = DeviceRule::parse("x", &percent.to_string())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        let policy = rule.policy();
        prop_assert!(policy.scale_percent <= 100);
        prop_assert_eq!(policy.enabled, percent > 0);
    }
}

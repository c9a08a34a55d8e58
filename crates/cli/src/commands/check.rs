//! `joyshim check`: validate a configuration and list its rules.

use joyshim_policy::{LogLevel, PolicyResolver, ResolvedPolicy, ShimConfig};
use serde::Serialize;

use super::CheckArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub enabled: bool,
    pub log_level: LogLevel,
    pub log_effects: bool,
    pub auto_restart: bool,
    pub default_policy: ResolvedPolicy,
    pub rules: Vec<RuleReport>,
}

#[derive(Debug, Serialize)]
pub struct RuleReport {
    /// 1-based; lower wins.
    pub priority: usize,
    pub pattern: String,
    pub policy: ResolvedPolicy,
}

pub fn execute(args: &CheckArgs) -> Result<CheckReport, CliError> {
    let config = ShimConfig::from_path(&args.config)?;
    check_config(&config)
}

pub fn check_config(config: &ShimConfig) -> Result<CheckReport, CliError> {
    let resolver = PolicyResolver::from_config(config)?;
    let rules = resolver
        .rules()
        .iter()
        .enumerate()
        .map(|(index, rule)| RuleReport {
            priority: index.saturating_add(1),
            pattern: rule.pattern().to_string(),
            policy: rule.policy(),
        })
        .collect();

    Ok(CheckReport {
        enabled: config.general.enabled,
        log_level: config.general.log_level,
        log_effects: config.ffb.log_effects,
        auto_restart: config.ffb.auto_restart,
        default_policy: resolver.default_policy(),
        rules,
    })
}

//! `joyshim resolve`: which policy would a device get?

use joyshim_policy::{PolicyResolver, ResolvedPolicy, ShimConfig};
use serde::Serialize;

use super::ResolveArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub device: String,
    pub policy: ResolvedPolicy,
    /// Pattern of the winning rule; `None` when the default applied.
    pub matched_rule: Option<String>,
}

pub fn execute(args: &ResolveArgs) -> Result<ResolveReport, CliError> {
    let config = ShimConfig::from_path(&args.config)?;
    let resolver = PolicyResolver::from_config(&config)?;
    Ok(resolve_with(&resolver, &args.device))
}

pub fn resolve_with(resolver: &PolicyResolver, device: &str) -> ResolveReport {
    let matched = resolver.matching_rule(device);
    tracing::debug!(
        device,
        rule = matched.map(|rule| rule.pattern()),
        "Resolved device policy"
    );
    ResolveReport {
        device: device.to_string(),
        policy: resolver.resolve(device),
        matched_rule: matched.map(|rule| rule.pattern().to_string()),
    }
}

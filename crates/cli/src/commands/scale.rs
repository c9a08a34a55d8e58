//! `joyshim scale`: preview what a device would receive at a given strength.

use std::fs;

use joyshim_ffb::{ForceDescriptor, scale};
use joyshim_policy::ResolvedPolicy;
use serde::Serialize;

use super::ScaleArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct ScaleReport {
    pub percent: u8,
    pub scaled: ForceDescriptor,
}

pub fn execute(args: &ScaleArgs) -> Result<ScaleReport, CliError> {
    let content = fs::read_to_string(&args.descriptor)?;
    let descriptor: ForceDescriptor = serde_json::from_str(&content)?;
    scale_report(&descriptor, args.percent)
}

pub fn scale_report(descriptor: &ForceDescriptor, percent: i64) -> Result<ScaleReport, CliError> {
    descriptor.check()?;
    let percent = ResolvedPolicy::new(true, percent).scale_percent;
    let scaled = scale(descriptor, percent).into_owned();
    tracing::debug!(percent, params = ?scaled.params, "Scaled descriptor");
    Ok(ScaleReport { percent, scaled })
}

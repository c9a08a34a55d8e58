//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use joyshim_policy::ResolvedPolicy;
use serde::Serialize;
use serde_json::json;

use crate::commands::check::CheckReport;
use crate::commands::resolve::ResolveReport;
use crate::commands::scale::ScaleReport;
use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidConfiguration(_)) => "invalid_configuration",
        Some(CliError::InvalidDescriptor(_)) => "invalid_descriptor",
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        None => "unknown",
    }
}

/// Wraps a report in the `{"success": true, ...}` envelope.
pub fn success_json<T: Serialize>(report: &T) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(report)?;
    if let Some(map) = value.as_object_mut() {
        map.insert("success".to_string(), json!(true));
    }
    serde_json::to_string_pretty(&value)
}

fn print_json<T: Serialize>(report: &T) {
    match success_json(report) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format report as JSON: {e}"),
    }
}

fn policy_label(policy: ResolvedPolicy) -> ColoredString {
    if !policy.enabled {
        "BLOCK".red().bold()
    } else if policy.is_scaled() {
        format!("allow ({}%)", policy.scale_percent).yellow()
    } else {
        format!("allow ({}%)", policy.scale_percent).green()
    }
}

pub fn print_resolve(report: &ResolveReport, json: bool) {
    if json {
        print_json(report);
        return;
    }

    let source = match &report.matched_rule {
        Some(pattern) => format!("rule \"{pattern}\""),
        None => "default".to_string(),
    };
    println!(
        "{}: {} {}",
        report.device.bold(),
        policy_label(report.policy),
        format!("[{source}]").dimmed()
    );
}

pub fn print_scale(report: &ScaleReport, json: bool) {
    if json {
        print_json(report);
        return;
    }

    println!("{} {}%", "Scaled to".bold(), report.percent);
    match serde_json::to_string_pretty(&report.scaled) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format descriptor: {e}"),
    }
}

pub fn print_check(report: &CheckReport, json: bool) {
    if json {
        print_json(report);
        return;
    }

    println!("{} {}", "Configuration OK".green().bold(), "✓".green());
    if !report.enabled {
        println!("  {}", "Policy layer disabled: every device passes through".yellow());
    }
    println!("  Log level:     {:?}", report.log_level);
    println!("  Log effects:   {}", report.log_effects);
    println!("  Auto restart:  {}", report.auto_restart);
    println!("  Default:       {}", policy_label(report.default_policy));

    if report.rules.is_empty() {
        println!("  {}", "No device rules".dimmed());
        return;
    }
    println!("  {}", "Device rules (first match wins):".bold());
    for rule in &report.rules {
        println!(
            "    {:>2}. {:<32} {}",
            rule.priority,
            rule.pattern,
            policy_label(rule.policy)
        );
    }
}

//! Command implementations for the joyshim CLI

pub mod check;
pub mod resolve;
pub mod scale;

use std::path::PathBuf;

use clap::Args;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Policy configuration file (.json, .yaml or .yml)
    #[arg(short, long, env = "JOYSHIM_CONFIG")]
    pub config: PathBuf,

    /// Device product name as reported by the driver
    pub device: String,
}

#[derive(Args, Debug)]
pub struct ScaleArgs {
    /// Scale percentage, clamped to 0-100
    #[arg(short, long, allow_negative_numbers = true)]
    pub percent: i64,

    /// Effect descriptor in JSON
    pub descriptor: PathBuf,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Policy configuration file (.json, .yaml or .yml)
    #[arg(short, long, env = "JOYSHIM_CONFIG")]
    pub config: PathBuf,
}

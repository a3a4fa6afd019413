//! Command-line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Gather presentation context through rounds of questions
#[derive(Parser, Debug)]
#[command(name = "pres-tui", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive question rounds
    Gather(GatherArgs),

    /// Show or initialise the configuration file
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct GatherArgs {
    /// JSON script with the question rounds
    #[arg(long, short)]
    pub script: PathBuf,

    /// Form title (overrides the config file)
    #[arg(long)]
    pub title: Option<String>,

    /// Maximum number of rounds (overrides the config file)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_rounds: Option<u16>,

    /// Where to write the answers as JSON (stdout when omitted)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write a config file filled with the defaults
    #[arg(long)]
    pub init: bool,
}

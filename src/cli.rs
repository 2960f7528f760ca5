use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ConfigLoader;
use crate::{daemon, logging};

#[derive(Parser)]
#[command(
    name = "inkdash",
    version,
    about = "AWS cost dashboard on a Waveshare 2.13\" e-ink panel"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll AWS and refresh the panel on the configured interval
    Run,
    /// Print one frame as ASCII art instead of driving the panel
    Preview,
}

pub fn process_command() -> Result<()> {
    let cli = Cli::parse();

    logging::setup_logging()?;
    let config = ConfigLoader::load_default_config()?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => daemon::run(config),
        Command::Preview => daemon::preview(config),
    }
}

use anyhow::Result;
use chronctl_config::definitions::VERSION;
use clap::{Parser, Subcommand};

use crate::command::ChronCommand;
use crate::config::ConfigCommand;
use crate::job::JobCommand;

#[derive(Subcommand)]
enum Commands {
    Job(JobCommand),
    Config(ConfigCommand),
}

#[derive(Parser)]
#[command(
    name = "chronctl",
    version = VERSION,
    about = "A command line client for a Chronos compatible job scheduler"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn exec(self) -> Result<()> {
        match self.command {
            Commands::Job(job) => job.invoke(),
            Commands::Config(config) => config.invoke(),
        }
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::create::JobCreateCommand;
use super::delete::JobDeleteCommand;
use super::kill::JobKillCommand;
use super::list::JobListCommand;
use super::run::JobRunCommand;
use super::show::JobShowCommand;
use crate::command::ChronCommand;

#[derive(Subcommand)]
pub enum JobCommands {
    List(JobListCommand),
    Show(JobShowCommand),
    Run(JobRunCommand),
    Kill(JobKillCommand),
    Delete(JobDeleteCommand),
    Create(JobCreateCommand),
}

#[derive(Parser)]
#[command(about = "Perform actions on the scheduler's jobs")]
pub struct JobCommand {
    #[command(subcommand)]
    command: JobCommands,
}

impl JobCommand {
    pub fn invoke(self) -> Result<()> {
        match self.command {
            JobCommands::List(list) => list.invoke(),
            JobCommands::Show(show) => show.invoke(),
            JobCommands::Run(run) => run.invoke(),
            JobCommands::Kill(kill) => kill.invoke(),
            JobCommands::Delete(delete) => delete.invoke(),
            JobCommands::Create(create) => create.invoke(),
        }
    }
}

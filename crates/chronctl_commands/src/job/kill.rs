use actix::System;
use anyhow::Result;
use chronctl_config::ChronConfig;
use chronctl_http::HttpClient;
use chronctl_utils::sync::IntoArc;
use clap::Args;

use crate::command::ChronCommand;
use crate::job::batch::for_each_job;

#[derive(Args)]
#[command(about = "Kills all running tasks of one or more jobs")]
pub struct JobKillCommand {
    #[arg(
        short = 'd',
        long = "debug",
        help = "Dumps the outgoing requests and incoming responses"
    )]
    debug: bool,

    #[arg(required = true, help = "The names of the jobs to kill")]
    names: Vec<String>,
}

impl ChronCommand for JobKillCommand {
    fn verbose(&self) -> bool {
        self.debug
    }

    fn exec(self) -> Result<()> {
        let config = ChronConfig::load()?.into_arc();
        let client = HttpClient::new(config, self.debug);

        System::new().block_on(async move {
            let client = &client;
            for_each_job(
                &self.names,
                "killed tasks for job",
                "could not kill job",
                |name| async move { client.kill_tasks(&name).await },
            )
            .await;
            Ok(())
        })
    }
}

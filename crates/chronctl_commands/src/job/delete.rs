use actix::System;
use anyhow::Result;
use chronctl_config::ChronConfig;
use chronctl_http::HttpClient;
use chronctl_utils::sync::IntoArc;
use clap::Args;

use crate::command::ChronCommand;
use crate::job::batch::for_each_job;

#[derive(Args)]
#[command(about = "Deletes one or more jobs from the scheduler")]
pub struct JobDeleteCommand {
    #[arg(
        short = 'd',
        long = "debug",
        help = "Dumps the outgoing requests and incoming responses"
    )]
    debug: bool,

    #[arg(required = true, help = "The names of the jobs to delete")]
    names: Vec<String>,
}

impl ChronCommand for JobDeleteCommand {
    fn verbose(&self) -> bool {
        self.debug
    }

    fn exec(self) -> Result<()> {
        let config = ChronConfig::load()?.into_arc();
        let client = HttpClient::new(config, self.debug);

        System::new().block_on(async move {
            let client = &client;
            for_each_job(&self.names, "deleted job", "could not delete job", |name| {
                async move { client.delete_job(&name).await }
            })
            .await;
            Ok(())
        })
    }
}

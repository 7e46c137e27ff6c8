use actix::System;
use anyhow::{Context, Result, anyhow};
use chronctl_config::ChronConfig;
use chronctl_http::HttpClient;
use chronctl_utils::sync::IntoArc;
use clap::Args;

use crate::command::ChronCommand;

#[derive(Args)]
#[command(about = "Shows the full definition of a job")]
pub struct JobShowCommand {
    #[arg(
        short = 'd',
        long = "debug",
        help = "Dumps the outgoing requests and incoming responses"
    )]
    debug: bool,

    #[arg(help = "The name of the job")]
    name: String,
}

impl ChronCommand for JobShowCommand {
    fn verbose(&self) -> bool {
        self.debug
    }

    fn exec(self) -> Result<()> {
        let config = ChronConfig::load()?.into_arc();
        let client = HttpClient::new(config, self.debug);

        System::new().block_on(async move {
            let jobs = client
                .jobs()
                .await
                .context("could not get the job list")?;
            let job = jobs
                .into_iter()
                .find(|job| job.name == self.name)
                .ok_or_else(|| anyhow!("could not find job: {}", self.name))?;
            println!("{}", serde_json::to_string_pretty(&job)?);
            Ok(())
        })
    }
}

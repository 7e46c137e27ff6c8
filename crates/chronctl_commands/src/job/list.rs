use actix::System;
use anyhow::{Context, Result};
use chronctl_config::ChronConfig;
use chronctl_http::HttpClient;
use chronctl_models::dtos::{Job, JobStatus};
use chronctl_utils::sync::IntoArc;
use clap::Args;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::command::ChronCommand;

#[derive(Args)]
#[command(about = "Lists the jobs registered in the scheduler")]
pub struct JobListCommand {
    #[arg(
        short = 'd',
        long = "debug",
        help = "Dumps the outgoing requests and incoming responses"
    )]
    debug: bool,
}

#[derive(Tabled)]
struct JobRow {
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "schedule")]
    schedule: String,
    #[tabled(rename = "cpus")]
    cpus: f64,
    #[tabled(rename = "mem")]
    mem: f64,
    #[tabled(rename = "errors")]
    error_count: u64,
    #[tabled(rename = "successes")]
    success_count: u64,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "last outcome")]
    last_outcome: String,
}

impl JobRow {
    fn new(job: &Job, status: &JobStatus) -> Self {
        Self {
            name: job.name.clone(),
            schedule: job.schedule.clone(),
            cpus: job.cpus,
            mem: job.mem,
            error_count: job.error_count,
            success_count: job.success_count,
            status: status.status.clone(),
            last_outcome: status.last_outcome.clone(),
        }
    }
}

/// Correlates the job list with the status feed by name. A job gets one row
/// per matching feed line and no row at all without one, in feed order.
fn job_rows(jobs: &[Job], statuses: &[JobStatus]) -> Vec<JobRow> {
    jobs.iter()
        .flat_map(|job| {
            statuses
                .iter()
                .filter(|status| status.name == job.name)
                .map(|status| JobRow::new(job, status))
        })
        .collect()
}

impl ChronCommand for JobListCommand {
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
            let statuses = client
                .job_statuses()
                .await
                .context("could not get the job statuses")?;

            let rows = job_rows(&jobs, &statuses);
            let table = Table::new(rows).with(Style::modern()).to_string();
            println!("{table}");
            Ok(())
        })
    }
}

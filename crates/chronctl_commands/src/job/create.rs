use actix::System;
use anyhow::Result;
use chronctl_config::ChronConfig;
use chronctl_http::HttpClient;
use chronctl_models::dtos::{ContainerOptions, NewJobRequest};
use chronctl_utils::sync::IntoArc;
use chronctl_utils::variables::parse_environment;
use clap::Args;
use tracing::debug;

use crate::command::ChronCommand;

#[derive(Args)]
#[command(about = "Creates a job driven by a schedule or by parent jobs")]
pub struct JobCreateCommand {
    #[arg(
        short = 'd',
        long = "debug",
        help = "Dumps the outgoing requests and incoming responses"
    )]
    debug: bool,

    #[arg(help = "The name of the job")]
    name: String,

    #[arg(
        short = 'c',
        long = "cpus",
        default_value_t = 0.1,
        help = "Allocated cpus for the job"
    )]
    cpus: f64,

    #[arg(
        short = 'r',
        long = "ram",
        default_value_t = 64.0,
        help = "Allocated ram for the job"
    )]
    ram: f64,

    #[arg(long = "disk", default_value_t = 0.0, help = "Allocated disk space for the job")]
    disk: f64,

    #[arg(long = "command", help = "The command to launch")]
    command: Option<String>,

    #[arg(
        short = 's',
        long = "schedule",
        help = "The iso8601 schedule of the job, mutually exclusive with --parents"
    )]
    schedule: Option<String>,

    #[arg(short = 'e', long = "epsilon", help = "The tolerated delay for the job's execution")]
    epsilon: Option<String>,

    #[arg(short = 'o', long = "owner", help = "The email of the job's owner")]
    owner: Option<String>,

    #[arg(long = "owner-name", help = "The display name of the job's owner")]
    owner_name: Option<String>,

    #[arg(long = "description", help = "The description of the job")]
    description: Option<String>,

    #[arg(
        short = 'p',
        long = "parents",
        help = "Comma separated list of jobs this job depends on, mutually exclusive with --schedule"
    )]
    parents: Option<String>,

    #[arg(short = 'a', long = "async", help = "Marks the job as asynchronous")]
    async_job: bool,

    #[arg(
        long = "environment",
        help = "Comma separated list of name=value environment variables"
    )]
    environment: Option<String>,

    #[arg(long = "container", help = "The container type to run the job in")]
    container: Option<String>,

    #[arg(long = "container-image", help = "The container image to use")]
    container_image: Option<String>,

    #[arg(
        long = "container-network",
        default_value = "BRIDGE",
        help = "The container network mode to use"
    )]
    container_network: String,

    #[arg(long = "container-force-pull", help = "Force pull the container image")]
    container_force_pull: bool,
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

impl JobCreateCommand {
    fn new_job_request(&self) -> NewJobRequest {
        let parents = non_empty(self.parents.as_deref())
            .map(|parents| parents.split(',').map(str::to_owned).collect());

        let environment = self
            .environment
            .as_deref()
            .map(parse_environment)
            .filter(|variables| !variables.is_empty());

        let container = non_empty(self.container.as_deref()).map(|container_type| {
            ContainerOptions {
                container_type,
                image: self.container_image.clone().unwrap_or_default(),
                network: self.container_network.clone(),
                force_pull_image: self.container_force_pull,
            }
        });

        NewJobRequest {
            name: self.name.clone(),
            command: non_empty(self.command.as_deref()),
            schedule: non_empty(self.schedule.as_deref()),
            parents,
            epsilon: non_empty(self.epsilon.as_deref()),
            async_job: self.async_job.then_some(true),
            owner: non_empty(self.owner.as_deref()),
            owner_name: non_empty(self.owner_name.as_deref()),
            description: non_empty(self.description.as_deref()),
            cpus: (self.cpus != 0.0).then_some(self.cpus),
            disk: (self.disk != 0.0).then_some(self.disk),
            mem: (self.ram != 0.0).then_some(self.ram),
            environment_variables: environment,
            constraints: None,
            container,
        }
    }
}

impl ChronCommand for JobCreateCommand {
    fn verbose(&self) -> bool {
        self.debug
    }

    fn exec(self) -> Result<()> {
        let request = self.new_job_request();
        request.validate()?;

        debug!("creating job {}", request.name);

        let config = ChronConfig::load()?.into_arc();
        let client = HttpClient::new(config, self.debug);

        System::new().block_on(async move {
            if request.schedule.is_some() {
                client.create_scheduled_job(&request).await
            } else {
                client.create_dependency_job(&request).await
            }
        })
    }
}

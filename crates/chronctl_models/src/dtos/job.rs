use std::error::Error;
use std::fmt::{Display, Formatter};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Local precondition failure raised before any request is sent.
#[derive(Debug)]
pub struct ValidationError {
    text: String,
}

impl ValidationError {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

impl EnvironmentVariable {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContainerOptions {
    #[serde(rename = "type")]
    pub container_type: String,

    pub image: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub network: String,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_pull_image: bool,
}

/// A job record as the scheduler returns it. Field names follow the wire
/// format, counters and timestamps are server assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Job {
    pub name: String,
    pub command: String,
    pub schedule: String,
    pub shell: bool,
    pub epsilon: String,
    pub executor: String,
    pub executor_flags: String,
    pub retries: u64,
    pub owner: String,
    pub owner_name: String,
    pub description: String,
    #[serde(rename = "async")]
    pub async_job: bool,
    pub success_count: u64,
    pub error_count: u64,
    pub last_success: String,
    pub last_error: String,
    pub cpus: f64,
    pub disk: f64,
    pub mem: f64,
    pub disabled: bool,
    pub parents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<Vec<EnvironmentVariable>>,
    pub constraints: Vec<String>,
    pub arguments: Vec<String>,
    pub run_as_user: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerOptions>,
}

/// Creation payload. Every optional field is absent from the wire when unset
/// so the scheduler keeps its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewJobRequest {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<String>,

    #[serde(rename = "async", skip_serializing_if = "Option::is_none")]
    pub async_job: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_variables: Option<Vec<EnvironmentVariable>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<ContainerOptions>,
}

impl NewJobRequest {
    /// A job is driven by exactly one of a schedule or parent dependencies,
    /// and a container type always comes with an image.
    pub fn validate(&self) -> Result<()> {
        if self.schedule.is_some() && self.parents.is_some() {
            return Err(ValidationError::new(
                "a job takes either a schedule or parent jobs, not both",
            )
            .into());
        }

        if self.schedule.is_none() && self.parents.is_none() {
            return Err(ValidationError::new(
                "a job requires either a schedule or parent jobs",
            )
            .into());
        }

        if let Some(container) = &self.container {
            if container.image.is_empty() {
                return Err(ValidationError::new(
                    "a container image is required when a container type is set",
                )
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scheduled_request() -> NewJobRequest {
        NewJobRequest {
            name: "etl-1".to_owned(),
            command: Some("ls -l".to_owned()),
            schedule: Some("R/2026-01-01T00:00:00Z/PT24H".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn new_job_request_omits_unset_fields_on_the_wire() {
        let value = serde_json::to_value(scheduled_request()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.get("name"), Some(&json!("etl-1")));
        assert_eq!(object.get("command"), Some(&json!("ls -l")));
        assert!(object.contains_key("schedule"));
        for absent in [
            "parents",
            "epsilon",
            "async",
            "owner",
            "ownerName",
            "description",
            "cpus",
            "disk",
            "mem",
            "environmentVariables",
            "constraints",
            "container",
        ] {
            assert!(!object.contains_key(absent), "{absent} should be omitted");
        }
    }

    #[test]
    fn new_job_request_serializes_set_fields_with_wire_names() {
        let request = NewJobRequest {
            name: "report".to_owned(),
            parents: Some(vec!["etl-1".to_owned(), "etl-2".to_owned()]),
            async_job: Some(true),
            owner_name: Some("Data Team".to_owned()),
            cpus: Some(0.1),
            mem: Some(64.0),
            environment_variables: Some(vec![EnvironmentVariable::new("FOO", "bar")]),
            container: Some(ContainerOptions {
                container_type: "DOCKER".to_owned(),
                image: "alpine:3".to_owned(),
                network: "BRIDGE".to_owned(),
                force_pull_image: false,
            }),
            ..Default::default()
        };

        let value = serde_json::to_value(request).unwrap();
        assert_eq!(value["parents"], json!(["etl-1", "etl-2"]));
        assert_eq!(value["async"], json!(true));
        assert_eq!(value["ownerName"], json!("Data Team"));
        assert_eq!(value["cpus"], json!(0.1));
        assert_eq!(value["mem"], json!(64.0));
        assert_eq!(
            value["environmentVariables"],
            json!([{"name": "FOO", "value": "bar"}])
        );
        assert_eq!(value["container"]["type"], json!("DOCKER"));
        assert_eq!(value["container"]["image"], json!("alpine:3"));
        assert_eq!(value["container"]["network"], json!("BRIDGE"));
        assert_eq!(value["container"].get("forcePullImage"), None);
    }

    #[test]
    fn job_decodes_from_a_scheduler_response() {
        let body = json!({
            "name": "etl-1",
            "command": "ls -l",
            "schedule": "R/2026-01-01T00:00:00Z/PT24H",
            "epsilon": "PT30M",
            "executor": "",
            "executorFlags": "",
            "retries": 2,
            "owner": "data@example.com",
            "ownerName": "Data Team",
            "description": "nightly etl",
            "async": false,
            "successCount": 12,
            "errorCount": 3,
            "lastSuccess": "2026-08-29T02:00:00.000Z",
            "lastError": "",
            "cpus": 0.1,
            "disk": 256.0,
            "mem": 128.0,
            "disabled": false,
            "parents": [],
            "constraints": [],
            "arguments": [],
            "runAsUser": "root",
            "container": {
                "type": "DOCKER",
                "image": "alpine:3",
                "network": "BRIDGE"
            }
        });

        let job: Job = serde_json::from_value(body).unwrap();
        assert_eq!(job.name, "etl-1");
        assert_eq!(job.owner_name, "Data Team");
        assert_eq!(job.success_count, 12);
        assert_eq!(job.error_count, 3);
        assert_eq!(job.mem, 128.0);
        assert_eq!(job.run_as_user, "root");
        let container = job.container.unwrap();
        assert_eq!(container.container_type, "DOCKER");
        assert!(!container.force_pull_image);
    }

    #[test]
    fn job_tolerates_missing_optional_fields() {
        let job: Job = serde_json::from_value(json!({"name": "bare"})).unwrap();
        assert_eq!(job.name, "bare");
        assert!(job.parents.is_empty());
        assert!(job.environment_variables.is_none());
        assert!(job.container.is_none());
    }

    #[test]
    fn validation_rejects_schedule_and_parents_together() {
        let mut request = scheduled_request();
        request.parents = Some(vec!["etl-0".to_owned()]);

        let err = request.validate().unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }

    #[test]
    fn validation_rejects_missing_trigger() {
        let request = NewJobRequest {
            name: "neither".to_owned(),
            ..Default::default()
        };

        let err = request.validate().unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }

    #[test]
    fn validation_rejects_container_without_image() {
        let mut request = scheduled_request();
        request.container = Some(ContainerOptions {
            container_type: "DOCKER".to_owned(),
            ..Default::default()
        });

        let err = request.validate().unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());
    }

    #[test]
    fn validation_accepts_exactly_one_trigger() {
        assert!(scheduled_request().validate().is_ok());

        let request = NewJobRequest {
            name: "report".to_owned(),
            parents: Some(vec!["etl-1".to_owned()]),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }
}

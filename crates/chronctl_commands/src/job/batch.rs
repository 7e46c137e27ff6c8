use std::future::Future;

use anyhow::Result;
use tracing::{error, info};

/// Runs one scheduler call per job name, strictly in order. A failing name is
/// logged with its cause and the remaining names still execute.
pub async fn for_each_job<F, Fut>(names: &[String], done: &str, failed: &str, op: F)
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    for name in names {
        match op(name.clone()).await {
            Ok(()) => info!("{done} {name}"),
            Err(e) => error!("{failed} {name}: {e}"),
        }
    }
}

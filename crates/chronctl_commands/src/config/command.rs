use anyhow::Result;
use chronctl_config::ChronConfig;
use clap::Args;
use tracing_subscriber::filter::LevelFilter;

use crate::command::ChronCommand;

#[derive(Args)]
#[command(about = "Prints the resolved chronctl configuration")]
pub struct ConfigCommand;

impl ChronCommand for ConfigCommand {
    fn verbose(&self) -> bool {
        false
    }

    fn tracing_level(&self) -> LevelFilter {
        LevelFilter::OFF
    }

    fn exec(self) -> Result<()> {
        let mut config = ChronConfig::load()?;
        if !config.password.is_empty() {
            config.password = "********".to_owned();
        }
        println!("{}", serde_yaml_ng::to_string(&config)?);
        Ok(())
    }
}

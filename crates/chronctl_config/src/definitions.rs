pub const VERSION: &str = "0.1";
pub const TOOL_CONFIG_FILE: &str = "chronctl.yaml";
pub const SYSTEM_CONFIG_DIR: &str = "/etc";

pub const DEFAULT_SCHEDULER_URL: &str = "http://localhost:4400";

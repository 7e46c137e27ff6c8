mod command;

pub use command::ConfigCommand;

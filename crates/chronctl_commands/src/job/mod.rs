mod batch;
mod command;
mod create;
mod delete;
mod kill;
mod list;
mod run;
mod show;

pub use command::JobCommand;

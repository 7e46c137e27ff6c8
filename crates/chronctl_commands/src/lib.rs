pub mod cli;
pub mod command;
mod config;
mod job;

pub use cli::*;

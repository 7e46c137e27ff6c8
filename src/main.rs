use chronctl_commands::Cli;
use clap::Parser;

fn main() {
    if let Err(e) = Cli::parse().exec() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

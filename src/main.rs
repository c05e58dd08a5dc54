use clap::Parser;
use stocklab::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}

use clap::Parser;
use std::process::ExitCode;
use tally_cli::args::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    match tally_cli::app::run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("tally: {e:#}");
            ExitCode::FAILURE
        }
    }
}

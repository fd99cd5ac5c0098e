// crates/cli/src/app.rs
use crate::args::Args;
use crate::config::{Config, ReportOptions};
use crate::presentation;
use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

pub fn run(args: &Args) -> Result<ExitCode> {
    crate::logging::init(args.verbose);

    let config = Config::try_from(args).context("invalid configuration")?;
    let report = ReportOptions::from(args);
    tracing::debug!(mode = %config.mode, sources = config.sources.len(), "starting run");

    let result = tally_engine::run(&config);
    if !args.quiet {
        for err in &result.errors {
            eprintln!("tally: {err}");
        }
    }

    let mut out = BufWriter::new(io::stdout().lock());
    let written = presentation::write_report(&mut out, &result, config.mode, &report)
        .and_then(|()| out.flush().map_err(Into::into));
    match written {
        Err(e) if e.is_broken_pipe() => return Ok(ExitCode::SUCCESS),
        other => other.context("failed to write report")?,
    }

    if result.all_failed() {
        tracing::info!("no source could be read");
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

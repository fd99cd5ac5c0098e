// crates/cli/src/presentation.rs
use crate::config::ReportOptions;
use crate::error::Result;
use crate::options::{OutputFormat, SortOrder};
use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;
use tally_core::{DuplicateEntry, DuplicateTable, Mode, Outcome};
use tally_engine::stats::{RunResult, SourceStats, SourceStatus};

/// Render the run result to `out`.
///
/// # Errors
///
/// Fails when writing to `out` or serialising JSON fails.
pub fn write_report<W: Write>(
    out: &mut W,
    result: &RunResult,
    mode: Mode,
    options: &ReportOptions,
) -> Result<()> {
    match (&result.outcome, options.format) {
        (Outcome::Count(total), OutputFormat::Text) => {
            write_count_text(out, *total, &result.sources, options)
        }
        (Outcome::Count(total), OutputFormat::Json) => {
            write_count_json(out, *total, &result.sources, mode, options)
        }
        (Outcome::Duplicates(table), OutputFormat::Text) => {
            write_duplicates_text(out, &sorted(table, options.sort))
        }
        (Outcome::Duplicates(table), OutputFormat::Json) => {
            write_duplicates_json(out, &sorted(table, options.sort), mode)
        }
    }
}

fn sorted(table: &DuplicateTable, order: SortOrder) -> Vec<&DuplicateEntry> {
    let mut rows: Vec<_> = table.iter().collect();
    match order {
        SortOrder::None => {}
        SortOrder::Count => rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.line.cmp(&b.line))),
        SortOrder::Line => rows.sort_by(|a, b| a.line.cmp(&b.line)),
    }
    rows
}

/// Sources that contributed tokens, i.e. every source that could be opened.
fn read_sources(sources: &[SourceStats]) -> impl Iterator<Item = &SourceStats> {
    sources
        .iter()
        .filter(|s| !matches!(s.status, SourceStatus::OpenFailed))
}

fn write_count_text<W: Write>(
    out: &mut W,
    total: u64,
    sources: &[SourceStats],
    options: &ReportOptions,
) -> Result<()> {
    if options.per_source {
        for s in read_sources(sources) {
            writeln!(out, "{}\t{}", s.tokens, s.name)?;
        }
        writeln!(out, "{total}\ttotal")?;
    } else {
        writeln!(out, "{total}")?;
    }
    Ok(())
}

fn write_duplicates_text<W: Write>(out: &mut W, rows: &[&DuplicateEntry]) -> Result<()> {
    for entry in rows {
        write!(out, "{}\t{}\t", entry.count, entry.source)?;
        out.write_all(&entry.line)?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

#[derive(Serialize)]
struct SourceCount {
    source: String,
    count: u64,
    complete: bool,
}

#[derive(Serialize)]
struct CountReport {
    mode: Mode,
    count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources: Option<Vec<SourceCount>>,
}

#[derive(Serialize)]
struct DuplicateRow<'a> {
    count: u64,
    source: &'a str,
    line: Cow<'a, str>,
}

#[derive(Serialize)]
struct DuplicateReport<'a> {
    mode: Mode,
    duplicates: Vec<DuplicateRow<'a>>,
}

fn write_count_json<W: Write>(
    out: &mut W,
    total: u64,
    sources: &[SourceStats],
    mode: Mode,
    options: &ReportOptions,
) -> Result<()> {
    let sources = options.per_source.then(|| {
        read_sources(sources)
            .map(|s| SourceCount {
                source: s.name.to_string(),
                count: s.tokens,
                complete: s.succeeded(),
            })
            .collect()
    });
    let report = CountReport {
        mode,
        count: total,
        sources,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn write_duplicates_json<W: Write>(out: &mut W, rows: &[&DuplicateEntry], mode: Mode) -> Result<()> {
    let report = DuplicateReport {
        mode,
        duplicates: rows
            .iter()
            .map(|e| DuplicateRow {
                count: e.count,
                source: &e.source,
                line: String::from_utf8_lossy(&e.line),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

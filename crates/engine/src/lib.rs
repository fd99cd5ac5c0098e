// crates/engine/src/lib.rs
use std::io::BufRead;
use tally_core::{Aggregator, Granularity};

pub mod config;
pub mod count;
pub mod error;
pub mod source;
pub mod stats;
pub mod tokenizer;

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::source::Source;
use crate::stats::{RunResult, SourceStats, SourceStatus};

/// Run the pipeline over the configured sources.
///
/// Sources are processed one after another. A source that cannot be opened or
/// read is recorded in `RunResult::errors` and the run moves on, so the outcome
/// always reflects every source that could be read (partially or fully).
#[must_use]
pub fn run(config: &Config) -> RunResult {
    run_sources(
        source::resolve(&config.sources, config.buffer_capacity),
        config,
    )
}

/// Same as [`run`] over already resolved sources.
pub fn run_sources<I>(sources: I, config: &Config) -> RunResult
where
    I: IntoIterator<Item = Result<Source>>,
{
    let mut aggregator = Aggregator::new(config.mode);
    let mut result_sources = Vec::new();
    let mut errors = Vec::new();

    for opened in sources {
        let source = match opened {
            Ok(source) => source,
            Err(e) => {
                log::warn!("skipping source: {e}");
                if let Some(name) = e.source_name() {
                    result_sources.push(SourceStats {
                        name: name.clone(),
                        tokens: 0,
                        status: SourceStatus::OpenFailed,
                    });
                }
                errors.push(e);
                continue;
            }
        };

        let (stats, error) = consume(source, &mut aggregator, config);
        result_sources.push(stats);
        errors.extend(error);
    }

    RunResult {
        outcome: aggregator.finish(),
        sources: result_sources,
        errors,
    }
}

/// Feed one source into the aggregator. The source is dropped, and so closed,
/// before this returns, whether or not reading succeeded.
fn consume(
    source: Source,
    aggregator: &mut Aggregator,
    config: &Config,
) -> (SourceStats, Option<EngineError>) {
    let granularity = config.mode.granularity();
    let (name, mut reader) = source.into_parts();
    aggregator.begin_source(&name.to_string());

    let mut tokens = 0u64;
    let read = if config.fast_count && aggregator.is_counting() && granularity != Granularity::Word {
        let read = count::count_chunks(&mut reader, granularity, &mut tokens);
        aggregator.add_count(tokens);
        read
    } else {
        fold_tokens(&mut reader, granularity, aggregator, &mut tokens)
    };
    drop(reader);

    log::debug!("{name}: {tokens} tokens");
    match read {
        Ok(()) => (
            SourceStats {
                name,
                tokens,
                status: SourceStatus::Completed,
            },
            None,
        ),
        Err(source) => {
            log::warn!("{name}: read failed after {tokens} tokens: {source}");
            (
                SourceStats {
                    name: name.clone(),
                    tokens,
                    status: SourceStatus::ReadFailed,
                },
                Some(EngineError::Read { name, source }),
            )
        }
    }
}

fn fold_tokens<R: BufRead>(
    reader: R,
    granularity: Granularity,
    aggregator: &mut Aggregator,
    tokens: &mut u64,
) -> std::io::Result<()> {
    tokenizer::Tokens::new(reader, granularity).try_for_each(|token| {
        aggregator.observe(token?);
        *tokens += 1;
        Ok(())
    })
}

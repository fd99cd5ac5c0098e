// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::AppError;
use crate::options::{ModeArg, OutputFormat, SortOrder};
pub use tally_engine::config::{Config, ConfigBuilder};
use tally_engine::error::EngineError;
use tally_engine::source::SourceName;
use tally_core::Mode;

/// How the result is rendered. Not seen by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub format: OutputFormat,
    pub sort: SortOrder,
    pub per_source: bool,
}

impl From<&Args> for ReportOptions {
    fn from(args: &Args) -> Self {
        Self {
            format: args.format,
            sort: args.sort,
            per_source: args.per_source,
        }
    }
}

impl TryFrom<&Args> for Config {
    type Error = AppError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let sources: Vec<SourceName> = args.sources.iter().cloned().map(SourceName::parse).collect();
        let mode: Mode = args.mode().into();

        let mut builder = ConfigBuilder::default();
        builder
            .sources(sources)
            .mode(mode)
            .fast_count(!args.no_fast_count);
        if let Some(size) = args.buffer_size {
            builder.buffer_capacity(size);
        }
        Ok(builder.build().map_err(EngineError::from)?)
    }
}

// CLI -> core enum conversion

macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident => $target:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$target, )+
                }
            }
        }
    };
}

map_enum!(
    ModeArg,
    Mode,
    Lines => CountLines,
    Words => CountWords,
    Bytes => CountBytes,
    Dup => FindDuplicates
);

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn args_to_config() {
        let args = Args::parse_from(["tally", "-d", "x.txt", "-", "--buffer-size", "128"]);
        let config = Config::try_from(&args).unwrap();
        assert_eq!(config.mode, Mode::FindDuplicates);
        assert_eq!(
            config.sources,
            vec![SourceName::from("x.txt"), SourceName::Stdin]
        );
        assert_eq!(config.buffer_capacity, 128);
        assert!(config.fast_count);
    }

    #[test]
    fn zero_buffer_is_a_config_error() {
        let args = Args::parse_from(["tally", "--buffer-size", "0"]);
        assert!(matches!(
            Config::try_from(&args),
            Err(AppError::Engine(EngineError::Config(_)))
        ));
    }

    #[test]
    fn report_options_from_args() {
        let args = Args::parse_from(["tally", "--format", "json", "--sort", "count", "--per-source"]);
        let report = ReportOptions::from(&args);
        assert_eq!(report.format, OutputFormat::Json);
        assert_eq!(report.sort, SortOrder::Count);
        assert!(report.per_source);
    }
}

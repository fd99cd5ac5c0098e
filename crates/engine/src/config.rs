use crate::source::SourceName;
use derive_builder::Builder;
use tally_core::Mode;

/// Read buffer size used for file sources.
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Immutable settings for one run.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Config {
    /// Sources in processing order. Empty means standard input.
    #[builder(default)]
    pub sources: Vec<SourceName>,
    #[builder(default)]
    pub mode: Mode,
    #[builder(default = "DEFAULT_BUFFER_CAPACITY")]
    pub buffer_capacity: usize,
    /// Count lines and bytes on raw chunks instead of through the tokenizer.
    #[builder(default = "true")]
    pub fast_count: bool,
}

impl ConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.buffer_capacity {
            Some(0) => Err("buffer capacity must be greater than zero".to_string()),
            _ => Ok(()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: vec![],
            mode: Mode::default(),
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            fast_count: true,
        }
    }
}

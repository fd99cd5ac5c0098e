use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Unit a byte stream is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Newline-delimited lines, delimiter excluded.
    Line,
    /// Runs of non-whitespace.
    Word,
    /// Single bytes.
    Byte,
}

/// What a run reduces its sources to. Selected once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    CountLines,
    CountWords,
    CountBytes,
    /// Duplicate detection is always line-oriented.
    #[serde(rename = "find-duplicate-lines")]
    FindDuplicates,
}

impl Mode {
    pub const ALL: [Self; 4] = [
        Self::CountLines,
        Self::CountWords,
        Self::CountBytes,
        Self::FindDuplicates,
    ];

    #[must_use]
    pub const fn granularity(self) -> Granularity {
        match self {
            Self::CountLines | Self::FindDuplicates => Granularity::Line,
            Self::CountWords => Granularity::Word,
            Self::CountBytes => Granularity::Byte,
        }
    }

    #[must_use]
    pub const fn is_counting(self) -> bool {
        !matches!(self, Self::FindDuplicates)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CountLines => "count-lines",
            Self::CountWords => "count-words",
            Self::CountBytes => "count-bytes",
            Self::FindDuplicates => "find-duplicate-lines",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError(String);

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown mode: {}", self.0)
    }
}

impl core::error::Error for ParseModeError {}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" | "count-lines" => Ok(Self::CountLines),
            "words" | "count-words" => Ok(Self::CountWords),
            "bytes" | "count-bytes" => Ok(Self::CountBytes),
            "dup" | "duplicates" | "find-duplicate-lines" => Ok(Self::FindDuplicates),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

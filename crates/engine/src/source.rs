//! Input resolution: names to open, buffered byte streams.

use crate::error::{EngineError, Result};
use crate::tokenizer::Tokens;
use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use tally_core::Granularity;

/// Identifier of a source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceName {
    Stdin,
    Path(PathBuf),
}

impl SourceName {
    /// `-` means standard input, anything else is a path.
    pub fn parse(arg: impl Into<OsString>) -> Self {
        let arg = arg.into();
        if arg == "-" {
            Self::Stdin
        } else {
            Self::Path(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for SourceName {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<PathBuf> for SourceName {
    fn from(path: PathBuf) -> Self {
        Self::parse(path)
    }
}

/// An open source. Dropping it closes the underlying stream.
pub struct Source {
    name: SourceName,
    reader: Box<dyn BufRead>,
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Source {
    /// Opens `name` with a read buffer of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Open`] when the path cannot be opened or is a
    /// directory.
    pub fn open(name: SourceName, capacity: usize) -> Result<Self> {
        let path = match &name {
            SourceName::Stdin => return Ok(Self::stdin()),
            SourceName::Path(path) => path,
        };

        let opened = File::open(path).and_then(|file| {
            if file.metadata()?.is_dir() {
                return Err(io::Error::from(io::ErrorKind::IsADirectory));
            }
            Ok(file)
        });

        match opened {
            Ok(file) => Ok(Self {
                reader: Box::new(BufReader::with_capacity(capacity, file)),
                name,
            }),
            Err(source) => Err(EngineError::Open { name, source }),
        }
    }

    #[must_use]
    pub fn stdin() -> Self {
        Self {
            name: SourceName::Stdin,
            reader: Box::new(io::stdin().lock()),
        }
    }

    /// Wraps an already open reader.
    pub fn from_reader(name: impl Into<SourceName>, reader: impl BufRead + 'static) -> Self {
        Self {
            name: name.into(),
            reader: Box::new(reader),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &SourceName {
        &self.name
    }

    pub fn tokens(self, granularity: Granularity) -> Tokens<Box<dyn BufRead>> {
        Tokens::new(self.reader, granularity)
    }

    #[must_use]
    pub fn into_parts(self) -> (SourceName, Box<dyn BufRead>) {
        (self.name, self.reader)
    }
}

/// Lazily opens sources in order.
///
/// At most one source is open at a time: the next one is only opened when the
/// iterator is advanced. A failed open is yielded as an error and does not stop
/// the iteration.
#[derive(Debug)]
pub struct Resolver {
    names: std::vec::IntoIter<SourceName>,
    capacity: usize,
}

impl Iterator for Resolver {
    type Item = Result<Source>;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.names.next()?;
        log::debug!("opening {name}");
        Some(Source::open(name, self.capacity))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.names.size_hint()
    }
}

impl ExactSizeIterator for Resolver {}

/// Resolves `names` to sources, standard input when `names` is empty.
#[must_use]
pub fn resolve(names: &[SourceName], capacity: usize) -> Resolver {
    let names = if names.is_empty() {
        vec![SourceName::Stdin]
    } else {
        names.to_vec()
    };
    Resolver {
        names: names.into_iter(),
        capacity,
    }
}

#![no_std]
#![allow(clippy::cargo_common_metadata)]

//! Token and aggregation primitives for `tally`.
//!
//! Everything in this crate works on bytes already pulled from a source; the
//! I/O side (opening sources, buffering, read errors) lives in `tally_engine`.

extern crate alloc;

pub mod aggregate;
pub mod mode;
pub mod scan;
pub mod token;

pub use aggregate::{
    Aggregator, DuplicateEntry, DuplicateFinder, DuplicateTable, Outcome, SourceId, TokenCounter,
};
pub use mode::{Granularity, Mode, ParseModeError};
pub use token::Token;

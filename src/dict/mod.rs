//! Lexicon storage.
//!
//! `Lexicon` maps romanized words to weighted Sinhala renderings, holds the
//! idiom table and the foreign-word list. It is authored as TOML and can be
//! compiled to a binary (SNLX) file that is opened through `memmap2`.

mod entry;
mod lexicon;
mod lexicon_io;
#[cfg(test)]
mod tests;
mod toml_source;

pub use entry::{ContextCondition, GrammarTag, Idiom, MappingEntry};
pub use lexicon::{Lexicon, LexiconStats, DEFAULT_LEXICON_TOML};
pub use lexicon_io::{MAGIC, VERSION};
pub use toml_source::{parse_lexicon_toml, LexiconData, DEFAULT_WEIGHT, LEXICON_VERSION};

use std::io;

/// Errors raised while loading, validating or saving a lexicon.
///
/// All of them surface at initialization; translation itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected SNLX)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid lexicon: {0}")]
    Invalid(String),
}

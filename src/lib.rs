//! Singlish to Sinhala transliteration.
//!
//! Romanized Sinhala ("Singlish") goes through a fixed pipeline:
//! [`normalizer`] collapses whitespace and classifies chunks, [`segmenter`]
//! recovers word boundaries in run-on input, [`mapper`] proposes dictionary
//! and phonetic renderings, [`resolver`] picks one per word from its
//! neighbours and idioms, and [`composer`] assembles the output. English
//! words, acronyms, numerals and punctuation pass through untouched.
//!
//! ```
//! use singlish_engine::translate;
//!
//! assert_eq!(translate("mama adha gedhara innee"), "මම අද ගෙදර ඉන්නේ");
//! assert_eq!(translate("mamagedharainnee"), "මම ගෙදර ඉන්නේ");
//! ```

pub mod composer;
pub mod dict;
pub mod engine;
pub mod explain;
pub mod mapper;
pub mod normalizer;
pub mod phonetic;
pub mod resolver;
pub mod segmenter;
pub mod settings;
mod trace_init;
pub mod trie;
pub mod types;
pub mod unicode;

pub use dict::{DictError, Lexicon};
pub use engine::{translate, translate_incremental, Engine, IncrementalState};
pub use trace_init::{init_tracing, TraceGuard};
pub use types::{OutputToken, TranslationResult};

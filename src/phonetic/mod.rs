//! Singlish-to-Sinhala grapheme conversion.
//!
//! A trie over the grapheme table finds the longest romanized key at each
//! position; keys are then composed into clusters (consonant, conjunct
//! medial, vowel sign, modifier) and rendered in Unicode logical order.

mod cluster;
mod config;
mod convert;
mod table;
mod trie;

pub use cluster::{Cluster, ClusterLayout, Grapheme, Placement, Vowel};
pub use config::{parse_phonetic_toml, PhoneticConfigError, PhoneticTable};
pub use convert::{transliterate, transliterate_with, PhoneticRendering};
pub use table::DEFAULT_TOML;
pub use trie::PhoneticTrie;

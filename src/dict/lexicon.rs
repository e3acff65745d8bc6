use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::debug;

use super::entry::{Idiom, MappingEntry};
use super::toml_source::{parse_lexicon_toml, LexiconData, LEXICON_VERSION};
use super::DictError;
use crate::trie::PrefixTrie;

pub const DEFAULT_LEXICON_TOML: &str = include_str!("default_lexicon.toml");

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// The romanized-word → Sinhala mapping table.
///
/// Built once, immutable afterwards, and shared behind an `Arc`.
pub struct Lexicon {
    id: u64,
    version: u32,
    trie: PrefixTrie,
    keys: Vec<String>,
    /// Per key id, sorted by weight (desc) then registration order.
    entries: Vec<Vec<MappingEntry>>,
    idioms: Vec<Idiom>,
    idiom_index: HashMap<String, usize>,
    idiom_index_lower: HashMap<String, usize>,
    max_idiom_words: usize,
    foreign: HashSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexiconStats {
    pub keys: usize,
    pub entries: usize,
    pub idioms: usize,
    pub foreign: usize,
}

fn is_roman_word(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic())
}

impl Lexicon {
    pub fn from_toml(toml_str: &str) -> Result<Self, DictError> {
        Self::from_data(parse_lexicon_toml(toml_str)?)
    }

    /// Validate `data` and build the lookup structures.
    pub fn from_data(data: LexiconData) -> Result<Self, DictError> {
        if data.version != LEXICON_VERSION {
            return Err(DictError::Invalid(format!(
                "unsupported lexicon version {} (expected {LEXICON_VERSION})",
                data.version
            )));
        }

        let mut trie = PrefixTrie::new();
        let mut keys: Vec<String> = Vec::new();
        let mut entries: Vec<Vec<MappingEntry>> = Vec::new();
        for e in data.entries {
            if !is_roman_word(&e.roman) {
                return Err(DictError::Invalid(format!(
                    "roman key must be ASCII letters: {:?}",
                    e.roman
                )));
            }
            if e.script.trim().is_empty() {
                return Err(DictError::Invalid(format!("empty script for {}", e.roman)));
            }
            let id = match trie.exact_match(e.roman.as_bytes()) {
                Some(id) => id as usize,
                None => {
                    let id = keys.len();
                    trie.insert(e.roman.as_bytes(), id as u32);
                    keys.push(e.roman.clone());
                    entries.push(Vec::new());
                    id
                }
            };
            entries[id].push(e);
        }
        for list in &mut entries {
            list.sort_by(|a, b| b.weight.cmp(&a.weight).then(a.order.cmp(&b.order)));
        }

        let mut idiom_index = HashMap::new();
        let mut idiom_index_lower = HashMap::new();
        let mut max_idiom_words = 0;
        for (i, idiom) in data.idioms.iter().enumerate() {
            if idiom.words.len() < 2 || !idiom.words.iter().all(|w| is_roman_word(w)) {
                return Err(DictError::Invalid(format!(
                    "idiom needs two or more roman words: {:?}",
                    idiom.key()
                )));
            }
            if idiom.script.trim().is_empty() {
                return Err(DictError::Invalid(format!(
                    "empty script for idiom {:?}",
                    idiom.key()
                )));
            }
            max_idiom_words = max_idiom_words.max(idiom.words.len());
            // First registration wins on duplicates.
            idiom_index.entry(idiom.key()).or_insert(i);
            idiom_index_lower
                .entry(idiom.key().to_ascii_lowercase())
                .or_insert(i);
        }

        let mut foreign = HashSet::with_capacity(data.foreign.len());
        for w in data.foreign {
            if !is_roman_word(&w) {
                return Err(DictError::Invalid(format!(
                    "foreign word must be ASCII letters: {w:?}"
                )));
            }
            foreign.insert(w.to_ascii_lowercase());
        }

        debug!(
            keys = keys.len(),
            idioms = data.idioms.len(),
            foreign = foreign.len(),
            "lexicon built"
        );

        Ok(Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            version: data.version,
            trie,
            keys,
            entries,
            idioms: data.idioms,
            idiom_index,
            idiom_index_lower,
            max_idiom_words,
            foreign,
        })
    }

    /// The embedded default lexicon, built on first use.
    pub fn default_shared() -> Arc<Lexicon> {
        static INSTANCE: OnceLock<Arc<Lexicon>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                Arc::new(
                    Lexicon::from_toml(DEFAULT_LEXICON_TOML)
                        .expect("default lexicon TOML must be valid"),
                )
            })
            .clone()
    }

    /// Flatten back into the serializable form, in registration order.
    pub fn to_data(&self) -> LexiconData {
        let mut entries: Vec<MappingEntry> = self.entries.iter().flatten().cloned().collect();
        entries.sort_by_key(|e| e.order);
        let mut foreign: Vec<String> = self.foreign.iter().cloned().collect();
        foreign.sort();
        LexiconData {
            version: self.version,
            entries,
            idioms: self.idioms.clone(),
            foreign,
        }
    }

    /// Process-unique identity of this instance.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Entries for exactly `roman` (case-sensitive), best first.
    pub fn lookup(&self, roman: &str) -> Option<&[MappingEntry]> {
        self.trie
            .exact_match(roman.as_bytes())
            .map(|id| self.entries[id as usize].as_slice())
    }

    /// Like `lookup`, falling back to the lowercase form.
    pub fn lookup_folded(&self, roman: &str) -> Option<&[MappingEntry]> {
        self.lookup(roman).or_else(|| {
            if roman.bytes().any(|b| b.is_ascii_uppercase()) {
                self.lookup(&roman.to_ascii_lowercase())
            } else {
                None
            }
        })
    }

    pub fn contains(&self, roman: &str) -> bool {
        self.lookup_folded(roman).is_some()
    }

    /// Longest key that is a prefix of `input`, with its byte length.
    pub fn longest_prefix(&self, input: &[u8]) -> Option<(usize, &[MappingEntry])> {
        self.trie
            .longest_prefix(input)
            .map(|m| (m.len, self.entries[m.id as usize].as_slice()))
    }

    /// Every key that is a prefix of `input`, shortest first.
    pub fn common_prefix_search(&self, input: &str) -> Vec<(usize, &[MappingEntry])> {
        self.trie
            .common_prefix_search(input.as_bytes())
            .into_iter()
            .map(|m| (m.len, self.entries[m.id as usize].as_slice()))
            .collect()
    }

    /// Longest key in bytes; words longer than this cannot be a single entry.
    pub fn max_key_len(&self) -> usize {
        self.trie.max_key_len()
    }

    pub fn is_foreign(&self, word: &str) -> bool {
        self.foreign.contains(&word.to_ascii_lowercase())
    }

    /// Idiom spelled exactly by `words`, falling back to a lowercase match.
    pub fn idiom(&self, words: &[&str]) -> Option<&Idiom> {
        let key = words.join(" ");
        self.idiom_index
            .get(&key)
            .or_else(|| self.idiom_index_lower.get(&key.to_ascii_lowercase()))
            .map(|&i| &self.idioms[i])
    }

    pub fn idioms(&self) -> &[Idiom] {
        &self.idioms
    }

    pub fn max_idiom_words(&self) -> usize {
        self.max_idiom_words
    }

    /// Keys with their entries, in key registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MappingEntry])> {
        self.keys
            .iter()
            .zip(self.entries.iter())
            .map(|(k, e)| (k.as_str(), e.as_slice()))
    }

    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            keys: self.keys.len(),
            entries: self.entries.iter().map(Vec::len).sum(),
            idioms: self.idioms.len(),
            foreign: self.foreign.len(),
        }
    }
}

impl std::fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexicon")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("stats", &self.stats())
            .finish()
    }
}

use std::sync::OnceLock;

use super::cluster::Grapheme;
use super::config::{parse_phonetic_toml, PhoneticConfigError, PhoneticTable};
use super::table::DEFAULT_TOML;
use crate::trie::{PrefixMatch, PrefixTrie};

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

pub struct PhoneticTrie {
    trie: PrefixTrie,
    graphemes: Vec<Grapheme>,
    keys: Vec<String>,
    medials: Vec<char>,
}

impl PhoneticTrie {
    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), PhoneticConfigError> {
        // Validate eagerly
        parse_phonetic_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| PhoneticConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static PhoneticTrie {
        static INSTANCE: OnceLock<PhoneticTrie> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let table = parse_phonetic_toml(toml_str).expect("phonetic TOML must be valid");
            Self::from_table(table)
        })
    }

    pub fn from_table(table: PhoneticTable) -> Self {
        let mut trie = PrefixTrie::new();
        let mut graphemes = Vec::with_capacity(table.graphemes.len());
        let mut keys = Vec::with_capacity(table.graphemes.len());
        for (key, g) in table.graphemes.iter() {
            trie.insert(key.as_bytes(), graphemes.len() as u32);
            graphemes.push(g.clone());
            keys.push(key.clone());
        }
        let medials = table
            .medials
            .iter()
            .filter_map(|m| match table.graphemes.get(m) {
                Some(Grapheme::Consonant(c)) => Some(*c),
                _ => None,
            })
            .collect();
        Self {
            trie,
            graphemes,
            keys,
            medials,
        }
    }

    /// Longest grapheme key at the start of `input`, with its byte length.
    pub fn longest_match(&self, input: &[u8]) -> Option<(usize, &Grapheme)> {
        self.trie
            .longest_prefix(input)
            .map(|PrefixMatch { len, id }| (len, &self.graphemes[id as usize]))
    }

    pub fn get(&self, key: &str) -> Option<&Grapheme> {
        self.trie
            .exact_match(key.as_bytes())
            .map(|id| &self.graphemes[id as usize])
    }

    /// Whether consonant `c` may join a preceding consonant as a medial.
    pub fn is_medial(&self, c: char) -> bool {
        self.medials.contains(&c)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.as_str())
    }
}

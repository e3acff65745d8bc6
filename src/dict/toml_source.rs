use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::{ContextCondition, GrammarTag, Idiom, MappingEntry};
use super::DictError;

/// Lexicon format version understood by this build.
pub const LEXICON_VERSION: u32 = 1;

/// Weight of `[words]` entries and of entries that omit `weight`.
pub const DEFAULT_WEIGHT: i32 = 10;

#[derive(Deserialize)]
struct RawLexicon {
    version: u32,
    #[serde(default)]
    words: BTreeMap<String, String>,
    #[serde(default)]
    entries: Vec<RawEntry>,
    #[serde(default)]
    idioms: Vec<RawIdiom>,
    #[serde(default)]
    foreign: RawForeign,
}

#[derive(Deserialize)]
struct RawEntry {
    roman: String,
    script: String,
    #[serde(default = "default_weight")]
    weight: i32,
    tag: Option<GrammarTag>,
    when: Option<ContextCondition>,
}

#[derive(Deserialize)]
struct RawIdiom {
    roman: String,
    script: String,
    #[serde(default = "default_weight")]
    weight: i32,
}

#[derive(Deserialize, Default)]
struct RawForeign {
    #[serde(default)]
    words: Vec<String>,
}

fn default_weight() -> i32 {
    DEFAULT_WEIGHT
}

/// Flat, serializable form of a lexicon. This is what the compiled binary
/// stores; the lookup trie is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconData {
    pub version: u32,
    pub entries: Vec<MappingEntry>,
    pub idioms: Vec<Idiom>,
    pub foreign: Vec<String>,
}

/// Parse lexicon TOML into `LexiconData`.
///
/// `[words]` entries are registered first, in key order, followed by
/// `[[entries]]` in file order. Registration order breaks weight ties.
pub fn parse_lexicon_toml(toml_str: &str) -> Result<LexiconData, DictError> {
    let raw: RawLexicon = toml::from_str(toml_str).map_err(|e| DictError::Parse(e.to_string()))?;

    let mut entries = Vec::with_capacity(raw.words.len() + raw.entries.len());
    for (roman, script) in raw.words {
        let order = entries.len() as u32;
        entries.push(MappingEntry {
            roman,
            script,
            weight: DEFAULT_WEIGHT,
            tag: None,
            when: None,
            order,
        });
    }
    for e in raw.entries {
        let order = entries.len() as u32;
        entries.push(MappingEntry {
            roman: e.roman,
            script: e.script,
            weight: e.weight,
            tag: e.tag,
            when: e.when,
            order,
        });
    }

    let idioms = raw
        .idioms
        .into_iter()
        .map(|i| Idiom {
            words: i.roman.split_whitespace().map(str::to_string).collect(),
            script: i.script,
            weight: i.weight,
        })
        .collect();

    Ok(LexiconData {
        version: raw.version,
        entries,
        idioms,
        foreign: raw.foreign.words,
    })
}

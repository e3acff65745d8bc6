use std::collections::BTreeMap;

use serde::Deserialize;

use super::cluster::{Grapheme, Placement, Vowel};
use crate::unicode::{is_sinhala, is_vowel_sign};

#[derive(Deserialize)]
struct RawTable {
    consonants: BTreeMap<String, String>,
    vowels: BTreeMap<String, RawVowel>,
    #[serde(default)]
    modifiers: BTreeMap<String, String>,
    #[serde(default)]
    conjuncts: RawConjuncts,
}

#[derive(Deserialize)]
struct RawVowel {
    independent: String,
    #[serde(default)]
    sign: String,
    placement: Placement,
    #[serde(default)]
    parts: Vec<String>,
}

#[derive(Deserialize, Default)]
struct RawConjuncts {
    #[serde(default)]
    medials: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum PhoneticConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[consonants] or [vowels] table is empty")]
    Empty,
    #[error("non-ASCII key: {0}")]
    NonAsciiKey(String),
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("value for key {0} must be a single character")]
    NotSingleChar(String),
    #[error("value for key {0} is not a Sinhala letter or sign")]
    NotSinhala(String),
    #[error("key {0} appears in more than one table")]
    DuplicateKey(String),
    #[error("medial {0} is not a consonant key")]
    UnknownMedial(String),
    #[error("vowel {0}: split placement needs two parts, other placements none")]
    InvalidParts(String),
    #[error("phonetic table already initialized")]
    AlreadyInitialized,
}

/// Parsed grapheme table: every ASCII key with its grapheme, sorted by key,
/// plus the keys of consonants that may act as conjunct medials.
#[derive(Debug, Clone)]
pub struct PhoneticTable {
    pub graphemes: BTreeMap<String, Grapheme>,
    pub medials: Vec<String>,
}

fn single_char(key: &str, value: &str) -> Result<char, PhoneticConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(PhoneticConfigError::EmptyValue(key.to_string())),
        (Some(c), None) => Ok(c),
        (Some(_), Some(_)) => Err(PhoneticConfigError::NotSingleChar(key.to_string())),
    }
}

fn sinhala_char(
    key: &str,
    value: &str,
    accept: fn(char) -> bool,
) -> Result<char, PhoneticConfigError> {
    let c = single_char(key, value)?;
    if !accept(c) {
        return Err(PhoneticConfigError::NotSinhala(key.to_string()));
    }
    Ok(c)
}

fn check_key(key: &str) -> Result<(), PhoneticConfigError> {
    if key.is_empty() || !key.is_ascii() {
        return Err(PhoneticConfigError::NonAsciiKey(key.to_string()));
    }
    Ok(())
}

/// Parse TOML text into a validated `PhoneticTable`.
pub fn parse_phonetic_toml(toml_str: &str) -> Result<PhoneticTable, PhoneticConfigError> {
    let raw: RawTable =
        toml::from_str(toml_str).map_err(|e| PhoneticConfigError::Parse(e.to_string()))?;

    if raw.consonants.is_empty() || raw.vowels.is_empty() {
        return Err(PhoneticConfigError::Empty);
    }

    let mut graphemes = BTreeMap::new();
    let mut insert = |key: &str, g: Grapheme| -> Result<(), PhoneticConfigError> {
        if graphemes.insert(key.to_string(), g).is_some() {
            return Err(PhoneticConfigError::DuplicateKey(key.to_string()));
        }
        Ok(())
    };

    for (key, value) in &raw.consonants {
        check_key(key)?;
        insert(key, Grapheme::Consonant(sinhala_char(key, value, is_sinhala)?))?;
    }

    for (key, v) in &raw.vowels {
        check_key(key)?;
        let independent = sinhala_char(key, &v.independent, is_sinhala)?;
        let sign = if v.sign.is_empty() {
            None
        } else {
            Some(sinhala_char(key, &v.sign, is_vowel_sign)?)
        };
        if sign.is_none() && v.placement != Placement::Inherent {
            return Err(PhoneticConfigError::EmptyValue(key.clone()));
        }
        let parts_ok = match v.placement {
            Placement::Split => v.parts.len() == 2 && v.parts.iter().all(|p| !p.is_empty()),
            _ => v.parts.is_empty(),
        };
        if !parts_ok {
            return Err(PhoneticConfigError::InvalidParts(key.clone()));
        }
        insert(
            key,
            Grapheme::Vowel(Vowel {
                independent,
                sign,
                placement: v.placement,
                parts: v.parts.clone(),
            }),
        )?;
    }

    for (key, value) in &raw.modifiers {
        check_key(key)?;
        insert(key, Grapheme::Modifier(sinhala_char(key, value, is_sinhala)?))?;
    }

    for medial in &raw.conjuncts.medials {
        if !matches!(graphemes.get(medial), Some(Grapheme::Consonant(_))) {
            return Err(PhoneticConfigError::UnknownMedial(medial.clone()));
        }
    }

    Ok(PhoneticTable {
        graphemes,
        medials: raw.conjuncts.medials,
    })
}

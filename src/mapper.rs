//! Candidate renderings for one romanized token.

use tracing::trace;

use crate::dict::Lexicon;
use crate::phonetic::{transliterate_with, PhoneticRendering, PhoneticTrie};
use crate::settings::{settings, ResolverSettings};
use crate::types::{Candidate, CandidateSource, RomanToken, TokenClass};

pub struct Mapper<'a> {
    lexicon: &'a Lexicon,
    phonetic: &'a PhoneticTrie,
    phonetic_weight: i32,
}

impl<'a> Mapper<'a> {
    pub fn new(lexicon: &'a Lexicon, phonetic: &'a PhoneticTrie, cfg: &ResolverSettings) -> Self {
        Self {
            lexicon,
            phonetic,
            phonetic_weight: cfg.phonetic_weight,
        }
    }

    /// Mapper over `lexicon` with the global phonetic table and settings.
    pub fn with_globals(lexicon: &'a Lexicon) -> Self {
        Self::new(lexicon, PhoneticTrie::global(), &settings().resolver)
    }

    pub fn phonetic(&self) -> &PhoneticTrie {
        self.phonetic
    }

    /// Cluster-by-cluster rendering of `roman`.
    pub fn render(&self, roman: &str) -> PhoneticRendering {
        transliterate_with(self.phonetic, roman)
    }

    /// Candidates for a Singlish token: every dictionary entry for the word
    /// (best first), then the phonetic rendering. A word with no dictionary
    /// entry and no mappable character yields one `Unresolved` candidate
    /// carrying the text as typed. Passthrough tokens have no candidates.
    pub fn map_token(&self, token: &RomanToken) -> Vec<Candidate> {
        if token.class != TokenClass::Singlish {
            return Vec::new();
        }

        let mut out: Vec<Candidate> = self
            .lexicon
            .lookup_folded(&token.text)
            .unwrap_or_default()
            .iter()
            .map(|e| Candidate {
                script: e.script.clone(),
                weight: e.weight,
                tag: e.tag,
                when: e.when,
                source: CandidateSource::Dictionary,
            })
            .collect();

        let rendering = self.render(&token.text);
        if rendering.is_unresolved() {
            out.push(Candidate {
                script: token.text.clone(),
                weight: i32::MIN,
                tag: None,
                when: None,
                source: CandidateSource::Unresolved,
            });
        } else {
            out.push(Candidate {
                script: rendering.text,
                weight: self.phonetic_weight,
                tag: None,
                when: None,
                source: CandidateSource::Phonetic,
            });
        }

        trace!(token = token.text.as_str(), candidates = out.len(), "mapped");
        out
    }
}

/// Map with the global phonetic table and settings.
pub fn map_token(token: &RomanToken, lexicon: &Lexicon) -> Vec<Candidate> {
    Mapper::with_globals(lexicon).map_token(token)
}

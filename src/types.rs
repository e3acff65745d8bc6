//! Per-call data passed between pipeline stages.

use std::fmt;

use serde::Serialize;

use crate::dict::{ContextCondition, GrammarTag};

/// Byte range into the original input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both.
    pub fn cover(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenClass {
    /// Romanized Sinhala, mapped to script.
    Singlish,
    /// A listed English word.
    Foreign,
    /// All-capitals acronym.
    Abbreviation,
    Numeral,
    Punctuation,
    /// Text already in a non-Latin script.
    Script,
}

impl TokenClass {
    /// Everything except Singlish is emitted verbatim.
    pub fn is_passthrough(self) -> bool {
        self != TokenClass::Singlish
    }
}

/// How a token came out of the segmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenOrigin {
    /// The chunk as the normalizer produced it.
    Whole,
    /// A dictionary word split out of a longer chunk.
    Segment,
    /// Leftover characters of a split that no dictionary key covered.
    Unresolved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RomanToken {
    pub text: String,
    pub span: Span,
    pub class: TokenClass,
    /// Whether the token is separated from the previous one in the output.
    pub space_before: bool,
    pub origin: TokenOrigin,
}

/// One piece of a segmentation: a dictionary key or an unresolved run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SegmentPiece {
    pub span: Span,
    pub resolved: bool,
}

/// Split points proposed for an unspaced chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentationCandidate {
    pub pieces: Vec<SegmentPiece>,
    /// Bytes covered by dictionary keys.
    pub covered: usize,
    pub total: usize,
}

impl SegmentationCandidate {
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.covered as f64 / self.total as f64
    }

    pub fn segment_count(&self) -> usize {
        self.pieces.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CandidateSource {
    Dictionary,
    Idiom,
    Phonetic,
    /// Nothing mapped; the romanized text is returned as typed.
    Unresolved,
}

/// A rendering proposed by the phonetic mapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub script: String,
    pub weight: i32,
    pub tag: Option<GrammarTag>,
    pub when: Option<ContextCondition>,
    pub source: CandidateSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedWord {
    pub script: String,
    /// Romanized surface, space-joined for idioms.
    pub roman: String,
    pub span: Span,
    pub source: CandidateSource,
    pub space_before: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Passthrough {
    pub text: String,
    pub span: Span,
    pub class: TokenClass,
    pub space_before: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum OutputToken {
    Word(ResolvedWord),
    Passthrough(Passthrough),
}

impl OutputToken {
    pub fn text(&self) -> &str {
        match self {
            OutputToken::Word(w) => &w.script,
            OutputToken::Passthrough(p) => &p.text,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            OutputToken::Word(w) => w.span,
            OutputToken::Passthrough(p) => p.span,
        }
    }

    pub fn space_before(&self) -> bool {
        match self {
            OutputToken::Word(w) => w.space_before,
            OutputToken::Passthrough(p) => p.space_before,
        }
    }
}

/// Output tokens in input order. `Display` writes the final string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TranslationResult {
    pub tokens: Vec<OutputToken>,
}

impl TranslationResult {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Words that nothing could map and were returned as typed.
    pub fn unresolved(&self) -> impl Iterator<Item = &ResolvedWord> {
        self.tokens.iter().filter_map(|t| match t {
            OutputToken::Word(w) if w.source == CandidateSource::Unresolved => Some(w),
            _ => None,
        })
    }
}

impl fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tok) in self.tokens.iter().enumerate() {
            if i > 0 && tok.space_before() {
                f.write_str(" ")?;
            }
            f.write_str(tok.text())?;
        }
        Ok(())
    }
}

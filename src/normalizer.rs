//! Input cleanup: whitespace collapsing and chunk classification.
//!
//! The normalizer never fails. It splits the raw buffer into chunks whose
//! spans point into the original text, so later stages can account for
//! every non-whitespace byte.

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::settings::{settings, NormalizerSettings};
use crate::types::Span;
use crate::unicode::{is_abbreviation, is_latin, is_passthrough_punct, leading_caps_len};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkKind {
    /// A run of Latin letters.
    Word,
    Abbreviation,
    Numeral,
    /// A single ASCII punctuation character.
    Punctuation,
    /// A run of anything else: Sinhala, other scripts, symbols.
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub text: String,
    pub span: Span,
    pub kind: ChunkKind,
    pub space_before: bool,
    /// A word longer than any dictionary key: it can only be several words
    /// typed without spaces.
    pub joined: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    canonical: String,
    chunks: Vec<Chunk>,
}

impl NormalizedText {
    /// The input with whitespace runs collapsed to one space and trimmed.
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Letter,
    Digit,
    Punct,
    Other,
}

fn char_kind(c: char) -> CharKind {
    if is_latin(c) {
        CharKind::Letter
    } else if c.is_ascii_digit() {
        CharKind::Digit
    } else if is_passthrough_punct(c) {
        CharKind::Punct
    } else {
        CharKind::Other
    }
}

/// Whitespace-separated groups with their byte offsets.
fn groups(raw: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in raw.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &raw[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &raw[s..]));
    }
    out
}

/// Runs of one character kind inside a group. Punctuation characters are
/// never merged.
fn runs(group: &str) -> Vec<(usize, usize, CharKind)> {
    let mut out: Vec<(usize, usize, CharKind)> = Vec::new();
    for (i, c) in group.char_indices() {
        let kind = char_kind(c);
        let end = i + c.len_utf8();
        match out.last_mut() {
            Some(last) if last.2 == kind && kind != CharKind::Punct => last.1 = end,
            _ => out.push((i, end, kind)),
        }
    }
    out
}

/// Normalize with the global settings.
pub fn normalize(raw: &str, max_word_len: usize) -> NormalizedText {
    normalize_with(raw, max_word_len, &settings().normalizer)
}

pub fn normalize_with(raw: &str, max_word_len: usize, cfg: &NormalizerSettings) -> NormalizedText {
    let _span = debug_span!("normalize", len = raw.len()).entered();

    let mut canonical = String::with_capacity(raw.len());
    let mut chunks = Vec::new();

    for (gi, (offset, group)) in groups(raw).into_iter().enumerate() {
        if gi > 0 {
            canonical.push(' ');
        }
        canonical.push_str(group);

        for (ri, (s, e, kind)) in runs(group).into_iter().enumerate() {
            let text = &group[s..e];
            let span = Span::new(offset + s, offset + e);
            let space_before = gi > 0 && ri == 0;
            match kind {
                CharKind::Letter => {
                    push_letters(&mut chunks, text, span, space_before, max_word_len, cfg)
                }
                CharKind::Digit => chunks.push(Chunk {
                    text: text.to_string(),
                    span,
                    kind: ChunkKind::Numeral,
                    space_before,
                    joined: false,
                }),
                CharKind::Punct => chunks.push(Chunk {
                    text: text.to_string(),
                    span,
                    kind: ChunkKind::Punctuation,
                    space_before,
                    joined: false,
                }),
                CharKind::Other => chunks.push(Chunk {
                    text: text.to_string(),
                    span,
                    kind: ChunkKind::Script,
                    space_before,
                    joined: false,
                }),
            }
        }
    }

    debug!(chunks = chunks.len(), "normalized");
    NormalizedText { canonical, chunks }
}

fn push_letters(
    chunks: &mut Vec<Chunk>,
    text: &str,
    span: Span,
    space_before: bool,
    max_word_len: usize,
    cfg: &NormalizerSettings,
) {
    if is_abbreviation(text) {
        chunks.push(Chunk {
            text: text.to_string(),
            span,
            kind: ChunkKind::Abbreviation,
            space_before,
            joined: false,
        });
        return;
    }

    // "OTPeka": an acronym glued to the word after it.
    let caps = leading_caps_len(text);
    let (word, word_span, word_space) = if caps >= cfg.abbreviation_min_prefix {
        chunks.push(Chunk {
            text: text[..caps].to_string(),
            span: Span::new(span.start, span.start + caps),
            kind: ChunkKind::Abbreviation,
            space_before,
            joined: false,
        });
        (
            &text[caps..],
            Span::new(span.start + caps, span.end),
            cfg.space_after_abbreviation,
        )
    } else {
        (text, span, space_before)
    };

    chunks.push(Chunk {
        text: word.to_string(),
        span: word_span,
        kind: ChunkKind::Word,
        space_before: word_space,
        joined: max_word_len > 0 && word.len() > max_word_len,
    });
}

//! The translation entry points.
//!
//! `Engine` owns a shared lexicon and runs the whole pipeline per call:
//! normalize, segment, map, resolve, compose. It is cheap to clone and safe
//! to share between threads; nothing is mutated after construction.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, debug_span};

use crate::composer;
use crate::dict::{DictError, Lexicon};
use crate::mapper::Mapper;
use crate::normalizer::normalize;
use crate::resolver::{resolve_with, Choice, LocalContext};
use crate::segmenter::segment;
use crate::settings::settings;
use crate::types::{RomanToken, Span, TranslationResult};

#[derive(Clone)]
pub struct Engine {
    lexicon: Arc<Lexicon>,
}

/// Identity of a word rendering: same span, same text, same window means
/// the same output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RenderKey {
    span: Span,
    text: String,
    ctx: LocalContext,
}

/// Renderings from the previous incremental call.
///
/// Opaque to callers; pass it back on the next call. A state produced with a
/// different lexicon is ignored.
#[derive(Debug, Clone, Default)]
pub struct IncrementalState {
    lexicon_id: u64,
    renderings: HashMap<RenderKey, Choice>,
    result: TranslationResult,
    reused: usize,
}

impl IncrementalState {
    /// Structured result of the call that produced this state.
    pub fn result(&self) -> &TranslationResult {
        &self.result
    }

    /// Words whose rendering was carried over from the previous state.
    pub fn reused(&self) -> usize {
        self.reused
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Lexicon::default_shared())
    }
}

impl Engine {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Engine over a lexicon file (TOML source or compiled binary).
    ///
    /// This is the only fallible step; translation itself never fails.
    pub fn from_path(path: &Path) -> Result<Self, DictError> {
        Ok(Self::new(Arc::new(Lexicon::load(path)?)))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub(crate) fn mapper(&self) -> Mapper<'_> {
        Mapper::with_globals(&self.lexicon)
    }

    pub(crate) fn tokenize(&self, text: &str) -> Vec<RomanToken> {
        let normalized = normalize(text, self.lexicon.max_key_len());
        segment(&normalized, &self.lexicon)
    }

    /// Translate a whole buffer.
    pub fn translate(&self, text: &str) -> String {
        self.translate_detailed(text).to_string()
    }

    /// Translate and keep the per-token structure.
    pub fn translate_detailed(&self, text: &str) -> TranslationResult {
        let _span = debug_span!("translate", len = text.len()).entered();
        let tokens = self.tokenize(text);
        let mapper = self.mapper();
        resolve_with(&tokens, &self.lexicon, &settings().resolver, |i, ctx| {
            Choice::from_candidates(&tokens[i], &mapper.map_token(&tokens[i]), ctx)
        })
    }

    /// Translate a buffer that is being typed.
    ///
    /// The output equals `translate(text)`, plus the trailing line
    /// terminator of `text` when `composer.preserve_trailing_newline` is set.
    /// Words whose span, text and context window are unchanged since
    /// `previous` keep their earlier rendering without being re-mapped.
    pub fn translate_incremental(
        &self,
        text: &str,
        previous: Option<&IncrementalState>,
    ) -> (String, IncrementalState) {
        let _span = debug_span!("translate_incremental", len = text.len()).entered();
        let previous = previous.filter(|p| p.lexicon_id == self.lexicon.id());
        let tokens = self.tokenize(text);
        let mapper = self.mapper();

        let mut renderings = HashMap::with_capacity(tokens.len());
        let mut reused = 0usize;
        let result = resolve_with(&tokens, &self.lexicon, &settings().resolver, |i, ctx| {
            let token = &tokens[i];
            let key = RenderKey {
                span: token.span,
                text: token.text.clone(),
                ctx: *ctx,
            };
            let choice = match previous.and_then(|p| p.renderings.get(&key)) {
                Some(choice) => {
                    reused += 1;
                    choice.clone()
                }
                None => Choice::from_candidates(token, &mapper.map_token(token), ctx),
            };
            renderings.insert(key, choice.clone());
            choice
        });
        debug!(reused, words = renderings.len(), "incremental");

        let output = composer::render_incremental(&result, text, &settings().composer);
        let state = IncrementalState {
            lexicon_id: self.lexicon.id(),
            renderings,
            result,
            reused,
        };
        (output, state)
    }
}

/// Translate with the default engine.
pub fn translate(text: &str) -> String {
    Engine::default().translate(text)
}

/// Incremental translation with the default engine.
pub fn translate_incremental(
    text: &str,
    previous: Option<&IncrementalState>,
) -> (String, IncrementalState) {
    Engine::default().translate_incremental(text, previous)
}

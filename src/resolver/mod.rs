//! Context resolution: idioms first, then one candidate per word.
//!
//! Each word is resolved against a one-token window either side
//! (`LocalContext`). A candidate whose condition holds competes on weight
//! with the unconditioned ones; the first candidate wins a tie, so
//! dictionary entries beat the phonetic rendering at equal weight.

mod idiom;
mod rules;

pub use idiom::{find_units, Unit};
pub use rules::{context_at, holds, suffix_tag, tag_for, LocalContext, Neighbour};

use tracing::{debug, debug_span};

use crate::composer;
use crate::dict::Lexicon;
use crate::settings::{settings, ResolverSettings};
use crate::types::{Candidate, CandidateSource, OutputToken, ResolvedWord, RomanToken, TranslationResult};

/// Pick the best candidate for `ctx`.
///
/// Returns `None` only for an empty slice.
pub fn choose<'c>(candidates: &'c [Candidate], ctx: &LocalContext) -> Option<&'c Candidate> {
    let mut best: Option<&Candidate> = None;
    for c in candidates {
        if c.when.is_some_and(|cond| !holds(cond, ctx)) {
            continue;
        }
        if best.map_or(true, |b| c.weight > b.weight) {
            best = Some(c);
        }
    }
    best
}

/// The chosen rendering of a single word, without its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub script: String,
    pub source: CandidateSource,
}

impl Choice {
    /// Choose among `candidates`, falling back to the text as typed.
    pub fn from_candidates(token: &RomanToken, candidates: &[Candidate], ctx: &LocalContext) -> Self {
        match choose(candidates, ctx) {
            Some(c) => Choice {
                script: c.script.clone(),
                source: c.source,
            },
            None => Choice {
                script: token.text.clone(),
                source: CandidateSource::Unresolved,
            },
        }
    }

    fn into_word(self, token: &RomanToken) -> ResolvedWord {
        ResolvedWord {
            script: self.script,
            roman: token.text.clone(),
            span: token.span,
            source: self.source,
            space_before: token.space_before,
        }
    }
}

/// Resolve `tokens`, asking `choose_word` for each word outside an idiom.
///
/// `choose_word` receives the token index and its context window; the
/// engine uses this seam to reuse renderings across incremental calls.
pub fn resolve_with<F>(
    tokens: &[RomanToken],
    lexicon: &Lexicon,
    cfg: &ResolverSettings,
    mut choose_word: F,
) -> TranslationResult
where
    F: FnMut(usize, &LocalContext) -> Choice,
{
    let _span = debug_span!("resolve", tokens = tokens.len()).entered();
    let units = find_units(tokens, lexicon, cfg.idiom_window);
    let mut out = Vec::with_capacity(units.len());
    let mut idioms = 0usize;

    for unit in units {
        match unit {
            Unit::Idiom { start, end, idiom } => {
                idioms += 1;
                let first = &tokens[start];
                let span = tokens[start + 1..end]
                    .iter()
                    .fold(first.span, |acc, t| acc.cover(t.span));
                let roman: Vec<&str> = tokens[start..end].iter().map(|t| t.text.as_str()).collect();
                out.push(OutputToken::Word(ResolvedWord {
                    script: idiom.script.clone(),
                    roman: roman.join(" "),
                    span,
                    source: CandidateSource::Idiom,
                    space_before: first.space_before,
                }));
            }
            Unit::Single(i) => {
                let token = &tokens[i];
                if token.class.is_passthrough() {
                    out.push(composer::passthrough(token));
                } else {
                    let ctx = context_at(tokens, i, lexicon);
                    out.push(OutputToken::Word(choose_word(i, &ctx).into_word(token)));
                }
            }
        }
    }

    debug!(units = out.len(), idioms, "resolved");
    composer::compose(out)
}

/// Resolve with precomputed candidates (`candidates[i]` for `tokens[i]`).
pub fn resolve(
    tokens: &[RomanToken],
    candidates: &[Vec<Candidate>],
    lexicon: &Lexicon,
) -> TranslationResult {
    resolve_with(tokens, lexicon, &settings().resolver, |i, ctx| {
        let cands = candidates.get(i).map(Vec::as_slice).unwrap_or_default();
        Choice::from_candidates(&tokens[i], cands, ctx)
    })
}

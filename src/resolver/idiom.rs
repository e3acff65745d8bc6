use crate::dict::{Idiom, Lexicon};
use crate::types::{RomanToken, TokenClass};

/// A resolution unit: one token, or a run of tokens matched by an idiom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit<'l> {
    Single(usize),
    Idiom {
        start: usize,
        end: usize,
        idiom: &'l Idiom,
    },
}

/// Group `tokens` into units, scanning left to right. At each Singlish
/// token the longest idiom of up to `window` consecutive Singlish tokens
/// wins; anything between them (punctuation, a foreign word) breaks the
/// window.
pub fn find_units<'l>(tokens: &[RomanToken], lexicon: &'l Lexicon, window: usize) -> Vec<Unit<'l>> {
    let max_words = window.min(lexicon.max_idiom_words());
    let mut units = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let Some((n, idiom)) = longest_idiom_at(tokens, i, lexicon, max_words) {
            units.push(Unit::Idiom {
                start: i,
                end: i + n,
                idiom,
            });
            i += n;
        } else {
            units.push(Unit::Single(i));
            i += 1;
        }
    }
    units
}

fn longest_idiom_at<'l>(
    tokens: &[RomanToken],
    i: usize,
    lexicon: &'l Lexicon,
    max_words: usize,
) -> Option<(usize, &'l Idiom)> {
    let run = tokens[i..]
        .iter()
        .take(max_words)
        .take_while(|t| t.class == TokenClass::Singlish)
        .count();
    (2..=run).rev().find_map(|n| {
        let words: Vec<&str> = tokens[i..i + n].iter().map(|t| t.text.as_str()).collect();
        lexicon.idiom(&words).map(|idiom| (n, idiom))
    })
}

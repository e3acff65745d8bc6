//! Grammar tags of neighbouring words and the conditions built on them.

use serde::Serialize;

use crate::dict::{ContextCondition, GrammarTag, Lexicon};
use crate::types::{RomanToken, TokenClass};

/// Whole words that carry a tag regardless of the lexicon.
const WORD_TAGS: &[(&str, GrammarTag)] = &[
    ("naee", GrammarTag::Negation),
    ("nae", GrammarTag::Negation),
    ("naehae", GrammarTag::Negation),
    ("nehe", GrammarTag::Negation),
    ("epaa", GrammarTag::Negation),
    ("nam", GrammarTag::Particle),
    ("nee", GrammarTag::Particle),
    ("ne", GrammarTag::Particle),
];

/// Suffix rules, longest first, with the shortest stem each needs. The
/// question particle only counts after a full predicate, so short words
/// that merely end in "dha" (adha, hodha) stay untagged.
const SUFFIX_TAGS: &[(&str, GrammarTag, usize)] = &[
    ("navaa", GrammarTag::Present, 1),
    ("nnam", GrammarTag::Future, 1),
    ("uvaa", GrammarTag::Past, 1),
    ("unaa", GrammarTag::Past, 1),
    ("nna", GrammarTag::Infinitive, 1),
    ("oth", GrammarTag::Conditional, 1),
    ("pan", GrammarTag::Imperative, 1),
    ("dha", GrammarTag::Question, 3),
];

/// Tag implied by the spelling of `roman` alone.
pub fn suffix_tag(roman: &str) -> Option<GrammarTag> {
    let lower = roman.to_ascii_lowercase();
    if let Some(&(_, tag)) = WORD_TAGS.iter().find(|(w, _)| *w == lower) {
        return Some(tag);
    }
    SUFFIX_TAGS
        .iter()
        .find(|(suffix, _, min_stem)| {
            lower.len() >= suffix.len() + min_stem && lower.ends_with(suffix)
        })
        .map(|&(_, tag, _)| tag)
}

/// The first tagged dictionary entry wins over the suffix table.
pub fn tag_for(roman: &str, lexicon: &Lexicon) -> Option<GrammarTag> {
    lexicon
        .lookup_folded(roman)
        .and_then(|entries| entries.iter().find_map(|e| e.tag))
        .or_else(|| suffix_tag(roman))
}

/// What sits on one side of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Neighbour {
    /// Start or end of the input.
    Edge,
    Punct(char),
    /// Any other token; foreign words, numerals and acronyms carry no tag.
    Word(Option<GrammarTag>),
}

/// The one-token window either side of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LocalContext {
    pub prev: Neighbour,
    pub next: Neighbour,
}

fn neighbour(token: Option<&RomanToken>, lexicon: &Lexicon) -> Neighbour {
    match token {
        None => Neighbour::Edge,
        Some(t) => match t.class {
            TokenClass::Punctuation => t.text.chars().next().map_or(Neighbour::Edge, Neighbour::Punct),
            TokenClass::Singlish => Neighbour::Word(tag_for(&t.text, lexicon)),
            _ => Neighbour::Word(None),
        },
    }
}

pub fn context_at(tokens: &[RomanToken], i: usize, lexicon: &Lexicon) -> LocalContext {
    let prev = i.checked_sub(1).and_then(|p| tokens.get(p));
    LocalContext {
        prev: neighbour(prev, lexicon),
        next: neighbour(tokens.get(i + 1), lexicon),
    }
}

fn is_clause_punct(c: char) -> bool {
    matches!(c, '.' | '?' | '!' | ',' | ';' | ':')
}

fn is_clause_boundary(n: Neighbour) -> bool {
    match n {
        Neighbour::Edge => true,
        Neighbour::Punct(c) => is_clause_punct(c),
        Neighbour::Word(_) => false,
    }
}

pub fn holds(cond: ContextCondition, ctx: &LocalContext) -> bool {
    match cond {
        ContextCondition::After(tag) => ctx.prev == Neighbour::Word(Some(tag)),
        ContextCondition::Before(tag) => ctx.next == Neighbour::Word(Some(tag)),
        ContextCondition::BeforePunct(c) => ctx.next == Neighbour::Punct(c),
        ContextCondition::ClauseStart => is_clause_boundary(ctx.prev),
        ContextCondition::ClauseEnd => is_clause_boundary(ctx.next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_tags() {
        assert_eq!(suffix_tag("yanna"), Some(GrammarTag::Infinitive));
        assert_eq!(suffix_tag("hambenna"), Some(GrammarTag::Infinitive));
        assert_eq!(suffix_tag("karanavaa"), Some(GrammarTag::Present));
        assert_eq!(suffix_tag("kiyanavadha"), Some(GrammarTag::Question));
        assert_eq!(suffix_tag("ennam"), Some(GrammarTag::Future));
        assert_eq!(suffix_tag("unoth"), Some(GrammarTag::Conditional));
        assert_eq!(suffix_tag("dhiipan"), Some(GrammarTag::Imperative));
        assert_eq!(suffix_tag("vuNaa"), Some(GrammarTag::Past));
        assert_eq!(suffix_tag("naee"), Some(GrammarTag::Negation));
        assert_eq!(suffix_tag("mama"), None);
    }

    #[test]
    fn test_suffix_needs_stem() {
        assert_eq!(suffix_tag("nna"), None);
        assert_eq!(suffix_tag("dha"), None);
        assert_eq!(suffix_tag("adha"), None);
        assert_eq!(suffix_tag("hodha"), None);
        assert_eq!(suffix_tag("kohedha"), Some(GrammarTag::Question));
    }

    #[test]
    fn test_common_words_ending_in_dha_untagged() {
        let lexicon = Lexicon::default_shared();
        assert_eq!(tag_for("adha", &lexicon), None);
        assert_eq!(tag_for("hodha", &lexicon), None);
        assert_eq!(tag_for("Adha", &lexicon), None);
        assert_eq!(tag_for("puluvandha", &lexicon), Some(GrammarTag::Question));
        assert_eq!(tag_for("nedha", &lexicon), Some(GrammarTag::Question));
        assert_eq!(tag_for("yanna", &lexicon), Some(GrammarTag::Infinitive));
    }

    #[test]
    fn test_conditions() {
        let ctx = LocalContext {
            prev: Neighbour::Word(Some(GrammarTag::Infinitive)),
            next: Neighbour::Punct('.'),
        };
        assert!(holds(ContextCondition::After(GrammarTag::Infinitive), &ctx));
        assert!(!holds(ContextCondition::After(GrammarTag::Present), &ctx));
        assert!(holds(ContextCondition::BeforePunct('.'), &ctx));
        assert!(!holds(ContextCondition::BeforePunct('?'), &ctx));
        assert!(holds(ContextCondition::ClauseEnd, &ctx));
        assert!(!holds(ContextCondition::ClauseStart, &ctx));
    }

    #[test]
    fn test_brackets_are_not_clause_boundaries() {
        let ctx = LocalContext {
            prev: Neighbour::Punct('('),
            next: Neighbour::Edge,
        };
        assert!(!holds(ContextCondition::ClauseStart, &ctx));
        assert!(holds(ContextCondition::ClauseEnd, &ctx));
    }
}

//! Word-boundary recovery.
//!
//! Chunks from the normalizer become `RomanToken`s. A Latin word that the
//! lexicon does not know as a whole is split by greedy longest-prefix match
//! over the lexicon keys; the split is kept only when the dictionary covers
//! enough of the word. Words longer than every key (`joined`) need less
//! coverage, and their unmatched pieces are mapped on their own.

use tracing::{debug, debug_span};

use crate::dict::Lexicon;
use crate::normalizer::{ChunkKind, NormalizedText};
use crate::settings::{settings, SegmenterSettings};
use crate::types::{RomanToken, SegmentPiece, SegmentationCandidate, Span, TokenClass, TokenOrigin};

/// Segment with the global settings.
pub fn segment(text: &NormalizedText, lexicon: &Lexicon) -> Vec<RomanToken> {
    segment_with(text, lexicon, &settings().segmenter)
}

pub fn segment_with(
    text: &NormalizedText,
    lexicon: &Lexicon,
    cfg: &SegmenterSettings,
) -> Vec<RomanToken> {
    let _span = debug_span!("segment", chunks = text.chunks().len()).entered();
    let mut tokens = Vec::with_capacity(text.chunks().len());
    let mut splits = 0usize;

    for chunk in text.chunks() {
        let class = match chunk.kind {
            ChunkKind::Abbreviation => TokenClass::Abbreviation,
            ChunkKind::Numeral => TokenClass::Numeral,
            ChunkKind::Punctuation => TokenClass::Punctuation,
            ChunkKind::Script => TokenClass::Script,
            ChunkKind::Word if lexicon.is_foreign(&chunk.text) => TokenClass::Foreign,
            ChunkKind::Word => TokenClass::Singlish,
        };
        let whole = RomanToken {
            text: chunk.text.clone(),
            span: chunk.span,
            class,
            space_before: chunk.space_before,
            origin: TokenOrigin::Whole,
        };
        if class != TokenClass::Singlish || lexicon.contains(&chunk.text) {
            tokens.push(whole);
            continue;
        }

        let cand = segment_word(&chunk.text, lexicon);
        let threshold = if chunk.joined {
            cfg.joined_min_coverage
        } else {
            cfg.min_coverage
        };
        let accept = cand.segment_count() >= 2 && cand.coverage() >= threshold;
        debug!(
            word = chunk.text.as_str(),
            joined = chunk.joined,
            pieces = cand.segment_count(),
            coverage = cand.coverage(),
            accept,
            "segmentation"
        );
        if !accept {
            tokens.push(whole);
            continue;
        }

        splits += 1;
        for (i, piece) in cand.pieces.iter().enumerate() {
            tokens.push(RomanToken {
                text: chunk.text[piece.span.start..piece.span.end].to_string(),
                span: Span::new(
                    chunk.span.start + piece.span.start,
                    chunk.span.start + piece.span.end,
                ),
                class: TokenClass::Singlish,
                space_before: if i == 0 { chunk.space_before } else { true },
                origin: if piece.resolved {
                    TokenOrigin::Segment
                } else {
                    TokenOrigin::Unresolved
                },
            });
        }
    }

    debug!(tokens = tokens.len(), splits, "segmented");
    tokens
}

/// Greedy longest-prefix segmentation of one unspaced word.
///
/// Keys are matched case-sensitively first, then against the lowercase
/// form. Where no key matches, one character is consumed into an unresolved
/// piece; adjacent unresolved characters share a piece. Piece spans are
/// relative to `word`.
pub fn segment_word(word: &str, lexicon: &Lexicon) -> SegmentationCandidate {
    let bytes = word.as_bytes();
    let lower = word.to_ascii_lowercase();
    let lower_bytes = lower.as_bytes();

    let mut pieces: Vec<SegmentPiece> = Vec::new();
    let mut covered = 0;
    let mut unresolved_start: Option<usize> = None;
    let mut pos = 0;

    while pos < bytes.len() {
        let matched = lexicon
            .longest_prefix(&bytes[pos..])
            .or_else(|| lexicon.longest_prefix(&lower_bytes[pos..]))
            .map(|(len, _)| len);
        match matched {
            Some(len) => {
                if let Some(start) = unresolved_start.take() {
                    pieces.push(SegmentPiece {
                        span: Span::new(start, pos),
                        resolved: false,
                    });
                }
                pieces.push(SegmentPiece {
                    span: Span::new(pos, pos + len),
                    resolved: true,
                });
                covered += len;
                pos += len;
            }
            None => {
                unresolved_start.get_or_insert(pos);
                pos += word[pos..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    if let Some(start) = unresolved_start {
        pieces.push(SegmentPiece {
            span: Span::new(start, bytes.len()),
            resolved: false,
        });
    }

    SegmentationCandidate {
        pieces,
        covered,
        total: bytes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::normalize_with;
    use crate::settings::NormalizerSettings;

    const LEXICON: &str = r#"
version = 1

[words]
mama = "මම"
gedhara = "ගෙදර"
innee = "ඉන්නේ"
api = "අපි"
passe = "පස්සේ"
katha = "කතා"
karamu = "කරමු"
oyaa = "ඔයා"
kohedha = "කොහෙද"
kohe = "කොහෙ"
yanavaa = "යනවා"
oyath = "ඔයත්"

[foreign]
words = ["facebook"]
"#;

    fn lexicon() -> Lexicon {
        Lexicon::from_toml(LEXICON).unwrap()
    }

    fn tokens(input: &str, min_coverage: f64) -> Vec<RomanToken> {
        let lex = lexicon();
        let norm = normalize_with(
            input,
            lex.max_key_len(),
            &NormalizerSettings {
                abbreviation_min_prefix: 3,
                space_after_abbreviation: true,
            },
        );
        segment_with(
            &norm,
            &lex,
            &SegmenterSettings {
                min_coverage,
                joined_min_coverage: 0.75,
            },
        )
    }

    fn texts(tokens: &[RomanToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_run_on_words_split() {
        let toks = tokens("mamagedharainnee", 1.0);
        assert_eq!(texts(&toks), vec!["mama", "gedhara", "innee"]);
        assert!(!toks[0].space_before);
        assert!(toks[1].space_before);
        assert!(toks.iter().all(|t| t.origin == TokenOrigin::Segment));
        assert_eq!(toks[1].span, Span::new(4, 11));
    }

    #[test]
    fn test_four_way_split() {
        let toks = tokens("apipassekathakaramu", 1.0);
        assert_eq!(texts(&toks), vec!["api", "passe", "katha", "karamu"]);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let toks = tokens("oyaakohedhainnee?", 1.0);
        assert_eq!(texts(&toks), vec!["oyaa", "kohedha", "innee", "?"]);
        assert!(!toks[3].space_before);
    }

    #[test]
    fn test_known_word_stays_whole() {
        let toks = tokens("mama gedhara", 1.0);
        assert_eq!(texts(&toks), vec!["mama", "gedhara"]);
        assert!(toks.iter().all(|t| t.origin == TokenOrigin::Whole));
    }

    #[test]
    fn test_case_folded_match() {
        let toks = tokens("Mamagedhara", 1.0);
        assert_eq!(texts(&toks), vec!["Mama", "gedhara"]);
    }

    #[test]
    fn test_partial_coverage_keeps_word_whole() {
        let toks = tokens("mamaxx", 1.0);
        assert_eq!(texts(&toks), vec!["mamaxx"]);
        assert_eq!(toks[0].origin, TokenOrigin::Whole);
    }

    #[test]
    fn test_joined_word_split_around_unknown_fragment() {
        // Longer than any key, so a lower coverage is enough.
        let toks = tokens("yanavaaaoyath", 1.0);
        assert_eq!(texts(&toks), vec!["yanavaa", "a", "oyath"]);
        assert_eq!(toks[1].origin, TokenOrigin::Unresolved);
        assert!(toks[1].space_before && toks[2].space_before);

        let toks = tokens("mamagedharaqinnee", 1.0);
        assert_eq!(texts(&toks), vec!["mama", "gedhara", "q", "innee"]);
        assert_eq!(toks[2].span, Span::new(11, 12));
    }

    #[test]
    fn test_joined_word_with_low_coverage_stays_whole() {
        let toks = tokens("qqqqmamaxxxx", 1.0);
        assert_eq!(texts(&toks), vec!["qqqqmamaxxxx"]);
        assert_eq!(toks[0].origin, TokenOrigin::Whole);
    }

    #[test]
    fn test_partial_coverage_accepted_below_threshold() {
        let toks = tokens("yanavaaaoyath", 0.5);
        assert_eq!(texts(&toks), vec!["yanavaa", "a", "oyath"]);
        assert_eq!(toks[1].origin, TokenOrigin::Unresolved);
    }

    #[test]
    fn test_unknown_word_stays_whole() {
        let toks = tokens("lassana", 1.0);
        assert_eq!(texts(&toks), vec!["lassana"]);
    }

    #[test]
    fn test_foreign_word_passthrough() {
        let toks = tokens("mama Facebook", 1.0);
        assert_eq!(toks[1].class, TokenClass::Foreign);
    }

    #[test]
    fn test_passthrough_classes() {
        let toks = tokens("ASAP 7 , ලංකා", 1.0);
        let classes: Vec<TokenClass> = toks.iter().map(|t| t.class).collect();
        assert_eq!(
            classes,
            vec![
                TokenClass::Abbreviation,
                TokenClass::Numeral,
                TokenClass::Punctuation,
                TokenClass::Script,
            ]
        );
    }

    #[test]
    fn test_segment_word_merges_unresolved_runs() {
        let cand = segment_word("qqmamaxx", &lexicon());
        let spans: Vec<(Span, bool)> = cand.pieces.iter().map(|p| (p.span, p.resolved)).collect();
        assert_eq!(
            spans,
            vec![
                (Span::new(0, 2), false),
                (Span::new(2, 6), true),
                (Span::new(6, 8), false),
            ]
        );
        assert_eq!(cand.covered, 4);
        assert_eq!(cand.coverage(), 0.5);
    }

    #[test]
    fn test_no_empty_pieces() {
        for word in ["a", "mamamama", "xyz", "innee", "apiapi"] {
            let cand = segment_word(word, &lexicon());
            assert!(cand.pieces.iter().all(|p| !p.span.is_empty()));
            let total: usize = cand.pieces.iter().map(|p| p.span.len()).sum();
            assert_eq!(total, word.len());
        }
    }
}

//! Output assembly.
//!
//! Tokens are joined with one space where the input had whitespace (or a
//! split inserted a boundary). Punctuation, numerals and foreign text are
//! copied exactly.

use crate::settings::ComposerSettings;
use crate::types::{OutputToken, Passthrough, RomanToken, TranslationResult};

pub fn passthrough(token: &RomanToken) -> OutputToken {
    OutputToken::Passthrough(Passthrough {
        text: token.text.clone(),
        span: token.span,
        class: token.class,
        space_before: token.space_before,
    })
}

/// Build the result. The first token never carries a leading space.
pub fn compose(mut tokens: Vec<OutputToken>) -> TranslationResult {
    if let Some(first) = tokens.first_mut() {
        match first {
            OutputToken::Word(w) => w.space_before = false,
            OutputToken::Passthrough(p) => p.space_before = false,
        }
    }
    TranslationResult { tokens }
}

/// The line terminator `raw` ends with, if any.
pub fn trailing_terminator(raw: &str) -> Option<&'static str> {
    if raw.ends_with("\r\n") {
        Some("\r\n")
    } else if raw.ends_with('\n') {
        Some("\n")
    } else {
        None
    }
}

/// Final string for incremental mode: the composed text plus the input's
/// trailing line terminator when configured.
pub fn render_incremental(result: &TranslationResult, raw: &str, cfg: &ComposerSettings) -> String {
    let mut out = result.to_string();
    if cfg.preserve_trailing_newline {
        if let Some(term) = trailing_terminator(raw) {
            out.push_str(term);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CandidateSource, ResolvedWord, Span, TokenClass, TokenOrigin};

    fn word(script: &str, space_before: bool) -> OutputToken {
        OutputToken::Word(ResolvedWord {
            script: script.to_string(),
            roman: String::new(),
            span: Span::new(0, 0),
            source: CandidateSource::Phonetic,
            space_before,
        })
    }

    #[test]
    fn test_compose_drops_leading_space() {
        let result = compose(vec![word("මම", true), word("ආවේ", true)]);
        assert_eq!(result.to_string(), "මම ආවේ");
    }

    #[test]
    fn test_passthrough_copies_token() {
        let tok = RomanToken {
            text: "(".to_string(),
            span: Span::new(5, 6),
            class: TokenClass::Punctuation,
            space_before: true,
            origin: TokenOrigin::Whole,
        };
        let out = passthrough(&tok);
        assert_eq!(out.text(), "(");
        assert_eq!(out.span(), Span::new(5, 6));
        assert!(out.space_before());
    }

    #[test]
    fn test_trailing_terminator() {
        assert_eq!(trailing_terminator("mama\n"), Some("\n"));
        assert_eq!(trailing_terminator("mama\r\n"), Some("\r\n"));
        assert_eq!(trailing_terminator("mama \n "), None);
        assert_eq!(trailing_terminator(""), None);
    }

    #[test]
    fn test_render_incremental() {
        let result = compose(vec![word("මම", false)]);
        let keep = ComposerSettings {
            preserve_trailing_newline: true,
        };
        let drop = ComposerSettings {
            preserve_trailing_newline: false,
        };
        assert_eq!(render_incremental(&result, "mama\n", &keep), "මම\n");
        assert_eq!(render_incremental(&result, "mama\n", &drop), "මම");
        assert_eq!(render_incremental(&result, "mama", &keep), "මම");
    }
}

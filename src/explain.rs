//! Diagnostic explanation of a translation.
//!
//! Used by `singlish explain` to show, per token, how the input was split,
//! which candidates were proposed, which one won and how its clusters are
//! laid out visually.

use serde::Serialize;

use crate::dict::GrammarTag;
use crate::engine::Engine;
use crate::normalizer::normalize;
use crate::phonetic::ClusterLayout;
use crate::resolver::{context_at, tag_for, LocalContext};
use crate::types::{Candidate, CandidateSource, OutputToken, RomanToken, TokenOrigin};

#[derive(Debug, Clone, Serialize)]
pub struct ExplainToken {
    pub token: RomanToken,
    /// Tag this word shows to its neighbours.
    pub tag: Option<GrammarTag>,
    pub context: Option<LocalContext>,
    pub candidates: Vec<Candidate>,
    /// Visual layout of the phonetic rendering, one entry per cluster.
    pub layout: Vec<ClusterLayout>,
    /// Output text of the unit this token ended up in.
    pub chosen: String,
    pub source: Option<CandidateSource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplainResult {
    pub input: String,
    pub normalized: String,
    pub tokens: Vec<ExplainToken>,
    pub output: String,
}

pub fn explain(engine: &Engine, input: &str) -> ExplainResult {
    let lexicon = engine.lexicon();
    let normalized = normalize(input, lexicon.max_key_len());
    let tokens = engine.tokenize(input);
    let result = engine.translate_detailed(input);
    let mapper = engine.mapper();

    let explained = tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let unit = result.tokens.iter().find(|t| {
                let span = t.span();
                span.start <= token.span.start && token.span.end <= span.end
            });
            let (chosen, source) = match unit {
                Some(OutputToken::Word(w)) => (w.script.clone(), Some(w.source)),
                Some(OutputToken::Passthrough(p)) => (p.text.clone(), None),
                None => (String::new(), None),
            };
            let singlish = !token.class.is_passthrough();
            ExplainToken {
                tag: singlish.then(|| tag_for(&token.text, lexicon)).flatten(),
                context: singlish.then(|| context_at(&tokens, i, lexicon)),
                candidates: mapper.map_token(token),
                layout: if singlish {
                    mapper
                        .render(&token.text)
                        .clusters
                        .iter()
                        .map(|c| c.layout())
                        .collect()
                } else {
                    Vec::new()
                },
                token: token.clone(),
                chosen,
                source,
            }
        })
        .collect();

    ExplainResult {
        input: input.to_string(),
        normalized: normalized.as_str().to_string(),
        tokens: explained,
        output: result.to_string(),
    }
}

fn origin_label(token: &RomanToken) -> &'static str {
    match token.origin {
        TokenOrigin::Whole => "whole",
        TokenOrigin::Segment => "split",
        TokenOrigin::Unresolved => "split?",
    }
}

/// Format an ExplainResult as human-readable text.
pub fn format_text(result: &ExplainResult) -> String {
    use unicode_width::UnicodeWidthStr;
    let mut out = String::new();

    out.push_str(&format!(
        "=== Tokens for \"{}\" ({} tokens) ===\n",
        result.normalized,
        result.tokens.len(),
    ));

    for (i, t) in result.tokens.iter().enumerate() {
        let pad_width = 16;
        let label = t.token.text.as_str();
        let display_width = UnicodeWidthStr::width(label);
        let padded = if display_width < pad_width {
            format!("{}{}", label, " ".repeat(pad_width - display_width))
        } else {
            label.to_string()
        };
        let tag = t.tag.map_or("-".to_string(), |g| g.to_string());
        out.push_str(&format!(
            "  [{:<2}] {} {:<12} {:<6} tag={:<12} -> {}\n",
            i,
            padded,
            format!("{:?}", t.token.class),
            origin_label(&t.token),
            tag,
            t.chosen,
        ));
        for c in &t.candidates {
            let when = c.when.map(|w| format!(" when={w}")).unwrap_or_default();
            let weight = if c.weight == i32::MIN {
                "-".to_string()
            } else {
                c.weight.to_string()
            };
            out.push_str(&format!(
                "         {:<10} w={:<4} {}{}\n",
                format!("{:?}", c.source),
                weight,
                c.script,
                when
            ));
        }
        if !t.layout.is_empty() {
            let cells: Vec<String> = t
                .layout
                .iter()
                .map(|l| format!("{}|{}|{}", l.left, l.core, l.right))
                .collect();
            out.push_str(&format!("         layout {}\n", cells.join(" ")));
        }
    }

    out.push_str(&format!("\n=== Output ===\n  {}\n", result.output));
    out
}

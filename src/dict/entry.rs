use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Grammatical role of a word, used by the context resolver to pick between
/// homographic renderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammarTag {
    Infinitive,
    Present,
    Past,
    Future,
    Conditional,
    Imperative,
    Question,
    Negation,
    Particle,
    Pronoun,
}

impl GrammarTag {
    pub const ALL: [GrammarTag; 10] = [
        GrammarTag::Infinitive,
        GrammarTag::Present,
        GrammarTag::Past,
        GrammarTag::Future,
        GrammarTag::Conditional,
        GrammarTag::Imperative,
        GrammarTag::Question,
        GrammarTag::Negation,
        GrammarTag::Particle,
        GrammarTag::Pronoun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GrammarTag::Infinitive => "infinitive",
            GrammarTag::Present => "present",
            GrammarTag::Past => "past",
            GrammarTag::Future => "future",
            GrammarTag::Conditional => "conditional",
            GrammarTag::Imperative => "imperative",
            GrammarTag::Question => "question",
            GrammarTag::Negation => "negation",
            GrammarTag::Particle => "particle",
            GrammarTag::Pronoun => "pronoun",
        }
    }
}

impl fmt::Display for GrammarTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrammarTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown grammar tag: {s}"))
    }
}

/// When a conditioned mapping entry applies.
///
/// Written in the lexicon as `after:<tag>`, `before:<tag>`, `before:<punct>`,
/// `start` or `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContextCondition {
    /// The previous word carries the tag.
    After(GrammarTag),
    /// The next word carries the tag.
    Before(GrammarTag),
    /// The next token is this punctuation character.
    BeforePunct(char),
    /// First word of a clause: start of input or right after punctuation.
    ClauseStart,
    /// Last word of a clause: end of input or right before punctuation.
    ClauseEnd,
}

impl fmt::Display for ContextCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextCondition::After(tag) => write!(f, "after:{tag}"),
            ContextCondition::Before(tag) => write!(f, "before:{tag}"),
            ContextCondition::BeforePunct(c) => write!(f, "before:{c}"),
            ContextCondition::ClauseStart => f.write_str("start"),
            ContextCondition::ClauseEnd => f.write_str("end"),
        }
    }
}

impl FromStr for ContextCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => return Ok(ContextCondition::ClauseStart),
            "end" => return Ok(ContextCondition::ClauseEnd),
            _ => {}
        }
        let (side, arg) = s
            .split_once(':')
            .ok_or_else(|| format!("invalid condition: {s}"))?;
        let mut chars = arg.chars();
        let punct = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_punctuation() => Some(c),
            _ => None,
        };
        match (side, punct) {
            ("before", Some(c)) => Ok(ContextCondition::BeforePunct(c)),
            ("before", None) => Ok(ContextCondition::Before(arg.parse()?)),
            ("after", None) => Ok(ContextCondition::After(arg.parse()?)),
            _ => Err(format!("invalid condition: {s}")),
        }
    }
}

impl TryFrom<String> for ContextCondition {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ContextCondition> for String {
    fn from(c: ContextCondition) -> Self {
        c.to_string()
    }
}

/// One romanized key → Sinhala rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub roman: String,
    pub script: String,
    /// Higher wins.
    pub weight: i32,
    pub tag: Option<GrammarTag>,
    pub when: Option<ContextCondition>,
    /// Registration order in the source; breaks weight ties.
    pub order: u32,
}

/// A multi-word sequence rendered as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idiom {
    pub words: Vec<String>,
    pub script: String,
    pub weight: i32,
}

impl Idiom {
    pub fn key(&self) -> String {
        self.words.join(" ")
    }
}

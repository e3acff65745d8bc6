//! Grapheme clusters and the positional rule table for vowel signs.
//!
//! Sinhala is stored in logical order (base, medial, vowel sign, modifier)
//! but vowel signs are drawn around the base: kombuva (ෙ) sits to the left,
//! ispilla (ි) above, paapilla (ු) below, and o/oo/au are split across both
//! sides. `Cluster::render` produces the logical string; `Cluster::layout`
//! produces the visual arrangement used by diagnostics.

use serde::{Deserialize, Serialize};

use crate::unicode::{VIRAMA, ZWJ};

/// Where a dependent vowel sign is drawn relative to its base consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// The inherent vowel: no sign at all.
    Inherent,
    Pre,
    Post,
    Above,
    Below,
    Split,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vowel {
    pub independent: char,
    pub sign: Option<char>,
    pub placement: Placement,
    /// Left and right visual parts of a split sign.
    pub parts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grapheme {
    Consonant(char),
    Vowel(Vowel),
    Modifier(char),
}

/// One composition step of the phonetic mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cluster {
    /// Consonant, optional conjunct medial, optional vowel. A consonant with
    /// no vowel is written with al-lakuna.
    Syllable {
        base: char,
        medial: Option<char>,
        vowel: Option<Vowel>,
        modifier: Option<char>,
    },
    /// A vowel letter at the start of a word or after another vowel.
    Independent { vowel: Vowel, modifier: Option<char> },
    /// A character with no mapping, emitted as typed.
    Verbatim(char),
}

/// Visual arrangement of a cluster: what is drawn left of the base, the
/// base itself with stacked marks, and what is drawn to its right.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClusterLayout {
    pub left: String,
    pub core: String,
    pub right: String,
}

impl Cluster {
    /// Whether the cluster ends in a vowel sound (and so can take a modifier).
    pub fn is_voiced(&self) -> bool {
        match self {
            Cluster::Syllable { vowel, .. } => vowel.is_some(),
            Cluster::Independent { .. } => true,
            Cluster::Verbatim(_) => false,
        }
    }

    pub fn set_modifier(&mut self, m: char) -> bool {
        match self {
            Cluster::Syllable {
                vowel: Some(_),
                modifier,
                ..
            }
            | Cluster::Independent { modifier, .. }
                if modifier.is_none() =>
            {
                *modifier = Some(m);
                true
            }
            _ => false,
        }
    }

    /// Append the logical-order Unicode form to `out`.
    pub fn render(&self, out: &mut String) {
        match self {
            Cluster::Syllable {
                base,
                medial,
                vowel,
                modifier,
            } => {
                out.push(*base);
                if let Some(m) = medial {
                    out.push(VIRAMA);
                    out.push(ZWJ);
                    out.push(*m);
                }
                match vowel {
                    Some(v) => {
                        if let Some(sign) = v.sign {
                            out.push(sign);
                        }
                    }
                    None => out.push(VIRAMA),
                }
                if let Some(m) = modifier {
                    out.push(*m);
                }
            }
            Cluster::Independent { vowel, modifier } => {
                out.push(vowel.independent);
                if let Some(m) = modifier {
                    out.push(*m);
                }
            }
            Cluster::Verbatim(c) => out.push(*c),
        }
    }

    pub fn to_text(&self) -> String {
        let mut s = String::new();
        self.render(&mut s);
        s
    }

    /// Visual arrangement following the vowel's placement.
    pub fn layout(&self) -> ClusterLayout {
        match self {
            Cluster::Syllable {
                base,
                medial,
                vowel,
                modifier,
            } => {
                let mut layout = ClusterLayout::default();
                layout.core.push(*base);
                if let Some(m) = medial {
                    layout.core.push(VIRAMA);
                    layout.core.push(ZWJ);
                    layout.core.push(*m);
                }
                match vowel {
                    None => layout.core.push(VIRAMA),
                    Some(v) => match (v.placement, v.sign) {
                        (Placement::Inherent, _) | (_, None) => {}
                        (Placement::Pre, Some(sign)) => layout.left.push(sign),
                        (Placement::Post, Some(sign)) => layout.right.push(sign),
                        (Placement::Above | Placement::Below, Some(sign)) => {
                            layout.core.push(sign)
                        }
                        (Placement::Split, Some(sign)) => match v.parts.as_slice() {
                            [left, right] => {
                                layout.left.push_str(left);
                                layout.right.push_str(right);
                            }
                            _ => layout.right.push(sign),
                        },
                    },
                }
                if let Some(m) = modifier {
                    layout.right.push(*m);
                }
                layout
            }
            Cluster::Independent { .. } | Cluster::Verbatim(_) => ClusterLayout {
                core: self.to_text(),
                ..ClusterLayout::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vowel(sign: char, placement: Placement, parts: &[&str]) -> Vowel {
        Vowel {
            independent: 'අ',
            sign: Some(sign),
            placement,
            parts: parts.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_render_hal() {
        let c = Cluster::Syllable {
            base: 'ක',
            medial: None,
            vowel: None,
            modifier: None,
        };
        assert_eq!(c.to_text(), "ක්");
        assert!(!c.is_voiced());
    }

    #[test]
    fn test_render_rakaransaya() {
        let c = Cluster::Syllable {
            base: 'ශ',
            medial: Some('ර'),
            vowel: Some(vowel('ී', Placement::Above, &[])),
            modifier: None,
        };
        assert_eq!(c.to_text(), "ශ්\u{200D}රී");
    }

    #[test]
    fn test_pre_sign_logical_after_visual_before() {
        let c = Cluster::Syllable {
            base: 'ක',
            medial: None,
            vowel: Some(vowel('ෙ', Placement::Pre, &[])),
            modifier: None,
        };
        assert_eq!(c.to_text(), "කෙ");
        let layout = c.layout();
        assert_eq!(layout.left, "ෙ");
        assert_eq!(layout.core, "ක");
        assert_eq!(layout.right, "");
    }

    #[test]
    fn test_split_sign_layout() {
        let c = Cluster::Syllable {
            base: 'ප',
            medial: None,
            vowel: Some(vowel('ො', Placement::Split, &["ෙ", "ා"])),
            modifier: None,
        };
        assert_eq!(c.to_text(), "පො");
        let layout = c.layout();
        assert_eq!(layout.left, "ෙ");
        assert_eq!(layout.core, "ප");
        assert_eq!(layout.right, "ා");
    }

    #[test]
    fn test_modifier_needs_vowel() {
        let mut hal = Cluster::Syllable {
            base: 'ක',
            medial: None,
            vowel: None,
            modifier: None,
        };
        assert!(!hal.set_modifier('ං'));

        let mut voiced = Cluster::Independent {
            vowel: vowel('ා', Placement::Post, &[]),
            modifier: None,
        };
        assert!(voiced.set_modifier('ං'));
        assert!(!voiced.set_modifier('ඃ'));
        assert_eq!(voiced.to_text(), "අං");
    }
}

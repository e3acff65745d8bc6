use tracing::trace;

use super::cluster::{Cluster, Grapheme};
use super::trie::PhoneticTrie;

/// Cluster-by-cluster rendering of one romanized word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneticRendering {
    pub text: String,
    pub clusters: Vec<Cluster>,
    /// Number of input characters that had no grapheme and were kept as typed.
    pub unmapped: usize,
}

impl PhoneticRendering {
    /// True when nothing in the input could be mapped.
    pub fn is_unresolved(&self) -> bool {
        self.clusters.iter().all(|c| matches!(c, Cluster::Verbatim(_)))
    }
}

struct Piece<'a> {
    roman: &'a str,
    grapheme: Option<&'a Grapheme>,
}

/// Capital vowels always fold to lowercase. Other capitals fold only when no
/// key starts with them, so "Mama" reads like "mama" while "N" stays ණ.
/// A leading capital modifier key ("Hari") is read as its lowercase letter.
fn fold_case(trie: &PhoneticTrie, roman: &str) -> String {
    roman
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if !c.is_ascii_uppercase() {
                return c;
            }
            let is_vowel = matches!(c, 'A' | 'E' | 'I' | 'O' | 'U');
            // A word-initial modifier has nothing to attach to.
            let leading_modifier = i == 0
                && matches!(
                    trie.get(c.encode_utf8(&mut [0u8; 4])),
                    Some(Grapheme::Modifier(_))
                );
            if is_vowel || leading_modifier || !trie.keys().any(|k| k.starts_with(c)) {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

fn lex<'a>(trie: &'a PhoneticTrie, folded: &'a str) -> Vec<Piece<'a>> {
    let bytes = folded.as_bytes();
    let mut pieces = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if let Some((len, g)) = trie.longest_match(&bytes[pos..]) {
            pieces.push(Piece {
                roman: &folded[pos..pos + len],
                grapheme: Some(g),
            });
            pos += len;
        } else {
            let ch_len = folded[pos..].chars().next().map(char::len_utf8).unwrap_or(1);
            pieces.push(Piece {
                roman: &folded[pos..pos + ch_len],
                grapheme: None,
            });
            pos += ch_len;
        }
    }
    pieces
}

/// Transliterate with the global grapheme table.
pub fn transliterate(roman: &str) -> PhoneticRendering {
    transliterate_with(PhoneticTrie::global(), roman)
}

/// Transliterate `roman` cluster by cluster.
///
/// A consonant takes the following vowel as a dependent sign, or al-lakuna
/// when none follows. A consonant followed by a medial consonant and a
/// vowel forms a conjunct (ශ්‍රී, ක්‍යා). Vowels that do not follow a
/// consonant are written as independent letters. Modifiers (ං, ඃ) attach to
/// the previous voiced cluster; characters without a grapheme are kept.
pub fn transliterate_with(trie: &PhoneticTrie, roman: &str) -> PhoneticRendering {
    let folded = fold_case(trie, roman);
    let pieces = lex(trie, &folded);
    let mut clusters: Vec<Cluster> = Vec::with_capacity(pieces.len());

    let mut i = 0;
    while i < pieces.len() {
        match pieces[i].grapheme {
            Some(Grapheme::Consonant(base)) => {
                let next = pieces.get(i + 1).and_then(|p| p.grapheme);
                let after = pieces.get(i + 2).and_then(|p| p.grapheme);
                match (next, after) {
                    (Some(Grapheme::Consonant(m)), Some(Grapheme::Vowel(v)))
                        if trie.is_medial(*m) && m != base =>
                    {
                        clusters.push(Cluster::Syllable {
                            base: *base,
                            medial: Some(*m),
                            vowel: Some(v.clone()),
                            modifier: None,
                        });
                        i += 3;
                    }
                    (Some(Grapheme::Vowel(v)), _) => {
                        clusters.push(Cluster::Syllable {
                            base: *base,
                            medial: None,
                            vowel: Some(v.clone()),
                            modifier: None,
                        });
                        i += 2;
                    }
                    _ => {
                        clusters.push(Cluster::Syllable {
                            base: *base,
                            medial: None,
                            vowel: None,
                            modifier: None,
                        });
                        i += 1;
                    }
                }
            }
            Some(Grapheme::Vowel(v)) => {
                clusters.push(Cluster::Independent {
                    vowel: v.clone(),
                    modifier: None,
                });
                i += 1;
            }
            Some(Grapheme::Modifier(m)) => {
                let attached = clusters
                    .last_mut()
                    .map(|c| c.set_modifier(*m))
                    .unwrap_or(false);
                if !attached {
                    clusters.extend(pieces[i].roman.chars().map(Cluster::Verbatim));
                }
                i += 1;
            }
            None => {
                clusters.extend(pieces[i].roman.chars().map(Cluster::Verbatim));
                i += 1;
            }
        }
    }

    let mut text = String::with_capacity(roman.len() * 3);
    for c in &clusters {
        c.render(&mut text);
    }
    let unmapped = clusters
        .iter()
        .filter(|c| matches!(c, Cluster::Verbatim(_)))
        .count();
    trace!(roman, %text, unmapped, "transliterate");

    PhoneticRendering {
        text,
        clusters,
        unmapped,
    }
}

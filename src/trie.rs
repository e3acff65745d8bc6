//! Byte-keyed prefix trie shared by the phonetic table and the lexicon.
//!
//! Values are `u32` ids into a side table owned by the caller. The trie is
//! built once and only read afterwards, so a plain `HashMap` per node is
//! enough; no node is ever removed.

use std::collections::HashMap;

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    Exact(u32),
    ExactAndPrefix(u32),
}

/// A key that matched a prefix of the query: `len` bytes, value `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch {
    pub len: usize,
    pub id: u32,
}

#[derive(Debug, Default)]
struct Node {
    children: HashMap<u8, Node>,
    value: Option<u32>,
}

#[derive(Debug, Default)]
pub struct PrefixTrie {
    root: Node,
    len: usize,
    max_key_len: usize,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key` with value `id`. Returns the previous id if the key was
    /// already present.
    pub fn insert(&mut self, key: &[u8], id: u32) -> Option<u32> {
        let mut node = &mut self.root;
        for &b in key {
            node = node.children.entry(b).or_default();
        }
        let prev = node.value.replace(id);
        if prev.is_none() {
            self.len += 1;
            self.max_key_len = self.max_key_len.max(key.len());
        }
        prev
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length in bytes of the longest key.
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    pub fn lookup(&self, key: &[u8]) -> TrieLookupResult {
        let mut node = &self.root;
        for b in key {
            match node.children.get(b) {
                Some(child) => node = child,
                None => return TrieLookupResult::None,
            }
        }
        let has_children = !node.children.is_empty();
        match (node.value, has_children) {
            (None, false) => TrieLookupResult::None,
            (None, true) => TrieLookupResult::Prefix,
            (Some(id), false) => TrieLookupResult::Exact(id),
            (Some(id), true) => TrieLookupResult::ExactAndPrefix(id),
        }
    }

    pub fn exact_match(&self, key: &[u8]) -> Option<u32> {
        match self.lookup(key) {
            TrieLookupResult::Exact(id) | TrieLookupResult::ExactAndPrefix(id) => Some(id),
            _ => None,
        }
    }

    /// All keys that are prefixes of `query`, shortest first.
    pub fn common_prefix_search(&self, query: &[u8]) -> Vec<PrefixMatch> {
        let mut out = Vec::new();
        let mut node = &self.root;
        for (i, b) in query.iter().enumerate() {
            match node.children.get(b) {
                Some(child) => node = child,
                None => break,
            }
            if let Some(id) = node.value {
                out.push(PrefixMatch { len: i + 1, id });
            }
        }
        out
    }

    /// The longest key that is a prefix of `query`.
    pub fn longest_prefix(&self, query: &[u8]) -> Option<PrefixMatch> {
        self.common_prefix_search(query).pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PrefixTrie {
        let mut trie = PrefixTrie::new();
        for (id, key) in ["t", "th", "Th", "a", "aa", "aee"].iter().enumerate() {
            trie.insert(key.as_bytes(), id as u32);
        }
        trie
    }

    #[test]
    fn test_exact_and_prefix() {
        let trie = sample();
        assert_eq!(trie.lookup(b"t"), TrieLookupResult::ExactAndPrefix(0));
        assert_eq!(trie.lookup(b"th"), TrieLookupResult::Exact(1));
        assert_eq!(trie.lookup(b"ae"), TrieLookupResult::Prefix);
        assert_eq!(trie.lookup(b"x"), TrieLookupResult::None);
    }

    #[test]
    fn test_case_sensitive_keys() {
        let trie = sample();
        assert_eq!(trie.exact_match(b"Th"), Some(2));
        assert_eq!(trie.exact_match(b"T"), None);
    }

    #[test]
    fn test_common_prefix_search_order() {
        let trie = sample();
        let matches = trie.common_prefix_search(b"aeema");
        assert_eq!(
            matches,
            vec![PrefixMatch { len: 1, id: 3 }, PrefixMatch { len: 3, id: 5 }]
        );
        let matches = trie.common_prefix_search(b"aaee");
        assert_eq!(
            matches,
            vec![PrefixMatch { len: 1, id: 3 }, PrefixMatch { len: 2, id: 4 }]
        );
    }

    #[test]
    fn test_longest_prefix() {
        let trie = sample();
        assert_eq!(trie.longest_prefix(b"thaeninma").map(|m| m.len), Some(2));
        assert_eq!(trie.longest_prefix(b"aeema").map(|m| m.len), Some(3));
        assert_eq!(trie.longest_prefix(b"xyz"), None);
        assert_eq!(trie.longest_prefix(b"aee").map(|m| m.id), Some(5));
    }

    #[test]
    fn test_len_and_reinsert() {
        let mut trie = sample();
        assert_eq!(trie.len(), 6);
        assert_eq!(trie.max_key_len(), 3);
        assert_eq!(trie.insert(b"th", 9), Some(1));
        assert_eq!(trie.len(), 6);
        assert_eq!(trie.exact_match(b"th"), Some(9));
    }
}

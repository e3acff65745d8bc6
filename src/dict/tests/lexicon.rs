use crate::dict::{
    ContextCondition, DictError, GrammarTag, Lexicon, DEFAULT_LEXICON_TOML, DEFAULT_WEIGHT,
};

const SAMPLE: &str = r#"
version = 1

[words]
mama = "මම"
gedhara = "ගෙදර"
innee = "ඉන්නේ"
kae = "කැ"
kaeema = "කෑම"

[[entries]]
roman = "oonee"
script = "ඕනෑ"

[[entries]]
roman = "oonee"
script = "ඕනේ"
weight = 20
when = "after:infinitive"

[[entries]]
roman = "karuNaa"
script = "කරුණා"

[[entries]]
roman = "tie"
script = "පළමු"
weight = 5

[[entries]]
roman = "tie"
script = "දෙවන"
weight = 5

[[idioms]]
roman = "karuNaa karala"
script = "කරුණාකරල"

[foreign]
words = ["Facebook", "bro"]
"#;

fn sample() -> Lexicon {
    Lexicon::from_toml(SAMPLE).unwrap()
}

#[test]
fn test_lookup_exact() {
    let lex = sample();
    let entries = lex.lookup("mama").unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].script, "මම");
    assert_eq!(entries[0].weight, DEFAULT_WEIGHT);
    assert!(lex.lookup("api").is_none());
}

#[test]
fn test_lookup_is_case_sensitive_with_folded_fallback() {
    let lex = sample();
    assert!(lex.lookup("Mama").is_none());
    assert_eq!(lex.lookup_folded("Mama").unwrap()[0].script, "මම");
    assert!(lex.lookup("karuna").is_none());
    assert!(lex.lookup("karuNaa").is_some());
}

#[test]
fn test_entries_sorted_by_weight_then_order() {
    let lex = sample();
    let oonee = lex.lookup("oonee").unwrap();
    assert_eq!(oonee[0].script, "ඕනේ");
    assert_eq!(
        oonee[0].when,
        Some(ContextCondition::After(GrammarTag::Infinitive))
    );
    assert_eq!(oonee[1].script, "ඕනෑ");

    let tie = lex.lookup("tie").unwrap();
    assert_eq!(tie[0].script, "පළමු", "first registered wins a weight tie");
    assert_eq!(tie[1].script, "දෙවන");
}

#[test]
fn test_longest_prefix() {
    let lex = sample();
    let (len, entries) = lex.longest_prefix(b"kaeemakannavaa").unwrap();
    assert_eq!(len, 6);
    assert_eq!(entries[0].script, "කෑම");

    let (len, _) = lex.longest_prefix(b"kaekaa").unwrap();
    assert_eq!(len, 3);

    assert!(lex.longest_prefix(b"xyz").is_none());
}

#[test]
fn test_common_prefix_search() {
    let lex = sample();
    let hits = lex.common_prefix_search("kaeema");
    let lens: Vec<usize> = hits.iter().map(|(len, _)| *len).collect();
    assert_eq!(lens, vec![3, 6]);
}

#[test]
fn test_max_key_len() {
    let lex = sample();
    assert_eq!(lex.max_key_len(), "gedhara".len());
}

#[test]
fn test_foreign_is_case_insensitive() {
    let lex = sample();
    assert!(lex.is_foreign("facebook"));
    assert!(lex.is_foreign("FaceBook"));
    assert!(lex.is_foreign("bro"));
    assert!(!lex.is_foreign("mama"));
}

#[test]
fn test_idiom_lookup() {
    let lex = sample();
    assert_eq!(
        lex.idiom(&["karuNaa", "karala"]).unwrap().script,
        "කරුණාකරල"
    );
    assert!(lex.idiom(&["karuNaa"]).is_none());
    assert!(lex.idiom(&["karala", "karuNaa"]).is_none());
    assert_eq!(lex.max_idiom_words(), 2);
}

#[test]
fn test_stats() {
    let stats = sample().stats();
    assert_eq!(stats.keys, 8);
    assert_eq!(stats.entries, 10);
    assert_eq!(stats.idioms, 1);
    assert_eq!(stats.foreign, 2);
}

#[test]
fn test_ids_are_unique() {
    assert_ne!(sample().id(), sample().id());
}

#[test]
fn test_invalid_entries() {
    let bad_key = SAMPLE.replace("mama = \"මම\"", "\"ma ma\" = \"මම\"");
    assert!(matches!(
        Lexicon::from_toml(&bad_key),
        Err(DictError::Invalid(_))
    ));

    let empty_script = SAMPLE.replace("mama = \"මම\"", "mama = \"\"");
    assert!(matches!(
        Lexicon::from_toml(&empty_script),
        Err(DictError::Invalid(_))
    ));

    let short_idiom = SAMPLE.replace("roman = \"karuNaa karala\"", "roman = \"karuNaa\"");
    assert!(matches!(
        Lexicon::from_toml(&short_idiom),
        Err(DictError::Invalid(_))
    ));

    let version = SAMPLE.replace("version = 1", "version = 9");
    assert!(matches!(
        Lexicon::from_toml(&version),
        Err(DictError::Invalid(_))
    ));
}

#[test]
fn test_default_lexicon_is_valid() {
    let lex = Lexicon::from_toml(DEFAULT_LEXICON_TOML).unwrap();
    assert!(lex.stats().keys > 80);
    assert!(lex.is_foreign("facebook"));
    assert_eq!(lex.lookup("mama").unwrap()[0].script, "මම");
    assert_eq!(lex.lookup("passe").unwrap()[0].script, "පස්සේ");
    assert_eq!(Lexicon::default_shared().id(), Lexicon::default_shared().id());
}

// --- Binary format ---

#[test]
fn test_binary_roundtrip() {
    let lex = sample();
    let bytes = lex.to_bytes().unwrap();
    assert_eq!(&bytes[..4], b"SNLX");
    let lex2 = Lexicon::from_bytes(&bytes).unwrap();
    assert_eq!(lex.to_data(), lex2.to_data());
    assert_eq!(lex2.lookup("oonee").unwrap()[0].script, "ඕනේ");
    assert_ne!(lex.id(), lex2.id());
}

#[test]
fn test_invalid_magic() {
    let result = Lexicon::from_bytes(b"XXXX\x01data");
    assert!(matches!(result, Err(DictError::InvalidMagic)));
}

#[test]
fn test_header_too_short() {
    let result = Lexicon::from_bytes(b"SNL");
    assert!(matches!(result, Err(DictError::InvalidHeader)));
}

#[test]
fn test_unsupported_version() {
    let result = Lexicon::from_bytes(b"SNLX\x99");
    assert!(matches!(result, Err(DictError::UnsupportedVersion(0x99))));
}

#[test]
fn test_truncated_payload() {
    let bytes = sample().to_bytes().unwrap();
    let result = Lexicon::from_bytes(&bytes[..bytes.len() / 2]);
    assert!(matches!(result, Err(DictError::Deserialize(_))));
}

#[test]
fn test_save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.snlx");
    let lex = sample();
    lex.save(&path).unwrap();

    let opened = Lexicon::open(&path).unwrap();
    assert_eq!(opened.to_data(), lex.to_data());
    let loaded = Lexicon::load(&path).unwrap();
    assert_eq!(loaded.stats(), lex.stats());
}

#[test]
fn test_load_toml_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lexicon.toml");
    std::fs::write(&path, SAMPLE).unwrap();
    let lex = Lexicon::load(&path).unwrap();
    assert!(lex.contains("gedhara"));
}

#[test]
fn test_open_missing_file() {
    let result = Lexicon::open(std::path::Path::new("/nonexistent/lexicon.snlx"));
    assert!(matches!(result, Err(DictError::Io(_))));
}

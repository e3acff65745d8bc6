//! Character-level Unicode classification for Sinhala and romanized text.

/// Al-lakuna (virama), U+0DCA.
pub const VIRAMA: char = '\u{0DCA}';

/// Zero width joiner, used to request the rakaransaya/yansaya conjunct forms.
pub const ZWJ: char = '\u{200D}';

/// Check the full Sinhala block (U+0D80..U+0DFF).
pub fn is_sinhala(c: char) -> bool {
    ('\u{0D80}'..='\u{0DFF}').contains(&c)
}

/// Dependent vowel signs (U+0DCF..U+0DDF, U+0DF2..U+0DF3).
pub fn is_vowel_sign(c: char) -> bool {
    ('\u{0DCF}'..='\u{0DDF}').contains(&c) || ('\u{0DF2}'..='\u{0DF3}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// ASCII punctuation, emitted as its own passthrough token.
///
/// Non-ASCII symbols are grouped with other foreign-script runs instead.
pub fn is_passthrough_punct(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// An all-capitals Latin word of two or more letters ("ASAP", "OTP").
pub fn is_abbreviation(s: &str) -> bool {
    s.len() >= 2 && s.chars().all(|c| c.is_ascii_uppercase())
}

/// Length in bytes of the leading run of ASCII capitals.
pub fn leading_caps_len(s: &str) -> usize {
    s.bytes().take_while(|b| b.is_ascii_uppercase()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_sinhala('ම'));
        assert!(is_sinhala(VIRAMA));
        assert!(!is_sinhala('m'));
        assert!(is_vowel_sign('ා'));
        assert!(is_vowel_sign('ෙ'));
        assert!(!is_vowel_sign('ක'));
        assert!(is_latin('a'));
        assert!(!is_latin('අ'));
    }

    #[test]
    fn test_punctuation() {
        assert!(is_passthrough_punct('?'));
        assert!(is_passthrough_punct('('));
        assert!(is_passthrough_punct('.'));
        assert!(!is_passthrough_punct('a'));
        assert!(!is_passthrough_punct('7'));
        assert!(!is_passthrough_punct(' '));
    }

    #[test]
    fn test_abbreviation() {
        assert!(is_abbreviation("ASAP"));
        assert!(is_abbreviation("OTP"));
        assert!(!is_abbreviation("A"));
        assert!(!is_abbreviation("OTPeka"));
        assert!(!is_abbreviation("mata"));
        assert_eq!(leading_caps_len("OTPeka"), 3);
        assert_eq!(leading_caps_len("sThaanaya"), 0);
    }
}

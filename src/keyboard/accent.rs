//! French accent key substitutions.

/// Standalone apostrophe inserted after chars that have no accented form.
pub const APOSTROPHE: char = '’';

/// Accented replacement for `ch`, if the accent key has one.
pub const fn accented(ch: char) -> Option<char> {
    match ch {
        'a' => Some('à'),
        'e' => Some('é'),
        'i' => Some('î'),
        'u' => Some('û'),
        'o' => Some('ô'),
        'c' => Some('ç'),
        _ => None,
    }
}

/// Text that replaces `previous` when the accent key is pressed.
///
/// With nothing before the cursor the key just produces the apostrophe.
pub fn compose(previous: Option<char>) -> String {
    match previous {
        Some(ch) => accented(ch).map_or_else(|| format!("{ch}{APOSTROPHE}"), String::from),
        None => APOSTROPHE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowels_and_cedilla_have_accented_forms() {
        let pairs = [('a', 'à'), ('e', 'é'), ('i', 'î'), ('u', 'û'), ('o', 'ô'), ('c', 'ç')];
        for (plain, accent) in pairs {
            assert_eq!(accented(plain), Some(accent), "{plain}");
            assert_eq!(compose(Some(plain)), accent.to_string());
        }
    }

    #[test]
    fn test_other_chars_keep_original_and_append_apostrophe() {
        assert_eq!(compose(Some('z')), "z’");
        assert_eq!(compose(Some('A')), "A’");
        assert_eq!(compose(Some(' ')), " ’");
    }

    #[test]
    fn test_nothing_before_cursor_yields_apostrophe() {
        assert_eq!(compose(None), "’");
    }
}

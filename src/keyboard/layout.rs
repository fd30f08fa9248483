//! Key definitions and per-locale key rows.

use std::fmt;

use super::mode::KeyboardMode;
use super::shift::ShiftState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Inserts a char; letters follow the shift state.
    Character(char),
    Space,
    Delete,
    Shift,
    /// Switches to another layout family.
    Mode(KeyboardMode),
    /// French accent key, composes with the char before the cursor.
    Accent,
}

impl Key {
    /// Text shown on the key cap.
    pub fn label(self, shift: &ShiftState) -> String {
        match self {
            Self::Character(ch) => shift.apply(ch),
            Self::Space => "space".to_string(),
            Self::Delete => "⌫".to_string(),
            Self::Shift if shift.is_caps_locked() => "⇪".to_string(),
            Self::Shift => "⇧".to_string(),
            Self::Mode(mode) => mode.switch_label().to_string(),
            Self::Accent => "´".to_string(),
        }
    }

    /// Whether pressing the key counts as typing a char for auto shift-off.
    pub const fn inserts_text(self) -> bool {
        matches!(self, Self::Character(_) | Self::Space | Self::Accent)
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    #[value(name = "en")]
    English,
    #[value(name = "fr")]
    French,
}

impl Locale {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "en" | "english" => Some(Self::English),
            "fr" | "french" => Some(Self::French),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::French => "fr",
        }
    }

    const fn letter_rows(self) -> [&'static str; 3] {
        match self {
            Self::English => ["qwertyuiop", "asdfghjkl", "zxcvbnm"],
            Self::French => ["azertyuiop", "qsdfghjklm", "wxcvbn"],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const NUMBER_ROWS: [&str; 3] = ["1234567890", "-/:;()$&@\"", ".,?!'"];
const SYMBOL_ROWS: [&str; 3] = ["[]{}#%^*+=", "_\\|~<>€£¥•", ".,?!'"];

fn chars(row: &str) -> Vec<Key> {
    row.chars().map(Key::Character).collect()
}

/// Rows of keys for `locale` in `mode`.
///
/// The shift key is left out when case switching is disabled.
pub fn layout(locale: Locale, mode: KeyboardMode, case_switching: bool) -> Vec<Vec<Key>> {
    let [top, middle, bottom] = match mode {
        KeyboardMode::Letters => locale.letter_rows(),
        KeyboardMode::Numbers => NUMBER_ROWS,
        KeyboardMode::Symbols => SYMBOL_ROWS,
    };

    let mut third = Vec::new();
    match mode {
        KeyboardMode::Letters if case_switching => third.push(Key::Shift),
        KeyboardMode::Letters => {}
        KeyboardMode::Numbers => third.push(Key::Mode(KeyboardMode::Symbols)),
        KeyboardMode::Symbols => third.push(Key::Mode(KeyboardMode::Numbers)),
    }
    third.extend(chars(bottom));
    if mode == KeyboardMode::Letters && locale == Locale::French {
        third.push(Key::Accent);
    }
    third.push(Key::Delete);

    let switch = match mode {
        KeyboardMode::Letters => Key::Mode(KeyboardMode::Numbers),
        KeyboardMode::Numbers | KeyboardMode::Symbols => Key::Mode(KeyboardMode::Letters),
    };

    vec![chars(top), chars(middle), third, vec![switch, Key::Space]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_letters_start_with_qwerty() {
        let rows = layout(Locale::English, KeyboardMode::Letters, true);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0][0], Key::Character('q'));
        assert_eq!(rows[2][0], Key::Shift);
        assert_eq!(rows[2].last(), Some(&Key::Delete));
    }

    #[test]
    fn test_french_letters_have_accent_key() {
        let rows = layout(Locale::French, KeyboardMode::Letters, true);
        assert_eq!(rows[0][0], Key::Character('a'));
        assert!(rows[2].contains(&Key::Accent));
    }

    #[test]
    fn test_no_shift_key_without_case_switching() {
        let rows = layout(Locale::English, KeyboardMode::Letters, false);
        assert!(rows.iter().flatten().all(|key| *key != Key::Shift));
    }

    #[test]
    fn test_every_mode_reaches_the_others() {
        for mode in [KeyboardMode::Letters, KeyboardMode::Numbers, KeyboardMode::Symbols] {
            let rows = layout(Locale::English, mode, true);
            let targets: Vec<KeyboardMode> = rows
                .iter()
                .flatten()
                .filter_map(|key| match key {
                    Key::Mode(target) => Some(*target),
                    _ => None,
                })
                .collect();
            assert!(!targets.is_empty(), "{mode}");
            assert!(!targets.contains(&mode), "{mode}");
        }
    }

    #[test]
    fn test_labels_follow_shift() {
        let mut shift = ShiftState::default();
        assert_eq!(Key::Character('q').label(&shift), "q");
        assert_eq!(Key::Shift.label(&shift), "⇧");
        shift.tap(0);
        shift.tap(10);
        assert_eq!(Key::Character('q').label(&shift), "Q");
        assert_eq!(Key::Shift.label(&shift), "⇪");
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("fr"), Some(Locale::French));
        assert_eq!(Locale::parse("en"), Some(Locale::English));
        assert_eq!(Locale::parse("de"), None);
    }
}

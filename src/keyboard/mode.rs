use std::fmt;

/// The active key layout family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyboardMode {
    #[default]
    Letters,
    Numbers,
    Symbols,
}

impl KeyboardMode {
    /// Label shown on the key that switches to this mode.
    pub const fn switch_label(self) -> &'static str {
        match self {
            Self::Letters => "ABC",
            Self::Numbers => "123",
            Self::Symbols => "#+=",
        }
    }
}

impl fmt::Display for KeyboardMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Letters => "letters",
            Self::Numbers => "numbers",
            Self::Symbols => "symbols",
        })
    }
}

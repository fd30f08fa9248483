use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::editor::EditPolicy;
use crate::keyboard::{
    DEFAULT_DOUBLE_TAP_MS, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS, Locale,
};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Use the terminal's own colors.
    #[default]
    Auto,
    Light,
    Dark,
}

/// A malformed flag in a config file or on the command line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{flag} expects a value")]
    MissingValue { flag: &'static str },
    #[error("{flag} expects a number of milliseconds, got {value:?}")]
    InvalidNumber { flag: &'static str, value: String },
    #[error("unknown locale {0:?} (expected en or fr)")]
    UnknownLocale(String),
    #[error("unknown theme {0:?} (expected auto, light or dark)")]
    UnknownTheme(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub locale: Option<Locale>,
    pub theme: Option<ThemeMode>,
    pub no_shift: bool,
    pub legacy_append: bool,
    pub repeat_delay_ms: Option<u64>,
    pub repeat_interval_ms: Option<u64>,
    pub double_tap_ms: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans are or-ed, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            locale: other.locale.or(self.locale),
            theme: other.theme.or(self.theme),
            no_shift: self.no_shift || other.no_shift,
            legacy_append: self.legacy_append || other.legacy_append,
            repeat_delay_ms: other.repeat_delay_ms.or(self.repeat_delay_ms),
            repeat_interval_ms: other.repeat_interval_ms.or(self.repeat_interval_ms),
            double_tap_ms: other.double_tap_ms.or(self.double_tap_ms),
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }

    /// Resolve the flags into the settings a keyboard session is built from.
    pub fn keyboard_config(&self) -> KeyboardConfig {
        KeyboardConfig {
            locale: self.locale.unwrap_or_default(),
            theme: self.theme.unwrap_or_default(),
            case_switching: !self.no_shift,
            policy: if self.legacy_append {
                EditPolicy::Append
            } else {
                EditPolicy::CursorAware
            },
            repeat_delay_ms: self.repeat_delay_ms.unwrap_or(DEFAULT_REPEAT_DELAY_MS),
            repeat_interval_ms: self.repeat_interval_ms.unwrap_or(DEFAULT_REPEAT_INTERVAL_MS),
            double_tap_ms: self.double_tap_ms.unwrap_or(DEFAULT_DOUBLE_TAP_MS),
        }
    }
}

/// Per-session keyboard settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardConfig {
    pub locale: Locale,
    pub theme: ThemeMode,
    /// `false` for layouts without a shift key.
    pub case_switching: bool,
    pub policy: EditPolicy,
    pub repeat_delay_ms: u64,
    pub repeat_interval_ms: u64,
    pub double_tap_ms: u64,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        ConfigFlags::default().keyboard_config()
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("softboard").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("softboard")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("softboard").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("softboard")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".softboardrc")
}

/// Load flags from an rc file. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file cannot be read or holds a malformed flag.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(split_line_tokens)
        .collect::<Vec<_>>();
    parse_flag_tokens(&tokens).with_context(|| format!("Invalid config {}", path.display()))
}

/// Write `flags` as an rc file, creating parent directories.
///
/// # Errors
/// Returns an error if the directory or file cannot be written.
pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# softboard defaults (saved with --save)".to_string());
    if let Some(locale) = flags.locale {
        lines.push(format!("--locale {}", locale.code()));
    }
    if let Some(theme) = flags.theme {
        let theme_str = match theme {
            ThemeMode::Auto => "auto",
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        };
        lines.push(format!("--theme {theme_str}"));
    }
    if flags.no_shift {
        lines.push("--no-shift".to_string());
    }
    if flags.legacy_append {
        lines.push("--legacy-append".to_string());
    }
    if let Some(ms) = flags.repeat_delay_ms {
        lines.push(format!("--repeat-delay-ms {ms}"));
    }
    if let Some(ms) = flags.repeat_interval_ms {
        lines.push(format!("--repeat-interval-ms {ms}"));
    }
    if let Some(ms) = flags.double_tap_ms {
        lines.push(format!("--double-tap-ms {ms}"));
    }
    if let Some(log_file) = &flags.log_file {
        let shown = log_file.display().to_string();
        if shown.contains('"') {
            anyhow::bail!("Cannot save log file path containing a quote: {shown}");
        }
        lines.push(format!("--log-file \"{shown}\""));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

/// Remove a saved rc file if present.
///
/// # Errors
/// Returns an error if the file exists but cannot be removed.
pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list, ignoring anything else.
///
/// Both `--flag value` and `--flag=value` are accepted.
///
/// # Errors
/// Returns [`ConfigError`] when a known flag has a missing or invalid value.
pub fn parse_flag_tokens(tokens: &[String]) -> Result<ConfigFlags, ConfigError> {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let mut value = |flag: &'static str| -> Result<String, ConfigError> {
            if let Some(value) = inline {
                return Ok(value.to_string());
            }
            i += 1;
            tokens
                .get(i)
                .cloned()
                .ok_or(ConfigError::MissingValue { flag })
        };
        match name {
            "--no-shift" => flags.no_shift = true,
            "--legacy-append" => flags.legacy_append = true,
            "--locale" => {
                let raw = value("--locale")?;
                flags.locale = Some(Locale::parse(&raw).ok_or(ConfigError::UnknownLocale(raw))?);
            }
            "--theme" => {
                let raw = value("--theme")?;
                flags.theme = Some(parse_theme(&raw).ok_or(ConfigError::UnknownTheme(raw))?);
            }
            "--repeat-delay-ms" => {
                let raw = value("--repeat-delay-ms")?;
                flags.repeat_delay_ms = Some(parse_ms("--repeat-delay-ms", raw)?);
            }
            "--repeat-interval-ms" => {
                let raw = value("--repeat-interval-ms")?;
                flags.repeat_interval_ms = Some(parse_ms("--repeat-interval-ms", raw)?);
            }
            "--double-tap-ms" => {
                let raw = value("--double-tap-ms")?;
                flags.double_tap_ms = Some(parse_ms("--double-tap-ms", raw)?);
            }
            "--log-file" => flags.log_file = Some(PathBuf::from(value("--log-file")?)),
            _ => {}
        }
        i += 1;
    }
    Ok(flags)
}

/// Split an rc line on whitespace; double quotes group a token.
fn split_line_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            ch if ch.is_whitespace() && !quoted => {
                if started {
                    tokens.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            ch => {
                current.push(ch);
                started = true;
            }
        }
    }
    if started {
        tokens.push(current);
    }
    tokens
}

fn parse_theme(s: &str) -> Option<ThemeMode> {
    match s {
        "auto" => Some(ThemeMode::Auto),
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

fn parse_ms(flag: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidNumber { flag, value })
}

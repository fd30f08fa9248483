//! Softboard - An on-screen software keyboard for the terminal.
//!
//! # Usage
//!
//! ```bash
//! softboard
//! softboard --locale fr --text "bonjour"
//! softboard --no-shift --repeat-interval-ms 60
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use softboard::app::App;
use softboard::config::{
    ConfigFlags, ThemeMode, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, save_config_flags,
};
use softboard::keyboard::Locale;

/// An on-screen software keyboard for the terminal
#[derive(Parser, Debug)]
#[command(name = "softboard", version, about, long_about = None)]
struct Cli {
    /// Key layout locale
    #[arg(long, value_enum)]
    locale: Option<Locale>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeMode>,

    /// Layout without a shift key (letters are typed as shown)
    #[arg(long)]
    no_shift: bool,

    /// Always edit at the end of the text, ignoring the cursor
    #[arg(long)]
    legacy_append: bool,

    /// Hold time before delete starts repeating
    #[arg(long, value_name = "MS")]
    repeat_delay_ms: Option<u64>,

    /// Time between delete repeats
    #[arg(long, value_name = "MS")]
    repeat_interval_ms: Option<u64>,

    /// Window for two shift taps to lock caps
    #[arg(long, value_name = "MS")]
    double_tap_ms: Option<u64>,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Initial text of the first field
    #[arg(long, default_value = "")]
    text: String,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn config_flags(&self) -> ConfigFlags {
        ConfigFlags {
            locale: self.locale,
            theme: self.theme,
            no_shift: self.no_shift,
            legacy_append: self.legacy_append,
            repeat_delay_ms: self.repeat_delay_ms,
            repeat_interval_ms: self.repeat_interval_ms,
            double_tap_ms: self.double_tap_ms,
            log_file: self.log_file.clone(),
        }
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("softboard=debug")),
                )
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            // The terminal is owned by the UI, so only warnings reach stderr.
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
                )
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.config_flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let mut app = App::new(effective.keyboard_config()).with_initial_text(cli.text);
    app.run().context("Application error")
}

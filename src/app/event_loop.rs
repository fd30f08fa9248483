use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::supports_keyboard_enhancement;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Message, update};

/// Poll timeout while nothing is scheduled.
const IDLE_POLL_MS: u64 = 250;

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or event polling fails.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - softboard requires an interactive terminal")?;

        self.enhanced_keys = supports_keyboard_enhancement().unwrap_or(false)
            && execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .is_ok();
        let _ = execute!(stdout(), EnableBracketedPaste);
        info!(enhanced_keys = self.enhanced_keys, "terminal ready");

        let result = self.event_loop(&mut terminal);

        let _ = execute!(stdout(), DisableBracketedPaste);
        if self.enhanced_keys {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        ratatui::restore();
        result
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal) -> Result<()> {
        let start = Instant::now();
        let mut model = self.build_model();

        loop {
            terminal
                .draw(|frame| crate::ui::render(&model, frame))
                .context("Failed to draw frame")?;

            let now_ms = elapsed_ms(start);
            let wait_ms = model
                .next_repeat_in(now_ms)
                .map_or(IDLE_POLL_MS, |ms| ms.min(IDLE_POLL_MS));
            if event::poll(Duration::from_millis(wait_ms))? {
                let event = event::read()?;
                let now_ms = elapsed_ms(start);
                if let Some(msg) = self.handle_event(event, &model, now_ms) {
                    model = update(model, msg);
                }
            }

            if model.delete_held() {
                model = update(model, Message::Tick(elapsed_ms(start)));
            }

            if model.should_quit {
                debug!(chars = model.buffer.len(), "quitting");
                return Ok(());
            }
        }
    }
}

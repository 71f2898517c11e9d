use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, update};
use crate::screen::Screen;

impl App {
    /// Run the main event loop until the user quits.
    ///
    /// Returns the screen with its final values.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(self) -> Result<Screen> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: prefpane requires an interactive terminal")?;
        // Pastes must arrive as one event, not as keystrokes ending in Enter.
        if let Err(err) = execute!(std::io::stdout(), EnableBracketedPaste) {
            tracing::warn!(%err, "bracketed paste unavailable");
        }
        let size = terminal.size()?;

        let mut model = self.into_model((size.width, size.height));
        Self::reload_preferences(&mut model, false);

        let result = Self::event_loop(&mut terminal, &mut model);
        if let Err(err) = execute!(std::io::stdout(), DisableBracketedPaste) {
            tracing::debug!(%err, "failed to disable bracketed paste");
        }
        ratatui::restore();

        result.map(|()| model.into_screen())
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            let poll_ms = if model.active_toast().is_some() {
                100
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Coalesce key repeat bursts into a single render.
                loop {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        tracing::trace!(?msg, "message");
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &side_msg);
                        needs_render = true;
                    }
                    if model.should_quit || !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}

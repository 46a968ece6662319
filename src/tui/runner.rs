//! TUI Runner
//!
//! Terminal setup and the wizard event loop.

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyCode, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use super::render;
use crate::wizard::{QuoteWizard, SubmissionCoordinator, WizardAction};

/// How long the success notice stays on screen before the wizard closes.
/// Presentational only — the hand-off is already done by then.
const CLOSE_NOTICE_DELAY: Duration = Duration::from_millis(900);

/// Run one wizard session to completion (hand-off or cancel).
pub async fn run_wizard(
    mut wizard: QuoteWizard,
    coordinator: SubmissionCoordinator,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_loop(&mut terminal, &mut wizard, &coordinator).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableBracketedPaste)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop
async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    wizard: &mut QuoteWizard,
    coordinator: &SubmissionCoordinator,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut events = EventStream::new();
    let mut close_at: Option<Instant> = None;

    loop {
        terminal.draw(|f| render::render_wizard(f, wizard))?;

        // Session ends after the success notice had its moment
        if let Some(deadline) = close_at
            && Instant::now() >= deadline
        {
            break;
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(100)) => {}
            maybe_event = events.next() => {
                let Some(event) = maybe_event else { break };
                match event? {
                    Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
                        if key_event.code == KeyCode::Char('c')
                            && key_event.modifiers.contains(KeyModifiers::CONTROL)
                        {
                            break;
                        }
                        // Ignore input once the closing notice is up
                        if close_at.is_some() {
                            continue;
                        }
                        match wizard.handle_key(key_event) {
                            WizardAction::None => {}
                            WizardAction::Cancel => break,
                            WizardAction::Submit => {
                                if coordinator.submit(wizard).await.is_ok() {
                                    close_at = Some(Instant::now() + CLOSE_NOTICE_DELAY);
                                }
                                // On failure the wizard carries the error
                                // notice and stays open for a retry
                            }
                        }
                    }
                    Event::Paste(text) => wizard.handle_paste(&text),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

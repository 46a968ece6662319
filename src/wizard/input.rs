//! Key handling for the wizard steps.

use crossterm::event::{KeyCode, KeyEvent};

use super::session::QuoteWizard;
use super::types::*;

impl QuoteWizard {
    /// Handle a key event for the current step.
    /// Returns a `WizardAction` indicating what the app should do.
    pub fn handle_key(&mut self, event: KeyEvent) -> WizardAction {
        // No interaction while a hand-off is in flight
        if self.is_submitting() {
            return WizardAction::None;
        }

        // Global: Escape goes back; from step 1 it cancels the session
        if event.code == KeyCode::Esc {
            if self.step == WizardStep::Location {
                return WizardAction::Cancel;
            }
            self.retreat();
            return WizardAction::None;
        }

        match self.step {
            WizardStep::Location => self.handle_location_key(event),
            WizardStep::Size => self.handle_size_key(event),
            WizardStep::StyleIdea => self.handle_style_idea_key(event),
            WizardStep::Review => self.handle_review_key(event),
        }
    }

    fn handle_location_key(&mut self, event: KeyEvent) -> WizardAction {
        let count = self.catalog.locations.len();
        match event.code {
            KeyCode::Up => {
                self.focused_field = self.focused_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if count > 0 && self.focused_field < count - 1 {
                    self.focused_field += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if idx < count {
                    self.focused_field = idx;
                    let id = self.catalog.locations[idx].id.clone();
                    self.select_location(&id);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(entry) = self.catalog.locations.get(self.focused_field) {
                    let id = entry.id.clone();
                    self.select_location(&id);
                }
            }
            KeyCode::Enter => {
                if let Some(entry) = self.catalog.locations.get(self.focused_field) {
                    let id = entry.id.clone();
                    self.select_location(&id);
                }
                let _ = self.advance();
            }
            _ => {}
        }
        WizardAction::None
    }

    fn handle_size_key(&mut self, event: KeyEvent) -> WizardAction {
        let count = self.catalog.sizes.len();
        match event.code {
            KeyCode::Up => {
                self.focused_field = self.focused_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if count > 0 && self.focused_field < count - 1 {
                    self.focused_field += 1;
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if idx < count {
                    self.focused_field = idx;
                    let id = self.catalog.sizes[idx].id.clone();
                    self.select_size(&id);
                }
            }
            KeyCode::Char(' ') => {
                if let Some(entry) = self.catalog.sizes.get(self.focused_field) {
                    let id = entry.id.clone();
                    self.select_size(&id);
                }
            }
            KeyCode::Enter => {
                if let Some(entry) = self.catalog.sizes.get(self.focused_field) {
                    let id = entry.id.clone();
                    self.select_size(&id);
                }
                let _ = self.advance();
            }
            _ => {}
        }
        WizardAction::None
    }

    fn handle_style_idea_key(&mut self, event: KeyEvent) -> WizardAction {
        match self.style_field {
            StyleIdeaField::Styles => match event.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    self.style_field = StyleIdeaField::Description;
                }
                KeyCode::Up => {
                    self.focused_field = self.focused_field.saturating_sub(1);
                }
                KeyCode::Down => {
                    let count = self.catalog.styles.len();
                    if count > 0 && self.focused_field < count - 1 {
                        self.focused_field += 1;
                    }
                }
                KeyCode::Char(' ') => {
                    if let Some(label) = self.catalog.styles.get(self.focused_field) {
                        let label = label.clone();
                        self.toggle_style(&label);
                    }
                }
                KeyCode::Enter => {
                    let _ = self.advance();
                }
                _ => {}
            },
            StyleIdeaField::Description => match event.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    self.style_field = StyleIdeaField::Styles;
                }
                KeyCode::Char(c) => {
                    self.selection.description.push(c);
                }
                KeyCode::Backspace => {
                    self.selection.description.pop();
                }
                KeyCode::Enter => {
                    let _ = self.advance();
                }
                _ => {}
            },
        }
        WizardAction::None
    }

    fn handle_review_key(&mut self, event: KeyEvent) -> WizardAction {
        match event.code {
            KeyCode::Enter => WizardAction::Submit,
            _ => WizardAction::None,
        }
    }

    /// Paste into the description box: keep it a single paragraph.
    pub fn handle_paste(&mut self, text: &str) {
        if self.step == WizardStep::StyleIdea && self.style_field == StyleIdeaField::Description {
            let clean = text.replace(['\r', '\n'], " ");
            self.selection.description.push_str(&clean);
        }
    }
}

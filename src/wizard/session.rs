//! Main quote wizard state.

use crate::catalog::Catalog;

use super::types::*;

/// One wizard session: step position, accumulated selection, submission
/// status, and the navigation state the renderer needs.
///
/// Created when the wizard opens, discarded on cancel or successful
/// hand-off — partial sessions are never persisted, reopening starts fresh.
pub struct QuoteWizard {
    pub step: WizardStep,
    pub selection: Selection,
    pub status: SubmissionStatus,
    pub catalog: Catalog,

    /// Index of the highlighted entry on list steps
    pub focused_field: usize,
    /// Which area has focus on the styles + idea step
    pub style_field: StyleIdeaField,

    pub error_message: Option<String>,
    /// Transient success notice ("Redirecionando para o WhatsApp...")
    pub notice: Option<String>,
}

impl QuoteWizard {
    /// Create a fresh session on step 1 with an empty selection.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            step: WizardStep::Location,
            selection: Selection::default(),
            status: SubmissionStatus::Idle,
            catalog,
            focused_field: 0,
            style_field: StyleIdeaField::Styles,
            error_message: None,
            notice: None,
        }
    }

    /// Set the body location. Reselecting the same code is a no-op; the UI
    /// only offers catalog codes, unknown ones are carried through and the
    /// composer falls back to the raw code.
    pub fn select_location(&mut self, id: &str) {
        if self.selection.body_location.as_deref() != Some(id) {
            self.selection.body_location = Some(id.to_string());
        }
    }

    /// Set the size tier. Same contract as `select_location`.
    pub fn select_size(&mut self, id: &str) {
        if self.selection.size.as_deref() != Some(id) {
            self.selection.size = Some(id.to_string());
        }
    }

    /// Symmetric style toggle.
    pub fn toggle_style(&mut self, label: &str) {
        self.selection.toggle_style(label);
    }

    /// Replace the free-form idea text verbatim, empty allowed.
    pub fn set_description(&mut self, text: &str) {
        self.selection.description = text.to_string();
    }

    /// Progress ratio for the header bar (step / total).
    pub fn progress_ratio(&self) -> f64 {
        self.step.number() as f64 / WizardStep::total() as f64
    }

    /// Repeat submission is disabled while a hand-off is in flight.
    pub fn is_submitting(&self) -> bool {
        self.status == SubmissionStatus::Submitting
    }
}

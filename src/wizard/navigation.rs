//! Step transitions: validation-gated advance, always-allowed retreat.

use crate::error::Error;

use super::session::QuoteWizard;
use super::types::WizardStep;

impl QuoteWizard {
    /// Advance to the next step.
    ///
    /// Steps 1 and 2 gate on their required field; on failure the step does
    /// not change and the caller gets a `Validation` error with the message
    /// to show. Advancing from the review step is a no-op.
    pub fn advance(&mut self) -> Result<(), Error> {
        match self.step {
            WizardStep::Location => {
                if self.selection.body_location.is_none() {
                    let message = "Selecione o local do corpo".to_string();
                    self.error_message = Some(message.clone());
                    return Err(Error::Validation(message));
                }
                self.step = WizardStep::Size;
            }
            WizardStep::Size => {
                if self.selection.size.is_none() {
                    let message = "Selecione o tamanho".to_string();
                    self.error_message = Some(message.clone());
                    return Err(Error::Validation(message));
                }
                self.step = WizardStep::StyleIdea;
            }
            WizardStep::StyleIdea => {
                // Styles and description are never required
                self.step = WizardStep::Review;
            }
            WizardStep::Review => {
                // Submission is the coordinator's job, not a step change
            }
        }
        self.error_message = None;
        self.focused_field = 0;
        Ok(())
    }

    /// Go back one step. Never validates, floors at step 1.
    pub fn retreat(&mut self) {
        self.error_message = None;
        self.focused_field = 0;

        self.step = match self.step {
            WizardStep::Location => WizardStep::Location,
            WizardStep::Size => WizardStep::Location,
            WizardStep::StyleIdea => WizardStep::Size,
            WizardStep::Review => WizardStep::StyleIdea,
        };
    }
}

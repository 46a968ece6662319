//! Quote Wizard
//!
//! A 4-step TUI wizard that walks a client through body location, size,
//! styles + idea, and review, then hands the composed quote request to the
//! WhatsApp channel. State and transitions live here; rendering lives in
//! `crate::tui`.

mod input;
pub mod message;
mod navigation;
mod session;
pub mod submit;
mod types;

#[cfg(test)]
mod tests;

// Re-export all public types
pub use session::QuoteWizard;
pub use submit::{LeadStore, QuoteChannel, SubmissionCoordinator};
pub use types::{Selection, StyleIdeaField, SubmissionStatus, WizardAction, WizardStep};

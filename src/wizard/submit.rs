//! Submission orchestration.
//!
//! Validates the session is on review, captures the lead best-effort,
//! composes the message, and hands it to the channel. The channel hand-off
//! is the only failure the user ever sees; lead capture goes down fighting
//! in the logs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::NewLead;
use crate::error::Error;

use super::message::compose;
use super::session::QuoteWizard;
use super::types::{Selection, SubmissionStatus, WizardStep};

/// Persistence collaborator for captured leads. Best-effort: the
/// coordinator never lets a store failure touch the user flow.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn insert_lead(&self, lead: &NewLead) -> Result<(), Error>;
}

/// Outbound channel collaborator: deliver a composed message to a
/// destination (for WhatsApp, open the click-to-chat link).
pub trait QuoteChannel: Send + Sync {
    fn deliver(&self, destination: &str, message: &str) -> Result<(), Error>;
}

impl From<&Selection> for NewLead {
    fn from(selection: &Selection) -> Self {
        Self {
            body_location: selection.body_location.clone(),
            size: selection.size.clone(),
            styles: selection.styles.clone(),
            description: selection.description.clone(),
        }
    }
}

/// Drives `submit()`: status transitions, optional lead capture, message
/// composition, channel hand-off.
///
/// Collaborators are injected at construction by the composition root —
/// there is no ambient client state.
pub struct SubmissionCoordinator {
    channel: Arc<dyn QuoteChannel>,
    store: Option<Arc<dyn LeadStore>>,
    /// Destination phone, digits only.
    destination: String,
}

impl SubmissionCoordinator {
    pub fn new(channel: Arc<dyn QuoteChannel>, destination: impl Into<String>) -> Self {
        Self {
            channel,
            store: None,
            destination: destination.into(),
        }
    }

    /// Attach the optional lead store.
    pub fn with_store(mut self, store: Arc<dyn LeadStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Submit the wizard's current selection.
    ///
    /// On success the session is done — the caller shows the transient
    /// notice and tears the wizard down. On channel failure the status goes
    /// to `Failed`, the selection stays intact, and the user may retry from
    /// the review step.
    pub async fn submit(&self, wizard: &mut QuoteWizard) -> Result<(), Error> {
        if wizard.step != WizardStep::Review {
            return Err(Error::State(wizard.step.number()));
        }

        wizard.status = SubmissionStatus::Submitting;
        wizard.error_message = None;

        // Best-effort lead capture on its own task: composition and
        // hand-off must not wait on it, and its failure must not fail them.
        if let Some(store) = &self.store {
            let store = Arc::clone(store);
            let lead = NewLead::from(&wizard.selection);
            tokio::spawn(async move {
                if let Err(e) = store.insert_lead(&lead).await {
                    tracing::warn!("lead capture failed: {e}");
                }
            });
        }

        let message = compose(&wizard.selection, &wizard.catalog);

        match self.channel.deliver(&self.destination, &message) {
            Ok(()) => {
                tracing::info!("quote hand-off delivered to {}", self.destination);
                wizard.notice = Some("Redirecionando para o WhatsApp...".to_string());
                Ok(())
            }
            Err(e) => {
                tracing::error!("quote hand-off failed: {e}");
                wizard.status = SubmissionStatus::Failed;
                wizard.error_message = Some("Erro ao processar. Tente novamente.".to_string());
                Err(e)
            }
        }
    }
}

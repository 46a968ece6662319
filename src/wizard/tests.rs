use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::*;
use crate::catalog::Catalog;
use crate::db::NewLead;
use crate::error::Error;

fn wizard() -> QuoteWizard {
    QuoteWizard::new(Catalog::defaults())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

#[test]
fn test_wizard_creation() {
    let wizard = wizard();
    assert_eq!(wizard.step, WizardStep::Location);
    assert_eq!(wizard.status, SubmissionStatus::Idle);
    assert_eq!(wizard.selection, Selection::default());
    assert!(wizard.error_message.is_none());
}

#[test]
fn test_step_numbers() {
    assert_eq!(WizardStep::Location.number(), 1);
    assert_eq!(WizardStep::Review.number(), 4);
    assert_eq!(WizardStep::total(), 4);
}

#[test]
fn test_advance_requires_location() {
    let mut wizard = wizard();

    let err = wizard.advance().unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(wizard.step, WizardStep::Location);
    assert!(
        wizard
            .error_message
            .as_ref()
            .is_some_and(|m| m.contains("local"))
    );

    wizard.select_location("braco");
    wizard.advance().unwrap();
    assert_eq!(wizard.step, WizardStep::Size);
    assert!(wizard.error_message.is_none());
}

#[test]
fn test_advance_requires_size() {
    let mut wizard = wizard();
    wizard.select_location("perna");
    wizard.advance().unwrap();

    let err = wizard.advance().unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(wizard.step, WizardStep::Size);

    wizard.select_size("medio");
    wizard.advance().unwrap();
    assert_eq!(wizard.step, WizardStep::StyleIdea);
}

#[test]
fn test_styles_and_description_never_required() {
    let mut wizard = wizard();
    wizard.select_location("braco");
    wizard.advance().unwrap();
    wizard.select_size("mini");
    wizard.advance().unwrap();

    // Nothing selected on step 3, advance still succeeds
    wizard.advance().unwrap();
    assert_eq!(wizard.step, WizardStep::Review);
}

#[test]
fn test_advance_at_review_is_noop() {
    let mut wizard = wizard();
    wizard.select_location("braco");
    wizard.select_size("mini");
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    assert_eq!(wizard.step, WizardStep::Review);

    wizard.advance().unwrap();
    assert_eq!(wizard.step, WizardStep::Review);
}

#[test]
fn test_retreat_floors_at_step_one() {
    let mut wizard = wizard();
    wizard.retreat();
    assert_eq!(wizard.step, WizardStep::Location);

    wizard.select_location("braco");
    wizard.advance().unwrap();
    wizard.retreat();
    assert_eq!(wizard.step, WizardStep::Location);
    // Selection survives going back
    assert_eq!(wizard.selection.body_location.as_deref(), Some("braco"));
}

#[test]
fn test_style_toggle_symmetry() {
    let mut wizard = wizard();
    wizard.toggle_style("Blackwork");
    wizard.toggle_style("Realismo");
    let before = wizard.selection.styles.clone();

    wizard.toggle_style("Fine Line");
    wizard.toggle_style("Fine Line");
    assert_eq!(wizard.selection.styles, before);

    // Removing a middle element preserves the order of the rest
    wizard.toggle_style("Blackwork");
    assert_eq!(wizard.selection.styles, vec!["Realismo".to_string()]);
}

#[test]
fn test_selection_is_idempotent() {
    let mut wizard = wizard();
    wizard.select_location("braco");
    wizard.select_location("braco");
    assert_eq!(wizard.selection.body_location.as_deref(), Some("braco"));

    wizard.select_size("grande");
    wizard.select_size("grande");
    assert_eq!(wizard.selection.size.as_deref(), Some("grande"));
}

#[test]
fn test_set_description_replaces_verbatim() {
    let mut wizard = wizard();
    wizard.set_description("rosa no braço");
    assert_eq!(wizard.selection.description, "rosa no braço");
    wizard.set_description("");
    assert_eq!(wizard.selection.description, "");
}

// ── handle_key tests ──

#[test]
fn test_handle_key_location_navigation_and_select() {
    let mut wizard = wizard();

    wizard.handle_key(key(KeyCode::Down));
    wizard.handle_key(key(KeyCode::Down));
    assert_eq!(wizard.focused_field, 2);
    wizard.handle_key(key(KeyCode::Up));
    assert_eq!(wizard.focused_field, 1);

    // Space selects the focused entry without advancing
    wizard.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(wizard.selection.body_location.as_deref(), Some("perna"));
    assert_eq!(wizard.step, WizardStep::Location);
}

#[test]
fn test_handle_key_number_shortcut() {
    let mut wizard = wizard();
    wizard.handle_key(key(KeyCode::Char('3')));
    assert_eq!(wizard.selection.body_location.as_deref(), Some("costas"));
}

#[test]
fn test_handle_key_enter_selects_and_advances() {
    let mut wizard = wizard();
    wizard.handle_key(key(KeyCode::Enter));
    assert_eq!(wizard.selection.body_location.as_deref(), Some("braco"));
    assert_eq!(wizard.step, WizardStep::Size);

    wizard.handle_key(key(KeyCode::Down));
    wizard.handle_key(key(KeyCode::Enter));
    assert_eq!(wizard.selection.size.as_deref(), Some("pequeno"));
    assert_eq!(wizard.step, WizardStep::StyleIdea);
}

#[test]
fn test_handle_key_focus_does_not_run_off_the_list() {
    let mut wizard = wizard();
    for _ in 0..20 {
        wizard.handle_key(key(KeyCode::Down));
    }
    assert_eq!(wizard.focused_field, wizard.catalog.locations.len() - 1);
}

#[test]
fn test_handle_key_style_toggle_and_description() {
    let mut wizard = wizard();
    wizard.handle_key(key(KeyCode::Enter)); // Location -> Size
    wizard.handle_key(key(KeyCode::Enter)); // Size -> StyleIdea

    // Toggle the first style twice: back to empty
    wizard.handle_key(key(KeyCode::Char(' ')));
    assert_eq!(wizard.selection.styles, vec!["Blackwork".to_string()]);
    wizard.handle_key(key(KeyCode::Char(' ')));
    assert!(wizard.selection.styles.is_empty());

    // Tab into the description box and type
    wizard.handle_key(key(KeyCode::Tab));
    assert_eq!(wizard.style_field, StyleIdeaField::Description);
    for c in "flor".chars() {
        wizard.handle_key(key(KeyCode::Char(c)));
    }
    wizard.handle_key(key(KeyCode::Backspace));
    assert_eq!(wizard.selection.description, "flo");
}

#[test]
fn test_handle_key_escape_from_step_one_cancels() {
    let mut wizard = wizard();
    assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardAction::Cancel);
}

#[test]
fn test_handle_key_escape_goes_back() {
    let mut wizard = wizard();
    wizard.handle_key(key(KeyCode::Enter));
    assert_eq!(wizard.step, WizardStep::Size);

    assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardAction::None);
    assert_eq!(wizard.step, WizardStep::Location);
}

#[test]
fn test_handle_key_review_enter_submits() {
    let mut wizard = wizard();
    wizard.handle_key(key(KeyCode::Enter));
    wizard.handle_key(key(KeyCode::Enter));
    wizard.handle_key(key(KeyCode::Enter));
    assert_eq!(wizard.step, WizardStep::Review);

    assert_eq!(wizard.handle_key(key(KeyCode::Enter)), WizardAction::Submit);
}

#[test]
fn test_keys_ignored_while_submitting() {
    let mut wizard = wizard();
    wizard.handle_key(key(KeyCode::Enter));
    wizard.handle_key(key(KeyCode::Enter));
    wizard.handle_key(key(KeyCode::Enter));
    wizard.status = SubmissionStatus::Submitting;

    assert_eq!(wizard.handle_key(key(KeyCode::Enter)), WizardAction::None);
    assert_eq!(wizard.handle_key(key(KeyCode::Esc)), WizardAction::None);
}

#[test]
fn test_paste_flattens_newlines_into_description() {
    let mut wizard = wizard();
    wizard.handle_key(key(KeyCode::Enter));
    wizard.handle_key(key(KeyCode::Enter));
    wizard.handle_key(key(KeyCode::Tab));
    wizard.handle_paste("rosa\nrealista");
    assert_eq!(wizard.selection.description, "rosa realista");
}

// ── SubmissionCoordinator tests ──

/// Channel that records deliveries and can fail the first N of them.
#[derive(Default)]
struct MockChannel {
    fail_next: AtomicUsize,
    delivered: Mutex<Vec<(String, String)>>,
}

impl MockChannel {
    fn failing(times: usize) -> Self {
        Self {
            fail_next: AtomicUsize::new(times),
            delivered: Mutex::new(Vec::new()),
        }
    }
}

impl QuoteChannel for MockChannel {
    fn deliver(&self, destination: &str, message: &str) -> Result<(), Error> {
        if self.fail_next.load(Ordering::SeqCst) > 0 {
            self.fail_next.fetch_sub(1, Ordering::SeqCst);
            return Err(Error::Channel("simulated failure".to_string()));
        }
        self.delivered
            .lock()
            .unwrap()
            .push((destination.to_string(), message.to_string()));
        Ok(())
    }
}

/// Store that records inserted leads.
#[derive(Default)]
struct MockStore {
    inserted: Mutex<Vec<NewLead>>,
}

#[async_trait::async_trait]
impl LeadStore for MockStore {
    async fn insert_lead(&self, lead: &NewLead) -> Result<(), Error> {
        self.inserted.lock().unwrap().push(lead.clone());
        Ok(())
    }
}

/// Store that always fails.
struct BrokenStore;

#[async_trait::async_trait]
impl LeadStore for BrokenStore {
    async fn insert_lead(&self, _lead: &NewLead) -> Result<(), Error> {
        Err(Error::Persistence("table missing".to_string()))
    }
}

fn wizard_at_review() -> QuoteWizard {
    let mut wizard = wizard();
    wizard.select_location("braco");
    wizard.select_size("pequeno");
    wizard.toggle_style("Blackwork");
    wizard.toggle_style("Fine Line");
    wizard.set_description("flor pequena");
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard.advance().unwrap();
    wizard
}

#[tokio::test]
async fn test_submit_outside_review_is_state_error() {
    let channel = Arc::new(MockChannel::default());
    let coordinator = SubmissionCoordinator::new(channel.clone(), "558193735982");

    let mut wizard = wizard();
    let err = coordinator.submit(&mut wizard).await.unwrap_err();
    assert!(matches!(err, Error::State(1)));
    assert!(channel.delivered.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_delivers_composed_message() {
    let channel = Arc::new(MockChannel::default());
    let coordinator = SubmissionCoordinator::new(channel.clone(), "558193735982");

    let mut wizard = wizard_at_review();
    coordinator.submit(&mut wizard).await.unwrap();

    let delivered = channel.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    let (destination, message) = &delivered[0];
    assert_eq!(destination, "558193735982");
    assert_eq!(message, &message::compose(&wizard.selection, &wizard.catalog));
    assert!(message.contains("Braço"));
    assert!(message.contains("Blackwork, Fine Line"));
    assert!(wizard.notice.is_some());
}

#[tokio::test]
async fn test_submit_failure_keeps_session_for_retry() {
    let channel = Arc::new(MockChannel::failing(1));
    let coordinator = SubmissionCoordinator::new(channel.clone(), "558193735982");

    let mut wizard = wizard_at_review();
    let selection_before = wizard.selection.clone();

    let err = coordinator.submit(&mut wizard).await.unwrap_err();
    assert!(matches!(err, Error::Channel(_)));
    assert_eq!(wizard.status, SubmissionStatus::Failed);
    assert_eq!(wizard.step, WizardStep::Review);
    assert_eq!(wizard.selection, selection_before);
    assert!(wizard.error_message.is_some());

    // Manual retry, no re-entry of any field
    coordinator.submit(&mut wizard).await.unwrap();
    assert_eq!(channel.delivered.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_store_failure_never_blocks_hand_off() {
    let channel = Arc::new(MockChannel::default());
    let coordinator =
        SubmissionCoordinator::new(channel.clone(), "558193735982").with_store(Arc::new(BrokenStore));

    let mut wizard = wizard_at_review();
    coordinator.submit(&mut wizard).await.unwrap();
    assert_eq!(channel.delivered.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_lead_captured_on_submit() {
    let channel = Arc::new(MockChannel::default());
    let store = Arc::new(MockStore::default());
    let coordinator =
        SubmissionCoordinator::new(channel, "558193735982").with_store(store.clone());

    let mut wizard = wizard_at_review();
    coordinator.submit(&mut wizard).await.unwrap();

    // The capture task is fire-and-forget; give it a chance to run
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }

    let inserted = store.inserted.lock().unwrap();
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].body_location.as_deref(), Some("braco"));
    assert_eq!(inserted[0].styles, vec!["Blackwork", "Fine Line"]);
}

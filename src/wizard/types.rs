//! Wizard state types: steps, selection, submission status, key actions.

/// Current step in the quote wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Location,
    Size,
    StyleIdea,
    Review,
}

impl WizardStep {
    /// Step number (1-based)
    pub fn number(&self) -> usize {
        match self {
            Self::Location => 1,
            Self::Size => 2,
            Self::StyleIdea => 3,
            Self::Review => 4,
        }
    }

    /// Total number of steps
    pub fn total() -> usize {
        4
    }

    /// Step title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Location => "Onde será a tatuagem?",
            Self::Size => "Qual o tamanho aproximado?",
            Self::StyleIdea => "Estilo e ideia",
            Self::Review => "Confirme os dados",
        }
    }

    /// Step subtitle
    pub fn subtitle(&self) -> &'static str {
        match self {
            Self::Location => "Escolha o local do corpo",
            Self::Size => "Cada tamanho tem um preço inicial",
            Self::StyleIdea => "Marque os estilos e descreva sua ideia",
            Self::Review => "Tudo certo? Enviamos direto no WhatsApp",
        }
    }
}

/// Accumulated selections for one wizard session.
///
/// Owned exclusively by the wizard; discarded when the session closes.
/// `styles` keeps insertion order — that is the order the message renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub body_location: Option<String>,
    pub size: Option<String>,
    pub styles: Vec<String>,
    pub description: String,
}

impl Selection {
    /// Add the style if absent, remove it if present. Calling twice with the
    /// same label returns the set to its original value.
    pub fn toggle_style(&mut self, label: &str) {
        if let Some(pos) = self.styles.iter().position(|s| s == label) {
            self.styles.remove(pos);
        } else {
            self.styles.push(label.to_string());
        }
    }

    pub fn has_style(&self, label: &str) -> bool {
        self.styles.iter().any(|s| s == label)
    }
}

/// Submission state machine. Terminal success is the session being torn
/// down, not a stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Failed,
}

/// Which area is focused on the styles + idea step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleIdeaField {
    Styles,
    Description,
}

/// What the app should do after handling a wizard key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAction {
    /// Nothing special
    None,
    /// User cancelled the wizard (Esc from step 1)
    Cancel,
    /// Trigger submission from the review step
    Submit,
}

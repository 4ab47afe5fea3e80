//! Application state definitions

use std::time::{Duration, Instant};

use super::form::FormStore;
use super::wizard::{self, WizardState};
use crate::preview::{self, PreviewSection};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3500);

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// The step-by-step intake form
    #[default]
    Wizard,
    /// Terminal confirmation screen after a successful submission
    Submitted,
}

/// Severity of a transient notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Error,
}

/// A transient toast-style notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created.elapsed() >= TOAST_LIFETIME
    }
}

/// One ranked match returned by the activity-code search service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnaeSuggestion {
    pub code: String,
    pub description: String,
}

impl CnaeSuggestion {
    /// Combined label mirrored into the search box on selection
    pub fn label(&self) -> String {
        format!("{} — {}", self.code, self.description)
    }
}

/// Address fields returned by the postal-code lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CepAddress {
    pub rua: String,
    pub bairro: String,
    pub cidade: String,
    pub uf: String,
}

/// Outcome of a postal-code lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CepLookup {
    /// The service flagged the code as unrecognized
    NotFound,
    /// The service resolved the code (the street may still be empty for
    /// codes that are not specific to street level)
    Found(CepAddress),
}

/// Tagged result of the final submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { confirmation_id: String },
    Failure { reason: String },
}

/// Which navigation button is highlighted on the buttons row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavButton {
    Prev,
    #[default]
    Next,
}

/// The whole mutable state of the application
///
/// Owned exclusively by the controller; lookup adapters and the renderer
/// read or write through it, never through copies.
#[derive(Debug)]
pub struct AppState {
    pub view: View,
    pub wizard: WizardState,
    pub form: FormStore,
    /// Index into the active step's focusable fields; one past the end is
    /// the navigation-buttons row.
    pub active_field: usize,
    pub nav_button: NavButton,
    /// Cached validity of the active step, recomputed after every mutation
    pub step_is_valid: bool,
    pub cnae_suggestions: Vec<CnaeSuggestion>,
    pub cnae_selected: usize,
    pub toasts: Vec<Toast>,
    /// True while the submission request is in flight
    pub submitting: bool,
    pub confirmation_id: Option<String>,
    /// Preview sections, rebuilt when the review step becomes active
    pub preview: Vec<PreviewSection>,
}

impl AppState {
    pub fn new() -> Self {
        let form = FormStore::intake();
        let wizard = WizardState::default();
        let step_is_valid = wizard::step_valid(wizard.active_step(), &form);
        Self {
            view: View::Wizard,
            wizard,
            form,
            active_field: 0,
            nav_button: NavButton::default(),
            step_is_valid,
            cnae_suggestions: Vec::new(),
            cnae_selected: 0,
            toasts: Vec::new(),
            submitting: false,
            confirmation_id: None,
            preview: Vec::new(),
        }
    }

    /// Re-run the step validator against the live field values
    pub fn revalidate(&mut self) {
        self.step_is_valid = wizard::step_valid(self.wizard.active_step(), &self.form);
    }

    /// Focusable fields of the active step
    pub fn focusable_fields(&self) -> Vec<&'static str> {
        wizard::focusable_fields(self.wizard.active_step(), &self.form)
    }

    /// Name of the field currently holding focus, if focus is on a field
    /// rather than the buttons row
    pub fn active_field_name(&self) -> Option<&'static str> {
        self.focusable_fields().get(self.active_field).copied()
    }

    /// Whether focus sits on the navigation-buttons row
    pub fn on_buttons_row(&self) -> bool {
        self.active_field >= self.focusable_fields().len()
    }

    /// Label of the advance control for the current position
    pub fn advance_label(&self) -> &'static str {
        if self.submitting {
            "Enviando…"
        } else if self.wizard.is_last() {
            "Confirmar e Enviar ✓"
        } else {
            "Próximo →"
        }
    }

    /// Queue a transient notification
    pub fn push_toast(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.toasts.push(Toast::new(message, kind));
    }

    /// Drop expired toasts; called on every loop tick
    pub fn prune_toasts(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    /// Rebuild the preview projection from the live form state
    pub fn rebuild_preview(&mut self) {
        self.preview = preview::project(&self.form, preview::schema());
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

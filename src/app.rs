//! Application core logic: the wizard controller
//!
//! All state mutation funnels through [`App`]. Key events become commands
//! (navigate, edit the focused field), service tasks report back through an
//! event channel, and the step validator is re-run after every mutation.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::TuiConfig;
use crate::services::{FilePart, HttpServices, ServicesApi, SubmissionPayload};
use crate::state::{
    AppState, CepLookup, CnaeSuggestion, FieldValue, NavButton, SubmissionResult, ToastKind, View,
};

/// Messages sent back to the controller by spawned service tasks
#[derive(Debug)]
pub enum AppEvent {
    /// A postal-code lookup resolved; applied last-wins
    CepResolved(CepLookup),
    /// Activity-code search results for the stamped request generation
    CnaeResults {
        generation: u64,
        items: Vec<CnaeSuggestion>,
    },
    /// The submission request finished
    SubmissionFinished(SubmissionResult),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Clients for the lookup and submission services
    services: Arc<dyn ServicesApi>,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// In-flight debounced activity-code search, aborted on supersession
    search_task: Option<JoinHandle<()>>,
    /// Stamp checked at delivery; stale results are discarded
    search_generation: u64,
    search_debounce: Duration,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &TuiConfig) -> Self {
        let services = HttpServices::new(config.backend_url(), config.cep_url());
        Self::with_services(Arc::new(services), config.search_debounce())
    }

    fn with_services(services: Arc<dyn ServicesApi>, search_debounce: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(),
            services,
            events_tx,
            events_rx,
            search_task: None,
            search_generation: 0,
            search_debounce,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Per-loop housekeeping
    pub fn tick(&mut self) {
        self.state.prune_toasts();
    }

    /// Apply every service event queued since the last loop iteration
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Reset the whole session, as the confirmation screen's only action
    pub fn reset(&mut self) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        self.search_generation += 1;
        self.state = AppState::new();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }
        match self.state.view {
            View::Wizard => self.handle_wizard_key(key),
            View::Submitted => self.handle_submitted_key(key),
        }
        Ok(())
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Enter) {
            self.reset();
        }
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Down => {
                if self.on_search_with_suggestions() {
                    let last = self.state.cnae_suggestions.len() - 1;
                    self.state.cnae_selected = (self.state.cnae_selected + 1).min(last);
                } else {
                    self.focus_next();
                }
            }
            KeyCode::Up => {
                if self.on_search_with_suggestions() {
                    self.state.cnae_selected = self.state.cnae_selected.saturating_sub(1);
                } else {
                    self.focus_prev();
                }
            }
            KeyCode::Left | KeyCode::Right => {
                let delta = if key.code == KeyCode::Left { -1 } else { 1 };
                self.on_horizontal(delta);
            }
            KeyCode::Esc => self.cancel_search(),
            KeyCode::Enter => self.on_enter(),
            KeyCode::Backspace => self.on_backspace(),
            KeyCode::Char(c) => self.on_char(c),
            _ => {}
        }
    }

    /// Navigate forward, or submit when the review step is active.
    ///
    /// Gated on the validator: an invalid step never advances.
    pub fn advance(&mut self) {
        if self.state.submitting || !self.state.step_is_valid {
            return;
        }
        self.blur_active_field();
        if self.state.wizard.is_last() {
            self.begin_submission();
        } else {
            self.state.wizard.advance();
            self.after_transition();
        }
    }

    /// Navigate backward; no-op on the first step
    pub fn retreat(&mut self) {
        if self.state.wizard.is_first() {
            return;
        }
        self.blur_active_field();
        self.state.wizard.retreat();
        self.after_transition();
    }

    fn after_transition(&mut self) {
        self.state.active_field = 0;
        self.state.nav_button = NavButton::Next;
        self.cancel_search();
        self.state.revalidate();
        if self.state.wizard.is_last() {
            self.state.rebuild_preview();
        }
    }

    // ── Focus ────────────────────────────────────────────────────────

    fn focus_next(&mut self) {
        self.blur_active_field();
        let slots = self.state.focusable_fields().len() + 1;
        self.state.active_field = (self.state.active_field + 1) % slots;
    }

    fn focus_prev(&mut self) {
        self.blur_active_field();
        let slots = self.state.focusable_fields().len() + 1;
        self.state.active_field = self.state.active_field.checked_sub(1).unwrap_or(slots - 1);
    }

    /// Commit hooks for the field losing focus
    fn blur_active_field(&mut self) {
        if self.state.active_field_name() == Some("cep") {
            self.maybe_lookup_cep();
        }
    }

    fn on_search_with_suggestions(&self) -> bool {
        self.state.active_field_name() == Some("cnae_search")
            && !self.state.cnae_suggestions.is_empty()
    }

    // ── Field editing ────────────────────────────────────────────────

    fn on_char(&mut self, c: char) {
        let Some(name) = self.state.active_field_name() else {
            return;
        };
        if let Some(field) = self.state.form.get_mut(name) {
            field.push_char(c);
            self.after_field_mutation(name);
        }
    }

    fn on_backspace(&mut self) {
        let Some(name) = self.state.active_field_name() else {
            return;
        };
        if let Some(field) = self.state.form.get_mut(name) {
            field.pop_char();
            self.after_field_mutation(name);
        }
    }

    fn on_horizontal(&mut self, delta: isize) {
        if self.state.on_buttons_row() {
            self.state.nav_button = if delta < 0 {
                NavButton::Prev
            } else {
                NavButton::Next
            };
            return;
        }
        let Some(name) = self.state.active_field_name() else {
            return;
        };
        if let Some(field) = self.state.form.get_mut(name) {
            if matches!(field.value, FieldValue::Select(_)) {
                field.cycle_option(delta);
                self.after_field_mutation(name);
            }
        }
    }

    fn on_enter(&mut self) {
        if self.state.on_buttons_row() {
            match self.state.nav_button {
                NavButton::Prev => self.retreat(),
                NavButton::Next => self.advance(),
            }
            return;
        }
        match self.state.active_field_name() {
            Some("cnae_search") if !self.state.cnae_suggestions.is_empty() => {
                self.select_suggestion(self.state.cnae_selected);
            }
            Some(name) => {
                let is_files = self
                    .state
                    .form
                    .get(name)
                    .is_some_and(|f| matches!(f.value, FieldValue::Files { .. }));
                if is_files {
                    if let Some(field) = self.state.form.get_mut(name) {
                        field.attach_input();
                    }
                    self.after_field_mutation(name);
                } else {
                    // Commit key: moving focus fires the blur hooks.
                    self.focus_next();
                }
            }
            None => {}
        }
    }

    /// Post-mutation hooks shared by every edit path
    fn after_field_mutation(&mut self, name: &str) {
        match name {
            "cnae_search" => self.restart_search(),
            "cnae_definir" => {
                if self.state.form.toggle_on("cnae_definir") {
                    // Switching to manual discards any selected code.
                    self.state.form.set_text("cnae_codigo", "");
                    self.state.form.set_text("cnae_descricao", "");
                    self.state.form.set_text("cnae_search", "");
                    self.cancel_search();
                }
            }
            _ => {}
        }
        self.sync_dynamic_required();
        self.clamp_focus();
        self.state.revalidate();
    }

    /// Required flags that follow other selections
    fn sync_dynamic_required(&mut self) {
        let manual = self.state.form.toggle_on("cnae_definir");
        self.state.form.set_required("ramo_descricao", manual);
        let deferred = self.state.form.stored("tipo_integralizacao") == "prazo";
        self.state.form.set_required("data_limite", deferred);
    }

    /// Conditional fields may disappear under the cursor; land on the
    /// buttons row instead of past it.
    fn clamp_focus(&mut self) {
        let slots = self.state.focusable_fields().len();
        if self.state.active_field > slots {
            self.state.active_field = slots;
        }
    }

    // ── Lookup adapters ──────────────────────────────────────────────

    /// Fire the postal-code lookup when the field holds exactly 8 digits
    fn maybe_lookup_cep(&mut self) {
        let digits: String = self
            .state
            .form
            .stored("cep")
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.len() != 8 {
            return;
        }
        let services = Arc::clone(&self.services);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match services.lookup_cep(&digits).await {
                Ok(lookup) => {
                    let _ = tx.send(AppEvent::CepResolved(lookup));
                }
                // Transport failures stay silent; the form keeps working.
                Err(err) => tracing::warn!("postal-code lookup failed: {err}"),
            }
        });
    }

    /// Restart the debounced activity-code search for the current query
    fn restart_search(&mut self) {
        self.cancel_search();
        let query = self.state.form.stored("cnae_search").trim().to_string();
        if query.chars().count() < 2 {
            return;
        }
        let generation = self.search_generation;
        let services = Arc::clone(&self.services);
        let tx = self.events_tx.clone();
        let debounce = self.search_debounce;
        self.search_task = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            match services.search_cnae(&query).await {
                Ok(items) => {
                    let _ = tx.send(AppEvent::CnaeResults { generation, items });
                }
                Err(err) => tracing::warn!("activity-code search failed: {err}"),
            }
        }));
    }

    /// Abort any in-flight search and invalidate its generation, so a
    /// response racing the abort is still discarded on delivery.
    fn cancel_search(&mut self) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
        self.search_generation += 1;
        self.state.cnae_suggestions.clear();
        self.state.cnae_selected = 0;
    }

    fn select_suggestion(&mut self, index: usize) {
        let Some(suggestion) = self.state.cnae_suggestions.get(index).cloned() else {
            return;
        };
        self.state.form.set_text("cnae_codigo", &suggestion.code);
        self.state
            .form
            .set_text("cnae_descricao", &suggestion.description);
        self.state.form.set_text("cnae_search", suggestion.label());
        self.cancel_search();
        self.state.revalidate();
    }

    // ── Submission ───────────────────────────────────────────────────

    fn begin_submission(&mut self) {
        if self.state.submitting {
            return;
        }
        self.state.submitting = true;
        let (texts, files) = self.state.form.payload_parts();
        let payload = SubmissionPayload {
            texts,
            files: files
                .into_iter()
                .map(|(field, attachment)| FilePart {
                    field,
                    file_name: attachment.name,
                    path: attachment.path,
                })
                .collect(),
        };
        let services = Arc::clone(&self.services);
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match services.submit(payload).await {
                Ok(id) => SubmissionResult::Success {
                    confirmation_id: id,
                },
                Err(err) => SubmissionResult::Failure {
                    reason: err.to_string(),
                },
            };
            let _ = tx.send(AppEvent::SubmissionFinished(result));
        });
    }

    // ── Event application ────────────────────────────────────────────

    /// Apply one service event to the owned state
    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CepResolved(CepLookup::NotFound) => {
                self.state.push_toast("CEP não encontrado.", ToastKind::Error);
            }
            AppEvent::CepResolved(CepLookup::Found(address)) => {
                if address.rua.trim().is_empty() {
                    // Code not specific to street level; ask for a better one.
                    self.state.form.set_text("cep", "");
                    self.state.push_toast(
                        "Este CEP é genérico. Use o CEP específico da rua.",
                        ToastKind::Error,
                    );
                } else {
                    self.state.form.set_text("rua", address.rua);
                    self.state.form.set_text("bairro", address.bairro);
                    self.state.form.set_text("cidade", address.cidade);
                    self.state.form.set_text("uf", address.uf);
                }
                self.state.revalidate();
            }
            AppEvent::CnaeResults { generation, items } => {
                if generation == self.search_generation {
                    self.state.cnae_suggestions = items;
                    self.state.cnae_selected = 0;
                }
            }
            AppEvent::SubmissionFinished(SubmissionResult::Success { confirmation_id }) => {
                self.state.submitting = false;
                self.state.confirmation_id = Some(confirmation_id);
                self.state.view = View::Submitted;
            }
            AppEvent::SubmissionFinished(SubmissionResult::Failure { reason }) => {
                tracing::warn!("submission failed: {reason}");
                self.state.submitting = false;
                self.state.push_toast(
                    "Erro ao enviar formulário. Tente novamente.",
                    ToastKind::Error,
                );
            }
        }
    }
}

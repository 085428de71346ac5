//! Application state and core logic

use crate::api::{Collective, ConversationApi, ConversationRecord, MutationError};
use crate::state::{
    AppState, ComposeForm, Connection, Field, Form, FormOptions, SubmissionController,
    SubmitOutcome, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

type MutationResult = std::result::Result<ConversationRecord, MutationError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Conversations service client
    api: Arc<dyn ConversationApi>,
    /// Submission engine of the current form session
    pub form: SubmissionController,
    /// Input buffers and focus of the compose view
    pub compose: ComposeForm,
    /// Tags suggested by the local configuration
    configured_tags: Vec<String>,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    mutation_tx: UnboundedSender<MutationResult>,
    mutation_rx: UnboundedReceiver<MutationResult>,
    created_tx: UnboundedSender<ConversationRecord>,
    created_rx: UnboundedReceiver<ConversationRecord>,
    collective_tx: UnboundedSender<Result<Collective>>,
    collective_rx: UnboundedReceiver<Result<Collective>>,
}

impl App {
    /// Create a new App instance for `collective_id`
    pub fn new(
        api: Arc<dyn ConversationApi>,
        collective_id: &str,
        configured_tags: Vec<String>,
    ) -> Self {
        let (mutation_tx, mutation_rx) = unbounded_channel();
        let (created_tx, created_rx) = unbounded_channel();
        let (collective_tx, collective_rx) = unbounded_channel();

        let options = FormOptions {
            suggested_tags: configured_tags.clone(),
            ..FormOptions::new(collective_id)
        };
        let form = new_session(options, created_tx.clone());

        Self {
            state: AppState::default(),
            api,
            form,
            compose: ComposeForm::new(),
            configured_tags,
            quit: false,
            status_message: None,
            mutation_tx,
            mutation_rx,
            created_tx,
            created_rx,
            collective_tx,
            collective_rx,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Fetch the collective in the background. The form is loading until it resolves.
    pub fn load_collective(&mut self) {
        self.form.set_loading(true);

        let api = Arc::clone(&self.api);
        let collective_id = self.form.options().collective_id.clone();
        let results = self.collective_tx.clone();
        tokio::spawn(async move {
            let result = api.fetch_collective(&collective_id).await;
            if results.send(result).is_err() {
                tracing::debug!("App closed before collective {collective_id} was loaded");
            }
        });
    }

    /// Apply results of background work: collective lookups and mutations
    pub fn poll_background(&mut self) {
        while let Ok(result) = self.collective_rx.try_recv() {
            self.on_collective_loaded(result);
        }

        while let Ok(result) = self.mutation_rx.try_recv() {
            self.form.complete(result);
        }

        while let Ok(record) = self.created_rx.try_recv() {
            self.on_conversation_created(record);
        }
    }

    fn on_collective_loaded(&mut self, result: Result<Collective>) {
        self.form.set_loading(false);

        match result {
            Ok(collective) => {
                tracing::info!("Loaded collective {} ({})", collective.name, collective.id);
                let mut tags = collective.suggested_tags.clone();
                for tag in &self.configured_tags {
                    if !tags.contains(tag) {
                        tags.push(tag.clone());
                    }
                }
                self.form.set_suggested_tags(tags);
                self.form.set_disabled(false);
                self.state.connection = Connection::Connected;
                self.state.collective = Some(collective);
            }
            Err(err) => {
                tracing::warn!("Failed to load collective: {err:#}");
                self.form.set_disabled(true);
                self.state.connection = Connection::Unreachable;
                self.push_error(format!("{err:#}\n\nPress Ctrl+R to retry."));
            }
        }
    }

    /// Success handler target: show the created conversation and start a fresh session
    fn on_conversation_created(&mut self, record: ConversationRecord) {
        self.status_message = Some(format!("Conversation \"{}\" created!", record.title));
        self.state.last_created = Some(record);
        self.reset_form();
        self.state.current_view = View::ConversationCreated;
    }

    fn reset_form(&mut self) {
        self.form = new_session(self.form.options().clone(), self.created_tx.clone());
        self.compose = ComposeForm::new();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::CreateConversation => self.handle_create_key(key),
            View::ConversationCreated => self.handle_created_key(key)?,
        }

        Ok(())
    }

    /// Handle keys in the compose view
    fn handle_create_key(&mut self, key: KeyEvent) {
        let on_submit_row = self.compose.is_submit_row_active();
        let editable = !self.form.options().loading;

        match key.code {
            KeyCode::Tab => self.compose.next_field(),
            KeyCode::BackTab => self.compose.prev_field(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => self.submit(),
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.load_collective()
            }
            // Alt+1..9 picks a suggested tag
            KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
                if let Some(index) = c.to_digit(10).filter(|d| *d > 0) {
                    self.add_suggested_tag(index as usize - 1);
                }
            }
            KeyCode::Esc => self.quit = true,
            KeyCode::Enter if on_submit_row => self.submit(),
            KeyCode::Enter if self.compose.active_form_field() == Some(Field::Body) && editable => {
                if let Some(change) = self.compose.input_char('\n') {
                    self.form.change(change);
                }
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c)
                if editable
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                if let Some(change) = self.compose.input_char(c) {
                    self.form.change(change);
                }
            }
            KeyCode::Backspace if editable => {
                if let Some(change) = self.compose.backspace() {
                    self.form.change(change);
                }
            }
            _ => {}
        }
    }

    /// Handle keys in the created conversation view
    fn handle_created_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('n') | KeyCode::Enter => {
                self.state.current_view = View::CreateConversation;
            }
            KeyCode::Char('y') => {
                if let Some(slug) = self.state.last_created.as_ref().map(|r| r.slug.clone()) {
                    match copy_to_clipboard(&slug) {
                        Ok(()) => self.status_message = Some(format!("Copied {slug}")),
                        Err(err) => self.push_error(format!("Failed to copy: {err}")),
                    }
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    fn add_suggested_tag(&mut self, index: usize) {
        if self.form.options().loading {
            return;
        }
        let Some(tag) = self.form.options().suggested_tags.get(index).cloned() else {
            return;
        };
        if let Some(change) = self.compose.add_tag(&tag) {
            self.form.change(change);
        }
    }

    /// Submit the form; a validated submit runs the mutation on a background task
    fn submit(&mut self) {
        match self.form.begin_submit() {
            SubmitOutcome::Ready(request) => {
                let api = Arc::clone(&self.api);
                let results = self.mutation_tx.clone();
                tokio::spawn(async move {
                    let result = api.create_conversation(request).await;
                    if results.send(result).is_err() {
                        tracing::debug!("App closed before the mutation resolved");
                    }
                });
            }
            SubmitOutcome::Invalid(errors) => {
                if let Some(field) = errors.keys().next() {
                    self.compose.focus(*field);
                }
            }
            SubmitOutcome::Blocked => {
                self.status_message = Some("The form cannot be submitted right now".to_string());
            }
            SubmitOutcome::AlreadySubmitting => {}
        }
    }
}

/// Start a form session whose success handler reports back to the app
fn new_session(
    options: FormOptions,
    created: UnboundedSender<ConversationRecord>,
) -> SubmissionController {
    SubmissionController::new(options, move |record| {
        if created.send(record).is_err() {
            tracing::debug!("App closed before the created conversation was shown");
        }
    })
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}

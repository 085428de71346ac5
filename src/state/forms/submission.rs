//! Validate-then-submit-once controller for the conversation form
//!
//! A submit request always runs a full validation pass first. Only when the
//! pass yields no error is the state marked as submitting and a single
//! mutation request handed out. Until that request is resolved with
//! [`SubmissionController::complete`], further submit requests are ignored.

use super::conversation_form::{reduce, ConversationFormState, FieldChange, FormAction};
use super::validation::{validate, FieldErrors};
use crate::api::{ConversationApi, ConversationRecord, CreateConversationRequest, MutationError};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Caller-supplied options of a form session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Collective the new conversation is created under
    pub collective_id: String,
    /// Suppresses submission regardless of validity
    pub disabled: bool,
    /// Upstream data is not ready yet. Inputs render as placeholders and submission is blocked.
    pub loading: bool,
    /// Passed through to the tag input, never validated
    pub suggested_tags: Vec<String>,
}

impl FormOptions {
    pub fn new(collective_id: impl Into<String>) -> Self {
        Self {
            collective_id: collective_id.into(),
            ..Default::default()
        }
    }
}

/// Called with the created record once the mutation succeeds
pub type SuccessHandler = Box<dyn FnMut(ConversationRecord) + Send>;

/// What happened to a submit request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form is disabled or loading; nothing was validated
    Blocked,
    /// A mutation is already in flight; the request was ignored
    AlreadySubmitting,
    /// Validation failed; no mutation was issued
    Invalid(FieldErrors),
    /// Validation passed; the caller must run this mutation and report back
    Ready(CreateConversationRequest),
}

/// Owns one form session: field values, errors, submitting flag and the last mutation failure
pub struct SubmissionController {
    session_id: Uuid,
    options: FormOptions,
    state: ConversationFormState,
    submit_error: Option<MutationError>,
    on_success: SuccessHandler,
}

impl SubmissionController {
    /// Start a fresh session: empty fields, no errors, not submitting
    pub fn new(
        options: FormOptions,
        on_success: impl FnMut(ConversationRecord) + Send + 'static,
    ) -> Self {
        let session_id = Uuid::new_v4();
        debug!(
            %session_id,
            collective_id = %options.collective_id,
            "Conversation form session started"
        );

        Self {
            session_id,
            options,
            state: ConversationFormState::default(),
            submit_error: None,
            on_success: Box::new(on_success),
        }
    }

    pub fn state(&self) -> &ConversationFormState {
        &self.state
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.options.disabled = disabled;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.options.loading = loading;
    }

    pub fn set_suggested_tags(&mut self, tags: Vec<String>) {
        self.options.suggested_tags = tags;
    }

    /// Failure of the last mutation, kept until the next attempt resolves
    pub fn submit_error(&self) -> Option<&MutationError> {
        self.submit_error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    /// Whether the caller-level prerequisites allow submitting at all
    pub fn can_submit(&self) -> bool {
        !self.options.disabled && !self.options.loading
    }

    /// Apply a user edit
    pub fn change(&mut self, change: FieldChange) {
        self.dispatch(FormAction::Change(change));
    }

    fn dispatch(&mut self, action: FormAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Handle a submit request.
    ///
    /// On [`SubmitOutcome::Ready`] the state is submitting and the caller owns the
    /// returned request: it must issue it once and pass the result to [`Self::complete`].
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            debug!(session_id = %self.session_id, "Submit blocked: form disabled or loading");
            return SubmitOutcome::Blocked;
        }

        if self.state.submitting {
            debug!(session_id = %self.session_id, "Submit ignored: mutation already in flight");
            return SubmitOutcome::AlreadySubmitting;
        }

        let errors = validate(&self.state);
        self.dispatch(FormAction::ReplaceErrors(errors.clone()));

        if !errors.is_empty() {
            let fields: Vec<String> = errors.keys().map(ToString::to_string).collect();
            info!(session_id = %self.session_id, ?fields, "Conversation form failed validation");
            return SubmitOutcome::Invalid(errors);
        }

        self.dispatch(FormAction::SetSubmitting(true));

        let request = CreateConversationRequest {
            collective_id: self.options.collective_id.clone(),
            title: self.state.title.clone(),
            html: self.state.body.clone(),
            tags: self.state.tags.clone(),
        };
        info!(
            session_id = %self.session_id,
            collective_id = %request.collective_id,
            "Creating conversation"
        );

        SubmitOutcome::Ready(request)
    }

    /// Resolve the in-flight mutation. Field values and validation errors are left as they are.
    pub fn complete(&mut self, result: Result<ConversationRecord, MutationError>) {
        if !self.state.submitting {
            warn!(
                session_id = %self.session_id,
                "Mutation result received with no submission in flight"
            );
            return;
        }

        self.dispatch(FormAction::SetSubmitting(false));

        match result {
            Ok(record) => {
                info!(
                    session_id = %self.session_id,
                    conversation_id = %record.id,
                    "Conversation created"
                );
                self.submit_error = None;
                (self.on_success)(record);
            }
            Err(err) => {
                warn!(session_id = %self.session_id, error = %err, "Failed to create conversation");
                self.submit_error = Some(err);
            }
        }
    }

    /// Validate and, if valid, run the mutation through `api` to completion
    #[allow(dead_code)]
    pub async fn submit<A>(&mut self, api: &A) -> SubmitOutcome
    where
        A: ConversationApi + ?Sized,
    {
        let outcome = self.begin_submit();
        if let SubmitOutcome::Ready(request) = &outcome {
            let result = api.create_conversation(request.clone()).await;
            self.complete(result);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockConversationApi;
    use crate::state::forms::validation::{ErrorKind, Field};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn created_record() -> ConversationRecord {
        ConversationRecord {
            id: "conv-1".to_string(),
            slug: "hello-world".to_string(),
            title: "Hello world".to_string(),
            summary: "content".to_string(),
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
        }
    }

    /// Controller whose success handler records every record it receives
    fn controller() -> (SubmissionController, Arc<Mutex<Vec<ConversationRecord>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        let controller =
            SubmissionController::new(FormOptions::new("collective-42"), move |record| {
                sink.lock().unwrap().push(record);
            });
        (controller, received)
    }

    fn fill(controller: &mut SubmissionController, title: &str, body: &str) {
        controller.change(FieldChange::Title(title.to_string()));
        controller.change(FieldChange::Body(body.to_string()));
    }

    mod begin_submit {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_invalid_input_surfaces_errors_without_request() {
            let (mut controller, _) = controller();
            fill(&mut controller, "Hi", "<p>content</p>");

            let outcome = controller.begin_submit();

            let expected: FieldErrors = [(Field::Title, ErrorKind::MinLength)].into_iter().collect();
            assert_eq!(outcome, SubmitOutcome::Invalid(expected.clone()));
            assert_eq!(controller.state().errors, expected);
            assert!(!controller.is_submitting());
        }

        #[test]
        fn test_resubmitting_unchanged_invalid_input_revalidates() {
            let (mut controller, _) = controller();
            fill(&mut controller, "", "<p>content</p>");

            let first = controller.begin_submit();
            let second = controller.begin_submit();

            assert_eq!(first, second);
            assert!(matches!(second, SubmitOutcome::Invalid(_)));
        }

        #[test]
        fn test_errors_clear_once_input_is_fixed() {
            let (mut controller, _) = controller();
            fill(&mut controller, "Hi", "");
            controller.begin_submit();
            assert_eq!(controller.state().errors.len(), 2);

            fill(&mut controller, "Hello world", "<p>content</p>");
            let outcome = controller.begin_submit();

            assert!(matches!(outcome, SubmitOutcome::Ready(_)));
            assert!(controller.state().errors.is_empty());
        }

        #[test]
        fn test_valid_input_marks_submitting_and_builds_request() {
            let (mut controller, _) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");
            controller.change(FieldChange::Tags(vec![]));

            let outcome = controller.begin_submit();

            assert_eq!(
                outcome,
                SubmitOutcome::Ready(CreateConversationRequest {
                    collective_id: "collective-42".to_string(),
                    title: "Hello world".to_string(),
                    html: "<p>content</p>".to_string(),
                    tags: None,
                })
            );
            assert!(controller.is_submitting());
        }

        #[test]
        fn test_second_submit_while_in_flight_is_ignored() {
            let (mut controller, _) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");

            assert!(matches!(controller.begin_submit(), SubmitOutcome::Ready(_)));
            assert_eq!(controller.begin_submit(), SubmitOutcome::AlreadySubmitting);
            assert!(controller.is_submitting());
        }

        #[test]
        fn test_disabled_blocks_without_validating() {
            let (mut controller, _) = controller();
            controller.set_disabled(true);

            assert_eq!(controller.begin_submit(), SubmitOutcome::Blocked);
            assert!(controller.state().errors.is_empty());
            assert!(!controller.is_submitting());
        }

        #[test]
        fn test_loading_blocks_even_valid_input() {
            let (mut controller, _) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");
            controller.set_loading(true);

            assert_eq!(controller.begin_submit(), SubmitOutcome::Blocked);

            controller.set_loading(false);
            assert!(matches!(controller.begin_submit(), SubmitOutcome::Ready(_)));
        }

        #[test]
        fn test_edits_in_flight_do_not_change_issued_request() {
            let (mut controller, _) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");

            let SubmitOutcome::Ready(request) = controller.begin_submit() else {
                panic!("expected a request");
            };
            controller.change(FieldChange::Title("Changed".to_string()));

            assert_eq!(request.title, "Hello world");
            assert!(controller.is_submitting());
        }
    }

    mod complete {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_success_clears_submitting_and_calls_handler() {
            let (mut controller, received) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");
            controller.begin_submit();

            controller.complete(Ok(created_record()));

            assert!(!controller.is_submitting());
            assert_eq!(*received.lock().unwrap(), vec![created_record()]);
            assert!(controller.submit_error().is_none());
        }

        #[test]
        fn test_failure_keeps_values_and_errors() {
            let (mut controller, received) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");
            controller.change(FieldChange::Tags(vec!["design".to_string()]));
            controller.begin_submit();
            let before = controller.state().clone();

            controller.complete(Err(MutationError::Unavailable("refused".to_string())));

            assert!(!controller.is_submitting());
            assert_eq!(controller.state().title, before.title);
            assert_eq!(controller.state().body, before.body);
            assert_eq!(controller.state().tags, before.tags);
            assert_eq!(controller.state().errors, before.errors);
            assert_eq!(
                controller.submit_error(),
                Some(&MutationError::Unavailable("refused".to_string()))
            );
            assert!(received.lock().unwrap().is_empty());
        }

        #[test]
        fn test_failure_allows_retry() {
            let (mut controller, received) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");
            controller.begin_submit();
            controller.complete(Err(MutationError::Unavailable(String::new())));

            assert!(matches!(controller.begin_submit(), SubmitOutcome::Ready(_)));
            // Previous failure stays visible until the new attempt resolves
            assert!(controller.submit_error().is_some());

            controller.complete(Ok(created_record()));
            assert!(controller.submit_error().is_none());
            assert_eq!(received.lock().unwrap().len(), 1);
        }

        #[test]
        fn test_invalid_submit_keeps_previous_mutation_error() {
            let (mut controller, _) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");
            controller.begin_submit();
            controller.complete(Err(MutationError::InvalidResponse("x".to_string())));

            controller.change(FieldChange::Title(String::new()));
            controller.begin_submit();

            assert!(controller.submit_error().is_some());
        }

        #[test]
        fn test_result_without_submission_is_ignored() {
            let (mut controller, received) = controller();
            controller.complete(Ok(created_record()));
            assert!(received.lock().unwrap().is_empty());
            assert!(!controller.is_submitting());
        }
    }

    mod submit_with_api {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_input_never_calls_api() {
            let mut api = MockConversationApi::new();
            api.expect_create_conversation().times(0);

            let (mut controller, _) = controller();
            fill(&mut controller, "", "<p>content</p>");

            let outcome = controller.submit(&api).await;

            assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        }

        #[tokio::test]
        async fn test_valid_input_calls_api_once_with_field_values() {
            let mut api = MockConversationApi::new();
            api.expect_create_conversation()
                .withf(|request| {
                    request
                        == &CreateConversationRequest {
                            collective_id: "collective-42".to_string(),
                            title: "Hello world".to_string(),
                            html: "<p>content</p>".to_string(),
                            tags: Some(vec!["design".to_string(), "budget".to_string()]),
                        }
                })
                .times(1)
                .returning(|_| Ok(created_record()));

            let (mut controller, received) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");
            controller.change(FieldChange::Tags(vec![
                "design".to_string(),
                "budget".to_string(),
            ]));

            controller.submit(&api).await;

            assert!(!controller.is_submitting());
            assert_eq!(*received.lock().unwrap(), vec![created_record()]);
        }

        #[tokio::test]
        async fn test_empty_tags_are_sent_as_absent() {
            let mut api = MockConversationApi::new();
            api.expect_create_conversation()
                .withf(|request| request.tags.is_none())
                .times(1)
                .returning(|_| Ok(created_record()));

            let (mut controller, _) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");
            controller.change(FieldChange::Tags(vec![]));

            let outcome = controller.submit(&api).await;

            assert!(controller.state().errors.is_empty());
            assert!(matches!(outcome, SubmitOutcome::Ready(_)));
        }

        #[tokio::test]
        async fn test_api_failure_is_surfaced() {
            let mut api = MockConversationApi::new();
            api.expect_create_conversation().times(1).returning(|_| {
                Err(MutationError::Rejected {
                    code: Some("PermissionDenied".to_string()),
                    message: "You must be logged in".to_string(),
                })
            });

            let (mut controller, received) = controller();
            fill(&mut controller, "Hello world", "<p>content</p>");

            controller.submit(&api).await;

            assert!(!controller.is_submitting());
            assert_eq!(
                controller.submit_error().map(MutationError::user_message),
                Some("You must be logged in".to_string())
            );
            assert!(received.lock().unwrap().is_empty());
            assert_eq!(controller.state().title, "Hello world");
        }

        #[test]
        fn test_submit_with_block_on() {
            let mut api = MockConversationApi::new();
            api.expect_create_conversation()
                .times(1)
                .returning(|_| Ok(created_record()));

            let (mut controller, received) = controller();
            fill(&mut controller, "Hey", "b");

            tokio_test::block_on(controller.submit(&api));

            assert_eq!(received.lock().unwrap().len(), 1);
        }
    }
}

//! Form domain layer
//!
//! - `field`: editable text inputs
//! - `form_state`: input buffers and focus of the compose view
//! - `conversation_form`: form state record and its transition function
//! - `validation`: the validation pass
//! - `submission`: validate-then-submit-once controller

mod conversation_form;
mod field;
mod form_state;
mod submission;
mod validation;

pub use field::FormField;
pub use form_state::{ComposeForm, Form};
pub use submission::{FormOptions, SubmissionController, SubmitOutcome};
pub use validation::{ErrorKind, Field};

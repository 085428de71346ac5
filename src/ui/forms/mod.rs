//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `conversation_form`: Conversation create form

mod conversation_form;
mod field_renderer;

pub use conversation_form::draw_create;

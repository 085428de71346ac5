//! Reusable UI components

mod button;
mod dialog;
mod message_box;

pub use button::{render_button, BUTTON_HEIGHT};
pub use dialog::render_error_dialog;
pub use message_box::{message_box_height, render_message_box};

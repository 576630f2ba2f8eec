/// Handler modules for Discord interactions
mod birthday;
mod interaction;

// Re-export main handler functions
pub use interaction::{handle_interaction, handle_modal_submit};

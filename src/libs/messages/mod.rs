//! User-facing messages.
//!
//! Every piece of text printed by the application is a [`Message`] variant,
//! rendered through its `Display` impl and printed with the `msg_*!` macros.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;

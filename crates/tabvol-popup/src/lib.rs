//! Popup-side messaging: typed command wrappers over the runtime bus,
//! plus the inbound listener that refreshes the tab list when the
//! background reports an audio status change.

pub mod commands;
pub mod listener;

pub use commands::PopupCommands;
pub use listener::{spawn_refresh_listener, PopupController};

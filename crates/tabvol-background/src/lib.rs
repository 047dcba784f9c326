//! Background-side notification dispatch.
//!
//! The background page observes tab audio state and tells the popup (when
//! one is open) about it. All of that traffic is fire-and-forget: a closed
//! popup is normal, not an error.

pub mod notifier;

pub use notifier::AudioNotifier;

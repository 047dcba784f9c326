use crate::messages::TabId;

/// Failures surfaced by a [`crate::Transport`] send.
///
/// `NoReceiver` is an expected condition on the notification path (the
/// popup is simply closed) and is swallowed there. On the command path
/// every variant propagates to the caller.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("no receiver for message")]
    NoReceiver,

    #[error("no execution context for tab {0}")]
    NoTabContext(TabId),

    #[error("receiver error: {0}")]
    Receiver(String),
}

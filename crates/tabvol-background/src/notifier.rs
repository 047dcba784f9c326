use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use tabvol_common::{Message, TabId, Transport};

/// Delay window for coalescing bursts of list-update notifications.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Broadcasts tab audio state changes to whoever is listening on the bus.
///
/// Every notification is fire-and-forget: the popup being closed (no
/// receiver) is an expected condition and is never surfaced or logged.
/// `tab_list_updated` is debounced because tab churn arrives in bursts;
/// only the last call of a burst produces a send.
///
/// Methods must be called from within a tokio runtime.
pub struct AudioNotifier {
    transport: Arc<dyn Transport>,
    debounce: Duration,
    // At most one pending list-update timer; cancelled before each re-arm.
    pending_list_update: Mutex<Option<JoinHandle<()>>>,
}

impl AudioNotifier {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_debounce(transport, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(transport: Arc<dyn Transport>, debounce: Duration) -> Self {
        Self {
            transport,
            debounce,
            pending_list_update: Mutex::new(None),
        }
    }

    /// A tab began playing audio.
    pub fn tab_audio_started(&self, tab_id: TabId) {
        self.send_quiet(Message::TabAudioStarted { tab_id });
    }

    /// A tab stopped playing audio.
    pub fn tab_audio_stopped(&self, tab_id: TabId) {
        self.send_quiet(Message::TabAudioStopped { tab_id });
    }

    /// The set of audible tabs changed. Debounced: calls arriving within
    /// the delay window restart it, and one notification goes out once the
    /// burst has been quiet for the full window.
    pub fn tab_list_updated(&self) {
        let transport = Arc::clone(&self.transport);
        let delay = self.debounce;

        if let Ok(mut pending) = self.pending_list_update.lock() {
            if let Some(timer) = pending.take() {
                timer.abort();
            }
            *pending = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                let _ = transport.send_to_bus(Message::TabAudioListUpdated).await;
            }));
        }
    }

    /// A tab's document title changed.
    pub fn tab_title_changed(&self, tab_id: TabId, title: impl Into<String>) {
        self.send_quiet(Message::TabTitleChanged {
            tab_id,
            title: title.into(),
        });
    }

    /// Focus moved to a different tab.
    pub fn active_tab_changed(&self, tab_id: TabId) {
        self.send_quiet(Message::ActiveTabChanged { tab_id });
    }

    /// Send and discard both outcomes. No receiver means the popup is
    /// closed; that is the normal case, not a failure.
    fn send_quiet(&self, msg: Message) {
        tracing::trace!(?msg, "notify");
        let transport = Arc::clone(&self.transport);
        tokio::spawn(async move {
            let _ = transport.send_to_bus(msg).await;
        });
    }
}

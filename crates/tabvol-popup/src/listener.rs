use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use tabvol_common::Message;

/// The popup controller as the listener sees it: something that can
/// reload the audible-tab list.
#[async_trait]
pub trait PopupController: Send + Sync {
    async fn load_audio_tabs(&self);
}

/// Subscribe the popup to bus messages and refresh the tab list on every
/// `audioStatusChanged`. All other actions are ignored.
///
/// Returns the listener task's handle. The popup never tears this down
/// itself (the subscription lives as long as the popup does), but a caller
/// that wants a bounded lifetime can abort the handle.
pub fn spawn_refresh_listener(
    mut messages: broadcast::Receiver<Message>,
    controller: Arc<dyn PopupController>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match messages.recv().await {
                Ok(Message::AudioStatusChanged) => {
                    tracing::debug!("audio status changed, refreshing tab list");
                    controller.load_audio_tabs().await;
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "refresh listener lagged, catching up");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use tabvol_common::TabId;
    use tokio::task::yield_now;

    #[derive(Default)]
    struct CountingController {
        refreshes: AtomicUsize,
    }

    impl CountingController {
        fn refreshes(&self) -> usize {
            self.refreshes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PopupController for CountingController {
        async fn load_audio_tabs(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    async fn drain() {
        // Let the listener task observe everything queued so far.
        for _ in 0..8 {
            yield_now().await;
        }
    }

    #[tokio::test]
    async fn audio_status_changed_triggers_one_refresh() {
        let (tx, rx) = broadcast::channel(16);
        let controller = Arc::new(CountingController::default());
        let handle = spawn_refresh_listener(rx, controller.clone());

        tx.send(Message::AudioStatusChanged).unwrap();
        drain().await;

        assert_eq!(controller.refreshes(), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn other_actions_are_ignored() {
        let (tx, rx) = broadcast::channel(16);
        let controller = Arc::new(CountingController::default());
        let handle = spawn_refresh_listener(rx, controller.clone());

        tx.send(Message::TabAudioStarted { tab_id: TabId(1) }).unwrap();
        tx.send(Message::TabAudioListUpdated).unwrap();
        tx.send(Message::Unknown).unwrap();
        drain().await;

        assert_eq!(controller.refreshes(), 0);
        handle.abort();
    }

    #[tokio::test]
    async fn each_status_change_refreshes_again() {
        let (tx, rx) = broadcast::channel(16);
        let controller = Arc::new(CountingController::default());
        let handle = spawn_refresh_listener(rx, controller.clone());

        tx.send(Message::AudioStatusChanged).unwrap();
        tx.send(Message::TabAudioListUpdated).unwrap();
        tx.send(Message::AudioStatusChanged).unwrap();
        drain().await;

        assert_eq!(controller.refreshes(), 2);
        handle.abort();
    }

    #[tokio::test]
    async fn listener_exits_when_bus_closes() {
        let (tx, rx) = broadcast::channel(16);
        let controller = Arc::new(CountingController::default());
        let handle = spawn_refresh_listener(rx, controller);

        drop(tx);

        handle.await.unwrap();
    }
}

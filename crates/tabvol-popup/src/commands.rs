use std::sync::Arc;

use serde_json::Value;

use tabvol_common::{Message, Result, TabId, Transport};

/// Typed wrappers for every command the popup sends.
///
/// Each call resolves with the handler's reply or propagates the transport
/// failure to the caller; unlike the notification path, nothing is
/// swallowed here.
pub struct PopupCommands {
    transport: Arc<dyn Transport>,
}

impl PopupCommands {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Ask the background which tabs currently have audio.
    pub async fn tab_audio_status(&self) -> Result<Value> {
        self.transport.send_to_bus(Message::GetTabAudioStatus).await
    }

    /// Set one tab's volume: first in the tab's content context, then
    /// announce it on the bus so the background can track it. Strictly
    /// sequential; a tab-scoped failure aborts the bus send. Resolves with
    /// the bus reply.
    ///
    /// If the tab applies the change and the bus send then fails, the two
    /// sides can disagree about the volume. Nothing re-syncs them.
    pub async fn set_tab_volume(&self, tab_id: TabId, volume: f64) -> Result<Value> {
        self.transport
            .send_to_tab(tab_id, Message::SetVolume { tab_id: None, volume })
            .await?;
        self.transport
            .send_to_bus(Message::SetVolume {
                tab_id: Some(tab_id),
                volume,
            })
            .await
    }

    /// Read one tab's current volume from its content context.
    pub async fn tab_volume(&self, tab_id: TabId) -> Result<Value> {
        self.transport.send_to_tab(tab_id, Message::GetVolume).await
    }

    /// Set the same volume on every audible tab.
    pub async fn apply_to_all_tabs(&self, volume: f64) -> Result<Value> {
        self.transport
            .send_to_bus(Message::ApplyToAllTabs { volume })
            .await
    }

    /// Restore every tab to full volume.
    pub async fn reset_all_tabs(&self) -> Result<Value> {
        self.transport.send_to_bus(Message::ResetAllTabs).await
    }
}

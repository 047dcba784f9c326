//! Wire schema for the extension message bus.
//!
//! Every message is a JSON object tagged by its `action` field, matching
//! what the background page, popup, and content scripts exchange. Replies
//! are untyped (`serde_json::Value`); their shape is owned by whichever
//! handler answers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a browser tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u32);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Every message that crosses the runtime bus or a tab-scoped channel.
///
/// Notification variants flow background -> popup and expect no reply.
/// Command variants flow popup -> background/content and resolve with a
/// handler-defined reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Message {
    // -- Notifications (background -> popup) --
    TabAudioStarted {
        tab_id: TabId,
    },
    TabAudioStopped {
        tab_id: TabId,
    },
    TabAudioListUpdated,
    TabTitleChanged {
        tab_id: TabId,
        title: String,
    },
    ActiveTabChanged {
        tab_id: TabId,
    },
    AudioStatusChanged,

    // -- Commands (popup -> background/content) --
    GetTabAudioStatus,
    /// Tab-scoped form carries only `volume`; the bus-scoped form adds
    /// `tabId` so the background knows which tab was adjusted.
    SetVolume {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tab_id: Option<TabId>,
        volume: f64,
    },
    GetVolume,
    ApplyToAllTabs {
        volume: f64,
    },
    ResetAllTabs,

    /// Actions this component does not know about. Ignored, never an error.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn notification_wire_shapes() {
        let msg = Message::TabAudioStarted { tab_id: TabId(7) };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"action": "tabAudioStarted", "tabId": 7}));

        let msg = Message::TabAudioStopped { tab_id: TabId(7) };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"action": "tabAudioStopped", "tabId": 7}));

        let msg = Message::TabAudioListUpdated;
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"action": "tabAudioListUpdated"}));

        let msg = Message::TabTitleChanged {
            tab_id: TabId(3),
            title: "Lo-fi beats".into(),
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"action": "tabTitleChanged", "tabId": 3, "title": "Lo-fi beats"})
        );

        let msg = Message::ActiveTabChanged { tab_id: TabId(9) };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"action": "activeTabChanged", "tabId": 9}));
    }

    #[test]
    fn set_volume_tab_scoped_omits_tab_id() {
        let msg = Message::SetVolume {
            tab_id: None,
            volume: 0.3,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"action": "setVolume", "volume": 0.3}));
    }

    #[test]
    fn set_volume_bus_scoped_carries_tab_id() {
        let msg = Message::SetVolume {
            tab_id: Some(TabId(5)),
            volume: 0.3,
        };
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({"action": "setVolume", "tabId": 5, "volume": 0.3})
        );
    }

    #[test]
    fn command_wire_shapes() {
        let value = serde_json::to_value(Message::GetTabAudioStatus).unwrap();
        assert_eq!(value, json!({"action": "getTabAudioStatus"}));

        let value = serde_json::to_value(Message::GetVolume).unwrap();
        assert_eq!(value, json!({"action": "getVolume"}));

        let value = serde_json::to_value(Message::ApplyToAllTabs { volume: 0.8 }).unwrap();
        assert_eq!(value, json!({"action": "applyToAllTabs", "volume": 0.8}));

        let value = serde_json::to_value(Message::ResetAllTabs).unwrap();
        assert_eq!(value, json!({"action": "resetAllTabs"}));
    }

    #[test]
    fn audio_status_changed_ignores_extra_fields() {
        let msg: Message =
            serde_json::from_value(json!({"action": "audioStatusChanged", "tabCount": 4}))
                .unwrap();
        assert_eq!(msg, Message::AudioStatusChanged);
    }

    #[test]
    fn unknown_action_deserializes() {
        let msg: Message =
            serde_json::from_value(json!({"action": "someFutureAction", "x": 1})).unwrap();
        assert_eq!(msg, Message::Unknown);
    }

    #[test]
    fn roundtrip() {
        let messages = vec![
            Message::TabAudioStarted { tab_id: TabId(1) },
            Message::TabTitleChanged {
                tab_id: TabId(2),
                title: "t".into(),
            },
            Message::SetVolume {
                tab_id: Some(TabId(5)),
                volume: 0.3,
            },
            Message::ResetAllTabs,
        ];
        for msg in &messages {
            let json = serde_json::to_string(msg).unwrap();
            let back: Message = serde_json::from_str(&json).unwrap();
            assert_eq!(*msg, back);
        }
    }

    #[test]
    fn tab_id_display_and_transparency() {
        assert_eq!(TabId(42).to_string(), "42");
        let value = serde_json::to_value(TabId(42)).unwrap();
        assert_eq!(value, json!(42));
    }
}

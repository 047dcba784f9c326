//! Transport abstraction over the host runtime's message bus.
//!
//! The browser runtime offers two addressing modes: a process-wide bus
//! (whoever is listening right now gets the message) and tab-scoped
//! delivery into one tab's content context. [`Transport`] captures both;
//! [`RuntimeBus`] is the in-process implementation used by the demo app
//! and integration-style tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;

use crate::errors::TransportError;
use crate::messages::{Message, TabId};
use crate::Result;

/// Host message bus as seen by the dispatcher and the popup proxy.
///
/// Both sends resolve with the receiver's reply or fail promptly; this is
/// in-process dispatch, not a network call, so there is no hang case.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver to whichever process-wide listeners are currently registered.
    async fn send_to_bus(&self, msg: Message) -> Result<Value>;

    /// Deliver to the execution context of one specific tab.
    async fn send_to_tab(&self, tab_id: TabId, msg: Message) -> Result<Value>;
}

/// A reply-producing message handler registered on the bus.
pub type Responder = Box<dyn Fn(&Message) -> Result<Value> + Send + Sync>;

/// In-process message bus.
///
/// Bus-scoped messages fan out to every [`subscribe`](RuntimeBus::subscribe)d
/// receiver; the reply, if one is expected, comes from the single registered
/// bus responder. Tab-scoped messages go only to that tab's responder.
pub struct RuntimeBus {
    events: broadcast::Sender<Message>,
    bus_responder: Mutex<Option<Responder>>,
    tab_responders: Mutex<HashMap<TabId, Responder>>,
}

impl RuntimeBus {
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity);
        Self {
            events,
            bus_responder: Mutex::new(None),
            tab_responders: Mutex::new(HashMap::new()),
        }
    }

    /// Register for bus-scoped messages. The receiver is the caller's to
    /// keep (and to drop on teardown); the bus never unsubscribes anyone.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.events.subscribe()
    }

    /// Install the process-wide responder, replacing any previous one.
    pub fn set_bus_responder<F>(&self, respond: F)
    where
        F: Fn(&Message) -> Result<Value> + Send + Sync + 'static,
    {
        if let Ok(mut responder) = self.bus_responder.lock() {
            *responder = Some(Box::new(respond));
        }
    }

    /// Install the responder for one tab's content context.
    pub fn set_tab_responder<F>(&self, tab_id: TabId, respond: F)
    where
        F: Fn(&Message) -> Result<Value> + Send + Sync + 'static,
    {
        if let Ok(mut responders) = self.tab_responders.lock() {
            responders.insert(tab_id, Box::new(respond));
        }
    }

    /// Drop a tab's responder, e.g. when its context goes away.
    pub fn remove_tab_responder(&self, tab_id: TabId) {
        if let Ok(mut responders) = self.tab_responders.lock() {
            responders.remove(&tab_id);
        }
    }
}

impl Default for RuntimeBus {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl Transport for RuntimeBus {
    async fn send_to_bus(&self, msg: Message) -> Result<Value> {
        tracing::trace!(?msg, "bus dispatch");
        let listeners = self.events.send(msg.clone()).unwrap_or(0);

        if let Ok(responder) = self.bus_responder.lock() {
            if let Some(respond) = responder.as_ref() {
                return respond(&msg);
            }
        }

        if listeners > 0 {
            Ok(Value::Null)
        } else {
            Err(TransportError::NoReceiver)
        }
    }

    async fn send_to_tab(&self, tab_id: TabId, msg: Message) -> Result<Value> {
        tracing::trace!(%tab_id, ?msg, "tab dispatch");
        if let Ok(responders) = self.tab_responders.lock() {
            if let Some(respond) = responders.get(&tab_id) {
                return respond(&msg);
            }
        }
        Err(TransportError::NoTabContext(tab_id))
    }
}

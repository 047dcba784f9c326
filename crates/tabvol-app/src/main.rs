//! Demo wiring for the tabvol messaging layer.
//!
//! Stands up an in-process [`RuntimeBus`] with simulated content-script and
//! background handlers, then drives the popup commands and background
//! notifications through a short scripted session. The real extension
//! replaces the simulated handlers with the host runtime; everything else
//! is exactly what ships.

mod cli;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use tabvol_background::AudioNotifier;
use tabvol_common::{Message, RuntimeBus, TabId, Transport};
use tabvol_popup::{spawn_refresh_listener, PopupCommands, PopupController};

struct PopupLog;

#[async_trait::async_trait]
impl PopupController for PopupLog {
    async fn load_audio_tabs(&self) {
        tracing::info!("popup: reloading audible tab list");
    }
}

/// Wire simulated content-script handlers for a fixed set of tabs plus a
/// background handler for bus-scoped commands.
fn install_demo_handlers(bus: &RuntimeBus, volumes: Arc<Mutex<HashMap<TabId, f64>>>) {
    let tabs: Vec<TabId> = volumes.lock().map(|v| v.keys().copied().collect()).unwrap_or_default();

    for tab_id in tabs {
        let volumes = Arc::clone(&volumes);
        bus.set_tab_responder(tab_id, move |msg| match msg {
            Message::SetVolume { volume, .. } => {
                if let Ok(mut vols) = volumes.lock() {
                    vols.insert(tab_id, *volume);
                }
                Ok(json!({"applied": true}))
            }
            Message::GetVolume => {
                let volume = volumes
                    .lock()
                    .map(|vols| vols.get(&tab_id).copied().unwrap_or(1.0))
                    .unwrap_or(1.0);
                Ok(json!(volume))
            }
            _ => Ok(Value::Null),
        });
    }

    bus.set_bus_responder(move |msg| match msg {
        Message::GetTabAudioStatus => {
            let tabs: Vec<Value> = volumes
                .lock()
                .map(|vols| {
                    vols.iter()
                        .map(|(tab_id, volume)| json!({"tabId": tab_id, "volume": volume}))
                        .collect()
                })
                .unwrap_or_default();
            Ok(json!({"tabs": tabs}))
        }
        Message::SetVolume {
            tab_id: Some(tab_id),
            volume,
        } => {
            tracing::debug!(%tab_id, volume, "background recorded volume change");
            Ok(json!({"ok": true}))
        }
        Message::ApplyToAllTabs { volume } => {
            if let Ok(mut vols) = volumes.lock() {
                for v in vols.values_mut() {
                    *v = *volume;
                }
            }
            Ok(json!({"ok": true}))
        }
        Message::ResetAllTabs => {
            if let Ok(mut vols) = volumes.lock() {
                for v in vols.values_mut() {
                    *v = 1.0;
                }
            }
            Ok(json!({"ok": true}))
        }
        _ => Ok(Value::Null),
    });
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "info".parse().expect("static directive")),
            ),
        )
        .init();

    tracing::info!("tabvol v{} demo starting", env!("CARGO_PKG_VERSION"));

    let volumes = Arc::new(Mutex::new(HashMap::from([
        (TabId(1), 1.0),
        (TabId(2), 1.0),
    ])));

    let bus = Arc::new(RuntimeBus::default());
    install_demo_handlers(&bus, Arc::clone(&volumes));

    let transport: Arc<dyn Transport> = Arc::clone(&bus) as Arc<dyn Transport>;
    let notifier = AudioNotifier::with_debounce(
        Arc::clone(&transport),
        Duration::from_millis(args.debounce_ms),
    );
    let commands = PopupCommands::new(Arc::clone(&transport));
    let listener = spawn_refresh_listener(bus.subscribe(), Arc::new(PopupLog));

    // Background observes audio starting in tab 1.
    notifier.tab_audio_started(TabId(1));
    notifier.tab_title_changed(TabId(1), "Synthwave radio");
    notifier.active_tab_changed(TabId(1));

    // A burst of tab churn: only one listUpdated goes out, after the window.
    for _ in 0..3 {
        notifier.tab_list_updated();
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    match commands.set_tab_volume(TabId(1), 0.3).await {
        Ok(reply) => tracing::info!(%reply, "set tab 1 volume to 0.3"),
        Err(err) => tracing::warn!(%err, "set_tab_volume failed"),
    }

    match commands.tab_volume(TabId(1)).await {
        Ok(reply) => tracing::info!(%reply, "tab 1 volume"),
        Err(err) => tracing::warn!(%err, "tab_volume failed"),
    }

    // Tab 99 has no content context; the command path surfaces that.
    if let Err(err) = commands.tab_volume(TabId(99)).await {
        tracing::info!(%err, "tab 99 query failed as expected");
    }

    match commands.apply_to_all_tabs(0.5).await {
        Ok(reply) => tracing::info!(%reply, "applied 0.5 everywhere"),
        Err(err) => tracing::warn!(%err, "apply_to_all_tabs failed"),
    }

    match commands.tab_audio_status().await {
        Ok(reply) => tracing::info!(%reply, "audio status"),
        Err(err) => tracing::warn!(%err, "tab_audio_status failed"),
    }

    match commands.reset_all_tabs().await {
        Ok(reply) => tracing::info!(%reply, "reset all tabs"),
        Err(err) => tracing::warn!(%err, "reset_all_tabs failed"),
    }

    // Background announces a status change; the popup listener refreshes.
    if let Err(err) = transport.send_to_bus(Message::AudioStatusChanged).await {
        tracing::warn!(%err, "status broadcast failed");
    }

    // Let the debounced list update and the refresh land before exiting.
    tokio::time::sleep(Duration::from_millis(args.debounce_ms + 100)).await;

    listener.abort();
    tracing::info!("demo finished");
}

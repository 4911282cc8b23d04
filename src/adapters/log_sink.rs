//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events
//! to the logger (UART / USB-CDC in production).  A future MQTT or
//! BLE adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | act={:?} mood={:?} | pos=({},{}) | hunger={} | \
                     waste={} | distressed={} | timers={}",
                    t.action,
                    t.mood,
                    t.position.x,
                    t.position.y,
                    t.hunger_level,
                    t.waste_count,
                    t.distressed,
                    t.timers_pending,
                );
            }
            AppEvent::ActionChanged { from, to } => {
                info!("ACT   | {:?} -> {:?}", from, to);
            }
            AppEvent::MoodChanged { from, to } => {
                info!("MOOD  | {:?} -> {:?}", from, to);
            }
            AppEvent::Fed { was_hungry } => {
                info!(
                    "FEED  | {}",
                    if *was_hungry { "devoured" } else { "sniffed at it" }
                );
            }
            AppEvent::Scooped { count } => {
                info!("SCOOP | removed {} marker(s)", count);
            }
            AppEvent::Arrived { x, y } => {
                info!("MOVE  | arrived at ({}, {})", x, y);
            }
            AppEvent::WasteDropped { count } => {
                info!("WASTE | dropped, {} on screen", count);
            }
            AppEvent::DistressEntered => {
                info!("STATE | distressed, waiting for care");
            }
            AppEvent::Released => {
                info!("STATE | released, roaming again");
            }
            AppEvent::FetchCompleted => {
                info!("NET   | fetch completed");
            }
            AppEvent::Started => {
                info!("START | pet released onto the lawn");
            }
        }
    }
}

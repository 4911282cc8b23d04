//! PixelPup firmware — main entry point.
//!
//! Hexagonal architecture: the animation core is pure logic, adapters
//! on the outer ring translate to real hardware (or to the host
//! console in simulation).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  PinLevelSource   ConsoleDisplay   LogEventSink          │
//! │  (LevelSource)    (RenderPort)     (EventSink)           │
//! │  MonotonicClock   FetchClient worker thread              │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            PetService (pure logic)                 │  │
//! │  │  TimerPool · DebouncedInput · Pet · FetchClient    │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use pixelpup::adapters::display::ConsoleDisplay;
use pixelpup::adapters::gpio::ReleasedLines;
use pixelpup::adapters::log_sink::LogEventSink;
use pixelpup::adapters::time::MonotonicClock;
use pixelpup::app::commands::PetCommand;
use pixelpup::app::events::AppEvent;
use pixelpup::app::ports::{EventSink, LevelSource, RenderPort};
use pixelpup::app::service::PetService;
use pixelpup::config::PetConfig;
use pixelpup::net::{FetchRequest, NullTransport};
use pixelpup::pet::RenderFrame;
use pixelpup::pins;

const TELEMETRY_INTERVAL_MS: u64 = 10_000;

// ── Board adapter ─────────────────────────────────────────────
//
// The service takes a single `impl LevelSource + RenderPort`; this
// struct bundles the line sampler and the display into one.  On the
// host the lines idle released and frames go to the debug log.

struct BoardHw {
    lines: ReleasedLines,
    display: ConsoleDisplay,
}

impl LevelSource for BoardHw {
    fn level(&mut self, pin: i32) -> bool {
        self.lines.level(pin)
    }
}

impl RenderPort for BoardHw {
    fn draw(&mut self, frame: &RenderFrame<'_>) {
        self.display.draw(frame);
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. Platform bootstrap ─────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("╔══════════════════════════════════════╗");
    info!("║  PixelPup v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration and clocks ───────────────────────────
    let config = PetConfig::default();
    let clock = MonotonicClock::new();
    let boot_ms = clock.now_ms();

    // ── 3. Service + adapters ─────────────────────────────────
    let mut service = PetService::new(config.clone(), boot_ms, boot_ms ^ 0x5EED, NullTransport)?;
    service.add_input(pins::FEED_BUTTON_GPIO, PetCommand::Feed)?;
    service.add_input(pins::CARE_BUTTON_GPIO, PetCommand::Scoop)?;

    let mut hw = BoardHw {
        lines: ReleasedLines,
        display: ConsoleDisplay::new(),
    };
    let mut sink = LogEventSink::new();

    service.start(clock.now_ms(), &mut sink);

    // Message-of-the-day fetch.  With no network backend wired up the
    // worker logs the failure and the callback is skipped.
    let fetch = service.fetch(
        FetchRequest::get("http://pixelpup.local/api/motd"),
        Box::new(|_pet, doc| {
            if let Some(motd) = doc.get("motd").and_then(|v| v.as_str()) {
                info!("motd: {}", motd);
            }
        }),
    );
    if let Err(e) = fetch {
        warn!("motd fetch not started: {}", e);
    }

    info!("System ready. Entering idle loop.");

    // ── 4. Idle loop ──────────────────────────────────────────
    let interval = Duration::from_millis(u64::from(config.control_loop_interval_ms));
    let mut last_telemetry = boot_ms;

    #[cfg(target_os = "espidf")]
    loop {
        std::thread::sleep(interval);
        let now = clock.now_ms();
        service.tick(now, &mut hw, &mut sink);
        if now.saturating_sub(last_telemetry) >= TELEMETRY_INTERVAL_MS {
            sink.emit(&AppEvent::Telemetry(service.telemetry()));
            last_telemetry = now;
        }
    }

    // Host simulation: a bounded demo run, then a clean shutdown so
    // the fetch worker drains.
    #[cfg(not(target_os = "espidf"))]
    {
        for _ in 0..3_000 {
            std::thread::sleep(interval);
            let now = clock.now_ms();
            service.tick(now, &mut hw, &mut sink);
            if now.saturating_sub(last_telemetry) >= TELEMETRY_INTERVAL_MS {
                sink.emit(&AppEvent::Telemetry(service.telemetry()));
                last_telemetry = now;
            }
        }
        sink.emit(&AppEvent::Telemetry(service.telemetry()));
        service.shutdown();
        info!("Simulation complete ({} frames drawn)", hw.display.frames());
    }

    Ok(())
}

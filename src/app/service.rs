//! Application service — the hexagonal core.
//!
//! [`PetService`] owns the pet, the deferred-call registry, the
//! debounced inputs and the fetch client, and drives them in a fixed
//! order once per tick.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  LevelSource ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                  │         PetService          │
//!   RenderPort ◀── │  timers · inputs · pet · net │
//!                  └─────────────────────────────┘
//! ```
//!
//! Tick order is part of the contract: finished fetches are handed to
//! the registry, the registry fires due calls, inputs are debounced
//! and translated to commands, and only then does the pet take its
//! animation step.  A zero-delay call scheduled by a fetch therefore
//! mutates the pet before the same tick's animation step.

use heapless::Vec;
use log::info;

use crate::config::{MAX_INPUT_CHANNELS, PetConfig};
use crate::drivers::input::DebouncedInput;
use crate::error::{Error, Result, TimerError};
use crate::net::{FetchCallback, FetchClient, FetchRequest, HttpTransport};
use crate::pet::Pet;
use crate::rng::SmallRng;
use crate::timers::{TimerCallback, TimerHandle, TimerPool};

use super::commands::PetCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, LevelSource, RenderPort};

struct InputChannel {
    input: DebouncedInput,
    on_press: PetCommand,
}

/// The application service orchestrates all domain logic.
pub struct PetService {
    pet: Pet,
    timers: TimerPool<Pet>,
    net: FetchClient<Pet>,
    inputs: Vec<InputChannel, MAX_INPUT_CHANNELS>,
    rng: SmallRng,
    config: PetConfig,
    tick_count: u64,

    // previous-tick snapshot for edge-detected events
    prev_action: crate::pet::Action,
    prev_mood: crate::pet::Mood,
    prev_distressed: bool,
    prev_waste: usize,
    prev_dest: Option<(i32, i32)>,
}

impl PetService {
    /// Builds the service and spawns the fetch worker around
    /// `transport`.  `now_ms` seeds the pet's clocks, `seed` the
    /// behavior RNG.
    pub fn new<T>(config: PetConfig, now_ms: u64, seed: u64, transport: T) -> Result<Self>
    where
        T: HttpTransport + Send + 'static,
    {
        config.validate()?;
        let pet = Pet::new(config.clone(), now_ms);
        Ok(Self {
            prev_action: pet.action(),
            prev_mood: pet.mood(),
            prev_distressed: pet.is_distressed(),
            prev_waste: pet.waste_markers().len(),
            prev_dest: pet.destination(),
            pet,
            timers: TimerPool::new(),
            net: FetchClient::spawn(transport),
            inputs: Vec::new(),
            rng: SmallRng::new(seed),
            config,
            tick_count: 0,
        })
    }

    /// Registers a debounced input that issues `on_press` on each
    /// confirmed press.
    pub fn add_input(&mut self, pin: i32, on_press: PetCommand) -> Result<()> {
        let input = DebouncedInput::new(pin, self.config.debounce_ms);
        self.inputs
            .push(InputChannel { input, on_press })
            .map_err(|_| Error::Config("too many input channels"))
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Releases the pet onto the lawn and arms ambient behavior.
    pub fn start(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        self.pet.release(now_ms, &mut self.rng);
        self.prev_action = self.pet.action();
        self.prev_mood = self.pet.mood();
        sink.emit(&AppEvent::Started);
        info!("PetService started");
    }

    /// Stops the fetch worker and drains it.  Call on the way down.
    pub fn shutdown(self) {
        self.net.shutdown();
        info!("PetService stopped after {} ticks", self.tick_count);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Runs one full cycle: fetch completions → deferred calls →
    /// inputs → pet step.
    ///
    /// The `hw` parameter satisfies **both** [`LevelSource`] and
    /// [`RenderPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl LevelSource + RenderPort),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Finished fetches land on the registry as zero-delay calls
        if self.net.pump(now_ms, &mut self.timers) > 0 {
            sink.emit(&AppEvent::FetchCompleted);
        }

        // 2. Due deferred calls fire against the pet
        self.timers.poll(now_ms, &mut self.pet);

        // 3. Debounced inputs become commands
        for i in 0..self.inputs.len() {
            let pin = self.inputs[i].input.pin();
            let raw = hw.level(pin);
            if let Some(event) = self.inputs[i].input.poll(now_ms, raw) {
                if event.pressed {
                    let command = self.inputs[i].on_press.clone();
                    self.handle_command(command, now_ms, sink);
                }
            }
        }

        // 4. One animation step, drawn through the render port
        self.pet.idle(now_ms, &mut self.rng, hw);

        // 5. Edge-detected events
        self.emit_changes(sink);
    }

    /// Applies an external command.
    pub fn handle_command(
        &mut self,
        command: PetCommand,
        now_ms: u64,
        sink: &mut impl EventSink,
    ) {
        info!("command: {:?}", command);
        match command {
            PetCommand::Feed => {
                let was_hungry = self.pet.feed(now_ms);
                sink.emit(&AppEvent::Fed { was_hungry });
            }
            PetCommand::Scoop => {
                let count = self.pet.scoop();
                sink.emit(&AppEvent::Scooped { count });
            }
            PetCommand::Sit => self.pet.sit(),
            PetCommand::GoTo { x, y } => self.pet.go_to(x, y, None),
            PetCommand::ForceAction(action) => self.pet.set_action(action, true),
            PetCommand::Release => {
                self.pet.release(now_ms, &mut self.rng);
                sink.emit(&AppEvent::Released);
            }
        }
    }

    // ── Deferred work and fetches ─────────────────────────────

    /// Schedules a deferred call against the pet.
    pub fn defer(
        &mut self,
        now_ms: u64,
        delay_ms: u64,
        callback: TimerCallback<Pet>,
    ) -> Result<TimerHandle> {
        self.timers
            .schedule(now_ms, delay_ms, callback)
            .ok_or(Error::Timer(TimerError::PoolExhausted))
    }

    /// Cancels a deferred call; stale handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.timers.cancel(handle);
    }

    /// Starts a background fetch.  `on_complete` runs on a later tick
    /// with the parsed document; it is skipped when the fetch fails.
    pub fn fetch(&mut self, request: FetchRequest, on_complete: FetchCallback<Pet>) -> Result<()> {
        self.net.submit(request, on_complete)
    }

    // ── Introspection ─────────────────────────────────────────

    pub fn pet(&self) -> &Pet {
        &self.pet
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn telemetry(&self) -> TelemetryData {
        TelemetryData {
            action: self.pet.action(),
            mood: self.pet.mood(),
            position: self.pet.position(),
            hunger_level: self.pet.hunger_level(),
            waste_count: self.pet.waste_markers().len(),
            distressed: self.pet.is_distressed(),
            timers_pending: self.timers.pending(),
        }
    }

    fn emit_changes(&mut self, sink: &mut impl EventSink) {
        let action = self.pet.action();
        if action != self.prev_action {
            sink.emit(&AppEvent::ActionChanged {
                from: self.prev_action,
                to: action,
            });
            self.prev_action = action;
        }

        let mood = self.pet.mood();
        if mood != self.prev_mood {
            sink.emit(&AppEvent::MoodChanged {
                from: self.prev_mood,
                to: mood,
            });
            self.prev_mood = mood;
        }

        let waste = self.pet.waste_markers().len();
        if waste > self.prev_waste {
            sink.emit(&AppEvent::WasteDropped { count: waste });
        }
        self.prev_waste = waste;

        let distressed = self.pet.is_distressed();
        if distressed && !self.prev_distressed {
            sink.emit(&AppEvent::DistressEntered);
        }
        self.prev_distressed = distressed;

        let dest = self.pet.destination();
        if let (Some((x, y)), None) = (self.prev_dest, dest) {
            sink.emit(&AppEvent::Arrived { x, y });
        }
        self.prev_dest = dest;
    }
}

//! Pet behavior state machine.
//!
//! ```text
//!              ┌──────────────────────────────────────────────┐
//!              │                    Pet                       │
//!   idle(now)─▶│  step ─▶ constrain ─▶ steer ─▶ needs ─▶ draw │──▶ RenderPort
//!              │    │                                         │
//!              │    └─ travel / sit callbacks                 │
//!              └──────────────────────────────────────────────┘
//! ```
//!
//! The pet wanders a bounded lawn, eats, sleeps, runs, leaves waste
//! behind and sits down in protest when neglected.  All transitions
//! are driven by [`Pet::idle`], which the idle driver calls once per
//! tick with the current monotonic time; the pet never reads a clock
//! of its own.  Screen coordinates: y grows downward, and the deeper
//! the pet stands (larger y) the narrower the walkable x range gets,
//! which fakes perspective on a flat sprite.

pub mod actions;
pub mod mood;

pub use actions::{Action, DISTRESS_FRAME};
pub use mood::{Hunger, HungerStage, Mood};

use heapless::Vec;

use crate::config::{PetConfig, WASTE_CAPACITY};
use crate::rng::RandomSource;

/// Screen position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Deferred reaction invoked with the pet and the current time.
pub type PetCallback = Box<dyn FnOnce(&mut Pet, u64)>;

/// Everything a display needs to draw one animation tick.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    pub position: Position,
    pub action: Action,
    pub frame_index: u8,
    /// Draw the sprite flipped horizontally.
    pub mirror: bool,
    pub mood: Mood,
    /// Note bubble glyph, when one is showing.
    pub note: Option<Mood>,
    pub waste: &'a [Position],
}

/// Consumer of rendered animation frames.
pub trait RenderPort {
    fn draw(&mut self, frame: &RenderFrame<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TravelPhase {
    Vertical,
    Horizontal,
}

struct Destination {
    x: i32,
    y: i32,
    phase: TravelPhase,
    on_arrive: Option<PetCallback>,
}

/// The virtual pet.  See the module docs for the overall shape.
pub struct Pet {
    position: Position,
    velocity: (i32, i32),
    action: Action,
    mood: Mood,
    note: Mood,
    note_until_ms: u64,
    frame: u8,
    last_step_ms: u64,

    hunger: Hunger,
    hunger_next_ms: u64,
    waste: Vec<Position, WASTE_CAPACITY>,
    waste_next_ms: u64,

    /// Ambient re-decision loop; armed by [`release`](Self::release).
    shuffling: bool,
    shuffle_next_ms: u64,
    walk_change_ms: u64,

    dest: Option<Destination>,
    sit_done: Option<PetCallback>,

    facing_left: bool,
    /// Needs (hunger, waste) pause while busy.
    busy: bool,
    /// Sitting in protest; movement frozen until released.
    distressed: bool,
    free_roam: bool,

    config: PetConfig,
}

impl Pet {
    /// A new pet starts at the left edge of the lawn walking right.
    /// `now_ms` seeds the hunger and waste clocks.
    pub fn new(config: PetConfig, now_ms: u64) -> Self {
        let mut pet = Self {
            position: Position {
                x: config.walk_x_min,
                y: config.y_min,
            },
            velocity: (0, 0),
            action: Action::WalkRight,
            mood: Mood::Happy,
            note: Mood::Heart,
            note_until_ms: 0,
            frame: 0,
            last_step_ms: now_ms,
            hunger: Hunger::default(),
            hunger_next_ms: now_ms + config.hunger_interval_ms,
            waste: Vec::new(),
            waste_next_ms: now_ms + config.waste_interval_ms,
            shuffling: false,
            shuffle_next_ms: 0,
            walk_change_ms: now_ms + config.walk_change_min_ms,
            dest: None,
            sit_done: None,
            facing_left: false,
            busy: false,
            distressed: false,
            free_roam: true,
            config,
        };
        pet.set_action(Action::WalkRight, false);
        pet
    }

    // ── Queries ───────────────────────────────────────────────────

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Frame the display should show right now.
    pub fn frame_index(&self) -> u8 {
        if self.distressed { DISTRESS_FRAME } else { self.frame }
    }

    pub fn hunger_level(&self) -> u8 {
        self.hunger.level()
    }

    pub fn waste_markers(&self) -> &[Position] {
        &self.waste
    }

    pub fn is_distressed(&self) -> bool {
        self.distressed
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn destination(&self) -> Option<(i32, i32)> {
        self.dest.as_ref().map(|d| (d.x, d.y))
    }

    /// Sprites face right; mirror when facing left in a non-walking
    /// pose (the walk rows carry their own left-facing frames).
    pub fn should_mirror(&self) -> bool {
        self.facing_left && !self.action.is_walking()
    }

    // ── Commands ──────────────────────────────────────────────────

    /// Switches the current action.  With `hold` set the ambient
    /// shuffle loop stops and the pet is marked busy until released.
    pub fn set_action(&mut self, action: Action, hold: bool) {
        self.action = action;
        match action {
            Action::WalkRight => self.facing_left = false,
            Action::WalkLeft => self.facing_left = true,
            _ => {}
        }
        let profile = action.profile();
        self.velocity = if action == Action::Run {
            let speed = profile.velocity.0;
            (if self.facing_left { -speed } else { speed }, 0)
        } else {
            profile.velocity
        };
        if action == Action::Run {
            // running is its favourite thing
            self.mood = Mood::Heart;
        }
        if self.frame >= profile.frame_count {
            self.frame = 0;
        }
        if hold {
            self.shuffling = false;
            self.busy = true;
        }
    }

    /// Plays the sitting-down animation once, then settles into
    /// [`Action::SitFacingRight`].
    pub fn sit(&mut self) {
        self.sit_done = Some(Box::new(|pet: &mut Pet, _now| {
            pet.set_action(Action::SitFacingRight, false);
        }));
        self.set_action(Action::SitTransient, false);
    }

    /// Walks to `(x, y)`: vertical leg first, then horizontal.
    /// `on_arrive` fires once when the horizontal leg completes.
    /// A new destination replaces any pending one.
    pub fn go_to(&mut self, x: i32, y: i32, on_arrive: Option<PetCallback>) {
        let vertical = if y > self.position.y {
            Action::WalkDown
        } else {
            Action::WalkUp
        };
        self.dest = Some(Destination {
            x,
            y,
            phase: TravelPhase::Vertical,
            on_arrive,
        });
        self.set_action(vertical, false);
    }

    /// Feeds the pet.  A genuinely hungry pet is delighted; a full one
    /// is annoyed.  Returns whether it was hungry.
    pub fn feed(&mut self, now_ms: u64) -> bool {
        let was_hungry = self.hunger.is_hungry(&self.config);
        self.mood = if was_hungry { Mood::Happy } else { Mood::Grumpy };
        if self.note == Mood::Food {
            // the begging glyph flips to affection once the bowl is down
            self.note = Mood::Heart;
        }
        self.hunger.sate();
        self.notify(now_ms, self.config.feed_note_ms);
        was_hungry
    }

    /// Removes all waste markers.  Returns how many were scooped.
    pub fn scoop(&mut self) -> usize {
        let scooped = self.waste.len();
        self.waste.clear();
        scooped
    }

    /// Lifts distress and busy states and restarts free roaming and
    /// the ambient shuffle loop.
    pub fn release(&mut self, now_ms: u64, rng: &mut impl RandomSource) {
        self.distressed = false;
        self.busy = false;
        self.free_roam = true;
        self.dest = None; // drop any stalled travel
        self.set_action(Action::WalkRight, false);
        self.mood = Mood::Heart;
        self.note = Mood::Heart;
        self.notify(now_ms, self.config.release_note_ms);
        self.shuffling = true;
        let base = self.config.shuffle_base_ms;
        self.shuffle_next_ms = now_ms + base + u64::from(rng.below(base as u32));
    }

    /// Shows `note` in the bubble for `duration_ms`.
    pub fn show_note(&mut self, now_ms: u64, note: Mood, duration_ms: u64) {
        self.note = note;
        self.notify(now_ms, duration_ms);
    }

    // ── Driver entry point ────────────────────────────────────────

    /// Advances the pet by one tick.  At most one animation step is
    /// taken per call regardless of how much time has passed; the
    /// frame is drawn only on steps.
    pub fn idle(&mut self, now_ms: u64, rng: &mut impl RandomSource, render: &mut impl RenderPort) {
        let step_ms = self.action.profile().step_ms;
        if now_ms >= self.last_step_ms + step_ms {
            self.last_step_ms = now_ms;
            self.step(now_ms);
            self.steer_free_roam(now_ms, rng);
            self.wrap_run();
            self.advance_hunger(now_ms);
            self.advance_waste(now_ms);
            self.draw(now_ms, render);
        }
        if self.shuffling && !self.distressed && self.shuffle_next_ms <= now_ms {
            self.shuffle(now_ms, rng);
        }
    }

    // ── Internals ─────────────────────────────────────────────────

    fn step(&mut self, now_ms: u64) {
        if self.distressed {
            // frozen in the protest pose until released
            self.action = Action::SitFacingRight;
            return;
        }

        let profile = self.action.profile();
        self.position.x += self.velocity.0;
        self.position.y += self.velocity.1;
        self.constrain();

        self.frame += 1;
        if self.frame >= profile.frame_count {
            self.frame = 0;
            if profile.one_shot {
                if let Some(done) = self.sit_done.take() {
                    done(self, now_ms);
                }
            }
        }

        self.resolve_travel(now_ms);
    }

    /// Keeps the pet on the lawn.  The x range narrows with depth so
    /// the pet cannot walk past the drawn horizon edges.
    fn constrain(&mut self) {
        let (x_min, x_max) = self.x_bounds();
        self.position.y = self.position.y.clamp(self.config.y_min, self.config.y_max);
        let depth = self.position.y - self.config.y_min;
        self.position.x = self.position.x.clamp(x_min + depth, x_max - depth);
    }

    fn x_bounds(&self) -> (i32, i32) {
        if self.action == Action::Run {
            (self.config.run_x_min, self.config.run_x_max)
        } else {
            (self.config.walk_x_min, self.config.walk_x_max)
        }
    }

    fn resolve_travel(&mut self, now_ms: u64) {
        let Some((phase, tx, ty)) = self.dest.as_ref().map(|d| (d.phase, d.x, d.y)) else {
            return;
        };
        match phase {
            TravelPhase::Vertical => {
                let done = (self.action == Action::WalkUp && ty >= self.position.y)
                    || (self.action == Action::WalkDown && ty <= self.position.y);
                if done {
                    let horizontal = if tx < self.position.x {
                        Action::WalkLeft
                    } else {
                        Action::WalkRight
                    };
                    if let Some(d) = self.dest.as_mut() {
                        d.phase = TravelPhase::Horizontal;
                    }
                    self.set_action(horizontal, false);
                }
            }
            TravelPhase::Horizontal => {
                let done = (self.action == Action::WalkLeft && tx >= self.position.x)
                    || (self.action == Action::WalkRight && tx <= self.position.x);
                if done {
                    if let Some(d) = self.dest.take() {
                        if let Some(arrive) = d.on_arrive {
                            arrive(self, now_ms);
                        }
                    }
                }
            }
        }
    }

    /// Free-roam steering: turn before walking off the lawn, and turn
    /// spontaneously every few seconds.  Destination-bound travel is
    /// never steered.
    fn steer_free_roam(&mut self, now_ms: u64, rng: &mut impl RandomSource) {
        if !(self.free_roam && self.dest.is_none() && self.action.is_walking()) {
            return;
        }
        for _ in 0..8 {
            let depth = self.position.y - self.config.y_min;
            let (dx, dy) = self.velocity;
            let nx = self.position.x + dx;
            let ny = self.position.y + dy;
            let blocked = nx + depth > self.config.walk_x_max
                || nx - depth < self.config.walk_x_min
                || ny > self.config.y_max
                || ny < self.config.y_min;
            if !blocked {
                break;
            }
            self.change_walk(now_ms, rng);
        }
        if self.walk_change_ms <= now_ms {
            self.change_walk(now_ms, rng);
        }
    }

    /// Picks a walk direction different from the current one.
    fn change_walk(&mut self, now_ms: u64, rng: &mut impl RandomSource) {
        let current = Action::WALKS
            .iter()
            .position(|&w| w == self.action)
            .unwrap_or(0);
        let next = Action::WALKS[(current + 1 + rng.below(3) as usize) % Action::WALKS.len()];
        self.set_action(next, false);
        self.walk_change_ms = now_ms
            + self.config.walk_change_min_ms
            + u64::from(rng.below(self.config.walk_change_span_ms));
    }

    /// A running pet that reaches the run bound wraps to the far side
    /// instead of bouncing, so it streaks across the screen.
    fn wrap_run(&mut self) {
        if self.action != Action::Run {
            return;
        }
        let depth = self.position.y - self.config.y_min;
        let (dx, _) = self.velocity;
        if !self.facing_left && self.position.x + dx > self.config.run_x_max - depth {
            self.position.x = self.config.run_x_min;
        } else if self.facing_left && self.position.x + dx < self.config.run_x_min + depth {
            self.position.x = self.config.run_x_max;
        }
    }

    fn advance_hunger(&mut self, now_ms: u64) {
        if now_ms <= self.hunger_next_ms || self.busy {
            return;
        }
        self.hunger_next_ms = now_ms + self.config.hunger_interval_ms;
        match self.hunger.advance(&self.config) {
            Some(HungerStage::Peckish) => {
                self.mood = Mood::Food;
                self.note = Mood::Food;
            }
            Some(HungerStage::Grumpy) => {
                self.mood = Mood::Grumpy;
                self.note = Mood::Food;
            }
            Some(HungerStage::Ravenous) => {
                self.mood = Mood::Mad;
                self.distress();
            }
            None => {}
        }
    }

    fn advance_waste(&mut self, now_ms: u64) {
        if now_ms <= self.waste_next_ms || self.action == Action::Sleep || self.busy {
            return;
        }
        self.waste_next_ms = now_ms + self.config.waste_interval_ms;
        if self.waste.is_full() {
            self.busy = true;
            self.mood = Mood::Mad;
            self.note = Mood::Waste;
            self.distress();
        } else {
            let offset = if self.facing_left { 128 + 16 } else { -16 };
            // dropped behind the pet, one sprite row down
            let _ = self.waste.push(Position {
                x: self.position.x + offset,
                y: self.position.y + 112,
            });
        }
    }

    /// Sends the pet to the resting spot to sit in protest.  Once
    /// there it freezes in the distress pose and shows the current
    /// note until [`release`](Self::release)d.
    fn distress(&mut self) {
        let (cx, cy) = (self.config.center_x, self.config.center_y);
        self.go_to(
            cx,
            cy,
            Some(Box::new(|pet: &mut Pet, now| {
                pet.free_roam = false;
                pet.set_action(Action::SitFacingRight, false);
                pet.distressed = true;
                let hold = pet.config.distress_note_ms;
                pet.notify(now, hold);
            })),
        );
    }

    /// Ambient re-decision: every spell the pet rolls a new pastime
    /// based on what it is doing now.
    fn shuffle(&mut self, now_ms: u64, rng: &mut impl RandomSource) {
        let pick = rng.below(3);
        let mut spell = self.config.shuffle_base_ms;

        if self.action.is_walking() {
            match pick {
                1 => self.set_action(Action::Run, false),
                2 => {
                    spell = self.config.sit_spell_ms;
                    self.settle_at_center();
                }
                _ => {}
            }
        } else if self.action == Action::SitFacingRight {
            match pick {
                1 => {
                    spell = self.config.sleep_spell_ms;
                    self.set_action(Action::Sleep, false);
                }
                2 => self.set_action(Action::WalkRight, false),
                _ => {}
            }
        } else if self.action == Action::Sleep {
            match pick {
                1 => self.set_action(Action::SitFacingRight, false),
                2 => self.set_action(Action::Run, false),
                _ => {}
            }
        } else if self.action == Action::Run {
            spell = self.config.sit_spell_ms;
            self.settle_at_center();
        }

        self.shuffle_next_ms = now_ms + spell + u64::from(rng.below(spell as u32));
    }

    /// Walks to the resting spot and sits down; needs pause during
    /// the trip.
    fn settle_at_center(&mut self) {
        self.busy = true;
        let (cx, cy) = (self.config.center_x, self.config.center_y);
        self.go_to(
            cx,
            cy,
            Some(Box::new(|pet: &mut Pet, _now| {
                pet.sit();
                pet.busy = false;
            })),
        );
    }

    fn notify(&mut self, now_ms: u64, duration_ms: u64) {
        self.note_until_ms = now_ms + duration_ms;
    }

    fn draw(&self, now_ms: u64, render: &mut impl RenderPort) {
        let frame = RenderFrame {
            position: self.position,
            action: self.action,
            frame_index: self.frame_index(),
            mirror: self.should_mirror(),
            mood: self.mood,
            note: (self.note_until_ms > now_ms).then_some(self.note),
            waste: &self.waste,
        };
        render.draw(&frame);
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

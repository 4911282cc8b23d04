//! Action catalogue and per-action animation profiles.
//!
//! Every action maps to a row in the sprite sheet.  The profile table
//! drives movement and animation pacing; classification helpers
//! replace magic ordinal comparisons so adding an action cannot
//! silently change movement behavior.

/// What the pet is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    WalkDown,
    WalkRight,
    WalkUp,
    WalkLeft,
    /// One-shot sitting-down animation; transitions to
    /// [`SitFacingRight`](Self::SitFacingRight) when its cycle completes.
    SitTransient,
    SitFacingRight,
    Sleep,
    Run,
}

/// Movement and animation parameters for one action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionProfile {
    /// Per-step displacement.  For [`Action::Run`] this is the
    /// magnitude; the sign follows the pet's facing.
    pub velocity: (i32, i32),
    /// Frames in the animation cycle.
    pub frame_count: u8,
    /// Time between animation steps.
    pub step_ms: u64,
    /// Whether the cycle runs once and then hands control back.
    pub one_shot: bool,
}

/// Frame index rendered while the pet is distressed.  The sit sprite
/// row carries four frames: the two-frame idle cycle plus a yawn and
/// the hunched distress pose.
pub const DISTRESS_FRAME: u8 = 3;

const WALK_STEP_MS: u64 = 150;
const WALK_SPEED: i32 = 10;
const RUN_SPEED: i32 = 30;

impl Action {
    pub const WALKS: [Self; 4] = [Self::WalkDown, Self::WalkRight, Self::WalkUp, Self::WalkLeft];

    /// True for the four directional walk actions.
    pub fn is_walking(self) -> bool {
        matches!(
            self,
            Self::WalkDown | Self::WalkRight | Self::WalkUp | Self::WalkLeft
        )
    }

    /// True when the pet stays put (sitting or sleeping).
    pub fn is_stationary(self) -> bool {
        matches!(self, Self::SitTransient | Self::SitFacingRight | Self::Sleep)
    }

    pub fn profile(self) -> ActionProfile {
        match self {
            Self::WalkDown => ActionProfile {
                velocity: (0, WALK_SPEED),
                frame_count: 4,
                step_ms: WALK_STEP_MS,
                one_shot: false,
            },
            Self::WalkRight => ActionProfile {
                velocity: (WALK_SPEED, 0),
                frame_count: 4,
                step_ms: WALK_STEP_MS,
                one_shot: false,
            },
            Self::WalkUp => ActionProfile {
                velocity: (0, -WALK_SPEED),
                frame_count: 4,
                step_ms: WALK_STEP_MS,
                one_shot: false,
            },
            Self::WalkLeft => ActionProfile {
                velocity: (-WALK_SPEED, 0),
                frame_count: 4,
                step_ms: WALK_STEP_MS,
                one_shot: false,
            },
            Self::SitTransient => ActionProfile {
                velocity: (0, 0),
                frame_count: 4,
                step_ms: WALK_STEP_MS,
                one_shot: true,
            },
            Self::SitFacingRight => ActionProfile {
                velocity: (0, 0),
                frame_count: 2,
                step_ms: 500,
                one_shot: false,
            },
            Self::Sleep => ActionProfile {
                velocity: (0, 0),
                frame_count: 2,
                step_ms: 1_000,
                one_shot: false,
            },
            Self::Run => ActionProfile {
                velocity: (RUN_SPEED, 0),
                frame_count: 3,
                step_ms: WALK_STEP_MS,
                one_shot: false,
            },
        }
    }
}

//! Long-horizon behavior scenarios driven through the service.
//!
//! These tests warp time by ticking with large timestamps instead of
//! sleeping.  The service is deliberately not `start()`ed: starting
//! arms the ambient pastime shuffle, whose RNG would make the long
//! scenarios nondeterministic.  Everything here exercises the needs
//! meters, the protest flow and the care commands.

use crate::mock_hw::{MockHardware, RecordingSink};
use pixelpup::app::commands::PetCommand;
use pixelpup::app::events::AppEvent;
use pixelpup::app::service::PetService;
use pixelpup::config::{PetConfig, WASTE_CAPACITY};
use pixelpup::net::NullTransport;
use pixelpup::pet::{Action, DISTRESS_FRAME, Mood};

fn new_service() -> PetService {
    PetService::new(PetConfig::default(), 0, 99, NullTransport).unwrap()
}

/// Ticks at the walk cadence until the pet finishes its trip to the
/// resting spot and sits down in protest.
fn walk_into_distress(svc: &mut PetService, hw: &mut MockHardware, sink: &mut RecordingSink, t: &mut u64) {
    let mut guard = 0;
    while !svc.pet().is_distressed() {
        *t += 150;
        svc.tick(*t, hw, sink);
        guard += 1;
        assert!(guard < 100, "pet never reached the resting spot");
    }
}

#[test]
fn starving_the_pet_ends_in_protest_and_feeding_releases_it() {
    let cfg = PetConfig::default();
    let mut svc = new_service();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    // one hunger advance per warped tick
    let mut t = 0;
    while svc.pet().hunger_level() < cfg.hunger_severe_level {
        t += cfg.hunger_interval_ms + 1;
        svc.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(svc.pet().mood(), Mood::Mad);
    assert!(svc.pet().destination().is_some());

    // months of pet time passed: some waste piled up along the way,
    // but not enough to overflow the pool
    let dropped = sink.count(|e| matches!(e, AppEvent::WasteDropped { .. }));
    assert!(dropped >= 1 && dropped < WASTE_CAPACITY);

    walk_into_distress(&mut svc, &mut hw, &mut sink, &mut t);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::DistressEntered)), 1);

    // frozen in the protest pose
    t += 150;
    svc.tick(t, &mut hw, &mut sink);
    let frame = hw.last_frame().unwrap();
    assert_eq!(frame.action, Action::SitFacingRight);
    assert_eq!(frame.frame_index, DISTRESS_FRAME);
    let held = svc.pet().position();
    for _ in 0..10 {
        t += 150;
        svc.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(svc.pet().position(), held);

    // care: feed, then release
    svc.handle_command(PetCommand::Feed, t, &mut sink);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::Fed { was_hungry: true })),
        1
    );
    assert_eq!(svc.pet().hunger_level(), 0);

    svc.handle_command(PetCommand::Release, t, &mut sink);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Released)), 1);
    assert!(!svc.pet().is_distressed());

    let x0 = svc.pet().position().x;
    t += 150;
    svc.tick(t, &mut hw, &mut sink);
    assert_ne!(svc.pet().position().x, x0);

    svc.shutdown();
}

#[test]
fn waste_overflow_triggers_protest_and_scooping_clears_it() {
    let cfg = PetConfig::default();
    let mut svc = new_service();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    let mut t = 0;
    for _ in 0..WASTE_CAPACITY {
        t += cfg.waste_interval_ms + 1;
        svc.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(svc.pet().waste_markers().len(), WASTE_CAPACITY);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::WasteDropped { .. })),
        WASTE_CAPACITY
    );

    // the pool is full; the next interval tips the pet into protest
    t += cfg.waste_interval_ms + 1;
    svc.tick(t, &mut hw, &mut sink);
    assert_eq!(svc.pet().mood(), Mood::Mad);
    assert!(svc.pet().is_busy());

    walk_into_distress(&mut svc, &mut hw, &mut sink, &mut t);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::DistressEntered)), 1);

    svc.handle_command(PetCommand::Scoop, t, &mut sink);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::Scooped { count: WASTE_CAPACITY })),
        1
    );
    assert!(svc.pet().waste_markers().is_empty());

    svc.handle_command(PetCommand::Release, t, &mut sink);
    let x0 = svc.pet().position().x;
    t += 150;
    svc.tick(t, &mut hw, &mut sink);
    assert_ne!(svc.pet().position().x, x0);

    svc.shutdown();
}

#[test]
fn feeding_a_full_pet_is_snubbed() {
    let mut svc = new_service();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    svc.start(0, &mut sink);

    svc.handle_command(PetCommand::Feed, 0, &mut sink);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::Fed { was_hungry: false })),
        1
    );

    svc.tick(150, &mut hw, &mut sink);
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::MoodChanged {
                to: Mood::Grumpy,
                ..
            }
        )),
        1
    );
    // the feed note is still up
    assert!(hw.last_frame().unwrap().note.is_some());

    svc.shutdown();
}

#[test]
fn note_bubble_fades_after_feeding() {
    let cfg = PetConfig::default();
    let mut svc = new_service();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    svc.handle_command(PetCommand::Feed, 0, &mut sink);

    svc.tick(150, &mut hw, &mut sink);
    assert!(hw.last_frame().unwrap().note.is_some());

    svc.tick(cfg.feed_note_ms + 500, &mut hw, &mut sink);
    assert!(hw.last_frame().unwrap().note.is_none());

    svc.shutdown();
}

#[test]
fn forced_sleep_facing_left_renders_mirrored() {
    let mut svc = new_service();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    svc.handle_command(PetCommand::ForceAction(Action::WalkLeft), 0, &mut sink);
    svc.handle_command(PetCommand::ForceAction(Action::Sleep), 0, &mut sink);
    assert!(svc.pet().is_busy());

    // sleep frames advance once a second
    svc.tick(1_000, &mut hw, &mut sink);
    let frame = hw.last_frame().unwrap();
    assert_eq!(frame.action, Action::Sleep);
    assert!(frame.mirror);

    svc.shutdown();
}

#[test]
fn forced_run_brightens_the_mood() {
    let mut svc = new_service();
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();

    svc.handle_command(PetCommand::ForceAction(Action::Run), 0, &mut sink);
    assert_eq!(svc.pet().mood(), Mood::Heart);

    svc.tick(150, &mut hw, &mut sink);
    assert_eq!(
        sink.count(|e| matches!(
            e,
            AppEvent::MoodChanged {
                to: Mood::Heart,
                ..
            }
        )),
        1
    );

    svc.shutdown();
}

//! End-to-end lifecycle of highlights: registry, timers, fading and the
//! overlay, all driven by a manual clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use paintflash_core::{
    Clock, HighlightRegistry, ManualClock, Overlay, RegistryConfig, Snapshot,
};
use paintflash_protocol::{ColorClass, Rect, RenderCommand};

fn setup() -> (HighlightRegistry, ManualClock) {
    let clock = ManualClock::new();
    let registry = HighlightRegistry::with_clock(RegistryConfig::default(), clock.clone());
    (registry, clock)
}

fn rect() -> Rect {
    Rect::new(10.0, 20.0, 100.0, 40.0)
}

/// Subscribe and record every delivered snapshot together with the clock
/// reading at delivery.
fn record(
    registry: &HighlightRegistry,
    clock: &ManualClock,
) -> (Rc<RefCell<Vec<(Duration, Snapshot)>>>, paintflash_core::Subscription) {
    let log: Rc<RefCell<Vec<(Duration, Snapshot)>>> = Rc::default();
    let start = clock.now();
    let (sink, clock) = (Rc::clone(&log), clock.clone());
    let sub = registry.subscribe(move |snapshot| {
        sink.borrow_mut()
            .push((clock.now() - start, snapshot.clone()));
    });
    (log, sub)
}

#[test]
fn concrete_scenario_two_adds_then_expiry() {
    let (registry, clock) = setup();
    registry.add("r1", rect(), ColorClass::Warn);
    registry.add("r2", rect(), ColorClass::Error);
    assert_eq!(registry.snapshot().ids(), ["r1", "r2"]);

    clock.advance_ms(751);
    registry.tick();
    assert!(registry.snapshot().is_empty());
}

#[test]
fn bounded_lifetime_across_frames() {
    let (registry, clock) = setup();
    let (log, _sub) = record(&registry, &clock);

    registry.add("a", rect(), ColorClass::Ok);
    // Simulate a 16ms frame loop; a second highlight keeps snapshots coming.
    for frame in 1..=80u64 {
        clock.advance_ms(16);
        if frame == 20 {
            registry.add("b", rect(), ColorClass::Ok);
        }
        registry.tick();
    }

    let log = log.borrow();
    let added_b_at = Duration::from_millis(20 * 16);
    let window = Duration::from_millis(750);
    let frame = Duration::from_millis(16);
    // The first entry is the empty snapshot delivered on subscribe.
    for (at, snapshot) in log.iter().skip(1) {
        if *at < window {
            assert!(snapshot.get("a").is_some(), "a missing at {at:?}");
        }
        if *at >= window + frame {
            assert!(snapshot.get("a").is_none(), "a still present at {at:?}");
        }
        if *at >= added_b_at && *at < added_b_at + window {
            assert!(snapshot.get("b").is_some(), "b missing at {at:?}");
        }
        if *at >= added_b_at + window + frame {
            assert!(snapshot.get("b").is_none(), "b still present at {at:?}");
        }
    }
    assert!(registry.is_empty());
}

#[test]
fn fade_is_monotonic_over_the_window() {
    let (registry, clock) = setup();
    registry.add("a", rect(), ColorClass::Ok);
    let snapshot = registry.snapshot();
    let Some(highlight) = snapshot.get("a") else {
        unreachable!("a was just added");
    };

    let mut previous = highlight.fade_progress(clock.now());
    assert!((previous - 1.0).abs() < f32::EPSILON);
    for _ in 0..75 {
        clock.advance_ms(10);
        let progress = highlight.fade_progress(clock.now());
        assert!(progress <= previous);
        previous = progress;
    }
    assert_eq!(previous, 0.0);
}

#[test]
fn later_highlights_paint_on_top() {
    let (registry, clock) = setup();
    let overlay = Overlay::mount(&registry);
    for (id, class) in [("A", ColorClass::Ok), ("B", ColorClass::Warn), ("C", ColorClass::Error)] {
        registry.add_labeled(id, rect(), class, id);
    }

    let painted: Vec<String> = overlay
        .render(clock.now())
        .into_iter()
        .filter_map(|cmd| match cmd {
            RenderCommand::DrawRect { label, .. } => label.map(|l| l.to_string()),
            _ => None,
        })
        .collect();
    assert_eq!(painted, ["A", "B", "C"]);
}

#[test]
fn late_subscriber_catches_up() {
    let (registry, clock) = setup();
    registry.add("a", rect(), ColorClass::Ok);
    registry.add("b", rect(), ColorClass::Warn);

    let (log, _sub) = record(&registry, &clock);
    let log = log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].1.ids(), ["a", "b"]);
}

#[test]
fn late_subscriber_never_sees_expired_entries() {
    let (registry, clock) = setup();
    registry.add("a", rect(), ColorClass::Ok);
    clock.advance_ms(800);

    let (log, _sub) = record(&registry, &clock);
    assert!(log.borrow().iter().all(|(_, s)| s.is_empty()));
}

#[test]
fn pruning_on_add_drops_stale_entries_before_their_timer() {
    let (registry, clock) = setup();
    registry.add("A", rect(), ColorClass::Ok);
    clock.advance_ms(800);
    // No tick: A's timer has not fired.
    registry.add("B", rect(), ColorClass::Ok);

    assert_eq!(registry.snapshot().ids(), ["B"]);
    // A's timer was cancelled along with the record.
    assert_eq!(registry.pending_timers(), 1);
    assert!(!registry.tick());
    assert_eq!(registry.snapshot().ids(), ["B"]);
}

#[test]
fn clear_always_notifies() {
    let (registry, clock) = setup();
    let (log, _sub) = record(&registry, &clock);

    registry.clear();
    registry.add("a", rect(), ColorClass::Ok);
    registry.clear();

    let log = log.borrow();
    let lengths: Vec<usize> = log.iter().map(|(_, s)| s.len()).collect();
    assert_eq!(lengths, [0, 0, 1, 0]);
    assert_eq!(registry.pending_timers(), 0);
}

#[test]
fn every_listener_sees_the_same_snapshot() {
    let (registry, clock) = setup();
    let (first, _a) = record(&registry, &clock);
    let (second, _b) = record(&registry, &clock);

    registry.add("a", rect(), ColorClass::Ok);

    let (first, second) = (first.borrow(), second.borrow());
    let (Some((_, x)), Some((_, y))) = (first.last(), second.last()) else {
        unreachable!("both listeners were notified");
    };
    assert!(x.ptr_eq(y));
    assert!(x.ptr_eq(&registry.snapshot()));
}

#[test]
fn unsubscribe_twice_is_harmless() {
    let (registry, clock) = setup();
    let (log, mut sub) = record(&registry, &clock);
    sub.unsubscribe();
    sub.unsubscribe();
    drop(sub);

    registry.add("a", rect(), ColorClass::Ok);
    assert_eq!(log.borrow().len(), 1);
    assert_eq!(registry.listener_count(), 0);
}

#[test]
fn expired_highlights_leave_in_one_notification() {
    let (registry, clock) = setup();
    let (log, _sub) = record(&registry, &clock);
    registry.add("a", rect(), ColorClass::Ok);
    clock.advance_ms(5);
    registry.add("b", rect(), ColorClass::Ok);
    clock.advance_ms(5);
    registry.add("c", rect(), ColorClass::Ok);
    let before = log.borrow().len();

    clock.advance_ms(1000);
    assert!(registry.tick());

    let log = log.borrow();
    assert_eq!(log.len(), before + 1);
    assert!(log[before].1.is_empty());
}

#[test]
fn partial_expiry_keeps_younger_highlights_in_order() {
    let (registry, clock) = setup();
    let (log, _sub) = record(&registry, &clock);
    registry.add("a", rect(), ColorClass::Ok);
    clock.advance_ms(5);
    registry.add("b", rect(), ColorClass::Ok);
    clock.advance_ms(400);
    registry.add("c", rect(), ColorClass::Ok);

    clock.advance_ms(350);
    assert!(registry.tick());
    let log = log.borrow();
    let (_, last) = log.last().expect("tick publishes");
    assert_eq!(last.ids(), ["c"]);
}

#[test]
fn next_deadline_tracks_oldest_highlight() {
    let (registry, clock) = setup();
    assert_eq!(registry.next_deadline(), None);
    let start = clock.now();
    registry.add("a", rect(), ColorClass::Ok);
    clock.advance_ms(100);
    registry.add("b", rect(), ColorClass::Ok);
    assert_eq!(
        registry.next_deadline(),
        Some(start + Duration::from_millis(750))
    );
}

#[test]
fn custom_display_duration() {
    let clock = ManualClock::new();
    let registry = HighlightRegistry::with_clock(
        RegistryConfig {
            display_duration: Duration::from_millis(200),
            ..RegistryConfig::default()
        },
        clock.clone(),
    );
    registry.add("a", rect(), ColorClass::Ok);
    clock.advance_ms(199);
    registry.tick();
    assert_eq!(registry.len(), 1);
    clock.advance_ms(1);
    registry.tick();
    assert!(registry.is_empty());
}

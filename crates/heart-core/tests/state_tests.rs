use glam::Vec2;
use heart_core::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

fn reading(size: f32, is_fist: bool) -> HandReading {
    HandReading {
        center: Vec2::new(size, size),
        size,
        is_fist,
        is_pinching: false,
        gesture: if is_fist { Gesture::Fist } else { Gesture::Open },
    }
}

#[test]
fn starts_empty() {
    let state = SharedGestureState::new();
    let (pair, writes) = state.snapshot();
    assert!(pair.is_empty());
    assert_eq!(writes, 0);
}

#[test]
fn single_slot_write_leaves_other_untouched() {
    let state = SharedGestureState::new();
    state.write(HandSide::Left, Some(reading(0.1, false)));
    state.write(HandSide::Right, Some(reading(0.2, true)));
    state.write(HandSide::Left, None);
    let (pair, writes) = state.snapshot();
    assert!(pair.left.is_none());
    assert!(pair.right.unwrap().is_fist);
    assert_eq!(writes, 3);
}

#[test]
fn clones_share_one_cell() {
    let a = SharedGestureState::new();
    let b = a.clone();
    a.publish(HandPair {
        left: Some(reading(0.1, false)),
        right: None,
    });
    assert!(b.read().left.is_some());
}

#[test]
fn concurrent_reads_never_see_torn_pairs() {
    // Writer alternates between two whole pairs; a reader must only ever
    // observe one of them (or the empty start).
    let state = SharedGestureState::new();
    let a = HandPair {
        left: Some(reading(0.1, false)),
        right: Some(reading(0.1, false)),
    };
    let b = HandPair {
        left: Some(reading(0.2, true)),
        right: Some(reading(0.2, true)),
    };
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let state = state.clone();
        let done = done.clone();
        thread::spawn(move || {
            for i in 0..20_000 {
                state.publish(if i % 2 == 0 { a } else { b });
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let mut observed = 0;
    while !done.load(Ordering::SeqCst) || observed == 0 {
        let pair = state.read();
        assert!(pair == a || pair == b || pair.is_empty(), "torn read: {pair:?}");
        observed += 1;
    }
    writer.join().unwrap();
    assert_eq!(state.snapshot().1, 20_000);
}

#[test]
fn sequential_slot_writes_are_seen_in_order() {
    // Writer stamps generation g into left, then right. A reader holding the
    // post-write left must see right at g or g - 1, never older, and
    // generations never go backwards between reads.
    const ROUNDS: u32 = 10_000;
    let stamp = |g: u32| Some(reading(g as f32 + 1.0, false));
    let generation = |r: Option<HandReading>| r.map_or(-1, |r| r.size as i64 - 1);

    let state = SharedGestureState::new();
    let done = Arc::new(AtomicBool::new(false));
    let writer = {
        let state = state.clone();
        let done = done.clone();
        thread::spawn(move || {
            for g in 0..ROUNDS {
                state.write(HandSide::Left, stamp(g));
                state.write(HandSide::Right, stamp(g));
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let (mut last_left, mut last_right) = (-1i64, -1i64);
    let mut reads = 0;
    while !done.load(Ordering::SeqCst) || reads == 0 {
        let pair = state.read();
        let (left, right) = (generation(pair.left), generation(pair.right));
        assert!(right == left || right == left - 1, "left {left} right {right}");
        assert!(left >= last_left && right >= last_right);
        last_left = left;
        last_right = right;
        reads += 1;
    }
    writer.join().unwrap();

    let (pair, writes) = state.snapshot();
    assert_eq!(generation(pair.left), ROUNDS as i64 - 1);
    assert_eq!(generation(pair.right), ROUNDS as i64 - 1);
    assert_eq!(writes, 2 * ROUNDS as u64);
}

#[test]
fn scene_camera_looks_at_origin() {
    let cam = Camera::scene(16.0 / 9.0);
    let view = cam.view_matrix();
    let origin = view.transform_point3(glam::Vec3::ZERO);
    assert!(origin.x.abs() < 1e-5 && origin.y.abs() < 1e-5);
    assert!(origin.z < 0.0);
    let eye = view.transform_point3(cam.eye);
    assert!(eye.length() < 1e-4);
}

#[test]
fn scene_camera_tolerates_zero_aspect() {
    let cam = Camera::scene(0.0);
    assert!(cam.aspect > 0.0);
    assert!(cam.projection_matrix().is_finite());
}

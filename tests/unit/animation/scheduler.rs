use std::cell::Cell;
use std::rc::Rc;

use super::*;

const MS: Duration = Duration::from_millis(1);

fn coords(cs: &[(usize, usize)]) -> Vec<Coord> {
    cs.iter().map(|&(r, c)| Coord::new(r, c)).collect()
}

fn scheduler(target: usize) -> (AnimationScheduler, Rc<Cell<u32>>) {
    let mut s = AnimationScheduler::with_pacing(target, FramePacer::new(16 * MS));
    let fired = Rc::new(Cell::new(0));
    let counter = fired.clone();
    s.set_on_complete(move || counter.set(counter.get() + 1));
    (s, fired)
}

fn l_shape() -> AnimationSequence {
    AnimationSequence::new(
        coords(&[(0, 0), (0, 1), (1, 1)]),
        coords(&[(0, 0), (0, 1), (1, 1)]),
    )
}

#[test]
fn three_tick_scenario() {
    let (mut s, fired) = scheduler(3);
    s.assign(l_shape());
    assert_eq!(s.step(), 2);
    assert_eq!(s.phase(), Phase::Exploring);

    assert_eq!(s.tick(), FrameOutcome::Advanced);
    assert_eq!(s.cursors(), RevealCursors { visited: 2, path: 0 });

    assert_eq!(s.tick(), FrameOutcome::Advanced);
    assert_eq!(s.cursors().visited, 3);
    assert!(s.cursors().path > 0);
    assert_eq!(s.phase(), Phase::PathDrawing);
    assert_eq!(fired.get(), 0);

    assert_eq!(s.tick(), FrameOutcome::Completed);
    assert_eq!(s.cursors(), RevealCursors { visited: 3, path: 3 });
    assert_eq!(s.phase(), Phase::Complete);
    assert_eq!(fired.get(), 1);

    assert_eq!(s.tick(), FrameOutcome::Ignored);
    assert!(!s.is_running());
    assert_eq!(fired.get(), 1);
}

#[test]
fn step_size_scales_with_sequence_length() {
    let (mut s, _) = scheduler(600);
    let visited = vec![Coord::new(0, 0); 5000];
    let path = vec![Coord::new(0, 0); 1000];
    s.assign(AnimationSequence::new(visited, path));
    assert_eq!(s.step(), 10);

    s.assign(l_shape());
    assert_eq!(s.step(), 1);
}

#[test]
fn cursors_are_monotonic_and_path_waits_for_exploration() {
    let (mut s, fired) = scheduler(7);
    let visited = (0..50).map(|i| Coord::new(i / 10, i % 10)).collect();
    let path = (0..13).map(|i| Coord::new(0, i)).collect();
    s.assign(AnimationSequence::new(visited, path));

    let mut prev = s.cursors();
    while s.is_running() {
        s.tick();
        let now = s.cursors();
        assert!(now.visited >= prev.visited);
        assert!(now.path >= prev.path);
        if now.visited < 50 {
            assert_eq!(now.path, 0);
        }
        prev = now;
    }
    assert_eq!(prev, RevealCursors { visited: 50, path: 13 });
    assert_eq!(fired.get(), 1);
}

#[test]
fn reassign_mid_playback_resets_and_stales_old_ticket() {
    let (mut s, fired) = scheduler(3);
    let old = s.assign(l_shape());
    s.tick();
    assert_eq!(s.cursors().visited, 2);

    let new = s.assign(AnimationSequence::default());
    assert_ne!(old, new);
    assert_eq!(s.cursors(), RevealCursors::default());
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.on_frame(old, 1000 * MS), FrameOutcome::Ignored);
    assert_eq!(s.on_frame(new, 2000 * MS), FrameOutcome::Ignored);
    assert_eq!(fired.get(), 0);
}

#[test]
fn reset_halts_playback() {
    let (mut s, fired) = scheduler(3);
    let ticket = s.assign(l_shape());
    s.reset();
    assert!(s.sequence().is_empty());
    assert_eq!(s.on_frame(ticket, Duration::ZERO), FrameOutcome::Ignored);
    assert_eq!(s.finish(), 0);
    assert_eq!(fired.get(), 0);
}

#[test]
fn on_frame_is_paced() {
    let (mut s, fired) = scheduler(3);
    let t = s.assign(l_shape());
    assert_eq!(s.on_frame(t, 0 * MS), FrameOutcome::Advanced);
    assert_eq!(s.on_frame(t, 10 * MS), FrameOutcome::Throttled);
    assert_eq!(s.cursors().visited, 2);
    assert_eq!(s.on_frame(t, 16 * MS), FrameOutcome::Advanced);
    assert_eq!(s.on_frame(t, 32 * MS), FrameOutcome::Completed);
    assert!(FrameOutcome::Completed.needs_redraw());
    assert!(!FrameOutcome::Throttled.needs_redraw());
    assert_eq!(fired.get(), 1);
}

#[test]
fn pause_holds_cursors_until_resume() {
    let (mut s, _) = scheduler(3);
    s.assign(l_shape());
    s.tick();
    s.pause();
    assert!(!s.is_running());
    assert_eq!(s.tick(), FrameOutcome::Ignored);
    assert_eq!(s.cursors().visited, 2);
    s.resume();
    assert!(s.is_running());
    assert_eq!(s.phase(), Phase::Exploring);
    assert_eq!(s.cursors().visited, 2);
}

#[test]
fn assignment_while_paused_waits_for_resume() {
    let (mut s, fired) = scheduler(3);
    s.pause();
    s.assign(l_shape());
    assert_eq!(s.phase(), Phase::Idle);
    s.resume();
    assert_eq!(s.phase(), Phase::Exploring);
    assert_eq!(s.finish(), 3);
    assert_eq!(fired.get(), 1);
}

#[test]
fn path_only_sequence_skips_exploration() {
    let (mut s, fired) = scheduler(600);
    s.assign(AnimationSequence::new(Vec::new(), coords(&[(0, 0), (0, 1)])));
    assert_eq!(s.phase(), Phase::PathDrawing);
    assert_eq!(s.finish(), 2);
    assert_eq!(fired.get(), 1);
}

#[test]
fn visited_only_sequence_completes_with_exploration() {
    let (mut s, fired) = scheduler(600);
    s.assign(AnimationSequence::new(coords(&[(0, 0)]), Vec::new()));
    assert_eq!(s.tick(), FrameOutcome::Completed);
    assert_eq!(fired.get(), 1);
}

#[test]
fn each_assignment_completes_once() {
    let (mut s, fired) = scheduler(3);
    s.assign(l_shape());
    s.finish();
    s.assign(l_shape());
    s.finish();
    assert_eq!(fired.get(), 2);
}

#[test]
fn reveal_view_clamps_and_slices() {
    let v = coords(&[(0, 0), (0, 1)]);
    let p = coords(&[(0, 0)]);
    let view = RevealView::new(&v, &p, RevealCursors { visited: 9, path: 9 });
    assert_eq!(view.revealed_visited().len(), 2);
    assert_eq!(view.revealed_path().len(), 1);
    assert!(view.exploration_done());

    let view = RevealView::new(&v, &p, RevealCursors { visited: 1, path: 0 });
    assert!(!view.exploration_done());
    assert!(RevealView::none().revealed_path().is_empty());
}

#[test]
fn sequence_parses_coordinate_pairs() {
    let seq: AnimationSequence =
        serde_json::from_str(r#"{"visited": [[0,0],[0,1]], "path": [[0,1]]}"#).unwrap();
    assert_eq!(seq.visited, coords(&[(0, 0), (0, 1)]));
    assert_eq!(seq.path, coords(&[(0, 1)]));
}

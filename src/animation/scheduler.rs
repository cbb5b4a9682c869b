//! Animation scheduler: reveals an exploration sequence, then the solution path, at a paced
//! cadence.
//!
//! The scheduler owns the reveal cursors. Everything else reads them through [`RevealView`].
//! Playback is cooperative: the host calls [`AnimationScheduler::on_frame`] from its frame
//! callback for as long as [`AnimationScheduler::is_running`] says so, passing the
//! [`FrameTicket`] it got when the current sequence started. Tickets from a previous sequence
//! are ignored, which is what stops stale callbacks after a reset.

use std::time::Duration;

use crate::animation::clock::FramePacer;
use crate::config::ViewConfig;
use crate::foundation::core::Coord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Exploring,
    PathDrawing,
    Complete,
}

/// Exploration order plus final route, as produced by the solver.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSequence {
    #[serde(default)]
    pub visited: Vec<Coord>,
    #[serde(default)]
    pub path: Vec<Coord>,
}

impl AnimationSequence {
    pub fn new(visited: Vec<Coord>, path: Vec<Coord>) -> Self {
        Self { visited, path }
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty() && self.path.is_empty()
    }

    pub fn total_len(&self) -> usize {
        self.visited.len() + self.path.len()
    }
}

/// How many entries of each sequence are revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealCursors {
    pub visited: usize,
    pub path: usize,
}

/// Read-only window onto a sequence and its cursors, consumed by the renderer.
#[derive(Clone, Copy, Debug, Default)]
pub struct RevealView<'a> {
    visited: &'a [Coord],
    path: &'a [Coord],
    cursors: RevealCursors,
}

impl<'a> RevealView<'a> {
    /// Nothing revealed.
    pub fn none() -> Self {
        Self::default()
    }

    /// Cursors are clamped to the sequence lengths.
    pub fn new(visited: &'a [Coord], path: &'a [Coord], cursors: RevealCursors) -> Self {
        Self {
            visited,
            path,
            cursors: RevealCursors {
                visited: cursors.visited.min(visited.len()),
                path: cursors.path.min(path.len()),
            },
        }
    }

    /// Both sequences fully revealed.
    pub fn complete(visited: &'a [Coord], path: &'a [Coord]) -> Self {
        Self {
            visited,
            path,
            cursors: RevealCursors {
                visited: visited.len(),
                path: path.len(),
            },
        }
    }

    pub fn cursors(&self) -> RevealCursors {
        self.cursors
    }

    pub fn revealed_visited(&self) -> &'a [Coord] {
        &self.visited[..self.cursors.visited]
    }

    pub fn revealed_path(&self) -> &'a [Coord] {
        &self.path[..self.cursors.path]
    }

    pub fn exploration_done(&self) -> bool {
        self.cursors.visited >= self.visited.len()
    }
}

/// Opaque token identifying the sequence a frame callback was scheduled for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Ticket from an older sequence, or nothing is playing.
    Ignored,
    /// Too soon after the previous step; nothing changed.
    Throttled,
    /// Cursors moved; a redraw is needed.
    Advanced,
    /// Cursors moved and the sequence just completed. No further frames are needed.
    Completed,
}

impl FrameOutcome {
    pub fn needs_redraw(self) -> bool {
        matches!(self, Self::Advanced | Self::Completed)
    }
}

pub struct AnimationScheduler {
    target_frames: usize,
    pacer: FramePacer,
    sequence: AnimationSequence,
    cursors: RevealCursors,
    step: usize,
    phase: Phase,
    paused: bool,
    generation: u64,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("phase", &self.phase)
            .field("cursors", &self.cursors)
            .field("step", &self.step)
            .field("paused", &self.paused)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl AnimationScheduler {
    pub fn new(cfg: &ViewConfig) -> Self {
        Self::with_pacing(
            cfg.target_frame_count,
            FramePacer::from_millis_f64(cfg.min_frame_interval_ms),
        )
    }

    pub fn with_pacing(target_frames: usize, pacer: FramePacer) -> Self {
        Self {
            target_frames: target_frames.max(1),
            pacer,
            sequence: AnimationSequence::default(),
            cursors: RevealCursors::default(),
            step: 1,
            phase: Phase::Idle,
            paused: false,
            generation: 0,
            on_complete: None,
        }
    }

    /// Callback invoked once each time a sequence completes.
    pub fn set_on_complete(&mut self, f: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(f));
    }

    pub fn clear_on_complete(&mut self) {
        self.on_complete = None;
    }

    /// Replace the current sequence. Cursors drop to zero and earlier tickets go stale.
    ///
    /// Playback starts immediately unless paused. A sequence with nothing in it stays idle and
    /// never reports completion.
    pub fn assign(&mut self, sequence: AnimationSequence) -> FrameTicket {
        self.generation += 1;
        self.step = (sequence.total_len() / self.target_frames).max(1);
        self.sequence = sequence;
        self.cursors = RevealCursors::default();
        self.phase = Phase::Idle;
        self.pacer.reset();
        if !self.paused {
            self.start();
        }
        tracing::debug!(
            visited = self.sequence.visited.len(),
            path = self.sequence.path.len(),
            step = self.step,
            phase = ?self.phase,
            "animation sequence assigned"
        );
        self.ticket()
    }

    /// Drop the sequence entirely and go idle.
    pub fn reset(&mut self) {
        self.assign(AnimationSequence::default());
    }

    /// Hold playback. Cursors keep their values.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Continue playback, starting an assigned-while-paused sequence if needed.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        self.pacer.reset();
        if self.phase == Phase::Idle && self.cursors == RevealCursors::default() {
            self.start();
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn cursors(&self) -> RevealCursors {
        self.cursors
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn sequence(&self) -> &AnimationSequence {
        &self.sequence
    }

    /// Ticket for the current sequence.
    pub fn ticket(&self) -> FrameTicket {
        FrameTicket(self.generation)
    }

    /// Whether the host should keep scheduling frame callbacks.
    pub fn is_running(&self) -> bool {
        !self.paused && matches!(self.phase, Phase::Exploring | Phase::PathDrawing)
    }

    pub fn reveal(&self) -> RevealView<'_> {
        RevealView::new(&self.sequence.visited, &self.sequence.path, self.cursors)
    }

    /// Frame callback entry point: paced, ticket-checked [`AnimationScheduler::tick`].
    pub fn on_frame(&mut self, ticket: FrameTicket, now: Duration) -> FrameOutcome {
        if ticket != self.ticket() || !self.is_running() {
            return FrameOutcome::Ignored;
        }
        if !self.pacer.try_step(now) {
            return FrameOutcome::Throttled;
        }
        self.tick()
    }

    /// Advance the cursors by one step, ignoring pacing.
    ///
    /// Budget left over in the step that finishes exploration flows into the path, so the path
    /// starts on that same tick.
    pub fn tick(&mut self) -> FrameOutcome {
        if !self.is_running() {
            return FrameOutcome::Ignored;
        }
        let mut budget = self.step;

        if self.phase == Phase::Exploring {
            let remaining = self.sequence.visited.len() - self.cursors.visited;
            let take = budget.min(remaining);
            self.cursors.visited += take;
            budget -= take;
            if self.cursors.visited < self.sequence.visited.len() {
                return FrameOutcome::Advanced;
            }
            self.enter(Phase::PathDrawing);
        }

        let remaining = self.sequence.path.len() - self.cursors.path;
        self.cursors.path += budget.min(remaining);
        if self.cursors.path < self.sequence.path.len() {
            return FrameOutcome::Advanced;
        }
        self.enter(Phase::Complete);
        if let Some(f) = self.on_complete.as_mut() {
            f();
        }
        FrameOutcome::Completed
    }

    /// Run every remaining step at once. Returns the number of ticks taken.
    pub fn finish(&mut self) -> usize {
        let mut ticks = 0;
        while self.is_running() {
            self.tick();
            ticks += 1;
        }
        ticks
    }

    fn start(&mut self) {
        if !self.sequence.visited.is_empty() {
            self.enter(Phase::Exploring);
        } else if !self.sequence.path.is_empty() {
            self.enter(Phase::PathDrawing);
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "animation phase");
        self.phase = phase;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scheduler.rs"]
mod tests;

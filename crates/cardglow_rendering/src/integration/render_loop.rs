//! Render Loop - one tick per display frame
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          ONE TICK                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ├── Advance time (delta clamped to >= 0)                       │
//! │  ├── Poll pending work (art loads still in flight)              │
//! │  ├── Update every effect      (time, intensity, pointer)        │
//! │  ├── Update every transform   (tilt or idle sway)               │
//! │  └── Advance every emitter    (integrate, then emit)            │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each phase runs over all targets before the next begins, so a tick is
//! observed as a whole. Targets are held weakly: a scene dropped without
//! unregistering is pruned on the next tick. Targets added through a
//! [`Registrar`] while a tick is running join at the start of the next one.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Instant;

use tracing::{debug, trace, warn};

/// Per-tick timing handed to every target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the loop started, after this tick's advance.
    pub time: f64,
    /// Seconds covered by this tick.
    pub delta: f32,
    /// Tick number, starting at 1.
    pub frame: u64,
}

/// Something the loop drives every frame.
pub trait FrameTarget {
    /// Resolves asynchronous work. Runs before any other phase.
    fn poll_pending(&mut self, _ctx: &FrameContext) {}

    /// Pushes shader uniforms.
    fn update_effect(&mut self, ctx: &FrameContext);

    /// Recomputes the card transform.
    fn update_transform(&mut self, ctx: &FrameContext);

    /// Advances particle emitters.
    fn advance_particles(&mut self, ctx: &FrameContext);
}

/// Handle returned by [`RenderLoop::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

impl TargetId {
    /// Raw value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Configuration for the render loop
#[derive(Debug, Clone, Copy)]
pub struct RenderLoopConfig {
    /// Maximum tick time before it counts as over budget (microseconds)
    pub frame_budget_us: u32,
}

impl Default for RenderLoopConfig {
    fn default() -> Self {
        Self {
            frame_budget_us: 16_666, // ~16ms for 60fps
        }
    }
}

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameResult {
    /// Tick number
    pub frame_number: u64,
    /// Elapsed seconds after the tick
    pub time: f64,
    /// Delta actually applied
    pub delta: f32,
    /// Targets that ran every phase
    pub targets_driven: u32,
    /// Targets skipped because they were borrowed elsewhere
    pub targets_skipped: u32,
    /// Targets pruned because their scene was dropped
    pub targets_pruned: u32,
    /// Total tick time (microseconds)
    pub frame_time_us: u32,
    /// Over budget warning
    pub over_budget: bool,
}

/// Statistics for the render loop
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderLoopStats {
    /// Total ticks
    pub total_frames: u64,
    /// Average tick time (microseconds)
    pub avg_frame_time_us: u32,
    /// Worst tick time (microseconds)
    pub worst_frame_time_us: u32,
    /// Ticks over budget
    pub frames_over_budget: u32,
}

type Entry = (TargetId, Weak<RefCell<dyn FrameTarget>>);

/// Registration queue shared with a [`RenderLoop`].
///
/// Usable while the loop itself is mutably borrowed (from inside a tick).
/// Queued targets are driven from the next tick on.
#[derive(Clone, Default)]
pub struct Registrar {
    next_id: Rc<Cell<u64>>,
    queued: Rc<RefCell<Vec<Entry>>>,
}

impl Registrar {
    /// Queues `target` for the next tick.
    pub fn register<T: FrameTarget + 'static>(&self, target: &Rc<RefCell<T>>) -> TargetId {
        let id = self.allocate();
        let weak = Rc::downgrade(target);
        let weak: Weak<RefCell<dyn FrameTarget>> = weak;
        self.queued.borrow_mut().push((id, weak));
        trace!(target_id = id.0, "frame target queued");
        id
    }

    fn allocate(&self) -> TargetId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        TargetId(id)
    }

    fn queued_len(&self) -> usize {
        self.queued.borrow().len()
    }

    fn contains(&self, id: TargetId) -> bool {
        self.queued.borrow().iter().any(|(entry, _)| *entry == id)
    }

    fn remove(&self, id: TargetId) -> bool {
        let mut queued = self.queued.borrow_mut();
        let before = queued.len();
        queued.retain(|(entry, _)| *entry != id);
        queued.len() != before
    }

    fn drain(&self) -> Vec<Entry> {
        std::mem::take(&mut *self.queued.borrow_mut())
    }
}

impl fmt::Debug for Registrar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registrar")
            .field("queued", &self.queued_len())
            .finish_non_exhaustive()
    }
}

/// Cooperative per-frame scheduler shared by every mounted card.
///
/// Hosts typically hold it as `Rc<RefCell<RenderLoop>>` and call
/// [`RenderLoop::tick`] from their frame callback.
pub struct RenderLoop {
    config: RenderLoopConfig,
    targets: Vec<Entry>,
    registrar: Registrar,
    time: f64,
    frame_count: u64,
    total_time_us: u64,
    stats: RenderLoopStats,
}

impl RenderLoop {
    /// Creates a new render loop
    #[must_use]
    pub fn new(config: RenderLoopConfig) -> Self {
        Self {
            config,
            targets: Vec::new(),
            registrar: Registrar::default(),
            time: 0.0,
            frame_count: 0,
            total_time_us: 0,
            stats: RenderLoopStats::default(),
        }
    }

    /// Convenience: a default loop wrapped for sharing.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Handle for registering targets without borrowing the loop.
    #[must_use]
    pub fn registrar(&self) -> Registrar {
        self.registrar.clone()
    }

    /// Adds `target` to the per-frame set.
    pub fn register<T: FrameTarget + 'static>(&mut self, target: &Rc<RefCell<T>>) -> TargetId {
        let id = self.registrar.allocate();
        let weak = Rc::downgrade(target);
        let weak: Weak<RefCell<dyn FrameTarget>> = weak;
        self.targets.push((id, weak));
        debug!(target_id = id.0, "frame target registered");
        id
    }

    /// Removes a target. Returns `false` if it was not registered.
    pub fn unregister(&mut self, id: TargetId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|(entry, _)| *entry != id);
        let removed = self.targets.len() != before || self.registrar.remove(id);
        if removed {
            debug!(target_id = id.0, "frame target unregistered");
        }
        removed
    }

    /// Returns whether `id` is still registered.
    #[must_use]
    pub fn is_registered(&self, id: TargetId) -> bool {
        self.targets.iter().any(|(entry, _)| *entry == id) || self.registrar.contains(id)
    }

    /// Number of registered targets (live, queued or not yet pruned).
    #[must_use]
    pub fn target_count(&self) -> usize {
        self.targets.len() + self.registrar.queued_len()
    }

    /// Runs one frame over every registered target.
    ///
    /// Negative or non-finite `delta` is treated as zero.
    pub fn tick(&mut self, delta: f32) -> FrameResult {
        let frame_start = Instant::now();
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };

        // === PHASE 1: Advance time ===
        self.frame_count += 1;
        self.time += f64::from(delta);
        let ctx = FrameContext {
            time: self.time,
            delta,
            frame: self.frame_count,
        };

        // === PHASE 2: Collect live targets ===
        self.targets.extend(self.registrar.drain());
        let before = self.targets.len();
        self.targets.retain(|(_, weak)| weak.strong_count() > 0);
        let targets_pruned = (before - self.targets.len()) as u32;
        if targets_pruned > 0 {
            trace!(targets_pruned, "dropped targets pruned");
        }

        let mut live = Vec::with_capacity(self.targets.len());
        let mut targets_skipped = 0u32;
        for (id, weak) in &self.targets {
            let Some(target) = weak.upgrade() else { continue };
            if target.try_borrow_mut().is_err() {
                warn!(target_id = id.0, frame = ctx.frame, "frame target busy, skipped");
                targets_skipped += 1;
                continue;
            }
            live.push(target);
        }

        // === PHASE 3: Poll → effects → transforms → emitters ===
        for target in &live {
            target.borrow_mut().poll_pending(&ctx);
        }
        for target in &live {
            target.borrow_mut().update_effect(&ctx);
        }
        for target in &live {
            target.borrow_mut().update_transform(&ctx);
        }
        for target in &live {
            target.borrow_mut().advance_particles(&ctx);
        }

        // === PHASE 4: Finalize ===
        let total_us = frame_start.elapsed().as_micros() as u32;
        self.stats.total_frames += 1;
        self.total_time_us += u64::from(total_us);
        self.stats.avg_frame_time_us = (self.total_time_us / self.stats.total_frames) as u32;
        if total_us > self.stats.worst_frame_time_us {
            self.stats.worst_frame_time_us = total_us;
        }
        let over_budget = total_us > self.config.frame_budget_us;
        if over_budget {
            self.stats.frames_over_budget += 1;
        }

        FrameResult {
            frame_number: self.frame_count,
            time: self.time,
            delta,
            targets_driven: live.len() as u32,
            targets_skipped,
            targets_pruned,
            frame_time_us: total_us,
            over_budget,
        }
    }

    /// Elapsed seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Returns the current frame count
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Returns statistics
    #[must_use]
    pub fn stats(&self) -> RenderLoopStats {
        self.stats
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new(RenderLoopConfig::default())
    }
}

impl fmt::Debug for RenderLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderLoop")
            .field("targets", &self.targets.len())
            .field("time", &self.time)
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        log: Rc<RefCell<Vec<(&'static str, u64)>>>,
        deltas: Vec<f32>,
    }

    impl FrameTarget for Recorder {
        fn poll_pending(&mut self, ctx: &FrameContext) {
            self.log.borrow_mut().push(("poll", ctx.frame));
        }
        fn update_effect(&mut self, ctx: &FrameContext) {
            self.log.borrow_mut().push(("effect", ctx.frame));
        }
        fn update_transform(&mut self, ctx: &FrameContext) {
            self.log.borrow_mut().push(("transform", ctx.frame));
        }
        fn advance_particles(&mut self, ctx: &FrameContext) {
            self.deltas.push(ctx.delta);
            self.log.borrow_mut().push(("particles", ctx.frame));
        }
    }

    #[test]
    fn test_phases_run_across_all_targets_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::new(RefCell::new(Recorder { log: Rc::clone(&log), ..Recorder::default() }));
        let b = Rc::new(RefCell::new(Recorder { log: Rc::clone(&log), ..Recorder::default() }));
        let mut render_loop = RenderLoop::default();
        render_loop.register(&a);
        render_loop.register(&b);

        let result = render_loop.tick(0.016);
        assert_eq!(result.frame_number, 1);
        assert_eq!(result.targets_driven, 2);

        let phases: Vec<_> = log.borrow().iter().map(|(phase, _)| *phase).collect();
        assert_eq!(
            phases,
            ["poll", "poll", "effect", "effect", "transform", "transform", "particles", "particles"]
        );
    }

    #[test]
    fn test_negative_and_nan_delta_clamped() {
        let target = Rc::new(RefCell::new(Recorder::default()));
        let mut render_loop = RenderLoop::default();
        render_loop.register(&target);

        render_loop.tick(-1.0);
        render_loop.tick(f32::NAN);
        render_loop.tick(0.5);

        assert_eq!(target.borrow().deltas, vec![0.0, 0.0, 0.5]);
        assert!((render_loop.time() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_unregister_and_prune() {
        let kept = Rc::new(RefCell::new(Recorder::default()));
        let dropped = Rc::new(RefCell::new(Recorder::default()));
        let mut render_loop = RenderLoop::default();
        let kept_id = render_loop.register(&kept);
        render_loop.register(&dropped);
        drop(dropped);

        let result = render_loop.tick(0.016);
        assert_eq!(result.targets_pruned, 1);
        assert_eq!(result.targets_driven, 1);

        assert!(render_loop.unregister(kept_id));
        assert!(!render_loop.unregister(kept_id));
        assert_eq!(render_loop.tick(0.016).targets_driven, 0);
        assert_eq!(kept.borrow().deltas.len(), 1);
    }

    #[test]
    fn test_registrar_queues_until_next_tick() {
        let first = Rc::new(RefCell::new(Recorder::default()));
        let late = Rc::new(RefCell::new(Recorder::default()));
        let render_loop = Rc::new(RefCell::new(RenderLoop::default()));
        render_loop.borrow_mut().register(&first);
        let registrar = render_loop.borrow().registrar();

        // The loop is mutably borrowed for the whole tick.
        let mut ticking = render_loop.borrow_mut();
        let late_id = registrar.register(&late);
        assert_eq!(ticking.target_count(), 2);
        assert!(ticking.is_registered(late_id));
        assert_eq!(ticking.tick(0.016).targets_driven, 2);
        drop(ticking);

        assert_eq!(late.borrow().deltas, vec![0.016]);
        assert!(render_loop.borrow_mut().unregister(late_id));
        assert_eq!(render_loop.borrow().target_count(), 1);
    }

    #[test]
    fn test_unregister_queued_target() {
        let target = Rc::new(RefCell::new(Recorder::default()));
        let mut render_loop = RenderLoop::default();
        let id = render_loop.registrar().register(&target);
        assert!(render_loop.unregister(id));
        assert_eq!(render_loop.tick(0.016).targets_driven, 0);
    }

    #[test]
    fn test_busy_target_skipped() {
        let target = Rc::new(RefCell::new(Recorder::default()));
        let mut render_loop = RenderLoop::default();
        render_loop.register(&target);

        let guard = target.borrow_mut();
        let result = render_loop.tick(0.016);
        drop(guard);

        assert_eq!(result.targets_skipped, 1);
        assert_eq!(result.targets_driven, 0);
        assert_eq!(render_loop.stats().total_frames, 1);
    }
}

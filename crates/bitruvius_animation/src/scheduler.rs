//! Walker scheduler
//!
//! Holds any number of independent walking figures and ticks them once per
//! frame. Each walker owns its own clock, gait and head spring, so walkers
//! never influence one another.

use crate::clock::FrameClock;
use crate::gait::{synthesize_with, GaitParameters};
use crate::spring::{HeadSpring, SpringConfig};
use bitruvius_core::{PivotOffsets, WalkPose};
use slotmap::{new_key_type, SlotMap};
use std::time::Instant;

new_key_type! {
    /// Handle to a registered walker
    pub struct WalkerId;
}

/// One walking figure and its cross-frame state
#[derive(Clone, Debug)]
pub struct Walker {
    pub gait: GaitParameters,
    pub pivot_offsets: PivotOffsets,
    /// Head bobble on/off
    pub secondary_motion: bool,
    pub spring_config: SpringConfig,
    spring: HeadSpring,
    clock: FrameClock,
    pose: WalkPose,
}

impl Walker {
    pub fn new(gait: GaitParameters) -> Self {
        Self {
            gait,
            pivot_offsets: PivotOffsets::default(),
            secondary_motion: false,
            spring_config: SpringConfig::head(),
            spring: HeadSpring::default(),
            clock: FrameClock::new(),
            pose: WalkPose::rest(),
        }
    }

    pub fn with_secondary_motion(mut self, enabled: bool) -> Self {
        self.secondary_motion = enabled;
        self
    }

    pub fn with_pivot_offsets(mut self, offsets: PivotOffsets) -> Self {
        self.pivot_offsets = offsets;
        self
    }

    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Most recent synthesized pose
    pub fn pose(&self) -> &WalkPose {
        &self.pose
    }

    pub fn spring(&self) -> HeadSpring {
        self.spring
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut FrameClock {
        &mut self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.clock.pause();
        } else {
            self.clock.resume();
        }
    }

    /// Synthesize a frame at the clock's current time
    ///
    /// A paused walker keeps its last pose and its spring.
    fn update(&mut self) -> &WalkPose {
        if self.clock.is_paused() {
            return &self.pose;
        }
        let (pose, spring) = synthesize_with(
            self.clock.now_ms(),
            &self.gait,
            self.secondary_motion,
            self.spring,
            &self.spring_config,
        );
        self.pose = pose;
        self.spring = spring;
        &self.pose
    }

    pub fn tick_at(&mut self, now: Instant) -> &WalkPose {
        self.clock.tick_at(now);
        self.update()
    }

    pub fn step(&mut self, dt_ms: f64) -> &WalkPose {
        self.clock.advance(dt_ms);
        self.update()
    }
}

impl Default for Walker {
    fn default() -> Self {
        Self::new(GaitParameters::default())
    }
}

/// Ticks every registered walker once per frame
pub struct WalkerScheduler {
    walkers: SlotMap<WalkerId, Walker>,
    last_frame: Instant,
    target_fps: u32,
    frame_count: u64,
}

impl WalkerScheduler {
    pub fn new() -> Self {
        Self {
            walkers: SlotMap::with_key(),
            last_frame: Instant::now(),
            target_fps: 60,
            frame_count: 0,
        }
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.max(1);
    }

    /// Fixed step matching the target frame rate
    pub fn frame_duration_ms(&self) -> f64 {
        1000.0 / self.target_fps as f64
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn add(&mut self, walker: Walker) -> WalkerId {
        let id = self.walkers.insert(walker);
        tracing::debug!("WalkerScheduler: added walker {:?} ({} total)", id, self.walkers.len());
        id
    }

    pub fn remove(&mut self, id: WalkerId) -> Option<Walker> {
        let walker = self.walkers.remove(id);
        if walker.is_some() {
            tracing::debug!("WalkerScheduler: removed walker {:?}", id);
        }
        walker
    }

    pub fn get(&self, id: WalkerId) -> Option<&Walker> {
        self.walkers.get(id)
    }

    pub fn get_mut(&mut self, id: WalkerId) -> Option<&mut Walker> {
        self.walkers.get_mut(id)
    }

    pub fn pose(&self, id: WalkerId) -> Option<&WalkPose> {
        self.walkers.get(id).map(Walker::pose)
    }

    pub fn set_paused(&mut self, id: WalkerId, paused: bool) -> bool {
        match self.walkers.get_mut(id) {
            Some(walker) => {
                walker.set_paused(paused);
                tracing::debug!("WalkerScheduler: walker {:?} paused={}", id, paused);
                true
            }
            None => false,
        }
    }

    pub fn pause_all(&mut self) {
        for (_, walker) in self.walkers.iter_mut() {
            walker.set_paused(true);
        }
        tracing::debug!("WalkerScheduler: paused all walkers");
    }

    pub fn resume_all(&mut self) {
        for (_, walker) in self.walkers.iter_mut() {
            walker.set_paused(false);
        }
        tracing::debug!("WalkerScheduler: resumed all walkers");
    }

    pub fn len(&self) -> usize {
        self.walkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walkers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WalkerId, &Walker)> {
        self.walkers.iter()
    }

    /// Tick all walkers against the wall clock
    ///
    /// Returns true if any walker is still moving.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.last_frame = now;
        self.frame_count += 1;
        for (_, walker) in self.walkers.iter_mut() {
            walker.tick_at(now);
        }
        self.has_active_walkers()
    }

    /// Tick all walkers by one fixed frame
    pub fn step(&mut self) -> bool {
        let dt_ms = self.frame_duration_ms();
        self.step_by(dt_ms)
    }

    pub fn step_by(&mut self, dt_ms: f64) -> bool {
        self.frame_count += 1;
        for (_, walker) in self.walkers.iter_mut() {
            walker.step(dt_ms);
        }
        self.has_active_walkers()
    }

    pub fn has_active_walkers(&self) -> bool {
        self.walkers.iter().any(|(_, w)| !w.is_paused())
    }

    /// Wall-clock time of the last [`WalkerScheduler::tick_at`]
    pub fn last_frame(&self) -> Instant {
        self.last_frame
    }
}

impl Default for WalkerScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gait::synthesize;
    use std::time::Duration;

    #[test]
    fn test_walker_matches_direct_synthesis() {
        let gait = GaitParameters::default();
        let mut walker = Walker::new(gait).with_secondary_motion(true);
        let mut spring = HeadSpring::default();

        for frame in 1..=30 {
            let pose = *walker.step(16.0);
            let (expected, next) = synthesize(frame as f64 * 16.0, &gait, true, spring);
            spring = next;
            assert_eq!(pose, expected);
        }
        assert_eq!(walker.spring(), spring);
    }

    #[test]
    fn test_paused_walker_freezes() {
        let mut walker = Walker::default().with_secondary_motion(true);
        walker.step(100.0);
        let frozen = *walker.pose();
        let spring = walker.spring();

        walker.set_paused(true);
        for _ in 0..10 {
            walker.step(16.0);
        }
        assert_eq!(*walker.pose(), frozen);
        assert_eq!(walker.spring(), spring);
        assert_eq!(walker.clock().now_ms(), 100.0);
    }

    #[test]
    fn test_walkers_are_independent() {
        let mut scheduler = WalkerScheduler::new();
        let slow = scheduler.add(Walker::new(GaitParameters {
            frequency: 0.5,
            ..GaitParameters::default()
        }));
        let fast = scheduler.add(Walker::new(GaitParameters {
            frequency: 2.0,
            ..GaitParameters::default()
        }));
        assert_eq!(scheduler.len(), 2);

        scheduler.set_paused(slow, true);
        for _ in 0..12 {
            scheduler.step();
        }

        assert_eq!(scheduler.pose(slow), Some(&WalkPose::rest()));
        assert_ne!(scheduler.pose(fast), Some(&WalkPose::rest()));
        assert_eq!(scheduler.frame_count(), 12);

        let removed = scheduler.remove(slow).unwrap();
        assert!(removed.is_paused());
        assert!(scheduler.get(slow).is_none());
        assert!(scheduler.has_active_walkers());
    }

    #[test]
    fn test_wall_clock_ticks() {
        let start = Instant::now();
        let mut scheduler = WalkerScheduler::new();
        let id = scheduler.add(Walker::default());

        scheduler.tick_at(start);
        scheduler.tick_at(start + Duration::from_millis(50));
        let walker = scheduler.get(id).unwrap();
        assert!((walker.clock().now_ms() - 50.0).abs() < 1e-9);
        assert_eq!(scheduler.last_frame(), start + Duration::from_millis(50));

        scheduler.pause_all();
        assert!(!scheduler.tick_at(start + Duration::from_millis(80)));
    }

    #[test]
    fn test_fixed_frame_duration() {
        let mut scheduler = WalkerScheduler::new();
        scheduler.set_target_fps(50);
        assert_eq!(scheduler.frame_duration_ms(), 20.0);
        scheduler.set_target_fps(0);
        assert_eq!(scheduler.target_fps(), 1);
    }
}

//! Frame clock
//!
//! Turns wall-clock frame timestamps into simulation time. While paused the
//! clock keeps consuming timestamps but does not advance, so resuming picks
//! up exactly where the figure stopped.

use std::time::Instant;

/// Simulation time source for one walker
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    last_frame: Option<Instant>,
    elapsed_ms: f64,
    paused: bool,
    /// Multiplier on wall-clock time
    pub time_scale: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// A clock whose simulation time begins at `start_ms`
    pub fn starting_at(start_ms: f64) -> Self {
        Self {
            last_frame: None,
            elapsed_ms: start_ms,
            paused: false,
            time_scale: 1.0,
        }
    }

    /// Current simulation time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle(&mut self) {
        self.paused = !self.paused;
    }

    /// Consume a frame timestamp and return the simulation time
    ///
    /// The first timestamp only primes the clock.
    pub fn tick_at(&mut self, now: Instant) -> f64 {
        if let Some(last) = self.last_frame {
            let dt_ms = now.saturating_duration_since(last).as_secs_f64() * 1000.0;
            self.advance(dt_ms);
        }
        self.last_frame = Some(now);
        self.elapsed_ms
    }

    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    /// Advance by a fixed step, ignoring wall time
    pub fn advance(&mut self, dt_ms: f64) -> f64 {
        if !self.paused {
            self.elapsed_ms += dt_ms * self.time_scale;
        }
        self.elapsed_ms
    }

    /// Jump to an absolute simulation time
    pub fn seek(&mut self, time_ms: f64) {
        self.elapsed_ms = time_ms;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

//! Bitruvius Animation
//!
//! Procedural walk synthesis and frame scheduling for the Bitruvius figure.
//!
//! # Features
//!
//! - **Gait Synthesis**: ten continuous gait controls mapped to a full walk pose
//! - **Head Spring**: per-frame damped spring for secondary head motion
//! - **Frame Clock**: wall-clock or fixed-step simulation time with pausing
//! - **Walker Scheduler**: independent walkers keyed by stable ids
//! - **Interpolation**: shortest-arc pose tweening and walk frame blending

pub mod clock;
pub mod gait;
pub mod scheduler;
pub mod spring;
pub mod values;

pub use clock::FrameClock;
pub use gait::{phase, synthesize, synthesize_with, time_for_phase, GaitParameters};
pub use scheduler::{Walker, WalkerId, WalkerScheduler};
pub use spring::{HeadSpring, SpringConfig};
pub use values::{tween, Interpolate};

//! Bitruvius Pose Library
//!
//! Compact string encoding, left/right mirroring and the built-in catalog of
//! static poses.
//!
//! # Features
//!
//! - **Codec**: `key:value;...` pose strings with two-decimal rounding
//! - **Mirror**: reflect poses across the vertical axis, swapping limb chains
//! - **Library**: ordered, read-only catalog with derived mirrored variants
//! - **Library Files**: JSON import and export of catalog records

pub mod codec;
pub mod error;
pub mod library;
pub mod mirror;

pub use codec::{decode, encode, round2, PoseField, SHORT_KEYS};
pub use error::{PoseError, Result};
pub use library::{load_library_json, seed_entries, PoseLibrary, PoseLibraryEntry, MIRRORED_SEEDS};
pub use mirror::{mirror, mirror_entry, mirror_pose, MIRROR_SOURCE};

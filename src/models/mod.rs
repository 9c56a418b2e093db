//! Domain models for skucal.
//!
//! # Core Concepts
//!
//! - [`Feature`]: a planned work item, living in exactly one [`Bucket`]
//!   (`new`, `continuing` or `ending`) on the board.
//! - [`FeatureDraft`]: the validated add-form payload; the board assigns
//!   the id and initial status.
//! - [`Session`] / [`UserProfile`]: the opaque identity the external auth
//!   service issues and manages. Everything is volatile; no model outlives
//!   the process.

mod bucket;
mod feature;
mod session;

pub use bucket::*;
pub use feature::*;
pub use session::*;

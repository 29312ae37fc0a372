//! Diff-and-notify engine: the decision logic of a scan.
//!
//! [`DiffEngine`] classifies every fetched character as new, changed, or
//! unchanged and builds the notifications for it under a [`NotifyPolicy`].

pub mod diff;
pub mod policy;

pub use diff::{ChangeKind, CharacterChange, DiffEngine, Evaluation};
pub use policy::{DEFAULT_GEAR_THRESHOLD, DEFAULT_STAR_THRESHOLD, NotifyPolicy};

//! Common types used across the application.

pub mod constitution;
pub mod key;
pub mod notes;

pub use constitution::{Constitution, LabelSet};
pub use key::CompositeKey;
pub use notes::NoteNumberConfig;

//! Entity wrappers over content store ports.
//!
//! Use cases depend on these concrete types rather than raw port traits.

mod dialogue;
mod progress;
mod quest;

pub use dialogue::Dialogue;
pub use progress::Progress;
pub use quest::Quest;

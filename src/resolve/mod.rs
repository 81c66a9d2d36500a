//! Order resolution and turn processing.
//!
//! Resolves a set of simultaneous orders into outcomes using the
//! Kruijswijk guess-and-check algorithm, then applies them and moves the
//! game to its next phase.

pub mod build;
pub mod kruijswijk;
pub mod phase;
pub mod turn;

pub use build::{shortest_distance, sorted_units};
pub use kruijswijk::Resolver;
pub use turn::advance_all;

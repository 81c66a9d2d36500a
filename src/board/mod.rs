//! Board representation and game-state types.
//!
//! Contains the map graph, provinces, units, orders, option trees, and the
//! per-turn state store.

pub mod graph;
pub mod options;
pub mod order;
pub mod province;
pub mod state;
pub mod unit;

pub use graph::{Graph, Step};
pub use options::{OptionValue, Options};
pub use order::{Order, OrderType};
pub use province::{Flags, Nation, Province};
pub use state::{Found, Phase, PhaseType, Season, Snapshot, State};
pub use unit::{Unit, UnitType};

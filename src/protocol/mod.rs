//! Text protocol: order notation and session commands.

pub mod orders;
pub mod parser;

pub use orders::{parse_all, parse_order, ParseError};
pub use parser::{parse_command, Command};

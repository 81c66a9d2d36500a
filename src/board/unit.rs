//! Unit types and ownership.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::province::Nation;

/// The type of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitType {
    Army,
    Fleet,
}

impl UnitType {
    pub const ALL: [UnitType; 2] = [UnitType::Army, UnitType::Fleet];

    pub const fn as_str(self) -> &'static str {
        match self {
            UnitType::Army => "Army",
            UnitType::Fleet => "Fleet",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = String;

    /// Accepts the full name or the one-letter abbreviation, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "army" | "a" => Ok(UnitType::Army),
            "fleet" | "f" => Ok(UnitType::Fleet),
            _ => Err(format!("unknown unit type '{}'", s)),
        }
    }
}

/// A military unit: what it is and who owns it. Location is the key it is
/// stored under, not part of the unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Unit {
    pub unit_type: UnitType,
    pub nation: Nation,
}

impl Unit {
    pub fn new(unit_type: UnitType, nation: Nation) -> Self {
        Unit { unit_type, nation }
    }

    pub fn army(nation: Nation) -> Self {
        Unit::new(UnitType::Army, nation)
    }

    pub fn fleet(nation: Nation) -> Self {
        Unit::new(UnitType::Fleet, nation)
    }

    pub fn is_army(&self) -> bool {
        self.unit_type == UnitType::Army
    }

    pub fn is_fleet(&self) -> bool {
        self.unit_type == UnitType::Fleet
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.nation, self.unit_type)
    }
}

//! Province, nation and traversal flag types.
//!
//! A province is a map location name such as `par`, optionally qualified by
//! a coast (`stp/nc`). The part before the slash is the super-province; all
//! coasts of a super-province are the same physical location.

use std::borrow::Cow;
use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Separator between a super-province and its coast.
const COAST_SEPARATOR: char = '/';

/// A province identifier, optionally carrying a coast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Province(String);

impl Province {
    pub fn new(name: impl Into<String>) -> Self {
        Province(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits into (super-province, coast). The coast is empty for a
    /// province given without one.
    pub fn split(&self) -> (&str, &str) {
        match self.0.split_once(COAST_SEPARATOR) {
            Some((sup, coast)) => (sup, coast),
            None => (&self.0, ""),
        }
    }

    /// The province with any coast stripped.
    pub fn super_province(&self) -> Province {
        Province(self.split().0.to_string())
    }

    /// The coast part, if any.
    pub fn coast(&self) -> Option<&str> {
        match self.split().1 {
            "" => None,
            coast => Some(coast),
        }
    }

    pub fn is_super(&self) -> bool {
        self.coast().is_none()
    }

    /// Attaches a coast to the super-province. An empty coast yields the
    /// super-province itself.
    pub fn join(&self, coast: &str) -> Province {
        let sup = self.split().0;
        if coast.is_empty() {
            Province(sup.to_string())
        } else {
            Province(format!("{sup}{COAST_SEPARATOR}{coast}"))
        }
    }

    /// True if `other` is this province, or this is a super-province and
    /// `other` is one of its coasts.
    pub fn contains(&self, other: &Province) -> bool {
        self == other || (self.is_super() && self.as_str() == other.split().0)
    }

    /// True if both refer to the same super-province.
    pub fn same_super(&self, other: &Province) -> bool {
        self.split().0 == other.split().0
    }
}

impl fmt::Display for Province {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Province {
    fn from(name: &str) -> Self {
        Province(name.to_string())
    }
}

impl From<String> for Province {
    fn from(name: String) -> Self {
        Province(name)
    }
}

/// A nation (power). Variants define their own nations; `NEUTRAL` marks
/// supply centers nobody starts with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nation(Cow<'static, str>);

impl Nation {
    pub const NEUTRAL: Nation = Nation::from_static("Neutral");

    pub const fn from_static(name: &'static str) -> Self {
        Nation(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Nation(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_neutral(&self) -> bool {
        *self == Nation::NEUTRAL
    }
}

impl fmt::Display for Nation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Traversal tags on graph nodes and edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Flags = Flags(0);
    pub const LAND: Flags = Flags(1);
    pub const SEA: Flags = Flags(1 << 1);
    /// A land node fleets may still convoy through.
    pub const CONVOYABLE: Flags = Flags(1 << 2);
    pub const COAST: Flags = Flags(Self::LAND.0 | Self::SEA.0);
    pub const ARCHIPELAGO: Flags = Flags(Self::COAST.0 | Self::CONVOYABLE.0);

    pub fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn land(self) -> bool {
        self.contains(Flags::LAND)
    }

    pub fn sea(self) -> bool {
        self.contains(Flags::SEA)
    }

    pub fn convoyable(self) -> bool {
        self.contains(Flags::CONVOYABLE)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

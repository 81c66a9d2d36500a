//! Order types for all phases.
//!
//! `Order` is a closed set of variants; the rules for each live in
//! `crate::orders` and are dispatched by matching on the variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::province::Province;
use super::unit::UnitType;

/// Order kinds as shown to players. Both move variants report
/// `OrderType::Move` from `Order::order_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderType {
    Build,
    Convoy,
    Disband,
    Hold,
    Move,
    MoveViaConvoy,
    Support,
}

impl OrderType {
    pub const ALL: [OrderType; 7] = [
        OrderType::Build,
        OrderType::Convoy,
        OrderType::Disband,
        OrderType::Hold,
        OrderType::Move,
        OrderType::MoveViaConvoy,
        OrderType::Support,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OrderType::Build => "Build",
            OrderType::Convoy => "Convoy",
            OrderType::Disband => "Disband",
            OrderType::Hold => "Hold",
            OrderType::Move => "Move",
            OrderType::MoveViaConvoy => "MoveViaConvoy",
            OrderType::Support => "Support",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown order type '{}'", s))
    }
}

/// A single order, keyed in the state by the province of the unit it
/// commands (or the province to build in).
///
/// `at` on builds and disbands is a caller-supplied submission stamp; when
/// a nation orders more than it may, the earliest stamps win.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Order {
    Hold {
        source: Province,
    },
    Move {
        source: Province,
        dest: Province,
        via_convoy: bool,
    },
    SupportHold {
        source: Province,
        target: Province,
    },
    SupportMove {
        source: Province,
        from: Province,
        to: Province,
    },
    Convoy {
        source: Province,
        from: Province,
        to: Province,
    },
    Build {
        source: Province,
        unit_type: UnitType,
        at: u64,
    },
    Disband {
        source: Province,
        at: u64,
    },
}

impl Order {
    pub fn hold(source: impl Into<Province>) -> Self {
        Order::Hold {
            source: source.into(),
        }
    }

    pub fn move_to(source: impl Into<Province>, dest: impl Into<Province>) -> Self {
        Order::Move {
            source: source.into(),
            dest: dest.into(),
            via_convoy: false,
        }
    }

    pub fn move_via_convoy(source: impl Into<Province>, dest: impl Into<Province>) -> Self {
        Order::Move {
            source: source.into(),
            dest: dest.into(),
            via_convoy: true,
        }
    }

    pub fn support_hold(source: impl Into<Province>, target: impl Into<Province>) -> Self {
        Order::SupportHold {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn support_move(
        source: impl Into<Province>,
        from: impl Into<Province>,
        to: impl Into<Province>,
    ) -> Self {
        Order::SupportMove {
            source: source.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn convoy(
        source: impl Into<Province>,
        from: impl Into<Province>,
        to: impl Into<Province>,
    ) -> Self {
        Order::Convoy {
            source: source.into(),
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn build(source: impl Into<Province>, unit_type: UnitType, at: u64) -> Self {
        Order::Build {
            source: source.into(),
            unit_type,
            at,
        }
    }

    pub fn disband(source: impl Into<Province>, at: u64) -> Self {
        Order::Disband {
            source: source.into(),
            at,
        }
    }

    /// The province of the ordered unit (or build site).
    pub fn source(&self) -> &Province {
        match self {
            Order::Hold { source }
            | Order::Move { source, .. }
            | Order::SupportHold { source, .. }
            | Order::SupportMove { source, .. }
            | Order::Convoy { source, .. }
            | Order::Build { source, .. }
            | Order::Disband { source, .. } => source,
        }
    }

    /// Every province the order names, source first.
    pub fn targets(&self) -> Vec<&Province> {
        match self {
            Order::Hold { source } | Order::Build { source, .. } | Order::Disband { source, .. } => {
                vec![source]
            }
            Order::Move { source, dest, .. } => vec![source, dest],
            Order::SupportHold { source, target } => vec![source, target],
            Order::SupportMove { source, from, to } | Order::Convoy { source, from, to } => {
                vec![source, from, to]
            }
        }
    }

    pub fn order_type(&self) -> OrderType {
        match self {
            Order::Hold { .. } => OrderType::Hold,
            Order::Move { .. } => OrderType::Move,
            Order::SupportHold { .. } | Order::SupportMove { .. } => OrderType::Support,
            Order::Convoy { .. } => OrderType::Convoy,
            Order::Build { .. } => OrderType::Build,
            Order::Disband { .. } => OrderType::Disband,
        }
    }

    pub fn display_type(&self) -> OrderType {
        match self {
            Order::Move {
                via_convoy: true, ..
            } => OrderType::MoveViaConvoy,
            other => other.order_type(),
        }
    }

    /// Submission stamp; zero for orders that do not carry one.
    pub fn at(&self) -> u64 {
        match self {
            Order::Build { at, .. } | Order::Disband { at, .. } => *at,
            _ => 0,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Order::Move { .. })
    }

    /// Destination of a move.
    pub fn move_dest(&self) -> Option<&Province> {
        match self {
            Order::Move { dest, .. } => Some(dest),
            _ => None,
        }
    }

    /// (from, to) of a convoy.
    pub fn convoy_route(&self) -> Option<(&Province, &Province)> {
        match self {
            Order::Convoy { from, to, .. } => Some((from, to)),
            _ => None,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Hold { source } => write!(f, "{} Hold", source),
            Order::Move { source, dest, via_convoy } => {
                write!(f, "{} Move {}", source, dest)?;
                if *via_convoy {
                    f.write_str(" via convoy")?;
                }
                Ok(())
            }
            Order::SupportHold { source, target } => write!(f, "{} Support {}", source, target),
            Order::SupportMove { source, from, to } => {
                write!(f, "{} Support {} Move {}", source, from, to)
            }
            Order::Convoy { source, from, to } => {
                write!(f, "{} Convoy {} Move {}", source, from, to)
            }
            Order::Build {
                source, unit_type, ..
            } => write!(f, "{} Build {}", source, unit_type),
            Order::Disband { source, .. } => write!(f, "{} Disband", source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_start_with_source() {
        let o = Order::support_move("tyr", "vie", "tri");
        let names: Vec<&str> = o.targets().iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["tyr", "vie", "tri"]);
        assert_eq!(o.source().as_str(), "tyr");
    }

    #[test]
    fn display_type_distinguishes_convoyed_moves() {
        let plain = Order::move_to("lon", "bel");
        let convoyed = Order::move_via_convoy("lon", "bel");
        assert_eq!(plain.order_type(), OrderType::Move);
        assert_eq!(convoyed.order_type(), OrderType::Move);
        assert_eq!(plain.display_type(), OrderType::Move);
        assert_eq!(convoyed.display_type(), OrderType::MoveViaConvoy);
    }

    #[test]
    fn only_adjustments_carry_stamps() {
        assert_eq!(Order::build("par", UnitType::Army, 7).at(), 7);
        assert_eq!(Order::disband("par", 3).at(), 3);
        assert_eq!(Order::hold("par").at(), 0);
    }

    #[test]
    fn order_type_parses_case_insensitively() {
        assert!("move via convoy".parse::<OrderType>().is_err());
        assert_eq!("moveviaconvoy".parse::<OrderType>(), Ok(OrderType::MoveViaConvoy));
        assert_eq!("Support".parse::<OrderType>(), Ok(OrderType::Support));
    }

    #[test]
    fn display() {
        assert_eq!(Order::move_via_convoy("lon", "bre").to_string(), "lon Move bre via convoy");
        assert_eq!(Order::build("stp/nc", UnitType::Fleet, 0).to_string(), "stp/nc Build Fleet");
    }
}

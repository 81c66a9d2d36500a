//! Error types.
//!
//! `OrderError` values are ordinary game outcomes: they are stored as a
//! province's resolution and explain why an order failed. `StateError`
//! values mean the turn cannot continue and are returned to the caller.

use thiserror::Error;

use crate::board::order::OrderType;
use crate::board::province::Province;

/// Why an order failed validation or adjudication.
///
/// "Invalid" errors mean the order could not be understood against the map,
/// "illegal" errors mean it was understood but is not allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("invalid source")]
    InvalidSource,

    #[error("invalid destination")]
    InvalidDestination,

    #[error("invalid target")]
    InvalidTarget,

    #[error("order not allowed in this phase")]
    InvalidPhase,

    #[error("missing unit")]
    MissingUnit,

    #[error("missing order")]
    MissingOrder,

    #[error("illegal destination")]
    IllegalDestination,

    #[error("missing convoy path")]
    MissingConvoyPath,

    #[error("illegal move")]
    IllegalMove,

    #[error("convoy paradox")]
    ConvoyParadox,

    #[error("illegal support position")]
    IllegalSupportPosition,

    #[error("illegal support destination")]
    IllegalSupportDestination,

    #[error("missing supported unit")]
    MissingSupportUnit,

    #[error("illegal supported move")]
    IllegalSupportMove,

    #[error("illegal convoy path")]
    IllegalConvoyPath,

    #[error("illegal convoyed move")]
    IllegalConvoyMove,

    #[error("missing convoyed unit")]
    MissingConvoyee,

    #[error("only fleets can convoy")]
    IllegalConvoyer,

    #[error("only armies can be convoyed")]
    IllegalConvoyee,

    #[error("illegal build")]
    IllegalBuild,

    #[error("illegal disband")]
    IllegalDisband,

    #[error("supply center is occupied")]
    OccupiedSupplyCenter,

    #[error("not an owned supply center")]
    MissingSupplyCenter,

    #[error("not a home supply center")]
    HostileSupplyCenter,

    #[error("no supply center surplus")]
    MissingSurplus,

    #[error("unit type cannot stand here")]
    IllegalUnitType,

    #[error("no unit deficit")]
    MissingDeficit,

    #[error("illegal retreat")]
    IllegalRetreat,

    #[error("forced disband")]
    ForcedDisband,

    #[error("double build in {0:?}")]
    DoubleBuild(Vec<Province>),

    #[error("convoy dislodged from {0}")]
    ConvoyDislodged(Province),

    #[error("support broken by {0}")]
    SupportBroken(Province),

    #[error("bounced against {0}")]
    Bounce(Province),

    /// Placeholder outcome planted by the resolver when it re-enters a
    /// province that is still being adjudicated.
    #[error("negative guess")]
    NegativeGuess,
}

/// Per-province outcome of a turn.
pub type Resolution = Result<(), OrderError>;

/// Advice about a nation's pending orders. None of these stop a turn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Inconsistency {
    #[error("missing order")]
    MissingOrder,

    #[error("support does not match the order of {0}")]
    MismatchedSupporter(Province),

    #[error("convoy does not match the order of {0}")]
    MismatchedConvoyer(Province),

    #[error("found {found} {order_type} orders, want {want}")]
    OrderTypeCount {
        order_type: OrderType,
        found: usize,
        want: usize,
    },

    #[error(transparent)]
    Invalid(#[from] OrderError),
}

/// Inconsistencies that abort turn processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("a unit is already at {0}")]
    UnitOccupied(Province),

    #[error("a dislodged unit is already at {0}")]
    DislodgedOccupied(Province),

    #[error("an order is already given at {0}")]
    OrderOccupied(Province),

    #[error("no dislodged unit at {0}")]
    NoDislodged(Province),

    #[error("no unit to move at {0}")]
    MissingMover(Province),

    #[error("movements from {first} and {second} both end in {dest}")]
    ConflictingMovements {
        first: Province,
        second: Province,
        dest: Province,
    },

    #[error("unknown circular dependency between {0:?}")]
    UnresolvedParadox(Vec<Province>),

    #[error("ruleset error: {0}")]
    Ruleset(String),
}

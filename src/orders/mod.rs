//! Classical order kinds.
//!
//! Every `Order` variant knows how to validate itself against a read-only
//! state, adjudicate itself against a resolver, execute its effect once it
//! has succeeded, and enumerate the options a player has for it. The
//! per-kind rules live in the submodules; this module dispatches on the
//! variant.

pub mod adjustment;
pub mod common;
pub mod convoy;
pub mod movement;
pub mod support;

use crate::board::options::Options;
use crate::board::order::{Order, OrderType};
use crate::board::province::{Nation, Province};
use crate::board::state::State;
use crate::error::{Inconsistency, OrderError, Resolution, StateError};
use crate::resolve::kruijswijk::Resolver;

/// Something that can answer "did the order at this province succeed?".
///
/// The resolver answers by adjudicating (possibly recursively); a
/// `Validator` only reports outcomes already cached on the state.
pub trait Judge {
    fn state(&self) -> &State;

    fn resolve(&mut self, p: &Province) -> Resolution;
}

/// Read-only view over a state.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a>(pub &'a State);

impl Judge for Validator<'_> {
    fn state(&self) -> &State {
        self.0
    }

    fn resolve(&mut self, p: &Province) -> Resolution {
        let key = self.0.order(p).map(|(k, _)| k);
        key.and_then(|k| self.0.resolution(k))
            .cloned()
            .unwrap_or(Err(OrderError::MissingOrder))
    }
}

impl Order {
    /// Checks the order against the state and returns the nation giving it.
    ///
    /// Provinces are normalized to the keys the state actually uses, so an
    /// order for `stp` commanding a fleet stored at `stp/sc` ends up
    /// naming `stp/sc`.
    pub fn validate(&mut self, state: &State) -> Result<Nation, OrderError> {
        match self {
            Order::Hold { source } => movement::validate_hold(state, source),
            Order::Move { source, dest, .. } => movement::validate_move(state, source, dest),
            Order::SupportHold { source, target } => {
                support::validate(state, source, target, None)
            }
            Order::SupportMove { source, from, to } => {
                support::validate(state, source, from, Some(to))
            }
            Order::Convoy { source, from, to } => convoy::validate(state, source, from, to),
            Order::Build {
                source, unit_type, ..
            } => adjustment::validate_build(state, source, *unit_type),
            Order::Disband { source, .. } => adjustment::validate_disband(state, source),
        }
    }

    pub fn adjudicate(&self, r: &mut Resolver<'_>) -> Resolution {
        match self {
            Order::Hold { .. } => Ok(()),
            Order::Move { source, dest, .. } => movement::adjudicate_move(r, source, dest),
            Order::SupportHold { source, .. } => support::adjudicate(r, source, None),
            Order::SupportMove { source, to, .. } => support::adjudicate(r, source, Some(to)),
            Order::Convoy { source, .. } => convoy::adjudicate(r, source),
            Order::Build { source, .. } => adjustment::adjudicate_build(r, source),
            Order::Disband { source, .. } => adjustment::adjudicate_disband(r, source),
        }
    }

    /// Checks a validated order against the orders of the units it helps.
    pub fn corroborate(&self, state: &State) -> Option<Inconsistency> {
        match self {
            Order::SupportHold { source, target } => {
                support::corroborate(state, source, target, None)
            }
            Order::SupportMove { source, from, to } => {
                support::corroborate(state, source, from, Some(to))
            }
            Order::Convoy { source, from, to } => convoy::corroborate(state, source, from, to),
            _ => None,
        }
    }

    /// Applies the effect of a successful order.
    pub fn execute(&self, r: &mut Resolver<'_>) -> Result<(), StateError> {
        match self {
            Order::Move { source, dest, .. } => movement::execute_move(r, source, dest),
            Order::Build {
                source, unit_type, ..
            } => adjustment::execute_build(r.state_mut(), source, *unit_type),
            Order::Disband { source, .. } => {
                adjustment::execute_disband(r.state_mut(), source);
                Ok(())
            }
            Order::Hold { .. }
            | Order::SupportHold { .. }
            | Order::SupportMove { .. }
            | Order::Convoy { .. } => Ok(()),
        }
    }
}

impl OrderType {
    /// Legal choices for `nation` when giving this kind of order at `src`.
    pub fn options(self, state: &State, nation: &Nation, src: &Province) -> Options {
        match self {
            OrderType::Hold => movement::hold_options(state, nation, src),
            OrderType::Move => movement::move_options(state, nation, src, false),
            OrderType::MoveViaConvoy => movement::move_options(state, nation, src, true),
            OrderType::Support => support::options(state, nation, src),
            OrderType::Convoy => convoy::options(state, nation, src),
            OrderType::Build => adjustment::build_options(state, nation, src),
            OrderType::Disband => adjustment::disband_options(state, nation, src),
        }
    }
}

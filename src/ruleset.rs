//! Variant hooks consumed by the adjudicator.

use std::fmt;

use crate::board::province::{Nation, Province};
use crate::board::state::{Phase, State};
use crate::config::JudgeConfig;
use crate::error::StateError;

/// Policies a game variant supplies to the engine.
pub trait Ruleset: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Breaks a paradox found while resolving. `deps` holds the provinces
    /// visited while guessing, in visitation order, possibly repeated.
    ///
    /// Must change resolutions on `state` so that re-resolving terminates,
    /// or fail.
    fn backup_rule(&self, state: &mut State, deps: &[Province]) -> Result<(), StateError>;

    /// Whether supply centers change hands at the end of `phase`.
    fn adjusts_supply_centers(&self, phase: &Phase) -> bool;

    /// The nation that has won the game outright, if any.
    fn winner(&self, state: &State) -> Option<Nation>;

    fn config(&self) -> &JudgeConfig;
}

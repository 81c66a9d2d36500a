//! Kruijswijk guess-and-check resolution algorithm.
//!
//! Each top-level resolution creates a fresh `Resolver` over the state.
//! Resolving a province adjudicates its order, which may recursively
//! resolve other provinces. When a province is re-entered while it is
//! still being adjudicated, the resolver guesses that it fails and records
//! the province in a dependency trail. Once the guessed province returns,
//! it is adjudicated again under the opposite guess: if both runs agree the
//! guess did not matter, otherwise the trail is a genuine paradox and the
//! ruleset's backup rule decides it.
//!
//! Outcomes become permanent (cached on the state) only when no guesses
//! are outstanding.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Deref;

use tracing::{debug, trace, warn};

use crate::board::province::Province;
use crate::board::state::State;
use crate::error::{OrderError, Resolution, StateError};
use crate::orders::Judge;

/// Resolver for one call tree.
pub struct Resolver<'a> {
    state: &'a mut State,
    /// Provinces visited while guessing, in visitation order.
    deps: Vec<Province>,
    guesses: BTreeMap<Province, Resolution>,
    resolving: BTreeSet<Province>,
    /// Set when the backup rule fails; the turn must abort.
    fatal: Option<StateError>,
}

impl<'a> Resolver<'a> {
    pub fn new(state: &'a mut State) -> Self {
        Resolver {
            state,
            deps: Vec::new(),
            guesses: BTreeMap::new(),
            resolving: BTreeSet::new(),
            fatal: None,
        }
    }

    pub fn state_mut(&mut self) -> &mut State {
        self.state
    }

    /// Records that the move from `src` bounced at `dst`.
    pub fn add_bounce(&mut self, src: &Province, dst: &Province) {
        self.state.add_bounce(src, dst);
    }

    /// Resolves the order at `prov` (found under lookup rules).
    pub fn resolve(&mut self, prov: &Province) -> Resolution {
        if self.fatal.is_some() {
            return Err(OrderError::NegativeGuess);
        }
        let Some((key, order)) = self
            .state
            .order(prov)
            .map(|(k, o)| (k.clone(), o.clone()))
        else {
            return Err(OrderError::MissingOrder);
        };

        if let Some(cached) = self.state.resolutions.get(&key) {
            return cached.clone();
        }
        if let Some(guess) = self.guesses.get(&key) {
            return guess.clone();
        }
        if self.resolving.contains(&key) {
            trace!(province = %key, "cycle, guessing failure");
            self.guesses.insert(key.clone(), Err(OrderError::NegativeGuess));
            self.deps.push(key);
            return Err(OrderError::NegativeGuess);
        }

        self.resolving.insert(key.clone());
        let guesses_before = self.guesses.len();
        let result = order.adjudicate(self);
        self.resolving.remove(&key);

        if self.guesses.contains_key(&key) {
            self.guesses.insert(key.clone(), Ok(()));
            let second = order.adjudicate(self);
            self.guesses.remove(&key);
            if result.is_ok() != second.is_ok() {
                let deps = std::mem::take(&mut self.deps);
                debug!(province = %key, ?deps, "paradox, applying backup rule");
                let rules = self.state.rules();
                if let Err(err) = rules.backup_rule(self.state, &deps) {
                    warn!(province = %key, error = %err, "backup rule failed");
                    self.fatal = Some(err);
                    return Err(OrderError::NegativeGuess);
                }
                return self.resolve(&key);
            }
        } else if self.guesses.len() != guesses_before {
            self.deps.push(key.clone());
        }

        if self.guesses.is_empty() && self.fatal.is_none() {
            trace!(province = %key, ?result, "resolved");
            self.state.resolutions.insert(key, result.clone());
        }
        result
    }

    /// Ends the call tree, surfacing a backup-rule failure.
    pub fn finish(self) -> Result<(), StateError> {
        match self.fatal {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Deref for Resolver<'_> {
    type Target = State;

    fn deref(&self) -> &State {
        self.state
    }
}

impl Judge for Resolver<'_> {
    fn state(&self) -> &State {
        self.state
    }

    fn resolve(&mut self, p: &Province) -> Resolution {
        Resolver::resolve(self, p)
    }
}

impl State {
    /// Resolves the order at `p` with a fresh resolver.
    pub fn resolve_province(&mut self, p: &Province) -> Result<Resolution, StateError> {
        let mut resolver = Resolver::new(self);
        let result = resolver.resolve(p);
        resolver.finish().map(|()| result)
    }
}

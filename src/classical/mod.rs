//! The standard seven-nation game.

pub mod map;
pub mod start;

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::board::graph::Graph;
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::{Phase, PhaseType, Season, State};
use crate::config::JudgeConfig;
use crate::error::{OrderError, StateError};
use crate::ruleset::Ruleset;

pub const AUSTRIA: Nation = Nation::from_static("Austria");
pub const ENGLAND: Nation = Nation::from_static("England");
pub const FRANCE: Nation = Nation::from_static("France");
pub const GERMANY: Nation = Nation::from_static("Germany");
pub const ITALY: Nation = Nation::from_static("Italy");
pub const RUSSIA: Nation = Nation::from_static("Russia");
pub const TURKEY: Nation = Nation::from_static("Turkey");

pub const NATIONS: [Nation; 7] = [AUSTRIA, ENGLAND, FRANCE, GERMANY, ITALY, RUSSIA, TURKEY];

/// Supply centers a nation must own to win alone: a majority of the 34.
pub const SOLO_CENTERS: usize = 18;

/// Classical rules: standard paradox handling, centers change hands after
/// the fall retreat.
#[derive(Debug, Clone, Default)]
pub struct Classical {
    pub config: JudgeConfig,
}

impl Classical {
    pub fn new(config: JudgeConfig) -> Self {
        Classical { config }
    }
}

impl Ruleset for Classical {
    fn name(&self) -> &str {
        "Classical"
    }

    fn backup_rule(&self, state: &mut State, deps: &[Province]) -> Result<(), StateError> {
        backup_rule(state, deps)
    }

    fn adjusts_supply_centers(&self, phase: &Phase) -> bool {
        phase.phase_type == PhaseType::Retreat && phase.season == Season::Fall
    }

    fn winner(&self, state: &State) -> Option<Nation> {
        let mut owned: BTreeMap<&Nation, usize> = BTreeMap::new();
        for owner in state.supply_centers().values() {
            if !owner.is_neutral() {
                *owned.entry(owner).or_default() += 1;
            }
        }
        owned
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .filter(|(_, count)| *count >= SOLO_CENTERS)
            .map(|(nation, _)| nation.clone())
    }

    fn config(&self) -> &JudgeConfig {
        &self.config
    }
}

/// The shared classical board.
pub fn graph() -> Arc<Graph> {
    static GRAPH: OnceLock<Arc<Graph>> = OnceLock::new();
    Arc::clone(GRAPH.get_or_init(|| Arc::new(map::build())))
}

/// An empty board at `phase`: no units, no owned centers.
pub fn blank(phase: Phase) -> State {
    blank_with(JudgeConfig::default(), phase)
}

pub fn blank_with(config: JudgeConfig, phase: Phase) -> State {
    State::new(graph(), phase, Arc::new(Classical::new(config)))
}

/// Spring 1901 with the 22 starting units and home centers.
pub fn start() -> State {
    start_with(JudgeConfig::default())
}

pub fn start_with(config: JudgeConfig) -> State {
    let year = config.start_year;
    let mut state = blank_with(config, Phase::new(year, Season::Spring, PhaseType::Movement));
    for (prov, unit) in start::units() {
        // The starting units sit on distinct provinces of an empty board.
        if let Err(err) = state.set_unit(prov, unit) {
            debug!(error = %err, "skipped starting unit");
        }
    }
    state.set_supply_centers(start::supply_centers());
    state
}

/// Breaks a dependency cycle.
///
/// A cycle of moves only is a rotation and every move succeeds. A cycle
/// containing convoys is Szykman's paradox: each convoy in it fails. Any
/// other cycle cannot be decided.
pub fn backup_rule(state: &mut State, deps: &[Province]) -> Result<(), StateError> {
    let mut only_moves = true;
    let mut convoys = false;
    for prov in deps {
        if let Some((_, order)) = state.order(prov) {
            if !matches!(order, Order::Move { .. }) {
                only_moves = false;
            }
            if matches!(order, Order::Convoy { .. }) {
                convoys = true;
            }
        }
    }

    if only_moves {
        debug!(?deps, "circular movement");
        for prov in deps {
            state.set_resolution(prov.clone(), Ok(()));
        }
        return Ok(());
    }
    if convoys {
        debug!(?deps, "convoy paradox");
        for prov in deps {
            if let Some((key, Order::Convoy { .. })) = state.order(prov) {
                let key = key.clone();
                state.set_resolution(key, Err(OrderError::ConvoyParadox));
            }
        }
        return Ok(());
    }
    Err(StateError::UnresolvedParadox(deps.to_vec()))
}

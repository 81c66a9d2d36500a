//! Game state representation.
//!
//! `State` owns everything that changes during a game: units, dislodged
//! units, supply-center ownership, orders, bounce and dislodger markers,
//! resolutions and queued movements. The map is shared and immutable.
//!
//! Lookups degrade: a query first tries the exact key, then the
//! super-province, then every coast of the super-province. A unit stored
//! at `stp/sc` is therefore found by `stp`, and a unit stored at `stp` is
//! found by `stp/nc`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::graph::Graph;
use super::options::{OptionValue, Options};
use super::order::{Order, OrderType};
use super::province::{Nation, Province};
use super::unit::Unit;
use crate::config::JudgeConfig;
use crate::error::{Inconsistency, Resolution, StateError};
use crate::ruleset::Ruleset;

/// The season of a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Fall,
}

/// The kind of round within a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseType {
    Movement,
    Retreat,
    Adjustment,
}

/// A point in the game calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phase {
    pub year: i32,
    pub season: Season,
    pub phase_type: PhaseType,
}

impl Phase {
    pub fn new(year: i32, season: Season, phase_type: PhaseType) -> Self {
        Phase {
            year,
            season,
            phase_type,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}, {:?}", self.season, self.year, self.phase_type)
    }
}

/// A queued relocation, applied after all orders have executed.
#[derive(Debug, Clone)]
struct Movement {
    src: Province,
    dst: Province,
    prevent_retreat: bool,
}

/// Province plus whatever order and unit are found there.
#[derive(Debug, Clone)]
pub struct Found {
    pub province: Province,
    pub order: Option<Order>,
    pub unit: Option<Unit>,
}

/// Serializable dump of the mutable parts of a state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub units: BTreeMap<Province, Unit>,
    pub supply_centers: BTreeMap<Province, Nation>,
    pub dislodgeds: BTreeMap<Province, Unit>,
    pub dislodgers: BTreeMap<Province, Province>,
    pub bounces: BTreeMap<Province, BTreeSet<Province>>,
    /// `None` for success, otherwise the failure reason.
    pub resolutions: BTreeMap<Province, Option<String>>,
}

/// The per-turn container.
#[derive(Debug, Clone)]
pub struct State {
    graph: Arc<Graph>,
    phase: Phase,
    rules: Arc<dyn Ruleset>,
    pub(crate) orders: BTreeMap<Province, Order>,
    pub(crate) units: BTreeMap<Province, Unit>,
    pub(crate) dislodgeds: BTreeMap<Province, Unit>,
    pub(crate) supply_centers: BTreeMap<Province, Nation>,
    /// Attacker origin (super-province) to the super-province it dislodged.
    dislodgers: BTreeMap<Province, Province>,
    /// Contested super-province to the super-provinces that bounced there.
    bounces: BTreeMap<Province, BTreeSet<Province>>,
    pub(crate) resolutions: BTreeMap<Province, Resolution>,
    force_disbands: BTreeSet<Province>,
    movements: Vec<Movement>,
}

fn lookup<'a, V>(
    graph: &Graph,
    map: &'a BTreeMap<Province, V>,
    p: &Province,
) -> Option<(&'a Province, &'a V)> {
    if let Some(found) = map.get_key_value(p) {
        return Some(found);
    }
    if let Some(found) = map.get_key_value(&p.super_province()) {
        return Some(found);
    }
    graph
        .coasts(p)
        .iter()
        .find_map(|coast| map.get_key_value(coast))
}

impl State {
    pub fn new(graph: Arc<Graph>, phase: Phase, rules: Arc<dyn Ruleset>) -> Self {
        State {
            graph,
            phase,
            rules,
            orders: BTreeMap::new(),
            units: BTreeMap::new(),
            dislodgeds: BTreeMap::new(),
            supply_centers: BTreeMap::new(),
            dislodgers: BTreeMap::new(),
            bounces: BTreeMap::new(),
            resolutions: BTreeMap::new(),
            force_disbands: BTreeSet::new(),
            movements: Vec::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Shared handle to the graph, for searches whose filters need the
    /// state mutably.
    pub fn graph_arc(&self) -> Arc<Graph> {
        Arc::clone(&self.graph)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub fn rules(&self) -> Arc<dyn Ruleset> {
        Arc::clone(&self.rules)
    }

    pub fn config(&self) -> &JudgeConfig {
        self.rules.config()
    }

    /// The nation that has won outright under the game's rules.
    pub fn winner(&self) -> Option<Nation> {
        self.rules.winner(self)
    }

    /// Problems with `nation`'s pending orders in the current phase.
    pub fn corroborate(&self, nation: &Nation) -> Vec<(Option<Province>, Inconsistency)> {
        self.phase.corroborate(self, nation)
    }

    // ---------------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------------

    pub fn unit(&self, p: &Province) -> Option<(&Province, &Unit)> {
        lookup(&self.graph, &self.units, p)
    }

    pub fn dislodged(&self, p: &Province) -> Option<(&Province, &Unit)> {
        lookup(&self.graph, &self.dislodgeds, p)
    }

    pub fn order(&self, p: &Province) -> Option<(&Province, &Order)> {
        lookup(&self.graph, &self.orders, p)
    }

    pub fn supply_center(&self, p: &Province) -> Option<(&Province, &Nation)> {
        lookup(&self.graph, &self.supply_centers, p)
    }

    pub fn units(&self) -> &BTreeMap<Province, Unit> {
        &self.units
    }

    pub fn dislodgeds(&self) -> &BTreeMap<Province, Unit> {
        &self.dislodgeds
    }

    pub fn orders(&self) -> &BTreeMap<Province, Order> {
        &self.orders
    }

    pub fn supply_centers(&self) -> &BTreeMap<Province, Nation> {
        &self.supply_centers
    }

    pub fn dislodgers(&self) -> &BTreeMap<Province, Province> {
        &self.dislodgers
    }

    pub fn bounces(&self) -> &BTreeMap<Province, BTreeSet<Province>> {
        &self.bounces
    }

    pub fn resolutions(&self) -> &BTreeMap<Province, Resolution> {
        &self.resolutions
    }

    pub fn resolution(&self, p: &Province) -> Option<&Resolution> {
        self.resolutions.get(p)
    }

    pub fn force_disbands(&self) -> &BTreeSet<Province> {
        &self.force_disbands
    }

    /// Whether a unit dislodged at `src` is barred from retreating to `dst`.
    ///
    /// Barred if something bounced at `dst` (unless the only bouncer is the
    /// unit that `dst`'s own occupant dislodged, which happens after a lost
    /// head-to-head), or if `dst` is where the attacker of `src` came from.
    pub fn bounce(&self, src: &Province, dst: &Province) -> bool {
        let dst_sup = dst.super_province();
        if let Some(sources) = self.bounces.get(&dst_sup) {
            if let Some(dislodger) = self.dislodgers.get(&dst_sup) {
                if sources.len() == 1 && sources.contains(&dislodger.super_province()) {
                    return false;
                }
            }
            return true;
        }
        self.dislodgers.get(&dst_sup) == Some(&src.super_province())
    }

    fn scan(&self) -> Vec<(&Province, Option<&Order>, Option<&Unit>)> {
        let mut out = Vec::with_capacity(self.units.len() + self.orders.len());
        for (p, unit) in &self.units {
            out.push((p, self.order(p).map(|(_, o)| o), Some(unit)));
        }
        for (p, order) in &self.orders {
            if !self.units.contains_key(p) {
                out.push((p, Some(order), None));
            }
        }
        out
    }

    /// Provinces matching `filter`: every unit first, then orders given
    /// where no unit is stored.
    pub fn find<F>(&self, mut filter: F) -> Vec<Province>
    where
        F: FnMut(&Province, Option<&Order>, Option<&Unit>) -> bool,
    {
        self.scan()
            .into_iter()
            .filter(|(p, o, u)| filter(p, *o, *u))
            .map(|(p, _, _)| p.clone())
            .collect()
    }

    /// Owned copy of everything `find` visits, in the same order.
    pub fn found(&self) -> Vec<Found> {
        self.scan()
            .into_iter()
            .map(|(p, o, u)| Found {
                province: p.clone(),
                order: o.cloned(),
                unit: u.cloned(),
            })
            .collect()
    }

    /// Legal options for `nation`: province → order type → option tree.
    pub fn options(&self, templates: &[OrderType], nation: &Nation) -> Options {
        let started = Instant::now();
        let mut result = Options::new();
        for prov in self.graph.provinces() {
            for &template in templates {
                let opts = template.options(self, nation, &prov);
                if !opts.is_empty() {
                    result
                        .entry(OptionValue::Province(prov.clone()))
                        .insert(OptionValue::OrderType(template), opts);
                }
            }
        }
        debug!(%nation, elapsed = ?started.elapsed(), "built options");
        result
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            units: self.units.clone(),
            supply_centers: self.supply_centers.clone(),
            dislodgeds: self.dislodgeds.clone(),
            dislodgers: self.dislodgers.clone(),
            bounces: self.bounces.clone(),
            resolutions: self
                .resolutions
                .iter()
                .map(|(p, r)| (p.clone(), r.as_ref().err().map(|e| e.to_string())))
                .collect(),
        }
    }

    // ---------------------------------------------------------------------
    // Writes
    // ---------------------------------------------------------------------

    pub fn set_unit(&mut self, p: Province, unit: Unit) -> Result<(), StateError> {
        if self.unit(&p).is_some() {
            return Err(StateError::UnitOccupied(p));
        }
        self.units.insert(p, unit);
        Ok(())
    }

    /// Replaces all units.
    pub fn set_units(&mut self, units: BTreeMap<Province, Unit>) -> Result<(), StateError> {
        self.units.clear();
        for (p, unit) in units {
            self.set_unit(p, unit)?;
        }
        Ok(())
    }

    /// Removes the unit found at `p` under lookup rules.
    pub fn remove_unit(&mut self, p: &Province) -> Option<(Province, Unit)> {
        let key = self.unit(p).map(|(k, _)| k.clone())?;
        self.units.remove_entry(&key)
    }

    pub fn set_dislodged(&mut self, p: Province, unit: Unit) -> Result<(), StateError> {
        if self.dislodged(&p).is_some() {
            return Err(StateError::DislodgedOccupied(p));
        }
        self.dislodgeds.insert(p, unit);
        Ok(())
    }

    pub fn set_dislodgeds(&mut self, dislodgeds: BTreeMap<Province, Unit>) -> Result<(), StateError> {
        self.dislodgeds.clear();
        for (p, unit) in dislodgeds {
            self.set_dislodged(p, unit)?;
        }
        Ok(())
    }

    pub fn remove_dislodged(&mut self, p: &Province) -> Option<(Province, Unit)> {
        let key = self.dislodged(p).map(|(k, _)| k.clone())?;
        self.dislodgeds.remove_entry(&key)
    }

    pub fn set_supply_center(&mut self, p: Province, nation: Nation) {
        self.supply_centers.insert(p, nation);
    }

    pub fn set_supply_centers(&mut self, centers: BTreeMap<Province, Nation>) {
        self.supply_centers = centers;
    }

    pub fn set_order(&mut self, p: Province, order: Order) -> Result<(), StateError> {
        if self.order(&p).is_some() {
            return Err(StateError::OrderOccupied(p));
        }
        self.orders.insert(p, order);
        Ok(())
    }

    /// Replaces all orders.
    pub fn set_orders<I>(&mut self, orders: I) -> Result<(), StateError>
    where
        I: IntoIterator<Item = (Province, Order)>,
    {
        self.orders.clear();
        for (p, order) in orders {
            self.set_order(p, order)?;
        }
        Ok(())
    }

    pub fn remove_order(&mut self, p: &Province) -> Option<(Province, Order)> {
        let key = self.order(p).map(|(k, _)| k.clone())?;
        self.orders.remove_entry(&key)
    }

    pub fn set_resolution(&mut self, p: Province, resolution: Resolution) {
        self.resolutions.insert(p, resolution);
    }

    /// Records that the unit moving from `attacker` dislodged `victim`.
    pub fn set_dislodger(&mut self, attacker: &Province, victim: &Province) {
        self.dislodgers
            .insert(attacker.super_province(), victim.super_province());
    }

    /// Records that a move from `src` bounced at `dst`.
    pub fn add_bounce(&mut self, src: &Province, dst: &Province) {
        self.bounces
            .entry(dst.super_province())
            .or_default()
            .insert(src.super_province());
    }

    pub fn clear_bounces(&mut self) {
        self.bounces.clear();
    }

    pub fn clear_dislodgers(&mut self) {
        self.dislodgers.clear();
    }

    pub fn force_disband(&mut self, p: Province) {
        self.force_disbands.insert(p);
    }

    /// Queues a move; nothing changes until `apply_movements`.
    pub fn move_unit(&mut self, src: Province, dst: Province, prevent_retreat: bool) {
        self.movements.push(Movement {
            src,
            dst,
            prevent_retreat,
        });
    }

    /// Moves the dislodged unit at `src` to `dst` immediately.
    pub fn retreat(&mut self, src: &Province, dst: Province) -> Result<(), StateError> {
        let (_, unit) = self
            .remove_dislodged(src)
            .ok_or_else(|| StateError::NoDislodged(src.clone()))?;
        debug!(%unit, %src, %dst, "retreated");
        self.set_unit(dst, unit)
    }

    /// Applies queued movements: every unit is lifted before any is
    /// dropped, so units can rotate through each other's provinces.
    pub fn apply_movements(&mut self) -> Result<(), StateError> {
        let movements = std::mem::take(&mut self.movements);

        let mut arrivals: BTreeMap<Province, &Province> = BTreeMap::new();
        for m in &movements {
            if let Some(first) = arrivals.insert(m.dst.super_province(), &m.src) {
                return Err(StateError::ConflictingMovements {
                    first: first.clone(),
                    second: m.src.clone(),
                    dest: m.dst.clone(),
                });
            }
        }

        let mut lifted = Vec::with_capacity(movements.len());
        for m in &movements {
            let (src, unit) = self
                .remove_unit(&m.src)
                .ok_or_else(|| StateError::MissingMover(m.src.clone()))?;
            trace!(%unit, %src, "lifted");
            lifted.push((src, unit, m));
        }

        for (src, unit, m) in lifted {
            if let Some((victim_at, victim)) = self.remove_unit(&m.dst) {
                debug!(%victim, at = %victim_at, "dislodged");
                self.set_dislodged(victim_at.clone(), victim)?;
                if m.prevent_retreat {
                    self.set_dislodger(&src, &victim_at);
                }
            }
            trace!(%unit, dst = %m.dst, "dropped");
            self.set_unit(m.dst.clone(), unit)?;
        }
        Ok(())
    }

    /// Clears per-turn bookkeeping before validation.
    pub(crate) fn begin_turn(&mut self) {
        self.resolutions.clear();
        self.force_disbands.clear();
        self.movements.clear();
    }
}

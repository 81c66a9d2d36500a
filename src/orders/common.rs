//! Movement, convoy and strength helpers shared by the order kinds.
//!
//! Functions taking a `Judge` may consult order outcomes when asked to
//! (`resolve_convoys`); with a `Validator` they only look at the board.

use std::collections::BTreeSet;

use tracing::trace;

use super::{Judge, Validator};
use crate::board::graph::{Graph, Step};
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::{Found, State};
use crate::board::unit::UnitType;
use crate::error::OrderError;

/// Every unit (then every unitless order) for which `filter` holds.
///
/// The filter sees every candidate, so any outcome it resolves along the
/// way is resolved regardless of earlier matches.
pub fn find<F>(j: &mut dyn Judge, mut filter: F) -> Vec<Province>
where
    F: FnMut(&mut dyn Judge, &Found) -> bool,
{
    let candidates = j.state().found();
    let mut matches = Vec::new();
    for found in candidates {
        if filter(&mut *j, &found) {
            matches.push(found.province);
        }
    }
    matches
}

/// Whether a unit of `typ` can step directly from `src` to `dst`.
pub fn has_edge(graph: &Graph, typ: UnitType, src: &Province, dst: &Province) -> bool {
    let Some(edge) = graph.edge(src, dst) else {
        return false;
    };
    match typ {
        UnitType::Army => graph.flags(dst).land() && edge.land(),
        UnitType::Fleet => graph.flags(dst).sea() && edge.sea(),
    }
}

fn convoys_between(order: Option<&Order>, src: &Province, dst: &Province) -> bool {
    matches!(order, Some(Order::Convoy { from, to, .. }) if from.contains(src) && to.contains(dst))
}

/// Path filter admitting provinces that can take part in a convoy from
/// `src` to `dst`. With `dst_ok` the destination itself is admitted.
fn convoy_step(
    j: &mut dyn Judge,
    step: &Step<'_>,
    src: &Province,
    dst: &Province,
    resolve_convoys: bool,
    dst_ok: bool,
) -> bool {
    if dst_ok && step.province.contains(dst) && step.node.land() {
        return true;
    }
    if (step.node.land() || !step.node.sea()) && !step.node.convoyable() {
        return false;
    }
    let state = j.state();
    match state.unit(step.province) {
        Some((_, unit)) if unit.is_fleet() => {}
        _ => return false,
    }
    if !resolve_convoys {
        return true;
    }
    let key = match state.order(step.province) {
        Some((key, order)) if convoys_between(Some(order), src, dst) => key.clone(),
        _ => return false,
    };
    j.resolve(&key).is_ok()
}

/// A convoy route from `src` through the fleet at `via` to `dst`.
pub fn convoy_path_possible(
    j: &mut dyn Judge,
    via: &Province,
    src: &Province,
    dst: &Province,
    resolve_convoys: bool,
) -> Option<Vec<Province>> {
    let graph = j.state().graph_arc();
    let mut path = graph.path(src, Some(via), false, |step| {
        convoy_step(j, step, src, dst, resolve_convoys, false)
    })?;
    let rest = graph.path(via, Some(dst), false, |step| {
        convoy_step(j, step, src, dst, resolve_convoys, true)
    })?;
    path.extend(rest);
    Some(path)
}

fn convoy_path(
    j: &mut dyn Judge,
    src: &Province,
    dst: &Province,
    resolve_convoys: bool,
    via_nation: Option<&Nation>,
) -> Option<Vec<Province>> {
    if src == dst {
        return None;
    }
    let waypoints = find(j, |j, found| {
        let Some(unit) = &found.unit else {
            return false;
        };
        let flags = j.state().graph().flags(&found.province);
        if (flags.land() && !flags.convoyable())
            || !unit.is_fleet()
            || via_nation.is_some_and(|n| unit.nation != *n)
            || found.province.same_super(src)
            || found.province.same_super(dst)
        {
            return false;
        }
        let convoying = convoys_between(found.order.as_ref(), src, dst);
        if !resolve_convoys {
            return via_nation.is_none() || convoying;
        }
        convoying && j.resolve(&found.province).is_ok()
    });
    for via in &waypoints {
        if let Some(path) = convoy_path_possible(j, via, src, dst, resolve_convoys) {
            return Some(path);
        }
    }
    None
}

/// A convoy route between any coasts of `src` and `dst`.
///
/// Without `resolve_convoys` any fleet will do (only fleets of
/// `via_nation` convoying this exact move, if given). With it, only fleets
/// whose matching convoy order succeeds count.
pub fn any_convoy_path(
    j: &mut dyn Judge,
    src: &Province,
    dst: &Province,
    resolve_convoys: bool,
    via_nation: Option<&Nation>,
) -> Option<Vec<Province>> {
    let graph = j.state().graph_arc();
    if !graph.all_flags(src).sea() || !graph.all_flags(dst).sea() {
        return None;
    }
    if let Some(path) = convoy_path(j, src, dst, resolve_convoys, via_nation) {
        return Some(path);
    }
    for src_coast in graph.coasts(src) {
        for dst_coast in graph.coasts(dst) {
            if let Some(path) = convoy_path(j, &src_coast, &dst_coast, resolve_convoys, via_nation) {
                return Some(path);
            }
        }
    }
    None
}

/// Whether the army ordered to move from `src` travels by convoy: it has
/// no land route, or asked for a convoy that exists, or its own nation is
/// convoying it.
pub fn must_convoy(j: &mut dyn Judge, src: &Province) -> bool {
    let state = j.state();
    let nation = match state.unit(src) {
        Some((_, unit)) if unit.is_army() => unit.nation.clone(),
        _ => return false,
    };
    let (source, dest, via_convoy) = match state.order(src) {
        Some((
            _,
            Order::Move {
                source,
                dest,
                via_convoy,
            },
        )) => (source.clone(), dest.clone(), *via_convoy),
        _ => return false,
    };
    if !has_edge(state.graph(), UnitType::Army, &source, &dest) {
        return true;
    }
    (via_convoy && any_convoy_path(j, &source, &dest, true, None).is_some())
        || any_convoy_path(j, &source, &dest, false, Some(&nation)).is_some()
}

/// Coastal provinces an army at `src` could reach by convoy over the
/// fleets currently on the board, skipping the fleet at `no_convoy`.
pub fn convoy_destinations(
    state: &State,
    src: &Province,
    no_convoy: Option<&Province>,
) -> Vec<Province> {
    let mut coasts = Vec::new();
    state.graph().path(src, None, false, |step| {
        if !step.edge.sea() {
            return false;
        }
        if step.node.land() {
            if !step.trace.is_empty() {
                coasts.push(step.province.clone());
            }
            if !step.node.convoyable() {
                return false;
            }
        }
        if no_convoy == Some(step.province) {
            return false;
        }
        matches!(state.unit(step.province), Some((_, unit)) if unit.is_fleet())
    });
    coasts
}

/// Where a unit of `typ` at `src` could move, collapsing coasts into the
/// super-province where the super-province itself is reachable.
pub fn possible_moves_unit(
    state: &State,
    typ: UnitType,
    src: &Province,
    allow_convoy: bool,
    no_convoy: Option<&Province>,
) -> Vec<Province> {
    let graph = state.graph();
    let mut dsts = BTreeSet::new();
    match typ {
        UnitType::Army => {
            for (dst, edge) in graph.edges(src) {
                if edge.land() && graph.flags(dst).land() {
                    dsts.insert(dst.clone());
                }
            }
            if allow_convoy {
                for coast in graph.coasts(src) {
                    dsts.extend(convoy_destinations(state, &coast, no_convoy));
                }
            }
        }
        UnitType::Fleet => {
            for (dst, edge) in graph.edges(src) {
                if edge.sea() && graph.flags(dst).sea() {
                    dsts.insert(dst.clone());
                }
            }
        }
    }
    dsts.iter()
        .filter(|dst| dst.is_super() || !dsts.contains(&dst.super_province()))
        .cloned()
        .collect()
}

/// Destinations of the unit (or dislodged unit) found at `src`.
pub fn possible_moves(
    state: &State,
    src: &Province,
    allow_convoy: bool,
    dislodged: bool,
) -> Vec<Province> {
    let found = if dislodged {
        state.dislodged(src)
    } else {
        state.unit(src)
    };
    match found {
        Some((at, unit)) => possible_moves_unit(state, unit.unit_type, at, allow_convoy, None),
        None => Vec::new(),
    }
}

fn move_possible(
    j: &mut dyn Judge,
    typ: UnitType,
    src: &Province,
    dst: &Province,
    allow_convoy: bool,
    resolve_convoys: bool,
) -> Result<(), OrderError> {
    let graph = j.state().graph_arc();
    if !graph.has(src) {
        return Err(OrderError::InvalidSource);
    }
    if !graph.has(dst) {
        return Err(OrderError::InvalidDestination);
    }
    match typ {
        UnitType::Army => {
            if !graph.flags(dst).land() {
                return Err(OrderError::IllegalDestination);
            }
            if !allow_convoy {
                return match graph.edge(src, dst) {
                    None => Err(OrderError::IllegalMove),
                    Some(edge) if !edge.land() => Err(OrderError::IllegalDestination),
                    Some(_) => Ok(()),
                };
            }
            if resolve_convoys && must_convoy(j, src) {
                return any_convoy_path(j, src, dst, true, None)
                    .map(|_| ())
                    .ok_or(OrderError::MissingConvoyPath);
            }
            if !has_edge(&graph, typ, src, dst) {
                return any_convoy_path(j, src, dst, false, None)
                    .map(|_| ())
                    .ok_or(OrderError::MissingConvoyPath);
            }
            Ok(())
        }
        UnitType::Fleet => {
            if !graph.flags(dst).sea() {
                return Err(OrderError::IllegalDestination);
            }
            if !has_edge(&graph, typ, src, dst) {
                return Err(OrderError::IllegalMove);
            }
            Ok(())
        }
    }
}

/// Checks a move and returns the destination key it resolves to.
///
/// If `dst` itself does not work and is a super-province (or `lax` is
/// set), its coasts are tried: with `lax` the first working coast is
/// taken, otherwise only an unambiguous one.
pub fn any_move_possible(
    j: &mut dyn Judge,
    typ: UnitType,
    src: &Province,
    dst: &Province,
    lax: bool,
    allow_convoy: bool,
    resolve_convoys: bool,
) -> Result<Province, OrderError> {
    let err = match move_possible(j, typ, src, dst, allow_convoy, resolve_convoys) {
        Ok(()) => return Ok(dst.clone()),
        Err(err) => err,
    };
    if lax || dst.is_super() {
        let coasts = j.state().graph().coasts(dst);
        let mut working = Vec::new();
        for coast in coasts {
            if move_possible(j, typ, src, &coast, allow_convoy, resolve_convoys).is_ok() {
                working.push(coast);
            }
        }
        if lax || working.len() == 1 {
            if let Some(first) = working.into_iter().next() {
                return Ok(first);
            }
        }
    }
    Err(err)
}

/// Whether a unit at `src` could move into any part of `dst`, which is
/// what it takes to support into `dst`.
pub fn any_support_possible(
    state: &State,
    typ: UnitType,
    src: &Province,
    dst: &Province,
) -> Result<(), OrderError> {
    let mut view = Validator(state);
    let err = match move_possible(&mut view, typ, src, dst, false, false) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };
    for coast in state.graph().coasts(dst) {
        if move_possible(&mut view, typ, src, &coast, false, false).is_ok() {
            return Ok(());
        }
    }
    Err(err)
}

/// Whether the fleet at `fleet_at` could be part of a convoy chain that
/// ends at `endpoint`.
pub fn convoy_participation_possible(state: &State, fleet_at: &Province, endpoint: &Province) -> bool {
    let mut view = Validator(state);
    state
        .graph()
        .path(fleet_at, Some(endpoint), false, |step| {
            convoy_step(&mut view, step, fleet_at, endpoint, false, true)
        })
        .is_some()
}

/// A nation's supply-center balance and the adjustment orders that fit it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustmentStatus {
    /// Sources of the build orders that fit the surplus, earliest first.
    pub builds: Vec<Province>,
    /// Sources of the disband orders that fit the deficit, earliest first.
    pub disbands: Vec<Province>,
    /// Supply centers minus units.
    pub balance: i32,
}

pub fn adjustment_status(state: &State, nation: &Nation) -> AdjustmentStatus {
    let mut centers = 0i32;
    let mut builds = Vec::new();
    for (prov, owner) in state.supply_centers() {
        if owner != nation {
            continue;
        }
        centers += 1;
        if let Some((_, order @ Order::Build { .. })) = state.order(prov) {
            builds.push((order.at(), order.source().clone()));
        }
    }

    let mut units = 0i32;
    let mut disbands = Vec::new();
    for (prov, unit) in state.units() {
        if unit.nation != *nation {
            continue;
        }
        units += 1;
        if let Some((_, order @ Order::Disband { .. })) = state.order(prov) {
            disbands.push((order.at(), order.source().clone()));
        }
    }

    builds.sort();
    disbands.sort();
    let balance = centers - units;
    let allowed = balance.unsigned_abs() as usize;
    let take = |list: Vec<(u64, Province)>| -> Vec<Province> {
        list.into_iter().take(allowed).map(|(_, p)| p).collect()
    };
    let (builds, disbands) = match balance {
        b if b > 0 => (take(builds), Vec::new()),
        b if b < 0 => (Vec::new(), take(disbands)),
        _ => (Vec::new(), Vec::new()),
    };
    AdjustmentStatus {
        builds,
        disbands,
        balance,
    }
}

/// Successful supports for holding `prov`.
pub fn hold_support(j: &mut dyn Judge, prov: &Province) -> usize {
    find(j, |j, found| match (&found.order, &found.unit) {
        (Some(Order::SupportHold { target, .. }), Some(_))
            if !found.province.same_super(prov) && target.same_super(prov) =>
        {
            j.resolve(&found.province).is_ok()
        }
        _ => false,
    })
    .len()
}

/// Successful supports for the move from `src` to `dst`, not counting
/// supporters of the `forbidden` nation.
pub fn move_support(
    j: &mut dyn Judge,
    src: &Province,
    dst: &Province,
    forbidden: Option<&Nation>,
) -> usize {
    let supports = find(j, |j, found| match (&found.order, &found.unit) {
        (Some(Order::SupportMove { from, to, .. }), Some(unit))
            if from.contains(src) && to.contains(dst) =>
        {
            if forbidden == Some(&unit.nation) {
                return false;
            }
            j.resolve(&found.province).is_ok()
        }
        _ => false,
    });
    trace!(%src, %dst, count = supports.len(), "move support");
    supports.len()
}

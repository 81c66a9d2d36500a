//! Support orders, for holding units and for moves.

use tracing::debug;

use super::common::{any_move_possible, any_support_possible, find, possible_moves, possible_moves_unit};
use super::Validator;
use crate::board::options::{OptionValue, Options};
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::{PhaseType, State};
use crate::board::unit::UnitType;
use crate::error::{Inconsistency, OrderError, Resolution};
use crate::resolve::kruijswijk::Resolver;

/// Validates a support of the unit at `from`, moving to `to` if given.
pub fn validate(
    state: &State,
    source: &mut Province,
    from: &mut Province,
    to: Option<&mut Province>,
) -> Result<Nation, OrderError> {
    if state.phase().phase_type != PhaseType::Movement {
        return Err(OrderError::InvalidPhase);
    }
    if !state.graph().has(source) {
        return Err(OrderError::InvalidSource);
    }
    if !state.graph().has(from) {
        return Err(OrderError::InvalidTarget);
    }
    let (at, unit) = state.unit(source).ok_or(OrderError::MissingUnit)?;
    let unit = unit.clone();
    *source = at.clone();
    let (at, supported) = state.unit(from).ok_or(OrderError::MissingSupportUnit)?;
    let supported = supported.clone();
    *from = at.clone();

    match to {
        None => {
            any_support_possible(state, unit.unit_type, source, from)
                .map_err(|_| OrderError::IllegalSupportPosition)?;
        }
        Some(to) => {
            if !state.graph().has(to) {
                return Err(OrderError::InvalidTarget);
            }
            any_support_possible(state, unit.unit_type, source, to)
                .map_err(|_| OrderError::IllegalSupportDestination)?;
            let mut view = Validator(state);
            any_move_possible(&mut view, supported.unit_type, from, to, true, true, false)
                .map_err(|_| OrderError::IllegalSupportMove)?;
        }
    }
    Ok(unit.nation)
}

/// A support of a friendly unit should agree with that unit's own order.
/// Supporting a move needs the unit to be ordered there, and supporting a
/// hold needs it to stay.
pub fn corroborate(
    state: &State,
    source: &Province,
    from: &Province,
    to: Option<&Province>,
) -> Option<Inconsistency> {
    let (_, supporter) = state.unit(source)?;
    let (_, supported) = state.unit(from)?;
    if supported.nation != supporter.nation {
        return None;
    }
    let ordered_dest = state.order(from).and_then(|(_, order)| order.move_dest());
    let agrees = match (ordered_dest, to) {
        (Some(dest), Some(to)) => dest.super_province() == to.super_province(),
        (None, None) => true,
        _ => false,
    };
    (!agrees).then(|| Inconsistency::MismatchedSupporter(from.super_province()))
}

/// A support fails if a foreign unit could legally attack the supporter
/// from anywhere but the province the support is directed into, or if the
/// supporter is dislodged.
pub fn adjudicate(r: &mut Resolver<'_>, source: &Province, attacked: Option<&Province>) -> Resolution {
    let nation = r
        .unit(source)
        .map(|(_, u)| u.nation.clone())
        .ok_or(OrderError::MissingUnit)?;

    let breaks = find(r, |j, found| match (&found.order, &found.unit) {
        (Some(Order::Move { source: s, dest: d, .. }), Some(u))
            if d.same_super(source)
                && attacked.map_or(true, |a| !s.same_super(a))
                && u.nation != nation =>
        {
            any_move_possible(j, u.unit_type, s, d, u.is_army(), true, true).is_ok()
        }
        _ => false,
    });
    if let Some(by) = breaks.into_iter().next() {
        debug!(%source, %by, "support cut");
        return Err(OrderError::SupportBroken(by));
    }

    let dislodgers = find(r, |j, found| match (&found.order, &found.unit) {
        (Some(Order::Move { dest: d, .. }), Some(u)) if d.same_super(source) && u.nation != nation => {
            j.resolve(&found.province).is_ok()
        }
        _ => false,
    });
    if let Some(by) = dislodgers.into_iter().next() {
        debug!(%source, %by, "supporter dislodged");
        return Err(OrderError::SupportBroken(by));
    }
    Ok(())
}

/// Support options: supporter → supported unit → province supported into.
/// Supporting a hold names the supported unit's province twice.
pub fn options(state: &State, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    if !src.is_super() || state.phase().phase_type != PhaseType::Movement || !state.graph().has(src)
    {
        return result;
    }
    let Some((actual, supporter)) = state.unit(src) else {
        return result;
    };
    if supporter.nation != *nation {
        return result;
    }
    let actual = actual.clone();
    let graph = state.graph();
    let mut add = |from: Province, to: Province| {
        result.add_path([
            OptionValue::SrcProvince(actual.clone()),
            OptionValue::Province(from),
            OptionValue::Province(to),
        ]);
    };

    for supportable in possible_moves(state, src, false, false) {
        if let Some((held, _)) = state.unit(&supportable) {
            add(held.super_province(), held.super_province());
        }
        for mv_dst in graph.coasts(&supportable) {
            if mv_dst.same_super(&actual) {
                continue;
            }
            for candidate in possible_moves_unit(state, UnitType::Fleet, &mv_dst, false, None) {
                if candidate.same_super(&actual) {
                    continue;
                }
                match state.unit(&candidate.super_province()) {
                    Some((mv_src, unit)) if unit.is_fleet() && *mv_src == candidate => {
                        add(mv_src.super_province(), mv_dst.super_province());
                    }
                    _ => {}
                }
            }
            for candidate in possible_moves_unit(state, UnitType::Army, &mv_dst, true, Some(&actual)) {
                if candidate.same_super(&actual) {
                    continue;
                }
                match state.unit(&candidate) {
                    Some((mv_src, unit)) if unit.is_army() => {
                        add(mv_src.super_province(), mv_dst.super_province());
                    }
                    _ => {}
                }
            }
        }
    }
    result
}

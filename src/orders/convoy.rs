//! Convoy orders.

use super::common::{any_convoy_path, convoy_participation_possible, find};
use super::Validator;
use crate::board::options::{OptionValue, Options};
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::{PhaseType, State};
use crate::error::{Inconsistency, OrderError, Resolution};
use crate::resolve::kruijswijk::Resolver;

pub fn validate(
    state: &State,
    source: &mut Province,
    from: &mut Province,
    to: &Province,
) -> Result<Nation, OrderError> {
    if state.phase().phase_type != PhaseType::Movement {
        return Err(OrderError::InvalidPhase);
    }
    let graph = state.graph();
    if !graph.has(source) {
        return Err(OrderError::InvalidSource);
    }
    if !graph.has(from) || !graph.has(to) {
        return Err(OrderError::InvalidTarget);
    }
    for coast in graph.coasts(source) {
        let flags = graph.flags(&coast);
        if flags.land() && !flags.convoyable() {
            return Err(OrderError::IllegalConvoyPath);
        }
    }
    let (at, convoyer) = state.unit(source).ok_or(OrderError::MissingUnit)?;
    if !convoyer.is_fleet() {
        return Err(OrderError::IllegalConvoyer);
    }
    let nation = convoyer.nation.clone();
    *source = at.clone();
    let (at, convoyee) = state.unit(from).ok_or(OrderError::MissingConvoyee)?;
    if !convoyee.is_army() {
        return Err(OrderError::IllegalConvoyee);
    }
    *from = at.clone();
    if any_convoy_path(&mut Validator(state), from, to, false, None).is_none() {
        return Err(OrderError::IllegalConvoyMove);
    }
    Ok(nation)
}

/// Convoying a friendly army only makes sense if that army is ordered to
/// move along the same route.
pub fn corroborate(
    state: &State,
    source: &Province,
    from: &Province,
    to: &Province,
) -> Option<Inconsistency> {
    let (_, convoyer) = state.unit(source)?;
    let (_, convoyee) = state.unit(from)?;
    if convoyee.nation != convoyer.nation {
        return None;
    }
    let agrees = matches!(
        state.order(from),
        Some((_, Order::Move { source: start, dest, .. }))
            if start.super_province() == from.super_province()
                && dest.super_province() == to.super_province()
    );
    (!agrees).then(|| Inconsistency::MismatchedConvoyer(from.super_province()))
}

/// A convoy fails when a foreign move into the fleet's own province
/// succeeds.
pub fn adjudicate(r: &mut Resolver<'_>, source: &Province) -> Resolution {
    let nation = r
        .unit(source)
        .map(|(_, u)| u.nation.clone())
        .ok_or(OrderError::MissingUnit)?;
    let attackers = find(r, |j, found| match (&found.order, &found.unit) {
        (Some(Order::Move { dest, .. }), Some(unit)) if dest == source && unit.nation != nation => {
            j.resolve(&found.province).is_ok()
        }
        _ => false,
    });
    match attackers.into_iter().next() {
        Some(by) => Err(OrderError::ConvoyDislodged(by)),
        None => Ok(()),
    }
}

/// Convoy options: fleet → army that could be carried → where it could land.
pub fn options(state: &State, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    if !src.is_super() || state.phase().phase_type != PhaseType::Movement || !state.graph().has(src)
    {
        return result;
    }
    let graph = state.graph();
    let actual = match state.unit(src) {
        Some((at, unit)) if unit.is_fleet() && unit.nation == *nation => at.clone(),
        _ => return result,
    };
    let flags = graph.flags(&actual);
    if flags.land() && !flags.convoyable() {
        return result;
    }

    let mut sources = Vec::new();
    let mut destinations = Vec::new();
    for endpoint in graph.provinces() {
        if !graph.flags(&endpoint).land() {
            continue;
        }
        if convoy_participation_possible(state, &actual, &endpoint) {
            if matches!(state.unit(&endpoint), Some((_, unit)) if unit.is_army()) {
                sources.push(endpoint.clone());
            }
            destinations.push(endpoint);
        }
    }
    for from in &sources {
        for to in &destinations {
            if from.same_super(to) {
                continue;
            }
            result.add_path([
                OptionValue::SrcProvince(actual.clone()),
                OptionValue::Province(from.clone()),
                OptionValue::Province(to.clone()),
            ]);
        }
    }
    result
}

//! Hold and move orders.

use tracing::{debug, trace};

use super::common::{
    any_convoy_path, any_move_possible, find, hold_support, move_support, must_convoy,
    possible_moves,
};
use super::Validator;
use crate::board::options::{OptionValue, Options};
use crate::board::order::Order;
use crate::board::province::{Nation, Province};
use crate::board::state::{PhaseType, State};
use crate::board::unit::UnitType;
use crate::error::{OrderError, Resolution, StateError};
use crate::resolve::kruijswijk::Resolver;

pub fn validate_hold(state: &State, source: &mut Province) -> Result<Nation, OrderError> {
    if state.phase().phase_type != PhaseType::Movement {
        return Err(OrderError::InvalidPhase);
    }
    if !state.graph().has(source) {
        return Err(OrderError::InvalidTarget);
    }
    let (at, unit) = state.unit(source).ok_or(OrderError::MissingUnit)?;
    let nation = unit.nation.clone();
    *source = at.clone();
    Ok(nation)
}

pub fn hold_options(state: &State, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    if !src.is_super() || state.phase().phase_type != PhaseType::Movement || !state.graph().has(src)
    {
        return result;
    }
    if let Some((at, unit)) = state.unit(src) {
        if unit.nation == *nation {
            result.add_path([OptionValue::SrcProvince(at.clone())]);
        }
    }
    result
}

pub fn validate_move(
    state: &State,
    source: &mut Province,
    dest: &mut Province,
) -> Result<Nation, OrderError> {
    let phase = state.phase().phase_type;
    if phase != PhaseType::Movement && phase != PhaseType::Retreat {
        return Err(OrderError::InvalidPhase);
    }
    if !state.graph().has(source) {
        return Err(OrderError::InvalidSource);
    }
    if !state.graph().has(dest) {
        return Err(OrderError::InvalidDestination);
    }
    if source == dest {
        return Err(OrderError::IllegalMove);
    }
    let mut view = Validator(state);

    if phase == PhaseType::Retreat {
        let (at, unit) = state.dislodged(source).ok_or(OrderError::MissingUnit)?;
        let unit = unit.clone();
        *source = at.clone();
        *dest = any_move_possible(&mut view, unit.unit_type, source, dest, unit.is_army(), false, false)
            .map_err(|_| OrderError::IllegalMove)?;
        if state.unit(dest).is_some() || state.bounce(source, dest) {
            return Err(OrderError::IllegalRetreat);
        }
        return Ok(unit.nation);
    }

    let (at, unit) = state.unit(source).ok_or(OrderError::MissingUnit)?;
    let unit = unit.clone();
    *source = at.clone();
    *dest = any_move_possible(&mut view, unit.unit_type, source, dest, unit.is_army(), true, false)?;
    Ok(unit.nation)
}

pub fn adjudicate_move(r: &mut Resolver<'_>, source: &Province, dest: &Province) -> Resolution {
    if r.phase().phase_type == PhaseType::Movement {
        adjudicate_movement_phase(r, source, dest)
    } else {
        adjudicate_retreat_phase(r, source, dest)
    }
}

/// Retreats into the same province all fail.
fn adjudicate_retreat_phase(r: &Resolver<'_>, source: &Province, dest: &Province) -> Resolution {
    for (prov, order) in r.orders() {
        if prov.same_super(source) {
            continue;
        }
        if let Order::Move {
            source: other,
            dest: other_dest,
            ..
        } = order
        {
            if other_dest.same_super(dest) {
                return Err(OrderError::Bounce(other.clone()));
            }
        }
    }
    Ok(())
}

fn adjudicate_movement_phase(r: &mut Resolver<'_>, source: &Province, dest: &Province) -> Resolution {
    let unit = r
        .unit(source)
        .map(|(_, u)| u.clone())
        .ok_or(OrderError::MissingUnit)?;

    let convoyed = must_convoy(r, source);
    if convoyed && any_convoy_path(r, source, dest, true, None).is_none() {
        return Err(OrderError::MissingConvoyPath);
    }

    adjudicate_against_competition(r, source, dest, None)?;

    let mut forbidden = None;
    let victim = r.unit(dest).map(|(_, u)| u.clone());
    if let Some(victim) = victim {
        forbidden = Some(victim.nation.clone());
        let attack = move_support(r, source, dest, Some(&victim.nation)) + 1;
        let victim_order = r.order(dest).map(|(k, o)| (k.clone(), o.clone()));
        match victim_order {
            Some((
                key,
                Order::Move {
                    source: victim_src,
                    dest: victim_dest,
                    ..
                },
            )) => {
                let victim_convoyed = must_convoy(r, &victim_src);
                if !convoyed && !victim_convoyed && victim_dest.same_super(source) {
                    let defence = move_support(r, &victim_src, &victim_dest, Some(&unit.nation)) + 1;
                    trace!(%source, %dest, attack, defence, "head to head");
                    if victim.nation == unit.nation || defence >= attack {
                        return Err(OrderError::Bounce(dest.clone()));
                    }
                } else if r.resolve(&key).is_ok() {
                    // The occupant leaves, so its nation may support us again.
                    forbidden = None;
                } else if victim.nation == unit.nation || 1 >= attack {
                    return Err(OrderError::Bounce(dest.clone()));
                }
            }
            _ => {
                let hold = hold_support(r, dest) + 1;
                trace!(%source, %dest, attack, hold, "attack on holding unit");
                if victim.nation == unit.nation || hold >= attack {
                    return Err(OrderError::Bounce(dest.clone()));
                }
            }
        }
    }

    adjudicate_against_competition(r, source, dest, forbidden.as_ref())
}

/// Fails the move if another move into the same province is at least as
/// strong and not itself beaten in a head-to-head battle.
fn adjudicate_against_competition(
    r: &mut Resolver<'_>,
    source: &Province,
    dest: &Province,
    forbidden: Option<&Nation>,
) -> Resolution {
    let competitors: Vec<(Province, Province, Nation)> = r
        .found()
        .into_iter()
        .filter_map(|found| match (found.order, found.unit) {
            (Some(Order::Move { source: s, dest: d, .. }), Some(u))
                if s != *source && d.same_super(dest) =>
            {
                Some((s, d, u.nation))
            }
            _ => None,
        })
        .collect();

    for (comp_src, comp_dest, comp_nation) in competitors {
        let attack = move_support(r, source, dest, forbidden) + 1;
        let strength = move_support(r, &comp_src, &comp_dest, None) + 1;
        if strength < attack {
            continue;
        }
        trace!(%source, %comp_src, %dest, attack, strength, "competition");
        if must_convoy(r, &comp_src) {
            if any_convoy_path(r, &comp_src, &comp_dest, true, None).is_some() {
                r.add_bounce(source, dest);
                return Err(OrderError::Bounce(comp_src));
            }
            continue;
        }
        // A competitor dislodged by a head-to-head attack from where it is
        // going cannot hold us back.
        let dislodgers = find(r, |j, found| match (&found.order, &found.unit) {
            (Some(Order::Move { source: s, dest: d, .. }), Some(u))
                if d.same_super(&comp_src)
                    && s.same_super(&comp_dest)
                    && u.nation != comp_nation =>
            {
                !must_convoy(j, s) && j.resolve(&found.province).is_ok()
            }
            _ => false,
        });
        if dislodgers.is_empty() {
            r.add_bounce(source, dest);
            return Err(OrderError::Bounce(comp_src));
        }
        debug!(competitor = %comp_src, by = ?dislodgers, "competitor dislodged head to head");
    }
    Ok(())
}

pub fn execute_move(r: &mut Resolver<'_>, source: &Province, dest: &Province) -> Result<(), StateError> {
    if r.phase().phase_type == PhaseType::Retreat {
        return r.state_mut().retreat(source, dest.clone());
    }
    let prevent_retreat = !must_convoy(r, source);
    r.state_mut()
        .move_unit(source.clone(), dest.clone(), prevent_retreat);
    Ok(())
}

pub fn move_options(state: &State, nation: &Nation, src: &Province, via_convoy: bool) -> Options {
    let mut result = Options::new();
    if !state.graph().has(src) {
        return result;
    }
    match state.phase().phase_type {
        PhaseType::Retreat if !via_convoy => {
            let Some((at, unit)) = state.dislodged(src) else {
                return result;
            };
            if unit.nation != *nation {
                return result;
            }
            for dst in possible_moves(state, src, false, true) {
                if state.unit(&dst).is_none() && !state.bounce(src, &dst) {
                    result.add_path([
                        OptionValue::SrcProvince(at.clone()),
                        OptionValue::Province(dst),
                    ]);
                }
            }
        }
        PhaseType::Movement => {
            let Some((at, unit)) = state.unit(src) else {
                return result;
            };
            if unit.nation != *nation || (via_convoy && unit.unit_type != UnitType::Army) {
                return result;
            }
            let mut view = Validator(state);
            for dst in possible_moves(state, src, true, false) {
                if via_convoy
                    && any_convoy_path(&mut view, src, &dst, false, None).map_or(true, |p| p.len() < 2)
                {
                    continue;
                }
                result.add_path([
                    OptionValue::SrcProvince(at.clone()),
                    OptionValue::Province(dst),
                ]);
            }
        }
        _ => {}
    }
    result
}

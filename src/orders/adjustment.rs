//! Build and disband orders.
//!
//! When a nation orders more builds (or disbands) than its balance allows,
//! the orders with the earliest stamps are the ones carried out; ties go to
//! the alphabetically first province.

use tracing::debug;

use super::common::adjustment_status;
use crate::board::options::{OptionValue, Options};
use crate::board::province::{Nation, Province};
use crate::board::state::{PhaseType, State};
use crate::board::unit::{Unit, UnitType};
use crate::error::{OrderError, Resolution, StateError};
use crate::resolve::kruijswijk::Resolver;

/// The nation entitled to build at `p`: its current owner, provided it is
/// also the home nation or builds are allowed anywhere.
fn build_owner(state: &State, p: &Province) -> Result<Nation, OrderError> {
    let (_, owner) = state
        .supply_center(p)
        .ok_or(OrderError::MissingSupplyCenter)?;
    let home = state
        .graph()
        .sc(&p.super_province())
        .ok_or(OrderError::MissingSupplyCenter)?;
    if home != owner && !state.config().build_anywhere {
        return Err(OrderError::HostileSupplyCenter);
    }
    Ok(owner.clone())
}

pub fn validate_build(
    state: &State,
    source: &Province,
    unit_type: UnitType,
) -> Result<Nation, OrderError> {
    if state.phase().phase_type != PhaseType::Adjustment {
        return Err(OrderError::InvalidPhase);
    }
    let owner = build_owner(state, source)?;
    if state.unit(source).is_some() {
        return Err(OrderError::OccupiedSupplyCenter);
    }
    // `set_order` already refuses a second order on the same province, so
    // this only fires for stores filled around it.
    for coast in state.graph().coasts(source) {
        if coast != *source && state.orders().contains_key(&coast) {
            return Err(OrderError::DoubleBuild(vec![coast, source.clone()]));
        }
    }
    if adjustment_status(state, &owner).balance < 1 {
        return Err(OrderError::MissingSurplus);
    }
    let flags = state.graph().flags(source);
    let fits = match unit_type {
        UnitType::Army => flags.land(),
        UnitType::Fleet => flags.sea(),
    };
    if !fits {
        return Err(OrderError::IllegalUnitType);
    }
    Ok(owner)
}

pub fn adjudicate_build(r: &Resolver<'_>, source: &Province) -> Resolution {
    let (_, owner) = r
        .supply_center(source)
        .ok_or(OrderError::MissingSupplyCenter)?;
    if adjustment_status(r, owner).builds.contains(source) {
        Ok(())
    } else {
        Err(OrderError::IllegalBuild)
    }
}

pub fn execute_build(state: &mut State, source: &Province, unit_type: UnitType) -> Result<(), StateError> {
    let Some((_, owner)) = state.supply_center(source) else {
        return Ok(());
    };
    let unit = Unit::new(unit_type, owner.clone());
    debug!(%unit, at = %source, "built");
    state.set_unit(source.clone(), unit)
}

/// Build options: unit type → where to put it. Armies go in the main
/// province, fleets on the coast asked about.
pub fn build_options(state: &State, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    let graph = state.graph();
    if state.phase().phase_type != PhaseType::Adjustment
        || (src.is_super() && graph.coasts(src).len() > 1)
    {
        return result;
    }
    let already_ordered = graph
        .coasts(src)
        .iter()
        .any(|coast| matches!(state.order(coast), Some((key, _)) if key == src));
    if already_ordered {
        return result;
    }
    match build_owner(state, src) {
        Ok(owner) if owner == *nation => {}
        _ => return result,
    }
    if state.unit(src).is_some() || adjustment_status(state, nation).balance < 1 {
        return result;
    }
    let sup = src.super_province();
    if graph.flags(src).land() || graph.flags(&sup).land() {
        result.add_path([
            OptionValue::UnitType(UnitType::Army),
            OptionValue::SrcProvince(sup.clone()),
        ]);
    }
    if graph.flags(src).sea() || graph.flags(&sup).sea() {
        result.add_path([
            OptionValue::UnitType(UnitType::Fleet),
            OptionValue::SrcProvince(src.clone()),
        ]);
    }
    result
}

pub fn validate_disband(state: &State, source: &mut Province) -> Result<Nation, OrderError> {
    let phase = state.phase().phase_type;
    if phase != PhaseType::Adjustment && phase != PhaseType::Retreat {
        return Err(OrderError::InvalidPhase);
    }
    if !state.graph().has(source) {
        return Err(OrderError::InvalidTarget);
    }
    if phase == PhaseType::Retreat {
        let (at, unit) = state.dislodged(source).ok_or(OrderError::MissingUnit)?;
        let nation = unit.nation.clone();
        *source = at.clone();
        return Ok(nation);
    }
    let (at, unit) = state.unit(source).ok_or(OrderError::MissingUnit)?;
    let nation = unit.nation.clone();
    *source = at.clone();
    if adjustment_status(state, &nation).balance > -1 {
        return Err(OrderError::MissingDeficit);
    }
    Ok(nation)
}

pub fn adjudicate_disband(r: &Resolver<'_>, source: &Province) -> Resolution {
    if r.phase().phase_type != PhaseType::Adjustment {
        return Ok(());
    }
    let (_, unit) = r.unit(source).ok_or(OrderError::MissingUnit)?;
    if adjustment_status(r, &unit.nation).disbands.contains(source) {
        Ok(())
    } else {
        Err(OrderError::IllegalDisband)
    }
}

pub fn execute_disband(state: &mut State, source: &Province) {
    let removed = if state.phase().phase_type == PhaseType::Adjustment {
        state.remove_unit(source)
    } else {
        state.remove_dislodged(source)
    };
    if let Some((at, unit)) = removed {
        debug!(%unit, %at, "disbanded");
    }
}

pub fn disband_options(state: &State, nation: &Nation, src: &Province) -> Options {
    let mut result = Options::new();
    if !src.is_super() || !state.graph().has(src) {
        return result;
    }
    let found = match state.phase().phase_type {
        PhaseType::Adjustment => state
            .unit(src)
            .filter(|(_, unit)| adjustment_status(state, &unit.nation).balance < 0),
        PhaseType::Retreat => state.dislodged(src),
        PhaseType::Movement => None,
    };
    if let Some((at, unit)) = found {
        if unit.nation == *nation {
            result.add_path([OptionValue::SrcProvince(at.clone())]);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::order::Order;
    use crate::board::state::{Phase, Season};
    use crate::classical::{self, RUSSIA};

    fn russian_adjustment() -> State {
        let mut state = classical::blank(Phase::new(1901, Season::Fall, PhaseType::Adjustment));
        state.set_supply_center("stp".into(), RUSSIA);
        state.set_supply_center("mos".into(), RUSSIA);
        state
    }

    #[test]
    fn build_on_both_coasts_is_a_double_build() {
        let mut state = russian_adjustment();
        state
            .orders
            .insert("stp/nc".into(), Order::build("stp/nc", UnitType::Fleet, 1));
        state
            .orders
            .insert("stp/sc".into(), Order::build("stp/sc", UnitType::Fleet, 2));

        let err = validate_build(&state, &"stp/sc".into(), UnitType::Fleet).unwrap_err();
        assert_eq!(
            err,
            OrderError::DoubleBuild(vec!["stp/nc".into(), "stp/sc".into()])
        );

        state.next().unwrap();
        assert_eq!(state.units().len(), 1);
        assert_eq!(
            state.resolution(&"stp/nc".into()),
            Some(&Err(OrderError::DoubleBuild(vec!["stp/sc".into(), "stp/nc".into()])))
        );
        assert!(state.unit(&"stp/sc".into()).is_some());
    }

    #[test]
    fn sibling_coast_order_is_refused_on_submission() {
        let mut state = russian_adjustment();
        state
            .set_order("stp/nc".into(), Order::build("stp/nc", UnitType::Fleet, 1))
            .unwrap();
        assert!(state
            .set_order("stp/sc".into(), Order::build("stp/sc", UnitType::Fleet, 2))
            .is_err());
    }

    #[test]
    fn build_needs_a_home_center() {
        let mut state = russian_adjustment();
        state.set_supply_center("ber".into(), RUSSIA);
        assert_eq!(
            validate_build(&state, &"ber".into(), UnitType::Army),
            Err(OrderError::HostileSupplyCenter)
        );
        assert_eq!(
            validate_build(&state, &"mos".into(), UnitType::Fleet),
            Err(OrderError::IllegalUnitType)
        );
        assert_eq!(validate_build(&state, &"mos".into(), UnitType::Army), Ok(RUSSIA));
    }
}

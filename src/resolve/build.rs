//! Civil disorder: which units a nation loses when it ends an adjustment
//! phase with more units than supply centers and too few disband orders.
//!
//! Units farthest from home go first. Distance is the number of steps to
//! the nearest home supply center; fleets count sea steps, armies count
//! land steps and may hop through sea provinces held by their own fleets.
//! Equal distances put fleets before armies, then sort by province name.

use std::cmp::Reverse;

use tracing::debug;

use crate::board::graph::Step;
use crate::board::province::{Nation, Province};
use crate::board::state::State;
use crate::board::unit::{Unit, UnitType};

/// Steps from the unit at `src` to the nearest of `dsts`, or `None` if
/// there is no unit at `src` or no destination is reachable.
///
/// A route honoring the unit's movement rules is preferred; if none
/// exists the plain graph distance is used.
pub fn shortest_distance(state: &State, src: &Province, dsts: &[Province]) -> Option<usize> {
    let (src, unit) = state.unit(src)?;
    let graph = state.graph();
    let mut best: Option<usize> = None;
    let mut keep = |len: usize| {
        if best.map_or(true, |b| len < b) {
            best = Some(len);
        }
    };

    for destination in dsts {
        let target = destination.super_province();
        for coast in graph.coasts(destination) {
            for src_coast in graph.coasts(src) {
                if src_coast == *destination {
                    keep(0);
                    continue;
                }
                let filtered = graph.path(&src_coast, Some(&coast), false, |step| {
                    movable(state, unit, &target, step)
                });
                match filtered {
                    Some(path) => keep(path.len()),
                    None => {
                        if let Some(path) = graph.path(&src_coast, Some(&coast), false, |_| true) {
                            keep(path.len());
                        }
                    }
                }
            }
        }
    }
    best
}

fn movable(state: &State, unit: &Unit, target: &Province, step: &Step<'_>) -> bool {
    match unit.unit_type {
        UnitType::Fleet => step.edge.sea() && step.node.sea(),
        UnitType::Army => {
            if step.province.same_super(target) {
                return true;
            }
            if step.edge.land() && step.node.land() {
                return true;
            }
            !step.node.land()
                && matches!(
                    state.unit(step.province),
                    Some((_, u)) if u.nation == unit.nation && u.is_fleet()
                )
        }
    }
}

/// Units of `nation` in the order they are removed by civil disorder.
pub fn sorted_units(state: &State, nation: &Nation) -> Vec<Province> {
    let homes = state.graph().scs(nation);
    let mut ranked: Vec<(Reverse<usize>, UnitType, Province)> = state
        .units()
        .iter()
        .filter(|(_, unit)| unit.nation == *nation)
        .map(|(prov, unit)| {
            let distance = shortest_distance(state, prov, &homes).unwrap_or(0);
            // Fleets sort before armies.
            let rank = match unit.unit_type {
                UnitType::Fleet => UnitType::Army,
                UnitType::Army => UnitType::Fleet,
            };
            (Reverse(distance), rank, prov.clone())
        })
        .collect();
    ranked.sort();
    let result: Vec<Province> = ranked.into_iter().map(|(_, _, p)| p).collect();
    debug!(%nation, units = ?result, "sorted units for civil disorder");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::{Phase, PhaseType, Season};
    use crate::classical::{self, ENGLAND, RUSSIA, TURKEY};

    fn adjustment() -> State {
        classical::blank(Phase::new(1901, Season::Fall, PhaseType::Adjustment))
    }

    #[test]
    fn unit_on_home_center_is_zero_away() {
        let mut state = adjustment();
        state.set_unit("mos".into(), Unit::army(RUSSIA)).unwrap();
        let homes = state.graph().scs(&RUSSIA);
        assert_eq!(shortest_distance(&state, &"mos".into(), &homes), Some(0));
    }

    #[test]
    fn no_unit_no_distance() {
        let state = adjustment();
        let homes = state.graph().scs(&RUSSIA);
        assert_eq!(shortest_distance(&state, &"ukr".into(), &homes), None);
    }

    #[test]
    fn army_counts_land_steps() {
        let mut state = adjustment();
        state.set_unit("gal".into(), Unit::army(RUSSIA)).unwrap();
        let homes = state.graph().scs(&RUSSIA);
        // gal -> war
        assert_eq!(shortest_distance(&state, &"gal".into(), &homes), Some(1));
    }

    #[test]
    fn fleet_stays_at_sea() {
        let mut state = adjustment();
        state.set_unit("nth".into(), Unit::fleet(ENGLAND)).unwrap();
        let homes = state.graph().scs(&ENGLAND);
        // nth -> edi, nth -> lon
        assert_eq!(shortest_distance(&state, &"nth".into(), &homes), Some(1));
    }

    #[test]
    fn farthest_first_then_fleets_then_names() {
        let mut state = adjustment();
        state.set_unit("ank".into(), Unit::fleet(TURKEY)).unwrap();
        state.set_unit("con".into(), Unit::army(TURKEY)).unwrap();
        state.set_unit("bul".into(), Unit::army(TURKEY)).unwrap();
        state.set_unit("bla".into(), Unit::fleet(TURKEY)).unwrap();
        state.set_unit("arm".into(), Unit::army(TURKEY)).unwrap();
        let order = sorted_units(&state, &TURKEY);
        // bla (fleet) and arm/bul (armies) are one step out; homes are zero.
        assert_eq!(
            order,
            vec![
                Province::from("bla"),
                Province::from("arm"),
                Province::from("bul"),
                Province::from("ank"),
                Province::from("con"),
            ]
        );
    }

    #[test]
    fn other_nations_are_ignored() {
        let mut state = adjustment();
        state.set_unit("mos".into(), Unit::army(RUSSIA)).unwrap();
        state.set_unit("lon".into(), Unit::fleet(ENGLAND)).unwrap();
        assert_eq!(sorted_units(&state, &RUSSIA), vec![Province::from("mos")]);
    }
}

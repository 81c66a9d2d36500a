//! Phase sequencing and end-of-phase cleanup.
//!
//! Phase flow:
//! - Movement   -> Retreat (same season)
//! - Spring Retreat -> Fall Movement
//! - Fall Retreat   -> Fall Adjustment
//! - Adjustment -> Spring Movement (next year)

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::build::sorted_units;
use crate::board::order::{Order, OrderType};
use crate::board::province::{Nation, Province};
use crate::board::state::{Phase, PhaseType, Season, State};
use crate::error::{Inconsistency, OrderError, StateError};
use crate::orders::common::{adjustment_status, has_edge};

impl Phase {
    pub fn next(&self) -> Phase {
        match (self.phase_type, self.season) {
            (PhaseType::Movement, season) => Phase::new(self.year, season, PhaseType::Retreat),
            (PhaseType::Retreat, Season::Spring) => {
                Phase::new(self.year, Season::Fall, PhaseType::Movement)
            }
            (PhaseType::Retreat, Season::Fall) => {
                Phase::new(self.year, Season::Fall, PhaseType::Adjustment)
            }
            (PhaseType::Adjustment, _) => {
                Phase::new(self.year + 1, Season::Spring, PhaseType::Movement)
            }
        }
    }

    /// The order given to a unit left without one. Only movement phases
    /// have a default; retreats and adjustments fall to post-processing.
    pub fn default_order(&self, p: &Province) -> Option<Order> {
        match self.phase_type {
            PhaseType::Movement => Some(Order::hold(p.clone())),
            _ => None,
        }
    }

    /// Cleanup after movements are applied and before the phase advances.
    pub fn post_process(&self, state: &mut State) -> Result<(), StateError> {
        match self.phase_type {
            PhaseType::Retreat => {
                let stranded: Vec<Province> = state.dislodgeds().keys().cloned().collect();
                for prov in stranded {
                    state.remove_dislodged(&prov);
                    info!(%prov, "removed unit that did not retreat");
                    state.set_resolution(prov.clone(), Err(OrderError::ForcedDisband));
                    state.force_disband(prov);
                }
                state.clear_dislodgers();
                state.clear_bounces();
            }
            PhaseType::Adjustment => {
                for nation in state.graph().nations() {
                    let balance = adjustment_status(state, &nation).balance;
                    if balance >= 0 {
                        continue;
                    }
                    let excess = balance.unsigned_abs() as usize;
                    for prov in sorted_units(state, &nation).into_iter().take(excess) {
                        state.remove_unit(&prov);
                        info!(%nation, %prov, "removed unit that was not disbanded by order");
                        state.set_resolution(prov.clone(), Err(OrderError::ForcedDisband));
                        state.force_disband(prov);
                    }
                }
            }
            PhaseType::Movement => {
                let dislodgeds: Vec<(Province, _)> = state
                    .dislodgeds()
                    .iter()
                    .map(|(p, u)| (p.clone(), u.unit_type))
                    .collect();
                for (prov, unit_type) in dislodgeds {
                    let retreat = state.graph().edges(&prov).find_map(|(dst, _)| {
                        let open = state.unit(dst).is_none()
                            && !state.bounce(&prov, dst)
                            && has_edge(state.graph(), unit_type, &prov, dst);
                        open.then(|| dst.clone())
                    });
                    match retreat {
                        Some(dst) => debug!(%prov, %dst, "can retreat"),
                        None => {
                            state.remove_dislodged(&prov);
                            info!(%prov, "removed dislodged unit with no retreat");
                            state.force_disband(prov);
                        }
                    }
                }
            }
        }

        if state.rules().adjusts_supply_centers(self) {
            let captures: Vec<(Province, Nation)> = state
                .units()
                .iter()
                .filter(|(prov, _)| state.graph().sc(prov).is_some())
                .map(|(prov, unit)| (prov.super_province(), unit.nation.clone()))
                .collect();
            for (prov, nation) in captures {
                if state.supply_center(&prov).map(|(_, owner)| owner) != Some(&nation) {
                    info!(%prov, %nation, "supply center captured");
                }
                state.set_supply_center(prov, nation);
            }
        }
        Ok(())
    }

    /// Status lines for `nation`: build and disband counts for everyone
    /// during adjustments, pending retreats during retreats.
    pub fn messages(&self, state: &State, nation: &Nation) -> Vec<String> {
        match self.phase_type {
            PhaseType::Adjustment => allowed_build_balance(state)
                .into_iter()
                .map(|(nat, delta)| match (nat == *nation, delta < 0) {
                    (true, true) => format!("MustDisband:{}", -delta),
                    (true, false) => format!("MayBuild:{}", delta),
                    (false, true) => format!("OtherMustDisband:{}:{}", nat, -delta),
                    (false, false) => format!("OtherMayBuild:{}:{}", nat, delta),
                })
                .collect(),
            PhaseType::Retreat => state
                .dislodgeds()
                .iter()
                .filter(|(_, unit)| unit.nation == *nation)
                .map(|(prov, _)| format!("MustRetreat:{}", prov))
                .collect(),
            PhaseType::Movement => Vec::new(),
        }
    }

    /// Problems with `nation`'s pending orders, keyed by the province they
    /// concern when there is one. Nothing here changes adjudication.
    pub fn corroborate(
        &self,
        state: &State,
        nation: &Nation,
    ) -> Vec<(Option<Province>, Inconsistency)> {
        let mut found = Vec::new();
        match self.phase_type {
            PhaseType::Movement | PhaseType::Retreat => {
                let units = if self.phase_type == PhaseType::Movement {
                    state.units()
                } else {
                    state.dislodgeds()
                };
                for (prov, unit) in units {
                    if unit.nation == *nation && state.order(prov).is_none() {
                        found.push((Some(prov.super_province()), Inconsistency::MissingOrder));
                    }
                }
            }
            PhaseType::Adjustment => {
                let (mut builds, mut disbands) = (0, 0);
                for order in state.orders().values() {
                    let mut order = order.clone();
                    if !matches!(order.validate(state), Ok(owner) if owner == *nation) {
                        continue;
                    }
                    match order.order_type() {
                        OrderType::Build => builds += 1,
                        OrderType::Disband => disbands += 1,
                        _ => {}
                    }
                }
                let balance = allowed_build_balance(state)
                    .get(nation)
                    .copied()
                    .unwrap_or(0);
                let want_builds = balance.max(0).unsigned_abs() as usize;
                let want_disbands = balance.min(0).unsigned_abs() as usize;
                for (order_type, count, want) in [
                    (OrderType::Build, builds, want_builds),
                    (OrderType::Disband, disbands, want_disbands),
                ] {
                    if count != want {
                        found.push((
                            None,
                            Inconsistency::OrderTypeCount {
                                order_type,
                                found: count,
                                want,
                            },
                        ));
                    }
                }
            }
        }

        for (prov, order) in state.orders() {
            let mut normalized = order.clone();
            match normalized.validate(state) {
                Ok(owner) if owner == *nation => {
                    if let Some(problem) = normalized.corroborate(state) {
                        found.push((Some(prov.super_province()), problem));
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    if issuer(state, order).as_ref() == Some(nation) {
                        found.push((Some(prov.super_province()), err.into()));
                    }
                }
            }
        }
        found
    }
}

/// The nation an order speaks for, judged from the board alone.
fn issuer(state: &State, order: &Order) -> Option<Nation> {
    let source = order.source();
    let holder = match (order, state.phase().phase_type) {
        (Order::Build { .. }, _) => {
            return state.supply_center(source).map(|(_, owner)| owner.clone())
        }
        (_, PhaseType::Retreat) => state.dislodged(source),
        _ => state.unit(source),
    };
    holder.map(|(_, unit)| unit.nation.clone())
}

/// Per nation: centers minus units, with builds capped at the number of
/// empty centers the nation may build in.
fn allowed_build_balance(state: &State) -> BTreeMap<Nation, i32> {
    let mut units: BTreeMap<&Nation, i32> = BTreeMap::new();
    for unit in state.units().values() {
        *units.entry(&unit.nation).or_default() += 1;
    }
    let mut centers: BTreeMap<&Nation, i32> = BTreeMap::new();
    let mut free: BTreeMap<&Nation, i32> = BTreeMap::new();
    for (sc, owner) in state.supply_centers() {
        *centers.entry(owner).or_default() += 1;
        let eligible =
            state.config().build_anywhere || state.graph().sc(sc) == Some(owner);
        if eligible && state.unit(sc).is_none() {
            *free.entry(owner).or_default() += 1;
        }
    }

    state
        .graph()
        .nations()
        .into_iter()
        .map(|nation| {
            let delta = centers.get(&nation).copied().unwrap_or(0)
                - units.get(&nation).copied().unwrap_or(0);
            let delta = delta.min(free.get(&nation).copied().unwrap_or(0));
            (nation, delta)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::unit::{Unit, UnitType};
    use crate::classical::{self, AUSTRIA, ENGLAND, FRANCE, GERMANY, RUSSIA, TURKEY};

    fn phase(season: Season, phase_type: PhaseType) -> Phase {
        Phase::new(1901, season, phase_type)
    }

    #[test]
    fn full_year_cycle() {
        let mut p = phase(Season::Spring, PhaseType::Movement);
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(p.to_string());
            p = p.next();
        }
        assert_eq!(
            seen,
            vec![
                "Spring 1901, Movement",
                "Spring 1901, Retreat",
                "Fall 1901, Movement",
                "Fall 1901, Retreat",
                "Fall 1901, Adjustment",
            ]
        );
        assert_eq!(p, Phase::new(1902, Season::Spring, PhaseType::Movement));
    }

    #[test]
    fn default_order_only_in_movement() {
        let p: Province = "par".into();
        assert_eq!(
            phase(Season::Spring, PhaseType::Movement).default_order(&p),
            Some(Order::hold("par"))
        );
        assert_eq!(phase(Season::Spring, PhaseType::Retreat).default_order(&p), None);
        assert_eq!(phase(Season::Fall, PhaseType::Adjustment).default_order(&p), None);
    }

    #[test]
    fn unretreated_units_are_disbanded() {
        let p = phase(Season::Spring, PhaseType::Retreat);
        let mut state = classical::blank(p);
        state.set_dislodged("ber".into(), Unit::army(GERMANY)).unwrap();
        state.set_dislodger(&"pru".into(), &"ber".into());
        state.add_bounce(&"kie".into(), &"mun".into());
        p.post_process(&mut state).unwrap();
        assert!(state.dislodgeds().is_empty());
        assert!(state.dislodgers().is_empty());
        assert!(state.bounces().is_empty());
        assert!(state.force_disbands().contains(&Province::from("ber")));
        assert_eq!(
            state.resolution(&"ber".into()),
            Some(&Err(OrderError::ForcedDisband))
        );
    }

    #[test]
    fn surrounded_unit_is_disbanded_after_movement() {
        let p = phase(Season::Spring, PhaseType::Movement);
        let mut state = classical::blank(p);
        // Army in ruh with every land neighbour occupied.
        state.set_dislodged("ruh".into(), Unit::army(GERMANY)).unwrap();
        for prov in ["ruh", "kie", "mun", "bur", "bel", "hol"] {
            state.set_unit(prov.into(), Unit::army(FRANCE)).unwrap();
        }
        p.post_process(&mut state).unwrap();
        assert!(state.dislodged(&"ruh".into()).is_none());
        assert!(state.force_disbands().contains(&Province::from("ruh")));
    }

    #[test]
    fn dislodged_unit_with_a_retreat_survives() {
        let p = phase(Season::Spring, PhaseType::Movement);
        let mut state = classical::blank(p);
        state.set_dislodged("ruh".into(), Unit::army(GERMANY)).unwrap();
        for prov in ["ruh", "kie", "mun", "bur", "bel"] {
            state.set_unit(prov.into(), Unit::army(FRANCE)).unwrap();
        }
        p.post_process(&mut state).unwrap();
        assert!(state.dislodged(&"ruh".into()).is_some());
        assert!(state.force_disbands().is_empty());
    }

    #[test]
    fn retreat_blocked_by_bounce() {
        let p = phase(Season::Spring, PhaseType::Movement);
        let mut state = classical::blank(p);
        state.set_dislodged("ruh".into(), Unit::army(GERMANY)).unwrap();
        for prov in ["ruh", "kie", "mun", "bur", "bel"] {
            state.set_unit(prov.into(), Unit::army(FRANCE)).unwrap();
        }
        state.add_bounce(&"bel".into(), &"hol".into());
        p.post_process(&mut state).unwrap();
        assert!(state.dislodged(&"ruh".into()).is_none());
    }

    #[test]
    fn deficit_removes_farthest_units() {
        let p = phase(Season::Fall, PhaseType::Adjustment);
        let mut state = classical::blank(p);
        for sc in ["ank", "con", "smy", "bul"] {
            state.set_supply_center(sc.into(), TURKEY);
        }
        state.set_unit("ank".into(), Unit::fleet(TURKEY)).unwrap();
        state.set_unit("con".into(), Unit::army(TURKEY)).unwrap();
        state.set_unit("smy".into(), Unit::army(TURKEY)).unwrap();
        state.set_unit("bul".into(), Unit::army(TURKEY)).unwrap();
        state.set_unit("ser".into(), Unit::army(TURKEY)).unwrap();
        p.post_process(&mut state).unwrap();
        assert_eq!(state.units().len(), 4);
        assert!(state.unit(&"ser".into()).is_none());
        assert_eq!(state.force_disbands().len(), 1);
    }

    #[test]
    fn fall_retreat_captures_centers() {
        let p = phase(Season::Fall, PhaseType::Retreat);
        let mut state = classical::blank(p);
        state.set_supply_center("ber".into(), GERMANY);
        state.set_unit("ber".into(), Unit::army(RUSSIA)).unwrap();
        state.set_unit("ruh".into(), Unit::army(RUSSIA)).unwrap();
        state.set_unit("spa/nc".into(), Unit::fleet(FRANCE)).unwrap();
        p.post_process(&mut state).unwrap();
        assert_eq!(state.supply_centers().get(&Province::from("ber")), Some(&RUSSIA));
        assert_eq!(state.supply_centers().get(&Province::from("spa")), Some(&FRANCE));
        assert!(state.supply_centers().get(&Province::from("ruh")).is_none());
    }

    #[test]
    fn spring_retreat_keeps_owners() {
        let p = phase(Season::Spring, PhaseType::Retreat);
        let mut state = classical::blank(p);
        state.set_supply_center("ber".into(), GERMANY);
        state.set_unit("ber".into(), Unit::army(RUSSIA)).unwrap();
        p.post_process(&mut state).unwrap();
        assert_eq!(state.supply_centers().get(&Province::from("ber")), Some(&GERMANY));
    }

    #[test]
    fn adjustment_messages() {
        let p = phase(Season::Fall, PhaseType::Adjustment);
        let mut state = classical::start();
        state.set_phase(p);
        state.set_supply_center("bel".into(), ENGLAND);
        state.set_supply_center("nwy".into(), ENGLAND);
        state.remove_unit(&"vie".into());
        state.set_unit("tyr".into(), Unit::army(AUSTRIA)).unwrap();
        state.set_supply_center("bud".into(), RUSSIA);

        let england = p.messages(&state, &ENGLAND);
        assert!(england.contains(&"MayBuild:0".to_string()));
        assert!(england.contains(&"OtherMustDisband:Austria:1".to_string()));
        assert!(england.contains(&"OtherMayBuild:Russia:0".to_string()));
        assert_eq!(england.len(), 7);

        let austria = p.messages(&state, &AUSTRIA);
        assert!(austria.contains(&"MustDisband:1".to_string()));
    }

    #[test]
    fn units_without_orders_are_reported() {
        let p = phase(Season::Spring, PhaseType::Movement);
        let mut state = classical::start();
        state.set_order("par".into(), Order::move_to("par", "bur")).unwrap();
        let france = p.corroborate(&state, &FRANCE);
        assert_eq!(
            france,
            vec![
                (Some(Province::from("bre")), Inconsistency::MissingOrder),
                (Some(Province::from("mar")), Inconsistency::MissingOrder),
            ]
        );
        assert_eq!(p.corroborate(&state, &RUSSIA).len(), 4);
    }

    #[test]
    fn support_and_convoy_must_match_the_friendly_order() {
        let p = phase(Season::Spring, PhaseType::Movement);
        let mut state = classical::blank(p);
        state.set_unit("lon".into(), Unit::fleet(ENGLAND)).unwrap();
        state.set_unit("nth".into(), Unit::fleet(ENGLAND)).unwrap();
        state.set_unit("yor".into(), Unit::army(ENGLAND)).unwrap();
        state.set_unit("wal".into(), Unit::army(ENGLAND)).unwrap();
        state.set_unit("bel".into(), Unit::army(FRANCE)).unwrap();
        state
            .set_order("nth".into(), Order::convoy("nth", "yor", "bel"))
            .unwrap();
        state.set_order("yor".into(), Order::move_to("yor", "lvp")).unwrap();
        state
            .set_order("lon".into(), Order::support_move("lon", "wal", "yor"))
            .unwrap();
        state.set_order("wal".into(), Order::hold("wal")).unwrap();

        let england = p.corroborate(&state, &ENGLAND);
        assert_eq!(
            england,
            vec![
                (
                    Some(Province::from("lon")),
                    Inconsistency::MismatchedSupporter("wal".into())
                ),
                (
                    Some(Province::from("nth")),
                    Inconsistency::MismatchedConvoyer("yor".into())
                ),
            ]
        );

        state.remove_order(&"wal".into());
        state.remove_order(&"yor".into());
        state.set_order("wal".into(), Order::move_to("wal", "yor")).unwrap();
        state
            .set_order("yor".into(), Order::move_via_convoy("yor", "bel"))
            .unwrap();
        assert!(p.corroborate(&state, &ENGLAND).is_empty());
    }

    #[test]
    fn foreign_units_are_not_corroborated() {
        let p = phase(Season::Spring, PhaseType::Movement);
        let mut state = classical::blank(p);
        state.set_unit("sil".into(), Unit::army(GERMANY)).unwrap();
        state.set_unit("gal".into(), Unit::army(RUSSIA)).unwrap();
        state
            .set_order("sil".into(), Order::support_move("sil", "gal", "war"))
            .unwrap();
        assert!(p.corroborate(&state, &GERMANY).is_empty());
    }

    #[test]
    fn invalid_orders_are_reported_to_their_nation() {
        let p = phase(Season::Spring, PhaseType::Movement);
        let mut state = classical::blank(p);
        state.set_unit("par".into(), Unit::army(FRANCE)).unwrap();
        state.set_order("par".into(), Order::move_to("par", "mun")).unwrap();
        let france = p.corroborate(&state, &FRANCE);
        assert_eq!(france.len(), 1);
        assert_eq!(france[0].0, Some(Province::from("par")));
        assert!(matches!(france[0].1, Inconsistency::Invalid(_)));
        assert!(p.corroborate(&state, &GERMANY).is_empty());
    }

    #[test]
    fn retreats_without_orders_are_reported() {
        let p = phase(Season::Spring, PhaseType::Retreat);
        let mut state = classical::blank(p);
        state.set_dislodged("ber".into(), Unit::army(GERMANY)).unwrap();
        state.set_dislodged("kie".into(), Unit::fleet(GERMANY)).unwrap();
        state.set_order("kie".into(), Order::disband("kie", 0)).unwrap();
        assert_eq!(
            p.corroborate(&state, &GERMANY),
            vec![(Some(Province::from("ber")), Inconsistency::MissingOrder)]
        );
    }

    #[test]
    fn adjustment_counts_are_checked() {
        let p = phase(Season::Fall, PhaseType::Adjustment);
        let mut state = classical::blank(p);
        for sc in ["lon", "edi", "lvp"] {
            state.set_supply_center(sc.into(), ENGLAND);
        }
        state.set_unit("lvp".into(), Unit::army(ENGLAND)).unwrap();
        state.set_unit("vie".into(), Unit::army(AUSTRIA)).unwrap();
        state
            .set_order("lon".into(), Order::build("lon", UnitType::Fleet, 0))
            .unwrap();

        assert_eq!(
            p.corroborate(&state, &ENGLAND),
            vec![(
                None,
                Inconsistency::OrderTypeCount {
                    order_type: OrderType::Build,
                    found: 1,
                    want: 2,
                }
            )]
        );
        assert_eq!(
            p.corroborate(&state, &AUSTRIA),
            vec![(
                None,
                Inconsistency::OrderTypeCount {
                    order_type: OrderType::Disband,
                    found: 0,
                    want: 1,
                }
            )]
        );

        state
            .set_order("edi".into(), Order::build("edi", UnitType::Army, 1))
            .unwrap();
        assert!(p.corroborate(&state, &ENGLAND).is_empty());
    }

    #[test]
    fn retreat_messages() {
        let p = phase(Season::Spring, PhaseType::Retreat);
        let mut state = classical::blank(p);
        state.set_dislodged("ber".into(), Unit::army(GERMANY)).unwrap();
        state.set_dislodged("war".into(), Unit::army(RUSSIA)).unwrap();
        assert_eq!(p.messages(&state, &GERMANY), vec!["MustRetreat:ber".to_string()]);
        assert!(p.messages(&state, &ENGLAND).is_empty());
    }
}

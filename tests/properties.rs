//! Property tests over the classical board.
//!
//! Random hold/move order sets from the opening position must always
//! adjudicate, conserve units, and give the same outcome whatever order the
//! provinces are resolved in.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use dipjudge::board::order::Order;
use dipjudge::board::province::Province;
use dipjudge::board::state::{Phase, PhaseType, Season, State};
use dipjudge::board::unit::Unit;
use dipjudge::classical::{self, FRANCE, GERMANY};
use dipjudge::error::OrderError;

/// Opening position with a random hold or move for every unit.
fn random_opening(seed: u64) -> State {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = classical::start();
    let graph = classical::graph();
    let units: Vec<Province> = state.units().keys().cloned().collect();
    for prov in units {
        let neighbours: Vec<Province> = graph.edges(&prov).map(|(p, _)| p.clone()).collect();
        let order = if rng.gen_bool(0.2) || neighbours.is_empty() {
            Order::hold(prov.clone())
        } else {
            let dst = &neighbours[rng.gen_range(0..neighbours.len())];
            Order::move_to(prov.clone(), dst.clone())
        };
        state.set_order(prov, order).unwrap();
    }
    state
}

fn outcome(state: &State) -> impl PartialEq + std::fmt::Debug {
    (
        state.units().clone(),
        state.dislodgeds().clone(),
        state.resolutions().clone(),
        state.force_disbands().clone(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_openings_conserve_units(seed in any::<u64>()) {
        let mut state = random_opening(seed);
        state.next().unwrap();

        let total = state.units().len() + state.dislodgeds().len() + state.force_disbands().len();
        prop_assert_eq!(total, 22);

        let supers: BTreeSet<Province> =
            state.units().keys().map(|p| p.super_province()).collect();
        prop_assert_eq!(supers.len(), state.units().len());

        prop_assert_eq!(state.phase(), Phase::new(1901, Season::Spring, PhaseType::Retreat));
    }

    #[test]
    fn resolution_order_does_not_matter(seed in any::<u64>(), shuffle in any::<u64>()) {
        let mut sorted = random_opening(seed);
        let mut shuffled = sorted.clone();
        sorted.next().unwrap();
        let mut rng = SmallRng::seed_from_u64(shuffle);
        shuffled
            .next_with_resolution_order(|provinces| provinces.shuffle(&mut rng))
            .unwrap();
        prop_assert_eq!(outcome(&sorted), outcome(&shuffled));
    }

    #[test]
    fn any_coast_finds_the_unit(index in 0usize..120) {
        let graph = classical::graph();
        let provinces = graph.provinces();
        let at = provinces[index % provinces.len()].clone();
        let mut state = classical::blank(Phase::new(1901, Season::Spring, PhaseType::Movement));
        state.set_unit(at.clone(), Unit::army(FRANCE)).unwrap();
        for coast in graph.coasts(&at) {
            let found = state.unit(&coast).map(|(p, _)| p.clone());
            prop_assert_eq!(found, Some(at.clone()));
        }
        prop_assert!(state.set_unit(at.super_province(), Unit::fleet(GERMANY)).is_err());
    }

    #[test]
    fn bounce_marker_rule(
        src in 0usize..5,
        attackers in proptest::collection::btree_set(0usize..5, 0..3),
        victim in proptest::option::of(0usize..5),
    ) {
        const NEAR: [&str; 5] = ["ber", "boh", "bur", "kie", "ruh"];
        let mut state = classical::blank(Phase::new(1901, Season::Spring, PhaseType::Retreat));
        let dst = Province::from("mun");
        for a in &attackers {
            state.add_bounce(&NEAR[*a].into(), &dst);
        }
        if let Some(v) = victim {
            state.set_dislodger(&dst, &NEAR[v].into());
        }

        let expected = if attackers.is_empty() {
            victim == Some(src)
        } else {
            !(attackers.len() == 1 && attackers.iter().next().copied() == victim)
        };
        let from = Province::from(NEAR[src]);
        prop_assert_eq!(state.bounce(&from, &dst), expected);
    }
}

/// Convoy paradox, supported attack and a rotation on one board, resolved
/// in every rotation of the province list.
#[test]
fn mixed_board_is_order_independent() {
    let build = || {
        let mut state = classical::blank(Phase::new(1901, Season::Spring, PhaseType::Movement));
        let england = classical::ENGLAND;
        let turkey = classical::TURKEY;
        state.set_unit("lon".into(), Unit::fleet(england.clone())).unwrap();
        state.set_unit("wal".into(), Unit::fleet(england)).unwrap();
        state.set_unit("bre".into(), Unit::army(FRANCE)).unwrap();
        state.set_unit("eng".into(), Unit::fleet(FRANCE)).unwrap();
        state.set_unit("ank".into(), Unit::fleet(turkey.clone())).unwrap();
        state.set_unit("con".into(), Unit::army(turkey.clone())).unwrap();
        state.set_unit("smy".into(), Unit::army(turkey)).unwrap();
        state.set_unit("mun".into(), Unit::army(GERMANY)).unwrap();
        state.set_unit("ber".into(), Unit::army(GERMANY)).unwrap();
        state.set_unit("boh".into(), Unit::army(classical::AUSTRIA)).unwrap();
        let orders = [
            Order::support_move("lon", "wal", "eng"),
            Order::move_to("wal", "eng"),
            Order::move_to("bre", "lon"),
            Order::convoy("eng", "bre", "lon"),
            Order::move_to("ank", "con"),
            Order::move_to("con", "smy"),
            Order::move_to("smy", "ank"),
            Order::move_to("boh", "mun"),
            Order::support_hold("ber", "mun"),
        ];
        state
            .set_orders(orders.into_iter().map(|o| (o.source().clone(), o)))
            .unwrap();
        state
    };

    let mut reference = build();
    reference.next().unwrap();
    assert_eq!(
        reference.resolution(&"eng".into()),
        Some(&Err(OrderError::ConvoyParadox))
    );
    assert_eq!(reference.resolution(&"smy".into()), Some(&Ok(())));
    assert!(matches!(
        reference.resolution(&"boh".into()),
        Some(Err(OrderError::Bounce(_)))
    ));

    let count = build().orders().len();
    for shift in 0..count {
        let mut state = build();
        state
            .next_with_resolution_order(|provinces| provinces.rotate_left(shift))
            .unwrap();
        assert_eq!(outcome(&reference), outcome(&state), "rotation {}", shift);
    }
}

/// A nation short of centers with no disband orders loses its farthest
/// unit and nothing else.
#[test]
fn civil_disorder_removes_exactly_the_deficit() {
    let mut state = classical::blank(Phase::new(1901, Season::Fall, PhaseType::Adjustment));
    for sc in ["ber", "kie", "mun", "hol"] {
        state.set_supply_center(sc.into(), GERMANY);
    }
    state.set_unit("ber".into(), Unit::army(GERMANY)).unwrap();
    state.set_unit("kie".into(), Unit::fleet(GERMANY)).unwrap();
    state.set_unit("mun".into(), Unit::army(GERMANY)).unwrap();
    state.set_unit("hol".into(), Unit::army(GERMANY)).unwrap();
    state.set_unit("pic".into(), Unit::army(GERMANY)).unwrap();

    state.next().unwrap();

    assert_eq!(state.units().len(), 4);
    assert!(state.unit(&"pic".into()).is_none());
    assert_eq!(
        state.force_disbands().iter().cloned().collect::<Vec<_>>(),
        vec![Province::from("pic")]
    );
    assert_eq!(
        state.resolution(&"pic".into()),
        Some(&Err(OrderError::ForcedDisband))
    );
    assert_eq!(state.phase(), Phase::new(1902, Season::Spring, PhaseType::Movement));
}

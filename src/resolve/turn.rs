//! Turn processing: validate, default-fill, resolve, execute, apply
//! movements, post-process, advance.

use rayon::prelude::*;
use tracing::{debug, info};

use super::kruijswijk::Resolver;
use crate::board::order::Order;
use crate::board::province::Province;
use crate::board::state::State;
use crate::error::StateError;

impl State {
    /// Processes the current phase and advances to the next one.
    pub fn next(&mut self) -> Result<(), StateError> {
        self.next_with_resolution_order(|_| {})
    }

    /// Like `next`, but lets the caller reorder the provinces before they
    /// are resolved. Outcomes do not depend on that order.
    pub fn next_with_resolution_order<F>(&mut self, arrange: F) -> Result<(), StateError>
    where
        F: FnOnce(&mut Vec<Province>),
    {
        let phase = self.phase();
        self.begin_turn();

        let submitted: Vec<(Province, Order)> = self
            .orders
            .iter()
            .map(|(p, o)| (p.clone(), o.clone()))
            .collect();
        for (prov, order) in submitted {
            let mut normalized = order;
            match normalized.validate(self) {
                Ok(_) => {
                    self.orders.insert(prov, normalized);
                }
                Err(err) => {
                    debug!(%prov, error = %err, "invalid order dropped");
                    self.orders.remove(&prov);
                    self.resolutions.insert(prov, Err(err));
                }
            }
        }

        let unordered: Vec<Province> = self
            .units
            .keys()
            .filter(|p| self.order(p).is_none())
            .cloned()
            .collect();
        for prov in unordered {
            if let Some(order) = phase.default_order(&prov) {
                self.orders.insert(prov, order);
            }
        }

        let mut provinces: Vec<Province> = self.orders.keys().cloned().collect();
        arrange(&mut provinces);
        for prov in &provinces {
            let resolution = self.resolve_province(prov)?;
            self.resolutions.insert(prov.clone(), resolution);
        }

        let succeeded: Vec<Order> = self
            .orders
            .iter()
            .filter(|(p, _)| matches!(self.resolutions.get(*p), Some(Ok(()))))
            .map(|(_, o)| o.clone())
            .collect();
        {
            let mut resolver = Resolver::new(self);
            for order in &succeeded {
                order.execute(&mut resolver)?;
            }
        }
        self.orders.clear();

        self.apply_movements()?;
        phase.post_process(self)?;
        let next = phase.next();
        self.set_phase(next);
        info!(%phase, %next, "turn processed");
        Ok(())
    }
}

/// Advances independent games in parallel. Each state is processed on one
/// worker with exclusive access.
pub fn advance_all(states: &mut [State]) -> Vec<Result<(), StateError>> {
    states.par_iter_mut().map(|state| state.next()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::{Phase, PhaseType, Season};
    use crate::board::unit::{Unit, UnitType};
    use crate::classical::{self, AUSTRIA, ENGLAND, FRANCE, GERMANY, RUSSIA};
    use crate::error::OrderError;

    fn movement() -> State {
        classical::blank(Phase::new(1901, Season::Spring, PhaseType::Movement))
    }

    #[test]
    fn simple_move_executes() {
        let mut state = movement();
        state.set_unit("par".into(), Unit::army(FRANCE)).unwrap();
        state.set_order("par".into(), Order::move_to("par", "bur")).unwrap();
        state.next().unwrap();
        assert!(state.unit(&"bur".into()).is_some());
        assert!(state.unit(&"par".into()).is_none());
        assert_eq!(state.resolution(&"par".into()), Some(&Ok(())));
        assert_eq!(state.phase(), Phase::new(1901, Season::Spring, PhaseType::Retreat));
        assert!(state.orders().is_empty());
    }

    #[test]
    fn units_without_orders_hold() {
        let mut state = movement();
        state.set_unit("par".into(), Unit::army(FRANCE)).unwrap();
        state.next().unwrap();
        assert!(state.unit(&"par".into()).is_some());
        assert_eq!(state.resolution(&"par".into()), Some(&Ok(())));
    }

    #[test]
    fn invalid_order_keeps_its_error() {
        let mut state = movement();
        state.set_unit("par".into(), Unit::army(FRANCE)).unwrap();
        state.set_order("par".into(), Order::move_to("par", "mun")).unwrap();
        state.next().unwrap();
        assert!(state.unit(&"par".into()).is_some());
        assert!(matches!(state.resolution(&"par".into()), Some(Err(_))));
    }

    #[test]
    fn fleet_coast_is_normalized() {
        let mut state = movement();
        state.set_unit("stp/sc".into(), Unit::fleet(RUSSIA)).unwrap();
        state.set_order("stp".into(), Order::move_to("stp", "bot")).unwrap();
        state.next().unwrap();
        assert!(state.unit(&"bot".into()).is_some());
    }

    #[test]
    fn order_on_a_sibling_coast_is_not_doubled_by_a_hold() {
        let mut state = movement();
        state.set_unit("stp/sc".into(), Unit::fleet(RUSSIA)).unwrap();
        state.set_unit("fin".into(), Unit::fleet(RUSSIA)).unwrap();
        state.set_unit("swe".into(), Unit::fleet(GERMANY)).unwrap();
        state
            .set_order("stp/nc".into(), Order::move_to("stp/nc", "bot"))
            .unwrap();
        state
            .set_order("fin".into(), Order::support_move("fin", "stp", "bot"))
            .unwrap();
        state.set_order("swe".into(), Order::move_to("swe", "bot")).unwrap();

        state.next().unwrap();

        assert!(state.resolution(&"stp/sc".into()).is_none());
        assert_eq!(state.resolution(&"stp/nc".into()), Some(&Ok(())));
        assert_eq!(
            state.unit(&"bot".into()).map(|(_, u)| u.nation.clone()),
            Some(RUSSIA)
        );
        assert!(state.unit(&"stp".into()).is_none());
        assert!(matches!(
            state.resolution(&"swe".into()),
            Some(Err(OrderError::Bounce(_)))
        ));
        assert!(state.unit(&"swe".into()).is_some());
    }

    #[test]
    fn dislodged_unit_retreats_next_phase() {
        let mut state = movement();
        state.set_unit("mun".into(), Unit::army(GERMANY)).unwrap();
        state.set_unit("tyr".into(), Unit::army(AUSTRIA)).unwrap();
        state.set_unit("boh".into(), Unit::army(AUSTRIA)).unwrap();
        state.set_order("tyr".into(), Order::move_to("tyr", "mun")).unwrap();
        state
            .set_order("boh".into(), Order::support_move("boh", "tyr", "mun"))
            .unwrap();
        state.next().unwrap();
        assert_eq!(state.dislodged(&"mun".into()).map(|(_, u)| u.nation.clone()), Some(GERMANY));
        assert_eq!(state.unit(&"mun".into()).map(|(_, u)| u.nation.clone()), Some(AUSTRIA));

        // The attacker's origin is closed to the retreat.
        let mut closed = state.clone();
        closed.set_order("mun".into(), Order::move_to("mun", "tyr")).unwrap();
        closed.next().unwrap();
        assert!(closed.unit(&"tyr".into()).is_none());
        assert!(closed.force_disbands().contains(&Province::from("mun")));

        state.set_order("mun".into(), Order::move_to("mun", "ruh")).unwrap();
        state.next().unwrap();
        assert!(state.unit(&"ruh".into()).is_some());
        assert!(state.dislodgeds().is_empty());
        assert_eq!(state.phase(), Phase::new(1901, Season::Fall, PhaseType::Movement));
    }

    #[test]
    fn builds_in_adjustment() {
        let mut state = classical::blank(Phase::new(1901, Season::Fall, PhaseType::Adjustment));
        state.set_supply_center("lon".into(), ENGLAND);
        state.set_supply_center("edi".into(), ENGLAND);
        state
            .set_order("lon".into(), Order::build("lon", UnitType::Fleet, 2))
            .unwrap();
        state
            .set_order("edi".into(), Order::build("edi", UnitType::Army, 1))
            .unwrap();
        state.next().unwrap();
        assert_eq!(state.units().len(), 2);
        assert_eq!(state.phase(), Phase::new(1902, Season::Spring, PhaseType::Movement));
    }

    #[test]
    fn builds_beyond_surplus_fail_latest_first() {
        let mut state = classical::blank(Phase::new(1901, Season::Fall, PhaseType::Adjustment));
        state.set_supply_center("lon".into(), ENGLAND);
        state.set_supply_center("edi".into(), ENGLAND);
        state.set_unit("lvp".into(), Unit::army(ENGLAND)).unwrap();
        state
            .set_order("lon".into(), Order::build("lon", UnitType::Fleet, 2))
            .unwrap();
        state
            .set_order("edi".into(), Order::build("edi", UnitType::Army, 1))
            .unwrap();
        state.next().unwrap();
        assert!(state.unit(&"edi".into()).is_some());
        assert!(state.unit(&"lon".into()).is_none());
        assert_eq!(
            state.resolution(&"lon".into()),
            Some(&Err(OrderError::IllegalBuild))
        );
    }

    #[test]
    fn advance_all_processes_each_game() {
        let mut games = vec![classical::start(), classical::start()];
        games[0]
            .set_order("par".into(), Order::move_to("par", "bur"))
            .unwrap();
        let results = advance_all(&mut games);
        assert!(results.iter().all(|r| r.is_ok()));
        assert!(games[0].unit(&"bur".into()).is_some());
        assert!(games[1].unit(&"par".into()).is_some());
    }
}

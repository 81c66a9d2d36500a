//! Spring 1901 position.

use std::collections::BTreeMap;

use super::{AUSTRIA, ENGLAND, FRANCE, GERMANY, ITALY, RUSSIA, TURKEY};
use crate::board::province::{Nation, Province};
use crate::board::unit::{Unit, UnitType};

const UNITS: [(&str, UnitType, Nation); 22] = [
    ("edi", UnitType::Fleet, ENGLAND),
    ("lvp", UnitType::Army, ENGLAND),
    ("lon", UnitType::Fleet, ENGLAND),
    ("bre", UnitType::Fleet, FRANCE),
    ("par", UnitType::Army, FRANCE),
    ("mar", UnitType::Army, FRANCE),
    ("kie", UnitType::Fleet, GERMANY),
    ("ber", UnitType::Army, GERMANY),
    ("mun", UnitType::Army, GERMANY),
    ("ven", UnitType::Army, ITALY),
    ("rom", UnitType::Army, ITALY),
    ("nap", UnitType::Fleet, ITALY),
    ("tri", UnitType::Fleet, AUSTRIA),
    ("vie", UnitType::Army, AUSTRIA),
    ("bud", UnitType::Army, AUSTRIA),
    ("stp/sc", UnitType::Fleet, RUSSIA),
    ("mos", UnitType::Army, RUSSIA),
    ("war", UnitType::Army, RUSSIA),
    ("sev", UnitType::Fleet, RUSSIA),
    ("con", UnitType::Army, TURKEY),
    ("smy", UnitType::Army, TURKEY),
    ("ank", UnitType::Fleet, TURKEY),
];

pub fn units() -> BTreeMap<Province, Unit> {
    UNITS
        .into_iter()
        .map(|(prov, unit_type, nation)| (Province::from(prov), Unit::new(unit_type, nation)))
        .collect()
}

/// Every home center, owned by its home nation.
pub fn supply_centers() -> BTreeMap<Province, Nation> {
    let graph = super::graph();
    graph
        .all_scs()
        .into_iter()
        .filter_map(|prov| {
            let home = graph.sc(&prov)?;
            (!home.is_neutral()).then(|| (prov, home.clone()))
        })
        .collect()
}

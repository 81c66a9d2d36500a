//! The standard board: 75 provinces, three of them with split coasts,
//! plus the impassable `swi`.

use super::{AUSTRIA, ENGLAND, FRANCE, GERMANY, ITALY, RUSSIA, TURKEY};
use crate::board::graph::Graph;
use crate::board::province::{Flags, Nation};

const LAND: Flags = Flags::LAND;
const SEA: Flags = Flags::SEA;
const COAST: Flags = Flags::COAST;

pub fn build() -> Graph {
    Graph::builder()
        .prov("nat")
        .conn("nrg", SEA)
        .conn("cly", SEA)
        .conn("lvp", SEA)
        .conn("iri", SEA)
        .conn("mid", SEA)
        .flag(SEA)
        .prov("nrg")
        .conn("nat", SEA)
        .conn("bar", SEA)
        .conn("nwy", SEA)
        .conn("nth", SEA)
        .conn("edi", SEA)
        .conn("cly", SEA)
        .flag(SEA)
        .prov("bar")
        .conn("nrg", SEA)
        .conn("stp/nc", SEA)
        .conn("nwy", SEA)
        .conn("stp", SEA)
        .flag(SEA)
        .prov("stp/nc")
        .conn("bar", SEA)
        .conn("nwy", SEA)
        .flag(SEA)
        .prov("stp")
        .conn("fin", LAND)
        .conn("nwy", LAND)
        .conn("mos", LAND)
        .conn("lvn", LAND)
        .flag(LAND)
        .conn("bar", SEA)
        .conn("bot", SEA)
        .sc(RUSSIA)
        .prov("mos")
        .conn("stp", LAND)
        .conn("sev", LAND)
        .conn("ukr", LAND)
        .conn("war", LAND)
        .conn("lvn", LAND)
        .flag(LAND)
        .sc(RUSSIA)
        .prov("sev")
        .conn("ukr", LAND)
        .conn("mos", LAND)
        .conn("arm", COAST)
        .conn("bla", SEA)
        .conn("rum", COAST)
        .flag(COAST)
        .sc(RUSSIA)
        .prov("arm")
        .conn("ank", COAST)
        .conn("bla", SEA)
        .conn("sev", COAST)
        .conn("syr", LAND)
        .conn("smy", LAND)
        .flag(COAST)
        .prov("syr")
        .conn("eas", SEA)
        .conn("smy", COAST)
        .conn("arm", LAND)
        .flag(COAST)
        .prov("eas")
        .conn("ion", SEA)
        .conn("aeg", SEA)
        .conn("smy", SEA)
        .conn("syr", SEA)
        .flag(SEA)
        .prov("ion")
        .conn("apu", SEA)
        .conn("adr", SEA)
        .conn("tun", SEA)
        .conn("tys", SEA)
        .conn("nap", SEA)
        .conn("alb", SEA)
        .conn("gre", SEA)
        .conn("aeg", SEA)
        .conn("eas", SEA)
        .flag(SEA)
        .prov("tun")
        .conn("naf", COAST)
        .conn("wes", SEA)
        .conn("tys", SEA)
        .conn("ion", SEA)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("naf")
        .conn("mid", SEA)
        .conn("wes", SEA)
        .conn("tun", COAST)
        .flag(COAST)
        .prov("mid")
        .conn("wes", SEA)
        .conn("nat", SEA)
        .conn("iri", SEA)
        .conn("eng", SEA)
        .conn("bre", SEA)
        .conn("gas", SEA)
        .conn("spa/nc", SEA)
        .conn("por", SEA)
        .conn("spa/sc", SEA)
        .conn("naf", SEA)
        .conn("spa", SEA)
        .flag(SEA)
        .prov("iri")
        .conn("nat", SEA)
        .conn("lvp", SEA)
        .conn("wal", SEA)
        .conn("eng", SEA)
        .conn("mid", SEA)
        .flag(SEA)
        .prov("lvp")
        .conn("iri", SEA)
        .conn("nat", SEA)
        .conn("cly", COAST)
        .conn("edi", LAND)
        .conn("yor", LAND)
        .conn("wal", COAST)
        .flag(COAST)
        .sc(ENGLAND)
        .prov("cly")
        .conn("nat", SEA)
        .conn("nrg", SEA)
        .conn("edi", COAST)
        .conn("lvp", COAST)
        .flag(COAST)
        .prov("edi")
        .conn("cly", COAST)
        .conn("nrg", SEA)
        .conn("nth", SEA)
        .conn("yor", COAST)
        .conn("lvp", LAND)
        .flag(COAST)
        .sc(ENGLAND)
        .prov("nth")
        .conn("eng", SEA)
        .conn("edi", SEA)
        .conn("nrg", SEA)
        .conn("nwy", SEA)
        .conn("ska", SEA)
        .conn("den", SEA)
        .conn("hel", SEA)
        .conn("hol", SEA)
        .conn("bel", SEA)
        .conn("lon", SEA)
        .conn("yor", SEA)
        .flag(SEA)
        .prov("nwy")
        .conn("nth", SEA)
        .conn("nrg", SEA)
        .conn("bar", SEA)
        .conn("stp/nc", SEA)
        .conn("stp", LAND)
        .conn("fin", LAND)
        .conn("swe", COAST)
        .conn("ska", SEA)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("stp/sc")
        .conn("bot", SEA)
        .conn("fin", SEA)
        .conn("lvn", SEA)
        .flag(SEA)
        .prov("lvn")
        .conn("stp", LAND)
        .conn("bal", SEA)
        .conn("bot", SEA)
        .conn("stp/sc", SEA)
        .conn("mos", LAND)
        .conn("war", LAND)
        .conn("pru", COAST)
        .flag(COAST)
        .prov("war")
        .conn("sil", LAND)
        .conn("pru", LAND)
        .conn("lvn", LAND)
        .conn("mos", LAND)
        .conn("ukr", LAND)
        .conn("gal", LAND)
        .flag(LAND)
        .sc(RUSSIA)
        .prov("ukr")
        .conn("war", LAND)
        .conn("mos", LAND)
        .conn("sev", LAND)
        .conn("rum", LAND)
        .conn("gal", LAND)
        .flag(LAND)
        .prov("bla")
        .conn("bul/ec", SEA)
        .conn("rum", SEA)
        .conn("sev", SEA)
        .conn("arm", SEA)
        .conn("ank", SEA)
        .conn("con", SEA)
        .conn("bul", SEA)
        .flag(SEA)
        .prov("ank")
        .conn("con", COAST)
        .conn("bla", SEA)
        .conn("arm", COAST)
        .conn("smy", LAND)
        .flag(COAST)
        .sc(TURKEY)
        .prov("smy")
        .conn("aeg", SEA)
        .conn("con", COAST)
        .conn("ank", LAND)
        .conn("arm", LAND)
        .conn("syr", COAST)
        .conn("eas", SEA)
        .flag(COAST)
        .sc(TURKEY)
        .prov("aeg")
        .conn("eas", SEA)
        .conn("ion", SEA)
        .conn("gre", SEA)
        .conn("bul/sc", SEA)
        .conn("con", SEA)
        .conn("smy", SEA)
        .conn("bul", SEA)
        .flag(SEA)
        .prov("gre")
        .conn("ion", SEA)
        .conn("alb", COAST)
        .conn("ser", LAND)
        .conn("bul", LAND)
        .conn("bul/sc", SEA)
        .conn("aeg", SEA)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("nap")
        .conn("tys", SEA)
        .conn("rom", COAST)
        .conn("apu", COAST)
        .conn("ion", SEA)
        .flag(COAST)
        .sc(ITALY)
        .prov("tys")
        .conn("wes", SEA)
        .conn("gol", SEA)
        .conn("tus", SEA)
        .conn("rom", SEA)
        .conn("nap", SEA)
        .conn("ion", SEA)
        .conn("tun", SEA)
        .flag(SEA)
        .prov("wes")
        .conn("mid", SEA)
        .conn("spa/sc", SEA)
        .conn("gol", SEA)
        .conn("tys", SEA)
        .conn("tun", SEA)
        .conn("naf", SEA)
        .conn("spa", SEA)
        .flag(SEA)
        .prov("spa/sc")
        .conn("mid", SEA)
        .conn("por", SEA)
        .conn("mar", SEA)
        .conn("gol", SEA)
        .conn("wes", SEA)
        .flag(SEA)
        .prov("spa")
        .conn("por", LAND)
        .conn("gas", LAND)
        .conn("mar", LAND)
        .conn("mid", SEA)
        .conn("gol", SEA)
        .conn("wes", SEA)
        .flag(LAND)
        .sc(Nation::NEUTRAL)
        .prov("spa/nc")
        .conn("por", SEA)
        .conn("mid", SEA)
        .conn("gas", SEA)
        .flag(SEA)
        .prov("por")
        .conn("mid", SEA)
        .conn("spa/nc", SEA)
        .conn("spa", LAND)
        .conn("spa/sc", SEA)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("gas")
        .conn("mid", SEA)
        .conn("bre", COAST)
        .conn("par", LAND)
        .conn("bur", LAND)
        .conn("mar", LAND)
        .conn("spa", LAND)
        .conn("spa/nc", SEA)
        .flag(COAST)
        .prov("bre")
        .conn("mid", SEA)
        .conn("eng", SEA)
        .conn("pic", COAST)
        .conn("par", LAND)
        .conn("gas", COAST)
        .flag(COAST)
        .sc(FRANCE)
        .prov("eng")
        .conn("mid", SEA)
        .conn("iri", SEA)
        .conn("wal", SEA)
        .conn("lon", SEA)
        .conn("nth", SEA)
        .conn("bel", SEA)
        .conn("pic", SEA)
        .conn("bre", SEA)
        .flag(SEA)
        .prov("wal")
        .conn("iri", SEA)
        .conn("lvp", COAST)
        .conn("yor", LAND)
        .conn("lon", COAST)
        .conn("eng", SEA)
        .flag(COAST)
        .prov("yor")
        .conn("lvp", LAND)
        .conn("edi", COAST)
        .conn("nth", SEA)
        .conn("lon", COAST)
        .conn("wal", LAND)
        .flag(COAST)
        .prov("ska")
        .conn("nth", SEA)
        .conn("nwy", SEA)
        .conn("swe", SEA)
        .conn("den", SEA)
        .flag(SEA)
        .prov("swe")
        .conn("ska", SEA)
        .conn("nwy", COAST)
        .conn("fin", COAST)
        .conn("bot", SEA)
        .conn("bal", SEA)
        .conn("den", COAST)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("fin")
        .conn("nwy", LAND)
        .conn("bot", SEA)
        .conn("swe", COAST)
        .conn("stp", LAND)
        .conn("stp/sc", SEA)
        .flag(COAST)
        .prov("bot")
        .conn("swe", SEA)
        .conn("fin", SEA)
        .conn("stp/sc", SEA)
        .conn("lvn", SEA)
        .conn("bal", SEA)
        .conn("stp", SEA)
        .flag(SEA)
        .prov("bal")
        .conn("den", SEA)
        .conn("swe", SEA)
        .conn("bot", SEA)
        .conn("lvn", SEA)
        .conn("pru", SEA)
        .conn("ber", SEA)
        .conn("kie", SEA)
        .flag(SEA)
        .prov("pru")
        .conn("ber", COAST)
        .conn("bal", SEA)
        .conn("lvn", COAST)
        .conn("war", LAND)
        .conn("sil", LAND)
        .flag(COAST)
        .prov("sil")
        .conn("mun", LAND)
        .conn("ber", LAND)
        .conn("pru", LAND)
        .conn("war", LAND)
        .conn("gal", LAND)
        .conn("boh", LAND)
        .flag(LAND)
        .prov("gal")
        .conn("boh", LAND)
        .conn("sil", LAND)
        .conn("war", LAND)
        .conn("ukr", LAND)
        .conn("rum", LAND)
        .conn("bud", LAND)
        .conn("vie", LAND)
        .flag(LAND)
        .prov("rum")
        .conn("bla", SEA)
        .conn("bud", LAND)
        .conn("gal", LAND)
        .conn("ukr", LAND)
        .conn("sev", COAST)
        .conn("bul/ec", SEA)
        .conn("bul", LAND)
        .conn("ser", LAND)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("bul/ec")
        .conn("rum", SEA)
        .conn("bla", SEA)
        .conn("con", SEA)
        .flag(SEA)
        .prov("bul")
        .conn("ser", LAND)
        .conn("rum", LAND)
        .conn("con", LAND)
        .conn("gre", LAND)
        .flag(LAND)
        .conn("aeg", SEA)
        .conn("bla", SEA)
        .sc(Nation::NEUTRAL)
        .prov("con")
        .conn("bul/sc", SEA)
        .conn("bul", LAND)
        .conn("bul/ec", SEA)
        .conn("bla", SEA)
        .conn("ank", COAST)
        .conn("smy", COAST)
        .conn("aeg", SEA)
        .flag(COAST)
        .sc(TURKEY)
        .prov("bul/sc")
        .conn("gre", SEA)
        .conn("con", SEA)
        .conn("aeg", SEA)
        .flag(SEA)
        .prov("ser")
        .conn("tri", LAND)
        .conn("bud", LAND)
        .conn("rum", LAND)
        .conn("bul", LAND)
        .conn("gre", LAND)
        .conn("alb", LAND)
        .flag(LAND)
        .sc(Nation::NEUTRAL)
        .prov("alb")
        .conn("adr", SEA)
        .conn("tri", COAST)
        .conn("ser", LAND)
        .conn("gre", COAST)
        .conn("ion", SEA)
        .flag(COAST)
        .prov("adr")
        .conn("ven", SEA)
        .conn("tri", SEA)
        .conn("alb", SEA)
        .conn("ion", SEA)
        .conn("apu", SEA)
        .flag(SEA)
        .prov("apu")
        .conn("rom", LAND)
        .conn("ven", COAST)
        .conn("adr", SEA)
        .conn("ion", SEA)
        .conn("nap", COAST)
        .flag(COAST)
        .prov("rom")
        .conn("tys", SEA)
        .conn("tus", COAST)
        .conn("ven", LAND)
        .conn("apu", LAND)
        .conn("nap", COAST)
        .flag(COAST)
        .sc(ITALY)
        .prov("tus")
        .conn("gol", SEA)
        .conn("pie", COAST)
        .conn("ven", LAND)
        .conn("rom", COAST)
        .conn("tys", SEA)
        .flag(COAST)
        .prov("gol")
        .conn("spa/sc", SEA)
        .conn("mar", SEA)
        .conn("pie", SEA)
        .conn("tus", SEA)
        .conn("tys", SEA)
        .conn("wes", SEA)
        .conn("spa", SEA)
        .flag(SEA)
        .prov("mar")
        .conn("spa", LAND)
        .conn("gas", LAND)
        .conn("bur", LAND)
        .conn("pie", COAST)
        .conn("gol", SEA)
        .conn("spa/sc", SEA)
        .flag(COAST)
        .sc(FRANCE)
        .prov("bur")
        .conn("par", LAND)
        .conn("pic", LAND)
        .conn("bel", LAND)
        .conn("ruh", LAND)
        .conn("mun", LAND)
        .conn("mar", LAND)
        .conn("gas", LAND)
        .flag(LAND)
        .prov("par")
        .conn("bre", LAND)
        .conn("pic", LAND)
        .conn("bur", LAND)
        .conn("gas", LAND)
        .flag(LAND)
        .sc(FRANCE)
        .prov("pic")
        .conn("bre", COAST)
        .conn("eng", SEA)
        .conn("bel", COAST)
        .conn("bur", LAND)
        .conn("par", LAND)
        .flag(COAST)
        .prov("lon")
        .conn("wal", COAST)
        .conn("yor", COAST)
        .conn("nth", SEA)
        .conn("eng", SEA)
        .flag(COAST)
        .sc(ENGLAND)
        .prov("bel")
        .conn("pic", COAST)
        .conn("eng", SEA)
        .conn("nth", SEA)
        .conn("hol", COAST)
        .conn("ruh", LAND)
        .conn("bur", LAND)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("hol")
        .conn("nth", SEA)
        .conn("hel", SEA)
        .conn("kie", COAST)
        .conn("ruh", LAND)
        .conn("bel", COAST)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("hel")
        .conn("nth", SEA)
        .conn("den", SEA)
        .conn("kie", SEA)
        .conn("hol", SEA)
        .flag(SEA)
        .prov("den")
        .conn("hel", SEA)
        .conn("nth", SEA)
        .conn("ska", SEA)
        .conn("swe", COAST)
        .conn("bal", SEA)
        .conn("kie", COAST)
        .flag(COAST)
        .sc(Nation::NEUTRAL)
        .prov("ber")
        .conn("kie", COAST)
        .conn("bal", SEA)
        .conn("pru", COAST)
        .conn("sil", LAND)
        .conn("mun", LAND)
        .flag(COAST)
        .sc(GERMANY)
        .prov("mun")
        .conn("bur", LAND)
        .conn("ruh", LAND)
        .conn("kie", LAND)
        .conn("ber", LAND)
        .conn("sil", LAND)
        .conn("boh", LAND)
        .conn("tyr", LAND)
        .flag(LAND)
        .sc(GERMANY)
        .prov("boh")
        .conn("mun", LAND)
        .conn("sil", LAND)
        .conn("gal", LAND)
        .conn("vie", LAND)
        .conn("tyr", LAND)
        .flag(LAND)
        .prov("vie")
        .conn("tyr", LAND)
        .conn("boh", LAND)
        .conn("gal", LAND)
        .conn("bud", LAND)
        .conn("tri", LAND)
        .flag(LAND)
        .sc(AUSTRIA)
        .prov("bud")
        .conn("tri", LAND)
        .conn("vie", LAND)
        .conn("gal", LAND)
        .conn("rum", LAND)
        .conn("ser", LAND)
        .flag(LAND)
        .sc(AUSTRIA)
        .prov("tri")
        .conn("adr", SEA)
        .conn("ven", COAST)
        .conn("tyr", LAND)
        .conn("vie", LAND)
        .conn("bud", LAND)
        .conn("ser", LAND)
        .conn("alb", COAST)
        .flag(COAST)
        .sc(AUSTRIA)
        .prov("ven")
        .conn("tus", LAND)
        .conn("pie", LAND)
        .conn("tyr", LAND)
        .conn("tri", COAST)
        .conn("adr", SEA)
        .conn("apu", COAST)
        .conn("rom", LAND)
        .flag(COAST)
        .sc(ITALY)
        .prov("pie")
        .conn("mar", COAST)
        .conn("tyr", LAND)
        .conn("ven", LAND)
        .conn("tus", COAST)
        .conn("gol", SEA)
        .flag(COAST)
        .prov("ruh")
        .conn("bel", LAND)
        .conn("hol", LAND)
        .conn("kie", LAND)
        .conn("mun", LAND)
        .conn("bur", LAND)
        .flag(LAND)
        .prov("tyr")
        .conn("mun", LAND)
        .conn("boh", LAND)
        .conn("vie", LAND)
        .conn("tri", LAND)
        .conn("ven", LAND)
        .conn("pie", LAND)
        .flag(LAND)
        .prov("kie")
        .conn("hol", COAST)
        .conn("hel", SEA)
        .conn("den", COAST)
        .conn("bal", SEA)
        .conn("ber", COAST)
        .conn("mun", LAND)
        .conn("ruh", LAND)
        .flag(COAST)
        .sc(GERMANY)
        .prov("swi")
        .done()
}

//! Legal-option trees for client display.
//!
//! A tree maps each choice to the choices that may follow it, e.g.
//! `par` → `Move` → `par` (source) → `bur`. Serialized as nested JSON
//! objects of the form `{"bur": {"Type": "Province", "Next": {}}}`.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::order::OrderType;
use super::province::Province;
use super::unit::UnitType;

/// One choice in an options tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionValue {
    Province(Province),
    /// The province of the unit an order is given to, which may be a coast
    /// of the province the tree is rooted at.
    SrcProvince(Province),
    OrderType(OrderType),
    UnitType(UnitType),
}

impl OptionValue {
    pub fn kind(&self) -> &'static str {
        match self {
            OptionValue::Province(_) => "Province",
            OptionValue::SrcProvince(_) => "SrcProvince",
            OptionValue::OrderType(_) => "OrderType",
            OptionValue::UnitType(_) => "UnitType",
        }
    }

    pub fn key(&self) -> String {
        match self {
            OptionValue::Province(p) | OptionValue::SrcProvince(p) => p.to_string(),
            OptionValue::OrderType(t) => t.to_string(),
            OptionValue::UnitType(t) => t.to_string(),
        }
    }
}

/// A tree of legal choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(BTreeMap<OptionValue, Options>);

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &OptionValue) -> Option<&Options> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &OptionValue) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &OptionValue> {
        self.0.keys()
    }

    pub fn insert(&mut self, key: OptionValue, next: Options) {
        self.0.insert(key, next);
    }

    /// The subtree under `key`, created empty if missing.
    pub fn entry(&mut self, key: OptionValue) -> &mut Options {
        self.0.entry(key).or_default()
    }

    /// Adds a chain of choices, merging with what is already there.
    pub fn add_path<I>(&mut self, path: I)
    where
        I: IntoIterator<Item = OptionValue>,
    {
        let mut node = self;
        for key in path {
            node = node.entry(key);
        }
    }

    /// Follows a chain of choices.
    pub fn at(&self, path: &[OptionValue]) -> Option<&Options> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }
}

#[derive(Serialize)]
struct OptionNode<'a> {
    #[serde(rename = "Type")]
    kind: &'static str,
    #[serde(rename = "Next")]
    next: &'a Options,
}

impl Serialize for Options {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, next) in &self.0 {
            map.serialize_entry(
                &key.key(),
                &OptionNode {
                    kind: key.kind(),
                    next,
                },
            )?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prov(name: &str) -> OptionValue {
        OptionValue::Province(Province::from(name))
    }

    #[test]
    fn add_path_merges_prefixes() {
        let mut opts = Options::new();
        opts.add_path([OptionValue::OrderType(OrderType::Move), prov("bur")]);
        opts.add_path([OptionValue::OrderType(OrderType::Move), prov("pic")]);
        let moves = opts.get(&OptionValue::OrderType(OrderType::Move)).unwrap();
        assert_eq!(moves.len(), 2);
        assert!(opts
            .at(&[OptionValue::OrderType(OrderType::Move), prov("pic")])
            .is_some());
    }

    #[test]
    fn serializes_with_type_tags() {
        let mut opts = Options::new();
        opts.add_path([
            OptionValue::SrcProvince(Province::from("par")),
            prov("bur"),
        ]);
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["par"]["Type"], "SrcProvince");
        assert_eq!(json["par"]["Next"]["bur"]["Type"], "Province");
        assert!(json["par"]["Next"]["bur"]["Next"].as_object().unwrap().is_empty());
    }
}

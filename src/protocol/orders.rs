//! Order text notation.
//!
//! An order is a list of words, province first:
//!
//! ```text
//! par Hold
//! par Move bur
//! lon MoveViaConvoy bre
//! mun Support kie ber      (support move kie -> ber)
//! mun Support kie kie      (support hold)
//! nth Convoy lon nwy
//! stp/nc Build Fleet
//! ber Disband
//! ```
//!
//! Words are separated by whitespace; order type and unit type names are
//! case-insensitive, province names are taken as written.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::board::order::{Order, OrderType};
use crate::board::province::{Nation, Province};
use crate::board::unit::UnitType;

/// Errors that can occur when parsing order text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty order")]
    EmptyInput,

    #[error("missing order type after '{0}'")]
    MissingType(String),

    #[error("unknown order type '{0}'")]
    UnknownType(String),

    #[error("unknown unit type '{0}'")]
    UnknownUnitType(String),

    #[error("{order} takes {expected} argument(s), got {found}")]
    WrongArity {
        order: OrderType,
        expected: usize,
        found: usize,
    },

    #[error("{} orders failed: {}", .0.len(), join(.0))]
    Many(Vec<ParseError>),
}

fn join(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parses one order. `at` stamps builds and disbands.
pub fn parse_order<S: AsRef<str>>(bits: &[S], at: u64) -> Result<Order, ParseError> {
    let words: Vec<&str> = bits.iter().map(|b| b.as_ref().trim()).collect();
    let (source, rest) = match words.split_first() {
        Some((source, rest)) if !source.is_empty() => (Province::from(*source), rest),
        _ => return Err(ParseError::EmptyInput),
    };
    let (typ, args) = rest
        .split_first()
        .ok_or_else(|| ParseError::MissingType(source.to_string()))?;
    let order_type: OrderType = typ
        .parse()
        .map_err(|_| ParseError::UnknownType(typ.to_string()))?;

    let arity = |expected: usize| {
        if args.len() == expected {
            Ok(())
        } else {
            Err(ParseError::WrongArity {
                order: order_type,
                expected,
                found: args.len(),
            })
        }
    };

    let order = match order_type {
        OrderType::Hold => {
            arity(0)?;
            Order::hold(source)
        }
        OrderType::Move => {
            arity(1)?;
            Order::move_to(source, args[0])
        }
        OrderType::MoveViaConvoy => {
            arity(1)?;
            Order::move_via_convoy(source, args[0])
        }
        OrderType::Support => {
            arity(2)?;
            if args[0] == args[1] {
                Order::support_hold(source, args[0])
            } else {
                Order::support_move(source, args[0], args[1])
            }
        }
        OrderType::Convoy => {
            arity(2)?;
            Order::convoy(source, args[0], args[1])
        }
        OrderType::Build => {
            arity(1)?;
            let unit_type: UnitType = args[0]
                .parse()
                .map_err(|_| ParseError::UnknownUnitType(args[0].to_string()))?;
            Order::build(source, unit_type, at)
        }
        OrderType::Disband => {
            arity(0)?;
            Order::disband(source, at)
        }
    };
    Ok(order)
}

/// Parses every nation's orders, keyed by province. `bits` exclude the
/// province, which is the map key. All failures are reported together.
pub fn parse_all(
    orders: &BTreeMap<Nation, BTreeMap<Province, Vec<String>>>,
    at: u64,
) -> Result<BTreeMap<Province, Order>, ParseError> {
    let mut parsed = BTreeMap::new();
    let mut errors = Vec::new();
    for nation_orders in orders.values() {
        for (prov, bits) in nation_orders {
            let mut words = Vec::with_capacity(bits.len() + 1);
            words.push(prov.as_str());
            words.extend(bits.iter().map(String::as_str));
            match parse_order(&words, at) {
                Ok(order) => {
                    parsed.insert(prov.clone(), order);
                }
                Err(err) => errors.push(err),
            }
        }
    }
    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(ParseError::Many(errors))
    }
}

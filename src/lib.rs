//! dipjudge: a Diplomacy order adjudicator.
//!
//! Exposes the board representation, order rules, resolver, the classical
//! ruleset, and protocol modules for use by integration tests and the
//! binary entry point.

pub mod board;
pub mod classical;
pub mod config;
pub mod error;
pub mod orders;
pub mod protocol;
pub mod resolve;
pub mod ruleset;
pub mod session;

//! Session state management.
//!
//! Holds the game being adjudicated and the configuration used to start
//! new games, and answers the line commands read by the binary.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::board::order::OrderType;
use crate::board::province::Nation;
use crate::board::state::State;
use crate::classical::{self, NATIONS};
use crate::config::JudgeConfig;
use crate::protocol::orders::parse_order;
use crate::protocol::parser::Command;

/// Holds the mutable state of a session between commands.
pub struct Session {
    pub state: Option<State>,
    pub config: JudgeConfig,
    /// Stamp for the next build or disband order.
    stamp: u64,
}

impl Session {
    pub fn new(config: JudgeConfig) -> Self {
        Session {
            state: None,
            config,
            stamp: 0,
        }
    }

    /// Runs one command. Returns `false` when the session should end.
    pub fn dispatch<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<bool> {
        match cmd {
            Command::IsReady => writeln!(out, "readyok")?,
            Command::SetOption { name, value } => self.handle_setoption(&name, &value, out)?,
            Command::NewGame => self.handle_newgame(out)?,
            Command::Order { bits } => self.handle_order(&bits, out)?,
            Command::Next => self.handle_next(out)?,
            Command::Phase => self.handle_phase(out)?,
            Command::Units => self.handle_units(out)?,
            Command::Centers => self.handle_centers(out)?,
            Command::Resolutions => self.handle_resolutions(out)?,
            Command::Options { nation } => self.handle_options(&nation, out)?,
            Command::Messages { nation } => self.handle_messages(&nation, out)?,
            Command::Corroborate { nation } => self.handle_corroborate(&nation, out)?,
            Command::Winner => self.handle_winner(out)?,
            Command::Dump => self.handle_dump(out)?,
            Command::Quit => return Ok(false),
        }
        out.flush()?;
        Ok(true)
    }

    /// Changes the configuration. Takes effect at the next `newgame`.
    pub fn handle_setoption<W: Write>(&mut self, name: &str, value: &str, out: &mut W) -> io::Result<()> {
        match self.config.set(name, value) {
            Ok(()) => writeln!(out, "ok"),
            Err(e) => error(out, e),
        }
    }

    pub fn handle_newgame<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let state = classical::start_with(self.config.clone());
        info!(phase = %state.phase(), "new game");
        writeln!(out, "phase {}", state.phase())?;
        self.state = Some(state);
        self.stamp = 0;
        Ok(())
    }

    /// Stores an order, replacing any earlier order for the same unit.
    pub fn handle_order<W: Write>(&mut self, bits: &[String], out: &mut W) -> io::Result<()> {
        let Some(state) = self.state.as_mut() else {
            return error(out, "no game");
        };
        let order = match parse_order(bits, self.stamp) {
            Ok(order) => order,
            Err(e) => return error(out, e),
        };
        self.stamp += 1;
        let key = order.source().clone();
        state.remove_order(&key);
        match state.set_order(key, order) {
            Ok(()) => writeln!(out, "ok"),
            Err(e) => error(out, e),
        }
    }

    pub fn handle_next<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(state) = self.state.as_mut() else {
            return error(out, "no game");
        };
        match state.next() {
            Ok(()) => writeln!(out, "phase {}", state.phase()),
            Err(e) => {
                warn!(error = %e, "turn aborted");
                error(out, e)
            }
        }
    }

    pub fn handle_phase<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.state {
            Some(state) => writeln!(out, "phase {}", state.phase()),
            None => error(out, "no game"),
        }
    }

    pub fn handle_units<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            return error(out, "no game");
        };
        for (prov, unit) in state.units() {
            writeln!(out, "{} {} {}", prov, unit.unit_type, unit.nation)?;
        }
        for (prov, unit) in state.dislodgeds() {
            writeln!(out, "{} {} {} dislodged", prov, unit.unit_type, unit.nation)?;
        }
        Ok(())
    }

    pub fn handle_centers<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            return error(out, "no game");
        };
        for (prov, nation) in state.supply_centers() {
            writeln!(out, "{} {}", prov, nation)?;
        }
        Ok(())
    }

    pub fn handle_resolutions<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            return error(out, "no game");
        };
        for (prov, resolution) in state.resolutions() {
            match resolution {
                Ok(()) => writeln!(out, "{} OK", prov)?,
                Err(e) => writeln!(out, "{} {}", prov, e)?,
            }
        }
        Ok(())
    }

    pub fn handle_options<W: Write>(&self, nation: &str, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            return error(out, "no game");
        };
        let options = state.options(&OrderType::ALL, &nation_named(nation));
        let json = serde_json::to_string(&options).map_err(io::Error::other)?;
        writeln!(out, "{}", json)
    }

    pub fn handle_messages<W: Write>(&self, nation: &str, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            return error(out, "no game");
        };
        for message in state.phase().messages(state, &nation_named(nation)) {
            writeln!(out, "{}", message)?;
        }
        Ok(())
    }

    /// One line per problem: the province concerned (or `-`) and why.
    pub fn handle_corroborate<W: Write>(&self, nation: &str, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            return error(out, "no game");
        };
        for (prov, problem) in state.corroborate(&nation_named(nation)) {
            match prov {
                Some(prov) => writeln!(out, "{} {}", prov, problem)?,
                None => writeln!(out, "- {}", problem)?,
            }
        }
        Ok(())
    }

    pub fn handle_winner<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            return error(out, "no game");
        };
        match state.winner() {
            Some(nation) => writeln!(out, "winner {}", nation),
            None => writeln!(out, "winner none"),
        }
    }

    pub fn handle_dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(state) = &self.state else {
            return error(out, "no game");
        };
        let json = serde_json::to_string(&state.snapshot()).map_err(io::Error::other)?;
        writeln!(out, "{}", json)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(JudgeConfig::default())
    }
}

/// Classical nations match case-insensitively; anything else is taken as
/// written.
fn nation_named(name: &str) -> Nation {
    NATIONS
        .into_iter()
        .find(|n| n.as_str().eq_ignore_ascii_case(name))
        .unwrap_or_else(|| Nation::new(name))
}

fn error<W: Write>(out: &mut W, e: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "error {}", e)
}

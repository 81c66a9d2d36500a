//! dipjudge: a Diplomacy adjudicator driven by line commands.
//!
//! Reads commands from stdin and writes responses to stdout. Logs go to
//! stderr. An optional first argument names a JSON configuration file.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use tracing::error;
use tracing_subscriber::EnvFilter;

use dipjudge::config::JudgeConfig;
use dipjudge::protocol::parser::parse_command;
use dipjudge::session::Session;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = match env::args().nth(1) {
        Some(path) => match JudgeConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                error!(error = %e, "could not load configuration");
                return ExitCode::FAILURE;
            }
        },
        None => JudgeConfig::default(),
    };

    match run(Session::new(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "i/o failure");
            ExitCode::FAILURE
        }
    }
}

/// Runs the command loop until `quit` or end of input.
fn run(mut session: Session) -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let Some(cmd) = parse_command(&line?) else {
            continue;
        };
        if !session.dispatch(cmd, &mut out)? {
            break;
        }
    }
    out.flush()
}

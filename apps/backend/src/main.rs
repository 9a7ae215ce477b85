//! Development host: runs one game session over stdin/stdout.
//!
//! Each stdin line is a JSON frame:
//!
//! ```text
//! {"frame":"connect"}
//! {"frame":"intent","playerKey":"player1","intent":{"type":"join-game","nickname":"ann"}}
//! {"frame":"disconnect","playerKey":"player1"}
//! ```
//!
//! Every delivered event is written to stdout as `{"to": ..., "event": ...}`.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;

use serde::Deserialize;
use tichu_backend::domain::PlayerKey;
use tichu_backend::{AppError, GameConfig, Outbox, SessionRegistry};
use tracing::{error, info, warn};
use uuid::Uuid;

mod telemetry;

#[derive(Debug, Deserialize)]
#[serde(tag = "frame", rename_all = "kebab-case")]
enum HostFrame {
    Connect,
    #[serde(rename_all = "camelCase")]
    Disconnect { player_key: PlayerKey },
    #[serde(rename_all = "camelCase")]
    Intent {
        player_key: PlayerKey,
        intent: serde_json::Value,
    },
}

fn handle_frame(registry: &SessionRegistry, id: Uuid, line: &str) -> Result<(), AppError> {
    match serde_json::from_str::<HostFrame>(line)? {
        HostFrame::Connect => {
            let key = registry.connect(id)?;
            info!(player = ?key, "connection accepted");
        }
        HostFrame::Disconnect { player_key } => {
            registry.with_session(id, |session| session.disconnect(player_key))?;
        }
        HostFrame::Intent { player_key, intent } => {
            registry.with_session(id, |session| session.handle_value(player_key, intent))?;
        }
    }
    Ok(())
}

fn run(config: GameConfig) -> io::Result<()> {
    let registry = SessionRegistry::new();
    let outbox = Arc::new(Outbox::new());
    let session_id = registry.create(config, outbox.clone());

    let mut stdout = io::stdout().lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(err) = handle_frame(&registry, session_id, &line) {
            warn!(error = %err, "frame rejected");
        }
        for delivery in outbox.drain() {
            serde_json::to_writer(&mut stdout, &delivery)?;
            writeln!(stdout)?;
        }
        stdout.flush()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    telemetry::init_tracing();

    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "host stopped");
            ExitCode::FAILURE
        }
    }
}

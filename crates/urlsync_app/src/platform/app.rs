use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use sync_logging::{sync_info, sync_warn};
use urlsync_core::{FieldRegistry, FieldUpdate};
use urlsync_engine::{DispatchOutcome, EngineConfig, KeyValueStore, Reconciler, SessionScope};

use super::commands::{parse_command, Command};
use super::config::AppConfig;
use super::logging;

pub fn run_app(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = AppConfig::load(config_path)?;
    logging::initialize(config.log_destination);
    sync_info!(
        "Starting urlsync_app store={:?} tier={} fields={}",
        config.store_name,
        config.tier,
        config.fields.len()
    );

    let registry = FieldRegistry::new(config.fields.iter().cloned())
        .context("invalid field list in config")?;
    let mut engine_config = EngineConfig::default_with_state_dir(config.state_dir.clone());
    engine_config.clock = Some(Arc::new(|| Utc::now().to_rfc3339()));

    // The session lives as long as this process.
    let session = SessionScope::new();
    let store = KeyValueStore::open(&config.store_name, config.tier, &engine_config, &session);
    let mut reconciler = Reconciler::new(registry, store);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                sync_warn!("Rejected input line {:?}: {}", line, err);
                writeln!(out, "error: {err}")?;
                continue;
            }
        };
        match command {
            Command::Dispatch(trigger) => {
                let outcome = reconciler.dispatch(trigger);
                write_outcome(&mut out, &outcome)?;
            }
            Command::Share => writeln!(out, "share {}", reconciler.share_token())?,
            Command::Clear => {
                let cleared = reconciler.clear();
                writeln!(out, "{}", if cleared { "cleared" } else { "clear failed" })?;
            }
            Command::Quit => break,
        }
        out.flush()?;
    }

    sync_info!("urlsync_app finished after {} dispatches", reconciler.dispatched());
    Ok(())
}

fn write_outcome(out: &mut impl Write, outcome: &DispatchOutcome) -> io::Result<()> {
    let Some(fields) = &outcome.fields else {
        return writeln!(out, "ignored");
    };
    for (id, update) in fields.iter() {
        match update {
            FieldUpdate::NoChange => writeln!(out, "{id} unchanged")?,
            FieldUpdate::Set(value) => writeln!(out, "{id} = {value}")?,
        }
    }
    if let Some(url) = &outcome.navigate {
        writeln!(out, "navigate {url}")?;
    }
    Ok(())
}

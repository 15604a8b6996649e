//! Replays recorded landmark detections through the pose engine.
//!
//! Usage: `deha-replay [INPUT.jsonl]` (stdin when omitted or `-`).
//! Engine settings come from the file named by `DEHA_CONFIG`, if set, plus
//! `DEHA_*` environment variables.

mod replay;

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use deha_pose::{EngineConfig, PoseCatalog, SessionController};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::replay::Replayer;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deha_pose=info,deha_replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let catalog = *PoseCatalog::standard();
    let config_path = std::env::var("DEHA_CONFIG").ok();
    let config = EngineConfig::load(config_path.as_deref(), &catalog)
        .context("Failed to load engine configuration")?;
    tracing::info!(
        window = config.smoothing_window,
        initial_pose = %config.initial_pose_key,
        "engine configured"
    );

    for hint in catalog.hints() {
        tracing::debug!("{}", hint);
    }

    let session = SessionController::new(catalog, config)?;
    let mut replayer = Replayer::new(session);

    let stdout = io::stdout();
    let summary = match std::env::args().nth(1).filter(|a| a != "-") {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
            replayer.run(BufReader::new(file), stdout.lock())
        }
        None => replayer.run(io::stdin().lock(), stdout.lock()),
    }
    .context("Replay failed")?;

    tracing::info!(
        frames = summary.frames,
        detected = summary.detected_frames,
        quit = summary.quit_requested,
        "session ended"
    );

    Ok(())
}

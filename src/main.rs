//! Skyflap headless runner
//!
//! Drives sessions from the command line at a fixed tick rate (or as fast as
//! possible), fed by the autopilot or a scripted list of flap ticks, and
//! reports the outcome. Rendering is left to embedding hosts.

#![cfg_attr(target_arch = "wasm32", allow(unused_imports, dead_code))]

use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use skyflap::highscores::{FileStore, MemoryStore, ScoreStore};
use skyflap::platform::{self, FixedStep, InputScript, InputSource};
use skyflap::sim::{GameEvent, GameState};
use skyflap::{Medal, Session, Settings};

/// Run the flap-through-the-gaps simulation headlessly.
#[derive(Debug, Parser)]
#[command(name = "skyflap", version, about)]
struct Args {
    /// Settings file (JSON). Defaults to the user config dir.
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Obstacle seed (overrides settings; random when unset anywhere).
    #[arg(long)]
    seed: Option<u64>,

    /// Let the autopilot play.
    #[arg(short, long)]
    autopilot: bool,

    /// Ticks on which to flap, e.g. `--flap-at 0,20,40`.
    #[arg(long, value_delimiter = ',', value_name = "TICKS")]
    flap_at: Vec<u64>,

    /// Ticks per second (0 = unthrottled; overrides settings).
    #[arg(long, value_name = "RATE")]
    rate: Option<u32>,

    /// Stop after this many ticks.
    #[arg(long, default_value = "36000", value_name = "N")]
    max_ticks: u64,

    /// Stop after this many finished sessions.
    #[arg(long, default_value = "1", value_name = "N")]
    sessions: u32,

    /// Keep the best score in memory only.
    #[arg(long)]
    in_memory: bool,

    /// Print the final snapshot as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Write the effective settings back to the settings file.
    #[arg(long)]
    save_settings: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<()> {
    platform::init_logging();
    let args = Args::parse();

    let settings_path = args.settings.clone().unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&settings_path)
        .with_context(|| format!("loading settings from {}", settings_path.display()))?;
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(rate) = args.rate {
        settings.ticks_per_second = rate;
    }
    settings.autopilot |= args.autopilot;
    if !settings.autopilot && args.flap_at.is_empty() {
        log::warn!("No input source given; enabling autopilot");
        settings.autopilot = true;
    }
    if args.save_settings {
        settings
            .save(&settings_path)
            .with_context(|| format!("saving settings to {}", settings_path.display()))?;
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    let state = GameState::with_config(settings.world, seed).context("building world")?;

    let store: Box<dyn ScoreStore> = if args.in_memory {
        Box::new(MemoryStore::new())
    } else {
        let path = settings
            .high_score_path
            .clone()
            .unwrap_or_else(FileStore::default_path);
        Box::new(FileStore::new(path))
    };

    let mut session = Session::new(state, store);
    session.set_idle_mode(settings.autopilot);
    let script = InputScript::new(args.flap_at.clone());

    log::info!(
        "Skyflap starting: seed {}, {} ticks/s, autopilot {}",
        seed,
        settings.ticks_per_second,
        settings.autopilot
    );
    let stop = Arc::new(AtomicBool::new(false));
    if settings.is_throttled() && std::io::stdin().is_terminal() {
        log::info!("Press Enter to stop");
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().lock().read_line(&mut line);
            stop.store(true, Ordering::Relaxed);
        });
    }
    let ticks = run(&mut session, &script, &settings, &args, &stop);

    let snap = session.snapshot();
    log::info!(
        "Stopped after {} ticks: phase {:?}, score {}, best {}",
        ticks,
        snap.phase,
        snap.score,
        snap.high_score
    );
    if let Some(medal) = snap.medal.or_else(|| Medal::for_score(snap.score)) {
        log::info!("Medal: {}", medal);
    }
    if args.json {
        let json = serde_json::to_string_pretty(&snap).context("serializing snapshot")?;
        println!("{}", json);
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive `Session` from their own frame callback
}

/// Scheduling loop. Returns the number of ticks run.
///
/// `stop` is checked between ticks; once set, no further tick starts.
fn run<S: ScoreStore>(
    session: &mut Session<S>,
    script: &InputScript,
    settings: &Settings,
    args: &Args,
    stop: &AtomicBool,
) -> u64 {
    let mut clock = FixedStep::new(settings.ticks_per_second, settings.max_substeps);
    let mut last = Instant::now();
    let mut ticks = 0u64;
    let mut finished = 0u32;

    loop {
        let due = if settings.is_throttled() {
            let now = Instant::now();
            let due = clock.advance(now - last);
            last = now;
            due
        } else {
            1
        };

        for _ in 0..due {
            if stop.load(Ordering::Relaxed) {
                log::info!("Stopped by request");
                return ticks;
            }
            if script.fires_at(ticks) {
                session.press(InputSource::Script);
            }
            let game_over = session
                .step()
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { .. }));
            ticks += 1;

            if game_over {
                finished += 1;
                if finished >= args.sessions {
                    return ticks;
                }
            }
            if ticks >= args.max_ticks {
                return ticks;
            }
        }

        if settings.is_throttled() {
            std::thread::sleep(clock.step() / 2);
        }
    }
}

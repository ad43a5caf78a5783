//! Fixed tick simulation
//!
//! Core game loop that advances the world one tick deterministically:
//! body → obstacles (advance, spawn, evict) → pass scoring → collision.

use super::collision::{CollisionKind, detect_collision, detect_passes};
use super::state::{GameEvent, GamePhase, GameState};

/// Distance below the gap centre the autopilot lets the body sink before flapping
const AUTOPILOT_MARGIN: f32 = 20.0;
/// Autopilot only re-flaps once the previous rise has nearly spent itself
const AUTOPILOT_MIN_VEL: f32 = -1.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Flap, or start/restart when not playing (edge-triggered, consumed by this tick)
    pub flap: bool,
    /// Idle/demo mode - autopilot decides flaps
    pub idle_mode: bool,
}

/// Apply the player's single action.
///
/// From `Start` or `Over` this resets the session and enters `Playing`; in
/// every case the body then receives one upward impulse.
pub fn flap_or_start(state: &mut GameState) {
    match state.phase {
        GamePhase::Start | GamePhase::Over => {
            state.reset_session();
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::SessionStarted);
            log::info!("Session started (seed {})", state.seed);
        }
        GamePhase::Playing => {}
    }
    state.body.flap(&state.config);
    state.events.push(GameEvent::Flapped);
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    let flap = input.flap || (input.idle_mode && autopilot_wants_flap(state));
    if flap {
        flap_or_start(state);
    }

    // Don't tick unless playing
    if !state.is_playing() {
        return;
    }

    state.time_ticks += 1;
    let config = state.config;

    state.body.advance(&config);

    state.obstacles.advance(&config);
    let spawned = state
        .obstacles
        .maybe_spawn(&config, &mut state.rng)
        .map(|o| GameEvent::ObstacleSpawned {
            id: o.id,
            top_height: o.top_height,
        });
    state.events.extend(spawned);
    for id in state.obstacles.evict(&config) {
        state.events.push(GameEvent::ObstacleEvicted { id });
    }

    for id in detect_passes(&mut state.obstacles, &config) {
        state.score += 1;
        log::debug!("Passed obstacle {} (score {})", id, state.score);
        state.events.push(GameEvent::ObstaclePassed {
            id,
            score: state.score,
        });
    }

    if let Some(kind) = detect_collision(&state.body_rect(), &state.obstacles, &config) {
        end_session(state, kind);
    }
}

/// Freeze the world; only `flap_or_start` leaves `Over`
fn end_session(state: &mut GameState, kind: CollisionKind) {
    state.phase = GamePhase::Over;
    state.collision = Some(kind);
    state.events.push(GameEvent::Collided(kind));
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: hit {:?} with score {} after {} ticks",
        kind,
        state.score,
        state.time_ticks
    );
}

/// Demo-mode controller.
///
/// Auto-starts from `Start`/`Over`. While playing, it steers for the centre
/// of the first gap not yet passed (or the middle of the world when there is
/// none) and flaps once the body has sunk below it and is no longer rising
/// fast.
pub fn autopilot_wants_flap(state: &GameState) -> bool {
    if !state.is_playing() {
        return true;
    }

    let config = &state.config;
    let target = state
        .obstacles
        .iter()
        .find(|o| !o.passed)
        .map(|o| o.gap_center(config))
        .unwrap_or(config.world_height / 2.0);

    state.body.center_y(config) > target + AUTOPILOT_MARGIN && state.body.vel >= AUTOPILOT_MIN_VEL
}

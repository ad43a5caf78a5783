//! Session controller
//!
//! Owns the game state, the input latch and the best score. Hosts press the
//! latch whenever input arrives, call `step` once per scheduled tick and read
//! a `Snapshot` to draw; nothing else touches the state.

use std::sync::Arc;

use serde::Serialize;

use crate::highscores::{HighScore, ScoreStore};
use crate::medal::Medal;
use crate::platform::input::{InputLatch, InputSource};
use crate::sim::{CollisionKind, GameEvent, GamePhase, GameState, Obstacle, TickInput, tick};

/// Read-only view of the world after a tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub tick: u64,
    pub body_x: f32,
    pub body_y: f32,
    pub body_vel: f32,
    /// Left to right
    pub obstacles: &'a [Obstacle],
    pub score: u32,
    pub high_score: u32,
    pub collision: Option<CollisionKind>,
    /// Only set once the session is over
    pub medal: Option<Medal>,
}

/// One player's run of sessions
#[derive(Debug)]
pub struct Session<S> {
    state: GameState,
    input: Arc<InputLatch>,
    high_score: HighScore<S>,
    idle_mode: bool,
    sessions_played: u32,
}

impl<S: ScoreStore> Session<S> {
    /// Reads the best score from `store` once, here
    pub fn new(state: GameState, store: S) -> Self {
        Self {
            state,
            input: Arc::new(InputLatch::new()),
            high_score: HighScore::load(store),
            idle_mode: false,
            sessions_played: 0,
        }
    }

    /// Handle for input producers on other threads
    pub fn input(&self) -> Arc<InputLatch> {
        Arc::clone(&self.input)
    }

    /// Latch a press for the next tick
    pub fn press(&self, source: InputSource) -> bool {
        self.input.press(source)
    }

    /// Let the autopilot play
    pub fn set_idle_mode(&mut self, idle_mode: bool) {
        self.idle_mode = idle_mode;
    }

    /// Run one tick, consuming any latched press. Returns that tick's events.
    pub fn step(&mut self) -> &[GameEvent] {
        let input = TickInput {
            flap: self.input.take(),
            idle_mode: self.idle_mode,
        };
        tick(&mut self.state, &input);

        for event in &self.state.events {
            match *event {
                GameEvent::SessionStarted => self.sessions_played += 1,
                GameEvent::GameOver { score } => {
                    let new_best = self.high_score.submit(score);
                    match Medal::for_score(score) {
                        Some(medal) => log::info!(
                            "Session {} finished: score {} ({} medal){}",
                            self.sessions_played,
                            score,
                            medal,
                            if new_best { ", new best" } else { "" }
                        ),
                        None => log::info!(
                            "Session {} finished: score {}{}",
                            self.sessions_played,
                            score,
                            if new_best { ", new best" } else { "" }
                        ),
                    }
                }
                _ => {}
            }
        }

        &self.state.events
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let state = &self.state;
        Snapshot {
            phase: state.phase,
            tick: state.time_ticks,
            body_x: state.config.body_x,
            body_y: state.body.y,
            body_vel: state.body.vel,
            obstacles: state.obstacles.as_slice(),
            score: state.score,
            high_score: self.high_score.best(),
            collision: state.collision,
            medal: (state.phase == GamePhase::Over)
                .then(|| Medal::for_score(state.score))
                .flatten(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for staging scenarios in tests
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score.best()
    }

    pub fn high_scores(&self) -> &HighScore<S> {
        &self.high_score
    }

    /// Sessions started so far
    pub fn sessions_played(&self) -> u32 {
        self.sessions_played
    }
}

//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Logging backend (env_logger natively, browser console on web)
//! - Input events (coalesced into one flap latch)
//! - Time/ticks (fixed-step accumulator)
//! - Storage (see `highscores`)

pub mod input;
pub mod time;

pub use input::{InputLatch, InputScript, InputSource};
pub use time::FixedStep;

/// Install the logger for this host. Safe to call more than once.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    // A second init (tests, embedding hosts) is not an error worth surfacing
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Install the logger for this host. Safe to call more than once.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

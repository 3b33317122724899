//! Balloon Pump core crate.
//!
//! Click the pump handle to blow up a balloon, let it drift, click it to pop
//! it; the game ends once every balloon in the pool has been popped.
//!
//! `engine` is a tiny sprite stage + tween scheduler, `game` holds the rules
//! and is testable natively, `web` wires both to a browser canvas.

use wasm_bindgen::prelude::*;

pub mod engine;
pub mod game;
mod web;

pub use game::{GameConfig, GameSession};
pub use web::{burst_count, is_complete, start_game};
#[cfg(feature = "serde_json")]
pub use web::start_game_with_config;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

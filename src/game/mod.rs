//! Balloon game rules: configuration, the asset manifest, the per-slot balloon
//! record and the session that drives the pump / float / burst lifecycle.
//! Browser-free, so everything here runs under native `cargo test`.

pub mod assets;
pub mod balloon;
pub mod config;
pub mod session;

pub use balloon::{Balloon, BalloonState};
pub use config::{ConfigError, GameConfig, MAX_POOL_SIZE, Point, PumpLayout};
pub use session::{Cue, GameScene, GameSession, PointerTarget};

//! Minimal 2D engine layer: a sprite stage, a tween scheduler with typed
//! completion cues, easing curves and a seedable RNG. Nothing in here knows
//! about balloons or the browser.

pub mod easing;
pub mod rng;
pub mod stage;
pub mod tween;

pub use easing::Easing;
pub use rng::Rng;
pub use stage::{Banner, Prop, Rect, Sprite, SpriteId, Stage};
pub use tween::{Track, Tween, TweenId, TweenState};

/// Everything a game handler may touch: the display list and the animation
/// scheduler. Passed explicitly into every handler.
#[derive(Debug)]
pub struct Scene<C> {
    pub stage: Stage,
    pub tweens: TweenState<C>,
}

impl<C> Scene<C> {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            stage: Stage::new(width, height),
            tweens: TweenState::new(),
        }
    }

    /// Advance animations by `dt` milliseconds and return finished cues.
    pub fn tick(&mut self, dt: f32) -> Vec<C> {
        self.tweens.tick(dt, &mut self.stage)
    }
}

// Per-slot balloon record. Rendering state lives on the stage sprite; this
// holds only the game-side flags plus a non-owning sprite handle.

use crate::engine::{Rng, Sprite, SpriteId, TweenId};

use super::config::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalloonState {
    /// Hidden, waiting in the pool.
    Dormant,
    /// In the pump, growing one step per press.
    Inflating,
    /// Drifting around the viewport, burstable.
    Floating,
    /// Collapse animation running.
    Bursting,
}

#[derive(Debug, Clone)]
pub struct Balloon {
    index: usize,
    sprite: SpriteId,
    pub(crate) inflated: bool,
    pub(crate) burst: bool,
    pub(crate) current_scale: f32,
    pub(crate) target: Point,
    pub(crate) float_handle: Option<TweenId>,
}

impl Balloon {
    pub(crate) fn new(index: usize, sprite: SpriteId, base_scale: f32, target: Point) -> Self {
        Self {
            index,
            sprite,
            inflated: false,
            burst: false,
            current_scale: base_scale,
            target,
            float_handle: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sprite(&self) -> SpriteId {
        self.sprite
    }

    pub fn is_inflated(&self) -> bool {
        self.inflated
    }

    pub fn is_bursting(&self) -> bool {
        self.burst
    }

    pub fn is_floating(&self) -> bool {
        self.inflated && !self.burst
    }

    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    /// Destination of the current (or last) float leg.
    pub fn target(&self) -> Point {
        self.target
    }

    pub fn float_handle(&self) -> Option<TweenId> {
        self.float_handle
    }

    /// `in_pump` is whether the session currently targets this balloon.
    pub fn state(&self, in_pump: bool) -> BalloonState {
        match (self.inflated, self.burst) {
            (_, true) => BalloonState::Bursting,
            (true, false) => BalloonState::Floating,
            (false, false) if in_pump => BalloonState::Inflating,
            (false, false) => BalloonState::Dormant,
        }
    }
}

/// Pick a float destination that keeps the whole sprite on screen.
///
/// Uniform over `[half_w, width - half_w]` x `[half_h, height - half_h]`,
/// using the sprite's rendered bounds and the viewport size passed in. When
/// the sprite is larger than the viewport on an axis the sample collapses to
/// the centre of that axis.
pub fn sample_destination(sprite: &Sprite, viewport: (f32, f32), rng: &mut Rng) -> Point {
    let bounds = sprite.bounds();
    Point::new(
        sample_axis(bounds.width / 2.0, viewport.0, rng),
        sample_axis(bounds.height / 2.0, viewport.1, rng),
    )
}

fn sample_axis(half: f32, extent: f32, rng: &mut Rng) -> f32 {
    let lo = half.ceil() as i32;
    let hi = (extent - half).floor() as i32;
    if hi < lo {
        return extent / 2.0;
    }
    rng.between(lo, hi) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_follows_flags() {
        let mut b = Balloon::new(0, SpriteId(0), 0.1, Point::new(0.0, 0.0));
        assert_eq!(b.state(false), BalloonState::Dormant);
        assert_eq!(b.state(true), BalloonState::Inflating);
        b.inflated = true;
        assert_eq!(b.state(false), BalloonState::Floating);
        assert!(b.is_floating());
        b.burst = true;
        assert_eq!(b.state(false), BalloonState::Bursting);
        assert!(!b.is_floating());
    }

    #[test]
    fn destinations_keep_sprite_inside_viewport() {
        let mut rng = Rng::new(1234);
        let sprite = Sprite::new("balloonA", 500.0, 700.0).with_scale(0.2);
        for (w, h) in [(1280.0, 720.0), (320.0, 480.0), (101.0, 141.0)] {
            for _ in 0..500 {
                let p = sample_destination(&sprite, (w, h), &mut rng);
                assert!(p.x >= 50.0 && p.x <= w - 50.0, "x={} for width {}", p.x, w);
                assert!(p.y >= 70.0 && p.y <= h - 70.0, "y={} for height {}", p.y, h);
            }
        }
    }

    #[test]
    fn oversized_sprite_centres_on_axis() {
        let mut rng = Rng::new(5);
        let sprite = Sprite::new("balloonA", 1000.0, 100.0);
        let p = sample_destination(&sprite, (400.0, 600.0), &mut rng);
        assert_eq!(p.x, 200.0);
        assert!(p.y >= 50.0 && p.y <= 550.0);
    }
}

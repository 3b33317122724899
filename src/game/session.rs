//! Balloon game controller.
//!
//! `GameSession` owns the balloon pool and the pump state and drives every
//! lifecycle transition:
//!
//! ```text
//! dormant --select--> inflating --grow to max--> floating --burst--> bursting
//!    ^                                                                   |
//!    +------------------------- collapse finished -----------------------+
//! ```
//!
//! Handlers never hold on to the scene; it is passed in on every call. Tween
//! completions come back as [`Cue`]s from [`GameSession::tick`].

use crate::engine::{Banner, Easing, Prop, Rng, Scene, Sprite, SpriteId, Tween, TweenId};

use super::assets;
use super::balloon::{Balloon, BalloonState, sample_destination};
use super::config::{ConfigError, GameConfig, Point, SCALE_EPSILON};

/// Completion payloads for the tweens the session schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Handle stroke finished; run one inflation step.
    PumpReleased,
    /// A float leg arrived. `tween` lets stale legs be told apart.
    FloatLegDone { balloon: usize, tween: TweenId },
    /// Collapse animation finished.
    BurstDone { balloon: usize },
}

pub type GameScene = Scene<Cue>;

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Pump,
    Balloon(usize),
    Nothing,
}

#[derive(Debug, Clone, Copy)]
struct PumpSprites {
    handle: SpriteId,
    body: SpriteId,
}

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    balloons: Vec<Balloon>,
    pump: PumpSprites,
    /// Balloon currently in the pump.
    active: Option<usize>,
    next_index: usize,
    burst_count: usize,
    pump_busy: bool,
    completed: bool,
    rng: Rng,
}

impl GameSession {
    /// Validate `config`, put the background, pump and a hidden balloon per
    /// pool slot on the stage, and return the idle session.
    ///
    /// `texture_size` reports the source pixel size of a texture key.
    pub fn new(
        config: GameConfig,
        scene: &mut GameScene,
        texture_size: impl Fn(&str) -> (f32, f32),
        mut rng: Rng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let stage = &mut scene.stage;
        stage.set_background(assets::BACKGROUND);

        let part = |key: &str, at: Point| {
            let (w, h) = texture_size(key);
            Sprite::new(key, w, h)
                .with_pos(at.x, at.y)
                .with_scale(config.pump.scale)
                .with_depth(1)
        };
        let handle = stage.spawn(part(assets::PUMP_HANDLE, config.pump.handle).interactive());
        stage.spawn(part(assets::PUMP_PIPE, config.pump.pipe));
        let body = stage.spawn(part(assets::PUMP_BODY, config.pump.body));

        let mut balloons = Vec::with_capacity(config.pool_size);
        for index in 0..config.pool_size {
            let key = assets::balloon_key(index);
            let (w, h) = texture_size(&key);
            let sprite = Sprite::new(key, w, h)
                .with_pos(config.balloon_spawn.x, config.balloon_spawn.y)
                .with_scale(config.base_scale)
                .with_depth(0)
                .interactive()
                .hidden();
            let target = sample_destination(&sprite, stage.viewport(), &mut rng);
            let id = stage.spawn(sprite);
            balloons.push(Balloon::new(index, id, config.base_scale, target));
        }

        log::info!("session ready with {} balloons", config.pool_size);
        Ok(Self {
            config,
            balloons,
            pump: PumpSprites { handle, body },
            active: None,
            next_index: 0,
            burst_count: 0,
            pump_busy: false,
            completed: false,
            rng,
        })
    }

    // -- Accessors --

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn balloon(&self, index: usize) -> Option<&Balloon> {
        self.balloons.get(index)
    }

    pub fn balloon_state(&self, index: usize) -> Option<BalloonState> {
        self.balloons
            .get(index)
            .map(|b| b.state(self.active == Some(index)))
    }

    pub fn active_balloon(&self) -> Option<usize> {
        self.active
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn burst_count(&self) -> usize {
        self.burst_count
    }

    pub fn pump_busy(&self) -> bool {
        self.pump_busy
    }

    pub fn pump_handle(&self) -> SpriteId {
        self.pump.handle
    }

    /// Every pool slot's worth of bursts has been started; input is ignored.
    pub fn is_terminal(&self) -> bool {
        self.burst_count >= self.config.pool_size
    }

    /// The completion banner has been shown.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    // -- Input --

    /// Route a pointer press at viewport coordinates to the pump or a balloon.
    pub fn pointer_down(&mut self, x: f32, y: f32, scene: &mut GameScene) -> PointerTarget {
        let Some(hit) = scene.stage.pick(x, y) else {
            return PointerTarget::Nothing;
        };
        if hit == self.pump.handle {
            self.press_pump(scene);
            return PointerTarget::Pump;
        }
        match self.balloons.iter().position(|b| b.sprite() == hit) {
            Some(index) => {
                self.burst(index, scene);
                PointerTarget::Balloon(index)
            }
            None => PointerTarget::Nothing,
        }
    }

    /// Start a pump stroke. Returns false when a stroke is already running or
    /// the game is over.
    pub fn press_pump(&mut self, scene: &mut GameScene) -> bool {
        if self.pump_busy || self.is_terminal() {
            return false;
        }
        self.pump_busy = true;

        let cfg = &self.config;
        let stroke = Tween::new(self.pump.handle, cfg.press_ms, Easing::CubicOut)
            .track(Prop::Y, cfg.pump.handle.y, cfg.pump.handle.y + cfg.handle_travel)
            .with_yoyo()
            .with_on_complete(Cue::PumpReleased);
        let squash = Tween::new(self.pump.body, cfg.press_ms, Easing::CubicOut)
            .track(Prop::ScaleY, cfg.pump.scale, cfg.pump.scale * cfg.body_squash)
            .with_yoyo();
        if let Some(body) = scene.stage.get_mut(self.pump.body) {
            body.x = cfg.pump.body.x;
            body.y = cfg.pump.body.y;
        }
        scene.tweens.add(stroke);
        scene.tweens.add(squash);
        true
    }

    /// One unit of pump work: select the next balloon if none is in the pump,
    /// otherwise grow the one that is.
    pub fn inflate_step(&mut self, scene: &mut GameScene) {
        match self.active {
            None => self.select_next(scene),
            Some(index) => self.grow(index, scene),
        }
    }

    fn select_next(&mut self, scene: &mut GameScene) {
        let index = self.next_index;
        let Some(balloon) = self.balloons.get_mut(index) else {
            return;
        };
        if balloon.inflated || balloon.burst {
            return;
        }
        balloon.current_scale = self.config.base_scale;
        if let Some(sprite) = scene.stage.get_mut(balloon.sprite()) {
            sprite.x = self.config.balloon_spawn.x;
            sprite.y = self.config.balloon_spawn.y;
            sprite.set_scale(balloon.current_scale);
            sprite.alpha = 1.0;
            sprite.visible = true;
        }
        self.active = Some(index);
        log::debug!("balloon {} in the pump", index);
    }

    fn grow(&mut self, index: usize, scene: &mut GameScene) {
        let (base, max, step) = (
            self.config.base_scale,
            self.config.max_scale,
            self.config.scale_increment,
        );
        let balloon = &mut self.balloons[index];
        if !balloon.burst && balloon.current_scale < max {
            let mut next = (balloon.current_scale + step).clamp(base, max);
            if max - next <= SCALE_EPSILON {
                next = max;
            }
            balloon.current_scale = next;
            if let Some(sprite) = scene.stage.get_mut(balloon.sprite()) {
                sprite.set_scale(next);
            }
        }
        if balloon.current_scale >= max {
            balloon.inflated = true;
            self.active = None;
            self.next_index = (self.next_index + 1) % self.balloons.len();
            log::debug!("balloon {} inflated, next slot {}", index, self.next_index);
            self.start_float(index, scene);
        }
    }

    /// Send a balloon on a new float leg, cancelling the one in flight.
    pub fn start_float(&mut self, index: usize, scene: &mut GameScene) {
        let viewport = scene.stage.viewport();
        let Some(balloon) = self.balloons.get_mut(index) else {
            return;
        };
        if let Some(old) = balloon.float_handle.take() {
            scene.tweens.cancel(old);
        }
        let Some(sprite) = scene.stage.get(balloon.sprite()) else {
            return;
        };
        let target = sample_destination(sprite, viewport, &mut self.rng);
        let (from_x, from_y) = (sprite.x, sprite.y);
        balloon.target = target;

        let sprite_id = balloon.sprite();
        let duration = self.config.float_leg_ms;
        let id = scene.tweens.add_with(|id| {
            Tween::new(sprite_id, duration, Easing::SineInOut)
                .track(Prop::X, from_x, target.x)
                .track(Prop::Y, from_y, target.y)
                .with_on_complete(Cue::FloatLegDone {
                    balloon: index,
                    tween: id,
                })
        });
        balloon.float_handle = Some(id);
    }

    /// Pop a floating balloon. Returns false if it is not floating or the game
    /// is over.
    pub fn burst(&mut self, index: usize, scene: &mut GameScene) -> bool {
        if self.is_terminal() {
            return false;
        }
        let Some(balloon) = self.balloons.get_mut(index) else {
            return false;
        };
        if !balloon.is_floating() {
            return false;
        }
        balloon.burst = true;
        self.burst_count += 1;
        log::debug!("balloon {} burst ({} so far)", index, self.burst_count);

        let collapse = Tween::new(balloon.sprite(), self.config.burst_ms, Easing::CubicOut)
            .track_to(&scene.stage, Prop::ScaleX, 0.0)
            .track_to(&scene.stage, Prop::ScaleY, 0.0)
            .track_to(&scene.stage, Prop::Alpha, 0.0)
            .with_on_complete(Cue::BurstDone { balloon: index });
        scene.tweens.add(collapse);
        true
    }

    fn finish_burst(&mut self, index: usize, scene: &mut GameScene) {
        self.retire(index, scene);
        self.check_completion(scene);
    }

    /// Back to dormant: hidden at base scale with no float leg.
    fn retire(&mut self, index: usize, scene: &mut GameScene) {
        let base = self.config.base_scale;
        let Some(balloon) = self.balloons.get_mut(index) else {
            return;
        };
        if let Some(leg) = balloon.float_handle.take() {
            scene.tweens.cancel(leg);
        }
        if let Some(sprite) = scene.stage.get_mut(balloon.sprite()) {
            sprite.visible = false;
            sprite.set_scale(base);
            sprite.alpha = 1.0;
        }
        balloon.current_scale = base;
        balloon.inflated = false;
        balloon.burst = false;
    }

    /// Show the completion banner once every pool slot's worth of bursts has
    /// happened. Returns true only on the call that shows it.
    ///
    /// Balloons left in the pump or in the air can no longer be popped, so
    /// they are cleared off the stage. Ones still collapsing finish on their
    /// own.
    pub fn check_completion(&mut self, scene: &mut GameScene) -> bool {
        if self.completed || self.burst_count < self.config.pool_size {
            return false;
        }
        self.completed = true;
        self.active = None;
        for index in 0..self.balloons.len() {
            if !self.balloons[index].burst {
                self.retire(index, scene);
            }
        }
        let (w, h) = scene.stage.viewport();
        scene.stage.show_banner(Banner {
            text: self.config.completion_text.clone(),
            x: w / 2.0,
            y: h / 2.0,
            font_px: self.config.completion_font_px,
            color: self.config.completion_color.clone(),
        });
        log::info!("all {} balloons burst, game complete", self.burst_count);
        true
    }

    // -- Frame --

    /// Advance animations by `dt` milliseconds and react to every tween that
    /// finished during the tick.
    pub fn tick(&mut self, dt: f32, scene: &mut GameScene) {
        for cue in scene.tick(dt) {
            self.handle_cue(cue, scene);
        }
    }

    pub fn handle_cue(&mut self, cue: Cue, scene: &mut GameScene) {
        match cue {
            Cue::PumpReleased => {
                self.pump_busy = false;
                // A stroke started before the last burst does no work.
                if !self.is_terminal() {
                    self.inflate_step(scene);
                }
            }
            Cue::FloatLegDone { balloon, tween } => {
                let Some(b) = self.balloons.get_mut(balloon) else {
                    return;
                };
                if b.float_handle != Some(tween) {
                    return;
                }
                b.float_handle = None;
                if b.is_floating() {
                    self.start_float(balloon, scene);
                }
            }
            Cue::BurstDone { balloon } => self.finish_burst(balloon, scene),
        }
    }

    /// Viewport changed. Float legs already in flight keep their destination;
    /// the next leg samples inside the new bounds.
    pub fn resize(&mut self, width: f32, height: f32, scene: &mut GameScene) {
        scene.stage.resize(width, height);
    }
}

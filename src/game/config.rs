// Game tuning and layout. Every constant the session uses lives here so a page
// can override it (JSON via `start_game_with_config` when `serde_json` is on).

use thiserror::Error;

/// Balloon textures are lettered `A..=Z`, which caps the pool.
pub const MAX_POOL_SIZE: usize = 26;

/// Scale values this close to the cap count as fully inflated.
pub const SCALE_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where the three pump parts sit, in viewport pixels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PumpLayout {
    pub pipe: Point,
    pub body: Point,
    pub handle: Point,
    pub scale: f32,
}

impl Default for PumpLayout {
    fn default() -> Self {
        Self {
            pipe: Point::new(1070.0, 480.0),
            body: Point::new(1150.0, 500.0),
            handle: Point::new(1150.0, 425.0),
            scale: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub pool_size: usize,
    pub base_scale: f32,
    pub max_scale: f32,
    pub scale_increment: f32,
    /// One direction of the handle stroke; the full press takes twice this.
    pub press_ms: f32,
    pub float_leg_ms: f32,
    pub burst_ms: f32,
    /// How far the handle travels down on a press.
    pub handle_travel: f32,
    /// Pump body vertical scale multiplier at the bottom of a press.
    pub body_squash: f32,
    pub pump: PumpLayout,
    /// Nozzle position where a fresh balloon appears.
    pub balloon_spawn: Point,
    pub asset_base: String,
    pub completion_text: String,
    pub completion_font_px: f32,
    pub completion_color: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pool_size: MAX_POOL_SIZE,
            base_scale: 0.1,
            max_scale: 0.2,
            scale_increment: 0.05,
            press_ms: 200.0,
            float_leg_ms: 3000.0,
            burst_ms: 500.0,
            handle_travel: 20.0,
            body_squash: 1.1,
            pump: PumpLayout::default(),
            balloon_spawn: Point::new(1032.0, 405.0),
            asset_base: "assets/".to_string(),
            completion_text: "Wow! You completed the game!".to_string(),
            completion_font_px: 32.0,
            completion_color: "#ff0000".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("balloon pool must not be empty")]
    EmptyPool,
    #[error("balloon pool of {size} exceeds the {max} lettered balloon assets")]
    PoolTooLarge { size: usize, max: usize },
    #[error("base scale must be positive, got {0}")]
    NonPositiveBaseScale(f32),
    #[error("max scale {max} is below base scale {base}")]
    ScaleRange { base: f32, max: f32 },
    #[error("scale increment must be positive, got {0}")]
    NonPositiveIncrement(f32),
    #[error("{name} duration must be positive, got {value}")]
    NonPositiveDuration { name: &'static str, value: f32 },
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::EmptyPool);
        }
        if self.pool_size > MAX_POOL_SIZE {
            return Err(ConfigError::PoolTooLarge {
                size: self.pool_size,
                max: MAX_POOL_SIZE,
            });
        }
        if !(self.base_scale > 0.0) {
            return Err(ConfigError::NonPositiveBaseScale(self.base_scale));
        }
        if !(self.max_scale >= self.base_scale) {
            return Err(ConfigError::ScaleRange {
                base: self.base_scale,
                max: self.max_scale,
            });
        }
        if !(self.scale_increment > 0.0) {
            return Err(ConfigError::NonPositiveIncrement(self.scale_increment));
        }
        for (name, value) in [
            ("press", self.press_ms),
            ("float leg", self.float_leg_ms),
            ("burst", self.burst_ms),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveDuration { name, value });
            }
        }
        Ok(())
    }

    /// Growth presses needed to take a freshly selected balloon from base to
    /// max scale (the selecting press is not counted).
    pub fn growth_presses(&self) -> usize {
        let steps = (self.max_scale - self.base_scale - SCALE_EPSILON) / self.scale_increment;
        (steps.ceil().max(0.0) as usize).max(1)
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: GameConfig = serde_json::from_str(json).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_cycle_takes_two_growth_presses() {
        assert_eq!(GameConfig::default().growth_presses(), 2);
    }

    #[test]
    fn growth_presses_rounds_up_partial_steps() {
        let cfg = GameConfig {
            scale_increment: 0.03,
            ..GameConfig::default()
        };
        assert_eq!(cfg.growth_presses(), 4);
    }

    #[test]
    fn zero_span_still_needs_one_press() {
        let cfg = GameConfig {
            max_scale: 0.1,
            ..GameConfig::default()
        };
        assert_eq!(cfg.growth_presses(), 1);
    }

    #[test]
    fn rejects_bad_configs() {
        let cases = [
            (
                GameConfig {
                    pool_size: 0,
                    ..GameConfig::default()
                },
                ConfigError::EmptyPool,
            ),
            (
                GameConfig {
                    pool_size: 27,
                    ..GameConfig::default()
                },
                ConfigError::PoolTooLarge { size: 27, max: 26 },
            ),
            (
                GameConfig {
                    max_scale: 0.05,
                    ..GameConfig::default()
                },
                ConfigError::ScaleRange {
                    base: 0.1,
                    max: 0.05,
                },
            ),
            (
                GameConfig {
                    scale_increment: 0.0,
                    ..GameConfig::default()
                },
                ConfigError::NonPositiveIncrement(0.0),
            ),
            (
                GameConfig {
                    burst_ms: -1.0,
                    ..GameConfig::default()
                },
                ConfigError::NonPositiveDuration {
                    name: "burst",
                    value: -1.0,
                },
            ),
        ];
        for (cfg, expected) in cases {
            assert_eq!(cfg.validate(), Err(expected));
        }
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = ConfigError::PoolTooLarge { size: 30, max: 26 };
        assert_eq!(
            err.to_string(),
            "balloon pool of 30 exceeds the 26 lettered balloon assets"
        );
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_overrides_only_given_fields() {
        let cfg = GameConfig::from_json(r#"{ "pool_size": 3, "pump": { "scale": 0.5 } }"#).unwrap();
        assert_eq!(cfg.pool_size, 3);
        assert_eq!(cfg.pump.scale, 0.5);
        assert_eq!(cfg.pump.handle, PumpLayout::default().handle);
        assert_eq!(cfg.max_scale, 0.2);
    }
}

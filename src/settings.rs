//! Game configuration
//!
//! Every tunable of a round. Defaults reproduce the classic 580x720 layout;
//! a JSON file may override any subset of fields.

use std::fs;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::Bounds;

/// Round configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub window_width: i32,
    pub window_height: i32,
    /// Left/right frame border thickness
    pub frame_width_offset: i32,
    /// Top frame border thickness
    pub frame_height_offset: i32,
    /// Inset of the brick grid from the window edge
    pub frame_brick_offset: i32,

    // === Bricks ===
    pub brick_rows: usize,
    pub brick_columns: usize,
    pub brick_width: i32,
    pub brick_height: i32,

    // === Ball and paddle ===
    pub initial_lives: i32,
    pub ball_size: i32,
    pub ball_speed: i32,
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_max_width: i32,
    pub paddle_speed: i32,

    // === Bonuses ===
    pub bonus_size: i32,
    /// Spawn chance in percent; values outside [0, 100] fall back to the default
    pub bonus_probability: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            frame_width_offset: FRAME_WIDTH_OFFSET,
            frame_height_offset: FRAME_HEIGHT_OFFSET,
            frame_brick_offset: FRAME_BRICK_OFFSET,

            brick_rows: BRICK_ROWS,
            brick_columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,

            initial_lives: INITIAL_LIVES,
            ball_size: BALL_SIZE,
            ball_speed: INITIAL_SPEED_BALL,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_max_width: PADDLE_MAX_WIDTH,
            paddle_speed: INITIAL_SPEED_PADDLE,

            bonus_size: BONUS_SIZE,
            bonus_probability: INITIAL_BONUS_PROBABILITY,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file (missing fields take defaults)
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config.sanitized())
    }

    /// Copy with every size, speed and life count raised to at least 1
    ///
    /// The paddle's width cap is raised to at least its starting width.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        for (name, value) in [
            ("window_width", &mut config.window_width),
            ("window_height", &mut config.window_height),
            ("brick_width", &mut config.brick_width),
            ("brick_height", &mut config.brick_height),
            ("initial_lives", &mut config.initial_lives),
            ("ball_size", &mut config.ball_size),
            ("ball_speed", &mut config.ball_speed),
            ("paddle_width", &mut config.paddle_width),
            ("paddle_height", &mut config.paddle_height),
            ("paddle_speed", &mut config.paddle_speed),
            ("bonus_size", &mut config.bonus_size),
        ] {
            if *value < 1 {
                log::warn!("Config {name} = {value} must be positive, using 1");
                *value = 1;
            }
        }
        if config.paddle_max_width < config.paddle_width {
            log::warn!(
                "Config paddle_max_width = {} is below paddle_width, using {}",
                config.paddle_max_width,
                config.paddle_width
            );
            config.paddle_max_width = config.paddle_width;
        }
        config
    }

    /// Walls the ball and paddle bounce against; the bottom edge is the drop line
    pub fn bounds(&self) -> Bounds {
        Bounds {
            left: self.frame_width_offset,
            top: self.frame_height_offset,
            right: self.window_width - self.frame_width_offset,
            bottom: self.window_height,
        }
    }

    /// Top-left corner of grid cell (0, 0)
    pub fn brick_origin(&self) -> IVec2 {
        IVec2::new(
            self.frame_brick_offset,
            self.frame_brick_offset - self.frame_width_offset + self.frame_height_offset,
        )
    }

    pub fn brick_size(&self) -> IVec2 {
        IVec2::new(self.brick_width, self.brick_height)
    }

    /// Paddle spawn position (horizontally centred)
    pub fn paddle_start(&self) -> IVec2 {
        IVec2::new(
            self.window_width / 2 - self.paddle_width / 2,
            self.window_height - PADDLE_BOTTOM_GAP,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = GameConfig::default();
        let bounds = config.bounds();
        assert_eq!(bounds.left, 16);
        assert_eq!(bounds.right, 564);
        assert_eq!(bounds.top, 3);
        assert_eq!(bounds.bottom, 720);
        assert_eq!(config.brick_origin(), IVec2::new(34, 21));
        assert_eq!(config.paddle_start(), IVec2::new(258, 661));
    }

    #[test]
    fn test_grid_fits_inside_frame() {
        let config = GameConfig::default();
        let right_edge =
            config.brick_origin().x + config.brick_width * config.brick_columns as i32;
        assert!(right_edge <= config.bounds().right);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "initial_lives": 5, "bonus_probability": 100 }"#).unwrap();
        assert_eq!(config.initial_lives, 5);
        assert_eq!(config.bonus_probability, 100);
        assert_eq!(config.ball_speed, INITIAL_SPEED_BALL);
        assert_eq!(config.brick_rows, BRICK_ROWS);
    }

    #[test]
    fn test_defaults_are_already_sane() {
        let config = GameConfig::default();
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn test_non_positive_values_raised() {
        let config: GameConfig = serde_json::from_str(
            r#"{ "paddle_width": 0, "ball_size": -4, "ball_speed": 0, "initial_lives": -1, "paddle_max_width": 10 }"#,
        )
        .unwrap();
        let config = config.sanitized();
        assert_eq!(config.paddle_width, 1);
        assert_eq!(config.ball_size, 1);
        assert_eq!(config.ball_speed, 1);
        assert_eq!(config.initial_lives, 1);
        assert_eq!(config.paddle_max_width, 10);
        assert_eq!(config.paddle_height, PADDLE_HEIGHT);

        let narrow = GameConfig {
            paddle_max_width: 32,
            ..GameConfig::default()
        };
        assert_eq!(narrow.sanitized().paddle_max_width, PADDLE_WIDTH);
    }

    #[test]
    fn test_load_sanitizes() {
        let path = std::env::temp_dir().join(format!(
            "void-breaker-{}-config.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "ball_speed": 0 }"#).unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.ball_speed, 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}

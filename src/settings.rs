//! Layout configuration
//!
//! The static table of window, brick grid, paddle and ball dimensions.
//! Defaults come from [`crate::consts`]; a JSON file can override any subset.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`Layout`]
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("could not access layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed layout JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid layout field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Layout configuration table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    // === Window ===
    pub window_width: f32,
    pub window_height: f32,

    // === Brick grid ===
    pub brick_rows: u32,
    pub brick_columns: u32,
    pub brick_width: f32,
    pub brick_height: f32,
    /// Horizontal inset applied to every column
    pub brick_offset: f32,
    /// Hits needed to break a brick
    pub brick_strength: u8,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub ball_speed: f32,

    /// Frames per second cap requested from the backend (0 = uncapped)
    pub frame_rate_limit: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,

            brick_rows: BRICK_ROWS,
            brick_columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            brick_offset: BRICK_OFFSET,
            brick_strength: BRICK_STRENGTH,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            ball_radius: BALL_RADIUS,
            ball_speed: BALL_SPEED,

            frame_rate_limit: FRAME_RATE_LIMIT,
        }
    }
}

impl Layout {
    /// Total number of bricks in a freshly reset board
    pub fn brick_count(&self) -> usize {
        self.brick_rows as usize * self.brick_columns as usize
    }

    /// Parse a layout from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let layout: Layout = serde_json::from_str(json)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load and validate a layout file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let layout = Self::from_json(&json)?;
        log::info!("Loaded layout from {}", path.as_ref().display());
        Ok(layout)
    }

    /// Write the layout as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Layout saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject tables the game loop cannot lay out
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("window_width", self.window_width),
            ("window_height", self.window_height),
            ("brick_width", self.brick_width),
            ("brick_height", self.brick_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("ball_speed", self.ball_speed),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        for (field, value) in [
            ("brick_offset", self.brick_offset),
            ("paddle_speed", self.paddle_speed),
        ] {
            if !value.is_finite() {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }
        if self.brick_strength == 0 {
            return Err(SettingsError::Invalid {
                field: "brick_strength",
                reason: "a brick needs at least one hit",
            });
        }
        if self.ball_radius * 2.0 >= self.window_width.min(self.window_height) {
            return Err(SettingsError::Invalid {
                field: "ball_radius",
                reason: "ball does not fit inside the window",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = Layout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.brick_count(), 40);
        assert_eq!(layout.brick_offset, layout.brick_width / 2.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let layout = Layout::from_json(r#"{ "brick_rows": 2, "brick_columns": 3 }"#).unwrap();
        assert_eq!(layout.brick_count(), 6);
        assert_eq!(layout.window_width, WINDOW_WIDTH);
        assert_eq!(layout.frame_rate_limit, FRAME_RATE_LIMIT);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let err = Layout::from_json(r#"{ "brick_width": -1.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "brick_width",
                ..
            }
        ));

        let err = Layout::from_json(r#"{ "brick_strength": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "brick_strength", .. }));

        let err = Layout::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("brickout-layout-{}.json", std::process::id()));
        let layout = Layout {
            brick_rows: 6,
            brick_strength: 3,
            ..Layout::default()
        };
        layout.save(&path).unwrap();
        let loaded = Layout::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, layout);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Layout::load("/nonexistent/brickout/layout.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}

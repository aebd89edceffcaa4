//! Simulation tuning
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::fs;
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors loading or saving tuning
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay constants the simulation reads each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Distance between the top and bottom walls
    pub field_height: f64,
    /// |x| beyond which the ball counts as a goal
    pub goal_line_x: f64,
    /// |x| of both paddles at rest
    pub paddle_x: f64,
    pub paddle_size: DVec3,
    /// Vertical paddle speed per tick while a direction is held
    pub paddle_speed: f64,
    /// Ball bounding box; x is the diameter
    pub ball_size: DVec3,
    /// Serve towards the right; a left serve mirrors x
    pub serve_velocity: DVec3,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_height: FIELD_HEIGHT,
            goal_line_x: GOAL_LINE_X,
            paddle_x: PADDLE_X,
            paddle_size: DVec3::from_array(PADDLE_SIZE),
            paddle_speed: PADDLE_SPEED,
            ball_size: DVec3::from_array(BALL_SIZE),
            serve_velocity: DVec3::from_array(SERVE_VELOCITY),
        }
    }
}

impl Tuning {
    /// Parse from JSON and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let tuning = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Reject values the collision code cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let finite = [
            self.field_height,
            self.goal_line_x,
            self.paddle_x,
            self.paddle_speed,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.paddle_size.is_finite()
            && self.ball_size.is_finite()
            && self.serve_velocity.is_finite();
        if !finite {
            return Err(SettingsError::Invalid("values must be finite".into()));
        }
        if self.field_height <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "field_height must be positive, got {}",
                self.field_height
            )));
        }
        if self.paddle_size.min_element() < 0.0 || self.ball_size.min_element() < 0.0 {
            return Err(SettingsError::Invalid("sizes must not be negative".into()));
        }
        if self.goal_line_x <= self.paddle_x {
            return Err(SettingsError::Invalid(format!(
                "goal line {} must lie behind the paddles at {}",
                self.goal_line_x, self.paddle_x
            )));
        }
        Ok(())
    }
}

//! Paddle Sync - authoritative two-player paddle game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state store, collisions, session)
//! - `net`: Full/delta state encoding and the receiver-side replica
//! - `settings`: Data-driven tuning loaded from JSON

pub mod net;
pub mod settings;
pub mod sim;

pub use net::{DecodeError, EncodeMode, GroupMask, Replica, encode};
pub use settings::{SettingsError, Tuning};
pub use sim::{Action, GameState, InputOracle, Model, PlayerId, World};

/// Game configuration constants
pub mod consts {
    /// Number of simulated entities (two paddles, one ball)
    pub const ENTITY_COUNT: usize = 3;
    /// Number of player seats
    pub const PLAYER_COUNT: usize = 2;

    /// Entity slots
    pub const LEFT_PADDLE: usize = 0;
    pub const RIGHT_PADDLE: usize = 1;
    pub const BALL: usize = 2;

    /// Field dimensions (top/bottom walls at ±FIELD_HEIGHT/2)
    pub const FIELD_HEIGHT: f64 = 120.0;
    /// Ball past ±GOAL_LINE_X is a goal
    pub const GOAL_LINE_X: f64 = 100.0;

    /// Paddle defaults
    pub const PADDLE_X: f64 = 75.0;
    pub const PADDLE_SIZE: [f64; 3] = [5.0, 20.0, 10.0];
    /// Vertical speed per tick while Up or Down is held
    pub const PADDLE_SPEED: f64 = 5.0;

    /// Ball defaults (only x is meaningful, used as diameter)
    pub const BALL_SIZE: [f64; 3] = [20.0, 20.0, 20.0];
    /// Serve velocity towards the right; mirrored in x when serving left
    pub const SERVE_VELOCITY: [f64; 3] = [2.0, 3.0, 0.0];
}

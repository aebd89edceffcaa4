//! Game state and core simulation types
//!
//! Entities live in fixed-shape parallel arrays indexed by slot (see
//! [`crate::consts`]). The [`World`] owns the live state plus the baseline
//! used for delta encoding.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Tuning;

/// External player identifier. Zero means "seat empty".
pub type PlayerId = u32;

/// Sentinel stored in an unoccupied player seat
pub const NO_PLAYER: PlayerId = 0;

/// Entity model kind, sent on the wire as its `u32` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u32)]
pub enum Model {
    /// Zero tag; only seen in a never-committed baseline or a fresh replica
    #[default]
    None = 0,
    Paddle = 1,
    Ball = 2,
}

impl Model {
    pub fn tag(self) -> u32 {
        self as u32
    }

    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            0 => Some(Model::None),
            1 => Some(Model::Paddle),
            2 => Some(Model::Ball),
            _ => None,
        }
    }
}

/// Player actions queried from the input oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
}

impl Action {
    pub const ALL: [Action; 2] = [Action::Up, Action::Down];
}

/// Complete replicated state (fixed shape, deterministic)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub pos: [DVec3; ENTITY_COUNT],
    pub vel: [DVec3; ENTITY_COUNT],
    /// Full bounding box extents; for the ball only `x` (diameter) is used
    pub size: [DVec3; ENTITY_COUNT],
    pub model: [Model; ENTITY_COUNT],
    /// Goals scored by each seat
    pub score: [u32; PLAYER_COUNT],
    pub players: [PlayerId; PLAYER_COUNT],
}

impl GameState {
    /// Initial layout: paddles at ±paddle_x, ball resting at the origin
    pub fn new(tuning: &Tuning) -> Self {
        let mut state = Self::default();

        state.model[LEFT_PADDLE] = Model::Paddle;
        state.pos[LEFT_PADDLE] = DVec3::new(-tuning.paddle_x, 0.0, 0.0);
        state.size[LEFT_PADDLE] = tuning.paddle_size;

        state.model[RIGHT_PADDLE] = Model::Paddle;
        state.pos[RIGHT_PADDLE] = DVec3::new(tuning.paddle_x, 0.0, 0.0);
        state.size[RIGHT_PADDLE] = tuning.paddle_size;

        state.model[BALL] = Model::Ball;
        state.size[BALL] = tuning.ball_size;

        state
    }

    /// Ball radius (half of size.x)
    #[inline]
    pub fn ball_radius(&self) -> f64 {
        self.size[BALL].x / 2.0
    }

    /// Both seats hold a real player
    pub fn both_seated(&self) -> bool {
        self.players.iter().all(|&id| id != NO_PLAYER)
    }

    /// Seat index held by `id`, if any
    pub fn seat_of(&self, id: PlayerId) -> Option<usize> {
        if id == NO_PLAYER {
            return None;
        }
        self.players.iter().position(|&p| p == id)
    }

    /// Overwrite every field with `other`'s, slot for slot, without reallocating
    pub fn copy_from(&mut self, other: &GameState) {
        self.pos.copy_from_slice(&other.pos);
        self.vel.copy_from_slice(&other.vel);
        self.size.copy_from_slice(&other.size);
        self.model.copy_from_slice(&other.model);
        self.score.copy_from_slice(&other.score);
        self.players.copy_from_slice(&other.players);
    }
}

/// Simulation context owned by the driver
///
/// Holds the live state, the last committed baseline and the tuning in
/// effect. A single driver advances it; nothing here is synchronized.
#[derive(Debug, Clone)]
pub struct World {
    pub state: GameState,
    baseline: GameState,
    pub tuning: Tuning,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

impl World {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            state: GameState::new(&tuning),
            // Zeroed until the first commit, so an early delta carries everything
            baseline: GameState::default(),
            tuning,
        }
    }

    /// Last committed baseline
    pub fn baseline(&self) -> &GameState {
        &self.baseline
    }

    /// Copy live state into the baseline.
    ///
    /// Call once per tick, after every encode for that tick and before the
    /// next [`tick`](super::tick::tick).
    pub fn commit_baseline(&mut self) {
        self.baseline.copy_from(&self.state);
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per `tick` call
//! - Input only through an `InputOracle`
//! - Stable iteration order (by slot index)
//! - No networking or platform dependencies

pub mod collision;
pub mod session;
pub mod state;
pub mod tick;

pub use collision::{Contact, ball_box_collision, reflect_velocity, resolve_contact, wall_collision};
pub use session::{SessionEvent, disconnect, login, start_game, stop_game};
pub use state::{Action, GameState, Model, NO_PLAYER, PlayerId, World};
pub use tick::{InputOracle, TickEvent, tick};

//! State replication over a byte stream
//!
//! A message is six groups in fixed order: models, positions, velocities,
//! sizes, scores, players. Each group is a one-byte slot mask followed by
//! the little-endian values of the masked slots in ascending slot order.
//! Full messages set every bit; deltas set only slots that differ from the
//! committed baseline.

mod codec;
mod error;
mod replica;
mod wire;

pub use codec::{EncodeMode, FULL_MESSAGE_LEN, GROUPS, encode, encode_states};
pub use error::DecodeError;
pub use replica::Replica;
pub use wire::{GroupMask, MAX_GROUP_SLOTS, WireValue};

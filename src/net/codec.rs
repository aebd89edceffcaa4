//! Full and delta state encoding

use std::io::{self, Write};

use glam::DVec3;

use super::wire::{GroupMask, MAX_GROUP_SLOTS, WireValue};
use crate::consts::*;
use crate::sim::{GameState, Model, World};

const _: () = assert!(ENTITY_COUNT <= MAX_GROUP_SLOTS && PLAYER_COUNT <= MAX_GROUP_SLOTS);

/// Group names in wire order
pub const GROUPS: [&str; 6] = ["model", "pos", "vel", "size", "score", "players"];

/// Size of a full message
pub const FULL_MESSAGE_LEN: usize = (1 + ENTITY_COUNT * Model::WIDTH)
    + 3 * (1 + ENTITY_COUNT * DVec3::WIDTH)
    + 2 * (1 + PLAYER_COUNT * u32::WIDTH);

/// How much of the state to send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// Every slot of every group, for joining or resyncing clients
    Full,
    /// Only slots that differ from the baseline
    Delta,
}

/// Encode the world's live state against its committed baseline.
///
/// Returns the number of bytes written. Sink errors pass through unchanged.
pub fn encode<W: Write>(sink: &mut W, world: &World, mode: EncodeMode) -> io::Result<usize> {
    encode_states(sink, &world.state, world.baseline(), mode)
}

/// Encode `live`, diffing against `baseline` in delta mode.
///
/// Vectors compare with exact float equality: any drift resends the slot.
pub fn encode_states<W: Write>(
    sink: &mut W,
    live: &GameState,
    baseline: &GameState,
    mode: EncodeMode,
) -> io::Result<usize> {
    let mut out = Vec::with_capacity(FULL_MESSAGE_LEN);

    encode_group(&mut out, mode, &live.model, &baseline.model);
    encode_group(&mut out, mode, &live.pos, &baseline.pos);
    encode_group(&mut out, mode, &live.vel, &baseline.vel);
    encode_group(&mut out, mode, &live.size, &baseline.size);
    encode_group(&mut out, mode, &live.score, &baseline.score);
    encode_group(&mut out, mode, &live.players, &baseline.players);

    sink.write_all(&out)?;
    Ok(out.len())
}

fn encode_group<T: WireValue>(out: &mut Vec<u8>, mode: EncodeMode, live: &[T], baseline: &[T]) {
    let mask_at = out.len();
    out.push(0);

    let mut mask = GroupMask::EMPTY;
    for (slot, (value, old)) in live.iter().zip(baseline).enumerate() {
        if mode == EncodeMode::Full || value != old {
            mask.set(slot);
            value.put(out);
        }
    }
    out[mask_at] = mask.bits();
}

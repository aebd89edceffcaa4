//! Receiver-side mirror of the replicated state

use super::codec::GROUPS;
use super::error::DecodeError;
use super::wire::{GroupMask, WireReader, WireValue};
use crate::sim::GameState;

/// Client copy of [`GameState`], kept current by applying encoded messages.
///
/// Full and delta messages decode the same way: each set mask bit overwrites
/// that slot. Apply a full message first; deltas assume the replica holds
/// the sender's baseline.
#[derive(Debug, Clone, Default)]
pub struct Replica {
    state: GameState,
    applied: u64,
}

impl Replica {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of messages applied successfully
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Apply one message. On error the replica is left untouched.
    ///
    /// Returns the mask of each group in wire order.
    pub fn apply(&mut self, bytes: &[u8]) -> Result<[GroupMask; 6], DecodeError> {
        let mut next = self.state.clone();
        let mut reader = WireReader::new(bytes);

        let masks = [
            decode_group(&mut reader, GROUPS[0], &mut next.model)?,
            decode_group(&mut reader, GROUPS[1], &mut next.pos)?,
            decode_group(&mut reader, GROUPS[2], &mut next.vel)?,
            decode_group(&mut reader, GROUPS[3], &mut next.size)?,
            decode_group(&mut reader, GROUPS[4], &mut next.score)?,
            decode_group(&mut reader, GROUPS[5], &mut next.players)?,
        ];

        let trailing = reader.remaining();
        if trailing > 0 {
            return Err(DecodeError::TrailingBytes(trailing));
        }

        self.state = next;
        self.applied += 1;
        Ok(masks)
    }
}

fn decode_group<T: WireValue>(
    reader: &mut WireReader<'_>,
    group: &'static str,
    slots: &mut [T],
) -> Result<GroupMask, DecodeError> {
    let mask = reader.read_mask(group)?;
    if !mask.fits(slots.len()) {
        return Err(DecodeError::MaskOutOfRange {
            group,
            mask: mask.bits(),
            len: slots.len(),
        });
    }

    for slot in mask.slots() {
        slots[slot] = T::get(reader.take(T::WIDTH, group)?)?;
    }
    Ok(mask)
}

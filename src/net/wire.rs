//! Fixed-width little-endian values and per-group slot masks

use glam::DVec3;

use super::error::DecodeError;
use crate::sim::Model;

/// Slots one mask byte can address. Groups larger than this need a wider
/// mask or splitting into several groups.
pub const MAX_GROUP_SLOTS: usize = 8;

/// One bit per slot; bit `i` set means slot `i`'s value follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupMask(u8);

impl GroupMask {
    pub const EMPTY: Self = Self(0);

    /// Mask with the first `len` slots set
    pub fn all(len: usize) -> Self {
        debug_assert!(len <= MAX_GROUP_SLOTS);
        if len >= MAX_GROUP_SLOTS {
            Self(u8::MAX)
        } else {
            Self((1u8 << len) - 1)
        }
    }

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn set(&mut self, slot: usize) {
        debug_assert!(slot < MAX_GROUP_SLOTS);
        self.0 |= 1 << slot;
    }

    pub fn contains(self, slot: usize) -> bool {
        slot < MAX_GROUP_SLOTS && self.0 & (1 << slot) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if no bit names a slot at or beyond `len`
    pub fn fits(self, len: usize) -> bool {
        self.0 & !Self::all(len).0 == 0
    }

    /// Set slots in ascending order
    pub fn slots(self) -> impl Iterator<Item = usize> {
        (0..MAX_GROUP_SLOTS).filter(move |&slot| self.contains(slot))
    }
}

/// A value with a fixed-width little-endian wire form
pub trait WireValue: Copy + PartialEq {
    /// Encoded size in bytes
    const WIDTH: usize;

    fn put(&self, out: &mut Vec<u8>);

    /// Decode from exactly `WIDTH` bytes
    fn get(bytes: &[u8]) -> Result<Self, DecodeError>;
}

impl WireValue for u32 {
    const WIDTH: usize = 4;

    fn put(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn get(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(raw))
    }
}

impl WireValue for Model {
    const WIDTH: usize = u32::WIDTH;

    fn put(&self, out: &mut Vec<u8>) {
        self.tag().put(out);
    }

    fn get(bytes: &[u8]) -> Result<Self, DecodeError> {
        let tag = u32::get(bytes)?;
        Model::from_tag(tag).ok_or(DecodeError::UnknownModel(tag))
    }
}

impl WireValue for DVec3 {
    const WIDTH: usize = 3 * 8;

    fn put(&self, out: &mut Vec<u8>) {
        for component in self.to_array() {
            out.extend_from_slice(&component.to_le_bytes());
        }
    }

    fn get(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut components = [0.0f64; 3];
        for (component, chunk) in components.iter_mut().zip(bytes.chunks_exact(8)) {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            *component = f64::from_le_bytes(raw);
        }
        Ok(DVec3::from_array(components))
    }
}

/// Cursor over an incoming message
#[derive(Debug)]
pub(crate) struct WireReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub(crate) fn take(&mut self, len: usize, group: &'static str) -> Result<&'a [u8], DecodeError> {
        let available = self.remaining();
        if len > available {
            return Err(DecodeError::Truncated {
                group,
                needed: len,
                available,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub(crate) fn read_mask(&mut self, group: &'static str) -> Result<GroupMask, DecodeError> {
        Ok(GroupMask::from_bits(self.take(1, group)?[0]))
    }
}

//! Error types for decoding state messages

use thiserror::Error;

/// Errors a [`Replica`](super::Replica) can hit while applying a message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Message ended inside a group
    #[error("{group} group truncated: needed {needed} bytes, {available} available")]
    Truncated {
        group: &'static str,
        needed: usize,
        available: usize,
    },

    /// Mask names a slot the group does not have
    #[error("{group} group mask {mask:#010b} exceeds its {len} slots")]
    MaskOutOfRange {
        group: &'static str,
        mask: u8,
        len: usize,
    },

    #[error("unknown model tag {0}")]
    UnknownModel(u32),

    #[error("{0} trailing bytes after the last group")]
    TrailingBytes(usize),
}

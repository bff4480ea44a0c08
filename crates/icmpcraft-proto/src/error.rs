use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Packet buffer allocation failed: {0}")]
    Alloc(#[from] TryReserveError),

    #[error("Payload of {len} bytes exceeds the {max} byte limit")]
    PayloadTooLong { len: usize, max: usize },

    #[error("IP options length {0} is not a multiple of 4 or exceeds 40 bytes")]
    InvalidIpOptions(usize),

    #[error("ICMP type {kind} does not carry a {shape} message")]
    MessageMismatch { kind: u8, shape: &'static str },

    #[error("Message body of {0} bytes is shorter than the 4 byte rest-of-header")]
    ShortMessage(usize),
}

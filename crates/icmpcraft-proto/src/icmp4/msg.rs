//! ICMPv4 message bodies.
//!
//! Every body starts with the 4 rest-of-header bytes, followed by the echoed
//! leading bytes of the packet that triggered the message. Feed a body to
//! [`Icmp4Builder::message`](super::Icmp4Builder::message) to wrap it.

use std::net::Ipv4Addr;

use crate::{alloc_packet, BuildError};

fn with_prefix(prefix: [u8; 4], original: &[u8]) -> Result<Vec<u8>, BuildError> {
    let mut body = alloc_packet(prefix.len() + original.len())?;
    body.extend_from_slice(&prefix);
    body.extend_from_slice(original);
    Ok(body)
}

/// Fragmentation-needed body: two zero bytes, next-hop `mtu`, then `original`.
pub fn build_needfrag_message(mtu: u16, original: &[u8]) -> Result<Vec<u8>, BuildError> {
    let [hi, lo] = mtu.to_be_bytes();
    with_prefix([0, 0, hi, lo], original)
}

/// Destination-unreachable body with an unused rest-of-header.
pub fn build_unreach_message(original: &[u8]) -> Result<Vec<u8>, BuildError> {
    with_prefix([0; 4], original)
}

pub fn build_time_exceeded_message(original: &[u8]) -> Result<Vec<u8>, BuildError> {
    with_prefix([0; 4], original)
}

/// Redirect body naming the `gateway` the sender should use instead.
pub fn build_redirect_message(gateway: Ipv4Addr, original: &[u8]) -> Result<Vec<u8>, BuildError> {
    with_prefix(gateway.octets(), original)
}

/// Parameter-problem body; `pointer` is the octet offset of the bad field.
pub fn build_paramprob_message(pointer: u8, original: &[u8]) -> Result<Vec<u8>, BuildError> {
    with_prefix([pointer, 0, 0, 0], original)
}

/// Timestamp request/reply body. Timestamps are milliseconds since midnight UT.
pub fn build_timestamp_message(
    id: u16,
    seq: u16,
    originate: u32,
    receive: u32,
    transmit: u32,
) -> Result<Vec<u8>, BuildError> {
    let mut body = alloc_packet(16)?;
    body.extend_from_slice(&id.to_be_bytes());
    body.extend_from_slice(&seq.to_be_bytes());
    for stamp in [originate, receive, transmit] {
        body.extend_from_slice(&stamp.to_be_bytes());
    }
    Ok(body)
}

pub mod checksum;
pub mod error;
pub mod ethernet;
pub mod ipv4;
pub mod ipv6;
pub mod icmp4;
pub mod icmp6;

pub use checksum::{checksum, pseudo_checksum6, ChecksumMode};
pub use error::BuildError;
pub use ethernet::{EthHeader, MacAddr};
pub use ipv4::Ipv4Header;
pub use ipv6::Ipv6Header;
pub use icmp4::{Icmp4Builder, Icmp4Header};
pub use icmp6::{Icmp6Builder, Icmp6Header, Icmp6Message, NdMessage};

/// A header that serializes itself in network byte order.
pub trait WireHeader {
    /// Number of bytes `write` appends.
    fn header_len(&self) -> usize;

    fn write(&self, out: &mut Vec<u8>);
}

/// Allocates an empty buffer able to hold exactly `len` bytes.
///
/// Allocation failure is surfaced as an error instead of aborting.
pub(crate) fn alloc_packet(len: usize) -> Result<Vec<u8>, BuildError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)?;
    Ok(buf)
}

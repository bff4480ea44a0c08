use std::net::Ipv4Addr;

use crate::{checksum, BuildError, WireHeader};

pub const IPV4_HEADER_LEN: usize = 20;
pub const IPV4_MAX_OPTIONS: usize = 40;

pub const IPPROTO_ICMP: u8 = 1;

pub const IP_DF: u16 = 0x4000;

/// IPv4 header with optional raw option bytes.
///
/// Fields are kept in host order and serialized big-endian by `write`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv4Header<'a> {
    pub tos: u8,
    pub total_len: u16,
    pub id: u16,
    pub frag_off: u16,
    pub ttl: u8,
    pub proto: u8,
    pub src: Ipv4Addr,
    pub dst: Ipv4Addr,
    pub options: &'a [u8],
}

impl<'a> Ipv4Header<'a> {
    /// Rejects option blocks that cannot be expressed through IHL.
    pub fn check_options(options: &[u8]) -> Result<(), BuildError> {
        if options.len() % 4 != 0 || options.len() > IPV4_MAX_OPTIONS {
            return Err(BuildError::InvalidIpOptions(options.len()));
        }
        Ok(())
    }

    pub fn ihl(&self) -> u8 {
        (self.header_len() / 4) as u8
    }

    pub fn dont_fragment(&self) -> bool {
        self.frag_off & IP_DF != 0
    }
}

impl WireHeader for Ipv4Header<'_> {
    fn header_len(&self) -> usize {
        IPV4_HEADER_LEN + self.options.len()
    }

    /// Writes the header, options included, with a valid header checksum.
    fn write(&self, out: &mut Vec<u8>) {
        let start = out.len();
        out.push((4 << 4) | self.ihl());
        out.push(self.tos);
        out.extend_from_slice(&self.total_len.to_be_bytes());
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.frag_off.to_be_bytes());
        out.push(self.ttl);
        out.push(self.proto);
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(&self.src.octets());
        out.extend_from_slice(&self.dst.octets());
        out.extend_from_slice(self.options);

        let sum = checksum(&out[start..]);
        out[start + 10..start + 12].copy_from_slice(&sum.to_be_bytes());
    }
}

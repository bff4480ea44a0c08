//! ICMP for IPv4 (RFC 792).

pub mod build;
pub mod msg;

pub use build::Icmp4Builder;
pub use msg::{
    build_needfrag_message, build_paramprob_message, build_redirect_message,
    build_time_exceeded_message, build_timestamp_message, build_unreach_message,
};

use crate::WireHeader;

pub const ICMP4_HEADER_LEN: usize = 8;
pub const ICMP4_PAYLOAD_MAXLEN: usize = 1500;

pub const ICMP4_ECHOREPLY: u8 = 0;
pub const ICMP4_DEST_UNREACH: u8 = 3;
pub const ICMP4_REDIRECT: u8 = 5;
pub const ICMP4_ECHO: u8 = 8;
pub const ICMP4_TIME_EXCEEDED: u8 = 11;
pub const ICMP4_PARAMETERPROB: u8 = 12;
pub const ICMP4_TIMESTAMP: u8 = 13;
pub const ICMP4_TIMESTAMPREPLY: u8 = 14;
pub const ICMP4_INFO_REQUEST: u8 = 15;
pub const ICMP4_INFO_REPLY: u8 = 16;
pub const ICMP4_EXT_ECHO: u8 = 42;
pub const ICMP4_EXT_ECHOREPLY: u8 = 43;

/// Codes for `ICMP4_DEST_UNREACH`.
pub mod unreach {
    pub const NET: u8 = 0;
    pub const HOST: u8 = 1;
    pub const PROTOCOL: u8 = 2;
    pub const PORT: u8 = 3;
    /// Fragmentation needed and DF set.
    pub const FRAG_NEEDED: u8 = 4;
    pub const SOURCE_ROUTE_FAILED: u8 = 5;
}

/// Codes for `ICMP4_REDIRECT`.
pub mod redirect {
    pub const NET: u8 = 0;
    pub const HOST: u8 = 1;
    pub const NET_TOS: u8 = 2;
    pub const HOST_TOS: u8 = 3;
}

/// Codes for `ICMP4_TIME_EXCEEDED`.
pub mod time_exceeded {
    pub const TTL: u8 = 0;
    pub const FRAGMENT_REASSEMBLY: u8 = 1;
}

/// Codes for `ICMP4_PARAMETERPROB`.
pub mod paramprob {
    pub const POINTER: u8 = 0;
}

/// Fixed 8-byte ICMPv4 header.
///
/// `id` and `seq` are the two rest-of-header words; error messages reuse them
/// for their type-specific fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icmp4Header {
    pub kind: u8,
    pub code: u8,
    pub check: u16,
    pub id: u16,
    pub seq: u16,
}

impl WireHeader for Icmp4Header {
    fn header_len(&self) -> usize {
        ICMP4_HEADER_LEN
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.push(self.kind);
        out.push(self.code);
        out.extend_from_slice(&self.check.to_be_bytes());
        out.extend_from_slice(&self.id.to_be_bytes());
        out.extend_from_slice(&self.seq.to_be_bytes());
    }
}

//! ICMP for IPv6 (RFC 4443) and the Neighbor Discovery messages of RFC 4861.

pub mod build;

pub use build::Icmp6Builder;

use std::net::Ipv6Addr;

use crate::{MacAddr, WireHeader};

pub const ICMP6_COMMON_HEADER_LEN: usize = 4;
pub const ICMP6_REDIRECT_LEN: usize = ICMP6_COMMON_HEADER_LEN + 36;
/// Capacity of the fixed-shape message following the common header.
pub const ICMP6_MAX_MESSAGE: usize = ICMP6_REDIRECT_LEN - ICMP6_COMMON_HEADER_LEN;

pub const ICMP6_UNREACH: u8 = 1;
pub const ICMP6_PACKET_TOO_BIG: u8 = 2;
pub const ICMP6_TIMEXCEED: u8 = 3;
pub const ICMP6_PARAMPROBLEM: u8 = 4;
pub const ICMP6_ECHO: u8 = 128;
pub const ICMP6_ECHOREPLY: u8 = 129;
pub const ND_ROUTER_SOLICIT: u8 = 133;
pub const ND_ROUTER_ADVERT: u8 = 134;
pub const ND_NEIGHBOR_SOLICIT: u8 = 135;
pub const ND_NEIGHBOR_ADVERT: u8 = 136;
pub const ND_REDIRECT: u8 = 137;

/// For types without codes.
pub const ICMP6_CODE_NONE: u8 = 0;

/// Codes for `ICMP6_UNREACH`.
pub mod unreach {
    pub const NOROUTE: u8 = 0;
    pub const PROHIB: u8 = 1;
    pub const SCOPE: u8 = 2;
    pub const ADDR: u8 = 3;
    pub const PORT: u8 = 4;
    pub const FILTER_PROHIB: u8 = 5;
    pub const REJECT_ROUTE: u8 = 6;
}

/// Codes for `ICMP6_TIMEXCEED`.
pub mod timexceed {
    pub const INTRANS: u8 = 0;
    pub const REASS: u8 = 1;
}

/// Codes for `ICMP6_PARAMPROBLEM`.
pub mod paramproblem {
    pub const FIELD: u8 = 0;
    pub const NEXTHEADER: u8 = 1;
    pub const OPTION: u8 = 2;
}

pub const ND_OPT_SOURCE_LINKADDR: u8 = 1;
pub const ND_OPT_TARGET_LINKADDR: u8 = 2;

pub const ND_NA_FLAG_ROUTER: u32 = 0x8000_0000;
pub const ND_NA_FLAG_SOLICITED: u32 = 0x4000_0000;
pub const ND_NA_FLAG_OVERRIDE: u32 = 0x2000_0000;

/// Neighbor solicitation/advertisement body with one link-layer address option.
pub const ND_MESSAGE_LEN: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icmp6Header {
    pub kind: u8,
    pub code: u8,
    pub check: u16,
}

impl WireHeader for Icmp6Header {
    fn header_len(&self) -> usize {
        ICMP6_COMMON_HEADER_LEN
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.push(self.kind);
        out.push(self.code);
        out.extend_from_slice(&self.check.to_be_bytes());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NdMessage {
    pub flags: u32,
    pub target: Ipv6Addr,
    pub option_type: u8,
    /// In units of 8 octets.
    pub option_len: u8,
    pub mac: MacAddr,
}

impl NdMessage {
    /// Solicitation body carrying our address as the source link-layer option.
    pub fn solicitation(target: Ipv6Addr, mac: MacAddr) -> Self {
        Self {
            flags: 0,
            target,
            option_type: ND_OPT_SOURCE_LINKADDR,
            option_len: 1,
            mac,
        }
    }

    /// Advertisement body carrying `mac` as the target link-layer option.
    pub fn advertisement(flags: u32, target: Ipv6Addr, mac: MacAddr) -> Self {
        Self {
            flags,
            target,
            option_type: ND_OPT_TARGET_LINKADDR,
            option_len: 1,
            mac,
        }
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.flags.to_be_bytes());
        out.extend_from_slice(&self.target.octets());
        out.push(self.option_type);
        out.push(self.option_len);
        out.extend_from_slice(&self.mac);
    }
}

/// Type-specific part of an ICMPv6 message.
///
/// The variant must agree with the header type; see [`Icmp6Message::accepts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icmp6Message<'a> {
    /// Echo request/reply with trailing data of any size.
    Echo { id: u16, seq: u16, data: &'a [u8] },
    /// Neighbor solicitation or advertisement.
    NeighborDiscovery(NdMessage),
    /// Error message: `param` is unused, the MTU or the pointer depending on
    /// the type, followed by as much of the invoking packet as fits.
    Error { param: u32, invoking: &'a [u8] },
}

impl Icmp6Message<'_> {
    pub fn shape(&self) -> &'static str {
        match self {
            Icmp6Message::Echo { .. } => "echo",
            Icmp6Message::NeighborDiscovery(_) => "neighbor-discovery",
            Icmp6Message::Error { .. } => "error",
        }
    }

    /// Whether this variant is the layout used by ICMPv6 type `kind`.
    pub fn accepts(&self, kind: u8) -> bool {
        match self {
            Icmp6Message::Echo { .. } => matches!(kind, ICMP6_ECHO | ICMP6_ECHOREPLY),
            Icmp6Message::NeighborDiscovery(_) => {
                matches!(kind, ND_NEIGHBOR_SOLICIT | ND_NEIGHBOR_ADVERT)
            }
            Icmp6Message::Error { .. } => (ICMP6_UNREACH..=ICMP6_PARAMPROBLEM).contains(&kind),
        }
    }

    pub fn body_len(&self) -> usize {
        match self {
            Icmp6Message::Echo { data, .. } => 4 + data.len(),
            Icmp6Message::NeighborDiscovery(_) => ND_MESSAGE_LEN,
            Icmp6Message::Error { invoking, .. } => 4 + invoking.len(),
        }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        match self {
            Icmp6Message::Echo { id, seq, data } => {
                out.extend_from_slice(&id.to_be_bytes());
                out.extend_from_slice(&seq.to_be_bytes());
                out.extend_from_slice(data);
            }
            Icmp6Message::NeighborDiscovery(nd) => nd.write(out),
            Icmp6Message::Error { param, invoking } => {
                out.extend_from_slice(&param.to_be_bytes());
                out.extend_from_slice(invoking);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nd_message_fits_fixed_capacity() {
        assert_eq!(ICMP6_MAX_MESSAGE, 36);
        assert!(ND_MESSAGE_LEN <= ICMP6_MAX_MESSAGE);
    }

    #[test]
    fn test_nd_advertisement_layout() {
        let target: Ipv6Addr = "fe80::2".parse().unwrap();
        let mac = [0x02, 0x00, 0x00, 0x00, 0x00, 0x02];
        let msg = Icmp6Message::NeighborDiscovery(NdMessage::advertisement(
            ND_NA_FLAG_SOLICITED | ND_NA_FLAG_OVERRIDE,
            target,
            mac,
        ));
        let mut data = Vec::new();
        msg.write(&mut data);

        assert_eq!(data.len(), msg.body_len());
        assert_eq!(&data[0..4], &[0x60, 0x00, 0x00, 0x00]);
        assert_eq!(data[4..20], target.octets());
        assert_eq!(&data[20..22], &[ND_OPT_TARGET_LINKADDR, 1]);
        assert_eq!(&data[22..28], &mac);
    }

    #[test]
    fn test_variant_matches_type() {
        let echo = Icmp6Message::Echo { id: 1, seq: 1, data: &[] };
        assert!(echo.accepts(ICMP6_ECHO));
        assert!(echo.accepts(ICMP6_ECHOREPLY));
        assert!(!echo.accepts(ND_NEIGHBOR_SOLICIT));

        let nd = Icmp6Message::NeighborDiscovery(NdMessage::solicitation(Ipv6Addr::LOCALHOST, [0; 6]));
        assert!(nd.accepts(ND_NEIGHBOR_SOLICIT));
        assert!(nd.accepts(ND_NEIGHBOR_ADVERT));
        assert!(!nd.accepts(ND_ROUTER_SOLICIT));
        assert!(!nd.accepts(ICMP6_ECHO));

        let err = Icmp6Message::Error { param: 1280, invoking: &[] };
        assert!(err.accepts(ICMP6_PACKET_TOO_BIG));
        assert!(err.accepts(ICMP6_PARAMPROBLEM));
        assert!(!err.accepts(ICMP6_ECHO));
        assert!(!err.accepts(0));
    }
}

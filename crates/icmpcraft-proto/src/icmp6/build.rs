use std::net::Ipv6Addr;

use super::{
    Icmp6Header, Icmp6Message, NdMessage, ICMP6_COMMON_HEADER_LEN, ICMP6_ECHO, ND_NEIGHBOR_ADVERT,
    ND_NEIGHBOR_SOLICIT,
};
use crate::ipv6::{Ipv6Header, IPPROTO_ICMPV6, IPV6_HEADER_LEN};
use crate::{alloc_packet, pseudo_checksum6, BuildError, ChecksumMode, MacAddr, WireHeader};

/// Hop limit required on every Neighbor Discovery packet.
const ND_HOP_LIMIT: u8 = 255;

/// Builds a complete IPv6 + ICMPv6 packet.
#[derive(Debug, Clone)]
pub struct Icmp6Builder<'a> {
    src: Ipv6Addr,
    dst: Ipv6Addr,
    traffic_class: u8,
    flow_label: u32,
    hop_limit: u8,
    kind: u8,
    code: u8,
    message: Icmp6Message<'a>,
    checksum: ChecksumMode,
}

impl<'a> Icmp6Builder<'a> {
    /// Echo request with identifier and sequence zero, hop limit 64.
    pub fn new(src: Ipv6Addr, dst: Ipv6Addr) -> Self {
        Self {
            src,
            dst,
            traffic_class: 0,
            flow_label: 0,
            hop_limit: 64,
            kind: ICMP6_ECHO,
            code: 0,
            message: Icmp6Message::Echo { id: 0, seq: 0, data: &[] },
            checksum: ChecksumMode::Valid,
        }
    }

    pub fn traffic_class(mut self, tc: u8) -> Self {
        self.traffic_class = tc;
        self
    }

    pub fn flow_label(mut self, label: u32) -> Self {
        self.flow_label = label;
        self
    }

    pub fn hop_limit(mut self, hop_limit: u8) -> Self {
        self.hop_limit = hop_limit;
        self
    }

    pub fn checksum(mut self, mode: ChecksumMode) -> Self {
        self.checksum = mode;
        self
    }

    pub fn echo(mut self, id: u16, seq: u16, data: &'a [u8]) -> Self {
        self.kind = ICMP6_ECHO;
        self.code = 0;
        self.message = Icmp6Message::Echo { id, seq, data };
        self
    }

    pub fn neighbor_solicitation(mut self, target: Ipv6Addr, mac: MacAddr) -> Self {
        self.kind = ND_NEIGHBOR_SOLICIT;
        self.code = 0;
        self.hop_limit = ND_HOP_LIMIT;
        self.message = Icmp6Message::NeighborDiscovery(NdMessage::solicitation(target, mac));
        self
    }

    pub fn neighbor_advertisement(mut self, flags: u32, target: Ipv6Addr, mac: MacAddr) -> Self {
        self.kind = ND_NEIGHBOR_ADVERT;
        self.code = 0;
        self.hop_limit = ND_HOP_LIMIT;
        self.message = Icmp6Message::NeighborDiscovery(NdMessage::advertisement(flags, target, mac));
        self
    }

    /// Sets type, code and message together, rejecting a message whose shape
    /// does not belong to `kind`.
    pub fn message(mut self, kind: u8, code: u8, message: Icmp6Message<'a>) -> Result<Self, BuildError> {
        if !message.accepts(kind) {
            return Err(BuildError::MessageMismatch {
                kind,
                shape: message.shape(),
            });
        }
        self.kind = kind;
        self.code = code;
        self.message = message;
        Ok(self)
    }

    pub fn destination(&self) -> Ipv6Addr {
        self.dst
    }

    /// Length of the ICMPv6 part (header and message).
    pub fn icmp_len(&self) -> usize {
        ICMP6_COMMON_HEADER_LEN + self.message.body_len()
    }

    /// Length of the packet `build` produces.
    pub fn packet_len(&self) -> usize {
        IPV6_HEADER_LEN + self.icmp_len()
    }

    pub fn build(&self) -> Result<Vec<u8>, BuildError> {
        let icmp_len = self.icmp_len();
        if icmp_len > u16::MAX as usize {
            return Err(BuildError::PayloadTooLong {
                len: icmp_len,
                max: u16::MAX as usize,
            });
        }

        let mut packet = alloc_packet(self.packet_len())?;

        let ip = Ipv6Header {
            traffic_class: self.traffic_class,
            flow_label: self.flow_label,
            payload_len: icmp_len as u16,
            next_header: IPPROTO_ICMPV6,
            hop_limit: self.hop_limit,
            src: self.src,
            dst: self.dst,
        };
        ip.write(&mut packet);

        let icmp = Icmp6Header {
            kind: self.kind,
            code: self.code,
            check: 0,
        };
        icmp.write(&mut packet);
        self.message.write(&mut packet);

        let sum = pseudo_checksum6(
            &self.src,
            &self.dst,
            icmp_len as u32,
            IPPROTO_ICMPV6,
            &packet[IPV6_HEADER_LEN..],
        );
        let sum = self.checksum.apply(sum);
        packet[IPV6_HEADER_LEN + 2..IPV6_HEADER_LEN + 4].copy_from_slice(&sum.to_be_bytes());

        Ok(packet)
    }
}

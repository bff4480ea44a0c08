use std::net::Ipv6Addr;

use crate::WireHeader;

pub const IPV6_HEADER_LEN: usize = 40;

pub const IPPROTO_ICMPV6: u8 = 58;

const FLOW_LABEL_MASK: u32 = 0x000F_FFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv6Header {
    pub traffic_class: u8,
    /// Only the low 20 bits are transmitted.
    pub flow_label: u32,
    pub payload_len: u16,
    pub next_header: u8,
    pub hop_limit: u8,
    pub src: Ipv6Addr,
    pub dst: Ipv6Addr,
}

impl Ipv6Header {
    fn first_word(&self) -> u32 {
        (6 << 28) | ((self.traffic_class as u32) << 20) | (self.flow_label & FLOW_LABEL_MASK)
    }
}

impl WireHeader for Ipv6Header {
    fn header_len(&self) -> usize {
        IPV6_HEADER_LEN
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.first_word().to_be_bytes());
        out.extend_from_slice(&self.payload_len.to_be_bytes());
        out.push(self.next_header);
        out.push(self.hop_limit);
        out.extend_from_slice(&self.src.octets());
        out.extend_from_slice(&self.dst.octets());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv6_serialization() {
        let hdr = Ipv6Header {
            traffic_class: 0xAB,
            flow_label: 0x12345,
            payload_len: 12,
            next_header: IPPROTO_ICMPV6,
            hop_limit: 255,
            src: "2001:db8::1".parse().unwrap(),
            dst: "2001:db8::2".parse().unwrap(),
        };
        let mut data = Vec::new();
        hdr.write(&mut data);

        assert_eq!(data.len(), IPV6_HEADER_LEN);
        assert_eq!(&data[0..4], &[0x6A, 0xB1, 0x23, 0x45]);
        assert_eq!(&data[4..6], &[0x00, 0x0C]);
        assert_eq!(data[6], 58);
        assert_eq!(data[7], 255);
        assert_eq!(data[8..24], hdr.src.octets());
        assert_eq!(data[24..40], hdr.dst.octets());
    }

    #[test]
    fn test_flow_label_is_truncated_to_20_bits() {
        let hdr = Ipv6Header {
            traffic_class: 0,
            flow_label: 0xFFFF_FFFF,
            payload_len: 0,
            next_header: IPPROTO_ICMPV6,
            hop_limit: 1,
            src: Ipv6Addr::LOCALHOST,
            dst: Ipv6Addr::LOCALHOST,
        };
        let mut data = Vec::new();
        hdr.write(&mut data);

        assert_eq!(&data[0..4], &[0x60, 0x0F, 0xFF, 0xFF]);
    }
}

use std::net::Ipv4Addr;

use super::{Icmp4Header, ICMP4_ECHO, ICMP4_HEADER_LEN, ICMP4_PAYLOAD_MAXLEN};
use crate::ipv4::{Ipv4Header, IPPROTO_ICMP, IPV4_HEADER_LEN, IP_DF};
use crate::{alloc_packet, checksum, BuildError, ChecksumMode, WireHeader};

/// Builds a complete IPv4 + ICMPv4 packet.
///
/// Defaults to an echo request with TTL 64, identifier and sequence zero and
/// no payload. Setters consume and return the builder, so a packet reads as
/// one chain:
///
/// ```
/// use icmpcraft_proto::Icmp4Builder;
/// use std::net::Ipv4Addr;
///
/// let packet = Icmp4Builder::new(Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2))
///     .echo(1234, 1)
///     .payload(b"ping")
///     .build()
///     .unwrap();
/// assert_eq!(packet.len(), 20 + 8 + 4);
/// ```
#[derive(Debug, Clone)]
pub struct Icmp4Builder<'a> {
    src: Ipv4Addr,
    dst: Ipv4Addr,
    ttl: u8,
    ip_id: u16,
    tos: u8,
    dont_fragment: bool,
    ip_options: &'a [u8],
    kind: u8,
    code: u8,
    id: u16,
    seq: u16,
    payload: &'a [u8],
    checksum: ChecksumMode,
}

impl<'a> Icmp4Builder<'a> {
    pub fn new(src: Ipv4Addr, dst: Ipv4Addr) -> Self {
        Self {
            src,
            dst,
            ttl: 64,
            ip_id: 0,
            tos: 0,
            dont_fragment: false,
            ip_options: &[],
            kind: ICMP4_ECHO,
            code: 0,
            id: 0,
            seq: 0,
            payload: &[],
            checksum: ChecksumMode::Valid,
        }
    }

    pub fn ttl(mut self, ttl: u8) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ip_id(mut self, ip_id: u16) -> Self {
        self.ip_id = ip_id;
        self
    }

    pub fn tos(mut self, tos: u8) -> Self {
        self.tos = tos;
        self
    }

    pub fn dont_fragment(mut self, df: bool) -> Self {
        self.dont_fragment = df;
        self
    }

    /// Raw IP option bytes, copied verbatim after the fixed header.
    pub fn ip_options(mut self, options: &'a [u8]) -> Self {
        self.ip_options = options;
        self
    }

    pub fn kind(mut self, kind: u8) -> Self {
        self.kind = kind;
        self
    }

    pub fn code(mut self, code: u8) -> Self {
        self.code = code;
        self
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn seq(mut self, seq: u16) -> Self {
        self.seq = seq;
        self
    }

    pub fn payload(mut self, payload: &'a [u8]) -> Self {
        self.payload = payload;
        self
    }

    pub fn checksum(mut self, mode: ChecksumMode) -> Self {
        self.checksum = mode;
        self
    }

    /// Echo request with the given identifier and sequence number.
    pub fn echo(self, id: u16, seq: u16) -> Self {
        self.kind(ICMP4_ECHO).code(0).id(id).seq(seq)
    }

    /// Uses a message body from [`super::msg`]: its first 4 bytes fill the
    /// rest-of-header words, the remainder becomes the payload.
    pub fn message(self, kind: u8, code: u8, body: &'a [u8]) -> Result<Self, BuildError> {
        let [a, b, c, d, tail @ ..] = body else {
            return Err(BuildError::ShortMessage(body.len()));
        };
        Ok(self
            .kind(kind)
            .code(code)
            .id(u16::from_be_bytes([*a, *b]))
            .seq(u16::from_be_bytes([*c, *d]))
            .payload(tail))
    }

    pub fn destination(&self) -> Ipv4Addr {
        self.dst
    }

    /// Length of the packet `build` produces.
    pub fn packet_len(&self) -> usize {
        IPV4_HEADER_LEN + self.ip_options.len() + ICMP4_HEADER_LEN + self.payload.len()
    }

    pub fn build(&self) -> Result<Vec<u8>, BuildError> {
        if self.payload.len() > ICMP4_PAYLOAD_MAXLEN {
            return Err(BuildError::PayloadTooLong {
                len: self.payload.len(),
                max: ICMP4_PAYLOAD_MAXLEN,
            });
        }
        Ipv4Header::check_options(self.ip_options)?;

        let total_len = self.packet_len();
        let mut packet = alloc_packet(total_len)?;

        let ip = Ipv4Header {
            tos: self.tos,
            total_len: total_len as u16,
            id: self.ip_id,
            frag_off: if self.dont_fragment { IP_DF } else { 0 },
            ttl: self.ttl,
            proto: IPPROTO_ICMP,
            src: self.src,
            dst: self.dst,
            options: self.ip_options,
        };
        ip.write(&mut packet);
        let icmp_start = packet.len();

        let icmp = Icmp4Header {
            kind: self.kind,
            code: self.code,
            check: 0,
            id: self.id,
            seq: self.seq,
        };
        icmp.write(&mut packet);
        packet.extend_from_slice(self.payload);

        let sum = self.checksum.apply(checksum(&packet[icmp_start..]));
        packet[icmp_start + 2..icmp_start + 4].copy_from_slice(&sum.to_be_bytes());

        Ok(packet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icmp4::{build_needfrag_message, unreach, ICMP4_DEST_UNREACH};

    const SRC: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);
    const DST: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 2);

    fn ping<'a>() -> Icmp4Builder<'a> {
        Icmp4Builder::new(SRC, DST).ttl(64).echo(1234, 1).payload(b"ping")
    }

    #[test]
    fn test_echo_request_layout() {
        let packet = ping().build().expect("Should build echo");

        assert_eq!(packet.len(), 32);
        assert_eq!(packet[0], 0x45);
        assert_eq!(&packet[2..4], &32u16.to_be_bytes());
        assert_eq!(packet[9], IPPROTO_ICMP);
        assert_eq!(&packet[10..12], &0xf6d9u16.to_be_bytes());

        let icmp = &packet[20..];
        assert_eq!(icmp[0], 8); // Echo Request
        assert_eq!(icmp[1], 0);
        assert_eq!(&icmp[2..4], &0x145cu16.to_be_bytes());
        assert_eq!(&icmp[4..6], &1234u16.to_be_bytes());
        assert_eq!(&icmp[6..8], &1u16.to_be_bytes());
        assert_eq!(&icmp[8..], b"ping");
    }

    #[test]
    fn test_checksum_round_trip() {
        let mut packet = ping().build().unwrap();
        let written = u16::from_be_bytes([packet[22], packet[23]]);

        packet[22..24].copy_from_slice(&[0, 0]);
        assert_eq!(checksum(&packet[20..]), written);
    }

    #[test]
    fn test_deterministic_output() {
        assert_eq!(ping().build().unwrap(), ping().build().unwrap());
    }

    #[test]
    fn test_length_invariant() {
        let opts = [0x01; 8];
        for len in [0usize, 1, 4, 63, 1500] {
            let data = vec![0x5A; len];
            let builder = Icmp4Builder::new(SRC, DST).ip_options(&opts).payload(&data);
            let packet = builder.build().unwrap();
            assert_eq!(packet.len(), 20 + opts.len() + 8 + len);
            assert_eq!(packet.len(), builder.packet_len());
        }
    }

    #[test]
    fn test_bad_checksum_only_touches_checksum_bytes() {
        let good = ping().build().unwrap();
        let bad = ping().checksum(ChecksumMode::Corrupt).build().unwrap();

        assert_eq!(good.len(), bad.len());
        let differing: Vec<usize> = (0..good.len()).filter(|&i| good[i] != bad[i]).collect();
        assert!(!differing.is_empty());
        assert!(differing.iter().all(|&i| i == 22 || i == 23));
        assert_ne!(checksum(&bad[20..]), 0);
        // IP header checksum stays valid
        assert_eq!(checksum(&bad[..20]), 0);
    }

    #[test]
    fn test_dont_fragment_and_tos() {
        let packet = ping().dont_fragment(true).tos(0x10).ip_id(0xBEEF).build().unwrap();

        assert_eq!(packet[1], 0x10);
        assert_eq!(&packet[4..6], &[0xBE, 0xEF]);
        assert_eq!(&packet[6..8], &[0x40, 0x00]);
        assert_eq!(checksum(&packet[..20]), 0);
    }

    #[test]
    fn test_ip_options_shift_icmp_header() {
        let opts = [0x01, 0x01, 0x01, 0x00];
        let packet = ping().ip_options(&opts).build().unwrap();

        assert_eq!(packet[0], 0x46);
        assert_eq!(&packet[20..24], &opts);
        assert_eq!(packet[24], 8);
        assert_eq!(checksum(&packet[..24]), 0);
        assert_eq!(checksum(&packet[24..]), 0);
    }

    #[test]
    fn test_needfrag_through_builder() {
        let original = [0x45, 0x00, 0x05, 0xDC, 0x00, 0x00, 0x40, 0x00];
        let body = build_needfrag_message(1400, &original).unwrap();
        let packet = Icmp4Builder::new(SRC, DST)
            .message(ICMP4_DEST_UNREACH, unreach::FRAG_NEEDED, &body)
            .expect("Should accept needfrag body")
            .build()
            .unwrap();

        assert_eq!(packet.len(), 20 + 8 + original.len());
        assert_eq!(packet[20], 3);
        assert_eq!(packet[21], 4);
        assert_eq!(&packet[24..28], &[0x00, 0x00, 0x05, 0x78]);
        assert_eq!(&packet[28..], &original);
        assert_eq!(checksum(&packet[20..]), 0);
    }

    #[test]
    fn test_short_message_rejected() {
        let result = Icmp4Builder::new(SRC, DST).message(ICMP4_DEST_UNREACH, 0, &[0, 0, 0]);
        assert!(matches!(result, Err(BuildError::ShortMessage(3))));
    }

    #[test]
    fn test_oversized_payload_rejected() {
        let data = vec![0u8; ICMP4_PAYLOAD_MAXLEN + 1];
        let result = Icmp4Builder::new(SRC, DST).payload(&data).build();
        assert!(matches!(result, Err(BuildError::PayloadTooLong { len: 1501, max: 1500 })));
    }

    #[test]
    fn test_misaligned_options_rejected() {
        let result = ping().ip_options(&[0x01, 0x01]).build();
        assert!(matches!(result, Err(BuildError::InvalidIpOptions(2))));
    }
}

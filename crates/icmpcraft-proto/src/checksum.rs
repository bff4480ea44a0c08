use std::net::Ipv6Addr;

/// How a builder fills the ICMP checksum field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChecksumMode {
    /// The correct Internet checksum.
    #[default]
    Valid,
    /// A value that never verifies. The rest of the packet is unchanged.
    Corrupt,
}

impl ChecksumMode {
    pub fn apply(self, sum: u16) -> u16 {
        match self {
            ChecksumMode::Valid => sum,
            // 0x0000 and 0xFFFF are the same value in one's complement,
            // so the increment must never land on the alias of `sum`.
            ChecksumMode::Corrupt => match sum.wrapping_add(1) {
                0 => 1,
                bad => bad,
            },
        }
    }
}

/// Running one's-complement sum of 16-bit big-endian words.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Accumulator {
    sum: u32,
}

impl Accumulator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `data`, zero-padding a trailing odd byte.
    ///
    /// Only the last slice fed to an accumulator may have odd length.
    pub(crate) fn add_bytes(&mut self, data: &[u8]) {
        let mut chunks = data.chunks_exact(2);
        for word in &mut chunks {
            self.sum += u16::from_be_bytes([word[0], word[1]]) as u32;
            self.fold_once();
        }
        if let [last] = chunks.remainder() {
            self.sum += (*last as u32) << 8;
        }
    }

    pub(crate) fn add_u32(&mut self, value: u32) {
        self.sum += value >> 16;
        self.fold_once();
        self.sum += value & 0xFFFF;
        self.fold_once();
    }

    fn fold_once(&mut self) {
        if self.sum > 0xFFFF {
            self.sum = (self.sum & 0xFFFF) + (self.sum >> 16);
        }
    }

    pub(crate) fn finish(mut self) -> u16 {
        while (self.sum >> 16) != 0 {
            self.sum = (self.sum & 0xFFFF) + (self.sum >> 16);
        }
        !self.sum as u16
    }
}

/// RFC 1071 Internet checksum of `data`.
///
/// An empty slice yields `0xFFFF`.
pub fn checksum(data: &[u8]) -> u16 {
    let mut acc = Accumulator::new();
    acc.add_bytes(data);
    acc.finish()
}

/// Checksum of `payload` prefixed by the IPv6 pseudo-header (RFC 8200 §8.1).
pub fn pseudo_checksum6(
    src: &Ipv6Addr,
    dst: &Ipv6Addr,
    upper_len: u32,
    next_header: u8,
    payload: &[u8],
) -> u16 {
    let mut acc = Accumulator::new();
    acc.add_bytes(&src.octets());
    acc.add_bytes(&dst.octets());
    acc.add_u32(upper_len);
    // 24 zero bits, then the next header value
    acc.add_u32(next_header as u32);
    acc.add_bytes(payload);
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc1071_example() {
        let data = [0x00, 0x01, 0xf2, 0x03, 0xf4, 0xf5, 0xf6, 0xf7];
        assert_eq!(checksum(&data), 0x220d);
    }

    #[test]
    fn test_odd_length_is_zero_padded() {
        assert_eq!(checksum(&[1, 2, 3]), 0xfbfd);
        assert_eq!(checksum(&[1, 2, 3]), checksum(&[1, 2, 3, 0]));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(checksum(&[]), 0xFFFF);
    }

    #[test]
    fn test_self_verification() {
        let mut data = vec![0x45, 0x00, 0x00, 0x54, 0xbe, 0xef, 0x40, 0x00, 0x40, 0x01];
        data.extend_from_slice(&[0x00, 0x00]); // checksum slot
        data.extend_from_slice(&[10, 0, 0, 1, 10, 0, 0, 2]);

        let sum = checksum(&data);
        data[10..12].copy_from_slice(&sum.to_be_bytes());

        // Summing the finished buffer gives 0xFFFF, whose complement is zero.
        assert_eq!(checksum(&data), 0);
    }

    #[test]
    fn test_carry_folding() {
        let data = [0xFF; 64];
        // Every word is 0xFFFF, which folds back to 0xFFFF.
        assert_eq!(checksum(&data), 0x0000);
    }

    #[test]
    fn test_pseudo_checksum6_known_value() {
        let src: Ipv6Addr = "2001:db8::1".parse().unwrap();
        let dst: Ipv6Addr = "2001:db8::2".parse().unwrap();
        // Echo request, id 0x1234, seq 1, "ping"
        let icmp = [128, 0, 0, 0, 0x12, 0x34, 0x00, 0x01, b'p', b'i', b'n', b'g'];

        assert_eq!(pseudo_checksum6(&src, &dst, icmp.len() as u32, 58, &icmp), 0x333e);
    }

    #[test]
    fn test_pseudo_checksum6_matches_flat_layout() {
        let src: Ipv6Addr = "fe80::1".parse().unwrap();
        let dst: Ipv6Addr = "ff02::1:ff00:2".parse().unwrap();
        let payload = [135, 0, 0, 0, 1, 2, 3, 4, 5];

        let mut flat = Vec::new();
        flat.extend_from_slice(&src.octets());
        flat.extend_from_slice(&dst.octets());
        flat.extend_from_slice(&(payload.len() as u32).to_be_bytes());
        flat.extend_from_slice(&[0, 0, 0, 58]);
        flat.extend_from_slice(&payload);

        assert_eq!(
            pseudo_checksum6(&src, &dst, payload.len() as u32, 58, &payload),
            checksum(&flat)
        );
    }

    #[test]
    fn test_corrupt_never_verifies() {
        for sum in [0x0000, 0x0001, 0x145c, 0xfffe, 0xffff] {
            let bad = ChecksumMode::Corrupt.apply(sum);
            assert_ne!(bad, sum);
            // the one's-complement alias of zero is also rejected
            if sum == 0 || sum == 0xFFFF {
                assert!(bad != 0 && bad != 0xFFFF);
            }
        }
        assert_eq!(ChecksumMode::Valid.apply(0x145c), 0x145c);
    }
}

use crate::{alloc_packet, BuildError, WireHeader};

/// 48-bit link-layer address.
pub type MacAddr = [u8; 6];

pub const ETH_HLEN: usize = 14;

pub const ETH_P_IP: u16 = 0x0800;
pub const ETH_P_IPV6: u16 = 0x86DD;
pub const ETH_P_ARP: u16 = 0x0806;

pub const BROADCAST_MAC: MacAddr = [0xFF; 6];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthHeader {
    pub dst: MacAddr,
    pub src: MacAddr,
    pub eth_type: u16,
}

impl EthHeader {
    pub fn new(src: MacAddr, dst: MacAddr, eth_type: u16) -> Self {
        Self { dst, src, eth_type }
    }

    /// EtherType matching the version nibble of an IP packet, if any.
    pub fn ethertype_for(packet: &[u8]) -> Option<u16> {
        match packet.first()? >> 4 {
            4 => Some(ETH_P_IP),
            6 => Some(ETH_P_IPV6),
            _ => None,
        }
    }

    /// Copy of this header carrying `packet`'s EtherType.
    ///
    /// Leaves the type untouched when `packet` is not IP.
    pub fn for_packet(&self, packet: &[u8]) -> Self {
        let eth_type = Self::ethertype_for(packet).unwrap_or(self.eth_type);
        Self { eth_type, ..*self }
    }
}

impl WireHeader for EthHeader {
    fn header_len(&self) -> usize {
        ETH_HLEN
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.dst);
        out.extend_from_slice(&self.src);
        out.extend_from_slice(&self.eth_type.to_be_bytes());
    }
}

/// Prepends `header` to `payload` in a freshly allocated frame.
pub fn build_frame(header: &EthHeader, payload: &[u8]) -> Result<Vec<u8>, BuildError> {
    let mut frame = alloc_packet(ETH_HLEN + payload.len())?;
    header.write(&mut frame);
    frame.extend_from_slice(payload);
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eth_frame_layout() {
        let header = EthHeader::new(
            [0x11, 0x12, 0x13, 0x14, 0x15, 0x16],
            [0x01, 0x02, 0x03, 0x04, 0x05, 0x06],
            ETH_P_IP,
        );
        let frame = build_frame(&header, &[0xAA, 0xBB, 0xCC, 0xDD]).expect("Should build frame");

        assert_eq!(frame.len(), 18);
        assert_eq!(&frame[0..6], &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]); // dst
        assert_eq!(&frame[6..12], &[0x11, 0x12, 0x13, 0x14, 0x15, 0x16]); // src
        assert_eq!(&frame[12..14], &[0x08, 0x00]);
        assert_eq!(&frame[14..], &[0xAA, 0xBB, 0xCC, 0xDD]);
    }

    #[test]
    fn test_ethertype_follows_ip_version() {
        let header = EthHeader::new([0; 6], BROADCAST_MAC, ETH_P_ARP);

        assert_eq!(header.for_packet(&[0x45, 0x00]).eth_type, ETH_P_IP);
        assert_eq!(header.for_packet(&[0x60, 0x00]).eth_type, ETH_P_IPV6);
        assert_eq!(header.for_packet(&[0x10]).eth_type, ETH_P_ARP);
        assert_eq!(header.for_packet(&[]).eth_type, ETH_P_ARP);
    }
}

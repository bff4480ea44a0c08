//! Build-and-send entry points.

use std::net::IpAddr;

use icmpcraft_proto::{Icmp4Builder, Icmp6Builder};
use tracing::{debug, warn};

use crate::config::MtuGate;
use crate::error::CraftError;
use crate::link::LinkSender;

/// Builds `packet` and transmits it on `link` in a single send.
///
/// Fails with [`CraftError::ExceedsMtu`] without sending anything when the
/// packet is larger than the MTU selected by `mtu`. Link errors are returned
/// unchanged; there is no retry.
pub fn send_icmp4_packet<L: LinkSender>(
    link: &mut L,
    packet: &Icmp4Builder<'_>,
    mtu: MtuGate,
) -> Result<usize, CraftError> {
    let bytes = packet.build()?;
    transmit(link, &bytes, IpAddr::V4(packet.destination()), mtu)
}

/// IPv6 counterpart of [`send_icmp4_packet`].
pub fn send_icmp6_packet<L: LinkSender>(
    link: &mut L,
    packet: &Icmp6Builder<'_>,
    mtu: MtuGate,
) -> Result<usize, CraftError> {
    let bytes = packet.build()?;
    transmit(link, &bytes, IpAddr::V6(packet.destination()), mtu)
}

fn transmit<L: LinkSender>(link: &mut L, bytes: &[u8], dst: IpAddr, mtu: MtuGate) -> Result<usize, CraftError> {
    if let Some(limit) = mtu.resolve(link.mtu()) {
        if bytes.len() > limit {
            warn!(%dst, len = bytes.len(), mtu = limit, "packet exceeds MTU, not sent");
            return Err(CraftError::ExceedsMtu {
                len: bytes.len(),
                mtu: limit,
            });
        }
    }

    let sent = link.send_packet(bytes, dst)?;
    debug!(%dst, len = sent, "packet sent");
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::CaptureHandle;
    use std::net::Ipv4Addr;

    #[test]
    fn test_gate_applies_to_whole_packet() {
        let handle = CaptureHandle::new();
        let mut link = handle.link();
        let data = [0u8; 4];
        let packet = Icmp4Builder::new(Ipv4Addr::LOCALHOST, Ipv4Addr::LOCALHOST).payload(&data);

        // 20 + 8 + 4 = 32 bytes
        assert!(send_icmp4_packet(&mut link, &packet, MtuGate::Limit(32)).is_ok());
        let err = send_icmp4_packet(&mut link, &packet, MtuGate::Limit(31)).unwrap_err();
        assert!(matches!(err, CraftError::ExceedsMtu { len: 32, mtu: 31 }));
        assert_eq!(handle.len(), 1);
    }
}

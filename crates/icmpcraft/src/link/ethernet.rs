use std::net::IpAddr;
use std::os::fd::{AsFd, OwnedFd};

use icmpcraft_core::sys::socket::{open_packet_socket, send_frame};
use icmpcraft_proto::ethernet::{build_frame, EthHeader, ETH_HLEN, ETH_P_IP};
use icmpcraft_proto::MacAddr;
use tracing::debug;

use super::{expect_full, LinkSender};
use crate::error::CraftError;

/// Sends packets as Ethernet frames on one interface through an `AF_PACKET`
/// socket. Requires CAP_NET_RAW.
///
/// Every packet gets the same source and destination hardware addresses; the
/// EtherType follows the packet's IP version.
#[derive(Debug)]
pub struct EthernetSender {
    socket: OwnedFd,
    header: EthHeader,
    mtu: Option<usize>,
}

impl EthernetSender {
    pub fn open(ifindex: u32, src_mac: MacAddr, dst_mac: MacAddr) -> Result<Self, CraftError> {
        let fd = open_packet_socket(ifindex).map_err(CraftError::from_os)?;
        debug!(ifindex, "packet socket opened");
        Ok(Self {
            socket: fd,
            header: EthHeader::new(src_mac, dst_mac, ETH_P_IP),
            mtu: None,
        })
    }

    pub fn with_mtu(mut self, mtu: usize) -> Self {
        self.mtu = Some(mtu);
        self
    }

    pub fn header(&self) -> &EthHeader {
        &self.header
    }
}

impl LinkSender for EthernetSender {
    fn send_packet(&mut self, packet: &[u8], _dst: IpAddr) -> Result<usize, CraftError> {
        let frame = build_frame(&self.header.for_packet(packet), packet)?;
        let written = send_frame(self.socket.as_fd(), &frame).map_err(CraftError::from_os)?;
        expect_full(written, frame.len())?;
        Ok(written - ETH_HLEN)
    }

    fn mtu(&self) -> Option<usize> {
        self.mtu
    }
}

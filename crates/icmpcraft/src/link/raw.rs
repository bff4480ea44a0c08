use std::net::IpAddr;
use std::os::fd::{AsFd, OwnedFd};

use icmpcraft_core::sys::socket::{open_raw_ipv4, open_raw_ipv6, send_to_v4, send_to_v6};
use tracing::debug;

use super::{expect_full, LinkSender};
use crate::error::CraftError;

/// Raw IP sender for Linux.
///
/// The kernel routes and frames each packet; the IP header in the buffer is
/// used as is (`IP_HDRINCL` for IPv4, implied by `IPPROTO_RAW` for IPv6).
/// One socket per address family, opened on first use. Requires CAP_NET_RAW.
#[derive(Debug, Default)]
pub struct RawIpSender {
    v4: Option<OwnedFd>,
    v6: Option<OwnedFd>,
    mtu: Option<usize>,
}

impl RawIpSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens both sockets now instead of on first send.
    pub fn open() -> Result<Self, CraftError> {
        let mut sender = Self::new();
        sender.socket_for(true)?;
        sender.socket_for(false)?;
        Ok(sender)
    }

    pub fn with_mtu(mut self, mtu: usize) -> Self {
        self.mtu = Some(mtu);
        self
    }

    fn socket_for(&mut self, ipv4: bool) -> Result<&OwnedFd, CraftError> {
        let slot = if ipv4 { &mut self.v4 } else { &mut self.v6 };
        if slot.is_none() {
            let fd = if ipv4 { open_raw_ipv4() } else { open_raw_ipv6() }.map_err(CraftError::from_os)?;
            debug!(family = if ipv4 { "ipv4" } else { "ipv6" }, "raw socket opened");
            *slot = Some(fd);
        }
        slot.as_ref()
            .ok_or_else(|| CraftError::InvalidConfiguration("raw socket unavailable".into()))
    }
}

impl LinkSender for RawIpSender {
    fn send_packet(&mut self, packet: &[u8], dst: IpAddr) -> Result<usize, CraftError> {
        let written = match dst {
            IpAddr::V4(v4) => send_to_v4(self.socket_for(true)?.as_fd(), packet, v4),
            IpAddr::V6(v6) => send_to_v6(self.socket_for(false)?.as_fd(), packet, v6),
        }
        .map_err(CraftError::from_os)?;

        expect_full(written, packet.len())
    }

    fn mtu(&self) -> Option<usize> {
        self.mtu
    }
}

//! Link-layer transmitters.
//!
//! A [`LinkSender`] takes a finished IP packet and puts it on the wire (or
//! wherever the implementation sends it). Senders are single-owner; give each
//! thread its own.

pub mod capture;
#[cfg(target_os = "linux")]
pub mod ethernet;
#[cfg(target_os = "linux")]
pub mod raw;

pub use capture::{CaptureHandle, CaptureLink, CapturedPacket};
#[cfg(target_os = "linux")]
pub use ethernet::EthernetSender;
#[cfg(target_os = "linux")]
pub use raw::RawIpSender;

use std::net::IpAddr;

use crate::error::CraftError;

pub trait LinkSender {
    /// Transmits one complete IP packet addressed to `dst`.
    ///
    /// Returns the number of IP bytes sent, which is always `packet.len()` on
    /// success; partial transmissions surface as [`CraftError::ShortWrite`].
    fn send_packet(&mut self, packet: &[u8], dst: IpAddr) -> Result<usize, CraftError>;

    /// MTU of the underlying link, if known.
    fn mtu(&self) -> Option<usize>;
}

impl<T: LinkSender + ?Sized> LinkSender for &mut T {
    fn send_packet(&mut self, packet: &[u8], dst: IpAddr) -> Result<usize, CraftError> {
        (**self).send_packet(packet, dst)
    }

    fn mtu(&self) -> Option<usize> {
        (**self).mtu()
    }
}

impl<T: LinkSender + ?Sized> LinkSender for Box<T> {
    fn send_packet(&mut self, packet: &[u8], dst: IpAddr) -> Result<usize, CraftError> {
        (**self).send_packet(packet, dst)
    }

    fn mtu(&self) -> Option<usize> {
        (**self).mtu()
    }
}

/// Turns a byte count from the kernel into a full-write check.
pub(crate) fn expect_full(written: usize, len: usize) -> Result<usize, CraftError> {
    if written < len {
        return Err(CraftError::ShortWrite { written, len });
    }
    Ok(written)
}

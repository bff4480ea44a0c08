use icmpcraft_core::sys::utils::{if_nametoindex, interface_mac, interface_mtu};
use icmpcraft_proto::ethernet::BROADCAST_MAC;
use icmpcraft_proto::MacAddr;
use tracing::debug;

use crate::config::Framing;
use crate::error::CraftError;
use crate::link::{EthernetSender, LinkSender, RawIpSender};

/// Resolves an interface and opens a sender on it.
///
/// ```no_run
/// use icmpcraft::builder::LinkBuilder;
/// use icmpcraft::config::Framing;
///
/// let link = LinkBuilder::new("eth0")
///     .framing(Framing::Ethernet)
///     .dst_mac([0x02, 0, 0, 0, 0, 0x01])
///     .build()?;
/// # Ok::<(), icmpcraft::error::CraftError>(())
/// ```
pub struct LinkBuilder {
    interface: String,
    framing: Framing,
    mtu: Option<usize>,
    src_mac: Option<MacAddr>,
    dst_mac: MacAddr,
}

impl LinkBuilder {
    pub fn new(interface: &str) -> Self {
        Self {
            interface: interface.to_string(),
            framing: Framing::RawIp,
            mtu: None,
            src_mac: None,
            dst_mac: BROADCAST_MAC,
        }
    }

    pub fn framing(mut self, framing: Framing) -> Self {
        self.framing = framing;
        self
    }

    /// Overrides the MTU read from the interface.
    pub fn mtu(mut self, mtu: usize) -> Self {
        self.mtu = Some(mtu);
        self
    }

    /// Overrides the interface's own hardware address as frame source.
    pub fn src_mac(mut self, mac: MacAddr) -> Self {
        self.src_mac = Some(mac);
        self
    }

    /// Frame destination. Defaults to broadcast.
    pub fn dst_mac(mut self, mac: MacAddr) -> Self {
        self.dst_mac = mac;
        self
    }

    fn resolve_mtu(&self) -> Result<usize, CraftError> {
        let mtu = match self.mtu {
            Some(mtu) => mtu,
            None => interface_mtu(&self.interface)?,
        };
        if mtu == 0 {
            return Err(CraftError::InvalidConfiguration(format!(
                "MTU of {} is zero",
                self.interface
            )));
        }
        Ok(mtu)
    }

    /// Raw IP sender carrying the interface MTU. Routing stays with the kernel.
    pub fn build_raw(self) -> Result<RawIpSender, CraftError> {
        self.ifindex()?;
        let mtu = self.resolve_mtu()?;
        debug!(interface = %self.interface, mtu, "raw IP link configured");
        Ok(RawIpSender::new().with_mtu(mtu))
    }

    pub fn build_ethernet(self) -> Result<EthernetSender, CraftError> {
        let ifindex = self.ifindex()?;
        let mtu = self.resolve_mtu()?;
        let src_mac = match self.src_mac {
            Some(mac) => mac,
            None => interface_mac(&self.interface)?,
        };
        debug!(interface = %self.interface, ifindex, mtu, "ethernet link configured");
        Ok(EthernetSender::open(ifindex, src_mac, self.dst_mac)?.with_mtu(mtu))
    }

    /// Sender for the configured framing.
    pub fn build(self) -> Result<Box<dyn LinkSender + Send>, CraftError> {
        Ok(match self.framing {
            Framing::RawIp => Box::new(self.build_raw()?),
            Framing::Ethernet => Box::new(self.build_ethernet()?),
        })
    }

    fn ifindex(&self) -> Result<u32, CraftError> {
        if_nametoindex(&self.interface).map_err(|_| CraftError::InterfaceNotFound(self.interface.clone()))
    }
}

/// How the transmission functions apply the MTU.
///
/// The MTU is only ever a gate: a packet larger than the effective MTU is
/// refused, never fragmented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MtuGate {
    /// No limit.
    Unlimited,
    /// Fixed limit in bytes, measured on the IP packet.
    Limit(usize),
    /// Whatever the link reports; unlimited if it reports nothing.
    #[default]
    Link,
}

impl MtuGate {
    /// Effective limit given the link's own MTU.
    pub fn resolve(self, link_mtu: Option<usize>) -> Option<usize> {
        match self {
            MtuGate::Unlimited => None,
            MtuGate::Limit(mtu) => Some(mtu),
            MtuGate::Link => link_mtu,
        }
    }
}

/// Link-layer framing used by senders built with [`crate::builder::LinkBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Kernel routes and frames; the packet starts at the IP header.
    #[default]
    RawIp,
    /// Packet socket on one interface; an Ethernet header is prepended.
    Ethernet,
}

//! ICMPv4/ICMPv6 packet crafting and raw transmission.
//!
//! Packets are built by the builders of [`icmpcraft_proto`] (re-exported as
//! [`proto`]) and handed to a [`link::LinkSender`] by the functions in
//! [`transmit`].

pub use icmpcraft_proto as proto;

#[cfg(target_os = "linux")]
pub mod builder;
pub mod config;
pub mod error;
pub mod link;
pub mod transmit;

pub use config::{Framing, MtuGate};
pub use error::CraftError;
pub use link::LinkSender;
pub use transmit::{send_icmp4_packet, send_icmp6_packet};

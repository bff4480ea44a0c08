use std::io;
use thiserror::Error;

use icmpcraft_proto::BuildError;

#[derive(Error, Debug)]
pub enum CraftError {
    #[error("Interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("Permission denied (requires CAP_NET_RAW)")]
    PermissionDenied,

    #[error("Packet construction failed: {0}")]
    Build(#[from] BuildError),

    #[error("Packet of {len} bytes exceeds MTU {mtu}")]
    ExceedsMtu { len: usize, mtu: usize },

    #[error("Short write: {written} of {len} bytes sent")]
    ShortWrite { written: usize, len: usize },

    #[error("Link is down")]
    LinkDown,

    #[error("IO Error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl CraftError {
    /// Maps `EPERM`/`EACCES` to [`CraftError::PermissionDenied`].
    pub(crate) fn from_os(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => CraftError::PermissionDenied,
            _ => CraftError::Io(err),
        }
    }
}

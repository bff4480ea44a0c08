use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_queue::SegQueue;

use super::LinkSender;
use crate::error::CraftError;

/// A packet recorded by a [`CaptureLink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedPacket {
    pub dst: IpAddr,
    pub bytes: Vec<u8>,
}

/// State shared between every link and handle of one capture.
struct CaptureState {
    packets: SegQueue<CapturedPacket>,
    /// Number of upcoming sends that fail with `LinkDown`.
    failures: AtomicUsize,
}

/// In-memory link that records packets instead of transmitting them.
///
/// Links are created from a [`CaptureHandle`]; all links of a handle feed the
/// same lock-free queue, so one link per thread is the intended use.
pub struct CaptureLink {
    state: Arc<CaptureState>,
    mtu: Option<usize>,
}

impl CaptureLink {
    pub fn with_mtu(mut self, mtu: usize) -> Self {
        self.mtu = Some(mtu);
        self
    }
}

impl LinkSender for CaptureLink {
    fn send_packet(&mut self, packet: &[u8], dst: IpAddr) -> Result<usize, CraftError> {
        let injected = self
            .state
            .failures
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(CraftError::LinkDown);
        }

        self.state.packets.push(CapturedPacket {
            dst,
            bytes: packet.to_vec(),
        });
        Ok(packet.len())
    }

    fn mtu(&self) -> Option<usize> {
        self.mtu
    }
}

/// Reader side of a capture.
#[derive(Clone)]
pub struct CaptureHandle {
    state: Arc<CaptureState>,
}

impl Default for CaptureHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureHandle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(CaptureState {
                packets: SegQueue::new(),
                failures: AtomicUsize::new(0),
            }),
        }
    }

    /// A new link feeding this capture. The link reports no MTU.
    pub fn link(&self) -> CaptureLink {
        CaptureLink {
            state: Arc::clone(&self.state),
            mtu: None,
        }
    }

    /// Makes the next `count` sends on any link of this capture fail.
    pub fn fail_next(&self, count: usize) {
        self.state.failures.fetch_add(count, Ordering::AcqRel);
    }

    pub fn pop(&self) -> Option<CapturedPacket> {
        self.state.packets.pop()
    }

    /// Removes and returns everything captured so far, oldest first.
    pub fn drain(&self) -> Vec<CapturedPacket> {
        std::iter::from_fn(|| self.state.packets.pop()).collect()
    }

    pub fn len(&self) -> usize {
        self.state.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.packets.is_empty()
    }
}

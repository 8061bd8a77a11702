//! Transmit queue engine.
//!
//! A fixed-capacity byte FIFO plus a pump that drains bounded bursts into
//! the hardware transmit path. Producers and the pump both run on the
//! main-loop side (`&mut self` serializes them); the completion handler
//! only touches the busy flag in [`LinkIrq`], so the single point of
//! contention is the busy claim inside [`pump`](TxQueue::pump).

use heapless::Deque;

use ceres_hal::SerialPort;

use crate::irq::LinkIrq;

/// Largest burst handed to the hardware per pump call (DMA buffer size)
pub const TX_BURST_SIZE: usize = 64;

/// Byte FIFO feeding one transmit channel.
///
/// `N` is the queue capacity, fixed at construction. Frames go in whole or
/// not at all: a frame larger than the current free space is refused and
/// the queue is left untouched, so a partial command can never reach the
/// wire.
pub struct TxQueue<const N: usize> {
    fifo: Deque<u8, N>,
    burst: [u8; TX_BURST_SIZE],
    burst_len: usize,
}

impl<const N: usize> TxQueue<N> {
    pub const fn new() -> Self {
        Self {
            fifo: Deque::new(),
            burst: [0; TX_BURST_SIZE],
            burst_len: 0,
        }
    }

    /// Append a whole frame, or refuse it.
    ///
    /// Returns `false` without touching the queue when free space is
    /// insufficient. Overflow is recoverable; callers may retry on a later
    /// tick once the pump has drained room.
    pub fn enqueue(&mut self, frame: &[u8]) -> bool {
        if frame.len() > N - self.fifo.len() {
            return false;
        }
        for &byte in frame {
            // Cannot fail: free space was checked above and only the pump
            // removes bytes.
            let _ = self.fifo.push_back(byte);
        }
        true
    }

    /// Hand at most one burst to the hardware. Never blocks.
    ///
    /// No-op while a burst is in flight or nothing is queued. On hardware
    /// refusal the busy claim is rolled back and the same burst is retried
    /// by a later pump; the bytes are never dropped.
    pub fn pump<P: SerialPort>(&mut self, irq: &LinkIrq, port: &mut P) {
        if irq.tx_busy() {
            return;
        }

        if self.burst_len == 0 {
            if self.fifo.is_empty() {
                return;
            }
            while self.burst_len < TX_BURST_SIZE {
                match self.fifo.pop_front() {
                    Some(byte) => {
                        self.burst[self.burst_len] = byte;
                        self.burst_len += 1;
                    }
                    None => break,
                }
            }
        }

        // Claim the transmitter under a critical section (double check:
        // the completion handler may have run since the test above).
        if !irq.claim_tx() {
            return;
        }

        if port.start_transmit(&self.burst[..self.burst_len]).is_ok() {
            self.burst_len = 0;
        } else {
            irq.release_tx();
        }
    }

    /// True while transmission is not fully flushed: a burst is in flight,
    /// a refused burst awaits retry, or bytes remain queued.
    pub fn is_busy(&self, irq: &LinkIrq) -> bool {
        irq.tx_busy() || self.burst_len != 0 || !self.fifo.is_empty()
    }

    /// Bytes currently queued (excluding a pending burst).
    pub fn len(&self) -> usize {
        self.fifo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fifo.is_empty()
    }

    /// Drop everything, including a pending burst.
    pub fn clear(&mut self) {
        self.fifo.clear();
        self.burst_len = 0;
    }
}

impl<const N: usize> Default for TxQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockPort;

    #[test]
    fn enqueue_is_all_or_nothing() {
        let mut q: TxQueue<8> = TxQueue::new();
        assert!(q.enqueue(&[1, 2, 3, 4, 5]));
        assert_eq!(q.len(), 5);
        // 4 more bytes do not fit in the 3 remaining
        assert!(!q.enqueue(&[6, 7, 8, 9]));
        assert_eq!(q.len(), 5);
        assert!(q.enqueue(&[6, 7, 8]));
        assert_eq!(q.len(), 8);
    }

    #[test]
    fn pump_preserves_fifo_order_across_bursts() {
        let irq = LinkIrq::new();
        let mut port = MockPort::new();
        let mut q: TxQueue<256> = TxQueue::new();

        let frame_a = [0xAA; 100];
        let frame_b = [0xBB; 20];
        assert!(q.enqueue(&frame_a));
        assert!(q.enqueue(&frame_b));

        // First burst: 64 bytes of A
        q.pump(&irq, &mut port);
        assert_eq!(port.sent.len(), TX_BURST_SIZE);
        assert_eq!(port.bursts[0], TX_BURST_SIZE);

        // Busy until the completion notification
        q.pump(&irq, &mut port);
        assert_eq!(port.sent.len(), TX_BURST_SIZE);

        irq.tx_complete();
        q.pump(&irq, &mut port);
        irq.tx_complete();
        q.pump(&irq, &mut port);

        assert_eq!(port.sent.len(), 120);
        assert_eq!(&port.sent[..100], &frame_a[..]);
        assert_eq!(&port.sent[100..], &frame_b[..]);

        irq.tx_complete();
        assert!(!q.is_busy(&irq));
    }

    #[test]
    fn refused_burst_is_retried_unchanged() {
        let irq = LinkIrq::new();
        let mut port = MockPort::new();
        let mut q: TxQueue<32> = TxQueue::new();

        assert!(q.enqueue(&[1, 2, 3]));
        port.refuse_next = true;
        q.pump(&irq, &mut port);

        // Claim rolled back, nothing sent, bytes retained
        assert!(!irq.tx_busy());
        assert!(port.sent.is_empty());
        assert!(q.is_busy(&irq));

        q.pump(&irq, &mut port);
        assert_eq!(&port.sent[..], &[1, 2, 3]);
        assert!(irq.tx_busy());
    }

    #[test]
    fn busy_covers_flag_pending_burst_and_queue() {
        let irq = LinkIrq::new();
        let mut port = MockPort::new();
        let mut q: TxQueue<32> = TxQueue::new();

        assert!(!q.is_busy(&irq));
        assert!(q.enqueue(&[9]));
        assert!(q.is_busy(&irq));

        q.pump(&irq, &mut port);
        // Queue drained but burst in flight
        assert!(q.is_empty());
        assert!(q.is_busy(&irq));

        irq.tx_complete();
        assert!(!q.is_busy(&irq));
    }
}

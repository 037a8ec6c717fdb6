//! FIFO Tracker.

/// Read and write pointers of a circular buffer with `slots` entries.
///
/// Equal pointers mean either full or empty; the last operation that moved a pointer tells which.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tracker {
    slots: usize,
    wptr: usize,
    rptr: usize,
    last_enq: bool,
    last_deq: bool,
}

impl Tracker {
    /// Creates an empty tracker.
    ///
    /// # Panics
    ///
    /// Panics if `slots` is 0.
    pub fn new(slots: usize) -> Self {
        assert!(slots > 0, "FIFO tracker needs at least one slot");
        Self { slots, wptr: 0, rptr: 0, last_enq: false, last_deq: true }
    }

    /// Number of slots.
    pub fn slots(&self) -> usize { self.slots }

    /// Slot that the next enqueue writes.
    pub fn wptr(&self) -> usize { self.wptr }

    /// Slot that holds the oldest entry.
    pub fn rptr(&self) -> usize { self.rptr }

    /// All slots are occupied.
    pub fn full(&self) -> bool { self.wptr == self.rptr && self.last_enq }

    /// No slot is occupied.
    pub fn empty(&self) -> bool { self.wptr == self.rptr && self.last_deq }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        if self.full() {
            self.slots
        } else {
            (self.wptr + self.slots - self.rptr) % self.slots
        }
    }

    /// Moves the pointers after a clock edge. Callers must not enqueue when full nor dequeue when
    /// empty.
    pub fn advance(&mut self, enq: bool, deq: bool) {
        debug_assert!(!(enq && self.full()), "enqueue into a full FIFO");
        debug_assert!(!(deq && self.empty()), "dequeue from an empty FIFO");

        if enq {
            self.wptr = (self.wptr + 1) % self.slots;
        }
        if deq {
            self.rptr = (self.rptr + 1) % self.slots;
        }
        if enq || deq {
            self.last_enq = enq;
            self.last_deq = deq;
        }
    }
}

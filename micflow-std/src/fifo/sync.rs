//! Synchronous first-word-fall-through FIFO.

use micflow::*;

use super::tracker::Tracker;
use crate::*;

/// Synchronous FIFO with `depth` entries.
///
/// The oldest entry is presented on the egress in the same cycle it becomes readable. A write
/// is accepted only when the FIFO is not full at the start of the cycle, even if an entry is read
/// in that cycle.
#[derive(Debug)]
pub struct SyncFifo<V: Signal + Default> {
    module_name: String,
    mem: Vec<V>,
    tracker: Tracker,
}

impl<V: Signal + Default> SyncFifo<V> {
    /// Creates an empty FIFO.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is 0.
    pub fn new(module_name: &str, depth: usize) -> Self {
        Self { module_name: module_name.to_string(), mem: vec![V::default(); depth], tracker: Tracker::new(depth) }
    }

    /// Number of entries the FIFO can hold.
    pub fn depth(&self) -> usize { self.tracker.slots() }

    /// Number of entries held.
    pub fn level(&self) -> usize { self.tracker.len() }

    /// A write would be accepted.
    pub fn writable(&self) -> bool { !self.tracker.full() }

    /// An entry is available.
    pub fn readable(&self) -> bool { !self.tracker.empty() }
}

impl<V: Signal + Default> Module for SyncFifo<V> {
    type I = VrChannel<V>;
    type O = VrChannel<V>;

    fn name(&self) -> &str { &self.module_name }

    fn comb(&self, _: Valid<V>, _: Ready) -> (Valid<V>, Ready) {
        let egress_fwd = Valid::new(self.readable(), self.mem[self.tracker.rptr()].clone());
        (egress_fwd, Ready::new(self.writable()))
    }

    fn tick(&mut self, ingress_fwd: Valid<V>, egress_bwd: Ready) {
        let enq = ingress_fwd.valid && self.writable();
        let deq = egress_bwd.ready && self.readable();

        if enq {
            self.mem[self.tracker.wptr()] = ingress_fwd.inner;
        }
        self.tracker.advance(enq, deq);
    }

    fn reset(&mut self) {
        let depth = self.depth();
        self.mem = vec![V::default(); depth];
        self.tracker = Tracker::new(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_and_refuses_writes_when_full() {
        let mut fifo = SyncFifo::<u32>::new("fifo", 2);
        for word in 1..=3 {
            let (_, bwd) = fifo.comb(Valid::valid(word), Ready::new(false));
            assert_eq!(bwd.ready, word <= 2);
            fifo.tick(Valid::valid(word), Ready::new(false));
        }
        assert_eq!(fifo.level(), 2);

        // Reading and writing at once while full still refuses the write.
        fifo.tick(Valid::valid(4), Ready::new(true));
        assert_eq!(fifo.level(), 1);

        let (out, _) = fifo.comb(Valid::invalid(), Ready::new(true));
        assert_eq!(out.into_option(), Some(2));
        fifo.tick(Valid::invalid(), Ready::new(true));
        assert!(!fifo.readable());
    }
}

//! Synchronous FIFO with a registered output.

use micflow::*;

use super::SyncFifo;
use crate::*;

/// Synchronous FIFO followed by a one-entry output register.
///
/// The output register breaks the combinational path from the memory to the egress, at the cost of
/// one cycle of latency. The FIFO holds up to `depth + 1` entries, and its reported level counts
/// the output register. The egress carries the level alongside the data channel.
#[derive(Debug)]
pub struct SyncFifoBuffered<V: Signal + Default> {
    module_name: String,
    fifo: SyncFifo<V>,
    dout: V,
    readable: bool,
}

impl<V: Signal + Default> SyncFifoBuffered<V> {
    /// Creates an empty FIFO whose memory has `depth` entries.
    ///
    /// # Panics
    ///
    /// Panics if `depth` is 0.
    pub fn new(module_name: &str, depth: usize) -> Self {
        Self {
            module_name: module_name.to_string(),
            fifo: SyncFifo::new(module_name, depth),
            dout: V::default(),
            readable: false,
        }
    }

    /// Number of entries held, including the output register.
    pub fn level(&self) -> usize { self.fifo.level() + usize::from(self.readable) }

    /// Number of entries the FIFO can hold, including the output register.
    pub fn capacity(&self) -> usize { self.fifo.depth() + 1 }

    /// A write would be accepted.
    pub fn writable(&self) -> bool { self.fifo.writable() }

    /// Whether the memory moves an entry into the output register at this clock edge.
    fn refill(&self, egress_ready: bool) -> bool { self.fifo.readable() && (!self.readable || egress_ready) }
}

impl<V: Signal + Default> Module for SyncFifoBuffered<V> {
    type I = VrChannel<V>;
    type O = (VrChannel<V>, UniChannel<usize>);

    fn name(&self) -> &str { &self.module_name }

    fn comb(&self, _: Valid<V>, _: (Ready, ())) -> ((Valid<V>, usize), Ready) {
        let egress_fwd = Valid::new(self.readable, self.dout.clone());
        ((egress_fwd, self.level()), Ready::new(self.writable()))
    }

    fn tick(&mut self, ingress_fwd: Valid<V>, egress_bwd: (Ready, ())) {
        let (egress_bwd, ()) = egress_bwd;
        let refill = self.refill(egress_bwd.ready);

        if refill {
            let (head, _) = self.fifo.comb(ingress_fwd.clone(), Ready::new(true));
            self.dout = head.inner;
            self.readable = true;
        } else if egress_bwd.ready {
            self.readable = false;
        }
        self.fifo.tick(ingress_fwd, Ready::new(refill));
    }

    fn reset(&mut self) {
        self.fifo.reset();
        self.dout = V::default();
        self.readable = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(fifo: &mut SyncFifoBuffered<u32>, push: Option<u32>, ready: bool) -> Option<u32> {
        let ingress = push.map_or_else(Valid::invalid, Valid::valid);
        let ((out, _), _) = fifo.comb(ingress.clone(), (Ready::new(ready), ()));
        fifo.tick(ingress, (Ready::new(ready), ()));
        if ready {
            out.into_option()
        } else {
            None
        }
    }

    #[test]
    fn output_register_adds_one_cycle_of_latency() {
        let mut fifo = SyncFifoBuffered::<u32>::new("fifo", 4);
        assert_eq!(step(&mut fifo, Some(7), true), None);
        // In memory, not yet in the output register.
        assert_eq!(fifo.level(), 1);
        assert_eq!(step(&mut fifo, None, true), None);
        assert_eq!(step(&mut fifo, None, true), Some(7));
        assert_eq!(fifo.level(), 0);
    }

    #[test]
    fn holds_depth_plus_one_entries_and_drops_the_newest() {
        let mut fifo = SyncFifoBuffered::<u32>::new("fifo", 2);
        for word in 0..5 {
            step(&mut fifo, Some(word), false);
        }
        assert_eq!(fifo.level(), fifo.capacity());
        assert_eq!(fifo.capacity(), 3);

        let drained = (0..6).filter_map(|_| step(&mut fifo, None, true)).collect::<Vec<_>>();
        assert_eq!(drained, vec![0, 1, 2]);
    }
}

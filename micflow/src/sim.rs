//! Cycle-by-cycle simulation.

use crate::*;

/// Signals observed on a module's ports during one clock cycle.
#[derive(Debug)]
pub struct Cycle<I: Interface, O: Interface> {
    /// Cycle number, starting from 0 after reset.
    pub cycle: u64,
    /// Ingress forward signal.
    pub ingress_fwd: Fwd<I>,
    /// Ingress backward signal.
    pub ingress_bwd: Bwd<I>,
    /// Egress forward signal.
    pub egress_fwd: Fwd<O>,
    /// Egress backward signal.
    pub egress_bwd: Bwd<O>,
}

/// Simulator of a top-level module in a single clock domain.
///
/// Every call to [`Sim::step`] is one clock cycle: the combinational outputs are evaluated from
/// the given inputs and the current registers, then the clock edge is applied.
#[derive(Debug)]
pub struct Sim<M: Module> {
    module: M,
    cycle: u64,
}

impl<M: Module> Sim<M> {
    /// Creates a new simulator.
    pub fn new(module: M) -> Self { Self { module, cycle: 0 } }

    /// The simulated module.
    pub fn module(&self) -> &M { &self.module }

    /// Number of cycles simulated since reset.
    pub fn cycle(&self) -> u64 { self.cycle }

    /// Resets the module and the cycle count.
    pub fn reset(&mut self) {
        self.module.reset();
        self.cycle = 0;
    }

    /// Simulates one clock cycle, returning what was visible on the ports during it.
    pub fn step(&mut self, ingress_fwd: Fwd<M::I>, egress_bwd: Bwd<M::O>) -> Cycle<M::I, M::O> {
        let (egress_fwd, ingress_bwd) = self.module.comb(ingress_fwd.clone(), egress_bwd.clone());
        self.module.tick(ingress_fwd.clone(), egress_bwd.clone());

        let cycle = Cycle { cycle: self.cycle, ingress_fwd, ingress_bwd, egress_fwd, egress_bwd };
        self.cycle += 1;
        cycle
    }

    /// Simulates `cycles` clock cycles with inputs given by `stimulus` for each cycle number.
    pub fn run<F: FnMut(u64) -> (Fwd<M::I>, Bwd<M::O>)>(
        &mut self, cycles: u64, mut stimulus: F,
    ) -> Vec<Cycle<M::I, M::O>> {
        (0..cycles)
            .map(|_| {
                let (ingress_fwd, egress_bwd) = stimulus(self.cycle);
                self.step(ingress_fwd, egress_bwd)
            })
            .collect()
    }
}

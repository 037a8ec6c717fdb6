//! Module.

use std::fmt::Debug;

use crate::*;

/// Synchronous module.
///
/// Within one cycle, `comb` is a pure function of the current ingress forward signal, the current
/// egress backward signal and the module's registers. `tick` commits the registers at the clock
/// edge, using the same inputs that were given to `comb` in that cycle.
pub trait Module: Debug {
    /// Ingress interface.
    type I: Interface;

    /// Egress interface.
    type O: Interface;

    /// Module name.
    fn name(&self) -> &str;

    /// Computes the current-cycle egress forward and ingress backward signals.
    fn comb(&self, ingress_fwd: Fwd<Self::I>, egress_bwd: Bwd<Self::O>) -> (Fwd<Self::O>, Bwd<Self::I>);

    /// Applies a clock edge.
    fn tick(&mut self, ingress_fwd: Fwd<Self::I>, egress_bwd: Bwd<Self::O>);

    /// Returns registers to their initial values.
    fn reset(&mut self);

    /// Feeds the egress of `self` into the ingress of `next`.
    fn chain<M: Module<I = Self::O>>(self, name: &str, next: M) -> Chain<Self, M>
    where
        Self: Sized,
        Bwd<Self::O>: Default,
    {
        Chain::new(name, self, next)
    }
}

/// Two modules connected back to back.
///
/// # Note
///
/// The first module must be a helpful producer: its egress forward signal must not depend on its
/// egress backward signal within the same cycle. Otherwise the evaluation below would read a
/// placeholder backward signal.
#[derive(Debug)]
pub struct Chain<M1, M2> {
    module_name: String,
    first: M1,
    second: M2,
}

impl<M1: Module, M2: Module<I = M1::O>> Chain<M1, M2>
where Bwd<M1::O>: Default
{
    /// Creates a new chain.
    pub fn new(module_name: &str, first: M1, second: M2) -> Self {
        Self { module_name: module_name.to_string(), first, second }
    }

    /// The upstream module.
    pub fn first(&self) -> &M1 { &self.first }

    /// The downstream module.
    pub fn second(&self) -> &M2 { &self.second }

    /// Evaluates the wires of the current cycle.
    ///
    /// Returns the middle forward/backward signals, the egress forward and the ingress backward.
    fn wires(
        &self, ingress_fwd: Fwd<M1::I>, egress_bwd: Bwd<M2::O>,
    ) -> (Fwd<M1::O>, Bwd<M1::O>, Fwd<M2::O>, Bwd<M1::I>) {
        let (mid_fwd, _) = self.first.comb(ingress_fwd.clone(), Default::default());
        let (egress_fwd, mid_bwd) = self.second.comb(mid_fwd.clone(), egress_bwd);
        let (_, ingress_bwd) = self.first.comb(ingress_fwd, mid_bwd.clone());
        (mid_fwd, mid_bwd, egress_fwd, ingress_bwd)
    }
}

impl<M1: Module, M2: Module<I = M1::O>> Module for Chain<M1, M2>
where Bwd<M1::O>: Default
{
    type I = M1::I;
    type O = M2::O;

    fn name(&self) -> &str { &self.module_name }

    fn comb(&self, ingress_fwd: Fwd<Self::I>, egress_bwd: Bwd<Self::O>) -> (Fwd<Self::O>, Bwd<Self::I>) {
        let (_, _, egress_fwd, ingress_bwd) = self.wires(ingress_fwd, egress_bwd);
        (egress_fwd, ingress_bwd)
    }

    fn tick(&mut self, ingress_fwd: Fwd<Self::I>, egress_bwd: Bwd<Self::O>) {
        let (mid_fwd, mid_bwd, _, _) = self.wires(ingress_fwd.clone(), egress_bwd.clone());
        self.first.tick(ingress_fwd, mid_bwd);
        self.second.tick(mid_fwd, egress_bwd);
    }

    fn reset(&mut self) {
        self.first.reset();
        self.second.reset();
    }
}

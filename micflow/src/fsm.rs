//! Finite state machine (Mealy machine).

use std::fmt;
use std::marker::PhantomData;

use crate::*;

/// Finite state machine (Mealy machine).
///
/// The FSM is described by `f`, which computes (1) the current-cycle egress forward and ingress
/// backward signals and (2) the next-cycle state, from the current ingress forward signal, egress
/// backward signal and state.
pub struct Fsm<I: Interface, O: Interface, S: Signal, F: Fn(Fwd<I>, Bwd<O>, S) -> (Fwd<O>, Bwd<I>, S)> {
    /// Module name.
    module_name: String,
    /// FSM function.
    f: F,
    /// Initial value of registers in the FSM.
    init: S,
    /// Current value of registers in the FSM.
    state: S,
    _marker: PhantomData<(I, O)>,
}

impl<I: Interface, O: Interface, S: Signal, F: Fn(Fwd<I>, Bwd<O>, S) -> (Fwd<O>, Bwd<I>, S)> Fsm<I, O, S, F> {
    /// Creates a new FSM.
    pub fn new(module_name: &str, f: F, init: S) -> Self {
        Self { module_name: module_name.to_string(), f, state: init.clone(), init, _marker: PhantomData }
    }

    /// Current state.
    pub fn state(&self) -> &S { &self.state }
}

impl<I: Interface, O: Interface, S: Signal, F: Fn(Fwd<I>, Bwd<O>, S) -> (Fwd<O>, Bwd<I>, S)> fmt::Debug
    for Fsm<I, O, S, F>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm").field("module_name", &self.module_name).field("state", &self.state).finish()
    }
}

impl<I: Interface, O: Interface, S: Signal, F: Fn(Fwd<I>, Bwd<O>, S) -> (Fwd<O>, Bwd<I>, S)> Module
    for Fsm<I, O, S, F>
{
    type I = I;
    type O = O;

    fn name(&self) -> &str { &self.module_name }

    fn comb(&self, ingress_fwd: Fwd<I>, egress_bwd: Bwd<O>) -> (Fwd<O>, Bwd<I>) {
        let (egress_fwd, ingress_bwd, _) = (self.f)(ingress_fwd, egress_bwd, self.state.clone());
        (egress_fwd, ingress_bwd)
    }

    fn tick(&mut self, ingress_fwd: Fwd<I>, egress_bwd: Bwd<O>) {
        let (_, _, state) = (self.f)(ingress_fwd, egress_bwd, self.state.clone());
        self.state = state;
    }

    fn reset(&mut self) { self.state = self.init.clone(); }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Logic = fn(u8, (), u8) -> (u8, (), u8);
    type Accumulator = Fsm<UniChannel<u8>, UniChannel<u8>, u8, Logic>;

    fn accumulate(input: u8, _: (), sum: u8) -> (u8, (), u8) { (sum, (), sum.wrapping_add(input)) }

    fn accumulator() -> Accumulator { Fsm::new("accumulator", accumulate as Logic, 0) }

    #[test]
    fn output_reflects_state_before_the_clock_edge() {
        let mut fsm = accumulator();
        assert_eq!(fsm.comb(3, ()), (0, ()));
        fsm.tick(3, ());
        assert_eq!(fsm.comb(4, ()), (3, ()));
        fsm.tick(4, ());
        assert_eq!(*fsm.state(), 7);
    }

    #[test]
    fn comb_does_not_advance_and_reset_restores_init() {
        let mut fsm = accumulator();
        let _ = fsm.comb(9, ());
        assert_eq!(*fsm.state(), 0);
        fsm.tick(9, ());
        fsm.reset();
        assert_eq!(*fsm.state(), 0);
    }
}

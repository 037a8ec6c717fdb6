//! Interface.

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::*;

/// Interface of channels.
///
/// An interface is a type-level description of the wires between two modules: the forward
/// signal flows from producer to consumer, the backward signal from consumer to producer.
pub trait Interface: 'static + Sized + Debug {
    /// Forward signal.
    type Fwd: Signal;

    /// Backward signal.
    type Bwd: Signal;
}

/// Forward signal of an interface.
pub type Fwd<I: Interface> = <I as Interface>::Fwd;

/// Backward signal of an interface.
pub type Bwd<I: Interface> = <I as Interface>::Bwd;

impl Interface for () {
    type Bwd = ();
    type Fwd = ();
}

/// Unidirectional channel: a plain signal with no handshake.
#[derive(Debug)]
pub struct UniChannel<V: Signal> {
    _marker: PhantomData<V>,
}

impl<V: Signal> Interface for UniChannel<V> {
    type Bwd = ();
    type Fwd = V;
}

macro_rules! impl_interface_tuple {
    ($($a:ident)+) => {
        impl<$($a: Interface,)+> Interface for ($($a,)+) {
            type Bwd = ($(<$a as Interface>::Bwd,)+);
            type Fwd = ($(<$a as Interface>::Fwd,)+);
        }
    };
}

impl_interface_tuple! { I1 I2 }
impl_interface_tuple! { I1 I2 I3 }

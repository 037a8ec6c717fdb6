//! Utilities for valid-ready channels.

use micflow::*;

/// Valid-ready channel.
///
/// A transfer happens in every cycle where both `valid` and `ready` are asserted. Producers
/// that cannot be stalled may ignore `ready`; the word is then lost if the consumer is not ready.
#[derive(Debug)]
pub struct VrChannel<V: Signal> {
    _marker: std::marker::PhantomData<V>,
}

impl<V: Signal> Interface for VrChannel<V> {
    type Bwd = Ready;
    type Fwd = Valid<V>;
}

/// Valid/ready channel's forward signals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Signal)]
pub struct Valid<V: Signal> {
    /// Inner data
    #[member(name = "")]
    pub inner: V,

    /// Valid bit
    pub valid: bool,
}

impl<V: Signal> Valid<V> {
    /// Creates a new value.
    pub fn new(valid: bool, inner: V) -> Self { Self { inner, valid } }

    /// Creates a valid value.
    pub fn valid(inner: V) -> Self { Self::new(true, inner) }

    /// Returns whether a transfer happens under the given backward signal.
    pub fn fire(&self, bwd: &Ready) -> bool { self.valid && bwd.ready }

    /// Returns the inner value if valid.
    pub fn into_option(self) -> Option<V> {
        if self.valid {
            Some(self.inner)
        } else {
            None
        }
    }
}

impl<V: Signal + Default> Valid<V> {
    /// Creates an invalid value.
    pub fn invalid() -> Self { Self::new(false, V::default()) }
}

/// Ready signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Signal)]
pub struct Ready {
    /// Ready bit
    pub ready: bool,
}

impl Ready {
    /// Creates a new ready signal.
    pub fn new(ready: bool) -> Self { Self { ready } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_is_flattened_into_its_inner_ports() {
        let ports = <Valid<(bool, u8)>>::port_decls().iter().collect::<Vec<_>>();
        assert_eq!(
            ports,
            vec![(Some("0".to_string()), 1), (Some("1".to_string()), 8), (Some("valid".to_string()), 1)]
        );
        assert_eq!(<Valid<(bool, u8)>>::WIDTH, 10);
    }

    #[test]
    fn transfer_needs_valid_and_ready() {
        assert!(Valid::valid(1u8).fire(&Ready::new(true)));
        assert!(!Valid::valid(1u8).fire(&Ready::new(false)));
        assert!(!Valid::<u8>::invalid().fire(&Ready::new(true)));
        assert_eq!(Valid::<u8>::invalid().into_option(), None);
        assert_eq!(Valid::valid(3u8).into_option(), Some(3));
    }
}

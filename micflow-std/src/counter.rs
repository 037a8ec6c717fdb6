//! Counter modules.

use micflow::*;

/// Circular counter modulo `N`, held in a `clog2(N)`-bit register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Counter<const N: usize> {
    value: usize,
}

impl<const N: usize> Counter<N> {
    /// Creates a counter holding `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value >= N`.
    pub fn new(value: usize) -> Self {
        assert!(value < N, "counter value {} out of range 0..{}", value, N);
        Self { value }
    }

    /// Current value.
    pub fn value(&self) -> usize { self.value }

    /// Returns whether the counter holds its last value, `N - 1`.
    pub fn is_max(&self) -> bool { self.value == N - 1 }

    /// Value after one increment, wrapping to 0.
    #[must_use]
    pub fn next(&self) -> Self { Self { value: if self.is_max() { 0 } else { self.value + 1 } } }

    /// Value after incrementing if `up`.
    #[must_use]
    pub fn count(&self, up: bool) -> Self {
        if up {
            self.next()
        } else {
            *self
        }
    }
}

impl<const N: usize> Signal for Counter<N> {
    const WIDTH: usize = clog2(N);

    fn transl(self) -> Vec<bool> { (0..Self::WIDTH).map(|i| (self.value >> i) & 1 == 1).collect() }

    fn port_decls() -> PortDecls { PortDecls::Bits(Self::WIDTH) }
}

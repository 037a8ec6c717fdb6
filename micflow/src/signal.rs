use std::fmt::{self, Debug};
use std::{array, iter};

use crate::utils::join_options;

/// Port names and bitwidths of a signal.
///
/// A signal travels as a bundle of wires. `PortDecls` stores the name and width of each wire so
/// that waveform dumps can show them individually.
///
/// # Example
///
/// The port declaration of `Valid<PdmWord>` is as follows:
///
/// ```ignore
/// Struct([
///     (None, Struct([(Some("data"), Bits(32)), (Some("first"), Bits(1)), (Some("last"), Bits(1))])),
///     (Some("valid"), Bits(1)),
/// ])
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortDecls {
    /// Collection of wires.
    Struct(Vec<(Option<String>, PortDecls)>),

    /// Single wire which contains its width.
    Bits(usize),
}

impl PortDecls {
    /// Width of `PortDecls`.
    pub fn width(&self) -> usize {
        match self {
            PortDecls::Struct(inner) => inner.iter().map(|(_, m)| m.width()).sum(),
            PortDecls::Bits(width) => *width,
        }
    }

    /// Iterator for `PortDecls`.
    ///
    /// # Note
    ///
    /// The iterator returns (name, width) for inner fields **ONLY** with nonzero width.
    /// This is to ignore meaningless unit types.
    pub fn iter(&self) -> std::vec::IntoIter<(Option<String>, usize)> { self.iter_with_prefix(None).into_iter() }

    fn iter_with_prefix(&self, prefix: Option<String>) -> Vec<(Option<String>, usize)> {
        match self {
            PortDecls::Struct(inner) => inner
                .iter()
                .flat_map(|(name, member)| member.iter_with_prefix(join_options("_", [prefix.clone(), name.clone()])))
                .collect(),
            PortDecls::Bits(width) => {
                if *width > 0 {
                    vec![(prefix, *width)]
                } else {
                    vec![]
                }
            }
        }
    }
}

/// Bit-representable values.
///
/// `transl` returns the bits least significant first, in the same order as `port_decls`.
pub trait Signal: 'static + Debug + Clone {
    /// Signal's bit width.
    ///
    /// # Note
    ///
    /// `Self::WIDTH` and `Self::port_decls().width()` should be equal.
    const WIDTH: usize;

    /// Translates the value into its bits.
    fn transl(self) -> Vec<bool>;

    /// Port names and bitwidths.
    fn port_decls() -> PortDecls;
}

impl Signal for () {
    const WIDTH: usize = 0;

    fn transl(self) -> Vec<bool> { vec![] }

    fn port_decls() -> PortDecls { PortDecls::Bits(0) }
}

impl Signal for bool {
    const WIDTH: usize = 1;

    fn transl(self) -> Vec<bool> { vec![self] }

    fn port_decls() -> PortDecls { PortDecls::Bits(1) }
}

macro_rules! impl_signal {
    ($typ:ty) => {
        impl Signal for $typ {
            const WIDTH: usize = ::std::mem::size_of::<$typ>() * 8;

            fn transl(self) -> Vec<bool> { (0..Self::WIDTH).map(|i| (self >> i) & 1 == 1).collect::<Vec<_>>() }

            fn port_decls() -> PortDecls { PortDecls::Bits(Self::WIDTH) }
        }
    };
}

impl_signal!(u8);
impl_signal!(u16);
impl_signal!(u32);
impl_signal!(u64);
impl_signal!(u128);
impl_signal!(usize);

macro_rules! impl_signal_tuple {
    ($($a:ident $i:tt)+) => {
        impl<$($a: Signal,)+> Signal for ($($a,)+) {
            const WIDTH: usize = 0 $(+ <$a as Signal>::WIDTH)+;

            fn transl(self) -> Vec<bool> {
                iter::empty()$(.chain(self.$i.transl()))+.collect::<Vec<_>>()
            }

            fn port_decls() -> PortDecls {
                PortDecls::Struct(vec![$((Some(stringify!($i).to_string()), <$a as Signal>::port_decls()),)+])
            }
        }
    };
}

impl_signal_tuple! { V1 0 }
impl_signal_tuple! { V1 0 V2 1 }
impl_signal_tuple! { V1 0 V2 1 V3 2 }
impl_signal_tuple! { V1 0 V2 1 V3 2 V4 3 }

/// Fixed-width bit vector, least significant bit first.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bits<const N: usize> {
    inner: [bool; N],
}

impl<const N: usize> Bits<N> {
    /// Creates new bits.
    pub const fn new(inner: [bool; N]) -> Self { Self { inner } }

    /// Creates bits from the low `N` bits of `value`. Bits above 128 are zero.
    pub fn from_u128(value: u128) -> Self { Self::new(array::from_fn(|i| i < 128 && (value >> i) & 1 == 1)) }

    /// Returns the low 128 bits as an integer.
    pub fn to_u128(&self) -> u128 {
        self.inner.iter().take(128).enumerate().fold(0, |acc, (i, b)| acc | (u128::from(*b) << i))
    }

    /// Returns `M` bits starting from `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset + M > N`.
    pub fn clip<const M: usize>(&self, offset: usize) -> Bits<M> {
        assert!(offset + M <= N, "clipping [{}, {}) out of {} bits", offset, offset + M, N);
        Bits::new(array::from_fn(|i| self.inner[offset + i]))
    }

    /// Returns 32 bits starting from `offset` as an integer.
    pub fn word(&self, offset: usize) -> u32 {
        self.clip::<32>(offset).inner.iter().enumerate().fold(0, |acc, (i, b)| acc | (u32::from(*b) << i))
    }
}

impl<const N: usize> Default for Bits<N> {
    fn default() -> Self { Self::new([false; N]) }
}

impl<const N: usize> fmt::LowerHex for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        let nibbles = (N + 3) / 4;
        for n in (0..nibbles).rev() {
            let nibble = (0..4)
                .filter(|b| n * 4 + b < N && self.inner[n * 4 + b])
                .fold(0u32, |acc, b| acc | (1 << b));
            write!(f, "{:x}", nibble)?;
        }
        Ok(())
    }
}

impl<const N: usize> Debug for Bits<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Bits<{}>({:#x})", N, self) }
}

impl<const N: usize> Signal for Bits<N> {
    const WIDTH: usize = N;

    fn transl(self) -> Vec<bool> { self.inner.to_vec() }

    fn port_decls() -> PortDecls { PortDecls::Bits(N) }
}

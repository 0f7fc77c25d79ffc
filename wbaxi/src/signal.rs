//! Wide data words and byte strobes.
//!
//! Both are stored least significant byte lane first, so lane `i` covers bits `8i..8i+8` of the
//! bus. Narrow-side values (at most 64 bits) are plain integers.

use std::fmt;
use std::iter;

use arrayvec::ArrayVec;
use itertools::Itertools;
use paste::paste;
use static_assertions::const_assert;

/// Maximum number of byte lanes in a wide word (a 2048-bit data bus).
pub const MAX_LANES: usize = 256;

// A 64-bit narrow word at a 32:1 ratio must fit.
const_assert!(MAX_LANES * 8 >= 64 * 32);

/// Wide data word.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    bytes: ArrayVec<u8, MAX_LANES>,
}

impl Word {
    /// Creates an all-zero word of `lanes` bytes.
    pub fn zero(lanes: usize) -> Self {
        assert!(lanes <= MAX_LANES, "word of {} lanes exceeds {} lanes", lanes, MAX_LANES);
        Self { bytes: iter::repeat(0).take(lanes).collect() }
    }

    /// Creates a word from its bytes, least significant first.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= MAX_LANES, "word of {} lanes exceeds {} lanes", bytes.len(), MAX_LANES);
        Self { bytes: bytes.iter().copied().collect() }
    }

    /// Creates a word of `lanes` bytes with the `size`-byte value `value` repeated in every slot.
    pub fn replicate(lanes: usize, value: u64, size: usize) -> Self {
        let mut word = Self::zero(lanes);
        for offset in (0..lanes).step_by(size) {
            word.set(offset, size, value);
        }
        word
    }

    /// Bytes, least significant first.
    pub fn as_bytes(&self) -> &[u8] { &self.bytes }

    /// Reads the `size`-byte little-endian value starting at lane `offset`.
    ///
    /// Lanes beyond the end of the word read as zero.
    pub fn get(&self, offset: usize, size: usize) -> u64 {
        debug_assert!(size <= 8);
        (0..size).filter_map(|i| self.bytes.get(offset + i)).rev().fold(0, |acc, byte| (acc << 8) | u64::from(*byte))
    }

    /// Writes the low `size` bytes of `value` starting at lane `offset`.
    ///
    /// Lanes beyond the end of the word are dropped.
    pub fn set(&mut self, offset: usize, size: usize, value: u64) {
        debug_assert!(size <= 8);
        for (i, byte) in value.to_le_bytes().into_iter().take(size).enumerate() {
            if let Some(lane) = self.bytes.get_mut(offset + i) {
                *lane = byte;
            }
        }
    }
}

/// Per-byte write enables of a wide word.
#[derive(Default, Clone, PartialEq, Eq, Hash)]
pub struct Strobe {
    lanes: ArrayVec<bool, MAX_LANES>,
}

impl Strobe {
    /// Creates a strobe of `lanes` lanes with every lane disabled.
    pub fn none(lanes: usize) -> Self {
        assert!(lanes <= MAX_LANES, "strobe of {} lanes exceeds {} lanes", lanes, MAX_LANES);
        Self { lanes: iter::repeat(false).take(lanes).collect() }
    }

    /// Enables lanes `offset..offset + size` according to the bits of `mask`.
    pub fn enable(&mut self, offset: usize, size: usize, mask: u64) {
        for i in 0..size.min(64) {
            if let Some(lane) = self.lanes.get_mut(offset + i) {
                *lane |= mask & (1 << i) != 0;
            }
        }
    }

    /// Iterates over the enabled lanes.
    pub fn enabled(&self) -> impl Iterator<Item = usize> + '_ { self.lanes.iter().positions(|lane| *lane) }
}

macro_rules! impl_low_view {
    ($($typ:ty),*) => {
        paste! {
            $(
                impl Word {
                    #[doc = concat!("Returns the low bytes of the word as a `", stringify!($typ), "`.")]
                    pub fn [<low_ $typ>](&self) -> $typ {
                        let mut buf = [0u8; ::std::mem::size_of::<$typ>()];
                        let n = buf.len().min(self.bytes.len());
                        buf[..n].copy_from_slice(&self.bytes[..n]);
                        <$typ>::from_le_bytes(buf)
                    }
                }

                impl Strobe {
                    #[doc = concat!("Returns the low lanes of the strobe as a `", stringify!($typ), "` bit mask.")]
                    pub fn [<low_ $typ>](&self) -> $typ {
                        let mut mask: $typ = 0;
                        for lane in self.enabled().take_while(|lane| *lane < <$typ>::BITS as usize) {
                            mask |= 1 << lane;
                        }
                        mask
                    }
                }
            )*
        }
    };
}

impl_low_view!(u16, u32, u64, u128);

impl fmt::LowerHex for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes.iter().rev().map(|byte| format!("{:02x}", byte)).join(""))
    }
}

impl fmt::Debug for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Word(0x{:x})", self) }
}

impl fmt::Debug for Strobe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Strobe(0b{})", self.lanes.iter().rev().map(|lane| if *lane { '1' } else { '0' }).join(""))
    }
}

//! Register map of the FIR accelerator. This is the compatibility contract with the FPGA
//! bitstream: word-addressed, little-endian, relative to the instance's base address.
//!
//! 0x00: CTRL
//!   [0] ENABLE - level. The core filters samples while this is high.
//!   [1] CLEAR  - edge. A 0 -> 1 -> 0 pulse clears the delay line and accumulators.
//!   [2..31] reserved.
//!
//! 0x10: COEFF[0], 0x14: COEFF[1], ... 4-byte stride, one slot per tap. The low 16 bits
//! of each slot hold a Q1.15 tap; hardware ignores the upper 16.

use paste::paste;

/// Offset of the control register.
pub const CTRL_OFFSET: usize = 0x00;
/// Offset of the first coefficient slot.
pub const COEFF_OFFSET: usize = 0x10;
/// Distance between consecutive coefficient slots, in bytes.
pub const COEFF_STRIDE: usize = 4;

/// CTRL bit 0: process samples while set.
pub const CTRL_ENABLE: u32 = 1 << 0;
/// CTRL bit 1: rising edge clears transient filter state.
pub const CTRL_CLEAR: u32 = 1 << 1;

/// Byte offset of coefficient slot `index`, relative to the base address.
#[inline(always)]
pub const fn coeff_offset(index: u32) -> usize {
    COEFF_OFFSET + COEFF_STRIDE * index as usize
}

/// A value of the CTRL register. Reserved bits are carried as-is; only ENABLE and CLEAR
/// are interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ctrl(u32);

impl Ctrl {
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The value to write back during a read-modify-write. CLEAR is dropped so that an RMW
    /// can never re-assert it: only an explicit pulse produces a clear.
    #[inline(always)]
    pub const fn for_rmw(self) -> Self {
        self.with_clear(false)
    }
}

// Generates a getter and a `with_` builder for each single-bit CTRL field.
macro_rules! ctrl_bits {
    ($($name:ident: $mask:expr),+ $(,)?) => {
        impl Ctrl {
            $(
                #[doc = concat!("Is the ", stringify!($name), " bit set?")]
                #[inline(always)]
                pub const fn $name(self) -> bool {
                    self.0 & $mask != 0
                }

                paste! {
                    /// This value with the bit set or cleared; other bits are kept.
                    #[inline(always)]
                    pub const fn [<with_ $name>](self, set: bool) -> Self {
                        if set {
                            Self(self.0 | $mask)
                        } else {
                            Self(self.0 & !$mask)
                        }
                    }
                }
            )+
        }
    };
}

ctrl_bits!(enable: CTRL_ENABLE, clear: CTRL_CLEAR);

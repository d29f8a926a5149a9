//! Q1.15 signed fixed-point: 1 sign bit, 15 fractional bits, stored as a 16-bit two's
//! complement integer. Represents -1.0 to 1.0 - 2^-15.

use num_traits::float::FloatCore;

const SCALE: f32 = 32_768.;

/// A Q1.15 filter tap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Q15(pub i16);

impl Q15 {
    pub const ZERO: Self = Self(0);
    /// -1.0
    pub const MIN: Self = Self(i16::MIN);
    /// 1.0 - 2^-15
    pub const MAX: Self = Self(i16::MAX);

    /// Convert from floating point, rounding to the nearest step. Values outside the
    /// representable range saturate; NaN maps to zero.
    pub fn from_f32(val: f32) -> Self {
        if val.is_nan() {
            return Self::ZERO;
        }

        let scaled = (val * SCALE).round();

        if scaled >= i16::MAX as f32 {
            Self::MAX
        } else if scaled <= i16::MIN as f32 {
            Self::MIN
        } else {
            Self(scaled as i16)
        }
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / SCALE
    }

    /// The 32-bit slot word for this tap. The value is sign-extended; hardware only
    /// consumes the low 16 bits, so the upper half is don't-care.
    #[inline(always)]
    pub const fn to_word(self) -> u32 {
        self.0 as i32 as u32
    }

    /// Decode a slot word, discarding the upper 16 bits.
    #[inline(always)]
    pub const fn from_word(word: u32) -> Self {
        Self(word as u16 as i16)
    }
}

impl From<i16> for Q15 {
    fn from(val: i16) -> Self {
        Self(val)
    }
}

impl From<Q15> for i16 {
    fn from(val: Q15) -> Self {
        val.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_conversion_saturates() {
        assert_eq!(Q15::from_f32(1.0), Q15::MAX);
        assert_eq!(Q15::from_f32(7.5), Q15::MAX);
        assert_eq!(Q15::from_f32(-1.0), Q15::MIN);
        assert_eq!(Q15::from_f32(-2.0), Q15::MIN);
        assert_eq!(Q15::from_f32(f32::NAN), Q15::ZERO);
    }

    #[test]
    fn float_conversion_rounds() {
        assert_eq!(Q15::from_f32(0.5), Q15(16_384));
        assert_eq!(Q15::from_f32(-0.5), Q15(-16_384));
        assert_eq!(Q15::from_f32(0.0), Q15::ZERO);
        // 1.4 LSB rounds down, 1.6 LSB rounds up.
        assert_eq!(Q15::from_f32(1.4 / SCALE), Q15(1));
        assert_eq!(Q15::from_f32(1.6 / SCALE), Q15(2));
        assert_eq!(Q15(-16_384).to_f32(), -0.5);
    }

    #[test]
    fn negative_taps_sign_extend() {
        assert_eq!(Q15(-16_384).to_word(), 0xFFFF_C000);
        assert_eq!(Q15(0x1111).to_word(), 0x0000_1111);
        assert_eq!(Q15(-16_384).to_word() & 0xFFFF, 0xC000);
    }

    #[test]
    fn upper_half_is_ignored_on_decode() {
        assert_eq!(Q15::from_word(0x0000_C000), Q15(-16_384));
        assert_eq!(Q15::from_word(0xFFFF_C000), Q15(-16_384));
        assert_eq!(Q15::from_word(0xDEAD_7FFF), Q15::MAX);
    }
}

//! Fixed-point wire values
//!
//! The protocol transmits fractional numbers in two forms:
//!
//! - a *fixed* value: a signed 24.8 fixed-point number stored in a single `i32` word,
//!   used by `set_cursor_position_hint`;
//! - a *double fixed* value: a 64-bit quantity carried as two `i32` words, an integral part and a
//!   fractional part counted in 1/256 units, used by `relative_motion`.
//!
//! Conversions from `f64` round to the nearest representable value, ties to even (the same result
//! libwayland's `wl_fixed_from_double` produces). Both parts of a double fixed value carry the
//! sign of the value: `-2.5` is `(-2, -128)`, never `(-3, 128)`.
//!
//! Values outside the representable range are a caller error: the conversions saturate to the
//! nearest bound instead of reporting it, and NaN encodes as zero.

/// Number of fractional steps per unit in both fixed-point forms
pub const FIXED_DENOMINATOR: i32 = 256;

const DENOMINATOR: f64 = FIXED_DENOMINATOR as f64;

/// Encode a number as a 24.8 fixed-point word
///
/// The result is exact for every multiple of 1/256 in the range of the format.
#[inline]
pub fn fixed_from_f64(value: f64) -> i32 {
    (value * DENOMINATOR).round_ties_even() as i32
}

/// Decode a 24.8 fixed-point word
#[inline]
pub fn fixed_to_f64(word: i32) -> f64 {
    f64::from(word) / DENOMINATOR
}

/// A double fixed value, as split on the wire
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DoubleFixed {
    /// Integral part, truncated toward zero
    pub integral: i32,
    /// Fractional part in 1/256 units, with the same sign as the integral part
    pub fractional: i32,
}

impl DoubleFixed {
    /// The zero delta
    pub const ZERO: DoubleFixed = DoubleFixed { integral: 0, fractional: 0 };

    /// Rebuild a value from the two words read off the wire
    #[inline]
    pub fn from_parts(integral: i32, fractional: i32) -> Self {
        Self { integral, fractional }
    }

    /// Encode a number, rounding it to the nearest 1/256
    pub fn from_f64(value: f64) -> Self {
        Self::from_raw((value * DENOMINATOR).round_ties_even() as i64)
    }

    /// Decode the value as `integral + fractional / 256`
    ///
    /// The conversion is exact: every double fixed value is representable as an `f64`.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.integral) + f64::from(self.fractional) / DENOMINATOR
    }

    /// Largest count of steps a double fixed value holds
    pub const MAX_RAW: i64 =
        i32::MAX as i64 * FIXED_DENOMINATOR as i64 + (FIXED_DENOMINATOR as i64 - 1);
    /// Smallest count of steps a double fixed value holds
    pub const MIN_RAW: i64 = -Self::MAX_RAW - FIXED_DENOMINATOR as i64;

    /// Build a value from a count of 1/256 steps, saturating outside `MIN_RAW..=MAX_RAW`
    pub fn from_raw(steps: i64) -> Self {
        let denominator = i64::from(FIXED_DENOMINATOR);
        let steps = steps.clamp(Self::MIN_RAW, Self::MAX_RAW);
        Self { integral: (steps / denominator) as i32, fractional: (steps % denominator) as i32 }
    }

    /// The value as a count of 1/256 steps
    #[inline]
    pub fn to_raw(self) -> i64 {
        i64::from(self.integral) * i64::from(FIXED_DENOMINATOR) + i64::from(self.fractional)
    }

    /// The two words in wire order
    #[inline]
    pub fn into_parts(self) -> (i32, i32) {
        (self.integral, self.fractional)
    }
}

impl From<DoubleFixed> for f64 {
    fn from(value: DoubleFixed) -> f64 {
        value.to_f64()
    }
}

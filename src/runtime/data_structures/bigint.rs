use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, BitAnd, BitOr, BitXor, Mul, Not, Shl, Shr, Sub},
};

/// The arbitrary-precision signed integer that is the sole value domain of the interpreter.
///
/// A thin newtype over `num_bigint::BigInt` so that the rest of the crate only ever names the
/// operations this interpreter actually needs (parse, format, the four basic arithmetic ops,
/// comparisons, bitwise logic, shifts, and narrowing to a small signed integer), rather than the
/// full surface `BigInt` exposes.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Int(BigInt);

impl Int {
    /// The zero value. Used to seed loop counters, variable cells, and comparisons.
    pub fn zero() -> Int {
        Int(BigInt::zero())
    }

    /// Build an `Int` from a small signed integer.
    pub fn from_i64(value: i64) -> Int {
        Int(BigInt::from(value))
    }

    /// Parse a decimal string (optional leading `-`) into an `Int`. Returns `None` on any
    /// malformed input, mirroring `mpz_set_str`'s failure mode in the original source.
    pub fn parse_decimal(text: &str) -> Option<Int> {
        text.parse::<BigInt>().ok().map(Int)
    }

    /// Format as a decimal string. Round-tripping this through `parse_decimal` always yields an
    /// equal value.
    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }

    pub fn add(&self, other: &Int) -> Int {
        Int(&self.0 + &other.0)
    }

    pub fn sub(&self, other: &Int) -> Int {
        Int(&self.0 - &other.0)
    }

    pub fn mul(&self, other: &Int) -> Int {
        Int(&self.0 * &other.0)
    }

    /// Truncating division (quotient sign follows `BigInt`'s `Div` impl, which truncates toward
    /// zero — the same convention the original GMP source uses via its truncating `mpz_div`).
    /// Returns `None` on division by zero; the caller is responsible for raising the interpreter
    /// error.
    pub fn div(&self, other: &Int) -> Option<Int> {
        if other.0.is_zero() {
            None
        } else {
            Some(Int(&self.0 / &other.0))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn increment(&mut self) {
        self.0 += 1;
    }

    pub fn bit_and(&self, other: &Int) -> Int {
        Int(&self.0 & &other.0)
    }

    pub fn bit_or(&self, other: &Int) -> Int {
        Int(&self.0 | &other.0)
    }

    pub fn bit_xor(&self, other: &Int) -> Int {
        Int(&self.0 ^ &other.0)
    }

    /// Two's-complement bitwise complement, involutive by construction.
    pub fn bit_not(&self) -> Int {
        Int(!self.0.clone())
    }

    /// Left shift by a non-negative small integer.
    pub fn shl(&self, count: u32) -> Int {
        Int(self.0.clone() << count)
    }

    /// Truncating right shift by a non-negative small integer.
    pub fn shr(&self, count: u32) -> Int {
        Int(self.0.clone() >> count)
    }

    /// Does this value fit in an `i64`? Narrowing elsewhere in the interpreter must check this
    /// explicitly and raise an error rather than silently truncate.
    pub fn fits_i64(&self) -> bool {
        self.0.to_i64().is_some()
    }

    /// Narrow to `i64`, or `None` if the value doesn't fit.
    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    /// Narrow to a non-negative `usize`, or `None` if the value is negative or doesn't fit.
    pub fn to_usize(&self) -> Option<usize> {
        if self.0.is_negative() {
            None
        } else {
            self.0.to_usize()
        }
    }

    /// Narrow to a non-negative `u32`, used for shift counts.
    pub fn to_u32(&self) -> Option<u32> {
        if self.0.is_negative() {
            None
        } else {
            self.0.to_u32()
        }
    }
}

impl Display for Int {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Int {
    fn from(value: i64) -> Int {
        Int::from_i64(value)
    }
}

// A handful of operator impls so tests and callers can write natural arithmetic expressions
// instead of always going through the named methods.

impl Add for &Int {
    type Output = Int;
    fn add(self, rhs: &Int) -> Int {
        Int::add(self, rhs)
    }
}

impl Sub for &Int {
    type Output = Int;
    fn sub(self, rhs: &Int) -> Int {
        Int::sub(self, rhs)
    }
}

impl Mul for &Int {
    type Output = Int;
    fn mul(self, rhs: &Int) -> Int {
        Int::mul(self, rhs)
    }
}

impl BitAnd for &Int {
    type Output = Int;
    fn bitand(self, rhs: &Int) -> Int {
        Int::bit_and(self, rhs)
    }
}

impl BitOr for &Int {
    type Output = Int;
    fn bitor(self, rhs: &Int) -> Int {
        Int::bit_or(self, rhs)
    }
}

impl BitXor for &Int {
    type Output = Int;
    fn bitxor(self, rhs: &Int) -> Int {
        Int::bit_xor(self, rhs)
    }
}

impl Not for &Int {
    type Output = Int;
    fn not(self) -> Int {
        Int::bit_not(self)
    }
}

impl Shl<u32> for &Int {
    type Output = Int;
    fn shl(self, count: u32) -> Int {
        Int::shl(self, count)
    }
}

impl Shr<u32> for &Int {
    type Output = Int;
    fn shr(self, count: u32) -> Int {
        Int::shr(self, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_decimal_text() {
        let n = Int::parse_decimal("-123456789012345678901234567890").unwrap();
        assert_eq!(n.to_decimal_string(), "-123456789012345678901234567890");
    }

    #[test]
    fn rejects_malformed_decimal() {
        assert!(Int::parse_decimal("12x3").is_none());
        assert!(Int::parse_decimal("").is_none());
    }

    #[test]
    fn division_truncates_toward_zero() {
        let a = Int::from_i64(-7);
        let b = Int::from_i64(2);
        assert_eq!(a.div(&b).unwrap().to_decimal_string(), "-3");

        let a = Int::from_i64(7);
        let b = Int::from_i64(-2);
        assert_eq!(a.div(&b).unwrap().to_decimal_string(), "-3");
    }

    #[test]
    fn division_by_zero_is_none() {
        assert!(Int::from_i64(1).div(&Int::zero()).is_none());
    }

    #[test]
    fn bit_not_is_involutive() {
        let n = Int::from_i64(42);
        assert_eq!(n.bit_not().bit_not(), n);
    }

    #[test]
    fn shift_by_zero_is_identity() {
        let n = Int::from_i64(123456);
        assert_eq!(n.shl(0), n);
        assert_eq!(n.shr(0), n);
    }

    #[test]
    fn narrowing_rejects_values_that_dont_fit() {
        let huge = Int::parse_decimal("999999999999999999999999999999").unwrap();
        assert!(!huge.fits_i64());
        assert!(huge.to_i64().is_none());
    }

    #[test]
    fn narrowing_to_usize_rejects_negative() {
        assert!(Int::from_i64(-1).to_usize().is_none());
        assert_eq!(Int::from_i64(5).to_usize(), Some(5));
    }
}

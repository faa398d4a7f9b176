//! Arbitrary-precision integer stack item.
//!
//! Wraps `num_bigint::BigInt`. The canonical byte encoding is the minimal little-endian
//! two's-complement form with zero encoded as the empty sequence, which is what scripts
//! see when an integer is hashed, concatenated or compared against byte strings.

use std::{
    cell::OnceCell,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

use num_bigint::BigInt;
use num_traits::Zero;

use super::StackItem;

/// Immutable arbitrary-precision integer.
///
/// The byte length of the canonical encoding is computed on first request and cached;
/// the value never changes after construction, so the cache is never invalidated.
#[derive(Debug, Clone)]
pub struct Integer {
    value: BigInt,
    byte_length: OnceCell<usize>,
}

impl Integer {
    /// Creates a new `Integer` from a `BigInt`.
    #[must_use]
    pub fn new(value: BigInt) -> Self {
        Self {
            value,
            byte_length: OnceCell::new(),
        }
    }

    /// Decodes a canonical (little-endian two's-complement) byte sequence.
    ///
    /// The empty sequence decodes to zero. Non-minimal encodings are accepted.
    #[must_use]
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        Self::new(BigInt::from_signed_bytes_le(bytes))
    }

    /// Returns a reference to the inner `BigInt`.
    #[must_use]
    pub fn value(&self) -> &BigInt {
        &self.value
    }

    /// Truthiness: every integer except zero is true.
    #[must_use]
    pub fn to_boolean(&self) -> bool {
        !self.value.is_zero()
    }

    /// Canonical byte encoding.
    ///
    /// Zero is the empty sequence; anything else is the shortest little-endian
    /// two's-complement sequence that preserves the sign, so `1 -> [0x01]`,
    /// `-1 -> [0xFF]` and `128 -> [0x80, 0x00]`.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.value.is_zero() {
            Vec::new()
        } else {
            self.value.to_signed_bytes_le()
        }
    }

    /// Length of [`to_bytes`](Self::to_bytes), cached after the first call.
    #[must_use]
    pub fn byte_length(&self) -> usize {
        *self.byte_length.get_or_init(|| self.to_bytes().len())
    }

    /// Compares against any stack item.
    ///
    /// Integers compare numerically. Any other variant is compared by canonical bytes;
    /// a variant without a byte encoding is simply not equal. Other variants do not
    /// necessarily fall back the same way, so `a.equals(b)` may differ from
    /// `b.equals(a)` when only one side is an `Integer`.
    #[must_use]
    pub fn equals(&self, other: &StackItem) -> bool {
        if let StackItem::Integer(other) = other {
            return self.value == other.value;
        }
        match other.byte_sequence() {
            Ok(bytes) => self.to_bytes() == *bytes,
            Err(_) => false,
        }
    }
}

// === Trait Implementations ===

impl PartialEq for Integer {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Integer {}

impl Hash for Integer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Self::new(value)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value))
    }
}

impl From<u32> for Integer {
    fn from(value: u32) -> Self {
        Self::new(BigInt::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_bytes_of_small_values() {
        assert_eq!(Integer::from(0_i64).to_bytes(), Vec::<u8>::new());
        assert_eq!(Integer::from(1_i64).to_bytes(), vec![0x01]);
        assert_eq!(Integer::from(-1_i64).to_bytes(), vec![0xFF]);
        assert_eq!(Integer::from(127_i64).to_bytes(), vec![0x7F]);
        assert_eq!(Integer::from(-128_i64).to_bytes(), vec![0x80]);
    }

    /// Values whose top bit would flip the sign need one extra byte.
    #[test]
    fn canonical_bytes_sign_extend_only_when_needed() {
        assert_eq!(Integer::from(128_i64).to_bytes(), vec![0x80, 0x00]);
        assert_eq!(Integer::from(255_i64).to_bytes(), vec![0xFF, 0x00]);
        assert_eq!(Integer::from(256_i64).to_bytes(), vec![0x00, 0x01]);
        assert_eq!(Integer::from(-129_i64).to_bytes(), vec![0x7F, 0xFF]);
    }

    /// Offsets are unsigned, so the largest one needs a sign byte.
    #[test]
    fn unsigned_offsets_encode_as_positive() {
        let max = Integer::from(u32::MAX);
        assert_eq!(max.to_bytes(), vec![0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
        assert_eq!(max.byte_length(), 5);
        assert_eq!(max, Integer::from(i64::from(u32::MAX)));
        assert_eq!(Integer::from(0_u32).to_bytes(), Vec::<u8>::new());
    }

    #[test]
    fn byte_length_is_cached_and_consistent() {
        let value = Integer::from(BigInt::from(2).pow(100));
        assert!(value.byte_length.get().is_none());
        assert_eq!(value.byte_length(), value.to_bytes().len());
        assert_eq!(value.byte_length.get().copied(), Some(13));
        assert_eq!(Integer::from(0_i64).byte_length(), 0);
    }

    #[test]
    fn from_le_bytes_inverts_to_bytes() {
        for n in [0i64, 1, -1, 127, 128, -128, -129, 65_535, i64::MIN, i64::MAX] {
            let value = Integer::from(n);
            assert_eq!(Integer::from_le_bytes(&value.to_bytes()), value, "value {n}");
        }
        assert_eq!(Integer::from_le_bytes(&[]), Integer::from(0_i64));
    }

    /// Caching the byte length of one side must not affect numeric equality.
    #[test]
    fn equality_ignores_cache_state() {
        let a = Integer::from(300_i64);
        let b = Integer::from(300_i64);
        let _ = a.byte_length();
        assert!(a.equals(&StackItem::Integer(b.clone())));
        assert!(b.equals(&StackItem::Integer(a.clone())));
        assert!(!a.equals(&StackItem::Integer(Integer::from(301_i64))));
    }

    #[test]
    fn boolean_is_nonzero() {
        assert!(!Integer::from(0_i64).to_boolean());
        assert!(Integer::from(-5_i64).to_boolean());
    }
}

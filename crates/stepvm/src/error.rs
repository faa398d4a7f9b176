use std::fmt;

use crate::types::StackItemType;

/// Target of a stack-item coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum CoercionTarget {
    /// Canonical byte encoding.
    ByteString,
    /// Arbitrary-precision integer.
    Integer,
}

/// Error returned by stack-item coercions.
///
/// Equality never surfaces this error: a comparison that would need an unsupported
/// coercion resolves to "not equal" instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackItemError {
    /// The variant has no representation of the requested kind.
    UnsupportedCoercion { from: StackItemType, to: CoercionTarget },
}

impl fmt::Display for StackItemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCoercion { from, to } => {
                write!(f, "cannot convert {from} to {to}")
            }
        }
    }
}

impl std::error::Error for StackItemError {}

impl StackItemError {
    #[must_use]
    pub(crate) fn unsupported(from: StackItemType, to: CoercionTarget) -> Self {
        Self::UnsupportedCoercion { from, to }
    }
}

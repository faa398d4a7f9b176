//! Stack item value model.
//!
//! [`StackItem`] is a closed enum: adding a variant forces every coercion below to say
//! how it behaves. The contract shared by all variants is:
//!
//! | Operation       | Integer                | ByteString          | InteropInterface | Pointer     |
//! |-----------------|------------------------|---------------------|------------------|-------------|
//! | `equals`        | numeric, else by bytes | byte strings only   | wrapped object   | position    |
//! | `to_boolean`    | non-zero               | any non-zero byte   | non-null         | always true |
//! | `byte_sequence` | two's complement LE    | itself              | unsupported      | unsupported |
//! | `big_integer`   | value                  | unsupported         | unsupported      | unsupported |
//!
//! Equality never fails. A comparison that would need an unsupported coercion is simply
//! false.

mod byte_string;
mod integer;
mod interop;
mod pointer;

use std::borrow::Cow;

use num_bigint::BigInt;

pub use self::{
    byte_string::ByteString,
    integer::Integer,
    interop::{InteropInterface, InteropObject},
    pointer::Pointer,
};
use crate::error::{CoercionTarget, StackItemError};

/// Discriminant of a [`StackItem`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum StackItemType {
    Integer,
    ByteString,
    InteropInterface,
    Pointer,
}

/// A value on the VM's operand stack.
#[derive(Debug, Clone)]
pub enum StackItem {
    Integer(Integer),
    ByteString(ByteString),
    InteropInterface(InteropInterface),
    Pointer(Pointer),
}

impl StackItem {
    #[must_use]
    pub fn item_type(&self) -> StackItemType {
        match self {
            Self::Integer(_) => StackItemType::Integer,
            Self::ByteString(_) => StackItemType::ByteString,
            Self::InteropInterface(_) => StackItemType::InteropInterface,
            Self::Pointer(_) => StackItemType::Pointer,
        }
    }

    /// Script-level equality.
    ///
    /// Reflexive and total, but not necessarily symmetric across variants: only
    /// `Integer` falls back to comparing canonical bytes, so `Integer(1).equals(bytes[1])`
    /// holds while `bytes[1].equals(Integer(1))` does not.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match self {
            Self::Integer(i) => i.equals(other),
            Self::ByteString(b) => matches!(other, Self::ByteString(o) if b == o),
            Self::InteropInterface(i) => i.equals(other),
            Self::Pointer(p) => matches!(other, Self::Pointer(o) if p == o),
        }
    }

    /// Truthiness coercion. Never fails.
    #[must_use]
    pub fn to_boolean(&self) -> bool {
        match self {
            Self::Integer(i) => i.to_boolean(),
            Self::ByteString(b) => b.to_boolean(),
            Self::InteropInterface(i) => i.to_boolean(),
            Self::Pointer(_) => true,
        }
    }

    /// Canonical byte encoding.
    ///
    /// Borrowed for byte strings, freshly encoded for integers.
    pub fn byte_sequence(&self) -> Result<Cow<'_, [u8]>, StackItemError> {
        match self {
            Self::Integer(i) => Ok(Cow::Owned(i.to_bytes())),
            Self::ByteString(b) => Ok(Cow::Borrowed(b.as_bytes())),
            Self::InteropInterface(_) | Self::Pointer(_) => Err(StackItemError::unsupported(
                self.item_type(),
                CoercionTarget::ByteString,
            )),
        }
    }

    /// Numeric value. Only integers have one.
    pub fn big_integer(&self) -> Result<&BigInt, StackItemError> {
        match self {
            Self::Integer(i) => Ok(i.value()),
            Self::ByteString(_) | Self::InteropInterface(_) | Self::Pointer(_) => Err(
                StackItemError::unsupported(self.item_type(), CoercionTarget::Integer),
            ),
        }
    }

    /// Length of the canonical byte encoding.
    pub fn byte_length(&self) -> Result<usize, StackItemError> {
        match self {
            Self::Integer(i) => Ok(i.byte_length()),
            Self::ByteString(b) => Ok(b.len()),
            Self::InteropInterface(_) | Self::Pointer(_) => Err(StackItemError::unsupported(
                self.item_type(),
                CoercionTarget::ByteString,
            )),
        }
    }
}

impl From<Integer> for StackItem {
    fn from(value: Integer) -> Self {
        Self::Integer(value)
    }
}

impl From<BigInt> for StackItem {
    fn from(value: BigInt) -> Self {
        Self::Integer(Integer::new(value))
    }
}

impl From<ByteString> for StackItem {
    fn from(value: ByteString) -> Self {
        Self::ByteString(value)
    }
}

impl From<InteropInterface> for StackItem {
    fn from(value: InteropInterface) -> Self {
        Self::InteropInterface(value)
    }
}

impl From<Pointer> for StackItem {
    fn from(value: Pointer) -> Self {
        Self::Pointer(value)
    }
}

use std::fmt;

/// Code offset used as a call or jump target.
///
/// Equality and hashing look at the position only; two pointers with the same position
/// are equal whichever script produced them. Pointers are not data and have no byte
/// encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pointer {
    position: u32,
}

impl Pointer {
    /// Creates a pointer to `position`.
    #[must_use]
    pub fn new(position: u32) -> Self {
        Self { position }
    }

    /// Instruction offset this pointer refers to.
    #[must_use]
    pub fn position(self) -> u32 {
        self.position
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{}", self.position)
    }
}

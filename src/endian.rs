//! Byte order of fixed-width numeric fields.

/// Byte order selected by `<`, `>` or `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Least significant byte first (default at the start of every call).
    #[default]
    Little,
    /// Most significant byte first.
    Big,
    /// Byte order of the host.
    Native,
}

impl Endianness {
    /// Maps `Native` to the host byte order.
    #[inline]
    pub fn resolve(self) -> Self {
        match self {
            Self::Native if cfg!(target_endian = "big") => Self::Big,
            Self::Native => Self::Little,
            other => other,
        }
    }

    #[inline]
    pub fn is_little(self) -> bool {
        self.resolve() == Self::Little
    }

    /// The opcode character selecting this byte order.
    pub fn opcode(self) -> char {
        match self {
            Self::Little => '<',
            Self::Big => '>',
            Self::Native => '=',
        }
    }
}

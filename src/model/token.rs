//! Identity tokens for registered type elements.
//!
//! Every [`crate::model::TypeElement`] stored in a [`crate::model::TypeRegistry`] is addressed
//! by a [`TypeToken`]. The token is a plain 32-bit value:
//! - The high byte (bits 24-31) encodes the [`TypeElementKind`]
//! - The low 24 bits (bits 0-23) hold the registration row
//!
//! Tokens are cheap to copy and compare, which keeps [`crate::model::TypeMirror`] values small
//! and lets subtype walks use them as visited-set keys.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::model::TypeElementKind;

/// A token referencing a registered type element.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeToken(pub u32);

impl TypeToken {
    /// Creates a new token from a raw 32-bit value
    #[must_use]
    pub fn new(value: u32) -> Self {
        TypeToken(value)
    }

    /// Creates a token from an element kind and a registration row
    #[must_use]
    pub fn from_parts(kind: TypeElementKind, row: u32) -> Self {
        TypeToken(((kind as u32) << 24) | (row & 0x00FF_FFFF))
    }

    /// Returns the raw token value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Extracts the element kind from the token (high byte)
    #[must_use]
    pub fn kind(&self) -> Option<TypeElementKind> {
        TypeElementKind::from_repr((self.0 >> 24) as u8)
    }

    /// Extracts the registration row from the token (low 24 bits)
    #[must_use]
    pub fn row(&self) -> u32 {
        self.0 & 0x00FF_FFFF
    }

    /// Returns true if this is a null token (value 0)
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for TypeToken {
    fn from(value: u32) -> Self {
        TypeToken(value)
    }
}

impl From<TypeToken> for u32 {
    fn from(token: TypeToken) -> Self {
        token.0
    }
}

impl fmt::Debug for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TypeToken(0x{:08x}, kind: 0x{:02x}, row: {})",
            self.0,
            self.0 >> 24,
            self.row()
        )
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl Hash for TypeToken {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

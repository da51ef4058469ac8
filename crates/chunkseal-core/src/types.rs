use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ChunksealError, ChunksealResult};

/// Supported RSA modulus sizes.
///
/// The set is closed: an arbitrary bit length only becomes a `KeySizeClass`
/// through [`KeySizeClass::from_bits`], which rejects anything else.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum KeySizeClass {
    Bits1024,
    #[default]
    Bits2048,
    Bits3072,
    Bits4096,
}

impl KeySizeClass {
    pub const ALL: [KeySizeClass; 4] = [
        KeySizeClass::Bits1024,
        KeySizeClass::Bits2048,
        KeySizeClass::Bits3072,
        KeySizeClass::Bits4096,
    ];

    pub fn from_bits(bits: usize) -> ChunksealResult<Self> {
        match bits {
            1024 => Ok(Self::Bits1024),
            2048 => Ok(Self::Bits2048),
            3072 => Ok(Self::Bits3072),
            4096 => Ok(Self::Bits4096),
            other => Err(ChunksealError::UnsupportedKeySize { bits: other }),
        }
    }

    pub const fn bits(self) -> usize {
        match self {
            Self::Bits1024 => 1024,
            Self::Bits2048 => 2048,
            Self::Bits3072 => 3072,
            Self::Bits4096 => 4096,
        }
    }

    /// Modulus length in bytes
    pub const fn modulus_bytes(self) -> usize {
        self.bits() / 8
    }
}

impl TryFrom<usize> for KeySizeClass {
    type Error = ChunksealError;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        Self::from_bits(bits)
    }
}

impl From<KeySizeClass> for usize {
    fn from(class: KeySizeClass) -> usize {
        class.bits()
    }
}

impl fmt::Display for KeySizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

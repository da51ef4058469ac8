//! Static size table: key size class → (max plaintext chunk, ciphertext block)
//!
//! OAEP with SHA-256 consumes `2 * 32 + 2` bytes of every block, so a key with
//! a `k`-byte modulus encrypts at most `k - 66` bytes per call:
//! ```text
//! class   block   max chunk
//! 1024    128     62
//! 2048    256     190
//! 3072    384     318
//! 4096    512     446
//! ```

use chunkseal_core::{ChunksealResult, KeySizeClass};

/// SHA-256 digest length, the OAEP hash and MGF1 hash
pub const OAEP_HASH_BYTES: usize = 32;

/// Bytes of every block consumed by OAEP padding
pub const OAEP_OVERHEAD_BYTES: usize = 2 * OAEP_HASH_BYTES + 2;

/// Chunk and block sizes for one key size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePolicyEntry {
    /// Maximum plaintext bytes per primitive call
    pub max_plain_chunk_bytes: usize,
    /// Exact length of one ciphertext block (the modulus length)
    pub cipher_block_bytes: usize,
}

impl SizePolicyEntry {
    /// Exact ciphertext length for a `plain_len`-byte message.
    ///
    /// An empty message still occupies one block.
    pub const fn ciphertext_len(&self, plain_len: usize) -> usize {
        let len = if plain_len == 0 { 1 } else { plain_len };
        len.div_ceil(self.max_plain_chunk_bytes) * self.cipher_block_bytes
    }
}

/// Lookup over the fixed size table.
pub struct SizePolicy;

impl SizePolicy {
    pub const fn lookup(class: KeySizeClass) -> SizePolicyEntry {
        match class {
            KeySizeClass::Bits1024 => SizePolicyEntry {
                max_plain_chunk_bytes: 62,
                cipher_block_bytes: 128,
            },
            KeySizeClass::Bits2048 => SizePolicyEntry {
                max_plain_chunk_bytes: 190,
                cipher_block_bytes: 256,
            },
            KeySizeClass::Bits3072 => SizePolicyEntry {
                max_plain_chunk_bytes: 318,
                cipher_block_bytes: 384,
            },
            KeySizeClass::Bits4096 => SizePolicyEntry {
                max_plain_chunk_bytes: 446,
                cipher_block_bytes: 512,
            },
        }
    }

    /// Validate a raw bit length and look it up.
    pub fn for_bits(bits: usize) -> ChunksealResult<SizePolicyEntry> {
        Ok(Self::lookup(KeySizeClass::from_bits(bits)?))
    }

    /// The whole table in ascending key size order.
    pub fn table() -> [(KeySizeClass, SizePolicyEntry); 4] {
        KeySizeClass::ALL.map(|class| (class, Self::lookup(class)))
    }
}

/// Maximum plaintext bytes encryptable in one call for a key of `bits` bits.
pub fn max_len(bits: usize) -> ChunksealResult<usize> {
    Ok(SizePolicy::for_bits(bits)?.max_plain_chunk_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chunkseal_core::ChunksealError;

    #[test]
    fn test_table_matches_oaep_formula() {
        for (class, entry) in SizePolicy::table() {
            assert_eq!(entry.cipher_block_bytes, class.bits() / 8);
            assert_eq!(
                entry.max_plain_chunk_bytes,
                entry.cipher_block_bytes - OAEP_OVERHEAD_BYTES,
                "{class}: chunk size must equal block - 2*hash - 2"
            );
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(max_len(1024).unwrap(), 62);
        assert_eq!(max_len(2048).unwrap(), 190);
        assert_eq!(max_len(3072).unwrap(), 318);
        assert_eq!(max_len(4096).unwrap(), 446);
    }

    #[test]
    fn test_unsupported_bits_rejected() {
        for bits in [276, 512, 2047, 8192] {
            let err = SizePolicy::for_bits(bits).unwrap_err();
            assert!(matches!(err, ChunksealError::UnsupportedKeySize { .. }));
        }
    }

    #[test]
    fn test_ciphertext_len() {
        let entry = SizePolicy::lookup(KeySizeClass::Bits2048);
        assert_eq!(entry.ciphertext_len(0), 256);
        assert_eq!(entry.ciphertext_len(1), 256);
        assert_eq!(entry.ciphertext_len(190), 256);
        assert_eq!(entry.ciphertext_len(191), 512);
        assert_eq!(entry.ciphertext_len(400), 768);
    }

    #[test]
    fn test_table_is_ordered() {
        let table = SizePolicy::table();
        for pair in table.windows(2) {
            assert!(pair[0].1.cipher_block_bytes < pair[1].1.cipher_block_bytes);
        }
    }
}

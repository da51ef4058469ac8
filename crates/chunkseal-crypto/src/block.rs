//! Single-block RSA-OAEP (SHA-256) encryption/decryption
//!
//! The codec only sees the traits below; `RsaPublicKey` / `RsaPrivateKey`
//! are the production implementations.

use rsa::{traits::PublicKeyParts, Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

use chunkseal_core::{ChunksealError, ChunksealResult, KeySizeClass};

use crate::policy::{SizePolicy, SizePolicyEntry};

/// A key handle that can report its modulus size.
pub trait SizedKey {
    /// Modulus length in bits
    fn key_bits(&self) -> usize;

    fn size_class(&self) -> ChunksealResult<KeySizeClass> {
        KeySizeClass::from_bits(self.key_bits())
    }

    fn size_policy(&self) -> ChunksealResult<SizePolicyEntry> {
        Ok(SizePolicy::lookup(self.size_class()?))
    }
}

/// Encrypt one chunk of at most `max_plain_chunk_bytes` into one block.
pub trait BlockEncrypt: SizedKey {
    fn encrypt_block(&self, chunk: &[u8]) -> ChunksealResult<Vec<u8>>;
}

/// Decrypt one `cipher_block_bytes` block back into its chunk.
pub trait BlockDecrypt: SizedKey {
    fn decrypt_block(&self, block: &[u8]) -> ChunksealResult<Vec<u8>>;
}

impl SizedKey for RsaPublicKey {
    fn key_bits(&self) -> usize {
        self.n().bits()
    }
}

impl SizedKey for RsaPrivateKey {
    fn key_bits(&self) -> usize {
        self.n().bits()
    }
}

impl BlockEncrypt for RsaPublicKey {
    fn encrypt_block(&self, chunk: &[u8]) -> ChunksealResult<Vec<u8>> {
        let policy = self.size_policy()?;
        if chunk.len() > policy.max_plain_chunk_bytes {
            return Err(ChunksealError::PlaintextTooLarge {
                len: chunk.len(),
                max: policy.max_plain_chunk_bytes,
            });
        }

        self.encrypt(&mut rand::thread_rng(), Oaep::new::<Sha256>(), chunk)
            .map_err(|e| match e {
                rsa::Error::MessageTooLong => ChunksealError::PlaintextTooLarge {
                    len: chunk.len(),
                    max: policy.max_plain_chunk_bytes,
                },
                other => ChunksealError::Key(format!("RSA-OAEP encryption failed: {other}")),
            })
    }
}

impl BlockDecrypt for RsaPrivateKey {
    fn decrypt_block(&self, block: &[u8]) -> ChunksealResult<Vec<u8>> {
        let policy = self.size_policy()?;
        if block.len() != policy.cipher_block_bytes {
            return Err(ChunksealError::DecryptionFailed);
        }

        // Any rejection (bad padding, wrong key, out-of-range integer) collapses
        // into the same error.
        self.decrypt_blinded(&mut rand::thread_rng(), Oaep::new::<Sha256>(), block)
            .map_err(|_| ChunksealError::DecryptionFailed)
    }
}

//! Chunked codec: messages of any length over a bounded block cipher
//!
//! Ciphertext format (binary):
//! ```text
//! [block 0][block 1]...[block n-1]      each block = cipher_block_bytes
//! ```
//! No header, no length markers: the block length follows from the key.
//!
//! Blocks are encrypted independently. Nothing binds a block to its position,
//! so reordering or duplicating blocks goes undetected; this layer provides
//! confidentiality only.

use rayon::prelude::*;
use tracing::debug;
use zeroize::Zeroizing;

use chunkseal_core::config::CodecConfig;
use chunkseal_core::{ChunksealError, ChunksealResult};

use crate::block::{BlockDecrypt, BlockEncrypt};
use crate::chunk;

/// Encrypts and decrypts whole messages, one block per chunk.
#[derive(Debug, Clone, Default)]
pub struct ChunkedCodec {
    config: CodecConfig,
}

impl ChunkedCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encrypt `plaintext` of any length under `public_key`.
    ///
    /// Output length is `ceil(max(len, 1) / max_plain_chunk_bytes) * cipher_block_bytes`.
    pub fn encrypt_long<K>(&self, public_key: &K, plaintext: &[u8]) -> ChunksealResult<Vec<u8>>
    where
        K: BlockEncrypt + Sync + ?Sized,
    {
        let policy = public_key.size_policy()?;
        let chunks = chunk::split(plaintext, policy.max_plain_chunk_bytes)?;

        let blocks = self.map_units(&chunks, |c| {
            let block = public_key.encrypt_block(c.data)?;
            if block.len() != policy.cipher_block_bytes {
                return Err(ChunksealError::Key(format!(
                    "chunk {}: cipher produced {} bytes, expected {}",
                    c.index,
                    block.len(),
                    policy.cipher_block_bytes
                )));
            }
            Ok(block)
        })?;

        debug!(
            key_bits = public_key.key_bits(),
            chunks = chunks.len(),
            bytes = plaintext.len(),
            "encrypted message"
        );

        Ok(chunk::join(blocks))
    }

    /// Decrypt a ciphertext produced by [`ChunkedCodec::encrypt_long`].
    ///
    /// Either every block decrypts and the full plaintext is returned, or
    /// nothing is.
    pub fn decrypt_long<K>(&self, private_key: &K, ciphertext: &[u8]) -> ChunksealResult<Vec<u8>>
    where
        K: BlockDecrypt + Sync + ?Sized,
    {
        let policy = private_key.size_policy()?;
        let block_len = policy.cipher_block_bytes;
        if ciphertext.is_empty() || ciphertext.len() % block_len != 0 {
            return Err(ChunksealError::MalformedCiphertext {
                len: ciphertext.len(),
                block: block_len,
            });
        }

        let blocks: Vec<&[u8]> = ciphertext.chunks_exact(block_len).collect();

        // Decrypted chunks are wiped when dropped, including the ones already
        // finished when a later block fails.
        let chunks = self.map_units(&blocks, |block| {
            private_key.decrypt_block(block).map(Zeroizing::new)
        })?;

        let plaintext = chunk::join(chunks.iter().map(|c| c.as_slice()));

        debug!(
            key_bits = private_key.key_bits(),
            chunks = blocks.len(),
            bytes = plaintext.len(),
            "decrypted message"
        );

        Ok(plaintext)
    }

    /// Apply `f` to every unit, in parallel when the message is large enough.
    /// Output order always matches input order.
    fn map_units<T, R, F>(&self, units: &[T], f: F) -> ChunksealResult<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> ChunksealResult<R> + Sync + Send,
    {
        if self.config.parallel && units.len() >= self.config.parallel_min_chunks.max(2) {
            units.par_iter().map(f).collect()
        } else {
            units.iter().map(f).collect()
        }
    }
}

/// Encrypt with the default codec configuration.
pub fn encrypt_long<K>(public_key: &K, plaintext: &[u8]) -> ChunksealResult<Vec<u8>>
where
    K: BlockEncrypt + Sync + ?Sized,
{
    ChunkedCodec::default().encrypt_long(public_key, plaintext)
}

/// Decrypt with the default codec configuration.
pub fn decrypt_long<K>(private_key: &K, ciphertext: &[u8]) -> ChunksealResult<Vec<u8>>
where
    K: BlockDecrypt + Sync + ?Sized,
{
    ChunkedCodec::default().decrypt_long(private_key, ciphertext)
}

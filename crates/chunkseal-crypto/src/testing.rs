//! Test fixtures: cached RSA keypairs and a fast stand-in block cipher.

use std::sync::OnceLock;

use chunkseal_core::{ChunksealError, ChunksealResult, KeySizeClass};

use crate::block::{BlockDecrypt, BlockEncrypt, SizedKey};
use crate::keys::{generate_keypair, KeyPair};

static KEYPAIRS: [OnceLock<KeyPair>; 4] = [
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
    OnceLock::new(),
];

/// One keypair per size class, generated on first use and shared by all tests.
pub fn rsa_keypair(class: KeySizeClass) -> &'static KeyPair {
    let slot = match class {
        KeySizeClass::Bits1024 => &KEYPAIRS[0],
        KeySizeClass::Bits2048 => &KEYPAIRS[1],
        KeySizeClass::Bits3072 => &KEYPAIRS[2],
        KeySizeClass::Bits4096 => &KEYPAIRS[3],
    };
    slot.get_or_init(|| generate_keypair(class).unwrap())
}

/// A block "cipher" with the same size contract as RSA-OAEP.
///
/// Block layout before masking: `[2-byte BE length][chunk][zero fill]`,
/// every byte XORed with `mask`. Keys with different masks reject each
/// other's blocks.
#[derive(Debug, Clone, Copy)]
pub struct FakeKey {
    pub bits: usize,
    pub mask: u8,
}

impl FakeKey {
    pub fn new(bits: usize) -> Self {
        Self { bits, mask: 0x5C }
    }
}

impl SizedKey for FakeKey {
    fn key_bits(&self) -> usize {
        self.bits
    }
}

impl BlockEncrypt for FakeKey {
    fn encrypt_block(&self, chunk: &[u8]) -> ChunksealResult<Vec<u8>> {
        let policy = self.size_policy()?;
        if chunk.len() > policy.max_plain_chunk_bytes {
            return Err(ChunksealError::PlaintextTooLarge {
                len: chunk.len(),
                max: policy.max_plain_chunk_bytes,
            });
        }

        let mut block = vec![0u8; policy.cipher_block_bytes];
        block[..2].copy_from_slice(&(chunk.len() as u16).to_be_bytes());
        block[2..2 + chunk.len()].copy_from_slice(chunk);
        block.iter_mut().for_each(|b| *b ^= self.mask);
        Ok(block)
    }
}

impl BlockDecrypt for FakeKey {
    fn decrypt_block(&self, block: &[u8]) -> ChunksealResult<Vec<u8>> {
        let policy = self.size_policy()?;
        if block.len() != policy.cipher_block_bytes {
            return Err(ChunksealError::DecryptionFailed);
        }

        let clear: Vec<u8> = block.iter().map(|b| b ^ self.mask).collect();
        let len = u16::from_be_bytes([clear[0], clear[1]]) as usize;
        if len > policy.max_plain_chunk_bytes || clear[2 + len..].iter().any(|&b| b != 0) {
            return Err(ChunksealError::DecryptionFailed);
        }
        Ok(clear[2..2 + len].to_vec())
    }
}

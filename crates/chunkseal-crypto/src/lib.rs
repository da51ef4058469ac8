//! chunkseal-crypto: RSA-OAEP encryption for messages of any length
//!
//! Architecture: Chunk-then-Encrypt, one RSA block per chunk
//!
//! Pipeline: plaintext → size policy lookup → fixed-size chunks → RSA-OAEP(SHA-256) per chunk → concatenate
//!
//! ```text
//! key size class ── SizePolicy ──> (max_plain_chunk_bytes, cipher_block_bytes)
//!   encrypt: split(plaintext, max_plain_chunk_bytes) → encrypt_block × n → join
//!   decrypt: chunks_exact(ciphertext, cipher_block_bytes) → decrypt_block × n → join
//! ```

pub mod block;
pub mod chunk;
pub mod codec;
pub mod keys;
pub mod policy;

#[cfg(test)]
pub(crate) mod testing;

pub use block::{BlockDecrypt, BlockEncrypt, SizedKey};
pub use chunk::{join, split, PlaintextChunk};
pub use codec::{decrypt_long, encrypt_long, ChunkedCodec};
pub use keys::{
    generate_keypair, load_private_key, load_public_key, save_private_key, save_public_key,
    KeyPair,
};
pub use policy::{max_len, SizePolicy, SizePolicyEntry};

pub use rsa::{RsaPrivateKey, RsaPublicKey};

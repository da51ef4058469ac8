use thiserror::Error;

pub type ChunksealResult<T> = Result<T, ChunksealError>;

#[derive(Debug, Error)]
pub enum ChunksealError {
    #[error("unsupported key size: {bits} bits (supported: 1024, 2048, 3072, 4096)")]
    UnsupportedKeySize { bits: usize },

    #[error("plaintext chunk too large: {len} bytes (maximum {max})")]
    PlaintextTooLarge { len: usize, max: usize },

    // Same error for wrong key, corrupted block and bad padding.
    #[error("decryption failed")]
    DecryptionFailed,

    #[error("malformed ciphertext: {len} bytes is not a positive multiple of the {block}-byte block")]
    MalformedCiphertext { len: usize, block: usize },

    #[error("invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(usize),

    #[error("key error: {0}")]
    Key(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

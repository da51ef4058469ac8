//! Fixed-size plaintext chunking
//!
//! `split` cuts a message into ordered, non-overlapping chunks of at most
//! `max_chunk_len` bytes; `join` concatenates them back in index order.
//!
//! An empty message yields exactly one empty chunk, so every message
//! (including the empty one) encrypts to at least one block.

use chunkseal_core::{ChunksealError, ChunksealResult};

/// A borrowed slice of the original message and its position within it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaintextChunk<'a> {
    /// Zero-based ordinal of this chunk within the message
    pub index: usize,
    pub data: &'a [u8],
}

impl PlaintextChunk<'_> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Split `bytes` into chunks of `max_chunk_len` bytes; the last chunk may be shorter.
pub fn split(bytes: &[u8], max_chunk_len: usize) -> ChunksealResult<Vec<PlaintextChunk<'_>>> {
    if max_chunk_len == 0 {
        return Err(ChunksealError::InvalidChunkSize(max_chunk_len));
    }

    if bytes.is_empty() {
        return Ok(vec![PlaintextChunk {
            index: 0,
            data: bytes,
        }]);
    }

    Ok(bytes
        .chunks(max_chunk_len)
        .enumerate()
        .map(|(index, data)| PlaintextChunk { index, data })
        .collect())
}

/// Number of chunks `split` produces for a message of `len` bytes.
pub fn chunk_count(len: usize, max_chunk_len: usize) -> ChunksealResult<usize> {
    if max_chunk_len == 0 {
        return Err(ChunksealError::InvalidChunkSize(max_chunk_len));
    }
    Ok(len.max(1).div_ceil(max_chunk_len))
}

/// Concatenate chunks in sequence order.
pub fn join<I, T>(chunks: I) -> Vec<u8>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    chunks.into_iter().fold(Vec::new(), |mut out, chunk| {
        out.extend_from_slice(chunk.as_ref());
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_yields_one_empty_chunk() {
        let chunks = split(&[], 190).unwrap();
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].is_empty());
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = split(b"abc", 0).unwrap_err();
        assert!(matches!(err, ChunksealError::InvalidChunkSize(0)));
    }

    #[test]
    fn last_chunk_holds_remainder() {
        let data = vec![7u8; 400];
        let chunks = split(&data, 190).unwrap();
        let lengths: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(lengths, vec![190, 190, 20]);
    }

    #[test]
    fn exact_multiple_has_full_last_chunk() {
        let data = vec![1u8; 380];
        let chunks = split(&data, 190).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].len(), 190);
    }

    #[test]
    fn indices_are_sequential() {
        let data: Vec<u8> = (0u8..=255).collect();
        let chunks = split(&data, 10).unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn join_accepts_owned_buffers() {
        let parts = vec![b"ab".to_vec(), Vec::new(), b"cd".to_vec()];
        assert_eq!(join(parts), b"abcd");
    }

    proptest! {
        /// join(split(b, n)) == b
        #[test]
        fn split_join_reconstructs(
            data in proptest::collection::vec(any::<u8>(), 0..=4096),
            n in 1usize..=600,
        ) {
            let chunks = split(&data, n).unwrap();
            let joined = join(chunks.iter().map(|c| c.data));
            prop_assert_eq!(joined, data);
        }

        /// Every chunk except the last is full; none exceed the bound
        #[test]
        fn chunk_lengths_bounded(
            data in proptest::collection::vec(any::<u8>(), 1..=4096),
            n in 1usize..=600,
        ) {
            let chunks = split(&data, n).unwrap();
            prop_assert_eq!(chunks.len(), chunk_count(data.len(), n).unwrap());
            let (last, full) = chunks.split_last().unwrap();
            for chunk in full {
                prop_assert_eq!(chunk.len(), n);
            }
            prop_assert!(!last.is_empty() && last.len() <= n);
        }
    }
}

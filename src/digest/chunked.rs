use std::fmt::Debug;

use byteorder::{BigEndian, ByteOrder};

use super::{Digest, DigestAlgorithm};

/// Fixed-size block fed to a compression function.
pub trait Chunk: AsMut<[u8]> + AsRef<[u8]> + Debug + Clone + PartialEq + Eq {
    const LEN: usize;

    fn new() -> Self;
}

/// A compression function over whole blocks. Buffering, padding and length
/// encoding are left to `ChunkedDigestWrapper`.
pub trait ChunkedDigestAlgorithm: Clone {
    type Chunk: Chunk;
    type Digest: Digest;

    fn new() -> Self;
    /// `chunk` is always exactly `Self::Chunk::LEN` bytes.
    fn update_chunk(&mut self, chunk: &[u8]);
    fn digest(&self) -> Self::Digest;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedDigestWrapper<Inner: ChunkedDigestAlgorithm> {
    // Hash state
    inner: Inner,
    // Message length (in bits)
    ml: u64,
    // In-progress chunk
    buffer_len: usize,
    buffer: Inner::Chunk
}

impl<Inner: ChunkedDigestAlgorithm> ChunkedDigestWrapper<Inner> {
    /// Number of message bytes fed so far.
    pub fn message_len(&self) -> u64 {
        self.ml / 8
    }

    /// Number of bytes waiting in the partial block.
    pub fn buffered_len(&self) -> usize {
        self.buffer_len
    }
}

impl<Inner: ChunkedDigestAlgorithm> Default for ChunkedDigestWrapper<Inner> {
    fn default() -> Self {
        <Self as DigestAlgorithm>::new()
    }
}

impl<Inner: ChunkedDigestAlgorithm> DigestAlgorithm for ChunkedDigestWrapper<Inner> {
    type Digest = Inner::Digest;

    fn new() -> Self {
        ChunkedDigestWrapper {
            inner: Inner::new(),
            ml: 0,
            buffer_len: 0,
            buffer: Inner::Chunk::new()
        }
    }

    fn update(&mut self, mut input: &[u8]) {
        // Length is kept modulo 2^64 bits
        self.ml = self.ml.wrapping_add((input.len() as u64).wrapping_mul(8));

        let buffer_len = self.buffer_len;
        let chunk_len = Inner::Chunk::LEN;
        let buffer = self.buffer.as_mut();

        // If buffer is already partially filled
        if buffer_len > 0 {
            let remaining = chunk_len - buffer_len;
            // If input is not long enough to fill remaining space in buffer
            if input.len() < remaining {
                // Copy the whole input into the buffer and return
                buffer[buffer_len..buffer_len + input.len()].copy_from_slice(input);
                self.buffer_len += input.len();
                return;
            } else {
                // Fill the remaining space with input data and process the chunk
                buffer[buffer_len..].copy_from_slice(&input[..remaining]);
                input = &input[remaining..];
                self.inner.update_chunk(buffer);
            }
        }

        // Buffer is empty at this point, so can directly read chunks from input
        let mut blocks = input.chunks_exact(chunk_len);
        for block in &mut blocks {
            self.inner.update_chunk(block);
        }

        // Partially fill the buffer with any left-over input
        let rest = blocks.remainder();
        buffer[..rest.len()].copy_from_slice(rest);
        self.buffer_len = rest.len();
    }

    fn reset(&mut self) {
        *self = <Self as DigestAlgorithm>::new();
    }

    fn finalize(&self) -> Self::Digest {
        // Padding happens on copies so the running state can keep going
        let mut inner = self.inner.clone();
        let mut chunk = self.buffer.clone();
        let chunk_len = Inner::Chunk::LEN;
        let buffer = chunk.as_mut();
        let mut buffer_len = self.buffer_len;

        // Append 1 bit
        buffer[buffer_len] = 0x80;
        buffer_len += 1;

        // Ensure there's room to write the message length
        if buffer_len + 8 > chunk_len {
            buffer[buffer_len..].fill(0);
            buffer_len = 0;
            inner.update_chunk(buffer);
        }

        // Fill remaining space with zeros followed by the message length
        buffer[buffer_len..chunk_len - 8].fill(0);
        BigEndian::write_u64(&mut buffer[chunk_len - 8..], self.ml);
        // Final chunk computation
        inner.update_chunk(buffer);
        inner.digest()
    }
}

use byteorder::{BigEndian, ByteOrder};

use super::chunked::{ChunkedDigestAlgorithm, ChunkedDigestWrapper};

/// Size of a SHA-1 digest in bytes.
pub const DIGEST_LEN: usize = 20;
/// Size of a SHA-1 block in bytes.
pub const BLOCK_LEN: usize = 64;

const INITIAL_STATE: [u32; 5] = [
    0x67452301,
    0xEFCDAB89,
    0x98BADCFE,
    0x10325476,
    0xC3D2E1F0
];

// Round constants
const K: [u32; 4] = [0x5A827999, 0x6ED9EBA1, 0x8F1BBCDC, 0xCA62C1D6];

define_digest!(SHA1Digest, DIGEST_LEN);
define_chunk!(SHA1Chunk, BLOCK_LEN);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SHA1Chunked {
    h: [u32; 5],
}

impl ChunkedDigestAlgorithm for SHA1Chunked {
    type Digest = SHA1Digest;
    type Chunk = SHA1Chunk;

    fn new() -> Self {
        SHA1Chunked {
            h: INITIAL_STATE
        }
    }

    fn update_chunk(&mut self, chunk: &[u8]) {
        // Compute 80 words
        let mut w = [0; 80];
        BigEndian::read_u32_into(&chunk[..BLOCK_LEN], &mut w[..16]);
        for i in 16..80 {
            w[i] = (w[i-3] ^ w[i-8] ^ w[i-14] ^ w[i-16]).rotate_left(1);
        }

        // Copy hash state
        let mut h = self.h;

        // Bitwise functions
        let choose   = |x: u32, y: u32, z: u32| (x & y) | (!x & z);
        let parity   = |x: u32, y: u32, z: u32| x ^ y ^ z;
        let majority = |x: u32, y: u32, z: u32| (x & y) | (y & z) | (x & z);

        for (i, &word) in w.iter().enumerate() {
            let f = match i {
                 0..=19 =>   choose(h[1], h[2], h[3]),
                20..=39 =>   parity(h[1], h[2], h[3]),
                40..=59 => majority(h[1], h[2], h[3]),
                      _ =>   parity(h[1], h[2], h[3]),
            };
            let temp = h[0].rotate_left(5)
                .wrapping_add(f)
                .wrapping_add(h[4])
                .wrapping_add(K[i / 20])
                .wrapping_add(word);

            h.copy_within(0..4, 1);
            h[2] = h[2].rotate_left(30);
            h[0] = temp;
        }

        // Update hash state
        for (acc, v) in self.h.iter_mut().zip(h) {
            *acc = acc.wrapping_add(v);
        }
    }

    fn digest(&self) -> Self::Digest {
        let mut result = [0; DIGEST_LEN];
        BigEndian::write_u32_into(&self.h, &mut result);
        SHA1Digest(result)
    }
}

pub type SHA1 = ChunkedDigestWrapper<SHA1Chunked>;

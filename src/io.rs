use std::io::{ErrorKind, Read};

use crate::digest::sha1::SHA1;
use crate::digest::DigestAlgorithm;

const BUFFER_LEN: usize = 8192;

/// Hashes everything that is read through it.
pub struct HashingReader<R: Read, H: DigestAlgorithm = SHA1> {
    reader: R,
    hasher: H,
    nread: u64,
}

impl<R: Read, H: DigestAlgorithm> HashingReader<R, H> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            hasher: H::new(),
            nread: 0,
        }
    }

    /// Reads the rest of the input, discarding it. Interrupted reads are
    /// retried.
    pub fn consume(&mut self) -> Result<(), std::io::Error> {
        let mut buf = [0_u8; BUFFER_LEN];
        loop {
            match self.read(&mut buf[..]) {
                Ok(0) => return Ok(()),
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Drains the reader and returns the digest with the number of bytes
    /// hashed.
    pub fn digest(mut self) -> Result<(H::Digest, u64), std::io::Error> {
        self.consume()?;
        Ok((self.hasher.digest(), self.nread))
    }

    pub fn nread(&self) -> u64 {
        self.nread
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read, H: DigestAlgorithm> Read for HashingReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, std::io::Error> {
        let n = self.reader.read(buf)?;
        self.nread += n as u64;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

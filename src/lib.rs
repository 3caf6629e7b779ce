#[cfg(test)]
macro_rules! base16 {
    ($hex:expr) => (&::hex::decode($hex).unwrap()[..]);
}

pub mod context;
pub mod digest;
pub mod error;
pub mod io;

pub use context::{Algorithm, ContextConfig, DigestContext};
pub use digest::sha1::{SHA1Digest, SHA1, DIGEST_LEN};
pub use digest::DigestAlgorithm;
pub use error::{Error, Result};
pub use io::HashingReader;

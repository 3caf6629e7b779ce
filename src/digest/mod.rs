use std::fmt::Debug;

#[macro_use]
pub mod macros;
pub mod chunked;
pub mod sha1;

pub trait Digest: Clone + AsRef<[u8]> + Into<Box<[u8]>> + Debug {}

pub trait DigestAlgorithm {
    type Digest: Digest;

    fn new() -> Self;
    fn update(&mut self, input: &[u8]);
    /// Returns the state to the one produced by `new`.
    fn reset(&mut self);
    /// Digest of everything fed so far. The running state is left as is, so
    /// more input may follow.
    fn finalize(&self) -> Self::Digest;

    fn digest(self) -> Self::Digest where Self: Sized {
        self.finalize()
    }

    fn compute(input: &[u8]) -> Self::Digest where Self: Sized {
        let mut state = Self::new();
        state.update(input);
        state.digest()
    }
}

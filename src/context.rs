use std::io;
use std::mem;

use log::{debug, error, trace};

use crate::digest::sha1::{SHA1Digest, DIGEST_LEN, SHA1};
use crate::digest::DigestAlgorithm;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Algorithm {
    #[default]
    Sha1,
}

/// Options accepted by `DigestContext::create`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextConfig {
    pub algorithm: Algorithm,
}

#[derive(Debug)]
enum State {
    Ready(Box<[SHA1; 1]>),
    Destroyed,
}

#[derive(Debug)]
pub struct DigestContext {
    state: State,
    config: ContextConfig,
}

impl DigestContext {
    /// Allocates a fresh context. `None` selects the default configuration.
    pub fn create(config: Option<&ContextConfig>) -> Result<Self> {
        let config = config.cloned().unwrap_or_default();
        let engine = match config.algorithm {
            Algorithm::Sha1 => try_box(SHA1::new())?,
        };
        debug!("created digest context ({:?})", config.algorithm);
        Ok(DigestContext {
            state: State::Ready(engine),
            config,
        })
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn is_destroyed(&self) -> bool {
        matches!(self.state, State::Destroyed)
    }

    /// Number of message bytes absorbed since creation or the last reset.
    pub fn message_len(&self) -> Result<u64> {
        Ok(self.engine("query")?.message_len())
    }

    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        self.engine_mut("update")?.update(data);
        Ok(())
    }

    /// Absorbs `leftover` and writes the digest of the whole message into
    /// `out`. The accumulated message is kept: a later `update` extends it,
    /// a `reset` starts over. Nothing is written to `out` on failure.
    pub fn finish(&mut self, leftover: &[u8], out: &mut [u8; DIGEST_LEN]) -> Result<()> {
        let digest = self.digest(leftover)?;
        out.copy_from_slice(digest.as_ref());
        Ok(())
    }

    /// Like `finish`, returning the digest by value.
    pub fn digest(&mut self, leftover: &[u8]) -> Result<SHA1Digest> {
        let engine = self.engine_mut("finish")?;
        engine.update(leftover);
        let digest = engine.finalize();
        trace!("finished digest over {} bytes: {}", engine.message_len(), digest);
        Ok(digest)
    }

    pub fn reset(&mut self) -> Result<()> {
        self.engine_mut("reset")?.reset();
        debug!("reset digest context");
        Ok(())
    }

    /// Releases the engine state. The context stays around only to report
    /// misuse.
    pub fn destroy(&mut self) -> Result<()> {
        self.engine("destroy")?;
        self.state = State::Destroyed;
        debug!("destroyed digest context");
        Ok(())
    }

    fn engine(&self, operation: &'static str) -> Result<&SHA1> {
        match &self.state {
            State::Ready(slot) => Ok(&slot[0]),
            State::Destroyed => Err(destroyed(operation)),
        }
    }

    fn engine_mut(&mut self, operation: &'static str) -> Result<&mut SHA1> {
        match &mut self.state {
            State::Ready(slot) => Ok(&mut slot[0]),
            State::Destroyed => Err(destroyed(operation)),
        }
    }
}

impl io::Write for DigestContext {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn destroyed(operation: &'static str) -> Error {
    error!("{} called on a destroyed digest context", operation);
    Error::InvalidState { operation }
}

// Heap allocation that reports exhaustion instead of aborting.
fn try_box<T>(value: T) -> Result<Box<[T; 1]>> {
    let size = mem::size_of::<T>();
    let mut slot = Vec::new();
    slot.try_reserve_exact(1).map_err(|e| {
        error!("failed to allocate {} bytes for digest context: {}", size, e);
        Error::Allocation { size }
    })?;
    slot.push(value);
    slot.into_boxed_slice()
        .try_into()
        .map_err(|_| Error::Allocation { size })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use proptest::prelude::*;

    use super::*;

    fn hash(data: &[u8]) -> SHA1Digest {
        let mut ctx = DigestContext::create(None).unwrap();
        ctx.update(data).unwrap();
        ctx.digest(&[]).unwrap()
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 + i / 7) as u8).collect()
    }

    #[test]
    fn known_vectors() {
        let mut out = [0; DIGEST_LEN];
        let mut ctx = DigestContext::create(None).unwrap();
        ctx.finish(&[], &mut out).unwrap();
        assert_eq!(&out[..], base16!("DA39A3EE5E6B4B0D3255BFEF95601890AFD80709"));

        ctx.reset().unwrap();
        ctx.finish(b"abc", &mut out).unwrap();
        assert_eq!(&out[..], base16!("A9993E364706816ABA3E25717850C26C9CD0D89D"));
    }

    #[test]
    fn engine_lives_in_fresh_heap_slot() {
        let slot = try_box(SHA1::new()).unwrap();
        assert_eq!(slot[0], SHA1::new());

        let ctx = DigestContext::create(None).unwrap();
        assert_eq!(ctx.engine("query").unwrap(), &SHA1::new());
    }

    #[test]
    fn create_with_config() {
        let config = ContextConfig { algorithm: Algorithm::Sha1 };
        let ctx = DigestContext::create(Some(&config)).unwrap();
        assert_eq!(ctx.config(), &ContextConfig::default());
        assert_eq!(ctx.message_len().unwrap(), 0);
    }

    #[test]
    fn leftover_equals_update() {
        let data = pattern(8192 + 100);
        let mut ctx = DigestContext::create(None).unwrap();
        ctx.update(&data[..8192]).unwrap();
        let via_leftover = ctx.digest(&data[8192..]).unwrap();
        assert_eq!(via_leftover, hash(&data));
    }

    #[test]
    fn reuse_after_reset() {
        let data = pattern(20_000);
        let mut ctx = DigestContext::create(None).unwrap();
        let mut first = [0; DIGEST_LEN];
        let mut second = [0; DIGEST_LEN];

        ctx.update(&data).unwrap();
        ctx.finish(&[], &mut first).unwrap();
        ctx.reset().unwrap();
        ctx.update(&data).unwrap();
        ctx.finish(&[], &mut second).unwrap();

        assert_eq!(first, second);
        ctx.destroy().unwrap();
    }

    #[test]
    fn reset_at_any_point() {
        let mut ctx = DigestContext::create(None).unwrap();
        ctx.reset().unwrap();
        ctx.update(b"partial message").unwrap();
        ctx.reset().unwrap();
        ctx.reset().unwrap();
        assert_eq!(ctx.message_len().unwrap(), 0);
        assert_eq!(ctx.digest(b"abc").unwrap(), hash(b"abc"));
    }

    #[test]
    fn update_after_finish_extends_message() {
        let mut ctx = DigestContext::create(None).unwrap();
        ctx.update(b"The quick brown fox ").unwrap();
        assert_eq!(ctx.digest(&[]).unwrap(), hash(b"The quick brown fox "));
        ctx.update(b"jumps over the lazy dog").unwrap();
        assert_eq!(
            ctx.digest(&[]).unwrap().to_string(),
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
        );
    }

    #[test]
    fn destroyed_context_rejects_everything() {
        let mut ctx = DigestContext::create(None).unwrap();
        ctx.update(b"abc").unwrap();
        ctx.destroy().unwrap();
        assert!(ctx.is_destroyed());

        let mut out = [0xee; DIGEST_LEN];
        assert_eq!(ctx.update(b"abc"), Err(Error::InvalidState { operation: "update" }));
        assert_eq!(ctx.finish(&[], &mut out), Err(Error::InvalidState { operation: "finish" }));
        assert_eq!(out, [0xee; DIGEST_LEN]);
        assert_eq!(ctx.reset(), Err(Error::InvalidState { operation: "reset" }));
        assert_eq!(ctx.destroy(), Err(Error::InvalidState { operation: "destroy" }));
        assert!(ctx.message_len().is_err());
        assert!(ctx.write_all(b"abc").is_err());
    }

    #[test]
    fn large_input_irregular_chunks() {
        let data = pattern(3 * 1024 * 1024 + 17);
        let expected = hash(&data);

        let mut ctx = DigestContext::create(None).unwrap();
        let sizes = [1, 7, 8192];
        let mut rest = &data[..];
        let mut i = 0;
        while !rest.is_empty() {
            let n = sizes[i % sizes.len()].min(rest.len());
            ctx.update(&rest[..n]).unwrap();
            rest = &rest[n..];
            i += 1;
        }
        assert_eq!(ctx.digest(&[]).unwrap(), expected);
    }

    #[test]
    fn io_copy_into_context() {
        let data = pattern(10_000);
        let mut ctx = DigestContext::create(None).unwrap();
        std::io::copy(&mut &data[..], &mut ctx).unwrap();
        assert_eq!(ctx.message_len().unwrap(), 10_000);
        assert_eq!(ctx.digest(&[]).unwrap(), hash(&data));
    }

    #[test]
    fn independent_contexts_across_threads() {
        let expected = hash(b"abc");
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| hash(b"abc")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    proptest! {
        #[test]
        fn chunking_invariance(
            data in proptest::collection::vec(any::<u8>(), 0..600),
            cuts in proptest::collection::vec(any::<usize>(), 0..12),
        ) {
            let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c % (data.len() + 1)).collect();
            cuts.sort_unstable();

            let mut ctx = DigestContext::create(None).unwrap();
            let mut start = 0;
            for cut in cuts {
                ctx.update(&data[start..cut]).unwrap();
                start = cut;
            }
            let chunked = ctx.digest(&data[start..]).unwrap();

            prop_assert_eq!(chunked, hash(&data));
        }

        #[test]
        fn reset_behaves_like_fresh(
            x in proptest::collection::vec(any::<u8>(), 0..300),
            y in proptest::collection::vec(any::<u8>(), 0..300),
        ) {
            let mut ctx = DigestContext::create(None).unwrap();
            ctx.update(&x).unwrap();
            ctx.digest(&[]).unwrap();
            ctx.reset().unwrap();
            ctx.update(&y).unwrap();

            prop_assert_eq!(ctx.digest(&[]).unwrap(), hash(&y));
        }
    }
}

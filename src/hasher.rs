use log::trace;

use crate::engine::Engine;
use crate::error::{Error, Result};

/// Lifecycle of a [`Hasher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing written since construction or the last reset.
    Empty,
    /// Input written, digest not yet finalized.
    Accumulating,
    /// `finalize` ran; only `sum`, `finalize` and `reset` are allowed.
    Finalized,
}

/// Hasher is a streaming hash context over a block [`Engine`].
#[derive(Clone)]
pub struct Hasher<E: Engine> {
    engine: E,
    size: usize,       // number of bytes in a hash output
    block_size: usize, // number of bytes in an input block, per compression

    state: E::State, // chaining state (from last compression, or IV)
    x: Vec<u8>,      // data written since last compression
    nx: usize,       // number of bytes buffered in x
    len: u64,        // total number of input bytes written overall

    phase: Phase,
    digest: Option<Vec<u8>>, // cached once finalized
}

impl<E: Engine> Hasher<E> {
    /// new returns a context computing `engine`'s digest.
    pub fn new(engine: E) -> Self {
        let block_size = engine.block_len();
        let mut h = Hasher {
            size: engine.output_len(),
            block_size,
            state: engine.init(),
            x: vec![0; block_size],
            nx: 0,
            len: 0,
            phase: Phase::Empty,
            digest: None,
            engine,
        };
        h.reset();
        h
    }

    /// digest hashes `data` in one call.
    pub fn digest(engine: E, data: &[u8]) -> Vec<u8> {
        let mut h = Self::new(engine);
        h.absorb(data);
        h.len = data.len() as u64;
        h.finalize()
    }

    /// reset restores the initial chaining state and drops buffered input.
    pub fn reset(&mut self) {
        self.state = self.engine.init();
        self.nx = 0;
        self.len = 0;
        self.phase = Phase::Empty;
        self.digest = None;
        if let Some(block) = self.engine.initial_block() {
            // Keyed engines absorb a prefix block that is not counted as input.
            self.absorb(&block);
        }
        trace!("hash context reset");
    }

    /// size returns the digest length in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// block_size returns the engine block length in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// phase returns the lifecycle state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// bytes_written returns the number of input bytes written since reset.
    pub fn bytes_written(&self) -> u64 {
        self.len
    }

    /// engine returns the compression engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// update writes `p` into the context and returns the number of bytes
    /// consumed.
    pub fn update(&mut self, p: &[u8]) -> Result<usize> {
        if self.phase == Phase::Finalized {
            return Err(Error::Finalized);
        }
        let nn = p.len() as u64;
        self.len = self.len.checked_add(nn).ok_or_else(|| {
            Error::Range(format!(
                "length overflow: already wrote {} bytes, trying to write {} bytes",
                self.len, nn
            ))
        })?;
        self.absorb(p);
        if nn > 0 {
            self.phase = Phase::Accumulating;
        }
        Ok(p.len())
    }

    /// sum returns the digest of everything written so far without
    /// disturbing the context, so writing can continue afterwards.
    pub fn sum(&self) -> Vec<u8> {
        if let Some(ref digest) = self.digest {
            return digest.clone();
        }
        self.engine
            .finalize(&self.state, &self.x[..self.nx], self.len)
    }

    /// finalize returns the digest and closes the context for writing until
    /// the next reset. Repeated calls return the same digest.
    pub fn finalize(&mut self) -> Vec<u8> {
        let digest = self.sum();
        self.digest = Some(digest.clone());
        self.phase = Phase::Finalized;
        digest
    }

    fn absorb(&mut self, mut p: &[u8]) {
        let bs = self.block_size;
        let lazy = self.engine.holds_last_block();

        if self.nx == bs {
            // a held-back block is only compressed once more input shows up
            if p.is_empty() {
                return;
            }
            self.state = self.engine.compress_block(&self.state, &self.x);
            self.nx = 0;
        }

        if self.nx > 0 {
            // continue with existing buffer, if nonempty
            let n = (bs - self.nx).min(p.len());
            self.x[self.nx..self.nx + n].copy_from_slice(&p[..n]);
            self.nx += n;
            p = &p[n..];
            if self.nx == bs && !(lazy && p.is_empty()) {
                self.state = self.engine.compress_block(&self.state, &self.x);
                self.nx = 0;
            }
        }

        if p.len() >= bs {
            // handle any remaining full input blocks straight from p
            let mut n = p.len() / bs * bs;
            if lazy && n == p.len() {
                n -= bs;
            }
            for block in p[..n].chunks_exact(bs) {
                self.state = self.engine.compress_block(&self.state, block);
            }
            p = &p[n..];
        }

        if !p.is_empty() {
            // handle any remaining input
            self.x[self.nx..self.nx + p.len()].copy_from_slice(p);
            self.nx += p.len();
        }
    }
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::blake2b::{Blake2b, Blake2bParams};
    use crate::md4::Md4;
    use crate::sha512::Sha512;
    use crate::testutil::shake_bytes;
    use crate::whirlpool::Whirlpool;
    use anyhow::Result;

    #[test]
    fn sequential_sums() -> Result<()> {
        let mut h = Hasher::new(Md4);
        h.update(b"a")?;
        assert_eq!(h.sum(), Hasher::digest(Md4, b"a"));
        h.update(b"b")?;
        assert_eq!(
            hex::encode(h.sum()),
            "ec388dd78999dfc7cf4632465693b6bf"
        );
        assert_eq!(h.sum(), Hasher::digest(Md4, b"ab"));
        Ok(())
    }

    #[test]
    fn finalize_is_idempotent() -> Result<()> {
        let mut h = Hasher::new(Md4);
        assert_eq!(h.phase(), Phase::Empty);
        h.update(b"abc")?;
        assert_eq!(h.phase(), Phase::Accumulating);
        let d1 = h.finalize();
        let d2 = h.finalize();
        assert_eq!(d1, d2);
        assert_eq!(h.sum(), d1);
        assert_eq!(h.phase(), Phase::Finalized);
        assert_eq!(h.update(b"d"), Err(Error::Finalized));
        assert_eq!(h.finalize(), d1);
        Ok(())
    }

    #[test]
    fn reset_equivalence() -> Result<()> {
        let x = shake_bytes("hasher reset x", 300);
        let y = shake_bytes("hasher reset y", 171);

        let mut h = Hasher::new(Sha512::sha512());
        h.update(&x)?;
        h.finalize();
        h.reset();
        assert_eq!(h.phase(), Phase::Empty);
        assert_eq!(h.bytes_written(), 0);
        h.update(&y)?;
        assert_eq!(h.sum(), Hasher::digest(Sha512::sha512(), &y));
        Ok(())
    }

    fn check_splits<E: Engine>(engine: E, input: &[u8]) -> Result<()> {
        let want = Hasher::digest(engine.clone(), input);
        for cut in 0..=input.len() {
            let mut h = Hasher::new(engine.clone());
            h.update(&input[..cut])?;
            h.update(&input[cut..])?;
            assert_eq!(h.sum(), want, "split at {} of {}", cut, input.len());
        }

        let mut h = Hasher::new(engine);
        for chunk in input.chunks(7) {
            h.update(chunk)?;
        }
        assert_eq!(h.finalize(), want);
        assert_eq!(h.bytes_written(), input.len() as u64);
        Ok(())
    }

    #[test]
    fn incremental_equivalence() -> Result<()> {
        let input = shake_bytes("hasher splits", 300);
        check_splits(Md4, &input)?;
        check_splits(Sha512::sha384(), &input)?;
        check_splits(Whirlpool, &input)?;
        check_splits(Blake2b::default(), &input)?;
        check_splits(Blake2bParams::new().key(b"secret").build()?, &input)?;
        check_splits(Blake2b::default(), &input[..256])?;
        check_splits(Blake2b::default(), &input[..128])?;
        Ok(())
    }

    #[test]
    fn empty_updates_keep_phase() -> Result<()> {
        let mut h = Hasher::new(Blake2b::default());
        assert_eq!(h.update(&[])?, 0);
        assert_eq!(h.phase(), Phase::Empty);
        assert_eq!(h.sum(), Hasher::digest(Blake2b::default(), &[]));
        Ok(())
    }

    #[test]
    fn sizes() {
        let h = Hasher::new(Sha512::sha512_256());
        assert_eq!(h.size(), 32);
        assert_eq!(h.block_size(), 128);
        let h = Hasher::new(Md4);
        assert_eq!(h.size(), 16);
        assert_eq!(h.block_size(), 64);
    }
}

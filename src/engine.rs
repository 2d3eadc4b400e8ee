use crate::error::{Error, Result};
use crate::pad::{pad_tail, Padding};

/// Engine represents a block compression function together with its chaining
/// state, padding and output encoding.
///
/// Engines are pure: `compress_block` takes the current chaining state and
/// returns the next one, and the caller commits it.
pub trait Engine: Clone {
    /// Chaining state carried between blocks.
    type State: Clone;

    /// block_len returns the number of bytes consumed per compression.
    fn block_len(&self) -> usize;
    /// output_len returns the digest length in bytes.
    fn output_len(&self) -> usize;
    /// init returns the initial chaining state.
    fn init(&self) -> Self::State;

    /// compress_block compresses one block. `block` must be exactly
    /// `block_len()` bytes; anything else is a caller bug and panics.
    fn compress_block(&self, state: &Self::State, block: &[u8]) -> Self::State;

    /// finalize pads `tail` (the bytes after the last compressed block),
    /// compresses what is left and encodes the digest. `total_len` counts
    /// every byte written, `tail` included.
    fn finalize(&self, state: &Self::State, tail: &[u8], total_len: u64) -> Vec<u8>;

    /// compress checks the block size before compressing.
    fn compress(&self, state: &Self::State, block: &[u8]) -> Result<Self::State> {
        if block.len() != self.block_len() {
            return Err(Error::size("block", self.block_len(), block.len()));
        }
        Ok(self.compress_block(state, block))
    }

    /// holds_last_block reports whether a full trailing block must wait for
    /// finalize instead of being compressed eagerly.
    fn holds_last_block(&self) -> bool {
        false
    }

    /// initial_block is written into a fresh context before any input.
    fn initial_block(&self) -> Option<Vec<u8>> {
        None
    }
}

/// Pads `tail` with `scheme` and folds the padded blocks into `state`.
pub(crate) fn absorb_padded<E: Engine>(
    engine: &E,
    scheme: Padding,
    state: &E::State,
    tail: &[u8],
    total_len: u64,
) -> E::State {
    pad_tail(scheme, tail, total_len)
        .chunks_exact(engine.block_len())
        .fold(state.clone(), |s, block| engine.compress_block(&s, block))
}

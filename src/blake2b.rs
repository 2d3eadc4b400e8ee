use crate::endian;
use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::hasher::Hasher;
use crate::pad::{pad_tail, Padding};
use crate::uint::U128;

/// Block size, in bytes, of BLAKE2b.
pub const BLOCK_SIZE: usize = 128;

/// Largest digest, in bytes.
pub const MAX_DIGEST_SIZE: usize = 64;

/// Largest key, in bytes.
pub const MAX_KEY_SIZE: usize = 64;

/// Exact size, in bytes, of a non-empty salt or personalization.
pub const SALT_SIZE: usize = 16;

const IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

const ROUNDS: usize = 12;

/// Blake2bParams configures a BLAKE2b instance. Setters only record values;
/// [`Blake2bParams::build`] validates them.
#[derive(Clone, PartialEq, Eq)]
pub struct Blake2bParams {
    digest_len: usize,
    key: Vec<u8>,
    salt: Vec<u8>,
    personal: Vec<u8>,
    fanout: u8,
    depth: u8,
    leaf_len: u32,
    node_offset: u64,
    node_depth: u8,
    inner_len: u8,
}

impl Default for Blake2bParams {
    fn default() -> Self {
        Blake2bParams {
            digest_len: MAX_DIGEST_SIZE,
            key: Vec::new(),
            salt: Vec::new(),
            personal: Vec::new(),
            fanout: 1,
            depth: 1,
            leaf_len: 0,
            node_offset: 0,
            node_depth: 0,
            inner_len: 0,
        }
    }
}

// Keys stay out of debug output.
impl std::fmt::Debug for Blake2bParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake2bParams")
            .field("digest_len", &self.digest_len)
            .field("key_len", &self.key.len())
            .field("salt", &self.salt)
            .field("personal", &self.personal)
            .field("fanout", &self.fanout)
            .field("depth", &self.depth)
            .field("leaf_len", &self.leaf_len)
            .field("node_offset", &self.node_offset)
            .field("node_depth", &self.node_depth)
            .field("inner_len", &self.inner_len)
            .finish()
    }
}

impl Blake2bParams {
    /// new returns the sequential-mode defaults: 64-byte digest, no key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Output length in bytes, 1 to 64.
    pub fn digest_len(mut self, n: usize) -> Self {
        self.digest_len = n;
        self
    }

    /// Secret key, at most 64 bytes. Empty means unkeyed.
    pub fn key(mut self, key: &[u8]) -> Self {
        self.key = key.to_vec();
        self
    }

    /// Salt, empty or 16 bytes.
    pub fn salt(mut self, salt: &[u8]) -> Self {
        self.salt = salt.to_vec();
        self
    }

    /// Personalization string, empty or 16 bytes.
    pub fn personal(mut self, personal: &[u8]) -> Self {
        self.personal = personal.to_vec();
        self
    }

    /// Tree fan-out, 0 for unlimited.
    pub fn fanout(mut self, fanout: u8) -> Self {
        self.fanout = fanout;
        self
    }

    /// Maximal tree depth.
    pub fn depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    /// Maximal leaf length in bytes.
    pub fn leaf_len(mut self, leaf_len: u32) -> Self {
        self.leaf_len = leaf_len;
        self
    }

    /// Offset of this node within its level.
    pub fn node_offset(mut self, node_offset: u64) -> Self {
        self.node_offset = node_offset;
        self
    }

    /// Depth of this node, 0 for leaves.
    pub fn node_depth(mut self, node_depth: u8) -> Self {
        self.node_depth = node_depth;
        self
    }

    /// Inner hash length in bytes.
    pub fn inner_len(mut self, inner_len: u8) -> Self {
        self.inner_len = inner_len;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.digest_len == 0 || self.digest_len > MAX_DIGEST_SIZE {
            return Err(Error::Range(format!(
                "digest size {} outside [1, {}]",
                self.digest_len, MAX_DIGEST_SIZE
            )));
        }
        if self.key.len() > MAX_KEY_SIZE {
            return Err(Error::size("key", MAX_KEY_SIZE, self.key.len()));
        }
        for (what, v) in [("salt", &self.salt), ("personalization", &self.personal)] {
            if !v.is_empty() && v.len() != SALT_SIZE {
                return Err(Error::size(what, SALT_SIZE, v.len()));
            }
        }
        Ok(())
    }

    /// to_bytes serializes the 64-byte parameter block. Lengths are taken
    /// modulo 256; call [`Blake2bParams::build`] to validate them first.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut p = [0u8; 64];
        p[0] = self.digest_len as u8;
        p[1] = self.key.len() as u8;
        p[2] = self.fanout;
        p[3] = self.depth;
        p[4..8].copy_from_slice(&self.leaf_len.to_le_bytes());
        p[8..16].copy_from_slice(&self.node_offset.to_le_bytes());
        p[16] = self.node_depth;
        p[17] = self.inner_len;
        let salt = &self.salt[..self.salt.len().min(SALT_SIZE)];
        let personal = &self.personal[..self.personal.len().min(SALT_SIZE)];
        p[32..32 + salt.len()].copy_from_slice(salt);
        p[48..48 + personal.len()].copy_from_slice(personal);
        p
    }

    /// build validates the parameters and returns the configured engine.
    pub fn build(self) -> Result<Blake2b> {
        self.validate()?;
        Ok(Blake2b::from_checked(self))
    }
}

/// BLAKE2b chaining state: hash words plus the 128-bit byte counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State {
    /// Hash words.
    pub h: [u64; 8],
    /// Bytes compressed so far, key block included.
    pub t: U128,
}

/// Blake2b is the BLAKE2b compression engine for one parameter set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blake2b {
    params: Blake2bParams,
    iv: [u64; 8],
}

impl Default for Blake2b {
    fn default() -> Self {
        Self::from_checked(Blake2bParams::new())
    }
}

impl Blake2b {
    fn from_checked(params: Blake2bParams) -> Self {
        let words: [u64; 8] = endian::read_u64_le(&params.to_bytes());
        let mut iv = IV;
        for (v, p) in iv.iter_mut().zip(words) {
            *v ^= p;
        }
        Blake2b { params, iv }
    }

    /// The parameters this engine was built from.
    pub fn params(&self) -> &Blake2bParams {
        &self.params
    }
}

#[inline(always)]
fn g(v: &mut [u64; 16], a: usize, b: usize, c: usize, d: usize, x: u64, y: u64) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(32);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(24);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(63);
}

/// compress mixes one block into `h`. `t` counts every byte hashed so far,
/// this block included.
fn compress(h: &[u64; 8], block: &[u8], t: U128, last: bool) -> [u64; 8] {
    let m: [u64; 16] = endian::read_u64_le(block);

    let mut v = [0u64; 16];
    v[..8].copy_from_slice(h);
    v[8..].copy_from_slice(&IV);
    v[12] ^= t.low_u64();
    v[13] ^= (t >> 64).low_u64();
    if last {
        v[14] = !v[14];
    }

    for round in 0..ROUNDS {
        let s = &SIGMA[round % 10];
        g(&mut v, 0, 4, 8, 12, m[s[0]], m[s[1]]);
        g(&mut v, 1, 5, 9, 13, m[s[2]], m[s[3]]);
        g(&mut v, 2, 6, 10, 14, m[s[4]], m[s[5]]);
        g(&mut v, 3, 7, 11, 15, m[s[6]], m[s[7]]);

        g(&mut v, 0, 5, 10, 15, m[s[8]], m[s[9]]);
        g(&mut v, 1, 6, 11, 12, m[s[10]], m[s[11]]);
        g(&mut v, 2, 7, 8, 13, m[s[12]], m[s[13]]);
        g(&mut v, 3, 4, 9, 14, m[s[14]], m[s[15]]);
    }

    let mut next = *h;
    for i in 0..8 {
        next[i] ^= v[i] ^ v[i + 8];
    }
    next
}

impl Engine for Blake2b {
    type State = State;

    fn block_len(&self) -> usize {
        BLOCK_SIZE
    }

    fn output_len(&self) -> usize {
        self.params.digest_len
    }

    fn init(&self) -> State {
        State {
            h: self.iv,
            t: U128::ZERO,
        }
    }

    fn compress_block(&self, state: &State, block: &[u8]) -> State {
        let t = state.t + U128::from(BLOCK_SIZE as u64);
        State {
            h: compress(&state.h, block, t, false),
            t,
        }
    }

    // The tail is the held-back last block: between 1 and 128 bytes, or
    // empty only for an unkeyed empty message.
    fn finalize(&self, state: &State, tail: &[u8], total_len: u64) -> Vec<u8> {
        let t = state.t + U128::from(tail.len() as u64);
        let block = pad_tail(Padding::BLAKE2B, tail, total_len);
        let h = compress(&state.h, &block, t, true);
        let mut out = endian::write_u64_le(&h);
        out.truncate(self.params.digest_len);
        out
    }

    fn holds_last_block(&self) -> bool {
        true
    }

    fn initial_block(&self) -> Option<Vec<u8>> {
        if self.params.key.is_empty() {
            return None;
        }
        let mut block = self.params.key.clone();
        block.resize(BLOCK_SIZE, 0);
        Some(block)
    }
}

/// new returns a streaming BLAKE2b context for `params`.
pub fn new(params: Blake2bParams) -> Result<Hasher<Blake2b>> {
    Ok(Hasher::new(params.build()?))
}

/// digest returns the unkeyed 64-byte BLAKE2b checksum of `data`.
pub fn digest(data: &[u8]) -> Vec<u8> {
    Hasher::digest(Blake2b::default(), data)
}

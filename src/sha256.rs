use crate::endian;
use crate::engine::{absorb_padded, Engine};
use crate::hasher::Hasher;
use crate::pad::Padding;

/// Block size, in bytes, of SHA-224 and SHA-256.
pub const BLOCK_SIZE: usize = 64;

const K: [u32; 64] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

const IV_224: [u32; 8] = [
    0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7, 0xbefa4fa4,
];

const IV_256: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Sha256 is the SHA-2 32-bit word engine, in its 224- or 256-bit variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sha256 {
    iv: [u32; 8],
    output_len: usize,
}

impl Sha256 {
    /// SHA-224: 28-byte output.
    pub fn sha224() -> Self {
        Sha256 {
            iv: IV_224,
            output_len: 28,
        }
    }

    /// SHA-256: 32-byte output.
    pub fn sha256() -> Self {
        Sha256 {
            iv: IV_256,
            output_len: 32,
        }
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::sha256()
    }
}

impl Engine for Sha256 {
    type State = [u32; 8];

    fn block_len(&self) -> usize {
        BLOCK_SIZE
    }

    fn output_len(&self) -> usize {
        self.output_len
    }

    fn init(&self) -> [u32; 8] {
        self.iv
    }

    fn compress_block(&self, state: &[u32; 8], block: &[u8]) -> [u32; 8] {
        let mut w = [0u32; 64];
        w[..16].copy_from_slice(&endian::read_u32_be::<16>(block));
        for t in 16..64 {
            w[t] = small_sigma1(w[t - 2])
                .wrapping_add(w[t - 7])
                .wrapping_add(small_sigma0(w[t - 15]))
                .wrapping_add(w[t - 16]);
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
        for t in 0..64 {
            let t1 = h
                .wrapping_add(big_sigma1(e))
                .wrapping_add(ch(e, f, g))
                .wrapping_add(K[t])
                .wrapping_add(w[t]);
            let t2 = big_sigma0(a).wrapping_add(maj(a, b, c));
            h = g;
            g = f;
            f = e;
            e = d.wrapping_add(t1);
            d = c;
            c = b;
            b = a;
            a = t1.wrapping_add(t2);
        }

        let mut next = *state;
        for (s, v) in next.iter_mut().zip([a, b, c, d, e, f, g, h]) {
            *s = s.wrapping_add(v);
        }
        next
    }

    fn finalize(&self, state: &[u32; 8], tail: &[u8], total_len: u64) -> Vec<u8> {
        let state = absorb_padded(self, Padding::SHA256, state, tail, total_len);
        let mut out = endian::write_u32_be(&state);
        out.truncate(self.output_len);
        out
    }
}

/// new_sha224 returns a streaming SHA-224 context.
pub fn new_sha224() -> Hasher<Sha256> {
    Hasher::new(Sha256::sha224())
}

/// new_sha256 returns a streaming SHA-256 context.
pub fn new_sha256() -> Hasher<Sha256> {
    Hasher::new(Sha256::sha256())
}

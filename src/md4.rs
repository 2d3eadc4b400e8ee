use crate::endian;
use crate::engine::{absorb_padded, Engine};
use crate::hasher::Hasher;
use crate::pad::Padding;

/// The size in bytes of an MD4 checksum.
pub const DIGEST_SIZE: usize = 16;

/// Block size, in bytes, of MD4.
pub const BLOCK_SIZE: usize = 64;

pub(crate) const IV: [u32; 4] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

const ORDER: [[usize; 16]; 3] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15],
    [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15],
];

const SHIFTS: [[u32; 4]; 3] = [[3, 7, 11, 19], [3, 5, 9, 13], [3, 9, 11, 15]];

const K: [u32; 3] = [0, 0x5a827999, 0x6ed9eba1];

fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

/// Md4 is the MD4 compression engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md4;

impl Engine for Md4 {
    type State = [u32; 4];

    fn block_len(&self) -> usize {
        BLOCK_SIZE
    }

    fn output_len(&self) -> usize {
        DIGEST_SIZE
    }

    fn init(&self) -> [u32; 4] {
        IV
    }

    fn compress_block(&self, state: &[u32; 4], block: &[u8]) -> [u32; 4] {
        let x: [u32; 16] = endian::read_u32_le(block);
        let mut v = *state;

        for round in 0..3 {
            for step in 0..16 {
                // targets cycle a, d, c, b
                let t = (4 - step % 4) % 4;
                let (b, c, d) = (v[(t + 1) % 4], v[(t + 2) % 4], v[(t + 3) % 4]);
                let mix = match round {
                    0 => f(b, c, d),
                    1 => g(b, c, d),
                    _ => h(b, c, d),
                };
                v[t] = v[t]
                    .wrapping_add(mix)
                    .wrapping_add(x[ORDER[round][step]])
                    .wrapping_add(K[round])
                    .rotate_left(SHIFTS[round][step % 4]);
            }
        }

        [
            state[0].wrapping_add(v[0]),
            state[1].wrapping_add(v[1]),
            state[2].wrapping_add(v[2]),
            state[3].wrapping_add(v[3]),
        ]
    }

    fn finalize(&self, state: &[u32; 4], tail: &[u8], total_len: u64) -> Vec<u8> {
        let state = absorb_padded(self, Padding::MD4, state, tail, total_len);
        endian::write_u32_le(&state)
    }
}

/// new returns a streaming MD4 context.
pub fn new() -> Hasher<Md4> {
    Hasher::new(Md4)
}

/// digest returns the MD4 checksum of `data`.
pub fn digest(data: &[u8]) -> Vec<u8> {
    Hasher::digest(Md4, data)
}

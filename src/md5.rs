use crate::endian;
use crate::engine::{absorb_padded, Engine};
use crate::hasher::Hasher;
use crate::md4::IV;
use crate::pad::Padding;

/// The size in bytes of an MD5 checksum.
pub const DIGEST_SIZE: usize = 16;

/// Block size, in bytes, of MD5.
pub const BLOCK_SIZE: usize = 64;

// floor(abs(sin(i + 1)) * 2^32)
const T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

const SHIFTS: [[u32; 4]; 4] = [[7, 12, 17, 22], [5, 9, 14, 20], [4, 11, 16, 23], [6, 10, 15, 21]];

fn mix(round: usize, x: u32, y: u32, z: u32) -> u32 {
    match round {
        0 => (x & y) | (!x & z),
        1 => (x & z) | (y & !z),
        2 => x ^ y ^ z,
        _ => y ^ (x | !z),
    }
}

fn word_index(round: usize, step: usize) -> usize {
    match round {
        0 => step,
        1 => (5 * step + 1) % 16,
        2 => (3 * step + 5) % 16,
        _ => (7 * step) % 16,
    }
}

/// Md5 is the MD5 compression engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md5;

impl Engine for Md5 {
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

        for round in 0..4 {
            for step in 0..16 {
                let t = (4 - step % 4) % 4;
                let (b, c, d) = (v[(t + 1) % 4], v[(t + 2) % 4], v[(t + 3) % 4]);
                let sum = v[t]
                    .wrapping_add(mix(round, b, c, d))
                    .wrapping_add(x[word_index(round, step)])
                    .wrapping_add(T[16 * round + step]);
                v[t] = b.wrapping_add(sum.rotate_left(SHIFTS[round][step % 4]));
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

/// new returns a streaming MD5 context.
pub fn new() -> Hasher<Md5> {
    Hasher::new(Md5)
}

/// digest returns the MD5 checksum of `data`.
pub fn digest(data: &[u8]) -> Vec<u8> {
    Hasher::digest(Md5, data)
}

use crate::endian;
use crate::engine::{absorb_padded, Engine};
use crate::hasher::Hasher;
use crate::md4::IV;
use crate::pad::Padding;

/// The size in bytes of a RIPEMD-128 checksum.
pub const DIGEST_SIZE: usize = 16;

/// Block size, in bytes, of RIPEMD-128.
pub const BLOCK_SIZE: usize = 64;

const K_LEFT: [u32; 4] = [0x00000000, 0x5a827999, 0x6ed9eba1, 0x8f1bbcdc];
const K_RIGHT: [u32; 4] = [0x50a28be6, 0x5c4dd124, 0x6d703ef3, 0x00000000];

const R_LEFT: [usize; 64] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8,
    3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12,
    1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2,
];

const R_RIGHT: [usize; 64] = [
    5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12,
    6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2,
    15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13,
    8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14,
];

const S_LEFT: [u32; 64] = [
    11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8,
    7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12,
    11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5,
    11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12,
];

const S_RIGHT: [u32; 64] = [
    8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6,
    9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11,
    9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5,
    15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8,
];

// f(0..=3) is used by the left lane in order and by the right lane reversed.
fn f(round: usize, x: u32, y: u32, z: u32) -> u32 {
    match round {
        0 => x ^ y ^ z,
        1 => (x & y) | (!x & z),
        2 => (x | !y) ^ z,
        _ => (x & z) | (y & !z),
    }
}

/// One lane: four 16-step rounds over a private copy of the state.
fn lane(
    state: &[u32; 4],
    x: &[u32; 16],
    order: &[usize; 64],
    shifts: &[u32; 64],
    k: &[u32; 4],
    reversed: bool,
) -> [u32; 4] {
    let [mut a, mut b, mut c, mut d] = *state;
    for j in 0..64 {
        let round = j / 16;
        let func = if reversed { 3 - round } else { round };
        let t = a
            .wrapping_add(f(func, b, c, d))
            .wrapping_add(x[order[j]])
            .wrapping_add(k[round])
            .rotate_left(shifts[j]);
        a = d;
        d = c;
        c = b;
        b = t;
    }
    [a, b, c, d]
}

/// Ripemd128 is the RIPEMD-128 compression engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ripemd128;

impl Engine for Ripemd128 {
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

    fn compress_block(&self, h: &[u32; 4], block: &[u8]) -> [u32; 4] {
        let x: [u32; 16] = endian::read_u32_le(block);
        let [a, b, c, d] = lane(h, &x, &R_LEFT, &S_LEFT, &K_LEFT, false);
        let [aa, bb, cc, dd] = lane(h, &x, &R_RIGHT, &S_RIGHT, &K_RIGHT, true);

        [
            h[1].wrapping_add(c).wrapping_add(dd),
            h[2].wrapping_add(d).wrapping_add(aa),
            h[3].wrapping_add(a).wrapping_add(bb),
            h[0].wrapping_add(b).wrapping_add(cc),
        ]
    }

    fn finalize(&self, state: &[u32; 4], tail: &[u8], total_len: u64) -> Vec<u8> {
        let state = absorb_padded(self, Padding::MD4, state, tail, total_len);
        endian::write_u32_le(&state)
    }
}

/// new returns a streaming RIPEMD-128 context.
pub fn new() -> Hasher<Ripemd128> {
    Hasher::new(Ripemd128)
}

/// digest returns the RIPEMD-128 checksum of `data`.
pub fn digest(data: &[u8]) -> Vec<u8> {
    Hasher::digest(Ripemd128, data)
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::testutil::TestElement;

    static TEST_VECTOR: &[TestElement] = &[
        TestElement {
            input: "",
            output: "cdf26213a150dc3ecb610f18f6b38b46",
        },
        TestElement {
            input: "a",
            output: "86be7afa339d0fc7cfc785e72f578d33",
        },
        TestElement {
            input: "abc",
            output: "c14a12199c66e4ba84636b0f69144c77",
        },
        TestElement {
            input: "message digest",
            output: "9e327b3d6e523062afc1132d7df9d1b8",
        },
    ];

    #[test]
    fn test_vector() {
        TEST_VECTOR.iter().enumerate().for_each(|(i, element)| {
            let sum = hex::encode(digest(element.input.as_bytes()));
            assert_eq!(
                element.output, sum,
                "test vector element mismatched on index {} failed! got {}, want {}",
                i, sum, element.output
            );
        })
    }

    #[test]
    fn lanes_differ() {
        let x = [0u32; 16];
        let left = lane(&IV, &x, &R_LEFT, &S_LEFT, &K_LEFT, false);
        let right = lane(&IV, &x, &R_RIGHT, &S_RIGHT, &K_RIGHT, true);
        assert_ne!(left, right);
    }
}

use log::debug;
use once_cell::sync::Lazy;

use crate::endian;
use crate::engine::{absorb_padded, Engine};
use crate::hasher::Hasher;
use crate::pad::Padding;
use crate::uint::U256;

/// The size in bytes of a Whirlpool checksum.
pub const DIGEST_SIZE: usize = 64;

/// Block size, in bytes, of Whirlpool.
pub const BLOCK_SIZE: usize = 64;

const ROUNDS: usize = 10;

// 4-bit mini-boxes the S-box is assembled from.
const E: [u8; 16] = [
    0x1, 0xb, 0x9, 0xc, 0xd, 0x6, 0xf, 0x3, 0xe, 0x8, 0x7, 0x4, 0xa, 0x2, 0x5, 0x0,
];
const R: [u8; 16] = [
    0x7, 0xc, 0xb, 0xd, 0xe, 0x4, 0x9, 0xf, 0x6, 0x3, 0x8, 0xa, 0x2, 0x5, 0x1, 0x0,
];

struct Tables {
    #[cfg(test)]
    sbox: [u8; 256],
    // c[t][x] is c[0][x] rotated right by 8t bits
    c: [[u64; 256]; 8],
    // rc[0] is unused; rounds are numbered from 1
    rc: [u64; ROUNDS + 1],
}

static TABLES: Lazy<Tables> = Lazy::new(|| {
    let tables = Tables::build();
    debug!("whirlpool tables built");
    tables
});

// Multiplication by x in GF(2^8) modulo x^8 + x^4 + x^3 + x^2 + 1.
fn xtime(v: u8) -> u8 {
    let wide = (v as u16) << 1;
    (if wide & 0x100 != 0 { wide ^ 0x11d } else { wide }) as u8
}

impl Tables {
    fn build() -> Self {
        let mut e_inv = [0u8; 16];
        for (i, v) in E.iter().enumerate() {
            e_inv[*v as usize] = i as u8;
        }

        let mut sbox = [0u8; 256];
        for (u, s) in sbox.iter_mut().enumerate() {
            let a = E[u >> 4];
            let b = e_inv[u & 0xf];
            let r = R[(a ^ b) as usize];
            *s = (E[(a ^ r) as usize] << 4) | e_inv[(b ^ r) as usize];
        }

        let mut c = [[0u64; 256]; 8];
        for x in 0..256 {
            let s1 = sbox[x];
            let s2 = xtime(s1);
            let s4 = xtime(s2);
            let s8 = xtime(s4);
            let row = [s1, s1, s4, s1, s8, s4 ^ s1, s2, s8 ^ s1];
            let c0 = u64::from_be_bytes(row);
            for (t, ct) in c.iter_mut().enumerate() {
                ct[x] = c0.rotate_right(8 * t as u32);
            }
        }

        let mut rc = [0u64; ROUNDS + 1];
        for r in 1..=ROUNDS {
            let base = 8 * (r - 1);
            rc[r] = (0..8).fold(0u64, |acc, t| {
                acc ^ (c[t][base + t] & (0xff00_0000_0000_0000 >> (8 * t)))
            });
        }

        Tables {
            #[cfg(test)]
            sbox,
            c,
            rc,
        }
    }

    // One application of the substitution, column-shift and mixing layers.
    fn round(&self, k: &[u64; 8]) -> [u64; 8] {
        let mut l = [0u64; 8];
        for (i, li) in l.iter_mut().enumerate() {
            for t in 0..8 {
                let lane = k[(i + 8 - t) & 7];
                *li ^= self.c[t][((lane >> (56 - 8 * t)) & 0xff) as usize];
            }
        }
        l
    }
}

/// Whirlpool chaining state: the hash words plus the number of bits
/// compressed so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State {
    /// Hash words.
    pub h: [u64; 8],
    /// Bits compressed so far, padding blocks included.
    pub bit_len: U256,
}

/// Whirlpool is the Whirlpool compression engine, a Miyaguchi–Preneel
/// hash over the W block cipher.
#[derive(Clone, Copy, Debug, Default)]
pub struct Whirlpool;

impl Engine for Whirlpool {
    type State = State;

    fn block_len(&self) -> usize {
        BLOCK_SIZE
    }

    fn output_len(&self) -> usize {
        DIGEST_SIZE
    }

    fn init(&self) -> State {
        State {
            h: [0; 8],
            bit_len: U256::ZERO,
        }
    }

    fn compress_block(&self, state: &State, block: &[u8]) -> State {
        let tables = &*TABLES;
        let m: [u64; 8] = endian::read_u64_be(block);

        let mut k = state.h;
        let mut s = [0u64; 8];
        for i in 0..8 {
            s[i] = m[i] ^ k[i];
        }

        for r in 1..=ROUNDS {
            k = tables.round(&k);
            k[0] ^= tables.rc[r];
            s = tables.round(&s);
            for i in 0..8 {
                s[i] ^= k[i];
            }
        }

        let mut h = state.h;
        for i in 0..8 {
            h[i] ^= s[i] ^ m[i];
        }
        State {
            h,
            bit_len: state.bit_len + U256::from(8 * BLOCK_SIZE as u64),
        }
    }

    // The length field is encoded from `total_len`; `bit_len` only counts
    // what the rounds have consumed.
    fn finalize(&self, state: &State, tail: &[u8], total_len: u64) -> Vec<u8> {
        let state = absorb_padded(self, Padding::WHIRLPOOL, state, tail, total_len);
        endian::write_u64_be(&state.h)
    }
}

/// new returns a streaming Whirlpool context.
pub fn new() -> Hasher<Whirlpool> {
    Hasher::new(Whirlpool)
}

/// digest returns the Whirlpool checksum of `data`.
pub fn digest(data: &[u8]) -> Vec<u8> {
    Hasher::digest(Whirlpool, data)
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::testutil::{shake_bytes, TestElement};

    static TEST_VECTOR: &[TestElement] = &[
        TestElement {
            input: "",
            output: "19fa61d75522a4669b44e39c1d2e1726c530232130d407f89afee0964997f7a73e83be698b288febcf88e3e03c4f0757ea8964e59b63d93708b138cc42a66eb3",
        },
        TestElement {
            input: "abc",
            output: "4e2448a4c6f486bb16b6562c73b4020bf3043e3a731bce721ae1b303d97e6d4c7181eebdb6c57e277d0e34957114cbd6c797fc9d95d8b582d225292076d4eef5",
        },
        TestElement {
            input: "The quick brown fox jumps over the lazy dog",
            output: "b97de512e91e3828b40d2b0fdce9ceb3c4a71f9bea8d88e75c4fa854df36725fd2b52eb6544edcacd6f8beddfea403cb55ae31f03ad62a5ef54e42ee82c3fb35",
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
    fn tables() {
        let t = &*TABLES;
        assert_eq!(&t.sbox[..4], &[0x18, 0x23, 0xc6, 0xe8]);
        assert_eq!(t.c[0][0], 0x18186018c07830d8);
        assert_eq!(t.c[1][0], 0xd818186018c07830);
        assert_eq!(t.rc[1], 0x1823c6e887b8014f);

        let mut seen = [false; 256];
        t.sbox.iter().for_each(|s| seen[*s as usize] = true);
        assert!(seen.iter().all(|s| *s), "S-box is not a permutation");
    }

    #[test]
    fn bit_counter_advances_per_block() {
        let input = shake_bytes("whirlpool blocks", 3 * BLOCK_SIZE);
        let state = input
            .chunks_exact(BLOCK_SIZE)
            .fold(Whirlpool.init(), |s, b| Whirlpool.compress_block(&s, b));
        assert_eq!(state.bit_len, U256::from(3 * 512u64));
        assert_eq!(
            Whirlpool.finalize(&state, &[], input.len() as u64),
            digest(&input)
        );
    }

    #[test]
    fn finalize_encodes_given_length() {
        let input = shake_bytes("whirlpool direct", BLOCK_SIZE);
        let state = Whirlpool.compress_block(&Whirlpool.init(), &input);
        let sum = Whirlpool.finalize(&state, &[], 3 * BLOCK_SIZE as u64);
        assert_eq!(sum.len(), DIGEST_SIZE);
        assert_ne!(sum, Whirlpool.finalize(&state, &[], BLOCK_SIZE as u64));
    }

    #[test]
    fn length_block_spill() -> anyhow::Result<()> {
        // 33 bytes put the terminator past the 32-byte length field boundary
        let input = shake_bytes("whirlpool spill", 33);
        let mut h = new();
        h.update(&input[..16])?;
        h.update(&input[16..])?;
        assert_eq!(h.sum(), digest(&input));
        Ok(())
    }
}

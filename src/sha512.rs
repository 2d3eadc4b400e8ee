use std::collections::HashMap;
use std::sync::Mutex;

use log::debug;
use once_cell::sync::Lazy;

use crate::endian;
use crate::engine::{absorb_padded, Engine};
use crate::error::{Error, Result};
use crate::hasher::Hasher;
use crate::pad::Padding;

/// Block size, in bytes, of every SHA-512 variant.
pub const BLOCK_SIZE: usize = 128;

const K: [u64; 80] = [
    0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
    0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
    0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
    0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
    0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
    0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
    0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
    0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
    0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
    0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
    0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
    0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
    0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
    0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

const IV_384: [u64; 8] = [
    0xcbbb9d5dc1059ed8, 0x629a292a367cd507, 0x9159015a3070dd17, 0x152fecd8f70e5939,
    0x67332667ffc00b31, 0x8eb44a8768581511, 0xdb0c2e0d64f98fa7, 0x47b5481dbefa4fa4,
];

const IV_512: [u64; 8] = [
    0x6a09e667f3bcc908, 0xbb67ae8584caa73b, 0x3c6ef372fe94f82b, 0xa54ff53a5f1d36f1,
    0x510e527fade682d1, 0x9b05688c2b3e6c1f, 0x1f83d9abfb41bd6b, 0x5be0cd19137e2179,
];

// Derived SHA-512/t initial vectors, keyed by t.
static TRUNCATED_IVS: Lazy<Mutex<HashMap<usize, [u64; 8]>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn ch(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (!x & z)
}

fn maj(x: u64, y: u64, z: u64) -> u64 {
    (x & y) ^ (x & z) ^ (y & z)
}

fn big_sigma0(x: u64) -> u64 {
    x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

fn big_sigma1(x: u64) -> u64 {
    x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

fn small_sigma0(x: u64) -> u64 {
    x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

fn small_sigma1(x: u64) -> u64 {
    x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

/// truncated_iv returns the SHA-512/t initial vector, deriving it on first
/// use: SHA-512 of the ASCII string "SHA-512/t" under the standard IV with
/// every word XORed with 0xa5a5a5a5a5a5a5a5.
fn truncated_iv(t: usize) -> [u64; 8] {
    let mut ivs = TRUNCATED_IVS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *ivs.entry(t).or_insert_with(|| {
        debug!("deriving SHA-512/{} initial vector", t);
        let modified = Sha512 {
            iv: IV_512.map(|w| w ^ 0xa5a5a5a5a5a5a5a5),
            output_len: 64,
        };
        let name = format!("SHA-512/{}", t);
        absorb_padded(
            &modified,
            Padding::SHA512,
            &modified.iv,
            name.as_bytes(),
            name.len() as u64,
        )
    })
}

/// Sha512 is the SHA-2 64-bit word engine. The variants differ only in
/// initial vector and output length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sha512 {
    iv: [u64; 8],
    output_len: usize,
}

impl Sha512 {
    /// SHA-384: 48-byte output.
    pub fn sha384() -> Self {
        Sha512 {
            iv: IV_384,
            output_len: 48,
        }
    }

    /// SHA-512: 64-byte output.
    pub fn sha512() -> Self {
        Sha512 {
            iv: IV_512,
            output_len: 64,
        }
    }

    /// SHA-512/224.
    pub fn sha512_224() -> Self {
        Sha512 {
            iv: truncated_iv(224),
            output_len: 28,
        }
    }

    /// SHA-512/256.
    pub fn sha512_256() -> Self {
        Sha512 {
            iv: truncated_iv(256),
            output_len: 32,
        }
    }

    /// sha512_t returns the SHA-512/t engine. `t` must be a multiple of 8 in
    /// [8, 504] other than 384.
    pub fn sha512_t(t: usize) -> Result<Self> {
        if t == 0 || t >= 512 || t % 8 != 0 || t == 384 {
            return Err(Error::Range(format!(
                "SHA-512/t output size {} must be a multiple of 8 in [8, 504], excluding 384",
                t
            )));
        }
        Ok(Sha512 {
            iv: truncated_iv(t),
            output_len: t / 8,
        })
    }

    /// iv returns the initial chaining value of this variant.
    pub fn iv(&self) -> [u64; 8] {
        self.iv
    }
}

impl Default for Sha512 {
    fn default() -> Self {
        Self::sha512()
    }
}

impl Engine for Sha512 {
    type State = [u64; 8];

    fn block_len(&self) -> usize {
        BLOCK_SIZE
    }

    fn output_len(&self) -> usize {
        self.output_len
    }

    fn init(&self) -> [u64; 8] {
        self.iv
    }

    fn compress_block(&self, state: &[u64; 8], block: &[u8]) -> [u64; 8] {
        let mut w = [0u64; 80];
        w[..16].copy_from_slice(&endian::read_u64_be::<16>(block));
        for t in 16..80 {
            w[t] = small_sigma1(w[t - 2])
                .wrapping_add(w[t - 7])
                .wrapping_add(small_sigma0(w[t - 15]))
                .wrapping_add(w[t - 16]);
        }

        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
        for t in 0..80 {
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

    fn finalize(&self, state: &[u64; 8], tail: &[u8], total_len: u64) -> Vec<u8> {
        let state = absorb_padded(self, Padding::SHA512, state, tail, total_len);
        let mut out = endian::write_u64_be(&state);
        out.truncate(self.output_len);
        out
    }
}

/// new_sha384 returns a streaming SHA-384 context.
pub fn new_sha384() -> Hasher<Sha512> {
    Hasher::new(Sha512::sha384())
}

/// new_sha512 returns a streaming SHA-512 context.
pub fn new_sha512() -> Hasher<Sha512> {
    Hasher::new(Sha512::sha512())
}

/// new_sha512_t returns a streaming SHA-512/t context.
pub fn new_sha512_t(t: usize) -> Result<Hasher<Sha512>> {
    Ok(Hasher::new(Sha512::sha512_t(t)?))
}

#[cfg(test)]
pub mod test {
    use super::*;
    use crate::testutil::TestElement;

    static SHA512_VECTOR: &[TestElement] = &[
        TestElement {
            input: "",
            output: "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e",
        },
        TestElement {
            input: "abc",
            output: "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f",
        },
    ];

    static SHA384_VECTOR: &[TestElement] = &[TestElement {
        input: "abc",
        output: "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7",
    }];

    static SHA512_256_VECTOR: &[TestElement] = &[TestElement {
        input: "abc",
        output: "53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23",
    }];

    static SHA512_224_VECTOR: &[TestElement] = &[TestElement {
        input: "abc",
        output: "4634270f707b6a54daae7530460842e20e37ed265ceee9a43e8924aa",
    }];

    #[test]
    fn test_vector() {
        for (engine, vector) in [
            (Sha512::sha512(), SHA512_VECTOR),
            (Sha512::sha384(), SHA384_VECTOR),
            (Sha512::sha512_256(), SHA512_256_VECTOR),
            (Sha512::sha512_224(), SHA512_224_VECTOR),
        ] {
            vector.iter().enumerate().for_each(|(i, element)| {
                let sum = hex::encode(Hasher::digest(engine, element.input.as_bytes()));
                assert_eq!(
                    element.output, sum,
                    "test vector element mismatched on index {} failed! got {}, want {}",
                    i, sum, element.output
                );
            })
        }
    }

    #[test]
    fn derived_iv_matches_published() {
        assert_eq!(
            Sha512::sha512_256().iv(),
            [
                0x22312194fc2bf72c,
                0x9f555fa3c84c64c2,
                0x2393b86b6f53b151,
                0x963877195940eabd,
                0x96283ee2a88effe3,
                0xbe5e1e2553863992,
                0x2b0199fc2c85b8aa,
                0x0eb72ddc81c52ca2,
            ]
        );
    }

    #[test]
    fn sha512_t_is_memoized_and_named() -> anyhow::Result<()> {
        assert_eq!(Sha512::sha512_t(256)?, Sha512::sha512_256());
        assert_eq!(Sha512::sha512_t(224)?, Sha512::sha512_224());
        let e = Sha512::sha512_t(72)?;
        assert_eq!(e.output_len(), 9);
        assert_eq!(Sha512::sha512_t(72)?, e);
        assert_eq!(new_sha512_t(8)?.size(), 1);
        Ok(())
    }

    #[test]
    fn sha512_t_range() {
        for t in [0, 4, 9, 384, 512, 520] {
            assert!(
                matches!(Sha512::sha512_t(t), Err(Error::Range(_))),
                "t = {} accepted",
                t
            );
        }
    }

    #[test]
    fn spills_length_block() -> anyhow::Result<()> {
        // 112 bytes leave no room for the 16-byte length field
        let input = [0x61u8; 112];
        let mut h = new_sha512();
        h.update(&input[..100])?;
        h.update(&input[100..])?;
        assert_eq!(h.sum(), Hasher::digest(Sha512::sha512(), &input));
        assert_ne!(h.sum(), Hasher::digest(Sha512::sha512(), &input[..111]));
        Ok(())
    }
}

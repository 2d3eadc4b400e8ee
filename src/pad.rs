//! Message padding for every engine family.
use crate::uint::{FixedWidth, U256};

/// Encoding of the message bit length appended by strengthened padding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthField {
    /// 64-bit little endian.
    Le64,
    /// 64-bit big endian.
    Be64,
    /// 128-bit big endian.
    Be128,
    /// 256-bit big endian.
    Be256,
}

impl LengthField {
    /// Width of the field in bytes.
    pub fn width(&self) -> usize {
        match self {
            LengthField::Le64 | LengthField::Be64 => 8,
            LengthField::Be128 => 16,
            LengthField::Be256 => 32,
        }
    }

    /// Encodes `8 * total_len` into the field, keeping its low bits.
    pub fn encode(&self, total_len: u64) -> Vec<u8> {
        let bits = U256::from(total_len) << 3;
        match self {
            LengthField::Le64 => bits.to_bytes_le()[..8].to_vec(),
            _ => {
                let be = bits.to_bytes_be();
                be[be.len() - self.width()..].to_vec()
            }
        }
    }
}

/// A padding scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Padding {
    /// Merkle–Damgård strengthening: `0x80`, zeros, then the bit length.
    Strengthened {
        /// Block length in bytes.
        block_len: usize,
        /// Encoding of the trailing bit length.
        length: LengthField,
    },
    /// Zeros up to a full block; the engine flags the last block itself.
    ZeroFill {
        /// Block length in bytes.
        block_len: usize,
    },
}

impl Padding {
    /// MD4, MD5 and RIPEMD-128.
    pub const MD4: Padding = Padding::Strengthened {
        block_len: 64,
        length: LengthField::Le64,
    };
    /// SHA-224 and SHA-256.
    pub const SHA256: Padding = Padding::Strengthened {
        block_len: 64,
        length: LengthField::Be64,
    };
    /// SHA-384, SHA-512 and SHA-512/t.
    pub const SHA512: Padding = Padding::Strengthened {
        block_len: 128,
        length: LengthField::Be128,
    };
    /// Whirlpool.
    pub const WHIRLPOOL: Padding = Padding::Strengthened {
        block_len: 64,
        length: LengthField::Be256,
    };
    /// BLAKE2b.
    pub const BLAKE2B: Padding = Padding::ZeroFill { block_len: 128 };

    /// Block length in bytes.
    pub fn block_len(&self) -> usize {
        match self {
            Padding::Strengthened { block_len, .. } | Padding::ZeroFill { block_len } => {
                *block_len
            }
        }
    }
}

/// Pads a whole message to a multiple of the block length.
pub fn pad(scheme: Padding, msg: &[u8]) -> Vec<u8> {
    let b = scheme.block_len();
    let full = msg.len() / b * b;
    let mut out = msg[..full].to_vec();
    out.extend(pad_tail(scheme, &msg[full..], msg.len() as u64));
    out
}

/// Pads the unprocessed tail of a message whose total length is `total_len`.
///
/// Strengthened schemes spill into an extra block when the terminator leaves
/// no room for the length field. Zero fill always yields at least one block.
pub fn pad_tail(scheme: Padding, tail: &[u8], total_len: u64) -> Vec<u8> {
    let mut out = tail.to_vec();
    match scheme {
        Padding::Strengthened { block_len, length } => {
            let field = length.width();
            let padded = round_up(tail.len() + 1 + field, block_len);
            out.push(0x80);
            out.resize(padded - field, 0);
            out.extend(length.encode(total_len));
        }
        Padding::ZeroFill { block_len } => {
            let padded = round_up(tail.len().max(1), block_len);
            out.resize(padded, 0);
        }
    }
    out
}

fn round_up(n: usize, block_len: usize) -> usize {
    (n + block_len - 1) / block_len * block_len
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn md4_padding_of_abc() {
        let padded = pad(Padding::MD4, b"abc");
        assert_eq!(padded.len(), 64);
        assert_eq!(&padded[..4], &[b'a', b'b', b'c', 0x80]);
        assert!(padded[4..56].iter().all(|b| *b == 0));
        assert_eq!(&padded[56..], &[24, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn sha256_length_is_big_endian() {
        let padded = pad(Padding::SHA256, b"abc");
        assert_eq!(&padded[56..], &[0, 0, 0, 0, 0, 0, 0, 24]);
    }

    #[test]
    fn block_boundaries() {
        for (scheme, fits, spills) in [
            (Padding::MD4, 55, 56),
            (Padding::SHA256, 55, 56),
            (Padding::SHA512, 111, 112),
            (Padding::WHIRLPOOL, 31, 32),
        ] {
            let b = scheme.block_len();
            assert_eq!(pad(scheme, &vec![0xaa; fits]).len(), b);
            assert_eq!(pad(scheme, &vec![0xaa; spills]).len(), 2 * b);
            assert_eq!(pad(scheme, &vec![0xaa; b]).len(), 2 * b);
            assert_eq!(pad(scheme, &[]).len(), b);
        }
    }

    #[test]
    fn whirlpool_extra_block() {
        let padded = pad(Padding::WHIRLPOOL, &[1; 33]);
        assert_eq!(padded.len(), 128);
        assert_eq!(padded[33], 0x80);
        assert!(padded[34..96].iter().all(|b| *b == 0));
        assert_eq!(padded[126..], [0x01, 0x08]);
    }

    #[test]
    fn zero_fill() {
        assert_eq!(pad(Padding::BLAKE2B, &[]), vec![0; 128]);
        assert_eq!(pad_tail(Padding::BLAKE2B, &[7; 128], 128), vec![7; 128]);
        let padded = pad(Padding::BLAKE2B, &[7; 130]);
        assert_eq!(padded.len(), 256);
        assert_eq!(padded[129], 7);
        assert_eq!(padded[130], 0);
    }

    #[test]
    fn wide_length_fields() {
        let total = u64::MAX;
        assert_eq!(LengthField::Le64.encode(total), vec![0xf8, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]);
        assert_eq!(
            LengthField::Be128.encode(total),
            vec![0, 0, 0, 0, 0, 0, 0, 7, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xf8]
        );
        let wide = LengthField::Be256.encode(total);
        assert_eq!(wide.len(), 32);
        assert_eq!(wide[23], 7);
        assert_eq!(LengthField::Be64.encode(1), vec![0, 0, 0, 0, 0, 0, 0, 8]);
    }

    #[test]
    fn tail_uses_total_length() {
        let tail = pad_tail(Padding::MD4, b"z", 129);
        assert_eq!(tail.len(), 64);
        assert_eq!(&tail[56..58], &[0x08, 0x04]);
    }
}

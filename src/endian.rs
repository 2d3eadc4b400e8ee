//! Block word I/O.
//!
//! Each engine declares its own word order: MD4, MD5 and RIPEMD-128 read
//! little-endian words, SHA-2 and Whirlpool big-endian, BLAKE2b little-endian.
use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// read_u32_be reads `N` big-endian u32 words from the front of `block`.
pub fn read_u32_be<const N: usize>(block: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    BigEndian::read_u32_into(&block[..4 * N], &mut words);
    words
}

/// read_u32_le reads `N` little-endian u32 words from the front of `block`.
pub fn read_u32_le<const N: usize>(block: &[u8]) -> [u32; N] {
    let mut words = [0u32; N];
    LittleEndian::read_u32_into(&block[..4 * N], &mut words);
    words
}

/// read_u64_be reads `N` big-endian u64 words from the front of `block`.
pub fn read_u64_be<const N: usize>(block: &[u8]) -> [u64; N] {
    let mut words = [0u64; N];
    BigEndian::read_u64_into(&block[..8 * N], &mut words);
    words
}

/// read_u64_le reads `N` little-endian u64 words from the front of `block`.
pub fn read_u64_le<const N: usize>(block: &[u8]) -> [u64; N] {
    let mut words = [0u64; N];
    LittleEndian::read_u64_into(&block[..8 * N], &mut words);
    words
}

/// write_u32_be encodes `words` big-endian.
pub fn write_u32_be(words: &[u32]) -> Vec<u8> {
    let mut out = vec![0; 4 * words.len()];
    BigEndian::write_u32_into(words, &mut out);
    out
}

/// write_u32_le encodes `words` little-endian.
pub fn write_u32_le(words: &[u32]) -> Vec<u8> {
    let mut out = vec![0; 4 * words.len()];
    LittleEndian::write_u32_into(words, &mut out);
    out
}

/// write_u64_be encodes `words` big-endian.
pub fn write_u64_be(words: &[u64]) -> Vec<u8> {
    let mut out = vec![0; 8 * words.len()];
    BigEndian::write_u64_into(words, &mut out);
    out
}

/// write_u64_le encodes `words` little-endian.
pub fn write_u64_le(words: &[u64]) -> Vec<u8> {
    let mut out = vec![0; 8 * words.len()];
    LittleEndian::write_u64_into(words, &mut out);
    out
}

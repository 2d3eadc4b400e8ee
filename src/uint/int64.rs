use std::fmt;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use super::{check_len, FixedWidth, MAX_SAFE_INTEGER};
use crate::error::{Error, Result};

/// Two's-complement 64-bit signed integer laid out as two 32-bit limbs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Int64(i64);

impl Int64 {
    /// -2^63.
    pub const MIN: Self = Int64(i64::MIN);
    /// 2^63 - 1.
    pub const MAX: Self = Int64(i64::MAX);

    /// Builds a value from `[low, high]` limbs; the sign is the high limb's MSB.
    pub const fn from_limbs(limbs: [u32; 2]) -> Self {
        Int64(((limbs[1] as u64) << 32 | limbs[0] as u64) as i64)
    }

    /// The `[low, high]` limbs.
    pub const fn limbs(&self) -> [u32; 2] {
        [self.0 as u32, (self.0 as u64 >> 32) as u32]
    }

    /// Builds a value from a double holding a safe integer.
    pub fn from_f64(v: f64) -> Result<Self> {
        if !v.is_finite() || v.fract() != 0.0 {
            return Err(Error::EnforceType(v.to_string()));
        }
        if v.abs() > MAX_SAFE_INTEGER as f64 {
            return Err(Error::Range(format!(
                "{} exceeds the exact integer range of f64",
                v
            )));
        }
        Ok(Int64(v as i64))
    }

    /// The native value.
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Whether the sign bit is set.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Two's-complement addition.
    pub fn wrapping_add(&self, rhs: &Self) -> Self {
        Int64(self.0.wrapping_add(rhs.0))
    }

    /// Two's-complement subtraction.
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        Int64(self.0.wrapping_sub(rhs.0))
    }

    /// Two's-complement negation; `MIN` stays `MIN`.
    pub fn wrapping_neg(&self) -> Self {
        Int64(self.0.wrapping_neg())
    }

    /// Signed multiplication is not provided for this type.
    pub fn mul(&self, _rhs: &Self) -> Result<Self> {
        Err(Error::NotSupported("Int64::mul"))
    }
}

impl From<i64> for Int64 {
    fn from(v: i64) -> Self {
        Int64(v)
    }
}

impl FixedWidth for Int64 {
    const BITS: u32 = 64;

    fn lshift(self, by: u32) -> Result<Self> {
        let bits = (self.0 as u64).lshift(by)?;
        Ok(Int64(bits as i64))
    }

    /// Arithmetic shift: a full-width shift leaves only the sign.
    fn rshift(self, by: u32) -> Result<Self> {
        match by {
            b if b > Self::BITS => Err(Error::shift_range(by, Self::BITS)),
            b if b == Self::BITS => Ok(Int64(self.0 >> 63)),
            b => Ok(Int64(self.0 >> b)),
        }
    }

    fn lrot(self, by: u32) -> Result<Self> {
        Ok(Int64((self.0 as u64).lrot(by)? as i64))
    }

    fn rrot(self, by: u32) -> Result<Self> {
        Ok(Int64((self.0 as u64).rrot(by)? as i64))
    }

    fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = vec![0; 8];
        BigEndian::write_i64(&mut out, self.0);
        out
    }

    fn to_bytes_le(&self) -> Vec<u8> {
        let mut out = vec![0; 8];
        LittleEndian::write_i64(&mut out, self.0);
        out
    }

    fn from_bytes_be(bytes: &[u8]) -> Result<Self> {
        check_len("Int64", bytes, 8)?;
        Ok(Int64(BigEndian::read_i64(bytes)))
    }

    fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
        check_len("Int64", bytes, 8)?;
        Ok(Int64(LittleEndian::read_i64(bytes)))
    }

    /// Drops sign-extension bytes; the first remaining byte keeps the sign bit.
    fn to_minimal_bytes_be(&self) -> Vec<u8> {
        let bytes = self.to_bytes_be();
        let fill = if self.is_negative() { 0xff } else { 0x00 };
        let mut skip = 0;
        while skip < 7 && bytes[skip] == fill && (bytes[skip + 1] & 0x80) == (fill & 0x80) {
            skip += 1;
        }
        bytes[skip..].to_vec()
    }

    fn to_minimal_bytes_le(&self) -> Vec<u8> {
        let mut bytes = self.to_minimal_bytes_be();
        bytes.reverse();
        bytes
    }
}

impl fmt::Display for Int64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for Int64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int64({})", self.0)
    }
}

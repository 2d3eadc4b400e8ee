//! Exact fixed-width integers.
//!
//! 32- and 64-bit widths are the native `u32` / `u64`; 128, 256 and 512 bits
//! are [`WideUint`] values made of 32-bit limbs. Both sides share the
//! [`FixedWidth`] trait, whose shift and rotate amounts are range checked
//! instead of being reduced modulo the width.
mod int64;
mod wide;

pub use int64::Int64;
pub use wide::{WideUint, U128, U256, U512};

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// The largest integer an IEEE-754 double holds exactly, 2^53 - 1.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Operations shared by every exact N-bit integer type.
pub trait FixedWidth: Sized + Copy {
    /// Width in bits.
    const BITS: u32;

    /// Shift left by `by` bits, `by` in `[0, BITS]`.
    fn lshift(self, by: u32) -> Result<Self>;
    /// Shift right by `by` bits, `by` in `[0, BITS]`.
    fn rshift(self, by: u32) -> Result<Self>;
    /// Rotate left by `by` bits, `by` in `[0, BITS]`.
    fn lrot(self, by: u32) -> Result<Self>;
    /// Rotate right by `by` bits, `by` in `[0, BITS]`.
    fn rrot(self, by: u32) -> Result<Self>;

    /// Big-endian encoding, always `BITS / 8` bytes.
    fn to_bytes_be(&self) -> Vec<u8>;
    /// Little-endian encoding, always `BITS / 8` bytes.
    fn to_bytes_le(&self) -> Vec<u8>;
    /// Decode exactly `BITS / 8` big-endian bytes.
    fn from_bytes_be(bytes: &[u8]) -> Result<Self>;
    /// Decode exactly `BITS / 8` little-endian bytes.
    fn from_bytes_le(bytes: &[u8]) -> Result<Self>;

    /// Big-endian encoding without leading zero bytes (at least one byte).
    fn to_minimal_bytes_be(&self) -> Vec<u8> {
        let bytes = self.to_bytes_be();
        let skip = bytes
            .iter()
            .take(bytes.len() - 1)
            .take_while(|b| **b == 0)
            .count();
        bytes[skip..].to_vec()
    }

    /// Little-endian encoding without trailing zero bytes (at least one byte).
    fn to_minimal_bytes_le(&self) -> Vec<u8> {
        let mut bytes = self.to_bytes_le();
        while bytes.len() > 1 && bytes[bytes.len() - 1] == 0 {
            bytes.pop();
        }
        bytes
    }
}

pub(crate) fn check_len(what: &'static str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::size(what, expected, bytes.len()));
    }
    Ok(())
}

/// Accepts an `f64` only if it holds a non-negative safe integer.
pub(crate) fn unsigned_safe_integer(v: f64) -> Result<u64> {
    if !v.is_finite() || v.fract() != 0.0 || v < 0.0 {
        return Err(Error::EnforceType(v.to_string()));
    }
    if v > MAX_SAFE_INTEGER as f64 {
        return Err(Error::Range(format!(
            "{} exceeds the exact integer range of f64",
            v
        )));
    }
    Ok(v as u64)
}

macro_rules! impl_native_fixed_width {
    ($t:ty, $read:ident, $write:ident) => {
        impl FixedWidth for $t {
            const BITS: u32 = <$t>::BITS;

            fn lshift(self, by: u32) -> Result<Self> {
                match by {
                    b if b > Self::BITS => Err(Error::shift_range(by, Self::BITS)),
                    b if b == Self::BITS => Ok(0),
                    b => Ok(self << b),
                }
            }

            fn rshift(self, by: u32) -> Result<Self> {
                match by {
                    b if b > Self::BITS => Err(Error::shift_range(by, Self::BITS)),
                    b if b == Self::BITS => Ok(0),
                    b => Ok(self >> b),
                }
            }

            fn lrot(self, by: u32) -> Result<Self> {
                if by > Self::BITS {
                    return Err(Error::shift_range(by, Self::BITS));
                }
                Ok(self.rotate_left(by))
            }

            fn rrot(self, by: u32) -> Result<Self> {
                if by > Self::BITS {
                    return Err(Error::shift_range(by, Self::BITS));
                }
                Ok(self.rotate_right(by))
            }

            fn to_bytes_be(&self) -> Vec<u8> {
                let mut out = vec![0; (Self::BITS / 8) as usize];
                BigEndian::$write(&mut out, *self);
                out
            }

            fn to_bytes_le(&self) -> Vec<u8> {
                let mut out = vec![0; (Self::BITS / 8) as usize];
                LittleEndian::$write(&mut out, *self);
                out
            }

            fn from_bytes_be(bytes: &[u8]) -> Result<Self> {
                check_len(stringify!($t), bytes, (Self::BITS / 8) as usize)?;
                Ok(BigEndian::$read(bytes))
            }

            fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
                check_len(stringify!($t), bytes, (Self::BITS / 8) as usize)?;
                Ok(LittleEndian::$read(bytes))
            }
        }
    };
}

impl_native_fixed_width!(u32, read_u32, write_u32);
impl_native_fixed_width!(u64, read_u64, write_u64);

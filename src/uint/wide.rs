use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Mul, Not, Shl, Shr, Sub};
use std::str::FromStr;

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use subtle::{Choice, ConstantTimeEq, ConstantTimeGreater, ConstantTimeLess};

use super::{check_len, unsigned_safe_integer, FixedWidth};
use crate::error::{Error, Result};

/// An exact unsigned integer of `32 * L` bits.
///
/// Limbs are stored least significant first. Every operation is reduced
/// modulo `2^(32 * L)`; addition and multiplication wrap on purpose.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WideUint<const L: usize> {
    limbs: [u32; L],
}

/// 128-bit unsigned integer.
pub type U128 = WideUint<4>;
/// 256-bit unsigned integer.
pub type U256 = WideUint<8>;
/// 512-bit unsigned integer.
pub type U512 = WideUint<16>;

impl<const L: usize> WideUint<L> {
    /// Width in bits.
    pub const BITS: u32 = 32 * L as u32;
    /// Width in bytes.
    pub const BYTES: usize = 4 * L;
    /// Zero.
    pub const ZERO: Self = Self { limbs: [0; L] };
    /// `2^BITS - 1`.
    pub const MAX: Self = Self {
        limbs: [u32::MAX; L],
    };

    /// Builds a value from limbs given least significant first.
    pub const fn from_limbs(limbs: [u32; L]) -> Self {
        Self { limbs }
    }

    /// The limbs, least significant first.
    pub const fn limbs(&self) -> [u32; L] {
        self.limbs
    }

    /// Builds a value from a `u128`, failing if it does not fit in `BITS`.
    pub fn try_from_u128(v: u128) -> Result<Self> {
        let mut limbs = [0u32; L];
        let mut rest = v;
        for limb in limbs.iter_mut() {
            *limb = rest as u32;
            rest >>= 32;
        }
        if rest != 0 {
            return Err(Error::Range(format!(
                "{} does not fit in {} bits",
                v,
                Self::BITS
            )));
        }
        Ok(Self { limbs })
    }

    /// Builds a value from a signed integer, rejecting negatives.
    pub fn from_i64(v: i64) -> Result<Self> {
        if v < 0 {
            return Err(Error::EnforceType(v.to_string()));
        }
        Self::try_from_u128(v as u128)
    }

    /// Builds a value from a double that holds a non-negative safe integer.
    pub fn from_f64(v: f64) -> Result<Self> {
        Self::try_from_u128(unsigned_safe_integer(v)? as u128)
    }

    /// Whether every limb is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|l| *l == 0)
    }

    /// The low 64 bits.
    pub fn low_u64(&self) -> u64 {
        let lo = self.limbs.first().copied().unwrap_or(0) as u64;
        let hi = self.limbs.get(1).copied().unwrap_or(0) as u64;
        hi << 32 | lo
    }

    /// Adds with carry propagation, returning the carry out of the top limb.
    pub fn overflowing_add(&self, rhs: &Self) -> (Self, bool) {
        let mut limbs = [0u32; L];
        let mut carry = 0u64;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let sum = self.limbs[i] as u64 + rhs.limbs[i] as u64 + carry;
            *limb = sum as u32;
            carry = sum >> 32;
        }
        (Self { limbs }, carry != 0)
    }

    /// Modular addition.
    pub fn wrapping_add(&self, rhs: &Self) -> Self {
        self.overflowing_add(rhs).0
    }

    /// Modular subtraction.
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        let mut limbs = [0u32; L];
        let mut borrow = 0u64;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let diff = (self.limbs[i] as u64)
                .wrapping_sub(rhs.limbs[i] as u64)
                .wrapping_sub(borrow);
            *limb = diff as u32;
            borrow = diff >> 63;
        }
        Self { limbs }
    }

    /// Schoolbook multiplication; products above `BITS` are discarded.
    pub fn wrapping_mul(&self, rhs: &Self) -> Self {
        let mut limbs = [0u32; L];
        for i in 0..L {
            let a = self.limbs[i] as u64;
            if a == 0 {
                continue;
            }
            let mut carry = 0u64;
            for j in 0..L - i {
                // (2^32-1)^2 + 2 * (2^32-1) == 2^64 - 1, so this never overflows.
                let t = a * rhs.limbs[j] as u64 + limbs[i + j] as u64 + carry;
                limbs[i + j] = t as u32;
                carry = t >> 32;
            }
        }
        Self { limbs }
    }

    /// Multiplies by a single limb, returning the limb carried out.
    fn overflowing_mul_u32(&self, m: u32) -> (Self, u32) {
        let mut limbs = [0u32; L];
        let mut carry = 0u64;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let t = self.limbs[i] as u64 * m as u64 + carry;
            *limb = t as u32;
            carry = t >> 32;
        }
        (Self { limbs }, carry as u32)
    }

    /// Long division by a single limb.
    pub fn div_rem_u32(&self, divisor: u32) -> Result<(Self, u32)> {
        if divisor == 0 {
            return Err(Error::Range("division by zero".to_string()));
        }
        let mut limbs = [0u32; L];
        let mut rem = 0u64;
        for i in (0..L).rev() {
            let cur = rem << 32 | self.limbs[i] as u64;
            limbs[i] = (cur / divisor as u64) as u32;
            rem = cur % divisor as u64;
        }
        Ok((Self { limbs }, rem as u32))
    }

    /// Constant-time `self >= other`.
    pub fn ct_gte(&self, other: &Self) -> Choice {
        !self.ct_lt(other)
    }

    /// Constant-time `self <= other`.
    pub fn ct_lte(&self, other: &Self) -> Choice {
        !self.ct_gt(other)
    }

    // Callers guarantee `by <= BITS`.
    fn shl_bits(&self, by: u32) -> Self {
        if by >= Self::BITS {
            return Self::ZERO;
        }
        let limb_shift = (by / 32) as usize;
        let bit_shift = by % 32;
        let mut limbs = [0u32; L];
        for i in limb_shift..L {
            let src = i - limb_shift;
            let mut v = self.limbs[src] << bit_shift;
            // a native shift by 32 is undefined, so bit_shift == 0 takes no low part
            if bit_shift != 0 && src > 0 {
                v |= self.limbs[src - 1] >> (32 - bit_shift);
            }
            limbs[i] = v;
        }
        Self { limbs }
    }

    fn shr_bits(&self, by: u32) -> Self {
        if by >= Self::BITS {
            return Self::ZERO;
        }
        let limb_shift = (by / 32) as usize;
        let bit_shift = by % 32;
        let mut limbs = [0u32; L];
        for i in 0..L - limb_shift {
            let src = i + limb_shift;
            let mut v = self.limbs[src] >> bit_shift;
            if bit_shift != 0 && src + 1 < L {
                v |= self.limbs[src + 1] << (32 - bit_shift);
            }
            limbs[i] = v;
        }
        Self { limbs }
    }

    fn check_shift(by: u32) -> Result<()> {
        if by > Self::BITS {
            return Err(Error::shift_range(by, Self::BITS));
        }
        Ok(())
    }
}

impl<const L: usize> FixedWidth for WideUint<L> {
    const BITS: u32 = 32 * L as u32;

    fn lshift(self, by: u32) -> Result<Self> {
        Self::check_shift(by)?;
        Ok(self.shl_bits(by))
    }

    fn rshift(self, by: u32) -> Result<Self> {
        Self::check_shift(by)?;
        Ok(self.shr_bits(by))
    }

    fn lrot(self, by: u32) -> Result<Self> {
        Self::check_shift(by)?;
        Ok(self.shl_bits(by) | self.shr_bits(Self::BITS - by))
    }

    fn rrot(self, by: u32) -> Result<Self> {
        Self::check_shift(by)?;
        Ok(self.shr_bits(by) | self.shl_bits(Self::BITS - by))
    }

    fn to_bytes_be(&self) -> Vec<u8> {
        let mut out = vec![0; Self::BYTES];
        for (i, limb) in self.limbs.iter().enumerate() {
            let at = 4 * (L - 1 - i);
            BigEndian::write_u32(&mut out[at..at + 4], *limb);
        }
        out
    }

    fn to_bytes_le(&self) -> Vec<u8> {
        let mut out = vec![0; Self::BYTES];
        LittleEndian::write_u32_into(&self.limbs, &mut out);
        out
    }

    fn from_bytes_be(bytes: &[u8]) -> Result<Self> {
        check_len("wide integer", bytes, Self::BYTES)?;
        let mut limbs = [0u32; L];
        for (i, limb) in limbs.iter_mut().enumerate() {
            let at = 4 * (L - 1 - i);
            *limb = BigEndian::read_u32(&bytes[at..at + 4]);
        }
        Ok(Self { limbs })
    }

    fn from_bytes_le(bytes: &[u8]) -> Result<Self> {
        check_len("wide integer", bytes, Self::BYTES)?;
        let mut limbs = [0u32; L];
        LittleEndian::read_u32_into(bytes, &mut limbs);
        Ok(Self { limbs })
    }
}

impl<const L: usize> Default for WideUint<L> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const L: usize> From<u32> for WideUint<L> {
    fn from(v: u32) -> Self {
        let mut limbs = [0u32; L];
        limbs[0] = v;
        Self { limbs }
    }
}

impl<const L: usize> From<u64> for WideUint<L> {
    /// Reduces `v` modulo `2^BITS`, so a single limb keeps the low 32 bits.
    fn from(v: u64) -> Self {
        let mut limbs = [0u32; L];
        limbs[0] = v as u32;
        if L > 1 {
            limbs[1] = (v >> 32) as u32;
        }
        Self { limbs }
    }
}

impl<const L: usize> Ord for WideUint<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.limbs.iter().rev().cmp(other.limbs.iter().rev())
    }
}

impl<const L: usize> PartialOrd for WideUint<L> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const L: usize> ConstantTimeEq for WideUint<L> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.limbs[..].ct_eq(&other.limbs[..])
    }
}

impl<const L: usize> ConstantTimeGreater for WideUint<L> {
    /// `self > other` exactly when `other - self` borrows out of the top limb.
    fn ct_gt(&self, other: &Self) -> Choice {
        let mut borrow = 0u64;
        for i in 0..L {
            let diff = (other.limbs[i] as u64)
                .wrapping_sub(self.limbs[i] as u64)
                .wrapping_sub(borrow);
            borrow = diff >> 63;
        }
        Choice::from(borrow as u8)
    }
}

impl<const L: usize> ConstantTimeLess for WideUint<L> {}

macro_rules! impl_bitwise {
    ($tr:ident, $f:ident, $op:tt) => {
        impl<const L: usize> $tr for WideUint<L> {
            type Output = Self;

            fn $f(self, rhs: Self) -> Self {
                let mut limbs = self.limbs;
                limbs
                    .iter_mut()
                    .zip(rhs.limbs.iter())
                    .for_each(|(a, b)| *a = *a $op *b);
                Self { limbs }
            }
        }
    };
}

impl_bitwise!(BitXor, bitxor, ^);
impl_bitwise!(BitAnd, bitand, &);
impl_bitwise!(BitOr, bitor, |);

impl<const L: usize> Not for WideUint<L> {
    type Output = Self;

    fn not(self) -> Self {
        let mut limbs = self.limbs;
        limbs.iter_mut().for_each(|a| *a = !*a);
        Self { limbs }
    }
}

impl<const L: usize> Add for WideUint<L> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(&rhs)
    }
}

impl<const L: usize> Sub for WideUint<L> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(&rhs)
    }
}

impl<const L: usize> Mul for WideUint<L> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(&rhs)
    }
}

/// Panics when the amount exceeds `BITS`, like the native operators; use
/// [`FixedWidth::lshift`] for a checked shift.
impl<const L: usize> Shl<u32> for WideUint<L> {
    type Output = Self;

    fn shl(self, by: u32) -> Self {
        assert!(by <= Self::BITS, "shift left by {} overflows {} bits", by, Self::BITS);
        self.shl_bits(by)
    }
}

impl<const L: usize> Shr<u32> for WideUint<L> {
    type Output = Self;

    fn shr(self, by: u32) -> Self {
        assert!(by <= Self::BITS, "shift right by {} overflows {} bits", by, Self::BITS);
        self.shr_bits(by)
    }
}

impl<const L: usize> FromStr for WideUint<L> {
    type Err = Error;

    /// Parses an unsigned decimal integer.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::EnforceType("empty string".to_string()));
        }
        let mut acc = Self::ZERO;
        for c in s.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| Error::EnforceType(s.to_string()))?;
            let (scaled, carry) = acc.overflowing_mul_u32(10);
            let (next, overflow) = scaled.overflowing_add(&Self::from(digit));
            if carry != 0 || overflow {
                return Err(Error::Range(format!(
                    "{} does not fit in {} bits",
                    s,
                    Self::BITS
                )));
            }
            acc = next;
        }
        Ok(acc)
    }
}

impl<const L: usize> fmt::Display for WideUint<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CHUNK: u32 = 1_000_000_000;

        let mut chunks = Vec::new();
        let mut rest = *self;
        while !rest.is_zero() {
            // divisor is nonzero
            let (q, r) = rest.div_rem_u32(CHUNK).map_err(|_| fmt::Error)?;
            chunks.push(r);
            rest = q;
        }

        let mut s = chunks.pop().unwrap_or(0).to_string();
        for chunk in chunks.iter().rev() {
            s.push_str(&format!("{:09}", chunk));
        }
        f.pad_integral(true, "", &s)
    }
}

impl<const L: usize> fmt::LowerHex for WideUint<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_minimal_bytes_be();
        let mut s = format!("{:x}", bytes[0]);
        for b in &bytes[1..] {
            s.push_str(&format!("{:02x}", b));
        }
        f.pad_integral(true, "0x", &s)
    }
}

impl<const L: usize> fmt::Debug for WideUint<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}({:#x})", Self::BITS, self)
    }
}

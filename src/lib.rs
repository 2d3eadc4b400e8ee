#![warn(missing_docs)]
//! Exact wide-integer arithmetic and block hash compression engines.
//!
//! The [`uint`] module provides 32- to 512-bit unsigned integers with
//! range-checked shifts and rotations, carry-propagating addition, schoolbook
//! multiplication, constant-time comparison and byte conversion. The hash
//! modules implement MD4, MD5, RIPEMD-128, the SHA-2 family, Whirlpool and
//! BLAKE2b as pure compression [`Engine`]s, driven by the streaming
//! [`Hasher`] context or through the `digest` crate's `CoreWrapper`.
//!
//! MD4 and MD5 are broken; they are here for compatibility and their known
//! collisions reproduce as published.
//!
//! # Example
//! ```
//! use widehash::{blake2b, md4};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!   let mut h = md4::new();
//!   let bytes_written = h.update("hello world".as_bytes())?;
//!   println!("Bytes written: {}", bytes_written);
//!   println!("Result: {}", hex::encode(h.sum()));
//!
//!   let mut b = blake2b::new(blake2b::Blake2bParams::new().digest_len(32).key(b"k"))?;
//!   b.update(b"hello world")?;
//!   assert_eq!(b.finalize().len(), 32);
//!
//!   Ok(())
//! }
//! ```

/// `blake2b` is BLAKE2b with its full parameter block.
pub mod blake2b;
/// `core_api` adapts the engines to the `digest` crate's block-level API.
pub mod core_api;
/// `endian` reads and writes block words.
pub mod endian;
/// `engine` defines the compression function interface.
pub mod engine;
/// `error` holds the crate error type.
pub mod error;
/// `hasher` is the streaming hash context.
pub mod hasher;
/// `md4` is MD4 (RFC 1320).
pub mod md4;
/// `md5` is MD5 (RFC 1321).
pub mod md5;
/// `pad` implements message padding.
pub mod pad;
/// `ripemd128` is RIPEMD-128.
pub mod ripemd128;
/// `sha256` is SHA-224 and SHA-256.
pub mod sha256;
/// `sha512` is SHA-384, SHA-512 and SHA-512/t.
pub mod sha512;
/// `uint` holds the exact fixed-width integers.
pub mod uint;
/// `whirlpool` is the Whirlpool hash.
pub mod whirlpool;

pub use crate::engine::Engine;
pub use crate::error::{Error, Result};
pub use crate::hasher::{Hasher, Phase};

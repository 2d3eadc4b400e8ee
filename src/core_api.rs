use std::fmt;

use digest::{
    block_buffer::{Eager, Lazy},
    core_api::{AlgorithmName, Buffer, BufferKindUser, CoreWrapper, FixedOutputCore, UpdateCore},
    crypto_common::{Block, BlockSizeUser},
    typenum::{U128, U16, U28, U32, U48, U64},
    HashMarker, Output, OutputSizeUser, Reset,
};

use crate::blake2b::Blake2b;
use crate::engine::Engine;
use crate::md4::Md4;
use crate::md5::Md5;
use crate::ripemd128::Ripemd128;
use crate::sha256::Sha256;
use crate::sha512::Sha512;
use crate::whirlpool::Whirlpool;

macro_rules! engine_core {
    (
        $(#[$doc:meta])*
        $core:ident, $wrapper:ident, $engine:ty, $ctor:expr,
        block: $block:ty, output: $out:ty, buffer: $kind:ty, name: $name:literal
    ) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $core {
            engine: $engine,
            state: <$engine as Engine>::State,
            len: u64, // bytes compressed so far
        }

        #[doc = concat!("`digest` hasher computing ", $name, ".")]
        pub type $wrapper = CoreWrapper<$core>;

        impl Default for $core {
            fn default() -> Self {
                let engine: $engine = $ctor;
                Self {
                    state: engine.init(),
                    engine,
                    len: 0,
                }
            }
        }

        impl Reset for $core {
            fn reset(&mut self) {
                self.state = self.engine.init();
                self.len = 0;
            }
        }

        impl HashMarker for $core {}

        impl BlockSizeUser for $core {
            type BlockSize = $block;
        }

        impl BufferKindUser for $core {
            type BufferKind = $kind;
        }

        impl OutputSizeUser for $core {
            type OutputSize = $out;
        }

        impl UpdateCore for $core {
            fn update_blocks(&mut self, blocks: &[Block<Self>]) {
                for b in blocks {
                    self.state = self.engine.compress_block(&self.state, b);
                    self.len += b.len() as u64;
                }
            }
        }

        impl FixedOutputCore for $core {
            fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
                let tail = buffer.get_data();
                let total_len = self.len + tail.len() as u64; // number of input bytes written
                out.copy_from_slice(&self.engine.finalize(&self.state, tail, total_len));
            }
        }

        impl AlgorithmName for $core {
            fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($name)
            }
        }

        impl fmt::Debug for $core {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!($name, "Core { ... }"))
            }
        }
    };
}

engine_core!(
    /// Md4Core is the block-level MD4 core.
    Md4Core, Md4Digest, Md4, Md4,
    block: U64, output: U16, buffer: Eager, name: "Md4"
);

engine_core!(
    /// Md5Core is the block-level MD5 core.
    Md5Core, Md5Digest, Md5, Md5,
    block: U64, output: U16, buffer: Eager, name: "Md5"
);

engine_core!(
    /// Ripemd128Core is the block-level RIPEMD-128 core.
    Ripemd128Core, Ripemd128Digest, Ripemd128, Ripemd128,
    block: U64, output: U16, buffer: Eager, name: "Ripemd128"
);

engine_core!(
    /// Sha224Core is the block-level SHA-224 core.
    Sha224Core, Sha224Digest, Sha256, Sha256::sha224(),
    block: U64, output: U28, buffer: Eager, name: "Sha224"
);

engine_core!(
    /// Sha256Core is the block-level SHA-256 core.
    Sha256Core, Sha256Digest, Sha256, Sha256::sha256(),
    block: U64, output: U32, buffer: Eager, name: "Sha256"
);

engine_core!(
    /// Sha384Core is the block-level SHA-384 core.
    Sha384Core, Sha384Digest, Sha512, Sha512::sha384(),
    block: U128, output: U48, buffer: Eager, name: "Sha384"
);

engine_core!(
    /// Sha512Core is the block-level SHA-512 core.
    Sha512Core, Sha512Digest, Sha512, Sha512::sha512(),
    block: U128, output: U64, buffer: Eager, name: "Sha512"
);

engine_core!(
    /// Sha512_224Core is the block-level SHA-512/224 core.
    Sha512_224Core, Sha512_224Digest, Sha512, Sha512::sha512_224(),
    block: U128, output: U28, buffer: Eager, name: "Sha512_224"
);

engine_core!(
    /// Sha512_256Core is the block-level SHA-512/256 core.
    Sha512_256Core, Sha512_256Digest, Sha512, Sha512::sha512_256(),
    block: U128, output: U32, buffer: Eager, name: "Sha512_256"
);

engine_core!(
    /// WhirlpoolCore is the block-level Whirlpool core.
    WhirlpoolCore, WhirlpoolDigest, Whirlpool, Whirlpool,
    block: U64, output: U64, buffer: Eager, name: "Whirlpool"
);

engine_core!(
    /// Blake2b512Core is the block-level unkeyed BLAKE2b-512 core. The
    /// buffer is lazy so the last block reaches finalization uncompressed.
    Blake2b512Core, Blake2b512Digest, Blake2b, Blake2b::default(),
    block: U128, output: U64, buffer: Lazy, name: "Blake2b512"
);

#[cfg(test)]
pub mod test {
    use std::io::Write;

    use super::*;
    use crate::hasher::Hasher;
    use crate::testutil::shake_bytes;
    use digest::{Digest, FixedOutput, Update};

    fn check<D, E>(engine: E)
    where
        D: Default + Update + FixedOutput,
        E: Engine,
    {
        // covers empty, partial, exact and multi-block inputs
        for n in [0, 1, 63, 64, 65, 127, 128, 129, 255, 256, 1000] {
            let input = shake_bytes("core api", n);
            let want = Hasher::digest(engine.clone(), &input);

            let mut h = D::default();
            let cut = n / 3;
            h.update(&input[..cut]);
            h.update(&input[cut..]);
            let sum = h.finalize_fixed();
            assert_eq!(
                hex::encode(&sum),
                hex::encode(&want),
                "length {} mismatched",
                n
            );
        }
    }

    #[test]
    fn cores_match_engines() {
        check::<Md4Digest, _>(Md4);
        check::<Md5Digest, _>(Md5);
        check::<Ripemd128Digest, _>(Ripemd128);
        check::<Sha224Digest, _>(Sha256::sha224());
        check::<Sha256Digest, _>(Sha256::sha256());
        check::<Sha384Digest, _>(Sha512::sha384());
        check::<Sha512Digest, _>(Sha512::sha512());
        check::<Sha512_224Digest, _>(Sha512::sha512_224());
        check::<Sha512_256Digest, _>(Sha512::sha512_256());
        check::<WhirlpoolDigest, _>(Whirlpool);
        check::<Blake2b512Digest, _>(Blake2b::default());
    }

    #[test]
    fn digest_trait() {
        let sum = Sha256Digest::digest(b"abc");
        assert_eq!(
            hex::encode(sum),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        let sum = Blake2b512Digest::digest(b"abc");
        assert_eq!(
            hex::encode(sum),
            "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d17d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923"
        );
    }

    #[test]
    fn reset() {
        let input = shake_bytes("core api reset", 600);

        let mut h = WhirlpoolDigest::default();
        h.write_all(&input).unwrap();
        Reset::reset(&mut h);
        Update::update(&mut h, b"abc");

        let sum = hex::encode(h.finalize_fixed());
        let expected_sum = "4e2448a4c6f486bb16b6562c73b4020bf3043e3a731bce721ae1b303d97e6d4c7181eebdb6c57e277d0e34957114cbd6c797fc9d95d8b582d225292076d4eef5";
        assert_eq!(sum, expected_sum, "got {}, want {}", sum, expected_sum);
    }

    #[test]
    fn debug_hides_state() {
        assert_eq!(format!("{:?}", Md4Core::default()), "Md4Core { ... }");
        assert_eq!(
            format!("{:?}", Sha512_256Core::default()),
            "Sha512_256Core { ... }"
        );
    }
}

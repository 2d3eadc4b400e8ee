//! Cross-checks every engine against the RustCrypto implementations.
use blake2::digest::{Mac, VariableOutput};
use proptest::prelude::*;
use sha2::Digest as _;

use widehash::blake2b::{Blake2b, Blake2bParams};
use widehash::md4::Md4;
use widehash::md5::Md5;
use widehash::ripemd128::Ripemd128;
use widehash::sha256::Sha256;
use widehash::sha512::Sha512;
use widehash::whirlpool::Whirlpool;
use widehash::{Engine, Hasher};

/// Feeds `data` in data-dependent chunk sizes and returns the digest.
fn streamed<E: Engine>(engine: E, data: &[u8]) -> Vec<u8> {
    let mut h = Hasher::new(engine);
    let mut i = 0usize;
    while i < data.len() {
        let step = (data[i] as usize % 97) + 1;
        let end = std::cmp::min(data.len(), i + step);
        h.update(&data[i..end]).unwrap();
        i = end;
    }
    h.finalize()
}

fn data() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..1024)
}

proptest! {
    #[test]
    fn md4_matches(data in data()) {
        let expected = md4::Md4::digest(&data).to_vec();
        prop_assert_eq!(Hasher::digest(Md4, &data), expected.clone());
        prop_assert_eq!(streamed(Md4, &data), expected);
    }

    #[test]
    fn md5_matches(data in data()) {
        let expected = md5::Md5::digest(&data).to_vec();
        prop_assert_eq!(Hasher::digest(Md5, &data), expected.clone());
        prop_assert_eq!(streamed(Md5, &data), expected);
    }

    #[test]
    fn ripemd128_matches(data in data()) {
        let expected = ripemd::Ripemd128::digest(&data).to_vec();
        prop_assert_eq!(Hasher::digest(Ripemd128, &data), expected.clone());
        prop_assert_eq!(streamed(Ripemd128, &data), expected);
    }

    #[test]
    fn sha256_family_matches(data in data()) {
        prop_assert_eq!(streamed(Sha256::sha224(), &data), sha2::Sha224::digest(&data).to_vec());
        prop_assert_eq!(streamed(Sha256::sha256(), &data), sha2::Sha256::digest(&data).to_vec());
    }

    #[test]
    fn sha512_family_matches(data in data()) {
        prop_assert_eq!(streamed(Sha512::sha384(), &data), sha2::Sha384::digest(&data).to_vec());
        prop_assert_eq!(streamed(Sha512::sha512(), &data), sha2::Sha512::digest(&data).to_vec());
        prop_assert_eq!(
            streamed(Sha512::sha512_224(), &data),
            sha2::Sha512_224::digest(&data).to_vec()
        );
        prop_assert_eq!(
            streamed(Sha512::sha512_256(), &data),
            sha2::Sha512_256::digest(&data).to_vec()
        );
    }

    #[test]
    fn whirlpool_matches(data in data()) {
        let expected = whirlpool::Whirlpool::digest(&data).to_vec();
        prop_assert_eq!(Hasher::digest(Whirlpool, &data), expected.clone());
        prop_assert_eq!(streamed(Whirlpool, &data), expected);
    }

    #[test]
    fn blake2b_matches(data in data()) {
        let expected = blake2::Blake2b512::digest(&data).to_vec();
        prop_assert_eq!(Hasher::digest(Blake2b::default(), &data), expected.clone());
        prop_assert_eq!(streamed(Blake2b::default(), &data), expected);
    }

    #[test]
    fn blake2b_variable_output_matches(data in data(), len in 1usize..=64) {
        let mut reference = blake2::Blake2bVar::new(len).unwrap();
        blake2::digest::Update::update(&mut reference, &data);
        let mut expected = vec![0u8; len];
        reference.finalize_variable(&mut expected).unwrap();

        let engine = Blake2bParams::new().digest_len(len).build().unwrap();
        prop_assert_eq!(streamed(engine, &data), expected);
    }

    #[test]
    fn blake2b_keyed_matches(
        data in data(),
        key in proptest::collection::vec(any::<u8>(), 1..=64),
        salt in any::<[u8; 16]>(),
        personal in any::<[u8; 16]>(),
    ) {
        let mut mac = blake2::Blake2bMac512::new_with_salt_and_personal(&key, &salt, &personal).unwrap();
        mac.update(&data);
        let expected = mac.finalize().into_bytes().to_vec();

        let engine = Blake2bParams::new()
            .key(&key)
            .salt(&salt)
            .personal(&personal)
            .build()
            .unwrap();
        prop_assert_eq!(Hasher::digest(engine.clone(), &data), expected.clone());
        prop_assert_eq!(streamed(engine, &data), expected);
    }
}

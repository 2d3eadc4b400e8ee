use criterion::{criterion_group, criterion_main, Criterion};
use digest::Update;
use digest::FixedOutput;
use rand::Rng;
use widehash::core_api::{Blake2b512Digest, Sha256Digest, WhirlpoolDigest};
use widehash::uint::U512;
use widehash::{sha512, Hasher};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rnd = rand::thread_rng();
    let mut buf = [0; 600];
    for i in buf.iter_mut() {
        *i = rnd.gen();
    }

    c.bench_function("hash 600 bytes sha256", |b| {
        b.iter(|| {
            let mut cw = Sha256Digest::default();
            cw.update(&buf);
            cw.finalize_fixed();
        })
    });

    c.bench_function("hash 600 bytes whirlpool", |b| {
        b.iter(|| {
            let mut cw = WhirlpoolDigest::default();
            cw.update(&buf);
            cw.finalize_fixed();
        })
    });

    c.bench_function("hash 600 bytes blake2b", |b| {
        b.iter(|| {
            let mut cw = Blake2b512Digest::default();
            cw.update(&buf);
            cw.finalize_fixed();
        })
    });

    c.bench_function("stream 600 bytes sha512", |b| {
        b.iter(|| {
            let mut h: Hasher<_> = sha512::new_sha512();
            for chunk in buf.chunks(100) {
                let _ = h.update(chunk);
            }
            h.finalize();
        })
    });

    let mut limbs = [[0u32; 16]; 2];
    limbs.iter_mut().for_each(|l| rnd.fill(&mut l[..]));
    let (x, y) = (U512::from_limbs(limbs[0]), U512::from_limbs(limbs[1]));
    c.bench_function("u512 wrapping_mul", |b| b.iter(|| x.wrapping_mul(&y)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

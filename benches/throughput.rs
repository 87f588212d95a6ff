use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tabula::{AlphabetCatalog, CipherRegistry, CipherSpec, ChainedTabulaRecta, KeyMaterial, Variant};

/// Input sizes in characters: 1K, 16K, 64K
const SIZES: &[usize] = &[1024, 16384, 65536];

fn create_text(seed: u64, len: usize) -> String {
    // Simple LCG for reproducible mixed-case text with spaces and digits
    const POOL: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789 ,.";
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            POOL[(state >> 33) as usize % POOL.len()] as char
        })
        .collect()
}

fn create_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            (state >> 33) as u8
        })
        .collect()
}

fn material() -> KeyMaterial {
    KeyMaterial::default()
        .with_key('K')
        .with_offset(3)
        .with_secret("LEMON")
        .with_affine(7, 3)
}

fn bench_text(c: &mut Criterion) {
    let catalog = AlphabetCatalog::builtin().unwrap();
    let registry = CipherRegistry::builtin();
    let mut group = c.benchmark_group("Text encode");

    for variant in Variant::ALL {
        let chain = ChainedTabulaRecta::from_alphabet(catalog.get("latin").unwrap().clone())
            .with_alphabet(catalog.get("digits").unwrap().clone());
        let spec = CipherSpec {
            cipher: variant,
            material: material(),
        };
        let mut cipher = spec.build(&registry, chain).unwrap();

        for &len in SIZES {
            let text = create_text(42, len);
            group.throughput(Throughput::Elements(len as u64));
            group.bench_with_input(BenchmarkId::new(variant.name(), len), &len, |bencher, &_| {
                bencher.iter(|| cipher.encode(black_box(&text)).unwrap())
            });
        }
    }

    group.finish();
}

fn bench_binary(c: &mut Criterion) {
    let catalog = AlphabetCatalog::builtin().unwrap();
    let registry = CipherRegistry::builtin();
    let mut group = c.benchmark_group("Binary encode");

    for variant in [Variant::Caesar, Variant::Vigenere] {
        let chain = ChainedTabulaRecta::from_alphabet(catalog.get("bytes").unwrap().clone());
        let spec = CipherSpec {
            cipher: variant,
            material: material(),
        };
        let mut cipher = spec.build(&registry, chain).unwrap();

        for &len in SIZES {
            let data = create_bytes(123, len);
            group.throughput(Throughput::Bytes(len as u64));
            group.bench_with_input(BenchmarkId::new(variant.name(), len), &len, |bencher, &_| {
                bencher.iter(|| cipher.encode_bytes(black_box(&data)).unwrap())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_text, bench_binary);
criterion_main!(benches);

use archmage::SimdToken;
use criterion::{BenchmarkGroup, Criterion, Throughput, measurement::WallTime};
use twirl::{PixelError, Rotation};

// === SIMD tier detection ===

fn probe<T: SimdToken>() -> &'static str {
    if T::summon().is_some() {
        "available"
    } else {
        "not available"
    }
}

fn print_simd_info() {
    eprintln!("=== SIMD Tier Detection ===");
    #[cfg(target_arch = "x86_64")]
    {
        eprintln!(
            "  AVX2+FMA (x86-64-v3):    {}",
            probe::<archmage::X64V3Token>()
        );
    }
    #[cfg(target_arch = "aarch64")]
    {
        eprintln!(
            "  Arm64-v2:                {}",
            probe::<archmage::Arm64V2Token>()
        );
    }
    #[cfg(target_arch = "wasm32")]
    {
        eprintln!(
            "  WASM SIMD128:            {}",
            probe::<archmage::Wasm128Token>()
        );
    }
    eprintln!("  Scalar:                  always available");
    eprintln!("===========================");
}

// === Scalar disable/enable via archmage ===

fn disable_all_simd() {
    let _ = archmage::dangerously_disable_tokens_except_wasm(true);
}

fn enable_all_simd() {
    let _ = archmage::dangerously_disable_tokens_except_wasm(false);
}

// === Naive baselines: per-pixel index math, packed buffers ===

fn naive_rotate(r: Rotation, src: &[u8], dst: &mut [u8], w: usize, h: usize, bpp: usize) {
    let (dw, dh) = r.output_size(w, h);
    for y in 0..dh {
        for x in 0..dw {
            let (sx, sy) = match r {
                Rotation::Deg0 => (x, y),
                Rotation::Deg90 => (y, h - 1 - x),
                Rotation::Deg180 => (w - 1 - x, h - 1 - y),
                Rotation::Deg270 => (w - 1 - y, x),
            };
            let s = (sy * w + sx) * bpp;
            let d = (y * dw + x) * bpp;
            dst[d..d + bpp].copy_from_slice(&src[s..s + bpp]);
        }
    }
}

// === Benchmark helpers ===

const W: usize = 1920;
const H: usize = 1080;

type RotateFn = fn(&[u8], &mut [u8], usize, usize, usize, usize, usize) -> Result<(), PixelError>;

/// Benchmark a quarter turn with 3 variants: twirl (best tier), twirl_scalar, naive.
fn bench_quarter(group: &mut BenchmarkGroup<WallTime>, r: Rotation, f: RotateFn, bpp: usize) {
    let src: Vec<u8> = (0..W * H * bpp).map(|i| (i % 251) as u8).collect();
    let (dw, _) = r.output_size(W, H);

    group.bench_function("twirl", |b| {
        let mut dst = vec![0u8; src.len()];
        b.iter(|| f(&src, &mut dst, W, H, bpp, W * bpp, dw * bpp).unwrap());
    });

    disable_all_simd();
    group.bench_function("twirl_scalar", |b| {
        let mut dst = vec![0u8; src.len()];
        b.iter(|| f(&src, &mut dst, W, H, bpp, W * bpp, dw * bpp).unwrap());
    });
    enable_all_simd();

    group.bench_function("naive", |b| {
        let mut dst = vec![0u8; src.len()];
        b.iter(|| naive_rotate(r, &src, &mut dst, W, H, bpp));
    });
}

// === Benchmark groups ===

fn bench_rotate_90_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate_90_rgba");
    group.throughput(Throughput::Bytes((W * H * 4) as u64));
    bench_quarter(&mut group, Rotation::Deg90, twirl::rotate_90, 4);
    group.finish();
}

fn bench_rotate_180_rgb(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate_180_rgb");
    group.throughput(Throughput::Bytes((W * H * 3) as u64));
    bench_quarter(&mut group, Rotation::Deg180, twirl::rotate_180, 3);
    group.finish();
}

fn bench_rotate_270_gray(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate_270_gray");
    group.throughput(Throughput::Bytes((W * H) as u64));
    bench_quarter(&mut group, Rotation::Deg270, twirl::rotate_270, 1);
    group.finish();
}

fn bench_bilinear_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("bilinear_rgba_30deg");
    let angle = 30f64.to_radians();
    let (dw, dh) = twirl::rotated_bounds(W, H, angle);
    group.throughput(Throughput::Bytes((dw * dh * 4) as u64));
    let src: Vec<u8> = (0..W * H * 4).map(|i| (i % 251) as u8).collect();

    group.bench_function("twirl", |b| {
        let mut dst = vec![0u8; dw * dh * 4];
        b.iter(|| {
            twirl::rotate_bilinear(&src, &mut dst, 4, W, H, W * 4, dw, dh, dw * 4, angle).unwrap()
        });
    });

    disable_all_simd();
    group.bench_function("twirl_scalar", |b| {
        let mut dst = vec![0u8; dw * dh * 4];
        b.iter(|| {
            twirl::rotate_bilinear(&src, &mut dst, 4, W, H, W * 4, dw, dh, dw * 4, angle).unwrap()
        });
    });
    enable_all_simd();
    group.finish();
}

// === Custom main for tier detection before criterion runs ===

fn main() {
    print_simd_info();

    let mut criterion = Criterion::default().configure_from_args();
    bench_rotate_90_rgba(&mut criterion);
    bench_rotate_180_rgb(&mut criterion);
    bench_rotate_270_gray(&mut criterion);
    bench_bilinear_rgba(&mut criterion);
    criterion.final_summary();
}

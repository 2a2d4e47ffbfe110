use criterion::{Criterion, black_box, criterion_group, criterion_main};
use styled_qr::utils::grayscale::{invert_luminance, rgba_to_luminance, rgba_to_luminance_scalar};

fn bench_rgba_to_luminance_medium(c: &mut Criterion) {
    let image = vec![128u8; 640 * 480 * 4];
    c.bench_function("rgba_to_luminance_640x480", |b| {
        b.iter(|| rgba_to_luminance(black_box(&image), black_box(640), black_box(480)))
    });
}

fn bench_rgba_to_luminance_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 4];
    c.bench_function("rgba_to_luminance_1920x1080", |b| {
        b.iter(|| rgba_to_luminance(black_box(&image), black_box(1920), black_box(1080)))
    });
}

fn bench_rgba_to_luminance_scalar_large(c: &mut Criterion) {
    let image = vec![128u8; 1920 * 1080 * 4];
    c.bench_function("rgba_to_luminance_scalar_1920x1080", |b| {
        b.iter(|| rgba_to_luminance_scalar(black_box(&image), black_box(1920), black_box(1080)))
    });
}

fn bench_invert_luminance(c: &mut Criterion) {
    let gray = vec![128u8; 1920 * 1080];
    c.bench_function("invert_luminance_1920x1080", |b| {
        b.iter(|| invert_luminance(black_box(&gray)))
    });
}

criterion_group!(
    benches,
    bench_rgba_to_luminance_medium,
    bench_rgba_to_luminance_large,
    bench_rgba_to_luminance_scalar_large,
    bench_invert_luminance
);
criterion_main!(benches);

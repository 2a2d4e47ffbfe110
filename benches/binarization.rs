use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use styled_qr::utils::binarization::{adaptive_binarize, otsu_binarize, threshold_binarize};

/// Horizontal gradient with a stripe pattern on top
fn test_image(width: usize, height: usize) -> Vec<u8> {
    (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            let base = (x * 200 / width) as u8;
            if (x / 8 + y / 8) % 2 == 0 { base / 2 } else { base.saturating_add(40) }
        })
        .collect()
}

fn bench_otsu_binarize_medium(c: &mut Criterion) {
    let gray = test_image(640, 480);
    c.bench_function("otsu_binarize_640x480", |b| {
        b.iter(|| otsu_binarize(black_box(&gray), black_box(640), black_box(480)))
    });
}

fn bench_adaptive_binarize_windows(c: &mut Criterion) {
    let gray = test_image(640, 480);
    let mut group = c.benchmark_group("adaptive_binarize_640x480");
    for window in [15usize, 31, 63] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &window| {
            b.iter(|| adaptive_binarize(black_box(&gray), 640, 480, window))
        });
    }
    group.finish();
}

fn bench_threshold_binarize_medium(c: &mut Criterion) {
    let gray = test_image(640, 480);
    c.bench_function("threshold_binarize_640x480", |b| {
        b.iter(|| {
            threshold_binarize(
                black_box(&gray),
                black_box(640),
                black_box(480),
                black_box(128),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_otsu_binarize_medium,
    bench_adaptive_binarize_windows,
    bench_threshold_binarize_medium
);
criterion_main!(benches);

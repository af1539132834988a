//! Error kernel throughput per level, and a full catalog scan.

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use gf_core::block::{CELL_PIXELS, CellBlock, CellMask};
use gf_core::pixel::{ColorPair, Pixel};
use gf_fit::catalog::GlyphCatalog;
use gf_fit::dispatch::Kernel;
use gf_fit::selector::Selector;

fn gradient_block() -> CellBlock {
    CellBlock::from_fn(|i| {
        let v = (i * 4) as u8;
        Pixel::new(v, 255 - v, v / 2, 255)
    })
}

fn bench_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_kernel");
    group.throughput(Throughput::Elements(CELL_PIXELS as u64));

    let block = gradient_block();
    let mask = CellMask::from_bits(0x0F0F_F0F0_3C3C_C3C3);
    let pair = ColorPair::new(Pixel::rgb(250, 3, 128), Pixel::rgb(1, 200, 60));

    for level in Kernel::available_levels() {
        let Ok(kernel) = Kernel::with_level(level) else {
            continue;
        };
        group.bench_function(level.name(), |b| {
            b.iter(|| kernel.error(black_box(&block), black_box(pair), black_box(&mask)));
        });
    }
    group.finish();
}

fn bench_catalog_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("best_fit_blocks");
    let catalog = GlyphCatalog::blocks();
    group.throughput(Throughput::Elements(catalog.len() as u64));
    let block = gradient_block();

    for level in Kernel::available_levels() {
        let Ok(selector) = Kernel::with_level(level).and_then(|k| Selector::new(k, &catalog))
        else {
            continue;
        };
        group.bench_function(level.name(), |b| {
            b.iter(|| selector.best_fit_mean_colors(black_box(&block)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_levels, bench_catalog_scan);
criterion_main!(benches);

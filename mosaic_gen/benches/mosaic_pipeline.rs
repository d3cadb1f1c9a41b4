// Benchmarks for the tessellation + shading hot path.
//
// Run with: cargo bench -p mosaic_gen

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use mosaic_gen::config::PaletteTable;
use mosaic_gen::pipeline::{self, RenderOptions};
use mosaic_gen::sentiment::{CachedClassifier, LexiconClassifier};
use mosaic_gen::tessellate;
use mosaic_gen::types::{EmotionKind, QuestionnaireInput};
use mosaic_prng::MosaicRng;

fn bench_input() -> QuestionnaireInput {
    QuestionnaireInput {
        calm: 3,
        energy: 7,
        mood: 4,
        social: 6,
        control: 8,
        emotion: EmotionKind::Anxiety,
        reflection: "Benchmark reflection with enough characters to be valid.".into(),
    }
}

fn bench_tessellation(c: &mut Criterion) {
    c.bench_function("tessellate_250_sites", |b| {
        b.iter(|| {
            let mut rng = MosaicRng::new(42);
            black_box(tessellate::generate(&mut rng, 450.0, 450.0, 250, 40.0))
        })
    });
}

fn bench_full_render(c: &mut Criterion) {
    let table = PaletteTable::builtin();
    let mut classifier = CachedClassifier::new(LexiconClassifier);
    let generation = pipeline::generate(bench_input(), &mut classifier, &table);

    c.bench_function("render_450px", |b| {
        b.iter(|| black_box(pipeline::render(&generation.state, RenderOptions { size: 450 })))
    });
}

criterion_group!(benches, bench_tessellation, bench_full_render);
criterion_main!(benches);

//! Benchmarks for the text flow engine.
//!
//! Run with: cargo bench

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use librarium::{
    Book, Catalog, FlowArea, Librarium, MonospaceMeasure, Point, TextFlowEngine,
};

const PARAGRAPH: &str = "The reeds grow taller than a rider, and the water between them \
    is the colour of weak tea. Travellers who keep to the causeway reach the ferry by \
    dusk; those who do not are rarely seen again. ";

fn long_page() -> String {
    PARAGRAPH.repeat(20)
}

fn escaped_page() -> String {
    "\\C[2]Beware\\C[0] the \\{fog\\} after dusk. \\I[87] \\V[3] \\G of coin. ".repeat(40)
}

fn area() -> FlowArea {
    FlowArea::new(Point::default(), 780.0, 388.0, 36.0)
}

// ============================================================================
// Flow Benchmarks
// ============================================================================

fn bench_flow_plain(c: &mut Criterion) {
    let engine = TextFlowEngine::new();
    let measure = MonospaceMeasure::new(14.0);
    let text = long_page();
    let area = area();

    c.bench_function("flow_plain", |b| {
        b.iter(|| engine.layout(black_box(&text), &measure, &area));
    });
}

fn bench_flow_escapes(c: &mut Criterion) {
    let engine = TextFlowEngine::new();
    let measure = MonospaceMeasure::new(14.0);
    let text = escaped_page();
    let area = area();

    c.bench_function("flow_escapes", |b| {
        b.iter(|| engine.layout(black_box(&text), &measure, &area));
    });
}

fn bench_flow_closure_measure(c: &mut Criterion) {
    let engine = TextFlowEngine::new();
    let measure = |text: &str| text.chars().count() as f32 * 14.0;
    let text = long_page();
    let area = area();

    c.bench_function("flow_closure_measure", |b| {
        b.iter(|| engine.layout(black_box(&text), &measure, &area));
    });
}

// ============================================================================
// Library Benchmarks
// ============================================================================

fn bench_read_through_book(c: &mut Criterion) {
    let book = (0..50).fold(Book::new("Field Notes"), |book, _| book.with_page(PARAGRAPH));
    let mut library = Librarium::new(Catalog::new(vec![book]));
    let measure = MonospaceMeasure::new(14.0);

    c.bench_function("read_through_book", |b| {
        b.iter(|| {
            library.open_reading("field").unwrap();
            loop {
                black_box(library.get_current_page_layout(&measure, 780.0, 388.0).unwrap());
                if !library.next_page().unwrap() {
                    break;
                }
            }
        });
    });
}

criterion_group!(
    benches,
    // Flow
    bench_flow_plain,
    bench_flow_escapes,
    bench_flow_closure_measure,
    // Library
    bench_read_through_book,
);
criterion_main!(benches);

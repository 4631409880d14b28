//! Text Region Filter Benchmarks
//!
//! Filtering runs once per photographed page, so a dense page (a few hundred
//! blocks) should stay well under a millisecond.
//!
//! Run with: `cargo bench --bench filter_performance`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use quote_scan_server::ocr::{
    Block, BoundingPoly, BreakType, DetectedBreak, FilterConfig, LineBreakMode, PageAnnotation,
    Paragraph, Symbol, TextProperty, TextRegionFilter, Vertex, Word,
};

const WIDTH: i32 = 1000;
const HEIGHT: i32 = 1500;

fn word(text: &str, brk: BreakType) -> Word {
    let chars: Vec<char> = text.chars().collect();
    let symbols = chars
        .iter()
        .enumerate()
        .map(|(i, c)| Symbol {
            text: c.to_string(),
            property: (i + 1 == chars.len()).then(|| TextProperty {
                detected_break: Some(DetectedBreak { break_type: brk }),
            }),
        })
        .collect();
    Word { symbols }
}

/// Synthetic page: a header, `body_blocks` body blocks, a side note and a footer
fn create_page(body_blocks: usize) -> PageAnnotation {
    let rect = |x0: i32, y0: i32, x1: i32, y1: i32| BoundingPoly {
        vertices: vec![
            Vertex::new(x0, y0),
            Vertex::new(x1, y0),
            Vertex::new(x1, y1),
            Vertex::new(x0, y1),
        ],
    };
    let paragraph = |words: usize| Paragraph {
        words: (0..words)
            .map(|i| {
                let brk = if i + 1 == words {
                    BreakType::LineBreak
                } else {
                    BreakType::Space
                };
                word("문장은", brk)
            })
            .collect(),
    };

    let mut blocks = vec![Block {
        bounding_box: Some(rect(50, 10, 900, 100)),
        confidence: 0.95,
        paragraphs: vec![paragraph(6)],
    }];

    let band = (HEIGHT * 70 / 100) / body_blocks.max(1) as i32;
    for i in 0..body_blocks {
        let y0 = HEIGHT * 15 / 100 + 10 + band * i as i32;
        blocks.push(Block {
            bounding_box: Some(rect(100, y0, 800, y0 + band.max(2) - 1)),
            confidence: if i % 10 == 0 { 0.3 } else { 0.9 },
            paragraphs: vec![paragraph(12), paragraph(8)],
        });
    }

    blocks.push(Block {
        bounding_box: Some(rect(900, 500, 990, 600)),
        confidence: 0.99,
        paragraphs: vec![paragraph(2)],
    });
    blocks.push(Block {
        bounding_box: Some(rect(450, 1400, 520, 1430)),
        confidence: 0.2,
        paragraphs: vec![Paragraph {
            words: vec![word("128", BreakType::LineBreak)],
        }],
    });

    PageAnnotation {
        width: WIDTH as u32,
        height: HEIGHT as u32,
        blocks,
    }
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_region_filter");
    let filter = TextRegionFilter::default();

    for size in [10usize, 100, 400] {
        let page = create_page(size);
        group.throughput(Throughput::Elements(page.blocks.len() as u64));
        group.bench_with_input(BenchmarkId::new("filter", size), &page, |b, page| {
            b.iter(|| filter.filter(black_box(Some(page))))
        });
    }

    group.finish();
}

fn bench_line_break_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_break_mode");
    let page = create_page(100);

    for mode in [LineBreakMode::Space, LineBreakMode::Newline] {
        let filter = TextRegionFilter::new(FilterConfig {
            line_breaks: mode,
            ..FilterConfig::default()
        });
        group.bench_with_input(BenchmarkId::from_parameter(format!("{:?}", mode)), &page, |b, page| {
            b.iter(|| filter.filter(black_box(Some(page))))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_line_break_modes);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use docgraph::algo::analyzer::NeighborhoodAnalyzer;
use docgraph::embed::HashingEncoder;
use docgraph::features::{FeatureExtractor, FeaturePair};
use docgraph::graph::{DocId, Metadata, RelationshipGraph};

fn corpus(size: usize) -> Vec<FeaturePair> {
    let encoder = HashingEncoder::new(384);
    let extractor = FeatureExtractor::new(4);
    (0..size)
        .map(|i| {
            let text = format!("report {} on topic {} in sector {}", i, i % 17, i % 5);
            extractor.extract(&encoder.encode_text(&text)).unwrap()
        })
        .collect()
}

fn build(features: &[FeaturePair]) -> RelationshipGraph {
    let mut graph = RelationshipGraph::new(4);
    for (i, f) in features.iter().enumerate() {
        let doc_type = if i % 2 == 0 { "news" } else { "policy" };
        graph
            .insert(doc_type, format!("doc {}", i), Metadata::new(), f.clone())
            .unwrap();
    }
    graph
}

/// Full corpus build; O(n^2) scoring
fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");
    group.sample_size(10);

    for size in [100, 500, 2_000].iter() {
        let features = corpus(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &features, |b, features| {
            b.iter(|| build(features));
        });
    }
    group.finish();
}

/// Single query against a built graph; O(n)
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 5_000].iter() {
        let graph = build(&corpus(*size));
        let query = corpus(1).remove(0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| graph.search(&query, None, 5).unwrap());
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = NeighborhoodAnalyzer::default();

    for size in [100, 1_000].iter() {
        let graph = build(&corpus(*size));
        let center = DocId::new(*size as u64 - 1);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| analyzer.analyze(graph, center).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insertion, bench_search, bench_analyze);
criterion_main!(benches);

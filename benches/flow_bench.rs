//! Benchmark flow-view construction over a dense synthetic matrix.

use std::collections::{BTreeMap, BTreeSet};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use framealign::{
    dataset::document::{RawAlignment, RawFrame, RawResources},
    AlignConfig, AlignmentDataset, FlowViewBuilder, FrameId, MethodId, MethodType, ParamUpdate,
    RawDataset,
};

const ROWS: usize = 200;
const COLS: usize = 300;

fn synthetic() -> AlignmentDataset {
    let rows: Vec<FrameId> = (0..ROWS).map(|i| FrameId(format!("en{i}"))).collect();
    let cols: Vec<FrameId> = (0..COLS).map(|j| FrameId(format!("pt{j}"))).collect();

    let mut frames = BTreeMap::new();
    for (id, language) in rows.iter().map(|r| (r, "en")).chain(cols.iter().map(|c| (c, "pt"))) {
        frames.insert(
            id.clone(),
            RawFrame {
                name: id.to_string(),
                language: language.to_string(),
                lus: Vec::new(),
            },
        );
    }

    // deterministic pseudo-random scores in [0, 1)
    let matrix = (0..ROWS)
        .map(|i| {
            (0..COLS)
                .map(|j| ((i * 7919 + j * 104_729) % 1000) as f64 / 1000.0)
                .collect()
        })
        .collect();

    let raw = RawDataset {
        indices: vec![rows, cols],
        alignments: vec![RawAlignment {
            id: Some(MethodId::from("attr")),
            method_type: MethodType::AttributeMatching,
            description: String::new(),
            matrix,
        }],
        frames,
        resources: RawResources::default(),
    };
    AlignmentDataset::from_raw(&raw).expect("synthetic dataset should load")
}

fn bench_flow(c: &mut Criterion) {
    let dataset = synthetic();
    let method = MethodId::from("attr");
    let selected: BTreeSet<FrameId> = dataset.frames().inventory(0).iter().cloned().collect();

    let unpruned = AlignConfig::default().attribute_matching;
    let pruned = unpruned
        .apply(&ParamUpdate::default().limit_edges(true).top_k(Some(5)))
        .expect("valid params");

    let builder = FlowViewBuilder::new(&dataset);
    c.bench_function("flow_unpruned", |b| {
        b.iter(|| black_box(builder.build(&method, &unpruned, &selected)))
    });
    c.bench_function("flow_top5_per_source", |b| {
        b.iter(|| black_box(builder.build(&method, &pruned, &selected)))
    });
}

criterion_group!(benches, bench_flow);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gamerec_core::{CatalogRow, ReviewRow};
use gamerec_engine::{EngineConfig, Recommender};
use gamerec_features::{FeatureBuilder, FeatureConfig};
use rand::prelude::*;

const GENRES: &[&str] = &[
    "Action", "Adventure", "Casual", "Indie", "RPG", "Simulation", "Strategy", "Puzzle",
];
const TAGS: &[&str] = &[
    "Roguelike",
    "Pixel Graphics",
    "Atmospheric",
    "Difficult",
    "Story Rich",
    "Multiplayer",
    "Open World",
    "Relaxing",
    "Horror",
    "Crafting",
    "Survival",
    "Turn-Based",
];

fn synthetic_catalog(n: usize, rng: &mut StdRng) -> (Vec<CatalogRow>, Vec<ReviewRow>) {
    let mut rows = Vec::with_capacity(n);
    let mut reviews = Vec::with_capacity(n);
    for i in 0..n {
        let appid = i as u32 + 1;
        let genres: Vec<&str> = GENRES
            .choose_multiple(rng, rng.random_range(1..=3))
            .copied()
            .collect();
        let tags: Vec<&str> = TAGS
            .choose_multiple(rng, rng.random_range(2..=5))
            .copied()
            .collect();
        rows.push(CatalogRow {
            appid,
            name: Some(format!("Game {appid}")),
            item_type: Some("game".to_string()),
            release_date: Some(format!("1 Jan {}", 2000 + rng.random_range(0..25))),
            price_final: Some(rng.random_range(0..6000) as f32),
            is_free: Some(rng.random_bool(0.2)),
            required_age: Some(0.0),
            metacritic_score: Some(rng.random_range(40..95) as f32),
            genres: Some(genres.join(";")),
            categories: Some("Single-player".to_string()),
            tags: Some(tags.join(";")),
        });
        let total = rng.random_range(0..50_000u64);
        let positive = (total as f64 * rng.random_range(0.3..0.98)) as u64;
        reviews.push(ReviewRow {
            appid,
            review_positive: positive,
            review_negative: total - positive,
            review_total: total,
            review_ratio: if total > 0 {
                positive as f32 / total as f32
            } else {
                0.0
            },
        });
    }
    (rows, reviews)
}

fn bench_recommend(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let (rows, reviews) = synthetic_catalog(5_000, &mut rng);

    let config = FeatureConfig {
        min_tag_support: 1,
        ..FeatureConfig::default()
    };

    c.bench_function("feature_build_5k", |b| {
        b.iter(|| {
            let builder = FeatureBuilder::new(config.clone()).unwrap();
            black_box(builder.build(&rows, &reviews, &[]).unwrap())
        })
    });

    let output = FeatureBuilder::new(config)
        .unwrap()
        .build(&rows, &reviews, &[])
        .unwrap();
    let engine =
        Recommender::new(EngineConfig::default(), output.bundle, output.catalog).unwrap();

    c.bench_function("recommend_similar_5k", |b| {
        b.iter(|| black_box(engine.recommend_similar(black_box(2500), 10, true).unwrap()))
    });

    c.bench_function("recommend_for_liked_5k", |b| {
        b.iter(|| {
            black_box(
                engine
                    .recommend_for_liked(black_box(&[100, 200, 300, 400]), 10)
                    .unwrap(),
            )
        })
    });
}

criterion_group!(benches, bench_recommend);
criterion_main!(benches);

// Integration tests for gamerec: full build -> persist -> load -> query path
use gamerec_core::{CatalogRow, ReviewRow, TagRow};
use gamerec_engine::{EngineConfig, Recommender};
use gamerec_features::{FeatureBuilder, FeatureConfig, NUMERIC_FEATURES};
use gamerec_storage::{load_bundle, load_catalog, save_bundle};
use std::io::Write;

fn game(appid: u32, name: &str, genres: &str, tags: &str) -> CatalogRow {
    CatalogRow {
        appid,
        name: Some(name.to_string()),
        item_type: Some("game".to_string()),
        release_date: Some("15 Mar 2021".to_string()),
        price_final: Some(2499.0),
        is_free: Some(false),
        required_age: Some(0.0),
        metacritic_score: Some(80.0),
        genres: Some(genres.to_string()),
        categories: Some("Single-player".to_string()),
        tags: Some(tags.to_string()),
    }
}

fn reviews(appid: u32, positive: u64, total: u64) -> ReviewRow {
    ReviewRow {
        appid,
        review_positive: positive,
        review_negative: total - positive,
        review_total: total,
        review_ratio: if total > 0 {
            positive as f32 / total as f32
        } else {
            0.0
        },
    }
}

fn small_catalog() -> Vec<CatalogRow> {
    vec![
        game(10, "Rogue Cellar", "Action;Indie", "Roguelike;Pixel Graphics"),
        game(20, "Dungeon Pulse", "Action;Indie", "Roguelike;Difficult"),
        game(30, "Quiet Meadows", "Casual;Simulation", "Farming;Relaxing"),
        game(40, "Star Broker", "Strategy;Simulation", "Economy;Space"),
        game(50, "Blade Vault", "Action", "Roguelike;Difficult"),
        CatalogRow {
            item_type: Some("dlc".to_string()),
            ..game(60, "Rogue Cellar OST", "Action", "")
        },
    ]
}

fn build_engine(min_tag_support: usize) -> Recommender {
    let config = FeatureConfig {
        min_tag_support,
        ..FeatureConfig::default()
    };
    let output = FeatureBuilder::new(config)
        .unwrap()
        .build(
            &small_catalog(),
            &[
                reviews(10, 900, 1000),
                reviews(20, 450, 500),
                reviews(30, 80, 400),
                reviews(50, 60, 100),
            ],
            &[TagRow {
                appid: 50,
                tags: "Pixel Graphics".to_string(),
            }],
        )
        .unwrap();
    Recommender::new(EngineConfig::default(), output.bundle, output.catalog).unwrap()
}

#[test]
fn test_build_drops_non_games() {
    let output = FeatureBuilder::new(FeatureConfig::default())
        .unwrap()
        .build(&small_catalog(), &[], &[])
        .unwrap();
    assert_eq!(output.catalog.len(), 5);
    assert_eq!(output.dropped_rows, 1);
    assert!(output.catalog.iter().all(|g| g.appid != 60));
}

#[test]
fn test_matrix_dimensions_constant() {
    let output = FeatureBuilder::new(FeatureConfig {
        min_tag_support: 1,
        ..FeatureConfig::default()
    })
    .unwrap()
    .build(&small_catalog(), &[], &[])
    .unwrap();

    let dim = output.bundle.dim();
    assert_eq!(dim, output.bundle.feature_names.len());
    for row in &output.bundle.rows {
        assert_eq!(row.dim(), dim);
    }
    assert!(dim > NUMERIC_FEATURES.len());
}

#[test]
fn test_end_to_end_similar_query() {
    let engine = build_engine(1);

    // Rogue Cellar and Dungeon Pulse share genres and tags; Quiet Meadows
    // shares neither and must never appear.
    let recs = engine.recommend_similar(10, 3, true).unwrap();
    let appids: Vec<u32> = recs.iter().map(|r| r.appid).collect();
    assert!(appids.contains(&20));
    assert!(appids.contains(&50));
    assert!(!appids.contains(&10));
    assert!(!appids.contains(&30));
    assert!(!appids.contains(&40));
}

#[test]
fn test_end_to_end_liked_query() {
    let engine = build_engine(1);

    let recs = engine.recommend_for_liked(&[10, 20], 3).unwrap();
    assert!(!recs.is_empty());
    assert!(recs.iter().all(|r| r.appid != 10 && r.appid != 20));
    // Blade Vault is the remaining Action roguelike.
    assert_eq!(recs[0].appid, 50);
}

#[test]
fn test_unresolvable_liked_ids_are_skipped() {
    let engine = build_engine(1);
    let recs = engine.recommend_for_liked(&[10, 99999], 3).unwrap();
    assert!(recs.iter().all(|r| r.appid != 10 && r.appid != 99999));
}

#[test]
fn test_persist_and_reload_build() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("features.bin");

    let output = FeatureBuilder::new(FeatureConfig::default())
        .unwrap()
        .build(&small_catalog(), &[reviews(10, 900, 1000)], &[])
        .unwrap();
    save_bundle(&path, &output.bundle, &output.catalog).unwrap();

    let (bundle, catalog) = load_bundle(&path).unwrap();
    assert_eq!(bundle.appids, output.bundle.appids);
    assert_eq!(bundle.rows, output.bundle.rows);

    // A reloaded bundle serves queries identically to the fresh build.
    let fresh = Recommender::new(
        EngineConfig::default(),
        output.bundle,
        output.catalog,
    )
    .unwrap();
    let reloaded = Recommender::new(EngineConfig::default(), bundle, catalog).unwrap();

    let a = fresh.recommend_similar(10, 3, true).unwrap();
    let b = reloaded.recommend_similar(10, 3, true).unwrap();
    let ids_a: Vec<u32> = a.iter().map(|r| r.appid).collect();
    let ids_b: Vec<u32> = b.iter().map(|r| r.appid).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn test_table_load_to_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.jsonl");
    let mut f = std::fs::File::create(&path).unwrap();
    for row in small_catalog() {
        writeln!(f, "{}", serde_json::to_string(&row).unwrap()).unwrap();
    }
    drop(f);

    let rows = load_catalog(&path).unwrap();
    assert_eq!(rows.len(), 6);

    let output = FeatureBuilder::new(FeatureConfig::default())
        .unwrap()
        .build(&rows, &[], &[])
        .unwrap();
    let engine =
        Recommender::new(EngineConfig::default(), output.bundle, output.catalog).unwrap();
    assert_eq!(engine.len(), 5);
    assert!(engine.contains(10));
    assert!(!engine.contains(60));
}

#[test]
fn test_rebuild_and_swap_is_seamless() {
    let engine = build_engine(1);
    assert!(engine.contains(40));

    // Rebuild without Star Broker and swap the new snapshot in.
    let rows: Vec<CatalogRow> = small_catalog()
        .into_iter()
        .filter(|r| r.appid != 40)
        .collect();
    let output = FeatureBuilder::new(FeatureConfig::default())
        .unwrap()
        .build(&rows, &[], &[])
        .unwrap();
    engine.swap(output.bundle, output.catalog).unwrap();

    assert!(!engine.contains(40));
    let recs = engine.recommend_similar(10, 3, true).unwrap();
    assert!(recs.iter().all(|r| r.appid != 40));
}

#[test]
fn test_smoothing_shrinks_low_evidence_items() {
    // Blade Vault has few reviews, so its smoothed score sits close to the
    // global mean even though its raw ratio is 0.6.
    let output = FeatureBuilder::new(FeatureConfig::default())
        .unwrap()
        .build(
            &small_catalog(),
            &[reviews(10, 900, 1000), reviews(50, 60, 100)],
            &[],
        )
        .unwrap();

    let global_mean = (900.0 + 60.0) / (1000.0 + 100.0);
    let blade = output.catalog.iter().find(|g| g.appid == 50).unwrap();
    let rogue = output.catalog.iter().find(|g| g.appid == 10).unwrap();

    assert!((blade.review_score_adj - global_mean).abs() < 0.05);
    assert!(rogue.review_score_adj > blade.review_score_adj);

    // No reviews at all: exactly the global mean.
    let meadows = output.catalog.iter().find(|g| g.appid == 30).unwrap();
    assert!((meadows.review_score_adj - global_mean).abs() < 1e-6);
}

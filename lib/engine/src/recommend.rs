use crate::filter;
use crate::scorer::{ReviewScorer, ScoringConfig};
use gamerec_core::{CatalogItem, Error, KnnIndex, Result, Vector};
use gamerec_features::FeatureBundle;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration for the query engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    /// Candidate pool size fetched from the index before filtering. Must be
    /// large enough that genre filtering leaves enough survivors to fill a
    /// caller's `top_n`; the engine does not re-query a starved pool.
    pub pool_size: usize,
    pub scoring: ScoringConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pool_size: 200,
            scoring: ScoringConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.pool_size == 0 {
            return Err(Error::InvalidConfig(
                "pool_size must be at least 1".to_string(),
            ));
        }
        self.scoring.validate()
    }
}

/// One ranked recommendation. Ephemeral, produced per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub appid: u32,
    pub name: String,
    pub distance: f32,
    pub similarity: f32,
    pub review_score_adj: f32,
    pub review_volume_log: f32,
    pub overall_score: f32,
}

/// A frozen, fully consistent view of one catalog build: the index, the
/// cleaned catalog, and the scorer's normalization bounds. Queries run
/// against a snapshot without any locking.
struct Snapshot {
    index: KnnIndex,
    catalog: Vec<CatalogItem>,
    appid_to_row: HashMap<u32, usize>,
    scorer: ReviewScorer,
}

impl Snapshot {
    fn new(
        bundle: FeatureBundle,
        catalog: Vec<CatalogItem>,
        scoring: ScoringConfig,
    ) -> Result<Self> {
        bundle.validate()?;
        if bundle.len() != catalog.len() {
            return Err(Error::SchemaMismatch(format!(
                "bundle has {} rows but catalog has {} items",
                bundle.len(),
                catalog.len()
            )));
        }
        for (appid, item) in bundle.appids.iter().zip(&catalog) {
            if *appid != item.appid {
                return Err(Error::SchemaMismatch(format!(
                    "bundle appid {} does not match catalog appid {}",
                    appid, item.appid
                )));
            }
        }

        let appid_to_row = bundle
            .appids
            .iter()
            .enumerate()
            .map(|(row, &appid)| (appid, row))
            .collect();
        let scorer = ReviewScorer::new(scoring, &catalog)?;
        let index = KnnIndex::build(bundle.rows)?;

        Ok(Self {
            index,
            catalog,
            appid_to_row,
            scorer,
        })
    }
}

/// The recommender engine: resolves a query to a vector, retrieves a
/// candidate pool, genre-filters it, re-ranks by quality-adjusted score,
/// and truncates.
///
/// The engine has exactly one state, "loaded, read-only". Queries clone the
/// current snapshot `Arc` and never block each other; [`Recommender::swap`]
/// installs a complete replacement snapshot atomically, so concurrent
/// readers always see either the old or the new build, never a mix.
pub struct Recommender {
    config: EngineConfig,
    snapshot: RwLock<Arc<Snapshot>>,
}

impl Recommender {
    pub fn new(
        config: EngineConfig,
        bundle: FeatureBundle,
        catalog: Vec<CatalogItem>,
    ) -> Result<Self> {
        config.validate()?;
        let snapshot = Snapshot::new(bundle, catalog, config.scoring.clone())?;
        info!(
            items = snapshot.catalog.len(),
            dim = snapshot.index.dim(),
            pool_size = config.pool_size,
            "recommender loaded"
        );
        Ok(Self {
            config,
            snapshot: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Replace the loaded build with a freshly built one. Atomic with
    /// respect to concurrent queries.
    pub fn swap(&self, bundle: FeatureBundle, catalog: Vec<CatalogItem>) -> Result<()> {
        let next = Snapshot::new(bundle, catalog, self.config.scoring.clone())?;
        info!(items = next.catalog.len(), dim = next.index.dim(), "snapshot swapped");
        *self.snapshot.write() = Arc::new(next);
        Ok(())
    }

    #[inline]
    fn current(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.current().catalog.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, appid: u32) -> bool {
        self.current().appid_to_row.contains_key(&appid)
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommend items similar to a single reference item.
    ///
    /// Candidates must share at least one genre with the reference (when it
    /// has any). The result may be shorter than `top_n` when filtering
    /// starves the candidate pool; that is not an error.
    pub fn recommend_similar(
        &self,
        appid: u32,
        top_n: usize,
        exclude_self: bool,
    ) -> Result<Vec<Recommendation>> {
        let snap = self.current();
        let row = *snap
            .appid_to_row
            .get(&appid)
            .ok_or(Error::UnknownItem(appid))?;
        let query = snap
            .index
            .row(row)
            .ok_or_else(|| Error::SchemaMismatch(format!("row {row} missing from index")))?;

        let neighbors = snap.index.query(query, self.config.pool_size)?;

        let mut exclude = HashSet::new();
        if exclude_self {
            exclude.insert(appid);
        }
        let reference = snap.catalog[row].genres.clone();

        Ok(rank(&snap, neighbors, &reference, &exclude, top_n))
    }

    /// Recommend items for a liked-item set: the query point is the mean of
    /// the resolved seeds' feature vectors (the taste vector), the genre
    /// reference is the union of their genre sets, and every liked id is
    /// excluded from the result whether or not it resolved.
    pub fn recommend_for_liked(
        &self,
        liked_appids: &[u32],
        top_n: usize,
    ) -> Result<Vec<Recommendation>> {
        let snap = self.current();

        let mut rows = Vec::with_capacity(liked_appids.len());
        for &appid in liked_appids {
            match snap.appid_to_row.get(&appid) {
                Some(&row) => rows.push(row),
                None => debug!(appid, "liked appid not in index, skipping"),
            }
        }

        let taste = Vector::mean(rows.iter().filter_map(|&row| snap.index.row(row)))
            .ok_or(Error::NoValidSeeds)?;

        let neighbors = snap.index.query(&taste, self.config.pool_size)?;

        let mut reference = BTreeSet::new();
        for &row in &rows {
            reference.extend(snap.catalog[row].genres.iter().cloned());
        }
        let exclude: HashSet<u32> = liked_appids.iter().copied().collect();

        Ok(rank(&snap, neighbors, &reference, &exclude, top_n))
    }
}

/// Filter, score, and rank a retrieved candidate pool. The sort is stable
/// and descending by overall score, so equal scores keep retrieval order.
fn rank(
    snap: &Snapshot,
    neighbors: Vec<(usize, f32)>,
    reference: &BTreeSet<String>,
    exclude: &HashSet<u32>,
    top_n: usize,
) -> Vec<Recommendation> {
    let mut candidates: Vec<Recommendation> = neighbors
        .into_iter()
        .filter_map(|(row, distance)| {
            let item = &snap.catalog[row];
            if exclude.contains(&item.appid) {
                return None;
            }
            if !filter::keep(reference, &item.genres) {
                return None;
            }
            let similarity = 1.0 - distance;
            Some(Recommendation {
                appid: item.appid,
                name: item.name.clone(),
                distance,
                similarity,
                review_score_adj: item.review_score_adj,
                review_volume_log: item.review_volume_log,
                overall_score: snap.scorer.overall_score(
                    similarity,
                    item.review_score_adj,
                    item.review_volume_log,
                ),
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.overall_score
            .partial_cmp(&a.overall_score)
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(top_n);
    candidates
}

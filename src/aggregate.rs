//! # Aggregation
//! Folds per-document scores into chart-ready structures.
//!
//! Pure functions over a document snapshot: inputs are never mutated, every
//! category is initialized up front (closed enums, fixed order), and every
//! ratio goes through [`finite_or_zero`]. An empty snapshot is a normal case
//! and yields zero-filled or empty outputs.

use serde::{Serialize, Serializer};

use crate::classify::{classify, detect_location, Brand, Emotion, Location};
use crate::document::Document;
use crate::intention::{derive_intention, IntentionLevel, IntentionResult};
use crate::lexicon::{
    Dimension, FamilyLexicon, FunnelStage, Lexicon, MarketingMix, PsychoSocial, Utaut2,
};

/// Default number of trend buckets.
pub const DEFAULT_TREND_BUCKETS: usize = 6;
/// Upper bound on trend buckets; larger requests are clamped to it.
pub const MAX_TREND_BUCKETS: usize = 100;

/// Replace NaN/±inf with 0.
#[inline]
pub fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

fn round1(x: f64) -> f64 {
    finite_or_zero((x * 10.0).round() / 10.0)
}

fn percentage(part: usize, total: usize) -> f64 {
    round1(part as f64 * 100.0 / total as f64)
}

fn mean(sum: f64, n: usize) -> f64 {
    round1(sum / n as f64)
}

/// Classification results for one document, computed once per snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredDocument {
    pub id: u64,
    pub emotion: Emotion,
    pub brand: Option<Brand>,
    pub location: Location,
    pub intention: IntentionResult,
}

pub fn score_document(doc: &Document) -> ScoredDocument {
    let c = classify(&doc.content);
    ScoredDocument {
        id: doc.id,
        emotion: c.emotion,
        brand: c.brand,
        location: detect_location(&doc.content),
        intention: derive_intention(&doc.content),
    }
}

pub fn score_documents(docs: &[Document]) -> Vec<ScoredDocument> {
    docs.iter().map(score_document).collect()
}

/* ----------------------------
Distributions
---------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub label: &'static str,
    pub count: usize,
    pub percentage: f64,
}

/// Count per emotion, always all five in canonical order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmotionDistribution {
    counts: [usize; 5],
}

impl EmotionDistribution {
    pub fn add(&mut self, e: Emotion) {
        self.counts[e.index()] += 1;
    }

    pub fn count(&self, e: Emotion) -> usize {
        self.counts[e.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Most frequent emotion; ties go to the earlier one in canonical order.
    pub fn dominant(&self) -> Option<Emotion> {
        let mut best: Option<(Emotion, usize)> = None;
        for e in Emotion::ALL {
            let c = self.count(e);
            if c > 0 && best.is_none_or(|(_, b)| c > b) {
                best = Some((e, c));
            }
        }
        best.map(|(e, _)| e)
    }

    pub fn entries(&self) -> Vec<EmotionCount> {
        let total = self.total();
        Emotion::ALL
            .iter()
            .map(|&e| EmotionCount {
                emotion: e,
                label: e.label_id(),
                count: self.count(e),
                percentage: percentage(self.count(e), total),
            })
            .collect()
    }
}

impl Serialize for EmotionDistribution {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.entries().serialize(s)
    }
}

/// `{high, medium, low}` counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntentionDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl IntentionDistribution {
    pub fn add(&mut self, level: IntentionLevel) {
        match level {
            IntentionLevel::High => self.high += 1,
            IntentionLevel::Medium => self.medium += 1,
            IntentionLevel::Low => self.low += 1,
        }
    }

    pub fn count(&self, level: IntentionLevel) -> usize {
        match level {
            IntentionLevel::High => self.high,
            IntentionLevel::Medium => self.medium,
            IntentionLevel::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }

    /// Majority level; ties resolve high > medium > low. `None` when empty.
    pub fn majority(&self) -> Option<IntentionLevel> {
        let mut best: Option<(IntentionLevel, usize)> = None;
        for level in IntentionLevel::ALL {
            let c = self.count(level);
            if c > 0 && best.is_none_or(|(_, b)| c > b) {
                best = Some((level, c));
            }
        }
        best.map(|(l, _)| l)
    }
}

pub fn emotion_distribution(docs: &[Document]) -> EmotionDistribution {
    emotion_distribution_of(&score_documents(docs))
}

pub fn intention_distribution(docs: &[Document]) -> IntentionDistribution {
    intention_distribution_of(&score_documents(docs))
}

fn emotion_distribution_of(scored: &[ScoredDocument]) -> EmotionDistribution {
    let mut d = EmotionDistribution::default();
    for s in scored {
        d.add(s.emotion);
    }
    d
}

fn intention_distribution_of(scored: &[ScoredDocument]) -> IntentionDistribution {
    let mut d = IntentionDistribution::default();
    for s in scored {
        d.add(s.intention.level);
    }
    d
}

/* ----------------------------
Cross-tabulations
---------------------------- */

/// Demo gender bucket.
///
/// Placeholder: documents carry no demographic data, so the split is
/// `id % 2` (even → male). Do not read it as real demographics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Self::Male, Self::Female];

    pub fn demo_split(id: u64) -> Self {
        if id % 2 == 0 {
            Self::Male
        } else {
            Self::Female
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Male => 0,
            Self::Female => 1,
        }
    }
}

/// Emotion + intention breakdown for one category value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBreakdown<K> {
    pub group: K,
    pub name: &'static str,
    pub total: usize,
    pub emotions: EmotionDistribution,
    pub intention: IntentionDistribution,
    pub average_intention: f64,
}

/// Build one entry per category (all present, zero-filled), sorted by total
/// descending; ties keep canonical order.
fn breakdown<K: Copy>(
    categories: &[K],
    name: fn(K) -> &'static str,
    index: fn(K) -> usize,
    key_of: impl Fn(&ScoredDocument) -> Option<K>,
    scored: &[ScoredDocument],
) -> Vec<GroupBreakdown<K>> {
    let mut groups: Vec<GroupBreakdown<K>> = categories
        .iter()
        .map(|&k| GroupBreakdown {
            group: k,
            name: name(k),
            total: 0,
            emotions: EmotionDistribution::default(),
            intention: IntentionDistribution::default(),
            average_intention: 0.0,
        })
        .collect();
    let mut sums = vec![0u64; categories.len()];

    for s in scored {
        let Some(k) = key_of(s) else { continue };
        let i = index(k);
        let g = &mut groups[i];
        g.total += 1;
        g.emotions.add(s.emotion);
        g.intention.add(s.intention.level);
        sums[i] += u64::from(s.intention.score);
    }
    for (g, sum) in groups.iter_mut().zip(sums) {
        g.average_intention = mean(sum as f64, g.total);
    }

    groups.sort_by(|a, b| b.total.cmp(&a.total));
    groups
}

pub fn brand_breakdown(docs: &[Document]) -> Vec<GroupBreakdown<Brand>> {
    brand_breakdown_of(&score_documents(docs))
}

/// Placeholder split, see [`Gender`].
pub fn gender_breakdown(docs: &[Document]) -> Vec<GroupBreakdown<Gender>> {
    gender_breakdown_of(&score_documents(docs))
}

pub fn location_breakdown(docs: &[Document]) -> Vec<GroupBreakdown<Location>> {
    location_breakdown_of(&score_documents(docs))
}

fn brand_breakdown_of(scored: &[ScoredDocument]) -> Vec<GroupBreakdown<Brand>> {
    breakdown(&Brand::ALL, Brand::name, Brand::index, |s| s.brand, scored)
}

fn gender_breakdown_of(scored: &[ScoredDocument]) -> Vec<GroupBreakdown<Gender>> {
    breakdown(
        &Gender::ALL,
        Gender::name,
        Gender::index,
        |s| Some(Gender::demo_split(s.id)),
        scored,
    )
}

fn location_breakdown_of(scored: &[ScoredDocument]) -> Vec<GroupBreakdown<Location>> {
    breakdown(
        &Location::ALL,
        Location::name,
        Location::index,
        |s| Some(s.location),
        scored,
    )
}

/* ----------------------------
Matrices
---------------------------- */

/// Dense `[row][column]` matrix with its labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationMatrix {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}

impl AggregationMatrix {
    fn zeros(rows: Vec<String>, columns: Vec<String>) -> Self {
        let cells = vec![vec![0.0; columns.len()]; rows.len()];
        Self {
            rows,
            columns,
            cells,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }
}

fn emotion_columns() -> Vec<String> {
    Emotion::ALL.iter().map(|e| e.as_str().to_string()).collect()
}

/// Average dimension score per emotion group (`[dimension][emotion]`).
///
/// Emotion groups without documents are 0. An empty snapshot gives an empty
/// matrix.
pub fn dimension_emotion_matrix<D: Dimension>(
    docs: &[Document],
    family: &FamilyLexicon<D>,
) -> AggregationMatrix {
    dimension_emotion_matrix_of(docs, &score_documents(docs), family)
}

/// Psycho-social instance of [`dimension_emotion_matrix`].
pub fn psycho_social_matrix(docs: &[Document], lexicon: &Lexicon) -> AggregationMatrix {
    dimension_emotion_matrix(docs, &lexicon.psycho_social)
}

fn dimension_emotion_matrix_of<D: Dimension>(
    docs: &[Document],
    scored: &[ScoredDocument],
    family: &FamilyLexicon<D>,
) -> AggregationMatrix {
    if docs.is_empty() {
        return AggregationMatrix::default();
    }

    let dims = D::ALL;
    let mut sums = vec![[0u64; 5]; dims.len()];
    let mut counts = [0usize; 5];

    for (doc, s) in docs.iter().zip(scored) {
        let lowered = doc.content.to_lowercase();
        let e = s.emotion.index();
        counts[e] += 1;
        for (row, &d) in sums.iter_mut().zip(dims) {
            row[e] += u64::from(family.score_lowered(&lowered, d));
        }
    }

    let mut m = AggregationMatrix::zeros(
        dims.iter().map(|d| d.label().to_string()).collect(),
        emotion_columns(),
    );
    for (cells, row) in m.cells.iter_mut().zip(&sums) {
        for (e, cell) in cells.iter_mut().enumerate() {
            *cell = mean(row[e] as f64, counts[e]);
        }
    }
    m
}

/// Document counts per `[location][emotion]`; full shape even when empty.
pub fn location_emotion_matrix(docs: &[Document]) -> AggregationMatrix {
    location_emotion_matrix_of(&score_documents(docs))
}

fn location_emotion_matrix_of(scored: &[ScoredDocument]) -> AggregationMatrix {
    let mut m = AggregationMatrix::zeros(
        Location::ALL.iter().map(|l| l.name().to_string()).collect(),
        emotion_columns(),
    );
    for s in scored {
        m.cells[s.location.index()][s.emotion.index()] += 1.0;
    }
    m
}

/* ----------------------------
Radar averages
---------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionAverage<D> {
    pub dimension: D,
    pub label: &'static str,
    pub average: f64,
}

/// Mean score per dimension across the snapshot (zeros when empty).
pub fn dimension_averages<D: Dimension>(
    docs: &[Document],
    family: &FamilyLexicon<D>,
) -> Vec<DimensionAverage<D>> {
    let mut sums = vec![0u64; D::ALL.len()];
    for doc in docs {
        let lowered = doc.content.to_lowercase();
        for (sum, &d) in sums.iter_mut().zip(D::ALL) {
            *sum += u64::from(family.score_lowered(&lowered, d));
        }
    }
    D::ALL
        .iter()
        .zip(sums)
        .map(|(&d, sum)| DimensionAverage {
            dimension: d,
            label: d.label(),
            average: mean(sum as f64, docs.len()),
        })
        .collect()
}

/* ----------------------------
Trend
---------------------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// 1-based bucket number.
    pub bucket: usize,
    pub count: usize,
    pub average_score: f64,
    pub majority: Option<IntentionLevel>,
}

/// Split the snapshot (in its given order) into `buckets` sequential slices.
/// Bucket `i` covers `[i*n/b, (i+1)*n/b)`, so sizes differ by at most one and
/// the output has `buckets` points, clamped to `1..=MAX_TREND_BUCKETS`.
pub fn intention_trend(docs: &[Document], buckets: usize) -> Vec<TrendPoint> {
    intention_trend_of(&score_documents(docs), buckets)
}

fn intention_trend_of(scored: &[ScoredDocument], buckets: usize) -> Vec<TrendPoint> {
    let b = buckets.clamp(1, MAX_TREND_BUCKETS);
    let n = scored.len();
    (0..b)
        .map(|i| {
            let slice = &scored[i * n / b..(i + 1) * n / b];
            let mut dist = IntentionDistribution::default();
            let mut sum = 0u64;
            for s in slice {
                dist.add(s.intention.level);
                sum += u64::from(s.intention.score);
            }
            TrendPoint {
                bucket: i + 1,
                count: slice.len(),
                average_score: mean(sum as f64, slice.len()),
                majority: dist.majority(),
            }
        })
        .collect()
}

/* ----------------------------
Dashboard snapshot
---------------------------- */

/// Every aggregate the dashboard renders, computed from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_documents: usize,
    pub emotions: EmotionDistribution,
    pub intention: IntentionDistribution,
    pub average_intention: f64,
    pub brands: Vec<GroupBreakdown<Brand>>,
    /// Placeholder split, see [`Gender`].
    pub genders: Vec<GroupBreakdown<Gender>>,
    pub locations: Vec<GroupBreakdown<Location>>,
    pub location_emotion: AggregationMatrix,
    pub utaut2: Vec<DimensionAverage<Utaut2>>,
    pub marketing_mix: Vec<DimensionAverage<MarketingMix>>,
    pub funnel: Vec<DimensionAverage<FunnelStage>>,
    pub psycho_social: Vec<DimensionAverage<PsychoSocial>>,
    pub psycho_social_matrix: AggregationMatrix,
    pub utaut2_matrix: AggregationMatrix,
    pub trend: Vec<TrendPoint>,
}

impl Dashboard {
    pub fn build(docs: &[Document], lexicon: &Lexicon, trend_buckets: usize) -> Self {
        let scored = score_documents(docs);
        let intention_sum: u64 = scored.iter().map(|s| u64::from(s.intention.score)).sum();
        Self {
            total_documents: docs.len(),
            emotions: emotion_distribution_of(&scored),
            intention: intention_distribution_of(&scored),
            average_intention: mean(intention_sum as f64, scored.len()),
            brands: brand_breakdown_of(&scored),
            genders: gender_breakdown_of(&scored),
            locations: location_breakdown_of(&scored),
            location_emotion: location_emotion_matrix_of(&scored),
            utaut2: dimension_averages(docs, &lexicon.utaut2),
            marketing_mix: dimension_averages(docs, &lexicon.marketing_mix),
            funnel: dimension_averages(docs, &lexicon.funnel),
            psycho_social: dimension_averages(docs, &lexicon.psycho_social),
            psycho_social_matrix: dimension_emotion_matrix_of(docs, &scored, &lexicon.psycho_social),
            utaut2_matrix: dimension_emotion_matrix_of(docs, &scored, &lexicon.utaut2),
            trend: intention_trend_of(&scored, trend_buckets),
        }
    }
}

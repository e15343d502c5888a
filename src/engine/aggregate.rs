use super::level::classify;
use super::normalize::NormalizedMetric;
use crate::types::metric::Category;
use crate::types::score::ScoreSummary;
use std::collections::BTreeMap;

/// Running weighted mean that falls back to a plain mean when every weight is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedMean {
    weighted_sum: f64,
    weight: f64,
    plain_sum: f64,
    count: usize,
}

impl WeightedMean {
    pub fn add(&mut self, value: f64, weight: f64) {
        self.weighted_sum += value * weight;
        self.weight += weight;
        self.plain_sum += value;
        self.count += 1;
    }

    pub fn merge(&mut self, other: &WeightedMean) {
        self.weighted_sum += other.weighted_sum;
        self.weight += other.weight;
        self.plain_sum += other.plain_sum;
        self.count += other.count;
    }

    pub fn value(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else if self.weight > 0.0 {
            Some(self.weighted_sum / self.weight)
        } else {
            Some(self.plain_sum / self.count as f64)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    metrics: usize,
    with_data: usize,
    with_benchmarks: usize,
}

impl Counts {
    fn add(&mut self, other: Counts) {
        self.metrics += other.metrics;
        self.with_data += other.with_data;
        self.with_benchmarks += other.with_benchmarks;
    }

    fn completeness(&self) -> f64 {
        if self.metrics == 0 {
            0.0
        } else {
            self.with_data as f64 / self.metrics as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubcategoryRollup {
    pub name: String,
    pub summary: ScoreSummary,
    percentiles: WeightedMean,
    counts: Counts,
    mass: f64,
}

impl SubcategoryRollup {
    /// Summed confidence of every metric with data, scored or not.
    pub fn mass(&self) -> f64 {
        self.mass
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRollup {
    pub category: Category,
    pub summary: ScoreSummary,
    pub subcategories: Vec<SubcategoryRollup>,
}

fn summarize(score: f64, counts: Counts, percentile: Option<f64>) -> ScoreSummary {
    ScoreSummary {
        score,
        level: classify(score),
        metric_count: counts.metrics,
        metrics_with_benchmarks: counts.with_benchmarks,
        metrics_with_data: counts.with_data,
        data_completeness: counts.completeness(),
        benchmark_percentile: percentile,
    }
}

fn rollup_subcategory(name: &str, metrics: &[&NormalizedMetric]) -> Option<SubcategoryRollup> {
    let mut scores = WeightedMean::default();
    let mut percentiles = WeightedMean::default();
    let mut counts = Counts::default();
    let mut mass = 0.0;

    for metric in metrics {
        counts.metrics += 1;
        if metric.has_data {
            counts.with_data += 1;
            mass += metric.weight;
        }
        if metric.has_benchmark {
            counts.with_benchmarks += 1;
        }
        if let Some(score) = metric.effective_score {
            scores.add(score, metric.weight);
        }
        if let Some(percentile) = metric.percentile {
            percentiles.add(percentile, metric.weight);
        }
    }

    if counts.with_data == 0 {
        return None;
    }

    let score = scores.value().unwrap_or(0.0);
    Some(SubcategoryRollup {
        name: name.to_string(),
        summary: summarize(score, counts, percentiles.value()),
        percentiles,
        counts,
        mass,
    })
}

fn rollup_category(
    category: Category,
    subcategories: Vec<SubcategoryRollup>,
) -> Option<CategoryRollup> {
    if subcategories.is_empty() {
        return None;
    }

    let mut scores = WeightedMean::default();
    let mut percentiles = WeightedMean::default();
    let mut counts = Counts::default();
    for sub in &subcategories {
        scores.add(sub.summary.score, sub.mass());
        percentiles.merge(&sub.percentiles);
        counts.add(sub.counts);
    }

    let score = scores.value().unwrap_or(0.0);
    Some(CategoryRollup {
        category,
        summary: summarize(score, counts, percentiles.value()),
        subcategories,
    })
}

pub fn aggregate(metrics: &[NormalizedMetric]) -> Vec<CategoryRollup> {
    let mut grouped: BTreeMap<Category, BTreeMap<&str, Vec<&NormalizedMetric>>> = BTreeMap::new();
    for metric in metrics {
        grouped
            .entry(metric.category)
            .or_default()
            .entry(metric.subcategory.as_str())
            .or_default()
            .push(metric);
    }

    grouped
        .into_iter()
        .filter_map(|(category, subcategories)| {
            let rollups = subcategories
                .into_iter()
                .filter_map(|(name, members)| rollup_subcategory(name, &members))
                .collect::<Vec<_>>();
            tracing::debug!(
                category = category.as_str(),
                subcategories = rollups.len(),
                "aggregated category"
            );
            rollup_category(category, rollups)
        })
        .collect()
}

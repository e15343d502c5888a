pub mod aggregate;
pub mod directions;
pub mod level;
pub mod normalize;
pub mod percentile;

use crate::error::EngineError;
use crate::types::benchmark::{Benchmark, PercentileBand, Segment};
use crate::types::metric::{Metric, MetricDefect, MetricValue};
use crate::types::score::{CategoryScore, Diagnostic, DiagnosticKind, Score, SubcategoryScore};
use aggregate::aggregate;
use directions::DirectionTable;
use normalize::{normalize_metric, NormalizedMetric};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub scores: Vec<Score>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    directions: DirectionTable,
}

impl ScoringEngine {
    pub fn new(directions: DirectionTable) -> Self {
        Self { directions }
    }

    pub fn directions(&self) -> &DirectionTable {
        &self.directions
    }

    pub fn compute_scores(
        &self,
        company_id: &str,
        period_year: i32,
        metrics: &[Metric],
        benchmarks: &[Benchmark],
        segment: &Segment,
    ) -> Result<Vec<Score>, EngineError> {
        self.evaluate(company_id, period_year, metrics, benchmarks, segment)
            .map(|evaluation| evaluation.scores)
    }

    pub fn evaluate(
        &self,
        company_id: &str,
        period_year: i32,
        metrics: &[Metric],
        benchmarks: &[Benchmark],
        segment: &Segment,
    ) -> Result<Evaluation, EngineError> {
        if company_id.trim().is_empty() {
            return Err(EngineError::MissingCompanyId);
        }

        let mut diagnostics = Vec::new();
        let bands = resolve_bands(benchmarks, segment, &mut diagnostics);

        let normalized = metrics
            .iter()
            .filter_map(|metric| {
                self.normalize(metric, company_id, period_year, &bands, &mut diagnostics)
            })
            .collect::<Vec<_>>();

        let scores = aggregate(&normalized)
            .into_iter()
            .flat_map(|rollup| {
                let category = rollup.category;
                let mut rows = Vec::with_capacity(rollup.subcategories.len() + 1);
                rows.push(Score::Category(CategoryScore {
                    company_id: company_id.to_string(),
                    period_year,
                    category,
                    summary: rollup.summary,
                }));
                rows.extend(rollup.subcategories.into_iter().map(|sub| {
                    Score::Subcategory(SubcategoryScore {
                        company_id: company_id.to_string(),
                        period_year,
                        category,
                        subcategory: sub.name,
                        summary: sub.summary,
                    })
                }));
                rows
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            company_id,
            period_year,
            segment = %segment,
            rows = scores.len(),
            diagnostics = diagnostics.len(),
            "computed scores"
        );

        Ok(Evaluation {
            scores,
            diagnostics,
        })
    }

    fn normalize(
        &self,
        metric: &Metric,
        company_id: &str,
        period_year: i32,
        bands: &BTreeMap<&str, PercentileBand>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<NormalizedMetric> {
        let subject = format!("{}/{}", metric.category, metric.metric_key);

        if metric.company_id != company_id || metric.period_year != period_year {
            reject(
                diagnostics,
                DiagnosticKind::ForeignMetric,
                subject,
                format!(
                    "metric belongs to {}/{}, not {}/{}",
                    metric.company_id, metric.period_year, company_id, period_year
                ),
            );
            return None;
        }

        let value = match metric.value() {
            Ok(value) => value,
            Err(MetricDefect::MissingValue) => {
                reject(
                    diagnostics,
                    DiagnosticKind::MissingValue,
                    subject,
                    MetricDefect::MissingValue.to_string(),
                );
                return Some(NormalizedMetric::without_data(metric));
            }
            Err(defect) => {
                reject(
                    diagnostics,
                    DiagnosticKind::InvalidMetric,
                    subject,
                    defect.to_string(),
                );
                return None;
            }
        };

        let confidence = match metric.validated_confidence() {
            Ok(confidence) => confidence,
            Err(defect) => {
                reject(
                    diagnostics,
                    DiagnosticKind::InvalidMetric,
                    subject,
                    defect.to_string(),
                );
                return None;
            }
        };

        if let Some(expected) = self.directions.kind(&metric.metric_key) {
            if expected != value.kind() {
                reject(
                    diagnostics,
                    DiagnosticKind::KindMismatch,
                    subject,
                    format!("expected a {} value", expected.as_str()),
                );
                return None;
            }
        }

        let band = match value {
            MetricValue::Numeric(_) => bands.get(metric.metric_key.as_str()),
            MetricValue::Boolean(_) => None,
        };
        let direction = self.directions.direction(&metric.metric_key);

        match normalize_metric(metric, value, confidence, band, direction) {
            Ok(normalized) => Some(normalized),
            Err(err) => {
                reject(
                    diagnostics,
                    DiagnosticKind::InvalidMetric,
                    subject,
                    err.to_string(),
                );
                None
            }
        }
    }
}

pub fn compute_scores(
    company_id: &str,
    period_year: i32,
    metrics: &[Metric],
    benchmarks: &[Benchmark],
    segment: &Segment,
) -> Result<Vec<Score>, EngineError> {
    ScoringEngine::default().compute_scores(company_id, period_year, metrics, benchmarks, segment)
}

fn resolve_bands<'a>(
    benchmarks: &'a [Benchmark],
    segment: &Segment,
    diagnostics: &mut Vec<Diagnostic>,
) -> BTreeMap<&'a str, PercentileBand> {
    let mut bands = BTreeMap::new();
    for benchmark in benchmarks
        .iter()
        .filter(|benchmark| benchmark.in_segment(segment))
    {
        let band = match percentile::validate_benchmark(benchmark) {
            Ok(band) => band,
            Err(err) => {
                reject(
                    diagnostics,
                    DiagnosticKind::InvalidBenchmark,
                    benchmark.label(),
                    err.to_string(),
                );
                continue;
            }
        };
        if bands.contains_key(benchmark.metric_key.as_str()) {
            reject(
                diagnostics,
                DiagnosticKind::DuplicateBenchmark,
                benchmark.label(),
                "an earlier band for this segmentation is already in use".to_string(),
            );
            continue;
        }
        bands.insert(benchmark.metric_key.as_str(), band);
    }
    bands
}

fn reject(
    diagnostics: &mut Vec<Diagnostic>,
    kind: DiagnosticKind,
    subject: String,
    detail: String,
) {
    tracing::warn!(?kind, subject = %subject, detail = %detail, "record rejected");
    diagnostics.push(Diagnostic::new(kind, subject, detail));
}

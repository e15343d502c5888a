use super::percentile::percentile_rank;
use crate::error::EngineError;
use crate::types::benchmark::PercentileBand;
use crate::types::metric::{Category, Direction, Metric, MetricValue};

const BOOLEAN_TRUE_SCORE: f64 = 100.0;
const BOOLEAN_FALSE_SCORE: f64 = 0.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMetric {
    pub metric_key: String,
    pub category: Category,
    pub subcategory: String,
    pub weight: f64,
    pub has_data: bool,
    pub has_benchmark: bool,
    pub effective_score: Option<f64>,
    pub percentile: Option<f64>,
}

impl NormalizedMetric {
    pub fn without_data(metric: &Metric) -> Self {
        Self {
            metric_key: metric.metric_key.clone(),
            category: metric.category,
            subcategory: metric.subcategory_key().to_string(),
            weight: 0.0,
            has_data: false,
            has_benchmark: false,
            effective_score: None,
            percentile: None,
        }
    }
}

pub fn normalize_metric(
    metric: &Metric,
    value: MetricValue,
    confidence: f64,
    band: Option<&PercentileBand>,
    direction: Direction,
) -> Result<NormalizedMetric, EngineError> {
    let (effective_score, percentile) = match (value, band) {
        (MetricValue::Boolean(flag), _) => {
            let score = if flag {
                BOOLEAN_TRUE_SCORE
            } else {
                BOOLEAN_FALSE_SCORE
            };
            (Some(score), None)
        }
        (MetricValue::Numeric(raw), Some(band)) => {
            let rank = percentile_rank(raw, band, direction)?;
            (Some(rank), Some(rank))
        }
        (MetricValue::Numeric(_), None) => (None, None),
    };

    Ok(NormalizedMetric {
        metric_key: metric.metric_key.clone(),
        category: metric.category,
        subcategory: metric.subcategory_key().to_string(),
        weight: confidence,
        has_data: true,
        has_benchmark: percentile.is_some(),
        effective_score,
        percentile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band() -> PercentileBand {
        PercentileBand::new(10.0, 25.0, 50.0, 75.0, 90.0)
    }

    #[test]
    fn true_boolean_scores_hundred_without_benchmark() {
        let metric = Metric::boolean(
            "C",
            2024,
            Category::Governance,
            Some("ethics"),
            "ethics_policy_exists",
            true,
            1.0,
        );
        let normalized = normalize_metric(
            &metric,
            MetricValue::Boolean(true),
            1.0,
            Some(&band()),
            Direction::HigherIsBetter,
        )
        .expect("boolean metric should normalize");

        assert_eq!(normalized.effective_score, Some(100.0));
        assert_eq!(normalized.percentile, None);
        assert!(normalized.has_data);
        assert!(!normalized.has_benchmark);
    }

    #[test]
    fn false_boolean_scores_zero() {
        let metric = Metric::boolean("C", 2024, Category::Governance, None, "k", false, 0.5);
        let normalized = normalize_metric(
            &metric,
            MetricValue::Boolean(false),
            0.5,
            None,
            Direction::HigherIsBetter,
        )
        .expect("boolean metric should normalize");
        assert_eq!(normalized.effective_score, Some(0.0));
        assert_eq!(normalized.weight, 0.5);
    }

    #[test]
    fn numeric_with_band_uses_rank_unscaled_by_confidence() {
        let metric = Metric::numeric(
            "C",
            2024,
            Category::Environmental,
            Some("energy"),
            "renewable_energy_pct",
            75.0,
            0.4,
        );
        let normalized = normalize_metric(
            &metric,
            MetricValue::Numeric(75.0),
            0.4,
            Some(&band()),
            Direction::HigherIsBetter,
        )
        .expect("numeric metric should normalize");

        assert_eq!(normalized.effective_score, Some(75.0));
        assert_eq!(normalized.percentile, Some(75.0));
        assert_eq!(normalized.weight, 0.4);
        assert!(normalized.has_benchmark);
    }

    #[test]
    fn numeric_without_band_has_data_but_no_score() {
        let metric = Metric::numeric("C", 2024, Category::Social, None, "k", 3.0, 1.0);
        let normalized = normalize_metric(
            &metric,
            MetricValue::Numeric(3.0),
            1.0,
            None,
            Direction::HigherIsBetter,
        )
        .expect("numeric metric should normalize");

        assert!(normalized.has_data);
        assert!(!normalized.has_benchmark);
        assert_eq!(normalized.effective_score, None);
        assert_eq!(normalized.subcategory, "general");
    }
}

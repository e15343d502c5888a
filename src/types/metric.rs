use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Environmental,
    Social,
    Governance,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Social => "social",
            Self::Governance => "governance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HigherIsBetter => "higher_is_better",
            Self::LowerIsBetter => "lower_is_better",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Numeric,
    Boolean,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Numeric(f64),
    Boolean(bool),
}

impl MetricValue {
    pub fn kind(self) -> MetricKind {
        match self {
            Self::Numeric(_) => MetricKind::Numeric,
            Self::Boolean(_) => MetricKind::Boolean,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub company_id: String,
    pub period_year: i32,
    pub category: Category,
    #[serde(default)]
    pub subcategory: Option<String>,
    pub metric_key: String,
    #[serde(default)]
    pub value_numeric: Option<f64>,
    #[serde(default)]
    pub value_boolean: Option<bool>,
    pub confidence: f64,
    #[serde(default)]
    pub citation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricDefect {
    MissingValue,
    BothValues,
    NonFiniteValue,
    ConfidenceOutOfRange,
}

impl fmt::Display for MetricDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingValue => "neither value_numeric nor value_boolean is set",
            Self::BothValues => "both value_numeric and value_boolean are set",
            Self::NonFiniteValue => "value_numeric is not a finite number",
            Self::ConfidenceOutOfRange => "confidence must be a finite number in [0, 1]",
        };
        f.write_str(text)
    }
}

impl Metric {
    pub fn numeric(
        company_id: impl Into<String>,
        period_year: i32,
        category: Category,
        subcategory: Option<&str>,
        metric_key: impl Into<String>,
        value: f64,
        confidence: f64,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            period_year,
            category,
            subcategory: subcategory.map(ToString::to_string),
            metric_key: metric_key.into(),
            value_numeric: Some(value),
            value_boolean: None,
            confidence,
            citation: None,
        }
    }

    pub fn boolean(
        company_id: impl Into<String>,
        period_year: i32,
        category: Category,
        subcategory: Option<&str>,
        metric_key: impl Into<String>,
        value: bool,
        confidence: f64,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            period_year,
            category,
            subcategory: subcategory.map(ToString::to_string),
            metric_key: metric_key.into(),
            value_numeric: None,
            value_boolean: Some(value),
            confidence,
            citation: None,
        }
    }

    pub fn value(&self) -> Result<MetricValue, MetricDefect> {
        match (self.value_numeric, self.value_boolean) {
            (None, None) => Err(MetricDefect::MissingValue),
            (Some(_), Some(_)) => Err(MetricDefect::BothValues),
            (Some(value), None) if !value.is_finite() => Err(MetricDefect::NonFiniteValue),
            (Some(value), None) => Ok(MetricValue::Numeric(value)),
            (None, Some(flag)) => Ok(MetricValue::Boolean(flag)),
        }
    }

    pub fn validated_confidence(&self) -> Result<f64, MetricDefect> {
        if self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence) {
            Ok(self.confidence)
        } else {
            Err(MetricDefect::ConfidenceOutOfRange)
        }
    }

    pub fn subcategory_key(&self) -> &str {
        self.subcategory
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_SUBCATEGORY)
    }
}

pub const DEFAULT_SUBCATEGORY: &str = "general";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_requires_exactly_one_field() {
        let mut metric = Metric::numeric("C", 2024, Category::Social, None, "k", 1.0, 1.0);
        assert_eq!(metric.value(), Ok(MetricValue::Numeric(1.0)));

        metric.value_boolean = Some(true);
        assert_eq!(metric.value(), Err(MetricDefect::BothValues));

        metric.value_numeric = None;
        metric.value_boolean = None;
        assert_eq!(metric.value(), Err(MetricDefect::MissingValue));
    }

    #[test]
    fn nan_value_is_rejected() {
        let metric = Metric::numeric("C", 2024, Category::Social, None, "k", f64::NAN, 1.0);
        assert_eq!(metric.value(), Err(MetricDefect::NonFiniteValue));
    }

    #[test]
    fn confidence_outside_unit_interval_is_rejected() {
        let mut metric = Metric::boolean("C", 2024, Category::Governance, None, "k", true, 1.2);
        assert!(metric.validated_confidence().is_err());
        metric.confidence = 0.0;
        assert_eq!(metric.validated_confidence(), Ok(0.0));
    }

    #[test]
    fn blank_subcategory_falls_back_to_default_bucket() {
        let metric = Metric::boolean("C", 2024, Category::Governance, Some("  "), "k", true, 1.0);
        assert_eq!(metric.subcategory_key(), DEFAULT_SUBCATEGORY);

        let metric = Metric::boolean("C", 2024, Category::Governance, Some(" ethics "), "k", true, 1.0);
        assert_eq!(metric.subcategory_key(), "ethics");
    }

    #[test]
    fn category_deserializes_from_lowercase() {
        let category: Category = serde_json::from_str("\"environmental\"").expect("should parse");
        assert_eq!(category, Category::Environmental);
    }
}

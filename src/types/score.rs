use super::metric::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Leading,
    Par,
    Lagging,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Leading => "leading",
            Self::Par => "par",
            Self::Lagging => "lagging",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub score: f64,
    pub level: Level,
    pub metric_count: usize,
    pub metrics_with_benchmarks: usize,
    pub metrics_with_data: usize,
    pub data_completeness: f64,
    pub benchmark_percentile: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub company_id: String,
    pub period_year: i32,
    pub category: Category,
    #[serde(flatten)]
    pub summary: ScoreSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryScore {
    pub company_id: String,
    pub period_year: i32,
    pub category: Category,
    pub subcategory: String,
    #[serde(flatten)]
    pub summary: ScoreSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "lowercase")]
pub enum Score {
    Category(CategoryScore),
    Subcategory(SubcategoryScore),
}

impl Score {
    pub fn category(&self) -> Category {
        match self {
            Self::Category(row) => row.category,
            Self::Subcategory(row) => row.category,
        }
    }

    pub fn subcategory(&self) -> Option<&str> {
        match self {
            Self::Category(_) => None,
            Self::Subcategory(row) => Some(row.subcategory.as_str()),
        }
    }

    pub fn summary(&self) -> &ScoreSummary {
        match self {
            Self::Category(row) => &row.summary,
            Self::Subcategory(row) => &row.summary,
        }
    }

    pub fn is_category(&self) -> bool {
        matches!(self, Self::Category(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    InvalidMetric,
    MissingValue,
    ForeignMetric,
    KindMismatch,
    InvalidBenchmark,
    DuplicateBenchmark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub subject: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> ScoreSummary {
        ScoreSummary {
            score: 62.5,
            level: Level::Par,
            metric_count: 2,
            metrics_with_benchmarks: 1,
            metrics_with_data: 2,
            data_completeness: 1.0,
            benchmark_percentile: Some(25.0),
        }
    }

    #[test]
    fn score_rows_serialize_with_explicit_scope_tag() {
        let row = Score::Subcategory(SubcategoryScore {
            company_id: "C".to_string(),
            period_year: 2024,
            category: Category::Environmental,
            subcategory: "emissions".to_string(),
            summary: summary(),
        });

        let value = serde_json::to_value(&row).expect("score should serialize");
        assert_eq!(value["scope"], "subcategory");
        assert_eq!(value["subcategory"], "emissions");
        assert_eq!(value["level"], "par");
        assert_eq!(value["score"], 62.5);
    }

    #[test]
    fn category_rows_have_no_subcategory() {
        let row = Score::Category(CategoryScore {
            company_id: "C".to_string(),
            period_year: 2024,
            category: Category::Social,
            summary: summary(),
        });
        assert!(row.is_category());
        assert_eq!(row.subcategory(), None);
        assert_eq!(row.category(), Category::Social);
    }
}

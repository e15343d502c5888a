pub mod json;
pub mod md;

use crate::engine::Evaluation;
use crate::error::EsgError;
use crate::types::benchmark::Segment;
use crate::types::score::{Diagnostic, Score};
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub generated_at: String,
    pub engine_version: String,
    pub fingerprint: String,
    pub company_id: String,
    pub period_year: i32,
    pub segment: Segment,
    pub scores: Vec<Score>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScoreReport {
    pub fn new(
        company_id: &str,
        period_year: i32,
        segment: Segment,
        evaluation: Evaluation,
    ) -> Result<Self, EsgError> {
        let fingerprint = fingerprint(&evaluation.scores)?;
        Ok(Self {
            generated_at: Utc::now().to_rfc3339(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            fingerprint,
            company_id: company_id.to_string(),
            period_year,
            segment,
            scores: evaluation.scores,
            diagnostics: evaluation.diagnostics,
        })
    }

    pub fn category_rows(&self) -> impl Iterator<Item = &Score> {
        self.scores.iter().filter(|score| score.is_category())
    }

    pub fn subcategory_rows(&self) -> impl Iterator<Item = &Score> {
        self.scores.iter().filter(|score| !score.is_category())
    }
}

pub fn fingerprint(scores: &[Score]) -> Result<String, EsgError> {
    let bytes = serde_json::to_vec(scores)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{digest:x}"))
}

pub fn render(report: &ScoreReport, format: OutputFormat) -> Result<String, EsgError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(EsgError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

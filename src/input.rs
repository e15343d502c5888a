use crate::error::{EsgError, Result};
use crate::types::benchmark::{Benchmark, SizeBand, Segment};
use crate::types::metric::Metric;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringRequest {
    pub company_id: String,
    pub period_year: i32,
    pub sector: String,
    pub size_band: SizeBand,
    pub region: String,
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

impl ScoringRequest {
    pub fn segment(&self) -> Segment {
        Segment::new(self.sector.clone(), self.size_band, self.region.clone())
    }
}

pub fn load_request(path: &Path) -> Result<ScoringRequest> {
    read_json(path)
}

pub fn load_benchmarks(path: &Path) -> Result<Vec<Benchmark>> {
    read_json(path)
}

pub fn discover_requests(root: &Path, skip: &[&Path]) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(EsgError::PathNotFound(root.display().to_string()));
    }
    let skipped = skip
        .iter()
        .filter_map(|path| path.canonicalize().ok())
        .collect::<Vec<_>>();
    let mut paths = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
        .filter(|path| {
            path.canonicalize()
                .map(|canonical| !skipped.contains(&canonical))
                .unwrap_or(true)
        })
        .collect::<Vec<_>>();
    paths.sort();
    Ok(paths)
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(EsgError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| EsgError::InputParse(format!("{}: {}", path.display(), e)))
}

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeBand {
    Small,
    Medium,
    Large,
    Enterprise,
}

impl SizeBand {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for SizeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub sector: String,
    pub size_band: SizeBand,
    pub region: String,
}

impl Segment {
    pub fn new(sector: impl Into<String>, size_band: SizeBand, region: impl Into<String>) -> Self {
        Self {
            sector: sector.into(),
            size_band,
            region: region.into(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.sector, self.size_band, self.region)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBand {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

impl PercentileBand {
    pub const RANKS: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

    pub fn new(p10: f64, p25: f64, p50: f64, p75: f64, p90: f64) -> Self {
        Self {
            p10,
            p25,
            p50,
            p75,
            p90,
        }
    }

    pub fn anchors(&self) -> [f64; 5] {
        [self.p10, self.p25, self.p50, self.p75, self.p90]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub metric_key: String,
    pub sector: String,
    pub size_band: SizeBand,
    pub region: String,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    #[serde(default)]
    pub sample_size: u32,
    #[serde(default)]
    pub data_year: Option<i32>,
}

impl Benchmark {
    pub fn band(&self) -> PercentileBand {
        PercentileBand::new(self.p10, self.p25, self.p50, self.p75, self.p90)
    }

    pub fn in_segment(&self, segment: &Segment) -> bool {
        self.sector == segment.sector
            && self.size_band == segment.size_band
            && self.region == segment.region
    }

    pub fn label(&self) -> String {
        format!(
            "{}@{}/{}/{}",
            self.metric_key, self.sector, self.size_band, self.region
        )
    }
}

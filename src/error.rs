use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("company_id is required")]
    MissingCompanyId,

    #[error("invalid benchmark {label}: {reason}")]
    InvalidBenchmark { label: String, reason: String },

    #[error("value to rank is not a finite number: {0}")]
    InvalidValue(f64),
}

#[derive(Error, Debug)]
pub enum EsgError {
    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("input parse error: {0}")]
    InputParse(String),

    #[error("telemetry error: {0}")]
    Telemetry(String),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EsgError>;

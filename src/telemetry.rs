use crate::error::EsgError;
use tracing_subscriber::EnvFilter;

pub fn verbosity_level(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (quiet, verbose) {
        (true, _) => Some("error"),
        (false, 0) => None,
        (false, 1) => Some("info"),
        (false, _) => Some("debug"),
    }
}

pub fn init(level: &str) -> Result<(), EsgError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|source| {
            EsgError::Telemetry(format!("invalid log level/filter '{level}': {source}"))
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|err| EsgError::Telemetry(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(verbosity_level(2, true), Some("error"));
    }

    #[test]
    fn verbosity_steps() {
        assert_eq!(verbosity_level(0, false), None);
        assert_eq!(verbosity_level(1, false), Some("info"));
        assert_eq!(verbosity_level(3, false), Some("debug"));
    }
}

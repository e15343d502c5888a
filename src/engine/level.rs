use crate::types::score::Level;

pub const LEADING_THRESHOLD: f64 = 75.0;
pub const PAR_THRESHOLD: f64 = 25.0;

/// Bands are closed on their lower edge.
pub fn classify(score: f64) -> Level {
    if score >= LEADING_THRESHOLD {
        Level::Leading
    } else if score >= PAR_THRESHOLD {
        Level::Par
    } else {
        Level::Lagging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_closed_on_the_lower_edge() {
        assert_eq!(classify(75.0), Level::Leading);
        assert_eq!(classify(74.999), Level::Par);
        assert_eq!(classify(25.0), Level::Par);
        assert_eq!(classify(24.999), Level::Lagging);
    }

    #[test]
    fn extremes_classify() {
        assert_eq!(classify(100.0), Level::Leading);
        assert_eq!(classify(0.0), Level::Lagging);
    }
}

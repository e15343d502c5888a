use crate::error::EngineError;
use crate::types::benchmark::{Benchmark, PercentileBand};
use crate::types::metric::Direction;

const FLOOR_RANK: f64 = 0.0;
const CEILING_RANK: f64 = 100.0;

pub fn check_band(band: &PercentileBand) -> Result<(), String> {
    let anchors = band.anchors();
    if let Some(position) = anchors.iter().position(|anchor| !anchor.is_finite()) {
        return Err(format!(
            "p{} is not a finite number",
            PercentileBand::RANKS[position]
        ));
    }
    for (index, pair) in anchors.windows(2).enumerate() {
        if pair[0] > pair[1] {
            return Err(format!(
                "p{} ({}) exceeds p{} ({})",
                PercentileBand::RANKS[index],
                pair[0],
                PercentileBand::RANKS[index + 1],
                pair[1]
            ));
        }
    }
    Ok(())
}

pub fn validate_benchmark(benchmark: &Benchmark) -> Result<PercentileBand, EngineError> {
    let band = benchmark.band();
    check_band(&band).map_err(|reason| EngineError::InvalidBenchmark {
        label: benchmark.label(),
        reason,
    })?;
    Ok(band)
}

pub fn percentile_rank(
    value: f64,
    band: &PercentileBand,
    direction: Direction,
) -> Result<f64, EngineError> {
    check_band(band).map_err(|reason| EngineError::InvalidBenchmark {
        label: format!("{:?}", band.anchors()),
        reason,
    })?;
    if !value.is_finite() {
        return Err(EngineError::InvalidValue(value));
    }

    let rank = raw_rank(value, band).clamp(FLOOR_RANK, CEILING_RANK);
    Ok(match direction {
        Direction::HigherIsBetter => rank,
        Direction::LowerIsBetter => CEILING_RANK - rank,
    })
}

fn raw_rank(value: f64, band: &PercentileBand) -> f64 {
    let anchors = band.anchors();
    let ranks = PercentileBand::RANKS;

    if value <= anchors[0] {
        // 0 -> p10 maps onto rank 0 -> 10; without a positive p10 there is no segment.
        return if anchors[0] > 0.0 {
            (ranks[0] * value / anchors[0]).max(FLOOR_RANK)
        } else if value < anchors[0] {
            FLOOR_RANK
        } else {
            ranks[0]
        };
    }

    if value > anchors[4] {
        let width = anchors[4] - anchors[3];
        return if width > 0.0 {
            let slope = (CEILING_RANK - ranks[4]) / width;
            (ranks[4] + slope * (value - anchors[4])).min(CEILING_RANK)
        } else {
            CEILING_RANK
        };
    }

    for index in 1..anchors.len() {
        if value <= anchors[index] {
            let (low, high) = (anchors[index - 1], anchors[index]);
            let width = high - low;
            if width <= 0.0 {
                return ranks[index - 1];
            }
            let share = (value - low) / width;
            return ranks[index - 1] + share * (ranks[index] - ranks[index - 1]);
        }
    }

    ranks[4]
}

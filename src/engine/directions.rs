use crate::types::config::EsgConfig;
use crate::types::metric::{Direction, MetricKind};
use std::collections::BTreeMap;

const LOWER_IS_BETTER: &[&str] = &[
    "ghg_scope1_tco2e",
    "ghg_scope2_tco2e",
    "ghg_scope3_tco2e",
    "ghg_total_tco2e",
    "ghg_intensity_tco2e_per_revenue",
    "energy_consumption_mwh",
    "energy_intensity_mwh_per_revenue",
    "water_withdrawal_m3",
    "waste_generated_t",
    "waste_to_landfill_pct",
    "gender_pay_gap_pct",
    "employee_turnover_pct",
    "lost_time_injury_rate",
    "total_recordable_incident_rate",
    "fatalities",
    "ceo_pay_ratio",
    "data_breaches",
    "corruption_incidents",
];

const HIGHER_IS_BETTER: &[&str] = &[
    "renewable_energy_pct",
    "waste_recycled_pct",
    "women_in_workforce_pct",
    "women_in_leadership_pct",
    "training_hours_per_employee",
    "employee_engagement_pct",
    "living_wage_coverage_pct",
    "board_independence_pct",
    "women_on_board_pct",
    "supplier_esg_screening_pct",
];

const BOOLEAN: &[&str] = &[
    "ethics_policy_exists",
    "anti_bribery_policy_exists",
    "whistleblower_policy_exists",
    "modern_slavery_statement",
    "net_zero_target",
    "sbti_validated_target",
    "iso14001_certified",
    "climate_risk_disclosure",
    "esg_linked_remuneration",
    "human_rights_policy_exists",
];

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionTable {
    directions: BTreeMap<String, Direction>,
    kinds: BTreeMap<String, MetricKind>,
    default_direction: Direction,
}

impl Default for DirectionTable {
    fn default() -> Self {
        let mut directions = BTreeMap::new();
        for key in LOWER_IS_BETTER {
            directions.insert((*key).to_string(), Direction::LowerIsBetter);
        }
        for key in HIGHER_IS_BETTER {
            directions.insert((*key).to_string(), Direction::HigherIsBetter);
        }

        let mut kinds = BTreeMap::new();
        for key in LOWER_IS_BETTER.iter().chain(HIGHER_IS_BETTER) {
            kinds.insert((*key).to_string(), MetricKind::Numeric);
        }
        for key in BOOLEAN {
            kinds.insert((*key).to_string(), MetricKind::Boolean);
        }

        Self {
            directions,
            kinds,
            default_direction: Direction::HigherIsBetter,
        }
    }
}

impl DirectionTable {
    pub fn from_config(config: &EsgConfig) -> Self {
        let mut table = Self::default();
        table.default_direction = config.default_direction();
        for (key, direction) in &config.directions {
            table.directions.insert(key.clone(), *direction);
            table.kinds.insert(key.clone(), MetricKind::Numeric);
        }
        for (key, kind) in &config.kinds {
            table.kinds.insert(key.clone(), *kind);
            if matches!(kind, MetricKind::Boolean) {
                table.directions.remove(key);
            }
        }
        table
    }

    pub fn direction(&self, metric_key: &str) -> Direction {
        self.directions
            .get(metric_key)
            .copied()
            .unwrap_or(self.default_direction)
    }

    pub fn kind(&self, metric_key: &str) -> Option<MetricKind> {
        self.kinds.get(metric_key).copied()
    }

    pub fn default_direction(&self) -> Direction {
        self.default_direction
    }

    pub fn entries(&self) -> Vec<(&str, MetricKind, Option<Direction>)> {
        self.kinds
            .iter()
            .map(|(key, kind)| {
                let direction = match kind {
                    MetricKind::Numeric => Some(self.direction(key)),
                    MetricKind::Boolean => None,
                };
                (key.as_str(), *kind, direction)
            })
            .collect()
    }
}

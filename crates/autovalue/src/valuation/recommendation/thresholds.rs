use super::super::tables::{normalize, BrandTierTable, ThresholdCondition, ThresholdRule};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

impl ThresholdCondition {
    pub fn matches(&self, age: u32, mileage: f64) -> bool {
        match *self {
            ThresholdCondition::AgeAtMost(limit) => age <= limit,
            ThresholdCondition::AgeAtLeast(limit) => age >= limit,
            ThresholdCondition::MileageAbove(limit) => mileage > limit,
        }
    }
}

/// Walks the rules in table order; each match overwrites the threshold, so the last match wins.
pub fn resolve_threshold(base: f64, rules: &[ThresholdRule], age: u32, mileage: f64) -> f64 {
    rules
        .iter()
        .filter(|rule| rule.when.matches(age, mileage))
        .fold(base, |_, rule| rule.threshold)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandTier {
    Reliable,
    Standard,
    LessReliable,
}

/// Normalized reliability groupings plus the nudges they apply.
#[derive(Debug, Clone)]
pub struct BrandTiers {
    reliable: HashSet<String>,
    less_reliable: HashSet<String>,
    reliable_nudge: f64,
    less_reliable_nudge: f64,
    less_reliable_min_age: u32,
}

impl BrandTiers {
    pub fn new(table: &BrandTierTable) -> Self {
        Self {
            reliable: table.reliable.iter().map(|make| normalize(make)).collect(),
            less_reliable: table
                .less_reliable
                .iter()
                .map(|make| normalize(make))
                .collect(),
            reliable_nudge: table.reliable_nudge,
            less_reliable_nudge: table.less_reliable_nudge,
            less_reliable_min_age: table.less_reliable_min_age,
        }
    }

    pub fn tier(&self, brand: Option<&str>) -> BrandTier {
        let Some(brand) = brand.map(normalize) else {
            return BrandTier::Standard;
        };

        if self.reliable.contains(&brand) {
            BrandTier::Reliable
        } else if self.less_reliable.contains(&brand) {
            BrandTier::LessReliable
        } else {
            BrandTier::Standard
        }
    }

    /// Additive adjustment applied after the decision table.
    pub fn nudge(&self, tier: BrandTier, age: u32) -> f64 {
        match tier {
            BrandTier::Reliable => self.reliable_nudge,
            BrandTier::LessReliable if age > self.less_reliable_min_age => {
                -self.less_reliable_nudge
            }
            BrandTier::LessReliable | BrandTier::Standard => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::tables::ValuationTables;

    fn rules() -> Vec<ThresholdRule> {
        ValuationTables::standard()
            .expect("bundled tables")
            .recommendation
            .threshold_rules
    }

    fn tiers() -> BrandTiers {
        BrandTiers::new(
            &ValuationTables::standard()
                .expect("bundled tables")
                .recommendation
                .brand_tiers,
        )
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn base_threshold_applies_when_nothing_matches() {
        assert_close(resolve_threshold(0.20, &rules(), 5, 60000.0), 0.20);
    }

    #[test]
    fn young_vehicles_get_more_headroom() {
        assert_close(resolve_threshold(0.20, &rules(), 0, 5000.0), 0.25);
        assert_close(resolve_threshold(0.20, &rules(), 3, 30000.0), 0.25);
    }

    #[test]
    fn later_rules_override_earlier_matches() {
        // young but high mileage: the mileage rule comes after the age rule
        assert_close(resolve_threshold(0.20, &rules(), 2, 120000.0), 0.12);
        assert_close(resolve_threshold(0.20, &rules(), 10, 80000.0), 0.15);
        assert_close(resolve_threshold(0.20, &rules(), 10, 150000.0), 0.12);
        // the age >= 12 rule is last, so it beats high mileage
        assert_close(resolve_threshold(0.20, &rules(), 12, 150000.0), 0.10);
        assert_close(resolve_threshold(0.20, &rules(), 14, 20000.0), 0.10);
    }

    #[test]
    fn mileage_rule_is_strictly_greater_than() {
        assert_close(resolve_threshold(0.20, &rules(), 5, 100000.0), 0.20);
        assert_close(resolve_threshold(0.20, &rules(), 5, 100000.5), 0.12);
    }

    #[test]
    fn brand_tiers_are_case_insensitive() {
        let tiers = tiers();
        assert_eq!(tiers.tier(Some("TOYOTA")), BrandTier::Reliable);
        assert_eq!(tiers.tier(Some("Land  Rover")), BrandTier::LessReliable);
        assert_eq!(tiers.tier(Some("Ford")), BrandTier::Standard);
        assert_eq!(tiers.tier(None), BrandTier::Standard);
    }

    #[test]
    fn less_reliable_penalty_waits_for_age() {
        let tiers = tiers();
        assert_close(tiers.nudge(BrandTier::LessReliable, 7), 0.0);
        assert_close(tiers.nudge(BrandTier::LessReliable, 8), -0.03);
        assert_close(tiers.nudge(BrandTier::Reliable, 1), 0.03);
        assert_close(tiers.nudge(BrandTier::Standard, 20), 0.0);
    }
}

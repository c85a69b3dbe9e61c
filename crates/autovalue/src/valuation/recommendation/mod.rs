//! Repair-vs-replace classification.
//!
//! A single pass: resolve the threshold from the ordered decision table, nudge it by brand
//! tier, then place the cost ratio into one of four ascending bands.

mod narrative;
mod thresholds;

pub use thresholds::{resolve_threshold, BrandTier, BrandTiers};

use super::domain::{RecommendationLevel, RecommendationType};
use super::tables::{BandMultipliers, RecommendationTable, ThresholdRule};
use narrative::{describe, undefined_ratio, NarrativeInputs};

/// Stateless classifier built once from the recommendation table.
#[derive(Debug, Clone)]
pub struct Recommender {
    base_threshold: f64,
    rules: Vec<ThresholdRule>,
    tiers: BrandTiers,
    bands: BandMultipliers,
}

impl Recommender {
    pub fn new(table: &RecommendationTable) -> Self {
        Self {
            base_threshold: table.base_threshold,
            rules: table.threshold_rules.clone(),
            tiers: BrandTiers::new(&table.brand_tiers),
            bands: table.bands,
        }
    }

    /// Final threshold for a vehicle: decision table first, then the brand nudge.
    pub fn threshold(&self, age: u32, mileage: f64, brand: Option<&str>) -> f64 {
        let threshold = resolve_threshold(self.base_threshold, &self.rules, age, mileage);
        threshold + self.tiers.nudge(self.tiers.tier(brand), age)
    }

    pub fn classify(&self, cost_ratio: f64, threshold: f64) -> RecommendationType {
        if cost_ratio < self.bands.repair_only * threshold {
            RecommendationType::RepairOnly
        } else if cost_ratio < self.bands.repair_with_note * threshold {
            RecommendationType::RepairWithNote
        } else if cost_ratio < self.bands.repair_and_replace * threshold {
            RecommendationType::RepairAndReplace
        } else {
            RecommendationType::ReplaceEmphasis
        }
    }

    pub fn recommend(
        &self,
        repair_cost: f64,
        estimated_value: f64,
        age: u32,
        mileage: f64,
        brand: Option<&str>,
    ) -> RecommendationLevel {
        let threshold = self.threshold(age, mileage, brand);

        if !(estimated_value.is_finite() && estimated_value > 0.0) {
            let narrative = undefined_ratio(threshold);
            return RecommendationLevel {
                kind: RecommendationType::ReplaceEmphasis,
                message: narrative.message,
                reasoning: narrative.reasoning,
                cost_ratio: None,
                threshold,
            };
        }

        let cost_ratio = repair_cost / estimated_value;
        let kind = self.classify(cost_ratio, threshold);
        let narrative = describe(
            kind,
            &NarrativeInputs {
                cost_ratio,
                threshold,
                upper_band: self.bands.repair_and_replace * threshold,
                age,
                mileage,
            },
        );

        RecommendationLevel {
            kind,
            message: narrative.message,
            reasoning: narrative.reasoning,
            cost_ratio: Some(cost_ratio),
            threshold,
        }
    }
}

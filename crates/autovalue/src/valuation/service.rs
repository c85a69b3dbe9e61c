use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::contract::{
    MarketAnalysis, TradeVsRepair, ValuationRequest, ValuationResponse, ValueBreakdownView,
};
use super::domain::{RecommendationLevel, ValueEstimate, VehicleIdentity};
use super::intake::{validate, InvalidInput, ValuationInput};
use super::ValuationEngine;

/// Service composing request intake with the valuation engine.
#[derive(Debug, Clone)]
pub struct ValuationService {
    engine: Arc<ValuationEngine>,
}

/// One appraisal: the estimate plus, when a repair was quoted, the recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Appraisal {
    pub vehicle: VehicleIdentity,
    pub age: u32,
    pub mileage: f64,
    pub as_of_year: i32,
    pub estimate: ValueEstimate,
    pub recommendation: Option<RecommendationLevel>,
}

impl ValuationService {
    pub fn new(engine: Arc<ValuationEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Validate a wire request and appraise it.
    pub fn appraise(
        &self,
        request: ValuationRequest,
        current_year: i32,
    ) -> Result<Appraisal, InvalidInput> {
        let input = validate(request, current_year)?;
        Ok(self.appraise_input(input))
    }

    pub fn appraise_input(&self, input: ValuationInput) -> Appraisal {
        let ValuationInput {
            vehicle,
            mileage,
            repair,
            as_of_year,
        } = input;

        let age = vehicle.age(as_of_year);
        let estimate = self.engine.estimate(&vehicle, mileage, as_of_year);
        let recommendation = repair.map(|repair| {
            self.engine.recommend(
                &repair,
                estimate.estimated_value,
                age,
                mileage,
                Some(&vehicle.make),
            )
        });

        debug!(
            make = %vehicle.make,
            model = %vehicle.model,
            year = vehicle.year,
            estimated_value = estimate.estimated_value,
            recommendation = ?recommendation.as_ref().map(|level| level.kind),
            "appraisal complete"
        );

        Appraisal {
            vehicle,
            age,
            mileage,
            as_of_year,
            estimate,
            recommendation,
        }
    }
}

impl Appraisal {
    pub fn to_response(&self) -> ValuationResponse {
        let breakdown = self.estimate.breakdown;
        ValuationResponse {
            current_value: self.estimate.estimated_value,
            confidence: self.estimate.confidence,
            value_breakdown: ValueBreakdownView {
                base_msrp: breakdown.base_msrp,
                age_depreciation: breakdown.age_depreciation,
                mileage_adjustment: breakdown.mileage_adjustment,
                regional_adjustment: breakdown.regional_adjustment,
            },
            market_analysis: self.recommendation.as_ref().map(|level| MarketAnalysis {
                trade_vs_repair: TradeVsRepair {
                    repair_percentage: level.cost_ratio.map(|ratio| ratio * 100.0),
                    recommendation: level.kind.key().to_string(),
                    reasoning: level.reasoning.clone(),
                    message: level.message.clone(),
                    threshold_percentage: level.threshold * 100.0,
                },
            }),
        }
    }
}

//! JSON request and response shapes for the valuation endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    pub vehicle: VehicleRequest,
    #[serde(default)]
    pub repair_cost: Option<f64>,
    /// Used when no single `repair_cost` is quoted.
    #[serde(default)]
    pub repair_cost_range: Option<RepairCostRange>,
    /// Calendar year the vehicle is valued in; defaults to the current year.
    #[serde(default)]
    pub as_of_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRequest {
    pub year: i32,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub trim: Option<String>,
    pub mileage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepairCostRange {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResponse {
    pub current_value: f64,
    pub confidence: f64,
    pub value_breakdown: ValueBreakdownView,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_analysis: Option<MarketAnalysis>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueBreakdownView {
    pub base_msrp: f64,
    pub age_depreciation: f64,
    pub mileage_adjustment: f64,
    pub regional_adjustment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub trade_vs_repair: TradeVsRepair,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeVsRepair {
    /// `null` when the ratio is undefined.
    pub repair_percentage: Option<f64>,
    pub recommendation: String,
    pub reasoning: String,
    pub message: String,
    pub threshold_percentage: f64,
}

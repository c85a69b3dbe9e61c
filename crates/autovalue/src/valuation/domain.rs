use serde::{Deserialize, Serialize};

/// Vehicle identity as captured by the caller. Only the year is range-checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleIdentity {
    pub year: i32,
    pub make: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
}

impl VehicleIdentity {
    pub fn new(year: i32, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            year,
            make: make.into(),
            model: model.into(),
            trim: None,
        }
    }

    pub fn with_trim(mut self, trim: impl Into<String>) -> Self {
        self.trim = Some(trim.into());
        self
    }

    /// Whole years between the model year and `as_of_year`. Next year's models are age zero.
    pub fn age(&self, as_of_year: i32) -> u32 {
        as_of_year.saturating_sub(self.year).max(0) as u32
    }
}

/// Itemized terms behind an estimate, returned unredacted for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationBreakdown {
    pub base_msrp: f64,
    pub age_depreciation: f64,
    /// Positive when the vehicle is over expected mileage, negative for a low-mileage credit.
    pub mileage_adjustment: f64,
    pub regional_adjustment: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueEstimate {
    pub estimated_value: f64,
    pub confidence: f64,
    pub breakdown: ValuationBreakdown,
}

/// Proposed repair spend supplied by the diagnosis side of the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepairContext {
    pub repair_cost: f64,
}

impl RepairContext {
    pub fn new(repair_cost: f64) -> Self {
        Self { repair_cost }
    }

    /// Collapses a quoted low/high range into its midpoint.
    pub fn midpoint(low: f64, high: f64) -> Self {
        Self {
            repair_cost: (low + high) / 2.0,
        }
    }
}

/// Recommendation tiers, ordered by ascending cost ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    RepairOnly,
    RepairWithNote,
    RepairAndReplace,
    ReplaceEmphasis,
}

impl RecommendationType {
    pub fn key(&self) -> &'static str {
        match self {
            RecommendationType::RepairOnly => "repair_only",
            RecommendationType::RepairWithNote => "repair_with_note",
            RecommendationType::RepairAndReplace => "repair_and_replace",
            RecommendationType::ReplaceEmphasis => "replace_emphasis",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecommendationType::RepairOnly => "Repair",
            RecommendationType::RepairWithNote => "Repair (with note)",
            RecommendationType::RepairAndReplace => "Repair or replace",
            RecommendationType::ReplaceEmphasis => "Replace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationLevel {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub message: String,
    pub reasoning: String,
    /// `None` when the estimated value could not support a ratio.
    pub cost_ratio: Option<f64>,
    pub threshold: f64,
}

impl RecommendationLevel {
    pub fn ratio_defined(&self) -> bool {
        self.cost_ratio.is_some()
    }
}

/// How the base price was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MsrpSource {
    Catalog,
    BrandAverage,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MsrpResolution {
    pub base_msrp: f64,
    pub source: MsrpSource,
    pub trim_multiplier: f64,
}

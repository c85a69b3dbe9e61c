use super::domain::{ValuationBreakdown, ValueEstimate};
use super::tables::ValuationConstants;

/// Combines the itemized terms into an estimate clamped at the value floor.
pub fn aggregate(breakdown: ValuationBreakdown, constants: &ValuationConstants) -> ValueEstimate {
    let raw = breakdown.base_msrp
        - breakdown.age_depreciation
        - breakdown.mileage_adjustment
        - breakdown.regional_adjustment;

    ValueEstimate {
        estimated_value: raw.max(constants.value_floor),
        confidence: constants.confidence,
        breakdown,
    }
}

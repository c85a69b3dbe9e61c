use std::sync::Arc;

use crate::valuation::contract::{ValuationRequest, VehicleRequest};
use crate::valuation::{ValuationEngine, ValuationService, VehicleIdentity};

/// Valuation year used throughout the tests so ages stay fixed.
pub(super) const AS_OF_YEAR: i32 = 2025;

pub(super) fn engine() -> ValuationEngine {
    ValuationEngine::standard().expect("bundled tables load")
}

pub(super) fn service() -> ValuationService {
    ValuationService::new(Arc::new(engine()))
}

pub(super) fn camry_2020() -> VehicleIdentity {
    VehicleIdentity::new(2020, "Toyota", "Camry")
}

pub(super) fn request(year: i32, make: &str, model: &str, mileage: f64) -> ValuationRequest {
    ValuationRequest {
        vehicle: VehicleRequest {
            year,
            make: make.to_string(),
            model: model.to_string(),
            trim: None,
            mileage,
        },
        repair_cost: None,
        repair_cost_range: None,
        as_of_year: Some(AS_OF_YEAR),
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

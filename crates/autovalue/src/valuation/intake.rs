use super::contract::ValuationRequest;
use super::domain::{RepairContext, VehicleIdentity};

/// Oldest model year the engine accepts.
pub const MIN_MODEL_YEAR: i32 = 1990;
/// Highest odometer reading the engine accepts.
pub const MAX_MILEAGE: f64 = 500_000.0;

/// Request shapes the engine refuses to value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("vehicle year {year} outside {min}..={max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
    #[error("as_of_year {as_of_year} outside {min}..={max}")]
    AsOfYearOutOfRange { as_of_year: i32, min: i32, max: i32 },
    #[error("mileage {mileage} outside 0..={max}")]
    MileageOutOfRange { mileage: f64, max: f64 },
    #[error("{field} must not be blank")]
    MissingField { field: &'static str },
    #[error("{field} must be a finite, non-negative amount")]
    InvalidAmount { field: &'static str },
    #[error("repair cost range low {low} exceeds high {high}")]
    InvertedRepairRange { low: f64, high: f64 },
}

/// Validated engine inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationInput {
    pub vehicle: VehicleIdentity,
    pub mileage: f64,
    pub repair: Option<RepairContext>,
    pub as_of_year: i32,
}

/// Checks a request against the accepted bounds. `current_year` is used when the request
/// carries no `as_of_year`, and caps both a pinned `as_of_year` and the model year.
pub fn validate(
    request: ValuationRequest,
    current_year: i32,
) -> Result<ValuationInput, InvalidInput> {
    let ValuationRequest {
        vehicle,
        repair_cost,
        repair_cost_range,
        as_of_year,
    } = request;
    let as_of_year = as_of_year.unwrap_or(current_year);
    if !(MIN_MODEL_YEAR..=current_year).contains(&as_of_year) {
        return Err(InvalidInput::AsOfYearOutOfRange {
            as_of_year,
            min: MIN_MODEL_YEAR,
            max: current_year,
        });
    }

    let max_year = current_year.saturating_add(1);
    if vehicle.year < MIN_MODEL_YEAR || vehicle.year > max_year {
        return Err(InvalidInput::YearOutOfRange {
            year: vehicle.year,
            min: MIN_MODEL_YEAR,
            max: max_year,
        });
    }

    if !(vehicle.mileage.is_finite() && (0.0..=MAX_MILEAGE).contains(&vehicle.mileage)) {
        return Err(InvalidInput::MileageOutOfRange {
            mileage: vehicle.mileage,
            max: MAX_MILEAGE,
        });
    }

    let make = required(vehicle.make, "vehicle.make")?;
    let model = required(vehicle.model, "vehicle.model")?;
    let trim = vehicle
        .trim
        .map(|trim| trim.trim().to_string())
        .filter(|trim| !trim.is_empty());

    let repair = match (repair_cost, repair_cost_range) {
        (Some(cost), _) => Some(RepairContext::new(amount(cost, "repair_cost")?)),
        (None, Some(range)) => {
            let low = amount(range.low, "repair_cost_range.low")?;
            let high = amount(range.high, "repair_cost_range.high")?;
            if low > high {
                return Err(InvalidInput::InvertedRepairRange { low, high });
            }
            Some(RepairContext::midpoint(low, high))
        }
        (None, None) => None,
    };

    Ok(ValuationInput {
        vehicle: VehicleIdentity {
            year: vehicle.year,
            make,
            model,
            trim,
        },
        mileage: vehicle.mileage,
        repair,
        as_of_year,
    })
}

fn required(value: String, field: &'static str) -> Result<String, InvalidInput> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(InvalidInput::MissingField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

fn amount(value: f64, field: &'static str) -> Result<f64, InvalidInput> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InvalidInput::InvalidAmount { field })
    }
}

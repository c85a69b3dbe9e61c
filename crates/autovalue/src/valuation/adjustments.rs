use super::tables::{DepreciationSchedule, MileagePolicy};

/// Accumulated depreciation rate for a vehicle of `age` years, capped at the schedule maximum.
pub fn depreciation_rate(age: u32, schedule: &DepreciationSchedule) -> f64 {
    let accumulated: f64 = schedule
        .brackets
        .iter()
        .filter(|bracket| age >= bracket.first_age)
        .map(|bracket| {
            let years = age.min(bracket.last_age) - bracket.first_age + 1;
            f64::from(years) * bracket.rate_per_year
        })
        .sum();

    accumulated.min(schedule.max_rate)
}

pub fn depreciation(base_msrp: f64, age: u32, schedule: &DepreciationSchedule) -> f64 {
    base_msrp * depreciation_rate(age, schedule)
}

/// Mileage the vehicle is expected to have at `age`; brand-new vehicles count as one year.
pub fn expected_mileage(age: u32, policy: &MileagePolicy) -> f64 {
    f64::from(age.max(1)) * policy.annual_miles
}

/// Positive amounts reduce value (excess mileage); negative amounts are a low-mileage credit.
pub fn mileage_adjustment(age: u32, actual_mileage: f64, policy: &MileagePolicy) -> f64 {
    let excess = actual_mileage - expected_mileage(age, policy);
    if excess > 0.0 {
        excess * policy.excess_rate
    } else if excess < 0.0 {
        excess * policy.deficit_rate
    } else {
        0.0
    }
}

/// Flat regional correction; a geography-aware index would replace `rate`.
pub fn regional_adjustment(base_msrp: f64, rate: f64) -> f64 {
    base_msrp * rate
}

use super::common::*;
use crate::valuation::contract::RepairCostRange;
use crate::valuation::intake::{validate, MAX_MILEAGE, MIN_MODEL_YEAR};
use crate::valuation::InvalidInput;

#[test]
fn accepts_next_model_year_but_not_beyond() {
    assert!(validate(request(AS_OF_YEAR + 1, "Ford", "Escape", 0.0), AS_OF_YEAR).is_ok());

    match validate(request(AS_OF_YEAR + 2, "Ford", "Escape", 0.0), AS_OF_YEAR) {
        Err(InvalidInput::YearOutOfRange { year, min, max }) => {
            assert_eq!(year, AS_OF_YEAR + 2);
            assert_eq!(min, MIN_MODEL_YEAR);
            assert_eq!(max, AS_OF_YEAR + 1);
        }
        other => panic!("expected year rejection, got {other:?}"),
    }
}

#[test]
fn pinned_as_of_year_cannot_run_ahead_of_the_calendar() {
    let mut future = request(2060, "Toyota", "Camry", 0.0);
    future.as_of_year = Some(2060);

    match validate(future, 2026) {
        Err(InvalidInput::AsOfYearOutOfRange {
            as_of_year,
            min,
            max,
        }) => {
            assert_eq!(as_of_year, 2060);
            assert_eq!(min, MIN_MODEL_YEAR);
            assert_eq!(max, 2026);
        }
        other => panic!("expected as_of_year rejection, got {other:?}"),
    }

    let mut ancient = request(2020, "Toyota", "Camry", 0.0);
    ancient.as_of_year = Some(MIN_MODEL_YEAR - 1);
    assert!(matches!(
        validate(ancient, 2026),
        Err(InvalidInput::AsOfYearOutOfRange { .. })
    ));
}

#[test]
fn model_year_is_bounded_by_the_calendar_not_the_pinned_year() {
    let mut request = request(2028, "Ford", "Escape", 0.0);
    request.as_of_year = Some(2020);

    match validate(request, 2026) {
        Err(InvalidInput::YearOutOfRange { year, max, .. }) => {
            assert_eq!(year, 2028);
            assert_eq!(max, 2027);
        }
        other => panic!("expected year rejection, got {other:?}"),
    }
}

#[test]
fn past_as_of_year_is_accepted() {
    let mut request = request(2018, "Toyota", "Camry", 20000.0);
    request.as_of_year = Some(2021);

    let input = validate(request, 2026).expect("valid request");

    assert_eq!(input.as_of_year, 2021);
}

#[test]
fn rejects_years_before_1990() {
    let err = validate(request(1989, "Ford", "Taurus", 150000.0), AS_OF_YEAR)
        .expect_err("1989 is too old");
    assert!(matches!(err, InvalidInput::YearOutOfRange { .. }));
}

#[test]
fn as_of_year_defaults_to_current_year() {
    let mut request = request(2021, "Ford", "Escape", 40000.0);
    request.as_of_year = None;

    let input = validate(request, 2030).expect("valid request");

    assert_eq!(input.as_of_year, 2030);
}

#[test]
fn rejects_mileage_outside_bounds() {
    for mileage in [-1.0, MAX_MILEAGE + 1.0, f64::NAN] {
        let err = validate(request(2020, "Ford", "Escape", mileage), AS_OF_YEAR)
            .expect_err("mileage rejected");
        assert!(matches!(err, InvalidInput::MileageOutOfRange { .. }));
    }
    assert!(validate(request(2020, "Ford", "Escape", MAX_MILEAGE), AS_OF_YEAR).is_ok());
}

#[test]
fn rejects_blank_make_and_model() {
    assert_eq!(
        validate(request(2020, "  ", "Escape", 1000.0), AS_OF_YEAR),
        Err(InvalidInput::MissingField {
            field: "vehicle.make"
        })
    );
    assert_eq!(
        validate(request(2020, "Ford", "", 1000.0), AS_OF_YEAR),
        Err(InvalidInput::MissingField {
            field: "vehicle.model"
        })
    );
}

#[test]
fn trims_identity_fields_and_drops_blank_trim() {
    let mut request = request(2020, " Toyota ", "Camry  ", 30000.0);
    request.vehicle.trim = Some("   ".to_string());

    let input = validate(request, AS_OF_YEAR).expect("valid request");

    assert_eq!(input.vehicle.make, "Toyota");
    assert_eq!(input.vehicle.model, "Camry");
    assert!(input.vehicle.trim.is_none());
    assert!(input.repair.is_none());
}

#[test]
fn repair_range_collapses_to_midpoint() {
    let mut request = request(2020, "Toyota", "Camry", 30000.0);
    request.repair_cost_range = Some(RepairCostRange {
        low: 800.0,
        high: 1400.0,
    });

    let input = validate(request, AS_OF_YEAR).expect("valid request");

    assert_eq!(input.repair.map(|repair| repair.repair_cost), Some(1100.0));
}

#[test]
fn explicit_repair_cost_wins_over_range() {
    let mut request = request(2020, "Toyota", "Camry", 30000.0);
    request.repair_cost = Some(950.0);
    request.repair_cost_range = Some(RepairCostRange {
        low: 2000.0,
        high: 3000.0,
    });

    let input = validate(request, AS_OF_YEAR).expect("valid request");

    assert_eq!(input.repair.map(|repair| repair.repair_cost), Some(950.0));
}

#[test]
fn rejects_inverted_range_and_negative_costs() {
    let mut inverted = request(2020, "Toyota", "Camry", 30000.0);
    inverted.repair_cost_range = Some(RepairCostRange {
        low: 3000.0,
        high: 2000.0,
    });
    assert!(matches!(
        validate(inverted, AS_OF_YEAR),
        Err(InvalidInput::InvertedRepairRange { .. })
    ));

    let mut negative = request(2020, "Toyota", "Camry", 30000.0);
    negative.repair_cost = Some(-10.0);
    assert_eq!(
        validate(negative, AS_OF_YEAR),
        Err(InvalidInput::InvalidAmount {
            field: "repair_cost"
        })
    );
}

use super::common::*;
use crate::valuation::{RecommendationType, RepairContext};

#[test]
fn small_repair_on_camry_is_endorsed() {
    let engine = engine();
    let estimate = engine.estimate(&camry_2020(), 45000.0, AS_OF_YEAR);

    let level = engine.recommend(
        &RepairContext::new(1500.0),
        estimate.estimated_value,
        5,
        45000.0,
        Some("Toyota"),
    );

    assert!(matches!(
        level.kind,
        RecommendationType::RepairOnly | RecommendationType::RepairWithNote
    ));
    assert_close(level.threshold, 0.23);
    let ratio = level.cost_ratio.expect("ratio defined");
    assert_close(ratio, 1500.0 / 12850.0);
    assert!(level.reasoning.contains("11.7%"));
}

#[test]
fn large_repair_on_camry_favors_replacement() {
    let engine = engine();
    let estimate = engine.estimate(&camry_2020(), 45000.0, AS_OF_YEAR);

    let level = engine.recommend(
        &RepairContext::new(9000.0),
        estimate.estimated_value,
        5,
        45000.0,
        Some("Toyota"),
    );

    assert_eq!(level.kind, RecommendationType::ReplaceEmphasis);
    assert!(level.message.contains("70.0%"));
}

#[test]
fn bands_sit_at_fixed_multiples_of_threshold() {
    let recommender = engine().recommender().clone();
    let cases = [
        (1190.0, RecommendationType::RepairOnly),
        (1210.0, RecommendationType::RepairWithNote),
        (1990.0, RecommendationType::RepairWithNote),
        (2010.0, RecommendationType::RepairAndReplace),
        (2990.0, RecommendationType::RepairAndReplace),
        (3010.0, RecommendationType::ReplaceEmphasis),
    ];

    for (repair_cost, expected) in cases {
        let level = recommender.recommend(repair_cost, 10000.0, 5, 60000.0, Some("Ford"));
        assert_close(level.threshold, 0.20);
        assert_eq!(level.kind, expected, "repair cost {repair_cost}");
    }
}

#[test]
fn bands_are_contiguous_and_ascending() {
    let recommender = engine().recommender().clone();

    let mut previous_kind = RecommendationType::RepairOnly;
    let mut previous_ratio = -1.0;
    for step in 0..=400 {
        let repair_cost = f64::from(step) * 25.0;
        let level = recommender.recommend(repair_cost, 8000.0, 10, 90000.0, Some("Nissan"));
        let ratio = level.cost_ratio.expect("ratio defined");

        assert!(ratio > previous_ratio, "ratio must grow with repair cost");
        assert!(level.kind >= previous_kind, "band went backwards at {repair_cost}");
        previous_kind = level.kind;
        previous_ratio = ratio;
    }
    assert_eq!(previous_kind, RecommendationType::ReplaceEmphasis);
}

#[test]
fn zero_repair_cost_is_a_plain_repair() {
    let level = engine().recommender().recommend(0.0, 5000.0, 14, 190000.0, None);

    assert_eq!(level.kind, RecommendationType::RepairOnly);
    assert_eq!(level.cost_ratio, Some(0.0));
    assert_close(level.threshold, 0.10);
}

#[test]
fn undefined_ratio_forces_replacement() {
    let recommender = engine().recommender().clone();

    for value in [0.0, -250.0, f64::NAN, f64::INFINITY] {
        let level = recommender.recommend(800.0, value, 4, 50000.0, Some("Honda"));
        assert_eq!(level.kind, RecommendationType::ReplaceEmphasis);
        assert!(level.cost_ratio.is_none());
        assert!(!level.ratio_defined());
        assert!(level.reasoning.starts_with("Undefined ratio"));
    }
}

#[test]
fn less_reliable_brands_lose_headroom_once_older() {
    let recommender = engine().recommender().clone();

    assert_close(recommender.threshold(9, 80000.0, Some("Jaguar")), 0.12);
    assert_close(recommender.threshold(6, 80000.0, Some("Jaguar")), 0.20);
    assert_close(recommender.threshold(2, 20000.0, Some("Lexus")), 0.28);
    assert_close(recommender.threshold(13, 210000.0, Some("Mazda")), 0.13);
}

#[test]
fn recommendation_serializes_with_snake_case_type() {
    let level = engine()
        .recommender()
        .recommend(500.0, 10000.0, 5, 60000.0, None);

    let value = serde_json::to_value(&level).expect("level serializes");
    assert_eq!(value["type"], "repair_only");
    assert!(value["cost_ratio"].is_number());
}

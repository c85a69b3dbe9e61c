use super::super::domain::RecommendationType;

pub(crate) struct Narrative {
    pub message: String,
    pub reasoning: String,
}

pub(crate) struct NarrativeInputs {
    pub cost_ratio: f64,
    pub threshold: f64,
    pub upper_band: f64,
    pub age: u32,
    pub mileage: f64,
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn vehicle_context(age: u32, mileage: f64) -> String {
    let years = if age == 1 { "year" } else { "years" };
    format!("{age} {years} old with {:.0} miles", mileage.max(0.0))
}

pub(crate) fn describe(kind: RecommendationType, inputs: &NarrativeInputs) -> Narrative {
    let ratio = percent(inputs.cost_ratio);
    let threshold = percent(inputs.threshold);
    let context = vehicle_context(inputs.age, inputs.mileage);

    match kind {
        RecommendationType::RepairOnly => Narrative {
            message: format!("Repair recommended: the repair is only {ratio} of the vehicle's value."),
            reasoning: format!(
                "The repair costs {ratio} of the estimated value, well below the {threshold} \
                 threshold for a vehicle {context}. Repairing is the most economical choice."
            ),
        },
        RecommendationType::RepairWithNote => Narrative {
            message: format!("Repair is reasonable at {ratio} of the vehicle's value."),
            reasoning: format!(
                "The repair costs {ratio} of the estimated value, under the {threshold} threshold \
                 for a vehicle {context}, but it is a meaningful share of what the vehicle is \
                 worth. Weigh upcoming maintenance before committing."
            ),
        },
        RecommendationType::RepairAndReplace => Narrative {
            message: format!(
                "Repair or replace: the repair is {ratio} of the vehicle's value."
            ),
            reasoning: format!(
                "The repair costs {ratio} of the estimated value, above the {threshold} threshold \
                 for a vehicle {context} but below {}. Both repairing and replacing are \
                 defensible; compare the repair against replacement options.",
                percent(inputs.upper_band)
            ),
        },
        RecommendationType::ReplaceEmphasis => Narrative {
            message: format!("Consider replacing: the repair is {ratio} of the vehicle's value."),
            reasoning: format!(
                "The repair costs {ratio} of the estimated value, far beyond the {threshold} \
                 threshold for a vehicle {context}. That money is likely better spent toward a \
                 replacement."
            ),
        },
    }
}

pub(crate) fn undefined_ratio(threshold: f64) -> Narrative {
    Narrative {
        message: "Consider replacing: the vehicle's value could not be established.".to_string(),
        reasoning: format!(
            "Undefined ratio: the estimated value is zero or unavailable, so the repair cannot be \
             compared against the {} threshold. Treat the repair as exceeding the vehicle's worth \
             until a valuation is available.",
            percent(threshold)
        ),
    }
}

use crate::infra::{current_year, format_currency, format_percent, load_engine, valuation_config};
use autovalue::config::ValuationConfig;
use autovalue::error::AppError;
use autovalue::valuation::{
    Appraisal, MsrpSource, RepairCostRange, ValuationEngine, ValuationRequest, ValuationService,
    ValuationTables, VehicleRequest,
};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ValueArgs {
    /// Model year of the vehicle
    #[arg(long)]
    pub(crate) year: i32,
    /// Manufacturer, e.g. Toyota
    #[arg(long)]
    pub(crate) make: String,
    /// Model name, e.g. Camry
    #[arg(long)]
    pub(crate) model: String,
    /// Optional trim level, e.g. Summit
    #[arg(long)]
    pub(crate) trim: Option<String>,
    /// Current odometer reading
    #[arg(long)]
    pub(crate) mileage: f64,
    /// Quoted repair cost
    #[arg(long, conflicts_with_all = ["repair_low", "repair_high"])]
    pub(crate) repair_cost: Option<f64>,
    /// Low end of a quoted repair range (requires --repair-high)
    #[arg(long, requires = "repair_high")]
    pub(crate) repair_low: Option<f64>,
    /// High end of a quoted repair range (requires --repair-low)
    #[arg(long, requires = "repair_low")]
    pub(crate) repair_high: Option<f64>,
    /// Calendar year to value the vehicle in (defaults to the current year)
    #[arg(long)]
    pub(crate) as_of_year: Option<i32>,
    /// Print the JSON response instead of the report
    #[arg(long)]
    pub(crate) json: bool,
    /// Reference tables JSON to use instead of the configured tables
    #[arg(long)]
    pub(crate) tables: Option<PathBuf>,
    /// Extra MSRP catalog rows (make,model,year,msrp)
    #[arg(long)]
    pub(crate) msrp_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TablesCheckArgs {
    /// Reference tables JSON to validate (defaults to the configured tables)
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
    /// Extra MSRP catalog rows to merge before validating
    #[arg(long)]
    pub(crate) msrp_csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Calendar year to value the scenarios in (defaults to the current year)
    #[arg(long)]
    pub(crate) as_of_year: Option<i32>,
}

pub(crate) fn run_value(args: ValueArgs) -> Result<(), AppError> {
    let ValueArgs {
        year,
        make,
        model,
        trim,
        mileage,
        repair_cost,
        repair_low,
        repair_high,
        as_of_year,
        json,
        tables,
        msrp_csv,
    } = args;

    let config = valuation_config(tables, msrp_csv)?;
    let service = ValuationService::new(load_engine(&config)?);

    let repair_cost_range = match (repair_low, repair_high) {
        (Some(low), Some(high)) => Some(RepairCostRange { low, high }),
        _ => None,
    };
    let request = ValuationRequest {
        vehicle: VehicleRequest {
            year,
            make,
            model,
            trim,
            mileage,
        },
        repair_cost,
        repair_cost_range,
        as_of_year,
    };

    let appraisal = service.appraise(request, current_year())?;

    if json {
        match serde_json::to_string_pretty(&appraisal.to_response()) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("Response unavailable: {err}"),
        }
    } else {
        render_appraisal(service.engine(), &appraisal);
    }

    Ok(())
}

pub(crate) fn run_tables_check(args: TablesCheckArgs) -> Result<(), AppError> {
    let config = valuation_config(args.path, args.msrp_csv)?;
    let tables = ValuationTables::from_config(&config)?;
    render_tables_summary(&config, &tables);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of_year = args.as_of_year.unwrap_or_else(current_year);
    let service = ValuationService::new(load_engine(&ValuationConfig::default())?);

    println!("Vehicle valuation demo (valued in {as_of_year})");

    for scenario in demo_scenarios(as_of_year) {
        println!("\n== {} ==", scenario.title);
        match service.appraise(scenario.request, current_year()) {
            Ok(appraisal) => render_appraisal(service.engine(), &appraisal),
            Err(err) => println!("  Rejected: {err}"),
        }
    }

    Ok(())
}

struct DemoScenario {
    title: &'static str,
    request: ValuationRequest,
}

fn demo_scenarios(as_of_year: i32) -> Vec<DemoScenario> {
    let vehicle = |year: i32, make: &str, model: &str, trim: Option<&str>, mileage: f64| {
        VehicleRequest {
            year,
            make: make.to_string(),
            model: model.to_string(),
            trim: trim.map(str::to_string),
            mileage,
        }
    };
    let request = |vehicle: VehicleRequest, repair_cost: Option<f64>| ValuationRequest {
        vehicle,
        repair_cost,
        repair_cost_range: None,
        as_of_year: Some(as_of_year),
    };

    vec![
        DemoScenario {
            title: "Routine repair on a 2020 Camry",
            request: request(
                vehicle(2020, "Toyota", "Camry", None, 45000.0),
                Some(1500.0),
            ),
        },
        DemoScenario {
            title: "Major repair on the same Camry",
            request: request(
                vehicle(2020, "Toyota", "Camry", None, 45000.0),
                Some(9000.0),
            ),
        },
        DemoScenario {
            title: "Unrecognized make",
            request: request(vehicle(2015, "Zzzbrand", "X", None, 60000.0), None),
        },
        DemoScenario {
            title: "Premium trim",
            request: request(
                vehicle(2022, "Jeep", "Grand Cherokee", Some("Summit"), 10000.0),
                None,
            ),
        },
        DemoScenario {
            title: "Extreme mileage on a young car",
            request: request(
                vehicle(as_of_year - 3, "Honda", "Civic", None, 300000.0),
                Some(2000.0),
            ),
        },
    ]
}

pub(crate) fn render_appraisal(engine: &ValuationEngine, appraisal: &Appraisal) {
    let vehicle = &appraisal.vehicle;
    let trim = vehicle
        .trim
        .as_deref()
        .map(|trim| format!(" {trim}"))
        .unwrap_or_default();
    println!(
        "Vehicle: {} {} {}{} | {:.0} miles | {} years old (valued {})",
        vehicle.year,
        vehicle.make,
        vehicle.model,
        trim,
        appraisal.mileage,
        appraisal.age,
        appraisal.as_of_year
    );

    let resolution = engine.resolve_msrp(vehicle);
    let source = match resolution.source {
        MsrpSource::Catalog => "catalog",
        MsrpSource::BrandAverage => "brand average",
    };

    let estimate = &appraisal.estimate;
    let breakdown = &estimate.breakdown;
    println!(
        "Estimated value: {} (confidence {:.0}%)",
        format_currency(estimate.estimated_value),
        estimate.confidence * 100.0
    );
    println!(
        "- Base MSRP: {} ({source}, trim x{:.2})",
        format_currency(breakdown.base_msrp),
        resolution.trim_multiplier
    );
    println!(
        "- Age depreciation: {}",
        format_currency(-breakdown.age_depreciation)
    );
    println!(
        "- Mileage adjustment: {}",
        format_currency(-breakdown.mileage_adjustment)
    );
    println!(
        "- Regional adjustment: {}",
        format_currency(-breakdown.regional_adjustment)
    );

    match &appraisal.recommendation {
        Some(level) => {
            println!("Recommendation: {}", level.kind.label());
            println!("  {}", level.message);
            println!("  {}", level.reasoning);
            match level.cost_ratio {
                Some(ratio) => println!(
                    "  Repair-to-value {} | threshold {}",
                    format_percent(ratio),
                    format_percent(level.threshold)
                ),
                None => println!(
                    "  Repair-to-value undefined | threshold {}",
                    format_percent(level.threshold)
                ),
            }
        }
        None => println!("Recommendation: none (no repair cost supplied)"),
    }
}

fn render_tables_summary(config: &ValuationConfig, tables: &ValuationTables) {
    let summary = tables.summary();
    let source = config
        .tables_path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "bundled".to_string());

    println!("Reference tables OK");
    println!("- Source: {source}");
    if let Some(path) = &config.msrp_catalog_path {
        println!("- Catalog overlay: {}", path.display());
    }
    println!(
        "- Version {} (schema {})",
        summary.version, summary.schema_version
    );
    println!("- {} catalog entries", summary.catalog_entries);
    println!("- {} brand averages", summary.brand_averages);
    println!("- {} trim patterns", summary.trim_patterns);
    println!(
        "- {} threshold rules (last match wins)",
        summary.threshold_rules
    );
    for (index, rule) in tables.recommendation.threshold_rules.iter().enumerate() {
        println!(
            "  {}. {:?} -> {}",
            index + 1,
            rule.when,
            format_percent(rule.threshold)
        );
    }
    println!(
        "- Brand tiers: {} reliable, {} less reliable",
        summary.reliable_brands, summary.less_reliable_brands
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scenarios_all_appraise() {
        let engine = ValuationEngine::standard().expect("bundled tables");
        let service = ValuationService::new(std::sync::Arc::new(engine));

        let scenarios = demo_scenarios(2025);
        assert_eq!(scenarios.len(), 5);
        for scenario in scenarios {
            let appraisal = service
                .appraise(scenario.request, 2025)
                .unwrap_or_else(|err| panic!("{} rejected: {err}", scenario.title));
            assert!(appraisal.estimate.estimated_value >= 1500.0);
        }
    }
}

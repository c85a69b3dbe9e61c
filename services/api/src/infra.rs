use autovalue::config::{AppConfig, ValuationConfig};
use autovalue::error::AppError;
use autovalue::valuation::{ValuationEngine, ValuationTables};
use chrono::{Datelike, Local};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn current_year() -> i32 {
    Local::now().year()
}

/// Table sources from explicit CLI flags, or from the environment when no flag is given.
pub(crate) fn valuation_config(
    tables: Option<PathBuf>,
    msrp_csv: Option<PathBuf>,
) -> Result<ValuationConfig, AppError> {
    if tables.is_none() && msrp_csv.is_none() {
        return Ok(AppConfig::load()?.valuation);
    }

    Ok(ValuationConfig {
        tables_path: tables,
        msrp_catalog_path: msrp_csv,
    })
}

pub(crate) fn load_engine(config: &ValuationConfig) -> Result<Arc<ValuationEngine>, AppError> {
    let tables = ValuationTables::from_config(config)?;
    Ok(Arc::new(ValuationEngine::new(tables)))
}

/// Whole-unit dollar formatting with thousands separators, e.g. `-$1,234`.
pub(crate) fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}")
}

pub(crate) fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

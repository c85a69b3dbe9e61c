//! Versioned reference data behind every valuation rule.
//!
//! Prices, trim multipliers, reliability tiers, the depreciation schedule and the threshold
//! decision table are data, not code. The bundled `data/valuation_tables.json` is embedded at
//! build time; deployments can point `VALUATION_TABLES_PATH` at a replacement and
//! `VALUATION_MSRP_CSV` at extra catalog rows.

mod catalog;

use crate::config::ValuationConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

pub use catalog::parse_catalog;

/// Schema revision understood by this build.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 1;

const BUNDLED_TABLES: &str = include_str!("../../../data/valuation_tables.json");

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read reference tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("reference tables are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid MSRP catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported table schema version {found} (expected {expected})")]
    UnsupportedSchema { found: u32, expected: u32 },
    #[error("invalid reference table field `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

impl TableError {
    fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationTables {
    pub schema_version: u32,
    pub version: String,
    pub constants: ValuationConstants,
    pub msrp: MsrpTable,
    pub depreciation: DepreciationSchedule,
    pub mileage: MileagePolicy,
    pub recommendation: RecommendationTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationConstants {
    /// Minimum estimated value ever reported.
    pub value_floor: f64,
    /// Placeholder confidence reported with every estimate.
    pub confidence: f64,
    /// Share of MSRP removed as the regional correction.
    pub regional_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MsrpTable {
    pub reference_year: i32,
    pub year_step: f64,
    pub generic_average: f64,
    pub fallback_minimum: f64,
    pub catalog: Vec<CatalogEntry>,
    pub brand_averages: BTreeMap<String, f64>,
    pub trim_multipliers: Vec<TrimMultiplier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub msrp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrimMultiplier {
    pub pattern: String,
    pub factor: f64,
}

/// Tiered step schedule. Each bracket adds `rate_per_year` for every year of age that falls
/// inside `first_age..=last_age`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationSchedule {
    pub max_rate: f64,
    pub brackets: Vec<DepreciationBracket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepreciationBracket {
    pub first_age: u32,
    pub last_age: u32,
    pub rate_per_year: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MileagePolicy {
    pub annual_miles: f64,
    /// Per-mile penalty above expected mileage.
    pub excess_rate: f64,
    /// Per-mile credit below expected mileage.
    pub deficit_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTable {
    pub base_threshold: f64,
    /// Evaluated in order; the last matching rule sets the threshold.
    pub threshold_rules: Vec<ThresholdRule>,
    pub brand_tiers: BrandTierTable,
    pub bands: BandMultipliers,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub when: ThresholdCondition,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdCondition {
    AgeAtMost(u32),
    AgeAtLeast(u32),
    MileageAbove(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandTierTable {
    pub reliable: Vec<String>,
    pub less_reliable: Vec<String>,
    pub reliable_nudge: f64,
    pub less_reliable_nudge: f64,
    /// The less-reliable nudge applies only to vehicles strictly older than this.
    pub less_reliable_min_age: u32,
}

/// Upper bounds of the first three bands as multiples of the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandMultipliers {
    pub repair_only: f64,
    pub repair_with_note: f64,
    pub repair_and_replace: f64,
}

/// Outcome of [`ValuationTables::merge_catalog`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogMerge {
    /// Rows for vehicles the catalog did not list yet.
    pub added: usize,
    /// Rows that overwrote the price of an existing entry.
    pub replaced: usize,
}

/// Counts reported by the tables endpoint and the `tables check` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablesSummary {
    pub schema_version: u32,
    pub version: String,
    pub catalog_entries: usize,
    pub brand_averages: usize,
    pub trim_patterns: usize,
    pub threshold_rules: usize,
    pub reliable_brands: usize,
    pub less_reliable_brands: usize,
}

impl ValuationTables {
    /// Tables bundled with the crate.
    pub fn standard() -> Result<Self, TableError> {
        Self::from_json_str(BUNDLED_TABLES)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, TableError> {
        let tables: Self = serde_json::from_str(raw)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let tables: Self = serde_json::from_reader(reader)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Resolves the tables a deployment asked for, merging any extra catalog CSV on top.
    pub fn from_config(config: &ValuationConfig) -> Result<Self, TableError> {
        let mut tables = match &config.tables_path {
            Some(path) => Self::from_path(path)?,
            None => Self::standard()?,
        };

        if let Some(path) = &config.msrp_catalog_path {
            let file = std::fs::File::open(path)?;
            tables.merge_catalog(file)?;
        }

        Ok(tables)
    }

    /// Applies catalog rows from a `make,model,year,msrp` CSV. Rows for a vehicle already in
    /// the catalog replace the existing price. The tables are left untouched unless the merged
    /// result validates.
    pub fn merge_catalog<R: Read>(&mut self, reader: R) -> Result<CatalogMerge, TableError> {
        let rows = parse_catalog(reader)?;
        let mut staged = self.clone();
        let catalog = &mut staged.msrp.catalog;
        let mut merge = CatalogMerge::default();

        for row in rows {
            let key = catalog_key(&row.make, &row.model, row.year);
            let existing = catalog
                .iter()
                .position(|entry| catalog_key(&entry.make, &entry.model, entry.year) == key);
            match existing {
                Some(index) => {
                    catalog[index].msrp = row.msrp;
                    merge.replaced += 1;
                }
                None => {
                    catalog.push(row);
                    merge.added += 1;
                }
            }
        }

        staged.validate()?;
        *self = staged;
        Ok(merge)
    }

    pub fn summary(&self) -> TablesSummary {
        TablesSummary {
            schema_version: self.schema_version,
            version: self.version.clone(),
            catalog_entries: self.msrp.catalog.len(),
            brand_averages: self.msrp.brand_averages.len(),
            trim_patterns: self.msrp.trim_multipliers.len(),
            threshold_rules: self.recommendation.threshold_rules.len(),
            reliable_brands: self.recommendation.brand_tiers.reliable.len(),
            less_reliable_brands: self.recommendation.brand_tiers.less_reliable.len(),
        }
    }

    pub fn validate(&self) -> Result<(), TableError> {
        if self.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(TableError::UnsupportedSchema {
                found: self.schema_version,
                expected: SUPPORTED_SCHEMA_VERSION,
            });
        }

        if self.version.trim().is_empty() {
            return Err(TableError::invalid("version", "must not be blank"));
        }

        let constants = &self.constants;
        positive("constants.value_floor", constants.value_floor)?;
        fraction("constants.confidence", constants.confidence)?;
        fraction("constants.regional_rate", constants.regional_rate)?;

        let msrp = &self.msrp;
        non_negative("msrp.year_step", msrp.year_step)?;
        positive("msrp.generic_average", msrp.generic_average)?;
        positive("msrp.fallback_minimum", msrp.fallback_minimum)?;
        for entry in &msrp.catalog {
            if entry.make.trim().is_empty() || entry.model.trim().is_empty() {
                return Err(TableError::invalid(
                    "msrp.catalog",
                    "make and model must not be blank",
                ));
            }
            positive(
                &format!(
                    "msrp.catalog[{}]",
                    catalog_key(&entry.make, &entry.model, entry.year)
                ),
                entry.msrp,
            )?;
        }
        for (make, average) in &msrp.brand_averages {
            positive(&format!("msrp.brand_averages[{make}]"), *average)?;
        }
        for trim in &msrp.trim_multipliers {
            if trim.pattern.trim().is_empty() {
                return Err(TableError::invalid(
                    "msrp.trim_multipliers",
                    "pattern must not be blank",
                ));
            }
            if !(trim.factor > 0.0 && trim.factor <= 3.0) {
                return Err(TableError::invalid(
                    format!("msrp.trim_multipliers[{}]", trim.pattern),
                    format!("factor {} outside (0, 3]", trim.factor),
                ));
            }
        }

        fraction("depreciation.max_rate", self.depreciation.max_rate)?;
        for bracket in &self.depreciation.brackets {
            if bracket.first_age > bracket.last_age {
                return Err(TableError::invalid(
                    "depreciation.brackets",
                    format!(
                        "first_age {} after last_age {}",
                        bracket.first_age, bracket.last_age
                    ),
                ));
            }
            fraction("depreciation.brackets.rate_per_year", bracket.rate_per_year)?;
        }

        positive("mileage.annual_miles", self.mileage.annual_miles)?;
        non_negative("mileage.excess_rate", self.mileage.excess_rate)?;
        non_negative("mileage.deficit_rate", self.mileage.deficit_rate)?;

        let recommendation = &self.recommendation;
        positive(
            "recommendation.base_threshold",
            recommendation.base_threshold,
        )?;
        for rule in &recommendation.threshold_rules {
            positive("recommendation.threshold_rules.threshold", rule.threshold)?;
        }
        let tiers = &recommendation.brand_tiers;
        non_negative("recommendation.brand_tiers.reliable_nudge", tiers.reliable_nudge)?;
        non_negative(
            "recommendation.brand_tiers.less_reliable_nudge",
            tiers.less_reliable_nudge,
        )?;

        let bands = recommendation.bands;
        positive("recommendation.bands.repair_only", bands.repair_only)?;
        if !(bands.repair_only < bands.repair_with_note
            && bands.repair_with_note < bands.repair_and_replace)
        {
            return Err(TableError::invalid(
                "recommendation.bands",
                "band multipliers must be strictly ascending",
            ));
        }

        Ok(())
    }
}

/// Lookup key shared by the catalog index and catalog merges.
pub(crate) fn catalog_key(make: &str, model: &str, year: i32) -> String {
    format!("{}-{}-{}", normalize(make), normalize(model), year)
}

/// Lowercases and collapses runs of whitespace.
pub(crate) fn normalize(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn positive(field: &str, value: f64) -> Result<(), TableError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TableError::invalid(field, format!("{value} must be positive")))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), TableError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TableError::invalid(
            field,
            format!("{value} must not be negative"),
        ))
    }
}

fn fraction(field: &str, value: f64) -> Result<(), TableError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TableError::invalid(
            field,
            format!("{value} outside [0, 1]"),
        ))
    }
}

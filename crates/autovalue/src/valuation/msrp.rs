use super::domain::{MsrpResolution, MsrpSource};
use super::tables::{catalog_key, normalize, MsrpTable};
use std::collections::HashMap;

/// Base-price lookup: curated catalog first, brand-average formula otherwise.
#[derive(Debug, Clone)]
pub struct MsrpResolver {
    catalog: HashMap<String, f64>,
    brand_averages: HashMap<String, f64>,
    trims: Vec<(String, f64)>,
    reference_year: i32,
    year_step: f64,
    generic_average: f64,
    fallback_minimum: f64,
}

impl MsrpResolver {
    pub fn new(table: &MsrpTable) -> Self {
        let catalog = table
            .catalog
            .iter()
            .map(|entry| {
                (
                    catalog_key(&entry.make, &entry.model, entry.year),
                    entry.msrp,
                )
            })
            .collect();
        let brand_averages = table
            .brand_averages
            .iter()
            .map(|(make, average)| (normalize(make), *average))
            .collect();
        let trims = table
            .trim_multipliers
            .iter()
            .map(|trim| (normalize(&trim.pattern), trim.factor))
            .collect();

        Self {
            catalog,
            brand_averages,
            trims,
            reference_year: table.reference_year,
            year_step: table.year_step,
            generic_average: table.generic_average,
            fallback_minimum: table.fallback_minimum,
        }
    }

    pub fn resolve(&self, make: &str, model: &str, year: i32, trim: Option<&str>) -> MsrpResolution {
        let (base, source) = match self.catalog.get(&catalog_key(make, model, year)) {
            Some(msrp) => (*msrp, MsrpSource::Catalog),
            None => (self.fallback(make, year), MsrpSource::BrandAverage),
        };
        let trim_multiplier = trim.map(|trim| self.trim_multiplier(trim)).unwrap_or(1.0);

        MsrpResolution {
            base_msrp: base * trim_multiplier,
            source,
            trim_multiplier,
        }
    }

    /// `brand average + (year - reference year) * step`, never below the fallback minimum.
    pub fn fallback(&self, make: &str, year: i32) -> f64 {
        let average = self.brand_average(make);
        let offset = f64::from(year - self.reference_year) * self.year_step;
        (average + offset).max(self.fallback_minimum)
    }

    pub fn brand_average(&self, make: &str) -> f64 {
        self.brand_averages
            .get(&normalize(make))
            .copied()
            .unwrap_or(self.generic_average)
    }

    /// Exact pattern match wins; otherwise the longest pattern contained in the trim.
    pub fn trim_multiplier(&self, trim: &str) -> f64 {
        let trim = normalize(trim);
        if trim.is_empty() {
            return 1.0;
        }

        if let Some((_, factor)) = self.trims.iter().find(|(pattern, _)| *pattern == trim) {
            return *factor;
        }

        self.trims
            .iter()
            .filter(|(pattern, _)| trim.contains(pattern.as_str()))
            .max_by_key(|(pattern, _)| pattern.len())
            .map(|(_, factor)| *factor)
            .unwrap_or(1.0)
    }
}

//! Vehicle valuation and repair-vs-replace recommendation.
//!
//! Data flows one way: identity → MSRP resolution → depreciation, mileage and regional
//! adjustments → aggregate estimate → recommendation. Every step is a pure function of its
//! inputs and the immutable [`ValuationTables`].

pub mod adjustments;
pub mod aggregate;
pub mod contract;
pub mod domain;
pub mod intake;
pub mod msrp;
pub mod recommendation;
pub mod router;
pub mod service;
pub mod tables;

#[cfg(test)]
mod tests;

pub use contract::{
    MarketAnalysis, RepairCostRange, TradeVsRepair, ValuationRequest, ValuationResponse,
    ValueBreakdownView, VehicleRequest,
};
pub use domain::{
    MsrpResolution, MsrpSource, RecommendationLevel, RecommendationType, RepairContext,
    ValuationBreakdown, ValueEstimate, VehicleIdentity,
};
pub use intake::{InvalidInput, ValuationInput};
pub use router::valuation_router;
pub use service::{Appraisal, ValuationService};
pub use tables::{CatalogMerge, TableError, TablesSummary, ValuationTables};

use msrp::MsrpResolver;
use recommendation::Recommender;
use tracing::debug;

/// Immutable engine assembled from one set of reference tables.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    tables: ValuationTables,
    resolver: MsrpResolver,
    recommender: Recommender,
}

impl ValuationEngine {
    pub fn new(tables: ValuationTables) -> Self {
        let resolver = MsrpResolver::new(&tables.msrp);
        let recommender = Recommender::new(&tables.recommendation);
        Self {
            tables,
            resolver,
            recommender,
        }
    }

    /// Engine over the tables bundled with the crate.
    pub fn standard() -> Result<Self, TableError> {
        ValuationTables::standard().map(Self::new)
    }

    pub fn tables(&self) -> &ValuationTables {
        &self.tables
    }

    pub fn resolve_msrp(&self, vehicle: &VehicleIdentity) -> MsrpResolution {
        let resolution = self.resolver.resolve(
            &vehicle.make,
            &vehicle.model,
            vehicle.year,
            vehicle.trim.as_deref(),
        );

        if resolution.source == MsrpSource::BrandAverage {
            debug!(
                make = %vehicle.make,
                model = %vehicle.model,
                year = vehicle.year,
                base_msrp = resolution.base_msrp,
                "vehicle not in catalog, using brand average"
            );
        }

        resolution
    }

    pub fn depreciation(&self, base_msrp: f64, age: u32) -> f64 {
        adjustments::depreciation(base_msrp, age, &self.tables.depreciation)
    }

    pub fn mileage_adjustment(&self, age: u32, mileage: f64) -> f64 {
        adjustments::mileage_adjustment(age, mileage, &self.tables.mileage)
    }

    pub fn regional_adjustment(&self, base_msrp: f64) -> f64 {
        adjustments::regional_adjustment(base_msrp, self.tables.constants.regional_rate)
    }

    /// Current market value of `vehicle` with `mileage` miles, valued in `as_of_year`.
    pub fn estimate(&self, vehicle: &VehicleIdentity, mileage: f64, as_of_year: i32) -> ValueEstimate {
        let age = vehicle.age(as_of_year);
        let base_msrp = self.resolve_msrp(vehicle).base_msrp;

        let breakdown = ValuationBreakdown {
            base_msrp,
            age_depreciation: self.depreciation(base_msrp, age),
            mileage_adjustment: self.mileage_adjustment(age, mileage),
            regional_adjustment: self.regional_adjustment(base_msrp),
        };

        aggregate::aggregate(breakdown, &self.tables.constants)
    }

    pub fn recommend(
        &self,
        repair: &RepairContext,
        estimated_value: f64,
        age: u32,
        mileage: f64,
        brand: Option<&str>,
    ) -> RecommendationLevel {
        self.recommender
            .recommend(repair.repair_cost, estimated_value, age, mileage, brand)
    }

    pub fn recommender(&self) -> &Recommender {
        &self.recommender
    }
}

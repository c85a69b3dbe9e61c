//! Vehicle valuation and repair-vs-replace decision engine.
//!
//! The [`valuation`] module holds the pure engine: MSRP resolution, the depreciation, mileage
//! and regional adjusters, aggregation, and the recommendation classifier. The surrounding
//! modules carry the service plumbing shared by the HTTP binary and the CLI.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod valuation;

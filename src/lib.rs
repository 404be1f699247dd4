//! Smart-meter reading store and electricity price plan comparison service.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod pricing;
pub mod readings;
/// Plain-text cost report for every stored meter.
pub mod report;

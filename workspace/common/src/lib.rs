//! Common transport-layer types shared between the API handlers and any
//! client consuming them. These structs mirror the aggregator's output so
//! presentation code can deserialize responses without duplicating shapes.

pub mod converters;
mod summary;

pub use converters::{month_bounds, month_key, parse_month_key};
pub use summary::{BudgetTrackPoint, CategorySlice, DashboardSummary, MonthlySummary};

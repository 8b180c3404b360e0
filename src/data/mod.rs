//! Data module - payload model and loading

mod loader;
mod payload;

pub use loader::{PayloadError, PayloadLoader};
pub use payload::{
    BreakdownSection, DashboardPayload, FxSection, SummarySection, TrendSection,
};

//! Redevelopment feasibility appraisal.
//!
//! One snapshot of site, regulatory, cost, and sales parameters goes in; a
//! deterministic schedule of areas, sellable space, costs, revenue, and owner
//! equity comes out. The pipeline runs five stages in fixed dependency order
//! (areas → sales → costs → revenue → equity); each stage consumes only its
//! own inputs and upstream stage outputs.

pub mod areas;
pub mod costs;
pub mod engine;
pub mod equity;
pub mod input;
pub mod revenue;
pub mod sales;


#[cfg(test)]
mod benchmark;

pub use areas::AreaSchedule;
pub use costs::{CostSchedule, FeeBreakdown};
pub use engine::{AppraisalEngine, AppraisalResult};
pub use equity::EquityOutcome;
pub use input::AppraisalInput;
pub use revenue::RevenueSchedule;
pub use sales::SalesBreakdown;

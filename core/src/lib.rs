//! beefops-core: derived-metrics engine behind the Beef Ops ROI dashboard.
//!
//! Every number the dashboard shows is produced here from the current
//! assumption set and a fixed synthetic dataset. Rendering lives elsewhere.

pub mod assumptions;
pub mod campaign;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod format;
pub mod kpi;
pub mod macro_roi;
pub mod snapshot;
pub mod types;
pub mod upsell;

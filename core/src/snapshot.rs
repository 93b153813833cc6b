//! Snapshot serialization: everything the presentation layer needs
//! to draw one frame of the dashboard, as a single JSON-ready record.

use crate::{
    assumptions::{Parameter, ParameterRange},
    campaign::CampaignReport,
    kpi::{ChartSeries, KpiCard},
    macro_roi::MacroResult,
    upsell::ChannelProjection,
};
use serde::{Deserialize, Serialize};

pub const FOOTER_NOTE: &str = "Demo with synthetic data and macro assumptions.";

/// One slider: its position, bounds and read-out text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionReadout {
    pub parameter: Parameter,
    pub label:     String,
    pub value:     f64,
    pub display:   String,
    pub range:     ParameterRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelView {
    pub projection: ChannelProjection,
    pub card:       KpiCard,
    pub series:     Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub assumptions:        Vec<AssumptionReadout>,
    pub macro_result:       MacroResult,
    pub macro_cards:        Vec<KpiCard>,
    pub campaign:           CampaignReport,
    pub campaign_cards:     Vec<KpiCard>,
    pub interaction_series: Vec<ChartSeries>,
    pub conversion_series:  ChartSeries,
    pub channels:           Vec<ChannelView>,
    pub footer:             String,
}

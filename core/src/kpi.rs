//! Display records handed to the presentation layer: KPI cards with
//! pre-formatted strings, and chart series with raw values.

use crate::{
    assumptions::AssumptionSet,
    campaign::{CampaignReport, CampaignSummary},
    format::{format_mxn, format_pct, format_pp_signed, round_half_up},
    macro_roi::MacroResult,
    upsell::ChannelProjection,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    pub delta: Option<String>,
    /// Drives the up/down arrow and colour of `delta`.
    pub good:  bool,
}

impl KpiCard {
    fn new(title: impl Into<String>, value: String) -> Self {
        Self { title: title.into(), value, delta: None, good: true }
    }

    fn with_delta(mut self, delta: String, good: bool) -> Self {
        self.delta = Some(delta);
        self.good = good;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name:   String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    fn build<'a>(name: &str, points: impl Iterator<Item = (&'a str, f64)>) -> Self {
        Self {
            name:   name.to_string(),
            points: points
                .map(|(label, value)| ChartPoint { label: label.to_string(), value })
                .collect(),
        }
    }
}

pub fn macro_cards(result: &MacroResult, assumptions: &AssumptionSet) -> Vec<KpiCard> {
    vec![
        KpiCard::new("Baseline sales", format_mxn(result.baseline_revenue)),
        KpiCard::new("Recovered from waste", format_mxn(result.recovered_revenue))
            .with_delta(format!("{:.1} pp", assumptions.waste_cut_pp), true),
        KpiCard::new("Pricing uplift", format_mxn(result.pricing_revenue))
            .with_delta(format!("{:.1}%", assumptions.seasonal_uplift_pct * 100.0), true),
        KpiCard::new("Total impact", format_mxn(result.total_impact)),
    ]
}

pub fn campaign_cards(summary: &CampaignSummary) -> Vec<KpiCard> {
    let improving = summary.delta_pp >= 0.0;
    vec![
        KpiCard::new(
            "Campaign conversion rate",
            format_pct(summary.aggregate_conversion_pct),
        ),
        KpiCard::new("Delta vs previous campaign", format_pp_signed(summary.delta_pp))
            .with_delta(
                format!(
                    "{} vs {}",
                    format_pct(summary.aggregate_conversion_pct),
                    format_pct(summary.previous_conversion_pct)
                ),
                improving,
            ),
    ]
}

pub fn channel_card(projection: &ChannelProjection) -> KpiCard {
    let rate = round_half_up(projection.channel.upsell_rate * 100.0);
    KpiCard::new(
        format!("Monthly upsell: {} (rate {rate}%)", projection.channel.label),
        format_mxn(projection.summary.upsell_total),
    )
    .with_delta(
        format!("Lift vs base: {}", format_pct(projection.summary.lift_pct)),
        true,
    )
}

/// Email clicks and WhatsApp chats per week (line chart).
pub fn interaction_series(report: &CampaignReport) -> Vec<ChartSeries> {
    let rows = &report.rows;
    vec![
        ChartSeries::build(
            "Email clicks",
            rows.iter().map(|r| (r.label.as_str(), r.email as f64)),
        ),
        ChartSeries::build(
            "WhatsApp chats",
            rows.iter().map(|r| (r.label.as_str(), r.whatsapp as f64)),
        ),
    ]
}

/// Weekly conversion percentage (line chart).
pub fn conversion_series(report: &CampaignReport) -> ChartSeries {
    ChartSeries::build(
        "Conversion %",
        report.rows.iter().map(|r| (r.label.as_str(), r.conversion_pct)),
    )
}

/// Base and upsell revenue per month (stacked bar chart).
pub fn channel_series(projection: &ChannelProjection) -> Vec<ChartSeries> {
    let rows = &projection.rows;
    vec![
        ChartSeries::build(
            "Base sales",
            rows.iter().map(|r| (r.month.as_str(), r.base_revenue)),
        ),
        ChartSeries::build(
            "Upsell",
            rows.iter().map(|r| (r.month.as_str(), r.upsell_revenue)),
        ),
    ]
}

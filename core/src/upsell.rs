//! Monthly upsell projector: per-channel baseline revenue shaped by
//! a fixed promotional calendar and a small deterministic wobble,
//! plus the upsell each channel earns on top.
//!
//! RULE: no external randomness. `noise` is a pure function of the
//! month index so identical inputs always give identical charts.

use crate::{
    error::{DashError, DashResult},
    format::{round1, safe_pct},
    types::{MonthIndex, Mxn, Pct, MONTHS_PER_YEAR, MONTH_LABELS},
};
use serde::{Deserialize, Serialize};

/// Mar/Apr promotion ×1.10, Nov/Dec holidays ×1.25, otherwise ×1.0.
pub fn seasonal_multiplier(month: MonthIndex) -> f64 {
    match month {
        2 | 3   => 1.10,
        10 | 11 => 1.25,
        _       => 1.0,
    }
}

/// Reproducible ±2% perturbation: 1 + (((month × 7) mod 5) − 2) / 100.
pub fn noise(month: MonthIndex) -> f64 {
    let offset = ((month * 7) % 5) as f64 - 2.0;
    1.0 + offset / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub id:                      String,
    pub label:                   String,
    pub average_monthly_revenue: Mxn,
    /// Upsell as a fraction of base revenue (0.08 = 8%).
    pub upsell_rate:             f64,
}

impl Channel {
    pub fn physical_store() -> Self {
        Self {
            id:                      "store".into(),
            label:                   "Physical stores".into(),
            average_monthly_revenue: 8_000_000.0,
            upsell_rate:             0.08,
        }
    }

    pub fn web() -> Self {
        Self {
            id:                      "web".into(),
            label:                   "Web".into(),
            average_monthly_revenue: 3_000_000.0,
            upsell_rate:             0.12,
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        let ok = self.average_monthly_revenue.is_finite()
            && self.average_monthly_revenue >= 0.0
            && self.upsell_rate.is_finite()
            && self.upsell_rate >= 0.0;
        if ok {
            Ok(())
        } else {
            Err(DashError::InvalidDataset {
                reason: format!(
                    "channel '{}': average {} and rate {} must be finite and non-negative",
                    self.id, self.average_monthly_revenue, self.upsell_rate
                ),
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsellData {
    pub channels: Vec<Channel>,
}

impl UpsellData {
    pub fn validate(&self) -> DashResult<()> {
        if self.channels.is_empty() {
            return Err(DashError::InvalidDataset {
                reason: "no upsell channels configured".into(),
            });
        }
        self.channels.iter().try_for_each(Channel::validate)
    }
}

impl Default for UpsellData {
    fn default() -> Self {
        Self {
            channels: vec![Channel::physical_store(), Channel::web()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub month:          String,
    pub base_revenue:   Mxn,
    pub upsell_revenue: Mxn,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelSummary {
    pub base_total:   Mxn,
    pub upsell_total: Mxn,
    pub lift_pct:     Pct,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelProjection {
    pub channel: Channel,
    pub rows:    Vec<MonthlyRow>,
    pub summary: ChannelSummary,
}

pub fn project_channel(channel: &Channel) -> ChannelProjection {
    let rows: Vec<MonthlyRow> = (0..MONTHS_PER_YEAR)
        .map(|m| {
            let base_revenue = channel.average_monthly_revenue * seasonal_multiplier(m) * noise(m);
            MonthlyRow {
                month: MONTH_LABELS[m].to_string(),
                base_revenue,
                upsell_revenue: base_revenue * channel.upsell_rate,
            }
        })
        .collect();

    let base_total: Mxn = rows.iter().map(|r| r.base_revenue).sum();
    let upsell_total: Mxn = rows.iter().map(|r| r.upsell_revenue).sum();
    let lift_pct = round1(safe_pct(upsell_total, base_total));

    log::debug!(
        "upsell[{}]: base={base_total:.0} upsell={upsell_total:.0} lift={lift_pct:.1}%",
        channel.id
    );

    ChannelProjection {
        channel: channel.clone(),
        rows,
        summary: ChannelSummary { base_total, upsell_total, lift_pct },
    }
}

/// Channels are projected independently, in configuration order.
pub fn project(data: &UpsellData) -> Vec<ChannelProjection> {
    data.channels.iter().map(project_channel).collect()
}

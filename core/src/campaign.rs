//! Weekly campaign aggregator: WhatsApp chats and email clicks
//! against purchases, per week and for the whole campaign.
//!
//! POLICY: the campaign conversion rate is total purchases over total
//! interactions. It is NOT the mean of the weekly rates.

use crate::{
    error::{DashError, DashResult},
    format::{round1, safe_pct},
    types::{Pct, Pp},
};
use serde::{Deserialize, Serialize};

pub const PREVIOUS_CONVERSION_PCT: Pct = 11.0;

/// Raw counts for one campaign week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyInput {
    pub label:     String,
    pub whatsapp:  u64,
    pub email:     u64,
    pub purchases: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignData {
    pub weeks: Vec<WeeklyInput>,
    /// Reference rate of the previous campaign.
    pub previous_conversion_pct: Pct,
}

impl CampaignData {
    pub fn validate(&self) -> DashResult<()> {
        if self.weeks.is_empty() {
            return Err(DashError::InvalidDataset {
                reason: "campaign has no weeks".into(),
            });
        }
        if !self.previous_conversion_pct.is_finite() || self.previous_conversion_pct < 0.0 {
            return Err(DashError::InvalidDataset {
                reason: format!(
                    "previous conversion {} is not a valid percentage",
                    self.previous_conversion_pct
                ),
            });
        }
        self.checked_totals().map(|_| ()).ok_or_else(|| DashError::InvalidDataset {
            reason: "campaign counts overflow when summed".into(),
        })
    }

    /// Total interactions and purchases, or `None` if any sum overflows.
    fn checked_totals(&self) -> Option<(u64, u64)> {
        self.weeks.iter().try_fold((0u64, 0u64), |(i, p), w| {
            let interactions = w.whatsapp.checked_add(w.email)?;
            Some((i.checked_add(interactions)?, p.checked_add(w.purchases)?))
        })
    }
}

impl Default for CampaignData {
    fn default() -> Self {
        const WHATSAPP:  [u64; 8] = [120, 150, 165, 180, 210, 230, 205, 260];
        const EMAIL:     [u64; 8] = [200, 215, 225, 240, 255, 270, 245, 280];
        const PURCHASES: [u64; 8] = [35, 40, 44, 50, 62, 68, 58, 78];

        let weeks = (0..8)
            .map(|i| WeeklyInput {
                label:     format!("Week {}", i + 1),
                whatsapp:  WHATSAPP[i],
                email:     EMAIL[i],
                purchases: PURCHASES[i],
            })
            .collect();

        Self {
            weeks,
            previous_conversion_pct: PREVIOUS_CONVERSION_PCT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRow {
    pub label:          String,
    pub whatsapp:       u64,
    pub email:          u64,
    pub interactions:   u64,
    pub purchases:      u64,
    pub conversion_pct: Pct,
}

impl WeeklyRow {
    fn from_input(week: &WeeklyInput) -> Self {
        let interactions = week.whatsapp.saturating_add(week.email);
        Self {
            label: week.label.clone(),
            whatsapp: week.whatsapp,
            email: week.email,
            interactions,
            purchases: week.purchases,
            conversion_pct: round1(safe_pct(week.purchases as f64, interactions as f64)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub total_interactions:       u64,
    pub total_purchases:          u64,
    pub aggregate_conversion_pct: Pct,
    pub previous_conversion_pct:  Pct,
    /// Signed difference against the previous campaign.
    pub delta_pp:                 Pp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignReport {
    pub rows:    Vec<WeeklyRow>,
    pub summary: CampaignSummary,
}

pub fn aggregate(data: &CampaignData) -> CampaignReport {
    let rows: Vec<WeeklyRow> = data.weeks.iter().map(WeeklyRow::from_input).collect();

    let (total_interactions, total_purchases) = rows
        .iter()
        .fold((0u64, 0u64), |(i, p), r| {
            (i.saturating_add(r.interactions), p.saturating_add(r.purchases))
        });

    let aggregate_conversion_pct =
        round1(safe_pct(total_purchases as f64, total_interactions as f64));
    let delta_pp = round1(aggregate_conversion_pct - data.previous_conversion_pct);

    log::debug!(
        "campaign: weeks={} interactions={total_interactions} purchases={total_purchases} \
         conv={aggregate_conversion_pct:.1}% delta={delta_pp:+.1}pp",
        rows.len()
    );

    CampaignReport {
        rows,
        summary: CampaignSummary {
            total_interactions,
            total_purchases,
            aggregate_conversion_pct,
            previous_conversion_pct: data.previous_conversion_pct,
            delta_pp,
        },
    }
}

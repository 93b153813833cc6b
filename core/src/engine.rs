//! The dashboard state, owner of the assumption set and every
//! derived result.
//!
//! RULES:
//!   - The assumption set is the only mutable input.
//!   - Each command changes at most one parameter, then the macro
//!     result is recomputed in full before `apply` returns.
//!   - Campaign and upsell results depend only on the dataset, so
//!     they are computed once at construction.

use crate::{
    assumptions::{AssumptionSet, Parameter},
    campaign::{self, CampaignReport},
    command::DashboardCommand,
    config::DashboardConfig,
    error::DashResult,
    event::DashboardEvent,
    kpi,
    macro_roi::{self, MacroResult},
    snapshot::{AssumptionReadout, ChannelView, DashboardSnapshot, FOOTER_NOTE},
    upsell::{self, ChannelProjection},
};

pub struct Dashboard {
    config:       DashboardConfig,
    assumptions:  AssumptionSet,
    macro_result: MacroResult,
    campaign:     CampaignReport,
    channels:     Vec<ChannelProjection>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let assumptions = AssumptionSet::from_ranges(&config.parameters);
        let macro_result = macro_roi::compute(&assumptions);
        let campaign = campaign::aggregate(&config.campaign);
        let channels = upsell::project(&config.upsell);
        log::debug!(
            "Dashboard built: total_impact={:.1} campaign_conv={:.1}% channels={}",
            macro_result.total_impact,
            campaign.summary.aggregate_conversion_pct,
            channels.len()
        );
        Self { config, assumptions, macro_result, campaign, channels }
    }

    /// Dashboard over the built-in demo dataset.
    pub fn with_defaults() -> Self {
        Self::new(DashboardConfig::default())
    }

    /// Apply one input event and recompute synchronously.
    pub fn apply(&mut self, command: DashboardCommand) -> DashResult<Vec<DashboardEvent>> {
        let mut events = Vec::new();

        match command {
            DashboardCommand::SetAssumption { parameter, value } => {
                let outcome = self.assumptions.set(&self.config.parameters, parameter, value)?;
                if outcome.clamped {
                    log::debug!(
                        "{parameter}: requested {value} constrained to {}",
                        outcome.new_value
                    );
                }
                events.push(DashboardEvent::AssumptionChanged {
                    parameter,
                    old_value: outcome.old_value,
                    new_value: outcome.new_value,
                    clamped:   outcome.clamped,
                });
            }
            DashboardCommand::ResetAssumptions => {
                self.assumptions.reset(&self.config.parameters);
                events.push(DashboardEvent::AssumptionsReset);
            }
        }

        self.recompute();
        events.push(DashboardEvent::MacroRecomputed {
            total_impact: self.macro_result.total_impact,
        });
        Ok(events)
    }

    /// Shorthand for `apply(SetAssumption { .. })`.
    pub fn set(&mut self, parameter: Parameter, value: f64) -> DashResult<Vec<DashboardEvent>> {
        self.apply(DashboardCommand::SetAssumption { parameter, value })
    }

    fn recompute(&mut self) {
        self.macro_result = macro_roi::compute(&self.assumptions);
        log::debug!("Macro recomputed: total_impact={:.1}", self.macro_result.total_impact);
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn assumptions(&self) -> &AssumptionSet {
        &self.assumptions
    }

    pub fn macro_result(&self) -> &MacroResult {
        &self.macro_result
    }

    pub fn campaign(&self) -> &CampaignReport {
        &self.campaign
    }

    pub fn channels(&self) -> &[ChannelProjection] {
        &self.channels
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let assumptions = Parameter::ALL
            .iter()
            .map(|p| {
                let value = self.assumptions.get(*p);
                AssumptionReadout {
                    parameter: *p,
                    label:     p.label().to_string(),
                    value,
                    display:   p.display_value(value),
                    range:     self.config.parameters.get(*p),
                }
            })
            .collect();

        let channels = self
            .channels
            .iter()
            .map(|projection| ChannelView {
                projection: projection.clone(),
                card:       kpi::channel_card(projection),
                series:     kpi::channel_series(projection),
            })
            .collect();

        DashboardSnapshot {
            assumptions,
            macro_result:       self.macro_result,
            macro_cards:        kpi::macro_cards(&self.macro_result, &self.assumptions),
            campaign:           self.campaign.clone(),
            campaign_cards:     kpi::campaign_cards(&self.campaign.summary),
            interaction_series: kpi::interaction_series(&self.campaign),
            conversion_series:  kpi::conversion_series(&self.campaign),
            channels,
            footer:             FOOTER_NOTE.to_string(),
        }
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::with_defaults()
    }
}

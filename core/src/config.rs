//! Dataset configuration: slider ranges and the synthetic series.
//!
//! `DashboardConfig::default()` is the built-in demo dataset.
//! `DashboardConfig::load(data_dir)` reads the same data from JSON:
//!   {data_dir}/assumptions/parameters.json
//!   {data_dir}/campaign/weekly.json
//!   {data_dir}/upsell/channels.json

use crate::{
    assumptions::{ParameterRanges, ParameterSpec},
    campaign::CampaignData,
    error::DashResult,
    upsell::UpsellData,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
struct ParametersFile {
    parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub parameters: ParameterRanges,
    pub campaign:   CampaignData,
    pub upsell:     UpsellData,
}

impl DashboardConfig {
    pub fn load(data_dir: &str) -> DashResult<Self> {
        let path = format!("{data_dir}/assumptions/parameters.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: ParametersFile = serde_json::from_str(&content)?;
        let parameters = ParameterRanges::try_from(file.parameters)?;

        let campaign_path = format!("{data_dir}/campaign/weekly.json");
        let campaign_content = std::fs::read_to_string(&campaign_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {campaign_path}: {e}"))?;
        let campaign: CampaignData = serde_json::from_str(&campaign_content)?;

        let upsell_path = format!("{data_dir}/upsell/channels.json");
        let upsell_content = std::fs::read_to_string(&upsell_path)
            .map_err(|e| anyhow::anyhow!("Cannot read {upsell_path}: {e}"))?;
        let upsell: UpsellData = serde_json::from_str(&upsell_content)?;

        let config = Self { parameters, campaign, upsell };
        config.validate()?;

        log::info!(
            "Loaded dataset from {data_dir}: {} weeks, {} channels",
            config.campaign.weeks.len(),
            config.upsell.channels.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> DashResult<()> {
        for (parameter, range) in self.parameters.iter() {
            range.validate(parameter)?;
        }
        self.campaign.validate()?;
        self.upsell.validate()
    }
}

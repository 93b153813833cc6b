//! Macro ROI calculator: turns the assumption set into annual
//! revenue and impact figures.
//!
//! Pure and total: every input has already been range-constrained,
//! so there are no error conditions. Recomputed in full on every
//! assumption change.

use crate::{assumptions::AssumptionSet, types::Mxn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroResult {
    pub sold_kg:           f64,
    pub baseline_revenue:  Mxn,
    /// Kilograms no longer wasted after the waste cut.
    pub recovered_kg:      f64,
    /// Recovered kilograms sold at the near-expiry discount.
    pub recovered_revenue: Mxn,
    pub seasonal_revenue:  Mxn,
    /// Extra revenue from the seasonal price uplift.
    pub pricing_revenue:   Mxn,
    pub total_impact:      Mxn,
}

pub fn compute(a: &AssumptionSet) -> MacroResult {
    let sold_kg = a.annual_kg * (1.0 - a.base_waste_pct / 100.0);
    let baseline_revenue = sold_kg * a.price_per_kg;

    let recovered_kg = a.annual_kg * (a.waste_cut_pp / 100.0);
    let recovered_revenue = recovered_kg * a.price_per_kg * a.near_expiry_factor;

    let seasonal_revenue = baseline_revenue * a.seasonal_share;
    let pricing_revenue = seasonal_revenue * a.seasonal_uplift_pct * a.volume_retention;

    let total_impact = recovered_revenue + pricing_revenue;

    log::trace!(
        "macro: sold_kg={sold_kg:.0} baseline={baseline_revenue:.0} \
         recovered={recovered_revenue:.0} pricing={pricing_revenue:.1} total={total_impact:.1}"
    );

    MacroResult {
        sold_kg,
        baseline_revenue,
        recovered_kg,
        recovered_revenue,
        seasonal_revenue,
        pricing_revenue,
        total_impact,
    }
}

//! The assumption set: the only mutable input of the dashboard.
//!
//! RULE: every value reaching the formulas has passed through
//! `ParameterRange::constrain`, so the computation layer never sees
//! an out-of-range input and needs no error paths of its own.

use crate::{
    error::{DashError, DashResult},
    format::{format_thousands, round_half_up},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The eight slider-controlled assumptions.
/// Order matches the dashboard's input panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    AnnualKg,
    PricePerKg,
    BaseWastePct,
    WasteCutPp,
    NearExpiryFactor,
    SeasonalShare,
    SeasonalUpliftPct,
    VolumeRetention,
}

impl Parameter {
    pub const ALL: [Parameter; 8] = [
        Parameter::AnnualKg,
        Parameter::PricePerKg,
        Parameter::BaseWastePct,
        Parameter::WasteCutPp,
        Parameter::NearExpiryFactor,
        Parameter::SeasonalShare,
        Parameter::SeasonalUpliftPct,
        Parameter::VolumeRetention,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::AnnualKg          => "annual_kg",
            Self::PricePerKg        => "price_per_kg",
            Self::BaseWastePct      => "base_waste_pct",
            Self::WasteCutPp        => "waste_cut_pp",
            Self::NearExpiryFactor  => "near_expiry_factor",
            Self::SeasonalShare     => "seasonal_share",
            Self::SeasonalUpliftPct => "seasonal_uplift_pct",
            Self::VolumeRetention   => "volume_retention",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AnnualKg          => "Kg per year",
            Self::PricePerKg        => "Price per kg (MX$)",
            Self::BaseWastePct      => "Base waste (%)",
            Self::WasteCutPp        => "Waste cut (p.p.)",
            Self::NearExpiryFactor  => "Near-expiry price factor",
            Self::SeasonalShare     => "Seasonal share of sales",
            Self::SeasonalUpliftPct => "Seasonal price uplift",
            Self::VolumeRetention   => "Volume retention",
        }
    }

    /// Slider read-out text shown under each control.
    pub fn display_value(&self, value: f64) -> String {
        match self {
            Self::AnnualKg => {
                format!("{} kg", format_thousands(round_half_up(value).max(0) as u64))
            }
            Self::PricePerKg        => format!("MX$ {value:.0}"),
            Self::BaseWastePct      => format!("{value:.1}%"),
            Self::WasteCutPp        => format!("{value:.1} p.p."),
            Self::NearExpiryFactor  => format!("x {value:.2} of list price"),
            Self::SeasonalShare     => format!("{}%", round_half_up(value * 100.0)),
            Self::SeasonalUpliftPct => format!("{:.1}%", value * 100.0),
            Self::VolumeRetention   => format!("{}%", round_half_up(value * 100.0)),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parameter::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| DashError::UnknownParameter { name: s.to_string() })
    }
}

/// Valid range of one slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    pub min:     f64,
    pub max:     f64,
    pub step:    f64,
    pub default: f64,
}

impl ParameterRange {
    pub const fn new(min: f64, max: f64, step: f64, default: f64) -> Self {
        Self { min, max, step, default }
    }

    /// Clamp into [min, max] and snap to the nearest step counted from `min`.
    pub fn constrain(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        let snapped = (self.min + steps * self.step).min(self.max);
        // Strip accumulation noise like 0.6 + 4 * 0.05 = 0.8000000000000002.
        let places = decimal_places(self.step).max(decimal_places(self.min));
        let factor = 10f64.powi(places);
        (snapped * factor).round() / factor
    }

    pub fn validate(&self, parameter: Parameter) -> DashResult<()> {
        let finite = [self.min, self.max, self.step, self.default]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.step <= 0.0 || self.min > self.max {
            return Err(DashError::InvalidDataset {
                reason: format!("{parameter}: range {self:?} is malformed"),
            });
        }
        if self.default < self.min || self.default > self.max {
            return Err(DashError::InvalidDataset {
                reason: format!(
                    "{parameter}: default {} outside [{}, {}]",
                    self.default, self.min, self.max
                ),
            });
        }
        Ok(())
    }
}

/// Digits after the point in the shortest decimal form of `x` (0.125 -> 3).
fn decimal_places(x: f64) -> i32 {
    let text = x.abs().to_string();
    let places = text.split_once('.').map_or(0, |(_, frac)| frac.len());
    places.min(15) as i32
}

/// One entry of `assumptions/parameters.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub parameter: Parameter,
    #[serde(flatten)]
    pub range:     ParameterRange,
}

/// Range table for all eight parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ParameterSpec>", into = "Vec<ParameterSpec>")]
pub struct ParameterRanges {
    ranges: BTreeMap<Parameter, ParameterRange>,
}

impl ParameterRanges {
    pub fn get(&self, parameter: Parameter) -> ParameterRange {
        // Construction guarantees every parameter is present.
        self.ranges
            .get(&parameter)
            .copied()
            .unwrap_or_else(|| builtin_range(parameter))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Parameter, ParameterRange)> + '_ {
        self.ranges.iter().map(|(p, r)| (*p, *r))
    }
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            ranges: Parameter::ALL.iter().map(|p| (*p, builtin_range(*p))).collect(),
        }
    }
}

impl TryFrom<Vec<ParameterSpec>> for ParameterRanges {
    type Error = DashError;

    fn try_from(specs: Vec<ParameterSpec>) -> Result<Self, Self::Error> {
        let mut ranges = BTreeMap::new();
        for spec in specs {
            spec.range.validate(spec.parameter)?;
            if ranges.insert(spec.parameter, spec.range).is_some() {
                return Err(DashError::InvalidDataset {
                    reason: format!("{} listed more than once", spec.parameter),
                });
            }
        }
        if let Some(missing) = Parameter::ALL.iter().find(|p| !ranges.contains_key(*p)) {
            return Err(DashError::InvalidDataset {
                reason: format!("no range given for {missing}"),
            });
        }
        Ok(Self { ranges })
    }
}

impl From<ParameterRanges> for Vec<ParameterSpec> {
    fn from(table: ParameterRanges) -> Self {
        table
            .ranges
            .into_iter()
            .map(|(parameter, range)| ParameterSpec { parameter, range })
            .collect()
    }
}

/// Slider bounds of the original dashboard.
pub fn builtin_range(parameter: Parameter) -> ParameterRange {
    match parameter {
        Parameter::AnnualKg          => ParameterRange::new(1_000_000.0, 12_000_000.0, 100_000.0, 6_100_000.0),
        Parameter::PricePerKg        => ParameterRange::new(200.0, 1_000.0, 10.0, 400.0),
        Parameter::BaseWastePct      => ParameterRange::new(5.0, 15.0, 0.5, 10.0),
        Parameter::WasteCutPp        => ParameterRange::new(0.0, 3.0, 0.1, 1.0),
        Parameter::NearExpiryFactor  => ParameterRange::new(0.6, 0.9, 0.05, 0.8),
        Parameter::SeasonalShare     => ParameterRange::new(0.1, 0.5, 0.05, 0.30),
        Parameter::SeasonalUpliftPct => ParameterRange::new(0.0, 0.03, 0.005, 0.015),
        Parameter::VolumeRetention   => ParameterRange::new(0.9, 1.0, 0.01, 0.95),
    }
}

/// Result of a single slider move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetOutcome {
    pub parameter: Parameter,
    pub old_value: f64,
    pub new_value: f64,
    /// True when the requested value was moved by clamping or step snapping.
    pub clamped:   bool,
}

/// Current slider positions. Reset to defaults on reload; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssumptionSet {
    pub annual_kg:           f64,
    pub price_per_kg:        f64,
    pub base_waste_pct:      f64,
    /// Percentage points of waste removed.
    pub waste_cut_pp:        f64,
    /// Multiplier on list price for recovered near-expiry product.
    pub near_expiry_factor:  f64,
    /// Fraction of baseline revenue falling in the seasonal window.
    pub seasonal_share:      f64,
    /// Seasonal price uplift as a fraction (0.015 = 1.5%).
    pub seasonal_uplift_pct: f64,
    /// Fraction of seasonal volume retained after the uplift.
    pub volume_retention:    f64,
}

impl AssumptionSet {
    pub fn from_ranges(ranges: &ParameterRanges) -> Self {
        let mut set = Self::default();
        for (parameter, range) in ranges.iter() {
            *set.slot_mut(parameter) = range.default;
        }
        set
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::AnnualKg          => self.annual_kg,
            Parameter::PricePerKg        => self.price_per_kg,
            Parameter::BaseWastePct      => self.base_waste_pct,
            Parameter::WasteCutPp        => self.waste_cut_pp,
            Parameter::NearExpiryFactor  => self.near_expiry_factor,
            Parameter::SeasonalShare     => self.seasonal_share,
            Parameter::SeasonalUpliftPct => self.seasonal_uplift_pct,
            Parameter::VolumeRetention   => self.volume_retention,
        }
    }

    fn slot_mut(&mut self, parameter: Parameter) -> &mut f64 {
        match parameter {
            Parameter::AnnualKg          => &mut self.annual_kg,
            Parameter::PricePerKg        => &mut self.price_per_kg,
            Parameter::BaseWastePct      => &mut self.base_waste_pct,
            Parameter::WasteCutPp        => &mut self.waste_cut_pp,
            Parameter::NearExpiryFactor  => &mut self.near_expiry_factor,
            Parameter::SeasonalShare     => &mut self.seasonal_share,
            Parameter::SeasonalUpliftPct => &mut self.seasonal_uplift_pct,
            Parameter::VolumeRetention   => &mut self.volume_retention,
        }
    }

    /// Move one slider. The value is constrained to the parameter's range;
    /// non-finite input is rejected and leaves the set untouched.
    pub fn set(
        &mut self,
        ranges: &ParameterRanges,
        parameter: Parameter,
        value: f64,
    ) -> DashResult<SetOutcome> {
        if !value.is_finite() {
            return Err(DashError::NonFiniteValue {
                parameter: parameter.name().to_string(),
                value,
            });
        }
        let new_value = ranges.get(parameter).constrain(value);
        let slot = self.slot_mut(parameter);
        let old_value = *slot;
        *slot = new_value;
        Ok(SetOutcome {
            parameter,
            old_value,
            new_value,
            clamped: (new_value - value).abs() > 1e-9 * value.abs().max(1.0),
        })
    }

    pub fn reset(&mut self, ranges: &ParameterRanges) {
        *self = Self::from_ranges(ranges);
    }
}

impl Default for AssumptionSet {
    fn default() -> Self {
        Self {
            annual_kg:           6_100_000.0,
            price_per_kg:        400.0,
            base_waste_pct:      10.0,
            waste_cut_pp:        1.0,
            near_expiry_factor:  0.8,
            seasonal_share:      0.30,
            seasonal_uplift_pct: 0.015,
            volume_retention:    0.95,
        }
    }
}

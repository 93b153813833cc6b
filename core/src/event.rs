//! Change notifications emitted by the dashboard after each command.
//!
//! A presentation layer can redraw from the events alone or pull a
//! fresh snapshot; both views are consistent once `apply` returns.

use crate::{assumptions::Parameter, types::Mxn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    AssumptionChanged {
        parameter: Parameter,
        old_value: f64,
        new_value: f64,
        clamped:   bool,
    },
    AssumptionsReset,
    MacroRecomputed {
        total_impact: Mxn,
    },
}

impl DashboardEvent {
    /// Stable snake_case name, matching the serde tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::AssumptionChanged { .. } => "assumption_changed",
            Self::AssumptionsReset         => "assumptions_reset",
            Self::MacroRecomputed { .. }   => "macro_recomputed",
        }
    }
}

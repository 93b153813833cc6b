use crate::assumptions::Parameter;
use serde::{Deserialize, Serialize};

/// Input events relayed from the slider controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum DashboardCommand {
    SetAssumption {
        parameter: Parameter,
        value:     f64,
    },
    ResetAssumptions,
}

use serde::{Deserialize, Serialize};

use crate::enrich::Analysis;

/// A risk indicator attached to a finding. Serialized with the wire names
/// downstream tooling matches on (`WILDCARD_ACTION`, ...). New indicators
/// are new variants, not ad-hoc strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskFlag {
    WildcardAction,
    WildcardResource,
}

impl RiskFlag {
    /// Fixed additive score contribution.
    pub fn weight(&self) -> u32 {
        match self {
            Self::WildcardAction => 5,
            Self::WildcardResource => 3,
        }
    }
}

impl std::fmt::Display for RiskFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WildcardAction => write!(f, "WILDCARD_ACTION"),
            Self::WildcardResource => write!(f, "WILDCARD_RESOURCE"),
        }
    }
}

/// One resolved (role, policy, action, resource) grant — the unit of
/// analysis. `service` is always the action's namespace prefix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub role: String,
    pub policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    pub service: String,
    pub action: String,
    pub resource: String,
    #[serde(default)]
    pub flags: Vec<RiskFlag>,
}

impl Finding {
    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }

    /// True unless the action was a bare `*`, which has no service namespace.
    pub fn has_concrete_service(&self) -> bool {
        self.service != "*"
    }
}

/// A finding with its risk score fixed. Immutable once built, except for
/// the optional analysis text an enricher may attach afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredFinding {
    pub service: String,
    pub action: String,
    pub resource: String,
    pub flags: Vec<RiskFlag>,
    pub risk_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

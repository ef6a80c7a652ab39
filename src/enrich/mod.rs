//! Optional post-processing: an external text service explains individual
//! findings. The core defines the seam and the batch discipline — a
//! bounded number of findings, per-finding failures logged and skipped,
//! unparseable responses kept as degraded analyses rather than dropped.
//! Nothing here touches the scoring pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flags::RiskFlag;
use crate::report::Report;

/// Risk level assigned by the enrichment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" | "crit" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Analysis attached to a finding. A response that fails to parse is kept
/// verbatim as `Degraded` rather than discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Analysis {
    Structured(StructuredAnalysis),
    Degraded { raw_response: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    pub risk_level: RiskLevel,
    pub explanation: String,
    pub abuse_scenario: String,
    #[serde(default)]
    pub remediation_recommendations: Vec<String>,
}

/// What an enricher gets to see for one finding.
#[derive(Debug, Clone, Serialize)]
pub struct FindingContext<'a> {
    pub role: &'a str,
    pub service: &'a str,
    pub action: &'a str,
    pub resource: &'a str,
    pub risk_score: u32,
    pub flags: &'a [RiskFlag],
}

#[derive(Error, Debug)]
pub enum EnrichmentError {
    #[error("enrichment service error: {0}")]
    Service(String),

    #[error("enrichment request timed out")]
    Timeout,

    #[error("enrichment rate limited")]
    RateLimited,
}

/// An enricher turns one finding into raw analysis text. Implementations
/// own their transport, retry, and time-box policy; the core only consumes
/// the text or the error.
pub trait Enricher: Send + Sync {
    fn enrich(&self, finding: &FindingContext<'_>) -> Result<String, EnrichmentError>;
}

/// Parse raw analysis text, stripping accidental markdown fences. Falls
/// back to a degraded analysis carrying the raw text.
pub fn parse_analysis(text: &str) -> Analysis {
    let cleaned = text.replace("```json", "").replace("```", "");
    match serde_json::from_str::<StructuredAnalysis>(cleaned.trim()) {
        Ok(parsed) => Analysis::Structured(parsed),
        Err(e) => {
            tracing::debug!(error = %e, "analysis response did not parse, keeping raw text");
            Analysis::Degraded {
                raw_response: text.trim().to_string(),
            }
        }
    }
}

/// Counts for one enrichment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub enriched: usize,
    pub failed: usize,
}

/// Enrich at most `limit` findings, walking roles by total risk so the
/// budget goes to the riskiest grants first. A failing finding is logged
/// and skipped; the batch always runs to its bound.
pub fn enrich_report(
    report: &mut Report,
    enricher: &dyn Enricher,
    limit: usize,
) -> EnrichmentSummary {
    let mut summary = EnrichmentSummary::default();
    let mut budget = limit;

    for role_name in report.ranked_role_names() {
        if budget == 0 {
            break;
        }
        let Some(entry) = report.get_mut(&role_name) else {
            continue;
        };
        for finding in entry.findings.iter_mut() {
            if budget == 0 {
                break;
            }
            budget -= 1;

            let context = FindingContext {
                role: &role_name,
                service: &finding.service,
                action: &finding.action,
                resource: &finding.resource,
                risk_score: finding.risk_score,
                flags: &finding.flags,
            };
            match enricher.enrich(&context) {
                Ok(text) => {
                    finding.analysis = Some(parse_analysis(&text));
                    summary.enriched += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        role = %role_name,
                        action = %finding.action,
                        error = %e,
                        "enrichment failed for finding, continuing"
                    );
                    summary.failed += 1;
                }
            }
        }
    }

    summary
}
